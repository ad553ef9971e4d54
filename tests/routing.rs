mod common;

use futures::executor::{block_on, LocalPool};
use futures::task::LocalSpawnExt;
use serde_json::json;

use common::{admin_identity, harness, regular_identity, regular_login_json, session_json, teacher_json};
use yoga_studio_pwa::error::AppError;
use yoga_studio_pwa::services::Method;
use yoga_studio_pwa::viewmodels::SessionForm;
use yoga_studio_pwa::{App, LoadState, Page, PageAction, Resolution, Route};

#[test]
fn test_regular_user_cannot_open_create_form() {
    let h = harness();
    h.ctx.session.log_in(regular_identity());
    let mut app = App::new(h.ctx.clone());

    let activation = app.navigate("/sessions/create");

    assert_eq!(
        activation.resolution,
        Resolution::Redirected {
            requested: Route::SessionCreate,
            to: Route::Sessions
        }
    );
    assert!(activation.entry.is_none());
    assert_eq!(h.navigator.visited(), vec![Route::Sessions]);
    assert!(h.backend.requests().is_empty());
}

#[test]
fn test_regular_user_cannot_open_update_form() {
    let h = harness();
    h.ctx.session.log_in(regular_identity());
    let mut app = App::new(h.ctx.clone());

    let activation = app.navigate("/sessions/update/1");

    assert!(matches!(
        activation.resolution,
        Resolution::Redirected { to: Route::Sessions, .. }
    ));
    assert!(h.backend.requests().is_empty());
}

#[test]
fn test_anonymous_user_is_sent_to_login() {
    let h = harness();
    let mut app = App::new(h.ctx.clone());

    for path in ["/sessions", "/sessions/detail/1", "/me", "/sessions/create"] {
        let activation = app.navigate(path);
        assert!(matches!(
            activation.resolution,
            Resolution::Redirected { to: Route::Login, .. }
        ));
    }
    assert_eq!(h.navigator.visited(), vec![Route::Login; 4]);
    assert!(app.page().is_none());
    assert!(h.backend.requests().is_empty());
}

#[test]
fn test_logged_in_user_skips_login_and_register() {
    let h = harness();
    h.ctx.session.log_in(regular_identity());
    let mut app = App::new(h.ctx.clone());

    for path in ["/", "/login", "/register"] {
        let activation = app.navigate(path);
        assert!(matches!(
            activation.resolution,
            Resolution::Redirected { to: Route::Sessions, .. }
        ));
    }
    assert_eq!(h.navigator.visited(), vec![Route::Sessions; 3]);
}

#[test]
fn test_unknown_path_renders_not_found() {
    let h = harness();
    let mut app = App::new(h.ctx.clone());

    let activation = app.navigate("/teachers");
    assert_eq!(activation.resolution, Resolution::Activate(Route::NotFound));
    assert!(matches!(app.page(), Some(Page::NotFound)));
    assert!(h.navigator.visited().is_empty());
}

#[test]
fn test_admin_create_form_loads_teachers_on_entry() {
    let h = harness();
    h.ctx.session.log_in(admin_identity());
    h.backend.on(Method::Get, "/api/teacher", 200, json!([teacher_json(1), teacher_json(2)]));
    let mut app = App::new(h.ctx.clone());

    let activation = app.navigate("/sessions/create");
    assert_eq!(activation.resolution, Resolution::Activate(Route::SessionCreate));
    block_on(activation.entry.unwrap());

    match app.page() {
        Some(Page::SessionForm(vm)) => match vm.teachers() {
            LoadState::Ready(teachers) => assert_eq!(teachers.len(), 2),
            other => panic!("expected teachers, got {:?}", other),
        },
        _ => panic!("expected the session form"),
    }
    assert_eq!(h.backend.calls(), vec!["GET /api/teacher"]);
}

#[test]
fn test_detail_entry_loads_session() {
    let h = harness();
    h.ctx.session.log_in(regular_identity());
    h.backend.on(Method::Get, "/api/session/1", 200, session_json(1, &[2]));
    h.backend.on(Method::Get, "/api/teacher/1", 200, teacher_json(1));
    let mut app = App::new(h.ctx.clone());

    let activation = app.navigate("#/sessions/detail/1");
    block_on(activation.entry.unwrap());

    assert_eq!(app.current_route(), Some(Route::SessionDetail(1)));
    match app.page() {
        Some(Page::SessionDetail(vm)) => match vm.state() {
            LoadState::Ready(detail) => assert!(detail.is_participating),
            other => panic!("expected Ready, got {:?}", other),
        },
        _ => panic!("expected the detail page"),
    }
}

#[test]
fn test_leaving_a_page_discards_its_pending_load() {
    let h = harness();
    h.ctx.session.log_in(regular_identity());
    let release = h.backend.on_held(Method::Get, "/api/session/1", 200, session_json(1, &[]));
    h.backend.on(Method::Get, "/api/teacher/1", 200, teacher_json(1));
    h.backend.on(Method::Get, "/api/session", 200, json!([]));
    let mut app = App::new(h.ctx.clone());

    let mut pool = LocalPool::new();
    let activation = app.navigate("/sessions/detail/1");
    pool.spawner().spawn_local(activation.entry.unwrap()).unwrap();
    pool.run_until_stalled();

    let detail = match app.page() {
        Some(Page::SessionDetail(vm)) => vm.clone(),
        _ => panic!("expected the detail page"),
    };

    let activation = app.navigate("/sessions");
    pool.spawner().spawn_local(activation.entry.unwrap()).unwrap();
    let _ = release.send(());
    pool.run_until_stalled();

    assert!(detail.state().is_loading());
    assert_eq!(h.backend.count(Method::Get, "/api/teacher/1"), 0);
    match app.page() {
        Some(Page::Sessions(vm)) => assert_eq!(vm.sessions(), LoadState::Ready(Vec::new())),
        _ => panic!("expected the list page"),
    }
}

#[test]
fn test_toolbar_follows_login_status() {
    let h = harness();
    let mut app = App::new(h.ctx.clone());
    assert!(!app.is_logged());

    h.ctx.session.log_in(regular_identity());
    assert!(app.is_logged());

    app.logout();
    assert!(!app.is_logged());
    assert!(h.ctx.session.identity().is_none());
    assert_eq!(h.navigator.visited(), vec![Route::Home]);
}

#[test]
fn test_teardown_unmounts_and_clears_session() {
    let h = harness();
    h.ctx.session.log_in(regular_identity());
    let mut app = App::new(h.ctx.clone());
    let _ = app.navigate("/me");
    assert!(matches!(app.page(), Some(Page::Me(_))));

    app.teardown();
    assert!(app.page().is_none());
    assert!(!app.is_logged());
    assert!(h.ctx.session.identity().is_none());
}

#[test]
fn test_login_action_reaches_the_mounted_page() {
    let h = harness();
    h.backend.on(Method::Post, "/api/auth/login", 200, regular_login_json());
    let mut app = App::new(h.ctx.clone());
    let _ = app.navigate("/login");

    let task = app
        .dispatch(PageAction::Login {
            email: "yoga@studio.com".to_string(),
            password: "test!1234".to_string(),
        })
        .unwrap();
    block_on(task).unwrap();

    assert!(app.is_logged());
    assert_eq!(h.navigator.visited(), vec![Route::Sessions]);

    let snapshot = app.snapshot();
    assert_eq!(snapshot["route"], "/login");
    assert_eq!(snapshot["logged"], true);
    assert_eq!(snapshot["page"]["page"], "login");
    assert_eq!(snapshot["page"]["data"]["email"], "yoga@studio.com");
    assert!(snapshot["page"]["data"].get("password").is_none());
}

#[test]
fn test_detail_actions_and_snapshot() {
    let h = harness();
    h.ctx.session.log_in(regular_identity());
    h.backend.on(Method::Get, "/api/session/1", 200, session_json(1, &[]));
    h.backend.on(Method::Get, "/api/session/1", 200, session_json(1, &[2]));
    h.backend.on(Method::Get, "/api/teacher/1", 200, teacher_json(1));
    h.backend.on(Method::Post, "/api/session/1/participate/2", 200, serde_json::Value::Null);
    let mut app = App::new(h.ctx.clone());

    block_on(app.navigate("/sessions/detail/1").entry.unwrap());
    let snapshot = app.snapshot();
    let data = &snapshot["page"]["data"];
    assert_eq!(data["canParticipate"], true);
    assert_eq!(data["state"]["status"], "ready");
    assert_eq!(data["state"]["data"]["isParticipating"], false);

    block_on(app.dispatch(PageAction::Participate).unwrap()).unwrap();
    let snapshot = app.snapshot();
    let data = &snapshot["page"]["data"];
    assert_eq!(data["state"]["data"]["isParticipating"], true);
    assert_eq!(data["state"]["data"]["session"]["users"], json!([2]));

    block_on(app.dispatch(PageAction::Back).unwrap()).unwrap();
    assert_eq!(*h.navigator.backs.borrow(), 1);
}

#[test]
fn test_session_form_actions() {
    let h = harness();
    h.ctx.session.log_in(admin_identity());
    h.backend.on(Method::Get, "/api/teacher", 200, json!([teacher_json(1)]));
    h.backend.on(Method::Post, "/api/session", 200, session_json(4, &[]));
    let mut app = App::new(h.ctx.clone());

    block_on(app.navigate("/sessions/create").entry.unwrap());
    let fields = SessionForm {
        name: "Morning flow".to_string(),
        date: "2025-03-01".to_string(),
        teacher_id: Some(1),
        description: "Gentle vinyasa".to_string(),
    };
    block_on(app.dispatch(PageAction::EditSessionForm(fields)).unwrap()).unwrap();
    assert_eq!(app.snapshot()["page"]["data"]["form"]["data"]["teacherId"], 1);

    block_on(app.dispatch(PageAction::SubmitSessionForm).unwrap()).unwrap();
    assert_eq!(h.notifier.messages(), vec!["Session created !"]);
    assert_eq!(h.navigator.visited(), vec![Route::Sessions]);
}

#[test]
fn test_action_on_the_wrong_page_is_refused() {
    let h = harness();
    let mut app = App::new(h.ctx.clone());
    assert!(matches!(
        app.dispatch(PageAction::Retry),
        Err(AppError::Unavailable { page: "empty", .. })
    ));

    let _ = app.navigate("/login");
    assert!(matches!(
        app.dispatch(PageAction::Participate),
        Err(AppError::Unavailable {
            action: "participate",
            page: "login"
        })
    ));
    assert!(h.backend.requests().is_empty());
}
