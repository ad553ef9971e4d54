use std::env;
use std::fs;
use std::path::Path;

// Only keys with this prefix are forwarded to `option_env!` in src/config.rs
const ENV_PREFIX: &str = "YOGA_";

fn main() {
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                let Some((key, value)) = line.split_once('=') else {
                    println!("cargo:warning=Ignoring malformed .env line: {}", line);
                    continue;
                };

                let key = key.trim();
                let value = value.trim().trim_matches('"');

                if !key.starts_with(ENV_PREFIX) {
                    println!("cargo:warning=Ignoring .env key without {} prefix: {}", ENV_PREFIX, key);
                    continue;
                }

                // Real environment wins over .env
                if env::var(key).is_err() {
                    println!("cargo:rustc-env={}={}", key, value);
                }
            }
        }
    } else {
        println!("cargo:warning=No .env file found, using built-in defaults (same-origin backend).");
    }

    println!("cargo:rerun-if-changed=build.rs");
    for key in [
        "YOGA_BACKEND_URL_DEVELOPMENT",
        "YOGA_BACKEND_URL_PRODUCTION",
        "YOGA_ENVIRONMENT",
        "YOGA_ENABLE_LOGGING",
        "YOGA_LOG_LEVEL",
        "YOGA_SNACKBAR_DURATION_MS",
    ] {
        println!("cargo:rerun-if-env-changed={}", key);
    }
}
