use std::path::PathBuf;

use kitbot::infrastructure::environment;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub fn init_logging() {
    let env_file = load_env_file();
    init_subscriber();
    info!("Starting kitbot...");
    log_env_file_result(env_file);
}

fn init_subscriber() {
    let filter = EnvFilter::try_from_env(environment::KITBOT_LOG)
        .unwrap_or_else(|_| EnvFilter::new("warn,kitbot=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_env_file() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

fn log_env_file_result(env_file: Option<PathBuf>) {
    if let Some(path) = env_file {
        info!("Loaded environment variables from {}", path.display());
    } else {
        info!("No .env file found, proceeding with system environment variables.");
    }
}
