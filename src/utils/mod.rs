use dirs::home_dir;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
    sync::Once,
};

const DEFAULT_DIR_NAME: &str = ".bank_core";

static TRACING_INIT: Once = Once::new();

/// Returns the application-specific data directory, defaulting to
/// `~/.bank_core`. Overridable via the `BANK_CORE_HOME` environment
/// variable.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("BANK_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Creates the directory (and parents) when it does not exist yet.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::from_default_env().add_directive("bank_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}
