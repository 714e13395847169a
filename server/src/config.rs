use std::net::SocketAddr;
use std::path::PathBuf;

use error_stack::{Report, ResultExt};
use kernel::KernelError;

const BIND: &str = "CATALOG_BIND";
const LOG_DIR: &str = "CATALOG_LOG_DIR";
const POSTGRES_URL: &str = "POSTGRES_URL";

const DEFAULT_BIND: &str = "0.0.0.0:8080";
const DEFAULT_LOG_DIR: &str = "./logs/";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub log_dir: PathBuf,
    /// Selects the PostgreSQL store when set.
    pub postgres_url: Option<String>,
}

impl Config {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn load() -> error_stack::Result<Self, KernelError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> error_stack::Result<Self, KernelError> {
        let bind = lookup(BIND).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind
            .parse::<SocketAddr>()
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| format!("{BIND} is not a socket address: `{bind}`"))?;
        let log_dir = PathBuf::from(lookup(LOG_DIR).unwrap_or_else(|| DEFAULT_LOG_DIR.to_string()));
        let postgres_url = lookup(POSTGRES_URL).filter(|url| !url.trim().is_empty());
        if log_dir.as_os_str().is_empty() {
            return Err(Report::new(KernelError::Internal)
                .attach_printable(format!("{LOG_DIR} is empty")));
        }
        Ok(Self {
            bind,
            log_dir,
            postgres_url,
        })
    }
}
