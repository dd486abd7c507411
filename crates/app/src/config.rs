//! CLI configuration

use std::path::PathBuf;

use clap::Args;
use medistore::ids::{IdPolicy, UserId};

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        env = "LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact,
        global = true
    )]
    pub log_format: LogFormat,
}

/// Document storage settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory holding the catalog, order and cart documents
    #[arg(long, env = "MEDISTORE_DATA_DIR", default_value = ".medistore", global = true)]
    pub data_dir: PathBuf,

    /// Id allocation policy (monotonic, reuse-freed)
    #[arg(long, env = "MEDISTORE_ID_POLICY", default_value = "monotonic", global = true)]
    pub id_policy: IdPolicy,
}

/// Shopper identity for cart and checkout commands.
#[derive(Debug, Args)]
pub struct UserConfig {
    /// Shopper id
    #[arg(long, env = "MEDISTORE_USER", default_value = "user123")]
    pub user: UserId,
}
