//! CLI arguments and server configuration defaults.

use clap::Parser;
use shadow_rs::formatcp;

use crate::build;

const VERSION_INFO: &str = formatcp!(
    r#"{}\ncommit_hash: {}\nbuild_time: {}\nbuild_env: {},{}"#,
    build::PKG_VERSION,
    build::SHORT_COMMIT,
    build::BUILD_TIME,
    build::RUST_VERSION,
    build::RUST_CHANNEL
);

pub const DEFAULT_STORAGE_DIR: &str = "files";
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";
pub const DEFAULT_HTTP_PORT: u16 = 8080;
pub const UPLOAD_FORM_TEMPLATE: &str = "upload.html";
pub const UPLOAD_FIELD_NAME: &str = "file";
#[cfg(unix)]
pub const STORAGE_DIR_MODE: u32 = 0o755;
pub const SHUTDOWN_GRACE_SECS: u64 = 10;

/// CLI arguments and environment configuration for the server.
#[derive(Parser, Debug)]
#[command(name = "filedrop", version = VERSION_INFO, about = "Filedrop upload server")]
pub struct Args {
    #[arg(
        short = 's',
        long,
        env = "FILEDROP_STORAGE_DIR",
        default_value = DEFAULT_STORAGE_DIR,
        help = "Directory uploaded files are stored in"
    )]
    pub storage_dir: String,
    #[arg(
        short = 't',
        long,
        env = "FILEDROP_TEMPLATES_DIR",
        default_value = DEFAULT_TEMPLATES_DIR,
        help = "Directory holding the upload form template"
    )]
    pub templates_dir: String,
    #[arg(
        short = 'b',
        long,
        env = "FILEDROP_BIND",
        default_value = "0.0.0.0",
        help = "Bind address"
    )]
    pub host: String,
    #[arg(
        short = 'p',
        long,
        env = "FILEDROP_PORT",
        default_value_t = DEFAULT_HTTP_PORT,
        help = "HTTP port"
    )]
    pub port: u16,
    #[arg(long, env = "FILEDROP_CORS_ORIGINS", help = "Comma separated CORS origins")]
    pub cors_origins: Option<String>,
}
