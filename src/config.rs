use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "faidx-server")]
#[command(about = "Serve subsequences of indexed FASTA files")]
pub struct Config {
    /// Host address to bind to
    #[arg(long, env = "FAIDX_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "FAIDX_PORT", default_value = "8080")]
    pub port: u16,

    /// Directory containing <id>.fa files and their .fai indexes
    #[arg(long, env = "FAIDX_DATA_DIR", default_value = "./data")]
    pub data_dir: PathBuf,

    /// Enable CORS for all origins
    #[arg(long, env = "FAIDX_CORS", default_value = "true")]
    pub cors: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
