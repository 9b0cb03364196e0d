use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use postlog_server::config::DEFAULT_LOG_PATH;
use postlog_types::LineFormat;

#[derive(Parser)]
#[command(
    name = "postlog",
    about = "Append JSON posted to /log onto a local file",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP listener
    Serve(ServeArgs),
    /// Append one JSON document to the log file
    Append(AppendArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML config file; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    #[arg(long)]
    pub max_body_bytes: Option<usize>,
    /// Deepest array/object nesting accepted in a body
    #[arg(long)]
    pub max_depth: Option<usize>,
    /// raw | envelope
    #[arg(long)]
    pub format: Option<LineFormat>,
    /// fsync after every append
    #[arg(long)]
    pub sync: bool,
}

#[derive(Args)]
pub struct AppendArgs {
    /// JSON document, or `-` to read it from stdin
    pub json: String,
    #[arg(long, default_value = DEFAULT_LOG_PATH)]
    pub log_file: PathBuf,
    /// raw | envelope
    #[arg(long, default_value_t = LineFormat::Raw)]
    pub format: LineFormat,
    /// Source tag, rendered by the envelope format
    #[arg(long)]
    pub source: Option<String>,
    #[arg(long)]
    pub sync: bool,
}
