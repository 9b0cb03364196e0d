use std::io::Read;
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use postlog_server::{LogServer, ServerConfig, LOG_RECEIVED};
use postlog_sink::{FileDestination, FileOptions, LogSink, SyncMode};
use postlog_types::{LogRecord, SourceId};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Append(args) => cmd_append(args),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    println!(
        "postlog on {} → {}",
        config.bind_addr.to_string().bold(),
        config.log_path.display().to_string().cyan()
    );

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    runtime
        .block_on(LogServer::new(config).serve_with_shutdown(shutdown_signal()))
        .context("server exited with an error")
}

/// File values first (or defaults), then any flags given on the command line.
fn resolve_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(path) = &args.log_file {
        config.log_path = path.clone();
    }
    if let Some(max) = args.max_body_bytes {
        config.max_body_bytes = max;
    }
    if let Some(depth) = args.max_depth {
        config.max_depth = depth;
    }
    if let Some(format) = args.format {
        config.line_format = format;
    }
    if args.sync {
        config.sync_mode = SyncMode::EveryWrite;
    }
    Ok(config)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for Ctrl-C; serving until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

fn cmd_append(args: AppendArgs) -> anyhow::Result<()> {
    let text = if args.json == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading JSON from stdin")?;
        buf
    } else {
        args.json.clone()
    };
    append_text(&args, &text)?;
    println!(
        "{} {} → {}",
        "✓".green().bold(),
        LOG_RECEIVED,
        args.log_file.display().to_string().cyan()
    );
    Ok(())
}

fn append_text(args: &AppendArgs, text: &str) -> anyhow::Result<()> {
    let record = LogRecord::from_slice(text.as_bytes())?;
    let sync_mode = if args.sync { SyncMode::EveryWrite } else { SyncMode::OsDefault };
    let destination = FileDestination::new(&args.log_file, FileOptions { sync_mode });
    let sink = LogSink::with_format(Arc::new(destination), args.format);
    let source = args.source.as_deref().map(SourceId::from);
    sink.record_from(&record, source.as_ref())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use postlog_types::LineFormat;
    use serde_json::Value;
    use std::fs;

    fn serve_args(argv: &[&str]) -> ServeArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Command::Serve(args) => args,
            _ => panic!("wrong command"),
        }
    }

    fn append_args(argv: &[&str]) -> AppendArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Command::Append(args) => args,
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn resolve_defaults() {
        let config = resolve_config(&serve_args(&["postlog", "serve"])).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("postlog.toml");
        fs::write(
            &file,
            concat!(
                "bind_addr = \"127.0.0.1:7000\"\n",
                "log_path = \"from-file.txt\"\n",
                "line_format = \"envelope\"\n",
            ),
        )
        .unwrap();
        let file_arg = file.to_str().unwrap();

        let config = resolve_config(&serve_args(&[
            "postlog", "serve", "--config", file_arg, "--log-file", "from-flag.txt", "--sync",
            "--max-depth", "40",
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 7000);
        assert_eq!(config.log_path.to_str(), Some("from-flag.txt"));
        assert_eq!(config.line_format, LineFormat::Envelope);
        assert_eq!(config.sync_mode, SyncMode::EveryWrite);
        assert_eq!(config.max_depth, 40);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let missing = missing.to_str().unwrap();
        let result = resolve_config(&serve_args(&["postlog", "serve", "--config", missing]));
        assert!(result.is_err());
    }

    #[test]
    fn append_writes_one_line() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("logs.txt");
        let log_arg = log.to_str().unwrap();
        let args = append_args(&["postlog", "append", "unused", "--log-file", log_arg]);

        append_text(&args, r#"{"user": "alice", "action": "login"}"#).unwrap();
        append_text(&args, "null").unwrap();

        assert_eq!(
            fs::read_to_string(&log).unwrap(),
            "{\"user\":\"alice\",\"action\":\"login\"}\nnull\n"
        );
    }

    #[test]
    fn append_envelope_with_source() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("logs.txt");
        let args = append_args(&[
            "postlog", "append", "unused", "--log-file", log.to_str().unwrap(),
            "--format", "envelope", "--source", "nightly-backup",
        ]);

        append_text(&args, r#"{"ok":true}"#).unwrap();

        let contents = fs::read_to_string(&log).unwrap();
        let line: Value = serde_json::from_str(contents.trim_end()).unwrap();
        assert_eq!(line["source"], "nightly-backup");
        assert_eq!(line["payload"]["ok"], true);
    }

    #[test]
    fn append_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("logs.txt");
        let log_arg = log.to_str().unwrap();
        let args = append_args(&["postlog", "append", "unused", "--log-file", log_arg]);

        assert!(append_text(&args, "not json").is_err());
        assert!(!log.exists());
    }
}
