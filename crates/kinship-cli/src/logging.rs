use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

use crate::CliError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Install the global subscriber.
///
/// Events go to stderr unless `path` is given, in which case they are
/// appended to that file. Stdout is left alone because it may carry the
/// generated document. `RUST_LOG` overrides the default `info` level.
pub fn init_logging(format: LogFormat, path: Option<&Path>) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let make_writer = match path {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(io::stderr),
    };
    let ansi = path.is_none();

    let layer = match format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_timer(UtcTime::rfc_3339())
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_ansi(ansi)
            .with_timer(UtcTime::rfc_3339())
            .with_writer(make_writer)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_events_to_log_file() {
        let path = std::env::temp_dir().join(format!("kinship_cli_{}.log", uuid::Uuid::new_v4()));
        std::fs::write(&path, "previous run\n").expect("seed log file");

        init_logging(LogFormat::Json, Some(&path)).expect("install subscriber");
        tracing::warn!(event = "log_file_check", "written to file");

        let content = std::fs::read_to_string(&path).expect("read log file");
        assert!(content.starts_with("previous run\n"), "{content}");
        assert!(content.contains("log_file_check"), "{content}");
        let _ = std::fs::remove_file(&path);
    }
}
