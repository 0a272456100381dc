use std::{
    fs,
    io::{self, IsTerminal},
    path::Path,
};

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub mod formatter;
pub mod writer;

pub use formatter::*;
pub use writer::*;

use crate::configs::LoggingConfig;

/// Builds the filter directive string from the logging section.
///
/// `RUST_LOG` still takes precedence over whatever this returns.
pub fn filter_directives(config: Option<&LoggingConfig>) -> String {
    let level = config.and_then(|l| l.level.as_deref()).unwrap_or("info");
    let filters = config.and_then(|l| l.filters.as_deref()).unwrap_or("");

    // hyper and rustls are chatty at debug
    if filters.is_empty() {
        format!("{},hyper=warn,rustls=warn", level)
    } else {
        format!("{},hyper=warn,rustls=warn,{}", level, filters)
    }
}

/// Colour only goes to an interactive terminal, never to a pipe or file.
pub fn ansi_enabled<T: IsTerminal>(stream: &T) -> bool {
    stream.is_terminal()
}

pub fn init(config: Option<&LoggingConfig>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(config)));

    let use_ansi = ansi_enabled(&io::stderr());
    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .event_format(LineFormatter::new(use_ansi))
        .with_ansi(use_ansi);

    let file_layer = config.and_then(|l| l.file.as_ref()).map(|file_config| {
        if let Some(parent) = Path::new(&file_config.path).parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("Failed to create log directory: {}", e);
            }
        }

        fmt::layer()
            .with_writer(CappedFileWriter::new(
                file_config.path.clone(),
                file_config.max_lines,
            ))
            .event_format(LineFormatter::new(false))
            .with_ansi(false)
    });

    // A second init (tests, embedding hosts) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirected_output_gets_no_colour() {
        let file = tempfile::tempfile().unwrap();
        assert!(!ansi_enabled(&file));
    }

    #[test]
    fn default_directives_use_info() {
        assert_eq!(filter_directives(None), "info,hyper=warn,rustls=warn");
    }

    #[test]
    fn configured_level_and_filters_are_appended() {
        let config = LoggingConfig {
            level: Some("debug".to_string()),
            filters: Some("lixget::lixstream=trace".to_string()),
            file: None,
        };
        assert_eq!(
            filter_directives(Some(&config)),
            "debug,hyper=warn,rustls=warn,lixget::lixstream=trace"
        );
    }
}
