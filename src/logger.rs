use colored::*;
use log::{Level, LevelFilter};
use std::fmt::Display;
use std::io::Write;

/// Logging setup and a couple of inline color helpers.
///
/// Everything goes to stderr so stdout stays clean for the link list.
/// Color scheme: brand blue (14, 173, 221) for the info marker and highlights.
pub struct Logger;

impl Logger {
    /// Installs the env_logger backend. `RUST_LOG` still wins if set.
    pub fn init(verbose: bool) {
        let default_level = if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };

        let _ = env_logger::Builder::new()
            .filter_level(default_level)
            .parse_default_env()
            .format(|buf, record| {
                writeln!(buf, "{} {}", Self::marker(record.level()), record.args())
            })
            .try_init();
    }

    fn marker(level: Level) -> ColoredString {
        match level {
            Level::Error => "✖".red().bold(),
            Level::Warn => "⚠".yellow().bold(),
            Level::Info => "•".truecolor(14, 173, 221).bold(),
            Level::Debug | Level::Trace => "·".dimmed(),
        }
    }

    /// Returns a string colored in brand blue (for inline use).
    pub fn highlight<T: Display>(msg: T) -> String {
        msg.to_string().truecolor(14, 173, 221).bold().to_string()
    }
}
