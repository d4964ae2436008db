//! Logging setup for the command line

use colored::Colorize;
use fern::{Dispatch, FormatCallback};
use log::{Level, LevelFilter, Record, SetLoggerError};
use std::fmt;
use std::io::stderr;
use std::path::Path;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

static DATE_TIME_FORMAT: &[FormatItem] =
    format_description!("[year]/[month]/[day] [hour]:[minute]:[second].[subsecond digits:4]");

/// Provides helpful logging args for clap clis
#[derive(Debug, Default, Clone, clap::Args)]
#[clap(next_help_heading = "Log Level")]
pub struct LoggingArgs {
    /// Only display error level log messages
    #[clap(short, long)]
    #[clap(conflicts_with_all(&["warn", "info", "debug", "trace"]))]
    #[clap(display_order = 1)]
    #[clap(global = true)]
    error: bool,

    /// Display warning and above level log messages
    #[clap(short, long)]
    #[clap(conflicts_with_all(&["error", "info", "debug", "trace"]))]
    #[clap(display_order = 2)]
    #[clap(global = true)]
    warn: bool,

    /// Display info and above level log messages
    #[clap(short, long)]
    #[clap(conflicts_with_all(&["error", "warn", "debug", "trace"]))]
    #[clap(display_order = 3)]
    #[clap(global = true)]
    info: bool,

    /// Display debug and above level log messages
    #[clap(long)]
    #[clap(conflicts_with_all(&["error", "warn", "info", "trace"]))]
    #[clap(display_order = 4)]
    #[clap(global = true)]
    debug: bool,

    /// Display trace and above level log messages
    #[clap(long)]
    #[clap(conflicts_with_all(&["error", "warn", "info", "debug"]))]
    #[clap(display_order = 5)]
    #[clap(global = true)]
    trace: bool,
}

/// How much decoration goes in front of a message
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OutputType {
    /// Just the coloured level
    Basic,
    /// The level and a time stamp
    TimeOnly,
    /// Level, time stamp and the source file and line of the message
    Complicated,
}

impl LoggingArgs {
    /// Get the level filter and output type from this args. Defaults to warnings, as a host
    /// running the hook only cares about the output on stdout.
    pub fn config_from_settings(&self) -> (LevelFilter, OutputType) {
        if self.error {
            (LevelFilter::Error, OutputType::Basic)
        } else if self.warn {
            (LevelFilter::Warn, OutputType::Basic)
        } else if self.info {
            (LevelFilter::Info, OutputType::TimeOnly)
        } else if self.debug {
            (LevelFilter::Debug, OutputType::Complicated)
        } else if self.trace {
            (LevelFilter::Trace, OutputType::Complicated)
        } else {
            (LevelFilter::Warn, OutputType::Basic)
        }
    }

    /// Installs the global logger. Messages go to stderr, stdout is reserved for command output.
    pub fn init_logger(&self) -> Result<(), SetLoggerError> {
        let (filter, output_mode) = self.config_from_settings();

        Dispatch::new()
            .format(message_format(output_mode))
            .level(filter)
            .chain(stderr())
            .apply()
    }
}

fn message_format(
    output_mode: OutputType,
) -> impl Fn(FormatCallback, &fmt::Arguments, &Record) + Sync + Send + 'static {
    move |out, message, record| {
        out.finish(format_args!(
            "{} {}",
            format_prefix(output_mode, record),
            message
        ))
    }
}

fn format_prefix(output_mode: OutputType, record: &Record) -> String {
    let level_string = record.level().to_string().to_lowercase();
    let level_string = match record.level() {
        Level::Error => level_string.red(),
        Level::Warn => level_string.yellow(),
        Level::Info => level_string.green(),
        Level::Debug => level_string.blue(),
        Level::Trace => level_string.bright_black(),
    };
    match output_mode {
        OutputType::Basic => format!("{}:", level_string),
        OutputType::TimeOnly => format!("[{}] {}:", timestamp(), level_string),
        OutputType::Complicated => {
            let file_path = Path::new(record.file().unwrap_or("unknown"));
            format!(
                "[{} {}{} {}]",
                timestamp(),
                file_path
                    .file_name()
                    .and_then(|s| s.to_str())
                    .unwrap_or("unknown"),
                record
                    .line()
                    .map(|l| format!(":{l}"))
                    .unwrap_or_default(),
                level_string
            )
        }
    }
}

fn timestamp() -> String {
    let time = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    time.format(DATE_TIME_FORMAT).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_by_default() {
        let (filter, mode) = LoggingArgs::default().config_from_settings();
        assert_eq!(filter, LevelFilter::Warn);
        assert_eq!(mode, OutputType::Basic);
    }

    #[test]
    fn debug_shows_source() {
        let args = LoggingArgs {
            debug: true,
            ..Default::default()
        };
        assert_eq!(
            args.config_from_settings(),
            (LevelFilter::Debug, OutputType::Complicated)
        );
    }
}
