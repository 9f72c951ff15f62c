//! Error taxonomy for option lookup, parsing, and application.

use larch_platform::PlatformError;
use thiserror::Error;

/// Where an option value came from during record initialization. Recorded in
/// [`OptionError::Init`] so the failure message names the offending source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueSource {
    /// Per-window theme/option database entry.
    ThemeDatabase,
    /// Platform-wide system default.
    SystemDefault,
    /// Default string from the option table itself.
    TableDefault,
}

impl ValueSource {
    fn label(self) -> &'static str {
        match self {
            ValueSource::ThemeDatabase => "database entry",
            ValueSource::SystemDefault => "system default",
            ValueSource::TableDefault => "default value",
        }
    }
}

/// Errors produced by the option engine.
///
/// `Processing` and `Init` wrap an inner error with context naming the option
/// being handled, matching the annotated messages widget code reports to
/// users.
#[derive(Debug, Error)]
pub enum OptionError {
    #[error("unknown option \"{0}\"")]
    UnknownOption(String),

    /// An abbreviation matched two or more distinct option names.
    #[error("ambiguous option \"{0}\"")]
    AmbiguousOption(String),

    /// An option name at the end of an argument list had no value after it.
    #[error("value for \"{0}\" missing")]
    MissingValue(String),

    /// A value failed to parse for its declared kind. The message is
    /// complete on its own ("expected integer or \"\" but got ...").
    #[error("{0}")]
    Parse(String),

    /// The platform refused to allocate a resource for a value.
    #[error("{source} (option \"{option}\")")]
    Allocation {
        option: &'static str,
        source: PlatformError,
    },

    /// A window-dependent kind was applied without a window.
    #[error("option \"{0}\" requires a window")]
    WindowRequired(&'static str),

    /// Failure while applying one name/value pair of a batch.
    #[error("{source}\n    (processing \"{option}\" option)")]
    Processing {
        option: String,
        source: Box<OptionError>,
    },

    /// Failure while initializing a record from defaults.
    #[error("{source}\n    ({} for \"{option}\"{})", .source_kind.label(), widget_suffix(.window))]
    Init {
        option: &'static str,
        source_kind: ValueSource,
        window: Option<String>,
        source: Box<OptionError>,
    },
}

fn widget_suffix(window: &Option<String>) -> String {
    match window {
        Some(path) => format!(" in widget \"{path}\""),
        None => String::new(),
    }
}
