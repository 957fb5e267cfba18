use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Machine-readable error codes surfaced in CLI JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotInitialized,
    ConfigParseError,
    DataFileParseError,
    ItemNotFound,
    InvalidEnumValue,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotInitialized => "E1001",
            Self::ConfigParseError => "E1002",
            Self::DataFileParseError => "E1003",
            Self::ItemNotFound => "E2001",
            Self::InvalidEnumValue => "E2002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Optional remediation hint surfaced alongside the error.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NotInitialized => Some("Run `dsp init` to create a data root here."),
            Self::ConfigParseError => Some("Fix syntax in .dispatch/config.toml and retry."),
            Self::DataFileParseError => {
                Some("Re-export the collection or fix the JSON by hand, then retry.")
            }
            Self::ItemNotFound => None,
            Self::InvalidEnumValue => Some("Use one of the documented kind/view values."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Typed domain errors for operations that can fail.
///
/// The pure pipeline stages (normalize/filter/bucket) never produce these;
/// only the surrounding I/O and lookup surfaces do.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no .dispatch/ data root found in {root}")]
    NotInitialized { root: PathBuf },

    #[error("failed to parse config file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse data file {path}")]
    DataFileParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no work item with id '{id}'")]
    ItemNotFound { id: String },

    #[error("invalid {expected}: '{got}'")]
    InvalidEnumValue { expected: &'static str, got: String },
}

impl DispatchError {
    /// The stable machine code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotInitialized { .. } => ErrorCode::NotInitialized,
            Self::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Self::DataFileParse { .. } => ErrorCode::DataFileParseError,
            Self::ItemNotFound { .. } => ErrorCode::ItemNotFound,
            Self::InvalidEnumValue { .. } => ErrorCode::InvalidEnumValue,
        }
    }

    /// Remediation hint, falling back to a generic retry message.
    #[must_use]
    pub fn suggestion(&self) -> String {
        self.error_code()
            .hint()
            .unwrap_or("Check the id with `dsp list` and retry.")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{DispatchError, ErrorCode};
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::NotInitialized,
            ErrorCode::ConfigParseError,
            ErrorCode::DataFileParseError,
            ErrorCode::ItemNotFound,
            ErrorCode::InvalidEnumValue,
            ErrorCode::InternalUnexpected,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::DataFileParseError.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn item_not_found_has_a_suggestion() {
        let err = DispatchError::ItemNotFound {
            id: "wo-9".to_string(),
        };
        assert_eq!(err.error_code(), ErrorCode::ItemNotFound);
        assert!(err.suggestion().contains("dsp list"));
        assert!(err.to_string().contains("wo-9"));
    }
}
