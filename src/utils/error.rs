use crate::domain::model::RecordKind;
use thiserror::Error;

/// Why a single input line was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("initial letter mismatch: expected {expected}, found {found:?}")]
    InitialLetterMismatch { expected: char, found: String },

    #[error("too many fields: expected at most {expected} but found {found}")]
    TooManyFields { expected: usize, found: usize },

    #[error("empty line")]
    EmptyLine,

    #[error("family attached with no person")]
    OrphanFamily,

    #[error("{0} attached with no target")]
    OrphanContact(RecordKind),

    #[error("unknown record kind {0:?}")]
    UnknownRecordKind(char),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number in the input text.
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SerializeError {
    #[error("not a plain structure: {0}")]
    NotPlainStructure(String),

    #[error("cyclic structure at <{0}>")]
    CyclicStructure(String),
}

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Serialize error: {0}")]
    Serialize(#[from] SerializeError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Input is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value {value:?} for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Output,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ConvertError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::Parse(_) | ConvertError::InvalidEncoding(_) => ErrorCategory::Input,
            ConvertError::Serialize(_) | ConvertError::SerializationError(_) => {
                ErrorCategory::Output
            }
            ConvertError::ConfigError { .. }
            | ConvertError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ConvertError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit status for this failure. Never zero.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ConvertError::Parse(e) => match e.kind {
                ParseErrorKind::EmptyLine => {
                    "Remove blank lines, including a trailing newline at the end of the file"
                }
                ParseErrorKind::OrphanFamily | ParseErrorKind::OrphanContact(_) => {
                    "Start the input with a P line before any F, T or A line"
                }
                ParseErrorKind::TooManyFields { .. } => {
                    "Check the number of |-separated fields for this record kind"
                }
                ParseErrorKind::InitialLetterMismatch { .. }
                | ParseErrorKind::UnknownRecordKind(_) => {
                    "Each line must start with P, F, T or A followed by |"
                }
            },
            ConvertError::Serialize(_) | ConvertError::SerializationError(_) => {
                "The record tree could not be rendered; check for shared or cyclic nodes"
            }
            ConvertError::IoError(_) => "Check that the input file exists and is readable",
            ConvertError::InvalidEncoding(_) => "Save the input file as UTF-8 text",
            ConvertError::ConfigError { .. }
            | ConvertError::InvalidConfigValueError { .. } => {
                "Check the command line options and the configuration file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ConvertError::Parse(e) => format!("Invalid input at line {}: {}", e.line, e.kind),
            ConvertError::Serialize(e) => format!("Could not render document: {}", e),
            ConvertError::IoError(e) => format!("File access failed: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_contains_line_and_reason() {
        let err = ParseError {
            line: 3,
            kind: ParseErrorKind::OrphanContact(RecordKind::Phone),
        };
        assert_eq!(err.to_string(), "line 3: phone attached with no target");
    }

    #[test]
    fn test_severity_drives_exit_code() {
        let parse: ConvertError = ParseError {
            line: 1,
            kind: ParseErrorKind::EmptyLine,
        }
        .into();
        assert_eq!(parse.category(), ErrorCategory::Input);
        assert_eq!(parse.exit_code(), 1);

        let config = ConvertError::ConfigError {
            message: "bad option".to_string(),
        };
        assert_eq!(config.exit_code(), 2);

        let io: ConvertError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert_eq!(io.severity(), ErrorSeverity::Critical);
        assert_eq!(io.exit_code(), 3);
    }

    #[test]
    fn test_user_friendly_message_for_parse_error() {
        let err: ConvertError = ParseError {
            line: 2,
            kind: ParseErrorKind::UnknownRecordKind('Z'),
        }
        .into();
        assert_eq!(
            err.user_friendly_message(),
            "Invalid input at line 2: unknown record kind 'Z'"
        );
    }
}
