use crate::utils::output::OutputStyle;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration required! Set the MAME install directory with 'mame-dl config mamedir [PATH]'.")]
    ConfigMissing,

    #[error("No database! Run 'mame-dl update' to generate it.")]
    CatalogueMissing,

    #[error("{problem}: {}", .path.display())]
    InvalidDirectory {
        path: PathBuf,
        problem: DirectoryProblem,
    },

    #[error("No such machine '{0}' was found")]
    UnknownMachine(String),

    #[error("'{0}' doesn't exist in the roms directory")]
    UnknownFile(String),

    #[error("Request to {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Unknown config option {0}")]
    UnknownConfigKey(String),

    #[error("Invalid search pattern: {0}")]
    InvalidPattern(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("System error: {0}")]
    System(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Why a candidate install root was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryProblem {
    Missing,
    NoRomsFolder,
}

impl fmt::Display for DirectoryProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryProblem::Missing => write!(f, "Invalid directory"),
            DirectoryProblem::NoRomsFolder => write!(
                f,
                "That path exists, but it isn't a 'roms' directory, nor does it contain one. \
                 Are you sure you specified a path to a MAME installation?"
            ),
        }
    }
}

/// Result type alias for consistent error handling across the application
pub type AppResult<T> = Result<T, AppError>;

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

pub fn report_error(err: &AppError) {
    match err {
        AppError::ConfigMissing | AppError::CatalogueMissing => {
            println!("⚠️  {}", OutputStyle::warning(&err.to_string()));
        }
        AppError::UnknownMachine(_) | AppError::UnknownFile(_) => {
            println!("- {}", OutputStyle::error(&err.to_string()));
        }
        AppError::Fetch { .. } | AppError::Network(_) => {
            println!("🌐 {}", OutputStyle::error(&err.to_string()));
        }
        AppError::InvalidDirectory { .. }
        | AppError::UnknownConfigKey(_)
        | AppError::InvalidPattern(_) => {
            println!("❌ {}", OutputStyle::error(&err.to_string()));
        }
        AppError::Io(msg) | AppError::Serialization(msg) | AppError::System(msg) => {
            println!("❌ {}", OutputStyle::error(msg));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, AppError::Io(ref msg) if msg.contains("gone")));
    }

    #[test]
    fn test_messages_name_the_subject() {
        assert_eq!(
            AppError::UnknownMachine("sonic".to_string()).to_string(),
            "No such machine 'sonic' was found"
        );
        assert!(AppError::UnknownConfigKey("colour".to_string())
            .to_string()
            .contains("colour"));
    }
}
