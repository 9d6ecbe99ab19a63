use std::fmt;
use colored::Colorize;

/// Declaration-time configuration mistakes. These are programmer errors in
/// the CLI declaration, detected before any output is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyGroupName,
    NonPositiveOption {
        name: String,
    },
    AlreadyGrouped {
        option: String,
        first: String,
        second: String,
    },
    EmptyGroup {
        group: String,
    },
}

/// Render-time contract violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A render was attempted against a formatter that does not implement
    /// the aligned-column layout contract.
    TypeMismatch,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyGroupName => {
                write!(f, "{}: an option group requires a non-empty name", "error".red().bold())
            }

            ConfigError::NonPositiveOption { name } => {
                write!(
                    f,
                    "{}: formatter option '{}' must be a positive integer",
                    "error".red().bold(),
                    name.yellow()
                )
            }

            ConfigError::AlreadyGrouped { option, first, second } => {
                write!(
                    f,
                    "{}: option '{}' is already a member of group '{}' and cannot join group '{}'",
                    "error".red().bold(),
                    option.yellow(),
                    first.blue(),
                    second.blue()
                )
            }

            ConfigError::EmptyGroup { group } => {
                write!(
                    f,
                    "{}: option group '{}' was declared with zero options",
                    "error".red().bold(),
                    group.blue()
                )
            }
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::TypeMismatch => {
                write!(
                    f,
                    "{}: this renderer aligns help sections and requires a HelpFormatter; \
                     the supplied formatter does not implement that contract",
                    "error".red().bold()
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for FormatError {}
