mod commands;
mod history;

use thiserror::Error;

use crate::element::ElementId;

pub use commands::Command;
pub use history::CommandHistory;

/// Result type for command operations
pub type CommandResult<T = ()> = Result<T, CommandError>;

/// Errors that can occur while replaying history.
///
/// These mean the document no longer matches what the log recorded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("element {0} is not in the document")]
    ElementNotFound(ElementId),

    #[error("cannot restore element {id} at index {index}")]
    IndexOutOfBounds { id: ElementId, index: usize },
}
