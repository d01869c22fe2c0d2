use log::{debug, info};

use super::{Command, CommandResult};
use crate::document::Document;

/// Linear undo/redo log.
///
/// Entries before `position` are applied, entries from `position` on can be
/// redone. Recording while entries are waiting to be redone discards them.
#[derive(Debug, Default)]
pub struct CommandHistory {
    entries: Vec<Command>,
    position: usize,
}

impl CommandHistory {
    /// Creates a new empty command history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an action that has already been applied.
    ///
    /// Elements only reachable through discarded create entries are purged
    /// from the document.
    pub fn record(&mut self, command: Command, document: &mut Document) {
        if self.position < self.entries.len() {
            let discarded: Vec<Command> = self.entries.drain(self.position..).collect();
            debug!("Discarding {} redoable entries", discarded.len());
            for id in discarded.iter().filter_map(Command::created) {
                document.purge(id);
            }
        }

        debug!("Recording {} at position {}", command.name(), self.position);
        self.entries.push(command);
        self.position += 1;
    }

    /// Undo the last applied entry. Returns false when there is nothing to undo.
    pub fn undo(&mut self, document: &mut Document) -> CommandResult<bool> {
        if self.position == 0 {
            return Ok(false);
        }
        let entry = &self.entries[self.position - 1];
        entry.undo(document)?;
        self.position -= 1;
        info!("Undid {} ({}/{})", entry.name(), self.position, self.entries.len());
        Ok(true)
    }

    /// Re-apply the next undone entry. Returns false when there is nothing to redo.
    pub fn redo(&mut self, document: &mut Document) -> CommandResult<bool> {
        let Some(entry) = self.entries.get(self.position) else {
            return Ok(false);
        };
        entry.redo(document)?;
        self.position += 1;
        info!("Redid {} ({}/{})", entry.name(), self.position, self.entries.len());
        Ok(true)
    }

    /// Returns true if there are commands that can be undone
    pub fn can_undo(&self) -> bool {
        self.position > 0
    }

    /// Returns true if there are commands that can be redone
    pub fn can_redo(&self) -> bool {
        self.position < self.entries.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Command] {
        &self.entries
    }

    /// Clear the command history
    pub fn clear(&mut self) {
        self.entries.clear();
        self.position = 0;
    }
}
