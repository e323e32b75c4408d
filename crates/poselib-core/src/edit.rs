//! Snapshot-based document editing with undo/redo.
//!
//! Every edit is an explicit [`EditCommand`] applied through an
//! [`EditSession`]. Applying a command produces a fresh document snapshot
//! and pushes the previous one onto the undo stack; the session never
//! exposes a half-applied document, so allocation always runs against a
//! consistent snapshot.
//!
//! A command whose category or pose index does not exist in the current
//! snapshot is a no-op: it changes nothing and records no history entry.
//! Stale indices held across an undo therefore cannot fault.

use crate::library::{PoseCategory, PoseEntry, PoseLibrary, TrackingSetting, WriteDefaultPolicy};

/// A single edit operation over a library document.
///
/// Insertion indices may equal the current length (append); all other
/// indices must address an existing element.
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    RenameLibrary { name: String },
    SetWriteDefault { policy: WriteDefaultPolicy },
    AddCategory { index: usize, category: PoseCategory },
    RemoveCategory { index: usize },
    RenameCategory { index: usize, name: String },
    MoveCategory { from: usize, to: usize },
    ReplaceCategory { index: usize, category: PoseCategory },
    ClearPoses { category: usize },
    AddPose { category: usize, index: usize, pose: PoseEntry },
    RemovePose { category: usize, index: usize },
    RenamePose { category: usize, index: usize, name: String },
    MovePose { category: usize, from: usize, to: usize },
    ReplacePose { category: usize, index: usize, pose: PoseEntry },
    SetTracking { category: usize, index: usize, tracking: TrackingSetting },
}

impl EditCommand {
    /// History label for this command.
    pub fn label(&self) -> &'static str {
        match self {
            EditCommand::RenameLibrary { .. } => "Rename Library",
            EditCommand::SetWriteDefault { .. } => "Set Write Defaults",
            EditCommand::AddCategory { .. } => "Add Category",
            EditCommand::RemoveCategory { .. } => "Remove Category",
            EditCommand::RenameCategory { .. } => "Rename Category",
            EditCommand::MoveCategory { .. } => "Move Category",
            EditCommand::ReplaceCategory { .. } => "Paste Category",
            EditCommand::ClearPoses { .. } => "Clear Poses",
            EditCommand::AddPose { .. } => "Add Pose",
            EditCommand::RemovePose { .. } => "Remove Pose",
            EditCommand::RenamePose { .. } => "Rename Pose",
            EditCommand::MovePose { .. } => "Move Pose",
            EditCommand::ReplacePose { .. } => "Paste Pose",
            EditCommand::SetTracking { .. } => "Edit Tracking",
        }
    }

    /// Applies the command to a snapshot, returning the next snapshot,
    /// or `None` when any index is out of bounds for `library`.
    fn apply_to(&self, library: &PoseLibrary) -> Option<PoseLibrary> {
        let mut next = library.clone();
        match self {
            EditCommand::RenameLibrary { name } => {
                next.name = name.clone();
            }
            EditCommand::SetWriteDefault { policy } => {
                next.write_default = *policy;
            }
            EditCommand::AddCategory { index, category } => {
                if *index > next.categories.len() {
                    return None;
                }
                next.categories.insert(*index, category.clone());
            }
            EditCommand::RemoveCategory { index } => {
                if *index >= next.categories.len() {
                    return None;
                }
                next.categories.remove(*index);
            }
            EditCommand::RenameCategory { index, name } => {
                next.categories.get_mut(*index)?.name = name.clone();
            }
            EditCommand::MoveCategory { from, to } => {
                if *from >= next.categories.len() || *to >= next.categories.len() || from == to {
                    return None;
                }
                let category = next.categories.remove(*from);
                next.categories.insert(*to, category);
            }
            EditCommand::ReplaceCategory { index, category } => {
                *next.categories.get_mut(*index)? = category.clone();
            }
            EditCommand::ClearPoses { category } => {
                next.categories.get_mut(*category)?.poses = Vec::new();
            }
            EditCommand::AddPose { category, index, pose } => {
                let poses = &mut next.categories.get_mut(*category)?.poses;
                if *index > poses.len() {
                    return None;
                }
                poses.insert(*index, pose.clone());
            }
            EditCommand::RemovePose { category, index } => {
                let poses = &mut next.categories.get_mut(*category)?.poses;
                if *index >= poses.len() {
                    return None;
                }
                poses.remove(*index);
            }
            EditCommand::RenamePose { category, index, name } => {
                next.categories.get_mut(*category)?.poses.get_mut(*index)?.name = name.clone();
            }
            EditCommand::MovePose { category, from, to } => {
                let poses = &mut next.categories.get_mut(*category)?.poses;
                if *from >= poses.len() || *to >= poses.len() || from == to {
                    return None;
                }
                let pose = poses.remove(*from);
                poses.insert(*to, pose);
            }
            EditCommand::ReplacePose { category, index, pose } => {
                *next.categories.get_mut(*category)?.poses.get_mut(*index)? = pose.clone();
            }
            EditCommand::SetTracking { category, index, tracking } => {
                next.categories
                    .get_mut(*category)?
                    .poses
                    .get_mut(*index)?
                    .tracking = tracking.clone();
            }
        }
        Some(next)
    }
}

/// Whether an applied command changed the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The command was applied and recorded in the history.
    Applied,
    /// The command addressed elements that do not exist; nothing changed.
    NoOp,
}

/// A labeled snapshot on the undo or redo stack.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// The label of the command this snapshot precedes.
    pub label: &'static str,
    /// The document state before (undo) or after (redo) that command.
    pub snapshot: PoseLibrary,
}

/// An editing session over one library document.
#[derive(Debug, Clone)]
pub struct EditSession {
    current: PoseLibrary,
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
}

impl EditSession {
    /// Opens a session on the given document.
    pub fn new(library: PoseLibrary) -> Self {
        Self {
            current: library,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// The current document snapshot.
    pub fn library(&self) -> &PoseLibrary {
        &self.current
    }

    /// Consumes the session, returning the current snapshot.
    pub fn into_library(self) -> PoseLibrary {
        self.current
    }

    /// Applies a command. A no-op records nothing and clears nothing.
    pub fn apply(&mut self, command: EditCommand) -> EditOutcome {
        let Some(next) = command.apply_to(&self.current) else {
            return EditOutcome::NoOp;
        };
        self.undo_stack.push(HistoryEntry {
            label: command.label(),
            snapshot: std::mem::replace(&mut self.current, next),
        });
        self.redo_stack.clear();
        EditOutcome::Applied
    }

    /// Steps back one edit. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(HistoryEntry {
            label: entry.label,
            snapshot: std::mem::replace(&mut self.current, entry.snapshot),
        });
        true
    }

    /// Re-applies the most recently undone edit.
    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(HistoryEntry {
            label: entry.label,
            snapshot: std::mem::replace(&mut self.current, entry.snapshot),
        });
        true
    }

    /// True when the undo stack is non-empty.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// True when the redo stack is non-empty.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Label of the edit `undo` would revert.
    pub fn undo_label(&self) -> Option<&'static str> {
        self.undo_stack.last().map(|e| e.label)
    }
}
