//! Report returned by the synchronizer

use serde::{Deserialize, Serialize};

/// Outcome of a synchronization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Whether every action completed.
    pub success: bool,
    /// Actions taken, or in dry-run mode the actions that would be taken.
    /// Dry-run entries are prefixed with "[dry-run] Would ...".
    pub actions: Vec<String>,
}

impl SyncReport {
    pub fn success() -> Self {
        Self {
            success: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: String) -> Self {
        self.actions.push(action);
        self
    }
}
