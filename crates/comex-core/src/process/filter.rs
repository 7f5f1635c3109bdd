//! Search and direction filtering for display.

use super::model::{Direction, Process};

/// Display filter. Never changes stored records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessFilter {
    /// Case-insensitive substring matched against reference, counterpart,
    /// acquirer, supplier and client reference.
    pub search: Option<String>,
    /// Restrict to one direction tab.
    pub direction: Option<Direction>,
}

impl ProcessFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn matches(&self, process: &Process) -> bool {
        if let Some(direction) = self.direction {
            if process.direction != direction {
                return false;
            }
        }

        let term = match self.search.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_lowercase(),
            _ => return true,
        };

        [
            process.reference.as_str(),
            process.counterpart(),
            process.acquirer.as_str(),
            process.supplier.as_str(),
            process.client_reference.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
    }

    /// Matching records, in their given order.
    pub fn apply(&self, processes: &[Process]) -> Vec<Process> {
        processes.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}
