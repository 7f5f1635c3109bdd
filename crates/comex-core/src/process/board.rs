//! Kanban board view: processes bucketed into stage columns.

use serde::{Deserialize, Serialize};

use super::filter::ProcessFilter;
use super::model::{Process, Stage};
use super::ordering::sort_by_order;

/// The board, one column per stage in pipeline order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub columns: Vec<BoardColumn>,
}

/// A column on the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardColumn {
    pub stage: Stage,
    pub processes: Vec<Process>,
}

impl Board {
    /// Filter, sort by order key, then distribute by stage.
    pub fn build(processes: &[Process], filter: &ProcessFilter) -> Self {
        let mut visible = filter.apply(processes);
        sort_by_order(&mut visible);

        let columns = Stage::ALL
            .iter()
            .map(|&stage| BoardColumn {
                stage,
                processes: visible.iter().filter(|p| p.stage == stage).cloned().collect(),
            })
            .collect();

        Self { columns }
    }

    pub fn column(&self, stage: Stage) -> Option<&BoardColumn> {
        self.columns.iter().find(|c| c.stage == stage)
    }

    pub fn total(&self) -> usize {
        self.columns.iter().map(|c| c.processes.len()).sum()
    }

    /// Processes outside the closed column.
    pub fn active(&self) -> usize {
        self.columns
            .iter()
            .filter(|c| c.stage.is_active())
            .map(|c| c.processes.len())
            .sum()
    }
}
