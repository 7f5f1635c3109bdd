//! Normalization of process records.
//!
//! Every record read from storage and every record written back passes
//! through [`normalize`]. The pass only fills gaps and re-derives the
//! active flag, so applying it twice is the same as applying it once.

use tracing::warn;

use super::model::{Direction, Process, RawProcess, Stage, TransportMode};
use crate::ids;

/// Prefix for generated process identifiers.
pub const PROCESS_ID_PREFIX: &str = "process";

/// Fill every missing field of `raw` with its default and return a
/// consistent record.
pub fn normalize(raw: RawProcess) -> Process {
    let id = non_empty(raw.id).unwrap_or_else(|| ids::generate_id(PROCESS_ID_PREFIX));

    let stage = match non_empty(raw.stage) {
        None => Stage::first(),
        Some(s) => s.parse().unwrap_or_else(|_| {
            warn!(process_id = %id, stage = %s, "Unknown stage, using first stage");
            Stage::first()
        }),
    };

    let created_at = non_empty(raw.created_at).unwrap_or_else(ids::now_rfc3339);

    let direction = match non_empty(raw.direction) {
        None => Direction::default(),
        Some(s) => s.parse().unwrap_or_else(|_| {
            warn!(process_id = %id, direction = %s, "Unknown direction, using import");
            Direction::default()
        }),
    };

    let transport = match non_empty(raw.transport) {
        None => TransportMode::default(),
        Some(s) => s.parse().unwrap_or_else(|_| {
            warn!(process_id = %id, transport = %s, "Unknown transport mode, using sea");
            TransportMode::default()
        }),
    };

    // Only the counterpart matching the direction survives.
    let (importer, exporter) = match direction {
        Direction::Import => (Some(raw.importer.unwrap_or_default()), None),
        Direction::Export => (None, Some(raw.exporter.unwrap_or_default())),
    };

    Process {
        id,
        reference: raw.reference.unwrap_or_default(),
        direction,
        importer,
        exporter,
        acquirer: raw.acquirer.unwrap_or_default(),
        supplier: raw.supplier.unwrap_or_default(),
        client_reference: raw.client_reference.unwrap_or_default(),
        transport,
        stage,
        created_at,
        freight_agent: raw.freight_agent,
        active: stage.is_active(),
        order: raw.order.unwrap_or_else(ids::monotonic_nanos),
    }
}

/// Re-run the pass over an already complete record.
pub fn renormalize(process: Process) -> Process {
    normalize(process.into())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
