//! Demonstration processes used when no collection can be loaded.

use super::model::{Process, RawProcess};
use super::normalize::normalize;

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

/// Three processes spread over the first stages of the pipeline.
pub fn demo_processes() -> Vec<Process> {
    vec![
        RawProcess {
            id: text("process-1"),
            reference: text("IMP-2023-001"),
            direction: text("import"),
            importer: text("Empresa ABC Ltda"),
            acquirer: text("ABC Comércio"),
            supplier: text("Shanghai Trading Co."),
            client_reference: text("PO-45678"),
            transport: text("sea"),
            stage: text("awaiting-shipment"),
            created_at: text("2023-06-15T10:30:00Z"),
            freight_agent: text("Global Shipping"),
            order: Some(1000),
            ..Default::default()
        },
        RawProcess {
            id: text("process-2"),
            reference: text("IMP-2023-002"),
            direction: text("import"),
            importer: text("Indústrias XYZ"),
            acquirer: text("XYZ Manufatura"),
            supplier: text("German Machines GmbH"),
            client_reference: text("REF-9876"),
            transport: text("air"),
            stage: text("in-transit"),
            created_at: text("2023-06-20T14:15:00Z"),
            order: Some(1000),
            ..Default::default()
        },
        RawProcess {
            id: text("process-3"),
            reference: text("EXP-2023-001"),
            direction: text("export"),
            exporter: text("Produtos Brasileiros S.A."),
            acquirer: text("US Distributors Inc."),
            supplier: text("Produtos Brasileiros S.A."),
            client_reference: text("EXP2023-123"),
            transport: text("sea"),
            stage: text("awaiting-registration"),
            created_at: text("2023-06-25T09:00:00Z"),
            order: Some(1000),
            ..Default::default()
        },
    ]
    .into_iter()
    .map(normalize)
    .collect()
}
