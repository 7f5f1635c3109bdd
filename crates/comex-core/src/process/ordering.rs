//! Kanban ordering and stage transitions.
//!
//! Order keys only have meaning within a stage. Whenever a move touches a
//! stage, every record in the resulting sequence is renumbered to
//! `1000, 2000, 3000, ...`. Records read from storage without a key carry a
//! timestamp instead, so keys are compared as plain integers and never
//! assumed to be multiples of 1000.

use tracing::debug;

use super::model::{Process, Stage};

/// Spacing between consecutive order keys after a renumber.
pub const ORDER_STEP: i64 = 1000;

/// Order key for the record at `position` (0-based) of a renumbered stage.
pub fn order_key_for(position: usize) -> i64 {
    (position as i64 + 1) * ORDER_STEP
}

/// Sort ascending by order key. Ties keep their current relative order.
pub fn sort_by_order(records: &mut [Process]) {
    records.sort_by_key(|p| p.order);
}

/// Move a record to `target_index` within its own stage.
///
/// No-op (returns `false`) when the record does not exist or is not in
/// `stage`. `target_index` past the end appends. Only records in `stage`
/// are touched.
pub fn reorder_within_stage(
    records: &mut [Process],
    id: &str,
    target_index: usize,
    stage: Stage,
) -> bool {
    let Some(pos) = records.iter().position(|p| p.id == id) else {
        debug!(process_id = id, "Reorder ignored: process not found");
        return false;
    };
    if records[pos].stage != stage {
        debug!(
            process_id = id,
            current = %records[pos].stage,
            requested = %stage,
            "Reorder ignored: process is in another stage"
        );
        return false;
    }

    let mut sequence = stage_sequence(records, stage, id);
    let at = target_index.min(sequence.len());
    sequence.insert(at, pos);
    renumber(records, &sequence);

    debug!(process_id = id, stage = %stage, index = at, "Process reordered");
    true
}

/// Move a record into `new_stage` at `target_index` and renumber that stage.
///
/// The origin stage keeps its keys, gaps included. The record's stage,
/// active flag and order key change together. No-op (returns `false`) when
/// the record does not exist.
pub fn change_stage_and_reorder(
    records: &mut [Process],
    id: &str,
    new_stage: Stage,
    target_index: usize,
) -> bool {
    let Some(pos) = records.iter().position(|p| p.id == id) else {
        debug!(process_id = id, "Stage change ignored: process not found");
        return false;
    };

    let mut sequence = stage_sequence(records, new_stage, id);
    let at = target_index.min(sequence.len());
    sequence.insert(at, pos);

    let from = records[pos].stage;
    let record = &mut records[pos];
    record.stage = new_stage;
    record.active = new_stage.is_active();
    renumber(records, &sequence);

    debug!(process_id = id, from = %from, to = %new_stage, index = at, "Process moved");
    true
}

/// Change only the stage of a record, leaving every order key alone.
pub fn set_stage(records: &mut [Process], id: &str, stage: Stage) -> bool {
    let Some(record) = records.iter_mut().find(|p| p.id == id) else {
        debug!(process_id = id, "Stage change ignored: process not found");
        return false;
    };
    record.stage = stage;
    record.active = stage.is_active();
    true
}

/// Indices of the records in `stage`, excluding `skip_id`, by order key.
fn stage_sequence(records: &[Process], stage: Stage, skip_id: &str) -> Vec<usize> {
    let mut sequence: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, p)| p.stage == stage && p.id != skip_id)
        .map(|(i, _)| i)
        .collect();
    sequence.sort_by_key(|&i| records[i].order);
    sequence
}

fn renumber(records: &mut [Process], sequence: &[usize]) {
    for (position, &index) in sequence.iter().enumerate() {
        records[index].order = order_key_for(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::model::RawProcess;
    use crate::process::normalize::normalize;
    use proptest::prelude::*;

    fn process(id: &str, stage: Stage, order: i64) -> Process {
        normalize(RawProcess {
            id: Some(id.to_string()),
            stage: Some(stage.as_str().to_string()),
            order: Some(order),
            ..Default::default()
        })
    }

    fn ids_in(records: &[Process], stage: Stage) -> Vec<String> {
        let mut in_stage: Vec<Process> =
            records.iter().filter(|p| p.stage == stage).cloned().collect();
        sort_by_order(&mut in_stage);
        in_stage.into_iter().map(|p| p.id).collect()
    }

    fn key(records: &[Process], id: &str) -> i64 {
        records.iter().find(|p| p.id == id).map(|p| p.order).unwrap()
    }

    #[test]
    fn test_reorder_moves_last_to_front() {
        let x = Stage::InTransit;
        let mut records = vec![process("A", x, 1000), process("B", x, 2000), process("C", x, 3000)];

        assert!(reorder_within_stage(&mut records, "C", 0, x));

        assert_eq!(ids_in(&records, x), vec!["C", "A", "B"]);
        assert_eq!(key(&records, "C"), 1000);
        assert_eq!(key(&records, "A"), 2000);
        assert_eq!(key(&records, "B"), 3000);
    }

    #[test]
    fn test_reorder_closes_gaps_and_timestamps() {
        let x = Stage::AwaitingChannel;
        let mut records = vec![
            process("A", x, 1_700_000_000_000_000_000),
            process("B", x, 5),
            process("C", x, 7000),
        ];

        assert!(reorder_within_stage(&mut records, "B", 1, x));

        assert_eq!(ids_in(&records, x), vec!["C", "B", "A"]);
        assert_eq!(key(&records, "C"), 1000);
        assert_eq!(key(&records, "B"), 2000);
        assert_eq!(key(&records, "A"), 3000);
    }

    #[test]
    fn test_reorder_index_past_end_appends() {
        let x = Stage::AwaitingShipment;
        let mut records = vec![process("A", x, 1000), process("B", x, 2000), process("C", x, 3000)];

        assert!(reorder_within_stage(&mut records, "A", 99, x));

        assert_eq!(ids_in(&records, x), vec!["B", "C", "A"]);
        assert_eq!(key(&records, "A"), 3000);
    }

    #[test]
    fn test_reorder_wrong_stage_is_noop() {
        let mut records = vec![process("A", Stage::InTransit, 4000)];
        let before = records.clone();

        assert!(!reorder_within_stage(&mut records, "A", 0, Stage::Closed));
        assert_eq!(records, before);
    }

    #[test]
    fn test_reorder_missing_id_is_noop() {
        let mut records = vec![process("A", Stage::InTransit, 4000)];
        let before = records.clone();

        assert!(!reorder_within_stage(&mut records, "Z", 0, Stage::InTransit));
        assert_eq!(records, before);
    }

    #[test]
    fn test_change_stage_into_occupied_column() {
        let mut records = vec![
            process("D", Stage::AwaitingShipment, 1000),
            process("E", Stage::InTransit, 1000),
        ];

        assert!(change_stage_and_reorder(&mut records, "D", Stage::InTransit, 0));

        let d = records.iter().find(|p| p.id == "D").unwrap();
        assert_eq!(d.stage, Stage::InTransit);
        assert_eq!(d.order, 1000);
        assert!(d.active);
        assert_eq!(key(&records, "E"), 2000);
    }

    #[test]
    fn test_change_stage_leaves_origin_gaps() {
        let origin = Stage::AwaitingRegistration;
        let mut records = vec![
            process("A", origin, 1000),
            process("B", origin, 2000),
            process("C", origin, 3000),
        ];

        assert!(change_stage_and_reorder(&mut records, "B", Stage::RegisterDeclaration, 0));

        assert_eq!(key(&records, "A"), 1000);
        assert_eq!(key(&records, "C"), 3000);
    }

    #[test]
    fn test_change_stage_to_closed_deactivates() {
        let mut records = vec![process("A", Stage::AwaitingClosure, 1000)];

        assert!(change_stage_and_reorder(&mut records, "A", Stage::Closed, 5));

        assert_eq!(records[0].stage, Stage::Closed);
        assert!(!records[0].active);
        assert_eq!(records[0].order, 1000);
    }

    #[test]
    fn test_change_stage_backwards_allowed() {
        let mut records = vec![process("A", Stage::Closed, 1000)];

        assert!(change_stage_and_reorder(&mut records, "A", Stage::AwaitingShipment, 0));

        assert_eq!(records[0].stage, Stage::AwaitingShipment);
        assert!(records[0].active);
    }

    #[test]
    fn test_change_stage_within_same_stage_reorders() {
        let x = Stage::InTransit;
        let mut records = vec![process("A", x, 1000), process("B", x, 2000)];

        assert!(change_stage_and_reorder(&mut records, "A", x, 1));

        assert_eq!(ids_in(&records, x), vec!["B", "A"]);
    }

    #[test]
    fn test_change_stage_missing_id_is_noop() {
        let mut records = vec![process("A", Stage::InTransit, 1000)];
        let before = records.clone();

        assert!(!change_stage_and_reorder(&mut records, "Z", Stage::Closed, 0));
        assert_eq!(records, before);
    }

    #[test]
    fn test_set_stage_keeps_order_key() {
        let mut records = vec![process("A", Stage::InTransit, 1234)];

        assert!(set_stage(&mut records, "A", Stage::Closed));

        assert_eq!(records[0].stage, Stage::Closed);
        assert!(!records[0].active);
        assert_eq!(records[0].order, 1234);
        assert!(!set_stage(&mut records, "Z", Stage::Closed));
    }

    fn board() -> impl Strategy<Value = Vec<Process>> {
        proptest::collection::vec(
            (proptest::sample::select(Stage::ALL.to_vec()), -5000i64..5000),
            1..20,
        )
        .prop_map(|cells| {
            cells
                .into_iter()
                .enumerate()
                .map(|(i, (stage, order))| process(&format!("p{}", i), stage, order))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn test_reorder_renumbers_stage(records in board(), pick in any::<prop::sample::Index>(), target in 0usize..25) {
            let mut records = records;
            let chosen = pick.get(&records).clone();

            prop_assert!(reorder_within_stage(&mut records, &chosen.id, target, chosen.stage));

            let mut keys: Vec<i64> = records
                .iter()
                .filter(|p| p.stage == chosen.stage)
                .map(|p| p.order)
                .collect();
            keys.sort();
            let expected: Vec<i64> = (0..keys.len()).map(order_key_for).collect();
            prop_assert_eq!(keys, expected);
        }

        #[test]
        fn test_reorder_isolates_other_stages(records in board(), pick in any::<prop::sample::Index>(), target in 0usize..25) {
            let before = records.clone();
            let mut records = records;
            let chosen = pick.get(&records).clone();

            reorder_within_stage(&mut records, &chosen.id, target, chosen.stage);

            for (old, new) in before.iter().zip(records.iter()) {
                prop_assert_eq!(&old.stage, &new.stage);
                if old.stage != chosen.stage {
                    prop_assert_eq!(old.order, new.order);
                }
            }
        }

        #[test]
        fn test_change_stage_lands_at_clamped_index(
            records in board(),
            pick in any::<prop::sample::Index>(),
            stage in proptest::sample::select(Stage::ALL.to_vec()),
            target in 0usize..25,
        ) {
            let mut records = records;
            let chosen = pick.get(&records).clone();
            let others = records.iter().filter(|p| p.stage == stage && p.id != chosen.id).count();

            prop_assert!(change_stage_and_reorder(&mut records, &chosen.id, stage, target));

            let moved = records.iter().find(|p| p.id == chosen.id).unwrap();
            prop_assert_eq!(moved.stage, stage);
            prop_assert_eq!(moved.active, stage != Stage::Closed);
            prop_assert_eq!(moved.order, order_key_for(target.min(others)));
        }
    }
}
