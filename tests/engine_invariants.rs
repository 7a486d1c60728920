//! Engine Invariant Tests
//!
//! Tests for the coordinator's core guarantees:
//! - Multi-filter lists are true conjunctions
//! - Reads observe writes immediately
//! - Ids stay unique and are never reissued
//! - Range bounds are inclusive
//! - A rebuilt engine answers exactly like the incrementally maintained one

use std::collections::HashSet;

use ledgerdb::engine::{Engine, ListQuery, RangeFilter};
use ledgerdb::store::{RecordId, SnapshotStore, Transaction};
use serde_json::{json, Map, Value};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(m) => m,
        _ => panic!("test fields must be JSON objects"),
    }
}

fn tx_fields(kind: &str, sender: &str, receiver: &str, amount: i64, ts: &str) -> Map<String, Value> {
    fields(json!({
        "transaction_type": kind,
        "sender": sender,
        "receiver": receiver,
        "amount": amount,
        "timestamp": ts
    }))
}

fn open_empty(dir: &TempDir) -> Engine {
    let snapshot = SnapshotStore::new(dir.path().join("tx.json"));
    snapshot.save(&[]).unwrap();
    Engine::open(snapshot).unwrap()
}

fn open_seeded(dir: &TempDir, value: Value) -> Engine {
    let snapshot = SnapshotStore::new(dir.path().join("tx.json"));
    let records: Vec<Transaction> = serde_json::from_value(value).unwrap();
    snapshot.save(&records).unwrap();
    Engine::open(snapshot).unwrap()
}

fn ids_of(records: &[Transaction]) -> Vec<RecordId> {
    records.iter().filter_map(Transaction::id).collect()
}

// =============================================================================
// Conjunction Correctness
// =============================================================================

/// A multi-filter list equals the set-intersection of the single-filter lists.
#[test]
fn test_conjunction_equals_intersection() {
    let dir = TempDir::new().unwrap();
    let engine = open_seeded(
        &dir,
        json!([
            {"id": 0, "sender": "A", "receiver": "X", "amount": 100, "timestamp": "2024-01-01T00:00:00"},
            {"id": 1, "sender": "A", "receiver": "Y", "amount": 300, "timestamp": "2024-02-01T00:00:00"},
            {"id": 2, "sender": "B", "receiver": "X", "amount": 300, "timestamp": "2024-03-01T00:00:00"},
            {"id": 3, "sender": "A", "receiver": "X", "amount": 700, "timestamp": "2024-04-01T00:00:00"}
        ]),
    );

    let by_sender = ListQuery::all().with_filter("sender", "A");
    let by_receiver = ListQuery::all().with_filter("receiver", "X");
    let by_amount = ListQuery::all().with_range(RangeFilter::Amount {
        min: Some(200.0),
        max: Some(800.0),
    });

    let combined = ListQuery::all()
        .with_filter("sender", "A")
        .with_filter("receiver", "X")
        .with_range(RangeFilter::Amount {
            min: Some(200.0),
            max: Some(800.0),
        });

    let expected: HashSet<RecordId> = [&by_sender, &by_receiver, &by_amount]
        .iter()
        .map(|q| ids_of(&engine.list(q)).into_iter().collect::<HashSet<_>>())
        .reduce(|acc, s| acc.intersection(&s).copied().collect())
        .unwrap();

    let actual: HashSet<RecordId> = ids_of(&engine.list(&combined)).into_iter().collect();
    assert_eq!(actual, expected);
    assert_eq!(actual, HashSet::from([3]));
}

/// The empty query returns every record in store order.
#[test]
fn test_empty_query_returns_all_in_store_order() {
    let dir = TempDir::new().unwrap();
    let engine = open_seeded(&dir, json!([{"id": 2}, {"id": 0}, {"id": 1}]));

    assert_eq!(ids_of(&engine.list(&ListQuery::all())), vec![2, 0, 1]);
}

/// Filters on unindexed fields match nothing rather than erroring.
#[test]
fn test_unindexed_filter_is_empty_not_error() {
    let dir = TempDir::new().unwrap();
    let engine = open_seeded(&dir, json!([{"id": 0, "currency": "RWF"}]));

    let hits = engine.list(&ListQuery::all().with_filter("currency", "RWF"));
    assert!(hits.is_empty());
}

// =============================================================================
// Read-Your-Writes
// =============================================================================

/// A record is visible through every query path immediately after insert.
#[test]
fn test_insert_visible_immediately() {
    let dir = TempDir::new().unwrap();
    let mut engine = open_empty(&dir);

    let stored = engine
        .insert(tx_fields("money_received", "Jane", "You", 2000, "2024-05-10T16:30:58"))
        .unwrap();
    let id = stored.id().unwrap();

    assert_eq!(engine.get(id).unwrap(), stored);
    assert_eq!(
        ids_of(&engine.list(&ListQuery::all().with_filter("sender", "Jane"))),
        vec![id]
    );
    assert_eq!(
        ids_of(&engine.list(&ListQuery::all().with_range(RangeFilter::Amount {
            min: Some(2000.0),
            max: Some(2000.0),
        }))),
        vec![id]
    );
}

// =============================================================================
// Id Uniqueness
// =============================================================================

/// Live ids stay pairwise distinct through an insert/delete churn, and no
/// id ever equals a previously deleted one.
#[test]
fn test_ids_unique_and_never_reissued() {
    let dir = TempDir::new().unwrap();
    let mut engine = open_empty(&dir);

    let mut issued: Vec<RecordId> = Vec::new();
    let mut deleted: HashSet<RecordId> = HashSet::new();

    for round in 0..5 {
        let stored = engine
            .insert(tx_fields("money_transfer", "You", "Peer", 100 + round, "2024-01-01T00:00:00"))
            .unwrap();
        issued.push(stored.id().unwrap());

        // Live ids pairwise distinct at every observation point.
        let live = ids_of(engine.all());
        let unique: HashSet<_> = live.iter().copied().collect();
        assert_eq!(unique.len(), live.len());

        // Delete the newest record every other round (the max id, the case a
        // naive max+1 allocator reissues).
        if round % 2 == 0 {
            let id = *issued.last().unwrap();
            engine.delete(id).unwrap();
            deleted.insert(id);
        }
    }

    for id in &issued {
        let reissued = issued.iter().filter(|i| *i == id).count();
        assert_eq!(reissued, 1, "id {} was issued twice", id);
    }
    for id in ids_of(engine.all()) {
        assert!(!deleted.contains(&id), "deleted id {} is live again", id);
    }
}

// =============================================================================
// Range Boundaries
// =============================================================================

/// An [x, x] amount range returns exactly the records with amount x.
#[test]
fn test_amount_range_boundary_inclusive() {
    let dir = TempDir::new().unwrap();
    let engine = open_seeded(
        &dir,
        json!([
            {"id": 0, "amount": 99},
            {"id": 1, "amount": 100},
            {"id": 2, "amount": 100},
            {"id": 3, "amount": 101}
        ]),
    );

    let hits = engine.list(&ListQuery::all().with_range(RangeFilter::Amount {
        min: Some(100.0),
        max: Some(100.0),
    }));
    let hit_ids: HashSet<RecordId> = ids_of(&hits).into_iter().collect();
    assert_eq!(hit_ids, HashSet::from([1, 2]));
}

/// Timestamp ranges are inclusive on both ends.
#[test]
fn test_timestamp_range_boundary_inclusive() {
    let dir = TempDir::new().unwrap();
    let engine = open_seeded(
        &dir,
        json!([
            {"id": 0, "timestamp": "2024-01-01T00:00:00"},
            {"id": 1, "timestamp": "2024-06-01T00:00:00"},
            {"id": 2, "timestamp": "2024-12-31T23:59:59"}
        ]),
    );

    let hits = engine.list(&ListQuery::all().with_range(RangeFilter::Timestamp {
        min: Some("2024-01-01T00:00:00".to_string()),
        max: Some("2024-12-31T23:59:59".to_string()),
    }));
    assert_eq!(ids_of(&hits), vec![0, 1, 2]);
}

// =============================================================================
// CRUD Scenario
// =============================================================================

/// The end-to-end scenario: filter, range, delete, reinsert.
#[test]
fn test_crud_scenario() {
    let dir = TempDir::new().unwrap();
    let mut engine = open_seeded(
        &dir,
        json!([
            {"id": 0, "sender": "A", "amount": 100},
            {"id": 1, "sender": "B", "amount": 200}
        ]),
    );

    let hits = engine.list(&ListQuery::all().with_filter("sender", "A"));
    assert_eq!(ids_of(&hits), vec![0]);

    let hits = engine.list(&ListQuery::all().with_range(RangeFilter::Amount {
        min: Some(150.0),
        max: Some(250.0),
    }));
    assert_eq!(ids_of(&hits), vec![1]);

    engine.delete(0).unwrap();
    assert!(engine.get(0).is_err());

    let stored = engine
        .insert(tx_fields("money_transfer", "C", "You", 50, "2024-01-01T00:00:00"))
        .unwrap();
    assert_eq!(stored.id(), Some(2));
}

// =============================================================================
// Rebuild Consistency
// =============================================================================

/// After a mutation sequence, an engine rebuilt from the persisted snapshot
/// answers every query identically to the engine that lived through the
/// mutations.
#[test]
fn test_rebuilt_engine_answers_identically() {
    let dir = TempDir::new().unwrap();
    let mut engine = open_empty(&dir);

    engine
        .insert(tx_fields("money_received", "Jane", "You", 2000, "2024-05-10T16:30:58"))
        .unwrap();
    engine
        .insert(tx_fields("money_transfer", "You", "Samuel", 10000, "2024-05-11T09:00:00"))
        .unwrap();
    engine
        .insert(tx_fields("airtime_purchase", "You", "MTN Airtime", 500, "2024-05-12T12:00:00"))
        .unwrap();
    engine
        .update(1, &fields(json!({"amount": 12000})))
        .unwrap();
    engine.delete(0).unwrap();

    let rebuilt = Engine::open(SnapshotStore::new(dir.path().join("tx.json"))).unwrap();

    let queries = [
        ListQuery::all(),
        ListQuery::all().with_filter("sender", "You"),
        ListQuery::all().with_filter("transaction_type", "airtime_purchase"),
        ListQuery::all().with_range(RangeFilter::Amount {
            min: Some(1000.0),
            max: Some(20000.0),
        }),
        ListQuery::all().with_range(RangeFilter::Timestamp {
            min: Some("2024-05-11".to_string()),
            max: None,
        }),
        ListQuery::all()
            .with_filter("sender", "You")
            .with_range(RangeFilter::Amount {
                min: Some(400.0),
                max: Some(600.0),
            }),
    ];

    for query in &queries {
        assert_eq!(
            engine.list(query),
            rebuilt.list(query),
            "rebuilt engine diverged on {:?}",
            query
        );
    }
    assert_eq!(engine.get(1).unwrap(), rebuilt.get(1).unwrap());
}
