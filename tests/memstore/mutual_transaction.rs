//! Mutual Transaction Tests
//!
//! Atomic read-modify-write across an explicit key set.

use crate::*;
use memkv::{Error, ValueMap};

fn balance(old: &ValueMap, key: &str) -> Result<u64, BoxError> {
    let value = old.get(key).ok_or_else(|| format!("{} not in snapshot", key))?;
    let data = value
        .as_bytes()
        .ok_or_else(|| format!("account {} does not exist", key))?;
    Ok(serde_json::from_slice(data)?)
}

fn transfer(
    from: &'static str,
    to: &'static str,
    amount: u64,
) -> impl FnOnce(&ValueMap) -> Result<ValueMap, BoxError> {
    move |old| {
        let from_balance = balance(old, from)?;
        let to_balance = balance(old, to)?;
        if from_balance < amount {
            return Err(format!("insufficient funds in {}", from).into());
        }
        let mut new = ValueMap::new();
        new.insert(
            from.to_string(),
            Value::present(serde_json::to_vec(&(from_balance - amount))?),
        );
        new.insert(
            to.to_string(),
            Value::present(serde_json::to_vec(&(to_balance + amount))?),
        );
        Ok(new)
    }
}

fn open_accounts(store: &Memstore, accounts: &[(&str, u64)]) {
    for (name, amount) in accounts {
        store.set_json(name, amount).unwrap();
    }
}

#[test]
fn test_transfer_between_balances() {
    let store = create_store();
    open_accounts(&store, &[("alice", 100), ("bob", 0)]);

    let outcome = store
        .mutual_transaction(&["alice", "bob"], transfer("alice", "bob", 30))
        .unwrap();

    assert_eq!(store.get_json::<u64>("alice").unwrap(), 70);
    assert_eq!(store.get_json::<u64>("bob").unwrap(), 30);
    assert_eq!(balance(&outcome.old, "alice").unwrap(), 100);
    assert_eq!(balance(&outcome.new, "alice").unwrap(), 70);
}

#[test]
fn test_insufficient_funds_aborts_whole_transfer() {
    let store = create_store();
    open_accounts(&store, &[("alice", 10), ("bob", 5)]);

    let err = store
        .mutual_transaction(&["alice", "bob"], transfer("alice", "bob", 30))
        .unwrap_err();

    match &err {
        Error::MutualTransaction { keys, old, source } => {
            assert_eq!(keys, &vec!["alice".to_string(), "bob".to_string()]);
            assert_eq!(balance(old, "alice").unwrap(), 10);
            assert_eq!(balance(old, "bob").unwrap(), 5);
            assert!(source.to_string().contains("insufficient funds"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store.get_json::<u64>("alice").unwrap(), 10);
    assert_eq!(store.get_json::<u64>("bob").unwrap(), 5);
}

#[test]
fn test_missing_account_aborts() {
    let store = create_store();
    open_accounts(&store, &[("alice", 10)]);

    let err = store
        .mutual_transaction(&["alice", "carol"], transfer("alice", "carol", 1))
        .unwrap_err();
    assert!(err.is_aborted());
    assert!(!store.exists("carol").unwrap());
}

#[test]
fn test_aborted_transfer_reports_snapshots() {
    let store = create_store();
    open_accounts(&store, &[("alice", 10)]);

    let err = store
        .mutual_transaction(&["alice", "carol", "alice"], transfer("alice", "carol", 1))
        .unwrap_err();

    assert_eq!(err.keys(), ["alice", "carol", "alice"].map(String::from));
    let old = err.old_values().unwrap();
    assert_eq!(old.len(), 2);
    assert!(old["alice"].exists());
    assert_eq!(balance(old, "alice").unwrap(), 10);
    assert!(!old["carol"].exists());
    assert!(err.old_value().is_none());
}

#[test]
fn test_swap_two_keys() {
    let store = create_store();
    store.set_bytes("k1", b"left".to_vec()).unwrap();
    store.set_bytes("k2", b"right".to_vec()).unwrap();

    store
        .mutual_transaction(&["k1", "k2"], |old| {
            let mut new = ValueMap::new();
            new.insert("k1".to_string(), old["k2"].clone());
            new.insert("k2".to_string(), old["k1"].clone());
            Ok(new)
        })
        .unwrap();

    assert_eq!(store.get_bytes("k1").unwrap(), b"right");
    assert_eq!(store.get_bytes("k2").unwrap(), b"left");
}

#[test]
fn test_swap_with_absent_key_moves_value() {
    let store = create_store();
    store.set_bytes("k1", b"only".to_vec()).unwrap();

    store
        .mutual_transaction(&["k1", "k2"], |old| {
            let mut new = ValueMap::new();
            new.insert("k1".to_string(), old["k2"].clone());
            new.insert("k2".to_string(), old["k1"].clone());
            Ok(new)
        })
        .unwrap();

    assert!(store.get_bytes("k1").unwrap_err().is_not_found());
    assert_eq!(store.get_bytes("k2").unwrap(), b"only");
}

#[test]
fn test_keys_omitted_from_result_are_untouched() {
    let store = create_store();
    store.set_bytes("a", b"1".to_vec()).unwrap();
    store.set_bytes("b", b"2".to_vec()).unwrap();

    store
        .mutual_transaction(&["a", "b"], |_| {
            let mut new = ValueMap::new();
            new.insert("a".to_string(), Value::present(b"changed".to_vec()));
            Ok(new)
        })
        .unwrap();

    assert_eq!(store.get_bytes("a").unwrap(), b"changed");
    assert_eq!(store.get_bytes("b").unwrap(), b"2");
}

#[test]
fn test_read_only_mutual_transaction() {
    let store = create_store();
    store.set_bytes("a", b"1".to_vec()).unwrap();

    let outcome = store
        .mutual_transaction(&["a", "missing"], |_| Ok(ValueMap::new()))
        .unwrap();

    assert_eq!(outcome.old["a"], Value::present(b"1".to_vec()));
    assert_eq!(outcome.old["missing"], Value::absent());
    assert!(outcome.new.is_empty());
    assert_eq!(store.len(), 1);
}

#[test]
fn test_empty_key_set() {
    let store = create_store();
    let keys: [&str; 0] = [];

    let outcome = store
        .mutual_transaction(&keys, |old| {
            assert!(old.is_empty());
            let mut new = ValueMap::new();
            new.insert("created".to_string(), Value::present(b"x".to_vec()));
            Ok(new)
        })
        .unwrap();

    assert!(outcome.old.is_empty());
    assert_eq!(store.get_bytes("created").unwrap(), b"x");
}

#[test]
fn test_duplicate_keys_collapse() {
    let store = create_store();
    open_accounts(&store, &[("alice", 50), ("bob", 0)]);

    let outcome = store
        .mutual_transaction(
            &["alice", "bob", "alice", "bob"],
            transfer("alice", "bob", 50),
        )
        .unwrap();

    assert_eq!(outcome.old.len(), 2);
    assert_eq!(store.get_json::<u64>("alice").unwrap(), 0);
    assert_eq!(store.get_json::<u64>("bob").unwrap(), 50);
}

#[test]
fn test_result_may_delete_and_create_unlisted_keys() {
    let store = create_store();
    store.set_bytes("queue:head", b"job-1".to_vec()).unwrap();
    store.set_bytes("stale", b"x".to_vec()).unwrap();

    store
        .mutual_transaction(&["queue:head"], |old| {
            let job = old["queue:head"].data().to_vec();
            let mut new = ValueMap::new();
            new.insert("queue:head".to_string(), Value::absent());
            new.insert("running".to_string(), Value::present(job));
            new.insert("stale".to_string(), Value::absent());
            Ok(new)
        })
        .unwrap();

    assert!(!store.exists("queue:head").unwrap());
    assert!(!store.exists("stale").unwrap());
    assert_eq!(store.get_bytes("running").unwrap(), b"job-1");
}

#[test]
fn test_present_empty_value_is_stored_not_deleted() {
    let store = create_store();
    store.set_bytes("k", b"v".to_vec()).unwrap();

    store
        .mutual_transaction(&["k"], |_| {
            let mut new = ValueMap::new();
            new.insert("k".to_string(), Value::present(Vec::new()));
            Ok(new)
        })
        .unwrap();

    assert!(store.exists("k").unwrap());
    assert!(store.get_bytes("k").unwrap().is_empty());
}

#[test]
fn test_failure_after_partial_planning_writes_nothing() {
    let store = create_store();
    store.set_bytes("a", b"1".to_vec()).unwrap();

    let result = store.mutual_transaction(&["a", "b"], |_| {
        let mut new = ValueMap::new();
        new.insert("a".to_string(), Value::absent());
        new.insert("b".to_string(), Value::present(b"2".to_vec()));
        if !new.is_empty() {
            return Err("changed my mind".into());
        }
        Ok(new)
    });

    assert!(result.is_err());
    assert_eq!(store.get_bytes("a").unwrap(), b"1");
    assert!(!store.exists("b").unwrap());
    assert_eq!(store.metrics().mutual_transactions_aborted, 1);
}
