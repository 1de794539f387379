//! Unit tests for `Buffered<T>` and `BufferedDataManager`.

use std::sync::Arc;

use crate::{new_cell, BufferedDataManager};
use dt_core::MutexStrategy;

#[test]
fn get_sees_initial_value_before_any_flip() {
    let cell = new_cell(MutexStrategy::Buffered, 42i32).unwrap();
    assert_eq!(*cell.get(), 42);
}

#[test]
fn set_does_not_change_current_until_flip() {
    let cell = new_cell(MutexStrategy::Buffered, 0i32).unwrap();
    cell.set(99);
    assert_eq!(*cell.get(), 0, "current must not change before flip");
    cell.flip();
    assert_eq!(*cell.get(), 99);
}

#[test]
fn flip_is_idempotent_without_an_intervening_set() {
    let cell = new_cell(MutexStrategy::Buffered, 5i32).unwrap();
    cell.set(7);
    cell.flip();
    assert_eq!(*cell.get(), 7);
    cell.flip();
    assert_eq!(*cell.get(), 7);
}

#[test]
fn set_with_reads_the_staged_slot() {
    let cell = new_cell(MutexStrategy::Buffered, 1i32).unwrap();
    cell.set(10);
    cell.set_with(|staged| staged + 1);
    cell.flip();
    assert_eq!(*cell.get(), 11);
}

#[test]
fn locked_strategy_is_rejected() {
    let err = new_cell(MutexStrategy::Locked, 0i32).unwrap_err();
    assert_eq!(err.to_string(), "MutexStrategy::Locked is not implemented; only Buffered cells are supported");
}

#[test]
fn manager_flips_all_subscribed_cells() {
    let a = Arc::new(new_cell(MutexStrategy::Buffered, 1i32).unwrap());
    let b = Arc::new(new_cell(MutexStrategy::Buffered, 2i32).unwrap());

    let mut mgr = BufferedDataManager::new();
    mgr.subscribe(a.clone());
    mgr.subscribe(b.clone());
    assert_eq!(mgr.len(), 2);

    a.set(100);
    b.set(200);
    mgr.flip_all();

    assert_eq!(*a.get(), 100);
    assert_eq!(*b.get(), 200);
}

#[test]
fn unsubscribe_stops_future_flips() {
    let a = Arc::new(new_cell(MutexStrategy::Buffered, 1i32).unwrap());
    let mut mgr = BufferedDataManager::new();
    mgr.subscribe(a.clone());
    mgr.unsubscribe(&a);
    assert!(mgr.is_empty());

    a.set(42);
    mgr.flip_all();
    assert_eq!(*a.get(), 1, "unsubscribed cell must not be flipped by this manager");
}

#[test]
fn concurrent_readers_see_consistent_current_during_a_write() {
    use std::thread;

    let cell = Arc::new(new_cell(MutexStrategy::Buffered, 0i32).unwrap());
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let c = cell.clone();
            thread::spawn(move || {
                for _ in 0..1000 {
                    let v = *c.get();
                    assert!(v == 0 || v == 1);
                }
            })
        })
        .collect();

    cell.set(1);
    cell.flip();

    for r in readers {
        r.join().unwrap();
    }
    assert_eq!(*cell.get(), 1);
}
