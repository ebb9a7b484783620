#![cfg(not(loom))]

use std::{
    boxed::Box,
    sync::{
        Arc, mpsc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::Duration,
    vec,
    vec::Vec,
};

use crate::{Slot, run, tests::utils::counted_join};

#[test]
fn test_race_many_retirements() {
    const TASKS: usize = 1000;
    let (group, fired) = counted_join();
    let slots: Vec<_> = (0..TASKS).map(|_| group.slot()).collect();
    thread::scope(|scope| {
        for slot in slots {
            scope.spawn(move || slot.done());
        }
        group.close();
    });
    assert_eq!(fired.get(), 1);
}

#[test]
fn test_close_races_with_retirements() {
    for _ in 0..100 {
        let (group, fired) = counted_join();
        let slots: Vec<_> = (0..4).map(|_| group.slot()).collect();
        thread::scope(|scope| {
            for slot in slots {
                scope.spawn(move || slot.done());
            }
            scope.spawn(move || group.close());
        });
        assert_eq!(fired.get(), 1);
    }
}

#[test]
fn test_two_tasks_either_order() {
    let task_a = Arc::new(AtomicBool::new(false));
    let task_b = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::channel();

    let start_a = {
        let task_a = task_a.clone();
        move |slot: Slot| {
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                task_a.store(true, Ordering::Release);
                slot.done();
            });
        }
    };
    let start_b = {
        let task_b = task_b.clone();
        move |slot: Slot| {
            thread::spawn(move || {
                task_b.store(true, Ordering::Release);
                slot.done();
            });
        }
    };

    let completion = {
        let task_a = task_a.clone();
        let task_b = task_b.clone();
        move || {
            // Both tasks finished before the completion ran.
            assert!(task_a.load(Ordering::Acquire));
            assert!(task_b.load(Ordering::Acquire));
            tx.send(()).unwrap();
        }
    };

    run(
        completion,
        vec![
            Box::new(start_a) as Box<dyn FnOnce(Slot)>,
            Box::new(start_b),
        ],
    );
    rx.recv().unwrap();
}
