//! A compact parallel-join callback primitive.
//!
//! Launch any number of independent tasks and get a single completion
//! callback, invoked exactly once after all of them have finished, in
//! whatever order they finish. The crate is lock-free, executor-agnostic
//! (bring your own `spawn`) and supports `no_std` environments (requires
//! `alloc`).
//!
//! # Usage
//!
//! ## [`run`]
//!
//! Hand each starter a [`Slot`] and let it retire the slot whenever its
//! work completes:
//!
//! ```rust
//! use join_callback::{Slot, run};
//! use std::sync::mpsc;
//!
//! fn start_fetch(slot: Slot) {
//!     std::thread::spawn(move || {
//!         // ... long-running task ...
//!         slot.done();
//!     });
//! }
//!
//! fn start_index(slot: Slot) {
//!     std::thread::spawn(move || slot.done());
//! }
//!
//! let (tx, rx) = mpsc::channel();
//! run(move || tx.send(()).unwrap(), [start_fetch as fn(Slot), start_index]);
//!
//! // The completion fires exactly once, after both tasks finish.
//! rx.recv().unwrap();
//! ```
//!
//! ## [`JoinGroup`]
//!
//! When the task count is only known at runtime, drive the handle
//! directly:
//!
//! ```rust
//! use join_callback::JoinGroup;
//! use std::sync::mpsc;
//!
//! let (tx, rx) = mpsc::channel();
//! let group = JoinGroup::new(move || tx.send(()).unwrap());
//!
//! let slots: Vec<_> = (0..4).map(|_| group.slot()).collect();
//! group.close();
//!
//! for slot in slots {
//!     std::thread::spawn(move || slot.done());
//! }
//! rx.recv().unwrap();
//! ```
//!
//! # Guarantees
//!
//! - The completion runs exactly once, inline on whichever thread retires
//!   the last slot, or on the closing thread if every slot retired first.
//! - It never runs before [`JoinGroup::close`]; with [`run`], never before
//!   every starter has been handed its slot.
//! - Minting, retiring and closing are non-blocking and lock-free: one
//!   atomic read-modify-write each.
//!
//! There is no cancellation and no result channel: a [`Slot`] dropped
//! without [`Slot::done`] keeps its join pending forever, and the
//! completion is then never invoked.
#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod join;
mod state;
mod utils;

pub use crate::join::{JoinGroup, Slot, run};

#[cfg(test)]
mod tests;
