use alloc::boxed::Box;

use derive_more::Debug;

use crate::{state::JoinState, utils::Arc};

/// Handle for one join operation.
///
/// Mint one [`Slot`] per task with [`slot`], then end registration with
/// [`close`]. The completion runs exactly once, inline on whichever thread
/// retires the last slot, or on the closing thread if every slot retired
/// first (or none were ever minted).
///
/// Dropping the handle without calling [`close`] keeps the join open
/// forever and the completion is never invoked.
///
/// [`slot`]: Self::slot
/// [`close`]: Self::close
#[must_use]
#[derive(Debug)]
pub struct JoinGroup(#[debug("pending: {}", _0.pending())] Arc<JoinState>);

/// A single-use completion slot for one registered task.
///
/// Retiring it with [`done`] reports that task's completion to the join it
/// was minted from. Ownership makes retiring twice impossible; dropping a
/// slot without retiring it means the join never completes.
///
/// [`done`]: Self::done
#[must_use = "dropping an unretired slot means the completion never fires"]
#[derive(Debug)]
pub struct Slot(#[debug("pending: {}", _0.pending())] Arc<JoinState>);

impl JoinGroup {
    /// Creates a join that will invoke `completion` once every slot minted
    /// from it has been retired and [`close`] has been called.
    ///
    /// [`close`]: Self::close
    ///
    /// # Examples
    ///
    /// ```
    /// use join_callback::JoinGroup;
    /// use std::sync::mpsc;
    ///
    /// let (tx, rx) = mpsc::channel();
    /// let group = JoinGroup::new(move || tx.send(()).unwrap());
    ///
    /// let slot = group.slot();
    /// group.close();
    ///
    /// std::thread::spawn(move || slot.done());
    /// rx.recv().unwrap();
    /// ```
    pub fn new<F>(completion: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self(Arc::new(JoinState::new(Box::new(completion))))
    }

    /// Mints a slot for one more task.
    ///
    /// The number of slots need not be known up front; minting stays legal
    /// until [`close`], even after earlier slots have already retired.
    ///
    /// [`close`]: Self::close
    ///
    /// # Examples
    ///
    /// ```
    /// use join_callback::JoinGroup;
    ///
    /// let group = JoinGroup::new(|| println!("all done"));
    /// let slots: Vec<_> = (0..8).map(|_| group.slot()).collect();
    /// group.close();
    ///
    /// for slot in slots {
    ///     slot.done(); // the last one prints
    /// }
    /// ```
    pub fn slot(&self) -> Slot {
        self.0.register();
        Slot(self.0.clone())
    }

    /// Ends registration; no further slots can be minted.
    ///
    /// Closing counts as retiring one implicit slot: a join with zero slots
    /// fires its completion here, synchronously, and a join whose slots all
    /// retired early fires here rather than never.
    ///
    /// # Examples
    ///
    /// ```
    /// use join_callback::JoinGroup;
    /// use std::sync::mpsc;
    ///
    /// let (tx, rx) = mpsc::channel();
    /// JoinGroup::new(move || tx.send(()).unwrap()).close();
    ///
    /// // No slots were minted, so closing fired the completion.
    /// rx.try_recv().unwrap();
    /// ```
    pub fn close(self) {
        self.0.close();
    }
}

impl Slot {
    /// Retires this slot, reporting its task as finished.
    ///
    /// Safe to call from any thread. If this was the last outstanding slot
    /// of a closed join, the completion runs inline on the calling thread.
    ///
    /// # Examples
    ///
    /// ```
    /// use join_callback::JoinGroup;
    ///
    /// let group = JoinGroup::new(|| {});
    /// let a = group.slot();
    /// let b = group.slot();
    /// group.close();
    ///
    /// b.done();
    /// a.done();
    /// ```
    pub fn done(self) {
        self.0.step();
    }
}

/// Fans `completion` out over a sequence of starters.
///
/// Each starter is invoked synchronously, in order, with a freshly minted
/// [`Slot`]; it is expected to arrange for that slot to eventually be
/// retired, typically from asynchronously spawned work. After the last
/// starter returns, registration is closed.
///
/// `completion` fires exactly once, after every starter has been handed its
/// slot and every slot has retired, no matter when or in what order the
/// started work finishes. With no starters it fires synchronously, before
/// `run` returns.
///
/// # Examples
///
/// ```
/// use join_callback::{Slot, run};
/// use std::sync::mpsc;
///
/// fn start_upload(slot: Slot) {
///     std::thread::spawn(move || {
///         // ... upload ...
///         slot.done();
///     });
/// }
///
/// fn start_flush(slot: Slot) {
///     std::thread::spawn(move || slot.done());
/// }
///
/// let (tx, rx) = mpsc::channel();
/// run(move || tx.send(()).unwrap(), [start_upload as fn(Slot), start_flush]);
///
/// // Fires exactly once, after both tasks finished.
/// rx.recv().unwrap();
/// ```
pub fn run<C, I, S>(completion: C, starters: I)
where
    C: FnOnce() + Send + 'static,
    I: IntoIterator<Item = S>,
    S: FnOnce(Slot),
{
    let group = JoinGroup::new(completion);
    for starter in starters {
        starter(group.slot());
    }
    group.close();
}
