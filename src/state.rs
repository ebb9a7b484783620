use core::fmt::Debug;

use alloc::boxed::Box;

use crate::utils::*;

pub(crate) type Completion = Option<Box<dyn FnOnce() + Send>>;

/// Shared record coordinating one join: how many slots are outstanding and
/// whether registration is still open.
///
/// The completion lives in a plain cell rather than behind a lock.
/// Exclusive access is granted by the `pending` protocol: every retirement
/// decrements, and at most one retirement can fetch a prior value of `0`
/// (see [`step`]).
///
/// [`step`]: Self::step
pub(crate) struct JoinState {
    pending: AtomicIsize,
    closed: AtomicBool,
    completion: UnsafeCell<Completion>,
}

// The completion cell is only touched by the single winning retirement;
// everything else in the record is atomic.
unsafe impl Send for JoinState {}
unsafe impl Sync for JoinState {}

impl JoinState {
    pub fn new(completion: Box<dyn FnOnce() + Send>) -> Self {
        Self {
            pending: AtomicIsize::new(0),
            closed: AtomicBool::new(false),
            completion: UnsafeCell::new(Some(completion)),
        }
    }

    /// Accounts for one newly minted slot.
    #[inline]
    pub fn register(&self) {
        debug_assert!(!self.is_closed(), "slot minted after close");
        // Incrementing can be relaxed: a slot is only handed out from a live
        // handle, so the mint is already ordered before its retirement.
        self.pending.fetch_add(1, atomic::Relaxed);
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed.load(atomic::Acquire)
    }

    #[inline]
    pub fn pending(&self) -> isize {
        self.pending.load(atomic::Acquire)
    }

    /// Ends registration and retires the implicit closing credit, so a join
    /// with zero outstanding slots still fires.
    pub fn close(&self) {
        let was_closed = self.closed.swap(true, atomic::AcqRel);
        debug_assert!(!was_closed, "join closed twice");
        self.step();
    }

    /// Retires one slot (or the close itself) and fires the completion if it
    /// was the last one.
    ///
    /// The decrements on `pending` are totally ordered. A fetched value of
    /// `0` can only be observed once close has contributed its decrement,
    /// and by exactly one caller; that caller owns the completion cell.
    pub fn step(&self) {
        if self.pending.fetch_sub(1, atomic::AcqRel) == 0
            && self.is_closed()
            && let Some(completion) = unsafe { self.take_completion() }
        {
            completion();
        }
    }

    /// # Safety
    ///
    /// Only the single retirement that fetched a prior `pending` of `0` may
    /// call this; that retirement has exclusive access to the cell.
    #[inline]
    unsafe fn take_completion(&self) -> Completion {
        #[cfg(not(loom))]
        {
            unsafe { &mut *self.completion.get() }.take()
        }
        #[cfg(loom)]
        {
            self.completion.with_mut(|cell| unsafe { &mut *cell }.take())
        }
    }
}

impl Debug for JoinState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("JoinState")
            .field("pending", &self.pending())
            .field("closed", &self.is_closed())
            .finish()
    }
}
