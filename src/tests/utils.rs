use crate::{JoinGroup, utils::*};

pub(super) use crate::utils::Arc;

/// Counts how many times a completion has been invoked.
pub(super) struct FireCount(AtomicIsize);

impl FireCount {
    pub fn new() -> Self {
        Self(AtomicIsize::new(0))
    }

    pub fn bump(&self) {
        self.0.fetch_add(1, atomic::AcqRel);
    }

    pub fn get(&self) -> isize {
        self.0.load(atomic::Acquire)
    }
}

/// A completion that bumps the returned counter.
pub(super) fn counted_completion() -> (impl FnOnce() + Send + 'static, Arc<FireCount>) {
    let fired = Arc::new(FireCount::new());
    let canary = fired.clone();
    (move || canary.bump(), fired)
}

/// A join whose completion bumps the returned counter.
pub(super) fn counted_join() -> (JoinGroup, Arc<FireCount>) {
    let (completion, fired) = counted_completion();
    (JoinGroup::new(completion), fired)
}
