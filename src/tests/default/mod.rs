mod threads;

#[cfg_attr(not(loom), allow(unused_imports))]
pub(super) use self::base::*;
