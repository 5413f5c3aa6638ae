//! # Memory Management
//!
//! Growable id pools and component arenas backing the ECS.
//!
//! ## Design Philosophy
//!
//! Containers here grow geometrically (`capacity += capacity / 2 + 2`) and
//! never shrink. Growth is fallible: every reallocation path reserves with
//! `try_reserve` and reports [`OutOfMemory`] instead of aborting the process.

mod arena;
mod pool;

pub use arena::ComponentArena;
pub use pool::IdPool;

use thiserror::Error;

/// Allocation failure surfaced by the growable containers in this module.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("out of memory while growing a container")]
pub struct OutOfMemory;

/// Next capacity for a container that must hold the record at `required`.
///
/// Applies the growth rule `capacity += capacity / 2 + 2` until the capacity
/// exceeds `required`.
pub(crate) fn grown_capacity(mut capacity: usize, required: usize) -> usize {
    while capacity <= required {
        capacity += capacity / 2 + 2;
    }
    capacity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_sequence() {
        // Each step is cap += cap / 2 + 2.
        assert_eq!(grown_capacity(0, 0), 2);
        assert_eq!(grown_capacity(2, 2), 5);
        assert_eq!(grown_capacity(5, 5), 9);
        assert_eq!(grown_capacity(9, 9), 15);
        assert_eq!(grown_capacity(15, 15), 24);
    }

    #[test]
    fn test_growth_reaches_required_index() {
        let cap = grown_capacity(0, 100);
        assert!(cap > 100);
        // Already large enough: untouched.
        assert_eq!(grown_capacity(500, 100), 500);
    }
}
