use std::sync::atomic::{AtomicI64, Ordering};

/// Identifies a group of edits that undo together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UndoId(pub i64);

/// Allocate a fresh undo group id. Ids are unique for the life of the process.
pub fn next_undo_id() -> UndoId {
    static COUNTER: AtomicI64 = AtomicI64::new(1);
    UndoId(COUNTER.fetch_add(1, Ordering::Relaxed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_increase() {
        let a = next_undo_id();
        let b = next_undo_id();
        assert!(b > a);
    }
}
