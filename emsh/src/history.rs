// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Bounded command history with a mutable draft slot.
//!
//! The ring owns a pool of line-sized blocks, threaded through two
//! [`SlotList`]s sharing one [`LinkArena`]: the *active* list
//! (most-recent-first) and the *free* list. Moving a block between lists is
//! O(1) and allocation-free, so steady-state operation never touches the
//! heap.
//!
//! The head of the active list is always the **draft**, the line currently
//! being edited. Navigation moves a cursor along the active list without
//! copying anything: the editor simply edits whichever block the cursor
//! points at, in place. Committing from a navigated position pulls the
//! focused block to the front of the committed entries and discards the
//! draft; unsaved draft edits are therefore preserved when the user merely
//! navigates away and back.
//!
//! Invariants (checked by the tests below):
//! - active length ≥ 1 (the draft always exists) and ≤ capacity;
//! - active ∪ free partitions the pool;
//! - position 0 is the draft, positions 1.. are committed entries newest
//!   first;
//! - the cursor always points at the block at `position` in the active list.

use crate::core::{ByteArray, LinkArena, SlotIndex, SlotList};

#[derive(Debug)]
pub struct History {
    arena: LinkArena,
    blocks: Box<[ByteArray]>,
    free: SlotList,
    active: SlotList,
    active_len: usize,
    position: usize,
    cursor: SlotIndex,
}

impl History {
    /// Build the pool: every block starts on the free list, then one block
    /// becomes the initial (empty) draft.
    ///
    /// # Panics
    ///
    /// Panics if either capacity is zero.
    #[must_use]
    pub fn new(block_count: usize, line_capacity: usize) -> Self {
        assert!(block_count > 0, "history needs at least the draft block");

        let mut arena = LinkArena::new(block_count);
        let blocks: Box<[ByteArray]> = (0..block_count)
            .map(|_| ByteArray::new(line_capacity))
            .collect();

        let mut free = SlotList::new();
        for slot in 0..block_count {
            free.push_back(&mut arena, slot);
        }

        let mut active = SlotList::new();
        let draft = free.pop_front(&mut arena).expect("pool seeded above");
        active.push_front(&mut arena, draft);

        Self {
            arena,
            blocks,
            free,
            active,
            active_len: 1,
            position: 0,
            cursor: draft,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize { self.blocks.len() }

    /// Active entries, draft included.
    #[must_use]
    pub fn len(&self) -> usize { self.active_len }

    /// The active list is never empty (the draft always exists), so this is
    /// a tautology kept for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.active_len == 0 }

    /// Cursor position: 0 is the draft, `len() - 1` the oldest entry.
    #[must_use]
    pub fn position(&self) -> usize { self.position }

    /// The block the cursor points at.
    #[must_use]
    pub fn current(&self) -> &ByteArray { &self.blocks[self.cursor] }

    pub fn current_mut(&mut self) -> &mut ByteArray { &mut self.blocks[self.cursor] }

    /// Move toward older entries; no-op at the oldest.
    pub fn move_backward(&mut self) {
        if self.position < self.active_len - 1 {
            self.position += 1;
            self.cursor = self
                .active
                .next(&self.arena, self.cursor)
                .expect("position bound checked above");
        }
    }

    /// Move toward the draft; no-op at the draft.
    pub fn move_forward(&mut self) {
        if self.position > 0 {
            self.position -= 1;
            self.cursor = self
                .active
                .prev(&self.arena, self.cursor)
                .expect("position bound checked above");
        }
    }

    /// Accept the focused line as the newest committed entry and open a
    /// fresh draft.
    ///
    /// Committing from a navigated position discards the draft and pulls the
    /// focused entry to the front; committing the draft itself retires the
    /// oldest entry when the ring is full. Either way a free block becomes
    /// the new (empty) draft and the cursor returns to it.
    pub fn commit(&mut self) {
        if self.position != 0 {
            // Remove the draft.
            let draft = self
                .active
                .pop_front(&mut self.arena)
                .expect("draft always exists");
            self.free.push_back(&mut self.arena, draft);
            self.active_len -= 1;

            // Bring the focused entry to the front.
            self.active.unlink(&mut self.arena, self.cursor);
            self.active.push_front(&mut self.arena, self.cursor);
        } else if self.active_len == self.capacity() {
            // Retire the oldest entry.
            let oldest = self
                .active
                .pop_back(&mut self.arena)
                .expect("ring is full, so non-empty");
            self.free.push_back(&mut self.arena, oldest);
            self.active_len -= 1;
        }

        // Add a new draft and move focus to it.
        let draft = self
            .free
            .pop_front(&mut self.arena)
            .expect("a block was freed above or the ring was not full");
        self.active.push_front(&mut self.arena, draft);
        self.active_len += 1;

        self.position = 0;
        self.cursor = draft;
        self.blocks[draft].reset();
    }

    /// Entries newest-first, starting with the draft.
    pub fn iter(&self) -> impl Iterator<Item = &ByteArray> {
        self.active.iter(&self.arena).map(|slot| &self.blocks[slot])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set_line(history: &mut History, text: &[u8]) {
        let line = history.current_mut();
        line.reset();
        line.push_back_n(text);
    }

    fn entries(history: &History) -> Vec<Vec<u8>> {
        history.iter().map(|line| line.as_slice().to_vec()).collect()
    }

    #[test]
    fn test_new_seeds_one_empty_draft() {
        let history = History::new(3, 8);
        assert_eq!(history.len(), 1);
        assert_eq!(history.position(), 0);
        assert!(history.current().is_empty());
    }

    #[test]
    fn test_commit_stacks_newest_first() {
        let mut history = History::new(4, 8);
        for text in [b"one".as_slice(), b"two", b"three"] {
            set_line(&mut history, text);
            history.commit();
        }

        assert_eq!(history.len(), 4);
        assert_eq!(
            entries(&history),
            vec![b"".to_vec(), b"three".to_vec(), b"two".to_vec(), b"one".to_vec()]
        );
        assert!(history.current().is_empty());
    }

    #[test]
    fn test_full_ring_retires_the_oldest() {
        let mut history = History::new(3, 8);
        for text in [b"one".as_slice(), b"two", b"three"] {
            set_line(&mut history, text);
            history.commit();
        }

        // Capacity 3: draft + two committed entries; "one" was evicted.
        assert_eq!(history.len(), 3);
        assert_eq!(
            entries(&history),
            vec![b"".to_vec(), b"three".to_vec(), b"two".to_vec()]
        );
    }

    #[test]
    fn test_navigation_clamps_at_both_ends() {
        let mut history = History::new(4, 8);
        set_line(&mut history, b"one");
        history.commit();

        history.move_forward();
        assert_eq!(history.position(), 0);

        history.move_backward();
        assert_eq!(history.position(), 1);
        assert_eq!(history.current().as_slice(), b"one");

        history.move_backward();
        assert_eq!(history.position(), 1);

        history.move_forward();
        assert_eq!(history.position(), 0);
    }

    #[test]
    fn test_commit_from_navigated_position_discards_draft() {
        let mut history = History::new(10, 8);
        for text in [b"one".as_slice(), b"two", b"three"] {
            set_line(&mut history, text);
            history.commit();
        }

        // Type something into the draft, then navigate to "two" and commit it.
        set_line(&mut history, b"unsent");
        history.move_backward();
        history.move_backward();
        assert_eq!(history.current().as_slice(), b"two");

        history.commit();
        assert_eq!(
            entries(&history),
            vec![
                b"".to_vec(),
                b"two".to_vec(),
                b"three".to_vec(),
                b"one".to_vec()
            ]
        );
        assert_eq!(history.position(), 0);
    }

    #[test]
    fn test_draft_edits_survive_navigation() {
        let mut history = History::new(4, 8);
        set_line(&mut history, b"one");
        history.commit();

        set_line(&mut history, b"draft");
        history.move_backward();
        history.move_forward();
        assert_eq!(history.current().as_slice(), b"draft");
    }

    #[test]
    fn test_pool_partition_holds_across_commits() {
        let mut history = History::new(3, 8);
        for round in 0..10 {
            set_line(&mut history, format!("cmd{round}").as_bytes());
            history.commit();
            assert!(history.len() >= 1);
            assert!(history.len() <= history.capacity());
            assert_eq!(history.iter().count(), history.len());
        }
    }
}
