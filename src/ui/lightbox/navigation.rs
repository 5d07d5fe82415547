// SPDX-License-Identifier: MPL-2.0
//! Single owner of the "which item is open" index.
//!
//! The grid and the lightbox both read the index from here; neither keeps a
//! copy. At most one index is open at a time.

use std::fmt;

/// Notifications for the host, fired after the index changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    /// Moved forward to this index.
    Next(usize),
    /// Moved backward to this index.
    Prev(usize),
    /// The viewer closed; focus should return to this index.
    Closed(usize),
}

/// `open` was given an index outside the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfRange {
    pub index: usize,
    pub len: usize,
}

impl fmt::Display for IndexOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "index {} out of range for {} items", self.index, self.len)
    }
}

impl std::error::Error for IndexOutOfRange {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationCoordinator {
    len: usize,
    current: Option<usize>,
    last_closed: Option<usize>,
    remember_last_index: bool,
}

impl NavigationCoordinator {
    #[must_use]
    pub fn new(len: usize, remember_last_index: bool) -> Self {
        Self {
            len,
            current: None,
            last_closed: None,
            remember_last_index,
        }
    }

    /// Opens at `index`, replacing whatever was open.
    pub fn open(&mut self, index: usize) -> Result<usize, IndexOutOfRange> {
        if index >= self.len {
            return Err(IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        self.current = Some(index);
        Ok(index)
    }

    /// Opens at the last closed index when remembering is enabled,
    /// otherwise at `fallback`.
    pub fn reopen(&mut self, fallback: usize) -> Result<usize, IndexOutOfRange> {
        let index = self.resume_index().unwrap_or(fallback);
        self.open(index)
    }

    /// Index [`reopen`](Self::reopen) would resume at, if any.
    #[must_use]
    pub fn resume_index(&self) -> Option<usize> {
        self.last_closed
            .filter(|i| self.remember_last_index && *i < self.len)
    }

    /// Advances with wraparound. No-op when closed or with one item.
    pub fn next(&mut self) -> Option<NavigationEvent> {
        let current = self.current?;
        if self.len <= 1 {
            return None;
        }
        let index = (current + 1) % self.len;
        self.current = Some(index);
        Some(NavigationEvent::Next(index))
    }

    /// Steps back with wraparound. No-op when closed or with one item.
    pub fn prev(&mut self) -> Option<NavigationEvent> {
        let current = self.current?;
        if self.len <= 1 {
            return None;
        }
        let index = (current + self.len - 1) % self.len;
        self.current = Some(index);
        Some(NavigationEvent::Prev(index))
    }

    /// Closes the viewer. Closing twice is a no-op.
    pub fn close(&mut self) -> Option<NavigationEvent> {
        let index = self.current.take()?;
        self.last_closed = Some(index);
        Some(NavigationEvent::Closed(index))
    }

    /// Adopts a new collection size, closing if the open index vanished.
    pub fn set_item_count(&mut self, len: usize) -> Option<NavigationEvent> {
        self.len = len;
        let closed = if self.current.is_some_and(|i| i >= len) {
            self.close()
        } else {
            None
        };
        if self.last_closed.is_some_and(|i| i >= len) {
            self.last_closed = None;
        }
        closed
    }

    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    #[must_use]
    pub fn last_closed(&self) -> Option<usize> {
        self.last_closed
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_rejects_out_of_range() {
        let mut nav = NavigationCoordinator::new(3, false);
        assert_eq!(nav.open(3), Err(IndexOutOfRange { index: 3, len: 3 }));
        assert!(!nav.is_open());
    }

    #[test]
    fn open_while_open_replaces() {
        let mut nav = NavigationCoordinator::new(5, false);
        nav.open(1).expect("open");
        nav.open(4).expect("open");
        assert_eq!(nav.current(), Some(4));
    }

    #[test]
    fn next_n_times_returns_to_start() {
        for len in 1..8 {
            for start in 0..len {
                let mut nav = NavigationCoordinator::new(len, false);
                nav.open(start).expect("open");
                for _ in 0..len {
                    nav.next();
                }
                assert_eq!(nav.current(), Some(start));
                for _ in 0..len {
                    nav.prev();
                }
                assert_eq!(nav.current(), Some(start));
            }
        }
    }

    #[test]
    fn wraps_at_both_ends() {
        let mut nav = NavigationCoordinator::new(5, false);
        nav.open(4).expect("open");
        assert_eq!(nav.next(), Some(NavigationEvent::Next(0)));
        assert_eq!(nav.prev(), Some(NavigationEvent::Prev(4)));
    }

    #[test]
    fn single_item_does_not_navigate() {
        let mut nav = NavigationCoordinator::new(1, false);
        nav.open(0).expect("open");
        assert_eq!(nav.next(), None);
        assert_eq!(nav.prev(), None);
    }

    #[test]
    fn close_reports_index_once() {
        let mut nav = NavigationCoordinator::new(5, false);
        nav.open(2).expect("open");
        assert_eq!(nav.close(), Some(NavigationEvent::Closed(2)));
        assert_eq!(nav.close(), None);
        assert_eq!(nav.last_closed(), Some(2));
    }

    #[test]
    fn closed_coordinator_ignores_navigation() {
        let mut nav = NavigationCoordinator::new(5, false);
        assert_eq!(nav.next(), None);
        assert_eq!(nav.current(), None);
    }

    #[test]
    fn reopen_honors_memory_setting() {
        let mut remembering = NavigationCoordinator::new(5, true);
        remembering.open(3).expect("open");
        remembering.close();
        assert_eq!(remembering.resume_index(), Some(3));
        assert_eq!(remembering.reopen(0), Ok(3));

        let mut forgetful = NavigationCoordinator::new(5, false);
        forgetful.open(3).expect("open");
        forgetful.close();
        assert_eq!(forgetful.reopen(0), Ok(0));
    }

    #[test]
    fn shrinking_collection_closes_dangling_index() {
        let mut nav = NavigationCoordinator::new(5, true);
        nav.open(4).expect("open");
        assert_eq!(nav.set_item_count(2), Some(NavigationEvent::Closed(4)));
        assert_eq!(nav.last_closed(), None);
        assert_eq!(nav.resume_index(), None);
        assert_eq!(nav.reopen(1), Ok(1));
    }

    #[test]
    fn shrinking_collection_keeps_an_in_range_last_closed() {
        let mut nav = NavigationCoordinator::new(5, true);
        nav.open(1).expect("open");
        nav.close();
        assert_eq!(nav.set_item_count(3), None);
        assert_eq!(nav.last_closed(), Some(1));
    }
}
