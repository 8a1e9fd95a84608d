// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

//! A double-ended window of occupied slots within a span of storage.
//!
//! Both levels of the deque share this bookkeeping: element slots within a
//! [`Block`](crate::block::Block), and block slots within the deque's block
//! array. The window tracks which contiguous run of slots is occupied and
//! never touches the storage itself, so misuse can corrupt indices but not
//! memory.

use core::ops::Range;

/// Occupied slots `[head, head + len)` within a span of `cap` slots.
///
/// Invariant: `head + len <= cap`. An empty window may re-seat its head at
/// either end of the span when a slot is claimed, so repeated growth at one
/// end always has the full spare capacity available.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Window {
	head: usize,
	len: usize,
	cap: usize,
}

impl Window {
	pub const fn new(cap: usize) -> Self {
		Self { head: 0, len: 0, cap }
	}

	pub const fn head(&self) -> usize { self.head }
	pub const fn len(&self) -> usize { self.len }
	pub const fn cap(&self) -> usize { self.cap }

	pub const fn is_empty(&self) -> bool { self.len == 0 }
	pub const fn is_full(&self) -> bool { self.len == self.cap }

	/// The physical slot holding logical position `pos`.
	pub const fn position(&self, pos: usize) -> usize {
		self.head + pos
	}

	pub const fn range(&self) -> Range<usize> {
		self.head..self.head + self.len
	}

	/// Returns `true` if a slot can be claimed in front of the occupied run.
	///
	/// An empty window can always grow frontward (given any capacity): it
	/// re-seats itself at the back-most slot, leaving the most room for
	/// further front growth.
	pub const fn can_grow_front(&self) -> bool {
		self.head > 0 || (self.len == 0 && self.cap > 0)
	}

	/// Returns `true` if a slot can be claimed behind the occupied run.
	///
	/// Mirrors [`can_grow_front`](Self::can_grow_front): an empty window
	/// re-seats itself at the front-most slot.
	pub const fn can_grow_back(&self) -> bool {
		self.head + self.len < self.cap || (self.len == 0 && self.cap > 0)
	}

	/// Claims the slot in front of the occupied run, returning its index.
	pub fn claim_front(&mut self) -> usize {
		debug_assert!(self.can_grow_front(), "no slot available at the front");
		if self.len == 0 {
			self.head = self.cap;
		}
		self.head -= 1;
		self.len += 1;
		self.head
	}

	/// Claims the slot behind the occupied run, returning its index.
	pub fn claim_back(&mut self) -> usize {
		debug_assert!(self.can_grow_back(), "no slot available at the back");
		if self.len == 0 {
			self.head = 0;
		}
		self.len += 1;
		self.head + self.len - 1
	}

	/// Releases the front slot of the occupied run, returning its index.
	pub fn release_front(&mut self) -> usize {
		debug_assert!(self.len > 0, "the window is empty");
		let slot = self.head;
		self.head += 1;
		self.len -= 1;
		slot
	}

	/// Releases the back slot of the occupied run, returning its index.
	pub fn release_back(&mut self) -> usize {
		debug_assert!(self.len > 0, "the window is empty");
		self.len -= 1;
		self.head + self.len
	}

	/// Resets to empty, retaining the capacity.
	pub fn reset(&mut self) {
		self.head = 0;
		self.len = 0;
	}

	/// Re-seats the window after its storage has been regrown: the occupied
	/// run keeps its length but now starts at `head` within the new span.
	pub fn reseat(&mut self, head: usize, cap: usize) {
		debug_assert!(head + self.len <= cap, "the window does not fit its new span");
		self.head = head;
		self.cap = cap;
	}
}

#[cfg(test)]
mod tests {
	use super::Window;
	use rstest::rstest;

	#[rstest]
	fn new_window_is_empty() {
		let window = Window::new(4);
		assert!(window.is_empty());
		assert!(!window.is_full());
		assert_eq!(window.len(), 0);
		assert_eq!(window.cap(), 4);
		assert_eq!(window.range(), 0..0);
	}

	#[rstest]
	fn zero_capacity_cannot_grow() {
		let window = Window::new(0);
		assert!(!window.can_grow_front());
		assert!(!window.can_grow_back());
	}

	#[rstest]
	fn empty_window_claims_back_most_slot_at_front() {
		let mut window = Window::new(4);
		assert_eq!(window.claim_front(), 3);
		assert_eq!(window.claim_front(), 2);
		assert_eq!(window.range(), 2..4);
	}

	#[rstest]
	fn empty_window_claims_front_most_slot_at_back() {
		let mut window = Window::new(4);
		// Drain past the front so head ends up at the far end.
		window.claim_front();
		window.release_back();
		assert_eq!(window.head(), 3);

		assert_eq!(window.claim_back(), 0);
		assert_eq!(window.claim_back(), 1);
		assert_eq!(window.range(), 0..2);
	}

	#[rstest]
	fn back_seated_run_cannot_grow_front() {
		let mut window = Window::new(4);
		assert_eq!(window.claim_back(), 0);
		assert_eq!(window.claim_back(), 1);
		assert!(!window.can_grow_front());
		assert!(window.can_grow_back());
	}

	#[rstest]
	fn full_window_cannot_grow() {
		let mut window = Window::new(2);
		window.claim_back();
		window.claim_back();
		assert!(window.is_full());
		assert!(!window.can_grow_front());
		assert!(!window.can_grow_back());
	}

	#[rstest]
	fn release_front_advances_head() {
		let mut window = Window::new(4);
		window.claim_back();
		window.claim_back();
		window.claim_back();
		assert_eq!(window.release_front(), 0);
		assert_eq!(window.release_back(), 2);
		assert_eq!(window.range(), 1..2);
	}

	#[rstest]
	fn reseat_moves_the_run() {
		let mut window = Window::new(2);
		window.claim_back();
		window.claim_back();
		window.reseat(2, 4);
		assert_eq!(window.range(), 2..4);
		assert!(window.can_grow_front());
		assert!(!window.can_grow_back());
	}

	#[rstest]
	fn reset_retains_capacity() {
		let mut window = Window::new(4);
		window.claim_front();
		window.reset();
		assert!(window.is_empty());
		assert_eq!(window.cap(), 4);
		assert_eq!(window.head(), 0);
	}

	#[rstest]
	fn position_offsets_by_head() {
		let mut window = Window::new(8);
		window.claim_front();
		window.claim_front();
		assert_eq!(window.head(), 6);
		assert_eq!(window.position(0), 6);
		assert_eq!(window.position(1), 7);
	}
}
