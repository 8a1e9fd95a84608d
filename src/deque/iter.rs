// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

//! Borrowed iteration over the deque's elements.
//!
//! Iterators walk a pair of [`Cursor`]s toward each other. A cursor is a
//! `(block, offset)` pair addressing a physical storage slot, and stepping it
//! is plain carry arithmetic at the block size, so crossing a block boundary
//! costs the same as staying inside one.

use core::fmt::{self, Debug, Formatter};
use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::block::{Block, BLOCK_SIZE};

/// A physical position in the block array: storage slot `offset` of block
/// slot `block`.
///
/// The derived ordering (block first, then offset) matches traversal order
/// because live slots within a block are contiguous and blocks are visited
/// front to back.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub(crate) struct Cursor {
	pub block: usize,
	pub offset: usize,
}

impl Cursor {
	/// The cursor `n` slots forward, carrying into following blocks.
	pub fn forward(self, n: usize) -> Self {
		let flat = self.offset + n;
		Self {
			block: self.block + flat / BLOCK_SIZE,
			offset: flat % BLOCK_SIZE,
		}
	}

	/// The cursor `n` slots backward, borrowing from preceding blocks.
	pub fn backward(self, n: usize) -> Self {
		let flat = self.block * BLOCK_SIZE + self.offset;
		debug_assert!(n <= flat, "cursor stepped back past the block array");
		let flat = flat - n;
		Self {
			block: flat / BLOCK_SIZE,
			offset: flat % BLOCK_SIZE,
		}
	}
}

/// A double-ended iterator over references to a deque's elements, created by
/// [`Deque::iter`](crate::Deque::iter).
pub struct Iter<'a, T> {
	blocks: &'a [Block<T>],
	/// The next element to yield from the front.
	front: Cursor,
	/// One slot past the next element to yield from the back.
	back: Cursor,
	remaining: usize,
}

impl<'a, T> Iter<'a, T> {
	pub(crate) fn new(
		blocks: &'a [Block<T>],
		front: Cursor,
		back: Cursor,
		remaining: usize,
	) -> Self {
		Self { blocks, front, back, remaining }
	}

	/// Both cursors address occupied slots whenever `remaining > 0`.
	fn element(&self, cursor: Cursor) -> &'a T {
		// Safety: cursors between `front` and `back` stay inside the in-use
		//  run of the block array.
		let block = unsafe { self.blocks.get_unchecked(cursor.block) };
		// Safety: as above, the addressed slot is occupied.
		unsafe { block.slot_unchecked(cursor.offset) }
	}
}

impl<'a, T> Iterator for Iter<'a, T> {
	type Item = &'a T;

	fn next(&mut self) -> Option<&'a T> {
		if self.remaining == 0 {
			return None
		}
		let element = self.element(self.front);
		self.front = self.front.forward(1);
		self.remaining -= 1;
		Some(element)
	}

	fn nth(&mut self, n: usize) -> Option<&'a T> {
		if n >= self.remaining {
			self.front = self.back;
			self.remaining = 0;
			return None
		}
		self.front = self.front.forward(n);
		self.remaining -= n;
		self.next()
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.remaining, Some(self.remaining))
	}

	fn count(self) -> usize {
		self.remaining
	}

	fn last(mut self) -> Option<&'a T> {
		self.next_back()
	}
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
	fn next_back(&mut self) -> Option<&'a T> {
		if self.remaining == 0 {
			return None
		}
		self.back = self.back.backward(1);
		self.remaining -= 1;
		Some(self.element(self.back))
	}

	fn nth_back(&mut self, n: usize) -> Option<&'a T> {
		if n >= self.remaining {
			self.back = self.front;
			self.remaining = 0;
			return None
		}
		self.back = self.back.backward(n);
		self.remaining -= n;
		self.next_back()
	}
}

impl<T> ExactSizeIterator for Iter<'_, T> {
	fn len(&self) -> usize {
		self.remaining
	}
}

impl<T> FusedIterator for Iter<'_, T> { }

impl<T> Clone for Iter<'_, T> {
	fn clone(&self) -> Self {
		Self { ..*self }
	}
}

impl<T> Debug for Iter<'_, T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Iter")
		 .field("front", &self.front)
		 .field("back", &self.back)
		 .field("remaining", &self.remaining)
		 .finish()
	}
}

/// A double-ended iterator over mutable references to a deque's elements,
/// created by [`Deque::iter_mut`](crate::Deque::iter_mut).
pub struct IterMut<'a, T> {
	/// The base of the block array. Slots are addressed through raw pointer
	/// projection so that yielded `&mut T` never alias a re-borrow of a whole
	/// block.
	blocks: *mut Block<T>,
	front: Cursor,
	back: Cursor,
	remaining: usize,
	_lifetime: PhantomData<&'a mut T>,
}

// Safety: `IterMut` owns an exclusive borrow of the deque for `'a` and hands
//  out disjoint `&mut T`, so it is as thread-safe as `&mut [T]`.
unsafe impl<T: Send> Send for IterMut<'_, T> { }
// Safety: as above.
unsafe impl<T: Sync> Sync for IterMut<'_, T> { }

impl<'a, T> IterMut<'a, T> {
	pub(crate) fn new(
		blocks: &'a mut [Block<T>],
		front: Cursor,
		back: Cursor,
		remaining: usize,
	) -> Self {
		Self {
			blocks: blocks.as_mut_ptr(),
			front,
			back,
			remaining,
			_lifetime: PhantomData,
		}
	}

	/// Both cursors address occupied slots whenever `remaining > 0`, and each
	/// slot is yielded at most once, so the exclusive borrows are disjoint.
	fn element(&mut self, cursor: Cursor) -> &'a mut T {
		// Safety: cursors between `front` and `back` stay inside the in-use
		//  run of the block array.
		let block = unsafe { self.blocks.add(cursor.block) };
		// Safety: `block` is valid and the offset is in bounds of its storage.
		let slot = unsafe { Block::raw_slot(block, cursor.offset) };
		// Safety: the slot is occupied and never yielded twice.
		unsafe { &mut *slot }
	}
}

impl<'a, T> Iterator for IterMut<'a, T> {
	type Item = &'a mut T;

	fn next(&mut self) -> Option<&'a mut T> {
		if self.remaining == 0 {
			return None
		}
		let element = self.element(self.front);
		self.front = self.front.forward(1);
		self.remaining -= 1;
		Some(element)
	}

	fn nth(&mut self, n: usize) -> Option<&'a mut T> {
		if n >= self.remaining {
			self.front = self.back;
			self.remaining = 0;
			return None
		}
		self.front = self.front.forward(n);
		self.remaining -= n;
		self.next()
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.remaining, Some(self.remaining))
	}

	fn count(self) -> usize {
		self.remaining
	}

	fn last(mut self) -> Option<&'a mut T> {
		self.next_back()
	}
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
	fn next_back(&mut self) -> Option<&'a mut T> {
		if self.remaining == 0 {
			return None
		}
		self.back = self.back.backward(1);
		self.remaining -= 1;
		Some(self.element(self.back))
	}

	fn nth_back(&mut self, n: usize) -> Option<&'a mut T> {
		if n >= self.remaining {
			self.back = self.front;
			self.remaining = 0;
			return None
		}
		self.back = self.back.backward(n);
		self.remaining -= n;
		self.next_back()
	}
}

impl<T> ExactSizeIterator for IterMut<'_, T> {
	fn len(&self) -> usize {
		self.remaining
	}
}

impl<T> FusedIterator for IterMut<'_, T> { }

impl<T> Debug for IterMut<'_, T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("IterMut")
		 .field("front", &self.front)
		 .field("back", &self.back)
		 .field("remaining", &self.remaining)
		 .finish()
	}
}

#[cfg(test)]
mod tests {
	use super::Cursor;
	use crate::block::BLOCK_SIZE;
	use rstest::rstest;

	#[rstest]
	#[case(Cursor { block: 0, offset: 0 }, 1, Cursor { block: 0, offset: 1 })]
	#[case(Cursor { block: 0, offset: BLOCK_SIZE - 1 }, 1, Cursor { block: 1, offset: 0 })]
	#[case(Cursor { block: 2, offset: 5 }, 3 * BLOCK_SIZE, Cursor { block: 5, offset: 5 })]
	#[case(Cursor { block: 0, offset: 10 }, 10, Cursor { block: 1, offset: 4 })]
	fn forward_carries_into_following_blocks(
		#[case] start: Cursor,
		#[case] n: usize,
		#[case] expected: Cursor,
	) {
		assert_eq!(start.forward(n), expected);
	}

	#[rstest]
	#[case(Cursor { block: 1, offset: 0 }, 1, Cursor { block: 0, offset: BLOCK_SIZE - 1 })]
	#[case(Cursor { block: 5, offset: 5 }, 3 * BLOCK_SIZE, Cursor { block: 2, offset: 5 })]
	#[case(Cursor { block: 1, offset: 4 }, 10, Cursor { block: 0, offset: 10 })]
	fn backward_borrows_from_preceding_blocks(
		#[case] start: Cursor,
		#[case] n: usize,
		#[case] expected: Cursor,
	) {
		assert_eq!(start.backward(n), expected);
	}

	#[rstest]
	fn forward_then_backward_round_trips() {
		let cursor = Cursor { block: 3, offset: 7 };
		assert_eq!(cursor.forward(25).backward(25), cursor);
	}

	#[rstest]
	fn ordering_matches_traversal_order() {
		let earlier = Cursor { block: 1, offset: 15 };
		let later = Cursor { block: 2, offset: 0 };
		assert!(earlier < later);
	}
}
