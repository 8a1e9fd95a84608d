// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

//! Fixed-capacity storage units.
//!
//! A [`Block`] owns sixteen raw element slots. The occupied window is the
//! single source of truth for which slots hold live values: slots outside it
//! are uninitialized memory and are never read, cloned, or dropped. All
//! element construction and destruction happens in place, through explicit
//! writes and reads of [`MaybeUninit`] slots.

use core::mem::MaybeUninit;
use core::ptr;

use crate::window::Window;

/// The fixed number of element slots in a [`Block`].
pub(crate) const BLOCK_SIZE: usize = 16;

/// A fixed-capacity storage unit holding a contiguous run of live elements.
///
/// The run can grow and shrink at both ends without shifting: the window's
/// head offset absorbs front growth the same way spare capacity at the back
/// absorbs back growth. A full block always has its run seated at slot 0.
///
/// Moving a `Block` moves its storage bytes; live values keep their in-block
/// slots, so block relocation during deque growth never re-shuffles elements.
pub(crate) struct Block<T> {
	storage: [MaybeUninit<T>; BLOCK_SIZE],
	window: Window,
}

/// A push rejected for lack of space at that end of the block.
///
/// Hands the element back so the caller can place it into an adjacent block.
/// This never escapes the crate: the deque always resolves it by claiming
/// another block.
pub(crate) struct BlockFull<T> {
	pub element: T,
}

/// The outcome of an interior insertion.
pub(crate) enum Inserted<T> {
	/// The element fit within the block.
	Done,
	/// The block was full: the value displaced off the back end must be
	/// relocated into the following block by the caller.
	Overflow(T),
}

impl<T> Block<T> {
	pub fn new() -> Self {
		Self {
			storage: [const { MaybeUninit::uninit() }; BLOCK_SIZE],
			window: Window::new(BLOCK_SIZE),
		}
	}

	/// Creates a block holding `len` clones of `value`, seated at slot 0.
	pub fn filled(value: &T, len: usize) -> Self
	where
		T: Clone,
	{
		debug_assert!(len <= BLOCK_SIZE, "too many values for one block");
		let mut block = Self::new();
		for _ in 0..len {
			match block.push_back(value.clone()) {
				Ok(()) => { }
				Err(_) => unreachable!("a fresh block has capacity for BLOCK_SIZE elements"),
			}
		}
		block
	}

	pub fn len(&self) -> usize {
		self.window.len()
	}

	pub fn is_empty(&self) -> bool {
		self.window.is_empty()
	}

	pub fn is_full(&self) -> bool {
		self.window.is_full()
	}

	/// The physical slot of the first live element.
	pub fn head(&self) -> usize {
		self.window.head()
	}

	pub fn can_grow_front(&self) -> bool {
		self.window.can_grow_front()
	}

	pub fn can_grow_back(&self) -> bool {
		self.window.can_grow_back()
	}

	/// Constructs `value` in place in the slot before the live run.
	///
	/// Fails with the element handed back when no slot is free at the front;
	/// the caller relocates it into the preceding block.
	pub fn push_front(&mut self, value: T) -> Result<(), BlockFull<T>> {
		if !self.window.can_grow_front() {
			return Err(BlockFull { element: value })
		}
		let slot = self.window.claim_front();
		self.storage[slot].write(value);
		Ok(())
	}

	/// Constructs `value` in place in the slot after the live run.
	pub fn push_back(&mut self, value: T) -> Result<(), BlockFull<T>> {
		if !self.window.can_grow_back() {
			return Err(BlockFull { element: value })
		}
		let slot = self.window.claim_back();
		self.storage[slot].write(value);
		Ok(())
	}

	/// Inserts `value` at logical position `local_pos`, shifting the shorter
	/// side toward whichever end has a free slot (front preferred). When the
	/// block is full, the element displaced off the back end is returned as
	/// [`Inserted::Overflow`] and must be relocated by the caller; data is
	/// never dropped here.
	#[allow(clippy::multiple_unsafe_ops_per_block)]
	pub fn insert_at(&mut self, local_pos: usize, value: T) -> Inserted<T> {
		let len = self.window.len();
		debug_assert!(local_pos <= len, "insertion position outside the live run");
		let head = self.window.head();
		let base = self.storage.as_mut_ptr();
		if self.window.can_grow_front() {
			let new_head = self.window.claim_front();
			// Safety: `[head, head + local_pos)` are live slots and
			//  `new_head` is the free slot directly before them (or the
			//  back-most slot of an empty block, in which case the copy is
			//  empty). Both ranges are in bounds of the storage array.
			unsafe {
				ptr::copy(base.add(head), base.add(new_head), local_pos);
				base.add(new_head + local_pos).write(MaybeUninit::new(value));
			}
			Inserted::Done
		} else if self.window.can_grow_back() {
			self.window.claim_back();
			let split = head + local_pos;
			// Safety: `[split, head + len)` are live slots and the slot after
			//  the run is free; the shifted range stays in bounds.
			unsafe {
				ptr::copy(base.add(split), base.add(split + 1), len - local_pos);
				base.add(split).write(MaybeUninit::new(value));
			}
			Inserted::Done
		} else {
			// Full block: head == 0. Read out the back element, shift the
			// tail one slot backward, and hand the displaced value up.
			let split = head + local_pos;
			// Safety: all `BLOCK_SIZE` slots are live. The back element is
			//  moved out before its slot is overwritten by the shift, and the
			//  window still covers every slot afterwards.
			unsafe {
				let displaced = base.add(head + len - 1).read().assume_init();
				ptr::copy(base.add(split), base.add(split + 1), len - 1 - local_pos);
				base.add(split).write(MaybeUninit::new(value));
				Inserted::Overflow(displaced)
			}
		}
	}

	/// Moves the front element out of the block. `None` if the block is
	/// empty; never corrupts state.
	pub fn pop_front(&mut self) -> Option<T> {
		if self.window.is_empty() {
			return None
		}
		let slot = self.window.release_front();
		// Safety: `slot` was inside the occupied window, so it holds a live
		//  value which the window no longer covers after the release.
		Some(unsafe { self.storage[slot].assume_init_read() })
	}

	/// Moves the back element out of the block.
	pub fn pop_back(&mut self) -> Option<T> {
		if self.window.is_empty() {
			return None
		}
		let slot = self.window.release_back();
		// Safety: as in `pop_front`.
		Some(unsafe { self.storage[slot].assume_init_read() })
	}

	pub fn get(&self, local_pos: usize) -> Option<&T> {
		if local_pos >= self.window.len() {
			return None
		}
		// Safety: bounds checked above.
		Some(unsafe { self.get_unchecked(local_pos) })
	}

	pub fn get_mut(&mut self, local_pos: usize) -> Option<&mut T> {
		if local_pos >= self.window.len() {
			return None
		}
		// Safety: bounds checked above.
		Some(unsafe { self.get_unchecked_mut(local_pos) })
	}

	/// Returns the element at logical position `local_pos` without a bounds
	/// check, for callers which have already validated the index at the
	/// deque level.
	///
	/// # Safety
	///
	/// `local_pos` must be less than [`len`](Self::len).
	pub unsafe fn get_unchecked(&self, local_pos: usize) -> &T {
		let slot = self.window.position(local_pos);
		// Safety: the slot is inside the occupied window, so it is in bounds
		//  and initialized.
		unsafe { self.storage.get_unchecked(slot).assume_init_ref() }
	}

	/// # Safety
	///
	/// `local_pos` must be less than [`len`](Self::len).
	pub unsafe fn get_unchecked_mut(&mut self, local_pos: usize) -> &mut T {
		let slot = self.window.position(local_pos);
		// Safety: as in `get_unchecked`.
		unsafe { self.storage.get_unchecked_mut(slot).assume_init_mut() }
	}

	/// Returns the element in physical slot `slot`, used by cursors which
	/// address storage directly.
	///
	/// # Safety
	///
	/// `slot` must be inside the occupied window.
	pub unsafe fn slot_unchecked(&self, slot: usize) -> &T {
		debug_assert!(self.window.range().contains(&slot), "slot outside the live run");
		// Safety: the caller promises the slot is occupied.
		unsafe { self.storage.get_unchecked(slot).assume_init_ref() }
	}

	/// Returns a raw pointer to physical slot `slot` of the block at `this`,
	/// without materializing a reference to the block. Mutable iterators use
	/// this so that yielded references don't alias through a re-borrow of
	/// the whole block.
	///
	/// # Safety
	///
	/// `this` must point to a valid block and `slot` must be in bounds of its
	/// storage. Reading the slot additionally requires it to be occupied.
	pub unsafe fn raw_slot(this: *mut Self, slot: usize) -> *mut T {
		// Safety: `storage` projection of a valid block pointer; the caller
		//  promises `slot` is in bounds.
		unsafe { (&raw mut (*this).storage).cast::<T>().add(slot) }
	}

	/// Drops all live elements in place and resets to empty.
	pub fn clear(&mut self) {
		let range = self.window.range();
		// Reset before dropping: if a drop panics, the remaining elements
		// leak rather than getting dropped twice.
		self.window.reset();
		let slice = &mut self.storage[range];
		// Safety: every slot in the old window holds a live value, and the
		//  window no longer covers them.
		unsafe {
			ptr::drop_in_place(slice as *mut [MaybeUninit<T>] as *mut [T]);
		}
	}
}

impl<T> Drop for Block<T> {
	fn drop(&mut self) {
		self.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::{Block, Inserted, BLOCK_SIZE};
	use alloc::rc::Rc;
	use core::cell::Cell;
	use rstest::rstest;

	#[rstest]
	fn push_back_fills_all_slots() {
		let mut block = Block::new();
		for i in 0..BLOCK_SIZE {
			assert!(block.push_back(i).is_ok());
		}
		assert!(block.is_full());
		assert!(block.push_back(99).is_err());
		for i in 0..BLOCK_SIZE {
			assert_eq!(block.get(i), Some(&i));
		}
	}

	#[rstest]
	fn push_front_on_empty_block_seats_at_the_back() {
		let mut block = Block::new();
		assert!(block.push_front(1).is_ok());
		assert_eq!(block.head(), BLOCK_SIZE - 1);
		assert!(block.push_front(0).is_ok());
		assert_eq!(block.get(0), Some(&0));
		assert_eq!(block.get(1), Some(&1));
	}

	#[rstest]
	fn back_seated_block_rejects_push_front() {
		let mut block = Block::new();
		block.push_back(1).ok();
		assert!(!block.can_grow_front());
		let err = block.push_front(0).err();
		assert_eq!(err.map(|full| full.element), Some(0));
	}

	#[rstest]
	fn pop_front_and_back_return_ends() {
		let mut block = Block::new();
		for i in 0..4 {
			block.push_back(i).ok();
		}
		assert_eq!(block.pop_front(), Some(0));
		assert_eq!(block.pop_back(), Some(3));
		assert_eq!(block.len(), 2);
		assert_eq!(block.get(0), Some(&1));
	}

	#[rstest]
	fn pop_on_empty_block_is_none() {
		let mut block: Block<i32> = Block::new();
		assert_eq!(block.pop_front(), None);
		assert_eq!(block.pop_back(), None);
	}

	#[rstest]
	fn insert_at_shifts_frontward_when_possible() {
		let mut block = Block::new();
		block.push_front(30).ok();
		block.push_front(10).ok();
		let head = block.head();
		assert!(matches!(block.insert_at(1, 20), Inserted::Done));
		assert_eq!(block.head(), head - 1);
		assert_eq!(block.get(0), Some(&10));
		assert_eq!(block.get(1), Some(&20));
		assert_eq!(block.get(2), Some(&30));
	}

	#[rstest]
	fn insert_at_shifts_backward_when_front_is_seated() {
		let mut block = Block::new();
		block.push_back(10).ok();
		block.push_back(30).ok();
		assert!(matches!(block.insert_at(1, 20), Inserted::Done));
		assert_eq!(block.get(0), Some(&10));
		assert_eq!(block.get(1), Some(&20));
		assert_eq!(block.get(2), Some(&30));
	}

	#[rstest]
	fn insert_at_full_block_displaces_the_back_element() {
		let mut block = Block::new();
		for i in 0..BLOCK_SIZE {
			block.push_back(i).ok();
		}
		let Inserted::Overflow(displaced) = block.insert_at(0, 99) else {
			panic!("a full block must overflow");
		};
		assert_eq!(displaced, BLOCK_SIZE - 1);
		assert!(block.is_full());
		assert_eq!(block.get(0), Some(&99));
		assert_eq!(block.get(1), Some(&0));
		assert_eq!(block.get(BLOCK_SIZE - 1), Some(&(BLOCK_SIZE - 2)));
	}

	#[rstest]
	fn filled_clones_the_value() {
		let block = Block::filled(&7, 5);
		assert_eq!(block.len(), 5);
		assert_eq!(block.head(), 0);
		assert_eq!(block.get(4), Some(&7));
		assert_eq!(block.get(5), None);
	}

	#[derive(Clone)]
	struct Counted(Rc<Cell<usize>>);

	impl Drop for Counted {
		fn drop(&mut self) {
			self.0.set(self.0.get() + 1);
		}
	}

	#[rstest]
	fn clear_drops_every_live_element_once() {
		let drops = Rc::new(Cell::new(0));
		let mut block = Block::new();
		for _ in 0..6 {
			block.push_back(Counted(Rc::clone(&drops))).ok();
		}
		block.pop_front();
		assert_eq!(drops.get(), 1);
		block.clear();
		assert_eq!(drops.get(), 6);
		drop(block);
		assert_eq!(drops.get(), 6);
	}

	#[rstest]
	fn dropping_a_block_drops_its_elements() {
		let drops = Rc::new(Cell::new(0));
		{
			let mut block = Block::new();
			for _ in 0..3 {
				block.push_front(Counted(Rc::clone(&drops))).ok();
			}
		}
		assert_eq!(drops.get(), 3);
	}
}
