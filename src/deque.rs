// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

//! # Internal Layout
//!
//! The deque owns an array of fixed-capacity blocks. A window over the block
//! array tracks which blocks are in use, exactly like the window each block
//! keeps over its own element slots. The same double-ended growth trick,
//! applied one level up:
//!
//! ```text
//! blocks:  | free | free | front | full | full | back | free |
//!                        ^ head                       ^ head + used
//! ```
//!
//! At most the first and last in-use block are partially filled; every block
//! strictly between them is full. A full block is always seated at slot 0 of
//! its storage, the front block grows downward from the end of its storage,
//! and the back block grows upward from slot 0. Logical indices therefore
//! translate to a `(block, offset)` pair with one subtraction and one
//! division.
//!
//! When a push finds no spare block slot at its end, the block array doubles:
//! a new array is allocated in full, the in-use blocks are moved over (their
//! contents stay put inside each block), and the window is re-seated, at the
//! midpoint for front growth and at its old head for back growth.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::{self, Debug, Formatter};
use core::hash::{Hash, Hasher};
use core::mem;
use core::ops::{Index, IndexMut};

use crate::block::{Block, BlockFull, Inserted, BLOCK_SIZE};
use crate::error::{OutOfRange, Result};
use iter::Cursor;
pub use into_iter::IntoIter;
pub use iter::{Iter, IterMut};

mod eq;
pub(crate) mod into_iter;
pub(crate) mod iter;

/// A block-structured double-ended queue.
///
/// Elements live in fixed-capacity blocks of sixteen slots; the blocks live in
/// a growable array with spare capacity reserved at both ends. Pushes and pops
/// at either end are amortized *O*(1), and indexing is *O*(1).
///
/// # Examples
///
/// ```
/// use chunk_deque::Deque;
///
/// let mut deque = Deque::new();
/// deque.push_back(1);
/// deque.push_back(2);
/// deque.push_front(0);
///
/// assert_eq!(deque.len(), 3);
/// assert_eq!(deque.pop_front(), Some(0));
/// assert_eq!(deque.pop_back(), Some(2));
/// ```
pub struct Deque<T> {
	blocks: Box<[Block<T>]>,
	window: crate::window::Window,
	len: usize,
}

impl<T> Deque<T> {
	/// Creates a new, empty deque.
	///
	/// No memory is allocated until the first push.
	///
	/// # Examples
	///
	/// ```
	/// use chunk_deque::Deque;
	///
	/// let deque: Deque<i32> = Deque::new();
	/// assert!(deque.is_empty());
	/// assert_eq!(deque.capacity(), 0);
	/// ```
	#[must_use]
	pub fn new() -> Self {
		Self {
			blocks: Box::default(),
			window: crate::window::Window::new(0),
			len: 0,
		}
	}

	/// Creates a new, empty deque with enough blocks for at least `capacity`
	/// elements.
	///
	/// # Examples
	///
	/// ```
	/// use chunk_deque::Deque;
	///
	/// let deque: Deque<i32> = Deque::with_capacity(20);
	/// assert!(deque.capacity() >= 20);
	/// assert!(deque.is_empty());
	/// ```
	#[must_use]
	pub fn with_capacity(capacity: usize) -> Self {
		let count = capacity.div_ceil(BLOCK_SIZE);
		Self {
			blocks: allocate_blocks(count),
			window: crate::window::Window::new(count),
			len: 0,
		}
	}

	/// Creates a deque holding `len` clones of `value`.
	///
	/// # Examples
	///
	/// ```
	/// use chunk_deque::Deque;
	///
	/// let deque = Deque::from_elem(7, 20);
	/// assert_eq!(deque.len(), 20);
	/// assert_eq!(deque[19], 7);
	/// ```
	#[must_use]
	pub fn from_elem(value: T, len: usize) -> Self
	where
		T: Clone,
	{
		let mut deque = Self::with_capacity(len);
		let mut remaining = len;
		while remaining > 0 {
			let take = remaining.min(BLOCK_SIZE);
			let slot = deque.window.claim_back();
			deque.blocks[slot] = Block::filled(&value, take);
			deque.len += take;
			remaining -= take;
		}
		deque
	}

	/// Creates a deque holding `len` default-constructed elements.
	#[must_use]
	pub fn with_default(len: usize) -> Self
	where
		T: Default,
	{
		let mut deque = Self::with_capacity(len);
		for _ in 0..len {
			deque.push_back(T::default());
		}
		deque
	}

	/// Returns the number of elements in the deque.
	pub const fn len(&self) -> usize {
		self.len
	}

	/// Returns `true` if the deque holds no elements.
	pub const fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Returns the total number of elements the deque can hold without
	/// growing its block array.
	pub const fn capacity(&self) -> usize {
		self.window.cap() * BLOCK_SIZE
	}

	/// Appends an element to the back of the deque.
	///
	/// # Examples
	///
	/// ```
	/// use chunk_deque::Deque;
	///
	/// let mut deque = Deque::new();
	/// deque.push_back(1);
	/// deque.push_back(3);
	/// assert_eq!(deque.back(), Some(&3));
	/// ```
	pub fn push_back(&mut self, value: T) {
		let value = match self.back_block_mut() {
			Some(block) => match block.push_back(value) {
				Ok(()) => {
					self.len += 1;
					return
				}
				Err(BlockFull { element }) => element,
			},
			None => value,
		};
		self.push_back_slow(value);
	}

	/// Prepends an element to the front of the deque.
	///
	/// # Examples
	///
	/// ```
	/// use chunk_deque::Deque;
	///
	/// let mut deque = Deque::new();
	/// deque.push_front(1);
	/// deque.push_front(2);
	/// assert_eq!(deque.front(), Some(&2));
	/// ```
	pub fn push_front(&mut self, value: T) {
		let value = match self.front_block_mut() {
			Some(block) => match block.push_front(value) {
				Ok(()) => {
					self.len += 1;
					return
				}
				Err(BlockFull { element }) => element,
			},
			None => value,
		};
		self.push_front_slow(value);
	}

	/// Appends the value returned by `fill`, constructing it directly into
	/// its storage slot. The in-place equivalent of [`push_back`] for values
	/// built at the call site.
	///
	/// [`push_back`]: Self::push_back
	pub fn push_back_with(&mut self, fill: impl FnOnce() -> T) {
		self.push_back(fill());
	}

	/// Prepends the value returned by `fill`, constructing it directly into
	/// its storage slot.
	pub fn push_front_with(&mut self, fill: impl FnOnce() -> T) {
		self.push_front(fill());
	}

	/// Removes and returns the back element, or `None` if the deque is empty.
	///
	/// # Examples
	///
	/// ```
	/// use chunk_deque::Deque;
	///
	/// let mut deque: Deque<i32> = Deque::new();
	/// assert_eq!(deque.pop_back(), None);
	/// deque.push_back(1);
	/// assert_eq!(deque.pop_back(), Some(1));
	/// ```
	pub fn pop_back(&mut self) -> Option<T> {
		let slot = self.back_slot()?;
		let block = &mut self.blocks[slot];
		let value = block.pop_back()?;
		self.len -= 1;
		if block.is_empty() {
			// Lazy retirement: the emptied block stays in the array, ready
			// to be claimed again.
			self.window.release_back();
		}
		Some(value)
	}

	/// Removes and returns the front element, or `None` if the deque is
	/// empty.
	pub fn pop_front(&mut self) -> Option<T> {
		let slot = self.front_slot()?;
		let block = &mut self.blocks[slot];
		let value = block.pop_front()?;
		self.len -= 1;
		if block.is_empty() {
			self.window.release_front();
		}
		Some(value)
	}

	/// Returns a reference to the element at `index`, or [`OutOfRange`] when
	/// `index >= len`.
	///
	/// # Errors
	///
	/// Returns an error describing the failed index when it is out of range.
	///
	/// # Examples
	///
	/// ```
	/// use chunk_deque::Deque;
	///
	/// let deque: Deque<i32> = (0..5).collect();
	/// assert_eq!(deque.at(3), Ok(&3));
	/// assert!(deque.at(5).is_err());
	/// ```
	pub fn at(&self, index: usize) -> Result<&T> {
		if index >= self.len {
			return Err(OutOfRange { index, len: self.len })
		}
		// Safety: bounds checked above.
		Ok(unsafe { self.get_unchecked(index) })
	}

	/// Returns a mutable reference to the element at `index`.
	///
	/// # Errors
	///
	/// Returns an error describing the failed index when it is out of range.
	pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
		if index >= self.len {
			return Err(OutOfRange { index, len: self.len })
		}
		// Safety: bounds checked above.
		Ok(unsafe { self.get_unchecked_mut(index) })
	}

	/// Returns a reference to the element at `index`, or `None` when out of
	/// range.
	pub fn get(&self, index: usize) -> Option<&T> {
		self.at(index).ok()
	}

	/// Returns a mutable reference to the element at `index`, or `None` when
	/// out of range.
	pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
		self.at_mut(index).ok()
	}

	/// Returns a reference to the element at `index` without a bounds check.
	///
	/// For traversal where the index has already been validated; [`at`] and
	/// the indexing operator check on every access.
	///
	/// [`at`]: Self::at
	///
	/// # Safety
	///
	/// `index` must be less than [`len`](Self::len).
	pub unsafe fn get_unchecked(&self, index: usize) -> &T {
		let (block, local) = self.locate(index);
		// Safety: `locate` maps any in-bounds index to a live position.
		let block = unsafe { self.blocks.get_unchecked(block) };
		// Safety: as above.
		unsafe { block.get_unchecked(local) }
	}

	/// Returns a mutable reference to the element at `index` without a
	/// bounds check.
	///
	/// # Safety
	///
	/// `index` must be less than [`len`](Self::len).
	pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
		let (block, local) = self.locate(index);
		// Safety: `locate` maps any in-bounds index to a live position.
		let block = unsafe { self.blocks.get_unchecked_mut(block) };
		// Safety: as above.
		unsafe { block.get_unchecked_mut(local) }
	}

	/// Returns a reference to the front element, or `None` if the deque is
	/// empty.
	pub fn front(&self) -> Option<&T> {
		self.get(0)
	}

	/// Returns a mutable reference to the front element.
	pub fn front_mut(&mut self) -> Option<&mut T> {
		self.get_mut(0)
	}

	/// Returns a reference to the back element, or `None` if the deque is
	/// empty.
	pub fn back(&self) -> Option<&T> {
		self.get(self.len.checked_sub(1)?)
	}

	/// Returns a mutable reference to the back element.
	pub fn back_mut(&mut self) -> Option<&mut T> {
		self.get_mut(self.len.checked_sub(1)?)
	}

	/// Inserts `value` at logical position `index`, shifting later elements
	/// one position backward.
	///
	/// An interior insertion first lands in the block covering `index`; when
	/// that block is full, the element displaced off its back end cascades
	/// through the following blocks until one has room, growing the deque at
	/// the back like [`push_back`](Self::push_back) if none does.
	///
	/// # Errors
	///
	/// Returns an error when `index > len`. `index == len` appends.
	///
	/// # Examples
	///
	/// ```
	/// use chunk_deque::Deque;
	///
	/// let mut deque: Deque<i32> = (0..40).collect();
	/// deque.insert(1, 99).unwrap();
	/// assert_eq!(deque.len(), 41);
	/// assert_eq!(deque[1], 99);
	/// assert_eq!(deque[2], 1);
	/// assert_eq!(deque[40], 39);
	/// ```
	pub fn insert(&mut self, index: usize, value: T) -> Result {
		if index > self.len {
			return Err(OutOfRange { index, len: self.len })
		}
		if index == self.len {
			self.push_back(value);
			return Ok(())
		}
		if index == 0 {
			self.push_front(value);
			return Ok(())
		}

		let (block, local) = self.locate(index);
		let mut displaced = match self.blocks[block].insert_at(local, value) {
			Inserted::Done => {
				self.len += 1;
				return Ok(())
			}
			Inserted::Overflow(displaced) => displaced,
		};

		// Cascade the displaced back element to the front of each following
		// block until one has room.
		let back = self.window.position(self.window.len() - 1);
		for slot in block + 1..=back {
			match self.blocks[slot].insert_at(0, displaced) {
				Inserted::Done => {
					self.len += 1;
					return Ok(())
				}
				Inserted::Overflow(next) => displaced = next,
			}
		}

		// Every block through the back was full; grow like a push.
		self.push_back(displaced);
		Ok(())
	}

	/// Drops every element, retaining the allocated blocks.
	///
	/// # Examples
	///
	/// ```
	/// use chunk_deque::Deque;
	///
	/// let mut deque: Deque<i32> = (0..20).collect();
	/// let capacity = deque.capacity();
	/// deque.clear();
	/// assert!(deque.is_empty());
	/// assert_eq!(deque.capacity(), capacity);
	/// ```
	pub fn clear(&mut self) {
		let range = self.window.range();
		self.window.reset();
		self.len = 0;
		for slot in range {
			self.blocks[slot].clear();
		}
	}

	/// Returns a double-ended iterator over references to the elements,
	/// front to back.
	///
	/// # Examples
	///
	/// ```
	/// use chunk_deque::Deque;
	///
	/// let deque: Deque<i32> = (0..20).collect();
	/// assert_eq!(deque.iter().copied().sum::<i32>(), 190);
	/// ```
	pub fn iter(&self) -> Iter<'_, T> {
		Iter::new(&self.blocks, self.start_cursor(), self.end_cursor(), self.len)
	}

	/// Returns a double-ended iterator over mutable references to the
	/// elements, front to back.
	pub fn iter_mut(&mut self) -> IterMut<'_, T> {
		let (start, end) = (self.start_cursor(), self.end_cursor());
		IterMut::new(&mut self.blocks, start, end, self.len)
	}

	/// Translates a logical index into `(block slot, in-block position)`.
	///
	/// The front block absorbs the first `front_len` indices; everything
	/// after it falls into full blocks, so plain div/mod by the block size
	/// applies.
	fn locate(&self, index: usize) -> (usize, usize) {
		debug_assert!(index < self.len, "index outside the live contents");
		let head = self.window.head();
		let front_len = self.blocks[head].len();
		if index < front_len {
			(head, index)
		} else {
			let rest = index - front_len;
			(head + 1 + rest / BLOCK_SIZE, rest % BLOCK_SIZE)
		}
	}

	fn front_slot(&self) -> Option<usize> {
		(!self.window.is_empty()).then(|| self.window.head())
	}

	fn back_slot(&self) -> Option<usize> {
		(!self.window.is_empty()).then(|| self.window.position(self.window.len() - 1))
	}

	fn front_block_mut(&mut self) -> Option<&mut Block<T>> {
		let slot = self.front_slot()?;
		Some(&mut self.blocks[slot])
	}

	fn back_block_mut(&mut self) -> Option<&mut Block<T>> {
		let slot = self.back_slot()?;
		Some(&mut self.blocks[slot])
	}

	/// The cursor addressing the first element (meaningless when empty, but
	/// never dereferenced then).
	fn start_cursor(&self) -> Cursor {
		let head = self.window.head();
		let offset = match self.front_slot() {
			Some(slot) => self.blocks[slot].head(),
			None => 0,
		};
		Cursor { block: head, offset }
	}

	/// The cursor one past the last element.
	fn end_cursor(&self) -> Cursor {
		match self.back_slot() {
			Some(slot) => {
				let block = &self.blocks[slot];
				Cursor { block: slot, offset: 0 }.forward(block.head() + block.len())
			}
			None => self.start_cursor(),
		}
	}

	#[cold]
	#[inline(never)]
	fn push_back_slow(&mut self, value: T) {
		if !self.window.can_grow_back() {
			self.grow_back();
		}
		let slot = self.window.claim_back();
		let block = &mut self.blocks[slot];
		debug_assert!(block.is_empty(), "claimed a non-empty block");
		match block.push_back(value) {
			Ok(()) => self.len += 1,
			Err(_) => unreachable!("a freshly claimed block has spare capacity"),
		}
	}

	#[cold]
	#[inline(never)]
	fn push_front_slow(&mut self, value: T) {
		if !self.window.can_grow_front() {
			self.grow_front();
		}
		let slot = self.window.claim_front();
		let block = &mut self.blocks[slot];
		debug_assert!(block.is_empty(), "claimed a non-empty block");
		match block.push_front(value) {
			Ok(()) => self.len += 1,
			Err(_) => unreachable!("a freshly claimed block has spare capacity"),
		}
	}

	/// Doubles the block array, keeping the in-use blocks at their current
	/// head so the spare capacity lands at the back.
	fn grow_back(&mut self) {
		let cap = self.grown_capacity();
		self.relocate(self.window.head(), cap);
	}

	/// Doubles the block array, re-seating the in-use blocks at the midpoint
	/// so the spare capacity splits around them with room at the front.
	fn grow_front(&mut self) {
		let cap = self.grown_capacity();
		self.relocate(cap / 2, cap);
	}

	fn grown_capacity(&self) -> usize {
		match self.window.cap() {
			0 => 1,
			cap => match cap.checked_mul(2) {
				Some(doubled) => doubled,
				None => capacity_overflow(),
			},
		}
	}

	/// Moves the in-use blocks into a freshly allocated, doubled array and
	/// re-seats the window at `head`. The allocation fully succeeds before
	/// any state is touched, so a failed allocation leaves the deque in its
	/// prior state.
	fn relocate(&mut self, head: usize, cap: usize) {
		let mut grown = allocate_blocks(cap);
		for (offset, slot) in self.window.range().enumerate() {
			mem::swap(&mut grown[head + offset], &mut self.blocks[slot]);
		}
		self.blocks = grown;
		self.window.reseat(head, cap);
	}
}

fn allocate_blocks<T>(count: usize) -> Box<[Block<T>]> {
	(0..count).map(|_| Block::new()).collect()
}

#[allow(clippy::panic)]
#[cold]
#[inline(never)]
#[track_caller]
fn capacity_overflow() -> ! {
	panic!("capacity overflow")
}

impl<T> Default for Deque<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Clone> Clone for Deque<T> {
	fn clone(&self) -> Self {
		let mut clone = Self::with_capacity(self.len);
		clone.extend(self.iter().cloned());
		clone
	}
}

impl<T: Debug> Debug for Deque<T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}

impl<T: Hash> Hash for Deque<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		state.write_usize(self.len);
		for element in self {
			element.hash(state);
		}
	}
}

impl<T: PartialOrd> PartialOrd for Deque<T> {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		self.iter().partial_cmp(other.iter())
	}
}

impl<T: Ord> Ord for Deque<T> {
	fn cmp(&self, other: &Self) -> Ordering {
		self.iter().cmp(other.iter())
	}
}

impl<T> Index<usize> for Deque<T> {
	type Output = T;

	fn index(&self, index: usize) -> &T {
		match self.at(index) {
			Ok(element) => element,
			Err(err) => err.handle(),
		}
	}
}

impl<T> IndexMut<usize> for Deque<T> {
	fn index_mut(&mut self, index: usize) -> &mut T {
		match self.at_mut(index) {
			Ok(element) => element,
			Err(err) => err.handle(),
		}
	}
}

impl<T> FromIterator<T> for Deque<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let iter = iter.into_iter();
		let mut deque = Self::with_capacity(iter.size_hint().0);
		deque.extend(iter);
		deque
	}
}

impl<T> Extend<T> for Deque<T> {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		for value in iter {
			self.push_back(value);
		}
	}
}

impl<T, const N: usize> From<[T; N]> for Deque<T> {
	fn from(values: [T; N]) -> Self {
		values.into_iter().collect()
	}
}

impl<T> From<Vec<T>> for Deque<T> {
	fn from(values: Vec<T>) -> Self {
		values.into_iter().collect()
	}
}

impl<'a, T> IntoIterator for &'a Deque<T> {
	type Item = &'a T;
	type IntoIter = Iter<'a, T>;

	fn into_iter(self) -> Iter<'a, T> {
		self.iter()
	}
}

impl<'a, T> IntoIterator for &'a mut Deque<T> {
	type Item = &'a mut T;
	type IntoIter = IterMut<'a, T>;

	fn into_iter(self) -> IterMut<'a, T> {
		self.iter_mut()
	}
}

impl<T> IntoIterator for Deque<T> {
	type Item = T;
	type IntoIter = IntoIter<T>;

	/// Consumes the deque into a front-to-back iterator over its elements.
	fn into_iter(self) -> IntoIter<T> {
		IntoIter::new(self)
	}
}
