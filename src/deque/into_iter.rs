// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use core::fmt::{self, Debug, Formatter};
use core::iter::FusedIterator;

use crate::Deque;

/// A consuming iterator over a deque's elements, created by
/// [`Deque::into_iter`](crate::Deque::into_iter).
///
/// Drains the deque by popping from whichever end is asked for; elements not
/// yet yielded are dropped with the iterator.
pub struct IntoIter<T> {
	deque: Deque<T>,
}

impl<T> IntoIter<T> {
	pub(crate) fn new(deque: Deque<T>) -> Self {
		Self { deque }
	}
}

impl<T> Iterator for IntoIter<T> {
	type Item = T;

	fn next(&mut self) -> Option<T> {
		self.deque.pop_front()
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let len = self.deque.len();
		(len, Some(len))
	}

	fn count(self) -> usize {
		self.deque.len()
	}

	fn last(mut self) -> Option<T> {
		self.next_back()
	}
}

impl<T> DoubleEndedIterator for IntoIter<T> {
	fn next_back(&mut self) -> Option<T> {
		self.deque.pop_back()
	}
}

impl<T> ExactSizeIterator for IntoIter<T> {
	fn len(&self) -> usize {
		self.deque.len()
	}
}

impl<T> FusedIterator for IntoIter<T> { }

impl<T: Debug> Debug for IntoIter<T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_tuple("IntoIter").field(&self.deque).finish()
	}
}
