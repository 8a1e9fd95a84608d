// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use core::fmt::{self, Debug, Display, Formatter};

pub type Result<T = (), E = OutOfRange> = core::result::Result<T, E>;

/// An access outside the live contents of a deque: an index at or past the
/// length, or an end access on an empty container.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct OutOfRange {
	/// The requested index. For end accesses on an empty deque this is `0`.
	pub index: usize,
	/// The length of the deque at the time of the access.
	pub len: usize,
}

impl OutOfRange {
	#[allow(clippy::panic)]
	#[cold]
	#[inline(never)]
	#[track_caller]
	pub(crate) fn handle(self) -> ! {
		panic!("{self}")
	}
}

impl Debug for OutOfRange {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("OutOfRange")
		 .field("index", &self.index)
		 .field("len", &self.len)
		 .finish()
	}
}

impl Display for OutOfRange {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"index out of range: the index is {} but the length is {}",
			self.index, self.len
		)
	}
}

#[cfg(feature = "std")]
impl std::error::Error for OutOfRange { }
