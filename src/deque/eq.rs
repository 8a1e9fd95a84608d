// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use alloc::vec::Vec;

use crate::Deque;

macro_rules! impl_partial_eq {
	([$($vars:tt)*] $rhs:ty) => {
		impl<T: PartialEq<U>, U, $($vars)*> PartialEq<$rhs> for Deque<T> {
			fn eq(&self, other: &$rhs) -> bool {
				self.len() == other.len() &&
				self.iter().zip(other.iter()).all(|(a, b)| a == b)
			}
		}
	};
}

impl_partial_eq! { [] Deque<U> }
impl_partial_eq! { [] Vec<U> }
impl_partial_eq! { [] [U] }
impl_partial_eq! { [] &[U] }
impl_partial_eq! { [] &mut [U] }
impl_partial_eq! { [const N: usize] [U; N] }
impl_partial_eq! { [const N: usize] &[U; N] }

impl<T: Eq> Eq for Deque<T> { }
