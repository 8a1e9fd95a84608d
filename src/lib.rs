// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(
	clippy::alloc_instead_of_core,
	clippy::as_underscore,
	clippy::decimal_literal_representation,
	clippy::infinite_loop,
	clippy::mem_forget,
	clippy::missing_assert_message,
	clippy::missing_safety_doc,
	clippy::multiple_unsafe_ops_per_block,
	clippy::panic,
	clippy::std_instead_of_alloc,
	clippy::std_instead_of_core,
	clippy::undocumented_unsafe_blocks,
	clippy::unwrap_used,
)]

//! # `chunk-deque`
//!
//! A block-structured double-ended queue: elements are stored in fixed-capacity
//! blocks of sixteen slots, and the blocks themselves live in a growable array
//! with spare capacity reserved at both ends. Pushing and popping at either end
//! is amortized *O*(1), indexing is *O*(1), and iteration crosses block
//! boundaries transparently.
//!
//! Unlike a plain ring buffer, growing the container never moves an element
//! relative to its block. Only whole blocks are relocated when the block array
//! doubles, so a growth event moves block storage once instead of re-shuffling
//! the live contents around a wrap point.
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | [`push_front`] / [`push_back`] | amortized *O*(1) |
//! | [`pop_front`] / [`pop_back`]   | *O*(1) |
//! | [`at`] / indexing              | *O*(1) |
//! | [`insert`]                     | *O*(n) worst case |
//!
//! [`push_front`]: Deque::push_front
//! [`push_back`]: Deque::push_back
//! [`pop_front`]: Deque::pop_front
//! [`pop_back`]: Deque::pop_back
//! [`at`]: Deque::at
//! [`insert`]: Deque::insert
//!
//! # Example
//!
//! ```
//! use chunk_deque::Deque;
//!
//! let mut deque: Deque<i32> = Deque::new();
//! deque.push_back(1);
//! deque.push_back(2);
//! deque.push_front(0);
//!
//! assert_eq!(deque.len(), 3);
//! assert_eq!(deque[0], 0);
//! assert_eq!(deque.back(), Some(&2));
//! assert!(deque.iter().eq(&[0, 1, 2]));
//! ```
//!
//! # Reference invalidation
//!
//! Exclusive borrows make it impossible to hold a reference to an element, or
//! an iterator, across a mutating operation. The contract this encodes: any
//! push may relocate blocks, and any pop destroys element storage, so both
//! invalidate previously obtained references.

extern crate alloc;

mod block;
pub mod deque;
pub mod error;
mod window;

pub use deque::Deque;
pub use error::OutOfRange;
