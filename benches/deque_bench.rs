// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use std::hint::black_box;

use chunk_deque::Deque;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

const LEN: usize = 4096;

fn push_back(c: &mut Criterion) {
	c.bench_function("push_back 4096", |b| {
		b.iter_batched_ref(
			Deque::new,
			|deque| {
				for value in 0..LEN {
					deque.push_back(black_box(value));
				}
			},
			BatchSize::SmallInput,
		);
	});
}

fn push_front(c: &mut Criterion) {
	c.bench_function("push_front 4096", |b| {
		b.iter_batched_ref(
			Deque::new,
			|deque| {
				for value in 0..LEN {
					deque.push_front(black_box(value));
				}
			},
			BatchSize::SmallInput,
		);
	});
}

fn pop_both_ends(c: &mut Criterion) {
	c.bench_function("pop alternating 4096", |b| {
		b.iter_batched(
			|| (0..LEN).collect::<Deque<usize>>(),
			|mut deque| {
				while !deque.is_empty() {
					black_box(deque.pop_front());
					black_box(deque.pop_back());
				}
			},
			BatchSize::SmallInput,
		);
	});
}

fn index(c: &mut Criterion) {
	let deque: Deque<usize> = (0..LEN).collect();
	c.bench_function("index 4096", |b| {
		b.iter(|| {
			let mut sum = 0;
			for at in 0..LEN {
				sum += deque[black_box(at)];
			}
			sum
		});
	});
}

fn iterate(c: &mut Criterion) {
	let deque: Deque<usize> = (0..LEN).collect();
	c.bench_function("iterate 4096", |b| {
		b.iter(|| black_box(&deque).iter().sum::<usize>());
	});
}

criterion_group!(benches, push_back, push_front, pop_both_ends, index, iterate);
criterion_main!(benches);
