//! Benchmark suite for MSU-1 container packing
//!
//! Measures layout planning on its own and the full write of a container
//! into memory.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use msu1_benches::generate_chapter_set;
use msu1_types::file::msu::{ContainerOptions, ContainerWriter, DiscardAudio, Layout};
use std::{hint::black_box, io::Cursor};

const SHAPES: [(u8, usize); 3] = [(1, 24), (8, 96), (32, 240)];

/// Benchmark offset planning
fn bench_plan_layout(c: &mut Criterion) {
	let mut group = c.benchmark_group("layout_plan");

	for (chapters, frames) in SHAPES {
		let set = generate_chapter_set(chapters, frames).expect("valid chapter set");
		group.throughput(Throughput::Elements(set.frame_count() as u64));
		group.bench_with_input(
			BenchmarkId::new("plan", format!("{chapters}x{frames}")),
			&set,
			|b, set| {
				b.iter(|| black_box(Layout::for_chapters(black_box(set))));
			},
		);
	}

	group.finish();
}

/// Benchmark writing complete containers into memory
fn bench_write_container(c: &mut Criterion) {
	let mut group = c.benchmark_group("container_write");
	let writer = ContainerWriter::new(ContainerOptions::new("benchmark", 4, 24).expect("valid options"));

	for (chapters, frames) in SHAPES {
		let set = generate_chapter_set(chapters, frames).expect("valid chapter set");
		let layout = Layout::for_chapters(&set);
		group.throughput(Throughput::Bytes(layout.total_size()));
		group.bench_with_input(
			BenchmarkId::new("write", format!("{chapters}x{frames}")),
			&set,
			|b, set| {
				b.iter(|| {
					let mut output = Cursor::new(Vec::with_capacity(layout.total_size() as usize));
					let result = writer.write(black_box(set), &layout, &mut output, &mut DiscardAudio);
					black_box(result)
				});
			},
		);
	}

	group.finish();
}

criterion_group!(benches, bench_plan_layout, bench_write_container);
criterion_main!(benches);
