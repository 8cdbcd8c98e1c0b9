#[macro_use]
extern crate criterion;

use criterion::Criterion;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use minnesvakt_core::alloc::arena::ArenaAllocator;

const BLOCKS: usize = 120;

fn bench_alloc_release_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("arena_throughput");

    // Allocate and immediately release, back to back.
    group.bench_function("alloc_release_pairs", |b| {
        let mut heap = ArenaAllocator::new(4096);
        b.iter(|| {
            for _ in 0..BLOCKS {
                let block = heap.allocate(1).unwrap();
                heap.release(block).unwrap();
            }
        });
    });

    // Allocate a full batch, then release it in order.
    group.bench_function("alloc_batch_then_release", |b| {
        let mut heap = ArenaAllocator::new(4096);
        b.iter(|| {
            let blocks: Vec<_> = (0..BLOCKS).map(|_| heap.allocate(1).unwrap()).collect();
            for block in blocks {
                heap.release(block).unwrap();
            }
        });
    });

    // Random interleaving of allocations and releases until the full batch
    // has been served and returned.
    group.bench_function("randomized_churn", |b| {
        let mut heap = ArenaAllocator::new(4096);
        b.iter(|| {
            let mut rng = SmallRng::seed_from_u64(0x5eed);
            let mut blocks = Vec::with_capacity(BLOCKS);
            let mut released = 0;
            while blocks.len() < BLOCKS {
                if rng.random_range(0..2) == 0 {
                    blocks.push(heap.allocate(1).unwrap());
                } else if released < blocks.len() {
                    heap.release(blocks[released]).unwrap();
                    released += 1;
                }
            }
            while released < blocks.len() {
                heap.release(blocks[released]).unwrap();
                released += 1;
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_alloc_release_patterns);
criterion_main!(benches);
