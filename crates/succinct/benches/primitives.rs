use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use succinct_planar::prelude::{list_rank, prefix_sum, EulerNode, Link};

fn prefix_sum_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("prefix_sum");

    for size in [1 << 16, 1 << 20] {
        let input = (0..size).map(|i| (i % 7) as u32).collect::<Vec<_>>();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter_batched(
                || input.clone(),
                |mut values| {
                    prefix_sum(&mut values);
                    black_box(values)
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

/// A chain that hops around the array with a large stride, so ranking
/// cannot profit from sequential memory access.
fn strided_chain(len: usize) -> Vec<EulerNode> {
    // For odd `len` the stride is coprime with it, so the walk visits
    // every index exactly once.
    let stride = len / 2 + 1;
    let mut nodes = vec![
        EulerNode {
            next: Link::End,
            value: false,
            rank: 1,
        };
        len
    ];

    let mut pos = 0;
    for _ in 1..len {
        let next = (pos + stride) % len;
        nodes[pos].next = Link::Node(next as u32);
        pos = next;
    }
    nodes[pos].next = Link::End;

    nodes
}

fn list_rank_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_rank");

    for size in [(1 << 16) + 1, (1 << 20) + 1] {
        let input = strided_chain(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter_batched(
                || input.clone(),
                |mut nodes| {
                    list_rank(&mut nodes);
                    black_box(nodes)
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, prefix_sum_benchmark, list_rank_benchmark);
criterion_main!(benches);
