//! Linear search benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use hardlibc_core::search::{lfind, lsearch};

fn cmp_u32(elem: &[u8], key: &[u8]) -> i32 {
    match elem.cmp(key) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}

fn table_of(count: usize) -> Vec<u8> {
    (0..count as u32).flat_map(u32::to_le_bytes).collect()
}

fn bench_lfind_scan(c: &mut Criterion) {
    let counts: &[usize] = &[16, 256, 4096, 65536];
    let mut group = c.benchmark_group("lfind");

    for &count in counts {
        let table = table_of(count);
        // Worst case: key sits in the last slot.
        let key = ((count - 1) as u32).to_le_bytes();
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("last_slot", count), &count, |b, &n| {
            b.iter(|| {
                let found = lfind(black_box(&key), &table, n, 4, cmp_u32).unwrap();
                black_box(found);
            });
        });
    }
    group.finish();
}

fn bench_lsearch_append(c: &mut Criterion) {
    let counts: &[usize] = &[16, 256, 4096];
    let mut group = c.benchmark_group("lsearch_append");

    for &count in counts {
        let base = table_of(count + 1);
        let key = (count as u32 + 1_000_000).to_le_bytes();
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("miss", count), &count, |b, &n| {
            b.iter(|| {
                let mut table = base.clone();
                let mut live = n;
                let slot = lsearch(black_box(&key), &mut table, &mut live, 4, cmp_u32).unwrap();
                black_box((slot[0], live));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_lfind_scan, bench_lsearch_append);
criterion_main!(benches);
