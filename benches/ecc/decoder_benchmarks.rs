use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pdf417_ec::ecc::{decode, encode};

fn sample_block(data_len: usize, ecc_count: usize) -> Vec<u16> {
    let data: Vec<u16> = (0..data_len).map(|i| ((i * 131 + 7) % 929) as u16).collect();
    encode(&data, ecc_count).unwrap()
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("pdf417_decode");

    for &ecc_count in &[4usize, 16, 64] {
        let original = sample_block(100, ecc_count);

        group.bench_with_input(
            BenchmarkId::new("clean", ecc_count),
            &original,
            |b, original| {
                b.iter(|| {
                    let mut block = original.clone();
                    decode(black_box(&mut block), ecc_count, &[]).unwrap()
                })
            },
        );

        let mut corrupted = original.clone();
        for i in 0..ecc_count / 2 {
            corrupted[i * 3] = (corrupted[i * 3] + 1) % 929;
        }
        group.bench_with_input(
            BenchmarkId::new("max_errors", ecc_count),
            &corrupted,
            |b, corrupted| {
                b.iter(|| {
                    let mut block = corrupted.clone();
                    decode(black_box(&mut block), ecc_count, &[]).unwrap()
                })
            },
        );

        let erasures: Vec<usize> = (0..ecc_count).map(|i| i * 2).collect();
        let mut erased = original.clone();
        for &e in &erasures {
            erased[e] = 0;
        }
        group.bench_with_input(
            BenchmarkId::new("max_erasures", ecc_count),
            &erased,
            |b, erased| {
                b.iter(|| {
                    let mut block = erased.clone();
                    decode(black_box(&mut block), ecc_count, &erasures).unwrap()
                })
            },
        );
    }

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let data: Vec<u16> = (0..100).map(|i| ((i * 131 + 7) % 929) as u16).collect();
    c.bench_function("pdf417_encode 100 + 64", |b| {
        b.iter(|| encode(black_box(&data), 64).unwrap())
    });
}

criterion_group!(benches, bench_decode, bench_encode);
criterion_main!(benches);
