//! Box layer benchmarks
//!
//! Compares one-shot boxes against a cached shared key.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use naclbox::{Nonce, PrecomputedBox, SecretKey, beforenm, open_afternm, seal, seal_afternm};

fn bench_beforenm(c: &mut Criterion) {
    let alice = SecretKey::from_array([1u8; 32]);
    let bob_public = SecretKey::from_array([2u8; 32]).public_key();

    c.bench_function("beforenm", |b| {
        b.iter(|| black_box(beforenm(black_box(&bob_public), &alice)));
    });
}

fn bench_seal(c: &mut Criterion) {
    let mut group = c.benchmark_group("box");
    let alice = SecretKey::from_array([1u8; 32]);
    let bob = SecretKey::from_array([2u8; 32]);
    let bob_public = bob.public_key();
    let key = beforenm(&bob_public, &alice);
    let nonce = Nonce::from_array([0u8; 24]);

    for size in [64usize, 1024, 64 * 1024] {
        let message = vec![0u8; size];
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("seal_afternm", size), &message, |b, m| {
            b.iter(|| black_box(seal_afternm(black_box(m), &nonce, &key)));
        });

        let boxed = seal_afternm(&message, &nonce, &key);
        group.bench_with_input(BenchmarkId::new("open_afternm", size), &boxed, |b, boxed| {
            b.iter(|| black_box(open_afternm(black_box(boxed), &nonce, &key).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("seal_one_shot", size), &message, |b, m| {
            b.iter(|| black_box(seal(black_box(m), &nonce, &bob_public, &alice)));
        });
    }

    let precomputed = PrecomputedBox::new(&bob_public, &alice);
    let mut buffer = vec![0u8; 1024];
    group.bench_function("detached_in_place_1kb", |b| {
        b.iter(|| black_box(precomputed.seal_detached_in_place(black_box(&mut buffer), &nonce)));
    });

    group.finish();
}

criterion_group!(benches, bench_beforenm, bench_seal);
criterion_main!(benches);
