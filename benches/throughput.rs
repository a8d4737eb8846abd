use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fec8::{pow64, Fec};

fn bench_encode(c: &mut Criterion) {
    let (k, parity, shard_len) = (16u16, 8usize, 64 * 1024);
    let fec = Fec::new(k, k + parity as u16).unwrap();

    let src: Vec<Vec<u8>> = (0..k as usize)
        .map(|i| (0..shard_len).map(|j| ((i * 31 + j * 7) % 256) as u8).collect())
        .collect();
    let src_refs: Vec<&[u8]> = src.iter().map(|s| s.as_slice()).collect();
    let rows: Vec<u16> = (k..k + parity as u16).collect();
    let mut out = vec![vec![0u8; shard_len]; parity];

    c.bench_function("encode 16+8 x 64KiB", |b| {
        b.iter(|| {
            let mut out_refs: Vec<&mut [u8]> = out.iter_mut().map(|s| s.as_mut_slice()).collect();
            fec.encode(black_box(&src_refs), &mut out_refs, &rows, shard_len)
                .unwrap();
        })
    });
}

fn bench_decode(c: &mut Criterion) {
    let (k, n, shard_len) = (16u16, 24u16, 64 * 1024);
    let fec = Fec::new(k, n).unwrap();

    let src: Vec<Vec<u8>> = (0..k as usize)
        .map(|i| (0..shard_len).map(|j| ((i * 13 + j * 3) % 256) as u8).collect())
        .collect();
    let src_refs: Vec<&[u8]> = src.iter().map(|s| s.as_slice()).collect();

    // Lose the last 8 data shards, keep 8 parity shards in their place.
    let rows: Vec<u16> = (16u16..24).collect();
    let mut parity = vec![vec![0u8; shard_len]; 8];
    {
        let mut parity_refs: Vec<&mut [u8]> = parity.iter_mut().map(|s| s.as_mut_slice()).collect();
        fec.encode(&src_refs, &mut parity_refs, &rows, shard_len).unwrap();
    }

    c.bench_function("decode 8 of 16 x 64KiB", |b| {
        b.iter(|| {
            let mut held: Vec<Vec<u8>> = src[..8].to_vec();
            held.extend(parity.iter().cloned());
            let mut held_refs: Vec<&mut [u8]> = held.iter_mut().map(|s| s.as_mut_slice()).collect();
            let mut idx: Vec<u16> = (0u16..8).chain(16..24).collect();
            fec.decode(&mut held_refs, &mut idx, shard_len).unwrap();
            black_box(held);
        })
    });
}

fn bench_pow64_verify(c: &mut Criterion) {
    let key = [0x42u8; 64];
    let value = [0x01u8; 64];
    c.bench_function("pow64 verify (256KiB expansion)", |b| {
        b.iter(|| pow64::verify(black_box(&key), black_box(&value)))
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_pow64_verify);
criterion_main!(benches);
