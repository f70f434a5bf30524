#[macro_use]
extern crate criterion;
extern crate arithcode;

use arithcode::width::U8;
use arithcode::{decode, encode};
use criterion::Criterion;
use nanorand::RNG;

fn skewed_symbols(n: usize) -> (Vec<u8>, Vec<f32>) {
    let cdf = vec![0.0f32, 0.2, 0.7, 0.9, 1.0];
    let mut rng = nanorand::WyRand::new_seed(1234);
    let mut symbols = Vec::with_capacity(n);
    for _ in 0..n {
        let draw = rng.generate_range::<u32>(0, 1_000_000) as f32 / 1_000_000.0;
        let s = if draw < 0.2 {
            0
        } else if draw < 0.7 {
            1
        } else if draw < 0.9 {
            2
        } else {
            3
        };
        symbols.push(s as u8);
    }
    (symbols, cdf)
}

fn encode_benchmark(c: &mut Criterion) {
    let (symbols, cdf) = skewed_symbols(10_000);
    c.bench_function("encode_10k_symbols", move |b| {
        b.iter(|| encode::<U8, u8>(&symbols, &cdf).unwrap());
    });
}

fn decode_benchmark(c: &mut Criterion) {
    let (symbols, cdf) = skewed_symbols(10_000);
    let bytes = encode::<U8, u8>(&symbols, &cdf).unwrap();
    c.bench_function("decode_10k_symbols", move |b| {
        b.iter(|| decode::<U8, u8>(&bytes, &cdf).unwrap());
    });
}

criterion_group!(coder, encode_benchmark, decode_benchmark);
criterion_main!(coder);
