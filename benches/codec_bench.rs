//! Benchmarks for protocol header encoding and decoding

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use filebay::protocol::{decode_header, encode_header, FileName, Header, Tag};

fn codec_benchmarks(c: &mut Criterion) {
    let name = FileName::new("benchmark-file-name.bin").unwrap();
    let mut header = Header::request(Tag::Put, Some(name));
    header.nbytes = 4096;
    let encoded = encode_header(&header);

    c.bench_function("encode_header", |b| {
        b.iter(|| encode_header(black_box(&header)))
    });

    c.bench_function("decode_header", |b| {
        b.iter(|| decode_header(black_box(&encoded)).unwrap())
    });
}

criterion_group!(benches, codec_benchmarks);
criterion_main!(benches);
