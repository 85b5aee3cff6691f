use bytes::Bytes;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use srec_core::{
    constants::AddressWidth,
    encoder::{build_data, encode_records, LineEnding},
    scanner::{scan_lines, scan_lines_with_stats, Scanner},
};

fn make_file(num_records: usize, record_size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let mut records = Vec::with_capacity(num_records);
    for i in 0..num_records {
        let payload: Vec<u8> = (0..record_size).map(|_| rng.gen()).collect();
        records.push(
            build_data(
                AddressWidth::Bits32,
                (i * record_size) as u32,
                Bytes::from(payload),
            )
            .unwrap(),
        );
    }
    let mut text = encode_records(&records, LineEnding::Lf).into_bytes();
    // inject a bit of garbage
    text.extend_from_slice(b"GARBAGE\n");
    text
}

fn bench_scanner(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanner");

    for &record_size in &[16usize, 32, 128] {
        let file = make_file(1000, record_size);
        group.throughput(Throughput::Bytes(file.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("scan_lines", record_size),
            &file,
            |b, data| {
                b.iter(|| {
                    let res = scan_lines(data);
                    criterion::black_box(res);
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("scan_lines_with_stats", record_size),
            &file,
            |b, data| {
                b.iter(|| {
                    let res = scan_lines_with_stats(data);
                    criterion::black_box(res);
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("streaming_scanner", record_size),
            &file,
            |b, data| {
                b.iter(|| {
                    let ok = Scanner::new(&data[..]).filter(|r| r.is_ok()).count();
                    criterion::black_box(ok);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_scanner);
criterion_main!(benches);
