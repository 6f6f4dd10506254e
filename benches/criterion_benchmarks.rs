use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use snescodec::brr::{self, PredictorState};
use snescodec::lz::{self, CommandIterator};

fn push_tag(stream: &mut Vec<u8>, op: u8, len: usize) {
    let bits = len - 1;
    if bits < 0x20 {
        stream.push(op << 5 | bits as u8);
    } else {
        stream.push(0xE0 | op << 2 | (bits >> 8) as u8);
        stream.push(bits as u8);
    }
}

/// Random but decodable command stream with `commands` entries.
fn gen_stream(commands: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut stream = Vec::new();
    let mut produced = 0usize;
    for _ in 0..commands {
        match rng.random_range(0u8..5) {
            0 => {
                let len = rng.random_range(1..=48);
                push_tag(&mut stream, 0, len);
                stream.extend((0..len).map(|_| rng.random::<u8>()));
                produced += len;
            }
            1 => {
                let len = rng.random_range(1..=1024);
                push_tag(&mut stream, 1, len);
                stream.extend([rng.random::<u8>(), rng.random::<u8>()]);
                produced += len;
            }
            2 => {
                let len = rng.random_range(1..=1024);
                push_tag(&mut stream, 2, len);
                stream.push(rng.random());
                produced += len;
            }
            3 => {
                let len = rng.random_range(1..=1024);
                push_tag(&mut stream, 3, len);
                stream.push(rng.random());
                produced += len;
            }
            _ => {
                if produced == 0 {
                    continue;
                }
                let len = rng.random_range(1..=256);
                let offset = rng.random_range(0..produced.min(0x10000)) as u16;
                push_tag(&mut stream, 4, len);
                stream.extend(offset.to_be_bytes());
                produced += len;
            }
        }
    }
    stream.push(0xFF);
    stream
}

/// Random walk samples, `blocks` blocks long.
fn gen_samples(blocks: usize, seed: u64) -> Vec<i16> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut level = 0i32;
    (0..blocks * 16)
        .map(|_| {
            level = (level + rng.random_range(-600..=600)).clamp(-12000, 12000);
            level as i16
        })
        .collect()
}

fn bench_decompression_speed(c: &mut Criterion) {
    let mut g = c.benchmark_group("decompression_speed_vs_output");
    for commands in [64usize, 512, 4096] {
        let stream = gen_stream(commands, 1);
        let output = lz::decompress(&stream[..], 0, true).unwrap();
        g.throughput(Throughput::Bytes(output.len() as u64));
        g.bench_with_input(BenchmarkId::from_parameter(commands), &commands, |b, _| {
            b.iter(|| {
                let out = lz::decompress(black_box(&stream[..]), 0, true).unwrap();
                black_box(out);
            });
        });
    }
    g.finish();
}

fn bench_command_iteration(c: &mut Criterion) {
    let mut g = c.benchmark_group("command_iteration_vs_stream");
    for commands in [64usize, 512, 4096] {
        let stream = gen_stream(commands, 2);
        g.throughput(Throughput::Bytes(stream.len() as u64));
        g.bench_with_input(BenchmarkId::from_parameter(commands), &commands, |b, _| {
            b.iter(|| {
                let count = CommandIterator::new(black_box(&stream[..]), 0, true)
                    .filter(|token| token.is_ok())
                    .count();
                black_box(count);
            });
        });
    }
    g.finish();
}

fn bench_audio_decode_speed(c: &mut Criterion) {
    let mut g = c.benchmark_group("audio_decode_speed_vs_stream");
    for blocks in [64usize, 1024, 8192] {
        let samples = gen_samples(blocks, 3);
        let stream = brr::encode(&samples, false, PredictorState::default(), false).unwrap();
        g.throughput(Throughput::Bytes(stream.len() as u64));
        g.bench_with_input(BenchmarkId::from_parameter(blocks), &blocks, |b, _| {
            b.iter(|| {
                let out = brr::decode(black_box(&stream[..]), PredictorState::default()).unwrap();
                black_box(out);
            });
        });
    }
    g.finish();
}

fn bench_audio_encode_speed(c: &mut Criterion) {
    let mut g = c.benchmark_group("audio_encode_speed_vs_samples");
    for blocks in [16usize, 128, 1024] {
        let samples = gen_samples(blocks, 4);
        g.throughput(Throughput::Bytes((samples.len() * 2) as u64));
        g.bench_with_input(BenchmarkId::from_parameter(blocks), &blocks, |b, _| {
            b.iter(|| {
                let out =
                    brr::encode(black_box(&samples), false, PredictorState::default(), false)
                        .unwrap();
                black_box(out);
            });
        });
    }
    g.finish();
}

criterion_group!(
    benches,
    bench_decompression_speed,
    bench_command_iteration,
    bench_audio_decode_speed,
    bench_audio_encode_speed
);
criterion_main!(benches);
