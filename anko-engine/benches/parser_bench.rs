use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use anko_engine::{NoopDispatch, OutputEngine};
use anko_parser::Parser;

fn generate_plain_text(size: usize) -> Vec<char> {
    let text = "The quick brown fox jumps over the lazy dog. ";
    text.chars().cycle().take(size).collect()
}

fn generate_colored_text(size: usize) -> Vec<char> {
    let mut data = Vec::with_capacity(size);
    let colors = [
        "\x1b[31m", "\x1b[32m", "\x1b[33m", "\x1b[34m", "\x1b[35m", "\x1b[36m", "\x1b[0m",
    ];
    let text = "Colored text ";

    let mut i = 0;
    while data.len() < size {
        data.extend(colors[i % colors.len()].chars());
        data.extend(text.chars());
        i += 1;
    }
    data.truncate(size);
    data
}

fn generate_cursor_movement(size: usize) -> Vec<char> {
    let mut data = Vec::with_capacity(size);
    let sequences = [
        "\x1b[A",      // cursor up
        "\x1b[B",      // cursor down
        "\x1b[C",      // cursor forward
        "\x1b[D",      // cursor back
        "\x1b[10;20H", // cursor position
        "\x1b[2J",     // clear screen
        "\x1b[K",      // clear line
    ];

    let mut i = 0;
    while data.len() < size {
        data.extend(sequences[i % sequences.len()].chars());
        i += 1;
    }
    data.truncate(size);
    data
}

fn generate_sgr_sequences(size: usize) -> Vec<char> {
    let mut data = Vec::with_capacity(size);
    let sequences = [
        "\x1b[0m",              // reset
        "\x1b[1m",              // bold
        "\x1b[4m",              // underline
        "\x1b[38;5;196m",       // 256-color fg
        "\x1b[48;5;21m",        // 256-color bg
        "\x1b[38;2;255;128;0m", // truecolor fg
        "\x1b[38:2::255:128:0m", // truecolor fg, colon form
    ];

    let mut i = 0;
    while data.len() < size {
        data.extend(sequences[i % sequences.len()].chars());
        data.push('X');
        i += 1;
    }
    data.truncate(size);
    data
}

fn bench_parser_throughput(c: &mut Criterion) {
    let sizes = [1024, 10 * 1024, 100 * 1024];

    let mut group = c.benchmark_group("parser_throughput");

    for size in sizes {
        group.throughput(Throughput::Elements(size as u64));

        let plain_text = generate_plain_text(size);
        group.bench_function(format!("plain_text_{size}"), |b| {
            b.iter(|| {
                let mut parser = Parser::new(OutputEngine::new(NoopDispatch));
                parser.process_string(black_box(&plain_text));
            });
        });

        let colored_text = generate_colored_text(size);
        group.bench_function(format!("colored_text_{size}"), |b| {
            b.iter(|| {
                let mut parser = Parser::new(OutputEngine::new(NoopDispatch));
                parser.process_string(black_box(&colored_text));
            });
        });

        let cursor_movement = generate_cursor_movement(size);
        group.bench_function(format!("cursor_movement_{size}"), |b| {
            b.iter(|| {
                let mut parser = Parser::new(OutputEngine::new(NoopDispatch));
                parser.process_string(black_box(&cursor_movement));
            });
        });

        let sgr_sequences = generate_sgr_sequences(size);
        group.bench_function(format!("sgr_sequences_{size}"), |b| {
            b.iter(|| {
                let mut parser = Parser::new(OutputEngine::new(NoopDispatch));
                parser.process_string(black_box(&sgr_sequences));
            });
        });
    }

    group.finish();
}

fn bench_chunk_boundaries(c: &mut Criterion) {
    let data = generate_colored_text(10 * 1024);
    let chunk_sizes = [1, 8, 64, 512, 1024];

    let mut group = c.benchmark_group("chunk_boundaries");

    for chunk_size in chunk_sizes {
        group.bench_function(format!("chunk_{chunk_size}"), |b| {
            b.iter(|| {
                let mut parser = Parser::new(OutputEngine::new(NoopDispatch));
                for chunk in data.chunks(chunk_size) {
                    parser.process_string(black_box(chunk));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parser_throughput, bench_chunk_boundaries);
criterion_main!(benches);
