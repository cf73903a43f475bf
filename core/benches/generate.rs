use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tripwire_core::*;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for size in BoardSize::ALL {
        for difficulty in Difficulty::ALL {
            let config = GameConfig::preset(size, difficulty);
            let mut sampler = RandomSampler::new(0x5eed);
            group.bench_function(format!("{size:?}/{difficulty:?}"), |b| {
                b.iter(|| Minefield::generate(black_box(&config), &mut sampler))
            });
        }
    }
    group.finish();
}

fn bench_open_field(c: &mut Criterion) {
    let dims = Dimensions::new(200, 200);
    let field = Minefield::from_mine_indices(dims, &[]).expect("valid layout");

    c.bench_function("flood_fill/200x200 blank", |b| {
        b.iter(|| flood_fill(black_box(&field), black_box(20_100)))
    });
}

criterion_group!(benches, bench_generate, bench_open_field);
criterion_main!(benches);
