use beer_stock::core::beer::beer_entity::{Beer, BeerType};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn brahma() -> Beer {
    Beer {
        id: Some(1),
        name: "Brahma".to_string(),
        brand: "Ambev".to_string(),
        max: 500,
        quantity: 250,
        beer_type: BeerType::Lager,
    }
}

fn stock_adjustment_benchmark(c: &mut Criterion) {
    c.bench_function("increment then decrement", |b| {
        let mut beer = brahma();
        b.iter(|| {
            let _ = beer.increment(black_box(10));
            let _ = beer.decrement(black_box(10));
        })
    });
    c.bench_function("rejected increment", |b| {
        let mut beer = brahma();
        b.iter(|| beer.increment(black_box(1000)).is_err())
    });
}

criterion_group!(benches, stock_adjustment_benchmark);
criterion_main!(benches);
