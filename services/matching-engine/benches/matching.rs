//! Order intake throughput benchmarks

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use matching_engine::OrderBook;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{Side, TimeInForce};

const BOOK_DEPTH: u64 = 500;

/// A book with `BOOK_DEPTH` one-lot orders resting on each side around 10_000.
fn populated_book() -> OrderBook {
    let mut book = OrderBook::new();
    for i in 0..BOOK_DEPTH {
        book.limit(
            Side::BUY,
            OrderId::new(format!("b{i}")),
            Quantity::from_u64(1),
            Price::from_u64(10_000 - 1 - i),
            TimeInForce::GTC,
        )
        .unwrap();
        book.limit(
            Side::SELL,
            OrderId::new(format!("a{i}")),
            Quantity::from_u64(1),
            Price::from_u64(10_000 + 1 + i),
            TimeInForce::GTC,
        )
        .unwrap();
    }
    book
}

fn bench_limit_intake(c: &mut Criterion) {
    c.bench_function("limit_resting_insert", |b| {
        b.iter_batched(
            populated_book,
            |mut book| {
                book.limit(
                    Side::BUY,
                    OrderId::new("probe"),
                    Quantity::from_u64(1),
                    Price::from_u64(9_000),
                    TimeInForce::GTC,
                )
                .unwrap()
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("limit_crossing_sweep", |b| {
        b.iter_batched(
            populated_book,
            |mut book| {
                // sweeps 50 resting makers off the ask side
                book.limit(
                    Side::BUY,
                    OrderId::new("probe"),
                    Quantity::from_u64(50),
                    Price::from_u64(10_100),
                    TimeInForce::GTC,
                )
                .unwrap()
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_queries(c: &mut Criterion) {
    let book = populated_book();

    c.bench_function("depth_snapshot", |b| b.iter(|| book.depth()));

    c.bench_function("market_price_estimate", |b| {
        b.iter(|| book.calculate_market_price(Side::BUY, Quantity::from_u64(100)))
    });
}

criterion_group!(benches, bench_limit_intake, bench_queries);
criterion_main!(benches);
