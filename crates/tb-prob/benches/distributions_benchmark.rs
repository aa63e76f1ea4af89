use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use std::hint::black_box;
use tb_prob::{Beta, EstimatedPdf, Pdf, Pmf, linspace, operations};

fn bench_convolution(c: &mut Criterion) {
    let d6: Pmf<i64> = Pmf::uniform(1..=6);
    c.bench_function("pmf_sum_three_d6", |b| b.iter(|| black_box(&(&d6 + &d6) + &d6)));

    // 300 x 300 pairs: takes the parallel path.
    let wide: Pmf<i64> = Pmf::uniform(0..300);
    c.bench_function("pmf_sum_300x300", |b| {
        b.iter(|| black_box(operations::pmf_sum(&wide, &wide)))
    });
    c.bench_function("pmf_max_300x300", |b| {
        b.iter(|| black_box(operations::pmf_max(&wide, &wide)))
    });
}

fn bench_cdf(c: &mut Criterion) {
    let cdf = Pmf::uniform(0..10_000i64).make_cdf().unwrap();
    let ps: Vec<f64> = (0..10_000).map(|i| (i as f64 + 0.5) / 10_000.0).collect();

    c.bench_function("cdf_value_10k", |b| {
        b.iter(|| {
            let mut acc = 0i64;
            for &p in &ps {
                acc += cdf.value(p).unwrap();
            }
            black_box(acc)
        })
    });

    let mut rng = rand::rngs::StdRng::seed_from_u64(0);
    c.bench_function("cdf_sample_10k", |b| {
        b.iter(|| black_box(cdf.sample(10_000, &mut rng).unwrap()))
    });
}

fn bench_densities(c: &mut Criterion) {
    let sample: Vec<f64> = (0..1_000).map(|i| ((i * 37) % 1_000) as f64 * 0.01).collect();
    let kde = EstimatedPdf::new(&sample).unwrap();
    let grid = linspace(-1.0, 11.0, 201);
    c.bench_function("kde_make_pmf_1k_x_201", |b| {
        b.iter(|| black_box(kde.make_pmf(&grid).unwrap()))
    });

    let beta = Beta::new(141.0, 111.0).unwrap();
    c.bench_function("beta_make_pmf_100", |b| b.iter(|| black_box(beta.make_pmf(100).unwrap())));
}

criterion_group!(benches, bench_convolution, bench_cdf, bench_densities);
criterion_main!(benches);
