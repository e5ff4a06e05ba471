criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        building_cost_matrix,
        solving_hungarian_uniform,
        solving_hungarian_blobs,
        stepping_balanced_kmeans,
        fitting_balanced_kmeans,
        fitting_balanced_kmeans_plusplus,
}

fn building_cost_matrix(c: &mut criterion::Criterion) {
    let dataset = Fixture::uniform(512, 8, 0);
    let centroids = Seeding::Random.centroids(&dataset, 16, 0).unwrap();
    c.bench_function("build a 512 x 512 replicated cost matrix", |b| {
        b.iter(|| Costs::build(&dataset, &centroids).unwrap())
    });
}

fn solving_hungarian_uniform(c: &mut criterion::Criterion) {
    let dataset = Fixture::uniform(256, 4, 1);
    let centroids = Seeding::Random.centroids(&dataset, 8, 1).unwrap();
    let costs = Costs::build(&dataset, &centroids).unwrap();
    c.bench_function("solve a 256 x 256 assignment (uniform points)", |b| {
        b.iter(|| Hungarian.solve(&costs))
    });
}

fn solving_hungarian_blobs(c: &mut criterion::Criterion) {
    let dataset = Fixture::blobs(8, 32, 4, 2);
    let centroids = Seeding::PlusPlus.centroids(&dataset, 8, 2).unwrap();
    let costs = Costs::build(&dataset, &centroids).unwrap();
    c.bench_function("solve a 256 x 256 assignment (separated blobs)", |b| {
        b.iter(|| Hungarian.solve(&costs))
    });
}

fn stepping_balanced_kmeans(c: &mut criterion::Criterion) {
    let dataset = Fixture::uniform(256, 4, 3);
    let balance = Balance::try_from((dataset.n(), 10)).unwrap();
    let centroids = Seeding::Random.centroids(&dataset, 10, 3).unwrap();
    c.bench_function("one balanced k-means step (N = 256, k = 10)", |b| {
        b.iter(|| Step::next(&dataset, &Hungarian, balance, &centroids).unwrap())
    });
}

fn fitting_balanced_kmeans(c: &mut criterion::Criterion) {
    let dataset = Fixture::blobs(6, 20, 3, 4);
    c.bench_function("balanced k-means to convergence (N = 120, k = 7)", |b| {
        b.iter(|| BalancedKMeans::new(7).seed(4).fit(&dataset, &Hungarian).unwrap())
    });
}

fn fitting_balanced_kmeans_plusplus(c: &mut criterion::Criterion) {
    let dataset = Fixture::blobs(6, 20, 3, 4);
    c.bench_function("balanced k-means++ to convergence (N = 120, k = 7)", |b| {
        b.iter(|| {
            BalancedKMeans::new(7)
                .seeding(Seeding::PlusPlus)
                .seed(4)
                .fit(&dataset, &Hungarian)
                .unwrap()
        })
    });
}

use balanced_kmeans::*;
