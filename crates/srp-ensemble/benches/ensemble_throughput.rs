use criterion::{black_box, criterion_group, criterion_main, Criterion};

use srp_core::{ObservableSeries, SimParams, SpinBath, SrpError};
use srp_ensemble::{run, EnsembleConfig, MemorySink, ReducedSystem};
use srp_rng::Xoroshiro128Plus;

fn flat(_: &ReducedSystem, params: &SimParams) -> Result<ObservableSeries, SrpError> {
    let len = params.n_steps() + 1;
    ObservableSeries::from_channels(vec![0.25; len], vec![0.75; len])
}

fn noisy(
    _: &ReducedSystem,
    params: &SimParams,
    rng: &mut Xoroshiro128Plus,
) -> Result<ObservableSeries, SrpError> {
    let len = params.n_steps() + 1;
    let singlet: Vec<f64> = (0..len).map(|_| rng.unif01()).collect();
    let triplet = singlet.iter().map(|p| 1.0 - p).collect();
    ObservableSeries::from_channels(singlet, triplet)
}

fn bench_run(c: &mut Criterion) {
    let bath1 = SpinBath::spin_half((0..24).map(|i| 0.1 + 0.02 * i as f64).collect());
    let bath2 = SpinBath::spin_half((0..16).map(|i| 0.3 - 0.01 * i as f64).collect());
    let mut config = EnsembleConfig::default();
    config.sim.t_end = 2.0;
    config.sim.n_samples = 64;
    config.sim.block_tol = 1e-6;

    c.bench_function("run_24x16_nuclei", |b| {
        b.iter(|| {
            let mut rng = config.rng();
            let mut sink = MemorySink::default();
            black_box(run(&config, [&bath1, &bath2], &flat, &noisy, &mut rng, &mut sink).unwrap())
        })
    });
}

criterion_group!(benches, bench_run);
criterion_main!(benches);
