use std::collections::BTreeSet;
use std::sync::Mutex;

use srp_core::{ObservableSeries, SimParams, SpinBath, SrpError};
use srp_ensemble::{run, EnsembleConfig, EnsembleReport, MemorySink, ReducedSystem};
use srp_rng::Xoroshiro128Plus;

fn config(master_seed: u64, threads: usize) -> EnsembleConfig {
    let mut config = EnsembleConfig::default();
    config.sim = SimParams {
        dt: 0.1,
        t_end: 1.0,
        max_groups: [2, 2],
        n_samples: 1,
        block_tol: 0.0,
    };
    config.threads = threads;
    config.seed_policy.master_seed = master_seed;
    config
}

fn exact(_: &ReducedSystem, params: &SimParams) -> Result<ObservableSeries, SrpError> {
    let len = params.n_steps() + 1;
    ObservableSeries::from_channels(vec![0.5; len], vec![0.5; len])
}

fn noisy(
    system: &ReducedSystem,
    params: &SimParams,
    rng: &mut Xoroshiro128Plus,
) -> Result<ObservableSeries, SrpError> {
    let len = params.n_steps() + 1;
    let scale = 1.0 / system.nuclear_dimension() as f64;
    let singlet = (0..len).map(|_| scale * rng.unif01()).collect();
    let triplet = (0..len).map(|_| scale * rng.normal().abs()).collect();
    ObservableSeries::from_channels(singlet, triplet)
}

fn baths() -> (SpinBath, SpinBath) {
    (
        SpinBath::spin_half(vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]),
        SpinBath::spin_half(vec![0.3, 0.3, 0.8]),
    )
}

fn run_once(config: &EnsembleConfig) -> (ObservableSeries, EnsembleReport, [u64; 2]) {
    let (bath1, bath2) = baths();
    let mut rng = config.rng();
    let mut sink = MemorySink::default();
    let report = run(config, [&bath1, &bath2], &exact, &noisy, &mut rng, &mut sink).unwrap();
    (sink.output.unwrap().0, report, rng.state())
}

#[test]
fn same_seed_reproduces_across_thread_counts() {
    let (series_a, report_a, state_a) = run_once(&config(7, 1));
    let (series_b, report_b, state_b) = run_once(&config(7, 4));
    assert_eq!(series_a, series_b);
    assert_eq!(report_a.blocks, report_b.blocks);
    assert_eq!(state_a, state_b);
    assert!(report_a.stochastic_blocks > 0);
}

#[test]
fn different_seeds_change_stochastic_blocks() {
    let (series_a, _, _) = run_once(&config(7, 2));
    let (series_b, _, _) = run_once(&config(8, 2));
    assert_ne!(series_a, series_b);
}

#[test]
fn caller_rng_is_folded_forward() {
    let config = config(11, 2);
    let before = config.rng().state();
    let (_, _, after) = run_once(&config);
    assert_ne!(before, after);
}

#[test]
fn every_block_gets_its_own_stream() {
    let config = config(3, 4);
    let (bath1, bath2) = baths();
    let heads = Mutex::new(Vec::new());
    let recording = |system: &ReducedSystem,
                     params: &SimParams,
                     rng: &mut Xoroshiro128Plus|
     -> Result<ObservableSeries, SrpError> {
        heads.lock().unwrap().push(rng.state());
        noisy(system, params, rng)
    };
    let mut rng = config.rng();
    let mut sink = MemorySink::default();
    let report = run(
        &config,
        [&bath1, &bath2],
        &exact,
        &recording,
        &mut rng,
        &mut sink,
    )
    .unwrap();

    let heads = heads.into_inner().unwrap();
    assert_eq!(heads.len(), report.stochastic_blocks);
    let distinct: BTreeSet<[u64; 2]> = heads.iter().copied().collect();
    assert_eq!(distinct.len(), heads.len());
}
