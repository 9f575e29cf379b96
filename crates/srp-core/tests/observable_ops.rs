use std::fs;

use srp_core::{ObservableSeries, SrpError};

fn ramp(len: usize) -> ObservableSeries {
    let singlet = (0..len).map(|i| i as f64).collect();
    let triplet = (0..len).map(|i| 2.0 * i as f64).collect();
    ObservableSeries::from_channels(singlet, triplet).unwrap()
}

#[test]
fn zeros_allocates_requested_length() {
    let series = ObservableSeries::zeros(11);
    assert_eq!(series.len(), 11);
    assert!(series.singlet().iter().all(|&x| x == 0.0));
    assert!(series.triplet().iter().all(|&x| x == 0.0));
}

#[test]
fn scale_add_and_reset() {
    let mut acc = ObservableSeries::zeros(4);
    let mut block = ramp(4);
    block.scale(3.0);
    acc.add_assign(&block).unwrap();
    acc.add_assign(&ramp(4)).unwrap();
    assert_eq!(acc.singlet(), &[0.0, 4.0, 8.0, 12.0]);
    assert_eq!(acc.triplet(), &[0.0, 8.0, 16.0, 24.0]);

    acc.fill_zero();
    assert_eq!(acc, ObservableSeries::zeros(4));
}

#[test]
fn add_rejects_length_mismatch() {
    let mut acc = ObservableSeries::zeros(4);
    let err = acc.add_assign(&ObservableSeries::zeros(5)).unwrap_err();
    assert!(matches!(err, SrpError::InvalidArgument(_)));
}

#[test]
fn kinetics_integrate_with_rates() {
    let series =
        ObservableSeries::from_channels(vec![1.0, 1.0, 1.0], vec![0.0, 0.5, 1.0]).unwrap();
    let kinetics = series.derive_kinetics(0.5, 2.0, 4.0);
    assert_eq!(kinetics.time, vec![0.0, 0.5, 1.0]);
    assert!((kinetics.total_singlet_yield - 2.0).abs() < 1e-12);
    // 4 * (0.25 * 0.5 + 0.25 * 1.5) = 2
    assert!((kinetics.total_triplet_yield - 2.0).abs() < 1e-12);
    assert_eq!(kinetics.singlet_yield[0], 0.0);
}

#[test]
fn csv_output_has_one_row_per_sample() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("series.csv");
    let series = ramp(6);
    let kinetics = series.derive_kinetics(0.1, 1.0, 1.0);
    series.write_csv(&path, &kinetics).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("t,p_singlet,p_triplet,yield_singlet,yield_triplet")
    );
    assert_eq!(lines.count(), 6);
}
