use srp_core::{SimParams, SpinBath, SrpError};

#[test]
fn mismatched_lengths_are_rejected() {
    let err = SpinBath::new(vec![2, 2], vec![0.1]).unwrap_err();
    assert!(matches!(err, SrpError::Config(_)));
}

#[test]
fn non_spin_half_is_unsupported() {
    let bath = SpinBath::new(vec![2, 3, 2], vec![0.1, 0.2, 0.3]).unwrap();
    match bath.ensure_spin_half() {
        Err(SrpError::UnsupportedSpin(info)) => {
            assert_eq!(info.context["index"], "1");
            assert_eq!(info.context["multiplicity"], "3");
        }
        other => panic!("expected unsupported spin, got {other:?}"),
    }
}

#[test]
fn dimension_is_product_of_multiplicities() {
    let bath = SpinBath::spin_half(vec![0.5; 10]);
    assert_eq!(bath.dimension().unwrap(), 1024);
    assert_eq!(SpinBath::empty().dimension().unwrap(), 1);
}

#[test]
fn dimension_overflow_is_reported() {
    let bath = SpinBath::spin_half(vec![0.5; 128]);
    assert!(matches!(bath.dimension(), Err(SrpError::Overflow(_))));
    let bath = SpinBath::spin_half(vec![0.5; 127]);
    assert_eq!(bath.dimension().unwrap(), 1u128 << 127);
}

#[test]
fn sim_params_grid() {
    let params = SimParams {
        dt: 0.5,
        t_end: 2.0,
        ..SimParams::default()
    };
    assert_eq!(params.n_steps(), 4);
    params.validate().unwrap();

    let bad = SimParams {
        dt: 0.0,
        ..SimParams::default()
    };
    assert!(matches!(bad.validate(), Err(SrpError::Config(_))));
}
