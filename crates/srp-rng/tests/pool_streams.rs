use std::collections::BTreeSet;

use proptest::prelude::*;
use srp_core::SrpError;
use srp_rng::{fold_back, RngPool, Xoroshiro128Plus};

#[test]
fn empty_pool_is_rejected() {
    let seed = Xoroshiro128Plus::from_master_seed(1);
    let err = RngPool::new(0, &seed).unwrap_err();
    assert!(matches!(err, SrpError::InvalidArgument(_)));
    assert_eq!(err.info().code, "rng_pool_size");
}

#[test]
fn streams_are_successive_jumps() {
    let seed = Xoroshiro128Plus::from_master_seed(42);
    let pool = RngPool::new(4, &seed).unwrap();
    assert_eq!(pool.len(), 4);

    let mut expected = seed.clone();
    for stream in pool.iter() {
        expected.jump();
        assert_eq!(stream.state(), expected.state());
    }
}

#[test]
fn pool_does_not_advance_seed_generator() {
    let seed = Xoroshiro128Plus::from_master_seed(42);
    let snapshot = seed.clone();
    let _pool = RngPool::new(3, &seed).unwrap();
    assert_eq!(seed, snapshot);
}

#[test]
fn streams_produce_distinct_sequences() {
    let seed = Xoroshiro128Plus::from_master_seed(9);
    let mut pool = RngPool::new(8, &seed).unwrap();
    let mut heads = BTreeSet::new();
    for stream in pool.streams_mut() {
        let head: Vec<u64> = (0..16).map(|_| stream.next_u64()).collect();
        heads.insert(head);
    }
    assert_eq!(heads.len(), 8);
}

#[test]
fn fold_back_xors_every_stream() {
    let seed = Xoroshiro128Plus::from_master_seed(123);
    let mut pool = RngPool::new(3, &seed).unwrap();
    for (index, stream) in pool.streams_mut().iter_mut().enumerate() {
        for _ in 0..=index {
            stream.next_u64();
        }
    }

    let mut rng = Xoroshiro128Plus::from_master_seed(321);
    let mut expected = rng.state();
    for stream in pool.iter() {
        expected[0] ^= stream.state()[0];
        expected[1] ^= stream.state()[1];
    }
    fold_back(&pool, &mut rng);
    assert_eq!(rng.state(), expected);

    let mut again = Xoroshiro128Plus::from_master_seed(321);
    pool.fold_into(&mut again);
    assert_eq!(again, rng);
}

proptest! {
    #[test]
    fn pool_construction_is_reproducible(seed in any::<u64>(), size in 1usize..6) {
        let rng = Xoroshiro128Plus::from_master_seed(seed);
        let a = RngPool::new(size, &rng).unwrap();
        let b = RngPool::new(size, &rng).unwrap();
        prop_assert_eq!(a, b);
    }
}
