// ==============================================
// MODEL-BASED RANDOMIZED TESTS (integration)
// ==============================================
//
// Drives the index with seeded random operation sequences and checks it
// against a plain hash-map oracle after every step. The oracle knows
// membership, values, and counts; eviction picks are approximate by
// design, so the model only requires that an evicted entry existed with
// the right value, never that it was the exact LRU entry.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use splaylru::prelude::*;

const OPS_PER_RUN: usize = 4_000;
const KEY_SPACE: u32 = 200;

fn assert_matches_oracle(index: &PseudoLruIndex<u32, u64>, oracle: &FxHashMap<u32, u64>) {
    assert_eq!(index.len(), oracle.len());
    assert_eq!(index.is_empty(), oracle.is_empty());
    index.check_invariants().unwrap();

    let mut entries: Vec<(u32, u64)> = index.iter().map(|(k, v)| (*k, *v)).collect();
    let mut expected: Vec<(u32, u64)> = oracle.iter().map(|(k, v)| (*k, *v)).collect();
    expected.sort_unstable();
    assert!(entries.windows(2).all(|w| w[0].0 < w[1].0), "iter not sorted");
    entries.sort_unstable();
    assert_eq!(entries, expected);
}

fn run_model(seed: u64) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut index: PseudoLruIndex<u32, u64> = PseudoLruIndex::new();
    let mut oracle: FxHashMap<u32, u64> = FxHashMap::default();

    for step in 0..OPS_PER_RUN {
        let key = rng.gen_range(0..KEY_SPACE);
        match rng.gen_range(0..100u32) {
            // put: no-overwrite means the oracle only learns new keys
            0..=39 => {
                let value = rng.gen::<u64>();
                let inserted = index.put(key, value);
                assert_eq!(inserted, !oracle.contains_key(&key));
                if inserted {
                    oracle.insert(key, value);
                }
            }
            // get: hit values must match, misses must stay misses
            40..=64 => {
                assert_eq!(index.get(&key), oracle.get(&key));
            }
            // contains: pure probe
            65..=74 => {
                assert_eq!(index.contains(&key), oracle.contains_key(&key));
            }
            // remove
            75..=89 => {
                assert_eq!(index.remove(&key), oracle.remove(&key));
            }
            // pop_lru: evicted entry must have existed with this value
            _ => match index.pop_lru() {
                Some((k, v)) => {
                    assert_eq!(oracle.remove(&k), Some(v));
                }
                None => assert!(oracle.is_empty()),
            },
        }

        if step % 257 == 0 {
            assert_matches_oracle(&index, &oracle);
        }
    }

    assert_matches_oracle(&index, &oracle);

    // drain whatever is left through eviction alone
    while let Some((k, v)) = index.pop_lru() {
        assert_eq!(oracle.remove(&k), Some(v));
    }
    assert!(oracle.is_empty());
    assert!(index.is_empty());
    index.check_invariants().unwrap();
}

#[test]
fn model_seed_1() {
    run_model(0x5eed_0001);
}

#[test]
fn model_seed_2() {
    run_model(0x5eed_0002);
}

#[test]
fn model_seed_3() {
    run_model(0x5eed_0003);
}

#[test]
fn model_narrow_key_space_collides_heavily() {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut index: PseudoLruIndex<u32, u64> = PseudoLruIndex::new();
    let mut oracle: FxHashMap<u32, u64> = FxHashMap::default();

    // eight keys force constant duplicate puts and re-touches
    for _ in 0..2_000 {
        let key = rng.gen_range(0..8u32);
        if rng.gen_bool(0.5) {
            let value = rng.gen::<u64>();
            if index.put(key, value) {
                oracle.insert(key, value);
            }
        } else {
            assert_eq!(index.get(&key), oracle.get(&key));
        }
    }
    assert_matches_oracle(&index, &oracle);
}

#[test]
fn model_ascending_then_descending_insertion() {
    // worst-case insertion orders for a plain BST; splaying keeps the
    // operations from touching more than the access path
    let mut index: PseudoLruIndex<u32, u64> = PseudoLruIndex::new();
    let mut oracle: FxHashMap<u32, u64> = FxHashMap::default();

    for k in 0..500u32 {
        index.put(k, u64::from(k));
        oracle.insert(k, u64::from(k));
    }
    for k in (500..1_000u32).rev() {
        index.put(k, u64::from(k));
        oracle.insert(k, u64::from(k));
    }
    assert_matches_oracle(&index, &oracle);

    for k in 0..1_000u32 {
        assert_eq!(index.remove(&k), Some(u64::from(k)));
    }
    assert!(index.is_empty());
}
