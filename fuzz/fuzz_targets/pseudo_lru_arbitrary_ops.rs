#![no_main]

use libfuzzer_sys::fuzz_target;
use splaylru::prelude::*;

// Fuzz arbitrary operation sequences on PseudoLruIndex
//
// Drives random sequences of put, get, contains, remove, pop_lru, peeks and
// clear, re-checking the structural invariants and the count after every
// mutation.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut index: PseudoLruIndex<u8, u8> = PseudoLruIndex::new();
    let mut live_keys: Vec<u8> = Vec::new();

    let mut idx = 0;
    while idx + 1 < data.len() {
        let op = data[idx] % 8;
        let key = data[idx + 1];

        match op {
            0 => {
                // put
                let existed = index.contains(&key);
                let inserted = index.put(key, key.wrapping_mul(3));
                assert_eq!(inserted, !existed);
                if inserted {
                    live_keys.push(key);
                }
                assert!(index.contains(&key));
            }
            1 => {
                // get
                let hit = index.get(&key);
                if live_keys.contains(&key) {
                    assert_eq!(hit, Some(&key.wrapping_mul(3)));
                    // a hit promotes to the root
                    assert_eq!(index.peek_mru().map(|(k, _)| *k), Some(key));
                } else {
                    assert_eq!(hit, None);
                }
            }
            2 => {
                // contains
                assert_eq!(index.contains(&key), live_keys.contains(&key));
            }
            3 => {
                // remove
                let old_len = index.len();
                let removed = index.remove(&key);
                if let Some(pos) = live_keys.iter().position(|k| *k == key) {
                    assert_eq!(removed, Some(key.wrapping_mul(3)));
                    assert_eq!(index.len(), old_len - 1);
                    live_keys.swap_remove(pos);
                } else {
                    assert_eq!(removed, None);
                    assert_eq!(index.len(), old_len);
                }
            }
            4 => {
                // pop_lru
                match index.pop_lru() {
                    Some((k, v)) => {
                        assert_eq!(v, k.wrapping_mul(3));
                        let pos = live_keys
                            .iter()
                            .position(|lk| *lk == k)
                            .expect("evicted key must be live");
                        live_keys.swap_remove(pos);
                    }
                    None => assert!(live_keys.is_empty()),
                }
            }
            5 => {
                // peek_lru_candidate agrees with the keys we know about
                if let Some((k, v)) = index.peek_lru_candidate() {
                    assert!(live_keys.contains(k));
                    assert_eq!(*v, k.wrapping_mul(3));
                }
            }
            6 => {
                // peek_mru
                assert_eq!(index.peek_mru().is_some(), !live_keys.is_empty());
            }
            _ => {
                // clear (rare: only on a specific byte value)
                if key == 0xFF {
                    index.clear();
                    live_keys.clear();
                    assert!(index.is_empty());
                }
            }
        }

        assert_eq!(index.len(), live_keys.len());
        index.check_invariants().unwrap();
        idx += 2;
    }
});
