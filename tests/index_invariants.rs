// ==============================================
// INDEX BEHAVIOR TESTS (integration)
// ==============================================
//
// End-to-end checks of the public PseudoLruIndex surface: lifecycle,
// touch/promotion behavior, removal, eviction scenarios, and the structural
// invariants after mixed operation sequences. Fine-grained shape tests live
// next to the tree implementation; these exercise the index as a caller
// sees it.

use splaylru::prelude::*;

// ==============================================
// Lifecycle
// ==============================================

mod lifecycle {
    use super::*;

    #[test]
    fn fresh_index_is_empty() {
        let index: PseudoLruIndex<u64, String> = PseudoLruIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert_eq!(index.peek(), None);
        assert_eq!(index.peek_lru_candidate(), None);
    }

    #[test]
    fn put_transitions_to_nonempty() {
        let mut index = PseudoLruIndex::new();
        assert!(index.put(10u64, 10));
        assert!(!index.is_empty());
        assert_eq!(index.len(), 1);
        assert!(index.peek().is_some());
    }

    #[test]
    fn clear_returns_to_empty() {
        let mut index = PseudoLruIndex::new();
        for k in 0..50u64 {
            index.put(k, k);
        }
        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.pop_lru(), None);
        index.check_invariants().unwrap();
    }
}

// ==============================================
// Touch & Promotion
// ==============================================

mod promotion {
    use super::*;

    #[test]
    fn hit_promotes_to_mru() {
        let mut index = PseudoLruIndex::new();
        index.put(10, 1);
        index.put(11, 4);
        assert_eq!(index.peek(), Some(&4));

        index.get(&10);
        assert_eq!(index.peek(), Some(&1));
        assert_eq!(index.peek_mru(), Some((&10, &1)));
    }

    #[test]
    fn get_finds_key_after_many_puts() {
        let mut index = PseudoLruIndex::new();
        for (k, v) in [(5, 1), (1, 1), (3, 1), (10, 1), (15, 2), (2, 3), (4, 4)] {
            index.put(k, v);
        }
        assert_eq!(index.len(), 7);
        assert_eq!(index.get(&2), Some(&3));
        index.check_invariants().unwrap();
    }

    #[test]
    fn consecutive_hits_both_resolve() {
        let mut index = PseudoLruIndex::new();
        for (k, v) in [(10, 1), (15, 2), (2, 3), (4, 4)] {
            index.put(k, v);
        }
        assert_eq!(index.get(&2), Some(&3));
        assert_eq!(index.get(&4), Some(&4));
        index.check_invariants().unwrap();
    }

    #[test]
    fn duplicate_put_touches_but_keeps_value() {
        let mut index = PseudoLruIndex::new();
        index.put(10, 1);
        index.put(20, 2);
        assert_eq!(index.peek_mru(), Some((&20, &2)));

        // the duplicate attempt keeps the old value but still promotes
        assert!(!index.put(10, 99));
        assert_eq!(index.len(), 2);
        assert_eq!(index.peek_mru(), Some((&10, &1)));
    }

    #[test]
    fn miss_is_not_a_touch() {
        let mut index = PseudoLruIndex::new();
        for (k, v) in [(10, 1), (15, 2), (2, 3), (4, 4)] {
            index.put(k, v);
        }
        let mru_before = index.peek_mru().map(|(k, v)| (*k, *v));
        assert_eq!(index.get(&5), None);
        assert_eq!(index.get(&678), None);
        assert_eq!(index.peek_mru().map(|(k, v)| (*k, *v)), mru_before);
    }
}

// ==============================================
// Removal
// ==============================================

mod removal {
    use super::*;

    #[test]
    fn remove_on_empty_index() {
        let mut index: PseudoLruIndex<i32, i32> = PseudoLruIndex::new();
        assert_eq!(index.remove(&15), None);
    }

    #[test]
    fn remove_leaves_remaining_entries_reachable() {
        let mut index = PseudoLruIndex::new();
        index.put(10, 1);
        index.put(15, 2);
        index.put(2, 3);

        assert_eq!(index.remove(&15), Some(2));
        assert_eq!(index.len(), 2);
        assert_eq!(index.get(&2), Some(&3));
        assert_eq!(index.get(&10), Some(&1));
        index.check_invariants().unwrap();
    }

    #[test]
    fn remove_every_key_in_insertion_order() {
        let mut index = PseudoLruIndex::new();
        let keys = [8, 3, 10, 1, 6, 14, 4, 7, 13];
        for k in keys {
            index.put(k, k * 2);
        }
        for k in keys {
            assert_eq!(index.remove(&k), Some(k * 2));
            index.check_invariants().unwrap();
        }
        assert!(index.is_empty());
    }
}

// ==============================================
// Eviction
// ==============================================

mod eviction {
    use super::*;

    #[test]
    fn pop_on_empty_returns_none() {
        let mut index: PseudoLruIndex<i32, i32> = PseudoLruIndex::new();
        assert_eq!(index.pop_lru(), None);
    }

    #[test]
    fn pop_avoids_fresh_inserts() {
        let mut index = PseudoLruIndex::new();
        for (k, v) in [(5, 128), (1, 6), (3, 12), (10, 9), (15, 2), (2, 3), (4, 4)] {
            index.put(k, v);
        }

        let (_, value) = index.pop_lru().unwrap();
        assert_eq!(index.len(), 6);
        for recent in [4, 3, 2, 9, 12] {
            assert_ne!(value, recent);
        }
        index.check_invariants().unwrap();
    }

    #[test]
    fn pop_avoids_recently_read_entries() {
        let mut index = PseudoLruIndex::new();
        for (k, v) in [(5, 128), (1, 6), (3, 12), (10, 9), (15, 2), (0, 7), (4, 4)] {
            index.put(k, v);
        }
        assert_eq!(index.get(&3), Some(&12));
        assert_eq!(index.get(&0), Some(&7));
        assert_eq!(index.get(&4), Some(&4));
        assert_eq!(index.len(), 7);

        let (_, value) = index.pop_lru().unwrap();
        assert_eq!(index.len(), 6);
        for recent in [12, 7, 4, 9] {
            assert_ne!(value, recent);
        }
        index.check_invariants().unwrap();
    }

    #[test]
    fn peek_candidate_agrees_with_pop() {
        let mut index = PseudoLruIndex::new();
        for k in [8, 3, 10, 1, 6, 14, 4] {
            index.put(k, k);
        }
        assert_eq!(index.get(&6), Some(&6));
        assert_eq!(index.get(&13), None);

        let candidate = index.peek_lru_candidate().map(|(k, v)| (*k, *v));
        assert_eq!(index.pop_lru(), candidate);
    }

    #[test]
    fn repeated_pop_drains_and_stops() {
        let mut index = PseudoLruIndex::new();
        for k in 0..64u32 {
            index.put(k, k);
        }
        let mut seen = Vec::new();
        while let Some((k, v)) = index.pop_lru() {
            assert_eq!(v, k);
            seen.push(k);
            index.check_invariants().unwrap();
        }
        assert_eq!(index.pop_lru(), None);
        seen.sort_unstable();
        let expected: Vec<u32> = (0..64).collect();
        assert_eq!(seen, expected);
    }
}

// ==============================================
// Ordered Iteration
// ==============================================

mod iteration {
    use super::*;

    #[test]
    fn iter_is_sorted_and_complete() {
        let mut index = PseudoLruIndex::new();
        for k in [5, 1, 3, 10, 15, 2, 4] {
            index.put(k, k * 100);
        }
        assert_eq!(index.get(&10), Some(&1000)); // restructure before iterating

        let entries: Vec<(i32, i32)> = index.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(
            entries,
            vec![
                (1, 100),
                (2, 200),
                (3, 300),
                (4, 400),
                (5, 500),
                (10, 1000),
                (15, 1500)
            ]
        );
    }
}
