//! Membership and iteration properties over randomized and permuted inputs

use chainx::{ChainedHashTable, ChainedHashTableBuilder, SipText};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashSet;

/// Random lowercase words, with plenty of repeats from a small alphabet
fn random_words(rng: &mut StdRng, count: usize) -> Vec<String> {
    (0..count)
        .map(|_| {
            let len = rng.gen_range(0..5);
            (0..len).map(|_| rng.gen_range(b'a'..=b'f') as char).collect()
        })
        .collect()
}

#[test]
fn membership_and_completeness() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for capacity in [1, 2, 7, 64, 1024] {
        let words = random_words(&mut rng, 500);
        let mut table = ChainedHashTable::with_capacity(capacity).unwrap();
        let mut model = HashSet::new();
        for word in &words {
            assert_eq!(table.insert(word.clone()), model.insert(word.clone()));
        }
        assert_eq!(table.len(), model.len());

        // Every inserted value is found, and found as itself
        for word in &words {
            let found = table.find(word);
            assert_ne!(found, table.end());
            assert_eq!(found.get(), Some(word));
        }

        // Values never inserted are not found
        for probe in ["zzz", "g", "abcdefg"] {
            let probe = probe.to_owned();
            assert_eq!(table.find(&probe), table.end());
        }

        // Iteration yields each distinct value exactly once
        let iterated: Vec<&String> = table.iter().collect();
        assert_eq!(iterated.len(), model.len());
        let iterated_set: HashSet<&String> = iterated.into_iter().collect();
        assert_eq!(iterated_set, model.iter().collect());
    }
}

#[test]
fn iteration_is_stable_and_bucket_ordered() {
    let mut rng = StdRng::seed_from_u64(7);
    let words = random_words(&mut rng, 300);
    let table = ChainedHashTable::from_range(words, 13).unwrap();

    let first: Vec<&String> = table.iter().collect();
    let second: Vec<&String> = (&table).into_iter().collect();
    assert_eq!(first, second);

    let buckets: Vec<usize> = first.iter().map(|w| table.bucket_index(w)).collect();
    assert!(buckets.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn insert_twice_changes_nothing() {
    let mut table = ChainedHashTable::with_capacity(5).unwrap();
    table.extend(["a", "b", "c", "d", "e", "f"]);
    let before: Vec<&str> = table.iter().copied().collect();
    for word in before.clone() {
        assert!(!table.insert(word));
    }
    let after: Vec<&str> = table.iter().copied().collect();
    assert_eq!(before, after);
}

#[test]
fn every_insertion_order() {
    // Whatever order elements arrive in, the table holds the same set, and
    // each bucket lists its elements in arrival order.
    let mut words = ["ant", "bee", "cat", "dog", "eel", "fox"];
    let heap = permutohedron::Heap::new(&mut words);
    let mut orders = 0;
    for order in heap {
        let table = ChainedHashTable::from_range(order, 3).unwrap();
        assert_eq!(table.len(), 6);
        for bucket in 0..3 {
            let arrived: Vec<&str> = order
                .iter()
                .copied()
                .filter(|w| table.bucket_index(w) == bucket)
                .collect();
            let stored: Vec<&str> = table
                .iter()
                .copied()
                .filter(|w| table.bucket_index(w) == bucket)
                .collect();
            assert_eq!(arrived, stored);
        }
        orders += 1;
    }
    assert_eq!(orders, 720);
}

#[test]
fn sip_hasher_keeps_table_semantics() {
    let mut rng = StdRng::seed_from_u64(99);
    let words = random_words(&mut rng, 400);
    let model: HashSet<String> = words.iter().cloned().collect();

    let table = ChainedHashTableBuilder::new()
        .capacity(31)
        .hasher(SipText::from_seed(b"properties"))
        .build_from(words.iter().cloned())
        .unwrap();
    assert_eq!(table.len(), model.len());
    for word in &model {
        assert!(table.contains(word));
    }

    // Same key, same placement
    let again = ChainedHashTableBuilder::new()
        .capacity(31)
        .hasher(SipText::from_seed(b"properties"))
        .build_from(words)
        .unwrap();
    let a: Vec<&String> = table.iter().collect();
    let b: Vec<&String> = again.iter().collect();
    assert_eq!(a, b);
}

#[test]
fn collect_into_default_table() {
    let table: ChainedHashTable<String> =
        ["q", "r", "q"].iter().map(|s| s.to_string()).collect();
    assert_eq!(table.capacity(), chainx::DEFAULT_SIZE);
    assert_eq!(table.len(), 2);
    assert!(table.contains(&"q".to_owned()));
}
