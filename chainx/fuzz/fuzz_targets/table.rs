//! Fuzzer for the public table API.
//!
//! Inserts arbitrary strings into small tables with both text hashes, and
//! checks membership, iteration and cursor walks against a set model.

#![no_main]
use arbitrary::Arbitrary;
use chainx::{BucketHasher, ChainedHashTable, ChainedHashTableBuilder, ShiftXor, SipText};
use libfuzzer_sys::fuzz_target;
use std::collections::HashSet;

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    Insert(String),
    Find(String),
    Walk,
}

#[derive(Debug, Arbitrary)]
struct Input {
    capacity: u8,
    sip_key: Option<(u64, u64)>,
    ops: Vec<Op>,
}

fn run<H: BucketHasher + Clone>(hasher: H, capacity: usize, ops: Vec<Op>) {
    let mut table: ChainedHashTable<String, H> = ChainedHashTableBuilder::new()
        .capacity(capacity)
        .hasher(hasher)
        .build()
        .unwrap();
    let mut model = HashSet::new();

    for op in ops {
        match op {
            Op::Insert(s) => {
                assert_eq!(table.insert(s.clone()), model.insert(s));
                assert_eq!(table.len(), model.len());
            }
            Op::Find(s) => {
                let found = table.find(&s);
                assert_eq!(found == table.end(), !model.contains(&s));
                assert_eq!(found.get(), model.get(&s));
            }
            Op::Walk => {
                let mut walked = HashSet::new();
                let mut cursor = table.begin();
                let mut last_bucket = 0;
                while cursor != table.end() {
                    assert!(cursor.bucket() >= last_bucket);
                    last_bucket = cursor.bucket();
                    assert!(walked.insert(cursor.get().unwrap()));
                    cursor.advance();
                }
                assert_eq!(walked.len(), model.len());
                assert_eq!(table.iter().len(), model.len());
            }
        }
    }
}

fuzz_target!(|input: Input| {
    let capacity = usize::from(input.capacity).max(1);
    match input.sip_key {
        Some((k0, k1)) => run(SipText::new(k0, k1), capacity, input.ops),
        None => run(ShiftXor::<u64>::new(), capacity, input.ops),
    }
});
