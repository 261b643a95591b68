//! Fuzzer for the "bucket_array::chain" API.
//!
//! Runs the same operations against a [`Chain`] and a plain `Vec` model, and
//! checks that they always agree.

#![no_main]
use arbitrary::Arbitrary;
use chainx::Chain;
use libfuzzer_sys::fuzz_target;

type Val = u8;

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    Range,
    Item(u8),
    Position(Val),
    Insert(Val),
}

#[derive(Debug, Default)]
struct Sim {
    chain: Chain<Val>,
    model: Vec<Val>,
}

impl Sim {
    fn apply(&mut self, op: Op) {
        match op {
            Op::Range => {
                assert_eq!(self.chain.item_range(), 0..self.model.len());
                assert_eq!(self.chain.len(), self.model.len());
                assert_eq!(self.chain.is_empty(), self.model.is_empty());
            }
            Op::Item(item) => {
                let item = item as usize;
                assert_eq!(self.chain.item(item), self.model.get(item));
            }
            Op::Position(v) => {
                assert_eq!(
                    self.chain.position(&v),
                    self.model.iter().position(|x| *x == v)
                );
            }
            Op::Insert(v) => {
                let r1 = self.chain.insert_unique(v);
                let r2 = if self.model.contains(&v) {
                    Err(v)
                } else {
                    self.model.push(v);
                    Ok(self.model.len() - 1)
                };
                assert_eq!(r1, r2);
            }
        }
    }
}

fuzz_target!(|ex: Vec<Op>| {
    let mut sim = Sim::default();
    for o in ex {
        sim.apply(o);
    }
});
