//! The Cartesian composer — an odometer over named field generators.
//!
//! Enumerates the full cross product of every field's value cycle, one
//! record per call, exhausting exactly once every combination has been
//! emitted. Field names are sorted once at construction and that order is
//! fixed for the composer's lifetime: the lexicographically last field
//! advances on every call (least significant), and a field that rolls over
//! is reset while the carry moves toward the front, exactly as in a
//! positional numeral system.

use super::generators::FieldGenerator;
use super::value::GenValue;
use indexmap::IndexMap;

/// One complete combination: every configured field name mapped to the
/// value currently held for it, in sorted field order.
pub type Record = IndexMap<String, GenValue>;

/// Enumerates the full cross product of a set of named field generators.
pub struct CartesianComposer {
    fields: IndexMap<String, Box<dyn FieldGenerator>>,
    order: Vec<String>,
    current: Option<Record>,
    exhausted: bool,
}

impl CartesianComposer {
    /// A composer over the given named generators.
    ///
    /// Enumeration order is derived from the names, sorted
    /// lexicographically, regardless of the order the map was built in.
    pub fn new(fields: IndexMap<String, Box<dyn FieldGenerator>>) -> Self {
        let mut fields = fields;
        fields.sort_keys();
        let order = fields.keys().cloned().collect();
        Self {
            fields,
            order,
            current: None,
            exhausted: false,
        }
    }

    /// Field names in odometer order, most significant first.
    pub fn field_order(&self) -> &[String] {
        &self.order
    }

    /// Per-field cycle lengths in odometer order.
    pub fn cycles(&self) -> Vec<(String, u64)> {
        self.fields
            .iter()
            .map(|(name, gen)| (name.clone(), gen.cycle_len()))
            .collect()
    }

    /// Number of records one full enumeration emits: the product of every
    /// field's cycle length, saturating at `u64::MAX`.
    pub fn cardinality(&self) -> u64 {
        self.fields
            .values()
            .map(|gen| gen.cycle_len())
            .fold(1u64, |acc, len| acc.saturating_mul(len))
    }

    /// The next combination, or `None` once every combination has been
    /// emitted.
    ///
    /// Returned records are independent snapshots; mutating one does not
    /// disturb the enumeration. Exhaustion is terminal until
    /// [`CartesianComposer::reset`].
    pub fn next_record(&mut self) -> Option<Record> {
        if self.exhausted {
            return None;
        }

        if self.current.is_none() {
            // First call seeds every slot, keeping the sentinel for any
            // field whose cycle is already empty. That degenerate
            // combination is still emitted once.
            let mut record = Record::with_capacity(self.order.len());
            for (name, gen) in self.fields.iter_mut() {
                record.insert(name.clone(), gen.next());
            }
            self.current = Some(record.clone());
            return Some(record);
        }

        // A composer with no fields emits its one empty record above and
        // exhausts here.
        let current = self.current.as_mut()?;
        for (name, gen) in self.fields.iter_mut().rev() {
            let value = gen.next();
            if !value.is_nil() {
                // Increment without carry
                current.insert(name.clone(), value);
                return Some(current.clone());
            }
            // Rolled over: rewind this field to the first value of a fresh
            // cycle and carry to the next-more-significant field.
            gen.reset();
            current.insert(name.clone(), gen.next());
        }

        // Carry propagated past the most significant field
        self.exhausted = true;
        None
    }

    /// Rewind every field generator and forget the current record,
    /// returning the composer to its pre-first-call state.
    pub fn reset(&mut self) {
        for gen in self.fields.values_mut() {
            gen.reset();
        }
        self.current = None;
        self.exhausted = false;
    }
}

impl Iterator for CartesianComposer {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        self.next_record()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::generators::RepeatGen;
    use crate::core::value::GenValue;
    use proptest::prelude::*;

    /// Test-only generator yielding a fixed list of distinct values.
    #[derive(Debug)]
    struct SeqGen {
        values: Vec<GenValue>,
        pos: usize,
    }

    impl SeqGen {
        fn new(payloads: &[&str]) -> Self {
            Self {
                values: payloads.iter().map(|p| GenValue::string(*p)).collect(),
                pos: 0,
            }
        }
    }

    impl FieldGenerator for SeqGen {
        fn next(&mut self) -> GenValue {
            match self.values.get(self.pos) {
                Some(v) => {
                    self.pos += 1;
                    v.clone()
                }
                None => GenValue::nil(),
            }
        }

        fn reset(&mut self) {
            self.pos = 0;
        }

        fn cycle_len(&self) -> u64 {
            self.values.len() as u64
        }
    }

    fn composer_of(fields: Vec<(&str, Box<dyn FieldGenerator>)>) -> CartesianComposer {
        CartesianComposer::new(
            fields
                .into_iter()
                .map(|(name, gen)| (name.to_string(), gen))
                .collect(),
        )
    }

    fn drain(composer: &mut CartesianComposer) -> Vec<Record> {
        let mut out = Vec::new();
        while let Some(record) = composer.next_record() {
            out.push(record);
        }
        out
    }

    #[test]
    fn test_odometer_order() {
        // A advances slowest (most significant), B advances every call.
        let mut composer = composer_of(vec![
            ("A", Box::new(SeqGen::new(&["a1", "a2"]))),
            ("B", Box::new(SeqGen::new(&["b1", "b2", "b3"]))),
        ]);
        let pairs: Vec<(String, String)> = drain(&mut composer)
            .iter()
            .map(|r| (r["A"].payload.clone(), r["B"].payload.clone()))
            .collect();
        let expected: Vec<(String, String)> = [
            ("a1", "b1"),
            ("a1", "b2"),
            ("a1", "b3"),
            ("a2", "b1"),
            ("a2", "b2"),
            ("a2", "b3"),
        ]
        .iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn test_order_is_sorted_regardless_of_insertion() {
        let mut composer = composer_of(vec![
            ("zeta", Box::new(SeqGen::new(&["z"]))),
            ("alpha", Box::new(SeqGen::new(&["a"]))),
            ("mid", Box::new(SeqGen::new(&["m"]))),
        ]);
        assert_eq!(composer.field_order(), ["alpha", "mid", "zeta"]);
        let record = composer.next_record().unwrap();
        let keys: Vec<&String> = record.keys().collect();
        assert_eq!(keys, ["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_cardinality_is_product_of_cycles() {
        let composer = composer_of(vec![
            ("a", Box::new(SeqGen::new(&["1", "2"]))),
            ("b", Box::new(SeqGen::new(&["1", "2", "3"]))),
        ]);
        assert_eq!(composer.cardinality(), 6);
    }

    #[test]
    fn test_emits_exactly_cardinality_records() {
        let mut composer = composer_of(vec![
            ("a", Box::new(SeqGen::new(&["1", "2"]))),
            ("b", Box::new(SeqGen::new(&["1", "2", "3"]))),
        ]);
        assert_eq!(drain(&mut composer).len(), 6);
    }

    #[test]
    fn test_exhaustion_is_idempotent() {
        let mut composer = composer_of(vec![("a", Box::new(SeqGen::new(&["1"])))]);
        drain(&mut composer);
        assert!(composer.next_record().is_none());
        assert!(composer.next_record().is_none());
        assert!(composer.next_record().is_none());
    }

    #[test]
    fn test_reset_replays_identical_sequence() {
        let mut composer = composer_of(vec![
            ("a", Box::new(SeqGen::new(&["1", "2"]))),
            ("b", Box::new(SeqGen::new(&["x", "y"]))),
        ]);
        let first = drain(&mut composer);
        composer.reset();
        let second = drain(&mut composer);
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_fields_emits_one_empty_record() {
        let mut composer = composer_of(vec![]);
        let record = composer.next_record().unwrap();
        assert!(record.is_empty());
        assert!(composer.next_record().is_none());
        assert!(composer.next_record().is_none());

        composer.reset();
        assert!(composer.next_record().unwrap().is_empty());
    }

    #[test]
    fn test_zero_length_field_keeps_sentinel_slot() {
        // The empty field's slot is seeded with the sentinel, not skipped.
        let mut composer = composer_of(vec![
            ("a", Box::new(SeqGen::new(&["a1", "a2"]))),
            (
                "b",
                Box::new(RepeatGen::new(GenValue::string("x"), 0).unwrap()),
            ),
        ]);
        let records = drain(&mut composer);
        // "a" still cycles; "b" stays the sentinel throughout.
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r["b"].is_nil()));
        assert_eq!(records[0]["a"].payload, "a1");
        assert_eq!(records[1]["a"].payload, "a2");
        // True product is zero even though degenerate records were emitted.
        assert_eq!(composer.cardinality(), 0);
    }

    #[test]
    fn test_single_zero_length_field_exhausts_after_one_record() {
        let mut composer = composer_of(vec![(
            "only",
            Box::new(RepeatGen::new(GenValue::string("x"), 0).unwrap()),
        )]);
        let record = composer.next_record().unwrap();
        assert!(record["only"].is_nil());
        assert!(composer.next_record().is_none());
    }

    #[test]
    fn test_records_are_independent_snapshots() {
        let mut composer = composer_of(vec![("a", Box::new(SeqGen::new(&["1", "2"])))]);
        let mut first = composer.next_record().unwrap();
        first.insert("a".to_string(), GenValue::string("mutated"));
        let second = composer.next_record().unwrap();
        assert_eq!(second["a"].payload, "2");
    }

    #[test]
    fn test_iterator_adapter() {
        let composer = composer_of(vec![
            ("a", Box::new(SeqGen::new(&["1", "2"]))),
            ("b", Box::new(SeqGen::new(&["x", "y", "z"]))),
        ]);
        assert_eq!(composer.count(), 6);
    }

    #[test]
    fn test_three_field_odometer() {
        let mut composer = composer_of(vec![
            ("a", Box::new(SeqGen::new(&["a1", "a2"]))),
            ("b", Box::new(SeqGen::new(&["b1", "b2"]))),
            ("c", Box::new(SeqGen::new(&["c1", "c2"]))),
        ]);
        let records = drain(&mut composer);
        assert_eq!(records.len(), 8);
        // c flips every record, a flips every four
        assert_eq!(records[0]["c"].payload, "c1");
        assert_eq!(records[1]["c"].payload, "c2");
        assert_eq!(records[3]["a"].payload, "a1");
        assert_eq!(records[4]["a"].payload, "a2");
        // No duplicates across the full product
        let mut seen: Vec<String> = records
            .iter()
            .map(|r| format!("{}/{}/{}", r["a"].payload, r["b"].payload, r["c"].payload))
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 8);
    }

    proptest! {
        #[test]
        fn prop_cardinality_matches_product(counts in proptest::collection::vec(0u32..4, 1..4)) {
            let fields: IndexMap<String, Box<dyn FieldGenerator>> = counts
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    let gen = RepeatGen::new(GenValue::string("v"), *c).unwrap();
                    (format!("f{}", i), Box::new(gen) as Box<dyn FieldGenerator>)
                })
                .collect();
            let mut composer = CartesianComposer::new(fields);

            let product: u64 = counts.iter().map(|c| u64::from(*c)).product();
            prop_assert_eq!(composer.cardinality(), product);

            // An empty cycle still occupies its slot in the seeded record,
            // so enumeration emits max(count, 1) per field.
            let expected: u64 = counts.iter().map(|c| u64::from((*c).max(1))).product();
            let mut emitted = 0u64;
            while composer.next_record().is_some() {
                emitted += 1;
            }
            prop_assert_eq!(emitted, expected);
        }

        #[test]
        fn prop_reset_is_deterministic(counts in proptest::collection::vec(1u32..4, 1..4)) {
            let fields: IndexMap<String, Box<dyn FieldGenerator>> = counts
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    let gen = RepeatGen::new(GenValue::string("v"), *c).unwrap();
                    (format!("f{}", i), Box::new(gen) as Box<dyn FieldGenerator>)
                })
                .collect();
            let mut composer = CartesianComposer::new(fields);

            let mut first = Vec::new();
            while let Some(r) = composer.next_record() {
                first.push(r);
            }
            composer.reset();
            let mut second = Vec::new();
            while let Some(r) = composer.next_record() {
                second.push(r);
            }
            prop_assert_eq!(first, second);
        }
    }
}
