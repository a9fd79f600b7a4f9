//! Measurement records and histograms.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use entangle_ir::{Circuit, QubitId};

use crate::error::{SimError, SimResult};

/// Render measured bits as a string, first bit leftmost.
pub fn bitstring(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}

/// Bits recorded by every measurement in one execution, keyed by
/// measurement key in circuit order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementOutcome {
    entries: Vec<(String, Vec<bool>)>,
}

impl MeasurementOutcome {
    /// Create an empty outcome.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, key: impl Into<String>, bits: Vec<bool>) {
        self.entries.push((key.into(), bits));
    }

    /// Bits recorded under `key`, in the measurement's target order.
    pub fn get(&self, key: &str) -> Option<&[bool]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, bits)| bits.as_slice())
    }

    /// Bits under `key` as a bitstring.
    pub fn bitstring(&self, key: &str) -> Option<String> {
        self.get(key).map(bitstring)
    }

    /// Recorded keys in circuit order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate over `(key, bits)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[bool])> {
        self.entries.iter().map(|(k, b)| (k.as_str(), b.as_slice()))
    }

    /// Number of measurements recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was measured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-key samples of a repeated-shot run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRecord {
    /// Measurement key.
    pub key: String,
    /// Qubits measured under the key, in bit order.
    pub qubits: Vec<QubitId>,
    /// One bit vector per shot, in shot order.
    pub samples: Vec<Vec<bool>>,
}

/// Result of a repeated-shot run.
///
/// A cancelled run holds fewer shots than were requested; every shot it
/// does hold is complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    requested: usize,
    completed: usize,
    records: Vec<KeyRecord>,
}

impl RunResult {
    /// Empty result laid out for the measurements of `circuit`.
    pub(crate) fn empty(circuit: &Circuit, requested: usize) -> Self {
        let records = circuit
            .measurements()
            .map(|(key, qubits)| KeyRecord {
                key: key.to_string(),
                qubits: qubits.to_vec(),
                samples: vec![],
            })
            .collect();
        Self {
            requested,
            completed: 0,
            records,
        }
    }

    /// Record one shot. Outcome entries arrive in circuit order.
    pub(crate) fn record(&mut self, outcome: MeasurementOutcome) {
        debug_assert_eq!(outcome.len(), self.records.len());
        for (record, (_, bits)) in self.records.iter_mut().zip(outcome.entries) {
            record.samples.push(bits);
        }
        self.completed += 1;
    }

    /// Append the shots of a later chunk.
    pub(crate) fn append(&mut self, other: RunResult) {
        for (record, tail) in self.records.iter_mut().zip(other.records) {
            record.samples.extend(tail.samples);
        }
        self.completed += other.completed;
    }

    /// Shots actually executed.
    pub fn shots(&self) -> usize {
        self.completed
    }

    /// Shots asked for.
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Whether every requested shot ran.
    pub fn is_complete(&self) -> bool {
        self.completed == self.requested
    }

    /// Measurement keys in circuit order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.key.as_str())
    }

    /// Full record for `key`.
    pub fn record_for(&self, key: &str) -> Option<&KeyRecord> {
        self.records.iter().find(|r| r.key == key)
    }

    /// Per-shot bits under `key`.
    pub fn samples(&self, key: &str) -> Option<&[Vec<bool>]> {
        self.record_for(key).map(|r| r.samples.as_slice())
    }

    /// Reassemble the outcome of shot `index`.
    pub fn outcome(&self, index: usize) -> Option<MeasurementOutcome> {
        if index >= self.completed {
            return None;
        }
        let mut outcome = MeasurementOutcome::new();
        for record in &self.records {
            outcome.insert(record.key.clone(), record.samples[index].clone());
        }
        Some(outcome)
    }

    /// Iterate over per-shot outcomes.
    pub fn outcomes(&self) -> impl Iterator<Item = MeasurementOutcome> + '_ {
        (0..self.completed).filter_map(|i| self.outcome(i))
    }
}

/// Count the bitstrings recorded under `key`.
pub fn aggregate(result: &RunResult, key: &str) -> SimResult<Histogram> {
    let samples = result
        .samples(key)
        .ok_or_else(|| SimError::UnknownKey(key.to_string()))?;
    Ok(samples.iter().map(|bits| bitstring(bits)).collect())
}

/// Measurement counts keyed by bitstring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram {
    counts: FxHashMap<String, u64>,
}

impl Histogram {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` observations of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Count for `bitstring`, zero if never seen.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Total observations.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct bitstrings.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing was observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries sorted by bitstring.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self.counts.iter().map(|(k, &v)| (k.as_str(), v)).collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Most frequent bitstring; ties go to the smallest bitstring.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.counts
            .iter()
            .map(|(k, &v)| (k.as_str(), v))
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
    }

    /// Relative frequency of `bitstring`.
    pub fn probability(&self, bitstring: &str) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.get(bitstring) as f64 / total as f64
        }
    }

    /// Add every count from `other`.
    pub fn merge(&mut self, other: &Histogram) {
        for (k, &v) in &other.counts {
            self.insert(k.clone(), v);
        }
    }

    /// Iterate over `(bitstring, count)` in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

impl FromIterator<String> for Histogram {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        let mut histogram = Self::new();
        for bitstring in iter {
            histogram.insert(bitstring, 1);
        }
        histogram
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bell_layout() -> Circuit {
        let mut circuit = Circuit::new(2).unwrap();
        circuit.measure("z", [QubitId(1), QubitId(0)]).unwrap();
        circuit
    }

    fn outcome(bits: Vec<bool>) -> MeasurementOutcome {
        let mut outcome = MeasurementOutcome::new();
        outcome.insert("z", bits);
        outcome
    }

    #[test]
    fn test_bitstring_first_bit_leftmost() {
        assert_eq!(bitstring(&[true, false, false]), "100");
        assert_eq!(bitstring(&[]), "");
    }

    #[test]
    fn test_run_result_records() {
        let circuit = bell_layout();
        let mut result = RunResult::empty(&circuit, 3);
        result.record(outcome(vec![true, false]));
        result.record(outcome(vec![false, false]));

        assert_eq!(result.shots(), 2);
        assert!(!result.is_complete());
        assert_eq!(result.keys().collect::<Vec<_>>(), vec!["z"]);
        assert_eq!(result.record_for("z").unwrap().qubits, vec![QubitId(1), QubitId(0)]);
        assert_eq!(result.outcome(0).unwrap().bitstring("z").unwrap(), "10");
        assert!(result.outcome(2).is_none());
        assert_eq!(result.outcomes().count(), 2);
    }

    #[test]
    fn test_append_keeps_shot_order() {
        let circuit = bell_layout();
        let mut head = RunResult::empty(&circuit, 2);
        head.record(outcome(vec![true, true]));
        let mut tail = RunResult::empty(&circuit, 0);
        tail.record(outcome(vec![false, true]));

        head.append(tail);
        assert!(head.is_complete());
        let strings: Vec<_> = head.outcomes().map(|o| o.bitstring("z").unwrap()).collect();
        assert_eq!(strings, vec!["11", "01"]);
    }

    #[test]
    fn test_aggregate() {
        let circuit = bell_layout();
        let mut result = RunResult::empty(&circuit, 3);
        result.record(outcome(vec![true, true]));
        result.record(outcome(vec![false, false]));
        result.record(outcome(vec![true, true]));

        let histogram = aggregate(&result, "z").unwrap();
        assert_eq!(histogram.get("11"), 2);
        assert_eq!(histogram.get("00"), 1);
        assert_eq!(histogram.get("01"), 0);
        assert_eq!(histogram.total(), 3);

        assert!(matches!(
            aggregate(&result, "nope"),
            Err(SimError::UnknownKey(k)) if k == "nope"
        ));
    }

    #[test]
    fn test_histogram_queries() {
        let mut histogram = Histogram::new();
        histogram.insert("10", 3);
        histogram.insert("01", 3);
        histogram.insert("00", 1);

        assert_eq!(histogram.sorted(), vec![("00", 1), ("01", 3), ("10", 3)]);
        assert_eq!(histogram.most_frequent(), Some(("01", 3)));
        assert!((histogram.probability("10") - 3.0 / 7.0).abs() < 1e-12);
        assert_eq!(Histogram::new().probability("0"), 0.0);
        assert_eq!(Histogram::new().most_frequent(), None);
    }

    #[test]
    fn test_merge_is_commutative() {
        let a: Histogram = ["0", "1", "1"].into_iter().map(String::from).collect();
        let b: Histogram = ["1", "0", "0", "0"].into_iter().map(String::from).collect();

        let mut ab = a.clone();
        ab.merge(&b);
        let mut ba = b.clone();
        ba.merge(&a);

        assert_eq!(ab, ba);
        assert_eq!(ab.get("0"), 4);
        assert_eq!(ab.get("1"), 3);
    }

    #[test]
    fn test_serde() {
        let histogram: Histogram = ["01"].into_iter().map(String::from).collect();
        let json = serde_json::to_value(&histogram).unwrap();
        assert_eq!(json["counts"]["01"], 1);
    }
}
