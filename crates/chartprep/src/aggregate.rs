//! Aggregate — ordered label-to-count mapping fed into charts.

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ChartError, ChartResult};

/// Category label → magnitude, in insertion order, labels unique.
///
/// Every mutation is checked, so the total of a valid aggregate always
/// fits in `u64`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryAggregate {
    entries: Vec<(String, u64)>,
    /// label → position in `entries`
    index: HashMap<String, usize>,
    total: u64,
}

impl CategoryAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(label, magnitude)` pairs; repeated labels are summed.
    pub fn try_from_entries<I, S>(entries: I) -> ChartResult<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut aggregate = Self::new();
        for (label, magnitude) in entries {
            aggregate.insert(label.as_ref(), magnitude)?;
        }
        Ok(aggregate)
    }

    /// Count how often each label occurs, ordered by first appearance.
    pub fn from_labels<I, S>(labels: I) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::try_from_entries(labels.into_iter().map(|label| (label, 1)))
    }

    /// Add `magnitude` to `label`, appending the label if it is new.
    ///
    /// Fails without modifying the aggregate if the label or the total
    /// would exceed `u64::MAX`.
    pub fn insert(&mut self, label: &str, magnitude: u64) -> ChartResult<()> {
        let total = self.total.checked_add(magnitude).ok_or_else(|| {
            ChartError::Overflow(format!(
                "adding {} to {:?} exceeds the aggregate total limit",
                magnitude, label
            ))
        })?;

        // Total bounds every entry, so the entry sum cannot overflow here
        match self.index.get(label) {
            Some(&pos) => self.entries[pos].1 += magnitude,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push((label.to_string(), magnitude));
            }
        }
        self.total = total;
        Ok(())
    }

    /// Remove a label, returning its magnitude. Later entries keep their order.
    pub fn remove(&mut self, label: &str) -> Option<u64> {
        let pos = self.index.remove(label)?;
        let (_, magnitude) = self.entries.remove(pos);
        for slot in self.index.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }
        self.total -= magnitude;
        Some(magnitude)
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.index.get(label).map(|&pos| self.entries[pos].1)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries.iter().map(|(l, m)| (l.as_str(), *m))
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(l, _)| l.as_str()).collect()
    }

    /// Magnitudes in entry order, as handed to a pie chart.
    pub fn values(&self) -> Vec<u64> {
        self.entries.iter().map(|(_, m)| *m).collect()
    }

    /// Reorder entries by descending magnitude; ties keep their current order.
    pub fn sort_descending(&mut self) {
        self.entries.sort_by(|a, b| b.1.cmp(&a.1));
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(pos, (label, _))| (label.clone(), pos))
            .collect();
    }
}

/// Serialises as a JSON object in entry order.
impl Serialize for CategoryAggregate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, magnitude) in &self.entries {
            map.serialize_entry(label, magnitude)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryAggregate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AggregateVisitor;

        impl<'de> Visitor<'de> for AggregateVisitor {
            type Value = CategoryAggregate;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object of category label to count")
            }

            // Document order is kept; a repeated key adds to the first occurrence
            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut aggregate = CategoryAggregate::new();
                while let Some((label, magnitude)) = map.next_entry::<String, u64>()? {
                    aggregate
                        .insert(&label, magnitude)
                        .map_err(serde::de::Error::custom)?;
                }
                Ok(aggregate)
            }
        }

        deserializer.deserialize_map(AggregateVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CategoryAggregate {
        CategoryAggregate::try_from_entries([("/", 10u64), ("/about", 3), ("/login", 7)]).unwrap()
    }

    #[test]
    fn test_insert_accumulates_existing_label() {
        let mut agg = CategoryAggregate::new();
        agg.insert("/", 2).unwrap();
        agg.insert("/a", 1).unwrap();
        agg.insert("/", 3).unwrap();
        assert_eq!(agg.len(), 2);
        assert_eq!(agg.get("/"), Some(5));
        assert_eq!(agg.total(), 6);
        assert_eq!(agg.labels(), vec!["/", "/a"]);
    }

    #[test]
    fn test_from_labels_counts_in_first_seen_order() {
        let agg = CategoryAggregate::from_labels(["/b", "/a", "/b", "/c", "/b"]).unwrap();
        assert_eq!(agg.labels(), vec!["/b", "/a", "/c"]);
        assert_eq!(agg.values(), vec![3, 1, 1]);
        assert_eq!(agg.total(), 5);
    }

    #[test]
    fn test_insert_rejects_total_overflow() {
        let mut agg = CategoryAggregate::try_from_entries([("A", u64::MAX)]).unwrap();
        assert!(matches!(agg.insert("B", 1), Err(ChartError::Overflow(_))));
        assert!(matches!(agg.insert("A", 1), Err(ChartError::Overflow(_))));
        // Failed inserts leave the aggregate untouched
        assert_eq!(agg.labels(), vec!["A"]);
        assert_eq!(agg.total(), u64::MAX);
        agg.insert("B", 0).unwrap();
        assert_eq!(agg.total(), u64::MAX);
    }

    #[test]
    fn test_try_from_entries_overflow() {
        let result = CategoryAggregate::try_from_entries([("A", u64::MAX), ("B", 1)]);
        assert!(matches!(result, Err(ChartError::Overflow(_))));
    }

    #[test]
    fn test_remove_keeps_lookup_consistent() {
        let mut agg = sample();
        assert_eq!(agg.remove("/"), Some(10));
        assert_eq!(agg.remove("/"), None);
        assert_eq!(agg.total(), 10);
        assert_eq!(agg.get("/login"), Some(7));
        agg.insert("/login", 1).unwrap();
        assert_eq!(agg.get("/login"), Some(8));
        assert_eq!(agg.labels(), vec!["/about", "/login"]);
    }

    #[test]
    fn test_sort_descending() {
        let mut agg = sample();
        agg.sort_descending();
        assert_eq!(agg.labels(), vec!["/", "/login", "/about"]);
        assert_eq!(agg.get("/about"), Some(3));
    }

    #[test]
    fn test_empty_aggregate() {
        let agg = CategoryAggregate::new();
        assert!(agg.is_empty());
        assert_eq!(agg.total(), 0);
        assert!(!agg.contains("/"));
    }

    #[test]
    fn test_serialize_empty() {
        assert_eq!(serde_json::to_string(&CategoryAggregate::new()).unwrap(), "{}");
    }

    #[test]
    fn test_json_round_trip_preserves_order() {
        let agg = sample();
        let json = serde_json::to_string(&agg).unwrap();
        assert_eq!(json, r#"{"/":10,"/about":3,"/login":7}"#);
        let back: CategoryAggregate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, agg);
    }

    #[test]
    fn test_deserialize_keeps_document_order() {
        let agg: CategoryAggregate = serde_json::from_str(r#"{"b":5,"a":7}"#).unwrap();
        assert_eq!(agg.labels(), vec!["b", "a"]);
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<CategoryAggregate>(r#"{"a":-1}"#).is_err());
    }

    #[test]
    fn test_deserialize_rejects_overflowing_total() {
        let json = format!(r#"{{"a":{},"b":1}}"#, u64::MAX);
        let err = serde_json::from_str::<CategoryAggregate>(&json).unwrap_err();
        assert!(err.to_string().contains("overflow"));
    }
}
