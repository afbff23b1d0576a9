//! Partially filled wizard output
//!
//! The state is a JSON object mirroring the output type. A slot holds a value
//! only while its field is answered; clearing a field prunes parent objects
//! that become empty.

use super::path::FieldPath;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Snapshot of the values collected so far, handed read-only to prompter
/// factories, default providers and visibility predicates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    values: Map<String, Value>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value by dotted path. Malformed paths resolve to `None`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let path = FieldPath::parse(path).ok()?;
        self.get_path(&path)
    }

    pub fn get_path(&self, path: &FieldPath) -> Option<&Value> {
        let (last, parents) = path.segments().split_last()?;
        let mut current = &self.values;
        for segment in parents {
            current = current.get(segment)?.as_object()?;
        }
        current.get(last)
    }

    /// Look up a value and deserialize it into `V`
    pub fn get_as<V: DeserializeOwned>(&self, path: &str) -> Option<V> {
        let value = self.get(path)?;
        serde_json::from_value(value.clone()).ok()
    }

    pub fn contains(&self, path: &FieldPath) -> bool {
        self.get_path(path).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn set(&mut self, path: &FieldPath, value: Value) {
        let Some((last, parents)) = path.segments().split_last() else {
            return;
        };

        let mut current = &mut self.values;
        for segment in parents {
            let slot = current
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            current = match slot {
                Value::Object(map) => map,
                _ => return,
            };
        }
        current.insert(last.clone(), value);
    }

    pub(crate) fn remove(&mut self, path: &FieldPath) -> Option<Value> {
        remove_pruning(&mut self.values, path.segments())
    }

    /// The collected values as a JSON object
    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}

fn remove_pruning(map: &mut Map<String, Value>, segments: &[String]) -> Option<Value> {
    let (first, rest) = segments.split_first()?;
    if rest.is_empty() {
        return map.shift_remove(first);
    }

    let child = map.get_mut(first)?.as_object_mut()?;
    let removed = remove_pruning(child, rest);
    if child.is_empty() {
        map.shift_remove(first);
    }
    removed
}
