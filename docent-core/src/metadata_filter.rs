use serde::{Deserialize, Serialize};

use crate::{Metadata, Value};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum MetadataFilter {
    Eq(String, Value),
    In(String, Vec<Value>),
    Range {
        key: String,
        min: Option<Value>,
        max: Option<Value>,
    },
    All(Vec<MetadataFilter>),
    Any(Vec<MetadataFilter>),
}

impl MetadataFilter {
    /// Equality on every entry of `map`.
    pub fn from_map(map: &Metadata) -> Self {
        MetadataFilter::All(
            map.iter()
                .map(|(key, value)| MetadataFilter::Eq(key.clone(), value.clone()))
                .collect(),
        )
    }

    pub fn matches(&self, metadata: &Metadata) -> bool {
        match self {
            MetadataFilter::Eq(key, value) => metadata.get(key).is_some_and(|entry| entry == value),
            MetadataFilter::In(key, values) => metadata
                .get(key)
                .is_some_and(|entry| values.iter().any(|value| value == entry)),
            MetadataFilter::Range { key, min, max } => {
                let Some(value) = metadata.get(key).and_then(Value::as_f64) else {
                    return false;
                };
                if let Some(min_value) = min {
                    let Some(min_value) = min_value.as_f64() else {
                        return false;
                    };
                    if value < min_value {
                        return false;
                    }
                }
                if let Some(max_value) = max {
                    let Some(max_value) = max_value.as_f64() else {
                        return false;
                    };
                    if value > max_value {
                        return false;
                    }
                }
                true
            }
            MetadataFilter::All(filters) => filters.iter().all(|filter| filter.matches(metadata)),
            MetadataFilter::Any(filters) => filters.iter().any(|filter| filter.matches(metadata)),
        }
    }
}
