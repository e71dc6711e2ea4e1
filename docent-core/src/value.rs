use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

use crate::DocumentError;

pub type Value = serde_json::Value;

/// String-keyed map of arbitrary JSON values. Keys serialize in sorted order.
pub type Metadata = BTreeMap<String, Value>;

pub trait TryFromValue: Sized {
    fn try_from_value(value: Value) -> Result<Self, DocumentError>;
}

impl<T> TryFromValue for T
where
    T: DeserializeOwned,
{
    fn try_from_value(value: Value) -> Result<Self, DocumentError> {
        serde_json::from_value(value).map_err(DocumentError::Decode)
    }
}
