use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{DocumentError, Metadata, TryFromValue, Value};

/// A unit of text handed to knowledge bases and vector stores.
///
/// `content` and `meta_data` are always part of the JSON form. The remaining
/// fields are omitted from it entirely while unset, and a `null` for any of
/// them is read back as unset.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub content: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub meta_data: Metadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reranking_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Metadata>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Metadata, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Metadata>::deserialize(deserializer)?.unwrap_or_default())
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            meta_data: Metadata::new(),
            id: None,
            name: None,
            reranking_score: None,
            usage: None,
        }
    }

    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_meta_data(mut self, meta_data: Metadata) -> Self {
        self.meta_data = meta_data;
        self
    }

    pub fn with_reranking_score(mut self, score: f64) -> Self {
        self.reranking_score = Some(score);
        self
    }

    pub fn with_usage(mut self, usage: Metadata) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn clear_id(&mut self) -> Option<String> {
        self.id.take()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn clear_name(&mut self) -> Option<String> {
        self.name.take()
    }

    pub fn set_meta_data(&mut self, meta_data: Metadata) {
        self.meta_data = meta_data;
    }

    pub fn set_reranking_score(&mut self, score: f64) {
        self.reranking_score = Some(score);
    }

    pub fn clear_reranking_score(&mut self) -> Option<f64> {
        self.reranking_score.take()
    }

    pub fn set_usage(&mut self, usage: Metadata) {
        self.usage = Some(usage);
    }

    pub fn clear_usage(&mut self) -> Option<Metadata> {
        self.usage.take()
    }

    pub fn meta(&self, key: &str) -> Option<&Value> {
        self.meta_data.get(key)
    }

    /// Reads a metadata entry as `T`. A missing key is `Ok(None)`; a present
    /// entry of the wrong shape is a decode error.
    pub fn meta_as<T: TryFromValue>(&self, key: &str) -> Result<Option<T>, DocumentError> {
        self.meta_data
            .get(key)
            .cloned()
            .map(T::try_from_value)
            .transpose()
    }

    pub fn insert_meta(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Option<Value> {
        self.meta_data.insert(key.into(), value.into())
    }

    pub fn remove_meta(&mut self, key: &str) -> Option<Value> {
        self.meta_data.remove(key)
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        self.ensure_encodable()?;
        serde_json::to_string(self).map_err(|err| DocumentError::Encoding(err.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        self.ensure_encodable()?;
        serde_json::to_string_pretty(self).map_err(|err| DocumentError::Encoding(err.to_string()))
    }

    pub fn to_value(&self) -> Result<Value, DocumentError> {
        self.ensure_encodable()?;
        serde_json::to_value(self).map_err(|err| DocumentError::Encoding(err.to_string()))
    }

    /// Decodes straight from the text, so a repeated key is rejected rather
    /// than silently overwritten.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let first = json.trim_start_matches([' ', '\t', '\n', '\r']).bytes().next();
        if first != Some(b'{') {
            let value: Value = serde_json::from_str(json).map_err(DocumentError::Decode)?;
            return Err(DocumentError::Decode(not_an_object(&value)));
        }
        serde_json::from_str(json).map_err(DocumentError::Decode)
    }

    /// Only JSON objects are accepted; serde would otherwise also map a
    /// positional array onto the struct fields.
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        if !value.is_object() {
            return Err(DocumentError::Decode(not_an_object(&value)));
        }
        serde_json::from_value(value).map_err(DocumentError::Decode)
    }

    pub fn get_meta_data_as_json(&self) -> Result<String, DocumentError> {
        serde_json::to_string(&self.meta_data)
            .map_err(|err| DocumentError::Encoding(err.to_string()))
    }

    pub fn set_meta_data_from_json(&mut self, json: &str) -> Result<(), DocumentError> {
        self.meta_data = serde_json::from_str(json).map_err(DocumentError::Decode)?;
        Ok(())
    }

    // serde_json writes non-finite floats as `null`, which the wire form forbids.
    fn ensure_encodable(&self) -> Result<(), DocumentError> {
        match self.reranking_score {
            Some(score) if !score.is_finite() => Err(DocumentError::Encoding(format!(
                "reranking_score {score} is not representable in JSON"
            ))),
            _ => Ok(()),
        }
    }
}

fn not_an_object(value: &Value) -> serde_json::Error {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    <serde_json::Error as serde::de::Error>::custom(format!(
        "expected a JSON object, found {kind}"
    ))
}

impl FromStr for Document {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

#[derive(Clone, Debug, Default)]
pub struct DocumentBuilder {
    content: Option<String>,
    id: Option<String>,
    name: Option<String>,
    meta_data: Metadata,
    reranking_score: Option<f64>,
    usage: Option<Metadata>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, value: impl Into<String>) -> Self {
        self.content = Some(value.into());
        self
    }

    pub fn id(mut self, value: impl Into<String>) -> Self {
        self.id = Some(value.into());
        self
    }

    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = Some(value.into());
        self
    }

    pub fn meta_data(mut self, value: Metadata) -> Self {
        self.meta_data = value;
        self
    }

    pub fn meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta_data.insert(key.into(), value.into());
        self
    }

    pub fn reranking_score(mut self, value: f64) -> Self {
        self.reranking_score = Some(value);
        self
    }

    pub fn usage(mut self, value: Metadata) -> Self {
        self.usage = Some(value);
        self
    }

    pub fn build(self) -> Result<Document, DocumentError> {
        let content = self.content.ok_or_else(|| DocumentError::missing("content"))?;

        Ok(Document {
            content,
            meta_data: self.meta_data,
            id: self.id,
            name: self.name,
            reranking_score: self.reranking_score,
            usage: self.usage,
        })
    }
}
