use serde::{Deserialize, Serialize};


/// How an agent picks memories to put back into its context.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MemoryRetrieval {
    LastN,
    FirstN,
    Semantic,
}

impl MemoryRetrieval {
    /// Applies a positional strategy. `Semantic` needs a vector backend and
    /// yields `None` here.
    pub fn select<'a>(&self, memories: &'a [Memory], n: usize) -> Option<&'a [Memory]> {
        match self {
            MemoryRetrieval::LastN => Some(&memories[memories.len().saturating_sub(n)..]),
            MemoryRetrieval::FirstN => Some(&memories[..n.min(memories.len())]),
            MemoryRetrieval::Semantic => None,
        }
    }
}

/// A single remembered fact. Unset optional fields are left out of the JSON form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Memory {
    pub memory: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
}

impl Memory {
    pub fn new(memory: impl Into<String>) -> Self {
        Self {
            memory: memory.into(),
            id: None,
            topic: None,
            input: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
