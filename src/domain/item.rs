use serde_json::{Map, Value};

/// A parsed feed entry exposed as a bag of named fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub fields: Map<String, Value>,
}

impl FeedItem {
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        let mut fields = Map::new();
        fields.insert("title".into(), Value::String(title.clone()));
        Self { title, fields }
    }

    /// Builder-style setter used by the normalizer and tests.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Look a field up by name, ignoring ASCII case on both sides.
    pub fn field(&self, name: &str) -> Option<&Value> {
        if let Some(value) = self.fields.get(name) {
            return Some(value);
        }
        self.fields
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }
}
