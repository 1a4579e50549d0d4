use serde_json::Value;

/// Read-only view over a Figma node object.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a>(pub &'a Value);

impl<'a> Node<'a> {
    fn str_field(&self, key: &str) -> Option<&'a str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Display name, or `fallback` when absent, empty or not a string.
    pub fn name_or(&self, fallback: impl FnOnce() -> String) -> String {
        match self.str_field("name") {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => fallback(),
        }
    }

    pub fn kind(&self) -> &'a str {
        self.str_field("type").unwrap_or("UNKNOWN")
    }

    /// Raw `type` tag, without the `UNKNOWN` fallback.
    pub fn raw_kind(&self) -> Option<&'a str> {
        self.str_field("type")
    }

    pub fn id(&self) -> &'a str {
        self.str_field("id").unwrap_or("")
    }

    pub fn children(&self) -> &'a [Value] {
        self.0
            .get("children")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn children_count(&self) -> usize {
        self.children().len()
    }
}
