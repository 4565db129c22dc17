use serde_json::Value;

use crate::error::NormalizeError;
use crate::{Category, RawSymbolRecord};

/// Cursor into a vendor document that remembers how it got there.
///
/// Missing keys and `null` are absent, never errors. Walking through a value
/// of the wrong JSON type is [`NormalizeError::UnexpectedShape`].
#[derive(Debug, Clone)]
pub(crate) struct Node<'a> {
    value: Option<&'a Value>,
    path: String,
}

impl<'a> Node<'a> {
    pub(crate) fn category(record: &'a RawSymbolRecord, category: Category) -> Self {
        Self {
            value: record.payload(category),
            path: category.as_str().to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn detached(path: &str, value: &'a Value) -> Self {
        Self {
            value: Some(value),
            path: path.to_string(),
        }
    }

    pub(crate) fn value(&self) -> Option<&'a Value> {
        self.value.filter(|value| !value.is_null())
    }

    pub(crate) fn is_present(&self) -> bool {
        self.value().is_some()
    }

    /// Child node. The current node must be an object or absent.
    pub(crate) fn get(&self, key: &str) -> Result<Node<'a>, NormalizeError> {
        let path = format!("{}.{key}", self.path);
        match self.value() {
            None => Ok(Node { value: None, path }),
            Some(Value::Object(map)) => Ok(Node {
                value: map.get(key),
                path,
            }),
            Some(other) => Err(self.unexpected("object", other)),
        }
    }

    pub(crate) fn at(&self, keys: &[&str]) -> Result<Node<'a>, NormalizeError> {
        keys.iter().try_fold(self.clone(), |node, key| node.get(key))
    }

    /// Raw value of a direct member, for handing to the scalar parsers.
    pub(crate) fn field(&self, key: &str) -> Result<Option<&'a Value>, NormalizeError> {
        Ok(self.get(key)?.value())
    }

    /// Array elements. Absent is empty.
    pub(crate) fn items(&self) -> Result<Vec<Node<'a>>, NormalizeError> {
        match self.value() {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items
                .iter()
                .enumerate()
                .map(|(index, value)| Node {
                    value: Some(value),
                    path: format!("{}[{index}]", self.path),
                })
                .collect()),
            Some(other) => Err(self.unexpected("array", other)),
        }
    }

    /// Object members, for tables with open-ended columns.
    pub(crate) fn entries(&self) -> Result<Vec<(&'a str, &'a Value)>, NormalizeError> {
        match self.value() {
            None => Ok(Vec::new()),
            Some(Value::Object(map)) => Ok(map
                .iter()
                .map(|(key, value)| (key.as_str(), value))
                .collect()),
            Some(other) => Err(self.unexpected("object", other)),
        }
    }

    fn unexpected(&self, expected: &'static str, found: &Value) -> NormalizeError {
        NormalizeError::UnexpectedShape {
            path: self.path.clone(),
            expected,
            found: kind(found),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
