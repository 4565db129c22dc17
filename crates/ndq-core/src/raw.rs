//! Unnormalized composite record assembled by the fetch layer.

use std::collections::BTreeMap;

use serde::de::Error as DeError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{Category, Symbol, UtcDateTime};

/// Every category payload fetched for one symbol.
///
/// Serializes as a flat object, `{"symbol", "fetched_at", "info", ...}`,
/// with `null` for categories that could not be fetched. Reading that shape
/// back ignores unknown keys.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSymbolRecord {
    symbol: Symbol,
    fetched_at: UtcDateTime,
    payloads: BTreeMap<Category, Value>,
}

impl RawSymbolRecord {
    pub fn new(symbol: Symbol, fetched_at: UtcDateTime) -> Self {
        Self {
            symbol,
            fetched_at,
            payloads: BTreeMap::new(),
        }
    }

    /// Attach a category payload. `null` is the same as leaving it out.
    pub fn with_payload(mut self, category: Category, payload: Value) -> Self {
        self.set_payload(category, Some(payload));
        self
    }

    pub(crate) fn set_payload(&mut self, category: Category, payload: Option<Value>) {
        match payload {
            Some(value) if !value.is_null() => {
                self.payloads.insert(category, value);
            }
            _ => {
                self.payloads.remove(&category);
            }
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn fetched_at(&self) -> UtcDateTime {
        self.fetched_at
    }

    pub fn payload(&self, category: Category) -> Option<&Value> {
        self.payloads.get(&category)
    }

    pub fn is_available(&self, category: Category) -> bool {
        self.payloads.contains_key(&category)
    }

    pub fn available_count(&self) -> usize {
        self.payloads.len()
    }

    pub fn missing_categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|category| !self.is_available(*category))
            .collect()
    }
}

impl Serialize for RawSymbolRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(Category::ALL.len() + 2))?;
        map.serialize_entry("symbol", &self.symbol)?;
        map.serialize_entry("fetched_at", &self.fetched_at)?;
        for category in Category::ALL {
            map.serialize_entry(category.as_str(), &self.payloads.get(&category))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RawSymbolRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut object = Map::<String, Value>::deserialize(deserializer)?;

        let symbol = match object.remove("symbol") {
            Some(Value::String(raw)) => Symbol::parse(&raw).map_err(D::Error::custom)?,
            _ => return Err(D::Error::missing_field("symbol")),
        };
        let fetched_at = match object.remove("fetched_at") {
            Some(Value::String(raw)) => UtcDateTime::parse(&raw).map_err(D::Error::custom)?,
            _ => return Err(D::Error::missing_field("fetched_at")),
        };

        let mut record = Self::new(symbol, fetched_at);
        for (key, value) in object {
            if let Some(category) = Category::from_name(&key) {
                record.set_payload(category, Some(value));
            }
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> RawSymbolRecord {
        RawSymbolRecord::new(
            Symbol::parse("MSFT").expect("valid symbol"),
            UtcDateTime::parse("2024-05-01T12:00:00Z").expect("valid timestamp"),
        )
    }

    #[test]
    fn serializes_every_category_key() {
        let value = serde_json::to_value(record().with_payload(Category::Info, json!({"a": 1})))
            .expect("serializable");
        let object = value.as_object().expect("object");

        assert_eq!(object.len(), 16);
        assert_eq!(object["symbol"], json!("MSFT"));
        assert_eq!(object["fetched_at"], json!("2024-05-01T12:00:00Z"));
        assert_eq!(object["info"], json!({"a": 1}));
        assert_eq!(object["news_articles"], Value::Null);
    }

    #[test]
    fn null_payloads_count_as_missing() {
        let record = record().with_payload(Category::Dividends, Value::Null);
        assert!(!record.is_available(Category::Dividends));
        assert_eq!(record.missing_categories().len(), 14);
    }

    #[test]
    fn reads_back_flat_shape_and_ignores_unknown_keys() {
        let value = json!({
            "symbol": "msft",
            "fetched_at": "2024-05-01T12:00:00Z",
            "peg_ratio": {"pegr": {"pegValue": 2.1}},
            "short_interest": null,
            "extra": "ignored"
        });
        let record: RawSymbolRecord = serde_json::from_value(value).expect("readable");

        assert_eq!(record.symbol().as_str(), "MSFT");
        assert_eq!(record.available_count(), 1);
        assert!(record.is_available(Category::PegRatio));
    }

    #[test]
    fn missing_symbol_is_rejected() {
        let result = serde_json::from_value::<RawSymbolRecord>(json!({
            "fetched_at": "2024-05-01T12:00:00Z"
        }));
        assert!(result.is_err());
    }
}
