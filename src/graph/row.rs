//! Row and streaming types for query results.

use crate::error::AppError;
use futures::Stream;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;
use std::pin::Pin;

/// Parameters for Cypher queries.
///
/// A map of parameter names to JSON values that can be passed to queries.
pub type Params = HashMap<String, JsonValue>;

/// A stream of rows from a query result.
pub type RowStream<'a> = Pin<Box<dyn Stream<Item = Result<Row, AppError>> + Send + 'a>>;

/// A single row from a query result.
///
/// Columns keep the order of the query's RETURN clause and serialize as a
/// JSON object, so a `Vec<Row>` renders as an array of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Row {
    data: Map<String, JsonValue>,
}

impl Row {
    /// Creates a new row from a map of column names to values.
    pub fn new(data: Map<String, JsonValue>) -> Self {
        Self { data }
    }

    /// Gets a value from the row by column name, deserializing to the requested type.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not found or if deserialization fails.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, AppError> {
        self.data
            .get(key)
            .ok_or_else(|| AppError::Internal(format!("column not found: {}", key)))
            .and_then(|v| {
                serde_json::from_value(v.clone()).map_err(|e| {
                    AppError::Internal(format!("failed to deserialize '{}': {}", key, e))
                })
            })
    }

    /// Gets a value from the row, returning `None` if the key doesn't exist or is null.
    pub fn get_opt<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        match self.data.get(key) {
            Some(v) if v.is_null() => Ok(None),
            Some(v) => serde_json::from_value(v.clone())
                .map(Some)
                .map_err(|e| AppError::Internal(format!("failed to deserialize '{}': {}", key, e))),
            None => Ok(None),
        }
    }

    /// Removes a column from the row and returns its value.
    pub fn take(&mut self, key: &str) -> Option<JsonValue> {
        self.data.remove(key)
    }

}

impl<K: Into<String>> FromIterator<(K, JsonValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, JsonValue)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_get_string() {
        let row: Row = [("name", json!("test"))].into_iter().collect();

        let name: String = row.get("name").unwrap();
        assert_eq!(name, "test");
    }

    #[test]
    fn test_row_get_missing_key() {
        let row = Row::default();
        let result: Result<String, _> = row.get("missing");
        assert!(result.is_err());
    }

    #[test]
    fn test_row_get_opt_null() {
        let row: Row = [("name", JsonValue::Null)].into_iter().collect();

        let name: Option<String> = row.get_opt("name").unwrap();
        assert_eq!(name, None);
    }

    #[test]
    fn test_row_get_list() {
        let row: Row = [("relationship_types", json!(["KNOWS", "OWNS"]))]
            .into_iter()
            .collect();

        let types: Vec<String> = row.get("relationship_types").unwrap();
        assert_eq!(types, vec!["KNOWS", "OWNS"]);
    }

    #[test]
    fn test_row_serializes_as_record_in_column_order() {
        let row: Row = [("z", json!(1)), ("a", json!("x"))].into_iter().collect();

        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"z":1,"a":"x"}"#);
    }

    #[test]
    fn test_row_take() {
        let mut row: Row = [("c", json!({"name": "Acme"}))].into_iter().collect();

        assert_eq!(row.take("c"), Some(json!({"name": "Acme"})));
        assert_eq!(row.take("c"), None);
        assert_eq!(row, Row::default());
    }
}
