//! Response normalization
//!
//! Reshapes raw success payloads into the caller's requested output
//! form. All functions are pure; decode failures surface as
//! [`PermIdError::Decode`].

use std::collections::BTreeMap;

use permid_domain::{Orient, PermIdError, Result, Table};
use serde_json::{Map, Value};

/// Shape a lookup payload as a table.
///
/// Parses the body as a json-ld object, drops the `@context` key, and
/// shapes the remaining fields per the orient: one row holding every
/// field, or one column keyed by the identifier with one labeled row per
/// field.
pub fn lookup_table(body: &str, id: &str, orient: Orient) -> Result<Table> {
    let mut record: Map<String, Value> = decode(body)?;
    record.remove("@context");

    match orient {
        Orient::Row => Ok(Table::from_records(&[record])),
        Orient::Column => {
            let mut labels = Vec::with_capacity(record.len());
            let mut cells = Vec::with_capacity(record.len());
            for (field, value) in record {
                labels.push(field);
                cells.push(value);
            }
            Ok(Table::from_columns(vec![(id.to_string(), cells)]).with_labels(labels))
        }
    }
}

/// Shape an all-types search payload as one table per category.
pub fn search_categories(body: &str) -> Result<BTreeMap<String, Table>> {
    let result = search_result(body)?;
    let mut tables = BTreeMap::new();
    for (category, value) in &result {
        tables.insert(category.clone(), entities_table(category, value)?);
    }
    Ok(tables)
}

/// Shape a single-type search payload as the table under the sole
/// `result` key.
pub fn search_table(body: &str) -> Result<Table> {
    let result = search_result(body)?;
    let (category, value) = result
        .iter()
        .next()
        .ok_or_else(|| PermIdError::Decode("the search result object is empty".to_string()))?;
    entities_table(category, value)
}

/// Shape a match payload as the table under `outputContentResponse`.
///
/// Accepts both row-oriented (array of records) and column-oriented
/// (map of column name to cell list) content.
pub fn match_table(body: &str) -> Result<Table> {
    let root: Value = decode(body)?;
    let output = root.get("outputContentResponse").ok_or_else(|| {
        PermIdError::Decode("the match payload is missing 'outputContentResponse'".to_string())
    })?;

    match output {
        Value::Array(items) => Ok(Table::from_records(&records(items)?)),
        Value::Object(map) => {
            let mut columns = Vec::with_capacity(map.len());
            for (name, cells) in map {
                let cells = cells.as_array().ok_or_else(|| {
                    PermIdError::Decode(format!(
                        "match output column '{name}' is not a list of cells"
                    ))
                })?;
                columns.push((name.clone(), cells.clone()));
            }
            Ok(Table::from_columns(columns))
        }
        _ => Err(PermIdError::Decode(
            "'outputContentResponse' is neither a record list nor a column map".to_string(),
        )),
    }
}

fn search_result(body: &str) -> Result<Map<String, Value>> {
    let root: Value = decode(body)?;
    root.get("result")
        .and_then(Value::as_object)
        .cloned()
        .ok_or_else(|| PermIdError::Decode("the search payload is missing 'result'".to_string()))
}

fn entities_table(category: &str, value: &Value) -> Result<Table> {
    let entities = value.get("entities").and_then(Value::as_array).ok_or_else(|| {
        PermIdError::Decode(format!("search category '{category}' is missing its 'entities' list"))
    })?;
    Ok(Table::from_records(&records(entities)?))
}

fn records(items: &[Value]) -> Result<Vec<Map<String, Value>>> {
    items
        .iter()
        .map(|item| {
            item.as_object()
                .cloned()
                .ok_or_else(|| PermIdError::Decode("expected a list of records".to_string()))
        })
        .collect()
}

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|err| PermIdError::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const LOOKUP_BODY: &str = r#"{
        "@context": "https://permid.org/context.jsonld",
        "hasPermId": "4298009661",
        "name": "Example Corp"
    }"#;

    #[test]
    fn lookup_row_drops_context() {
        let table = lookup_table(LOOKUP_BODY, "4298009661", Orient::Row).unwrap();

        assert_eq!(table.len(), 1);
        assert!(!table.columns().contains(&"@context".to_string()));
        assert_eq!(table.get(0, "hasPermId"), Some(&json!("4298009661")));
        assert_eq!(table.get(0, "name"), Some(&json!("Example Corp")));
    }

    #[test]
    fn lookup_column_is_keyed_by_the_identifier() {
        let table = lookup_table(LOOKUP_BODY, "4298009661", Orient::Column).unwrap();

        assert_eq!(table.columns(), ["4298009661"]);
        assert_eq!(table.len(), 2);
        let labels = table.labels().unwrap();
        assert!(labels.contains(&"hasPermId".to_string()));
        assert!(labels.contains(&"name".to_string()));
    }

    #[test]
    fn lookup_rejects_non_object_payloads() {
        let err = lookup_table("[1, 2]", "id", Orient::Row).unwrap_err();
        assert!(matches!(err, PermIdError::Decode(_)));
    }

    #[test]
    fn search_single_type_builds_one_table() {
        let body = r#"{"result":{"organizations":{"entities":[{"id":"1"},{"id":"2"}]}}}"#;
        let table = search_table(body).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.columns(), ["id"]);
    }

    #[test]
    fn search_all_builds_one_table_per_category() {
        let body = r#"{
            "result": {
                "organizations": {"entities": [{"id": "1"}, {"id": "2"}]},
                "instruments": {"entities": [{"ric": "IBM.N"}]}
            }
        }"#;
        let tables = search_categories(body).unwrap();

        assert_eq!(tables.len(), 2);
        assert_eq!(tables["organizations"].len(), 2);
        assert_eq!(tables["instruments"].len(), 1);
        assert_eq!(tables["instruments"].columns(), ["ric"]);
    }

    #[test]
    fn search_without_result_is_a_decode_error() {
        let err = search_table(r#"{"outcome": {}}"#).unwrap_err();
        assert!(matches!(err, PermIdError::Decode(_)));
    }

    #[test]
    fn match_row_oriented_records() {
        let body = r#"{"outputContentResponse":[
            {"Input_Name": "Acme", "Match OpenPermID": "1"},
            {"Input_Name": "Globex", "Match OpenPermID": "2"}
        ]}"#;
        let table = match_table(body).unwrap();

        assert_eq!(table.len(), 2);
        assert!(table.columns().contains(&"Input_Name".to_string()));
    }

    #[test]
    fn match_column_oriented_records() {
        let body = r#"{"outputContentResponse":{
            "Input_Name": ["Acme", "Globex"],
            "Match Score": ["0.9", "0.8"]
        }}"#;
        let table = match_table(body).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1, "Input_Name"), Some(&json!("Globex")));
    }

    #[test]
    fn match_without_output_field_is_a_decode_error() {
        let err = match_table(r#"{"errorCode": 1}"#).unwrap_err();
        assert!(matches!(err, PermIdError::Decode(_)));
    }
}
