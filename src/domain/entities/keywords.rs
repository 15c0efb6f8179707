use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::errors::{AnalysisError, Result};

/// Caller-supplied template describing the expected extraction output.
///
/// A schema is a JSON object mapping field names to empty or example value
/// shapes, e.g. `{"Skills": [], "Experience Years": []}`. It is passed
/// through to the extraction prompt unchanged; only the field set is
/// interpreted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordSchema {
    fields: BTreeMap<String, Value>,
}

impl KeywordSchema {
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| AnalysisError::configuration(format!("malformed schema: {e}")))?;

        match value {
            Value::Object(map) => {
                if map.is_empty() {
                    return Err(AnalysisError::configuration("schema declares no fields"));
                }
                Ok(Self {
                    fields: map.into_iter().collect(),
                })
            }
            _ => Err(AnalysisError::configuration(
                "schema must be a JSON object of field templates",
            )),
        }
    }

    /// Default résumé schema of the original product.
    pub fn resume_default() -> Self {
        Self::from_json(
            r#"{
                "Skills": [],
                "Job Titles": [],
                "Education": [],
                "Projects": [],
                "Experience Years": []
            }"#,
        )
        .expect("default schema is valid")
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Pretty-printed template JSON for prompt construction.
    pub fn template_json(&self) -> String {
        let map: serde_json::Map<String, Value> =
            self.fields.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        serde_json::to_string_pretty(&Value::Object(map)).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Structured output of one extraction call.
///
/// Every field declared in the schema is present, defaulting to an empty
/// sequence when the model produced nothing for it. Field values are not
/// stable across calls; only the field set is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordRecord {
    fields: BTreeMap<String, Vec<String>>,
}

impl KeywordRecord {
    /// Builds a record from raw model output mapped onto `schema`.
    ///
    /// Array values become stringified elements, scalars become a
    /// one-element sequence, null and missing fields become empty
    /// sequences. Keys outside the schema are discarded.
    pub fn from_extracted(schema: &KeywordSchema, extracted: &Value) -> Result<Self> {
        let object = extracted.as_object().ok_or_else(|| {
            AnalysisError::extraction_parse("extraction output is not a JSON object")
        })?;

        let mut fields = BTreeMap::new();
        for name in schema.field_names() {
            let values = match object.get(name) {
                None | Some(Value::Null) => Vec::new(),
                Some(Value::Array(items)) => items.iter().map(value_to_string).collect(),
                Some(scalar) => vec![value_to_string(scalar)],
            };
            fields.insert(name.to_string(), values);
        }

        Ok(Self { fields })
    }

    /// Record with every schema field present and empty.
    pub fn empty(schema: &KeywordSchema) -> Self {
        Self {
            fields: schema
                .field_names()
                .map(|name| (name.to_string(), Vec::new()))
                .collect(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// True when no field holds any value.
    pub fn is_blank(&self) -> bool {
        self.fields.values().all(Vec::is_empty)
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
