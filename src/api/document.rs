use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ChartError, ChartResult};

pub const DOCUMENT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentJsonContractV1 {
    pub schema_version: u32,
    pub document: Value,
}

/// Finished configuration text handed to the rendering runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
    part_count: usize,
    data_count: usize,
}

impl Document {
    pub(crate) fn new(text: String, part_count: usize, data_count: usize) -> Self {
        Self {
            text,
            part_count,
            data_count,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of objects in the parts array.
    #[must_use]
    pub fn part_count(&self) -> usize {
        self.part_count
    }

    /// Number of arrays in the shared data table.
    #[must_use]
    pub fn data_count(&self) -> usize {
        self.data_count
    }

    pub fn to_value(&self) -> ChartResult<Value> {
        serde_json::from_str(&self.text)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse document: {e}")))
    }

    pub fn to_pretty_string(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.to_value()?)
            .map_err(|e| ChartError::InvalidData(format!("failed to format document: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = DocumentJsonContractV1 {
            schema_version: DOCUMENT_JSON_SCHEMA_V1,
            document: self.to_value()?,
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize document contract v1: {e}"))
        })
    }

    /// Accepts either a bare document or a versioned contract payload.
    ///
    /// Counts are read from the default `parts` and `sharedData` keys.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse document json: {e}")))?;
        let document = match serde_json::from_value::<DocumentJsonContractV1>(value.clone()) {
            Ok(payload) => {
                if payload.schema_version != DOCUMENT_JSON_SCHEMA_V1 {
                    return Err(ChartError::InvalidData(format!(
                        "unsupported document schema version: {}",
                        payload.schema_version
                    )));
                }
                payload.document
            }
            Err(_) => value,
        };
        if !document.is_object() {
            return Err(ChartError::InvalidData(
                "document root must be an object".to_owned(),
            ));
        }
        let count = |key: &str| document.get(key).and_then(Value::as_array).map_or(0, Vec::len);
        let (part_count, data_count) = (count("parts"), count("sharedData"));
        Ok(Self::new(document.to_string(), part_count, data_count))
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Document {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
