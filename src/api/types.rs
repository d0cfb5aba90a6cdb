//! Wire types for the Strata server API

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body of the dataset-creation call
///
/// `params` maps parameter names to their submitted values: the raw string
/// for scalar parameters, the JSON-array encoding for multi-value ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateDatasetRequest {
    pub database: i64,
    pub schema: String,
    pub params: HashMap<String, String>,
    pub template_id: i64,
    pub dataset_name: String,
}

/// Success response of the dataset-creation call
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedDataset {
    pub dataset_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_serializes_expected_fields() {
        let mut params = HashMap::new();
        params.insert("org".to_string(), "acme".to_string());
        params.insert("emails".to_string(), r#"["a@b.c"]"#.to_string());

        let request = CreateDatasetRequest {
            database: 3,
            schema: "public".to_string(),
            params,
            template_id: 1,
            dataset_name: "sales".to_string(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["database"], 3);
        assert_eq!(value["schema"], "public");
        assert_eq!(value["template_id"], 1);
        assert_eq!(value["dataset_name"], "sales");
        assert_eq!(value["params"]["org"], "acme");
        assert_eq!(value["params"]["emails"], r#"["a@b.c"]"#);
    }

    #[test]
    fn test_created_dataset_deserializes() {
        let created: CreatedDataset = serde_json::from_str(r#"{"dataset_id": 42}"#).unwrap();
        assert_eq!(created.dataset_id, 42);
    }
}
