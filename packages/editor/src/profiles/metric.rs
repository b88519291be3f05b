//! Metric structure: field name → declared type tag

use docsync_document::{DocumentProfile, DocumentShape, FieldType};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricStructureProfile;

impl DocumentProfile for MetricStructureProfile {
    fn kind(&self) -> &'static str {
        "metric-structure"
    }

    fn shape(&self) -> DocumentShape {
        DocumentShape::OpenMap
    }

    fn default_document(&self) -> Value {
        let mut map = Map::new();
        map.insert("total_customers".to_string(), FieldType::Integer.to_value());
        map.insert("total_revenue".to_string(), FieldType::Float.to_value());
        map.insert("period".to_string(), FieldType::String.to_value());
        Value::Object(map)
    }

    fn export_filename(&self) -> &str {
        "metric_structure.json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_structure() {
        assert_eq!(
            MetricStructureProfile.default_document(),
            json!({"total_customers": "integer", "total_revenue": "float", "period": "string"})
        );
    }
}
