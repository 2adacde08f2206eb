//! Canonical configuration shape expected by the job runner.

use jobdef_core::Document;
use serde_json::Value;

use crate::document::kind;
use crate::{ConfigError, ConfigResult};

/// Keys that must hold a mapping.
const MAPPING_KEYS: [&str; 3] = ["storage", "parameters", "processors"];

/// Key that must hold a sequence.
const SHARED_CODE_ROW_IDS: &str = "shared_code_row_ids";

/// Fill in `storage`, `parameters`, `processors` and `shared_code_row_ids`.
///
/// Missing or null keys get an empty default, `[]` in a mapping slot becomes
/// `{}`. Any other key is left untouched.
pub fn normalize(mut configuration: Document) -> ConfigResult<Document> {
    for key in MAPPING_KEYS {
        let normalized = match configuration.remove(key) {
            None | Some(Value::Null) => Value::Object(Document::new()),
            Some(Value::Array(items)) if items.is_empty() => Value::Object(Document::new()),
            Some(value @ Value::Object(_)) => value,
            Some(other) => {
                return Err(ConfigError::invalid(
                    key,
                    format!("expected a mapping, got {}", kind(&other)),
                ));
            }
        };
        configuration.insert(key.to_string(), normalized);
    }

    if let Some(processors) = configuration.get("processors").and_then(Value::as_object) {
        for stage in ["before", "after"] {
            match processors.get(stage) {
                None | Some(Value::Null) | Some(Value::Array(_)) => {}
                Some(other) => {
                    return Err(ConfigError::invalid(
                        format!("processors.{stage}"),
                        format!("expected a sequence, got {}", kind(other)),
                    ));
                }
            }
        }
    }

    match configuration.get(SHARED_CODE_ROW_IDS) {
        None | Some(Value::Null) => {
            configuration.insert(SHARED_CODE_ROW_IDS.to_string(), Value::Array(Vec::new()));
        }
        Some(Value::Array(_)) => {}
        Some(other) => {
            return Err(ConfigError::invalid(
                SHARED_CODE_ROW_IDS,
                format!("expected a sequence, got {}", kind(other)),
            ));
        }
    }

    Ok(configuration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_empty_configuration_gets_defaults() {
        let normalized = normalize(Document::new()).unwrap();
        assert_eq!(
            Value::Object(normalized),
            json!({
                "storage": {},
                "parameters": {},
                "processors": {},
                "shared_code_row_ids": []
            })
        );
    }

    #[test]
    fn test_existing_values_are_kept() {
        let normalized = normalize(doc(json!({
            "storage": {"input": {"tables": [{"source": "in.c-main.a"}]}},
            "parameters": {"db": "x"},
            "shared_code_row_ids": ["code-1"],
            "runtime": {"backend": "large"}
        })))
        .unwrap();

        assert_eq!(normalized["storage"]["input"]["tables"][0]["source"], "in.c-main.a");
        assert_eq!(normalized["parameters"], json!({"db": "x"}));
        assert_eq!(normalized["shared_code_row_ids"], json!(["code-1"]));
        assert_eq!(normalized["runtime"], json!({"backend": "large"}));
        assert_eq!(normalized["processors"], json!({}));
    }

    #[test]
    fn test_null_and_empty_sequence_become_mappings() {
        let normalized = normalize(doc(json!({
            "storage": [],
            "parameters": null,
            "shared_code_row_ids": null
        })))
        .unwrap();

        assert_eq!(normalized["storage"], json!({}));
        assert_eq!(normalized["parameters"], json!({}));
        assert_eq!(normalized["shared_code_row_ids"], json!([]));
    }

    #[test]
    fn test_scalar_parameters_are_rejected() {
        let err = normalize(doc(json!({"parameters": "x"}))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "parameters"));
    }

    #[test]
    fn test_non_empty_sequence_storage_is_rejected() {
        let err = normalize(doc(json!({"storage": [1]}))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "storage"));
    }

    #[test]
    fn test_shared_code_row_ids_must_be_sequence() {
        let err = normalize(doc(json!({"shared_code_row_ids": "code-1"}))).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == "shared_code_row_ids"
        ));
    }

    #[test]
    fn test_processor_stages_must_be_sequences() {
        let err = normalize(doc(json!({"processors": {"after": {"component": "p"}}}))).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == "processors.after"
        ));
    }
}
