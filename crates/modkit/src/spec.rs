//! Parameter contract - declarative field tables and input validation
//!
//! A module declares the keys it accepts as a table of [`FieldSpec`]
//! entries. The host-facing entry point validates the raw parameter
//! document against that table before anything reaches the module
//! handler: unknown keys, missing required keys, type mismatches, and
//! out-of-choice values are all rejected up front, and absent optional
//! keys are filled from their declared defaults.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Value type accepted by a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// A JSON string
    String,
    /// A JSON boolean
    Bool,
    /// A JSON integer
    Int,
    /// A JSON array, optionally element-typed
    List,
    /// A JSON object
    Dict,
}

impl FieldType {
    /// Name used in validation messages and generated docs
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::List => "list",
            Self::Dict => "dict",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Bool => value.is_boolean(),
            Self::Int => value.is_i64() || value.is_u64(),
            Self::List => value.is_array(),
            Self::Dict => value.is_object(),
        }
    }
}

/// Declaration of a single accepted parameter
#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    /// Key under which the parameter is supplied
    pub name: &'static str,
    /// Accepted value type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Element type for `List` fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_type: Option<FieldType>,
    /// Whether the parameter must be supplied
    pub required: bool,
    /// Value used when the parameter is absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Closed set of accepted string values
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<&'static str>,
    /// One-line description for generated docs
    pub description: &'static str,
}

impl FieldSpec {
    /// Declare an optional field with no default
    pub fn new(name: &'static str, field_type: FieldType, description: &'static str) -> Self {
        Self {
            name,
            field_type,
            element_type: None,
            required: false,
            default: None,
            choices: Vec::new(),
            description,
        }
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the value used when the field is absent
    pub fn default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Restrict string values to a closed set
    pub fn choices(mut self, choices: &[&'static str]) -> Self {
        self.choices = choices.to_vec();
        self
    }

    /// Require every element of a `List` field to match a type
    pub fn element_type(mut self, element_type: FieldType) -> Self {
        self.element_type = Some(element_type);
        self
    }

    fn validate_value(&self, value: &Value) -> Result<()> {
        if !self.field_type.matches(value) {
            return Err(Error::Validation(format!(
                "field '{}' must be a {}",
                self.name,
                self.field_type.name()
            )));
        }

        if let Some(element_type) = self.element_type
            && let Some(items) = value.as_array()
        {
            for item in items {
                if !element_type.matches(item) {
                    return Err(Error::Validation(format!(
                        "field '{}' must contain only {} elements",
                        self.name,
                        element_type.name()
                    )));
                }
            }
        }

        if !self.choices.is_empty()
            && let Some(s) = value.as_str()
            && !self.choices.contains(&s)
        {
            return Err(Error::Validation(format!(
                "field '{}' must be one of [{}], got '{}'",
                self.name,
                self.choices.join(", "),
                s
            )));
        }

        Ok(())
    }
}

/// Declaration of a single documented return value
#[derive(Debug, Clone, Serialize)]
pub struct ReturnSpec {
    /// Key under which the value appears in the payload
    pub name: &'static str,
    /// Value type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// One-line description for generated docs
    pub description: &'static str,
    /// Sample payload fragments
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<&'static str>,
}

impl ReturnSpec {
    /// Declare a return value
    pub fn new(name: &'static str, field_type: FieldType, description: &'static str) -> Self {
        Self {
            name,
            field_type,
            description,
            samples: Vec::new(),
        }
    }

    /// Attach sample payload fragments
    pub fn samples(mut self, samples: &[&'static str]) -> Self {
        self.samples = samples.to_vec();
        self
    }
}

/// Full parameter contract for a module
#[derive(Debug, Clone, Serialize)]
pub struct ModuleSpec {
    /// Synopsis lines shown at the top of generated docs
    pub description: Vec<&'static str>,
    /// Accepted parameters, in declaration order
    pub fields: Vec<FieldSpec>,
    /// Example parameter documents
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<&'static str>,
    /// Documented return values
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub returns: Vec<ReturnSpec>,
}

impl ModuleSpec {
    /// Start a contract with the given synopsis lines
    pub fn new(description: &[&'static str]) -> Self {
        Self {
            description: description.to_vec(),
            fields: Vec::new(),
            examples: Vec::new(),
            returns: Vec::new(),
        }
    }

    /// Add a field declaration
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Attach example parameter documents
    pub fn examples(mut self, examples: &[&'static str]) -> Self {
        self.examples = examples.to_vec();
        self
    }

    /// Add a documented return value
    pub fn returns(mut self, ret: ReturnSpec) -> Self {
        self.returns.push(ret);
        self
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validate a raw parameter document against this contract.
    ///
    /// Explicit `null` values are treated the same as absent keys. On
    /// success the returned object contains every supplied value plus
    /// the defaults for absent optional fields.
    pub fn validate(&self, raw: Value) -> Result<Map<String, Value>> {
        let Value::Object(input) = raw else {
            return Err(Error::Validation(
                "parameters must be a JSON object".to_string(),
            ));
        };

        for key in input.keys() {
            if self.get(key).is_none() {
                return Err(Error::Validation(format!("unknown field '{key}'")));
            }
        }

        let mut normalized = Map::new();

        for field in &self.fields {
            match input.get(field.name) {
                None | Some(Value::Null) => {
                    if field.required {
                        return Err(Error::Validation(format!(
                            "missing required field '{}'",
                            field.name
                        )));
                    }
                    if let Some(default) = &field.default {
                        normalized.insert(field.name.to_string(), default.clone());
                    }
                }
                Some(value) => {
                    field.validate_value(value)?;
                    normalized.insert(field.name.to_string(), value.clone());
                }
            }
        }

        Ok(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn contract() -> ModuleSpec {
        ModuleSpec::new(&["Test contract."])
            .field(
                FieldSpec::new("state", FieldType::String, "State.")
                    .required()
                    .choices(&["present", "absent"]),
            )
            .field(FieldSpec::new("count", FieldType::Int, "Count.").default(json!(1)))
            .field(
                FieldSpec::new("lines", FieldType::List, "Lines.")
                    .element_type(FieldType::String)
                    .default(json!([])),
            )
    }

    #[test]
    fn validate_fills_defaults() {
        let normalized = contract().validate(json!({"state": "present"})).unwrap();

        assert_eq!(normalized["state"], json!("present"));
        assert_eq!(normalized["count"], json!(1));
        assert_eq!(normalized["lines"], json!([]));
    }

    #[test]
    fn validate_keeps_supplied_values() {
        let normalized = contract()
            .validate(json!({"state": "absent", "count": 3, "lines": ["a"]}))
            .unwrap();

        assert_eq!(normalized["count"], json!(3));
        assert_eq!(normalized["lines"], json!(["a"]));
    }

    #[test]
    fn validate_rejects_unknown_field() {
        let err = contract()
            .validate(json!({"state": "present", "bogus": 1}))
            .unwrap_err();
        assert!(err.to_string().contains("unknown field 'bogus'"));
    }

    #[test]
    fn validate_rejects_missing_required() {
        let err = contract().validate(json!({"count": 2})).unwrap_err();
        assert!(err.to_string().contains("missing required field 'state'"));
    }

    #[test]
    fn validate_treats_null_as_absent() {
        let err = contract().validate(json!({"state": null})).unwrap_err();
        assert!(err.to_string().contains("missing required field 'state'"));

        let normalized = contract()
            .validate(json!({"state": "present", "count": null}))
            .unwrap();
        assert_eq!(normalized["count"], json!(1));
    }

    #[test]
    fn validate_rejects_out_of_choice_value() {
        let err = contract().validate(json!({"state": "latest"})).unwrap_err();
        assert!(err.to_string().contains("must be one of"));
    }

    #[test]
    fn validate_rejects_type_mismatch() {
        let err = contract().validate(json!({"state": 5})).unwrap_err();
        assert!(err.to_string().contains("must be a string"));
    }

    #[test]
    fn validate_rejects_bad_list_element() {
        let err = contract()
            .validate(json!({"state": "present", "lines": [1, 2]}))
            .unwrap_err();
        assert!(err.to_string().contains("only string elements"));
    }

    #[test]
    fn validate_rejects_non_object_input() {
        let err = contract().validate(json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("JSON object"));
    }
}
