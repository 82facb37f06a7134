//! Shorthand notation to canonical JSON Schema.
//!
//! A shorthand document maps property names to shorthand strings or nested
//! documents:
//!
//! ```text
//! {
//!   "$title": "Prospect",
//!   "name": "string|minLength:1",
//!   "age?": "integer|minimum:0",
//!   "address": { "zip": "string", "city": "string" },
//!   "tags": "string[]"
//! }
//! ```
//!
//! Keys ending in `?` are optional. `$ref` and `$items` must stand alone and
//! turn the whole document into a reference or an array. `$title` sets the
//! schema title.

mod decode;
mod token;

pub use decode::{DEFINITIONS_PREFIX, decode_shorthand, reference_path};
pub use token::parse_validation_token;

use crate::config::{NAMESPACE_KEY, VO_NAMESPACE_KEY};
use crate::error::{Error, Result, ShorthandErrorKind};
use serde_json::{Map, Value};

const OPTIONAL_SUFFIX: char = '?';
const REF_KEY: &str = "$ref";
const ITEMS_KEY: &str = "$items";
const TITLE_KEY: &str = "$title";

/// Translate a shorthand document (object or bare string) into a schema.
pub fn shorthand_to_schema(input: &Value) -> Result<Value> {
    shorthand_to_schema_with(input, &Map::new())
}

/// Translate a shorthand document, merging `custom` into the root object schema.
pub fn shorthand_to_schema_with(input: &Value, custom: &Map<String, Value>) -> Result<Value> {
    match input {
        Value::String(shorthand) => decode_shorthand(shorthand, custom),
        Value::Object(document) => translate_object(document, custom),
        other => Err(Error::shorthand(ShorthandErrorKind::InvalidInput, other)),
    }
}

fn translate_object(document: &Map<String, Value>, custom: &Map<String, Value>) -> Result<Value> {
    let as_value = || Value::Object(document.clone());

    let mut properties = Map::new();
    let mut required = Vec::new();
    let mut title = None;

    for (key, definition) in document {
        let (property, optional) = match key.strip_suffix(OPTIONAL_SUFFIX) {
            Some(stripped) => (stripped, true),
            None => (key.as_str(), false),
        };

        if property.is_empty() {
            return Err(Error::shorthand(
                ShorthandErrorKind::EmptyProperty,
                &as_value(),
            ));
        }

        if !optional {
            match property {
                REF_KEY => return top_level_reference(document, definition),
                ITEMS_KEY => return top_level_array(document, definition, custom),
                TITLE_KEY => {
                    title = Some(definition.clone());
                    continue;
                }
                _ => required.push(Value::String(property.to_string())),
            }
        }

        tracing::trace!(property, optional, "translating shorthand property");

        let schema = match definition {
            Value::Object(nested) => translate_object(nested, &nested_custom(custom))?,
            Value::String(shorthand) => decode_shorthand(shorthand, custom)?,
            _ => {
                return Err(Error::shorthand(
                    ShorthandErrorKind::CannotParseProperty(property.to_string()),
                    &as_value(),
                ));
            }
        };
        properties.insert(property.to_string(), schema);
    }

    let mut schema = Map::new();
    schema.insert("type".into(), Value::String("object".into()));
    schema.insert("properties".into(), Value::Object(properties));
    schema.insert("required".into(), Value::Array(required));
    schema.insert("additionalProperties".into(), Value::Bool(false));
    if let Some(title) = title {
        schema.insert("title".into(), title);
    }
    for (key, value) in custom {
        if !schema.contains_key(key) {
            schema.insert(key.clone(), value.clone());
        }
    }

    Ok(Value::Object(schema))
}

fn top_level_reference(document: &Map<String, Value>, definition: &Value) -> Result<Value> {
    if document.len() > 1 {
        return Err(Error::shorthand(
            ShorthandErrorKind::RefWithOtherProperties,
            &Value::Object(document.clone()),
        ));
    }
    let Some(target) = definition.as_str() else {
        return Err(Error::shorthand(
            ShorthandErrorKind::RefNotString,
            &Value::Object(document.clone()),
        ));
    };

    let target = target.strip_prefix(DEFINITIONS_PREFIX).unwrap_or(target);
    let mut schema = Map::new();
    schema.insert(
        REF_KEY.into(),
        Value::String(format!("{DEFINITIONS_PREFIX}{target}")),
    );
    Ok(Value::Object(schema))
}

fn top_level_array(
    document: &Map<String, Value>,
    definition: &Value,
    custom: &Map<String, Value>,
) -> Result<Value> {
    if document.len() > 1 {
        return Err(Error::shorthand(
            ShorthandErrorKind::ItemsWithOtherProperties,
            &Value::Object(document.clone()),
        ));
    }
    let Some(items) = definition.as_str() else {
        return Err(Error::shorthand(
            ShorthandErrorKind::ItemsNotString,
            &Value::Object(document.clone()),
        ));
    };

    if items.ends_with("[]") {
        decode_shorthand(items, custom)
    } else {
        decode_shorthand(&format!("{items}[]"), custom)
    }
}

/// Nested objects are value objects: they live in the `voNamespace` when one is set.
fn nested_custom(custom: &Map<String, Value>) -> Map<String, Value> {
    let mut nested = custom.clone();
    if let Some(vo) = custom.get(VO_NAMESPACE_KEY) {
        nested.insert(NAMESPACE_KEY.into(), vo.clone());
    }
    nested
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(properties: Value, required: &[&str]) -> Value {
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }

    #[test]
    fn bare_string() {
        assert_eq!(
            shorthand_to_schema(&json!("string|format:uuid|namespace:MyService")).unwrap(),
            json!({"type": "string", "format": "uuid", "namespace": "MyService"})
        );
    }

    #[test]
    fn optional_marker() {
        let schema =
            shorthand_to_schema(&json!({"name": "string|minLength:1", "age?": "integer|minimum:0"}))
                .unwrap();

        assert_eq!(
            schema,
            object(
                json!({
                    "name": {"type": "string", "minLength": 1},
                    "age": {"type": "integer", "minimum": 0},
                }),
                &["name"]
            )
        );
    }

    #[test]
    fn title_is_not_a_property() {
        let schema = shorthand_to_schema(&json!({"$title": "Person", "name": "string"})).unwrap();
        assert_eq!(schema["title"], "Person");
        assert_eq!(schema["required"], json!(["name"]));
        assert!(schema["properties"].get("$title").is_none());
    }

    #[test]
    fn top_level_reference_variants() {
        for variant in ["Profile", "#/definitions/Profile"] {
            assert_eq!(
                shorthand_to_schema(&json!({"$ref": variant})).unwrap(),
                json!({"$ref": "#/definitions/Profile"})
            );
        }
    }

    #[test]
    fn top_level_array_variants() {
        for variant in ["Profile", "Profile[]"] {
            assert_eq!(
                shorthand_to_schema(&json!({"$items": variant})).unwrap(),
                json!({"type": "array", "items": {"$ref": "#/definitions/Profile"}})
            );
        }
    }

    #[test]
    fn ref_with_siblings_fails() {
        let doc = json!({"$ref": "Profile", "name": "string"});
        let err = shorthand_to_schema(&doc).unwrap_err();
        assert!(matches!(
            &err,
            Error::InvalidShorthand { kind: ShorthandErrorKind::RefWithOtherProperties, .. }
        ));
        assert_eq!(err.offending_shorthand(), Some(&doc));
    }

    #[test]
    fn items_with_siblings_fails() {
        let err = shorthand_to_schema(&json!({"name": "string", "$items": "Profile"})).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidShorthand { kind: ShorthandErrorKind::ItemsWithOtherProperties, .. }
        ));
    }

    #[test]
    fn non_string_ref_and_items_fail() {
        let err = shorthand_to_schema(&json!({"$ref": 1})).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidShorthand { kind: ShorthandErrorKind::RefNotString, .. }
        ));

        let err = shorthand_to_schema(&json!({"$items": ["a"]})).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidShorthand { kind: ShorthandErrorKind::ItemsNotString, .. }
        ));
    }

    #[test]
    fn empty_property_fails() {
        for doc in [json!({"": "string"}), json!({"?": "string"})] {
            let err = shorthand_to_schema(&doc).unwrap_err();
            assert!(matches!(
                err,
                Error::InvalidShorthand { kind: ShorthandErrorKind::EmptyProperty, .. }
            ));
        }
    }

    #[test]
    fn non_string_property_value_fails() {
        let err = shorthand_to_schema(&json!({"age": 42})).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidShorthand {
                kind: ShorthandErrorKind::CannotParseProperty(ref p),
                ..
            } if p == "age"
        ));
    }

    #[test]
    fn nested_objects_recurse() {
        let schema = shorthand_to_schema(&json!({
            "address": {"zip": "string|minLength:1", "city?": "string"},
        }))
        .unwrap();

        assert_eq!(
            schema["properties"]["address"],
            object(
                json!({
                    "zip": {"type": "string", "minLength": 1},
                    "city": {"type": "string"},
                }),
                &["zip"]
            )
        );
    }

    #[test]
    fn custom_data_on_root_and_nested_objects() {
        let custom = json!({"namespace": "/Order", "voNamespace": "/Shipping"});
        let Value::Object(custom) = custom else { unreachable!() };

        let schema = shorthand_to_schema_with(
            &json!({"order": {"billing": "Address"}, "name": "string"}),
            &custom,
        )
        .unwrap();

        assert_eq!(schema["namespace"], "/Order");
        assert_eq!(schema["voNamespace"], "/Shipping");

        let order = &schema["properties"]["order"];
        assert_eq!(order["namespace"], "/Shipping");
        assert_eq!(order["voNamespace"], "/Shipping");
        assert_eq!(
            order["properties"]["billing"],
            json!({"$ref": "#/definitions/Shipping/Address", "namespace": "/Shipping"})
        );
        assert_eq!(
            schema["properties"]["name"],
            json!({"type": "string", "namespace": "/Shipping"})
        );
    }

    #[test]
    fn invalid_input_type() {
        let err = shorthand_to_schema(&json!(12)).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidShorthand { kind: ShorthandErrorKind::InvalidInput, .. }
        ));
    }
}
