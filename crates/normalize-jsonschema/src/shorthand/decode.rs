//! Decoding of a single pipe-delimited shorthand string.
//!
//! Grammar: `head|token|token...` where the head is a scalar type name,
//! `enum:a,b,c`, `Type[]` for arrays, or a (possibly namespaced) type name
//! that becomes a `$ref`. A bare `null` segment marks the result nullable.

use super::token::parse_validation_token;
use crate::config::{NAMESPACE_KEY, VO_NAMESPACE_KEY};
use crate::error::Result;
use serde_json::{Map, Value};

const SCALAR_TYPES: [&str; 4] = ["string", "integer", "number", "boolean"];
const ARRAY_SUFFIX: &str = "[]";
const ENUM_PREFIX: &str = "enum:";
const NULL_SEGMENT: &str = "null";

/// Prefix of every reference produced by the shorthand.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

enum Head<'a> {
    Scalar(&'a str),
    Enum(&'a str),
    Reference {
        namespace: Option<&'a str>,
        type_name: &'a str,
    },
}

impl<'a> Head<'a> {
    fn parse(head: &'a str) -> Self {
        if head.is_empty() {
            return Head::Scalar("string");
        }
        if let Some(values) = head.strip_prefix(ENUM_PREFIX) {
            return Head::Enum(values);
        }
        if SCALAR_TYPES.contains(&head) {
            return Head::Scalar(head);
        }
        match head.rsplit_once('/') {
            Some((namespace, type_name)) => Head::Reference {
                namespace: Some(if namespace.is_empty() { "/" } else { namespace }),
                type_name,
            },
            None => Head::Reference {
                namespace: None,
                type_name: head,
            },
        }
    }
}

/// Decode one shorthand string into a canonical schema fragment.
///
/// An empty head means `string`.
///
/// `custom` is the carrier of the enclosing object; its `voNamespace` is the
/// fallback namespace when the string declares none.
pub fn decode_shorthand(shorthand: &str, custom: &Map<String, Value>) -> Result<Value> {
    let vo_namespace = custom.get(VO_NAMESPACE_KEY).and_then(Value::as_str);

    let mut segments = shorthand.split('|');
    let head = segments.next().unwrap_or_default();
    let tail: Vec<&str> = segments.collect();

    if let Some(item_head) = head.strip_suffix(ARRAY_SUFFIX) {
        let item_shorthand = std::iter::once(item_head)
            .chain(tail.iter().copied())
            .collect::<Vec<_>>()
            .join("|");
        let items = decode_shorthand(&item_shorthand, custom)?;

        let mut schema = Map::new();
        schema.insert("type".into(), Value::String("array".into()));
        schema.insert("items".into(), items);
        if let Some(vo) = vo_namespace {
            schema.insert(NAMESPACE_KEY.into(), Value::String(vo.into()));
        }
        return Ok(Value::Object(schema));
    }

    let nullable = tail.contains(&NULL_SEGMENT);
    let mut validations = Vec::new();
    for token in tail.iter().filter(|t| **t != NULL_SEGMENT) {
        validations.push(parse_validation_token(token)?);
    }

    let token_namespace = validations
        .iter()
        .find(|(key, _)| key == NAMESPACE_KEY)
        .and_then(|(_, value)| value.as_str());

    let mut schema = Map::new();
    let head_namespace = match Head::parse(head) {
        Head::Scalar(type_name) => {
            let ty = if nullable {
                Value::Array(vec![type_name.into(), NULL_SEGMENT.into()])
            } else {
                Value::String(type_name.into())
            };
            schema.insert("type".into(), ty);
            None
        }
        Head::Enum(values) => {
            let mut members: Vec<Value> = values
                .split(',')
                .map(|v| Value::String(v.to_string()))
                .collect();
            if nullable {
                members.push(Value::Null);
            }
            schema.insert("enum".into(), Value::Array(members));
            None
        }
        Head::Reference {
            namespace,
            type_name,
        } => {
            let ref_namespace = namespace.or(token_namespace).or(vo_namespace);
            schema.insert(
                "$ref".into(),
                Value::String(reference_path(ref_namespace, type_name)),
            );
            if nullable {
                schema.insert("type".into(), Value::String(NULL_SEGMENT.into()));
            }
            namespace
        }
    };

    let namespace = head_namespace
        .or(token_namespace)
        .or(vo_namespace)
        .map(String::from);

    for (key, value) in validations {
        schema.insert(key, value);
    }
    if let Some(ns) = namespace {
        schema.insert(NAMESPACE_KEY.into(), Value::String(ns));
    }

    Ok(Value::Object(schema))
}

/// Build `#/definitions/<namespace>/<type>`; the root namespace is omitted.
pub fn reference_path(namespace: Option<&str>, type_name: &str) -> String {
    match namespace.map(|ns| ns.trim_matches('/')) {
        Some(ns) if !ns.is_empty() => format!("{DEFINITIONS_PREFIX}{ns}/{type_name}"),
        _ => format!("{DEFINITIONS_PREFIX}{type_name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(s: &str) -> Value {
        decode_shorthand(s, &Map::new()).unwrap()
    }

    fn decode_with(s: &str, custom: Value) -> Value {
        let Value::Object(custom) = custom else {
            panic!("custom must be an object")
        };
        decode_shorthand(s, &custom).unwrap()
    }

    #[test]
    fn scalar_heads() {
        for ty in SCALAR_TYPES {
            assert_eq!(decode(ty), json!({"type": ty}));
            assert_eq!(decode(&format!("{ty}|null")), json!({"type": [ty, "null"]}));
        }
    }

    #[test]
    fn empty_is_string() {
        assert_eq!(decode(""), json!({"type": "string"}));
    }

    #[test]
    fn enum_head() {
        assert_eq!(decode("enum:a,b,c"), json!({"enum": ["a", "b", "c"]}));
        assert_eq!(decode("enum:a,b|null"), json!({"enum": ["a", "b", null]}));
    }

    #[test]
    fn reference_head() {
        assert_eq!(decode("Foo"), json!({"$ref": "#/definitions/Foo"}));
        assert_eq!(
            decode("Foo|null"),
            json!({"$ref": "#/definitions/Foo", "type": "null"})
        );
    }

    #[test]
    fn array_head() {
        assert_eq!(
            decode("Foo[]"),
            json!({"type": "array", "items": {"$ref": "#/definitions/Foo"}})
        );
        assert_eq!(
            decode("string[]|minLength:1"),
            json!({"type": "array", "items": {"type": "string", "minLength": 1}})
        );
    }

    #[test]
    fn validators_are_merged() {
        assert_eq!(
            decode("string|null|format:email|maxLength:255"),
            json!({"type": ["string", "null"], "format": "email", "maxLength": 255})
        );
        assert_eq!(
            decode("boolean|default:false"),
            json!({"type": "boolean", "default": false})
        );
    }

    #[test]
    fn null_segment_anywhere_in_tail() {
        assert_eq!(
            decode("number|minimum:0.5|null"),
            json!({"type": ["number", "null"], "minimum": 0.5})
        );
    }

    #[test]
    fn head_namespace_becomes_ref_path() {
        assert_eq!(
            decode("/Order/Address"),
            json!({"$ref": "#/definitions/Order/Address", "namespace": "/Order"})
        );
        assert_eq!(
            decode("Order/Address"),
            json!({"$ref": "#/definitions/Order/Address", "namespace": "Order"})
        );
        assert_eq!(
            decode("/Address"),
            json!({"$ref": "#/definitions/Address", "namespace": "/"})
        );
    }

    #[test]
    fn token_namespace_applies_to_ref() {
        assert_eq!(
            decode("Address|namespace:Order"),
            json!({"$ref": "#/definitions/Order/Address", "namespace": "Order"})
        );
    }

    #[test]
    fn head_namespace_wins_over_token() {
        assert_eq!(
            decode("/Order/Address|namespace:/Billing"),
            json!({"$ref": "#/definitions/Order/Address", "namespace": "/Order"})
        );
    }

    #[test]
    fn vo_namespace_is_fallback() {
        let custom = json!({"namespace": "/Order", "voNamespace": "/Shipping"});

        assert_eq!(
            decode_with("string", custom.clone()),
            json!({"type": "string", "namespace": "/Shipping"})
        );
        assert_eq!(
            decode_with("string|namespace:Payment", custom.clone()),
            json!({"type": "string", "namespace": "Payment"})
        );
        assert_eq!(
            decode_with("Address", custom.clone()),
            json!({"$ref": "#/definitions/Shipping/Address", "namespace": "/Shipping"})
        );
        assert_eq!(
            decode_with("", custom),
            json!({"type": "string", "namespace": "/Shipping"})
        );
    }

    #[test]
    fn array_carries_vo_namespace_and_items_keep_their_own() {
        let custom = json!({"voNamespace": "/Shipping"});
        assert_eq!(
            decode_with("/Order/Address[]", custom),
            json!({
                "type": "array",
                "items": {"$ref": "#/definitions/Order/Address", "namespace": "/Order"},
                "namespace": "/Shipping"
            })
        );
    }

    #[test]
    fn bad_token_fails() {
        assert!(decode_shorthand("string|minLength", &Map::new()).is_err());
    }
}
