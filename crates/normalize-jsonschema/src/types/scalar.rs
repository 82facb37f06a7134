//! Scalar nodes: `string`, `number`, `integer`, `boolean`.
//!
//! The four variants share one struct, parameterised by the keyword table of
//! their bounds ([`ScalarKind`]). Keywords outside the shared allow-list and
//! the kind's own table land in `custom`.

use super::keyword;
use super::{
    CustomData, CustomSupport, NullableAware, RequiredAware, TYPE_BOOLEAN, TYPE_INTEGER,
    TYPE_NUMBER, TYPE_STRING, TitleAware,
};
use crate::error::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt::Debug;

/// Type-specific keywords of a scalar node.
pub trait ScalarKind: Debug + Default + Clone + PartialEq + Serialize {
    /// JSON type keyword this kind is built from.
    const TYPE: &'static str;

    /// Store `keyword` if it belongs to this kind. `Ok(false)` sends it to custom data.
    fn accept(&mut self, keyword: &str, value: &Value, name: &str) -> Result<bool>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalarType<K: ScalarKind> {
    pub(crate) name: String,
    pub(crate) is_required: bool,
    pub(crate) is_nullable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) format: Option<String>,
    #[serde(rename = "const", skip_serializing_if = "Option::is_none")]
    pub(crate) const_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) default: Option<Value>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub(crate) enum_values: Option<Vec<Value>>,
    #[serde(flatten)]
    pub(crate) constraints: K,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub(crate) custom: CustomData,
}

pub type StringType = ScalarType<StringConstraints>;
pub type NumberType = ScalarType<NumberConstraints>;
pub type IntegerType = ScalarType<IntegerConstraints>;
pub type BooleanType = ScalarType<BooleanConstraints>;

impl<K: ScalarKind> ScalarType<K> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_required: false,
            is_nullable: false,
            title: None,
            format: None,
            const_value: None,
            default: None,
            enum_values: None,
            constraints: K::default(),
            custom: Map::new(),
        }
    }

    /// Build from a fragment whose `type` is exactly `K::TYPE`.
    pub fn from_fragment(fragment: &Map<String, Value>, name: &str) -> Result<Self> {
        keyword::check_type(fragment, K::TYPE, name)?;

        let mut node = Self::new(name);
        for (key, value) in fragment {
            match key.as_str() {
                "type" => {}
                "title" => node.title = Some(keyword::string(key, value, name)?),
                "format" => node.format = Some(keyword::string(key, value, name)?),
                "const" => node.const_value = Some(value.clone()),
                "default" => node.default = Some(value.clone()),
                "enum" => node.enum_values = Some(keyword::array(key, value, name)?.clone()),
                _ => {
                    if !node.constraints.accept(key, value, name)? {
                        node.custom.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        Ok(node)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn const_value(&self) -> Option<&Value> {
        self.const_value.as_ref()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn enum_values(&self) -> Option<&[Value]> {
        self.enum_values.as_deref()
    }

    pub fn constraints(&self) -> &K {
        &self.constraints
    }
}

impl<K: ScalarKind> RequiredAware for ScalarType<K> {
    fn is_required(&self) -> bool {
        self.is_required
    }

    fn set_required(&mut self, required: bool) {
        self.is_required = required;
    }
}

impl<K: ScalarKind> NullableAware for ScalarType<K> {
    fn is_nullable(&self) -> bool {
        self.is_nullable
    }

    fn set_nullable(&mut self, nullable: bool) {
        self.is_nullable = nullable;
    }
}

impl<K: ScalarKind> TitleAware for ScalarType<K> {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

impl<K: ScalarKind> CustomSupport for ScalarType<K> {
    fn custom(&self) -> &CustomData {
        &self.custom
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringConstraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl ScalarKind for StringConstraints {
    const TYPE: &'static str = TYPE_STRING;

    fn accept(&mut self, key: &str, value: &Value, name: &str) -> Result<bool> {
        match key {
            "minLength" => self.min_length = Some(keyword::unsigned(key, value, name)?),
            "maxLength" => self.max_length = Some(keyword::unsigned(key, value, name)?),
            "pattern" => self.pattern = Some(keyword::string(key, value, name)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Bounds of a `number` node.
///
/// Only the boolean (draft-04) form of `exclusiveMinimum`/`exclusiveMaximum`
/// is modelled; the numeric form is kept as custom data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberConstraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<f64>,
}

impl ScalarKind for NumberConstraints {
    const TYPE: &'static str = TYPE_NUMBER;

    fn accept(&mut self, key: &str, value: &Value, name: &str) -> Result<bool> {
        match key {
            "minimum" => self.minimum = Some(keyword::number(key, value, name)?),
            "maximum" => self.maximum = Some(keyword::number(key, value, name)?),
            "multipleOf" => self.multiple_of = Some(keyword::number(key, value, name)?),
            "exclusiveMinimum" if value.is_boolean() => {
                self.exclusive_minimum = Some(keyword::boolean(key, value, name)?)
            }
            "exclusiveMaximum" if value.is_boolean() => {
                self.exclusive_maximum = Some(keyword::boolean(key, value, name)?)
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Bounds of an `integer` node. Same `exclusive*` rule as [`NumberConstraints`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegerConstraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<i64>,
}

impl ScalarKind for IntegerConstraints {
    const TYPE: &'static str = TYPE_INTEGER;

    fn accept(&mut self, key: &str, value: &Value, name: &str) -> Result<bool> {
        match key {
            "minimum" => self.minimum = Some(keyword::integer(key, value, name)?),
            "maximum" => self.maximum = Some(keyword::integer(key, value, name)?),
            "multipleOf" => self.multiple_of = Some(keyword::integer(key, value, name)?),
            "exclusiveMinimum" if value.is_boolean() => {
                self.exclusive_minimum = Some(keyword::boolean(key, value, name)?)
            }
            "exclusiveMaximum" if value.is_boolean() => {
                self.exclusive_maximum = Some(keyword::boolean(key, value, name)?)
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BooleanConstraints {}

impl ScalarKind for BooleanConstraints {
    const TYPE: &'static str = TYPE_BOOLEAN;

    fn accept(&mut self, _key: &str, _value: &Value, _name: &str) -> Result<bool> {
        Ok(false)
    }
}
