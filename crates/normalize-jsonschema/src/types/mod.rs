//! The type model.
//!
//! A schema position is described by a [`TypeSet`]: an ordered union of
//! [`TypeNode`]s. Each node variant opts into the capabilities it supports
//! ([`RequiredAware`], [`NullableAware`], [`TitleAware`], [`CustomSupport`]).
//!
//! ```text
//! TypeSet ─┬─ String / Number / Integer / Boolean   (scalars)
//!          ├─ Object     properties, definitions, additionalProperties
//!          ├─ Array      items, contains, additionalItems, definitions
//!          ├─ Reference  $ref + owned clone of the resolved target
//!          ├─ Of         allOf / anyOf / oneOf members
//!          ├─ Not        negated type set
//!          ├─ Const      single literal
//!          └─ Mixed      no constraints
//! ```

mod array;
mod constant;
pub(crate) mod keyword;
mod mixed;
mod not;
mod object;
mod of;
mod reference;
mod scalar;
mod type_set;

pub use array::ArrayType;
pub use constant::ConstType;
pub use mixed::MixedType;
pub use not::NotType;
pub use object::{AdditionalProperties, ObjectType};
pub use of::{OfKind, OfType};
pub use reference::ReferenceType;
pub use scalar::{
    BooleanConstraints, BooleanType, IntegerConstraints, IntegerType, NumberConstraints,
    NumberType, ScalarKind, ScalarType, StringConstraints, StringType,
};
pub use type_set::TypeSet;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// Definitions table: name to type set, in declaration order.
pub type Definitions = IndexMap<String, TypeSet>;

/// Keywords a node does not model, kept verbatim.
pub type CustomData = Map<String, Value>;

pub const TYPE_REF: &str = "$ref";
pub const TYPE_ARRAY: &str = "array";
pub const TYPE_BOOLEAN: &str = "boolean";
pub const TYPE_INTEGER: &str = "integer";
pub const TYPE_NUMBER: &str = "number";
pub const TYPE_OBJECT: &str = "object";
pub const TYPE_STRING: &str = "string";
pub const TYPE_NOT: &str = "not";
pub const TYPE_CONST: &str = "const";
pub const TYPE_MIXED: &str = "mixed";

/// Well-known `format` values.
pub mod format {
    pub const BINARY: &str = "base64";
    pub const DATE: &str = "date";
    pub const DATETIME: &str = "date-time";
    pub const DURATION: &str = "duration";
    pub const INT32: &str = "int32";
    pub const INT64: &str = "int64";
    pub const TIME: &str = "time";
    pub const URI: &str = "uri";
}

/// Nodes that track whether their position is required.
pub trait RequiredAware {
    fn is_required(&self) -> bool;
    fn set_required(&mut self, required: bool);
}

/// Nodes that may additionally accept `null`.
pub trait NullableAware {
    fn is_nullable(&self) -> bool;
    fn set_nullable(&mut self, nullable: bool);
}

/// Nodes that carry a `title`.
pub trait TitleAware {
    fn title(&self) -> Option<&str>;
}

/// Nodes that keep unrecognised keywords (e.g. `namespace`).
pub trait CustomSupport {
    fn custom(&self) -> &CustomData;
}

/// One variant of a schema position's type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeNode {
    String(StringType),
    Number(NumberType),
    Integer(IntegerType),
    Boolean(BooleanType),
    Object(ObjectType),
    Array(ArrayType),
    Reference(ReferenceType),
    Of(OfType),
    Not(NotType),
    Const(ConstType),
    Mixed(MixedType),
}

impl TypeNode {
    /// Position-dependent name; empty for anonymous positions such as array items.
    pub fn name(&self) -> &str {
        match self {
            TypeNode::String(t) => t.name(),
            TypeNode::Number(t) => t.name(),
            TypeNode::Integer(t) => t.name(),
            TypeNode::Boolean(t) => t.name(),
            TypeNode::Object(t) => t.name(),
            TypeNode::Array(t) => t.name(),
            TypeNode::Reference(t) => t.name(),
            TypeNode::Of(t) => t.name(),
            TypeNode::Not(t) => t.name(),
            TypeNode::Const(t) => t.name(),
            TypeNode::Mixed(t) => t.name(),
        }
    }

    /// JSON Schema keyword identifying the variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            TypeNode::String(_) => TYPE_STRING,
            TypeNode::Number(_) => TYPE_NUMBER,
            TypeNode::Integer(_) => TYPE_INTEGER,
            TypeNode::Boolean(_) => TYPE_BOOLEAN,
            TypeNode::Object(_) => TYPE_OBJECT,
            TypeNode::Array(_) => TYPE_ARRAY,
            TypeNode::Reference(_) => TYPE_REF,
            TypeNode::Of(t) => t.kind().keyword(),
            TypeNode::Not(_) => TYPE_NOT,
            TypeNode::Const(_) => TYPE_CONST,
            TypeNode::Mixed(_) => TYPE_MIXED,
        }
    }

    pub fn as_required(&self) -> &dyn RequiredAware {
        match self {
            TypeNode::String(t) => t,
            TypeNode::Number(t) => t,
            TypeNode::Integer(t) => t,
            TypeNode::Boolean(t) => t,
            TypeNode::Object(t) => t,
            TypeNode::Array(t) => t,
            TypeNode::Reference(t) => t,
            TypeNode::Of(t) => t,
            TypeNode::Not(t) => t,
            TypeNode::Const(t) => t,
            TypeNode::Mixed(t) => t,
        }
    }

    pub fn as_required_mut(&mut self) -> &mut dyn RequiredAware {
        match self {
            TypeNode::String(t) => t,
            TypeNode::Number(t) => t,
            TypeNode::Integer(t) => t,
            TypeNode::Boolean(t) => t,
            TypeNode::Object(t) => t,
            TypeNode::Array(t) => t,
            TypeNode::Reference(t) => t,
            TypeNode::Of(t) => t,
            TypeNode::Not(t) => t,
            TypeNode::Const(t) => t,
            TypeNode::Mixed(t) => t,
        }
    }

    /// Only scalars, objects, arrays and references can be nullable.
    pub fn as_nullable(&self) -> Option<&dyn NullableAware> {
        match self {
            TypeNode::String(t) => Some(t),
            TypeNode::Number(t) => Some(t),
            TypeNode::Integer(t) => Some(t),
            TypeNode::Boolean(t) => Some(t),
            TypeNode::Object(t) => Some(t),
            TypeNode::Array(t) => Some(t),
            TypeNode::Reference(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_nullable_mut(&mut self) -> Option<&mut dyn NullableAware> {
        match self {
            TypeNode::String(t) => Some(t),
            TypeNode::Number(t) => Some(t),
            TypeNode::Integer(t) => Some(t),
            TypeNode::Boolean(t) => Some(t),
            TypeNode::Object(t) => Some(t),
            TypeNode::Array(t) => Some(t),
            TypeNode::Reference(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_titled(&self) -> Option<&dyn TitleAware> {
        match self {
            TypeNode::String(t) => Some(t),
            TypeNode::Number(t) => Some(t),
            TypeNode::Integer(t) => Some(t),
            TypeNode::Boolean(t) => Some(t),
            TypeNode::Object(t) => Some(t),
            TypeNode::Array(t) => Some(t),
            TypeNode::Reference(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_custom(&self) -> Option<&dyn CustomSupport> {
        match self {
            TypeNode::String(t) => Some(t),
            TypeNode::Number(t) => Some(t),
            TypeNode::Integer(t) => Some(t),
            TypeNode::Boolean(t) => Some(t),
            TypeNode::Object(t) => Some(t),
            TypeNode::Array(t) => Some(t),
            TypeNode::Reference(t) => Some(t),
            TypeNode::Of(t) => Some(t),
            TypeNode::Not(t) => Some(t),
            TypeNode::Const(t) => Some(t),
            TypeNode::Mixed(_) => None,
        }
    }

    pub fn is_required(&self) -> bool {
        self.as_required().is_required()
    }

    pub fn set_required(&mut self, required: bool) {
        self.as_required_mut().set_required(required);
    }

    /// `false` for variants that cannot be nullable.
    pub fn is_nullable(&self) -> bool {
        self.as_nullable().is_some_and(|n| n.is_nullable())
    }

    /// No-op for variants that cannot be nullable.
    pub fn set_nullable(&mut self, nullable: bool) {
        if let Some(node) = self.as_nullable_mut() {
            node.set_nullable(nullable);
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.as_titled().and_then(|t| t.title())
    }

    pub fn custom(&self) -> Option<&CustomData> {
        self.as_custom().map(|c| c.custom())
    }

    pub fn as_string(&self) -> Option<&StringType> {
        match self {
            TypeNode::String(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&NumberType> {
        match self {
            TypeNode::Number(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<&IntegerType> {
        match self {
            TypeNode::Integer(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<&BooleanType> {
        match self {
            TypeNode::Boolean(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            TypeNode::Object(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayType> {
        match self {
            TypeNode::Array(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&ReferenceType> {
        match self {
            TypeNode::Reference(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_of(&self) -> Option<&OfType> {
        match self {
            TypeNode::Of(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_not(&self) -> Option<&NotType> {
        match self {
            TypeNode::Not(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_const(&self) -> Option<&ConstType> {
        match self {
            TypeNode::Const(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_mixed(&self) -> Option<&MixedType> {
        match self {
            TypeNode::Mixed(t) => Some(t),
            _ => None,
        }
    }
}
