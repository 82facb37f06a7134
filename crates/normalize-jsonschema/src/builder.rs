//! Schema fragment to [`TypeSet`] dispatch.

use crate::config::{BuilderConfig, ShorthandConfig};
use crate::error::{Error, Result};
use crate::resolve::Resolver;
use crate::shorthand::shorthand_to_schema_with;
use crate::types::{
    ArrayType, BooleanType, ConstType, Definitions, IntegerType, MixedType, NotType, NumberType,
    ObjectType, OfKind, OfType, ReferenceType, StringType, TYPE_ARRAY, TYPE_BOOLEAN, TYPE_CONST,
    TYPE_INTEGER, TYPE_NOT, TYPE_NUMBER, TYPE_OBJECT, TYPE_REF, TYPE_STRING, TypeNode, TypeSet,
};
use crate::types::{NullableAware, keyword};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Keys that make an untyped fragment an implicit object.
const OBJECT_EVIDENCE: [&str; 4] = [
    "properties",
    "additionalProperties",
    "required",
    "patternProperties",
];

const NULL_TYPE: &str = "null";

/// Builds resolved type trees from canonical schema fragments.
#[derive(Debug, Clone, Default)]
pub struct TypeBuilder {
    config: BuilderConfig,
}

impl TypeBuilder {
    pub fn new(config: BuilderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Build the type set of `fragment` and resolve every `$ref` in it.
    ///
    /// `ancestors` are definitions visible from outside the fragment; tables
    /// declared inside it shadow them.
    pub fn build(
        &self,
        fragment: &Value,
        name: Option<&str>,
        ancestors: Option<&Definitions>,
    ) -> Result<TypeSet> {
        let mut set = self.construct(fragment, name.unwrap_or_default())?;
        Resolver::new(self.config.max_resolve_depth()).resolve_root(&mut set, ancestors);
        Ok(set)
    }

    /// Translate shorthand with the given namespaces, then [`build`](Self::build) it.
    pub fn from_shorthand(
        &self,
        input: &Value,
        name: Option<&str>,
        shorthand: &ShorthandConfig,
    ) -> Result<TypeSet> {
        let schema = shorthand_to_schema_with(input, &shorthand.custom_data())?;
        self.build(&schema, name, None)
    }

    /// Build without resolving references.
    pub(crate) fn construct(&self, fragment: &Value, name: &str) -> Result<TypeSet> {
        let Value::Object(fragment) = fragment else {
            return Err(Error::Unsupported(format!(
                "schema for \"{name}\" must be an object, found {fragment}"
            )));
        };

        match fragment.get("type") {
            Some(declared) => self.construct_declared(fragment, declared, name),
            None => self.construct_inferred(fragment, name),
        }
    }

    /// Build every definitions table the fragment declares, in configured key order.
    pub(crate) fn collect_definitions(
        &self,
        fragment: &Map<String, Value>,
        name: &str,
    ) -> Result<Definitions> {
        let mut definitions = Definitions::new();
        for key in self.config.definitions_keys() {
            let Some(table) = fragment.get(key) else {
                continue;
            };
            for (definition, schema) in keyword::object(key, table, name)? {
                let set = self.construct(schema, definition)?;
                definitions.insert(definition.clone(), set);
            }
        }
        if !definitions.is_empty() {
            tracing::debug!(container = name, count = definitions.len(), "collected definitions");
        }
        Ok(definitions)
    }

    fn construct_declared(
        &self,
        fragment: &Map<String, Value>,
        declared: &Value,
        name: &str,
    ) -> Result<TypeSet> {
        let listed: Vec<&str> = match declared {
            Value::String(ty) => vec![ty.as_str()],
            Value::Array(types) => types
                .iter()
                .map(|ty| {
                    ty.as_str().ok_or_else(|| {
                        Error::invalid_keyword("type", "a string or an array of strings", name)
                    })
                })
                .collect::<Result<_>>()?,
            _ => {
                return Err(Error::invalid_keyword(
                    "type",
                    "a string or an array of strings",
                    name,
                ));
            }
        };

        if listed.is_empty() {
            return Err(Error::Unsupported(format!(
                "empty \"type\" list for \"{name}\""
            )));
        }

        let nullable = listed.iter().any(|ty| ty.eq_ignore_ascii_case(NULL_TYPE));
        let concrete: Vec<&str> = listed
            .into_iter()
            .filter(|ty| !ty.eq_ignore_ascii_case(NULL_TYPE))
            .collect();

        if concrete.is_empty() {
            return self.construct_null(fragment, name);
        }

        let mut set = TypeSet::default();
        for ty in concrete {
            let single: Cow<'_, Map<String, Value>> = if declared.is_string() {
                Cow::Borrowed(fragment)
            } else {
                Cow::Owned(with_type(fragment, ty))
            };
            set.push(self.construct_node(&single, ty, name)?);
        }
        if nullable {
            set.set_nullable(true);
        }
        Ok(set)
    }

    /// `type: "null"` alone: a null literal, or a nullable reference if `$ref` is present.
    fn construct_null(&self, fragment: &Map<String, Value>, name: &str) -> Result<TypeSet> {
        if fragment.contains_key(TYPE_REF) {
            let mut reference = ReferenceType::from_fragment(fragment, name)?;
            reference.set_nullable(true);
            return Ok(TypeNode::Reference(reference).into());
        }

        let mut node = ConstType::new(name, Value::Null);
        node.custom = fragment.clone();
        node.custom.remove("type");
        Ok(TypeNode::Const(node).into())
    }

    fn construct_node(
        &self,
        fragment: &Map<String, Value>,
        ty: &str,
        name: &str,
    ) -> Result<TypeNode> {
        Ok(match ty {
            TYPE_STRING => TypeNode::String(StringType::from_fragment(fragment, name)?),
            TYPE_NUMBER => TypeNode::Number(NumberType::from_fragment(fragment, name)?),
            TYPE_INTEGER => TypeNode::Integer(IntegerType::from_fragment(fragment, name)?),
            TYPE_BOOLEAN => TypeNode::Boolean(BooleanType::from_fragment(fragment, name)?),
            TYPE_OBJECT => TypeNode::Object(ObjectType::from_fragment(fragment, name, self)?),
            TYPE_ARRAY => TypeNode::Array(ArrayType::from_fragment(fragment, name, self)?),
            other => {
                return Err(Error::Unsupported(format!(
                    "JSON schema type \"{other}\" is not implemented"
                )));
            }
        })
    }

    fn construct_inferred(&self, fragment: &Map<String, Value>, name: &str) -> Result<TypeSet> {
        if fragment.contains_key(TYPE_REF) {
            return Ok(TypeNode::Reference(ReferenceType::from_fragment(fragment, name)?).into());
        }

        for kind in OfKind::ALL {
            if fragment.contains_key(kind.keyword()) {
                return Ok(TypeNode::Of(OfType::from_fragment(fragment, kind, name, self)?).into());
            }
        }

        if fragment.contains_key(TYPE_NOT) {
            return Ok(TypeNode::Not(NotType::from_fragment(fragment, name, self)?).into());
        }

        if fragment.contains_key(TYPE_CONST) {
            return Ok(TypeNode::Const(ConstType::from_fragment(fragment, name)?).into());
        }

        if OBJECT_EVIDENCE.iter().any(|key| fragment.contains_key(*key)) {
            let object = with_type(fragment, TYPE_OBJECT);
            return Ok(TypeNode::Object(ObjectType::from_fragment(&object, name, self)?).into());
        }

        if fragment.is_empty() {
            return Ok(TypeNode::Mixed(MixedType::new(name)).into());
        }

        if let Some(members) = fragment.get("enum") {
            if self.config.infer_enum_type() {
                let (ty, nullable) = infer_enum_type(members, name)?;
                let mut node = self.construct_node(&with_type(fragment, ty), ty, name)?;
                if nullable {
                    node.set_nullable(true);
                }
                return Ok(node.into());
            }
        }

        Err(Error::MissingType {
            name: name.to_string(),
            fragment: Value::Object(fragment.clone()),
        })
    }
}

fn with_type(fragment: &Map<String, Value>, ty: &str) -> Map<String, Value> {
    let mut typed = fragment.clone();
    typed.insert("type".into(), Value::String(ty.into()));
    typed
}

/// Scalar type shared by all non-null enum members, and whether `null` is a member.
/// Integers and floats together widen to `number`.
fn infer_enum_type(members: &Value, name: &str) -> Result<(&'static str, bool)> {
    let members = keyword::array("enum", members, name)?;
    let nullable = members.iter().any(Value::is_null);

    let mut inferred: Option<&'static str> = None;
    for member in members.iter().filter(|m| !m.is_null()) {
        let ty = match member {
            Value::String(_) => TYPE_STRING,
            Value::Bool(_) => TYPE_BOOLEAN,
            Value::Number(n) if n.is_i64() || n.is_u64() => TYPE_INTEGER,
            Value::Number(_) => TYPE_NUMBER,
            _ => {
                return Err(Error::Unsupported(format!(
                    "cannot infer a scalar type from enum member {member} of \"{name}\""
                )));
            }
        };
        inferred = match inferred {
            None => Some(ty),
            Some(prev) if prev == ty => Some(ty),
            Some(TYPE_INTEGER | TYPE_NUMBER) if matches!(ty, TYPE_INTEGER | TYPE_NUMBER) => {
                Some(TYPE_NUMBER)
            }
            Some(prev) => {
                return Err(Error::Unsupported(format!(
                    "enum of \"{name}\" mixes {prev} and {ty} members"
                )));
            }
        };
    }

    inferred.map(|ty| (ty, nullable)).ok_or_else(|| {
        Error::Unsupported(format!("cannot infer a type from the empty enum of \"{name}\""))
    })
}
