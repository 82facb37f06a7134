use super::keyword;
use super::{
    CustomData, CustomSupport, Definitions, NullableAware, RequiredAware, TYPE_OBJECT, TitleAware,
    TypeSet,
};
use crate::builder::TypeBuilder;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// `additionalProperties`: either a flag or a schema for the extra values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(TypeSet),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectType {
    pub(crate) name: String,
    pub(crate) is_required: bool,
    pub(crate) is_nullable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) title: Option<String>,
    pub(crate) properties: IndexMap<String, TypeSet>,
    pub(crate) required: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) additional_properties: Option<AdditionalProperties>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub(crate) dependencies: Map<String, Value>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub(crate) definitions: Definitions,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub(crate) custom: CustomData,
}

impl ObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_required: false,
            is_nullable: false,
            title: None,
            properties: IndexMap::new(),
            required: Vec::new(),
            additional_properties: None,
            dependencies: Map::new(),
            definitions: IndexMap::new(),
            custom: Map::new(),
        }
    }

    /// Build an object node. The local definitions table is collected before
    /// any property so the resolver sees it in place. References are left
    /// unresolved here.
    pub(crate) fn from_fragment(
        fragment: &Map<String, Value>,
        name: &str,
        builder: &TypeBuilder,
    ) -> Result<Self> {
        keyword::check_type(fragment, TYPE_OBJECT, name)?;

        let mut node = Self::new(name);
        node.definitions = builder.collect_definitions(fragment, name)?;

        for (key, value) in fragment {
            match key.as_str() {
                "type" => {}
                _ if builder.config().is_definitions_key(key) => {}
                "title" => node.title = Some(keyword::string(key, value, name)?),
                "properties" => {
                    for (property, schema) in keyword::object(key, value, name)? {
                        let set = builder.construct(schema, property)?;
                        node.properties.insert(property.clone(), set);
                    }
                }
                "required" => node.required = keyword::string_list(key, value, name)?,
                "additionalProperties" => {
                    node.additional_properties = Some(match value {
                        Value::Bool(allowed) => AdditionalProperties::Allowed(*allowed),
                        Value::Object(_) => {
                            AdditionalProperties::Schema(builder.construct(value, "")?)
                        }
                        _ => return Err(Error::invalid_keyword(key, "a boolean or a schema", name)),
                    });
                }
                "dependencies" => node.dependencies = keyword::object(key, value, name)?.clone(),
                _ => {
                    node.custom.insert(key.clone(), value.clone());
                }
            }
        }

        node.populate_required();
        Ok(node)
    }

    /// Mark every property listed in `required` as required. Unknown names are ignored.
    fn populate_required(&mut self) {
        for property in &self.required {
            if let Some(set) = self.properties.get_mut(property) {
                set.set_required(true);
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &IndexMap<String, TypeSet> {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&TypeSet> {
        self.properties.get(name)
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn additional_properties(&self) -> Option<&AdditionalProperties> {
        self.additional_properties.as_ref()
    }

    pub fn dependencies(&self) -> &Map<String, Value> {
        &self.dependencies
    }

    pub fn definitions(&self) -> &Definitions {
        &self.definitions
    }
}

impl RequiredAware for ObjectType {
    fn is_required(&self) -> bool {
        self.is_required
    }

    fn set_required(&mut self, required: bool) {
        self.is_required = required;
    }
}

impl NullableAware for ObjectType {
    fn is_nullable(&self) -> bool {
        self.is_nullable
    }

    fn set_nullable(&mut self, nullable: bool) {
        self.is_nullable = nullable;
    }
}

impl TitleAware for ObjectType {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

impl CustomSupport for ObjectType {
    fn custom(&self) -> &CustomData {
        &self.custom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuilderConfig;
    use crate::types::TypeNode;
    use serde_json::json;

    fn build(value: Value) -> Result<ObjectType> {
        let builder = TypeBuilder::default();
        ObjectType::from_fragment(value.as_object().unwrap(), "root", &builder)
    }

    #[test]
    fn properties_in_document_order() {
        let node = build(json!({
            "type": "object",
            "properties": {
                "zeta": {"type": "string"},
                "alpha": {"type": "integer"},
                "mid": {"type": "boolean"},
            },
        }))
        .unwrap();

        let names: Vec<_> = node.properties().keys().map(String::as_str).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
        assert_eq!(node.property("alpha").unwrap().first().unwrap().name(), "alpha");
    }

    #[test]
    fn required_marks_properties() {
        let node = build(json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "nick": {"type": "string"},
                "tags": {"type": "array", "items": {"type": "string"}},
                "any": {},
            },
            "required": ["name", "tags", "any", "ghost"],
        }))
        .unwrap();

        assert!(node.property("name").unwrap().is_required());
        assert!(!node.property("nick").unwrap().is_required());
        assert!(node.property("tags").unwrap().is_required());
        assert!(node.property("any").unwrap().is_required());
        assert!(node.property("ghost").is_none());
        assert_eq!(node.required(), ["name", "tags", "any", "ghost"]);
    }

    #[test]
    fn additional_properties_forms() {
        let closed = build(json!({"type": "object", "additionalProperties": false})).unwrap();
        assert_eq!(
            closed.additional_properties(),
            Some(&AdditionalProperties::Allowed(false))
        );

        let typed = build(json!({"type": "object", "additionalProperties": {"type": "string"}}))
            .unwrap();
        let Some(AdditionalProperties::Schema(set)) = typed.additional_properties() else {
            panic!("expected a schema");
        };
        assert!(matches!(set.first(), Some(TypeNode::String(_))));

        assert!(build(json!({"type": "object", "additionalProperties": 1})).is_err());
    }

    #[test]
    fn definitions_and_custom() {
        let node = build(json!({
            "type": "object",
            "title": "Order",
            "definitions": {"id": {"type": "string", "format": "uuid"}},
            "properties": {"id": {"$ref": "#/definitions/id"}},
            "dependencies": {"a": ["b"]},
            "namespace": "/Order",
        }))
        .unwrap();

        assert_eq!(node.title(), Some("Order"));
        assert!(node.definitions().contains_key("id"));
        assert_eq!(node.dependencies()["a"], json!(["b"]));
        assert_eq!(node.custom()["namespace"], "/Order");
        assert!(!node.custom().contains_key("definitions"));

        let reference = node.property("id").unwrap().first().unwrap().as_reference().unwrap();
        assert!(reference.resolved_type().is_none());
    }

    #[test]
    fn configurable_definitions_key() {
        let builder = TypeBuilder::new(BuilderConfig {
            definitions_keys: Some(vec!["$defs".into()]),
            ..Default::default()
        });
        let fragment = json!({"type": "object", "$defs": {"x": {"type": "string"}}});
        let node = ObjectType::from_fragment(fragment.as_object().unwrap(), "", &builder).unwrap();
        assert!(node.definitions().contains_key("x"));
        assert!(node.custom().is_empty());
    }
}
