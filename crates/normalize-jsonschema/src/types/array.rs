use super::keyword;
use super::{
    CustomData, CustomSupport, Definitions, NullableAware, RequiredAware, TYPE_ARRAY, TitleAware,
    TypeSet,
};
use crate::builder::TypeBuilder;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// Array node.
///
/// `items` holds one set for `{"items": {...}}` and one set per position for
/// tuple form `{"items": [{...}, {...}]}`. Item sets are anonymous (empty name).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayType {
    pub(crate) name: String,
    pub(crate) is_required: bool,
    pub(crate) is_nullable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) title: Option<String>,
    pub(crate) items: Vec<TypeSet>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) contains: Vec<TypeSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) additional_items: Option<TypeSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) min_items: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) max_items: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) unique_items: Option<bool>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub(crate) definitions: Definitions,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub(crate) custom: CustomData,
}

impl ArrayType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_required: false,
            is_nullable: false,
            title: None,
            items: Vec::new(),
            contains: Vec::new(),
            additional_items: None,
            min_items: None,
            max_items: None,
            unique_items: None,
            definitions: IndexMap::new(),
            custom: Map::new(),
        }
    }

    pub(crate) fn from_fragment(
        fragment: &Map<String, Value>,
        name: &str,
        builder: &TypeBuilder,
    ) -> Result<Self> {
        keyword::check_type(fragment, TYPE_ARRAY, name)?;

        let mut node = Self::new(name);
        node.definitions = builder.collect_definitions(fragment, name)?;

        for (key, value) in fragment {
            match key.as_str() {
                "type" => {}
                _ if builder.config().is_definitions_key(key) => {}
                "title" => node.title = Some(keyword::string(key, value, name)?),
                "items" => node.items = item_sets(key, value, name, builder)?,
                "contains" => node.contains = item_sets(key, value, name, builder)?,
                // The boolean form only toggles validation; keep it verbatim.
                "additionalItems" if value.is_object() => {
                    node.additional_items = Some(builder.construct(value, "")?)
                }
                "minItems" => node.min_items = Some(keyword::unsigned(key, value, name)?),
                "maxItems" => node.max_items = Some(keyword::unsigned(key, value, name)?),
                "uniqueItems" => node.unique_items = Some(keyword::boolean(key, value, name)?),
                _ => {
                    node.custom.insert(key.clone(), value.clone());
                }
            }
        }

        Ok(node)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &[TypeSet] {
        &self.items
    }

    pub fn contains(&self) -> &[TypeSet] {
        &self.contains
    }

    pub fn additional_items(&self) -> Option<&TypeSet> {
        self.additional_items.as_ref()
    }

    pub fn min_items(&self) -> Option<u64> {
        self.min_items
    }

    pub fn max_items(&self) -> Option<u64> {
        self.max_items
    }

    pub fn unique_items(&self) -> Option<bool> {
        self.unique_items
    }

    pub fn definitions(&self) -> &Definitions {
        &self.definitions
    }
}

fn item_sets(key: &str, value: &Value, name: &str, builder: &TypeBuilder) -> Result<Vec<TypeSet>> {
    match value {
        Value::Object(_) => Ok(vec![builder.construct(value, "")?]),
        Value::Array(schemas) => schemas
            .iter()
            .map(|schema| builder.construct(schema, ""))
            .collect(),
        _ => Err(Error::invalid_keyword(key, "a schema or an array of schemas", name)),
    }
}

impl RequiredAware for ArrayType {
    fn is_required(&self) -> bool {
        self.is_required
    }

    fn set_required(&mut self, required: bool) {
        self.is_required = required;
    }
}

impl NullableAware for ArrayType {
    fn is_nullable(&self) -> bool {
        self.is_nullable
    }

    fn set_nullable(&mut self, nullable: bool) {
        self.is_nullable = nullable;
    }
}

impl TitleAware for ArrayType {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

impl CustomSupport for ArrayType {
    fn custom(&self) -> &CustomData {
        &self.custom
    }
}
