use super::keyword;
use super::{CustomData, CustomSupport, NullableAware, RequiredAware, TitleAware, TypeSet};
use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// A `$ref` node.
///
/// Once resolved, `resolved_type` is an owned clone of the target definition.
/// Flag changes on the reference are pushed into that clone and never reach
/// the definitions table it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceType {
    pub(crate) name: String,
    #[serde(rename = "$ref")]
    pub(crate) reference: String,
    pub(crate) is_required: bool,
    pub(crate) is_nullable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) resolved_type: Option<TypeSet>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub(crate) custom: CustomData,
}

impl ReferenceType {
    /// The node is named after the last path segment of `reference`.
    pub fn new(reference: impl Into<String>) -> Self {
        let reference = reference.into();
        Self {
            name: lookup_key(&reference).to_string(),
            reference,
            is_required: false,
            is_nullable: false,
            title: None,
            resolved_type: None,
            custom: Map::new(),
        }
    }

    /// `name` is only used in error messages.
    pub fn from_fragment(fragment: &Map<String, Value>, name: &str) -> Result<Self> {
        let reference = fragment
            .get("$ref")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::MissingReference {
                name: name.to_string(),
            })?;

        let mut node = Self::new(reference);
        for (key, value) in fragment {
            match key.as_str() {
                "$ref" | "type" => {}
                "title" => node.title = Some(keyword::string(key, value, name)?),
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

    /// The symbolic `$ref` string.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Definitions table key: the last `/`-separated segment of the reference.
    pub fn lookup_key(&self) -> &str {
        lookup_key(&self.reference)
    }

    pub fn resolved_type(&self) -> Option<&TypeSet> {
        self.resolved_type.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_type.is_some()
    }

    /// Attach an owned copy of the target. The reference's `required` flag is
    /// written onto it; `nullable` is added if the reference is nullable.
    pub fn set_resolved_type(&mut self, mut resolved: TypeSet) {
        resolved.set_required(self.is_required);
        if self.is_nullable {
            resolved.set_nullable(true);
        }
        self.resolved_type = Some(resolved);
    }
}

fn lookup_key(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

impl RequiredAware for ReferenceType {
    fn is_required(&self) -> bool {
        self.is_required
    }

    fn set_required(&mut self, required: bool) {
        if let Some(resolved) = &mut self.resolved_type {
            resolved.set_required(required);
        }
        self.is_required = required;
    }
}

impl NullableAware for ReferenceType {
    fn is_nullable(&self) -> bool {
        self.is_nullable
    }

    fn set_nullable(&mut self, nullable: bool) {
        if let Some(resolved) = &mut self.resolved_type {
            resolved.set_nullable(nullable);
        }
        self.is_nullable = nullable;
    }
}

impl TitleAware for ReferenceType {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

impl CustomSupport for ReferenceType {
    fn custom(&self) -> &CustomData {
        &self.custom
    }
}
