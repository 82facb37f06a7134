use super::{CustomData, CustomSupport, RequiredAware, TYPE_CONST};
use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// A single literal value (`const`, or a `type: "null"` position).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstType {
    pub(crate) name: String,
    pub(crate) is_required: bool,
    pub(crate) value: Value,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub(crate) custom: CustomData,
}

impl ConstType {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            is_required: false,
            value,
            custom: Map::new(),
        }
    }

    pub fn from_fragment(fragment: &Map<String, Value>, name: &str) -> Result<Self> {
        let value = fragment
            .get(TYPE_CONST)
            .ok_or_else(|| Error::Unsupported(format!("\"const\" is missing for \"{name}\"")))?;

        let mut node = Self::new(name, value.clone());
        node.custom = fragment.clone();
        node.custom.remove(TYPE_CONST);
        Ok(node)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl RequiredAware for ConstType {
    fn is_required(&self) -> bool {
        self.is_required
    }

    fn set_required(&mut self, required: bool) {
        self.is_required = required;
    }
}

impl CustomSupport for ConstType {
    fn custom(&self) -> &CustomData {
        &self.custom
    }
}
