use super::{CustomData, CustomSupport, RequiredAware, TYPE_NOT, TypeSet};
use crate::builder::TypeBuilder;
use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// `not`: wraps the negated type set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotType {
    pub(crate) name: String,
    pub(crate) is_required: bool,
    pub(crate) type_set: TypeSet,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub(crate) custom: CustomData,
}

impl NotType {
    pub(crate) fn from_fragment(
        fragment: &Map<String, Value>,
        name: &str,
        builder: &TypeBuilder,
    ) -> Result<Self> {
        let negated = fragment
            .get(TYPE_NOT)
            .ok_or_else(|| Error::Unsupported(format!("\"not\" is missing for \"{name}\"")))?;

        let mut custom = fragment.clone();
        custom.remove(TYPE_NOT);

        Ok(Self {
            name: name.to_string(),
            is_required: false,
            type_set: builder.construct(negated, "")?,
            custom,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_set(&self) -> &TypeSet {
        &self.type_set
    }
}

impl RequiredAware for NotType {
    fn is_required(&self) -> bool {
        self.is_required
    }

    fn set_required(&mut self, required: bool) {
        self.is_required = required;
    }
}

impl CustomSupport for NotType {
    fn custom(&self) -> &CustomData {
        &self.custom
    }
}
