use super::keyword;
use super::{CustomData, CustomSupport, RequiredAware, TypeSet};
use crate::builder::TypeBuilder;
use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Which composition keyword an [`OfType`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OfKind {
    AllOf,
    AnyOf,
    OneOf,
}

impl OfKind {
    pub const ALL: [OfKind; 3] = [OfKind::AllOf, OfKind::AnyOf, OfKind::OneOf];

    pub fn keyword(self) -> &'static str {
        match self {
            OfKind::AllOf => "allOf",
            OfKind::AnyOf => "anyOf",
            OfKind::OneOf => "oneOf",
        }
    }
}

/// `allOf` / `anyOf` / `oneOf` composition. Members are anonymous.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfType {
    pub(crate) name: String,
    pub(crate) of: OfKind,
    pub(crate) is_required: bool,
    pub(crate) type_sets: Vec<TypeSet>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub(crate) custom: CustomData,
}

impl OfType {
    pub(crate) fn from_fragment(
        fragment: &Map<String, Value>,
        kind: OfKind,
        name: &str,
        builder: &TypeBuilder,
    ) -> Result<Self> {
        let members = fragment.get(kind.keyword()).ok_or_else(|| {
            Error::Unsupported(format!("\"{}\" is missing for \"{name}\"", kind.keyword()))
        })?;

        let type_sets = keyword::array(kind.keyword(), members, name)?
            .iter()
            .map(|member| builder.construct(member, ""))
            .collect::<Result<Vec<_>>>()?;

        let custom = fragment
            .iter()
            .filter(|(key, _)| key.as_str() != kind.keyword())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(Self {
            name: name.to_string(),
            of: kind,
            is_required: false,
            type_sets,
            custom,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> OfKind {
        self.of
    }

    pub fn type_sets(&self) -> &[TypeSet] {
        &self.type_sets
    }
}

impl RequiredAware for OfType {
    fn is_required(&self) -> bool {
        self.is_required
    }

    fn set_required(&mut self, required: bool) {
        self.is_required = required;
    }
}

impl CustomSupport for OfType {
    fn custom(&self) -> &CustomData {
        &self.custom
    }
}
