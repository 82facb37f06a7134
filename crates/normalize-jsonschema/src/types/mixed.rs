use super::RequiredAware;
use serde::Serialize;

/// An unconstrained position, built from `{}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MixedType {
    pub(crate) name: String,
    pub(crate) is_required: bool,
}

impl MixedType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_required: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl RequiredAware for MixedType {
    fn is_required(&self) -> bool {
        self.is_required
    }

    fn set_required(&mut self, required: bool) {
        self.is_required = required;
    }
}
