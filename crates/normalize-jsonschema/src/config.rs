//! Builder and shorthand configuration.
//!
//! Example config.toml:
//! ```toml
//! [builder]
//! definitions_keys = ["definitions", "$defs"]
//! infer_enum_type = true
//! max_resolve_depth = 16
//!
//! [shorthand]
//! namespace = "/Order"
//! vo_namespace = "/Shipping"
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Custom data key holding a node's namespace.
pub const NAMESPACE_KEY: &str = "namespace";

/// Custom data key holding the default namespace for value objects.
pub const VO_NAMESPACE_KEY: &str = "voNamespace";

const DEFAULT_DEFINITIONS_KEY: &str = "definitions";
const DEFAULT_MAX_RESOLVE_DEPTH: usize = 16;

/// Top-level configuration file layout.
#[derive(Debug, Clone, Deserialize, Serialize, Default, schemars::JsonSchema)]
#[serde(default)]
pub struct Config {
    pub builder: BuilderConfig,
    pub shorthand: ShorthandConfig,
}

impl Config {
    /// Parse a configuration document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&source)
    }
}

/// Options for building the type model.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, schemars::JsonSchema)]
#[serde(default)]
pub struct BuilderConfig {
    /// Fragment keys holding definitions tables. Default: ["definitions"]
    pub definitions_keys: Option<Vec<String>>,
    /// Infer a scalar type from `enum` members when `type` is absent. Default: true
    pub infer_enum_type: Option<bool>,
    /// Maximum nesting of materialised references. Default: 16
    ///
    /// Every reference gets its own copy, so a definition referenced twice
    /// by the one before it doubles the work per level. Keep this low for
    /// densely linked definitions.
    pub max_resolve_depth: Option<usize>,
}

impl BuilderConfig {
    pub fn is_definitions_key(&self, key: &str) -> bool {
        match &self.definitions_keys {
            Some(keys) => keys.iter().any(|k| k == key),
            None => key == DEFAULT_DEFINITIONS_KEY,
        }
    }

    pub fn definitions_keys(&self) -> Vec<&str> {
        match &self.definitions_keys {
            Some(keys) => keys.iter().map(String::as_str).collect(),
            None => vec![DEFAULT_DEFINITIONS_KEY],
        }
    }

    pub fn infer_enum_type(&self) -> bool {
        self.infer_enum_type.unwrap_or(true)
    }

    pub fn max_resolve_depth(&self) -> usize {
        self.max_resolve_depth.unwrap_or(DEFAULT_MAX_RESOLVE_DEPTH)
    }
}

/// Default namespaces handed to the shorthand translator.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq, schemars::JsonSchema)]
#[serde(default)]
pub struct ShorthandConfig {
    /// Namespace of the root object.
    pub namespace: Option<String>,
    /// Namespace for value objects that do not declare one.
    pub vo_namespace: Option<String>,
}

impl ShorthandConfig {
    pub fn new(namespace: Option<&str>, vo_namespace: Option<&str>) -> Self {
        Self {
            namespace: namespace.map(String::from),
            vo_namespace: vo_namespace.map(String::from),
        }
    }

    /// Custom data merged into the root object schema.
    pub fn custom_data(&self) -> Map<String, Value> {
        let mut custom = Map::new();
        if let Some(ns) = &self.namespace {
            custom.insert(NAMESPACE_KEY.into(), Value::String(ns.clone()));
        }
        if let Some(vo) = &self.vo_namespace {
            custom.insert(VO_NAMESPACE_KEY.into(), Value::String(vo.clone()));
        }
        custom
    }
}
