//! Shorthand and JSON Schema to a resolved type model.
//!
//! `rhi-normalize-jsonschema` turns a schema description into a tree of typed
//! nodes that code generators walk to emit value objects and DTOs. Every
//! `$ref` in the tree carries an owned, resolved copy of its target.
//!
//! # Architecture
//!
//! ```text
//! Shorthand ──> shorthand ──> canonical schema ──> builder ──> TypeSet ──> resolver
//!               (string grammar)  (serde_json::Value)  (node variants)       ($ref clones)
//! ```
//!
//! # Example
//!
//! ```
//! use rhi_normalize_jsonschema::{type_from_schema, types::TypeNode};
//!
//! let schema = serde_json::json!({
//!     "type": "object",
//!     "definitions": {
//!         "email": { "type": "string", "format": "email" }
//!     },
//!     "properties": {
//!         "contact": { "$ref": "#/definitions/email" },
//!         "backup": { "$ref": "#/definitions/email" }
//!     },
//!     "required": ["contact"]
//! });
//!
//! let set = type_from_schema(&schema, Some("Person"), None).unwrap();
//! let person = set.first().and_then(TypeNode::as_object).unwrap();
//!
//! let contact = person.property("contact").unwrap().first().unwrap();
//! let resolved = contact.as_reference().unwrap().resolved_type().unwrap();
//! assert!(resolved.is_required());
//!
//! let backup = person.property("backup").unwrap().first().unwrap();
//! assert!(!backup.as_reference().unwrap().resolved_type().unwrap().is_required());
//! ```
//!
//! # Shorthand
//!
//! ```
//! use rhi_normalize_jsonschema::shorthand_to_schema;
//!
//! let schema = shorthand_to_schema(&serde_json::json!({
//!     "name": "string|minLength:1",
//!     "age?": "integer|minimum:0"
//! }))
//! .unwrap();
//!
//! assert_eq!(schema["required"], serde_json::json!(["name"]));
//! assert_eq!(schema["properties"]["age"]["minimum"], 0);
//! ```

pub mod builder;
pub mod config;
pub mod error;
mod resolve;
pub mod shorthand;
pub mod types;

pub use builder::TypeBuilder;
pub use config::{BuilderConfig, Config, ShorthandConfig};
pub use error::{Error, Result, ShorthandErrorKind};
pub use shorthand::{shorthand_to_schema, shorthand_to_schema_with};
pub use types::{Definitions, TypeNode, TypeSet};

use serde_json::Value;

/// Build a resolved type set from a canonical schema fragment with default options.
pub fn type_from_schema(
    fragment: &Value,
    name: Option<&str>,
    ancestors: Option<&Definitions>,
) -> Result<TypeSet> {
    TypeBuilder::default().build(fragment, name, ancestors)
}

/// Translate shorthand and build its resolved type set.
///
/// `namespace` is attached to the root object; `vo_namespace` is the default
/// namespace of nested value objects and un-namespaced references.
pub fn type_from_shorthand(
    input: &Value,
    name: Option<&str>,
    namespace: Option<&str>,
    vo_namespace: Option<&str>,
) -> Result<TypeSet> {
    TypeBuilder::default().from_shorthand(
        input,
        name,
        &ShorthandConfig::new(namespace, vo_namespace),
    )
}
