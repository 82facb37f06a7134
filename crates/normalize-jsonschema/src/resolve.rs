//! `$ref` resolution over a built type tree.
//!
//! Every container opens a [`Scope`] over a snapshot of its own definitions
//! table, chained to the scope it was found in. A reference is looked up from
//! the innermost scope outwards; the hit is deep-cloned, the clone is resolved
//! in the same scope, and the result is attached to the reference.
//!
//! Materialisation is guarded by the stack of definitions currently being
//! expanded, each identified by the table it was found in and its name. A
//! reference hitting an entry already on the stack stays unresolved, as does
//! any reference beyond the configured depth. A local definition that shadows
//! an outer one of the same name is a different entry.

use crate::types::{AdditionalProperties, ArrayType, Definitions, ObjectType, ReferenceType};
use crate::types::{TypeNode, TypeSet};

/// Definitions visible at one point of the tree.
pub(crate) struct Scope<'a> {
    definitions: Option<&'a Definitions>,
    parent: Option<&'a Scope<'a>>,
}

impl<'a> Scope<'a> {
    pub(crate) fn root(definitions: Option<&'a Definitions>) -> Self {
        Self {
            definitions,
            parent: None,
        }
    }

    fn child<'b>(&'b self, definitions: &'b Definitions) -> Scope<'b> {
        Scope {
            definitions: Some(definitions),
            parent: Some(self),
        }
    }

    /// Innermost table wins. Returns the table holding the hit with it.
    pub(crate) fn lookup(&self, key: &str) -> Option<(&'a Definitions, &'a TypeSet)> {
        self.definitions
            .and_then(|table| table.get(key).map(|set| (table, set)))
            .or_else(|| self.parent.and_then(|parent| parent.lookup(key)))
    }
}

/// A definition being materialised. The table pointer is only compared,
/// and the table outlives the entry because its scope encloses the expansion.
#[derive(PartialEq)]
struct Active {
    table: *const Definitions,
    key: String,
}

pub(crate) struct Resolver {
    max_depth: usize,
    stack: Vec<Active>,
}

impl Resolver {
    pub(crate) fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            stack: Vec::new(),
        }
    }

    pub(crate) fn resolve_root(&mut self, set: &mut TypeSet, ancestors: Option<&Definitions>) {
        let scope = Scope::root(ancestors);
        self.resolve_set(set, &scope);
    }

    fn resolve_set(&mut self, set: &mut TypeSet, scope: &Scope<'_>) {
        for node in set {
            self.resolve_node(node, scope);
        }
    }

    fn resolve_node(&mut self, node: &mut TypeNode, scope: &Scope<'_>) {
        match node {
            TypeNode::Object(object) => self.resolve_object(object, scope),
            TypeNode::Array(array) => self.resolve_array(array, scope),
            TypeNode::Of(of) => {
                for set in &mut of.type_sets {
                    self.resolve_set(set, scope);
                }
            }
            TypeNode::Not(not) => self.resolve_set(&mut not.type_set, scope),
            TypeNode::Reference(reference) => self.resolve_reference(reference, scope),
            TypeNode::String(_)
            | TypeNode::Number(_)
            | TypeNode::Integer(_)
            | TypeNode::Boolean(_)
            | TypeNode::Const(_)
            | TypeNode::Mixed(_) => {}
        }
    }

    fn resolve_object(&mut self, object: &mut ObjectType, scope: &Scope<'_>) {
        let local = object.definitions.clone();
        let scope = scope.child(&local);

        for set in object.definitions.values_mut() {
            self.resolve_set(set, &scope);
        }
        for set in object.properties.values_mut() {
            self.resolve_set(set, &scope);
        }
        if let Some(AdditionalProperties::Schema(set)) = &mut object.additional_properties {
            self.resolve_set(set, &scope);
        }
    }

    fn resolve_array(&mut self, array: &mut ArrayType, scope: &Scope<'_>) {
        let local = array.definitions.clone();
        let scope = scope.child(&local);

        for set in array.definitions.values_mut() {
            self.resolve_set(set, &scope);
        }
        for set in array.items.iter_mut().chain(array.contains.iter_mut()) {
            self.resolve_set(set, &scope);
        }
        if let Some(set) = &mut array.additional_items {
            self.resolve_set(set, &scope);
        }
    }

    fn resolve_reference(&mut self, reference: &mut ReferenceType, scope: &Scope<'_>) {
        if reference.is_resolved() {
            return;
        }

        let key = reference.lookup_key();
        if self.stack.len() >= self.max_depth {
            tracing::debug!(
                reference = reference.reference(),
                depth = self.stack.len(),
                "reference left unresolved: too deep"
            );
            return;
        }

        let Some((table, target)) = scope.lookup(key) else {
            tracing::debug!(reference = reference.reference(), "unresolved reference");
            return;
        };

        let active = Active {
            table: std::ptr::from_ref(table),
            key: key.to_string(),
        };
        if self.stack.contains(&active) {
            tracing::debug!(
                reference = reference.reference(),
                "reference left unresolved: recursive"
            );
            return;
        }

        let mut resolved = target.clone();
        self.stack.push(active);
        self.resolve_set(&mut resolved, scope);
        self.stack.pop();

        tracing::trace!(
            reference = reference.reference(),
            key = reference.lookup_key(),
            "resolved reference"
        );
        reference.set_resolved_type(resolved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{StringType, TypeNode};

    fn table(names: &[&str]) -> Definitions {
        names
            .iter()
            .map(|name| {
                (
                    name.to_string(),
                    TypeSet::single(TypeNode::String(StringType::new(*name))),
                )
            })
            .collect()
    }

    #[test]
    fn local_shadows_parent() {
        let outer = table(&["a", "b"]);
        let mut inner = table(&["a"]);
        inner.insert("a".into(), TypeSet::default());

        let root = Scope::root(Some(&outer));
        let scope = root.child(&inner);

        assert_eq!(scope.lookup("a").map(|(_, set)| set.len()), Some(0));
        assert_eq!(scope.lookup("b").map(|(_, set)| set.len()), Some(1));
        assert!(std::ptr::eq(scope.lookup("a").unwrap().0, &inner));
        assert!(std::ptr::eq(scope.lookup("b").unwrap().0, &outer));
        assert!(scope.lookup("c").is_none());
        assert!(Scope::root(None).lookup("a").is_none());
    }

    #[test]
    fn depth_cap() {
        let ancestors = table(&["id"]);
        let mut set = TypeSet::single(TypeNode::Reference(ReferenceType::new("#/definitions/id")));

        Resolver::new(0).resolve_root(&mut set, Some(&ancestors));
        assert!(!set.first().unwrap().as_reference().unwrap().is_resolved());

        Resolver::new(1).resolve_root(&mut set, Some(&ancestors));
        assert!(set.first().unwrap().as_reference().unwrap().is_resolved());
    }
}
