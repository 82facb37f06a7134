use super::TypeNode;
use serde::Serialize;

/// Ordered union of the node variants describing one schema position.
///
/// `{"type": ["string", "null"]}` yields a set with a single nullable
/// `String` node; `{"type": ["string", "integer"]}` yields two nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TypeSet {
    types: Vec<TypeNode>,
}

impl TypeSet {
    pub fn new(types: Vec<TypeNode>) -> Self {
        Self { types }
    }

    pub fn single(node: TypeNode) -> Self {
        Self { types: vec![node] }
    }

    pub fn first(&self) -> Option<&TypeNode> {
        self.types.first()
    }

    pub fn last(&self) -> Option<&TypeNode> {
        self.types.last()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TypeNode> {
        self.types.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, TypeNode> {
        self.types.iter_mut()
    }

    pub fn types(&self) -> &[TypeNode] {
        &self.types
    }

    pub fn push(&mut self, node: TypeNode) {
        self.types.push(node);
    }

    /// Nodes matching `predicate`, as a new set of clones.
    pub fn filter(&self, predicate: impl Fn(&TypeNode) -> bool) -> TypeSet {
        self.types.iter().filter(|t| predicate(t)).cloned().collect()
    }

    pub fn set_required(&mut self, required: bool) {
        for node in &mut self.types {
            node.set_required(required);
        }
    }

    /// Applies to the nodes that support nullability; others are left alone.
    pub fn set_nullable(&mut self, nullable: bool) {
        for node in &mut self.types {
            node.set_nullable(nullable);
        }
    }

    pub fn is_required(&self) -> bool {
        self.types.iter().any(TypeNode::is_required)
    }

    pub fn is_nullable(&self) -> bool {
        self.types.iter().any(TypeNode::is_nullable)
    }
}

impl From<TypeNode> for TypeSet {
    fn from(node: TypeNode) -> Self {
        Self::single(node)
    }
}

impl FromIterator<TypeNode> for TypeSet {
    fn from_iter<I: IntoIterator<Item = TypeNode>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for TypeSet {
    type Item = TypeNode;
    type IntoIter = std::vec::IntoIter<TypeNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.into_iter()
    }
}

impl<'a> IntoIterator for &'a TypeSet {
    type Item = &'a TypeNode;
    type IntoIter = std::slice::Iter<'a, TypeNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.iter()
    }
}

impl<'a> IntoIterator for &'a mut TypeSet {
    type Item = &'a mut TypeNode;
    type IntoIter = std::slice::IterMut<'a, TypeNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.iter_mut()
    }
}
