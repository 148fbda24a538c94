//! Type descriptors and ancestry queries

use std::any::TypeId;
use std::fmt;
use std::ptr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Immutable runtime record identifying one concrete type
///
/// Descriptors are created by a [`TypeRegistry`](super::TypeRegistry) and
/// handed out as `Arc`s. Two descriptors are equal only if they are the
/// same instance.
pub struct TypeDescriptor {
    name: String,
    parents: Vec<Arc<TypeDescriptor>>,
    type_id: TypeId,
    rust_type: &'static str,
}

/// Serializable summary of a descriptor, for tooling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorInfo {
    pub name: String,
    pub parents: Vec<String>,
}

impl TypeDescriptor {
    pub(crate) fn new(
        name: String,
        parents: Vec<Arc<TypeDescriptor>>,
        type_id: TypeId,
        rust_type: &'static str,
    ) -> Self {
        Self {
            name,
            parents,
            type_id,
            rust_type,
        }
    }

    /// Registry name of the type
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Immediate parents, in declaration order
    pub fn parents(&self) -> &[Arc<TypeDescriptor>] {
        &self.parents
    }

    /// True if the type declares no parents
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// The Rust type this descriptor was built for
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Compiler-provided name of the Rust type, for diagnostics only
    pub fn rust_type(&self) -> &'static str {
        self.rust_type
    }

    /// Check whether `ancestor` is this type or one of its (indirect) parents.
    ///
    /// Depth-first over the declared parents; every branch is explored so a
    /// type with several parents matches an ancestor reachable through any
    /// of them.
    pub fn is_subtype_of(&self, ancestor: &TypeDescriptor) -> bool {
        if ptr::eq(self, ancestor) {
            return true;
        }
        self.parents
            .iter()
            .any(|parent| parent.is_subtype_of(ancestor))
    }

    /// All ancestors in depth-first order, each listed once, excluding self
    pub fn ancestors(&self) -> Vec<Arc<TypeDescriptor>> {
        let mut seen: Vec<Arc<TypeDescriptor>> = Vec::new();
        let mut stack: Vec<&Arc<TypeDescriptor>> = self.parents.iter().rev().collect();

        while let Some(current) = stack.pop() {
            if seen.iter().any(|s| Arc::ptr_eq(s, current)) {
                continue;
            }
            seen.push(current.clone());
            stack.extend(current.parents.iter().rev());
        }

        seen
    }

    /// Summary with parent names only
    pub fn info(&self) -> DescriptorInfo {
        DescriptorInfo {
            name: self.name.clone(),
            parents: self.parents.iter().map(|p| p.name.clone()).collect(),
        }
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other)
    }
}

impl Eq for TypeDescriptor {}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parents: Vec<&str> = self.parents.iter().map(|p| p.name()).collect();
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("parents", &parents)
            .field("rust_type", &self.rust_type)
            .finish()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str, parents: &[&Arc<TypeDescriptor>]) -> Arc<TypeDescriptor> {
        Arc::new(TypeDescriptor::new(
            name.to_string(),
            parents.iter().map(|p| Arc::clone(p)).collect(),
            TypeId::of::<()>(),
            "()",
        ))
    }

    #[test]
    fn test_reflexive() {
        let base = descriptor("Base", &[]);
        assert!(base.is_subtype_of(&base));
        assert!(base.is_root());
    }

    #[test]
    fn test_transitive_chain() {
        let base = descriptor("Base", &[]);
        let middle = descriptor("Middle", &[&base]);
        let leaf = descriptor("Leaf", &[&middle]);

        assert!(leaf.is_subtype_of(&middle));
        assert!(leaf.is_subtype_of(&base));
        assert!(middle.is_subtype_of(&base));
        assert!(!base.is_subtype_of(&leaf));
        assert!(!middle.is_subtype_of(&leaf));
    }

    #[test]
    fn test_multiple_parents() {
        let shape = descriptor("Shape", &[]);
        let rectangle = descriptor("Rectangle", &[&shape]);
        let collider = descriptor("Collider", &[]);
        let rect_collider = descriptor("RectangleCollider", &[&rectangle, &collider]);

        assert!(rect_collider.is_subtype_of(&shape));
        assert!(rect_collider.is_subtype_of(&collider));
        assert!(!rectangle.is_subtype_of(&collider));
        assert!(!collider.is_subtype_of(&rect_collider));
    }

    #[test]
    fn test_equal_names_are_not_the_same_type() {
        let a = descriptor("Twin", &[]);
        let b = descriptor("Twin", &[]);
        assert_ne!(*a, *b);
        assert!(!a.is_subtype_of(&b));
    }

    #[test]
    fn test_ancestors_deduplicates_diamond() {
        let root = descriptor("Root", &[]);
        let left = descriptor("Left", &[&root]);
        let right = descriptor("Right", &[&root]);
        let bottom = descriptor("Bottom", &[&left, &right]);

        let names: Vec<String> = bottom
            .ancestors()
            .iter()
            .map(|d| d.name().to_string())
            .collect();
        assert_eq!(names, vec!["Left", "Root", "Right"]);
        assert!(root.ancestors().is_empty());
    }

    #[test]
    fn test_info() {
        let base = descriptor("Base", &[]);
        let mixin = descriptor("Mixin", &[]);
        let leaf = descriptor("Leaf", &[&base, &mixin]);

        let info = leaf.info();
        assert_eq!(info.name, "Leaf");
        assert_eq!(info.parents, vec!["Base", "Mixin"]);
        assert_eq!(leaf.to_string(), "Leaf");
    }
}
