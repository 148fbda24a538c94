//! Object registry - name-keyed construction bound to type identity

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::patterns::{DuplicatePolicy, Factory, FactoryError};
use crate::rtti::{normalize_type_name, TypeDescriptor, TypeInfo, TypeRegistry};

/// Builds a concrete type and hands it back as the registry's root type
///
/// Stands in for the implicit upcast: each concrete type says how it boxes
/// itself as `R`.
pub trait Construct<R: ?Sized, A> {
    fn construct(args: A) -> Box<R>;
}

/// Factory whose keys are the type names of the registered concrete types
///
/// `R` is the polymorphic root (usually `dyn SomeTrait` with its own
/// [`TypeInfo`]). Only types whose descriptor derives from `R`'s descriptor
/// can be registered.
pub struct ObjectRegistry<'r, R: ?Sized + TypeInfo, A = ()> {
    factory: Factory<R, A>,
    types: &'r TypeRegistry,
}

impl<R: ?Sized + TypeInfo, A: 'static> ObjectRegistry<'static, R, A> {
    /// Create an empty registry backed by the global type registry
    pub fn new() -> Self {
        Self::with_types(TypeRegistry::global(), DuplicatePolicy::default())
    }
}

impl<R: ?Sized + TypeInfo, A: 'static> Default for ObjectRegistry<'static, R, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r, R: ?Sized + TypeInfo, A: 'static> ObjectRegistry<'r, R, A> {
    /// Create an empty registry backed by `types`
    pub fn with_types(types: &'r TypeRegistry, policy: DuplicatePolicy) -> Self {
        Self {
            factory: Factory::with_policy(policy),
            types,
        }
    }

    /// The type registry descriptors are resolved in
    pub fn types(&self) -> &'r TypeRegistry {
        self.types
    }

    /// Descriptor of the root type
    pub fn root(&self) -> Arc<TypeDescriptor> {
        self.types.get_or_create::<R>()
    }

    /// Register `C` under its type name
    pub fn register_type<C>(&self) -> Result<(), FactoryError>
    where
        C: TypeInfo + Construct<R, A> + ?Sized,
    {
        let descriptor = self.types.get_or_create::<C>();
        let root = self.root();

        if !descriptor.is_subtype_of(&root) {
            return Err(FactoryError::NotDerived {
                type_name: descriptor.name().to_string(),
                root: root.name().to_string(),
            });
        }

        self.factory
            .register_constructor(descriptor.name(), C::construct)?;
        debug!(name = descriptor.name(), root = root.name(), "registered object type");
        Ok(())
    }

    /// Construct the type registered under `name`.
    ///
    /// Whitespace in `name` is ignored, like in [`TypeRegistry::find`].
    pub fn create(&self, name: &str, args: A) -> Result<Box<R>, FactoryError> {
        let key =
            normalize_type_name(name).map_err(|_| FactoryError::UnknownKey(name.to_string()))?;
        self.factory.create(&key, args)
    }

    /// Construct the type registered under `name`, or `None` if unknown
    pub fn try_create(&self, name: &str, args: A) -> Option<Box<R>> {
        let key = normalize_type_name(name).ok()?;
        self.factory.try_create(&key, args)
    }

    /// Check if a type is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        normalize_type_name(name)
            .map(|key| self.factory.contains(&key))
            .unwrap_or(false)
    }

    /// Descriptor of a registered type, `None` if `name` is not constructible here
    pub fn descriptor(&self, name: &str) -> Option<Arc<TypeDescriptor>> {
        if !self.contains(name) {
            return None;
        }
        self.types.find(name)
    }

    /// Names of all registered types, sorted
    pub fn registered_types(&self) -> Vec<String> {
        self.factory.registered_keys()
    }

    pub fn len(&self) -> usize {
        self.factory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factory.is_empty()
    }
}

impl<R: ?Sized + TypeInfo, A> fmt::Debug for ObjectRegistry<'_, R, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRegistry")
            .field("root", &R::TYPE_NAME)
            .field("factory", &self.factory)
            .finish()
    }
}
