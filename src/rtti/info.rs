//! Participation contract for registrable types

use std::sync::Arc;

use super::{RegistryError, TypeDescriptor, TypeRegistry};

/// Implemented by every type that takes part in the type registry.
///
/// `TYPE_NAME` must be unique process-wide and contain only characters
/// accepted by [`is_valid_type_name`](super::is_valid_type_name); an invalid
/// name is rejected at compile time when the type is first registered.
/// Parents are declared in order by [`declare_parents`](Self::declare_parents).
///
/// Prefer the [`type_info!`](crate::type_info) macro over a manual impl.
pub trait TypeInfo: 'static {
    const TYPE_NAME: &'static str;

    /// Declare the immediate parent types. Root types keep the default.
    fn declare_parents(_parents: &mut ParentList<'_>) {}
}

/// Ordered parent descriptors collected while a descriptor is being built
pub struct ParentList<'r> {
    registry: &'r TypeRegistry,
    parents: Vec<Arc<TypeDescriptor>>,
    collision: Option<RegistryError>,
}

impl<'r> ParentList<'r> {
    pub(crate) fn new(registry: &'r TypeRegistry) -> Self {
        Self {
            registry,
            parents: Vec::new(),
            collision: None,
        }
    }

    /// Append a parent, resolving (and creating if needed) its descriptor
    pub fn add<P: TypeInfo + ?Sized>(&mut self) -> &mut Self {
        let resolution = self.registry.resolve::<P>();
        if self.collision.is_none() {
            self.collision = resolution.collision;
        }
        self.parents.push(resolution.descriptor);
        self
    }

    /// The parents in declaration order, plus the first name collision met
    /// among them or their ancestors
    pub(crate) fn finish(self) -> (Vec<Arc<TypeDescriptor>>, Option<RegistryError>) {
        (self.parents, self.collision)
    }
}

/// Object-safe access to the dynamic type of a value
///
/// Blanket-implemented for every sized [`TypeInfo`] type; use it as a
/// supertrait of a polymorphic root trait so `dyn Root` values report their
/// concrete type.
pub trait HasTypeInfo {
    /// Registry name of the concrete type
    fn type_name(&self) -> &'static str;

    /// Descriptor of the concrete type in `registry`
    fn descriptor_in(&self, registry: &TypeRegistry) -> Arc<TypeDescriptor>;

    /// Descriptor of the concrete type in the global registry
    fn type_descriptor(&self) -> Arc<TypeDescriptor> {
        self.descriptor_in(TypeRegistry::global())
    }
}

impl<T: TypeInfo> HasTypeInfo for T {
    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn descriptor_in(&self, registry: &TypeRegistry) -> Arc<TypeDescriptor> {
        registry.get_or_create::<T>()
    }
}

/// Implement [`TypeInfo`] for a type.
///
/// ```
/// use typereg::{type_info, TypeRegistry};
///
/// struct Base;
/// struct Mixin;
/// struct Leaf;
/// struct Pair<A, B>(A, B);
///
/// type_info!(Base);
/// type_info!(Mixin);
/// type_info!(Leaf: Base, Mixin);
/// type_info!(Pair<i32, u8> as "Pair<i32,u8>": Base);
///
/// let registry = TypeRegistry::new();
/// let leaf = registry.get_or_create::<Leaf>();
/// assert_eq!(leaf.name(), "Leaf");
/// assert!(leaf.is_subtype_of(&registry.get_or_create::<Mixin>()));
/// assert!(registry.find("Pair<i32, u8>").is_none());
/// registry.get_or_create::<Pair<i32, u8>>();
/// assert!(registry.find("Pair<i32, u8>").is_some());
/// ```
///
/// Generic instantiations and trait objects need an explicit name
/// (`Ty as "Name"`); plain identifiers use their own spelling.
#[macro_export]
macro_rules! type_info {
    (@impl $ty:ty, $type_name:expr) => {
        impl $crate::rtti::TypeInfo for $ty {
            const TYPE_NAME: &'static str = $type_name;
        }
    };
    (@impl $ty:ty, $type_name:expr; $($parent:ty),+) => {
        impl $crate::rtti::TypeInfo for $ty {
            const TYPE_NAME: &'static str = $type_name;

            fn declare_parents(parents: &mut $crate::rtti::ParentList<'_>) {
                $( parents.add::<$parent>(); )+
            }
        }
    };
    ($name:ident $(: $($parent:ty),+ $(,)?)?) => {
        $crate::type_info!(@impl $name, stringify!($name) $(; $($parent),+)?);
    };
    ($ty:ty as $type_name:literal $(: $($parent:ty),+ $(,)?)?) => {
        $crate::type_info!(@impl $ty, $type_name $(; $($parent),+)?);
    };
}
