//! Runtime type identity: descriptors, ancestry and the type registry

mod descriptor;
mod info;
mod name;
mod registry;

use std::sync::Arc;

pub use descriptor::{DescriptorInfo, TypeDescriptor};
pub use info::{HasTypeInfo, ParentList, TypeInfo};
pub use name::{is_name_char, is_valid_type_name, normalize_type_name, NameError};
pub use registry::{RegistryError, TypeRegistry};

/// Descriptor of `T` in the global registry
pub fn descriptor_of<T: TypeInfo + ?Sized>() -> Arc<TypeDescriptor> {
    TypeRegistry::global().get_or_create::<T>()
}
