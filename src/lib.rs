//! typereg - runtime type identity and name-keyed object construction
//!
//! Types declare a stable name and their parent types ([`TypeInfo`]); the
//! [`TypeRegistry`] turns those declarations into a graph of unique
//! [`TypeDescriptor`]s that answer ancestry queries. An [`ObjectRegistry`]
//! binds each registered type's name to a constructor so objects can be
//! created from nothing more than a string.

pub mod config;
pub mod objects;
pub mod patterns;
pub mod rtti;
pub mod scene;

pub use config::{Config, ConfigError};
pub use objects::{Construct, ObjectRegistry};
pub use patterns::{DuplicatePolicy, Factory, FactoryError, InitStrategy, LazySingleton};
pub use rtti::{
    descriptor_of, HasTypeInfo, ParentList, RegistryError, TypeDescriptor, TypeInfo, TypeRegistry,
};
