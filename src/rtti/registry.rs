//! Process-wide mapping from type names to descriptors

use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, warn};

use super::descriptor::{DescriptorInfo, TypeDescriptor};
use super::info::{ParentList, TypeInfo};
use super::name::{is_valid_type_name, normalize_type_name};
use crate::patterns::LazySingleton;

/// Registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("type name '{name}' is claimed by both {existing} and {requested}")]
    NameCollision {
        name: String,
        existing: &'static str,
        requested: &'static str,
    },
}

/// One entry per name, claimed by the first Rust type that asks for it.
///
/// The map lock only guards slot lookup/insertion; descriptor construction
/// runs under the slot's own once-cell.
#[derive(Debug)]
struct Slot {
    type_id: TypeId,
    rust_type: &'static str,
    descriptor: OnceLock<Arc<TypeDescriptor>>,
    /// First collision met while resolving the claimant's ancestors
    ancestor_collision: OnceLock<RegistryError>,
}

impl Slot {
    fn claim<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            rust_type: type_name::<T>(),
            descriptor: OnceLock::new(),
            ancestor_collision: OnceLock::new(),
        }
    }
}

/// A descriptor plus the name collision met while resolving it, if any
pub(crate) struct Resolution {
    pub(crate) descriptor: Arc<TypeDescriptor>,
    pub(crate) collision: Option<RegistryError>,
}

static GLOBAL: LazySingleton<TypeRegistry> = LazySingleton::with_default();

/// Mapping from type name to descriptor with exactly-once creation per name
#[derive(Debug, Default)]
pub struct TypeRegistry {
    entries: RwLock<HashMap<String, Arc<Slot>>>,
}

impl TypeRegistry {
    /// Create an empty, isolated registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry
    pub fn global() -> &'static TypeRegistry {
        GLOBAL.instance()
    }

    /// Get the descriptor for `T`, creating it (and its parents) on first use.
    ///
    /// Concurrent first calls for the same type block until one of them has
    /// built the descriptor and all of them observe that instance. If another
    /// Rust type already claimed `T::TYPE_NAME`, a warning is logged and the
    /// claimant's descriptor is returned; while the claimant is still being
    /// built (it declared `T` as an ancestor), `T` gets a descriptor that is
    /// not stored in the registry. See [`try_get_or_create`](Self::try_get_or_create).
    pub fn get_or_create<T: TypeInfo + ?Sized>(&self) -> Arc<TypeDescriptor> {
        let resolution = self.resolve::<T>();
        if let Some(err) = &resolution.collision {
            warn!(error = %err, "type name collision");
        }
        resolution.descriptor
    }

    /// Like [`get_or_create`](Self::get_or_create), but reports a name
    /// claimed by a different Rust type, for `T` or any of its ancestors,
    /// as an error.
    pub fn try_get_or_create<T: TypeInfo + ?Sized>(
        &self,
    ) -> Result<Arc<TypeDescriptor>, RegistryError> {
        let resolution = self.resolve::<T>();
        match resolution.collision {
            Some(err) => Err(err),
            None => Ok(resolution.descriptor),
        }
    }

    /// Look up a descriptor by name.
    ///
    /// Whitespace in `name` is ignored. Unknown or malformed names are not
    /// an error, they are simply not found.
    pub fn find(&self, name: &str) -> Option<Arc<TypeDescriptor>> {
        let name = normalize_type_name(name).ok()?;
        self.entries
            .read()
            .get(&name)
            .and_then(|slot| slot.descriptor.get().cloned())
    }

    /// Check if a type with this name has been registered
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Number of registered descriptors
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .values()
            .filter(|slot| slot.descriptor.get().is_some())
            .count()
    }

    /// True if nothing has been registered yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of all registered descriptors, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .read()
            .iter()
            .filter(|(_, slot)| slot.descriptor.get().is_some())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// Summary of every registered descriptor, sorted by name
    pub fn snapshot(&self) -> Vec<DescriptorInfo> {
        let mut infos: Vec<DescriptorInfo> = self
            .entries
            .read()
            .values()
            .filter_map(|slot| slot.descriptor.get().map(|d| d.info()))
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    pub(crate) fn resolve<T: TypeInfo + ?Sized>(&self) -> Resolution {
        const {
            assert!(
                is_valid_type_name(T::TYPE_NAME),
                "TypeInfo::TYPE_NAME contains characters outside [A-Za-z0-9_:,*&<>]"
            )
        };

        let slot = self.slot::<T>(T::TYPE_NAME);

        if slot.type_id != TypeId::of::<T>() {
            let collision = RegistryError::NameCollision {
                name: T::TYPE_NAME.to_string(),
                existing: slot.rust_type,
                requested: type_name::<T>(),
            };
            // Never wait on the claimant's cell: it may be this call's caller.
            let descriptor = match slot.descriptor.get() {
                Some(existing) => existing.clone(),
                None => Arc::new(self.build::<T>().0),
            };
            return Resolution {
                descriptor,
                collision: Some(collision),
            };
        }

        // Parent resolution recurses into other slots; the hierarchy is
        // acyclic and foreign claimants are handled above, so it never
        // re-enters this cell.
        let descriptor = slot
            .descriptor
            .get_or_init(|| {
                let (descriptor, collision) = self.build::<T>();
                if let Some(err) = collision {
                    let _ = slot.ancestor_collision.set(err);
                }
                debug!(
                    name = T::TYPE_NAME,
                    parents = ?descriptor.info().parents,
                    "registered type descriptor"
                );
                Arc::new(descriptor)
            })
            .clone();

        Resolution {
            descriptor,
            collision: slot.ancestor_collision.get().cloned(),
        }
    }

    fn build<T: TypeInfo + ?Sized>(&self) -> (TypeDescriptor, Option<RegistryError>) {
        let mut parents = ParentList::new(self);
        T::declare_parents(&mut parents);
        let (parents, collision) = parents.finish();

        let descriptor = TypeDescriptor::new(
            T::TYPE_NAME.to_string(),
            parents,
            TypeId::of::<T>(),
            type_name::<T>(),
        );
        (descriptor, collision)
    }

    fn slot<T: ?Sized + 'static>(&self, name: &str) -> Arc<Slot> {
        if let Some(slot) = self.entries.read().get(name) {
            return slot.clone();
        }
        self.entries
            .write()
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Slot::claim::<T>()))
            .clone()
    }
}
