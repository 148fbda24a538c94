//! Name-keyed constructor table producing polymorphic instances

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// A stored constructor: takes the argument bundle, returns the boxed base
pub type Constructor<B, A> = Arc<dyn Fn(A) -> Box<B> + Send + Sync>;

/// What registering an already-registered key does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Last registration wins (logged as a warning)
    #[default]
    Overwrite,
    /// Keep the first registration and report `DuplicateKey`
    Reject,
}

/// Factory errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactoryError {
    #[error("no constructor registered for key '{0}'")]
    UnknownKey(String),

    #[error("a constructor is already registered for key '{0}'")]
    DuplicateKey(String),

    #[error("type '{type_name}' does not derive from '{root}'")]
    NotDerived { type_name: String, root: String },
}

/// Creates `B` instances from a string key plus an argument bundle `A`.
///
/// Several constructor arguments are passed as a tuple. Registration goes
/// through `&self`, so a factory can live in a
/// [`LazySingleton`](super::LazySingleton) and be filled during startup.
pub struct Factory<B: ?Sized, A = ()> {
    constructors: RwLock<HashMap<String, Constructor<B, A>>>,
    policy: DuplicatePolicy,
}

impl<B: ?Sized, A> Factory<B, A> {
    /// Create an empty factory with the default duplicate policy
    pub fn new() -> Self {
        Self::with_policy(DuplicatePolicy::default())
    }

    /// Create an empty factory with the given duplicate policy
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            constructors: RwLock::new(HashMap::new()),
            policy,
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Register (or, under `Overwrite`, replace) the constructor for `key`
    pub fn register_constructor<F>(
        &self,
        key: impl Into<String>,
        ctor: F,
    ) -> Result<(), FactoryError>
    where
        F: Fn(A) -> Box<B> + Send + Sync + 'static,
    {
        let key = key.into();
        let mut constructors = self.constructors.write();

        if constructors.contains_key(&key) {
            match self.policy {
                DuplicatePolicy::Reject => return Err(FactoryError::DuplicateKey(key)),
                DuplicatePolicy::Overwrite => {
                    warn!(key = %key, "overwriting registered constructor");
                }
            }
        } else {
            debug!(key = %key, "registered constructor");
        }

        constructors.insert(key, Arc::new(ctor));
        Ok(())
    }

    /// Construct the type registered under `key`.
    ///
    /// The table lock is released before the constructor runs, so
    /// constructors may use the factory themselves. A panicking constructor
    /// propagates to the caller untouched.
    pub fn create(&self, key: &str, args: A) -> Result<Box<B>, FactoryError> {
        let ctor = self
            .constructors
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| FactoryError::UnknownKey(key.to_string()))?;
        Ok(ctor(args))
    }

    /// Construct the type registered under `key`, or `None` if unknown
    pub fn try_create(&self, key: &str, args: A) -> Option<Box<B>> {
        let ctor = self.constructors.read().get(key).cloned()?;
        Some(ctor(args))
    }

    /// Check if a constructor is registered for `key`
    pub fn contains(&self, key: &str) -> bool {
        self.constructors.read().contains_key(key)
    }

    /// All registered keys, sorted
    pub fn registered_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.constructors.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.constructors.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.read().is_empty()
    }
}

impl<B: ?Sized, A> Default for Factory<B, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: ?Sized, A> fmt::Debug for Factory<B, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("keys", &self.registered_keys())
            .field("policy", &self.policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI32, Ordering};

    use super::*;

    trait Animal: Send {
        fn kind(&self) -> &'static str;
        fn legs(&self) -> u32;
    }

    struct Dog {
        legs: u32,
    }

    struct Bird {
        legs: u32,
    }

    impl Animal for Dog {
        fn kind(&self) -> &'static str {
            "dog"
        }
        fn legs(&self) -> u32 {
            self.legs
        }
    }

    impl Animal for Bird {
        fn kind(&self) -> &'static str {
            "bird"
        }
        fn legs(&self) -> u32 {
            self.legs
        }
    }

    fn animals() -> Factory<dyn Animal, u32> {
        let factory: Factory<dyn Animal, u32> = Factory::new();
        factory
            .register_constructor("Dog", |legs| Box::new(Dog { legs }) as Box<dyn Animal>)
            .unwrap();
        factory
            .register_constructor("Bird", |legs| Box::new(Bird { legs }) as Box<dyn Animal>)
            .unwrap();
        factory
    }

    #[test]
    fn test_create_registered_type() {
        let factory = animals();
        let dog = factory.create("Dog", 4).unwrap();
        assert_eq!(dog.kind(), "dog");
        assert_eq!(dog.legs(), 4);

        let bird = factory.try_create("Bird", 2).unwrap();
        assert_eq!(bird.kind(), "bird");
    }

    #[test]
    fn test_create_unknown_key() {
        let factory = animals();
        assert_eq!(
            factory.create("Cat", 4).err(),
            Some(FactoryError::UnknownKey("Cat".to_string()))
        );
        assert!(factory.try_create("Cat", 4).is_none());
        assert_eq!(
            factory.create("Cat", 4).err().unwrap().to_string(),
            "no constructor registered for key 'Cat'"
        );
    }

    #[test]
    fn test_arguments_reach_constructor() {
        struct Counter;
        impl Animal for Counter {
            fn kind(&self) -> &'static str {
                "counter"
            }
            fn legs(&self) -> u32 {
                0
            }
        }

        let factory: Factory<dyn Animal, (Arc<AtomicI32>, i32)> = Factory::new();
        factory
            .register_constructor("Counter", |(value, delta): (Arc<AtomicI32>, i32)| {
                value.fetch_add(delta, Ordering::SeqCst);
                Box::new(Counter) as Box<dyn Animal>
            })
            .unwrap();

        let value = Arc::new(AtomicI32::new(2));
        factory.create("Counter", (value.clone(), -1)).unwrap();
        assert_eq!(value.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_overwrite_policy_keeps_last_registration() {
        let factory: Factory<dyn Animal, u32> = Factory::new();
        assert_eq!(factory.policy(), DuplicatePolicy::Overwrite);

        factory
            .register_constructor("Dup", |legs| Box::new(Dog { legs }) as Box<dyn Animal>)
            .unwrap();
        factory
            .register_constructor("Dup", |legs| Box::new(Bird { legs }) as Box<dyn Animal>)
            .unwrap();

        assert_eq!(factory.len(), 1);
        assert_eq!(factory.create("Dup", 2).unwrap().kind(), "bird");
    }

    #[test]
    fn test_reject_policy_keeps_first_registration() {
        let factory: Factory<dyn Animal, u32> = Factory::with_policy(DuplicatePolicy::Reject);
        factory
            .register_constructor("Dup", |legs| Box::new(Dog { legs }) as Box<dyn Animal>)
            .unwrap();

        let err = factory
            .register_constructor("Dup", |legs| Box::new(Bird { legs }) as Box<dyn Animal>)
            .unwrap_err();
        assert_eq!(err, FactoryError::DuplicateKey("Dup".to_string()));
        assert_eq!(factory.create("Dup", 4).unwrap().kind(), "dog");
    }

    #[test]
    fn test_registered_keys() {
        let factory = animals();
        assert_eq!(factory.registered_keys(), vec!["Bird", "Dog"]);
        assert!(factory.contains("Dog"));
        assert!(!factory.contains("dog"));
        assert!(!factory.is_empty());
        assert!(Factory::<dyn Animal, u32>::new().is_empty());
    }

    #[test]
    fn test_constructor_may_use_factory() {
        struct Pack(Vec<Box<dyn Animal>>);
        impl Animal for Pack {
            fn kind(&self) -> &'static str {
                "pack"
            }
            fn legs(&self) -> u32 {
                self.0.iter().map(|a| a.legs()).sum()
            }
        }

        let factory = Arc::new(animals());
        let inner = Arc::downgrade(&factory);
        factory
            .register_constructor("Pack", move |size| {
                let factory = inner.upgrade().unwrap();
                let members = (0..size)
                    .map(|_| factory.create("Dog", 4).unwrap())
                    .collect();
                Box::new(Pack(members)) as Box<dyn Animal>
            })
            .unwrap();

        assert_eq!(factory.create("Pack", 3).unwrap().legs(), 12);
    }

    #[test]
    fn test_duplicate_policy_serde() {
        assert_eq!(
            serde_json::to_string(&DuplicatePolicy::Reject).unwrap(),
            "\"reject\""
        );
        let policy: DuplicatePolicy = serde_json::from_str("\"overwrite\"").unwrap();
        assert_eq!(policy, DuplicatePolicy::Overwrite);
    }
}
