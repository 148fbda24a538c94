//! Reusable construction patterns: lazy singletons and keyed factories

mod factory;
mod singleton;

pub use factory::{Constructor, DuplicatePolicy, Factory, FactoryError};
pub use singleton::{InitStrategy, LazySingleton};
