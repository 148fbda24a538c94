//! Object system - polymorphic objects constructed by type name

mod registry;

pub use registry::{Construct, ObjectRegistry};
