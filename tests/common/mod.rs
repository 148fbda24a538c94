//! Common test fixtures - a small type hierarchy rooted at `dyn Base`
//!
//! ```text
//! Base
//! └── Middle     Mixin
//!     ├── Leaf     │
//!     └── Hybrid ──┘
//!
//! Other (unrelated)
//! ```

#![allow(dead_code)]

use typereg::{type_info, Construct, HasTypeInfo};

/// Root of the fixture hierarchy
pub trait Base: HasTypeInfo + Send + Sync {
    fn label(&self) -> &str;
}

#[derive(Debug, Default)]
pub struct Middle {
    pub label: String,
}

#[derive(Debug, Default)]
pub struct Leaf {
    pub label: String,
}

#[derive(Debug, Default)]
pub struct Hybrid {
    pub label: String,
}

pub struct Mixin;

pub struct Other;

type_info!(dyn Base as "Base");
type_info!(Middle: dyn Base);
type_info!(Leaf: Middle);
type_info!(Mixin);
type_info!(Hybrid: Middle, Mixin);
type_info!(Other);

macro_rules! fixture {
    ($($ty:ident),+) => {
        $(
            impl Base for $ty {
                fn label(&self) -> &str {
                    &self.label
                }
            }

            impl Construct<dyn Base, String> for $ty {
                fn construct(label: String) -> Box<dyn Base> {
                    Box::new($ty { label })
                }
            }
        )+
    };
}

fixture!(Middle, Leaf, Hybrid);
