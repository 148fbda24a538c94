//! Scene components - the built-in polymorphic hierarchy
//!
//! ```text
//! Component
//! ├── Transform
//! ├── Collider ─────────────────┐
//! └── Renderable                │
//!     ├── Text                  │
//!     └── Shape                 │
//!         ├── Circle            │
//!         └── Rectangle         │
//!             └── RectangleCollider
//! ```
//!
//! `Renderable` and `Shape` are abstract: they have descriptors but no
//! constructor.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;
use uuid::Uuid;

use crate::objects::Construct;
use crate::rtti::HasTypeInfo;
use crate::type_info;

/// Properties are stored as JSON-compatible key-value pairs
pub type Properties = HashMap<String, Value>;

/// Arguments every component constructor receives
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentArgs {
    /// Name of the scene object the component is attached to
    pub owner: String,
    /// Raw properties from the manifest
    pub properties: Properties,
}

impl ComponentArgs {
    pub fn new(owner: &str) -> Self {
        Self {
            owner: owner.to_string(),
            properties: Properties::new(),
        }
    }

    /// Builder-style property setter
    pub fn with_property(mut self, key: &str, value: Value) -> Self {
        self.properties.insert(key.to_string(), value);
        self
    }

    fn f64_or(&self, key: &str, default: f64) -> f64 {
        self.properties
            .get(key)
            .and_then(|v| v.as_f64())
            .unwrap_or(default)
    }

    fn bool_or(&self, key: &str, default: bool) -> bool {
        self.properties
            .get(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(default)
    }

    fn string_or(&self, key: &str, default: &str) -> String {
        self.properties
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or(default)
            .to_string()
    }
}

/// Root of the component hierarchy
pub trait Component: HasTypeInfo + Send + Sync + fmt::Debug {
    /// Unique instance id
    fn id(&self) -> Uuid;

    /// Name of the owning scene object
    fn owner(&self) -> &str;

    /// Raw properties the component was built from
    fn properties(&self) -> &Properties;
}

#[derive(Debug, Clone)]
struct ComponentBase {
    id: Uuid,
    owner: String,
    properties: Properties,
}

impl ComponentBase {
    fn new(args: ComponentArgs) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner: args.owner,
            properties: args.properties,
        }
    }
}

/// Marker for components that draw something
pub struct Renderable;

/// Marker for geometric renderables
pub struct Shape;

/// Position, rotation and uniform scale
#[derive(Debug, Clone)]
pub struct Transform {
    base: ComponentBase,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub scale: f64,
}

/// Axis-aligned rectangle
#[derive(Debug, Clone)]
pub struct Rectangle {
    base: ComponentBase,
    pub width: f64,
    pub height: f64,
    pub filled: bool,
}

#[derive(Debug, Clone)]
pub struct Circle {
    base: ComponentBase,
    pub radius: f64,
    pub filled: bool,
}

/// A line of text
#[derive(Debug, Clone)]
pub struct Text {
    base: ComponentBase,
    pub content: String,
    pub font_size: f64,
}

/// Collision volume without a shape of its own
#[derive(Debug, Clone)]
pub struct Collider {
    base: ComponentBase,
    pub is_trigger: bool,
}

/// A rectangle that also collides
#[derive(Debug, Clone)]
pub struct RectangleCollider {
    base: ComponentBase,
    pub width: f64,
    pub height: f64,
    pub is_trigger: bool,
}

type_info!(dyn Component as "Component");
type_info!(Renderable: dyn Component);
type_info!(Shape: Renderable);
type_info!(Transform: dyn Component);
type_info!(Rectangle: Shape);
type_info!(Circle: Shape);
type_info!(Text: Renderable);
type_info!(Collider: dyn Component);
type_info!(RectangleCollider: Rectangle, Collider);

impl Transform {
    fn from_args(args: ComponentArgs) -> Self {
        Self {
            x: args.f64_or("x", 0.0),
            y: args.f64_or("y", 0.0),
            rotation: args.f64_or("rotation", 0.0),
            scale: args.f64_or("scale", 1.0),
            base: ComponentBase::new(args),
        }
    }
}

impl Rectangle {
    fn from_args(args: ComponentArgs) -> Self {
        Self {
            width: args.f64_or("width", 1.0),
            height: args.f64_or("height", 1.0),
            filled: args.bool_or("filled", true),
            base: ComponentBase::new(args),
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

impl Circle {
    fn from_args(args: ComponentArgs) -> Self {
        Self {
            radius: args.f64_or("radius", 1.0),
            filled: args.bool_or("filled", true),
            base: ComponentBase::new(args),
        }
    }
}

impl Text {
    fn from_args(args: ComponentArgs) -> Self {
        Self {
            content: args.string_or("content", ""),
            font_size: args.f64_or("font_size", 12.0),
            base: ComponentBase::new(args),
        }
    }
}

impl Collider {
    fn from_args(args: ComponentArgs) -> Self {
        Self {
            is_trigger: args.bool_or("is_trigger", false),
            base: ComponentBase::new(args),
        }
    }
}

impl RectangleCollider {
    fn from_args(args: ComponentArgs) -> Self {
        Self {
            width: args.f64_or("width", 1.0),
            height: args.f64_or("height", 1.0),
            is_trigger: args.bool_or("is_trigger", false),
            base: ComponentBase::new(args),
        }
    }
}

macro_rules! builtin_components {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl Component for $ty {
                fn id(&self) -> Uuid {
                    self.base.id
                }

                fn owner(&self) -> &str {
                    &self.base.owner
                }

                fn properties(&self) -> &Properties {
                    &self.base.properties
                }
            }

            impl Construct<dyn Component, ComponentArgs> for $ty {
                fn construct(args: ComponentArgs) -> Box<dyn Component> {
                    Box::new($ty::from_args(args))
                }
            }
        )+
    };
}

builtin_components!(Transform, Rectangle, Circle, Text, Collider, RectangleCollider);
