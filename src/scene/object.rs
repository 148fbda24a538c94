//! Game objects - named component containers, themselves created by type name
//!
//! ```text
//! GameObject
//! └── SceneObject
//!     └── Camera
//! ```

use std::fmt;

use serde_json::Value;
use uuid::Uuid;

use super::component::{Component, Properties};
use crate::objects::Construct;
use crate::rtti::{descriptor_of, HasTypeInfo, TypeDescriptor, TypeInfo};
use crate::type_info;

/// Type used for manifest objects that do not name one
pub const DEFAULT_OBJECT_TYPE: &str = "SceneObject";

/// Arguments every game object constructor receives
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectArgs {
    /// Object name, unique within a scene by convention only
    pub name: String,
    /// Raw properties from the manifest
    pub properties: Properties,
}

impl ObjectArgs {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            properties: Properties::new(),
        }
    }

    /// Builder-style property setter
    pub fn with_property(mut self, key: &str, value: Value) -> Self {
        self.properties.insert(key.to_string(), value);
        self
    }
}

/// Root of the game object hierarchy
pub trait GameObject: HasTypeInfo + Send + Sync + fmt::Debug {
    /// Unique instance id
    fn id(&self) -> Uuid;

    fn name(&self) -> &str;

    /// Raw properties the object was built from
    fn properties(&self) -> &Properties;

    /// Attached components, in attachment order
    fn components(&self) -> &[Box<dyn Component>];

    /// Attach a component
    fn attach(&mut self, component: Box<dyn Component>);
}

impl<'a> dyn GameObject + 'a {
    /// First component whose type derives from `ancestor`
    pub fn find_component(&self, ancestor: &TypeDescriptor) -> Option<&dyn Component> {
        self.components()
            .iter()
            .map(|c| &**c)
            .find(|c| c.type_descriptor().is_subtype_of(ancestor))
    }

    /// Check if any component's type derives from `T`
    pub fn has_component<T: TypeInfo + ?Sized>(&self) -> bool {
        self.find_component(&descriptor_of::<T>()).is_some()
    }
}

#[derive(Debug)]
struct ObjectBase {
    id: Uuid,
    name: String,
    properties: Properties,
    components: Vec<Box<dyn Component>>,
}

impl ObjectBase {
    fn new(args: ObjectArgs) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: args.name,
            properties: args.properties,
            components: Vec::new(),
        }
    }
}

/// Plain game object with no behavior of its own
#[derive(Debug)]
pub struct SceneObject {
    base: ObjectBase,
}

/// Viewpoint the scene is rendered from
#[derive(Debug)]
pub struct Camera {
    base: ObjectBase,
    pub zoom: f64,
}

type_info!(dyn GameObject as "GameObject");
type_info!(SceneObject: dyn GameObject);
type_info!(Camera: SceneObject);

impl SceneObject {
    fn from_args(args: ObjectArgs) -> Self {
        Self {
            base: ObjectBase::new(args),
        }
    }
}

impl Camera {
    fn from_args(args: ObjectArgs) -> Self {
        Self {
            zoom: args
                .properties
                .get("zoom")
                .and_then(Value::as_f64)
                .unwrap_or(1.0),
            base: ObjectBase::new(args),
        }
    }
}

macro_rules! builtin_objects {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl GameObject for $ty {
                fn id(&self) -> Uuid {
                    self.base.id
                }

                fn name(&self) -> &str {
                    &self.base.name
                }

                fn properties(&self) -> &Properties {
                    &self.base.properties
                }

                fn components(&self) -> &[Box<dyn Component>] {
                    &self.base.components
                }

                fn attach(&mut self, component: Box<dyn Component>) {
                    self.base.components.push(component);
                }
            }

            impl Construct<dyn GameObject, ObjectArgs> for $ty {
                fn construct(args: ObjectArgs) -> Box<dyn GameObject> {
                    Box::new($ty::from_args(args))
                }
            }
        )+
    };
}

builtin_objects!(SceneObject, Camera);
