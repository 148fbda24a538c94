//! Scene loading - instantiate manifest objects and components by type name

use tracing::{debug, info};

use super::component::{Component, ComponentArgs};
use super::manifest::SceneManifest;
use super::object::{GameObject, ObjectArgs};
use super::registry::{ComponentRegistry, GameObjectRegistry};
use super::SceneError;
use crate::rtti::TypeDescriptor;

/// Objects instantiated from a manifest
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<Box<dyn GameObject>>,
}

impl Scene {
    pub fn objects(&self) -> &[Box<dyn GameObject>] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Find an object by name
    pub fn find_by_name(&self, name: &str) -> Option<&dyn GameObject> {
        self.objects
            .iter()
            .map(|o| &**o)
            .find(|o| o.name() == name)
    }

    /// Objects whose type derives from `ancestor`
    pub fn objects_of(&self, ancestor: &TypeDescriptor) -> Vec<&dyn GameObject> {
        self.objects
            .iter()
            .map(|o| &**o)
            .filter(|o| o.type_descriptor().is_subtype_of(ancestor))
            .collect()
    }

    /// All components, across objects, whose type derives from `ancestor`
    pub fn components_of(&self, ancestor: &TypeDescriptor) -> Vec<&dyn Component> {
        self.objects
            .iter()
            .flat_map(|o| o.components().iter())
            .map(|c| &**c)
            .filter(|c| c.type_descriptor().is_subtype_of(ancestor))
            .collect()
    }
}

/// Instantiate every object and component in `manifest`.
///
/// Stops at the first object or component type the registries cannot
/// construct; the error names the object and the offending type.
pub fn load_scene(
    objects: &GameObjectRegistry,
    components: &ComponentRegistry,
    manifest: &SceneManifest,
) -> Result<Scene, SceneError> {
    let mut scene = Scene {
        objects: Vec::with_capacity(manifest.objects.len()),
    };

    for spec in &manifest.objects {
        let args = ObjectArgs {
            name: spec.name.clone(),
            properties: spec.properties.clone(),
        };
        let mut object =
            objects
                .create(&spec.type_name, args)
                .map_err(|source| SceneError::Object {
                    object: spec.name.clone(),
                    source,
                })?;

        for component in &spec.components {
            let args = ComponentArgs {
                owner: spec.name.clone(),
                properties: component.properties.clone(),
            };
            let instance = components
                .create(&component.type_name, args)
                .map_err(|source| SceneError::Component {
                    object: spec.name.clone(),
                    source,
                })?;
            object.attach(instance);
        }

        debug!(
            object = %spec.name,
            object_type = object.type_name(),
            components = object.components().len(),
            "spawned scene object"
        );
        scene.objects.push(object);
    }

    info!(objects = scene.len(), "scene loaded");
    Ok(scene)
}
