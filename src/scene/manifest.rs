//! Scene manifests - JSON descriptions of objects and their components

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::component::Properties;
use super::object::DEFAULT_OBJECT_TYPE;
use super::SceneError;

/// A scene as read from disk
///
/// ```json
/// {
///   "objects": [
///     {
///       "name": "player",
///       "type": "SceneObject",
///       "components": [
///         { "type": "Transform", "properties": { "x": 10, "y": 4 } },
///         { "type": "RectangleCollider" }
///       ]
///     },
///     { "name": "main", "type": "Camera", "properties": { "zoom": 2 } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneManifest {
    #[serde(default)]
    pub objects: Vec<ObjectSpec>,
}

/// One scene object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSpec {
    pub name: String,
    /// Registered game object type, `SceneObject` when omitted
    #[serde(rename = "type", default = "default_object_type")]
    pub type_name: String,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub components: Vec<ComponentSpec>,
}

fn default_object_type() -> String {
    DEFAULT_OBJECT_TYPE.to_string()
}

/// One component, named by its registered type name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpec {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub properties: Properties,
}

impl SceneManifest {
    /// Parse a manifest from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a manifest file
    pub fn from_path(path: &Path) -> Result<Self, SceneError> {
        let json = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Every component type name referenced by the manifest, in order of
    /// first appearance
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for component in self.objects.iter().flat_map(|o| &o.components) {
            if !names.contains(&component.type_name.as_str()) {
                names.push(&component.type_name);
            }
        }
        names
    }
}
