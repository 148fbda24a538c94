//! Scene system - game objects assembled from components created by name
//!
//! A [`SceneManifest`] lists objects, their types and the type names of
//! their components; [`load_scene`] resolves object types through a
//! [`GameObjectRegistry`], component types through a [`ComponentRegistry`],
//! and returns the instantiated [`Scene`].

mod component;
mod loader;
mod manifest;
mod object;
mod registry;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::patterns::FactoryError;

pub use component::{
    Circle, Collider, Component, ComponentArgs, Properties, Rectangle, RectangleCollider,
    Renderable, Shape, Text, Transform,
};
pub use loader::{load_scene, Scene};
pub use manifest::{ComponentSpec, ObjectSpec, SceneManifest};
pub use object::{Camera, GameObject, ObjectArgs, SceneObject, DEFAULT_OBJECT_TYPE};
pub use registry::{ComponentRegistry, GameObjectRegistry};

/// Scene loading errors
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene manifest {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid scene manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("object '{object}': cannot create object: {source}")]
    Object {
        object: String,
        #[source]
        source: FactoryError,
    },

    #[error("object '{object}': {source}")]
    Component {
        object: String,
        #[source]
        source: FactoryError,
    },
}
