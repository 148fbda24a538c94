//! Component and game object registries pre-populated with the built-ins

use std::ops::Deref;

use super::component::{
    Circle, Collider, Component, ComponentArgs, Rectangle, RectangleCollider, Text, Transform,
};
use super::object::{Camera, GameObject, ObjectArgs, SceneObject};
use crate::objects::ObjectRegistry;
use crate::patterns::{DuplicatePolicy, FactoryError};
use crate::rtti::TypeRegistry;

/// Registry used to create [`Component`] instances by type name
///
/// Dereferences to the underlying [`ObjectRegistry`], so game code can
/// register its own components next to the built-in ones.
#[derive(Debug)]
pub struct ComponentRegistry {
    inner: ObjectRegistry<'static, dyn Component, ComponentArgs>,
}

impl ComponentRegistry {
    /// Create a registry with the built-in components and the default policy
    pub fn new() -> Result<Self, FactoryError> {
        Self::with_policy(DuplicatePolicy::default())
    }

    /// Create a registry with the built-in components
    pub fn with_policy(policy: DuplicatePolicy) -> Result<Self, FactoryError> {
        let registry = Self {
            inner: ObjectRegistry::with_types(TypeRegistry::global(), policy),
        };
        registry.register_builtin_components()?;
        Ok(registry)
    }

    fn register_builtin_components(&self) -> Result<(), FactoryError> {
        self.inner.register_type::<Transform>()?;
        self.inner.register_type::<Rectangle>()?;
        self.inner.register_type::<Circle>()?;
        self.inner.register_type::<Text>()?;
        self.inner.register_type::<Collider>()?;
        self.inner.register_type::<RectangleCollider>()?;
        Ok(())
    }
}

impl Deref for ComponentRegistry {
    type Target = ObjectRegistry<'static, dyn Component, ComponentArgs>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Registry used to create [`GameObject`] instances by type name
#[derive(Debug)]
pub struct GameObjectRegistry {
    inner: ObjectRegistry<'static, dyn GameObject, ObjectArgs>,
}

impl GameObjectRegistry {
    /// Create a registry with the built-in object types and the default policy
    pub fn new() -> Result<Self, FactoryError> {
        Self::with_policy(DuplicatePolicy::default())
    }

    /// Create a registry with the built-in object types
    pub fn with_policy(policy: DuplicatePolicy) -> Result<Self, FactoryError> {
        let registry = Self {
            inner: ObjectRegistry::with_types(TypeRegistry::global(), policy),
        };
        registry.inner.register_type::<SceneObject>()?;
        registry.inner.register_type::<Camera>()?;
        Ok(registry)
    }
}

impl Deref for GameObjectRegistry {
    type Target = ObjectRegistry<'static, dyn GameObject, ObjectArgs>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::Construct;
    use crate::rtti::descriptor_of;
    use crate::scene::Shape;

    #[derive(Debug)]
    struct Sprite {
        args: ComponentArgs,
    }

    crate::type_info!(Sprite: Shape);

    impl Component for Sprite {
        fn id(&self) -> uuid::Uuid {
            uuid::Uuid::nil()
        }

        fn owner(&self) -> &str {
            &self.args.owner
        }

        fn properties(&self) -> &crate::scene::Properties {
            &self.args.properties
        }
    }

    impl Construct<dyn Component, ComponentArgs> for Sprite {
        fn construct(args: ComponentArgs) -> Box<dyn Component> {
            Box::new(Sprite { args })
        }
    }

    /// Builds a game object but declares itself a shape
    struct Impostor;

    crate::type_info!(Impostor: Shape);

    impl Construct<dyn GameObject, ObjectArgs> for Impostor {
        fn construct(args: ObjectArgs) -> Box<dyn GameObject> {
            SceneObject::construct(args)
        }
    }

    #[test]
    fn test_builtin_components_registered() {
        let registry = ComponentRegistry::new().unwrap();
        assert_eq!(
            registry.registered_types(),
            vec![
                "Circle",
                "Collider",
                "Rectangle",
                "RectangleCollider",
                "Text",
                "Transform"
            ]
        );
        assert!(!registry.contains("Shape"));
        assert!(!registry.contains("Component"));
    }

    #[test]
    fn test_create_builtin_by_name() {
        let registry = ComponentRegistry::new().unwrap();
        let circle = registry
            .create("Circle", ComponentArgs::new("sun"))
            .unwrap();
        assert_eq!(circle.type_name(), "Circle");
        assert_eq!(circle.owner(), "sun");
        assert!(circle
            .type_descriptor()
            .is_subtype_of(&descriptor_of::<Shape>()));
    }

    #[test]
    fn test_register_custom_component() {
        let registry = ComponentRegistry::with_policy(DuplicatePolicy::Reject).unwrap();
        registry.register_type::<Sprite>().unwrap();

        let sprite = registry
            .create("Sprite", ComponentArgs::new("hero"))
            .unwrap();
        assert_eq!(sprite.owner(), "hero");
        assert!(registry.descriptor("Sprite").is_some());
    }

    #[test]
    fn test_builtin_objects_registered() {
        let registry = GameObjectRegistry::new().unwrap();
        assert_eq!(registry.registered_types(), vec!["Camera", "SceneObject"]);
        assert!(!registry.contains("GameObject"));

        let camera = registry.create("Camera", ObjectArgs::new("main")).unwrap();
        assert_eq!(camera.name(), "main");
        assert!(camera
            .type_descriptor()
            .is_subtype_of(&descriptor_of::<SceneObject>()));
    }

    #[test]
    fn test_register_non_object_type_fails() {
        let registry = GameObjectRegistry::with_policy(DuplicatePolicy::Reject).unwrap();
        assert_eq!(
            registry.register_type::<Impostor>(),
            Err(FactoryError::NotDerived {
                type_name: "Impostor".to_string(),
                root: "GameObject".to_string(),
            })
        );
    }

    #[test]
    fn test_registries_are_independent() {
        let a = ComponentRegistry::new().unwrap();
        let b = ComponentRegistry::new().unwrap();
        a.register_type::<Sprite>().unwrap();
        assert!(a.contains("Sprite"));
        assert!(!b.contains("Sprite"));
    }
}
