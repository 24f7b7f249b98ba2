//! Renderable units - opaque component handles plus property bags
//!
//! The renderer owns what a component actually is. The model only carries a
//! handle to it and the properties it should be instantiated with.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use anniv_core::{AnnivError, AnnivResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Opaque, shareable reference to a renderer-side component
#[derive(Clone)]
pub struct ComponentHandle {
    name: Arc<str>,
    inner: Arc<dyn Any + Send + Sync>,
}

impl ComponentHandle {
    pub fn new<T: Any + Send + Sync>(name: &str, component: T) -> Self {
        Self {
            name: Arc::from(name),
            inner: Arc::new(component),
        }
    }

    /// Name for logs and debugging
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Recover the renderer's concrete component type
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    pub fn ptr_eq(&self, other: &ComponentHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ComponentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Component({})", self.name)
    }
}

/// How the renderer should find the component to instantiate
#[derive(Debug, Clone)]
pub enum ComponentRef {
    /// A component value
    Handle(ComponentHandle),
    /// A constructor the renderer calls to build the element
    Constructor(ComponentHandle),
    /// A registered element tag
    Tag(String),
}

impl ComponentRef {
    pub fn tag(tag: impl Into<String>) -> Self {
        ComponentRef::Tag(tag.into())
    }

    /// Handle name or tag text
    pub fn label(&self) -> &str {
        match self {
            ComponentRef::Handle(h) | ComponentRef::Constructor(h) => h.name(),
            ComponentRef::Tag(tag) => tag.as_str(),
        }
    }

    /// Same handle, or equal tag text
    pub fn same_as(&self, other: &ComponentRef) -> bool {
        match (self, other) {
            (ComponentRef::Handle(a), ComponentRef::Handle(b))
            | (ComponentRef::Constructor(a), ComponentRef::Constructor(b)) => a.ptr_eq(b),
            (ComponentRef::Tag(a), ComponentRef::Tag(b)) => a == b,
            _ => false,
        }
    }
}

/// Shared, read-only property map handed to a component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBag(Arc<Map<String, Value>>);

impl PropertyBag {
    pub fn new(props: Map<String, Value>) -> Self {
        Self(Arc::new(props))
    }

    /// Bag from a JSON value, which must be an object
    pub fn from_json(value: Value) -> AnnivResult<Self> {
        match value {
            Value::Object(map) => Ok(Self::new(map)),
            other => Err(AnnivError::InvalidContent(format!(
                "component props must be an object, got {}",
                other
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn ptr_eq(&self, other: &PropertyBag) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Serialize for PropertyBag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PropertyBag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(PropertyBag::new)
    }
}

/// A component reference plus the properties to instantiate it with
#[derive(Debug, Clone)]
pub struct Renderable {
    pub component: ComponentRef,
    pub props: Option<PropertyBag>,
}

impl Renderable {
    pub fn new(component: ComponentRef) -> Self {
        Self {
            component,
            props: None,
        }
    }

    pub fn with_props(mut self, props: PropertyBag) -> Self {
        self.props = Some(props);
        self
    }
}
