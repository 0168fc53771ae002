//! Declarative binding tables.
//!
//! A [`BindingTable<B>`] is the compile-time description of what the binder
//! must do for behaviour `B`: an ordered list of [`Annotation`]s plus the named
//! member slots annotations may target. Member slots carry a typed setter
//! closure, so binding a member is a map lookup and a call, not reflection.
//!
//! # Example
//!
//! ```ignore
//! #[derive(Component, Default)]
//! struct Turret {
//!     collider: Option<Attached<BoxCollider>>,
//! }
//!
//! let table = BindingTable::<Turret>::new()
//!     .member("collider", |t: &mut Turret, c| t.collider = Some(c))
//!     .attach::<BoxCollider>(Some("collider"), false)
//!     .attach::<RigidBody>(None, true)
//!     .tag("Enemy");
//! ```

use std::fmt;

use bevy_ecs::prelude::*;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::binder::BindError;
use crate::components::attached::Attached;
use crate::resources::componentregistry::{ComponentKey, ComponentRegistry};

/// One declarative instruction of a behaviour type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// Ensure `component` exists; optionally bind it into `member`.
    AttachByType {
        component: ComponentKey,
        member: Option<String>,
        start_enabled: bool,
    },
    /// Ensure `component` exists and bind it into `field`.
    AttachToField {
        component: ComponentKey,
        field: String,
        start_enabled: bool,
    },
    /// Set the entity's [`EntityTag`](crate::components::tag::EntityTag).
    TagEntity(String),
}

impl Annotation {
    /// The requested component, if this annotation attaches one.
    pub fn component(&self) -> Option<ComponentKey> {
        match self {
            Annotation::AttachByType { component, .. }
            | Annotation::AttachToField { component, .. } => Some(*component),
            Annotation::TagEntity(_) => None,
        }
    }

    /// The member to bind into. Empty names count as no member.
    pub fn target_member(&self) -> Option<&str> {
        let name = match self {
            Annotation::AttachByType { member, .. } => member.as_deref(),
            Annotation::AttachToField { field, .. } => Some(field.as_str()),
            Annotation::TagEntity(_) => None,
        };
        name.filter(|n| !n.is_empty())
    }

    /// Initial enabled state requested by an attach annotation; `None` for tags.
    pub fn start_enabled(&self) -> Option<bool> {
        match self {
            Annotation::AttachByType { start_enabled, .. }
            | Annotation::AttachToField { start_enabled, .. } => Some(*start_enabled),
            Annotation::TagEntity(_) => None,
        }
    }
}

type Setter<B> = Box<dyn Fn(&mut B, Entity) + Send + Sync>;

/// A named, typed slot on behaviour `B`.
///
/// A slot without a setter is read-only.
pub struct MemberSlot<B> {
    name: String,
    key: ComponentKey,
    setter: Option<Setter<B>>,
}

impl<B> MemberSlot<B> {
    /// Member name as declared on the table.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Component type the slot holds a handle to.
    pub fn key(&self) -> ComponentKey {
        self.key
    }

    /// Whether the member has a setter.
    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    /// Write a handle to the component on `entity`. Returns `false` for
    /// read-only slots.
    pub fn assign(&self, behaviour: &mut B, entity: Entity) -> bool {
        match &self.setter {
            Some(set) => {
                set(behaviour, entity);
                true
            }
            None => false,
        }
    }
}

impl<B> fmt::Debug for MemberSlot<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberSlot")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("writable", &self.is_writable())
            .finish()
    }
}

/// Annotations and member slots for behaviour `B`.
pub struct BindingTable<B> {
    annotations: SmallVec<[Annotation; 4]>,
    members: FxHashMap<String, MemberSlot<B>>,
}

impl<B> Default for BindingTable<B> {
    fn default() -> Self {
        Self {
            annotations: SmallVec::new(),
            members: FxHashMap::default(),
        }
    }
}

impl<B> fmt::Debug for BindingTable<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingTable")
            .field("behaviour", &std::any::type_name::<B>())
            .field("annotations", &self.annotations)
            .field("members", &self.members.len())
            .finish()
    }
}

impl<B> BindingTable<B> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an annotation as is.
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// `AttachByType`: ensure a `T` exists, binding it into `member` if named.
    pub fn attach<T: 'static>(self, member: Option<&str>, start_enabled: bool) -> Self {
        self.annotate(Annotation::AttachByType {
            component: ComponentKey::of::<T>(),
            member: member.map(str::to_owned),
            start_enabled,
        })
    }

    /// `AttachToField`: ensure a `T` exists and bind it into `field`.
    pub fn attach_to_field<T: 'static>(self, field: &str, start_enabled: bool) -> Self {
        self.annotate(Annotation::AttachToField {
            component: ComponentKey::of::<T>(),
            field: field.to_owned(),
            start_enabled,
        })
    }

    /// `TagEntity`: set the entity tag to `tag`.
    pub fn tag(self, tag: impl Into<String>) -> Self {
        self.annotate(Annotation::TagEntity(tag.into()))
    }

    /// Declare a writable member holding an [`Attached<T>`].
    pub fn member<T, F>(mut self, name: &str, setter: F) -> Self
    where
        B: 'static,
        T: Component,
        F: Fn(&mut B, Attached<T>) + Send + Sync + 'static,
    {
        let setter: Setter<B> = Box::new(move |b: &mut B, e: Entity| setter(b, Attached::new(e)));
        self.members.insert(
            name.to_owned(),
            MemberSlot {
                name: name.to_owned(),
                key: ComponentKey::of::<T>(),
                setter: Some(setter),
            },
        );
        self
    }

    /// Declare a member of type `T` that cannot be assigned.
    pub fn read_only_member<T: 'static>(mut self, name: &str) -> Self {
        self.members.insert(
            name.to_owned(),
            MemberSlot {
                name: name.to_owned(),
                key: ComponentKey::of::<T>(),
                setter: None,
            },
        );
        self
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn slot(&self, name: &str) -> Option<&MemberSlot<B>> {
        self.members.get(name)
    }

    /// Look up `name` as a writable slot of type `requested`.
    pub fn resolve_member(
        &self,
        name: &str,
        requested: ComponentKey,
    ) -> Result<&MemberSlot<B>, BindError> {
        let behaviour = std::any::type_name::<B>();
        let slot = self.members.get(name).ok_or_else(|| BindError::MissingMember {
            behaviour,
            member: name.to_owned(),
        })?;
        if !slot.is_writable() {
            return Err(BindError::ReadOnlyMember {
                behaviour,
                member: name.to_owned(),
            });
        }
        if slot.key != requested {
            return Err(BindError::MemberTypeMismatch {
                behaviour,
                member: name.to_owned(),
                expected: requested.name(),
                found: slot.key.name(),
            });
        }
        Ok(slot)
    }

    /// Run every check the binder would run, without a world.
    ///
    /// Stops at the first problem, in annotation order.
    pub fn validate(&self, registry: &ComponentRegistry) -> Result<(), BindError> {
        let behaviour = std::any::type_name::<B>();
        for annotation in &self.annotations {
            if let Annotation::TagEntity(tag) = annotation {
                if tag.is_empty() {
                    return Err(BindError::EmptyTag { behaviour });
                }
                continue;
            }
            let Some(key) = annotation.component() else {
                continue;
            };
            if !registry.contains(&key) {
                return Err(BindError::UnsupportedComponentType {
                    behaviour,
                    component: key.name(),
                });
            }
            if let Some(name) = annotation.target_member() {
                self.resolve_member(name, key)?;
            }
        }
        Ok(())
    }
}
