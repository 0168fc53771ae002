//! Declarative component binder.
//!
//! [`bind`] applies the [`BindingTable`] registered for a behaviour type to one
//! behaviour entity: it makes sure every requested component exists on the
//! entity, writes typed handles into the named members, sets initial enabled
//! states and applies the entity tag.
//!
//! # Flow per annotation
//!
//! 1. The requested type must be registered in the [`ComponentRegistry`]
//! 2. The component is fetched or inserted (existing instances are kept)
//! 3. A named member is resolved on the table (missing, read-only, wrong type)
//! 4. The member setter receives an [`Attached`](crate::components::attached::Attached) handle
//! 5. Components with an enabled state (see [`Attachable`](crate::components::activatable::Attachable)) get `start_enabled` applied
//!
//! `TagEntity` annotations overwrite the entity's [`EntityTag`].
//!
//! The first error aborts the call. Annotations processed before it keep
//! their effects on the entity.
//!
//! # Usage
//!
//! ```ignore
//! setup_binder(&mut world, BinderConfig::new());
//! world.resource_mut::<ComponentRegistry>().register::<BoxCollider>();
//! register_behaviour::<Turret>(&mut world)?;
//!
//! let turret = world.spawn(Turret::default()).id();
//! bind::<Turret>(&mut world, turret)?;
//! ```

use bevy_ecs::component::Mutable;
use bevy_ecs::prelude::*;
use log::debug;
use thiserror::Error;

use crate::components::tag::EntityTag;
use crate::resources::behaviourregistry::BehaviourRegistry;
use crate::resources::binderconfig::BinderConfig;
use crate::resources::bindingtable::{Annotation, BindingTable};
use crate::resources::componentregistry::ComponentRegistry;

/// A component whose type declares a binding table.
pub trait Behaviour: Component<Mutability = Mutable> + Sized {
    /// Build the binding table for this type. Called once at registration.
    fn bindings() -> BindingTable<Self>;
}

/// Authoring errors detected while registering or binding a behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("{behaviour}: {component} is not a registered attachable component type")]
    UnsupportedComponentType {
        behaviour: &'static str,
        component: &'static str,
    },
    #[error("{behaviour}: no such field or property `{member}`")]
    MissingMember {
        behaviour: &'static str,
        member: String,
    },
    #[error("{behaviour}: member `{member}` is read-only")]
    ReadOnlyMember {
        behaviour: &'static str,
        member: String,
    },
    #[error("{behaviour}: member `{member}` holds {found}, but {expected} was requested")]
    MemberTypeMismatch {
        behaviour: &'static str,
        member: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{behaviour}: tag annotation has an empty tag")]
    EmptyTag { behaviour: &'static str },
    #[error("{behaviour}: behaviour type is not registered")]
    UnregisteredBehaviour { behaviour: &'static str },
    #[error("{behaviour}: entity {entity} does not exist")]
    NoSuchEntity {
        behaviour: &'static str,
        entity: Entity,
    },
    #[error("{behaviour}: entity {entity} has no {behaviour} component")]
    MissingBehaviour {
        behaviour: &'static str,
        entity: Entity,
    },
}

impl BindError {
    /// Type name of the behaviour the error belongs to.
    pub fn behaviour(&self) -> &'static str {
        match self {
            BindError::UnsupportedComponentType { behaviour, .. }
            | BindError::MissingMember { behaviour, .. }
            | BindError::ReadOnlyMember { behaviour, .. }
            | BindError::MemberTypeMismatch { behaviour, .. }
            | BindError::EmptyTag { behaviour }
            | BindError::UnregisteredBehaviour { behaviour }
            | BindError::NoSuchEntity { behaviour, .. }
            | BindError::MissingBehaviour { behaviour, .. } => behaviour,
        }
    }
}

/// What a successful [`bind`] call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BindReport {
    /// Components inserted by this call.
    pub created: usize,
    /// Requested components that were already present.
    pub reused: usize,
    /// Members written.
    pub bound: usize,
    /// Components whose enabled state was applied.
    pub enabled_set: usize,
    /// Whether a tag was written.
    pub tagged: bool,
}

/// Insert the binder resources if they are missing.
pub fn setup_binder(world: &mut World, config: BinderConfig) {
    world.insert_resource(config);
    world.init_resource::<ComponentRegistry>();
    world.init_resource::<BehaviourRegistry>();
}

/// Register `B` using the world's [`ComponentRegistry`] and [`BinderConfig`].
pub fn register_behaviour<B: Behaviour>(world: &mut World) -> Result<(), BindError> {
    world.init_resource::<ComponentRegistry>();
    world.init_resource::<BehaviourRegistry>();
    let validate = world
        .get_resource::<BinderConfig>()
        .map(|c| c.validate_on_register)
        .unwrap_or(true);
    world.resource_scope(|world, mut behaviours: Mut<BehaviourRegistry>| {
        let components = world.resource::<ComponentRegistry>();
        behaviours.register::<B>(components, validate)
    })
}

/// Apply the binding table of `B` to `entity`.
pub fn bind<B: Behaviour>(world: &mut World, entity: Entity) -> Result<BindReport, BindError> {
    let behaviour = std::any::type_name::<B>();
    let table = world
        .get_resource::<BehaviourRegistry>()
        .and_then(|r| r.get::<B>())
        .ok_or(BindError::UnregisteredBehaviour { behaviour })?;

    match world.get_entity(entity) {
        Ok(e) if e.contains::<B>() => {}
        Ok(_) => return Err(BindError::MissingBehaviour { behaviour, entity }),
        Err(_) => return Err(BindError::NoSuchEntity { behaviour, entity }),
    }

    let mut report = BindReport::default();
    for annotation in table.annotations() {
        match annotation {
            Annotation::TagEntity(tag) => {
                if tag.is_empty() {
                    return Err(BindError::EmptyTag { behaviour });
                }
                world.entity_mut(entity).insert(EntityTag::new(tag.clone()));
                report.tagged = true;
                debug!("{}: tagged {} as {:?}", behaviour, entity, tag);
            }
            Annotation::AttachByType { .. } | Annotation::AttachToField { .. } => {
                attach(world, entity, &table, annotation, &mut report)?;
            }
        }
    }
    Ok(report)
}

fn attach<B: Behaviour>(
    world: &mut World,
    entity: Entity,
    table: &BindingTable<B>,
    annotation: &Annotation,
    report: &mut BindReport,
) -> Result<(), BindError> {
    let behaviour = std::any::type_name::<B>();
    let Some(key) = annotation.component() else {
        return Ok(());
    };
    let kind = world
        .get_resource::<ComponentRegistry>()
        .and_then(|r| r.get(&key))
        .cloned()
        .ok_or(BindError::UnsupportedComponentType {
            behaviour,
            component: key.name(),
        })?;

    let mut entity_mut = world.entity_mut(entity);
    if kind.get_or_insert(&mut entity_mut) {
        report.created += 1;
        debug!("{}: attached new {} to {}", behaviour, key, entity);
    } else {
        report.reused += 1;
        debug!("{}: reusing existing {} on {}", behaviour, key, entity);
    }

    if let Some(name) = annotation.target_member() {
        let slot = table.resolve_member(name, key)?;
        let Some(mut target) = entity_mut.get_mut::<B>() else {
            return Err(BindError::MissingBehaviour { behaviour, entity });
        };
        if slot.assign(&mut target, entity) {
            report.bound += 1;
        }
    }

    if let Some(enabled) = annotation.start_enabled() {
        if kind.apply_enabled(&mut entity_mut, enabled) {
            report.enabled_set += 1;
        } else {
            debug!("{}: {} has no enabled state, skipping", behaviour, key);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::activatable::Activatable;
    use crate::components::attached::Attached;
    use crate::components::boxcollider::BoxCollider;
    use crate::components::rigidbody::RigidBody;

    #[derive(Component, Default)]
    struct Guard {
        collider: Option<Attached<BoxCollider>>,
    }

    impl Behaviour for Guard {
        fn bindings() -> BindingTable<Self> {
            BindingTable::new()
                .member("collider", |g: &mut Guard, c| g.collider = Some(c))
                .attach::<BoxCollider>(Some("collider"), false)
                .attach::<RigidBody>(None, true)
                .tag("Guard")
        }
    }

    fn world() -> World {
        let mut world = World::new();
        setup_binder(&mut world, BinderConfig::new());
        world
            .resource_mut::<ComponentRegistry>()
            .register::<BoxCollider>()
            .register::<RigidBody>();
        register_behaviour::<Guard>(&mut world).unwrap();
        world
    }

    #[test]
    fn test_bind_reports_work_done() {
        let mut world = world();
        let e = world.spawn(Guard::default()).id();
        let report = bind::<Guard>(&mut world, e).unwrap();
        assert_eq!(
            report,
            BindReport {
                created: 2,
                reused: 0,
                bound: 1,
                enabled_set: 1,
                tagged: true,
            }
        );
        assert!(!world.get::<BoxCollider>(e).unwrap().is_enabled());
        assert_eq!(world.get::<EntityTag>(e).unwrap().name(), "Guard");
    }

    #[test]
    fn test_enabled_state_follows_type_for_any_registration() {
        let mut world = World::new();
        setup_binder(&mut world, BinderConfig::new());
        world
            .resource_mut::<ComponentRegistry>()
            .register_with(|| BoxCollider::new(8.0, 8.0))
            .register::<RigidBody>();
        register_behaviour::<Guard>(&mut world).unwrap();

        let e = world.spawn((Guard::default(), BoxCollider::default())).id();
        assert!(world.get::<BoxCollider>(e).unwrap().is_enabled());

        let report = bind::<Guard>(&mut world, e).unwrap();
        assert_eq!(report.enabled_set, 1);
        assert_eq!(report.reused, 1);
        assert!(!world.get::<BoxCollider>(e).unwrap().is_enabled());
    }

    #[test]
    fn test_second_bind_reuses_everything() {
        let mut world = world();
        let e = world.spawn(Guard::default()).id();
        bind::<Guard>(&mut world, e).unwrap();
        let report = bind::<Guard>(&mut world, e).unwrap();
        assert_eq!(report.created, 0);
        assert_eq!(report.reused, 2);
    }

    #[test]
    fn test_unregistered_behaviour() {
        #[derive(Component, Default)]
        struct Loose;
        impl Behaviour for Loose {
            fn bindings() -> BindingTable<Self> {
                BindingTable::new()
            }
        }

        let mut world = world();
        let e = world.spawn(Loose).id();
        assert!(matches!(
            bind::<Loose>(&mut world, e),
            Err(BindError::UnregisteredBehaviour { .. })
        ));
    }

    #[test]
    fn test_entity_checks() {
        let mut world = world();
        let empty = world.spawn_empty().id();
        assert!(matches!(
            bind::<Guard>(&mut world, empty),
            Err(BindError::MissingBehaviour { .. })
        ));
        world.despawn(empty);
        assert!(matches!(
            bind::<Guard>(&mut world, empty),
            Err(BindError::NoSuchEntity { .. })
        ));
    }

    #[test]
    fn test_error_messages_name_behaviour_and_member() {
        let err = BindError::MemberTypeMismatch {
            behaviour: "game::Guard",
            member: "collider".into(),
            expected: "RigidBody",
            found: "BoxCollider",
        };
        let text = err.to_string();
        assert!(text.contains("game::Guard"));
        assert!(text.contains("collider"));
        assert_eq!(err.behaviour(), "game::Guard");
    }
}
