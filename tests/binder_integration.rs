//! Binder integration tests.
//!
//! Drive [`bind`] and the bind driver against a plain `World`:
//! attachment, reuse of existing components, member wiring, enabled state,
//! tags, error identities and the partial effects of a failed call.

use std::sync::{Arc, Mutex};

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use autowire::binder::{BindError, Behaviour, bind, register_behaviour, setup_binder};
use autowire::components::activatable::Activatable;
use autowire::components::attached::Attached;
use autowire::components::bindstate::BindState;
use autowire::components::boxcollider::BoxCollider;
use autowire::components::rigidbody::RigidBody;
use autowire::components::tag::EntityTag;
use autowire::events::bind::{BehaviourBoundEvent, BindFailedEvent};
use autowire::resources::behaviourregistry::BehaviourRegistry;
use autowire::resources::binderconfig::BinderConfig;
use autowire::resources::bindingtable::BindingTable;
use autowire::resources::componentregistry::ComponentRegistry;
use autowire::systems::bind::{bind_pending, bind_pending_system};

// =============================================================================
// Test behaviours
// =============================================================================

/// `AttachByType(BoxCollider, "my_collider", false)`.
#[derive(Component, Default)]
struct Sentry {
    my_collider: Option<Attached<BoxCollider>>,
}

impl Behaviour for Sentry {
    fn bindings() -> BindingTable<Self> {
        BindingTable::new()
            .member("my_collider", |s: &mut Sentry, c| s.my_collider = Some(c))
            .attach::<BoxCollider>(Some("my_collider"), false)
    }
}

/// `AttachToField` plus an attach-only request and a tag.
#[derive(Component, Default)]
struct Runner {
    body: Option<Attached<RigidBody>>,
}

impl Behaviour for Runner {
    fn bindings() -> BindingTable<Self> {
        BindingTable::new()
            .member("body", |r: &mut Runner, b| r.body = Some(b))
            .attach_to_field::<RigidBody>("body", false)
            .attach::<BoxCollider>(None, true)
            .tag("Enemy")
    }
}

/// Member of type BoxCollider, but RigidBody requested into it.
#[derive(Component, Default)]
struct Mismatched {
    collider: Option<Attached<BoxCollider>>,
}

impl Behaviour for Mismatched {
    fn bindings() -> BindingTable<Self> {
        BindingTable::new()
            .member("collider", |m: &mut Mismatched, c| m.collider = Some(c))
            .attach::<BoxCollider>(None, true)
            .attach::<RigidBody>(Some("collider"), true)
    }
}

#[derive(Component, Default)]
struct NoSuchField;

impl Behaviour for NoSuchField {
    fn bindings() -> BindingTable<Self> {
        BindingTable::new().attach_to_field::<BoxCollider>("ghost", true)
    }
}

#[derive(Component, Default)]
struct ReadOnly;

impl Behaviour for ReadOnly {
    fn bindings() -> BindingTable<Self> {
        BindingTable::new()
            .read_only_member::<BoxCollider>("collider")
            .attach::<BoxCollider>(Some("collider"), true)
    }
}

#[derive(Component, Default)]
struct Unsupported;

impl Behaviour for Unsupported {
    fn bindings() -> BindingTable<Self> {
        BindingTable::new().attach::<f32>(None, true)
    }
}

/// Attach-only with an empty member name.
#[derive(Component, Default)]
struct AttachOnly;

impl Behaviour for AttachOnly {
    fn bindings() -> BindingTable<Self> {
        BindingTable::new().attach::<RigidBody>(Some(""), false)
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// World with the stock components registered. Tables are not validated at
/// registration so bind-time errors can be observed.
fn make_world() -> World {
    let mut world = World::new();
    let mut config = BinderConfig::new();
    config.validate_on_register = false;
    setup_binder(&mut world, config);
    world
        .resource_mut::<ComponentRegistry>()
        .register::<BoxCollider>()
        .register::<RigidBody>();
    register_behaviour::<Sentry>(&mut world).unwrap();
    register_behaviour::<Runner>(&mut world).unwrap();
    register_behaviour::<Mismatched>(&mut world).unwrap();
    register_behaviour::<NoSuchField>(&mut world).unwrap();
    register_behaviour::<ReadOnly>(&mut world).unwrap();
    register_behaviour::<Unsupported>(&mut world).unwrap();
    register_behaviour::<AttachOnly>(&mut world).unwrap();
    world
}

fn count<T: Component>(world: &mut World) -> usize {
    world.query::<&T>().iter(world).count()
}

// =============================================================================
// Attachment and wiring
// =============================================================================

#[test]
fn scenario_attach_by_type_into_property() {
    let mut world = make_world();
    let e = world.spawn(Sentry::default()).id();

    bind::<Sentry>(&mut world, e).unwrap();

    assert_eq!(count::<BoxCollider>(&mut world), 1);
    let handle = world.get::<Sentry>(e).unwrap().my_collider.unwrap();
    assert_eq!(handle.entity(), e);
    assert!(!handle.get(&world).unwrap().is_enabled());
}

#[test]
fn bind_twice_creates_no_duplicates() {
    let mut world = make_world();
    let e = world.spawn(Runner::default()).id();

    bind::<Runner>(&mut world, e).unwrap();
    bind::<Runner>(&mut world, e).unwrap();

    assert_eq!(count::<RigidBody>(&mut world), 1);
    assert_eq!(count::<BoxCollider>(&mut world), 1);
    assert_eq!(count::<EntityTag>(&mut world), 1);
}

#[test]
fn existing_component_is_reused() {
    let mut world = make_world();
    let mut body = RigidBody::with_physics(5.0, Some(300.0));
    body.velocity = (1.0, 2.0);
    let e = world.spawn((Runner::default(), body.clone())).id();

    let report = bind::<Runner>(&mut world, e).unwrap();

    assert_eq!(report.reused, 1);
    assert_eq!(report.created, 1);
    assert_eq!(world.get::<RigidBody>(e), Some(&body));
}

#[test]
fn attach_to_field_binds_handle_of_exact_type() {
    let mut world = make_world();
    let e = world.spawn(Runner::default()).id();

    bind::<Runner>(&mut world, e).unwrap();

    let handle = world.get::<Runner>(e).unwrap().body.unwrap();
    assert_eq!(handle.entity(), e);
    assert!(handle.get(&world).is_some());
}

#[test]
fn enabled_state_overrides_prior_state() {
    let mut world = make_world();
    let mut disabled = BoxCollider::new(4.0, 4.0);
    disabled.set_enabled(false);
    let runner = world.spawn((Runner::default(), disabled)).id();
    let sentry = world.spawn((Sentry::default(), BoxCollider::new(4.0, 4.0))).id();

    bind::<Runner>(&mut world, runner).unwrap();
    bind::<Sentry>(&mut world, sentry).unwrap();

    assert!(world.get::<BoxCollider>(runner).unwrap().is_enabled());
    assert!(!world.get::<BoxCollider>(sentry).unwrap().is_enabled());
    // The pre-existing collider kept its size.
    assert_eq!(world.get::<BoxCollider>(sentry).unwrap().width, 4.0);
}

#[test]
fn non_activatable_component_is_attached_without_error() {
    let mut world = make_world();
    let e = world.spawn(Runner::default()).id();

    let report = bind::<Runner>(&mut world, e).unwrap();

    // RigidBody requested start_enabled=false but has no enabled state.
    assert_eq!(report.enabled_set, 1);
    assert_eq!(world.get::<RigidBody>(e), Some(&RigidBody::default()));
}

#[test]
fn empty_member_name_attaches_only() {
    let mut world = make_world();
    let e = world.spawn(AttachOnly).id();

    let report = bind::<AttachOnly>(&mut world, e).unwrap();

    assert_eq!(report.bound, 0);
    assert!(world.get::<RigidBody>(e).is_some());
}

#[test]
fn tag_is_applied_exactly() {
    let mut world = make_world();
    let e = world.spawn(Runner::default()).id();
    world.entity_mut(e).insert(EntityTag::new("Untagged"));

    bind::<Runner>(&mut world, e).unwrap();

    assert_eq!(world.get::<EntityTag>(e).unwrap().name(), "Enemy");
    assert!(world.get::<EntityTag>(e).unwrap().is("Enemy"));
}

#[test]
fn other_entities_are_untouched() {
    let mut world = make_world();
    let bystander = world.spawn_empty().id();
    let e = world.spawn(Runner::default()).id();

    bind::<Runner>(&mut world, e).unwrap();

    let bystander = world.entity(bystander);
    assert!(!bystander.contains::<EntityTag>());
    assert!(!bystander.contains::<RigidBody>());
    assert!(!bystander.contains::<BoxCollider>());
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn member_type_mismatch_does_not_assign() {
    let mut world = make_world();
    let e = world.spawn(Mismatched::default()).id();

    let err = bind::<Mismatched>(&mut world, e).unwrap_err();

    assert!(matches!(
        err,
        BindError::MemberTypeMismatch { ref member, .. } if member == "collider"
    ));
    assert!(world.get::<Mismatched>(e).unwrap().collider.is_none());
}

#[test]
fn failed_bind_keeps_earlier_effects() {
    let mut world = make_world();
    let e = world.spawn(Mismatched::default()).id();

    bind::<Mismatched>(&mut world, e).unwrap_err();

    // The first annotation ran; the failing one still attached its component.
    assert!(world.get::<BoxCollider>(e).is_some());
    assert!(world.get::<RigidBody>(e).is_some());
}

#[test]
fn missing_member() {
    let mut world = make_world();
    let e = world.spawn(NoSuchField).id();
    let err = bind::<NoSuchField>(&mut world, e).unwrap_err();
    assert!(matches!(err, BindError::MissingMember { ref member, .. } if member == "ghost"));
    assert!(err.to_string().contains("NoSuchField"));
}

#[test]
fn read_only_member() {
    let mut world = make_world();
    let e = world.spawn(ReadOnly).id();
    let err = bind::<ReadOnly>(&mut world, e).unwrap_err();
    assert!(matches!(err, BindError::ReadOnlyMember { .. }));
}

#[test]
fn unsupported_component_type() {
    let mut world = make_world();
    let e = world.spawn(Unsupported).id();
    let err = bind::<Unsupported>(&mut world, e).unwrap_err();
    assert!(matches!(
        err,
        BindError::UnsupportedComponentType { component: "f32", .. }
    ));
}

#[test]
fn validation_on_register_rejects_bad_tables() {
    let mut world = World::new();
    setup_binder(&mut world, BinderConfig::new());
    world
        .resource_mut::<ComponentRegistry>()
        .register::<BoxCollider>()
        .register::<RigidBody>();

    assert!(matches!(
        register_behaviour::<Mismatched>(&mut world),
        Err(BindError::MemberTypeMismatch { .. })
    ));
    assert!(matches!(
        register_behaviour::<ReadOnly>(&mut world),
        Err(BindError::ReadOnlyMember { .. })
    ));
    assert!(register_behaviour::<Sentry>(&mut world).is_ok());
    assert!(!world.resource::<BehaviourRegistry>().contains::<Mismatched>());
}

// =============================================================================
// Driver
// =============================================================================

#[test]
fn driver_binds_pending_and_marks_state() {
    let mut world = make_world();
    let a = world.spawn(Sentry::default()).id();
    let b = world.spawn(Sentry::default()).id();

    let bound_events = Arc::new(Mutex::new(Vec::new()));
    let sink = bound_events.clone();
    world.add_observer(move |trigger: On<BehaviourBoundEvent>| {
        sink.lock().unwrap().push(trigger.event().entity);
    });

    assert_eq!(bind_pending::<Sentry>(&mut world), Ok(2));
    assert_eq!(world.get::<BindState>(a), Some(&BindState::Bound));
    assert_eq!(world.get::<BindState>(b), Some(&BindState::Bound));
    assert_eq!(bound_events.lock().unwrap().len(), 2);

    // Bound entities are not revisited.
    assert_eq!(bind_pending::<Sentry>(&mut world), Ok(0));
    assert_eq!(bound_events.lock().unwrap().len(), 2);
}

#[test]
fn driver_fail_fast_stops_at_first_error() {
    let mut world = make_world();
    let first = world.spawn(Mismatched::default()).id();
    let second = world.spawn(Mismatched::default()).id();

    let failures = Arc::new(Mutex::new(0));
    let sink = failures.clone();
    world.add_observer(move |_trigger: On<BindFailedEvent>| {
        *sink.lock().unwrap() += 1;
    });

    let err = bind_pending::<Mismatched>(&mut world).unwrap_err();
    assert!(matches!(err, BindError::MemberTypeMismatch { .. }));
    assert_eq!(*failures.lock().unwrap(), 1);

    let states = [world.get::<BindState>(first), world.get::<BindState>(second)];
    assert_eq!(states.iter().filter(|s| s.is_some_and(BindState::is_failed)).count(), 1);
    assert_eq!(states.iter().filter(|s| s.is_none()).count(), 1);
}

#[test]
fn driver_without_fail_fast_continues() {
    let mut world = make_world();
    world.resource_mut::<BinderConfig>().fail_fast = false;
    world.spawn(NoSuchField);
    world.spawn(NoSuchField);

    assert_eq!(bind_pending::<NoSuchField>(&mut world), Ok(0));
    let failed = world
        .query::<&BindState>()
        .iter(&world)
        .filter(|s| s.is_failed())
        .count();
    assert_eq!(failed, 2);
}

#[test]
fn driver_runs_in_schedule() {
    let mut world = make_world();
    let e = world.spawn(Runner::default()).id();

    let mut schedule = Schedule::default();
    schedule.add_systems(bind_pending_system::<Runner>);
    schedule.run(&mut world);
    schedule.run(&mut world);

    assert!(world.get::<BindState>(e).unwrap().is_bound());
    assert_eq!(count::<RigidBody>(&mut world), 1);
    assert_eq!(world.get::<EntityTag>(e).unwrap().name(), "Enemy");
}

#[test]
fn driver_system_stops_on_fail_fast_without_panicking() {
    let mut world = make_world();
    world.spawn(Mismatched::default());
    world.spawn(Mismatched::default());

    let mut schedule = Schedule::default();
    schedule.add_systems(bind_pending_system::<Mismatched>);
    schedule.run(&mut world);

    let states: Vec<bool> = world
        .query_filtered::<Option<&BindState>, With<Mismatched>>()
        .iter(&world)
        .map(|s| s.is_some_and(BindState::is_failed))
        .collect();
    assert_eq!(states.len(), 2);
    assert_eq!(states.iter().filter(|failed| **failed).count(), 1);

    // The next run picks up the entity left behind.
    schedule.run(&mut world);
    let failed = world
        .query::<&BindState>()
        .iter(&world)
        .filter(|s| s.is_failed())
        .count();
    assert_eq!(failed, 2);
}

#[test]
fn start_enabled_applies_to_factory_registered_collider() {
    let mut world = World::new();
    let mut config = BinderConfig::new();
    config.validate_on_register = false;
    setup_binder(&mut world, config);
    world
        .resource_mut::<ComponentRegistry>()
        .register_with(|| BoxCollider::new(32.0, 32.0))
        .register::<RigidBody>();
    register_behaviour::<Sentry>(&mut world).unwrap();

    let e = world.spawn(Sentry::default()).id();
    let report = bind::<Sentry>(&mut world, e).unwrap();

    let collider = world.get::<BoxCollider>(e).unwrap();
    assert_eq!(collider.width, 32.0);
    assert!(!collider.is_enabled());
    assert_eq!(report.enabled_set, 1);
}
