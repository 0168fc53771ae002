//! Bind driver.
//!
//! Binds every entity that holds behaviour `B` and has no
//! [`BindState`](crate::components::bindstate::BindState) yet.
//!
//! # System Flow
//!
//! 1. Collect unbound `B` entities in query order
//! 2. Run [`bind`] on each
//! 3. On success insert `BindState::Bound` and trigger [`BehaviourBoundEvent`]
//! 4. On failure insert `BindState::Failed` and trigger [`BindFailedEvent`];
//!    with [`BinderConfig::fail_fast`] the remaining entities are left unbound
//!
//! Entities in either state are never visited again.

use bevy_ecs::prelude::*;
use log::{debug, error, info, warn};

use crate::binder::{BindError, Behaviour, bind};
use crate::components::bindstate::BindState;
use crate::events::bind::{BehaviourBoundEvent, BindFailedEvent};
use crate::resources::binderconfig::BinderConfig;

/// Bind all pending `B` entities.
///
/// Returns the number of entities bound. With `fail_fast` (the default) the
/// first error is returned; otherwise failures are recorded on the entities
/// and processing continues.
pub fn bind_pending<B: Behaviour>(world: &mut World) -> Result<usize, BindError> {
    let fail_fast = world
        .get_resource::<BinderConfig>()
        .map(|c| c.fail_fast)
        .unwrap_or(true);

    let pending: Vec<Entity> = {
        let mut query = world.query_filtered::<Entity, (With<B>, Without<BindState>)>();
        query.iter(world).collect()
    };

    let behaviour = std::any::type_name::<B>();
    let mut bound = 0;
    for entity in pending {
        match bind::<B>(world, entity) {
            Ok(report) => {
                world.entity_mut(entity).insert(BindState::Bound);
                info!("Bound {} on {}", behaviour, entity);
                world.trigger(BehaviourBoundEvent {
                    entity,
                    behaviour,
                    report,
                });
                bound += 1;
            }
            Err(e) => {
                error!("Failed to bind {}: {}", entity, e);
                if let Ok(mut entity_mut) = world.get_entity_mut(entity) {
                    entity_mut.insert(BindState::Failed(e.to_string()));
                }
                world.trigger(BindFailedEvent {
                    entity,
                    error: e.clone(),
                });
                if fail_fast {
                    return Err(e);
                }
            }
        }
    }
    Ok(bound)
}

/// Exclusive system wrapper around [`bind_pending`].
///
/// Errors are already logged and signalled through [`BindFailedEvent`].
/// A fail-fast stop is reported once more, since the remaining entities of
/// `B` stay unbound until the next run.
pub fn bind_pending_system<B: Behaviour>(world: &mut World) {
    match bind_pending::<B>(world) {
        Ok(0) => {}
        Ok(bound) => debug!("{}: bound {} entities", std::any::type_name::<B>(), bound),
        Err(e) => warn!(
            "{}: fail-fast stopped binding, remaining entities left unbound ({})",
            e.behaviour(),
            e
        ),
    }
}

/// Returns `true` if any `B` entity is still unbound.
pub fn has_pending<B: Behaviour>(query: Query<(), (With<B>, Without<BindState>)>) -> bool {
    !query.is_empty()
}
