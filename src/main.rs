//! Autowire demo entry point.
//!
//! Builds a small world with a couple of behaviours, registers their binding
//! tables and runs the bind driver once, logging what was attached.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run -- --config autowire.ini
//! ```

use autowire::binder::{Behaviour, register_behaviour, setup_binder};
use autowire::components::attached::Attached;
use autowire::components::bindstate::BindState;
use autowire::components::boxcollider::BoxCollider;
use autowire::components::rigidbody::RigidBody;
use autowire::components::tag::EntityTag;
use autowire::events::bind::{BehaviourBoundEvent, BindFailedEvent};
use autowire::ext::shuffle::ShuffleExt;
use autowire::resources::binderconfig::BinderConfig;
use autowire::resources::bindingtable::BindingTable;
use autowire::resources::componentregistry::ComponentRegistry;
use autowire::resources::objectpool::ObjectPool;
use autowire::systems::bind::bind_pending_system;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use clap::Parser;
use std::path::PathBuf;

/// Autowire declarative component binder demo
#[derive(Parser)]
#[command(version, about = "Binds demo behaviours and reports the result")]
struct Cli {
    /// Path to the INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./autowire.ini")]
    config: PathBuf,

    /// Write the default configuration to the config path and exit.
    #[arg(long)]
    write_default_config: bool,

    /// Number of turrets to spawn.
    #[arg(long, default_value_t = 3)]
    turrets: usize,
}

#[derive(Component, Default)]
struct Turret {
    collider: Option<Attached<BoxCollider>>,
}

impl Behaviour for Turret {
    fn bindings() -> BindingTable<Self> {
        BindingTable::new()
            .member("collider", |t: &mut Turret, c| t.collider = Some(c))
            .attach::<BoxCollider>(Some("collider"), false)
            .tag("Enemy")
    }
}

#[derive(Component, Default)]
struct Walker {
    body: Option<Attached<RigidBody>>,
}

impl Behaviour for Walker {
    fn bindings() -> BindingTable<Self> {
        BindingTable::new()
            .member("body", |w: &mut Walker, b| w.body = Some(b))
            .attach_to_field::<RigidBody>("body", true)
            .attach::<BoxCollider>(None, true)
            .tag("Player")
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = BinderConfig::with_path(&cli.config);
    if cli.write_default_config {
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Default config written to {}", cli.config.display());
        return;
    }
    config.load_from_file().ok(); // ignore errors, use defaults
    let pool_capacity = config.pool_capacity;

    log::info!("Starting autowire demo");
    let mut world = World::new();
    setup_binder(&mut world, config);
    world
        .resource_mut::<ComponentRegistry>()
        .register_with(|| BoxCollider::new(16.0, 16.0))
        .register::<RigidBody>();

    for result in [
        register_behaviour::<Turret>(&mut world),
        register_behaviour::<Walker>(&mut world),
    ] {
        if let Err(e) = result {
            log::error!("{e}");
            std::process::exit(1);
        }
    }

    world.add_observer(|trigger: On<BehaviourBoundEvent>| {
        let event = trigger.event();
        log::info!(
            "{} on {}: {:?}",
            event.behaviour,
            event.entity,
            event.report
        );
    });
    world.add_observer(|trigger: On<BindFailedEvent>| {
        log::error!("bind failed: {}", trigger.event().error);
    });

    // Binding does not depend on spawn order.
    let mut pool = ObjectPool::new(pool_capacity, Turret::default);
    pool.prewarm(cli.turrets);
    let mut spawned: Vec<Entity> = (0..cli.turrets)
        .map_while(|_| pool.try_take())
        .map(|turret| world.spawn(turret).id())
        .collect();
    if spawned.len() < cli.turrets {
        log::warn!(
            "turret pool exhausted at {} of {} requested",
            spawned.len(),
            cli.turrets
        );
    }
    spawned.push(world.spawn(Walker::default()).id());
    spawned.shuffle();

    let mut startup = Schedule::default();
    startup.add_systems((bind_pending_system::<Turret>, bind_pending_system::<Walker>).chain());
    startup.run(&mut world);

    let mut failed = 0;
    for entity in spawned {
        let tag = world
            .get::<EntityTag>(entity)
            .map(|t| t.name().to_owned())
            .unwrap_or_default();
        let collider_enabled = world.get::<BoxCollider>(entity).map(|c| c.enabled);
        let bound = world
            .get::<BindState>(entity)
            .is_some_and(BindState::is_bound);
        let wired = world.get::<Turret>(entity).is_some_and(|t| t.collider.is_some())
            || world.get::<Walker>(entity).is_some_and(|w| w.body.is_some());
        if !bound || !wired {
            failed += 1;
        }
        println!(
            "{entity}: tag={tag:?} bound={bound} wired={wired} collider_enabled={collider_enabled:?}"
        );
    }

    if failed > 0 {
        std::process::exit(1);
    }
}
