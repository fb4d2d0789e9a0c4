//! WAYRUN Simulation Core
//!
//! Local path-following steering на Bevy 0.16 (ECS).
//!
//! Граница ответственности:
//! - ECS steering = следование по готовому пути, arrival, repath rate-limit
//! - внешний planner = поиск пути (PathRequested → PathCompleted)
//! - host = применение velocity к телу (physics::KinematicMotionPlugin или свой motion step)

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod components;
pub mod error;
pub mod logger;
pub mod physics;
pub mod planner;
pub mod route;
pub mod steering;

// Re-export базовых типов для удобства
pub use components::*;
pub use error::SteeringError;
pub use logger::*;
pub use physics::{spawn_steering_agent, KinematicMotion, KinematicMotionPlugin};
pub use planner::{
    DirectPlanner, PathCompleted, PathPlanner, PathRequested, PathResult, PlanError, PlanRequest,
    PlanResponse, PlannerQueue,
};
pub use route::{is_at, RouteFollower, RoutePlugin, WaypointRoutes};
pub use steering::{
    Navigator, SteeringConfig, SteeringController, SteeringPlugin, SteeringSet, TargetReached,
};

/// Частота steering тика
pub const TICK_HZ: f64 = 60.0;

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для steering тика
            .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
            .add_plugins((SteeringPlugin, RoutePlugin, KinematicMotionPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(TICK_HZ));

    app
}

/// Прогнать `ticks` fixed тиков вручную (без зависимости от wall clock)
///
/// Каждый тик: Time<Fixed> сдвигается на один timestep, затем FixedUpdate.
pub fn run_fixed_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        let world = app.world_mut();
        let timestep: Duration = world.resource::<Time<Fixed>>().timestep();
        world.resource_mut::<Time<Fixed>>().advance_by(timestep);
        world.run_schedule(FixedUpdate);
    }
}

/// Snapshot steering состояния для сравнения детерминизма
///
/// Позиция + facing + waypoint index каждого агента, отсортировано по Entity ID.
pub fn steering_snapshot(world: &mut World) -> Vec<u8> {
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &Transform, &SteeringController)>();
    let mut agents: Vec<_> = query.iter(world).collect();
    agents.sort_by_key(|(entity, _, _)| entity.index());

    for (entity, transform, controller) in agents {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        for value in transform.translation.to_array() {
            snapshot.extend_from_slice(&value.to_le_bytes());
        }
        for value in transform.rotation.to_array() {
            snapshot.extend_from_slice(&value.to_le_bytes());
        }
        snapshot.extend_from_slice(&(controller.waypoint_index() as u64).to_le_bytes());
    }

    snapshot
}
