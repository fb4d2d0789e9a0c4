//! Steering module — следование по готовому пути.
//!
//! Содержит:
//! - PathBuffer (путь + tracked waypoint)
//! - lookahead aim-point
//! - ArrivalDetector (one-shot прибытие)
//! - velocity контроллер (выравнивание + торможение + anti-overshoot)
//! - orientation (slerp facing, только yaw)
//! - RepathScheduler (rate-limit запросов пути)
//! - SteeringController (владеет всем выше, реализует Navigator)

use bevy::prelude::*;

pub mod arrival;
pub mod config;
pub mod controller;
pub mod events;
pub mod lookahead;
pub mod orientation;
pub mod path_buffer;
pub mod repath;
pub mod systems;
pub mod velocity;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod controller_tests;
#[cfg(test)]
mod path_buffer_tests;

pub use arrival::{ArrivalCheck, ArrivalDetector};
pub use config::{SteeringConfig, MIN_PICK_NEXT_WAYPOINT_DIST};
pub use controller::{
    Navigator, PathAcceptance, SteeringController, SteeringOutput, SteeringState, WaypointAdvance,
    MAX_RESYNC_SAMPLES, RESYNC_RECENCY_WINDOW,
};
pub use events::TargetReached;
pub use path_buffer::{Path, PathBuffer};
pub use repath::{RepathDecision, RepathScheduler, RepathState};

use crate::planner::{self, PathCompleted, PathRequested, PlannerQueue};
use crate::DeterministicRng;

/// Порядок фаз одного тика
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SteeringSet {
    /// Disable агентов, выпуск запросов пути
    RequestPaths,
    /// Host planner / PlannerQueue
    Plan,
    /// Применение ответов планировщика
    AbsorbPaths,
    /// Velocity + arrival
    Steer,
    /// Поворот facing
    Orient,
    /// Listeners TargetReached (маршруты, decision layer)
    React,
    /// Host motion step (применение velocity)
    Motion,
}

/// Steering Plugin
///
/// Регистрирует steering системы в FixedUpdate.
/// Порядок выполнения:
/// 1. release_suspended_agents — disable (путь освобождён, gating сброшен)
/// 2. issue_path_requests — RepathScheduler → PathRequested
/// 3. process_plan_requests — только если вставлен PlannerQueue
/// 4. absorb_path_responses — PathCompleted → PathBuffer (атомарная замена)
/// 5. steer_agents — velocity → MotionCommand, TargetReached
/// 6. rotate_agents — facing к направлению движения
pub struct SteeringPlugin;

impl Plugin for SteeringPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PathRequested>()
            .add_event::<PathCompleted>()
            .add_event::<TargetReached>();

        // PlannerQueue тянет latency из RNG — seed по умолчанию, если host не задал свой
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.configure_sets(
            FixedUpdate,
            (
                SteeringSet::RequestPaths,
                SteeringSet::Plan,
                SteeringSet::AbsorbPaths,
                SteeringSet::Steer,
                SteeringSet::Orient,
                SteeringSet::React,
                SteeringSet::Motion,
            )
                .chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                (systems::release_suspended_agents, systems::issue_path_requests)
                    .chain()
                    .in_set(SteeringSet::RequestPaths),
                planner::process_plan_requests
                    .run_if(resource_exists::<PlannerQueue>)
                    .in_set(SteeringSet::Plan),
                systems::absorb_path_responses.in_set(SteeringSet::AbsorbPaths),
                systems::steer_agents.in_set(SteeringSet::Steer),
                systems::rotate_agents.in_set(SteeringSet::Orient),
            ),
        );
    }
}
