//! Kinematic motion для steering агентов
//!
//! Архитектура:
//! - Rapier для коллизий (RigidBody::KinematicPositionBased)
//! - MotionCommand.velocity → Transform (прямая интеграция в FixedUpdate)
//! - MotionCommand.velocity → rapier Velocity (если подключен RapierPhysicsPlugin)

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::components::{MotionCommand, SteeringAgent, TargetRequest};
use crate::error::SteeringError;
use crate::steering::{SteeringConfig, SteeringController, SteeringSet};

/// Маркер: motion step двигает этот entity по MotionCommand
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct KinematicMotion;

/// Система интеграции velocity → Transform (headless режим)
pub fn integrate_motion_commands(
    mut query: Query<(&MotionCommand, &mut Transform), With<KinematicMotion>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (command, mut transform) in query.iter_mut() {
        transform.translation += command.velocity * delta;
    }
}

/// Система синхронизации MotionCommand → rapier Velocity
///
/// Для KinematicPositionBased тел rapier сам velocity не интегрирует —
/// linvel нужен для корректного contact response у соседей.
pub fn sync_motion_to_rapier(
    mut query: Query<(&MotionCommand, &mut Velocity), With<KinematicMotion>>,
) {
    for (command, mut rapier_velocity) in query.iter_mut() {
        rapier_velocity.linvel = command.velocity;
    }
}

/// Plugin для kinematic motion
///
/// Системы в SteeringSet::Motion (после steering и поворота).
pub struct KinematicMotionPlugin;

impl Plugin for KinematicMotionPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<KinematicMotion>();

        app.add_systems(
            FixedUpdate,
            (integrate_motion_commands, sync_motion_to_rapier)
                .chain()
                .in_set(SteeringSet::Motion),
        );
    }
}

/// Spawn helper для steering агента
///
/// Создает entity с полным набором компонентов:
/// - Transform (позиция, facing по -Z)
/// - SteeringAgent + SteeringController (валидированный config)
/// - TargetRequest (опционально сразу с целью)
/// - Rapier: RigidBody + Collider (capsule) + Velocity
pub fn spawn_steering_agent(
    commands: &mut Commands,
    position: Vec3,
    config: SteeringConfig,
    destination: Option<Vec3>,
) -> Result<Entity, SteeringError> {
    let controller = SteeringController::new(config)?;

    Ok(commands
        .spawn((
            Transform::from_translation(position),
            SteeringAgent,
            controller,
            TargetRequest {
                destination,
                route: None,
            },
            MotionCommand::default(),
            KinematicMotion,
            // Rapier physics
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(0.5, 0.4), // Высота 1.8м (0.5 + 0.5 + 2×0.4)
            Velocity::default(),
        ))
        .id())
}
