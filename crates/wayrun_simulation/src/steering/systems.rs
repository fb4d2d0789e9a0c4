//! Steering systems (FixedUpdate, chained через SteeringSet).

use bevy::prelude::*;

use super::controller::{Navigator, PathAcceptance, SteeringController};
use super::events::TargetReached;
use super::repath::RepathDecision;
use crate::components::{MotionCommand, RepathCountdown, SteeringAgent, SteeringSuspended, TargetRequest};
use crate::planner::{PathCompleted, PathRequested};

/// Система: выпуск запросов пути
///
/// Агент опрашивает scheduler только когда истёк RepathCountdown —
/// "retry in" от scheduler'а используется как интервал сна.
pub fn issue_path_requests(
    mut agents: Query<
        (
            Entity,
            &mut SteeringController,
            &mut RepathCountdown,
            &Transform,
            &TargetRequest,
        ),
        (With<SteeringAgent>, Without<SteeringSuspended>),
    >,
    mut requests: EventWriter<PathRequested>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();
    let delta = time.delta_secs();

    for (entity, mut controller, mut countdown, transform, target) in agents.iter_mut() {
        countdown.remaining -= delta;
        if countdown.remaining > 0.0 {
            continue;
        }

        let decision = controller.issue_plan_request(transform.translation, target.destination, now);
        countdown.remaining = decision.retry_in();

        if let RepathDecision::Issue { request, .. } = decision {
            crate::log(&format!(
                "Entity {:?}: path request #{} {:?} → {:?}",
                entity, request.request_id, request.start, request.goal
            ));
            requests.write(PathRequested { entity, request });
        }
    }
}

/// Система: применение ответов планировщика
///
/// Работает строго ДО steer_agents: новый путь виден steering'у целиком или не виден вовсе.
/// Ответы для despawned агентов выбрасываются.
pub fn absorb_path_responses(
    mut completions: EventReader<PathCompleted>,
    mut agents: Query<(&mut SteeringController, &Transform)>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();

    for completed in completions.read() {
        let Ok((mut controller, transform)) = agents.get_mut(completed.entity) else {
            crate::log(&format!(
                "Path response #{} for missing entity {:?} discarded",
                completed.response.request_id, completed.entity
            ));
            continue;
        };

        let request_id = completed.response.request_id;
        match controller.accept_response(completed.response.clone(), transform.translation, now) {
            Ok(PathAcceptance::Accepted { waypoint_index }) => {
                crate::log(&format!(
                    "Entity {:?}: path #{} accepted ({} points, waypoint {})",
                    completed.entity,
                    request_id,
                    controller.path().map_or(0, |path| path.len()),
                    waypoint_index
                ));
            }
            Ok(PathAcceptance::Failed(err)) => {
                crate::log_warning(&format!(
                    "Entity {:?}: path #{} failed ({}), keeping previous path",
                    completed.entity, request_id, err
                ));
            }
            Ok(PathAcceptance::Stale) => {
                crate::log(&format!(
                    "Entity {:?}: stale path response #{} discarded",
                    completed.entity, request_id
                ));
            }
            Err(err) => {
                crate::log_error(&format!("Entity {:?}: {}", completed.entity, err));
            }
        }
    }
}

/// Система: steering тик
///
/// Считает velocity к aim-point, пишет MotionCommand, шлёт TargetReached один раз на прибытие.
/// Listeners TargetReached работают в следующих системах — реентрантности в steering нет.
pub fn steer_agents(
    mut agents: Query<
        (Entity, &mut SteeringController, &mut MotionCommand, &Transform),
        (With<SteeringAgent>, Without<SteeringSuspended>),
    >,
    mut arrivals: EventWriter<TargetReached>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();
    let delta = time.delta_secs();

    for (entity, mut controller, mut command, transform) in agents.iter_mut() {
        if !controller.currently_movable() {
            *command = MotionCommand::default();
            continue;
        }

        let output = controller.compute_velocity(
            transform.translation,
            transform.forward().as_vec3(),
            delta,
            now,
        );

        *command = MotionCommand {
            velocity: output.velocity,
            aim_point: output.aim_point,
            direction: output.direction,
        };

        if output.arrival.just_arrived() {
            crate::log_info(&format!(
                "Entity {:?}: target reached at {:?}",
                entity, transform.translation
            ));
            arrivals.write(TargetReached {
                entity,
                position: transform.translation,
            });
        }
    }
}

/// Система: поворот facing к steering направлению (только yaw)
pub fn rotate_agents(
    mut agents: Query<
        (&SteeringController, &mut Transform),
        (With<SteeringAgent>, Without<SteeringSuspended>),
    >,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (controller, mut transform) in agents.iter_mut() {
        if !controller.currently_movable() {
            continue;
        }

        transform.rotation = controller.rotate_towards(transform.rotation, delta);
    }
}

/// Система: disable агентов (добавлен SteeringSuspended)
///
/// Путь освобождается, gating in-flight сбрасывается — поздний ответ станет stale.
pub fn release_suspended_agents(
    mut agents: Query<
        (Entity, &mut SteeringController, &mut MotionCommand, &mut RepathCountdown),
        Added<SteeringSuspended>,
    >,
) {
    for (entity, mut controller, mut command, mut countdown) in agents.iter_mut() {
        controller.disable();
        *command = MotionCommand::default();
        countdown.remaining = 0.0;

        crate::log(&format!("Entity {:?}: steering suspended, path released", entity));
    }
}
