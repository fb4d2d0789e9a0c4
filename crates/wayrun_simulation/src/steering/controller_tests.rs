//! Tests for SteeringController (приём путей, resync, velocity, arrival, disable).

#[cfg(test)]
mod tests {
    use super::super::arrival::ArrivalCheck;
    use super::super::config::{SteeringConfig, MIN_PICK_NEXT_WAYPOINT_DIST};
    use super::super::controller::{Navigator, PathAcceptance, SteeringController};
    use super::super::repath::RepathDecision;
    use crate::error::SteeringError;
    use crate::planner::{PlanError, PlanRequest};
    use bevy::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn issue(controller: &mut SteeringController, start: Vec3, goal: Vec3, now: f32) -> PlanRequest {
        match controller.issue_plan_request(start, Some(goal), now) {
            RepathDecision::Issue { request, .. } => request,
            RepathDecision::Wait { retry_in } => panic!("expected Issue, got Wait({})", retry_in),
        }
    }

    /// Контроллер с принятым путём: запрос из `start`, агент на момент ответа в `agent`
    fn controller_with_path(
        config: SteeringConfig,
        points: Vec<Vec3>,
        start: Vec3,
        agent: Vec3,
    ) -> SteeringController {
        let mut controller = SteeringController::new(config).unwrap();
        let goal = *points.last().unwrap();
        let request = issue(&mut controller, start, goal, 0.0);

        let acceptance = controller
            .accept_response(request.respond(Ok(points)), agent, 0.0)
            .unwrap();
        assert!(matches!(acceptance, PathAcceptance::Accepted { .. }));
        controller
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SteeringConfig {
            max_speed: f32::NAN,
            ..default()
        };
        assert!(matches!(
            SteeringController::new(config),
            Err(SteeringError::InvalidConfig { field: "max_speed", .. })
        ));

        let mut controller = SteeringController::default();
        let bad = SteeringConfig {
            pick_next_waypoint_dist: -1.0,
            ..default()
        };
        assert!(controller.set_config(bad).is_err());
        assert_eq!(*controller.config(), SteeringConfig::default());
    }

    #[test]
    fn test_no_path_yields_zero_velocity() {
        let mut controller = SteeringController::default();
        let output = controller.compute_velocity(Vec3::ZERO, Vec3::NEG_Z, DT, 0.0);

        assert_eq!(output.velocity, Vec3::ZERO);
        assert_eq!(output.aim_point, None);
        assert_eq!(output.arrival, ArrivalCheck::Travelling);
        assert_eq!(controller.current_aim_point(), None);
        assert!(!controller.is_at_target());
    }

    #[test]
    fn test_single_point_path_accepted() {
        let agent = Vec3::new(1.0, 0.0, 1.0);
        let target = Vec3::new(5.0, 0.0, 5.0);

        let controller = controller_with_path(SteeringConfig::default(), vec![target], agent, agent);

        assert_eq!(controller.path().unwrap().points(), &[agent, target]);
        assert_eq!(controller.waypoint_index(), 1);
        assert!(!controller.is_pathfinding());
    }

    #[test]
    fn test_arrival_at_path_end() {
        let agent = Vec3::new(9.9, 0.0, 0.0);
        let mut controller = controller_with_path(
            SteeringConfig::default(),
            vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)],
            agent,
            agent,
        );
        assert_eq!(controller.waypoint_index(), 1);

        let output = controller.compute_velocity(agent, Vec3::NEG_Z, DT, 0.1);
        assert_eq!(output.arrival, ArrivalCheck::JustArrived);
        assert_eq!(output.velocity, Vec3::ZERO);
        assert_eq!(output.aim_point, Some(Vec3::new(10.0, 0.0, 0.0)));
        assert!(controller.is_at_target());

        // One-shot: следующий тик уже не "только что прибыл"
        let output = controller.compute_velocity(agent, Vec3::NEG_Z, DT, 0.2);
        assert_eq!(output.arrival, ArrivalCheck::AlreadyArrived);
        assert_eq!(output.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_new_path_resets_arrival() {
        let agent = Vec3::new(9.9, 0.0, 0.0);
        let mut controller = controller_with_path(
            SteeringConfig::default(),
            vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)],
            agent,
            agent,
        );
        controller.compute_velocity(agent, Vec3::NEG_Z, DT, 0.1);
        assert!(controller.is_at_target());

        let request = issue(&mut controller, agent, Vec3::new(10.0, 0.0, 20.0), 0.5);
        controller
            .accept_response(
                request.respond(Ok(vec![agent, Vec3::new(10.0, 0.0, 20.0)])),
                agent,
                0.5,
            )
            .unwrap();

        assert!(!controller.is_at_target());
        let output = controller.compute_velocity(agent, Vec3::Z, DT, 0.6);
        assert_eq!(output.arrival, ArrivalCheck::Travelling);
        assert!(output.velocity.length() > 0.0);
    }

    #[test]
    fn test_velocity_along_facing() {
        let mut controller = controller_with_path(
            SteeringConfig::default(),
            vec![Vec3::ZERO, Vec3::new(0.0, 0.0, -20.0)],
            Vec3::ZERO,
            Vec3::ZERO,
        );

        let output = controller.compute_velocity(Vec3::ZERO, Vec3::NEG_Z, DT, 0.0);
        assert!((output.velocity - Vec3::new(0.0, 0.0, -3.0)).length() < 1e-4, "v = {:?}", output.velocity);
        let aim = controller.current_aim_point().unwrap();
        assert!((aim - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4, "aim = {:?}", aim);
    }

    #[test]
    fn test_overshoot_bound() {
        let end = Vec3::new(0.0, 0.0, -10.0);
        let agent = Vec3::new(0.0, 0.0, -9.5);
        let mut controller = controller_with_path(
            SteeringConfig::default(),
            vec![Vec3::ZERO, end],
            Vec3::ZERO,
            agent,
        );

        // Большой dt: без ограничения агент улетел бы за конец пути
        let dt = 0.5;
        let output = controller.compute_velocity(agent, Vec3::NEG_Z, dt, 0.0);
        let target_dist = output.direction.length();

        assert!(output.velocity.length() * dt <= target_dist / 2.0 + 1e-5);
    }

    #[test]
    fn test_slowdown_is_monotonic_near_end() {
        let mut controller = controller_with_path(
            SteeringConfig::default(),
            vec![Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0)],
            Vec3::ZERO,
            Vec3::ZERO,
        );

        let mut previous = f32::MAX;
        for z in [-8.0, -9.0, -9.3, -9.6, -9.8, -9.9] {
            let output = controller.compute_velocity(Vec3::new(0.0, 0.0, z), Vec3::NEG_Z, DT, 0.0);
            let speed = output.velocity.length();
            assert!(speed <= previous + 1e-6, "speed {} at z {} > {}", speed, z, previous);
            previous = speed;
        }
    }

    #[test]
    fn test_resync_catches_up_with_agent() {
        let points = vec![
            Vec3::ZERO,
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(8.0, 0.0, 0.0),
            Vec3::new(12.0, 0.0, 0.0),
        ];
        // Запрос из (0,0,0), пока планировщик считал — агент ушёл в (7,0,0)
        let agent = Vec3::new(7.0, 0.0, 0.0);

        let resynced = controller_with_path(SteeringConfig::default(), points.clone(), Vec3::ZERO, agent);
        assert_eq!(resynced.waypoint_index(), 2);

        let config = SteeringConfig {
            closest_on_path_check: false,
            ..default()
        };
        let plain = controller_with_path(config, points, Vec3::ZERO, agent);
        assert_eq!(plain.waypoint_index(), 1);
    }

    #[test]
    fn test_resync_sample_count_is_bounded() {
        // L-образный путь в стороне от линии reference → agent: ранний выход не сработает
        let config = SteeringConfig {
            pick_next_waypoint_dist: MIN_PICK_NEXT_WAYPOINT_DIST,
            ..default()
        };
        let points = vec![
            Vec3::ZERO,
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 10.0),
        ];
        let agent = Vec3::new(0.0, 0.0, 1.0e6);

        // Без ограничения это 1e8 выборок на один ответ
        let controller = controller_with_path(config, points, Vec3::ZERO, agent);
        assert_eq!(controller.waypoint_index(), 1);
    }

    #[test]
    fn test_resync_does_not_raise_arrival() {
        // Агент уже у конца пути, но dry-прогон arrival не поднимает
        let agent = Vec3::new(10.0, 0.0, 0.0);
        let controller = controller_with_path(
            SteeringConfig::default(),
            vec![Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0)],
            Vec3::ZERO,
            agent,
        );

        assert_eq!(controller.waypoint_index(), 2);
        assert!(!controller.is_at_target());
    }

    #[test]
    fn test_failed_response_keeps_old_path() {
        let mut controller = controller_with_path(
            SteeringConfig::default(),
            vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)],
            Vec3::ZERO,
            Vec3::ZERO,
        );
        let old_path = controller.path().cloned();

        let request = issue(&mut controller, Vec3::ZERO, Vec3::new(50.0, 0.0, 0.0), 0.5);
        let error = PlanError::Unreachable {
            goal: Vec3::new(50.0, 0.0, 0.0),
        };
        let acceptance = controller
            .accept_response(request.respond(Err(error.clone())), Vec3::ZERO, 0.6)
            .unwrap();

        assert_eq!(acceptance, PathAcceptance::Failed(error));
        assert_eq!(controller.path().cloned(), old_path);
        assert!(!controller.is_pathfinding());
    }

    #[test]
    fn test_empty_response_is_error_and_unblocks_repath() {
        let mut controller = SteeringController::default();
        let request = issue(&mut controller, Vec3::ZERO, Vec3::X, 0.0);

        let result = controller.accept_response(request.respond(Ok(Vec::new())), Vec3::ZERO, 0.0);
        assert_eq!(
            result,
            Err(SteeringError::EmptyPath {
                request_id: request.request_id
            })
        );
        assert!(controller.path().is_none());
        assert!(!controller.is_pathfinding());
    }

    #[test]
    fn test_disable_releases_path_and_discards_late_response() {
        let mut controller = controller_with_path(
            SteeringConfig::default(),
            vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)],
            Vec3::ZERO,
            Vec3::ZERO,
        );
        let request = issue(&mut controller, Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0), 0.5);

        controller.disable();
        assert!(controller.path().is_none());
        assert_eq!(controller.waypoint_index(), 0);
        assert!(!controller.is_pathfinding());
        assert_eq!(controller.current_aim_point(), None);

        // Ответ на запрос до disable → выброшен
        let acceptance = controller
            .accept_response(
                request.respond(Ok(vec![Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0)])),
                Vec3::ZERO,
                0.6,
            )
            .unwrap();
        assert_eq!(acceptance, PathAcceptance::Stale);
        assert!(controller.path().is_none());

        // Gating сброшен: запрос сразу, без ожидания repath_rate
        let decision = controller.issue_plan_request(Vec3::ZERO, Some(Vec3::X), 0.6);
        assert!(matches!(decision, RepathDecision::Issue { .. }));
    }

    #[test]
    fn test_can_search_disables_requests() {
        let config = SteeringConfig {
            can_search: false,
            can_move: false,
            ..default()
        };
        let mut controller = SteeringController::new(config).unwrap();

        let decision = controller.issue_plan_request(Vec3::ZERO, Some(Vec3::X), 0.0);
        assert!(matches!(decision, RepathDecision::Wait { .. }));
        assert!(!controller.currently_movable());
    }

    #[test]
    fn test_rotate_towards_steering_direction() {
        let mut controller = controller_with_path(
            SteeringConfig::default(),
            vec![Vec3::ZERO, Vec3::new(20.0, 0.0, 0.0)],
            Vec3::ZERO,
            Vec3::ZERO,
        );
        controller.compute_velocity(Vec3::ZERO, Vec3::NEG_Z, DT, 0.0);

        // turning_speed 5 × dt 1.0 → доля slerp = 1, сразу смотрим вдоль +X
        let rotation = controller.rotate_towards(Quat::IDENTITY, 1.0);
        let forward = rotation * Vec3::NEG_Z;
        assert!((forward - Vec3::X).length() < 1e-4, "forward = {:?}", forward);

        // Малый dt → поворот частичный
        let rotation = controller.rotate_towards(Quat::IDENTITY, DT);
        let forward = rotation * Vec3::NEG_Z;
        assert!(forward.x > 0.0 && forward.z < 0.0, "forward = {:?}", forward);
    }
}
