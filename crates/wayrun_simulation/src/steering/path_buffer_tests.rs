//! Tests for PathBuffer (нормализация пути, продвижение waypoint индекса).

#[cfg(test)]
mod tests {
    use super::super::path_buffer::{xz_distance_squared, Path, PathBuffer};
    use crate::error::SteeringError;
    use crate::planner::PlanError;
    use bevy::prelude::*;

    fn straight_path() -> Vec<Vec3> {
        vec![
            Vec3::ZERO,
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(20.0, 0.0, 0.0),
            Vec3::new(30.0, 0.0, 0.0),
        ]
    }

    fn buffer_with(points: Vec<Vec3>) -> PathBuffer {
        let mut buffer = PathBuffer::default();
        let accepted = buffer.accept(Ok(points), Vec3::ZERO, Vec3::ZERO, 1).unwrap();
        assert!(accepted);
        buffer
    }

    #[test]
    fn test_single_point_path_prepends_agent() {
        let agent = Vec3::new(1.0, 0.0, 2.0);
        let target = Vec3::new(5.0, 0.0, 5.0);

        let mut buffer = PathBuffer::default();
        buffer.accept(Ok(vec![target]), agent, agent, 7).unwrap();

        let path = buffer.path().unwrap();
        assert_eq!(path.points(), &[agent, target]);
        assert_eq!(buffer.waypoint_index(), 1);
        assert_eq!(buffer.active_segment(), Some((agent, target)));
        assert!(buffer.is_final_segment());
    }

    #[test]
    fn test_empty_path_rejected() {
        let result = Path::normalized(Vec::new(), Vec3::ZERO, Vec3::ZERO, 3);
        assert_eq!(result, Err(SteeringError::EmptyPath { request_id: 3 }));

        // Старый путь не тронут
        let mut buffer = buffer_with(straight_path());
        buffer.advance(Vec3::new(9.0, 0.0, 0.0), 2.0);
        assert!(buffer.accept(Ok(Vec::new()), Vec3::ZERO, Vec3::ZERO, 4).is_err());
        assert_eq!(buffer.path().unwrap().len(), 4);
        assert_eq!(buffer.waypoint_index(), 2);
    }

    #[test]
    fn test_planner_failure_keeps_old_path() {
        let mut buffer = buffer_with(straight_path());
        buffer.advance(Vec3::new(9.5, 0.0, 0.0), 2.0);

        let accepted = buffer
            .accept(
                Err(PlanError::Unreachable { goal: Vec3::X }),
                Vec3::ZERO,
                Vec3::ZERO,
                2,
            )
            .unwrap();

        assert!(!accepted);
        assert_eq!(buffer.path().unwrap().points(), straight_path().as_slice());
        assert_eq!(buffer.waypoint_index(), 2);
    }

    #[test]
    fn test_new_path_resets_index() {
        let mut buffer = buffer_with(straight_path());
        buffer.advance(Vec3::new(19.0, 0.0, 0.0), 2.0);
        assert_eq!(buffer.waypoint_index(), 2);

        buffer
            .accept(Ok(vec![Vec3::ZERO, Vec3::Z * 5.0]), Vec3::ZERO, Vec3::ZERO, 2)
            .unwrap();
        assert_eq!(buffer.waypoint_index(), 1);
    }

    #[test]
    fn test_advance_within_pick_distance() {
        let mut buffer = buffer_with(straight_path());

        // 3м до waypoint 1 при pick 2 → стоим
        assert_eq!(buffer.advance(Vec3::new(7.0, 0.0, 0.0), 2.0), 0);
        assert_eq!(buffer.waypoint_index(), 1);

        // 1м → переход к waypoint 2
        assert_eq!(buffer.advance(Vec3::new(9.0, 0.0, 0.0), 2.0), 1);
        assert_eq!(buffer.waypoint_index(), 2);
        assert_eq!(
            buffer.active_segment(),
            Some((Vec3::new(10.0, 0.0, 0.0), Vec3::new(20.0, 0.0, 0.0)))
        );
    }

    #[test]
    fn test_advance_skips_several_close_waypoints() {
        let points = vec![
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.5, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
        ];
        let mut buffer = buffer_with(points);

        assert_eq!(buffer.advance(Vec3::new(0.5, 0.0, 0.0), 2.0), 3);
        assert_eq!(buffer.waypoint_index(), 4);
    }

    #[test]
    fn test_advance_never_past_last_waypoint() {
        let mut buffer = buffer_with(straight_path());

        buffer.advance(Vec3::new(30.0, 0.0, 0.0), 100.0);
        assert_eq!(buffer.waypoint_index(), 3);
        assert!(buffer.is_final_segment());

        // На финальном сегменте advance больше ничего не делает
        assert_eq!(buffer.advance(Vec3::new(30.0, 0.0, 0.0), 100.0), 0);
        assert_eq!(buffer.waypoint_index(), 3);
    }

    #[test]
    fn test_advance_is_monotonic() {
        let mut buffer = buffer_with(straight_path());
        buffer.advance(Vec3::new(9.5, 0.0, 0.0), 2.0);
        buffer.advance(Vec3::new(19.5, 0.0, 0.0), 2.0);
        assert_eq!(buffer.waypoint_index(), 3);

        // Агент откатился назад к началу пути → индекс не уменьшается
        assert_eq!(buffer.advance(Vec3::ZERO, 2.0), 0);
        assert_eq!(buffer.waypoint_index(), 3);
    }

    #[test]
    fn test_advance_ignores_height() {
        let mut buffer = buffer_with(straight_path());

        // 50м по вертикали над waypoint'ом → в плоскости XZ он рядом
        buffer.advance(Vec3::new(10.0, 50.0, 0.0), 2.0);
        assert_eq!(buffer.waypoint_index(), 2);
        assert_eq!(xz_distance_squared(Vec3::new(0.0, 5.0, 0.0), Vec3::new(3.0, -2.0, 4.0)), 25.0);
    }

    #[test]
    fn test_release_clears_path() {
        let mut buffer = buffer_with(straight_path());
        buffer.release();

        assert!(!buffer.has_path());
        assert_eq!(buffer.waypoint_index(), 0);
        assert_eq!(buffer.active_segment(), None);
        assert!(!buffer.is_final_segment());
        assert_eq!(buffer.advance(Vec3::ZERO, 2.0), 0);
    }

    #[test]
    fn test_clamp_index() {
        let mut buffer = PathBuffer::default();
        // Без пути clamp ничего не делает
        buffer.clamp_index();
        assert_eq!(buffer.waypoint_index(), 0);

        buffer
            .accept(Ok(straight_path()), Vec3::ZERO, Vec3::ZERO, 1)
            .unwrap();
        buffer.clamp_index();
        assert_eq!(buffer.waypoint_index(), 1);
    }
}
