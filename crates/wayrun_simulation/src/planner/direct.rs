//! DirectPlanner — прямая линия start → goal, порезанная на waypoints.
//!
//! Не A*: reference планировщик для headless демо и тестов.

use bevy::prelude::*;

use super::types::{PathResult, PlanError};
use super::PathPlanner;

/// Предел числа сегментов: крошечный `waypoint_spacing` не раздувает путь
pub const MAX_SEGMENTS: usize = 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct DirectPlanner {
    /// Максимальная длина сегмента (м); ≤ 0 → путь из двух точек
    pub waypoint_spacing: f32,
    /// Проходимая область в плоскости XZ (None = весь мир)
    pub bounds: Option<Rect>,
}

impl Default for DirectPlanner {
    fn default() -> Self {
        Self {
            waypoint_spacing: 4.0,
            bounds: None,
        }
    }
}

impl DirectPlanner {
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    fn reachable(&self, point: Vec3) -> bool {
        self.bounds
            .map_or(true, |bounds| bounds.contains(Vec2::new(point.x, point.z)))
    }
}

impl PathPlanner for DirectPlanner {
    fn plan(&mut self, start: Vec3, goal: Vec3) -> PathResult {
        if !self.reachable(goal) {
            return Err(PlanError::Unreachable { goal });
        }

        let length = start.distance(goal);
        let segments = if self.waypoint_spacing > 0.0 {
            ((length / self.waypoint_spacing).ceil() as usize).clamp(1, MAX_SEGMENTS)
        } else {
            1
        };

        // Последняя точка = goal без ошибки округления lerp
        Ok((0..=segments)
            .map(|i| match i {
                i if i == segments => goal,
                i => start.lerp(goal, i as f32 / segments as f32),
            })
            .collect())
    }
}
