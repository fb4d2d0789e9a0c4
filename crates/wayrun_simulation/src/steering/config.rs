//! Tunables steering контроллера (plain scalars, без файлового формата).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::SteeringError;

/// Параметры следования по пути
///
/// Defaults: 3 м/с, допуск прибытия 0.2м,
/// repath каждые 0.5 сек.
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct SteeringConfig {
    /// Максимальная скорость (м/с)
    pub max_speed: f32,
    /// Радиус прибытия к последней точке пути (м)
    pub end_reached_distance: f32,
    /// Damping поворота для slerp (выше = быстрее разворот)
    pub turning_speed: f32,
    /// Минимальный интервал между запросами пути (сек)
    pub repath_rate: f32,
    /// Радиус, в котором waypoint считается пройденным (м)
    pub pick_next_waypoint_dist: f32,
    /// Дистанция до aim-point, на которой начинается торможение (м)
    pub slowdown_distance: f32,
    /// Lookahead вперёд по сегменту (м)
    pub forward_look: f32,
    /// Доля скорости при развороте на месте (0..1)
    pub min_move_scale: f32,
    /// Движение разрешено
    pub can_move: bool,
    /// Repath разрешён
    pub can_search: bool,
    /// Resync индекса waypoint при получении нового пути
    pub closest_on_path_check: bool,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            max_speed: 3.0,
            end_reached_distance: 0.2,
            turning_speed: 5.0,
            repath_rate: 0.5,
            pick_next_waypoint_dist: 2.0,
            slowdown_distance: 0.6,
            forward_look: 1.0,
            min_move_scale: 0.05,
            can_move: true,
            can_search: true,
            closest_on_path_check: true,
        }
    }
}

/// Минимальный ненулевой `pick_next_waypoint_dist` (м)
///
/// 0 разрешён (resync берёт одну выборку), но шаг меньше сантиметра даёт
/// миллионы выборок на одну замену пути.
pub const MIN_PICK_NEXT_WAYPOINT_DIST: f32 = 0.01;

impl SteeringConfig {
    /// Проверка: все скалярные параметры конечные и ≥ 0,
    /// `pick_next_waypoint_dist` либо 0, либо ≥ MIN_PICK_NEXT_WAYPOINT_DIST
    pub fn validate(&self) -> Result<(), SteeringError> {
        let fields = [
            ("max_speed", self.max_speed),
            ("end_reached_distance", self.end_reached_distance),
            ("turning_speed", self.turning_speed),
            ("repath_rate", self.repath_rate),
            ("pick_next_waypoint_dist", self.pick_next_waypoint_dist),
            ("slowdown_distance", self.slowdown_distance),
            ("forward_look", self.forward_look),
            ("min_move_scale", self.min_move_scale),
        ];

        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(SteeringError::InvalidConfig { field, value });
            }
        }

        let pick = self.pick_next_waypoint_dist;
        if pick > 0.0 && pick < MIN_PICK_NEXT_WAYPOINT_DIST {
            return Err(SteeringError::InvalidConfig {
                field: "pick_next_waypoint_dist",
                value: pick,
            });
        }

        Ok(())
    }
}
