//! Velocity контроллер: скорость к aim-point с учётом выравнивания и торможения.
//!
//! Формула:
//! - slowdown = clamp01(target_dist / slowdown_distance)
//! - speed = max_speed × max(dot(dir, forward), min_move_scale) × slowdown
//! - при dt > 0: speed ≤ target_dist / (2 × dt) — не перелетаем aim-point за два тика

use bevy::prelude::*;

use super::config::SteeringConfig;

/// Направление к aim-point в горизонтальной плоскости (Y = 0)
pub fn planar_direction(agent_pos: Vec3, aim_point: Vec3) -> Vec3 {
    let mut direction = aim_point - agent_pos;
    direction.y = 0.0;
    direction
}

/// Множитель торможения около aim-point (0..1)
pub fn slowdown_factor(target_dist: f32, slowdown_distance: f32) -> f32 {
    if slowdown_distance <= 0.0 {
        return 1.0;
    }

    (target_dist / slowdown_distance).clamp(0.0, 1.0)
}

/// Скалярная скорость вдоль `facing_forward` на этот тик
///
/// `min_move_scale` — пол для разворота на месте: агент ползёт вперёд, даже
/// когда цель у него за спиной, а не стоит колом.
pub fn commanded_speed(
    config: &SteeringConfig,
    direction: Vec3,
    facing_forward: Vec3,
    dt: f32,
) -> f32 {
    let target_dist = direction.length();
    let slowdown = slowdown_factor(target_dist, config.slowdown_distance);

    let dot = direction.normalize_or_zero().dot(facing_forward);
    let speed = config.max_speed * dot.max(config.min_move_scale) * slowdown;

    if dt > 0.0 {
        speed.clamp(0.0, target_dist / (dt * 2.0))
    } else {
        speed
    }
}
