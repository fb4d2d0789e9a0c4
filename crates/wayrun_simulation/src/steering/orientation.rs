//! Orientation: плавный поворот facing к направлению движения.
//!
//! Forward в Bevy = -Z. Поворот только по yaw: steering не наклоняет и не кренит агента.

use bevy::prelude::*;

/// Yaw-поворот, при котором forward (-Z) смотрит вдоль `direction` в плоскости XZ
///
/// `None` если у направления нет горизонтальной составляющей.
pub fn look_rotation(direction: Vec3) -> Option<Quat> {
    let planar = Vec3::new(direction.x, 0.0, direction.z).try_normalize()?;
    Some(Quat::from_rotation_y(f32::atan2(-planar.x, -planar.z)))
}

/// Slerp текущего поворота к `desired_dir` с долей `turn_rate × dt`
///
/// Экспоненциальное приближение к целевому yaw (не фиксированный угловой шаг).
/// Нулевое `desired_dir` → поворот не меняется.
pub fn rotate_towards(current: Quat, desired_dir: Vec3, turn_rate: f32, dt: f32) -> Quat {
    let Some(target) = look_rotation(desired_dir) else {
        return current;
    };

    let fraction = (turn_rate * dt).clamp(0.0, 1.0);
    let blended = current.slerp(target, fraction);

    // Pitch/roll подавляем после интерполяции
    let (yaw, _, _) = blended.to_euler(EulerRot::YXZ);
    Quat::from_rotation_y(yaw)
}

/// То же для forward-векторов (host без Transform)
pub fn rotate_forward_towards(
    current_forward: Vec3,
    desired_dir: Vec3,
    turn_rate: f32,
    dt: f32,
) -> Vec3 {
    let current = look_rotation(current_forward).unwrap_or(Quat::IDENTITY);
    rotate_towards(current, desired_dir, turn_rate, dt) * Vec3::NEG_Z
}
