//! Lookahead aim-point: точка впереди проекции агента на активный сегмент.

use bevy::prelude::*;

/// Параметр t ближайшей к `point` точки на бесконечной прямой `a → b`
///
/// Не clamp'ится: вызывающий сам решает, нужна ли точка на отрезке.
pub fn nearest_point_factor(a: Vec3, b: Vec3, point: Vec3) -> f32 {
    let line = b - a;
    let length_sq = line.length_squared();
    if length_sq == 0.0 {
        return 0.0;
    }

    (point - a).dot(line) / length_sq
}

/// Aim-point для агента в `agent_pos` на сегменте `seg_a → seg_b`
///
/// Steering планарный: концы сегмента поднимаются на высоту агента.
/// Чем дальше агент от сегмента, тем короче lookahead — aim-point не убегает
/// вперёд, пока агент возвращается на путь.
pub fn aim_point(agent_pos: Vec3, seg_a: Vec3, seg_b: Vec3, forward_look: f32) -> Vec3 {
    let a = Vec3::new(seg_a.x, agent_pos.y, seg_a.z);
    let b = Vec3::new(seg_b.x, agent_pos.y, seg_b.z);

    let segment = b - a;
    let length = segment.length();
    if length == 0.0 {
        return a;
    }

    let closest = nearest_point_factor(a, b, agent_pos).clamp(0.0, 1.0);
    let point = a + segment * closest;
    let distance = (point - agent_pos).length();

    let forward_look = forward_look.max(0.0);
    let look_ahead = (forward_look - distance).clamp(0.0, forward_look);

    let offset = (closest + look_ahead / length).clamp(0.0, 1.0);
    a + segment * offset
}
