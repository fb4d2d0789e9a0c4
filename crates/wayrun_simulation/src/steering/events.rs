//! Steering events

use bevy::prelude::*;

/// Event: агент прибыл в конечную точку пути
///
/// Edge-triggered: ровно один раз на переход arrival false → true для экземпляра пути.
/// Scope — конкретный entity, глобальных подписчиков нет.
///
/// Обрабатывается:
/// - advance_routes_on_arrival (следующая точка маршрута)
/// - любой decision layer host'а
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TargetReached {
    pub entity: Entity,
    pub position: Vec3,
}
