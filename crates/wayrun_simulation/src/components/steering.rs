//! Steering компоненты агента: цель, выходная команда, suspend-маркер.

use bevy::prelude::*;

use crate::steering::SteeringController;

/// Steering агент (маркер)
///
/// Автоматически добавляет SteeringController (default config), TargetRequest,
/// MotionCommand и RepathCountdown через Required Components.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(SteeringController, TargetRequest, MotionCommand, RepathCountdown, Transform)]
pub struct SteeringAgent;

/// Куда идти (задаётся decision layer / route follower)
///
/// `destination == None` → цели нет, repath не выпускается.
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct TargetRequest {
    pub destination: Option<Vec3>,
    /// Имя маршрута, из которого выбрана цель (только для логов/debug)
    pub route: Option<String>,
}

impl TargetRequest {
    pub fn to(destination: Vec3) -> Self {
        Self {
            destination: Some(destination),
            route: None,
        }
    }
}

/// Per-tick команда движения (читает host motion step)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MotionCommand {
    /// Желаемая velocity (м/с), вдоль facing агента
    pub velocity: Vec3,
    /// Текущий lookahead aim-point (None пока нет пути)
    pub aim_point: Option<Vec3>,
    /// Планарное направление к aim-point
    pub direction: Vec3,
}

/// Сколько ждать (сек) до следующего опроса RepathScheduler
///
/// Вместо busy-polling каждый тик: scheduler отдаёт "retry in", система спит.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct RepathCountdown {
    pub remaining: f32,
}

/// Агент отключён: путь освобождён, запросы не выпускаются, steering стоит
///
/// Снятие маркера = enable (следующий тик сразу запросит путь).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct SteeringSuspended;
