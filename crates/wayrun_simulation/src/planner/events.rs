//! Planner events — асинхронная граница steering ↔ global planner.

use bevy::prelude::*;

use super::types::{PlanRequest, PlanResponse};

/// Event: агент просит путь
///
/// Генерируется issue_path_requests (не больше одного in-flight на агента).
/// Обрабатывается host planner'ом или PlannerQueue.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PathRequested {
    pub entity: Entity,
    pub request: PlanRequest,
}

/// Event: планировщик ответил (может прийти через любое число тиков)
///
/// absorb_path_responses применяет ответ ДО steering тика — путь заменяется атомарно.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PathCompleted {
    pub entity: Entity,
    pub response: PlanResponse,
}
