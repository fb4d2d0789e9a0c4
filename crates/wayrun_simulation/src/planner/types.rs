//! Plan request/response — граница с внешним global planner.

use bevy::prelude::*;
use thiserror::Error;

/// Отказ планировщика (не фатально: агент продолжает последний валидный путь)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("goal {goal:?} is unreachable")]
    Unreachable { goal: Vec3 },

    #[error("planner failure: {0}")]
    Planner(String),
}

/// Результат поиска: упорядоченные точки пути или отказ
pub type PathResult = Result<Vec<Vec3>, PlanError>;

/// Запрос пути (не более одного in-flight на агента)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanRequest {
    pub request_id: u64,
    pub start: Vec3,
    pub goal: Vec3,
}

impl PlanRequest {
    /// Оборачивает результат поиска в ответ на этот запрос
    pub fn respond(&self, result: PathResult) -> PlanResponse {
        PlanResponse {
            request_id: self.request_id,
            start: self.start,
            result,
        }
    }
}

/// Ответ планировщика
///
/// `start` — точка, из которой был выпущен запрос (reference для resync).
#[derive(Debug, Clone, PartialEq)]
pub struct PlanResponse {
    pub request_id: u64,
    pub start: Vec3,
    pub result: PathResult,
}
