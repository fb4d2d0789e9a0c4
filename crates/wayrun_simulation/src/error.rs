//! Ошибки steering ядра.
//!
//! Плановые отказы (`PlanError`) — штатная ситуация, агент продолжает старый путь.
//! `SteeringError` — нарушение инвариантов: операция прерывается, host логирует как ERROR.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SteeringError {
    /// Planner вернул Ok с пустым списком точек (инвариант: len ≥ 1)
    #[error("plan response #{request_id} carried an empty point list")]
    EmptyPath { request_id: u64 },

    /// Параметр SteeringConfig отрицательный или не конечный
    #[error("invalid steering config: {field} = {value}")]
    InvalidConfig { field: &'static str, value: f32 },
}
