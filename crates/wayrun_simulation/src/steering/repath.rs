//! Repath scheduler: rate-limit запросов пути.
//!
//! Idle → RequestInFlight когда одновременно:
//! - с последнего запроса прошло ≥ repath_rate
//! - нет запроса in-flight
//! - repath разрешён
//! - цель задана
//!
//! RequestInFlight → Idle на любой ответ с совпадающим request_id (успех или отказ).
//! Вместо busy-polling scheduler отдаёт "retry in" — host спит это время.

use bevy::prelude::*;

use crate::planner::PlanRequest;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RepathState {
    #[default]
    Idle,
    RequestInFlight { request_id: u64, issued_at: f32 },
}

/// Решение scheduler'а на этот вызов
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RepathDecision {
    /// Выпустить запрос (state → RequestInFlight)
    Issue { request: PlanRequest, retry_in: f32 },
    /// Ждать: следующий вызов имеет смысл не раньше чем через `retry_in` сек
    Wait { retry_in: f32 },
}

impl RepathDecision {
    pub fn retry_in(&self) -> f32 {
        match self {
            RepathDecision::Issue { retry_in, .. } | RepathDecision::Wait { retry_in } => *retry_in,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepathScheduler {
    state: RepathState,
    last_request_at: Option<f32>,
    /// Монотонный счётчик: id не переиспользуются даже после reset
    next_request_id: u64,
}

impl RepathScheduler {
    pub fn state(&self) -> RepathState {
        self.state
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.state, RepathState::RequestInFlight { .. })
    }

    pub fn last_request_at(&self) -> Option<f32> {
        self.last_request_at
    }

    pub fn poll(
        &mut self,
        now: f32,
        repath_rate: f32,
        enabled: bool,
        start: Vec3,
        goal: Option<Vec3>,
    ) -> RepathDecision {
        let elapsed = self.last_request_at.map(|issued| now - issued);
        let due = elapsed.map_or(true, |elapsed| elapsed >= repath_rate);

        match goal {
            Some(goal) if due && enabled && !self.is_in_flight() => {
                self.next_request_id += 1;
                let request_id = self.next_request_id;

                self.last_request_at = Some(now);
                self.state = RepathState::RequestInFlight {
                    request_id,
                    issued_at: now,
                };

                RepathDecision::Issue {
                    request: PlanRequest {
                        request_id,
                        start,
                        goal,
                    },
                    retry_in: repath_rate,
                }
            }
            _ => RepathDecision::Wait {
                retry_in: elapsed.map_or(0.0, |elapsed| (repath_rate - elapsed).max(0.0)),
            },
        }
    }

    /// Ответ на запрос `request_id` получен
    ///
    /// `false` — ответ не на текущий in-flight запрос (устарел после reset), игнорировать.
    pub fn complete(&mut self, request_id: u64) -> bool {
        match self.state {
            RepathState::RequestInFlight { request_id: in_flight, .. } if in_flight == request_id => {
                self.state = RepathState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Disable/enable агента: gating сбрасывается, следующий poll выпустит запрос сразу
    pub fn reset(&mut self) {
        self.state = RepathState::Idle;
        self.last_request_at = None;
    }
}
