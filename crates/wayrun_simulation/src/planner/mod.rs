//! Planner boundary: запросы/ответы пути.
//!
//! Сам поиск пути (граф, A*) — внешний коллаборатор. Ядро видит его только как
//! "упорядоченные точки или отказ", доставленные асинхронно через PathCompleted.
//!
//! Host может:
//! - читать PathRequested и сам писать PathCompleted (настоящий async planner)
//! - или вставить PlannerQueue с любым PathPlanner — очередь симулирует latency

use bevy::prelude::*;
use rand::Rng;

use crate::DeterministicRng;

pub mod direct;
pub mod events;
pub mod types;

pub use direct::DirectPlanner;
pub use events::{PathCompleted, PathRequested};
pub use types::{PathResult, PlanError, PlanRequest, PlanResponse};

/// Синхронный планировщик (ответ считается сразу, доставляется с задержкой)
pub trait PathPlanner: Send + Sync + 'static {
    fn plan(&mut self, start: Vec3, goal: Vec3) -> PathResult;
}

/// Ответ, ожидающий доставки
#[derive(Debug, Clone)]
struct PendingPlan {
    entity: Entity,
    ticks_left: u32,
    response: PlanResponse,
}

/// Очередь планировщика с детерминированной latency (в тиках)
///
/// Latency берётся из DeterministicRng в диапазоне `min_latency_ticks..=max_latency_ticks`.
#[derive(Resource)]
pub struct PlannerQueue {
    planner: Box<dyn PathPlanner>,
    min_latency_ticks: u32,
    max_latency_ticks: u32,
    pending: Vec<PendingPlan>,
}

impl PlannerQueue {
    pub fn new(planner: impl PathPlanner) -> Self {
        Self {
            planner: Box::new(planner),
            min_latency_ticks: 0,
            max_latency_ticks: 0,
            pending: Vec::new(),
        }
    }

    pub fn with_latency(mut self, min_ticks: u32, max_ticks: u32) -> Self {
        self.min_latency_ticks = min_ticks.min(max_ticks);
        self.max_latency_ticks = max_ticks.max(min_ticks);
        self
    }

    /// Диапазон latency `(min, max)` в тиках, min ≤ max
    pub fn latency_ticks(&self) -> (u32, u32) {
        (self.min_latency_ticks, self.max_latency_ticks)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

/// Система: обработка PathRequested через PlannerQueue
///
/// 1. Новые запросы → planner.plan() → в очередь с latency
/// 2. Тикаем очередь, готовые ответы → PathCompleted (в порядке поступления)
///
/// Latency 0 → ответ доставляется в этом же тике (до absorb_path_responses).
pub fn process_plan_requests(
    mut requests: EventReader<PathRequested>,
    mut completions: EventWriter<PathCompleted>,
    mut queue: ResMut<PlannerQueue>,
    mut rng: ResMut<DeterministicRng>,
) {
    for requested in requests.read() {
        let request = requested.request;
        let result = queue.planner.plan(request.start, request.goal);

        let (min, max) = queue.latency_ticks();
        let ticks_left = rng.rng.gen_range(min..=max);

        queue.pending.push(PendingPlan {
            entity: requested.entity,
            ticks_left,
            response: request.respond(result),
        });
    }

    let mut still_pending = Vec::with_capacity(queue.pending.len());
    for mut pending in queue.pending.drain(..) {
        if pending.ticks_left == 0 {
            completions.write(PathCompleted {
                entity: pending.entity,
                response: pending.response,
            });
        } else {
            pending.ticks_left -= 1;
            still_pending.push(pending);
        }
    }
    queue.pending = still_pending;
}
