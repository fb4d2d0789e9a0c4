//! ECS Components для steering агентов
//!
//! Организация по доменам:
//! - steering: агент, цель, выходная команда движения, suspend-маркер
//!
//! SteeringController живёт в `crate::steering` (вместе с логикой, которой владеет),
//! RouteFollower — в `crate::route`.

pub mod steering;

// Re-exports для удобного импорта
pub use steering::*;
