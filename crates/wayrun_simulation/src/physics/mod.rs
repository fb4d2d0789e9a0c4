//! Physics module — host-side motion step.
//!
//! Steering ядро Transform не двигает: эти системы применяют MotionCommand.
//! Rapier используется для коллизий, velocity интегрируем сами.

pub mod motion;

// Re-export основных типов
pub use motion::{spawn_steering_agent, KinematicMotion, KinematicMotionPlugin};
