//! SteeringController — единственный конкретный steering компонент агента.
//!
//! Владеет PathBuffer, ArrivalDetector, RepathScheduler и SteeringState.
//! Сам Transform не двигает: отдаёт velocity/aim-point, движение применяет host.

use bevy::prelude::*;

use super::arrival::{ArrivalCheck, ArrivalDetector};
use super::config::SteeringConfig;
use super::lookahead::aim_point;
use super::orientation::rotate_towards;
use super::path_buffer::{Path, PathBuffer};
use super::repath::{RepathDecision, RepathScheduler};
use super::velocity::{commanded_speed, planar_direction};
use crate::error::SteeringError;
use crate::planner::{PlanError, PlanResponse};

/// Окно (сек), в котором последний пройденный waypoint считается свежим reference для resync
pub const RESYNC_RECENCY_WINDOW: f32 = 0.3;

/// Верхняя граница выборок dry-прогона resync
///
/// Дальше шаг растягивается: reference → agent_pos делится на MAX_RESYNC_SAMPLES частей.
pub const MAX_RESYNC_SAMPLES: usize = 4096;

/// Узкий capability set навигатора: всё, что decision layer знает об агенте
pub trait Navigator {
    /// Попытаться выпустить запрос пути из `start` к `goal`
    fn issue_plan_request(&mut self, start: Vec3, goal: Option<Vec3>, now: f32) -> RepathDecision;

    /// Текущий aim-point (None пока нет пути)
    fn current_aim_point(&self) -> Option<Vec3>;

    fn currently_movable(&self) -> bool;

    fn is_at_target(&self) -> bool;
}

/// Последний момент, когда индекс waypoint сдвинулся
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaypointAdvance {
    pub position: Vec3,
    pub time: f32,
}

/// Mutable steering state агента
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SteeringState {
    /// Планарное направление к aim-point (не нормализовано)
    pub direction: Vec3,
    pub aim_point: Vec3,
    pub last_advance: Option<WaypointAdvance>,
}

/// Результат steering тика
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SteeringOutput {
    pub velocity: Vec3,
    pub aim_point: Option<Vec3>,
    pub direction: Vec3,
    pub arrival: ArrivalCheck,
}

/// Что произошло с ответом планировщика
#[derive(Debug, Clone, PartialEq)]
pub enum PathAcceptance {
    /// Путь принят, индекс пересинхронизирован
    Accepted { waypoint_index: usize },
    /// Планировщик не нашёл путь — старый путь остаётся
    Failed(PlanError),
    /// Ответ не на текущий запрос (агент был сброшен) — выброшен
    Stale,
}

#[derive(Component, Debug, Clone, Default)]
pub struct SteeringController {
    config: SteeringConfig,
    buffer: PathBuffer,
    arrival: ArrivalDetector,
    repath: RepathScheduler,
    state: SteeringState,
}

impl SteeringController {
    pub fn new(config: SteeringConfig) -> Result<Self, SteeringError> {
        config.validate()?;

        Ok(Self {
            config,
            ..default()
        })
    }

    pub fn config(&self) -> &SteeringConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SteeringConfig) -> Result<(), SteeringError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.buffer.path()
    }

    pub fn waypoint_index(&self) -> usize {
        self.buffer.waypoint_index()
    }

    pub fn state(&self) -> &SteeringState {
        &self.state
    }

    pub fn repath(&self) -> &RepathScheduler {
        &self.repath
    }

    /// Запрос пути in-flight
    pub fn is_pathfinding(&self) -> bool {
        self.repath.is_in_flight()
    }

    /// Применить ответ планировщика
    ///
    /// Scheduler возвращается в Idle на любой свой ответ — даже если ответ битый
    /// (`Err`), иначе агент навсегда застрянет в RequestInFlight.
    pub fn accept_response(
        &mut self,
        response: PlanResponse,
        agent_pos: Vec3,
        now: f32,
    ) -> Result<PathAcceptance, SteeringError> {
        let PlanResponse {
            request_id,
            start,
            result,
        } = response;

        if !self.repath.complete(request_id) {
            return Ok(PathAcceptance::Stale);
        }

        if let Err(err) = result {
            return Ok(PathAcceptance::Failed(err));
        }

        self.buffer.accept(result, start, agent_pos, request_id)?;
        self.arrival.reset();

        if self.config.closest_on_path_check {
            self.resync_to(agent_pos, now);
        }

        Ok(PathAcceptance::Accepted {
            waypoint_index: self.buffer.waypoint_index(),
        })
    }

    /// Closest-point resync: dry-прогон продвижения waypoint'ов вдоль отрезка
    /// reference → agent_pos с шагом `pick_next_waypoint_dist`
    ///
    /// Агент не двигается и arrival не поднимается — только индекс догоняет
    /// дистанцию, пройденную пока планировщик считал путь.
    fn resync_to(&mut self, agent_pos: Vec3, now: f32) {
        let Some(path) = self.buffer.path() else {
            return;
        };

        let reference = match self.state.last_advance {
            Some(advance) if now - advance.time < RESYNC_RECENCY_WINDOW => advance.position,
            _ => path.original_start(),
        };
        let last_index = path.last_index();

        let pick = self.config.pick_next_waypoint_dist;
        let offset = agent_pos - reference;
        let distance = offset.length();

        if distance <= f32::EPSILON || pick <= 0.0 {
            self.advance_waypoints(agent_pos, now);
            return;
        }

        let mut step = offset / distance * pick;
        let mut steps = (distance / pick).floor() as usize;
        if steps > MAX_RESYNC_SAMPLES {
            steps = MAX_RESYNC_SAMPLES;
            step = offset / steps as f32;
        }

        for i in 0..=steps {
            self.advance_waypoints(reference + step * i as f32, now);

            if self.buffer.waypoint_index() >= last_index {
                break;
            }
        }
    }

    fn advance_waypoints(&mut self, position: Vec3, now: f32) {
        self.buffer.clamp_index();

        if self.buffer.advance(position, self.config.pick_next_waypoint_dist) > 0 {
            self.state.last_advance = Some(WaypointAdvance {
                position,
                time: now,
            });
        }
    }

    /// Steering тик: velocity к aim-point
    ///
    /// Без пути → нулевая velocity (штатное состояние "пути ещё нет").
    pub fn compute_velocity(
        &mut self,
        agent_pos: Vec3,
        facing_forward: Vec3,
        dt: f32,
        now: f32,
    ) -> SteeringOutput {
        self.advance_waypoints(agent_pos, now);

        let Some((seg_a, seg_b)) = self.buffer.active_segment() else {
            self.state.direction = Vec3::ZERO;
            return SteeringOutput::default();
        };

        let aim = aim_point(agent_pos, seg_a, seg_b, self.config.forward_look);
        let direction = planar_direction(agent_pos, aim);
        let target_dist = direction.length();

        self.state.aim_point = aim;
        self.state.direction = direction;

        let arrival = self.arrival.evaluate(
            self.buffer.is_final_segment(),
            target_dist,
            self.config.end_reached_distance,
        );

        let velocity = if arrival.is_at_target() {
            Vec3::ZERO
        } else {
            facing_forward * commanded_speed(&self.config, direction, facing_forward, dt)
        };

        SteeringOutput {
            velocity,
            aim_point: Some(aim),
            direction,
            arrival,
        }
    }

    /// Поворот facing к последнему steering направлению
    pub fn rotate_towards(&self, current: Quat, dt: f32) -> Quat {
        rotate_towards(current, self.state.direction, self.config.turning_speed, dt)
    }

    /// Disable агента: путь освобождён, gating запросов и индекс сброшены
    pub fn disable(&mut self) {
        self.buffer.release();
        self.repath.reset();
        self.arrival.reset();
        self.state = SteeringState::default();
    }
}

impl Navigator for SteeringController {
    fn issue_plan_request(&mut self, start: Vec3, goal: Option<Vec3>, now: f32) -> RepathDecision {
        self.repath.poll(
            now,
            self.config.repath_rate,
            self.config.can_search,
            start,
            goal,
        )
    }

    fn current_aim_point(&self) -> Option<Vec3> {
        self.buffer.has_path().then_some(self.state.aim_point)
    }

    fn currently_movable(&self) -> bool {
        self.config.can_move
    }

    fn is_at_target(&self) -> bool {
        self.arrival.is_reached()
    }
}
