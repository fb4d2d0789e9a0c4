//! PathBuffer: активный путь + индекс waypoint, к которому идёт агент.
//!
//! Single ownership: новый путь целиком заменяет старый, старый просто дропается.
//! Активный сегмент всегда `[index - 1, index]`, поэтому `1 ≤ index ≤ len - 1`.

use bevy::prelude::*;

use crate::error::SteeringError;
use crate::planner::PathResult;

/// Неизменяемый после публикации путь
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    points: Vec<Vec3>,
    original_start: Vec3,
}

impl Path {
    /// Нормализованный путь из ответа планировщика
    ///
    /// - Пустой список точек → `SteeringError::EmptyPath`
    /// - Одна точка → в начало вставляется позиция агента (вырожденный первый сегмент)
    pub fn normalized(
        mut points: Vec<Vec3>,
        original_start: Vec3,
        agent_pos: Vec3,
        request_id: u64,
    ) -> Result<Self, SteeringError> {
        if points.is_empty() {
            return Err(SteeringError::EmptyPath { request_id });
        }

        if points.len() == 1 {
            points.insert(0, agent_pos);
        }

        Ok(Self {
            points,
            original_start,
        })
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Точка, из которой был выпущен запрос на этот путь
    pub fn original_start(&self) -> Vec3 {
        self.original_start
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.points.len() - 1
    }
}

/// Квадрат расстояния в плоскости XZ
pub fn xz_distance_squared(a: Vec3, b: Vec3) -> f32 {
    let dx = b.x - a.x;
    let dz = b.z - a.z;
    dx * dx + dz * dz
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathBuffer {
    path: Option<Path>,
    index: usize,
}

impl PathBuffer {
    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    pub fn has_path(&self) -> bool {
        self.path.is_some()
    }

    /// Текущий tracked waypoint (0 когда пути нет)
    pub fn waypoint_index(&self) -> usize {
        self.index
    }

    /// Принять ответ планировщика
    ///
    /// `Ok(false)` — отказ планировщика, старый путь не тронут.
    /// `Err` — нарушение инварианта ответа, старый путь тоже не тронут.
    pub fn accept(
        &mut self,
        result: PathResult,
        original_start: Vec3,
        agent_pos: Vec3,
        request_id: u64,
    ) -> Result<bool, SteeringError> {
        let Ok(points) = result else {
            return Ok(false);
        };

        let path = Path::normalized(points, original_start, agent_pos, request_id)?;
        self.path = Some(path);
        self.index = 1;

        Ok(true)
    }

    /// Освободить путь (disable агента)
    pub fn release(&mut self) {
        self.path = None;
        self.index = 0;
    }

    /// Clamp индекса в `[1, len - 1]`
    pub fn clamp_index(&mut self) {
        if let Some(path) = &self.path {
            self.index = self.index.clamp(1, path.last_index());
        }
    }

    /// Сдвинуть индекс вперёд по всем waypoint'ам в радиусе `pick_next_waypoint_dist`
    ///
    /// Индекс только растёт: пройденные waypoints не пересматриваются, даже если
    /// агент откатился назад. Возвращает количество пройденных waypoints.
    pub fn advance(&mut self, position: Vec3, pick_next_waypoint_dist: f32) -> usize {
        let Some(path) = &self.path else {
            return 0;
        };

        let pick_sq = pick_next_waypoint_dist * pick_next_waypoint_dist;
        let last = path.last_index();
        let mut advanced = 0;

        while self.index < last
            && xz_distance_squared(path.points[self.index], position) < pick_sq
        {
            self.index += 1;
            advanced += 1;
        }

        advanced
    }

    /// Активный сегмент `(path[index - 1], path[index])`
    pub fn active_segment(&self) -> Option<(Vec3, Vec3)> {
        let path = self.path.as_ref()?;
        if self.index == 0 || self.index > path.last_index() {
            return None;
        }

        Some((path.points[self.index - 1], path.points[self.index]))
    }

    pub fn is_final_segment(&self) -> bool {
        self.path
            .as_ref()
            .is_some_and(|path| self.index == path.last_index())
    }
}
