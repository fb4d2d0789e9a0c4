//! Route domain — именованные маршруты из waypoints.
//!
//! Decision layer задаёт маршрут по имени, агент обходит его по кругу:
//! на каждое TargetReached берётся следующая точка, после последней — снова первая.
//! Steering ядро маршрутов не знает: для него это просто смена TargetRequest.

use bevy::prelude::*;
use std::collections::HashMap;

pub mod systems;

pub use systems::{advance_routes_on_arrival, start_route_followers};

use crate::steering::SteeringSet;

/// Route Plugin
///
/// start_route_followers — до запросов пути (первая цель в тот же тик).
/// advance_routes_on_arrival — после steering (читает TargetReached).
pub struct RoutePlugin;

impl Plugin for RoutePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WaypointRoutes>()
            .register_type::<RouteFollower>();

        app.add_systems(
            FixedUpdate,
            (
                systems::start_route_followers.before(SteeringSet::RequestPaths),
                systems::advance_routes_on_arrival.in_set(SteeringSet::React),
            ),
        );
    }
}

/// Реестр маршрутов (имя → упорядоченные waypoints)
#[derive(Resource, Debug, Clone, Default)]
pub struct WaypointRoutes {
    routes: HashMap<String, Vec<Vec3>>,
}

impl WaypointRoutes {
    pub fn insert(&mut self, name: impl Into<String>, waypoints: Vec<Vec3>) {
        self.routes.insert(name.into(), waypoints);
    }

    pub fn get(&self, name: &str) -> Option<&[Vec3]> {
        self.routes.get(name).map(Vec::as_slice)
    }
}

/// Агент обходит маршрут `route` по кругу
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct RouteFollower {
    pub route: String,
    /// Индекс точки, которая станет следующей целью
    pub next_waypoint: usize,
    /// Радиус, в котором TargetReached засчитывается для текущей цели маршрута (м)
    pub close_enough: f32,
    /// Учитывать высоту при проверке прибытия
    pub allow_3d: bool,
}

impl RouteFollower {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            next_waypoint: 0,
            close_enough: 0.5,
            allow_3d: false,
        }
    }

    /// Взять следующую точку маршрута и сдвинуть индекс (с wrap-around)
    pub fn next_destination(&mut self, waypoints: &[Vec3]) -> Option<Vec3> {
        if waypoints.is_empty() {
            return None;
        }

        let index = self.next_waypoint % waypoints.len();
        self.next_waypoint = (index + 1) % waypoints.len();

        Some(waypoints[index])
    }
}

/// Агент в `close_enough` от `target`?
///
/// Без 3D движения высота игнорируется (target поднимается на высоту агента).
pub fn is_at(agent_pos: Vec3, target: Vec3, close_enough: f32, allow_3d: bool) -> bool {
    let target = if allow_3d {
        target
    } else {
        Vec3::new(target.x, agent_pos.y, target.z)
    };

    agent_pos.distance(target) <= close_enough
}
