//! Route systems: назначение целей из маршрута.

use bevy::prelude::*;

use super::{is_at, RouteFollower, WaypointRoutes};
use crate::components::TargetRequest;
use crate::steering::TargetReached;

/// Выдать следующую точку маршрута в TargetRequest
fn assign_next_destination(
    entity: Entity,
    follower: &mut RouteFollower,
    target: &mut TargetRequest,
    routes: &WaypointRoutes,
) {
    let Some(waypoints) = routes.get(&follower.route) else {
        crate::log_warning(&format!(
            "Entity {:?}: route '{}' not found, destination unchanged",
            entity, follower.route
        ));
        return;
    };

    let Some(destination) = follower.next_destination(waypoints) else {
        crate::log_warning(&format!("Entity {:?}: route '{}' is empty", entity, follower.route));
        return;
    };

    target.destination = Some(destination);
    target.route = Some(follower.route.clone());
}

/// Система: первая цель для новых RouteFollower
pub fn start_route_followers(
    mut followers: Query<(Entity, &mut RouteFollower, &mut TargetRequest), Added<RouteFollower>>,
    routes: Res<WaypointRoutes>,
) {
    for (entity, mut follower, mut target) in followers.iter_mut() {
        assign_next_destination(entity, &mut follower, &mut target, &routes);
    }
}

/// Система: следующая точка маршрута на каждое TargetReached
///
/// Прибытие к старой цели (путь пришёл после смены destination) маршрут не двигает.
pub fn advance_routes_on_arrival(
    mut arrivals: EventReader<TargetReached>,
    mut followers: Query<(&mut RouteFollower, &mut TargetRequest)>,
    routes: Res<WaypointRoutes>,
) {
    for arrival in arrivals.read() {
        let Ok((mut follower, mut target)) = followers.get_mut(arrival.entity) else {
            continue;
        };

        if let Some(destination) = target.destination {
            if !is_at(arrival.position, destination, follower.close_enough, follower.allow_3d) {
                crate::log(&format!(
                    "Entity {:?}: arrival at {:?} is not route destination {:?}, ignored",
                    arrival.entity, arrival.position, destination
                ));
                continue;
            }
        }

        assign_next_destination(arrival.entity, &mut follower, &mut target, &routes);

        crate::log(&format!(
            "Entity {:?}: route '{}' → next destination {:?}",
            arrival.entity, follower.route, target.destination
        ));
    }
}
