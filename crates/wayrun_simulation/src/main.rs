//! Headless симуляция WAYRUN
//!
//! Один агент обходит квадратный маршрут: repath через DirectPlanner с latency,
//! steering + поворот + kinematic motion. Без рендера, тики прогоняются вручную.

use bevy::prelude::*;
use wayrun_simulation::{
    create_headless_app, is_at, run_fixed_ticks, set_log_level, spawn_steering_agent,
    DirectPlanner, LogLevel, PlannerQueue, RouteFollower, SimulationPlugin, SteeringConfig,
    SteeringController, SteeringError, TargetRequest, WaypointRoutes,
};

const ROUTE: &str = "square";

fn main() -> Result<(), SteeringError> {
    let seed = 42;
    println!("Starting WAYRUN headless steering simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);

    // Запросы/приём путей идут на Debug: в демо оставляем только прибытия и ошибки
    set_log_level(LogLevel::Info);

    let mut routes = WaypointRoutes::default();
    routes.insert(
        ROUTE,
        vec![
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::ZERO,
        ],
    );
    app.insert_resource(routes)
        .insert_resource(PlannerQueue::new(DirectPlanner::default()).with_latency(2, 6));

    let agent = {
        let world = app.world_mut();
        let agent = {
            let mut commands = world.commands();
            let agent =
                spawn_steering_agent(&mut commands, Vec3::ZERO, SteeringConfig::default(), None)?;
            commands.entity(agent).insert(RouteFollower::new(ROUTE));
            agent
        };
        world.flush();
        agent
    };

    // 2400 тиков = 40 сек при 60Hz
    for tick in 0..2400 {
        run_fixed_ticks(&mut app, 1);

        if tick % 120 == 0 {
            let world = app.world();
            let (Some(transform), Some(controller), Some(target)) = (
                world.get::<Transform>(agent),
                world.get::<SteeringController>(agent),
                world.get::<TargetRequest>(agent),
            ) else {
                continue;
            };

            let arrived = target
                .destination
                .is_some_and(|destination| is_at(transform.translation, destination, 0.5, false));

            println!(
                "Tick {}: pos {:.2?}, waypoint {}, destination {:?}, at destination: {}",
                tick,
                transform.translation,
                controller.waypoint_index(),
                target.destination,
                arrived
            );
        }
    }

    println!("Simulation complete!");
    Ok(())
}
