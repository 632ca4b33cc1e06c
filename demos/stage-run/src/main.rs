// Headless run of a full level script: playground init, a tween-driven
// drag across stage one, the fixed-step stage transition, and a short
// second-stage drag. Prints mesh stats after each phase.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec3;
use sinkhole::{
    Easing, FixedTimestep, GameClock, GroundGenerator, SeaConfig, SeaMesh, StagePhase,
    StageTransition, Tween, TweenScheduler,
};

const FRAME_DT: f32 = 1.0 / 60.0;
const FIXED_DT: f32 = 1.0 / 50.0;

fn main() {
    env_logger::init();

    let clock = GameClock::new();
    let mut scheduler = TweenScheduler::new();
    let mut ground = GroundGenerator::default();
    let mut sea = SeaMesh::new(SeaConfig::default(), 42);

    let mut hole = ground.init_playground();
    print_stats("init", &ground);

    // Stage one: drag the hole along a tween-driven path for two seconds.
    let target = Rc::new(Cell::new(hole));
    let target_in = target.clone();
    let arrived = Rc::new(Cell::new(false));
    let arrived_in = arrived.clone();
    scheduler
        .spawn(
            Tween::vec3(hole, Vec3::new(4.2, 0.0, 7.8), 2.0, move |p| {
                target_in.set(p)
            })
            .easing(Easing::QuadInOut)
            .on_complete(move || arrived_in.set(true)),
        )
        .expect("scheduler has room");

    while !arrived.get() {
        scheduler.tick(clock.frame(FRAME_DT));
        hole = target.get();
        ground.update_ground(hole, StagePhase::First);
        sea.tick(FRAME_DT);
    }
    print_stats("stage one drag", &ground);

    // Cross to stage two under the fixed-step transition driver.
    let mut timestep = FixedTimestep::new(FIXED_DT);
    let mut transition = StageTransition::new();
    while !transition.is_complete() {
        for _ in 0..timestep.accumulate(FRAME_DT) {
            if transition.step(&mut hole, &mut ground, FIXED_DT) {
                break;
            }
        }
        sea.tick(FRAME_DT);
    }
    print_stats("transition", &ground);
    log::info!("hole now at {hole}");

    // Stage two: a short scripted drag, plus a delayed "level done" call.
    let done = Rc::new(Cell::new(false));
    let done_in = done.clone();
    scheduler
        .delayed_call(1.0, move || done_in.set(true))
        .expect("scheduler has room");

    let target_in = target.clone();
    scheduler
        .spawn(Tween::vec3(
            hole,
            hole + Vec3::new(-1.5, 0.0, 2.0),
            1.0,
            move |p| target_in.set(p),
        ))
        .expect("scheduler has room");

    while !done.get() {
        scheduler.tick(clock.frame(FRAME_DT));
        hole = target.get();
        ground.update_ground(hole, StagePhase::Second);
        sea.tick(FRAME_DT);
    }
    print_stats("stage two", &ground);

    println!(
        "sea: {} vertices, {} triangles",
        sea.mesh().vertex_count(),
        sea.mesh().triangle_count()
    );
    println!("done, hole at {hole}");
}

fn print_stats(label: &str, ground: &GroundGenerator) {
    let first = ground.first_ground();
    let second = ground.second_ground();
    let path = ground.connecting_path();
    println!(
        "[{label}] first {}v/{}t, second {}v/{}t, path {}v/{}t, wall suppressed: {}",
        first.vertex_count(),
        first.triangle_count(),
        second.vertex_count(),
        second.triangle_count(),
        path.vertex_count(),
        path.triangle_count(),
        ground.stop_vertical_mesh_gen()
    );
}
