//! Dodge Arena headless demo
//!
//! Runs a seeded scene: the player follows a scripted key sequence around the
//! arena while balls and pushers bounce off the walls and the fixed
//! obstacles. Balls also bounce off every other mover, pushers only off each
//! other. Outcomes are logged; run with `RUST_LOG=debug` for detail.
//!
//! Usage: `dodge-arena [tuning.json]`

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use dodge_arena::Tuning;
use dodge_arena::consts::*;
use dodge_arena::sim::{
    Angle, Body, MoveKey, MoveKeys, Mover, Player, PlayerMove, Positioned, advance_movers,
    arena_walls, bounce_movers, collides, resolve_player_move, resolve_push,
};

const DEMO_SEED: u64 = 0x0D06_E5A7;
const DEMO_TICKS: u32 = 600;
const BALL_COUNT: usize = 8;
const PUSHER_COUNT: usize = 2;
/// Keep spawns this far from the player
const SPAWN_CLEARANCE: f64 = 80.0;
/// Ticks each scripted key combination is held
const SCRIPT_PHASE_TICKS: u32 = 50;
/// Slow motion runs for these ticks
const SLOW_MOTION_TICKS: std::ops::Range<u32> = 300..400;

/// Keys held during each phase of the scripted run
const SCRIPT: [&[MoveKey]; 8] = [
    &[MoveKey::Right],
    &[MoveKey::D, MoveKey::S],
    &[MoveKey::Down],
    &[MoveKey::Left, MoveKey::Down],
    &[MoveKey::A],
    &[MoveKey::W, MoveKey::A],
    &[MoveKey::Up],
    &[],
];

/// Demo world: movers hold the pushers first, then the balls
struct Scene {
    player: Player,
    blockers: Vec<Body>,
    movers: Vec<Mover>,
    pusher_count: usize,
}

impl Scene {
    fn new(tuning: &Tuning, rng: &mut Pcg32) -> Self {
        let player = tuning.player(DVec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0));

        let mut blockers: Vec<Body> =
            arena_walls(ARENA_WIDTH, ARENA_HEIGHT, tuning.corner_size).to_vec();
        blockers.push(Body::disc(DVec2::new(200.0, 150.0), FIXEDBALL_RADIUS));
        blockers.push(Body::square(DVec2::new(600.0, 450.0), FIXEDBLOCK_SIDE_LENGTH));
        blockers.push(Body::square(DVec2::new(560.0, 200.0), FIXEDBLOCK_SIDE_LENGTH));

        let mut movers = Vec::with_capacity(PUSHER_COUNT + BALL_COUNT);
        for _ in 0..PUSHER_COUNT {
            let pos = spawn_position(rng, tuning, player.pos);
            let body = Body::square(pos, PUSHER_SIDE_LENGTH);
            movers.push(Mover::pusher(body, Angle::random(rng), tuning.pusher_speed));
        }
        for _ in 0..BALL_COUNT {
            let pos = spawn_position(rng, tuning, player.pos);
            let radius = rng.random_range(GAMEBALL_MIN_RADIUS..GAMEBALL_MAX_RADIUS);
            let speed = rng.random_range(tuning.ball_speed.min..=tuning.ball_speed.max);
            let ball = Mover::new(Body::disc(pos, radius), Angle::random(rng), tuning.ball_speed)
                .with_speed(speed);
            movers.push(ball);
        }

        Self {
            player,
            blockers,
            movers,
            pusher_count: PUSHER_COUNT,
        }
    }

    fn pushers(&self) -> &[Mover] {
        &self.movers[..self.pusher_count]
    }

    fn balls(&self) -> &[Mover] {
        &self.movers[self.pusher_count..]
    }

    fn remove_mover(&mut self, index: usize) {
        self.movers.remove(index);
        if index < self.pusher_count {
            self.pusher_count -= 1;
        }
    }
}

/// Counters reported at the end of the run
#[derive(Debug, Default)]
struct Stats {
    blocked_ticks: u32,
    pushes: u32,
    squeezes: u32,
    ball_hits: u32,
    stuck_movers: u32,
}

/// Random spot clear of the chamfered corners and away from `avoid`
///
/// Relies on [`Tuning::validate`] leaving room between the margins.
fn spawn_position(rng: &mut Pcg32, tuning: &Tuning, avoid: DVec2) -> DVec2 {
    let margin = tuning.spawn_margin();
    loop {
        let pos = DVec2::new(
            rng.random_range(margin..ARENA_WIDTH - margin),
            rng.random_range(margin..ARENA_HEIGHT - margin),
        );
        if pos.distance(avoid) > SPAWN_CLEARANCE {
            return pos;
        }
    }
}

fn scripted_keys(keys: &mut MoveKeys, tick: u32) {
    if tick % SCRIPT_PHASE_TICKS != 0 {
        return;
    }
    let phase = (tick / SCRIPT_PHASE_TICKS) as usize % SCRIPT.len();
    keys.reset();
    for &key in SCRIPT[phase] {
        keys.set(key, true);
    }
    log::debug!("tick {}: heading {:?}", tick, keys.move_direction());
}

fn tick(scene: &mut Scene, keys: &MoveKeys, tuning: &Tuning, factor: f64, stats: &mut Stats) {
    // Player first, against everything that blocks it
    let solved =
        resolve_player_move(&scene.player, keys.direction(), &scene.blockers, scene.pushers());
    let step = PlayerMove {
        distance: solved.distance * factor,
        ..solved
    };
    scene.player.apply(&step);
    if step.blocked {
        stats.blocked_ticks += 1;
    }

    if let Some(mut push) = resolve_push(&scene.player, scene.pushers(), step.blocked) {
        push.speed *= factor;
        scene.player.apply_push(&push);
        stats.pushes += 1;
        if push.squeezed {
            log::info!("player squeezed by pusher {}, removing it", push.pusher);
            stats.squeezes += 1;
            scene.remove_mover(push.pusher);
        }
    }

    let player_body = scene.player.body();
    let hits = scene
        .balls()
        .iter()
        .filter(|ball| collides(&ball.body(), &player_body))
        .count();
    if hits > 0 {
        log::debug!("player touching {} balls", hits);
        stats.ball_hits += hits as u32;
    }

    advance_movers(&mut scene.movers, factor);
    let stuck = bounce_movers(&mut scene.movers, &scene.blockers, tuning.collision_speed_change);
    for &index in stuck.iter().rev() {
        log::info!("mover {} stuck, removing it", index);
        scene.remove_mover(index);
        stats.stuck_movers += 1;
    }
}

fn load_tuning() -> Tuning {
    match std::env::args().nth(1) {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    }
}

fn main() {
    env_logger::init();
    log::info!("Dodge Arena (headless) starting...");

    let tuning = load_tuning();
    let mut rng = Pcg32::seed_from_u64(DEMO_SEED);
    let mut scene = Scene::new(&tuning, &mut rng);
    let mut keys = MoveKeys::new();
    let mut stats = Stats::default();

    log::info!(
        "{} blockers, {} pushers, {} balls",
        scene.blockers.len(),
        scene.pushers().len(),
        scene.balls().len()
    );

    for t in 0..DEMO_TICKS {
        scripted_keys(&mut keys, t);
        let factor = if SLOW_MOTION_TICKS.contains(&t) {
            tuning.slow_motion_factor
        } else {
            1.0
        };
        tick(&mut scene, &keys, &tuning, factor, &mut stats);
    }

    log::info!(
        "Finished {} ticks: player at ({:.1}, {:.1}), {} movers left",
        DEMO_TICKS,
        scene.player.pos.x,
        scene.player.pos.y,
        scene.movers.len()
    );
    log::info!("{:?}", stats);
}
