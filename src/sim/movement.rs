//! Player movement constraint solver
//!
//! Each tick the player asks to move along a heading at full speed. Blocking
//! obstacles may bend that heading (when the player already touches them) or
//! shorten the step (when the step would run into them). Both queries are
//! free functions over explicit `(player, obstacle)` values, so any obstacle
//! kind works as long as it exposes a [`Body`].

use std::f64::consts::{FRAC_PI_2, PI};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::angle::Angle;
use super::collision::{Cardinal, collides, collision_angle};
use super::geometry::{angle_to_point, x_distance, y_distance};
use super::response::Mover;
use super::shape::{Body, Positioned, Shape};
use crate::consts::{MIN_MOVE_DISTANCE, PLAYER_RADIUS, PLAYER_SPEED};

/// The player-controlled disc
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: DVec2,
    pub radius: f64,
    /// Distance covered per tick at full speed
    pub speed: f64,
}

impl Player {
    pub fn new(pos: DVec2) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
        }
    }

    /// Apply a solved move
    pub fn apply(&mut self, step: &PlayerMove) {
        self.pos = step.target(self.pos);
    }

    /// Apply a push from a moving block
    pub fn apply_push(&mut self, push: &Push) {
        self.pos = crate::step_from(self.pos, push.direction, push.speed);
    }
}

impl Positioned for Player {
    fn position(&self) -> DVec2 {
        self.pos
    }

    fn shape(&self) -> Shape {
        Shape::disc(self.radius)
    }
}

/// Outcome of one tick of player movement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerMove {
    /// Heading actually allowed, `None` when the player must stand still
    pub direction: Option<Angle>,
    /// Distance to travel along `direction`
    pub distance: f64,
    /// Whether a static obstacle adjusted the move
    pub blocked: bool,
}

impl PlayerMove {
    fn still(blocked: bool) -> Self {
        Self {
            direction: None,
            distance: 0.0,
            blocked,
        }
    }

    /// Where a body at `pos` ends up after this move
    pub fn target(&self, pos: DVec2) -> DVec2 {
        match self.direction {
            Some(direction) => crate::step_from(pos, direction, self.distance),
            None => pos,
        }
    }
}

/// Heading the player may take while touching `obstacle`
///
/// Moving away from the contact is always allowed. Moving into it slides
/// along the nearer tangent. Pushing straight into the flat face of a square
/// or into a segment stops the player.
pub fn allowed_direction(player: &Player, obstacle: &Body, direction: Option<Angle>) -> Option<Angle> {
    let direction = direction?;
    let collision = collision_angle(&player.body(), obstacle);

    match obstacle.shape {
        Shape::Disc { .. } => Some(slide_or_keep(collision, direction)),
        Shape::AxisSquare { .. } => match face_of(collision) {
            Some(face) => face_slide(face, direction),
            None => Some(slide_or_keep(collision, direction)),
        },
        Shape::Segment { .. } => {
            if direction == collision {
                None
            } else {
                Some(slide_or_keep(collision, direction))
            }
        }
    }
}

/// How far the player may travel along `direction` before touching `obstacle`
///
/// Never more than the player's speed, and 0 when the player already
/// overlaps the obstacle in the direction of travel.
pub fn allowed_distance(player: &Player, obstacle: &Body, direction: Option<Angle>) -> f64 {
    let Some(direction) = direction else {
        return 0.0;
    };
    let possible = match obstacle.shape {
        Shape::Disc { radius } => distance_to_disc(player, obstacle.pos, radius, direction),
        Shape::AxisSquare { side_length } => {
            distance_to_square(player, obstacle.pos, side_length, direction)
        }
        Shape::Segment { length, angle } => {
            distance_to_segment(player, obstacle, length, angle, direction)
        }
    };
    possible.clamp(0.0, player.speed)
}

/// Solve one tick of player movement against every blocking obstacle
///
/// Obstacles are scanned in slice order, static `obstacles` before
/// `pushers`. The first one touching the player bends the heading, the first
/// one hit by the full-speed step shortens the step (or bends the heading if
/// the player could barely move). That obstacle is then resolved for the rest
/// of the tick and the scan starts over with the heading found so far. A
/// heading of `None` stays `None`.
///
/// Pushers constrain the move like any other obstacle but never mark it
/// `blocked`; [`resolve_push`] deals with them afterwards.
pub fn resolve_player_move(
    player: &Player,
    desired: Option<Angle>,
    obstacles: &[Body],
    pushers: &[Mover],
) -> PlayerMove {
    let body = player.body();
    let static_count = obstacles.len();
    let obstacles: Vec<Body> = obstacles
        .iter()
        .copied()
        .chain(pushers.iter().map(Positioned::body))
        .collect();
    let mut direction = desired;
    let mut distance = player.speed;
    let mut blocked = false;
    let mut pending: Vec<usize> = (0..obstacles.len()).collect();
    let max_passes = 2 * obstacles.len() + 1;
    let mut passes = 0;

    while let Some(heading) = direction {
        passes += 1;
        if passes > max_passes {
            log::warn!(
                "player move not settled after {} passes, {} obstacles left",
                max_passes,
                pending.len()
            );
            break;
        }

        let ahead = body.at(crate::step_from(body.pos, heading, player.speed));
        let Some(slot) = pending.iter().position(|&index| {
            collides(&body, &obstacles[index]) || collides(&ahead, &obstacles[index])
        }) else {
            break;
        };
        let index = pending.remove(slot);
        let obstacle = &obstacles[index];
        if index < static_count {
            blocked = true;
        }

        if collides(&body, obstacle) {
            direction = allowed_direction(player, obstacle, direction);
            log::trace!("obstacle {} touching, heading {:?}", index, direction);
        } else {
            let allowed = allowed_distance(player, obstacle, direction);
            if allowed <= MIN_MOVE_DISTANCE {
                direction = allowed_direction(player, obstacle, direction);
                distance = player.speed;
            } else {
                distance = distance.min(allowed);
            }
            log::trace!(
                "obstacle {} ahead, heading {:?}, distance {:.3}",
                index,
                direction,
                distance
            );
        }
    }

    match direction {
        Some(_) => PlayerMove {
            direction,
            distance,
            blocked,
        },
        None => PlayerMove::still(blocked),
    }
}

/// A shove from a moving block touching the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Push {
    pub direction: Angle,
    pub speed: f64,
    /// Index of the pusher, in the slice given to [`resolve_push`]
    pub pusher: usize,
    /// The player is caught between a pusher and something else
    pub squeezed: bool,
}

/// Direction a pusher shoves the player: straight away from the contact
pub fn push_direction(pusher: &Mover, player: &Player) -> Angle {
    collision_angle(&pusher.body(), &player.body())
}

/// Share of the pusher's speed transferred along the push direction
pub fn push_speed(pusher: &Mover, player: &Player) -> f64 {
    let between = Angle::smaller_angle_between(push_direction(pusher, player), pusher.direction);
    (between.radians().cos() * pusher.speed).max(0.0)
}

/// Work out the push on the player after it has moved
///
/// `blocked` is whether the player's own move was adjusted by a static
/// obstacle this tick. The last touching pusher wins; the player counts as squeezed
/// when two pushers touch it, or one does while it is blocked.
pub fn resolve_push(player: &Player, pushers: &[Mover], blocked: bool) -> Option<Push> {
    let body = player.body();
    let touching: Vec<usize> = pushers
        .iter()
        .enumerate()
        .filter(|(_, pusher)| collides(&pusher.body(), &body))
        .map(|(index, _)| index)
        .collect();

    let &pusher = touching.last()?;
    let squeezed = touching.len() > 1 || blocked;
    if squeezed {
        log::debug!("player squeezed by pusher {} ({} touching)", pusher, touching.len());
    }

    Some(Push {
        direction: push_direction(&pushers[pusher], player),
        speed: push_speed(&pushers[pusher], player),
        pusher,
        squeezed,
    })
}

/// Keep headings that leave the contact; bend the rest onto the nearer tangent
fn slide_or_keep(collision: Angle, direction: Angle) -> Angle {
    if Angle::smaller_angle_between(collision, direction) >= Angle::DEG_90 {
        return direction;
    }
    let clockwise = collision - Angle::DEG_90;
    let counter_clockwise = collision + Angle::DEG_90;
    if Angle::smaller_angle_between(clockwise, direction)
        < Angle::smaller_angle_between(counter_clockwise, direction)
    {
        clockwise
    } else {
        counter_clockwise
    }
}

/// The square face hit, if the contact is flat rather than a corner
fn face_of(collision: Angle) -> Option<Cardinal> {
    [Cardinal::Right, Cardinal::Down, Cardinal::Left, Cardinal::Up]
        .into_iter()
        .find(|face| face.angle() == collision)
}

/// Heading allowed against a flat square face
fn face_slide(face: Cardinal, direction: Angle) -> Option<Angle> {
    // (diagonal into the face, heading that slides along it)
    let slides = match face {
        Cardinal::Right => [(Angle::DEG_315, Angle::DEG_270), (Angle::DEG_45, Angle::DEG_90)],
        Cardinal::Down => [(Angle::DEG_135, Angle::DEG_180), (Angle::DEG_45, Angle::DEG_0)],
        Cardinal::Left => [(Angle::DEG_225, Angle::DEG_270), (Angle::DEG_135, Angle::DEG_90)],
        Cardinal::Up => [(Angle::DEG_225, Angle::DEG_180), (Angle::DEG_315, Angle::DEG_0)],
    };

    if direction == face.angle() {
        return None;
    }
    let slid = slides
        .iter()
        .find(|(diagonal, _)| *diagonal == direction)
        .map(|&(_, along)| along);
    Some(slid.unwrap_or_else(|| slide_or_keep(face.angle(), direction)))
}

/// Travel until the player disc touches a disc obstacle
///
/// Triangle player center P, obstacle center O, contact center Q with
/// `|OQ| = a` (sum of radii), `|PO| = b` and angle `A` at P. The law of sines
/// has two solutions; the obtuse angle at Q is the first contact.
fn distance_to_disc(player: &Player, center: DVec2, radius: f64, direction: Angle) -> f64 {
    let a = radius + player.radius;
    let b = player.pos.distance(center);
    let angle_a = Angle::smaller_angle_between(angle_to_point(player.pos, center), direction).radians();

    if angle_a >= FRAC_PI_2 {
        return player.speed;
    }
    if b <= a {
        return 0.0;
    }
    if angle_a == 0.0 {
        return b - a;
    }

    let ratio = b * angle_a.sin() / a;
    if ratio > 1.0 {
        // Heading passes the obstacle
        return player.speed;
    }
    let angle_b = PI - ratio.asin();
    let angle_c = PI - angle_a - angle_b;
    a * angle_c.sin() / angle_a.sin()
}

/// Travel until the player disc touches the square face it is facing
fn distance_to_square(player: &Player, center: DVec2, side_length: f64, direction: Angle) -> f64 {
    let min_distance = player.radius + side_length / 2.0;
    let dx = x_distance(center, player.pos);
    let dy = y_distance(center, player.pos);

    let face = Cardinal::of(angle_to_point(player.pos, center));
    let gap = match face {
        Cardinal::Down | Cardinal::Up => dy - min_distance,
        Cardinal::Left | Cardinal::Right => dx - min_distance,
    };

    let between = Angle::smaller_angle_between(face.angle(), direction);
    if between >= Angle::DEG_90 {
        return player.speed;
    }
    if dx < min_distance && dy < min_distance {
        return 0.0;
    }
    gap / between.radians().cos()
}

/// Travel until the player disc touches a segment
fn distance_to_segment(
    player: &Player,
    segment: &Body,
    length: f64,
    angle: Angle,
    direction: Angle,
) -> f64 {
    let from_start = angle_to_point(segment.pos, player.pos);
    let offset = Angle::smaller_angle_between(from_start, angle).radians();
    let distance = segment.pos.distance(player.pos);

    if offset > FRAC_PI_2 || distance > length / offset.cos() {
        // Beside the segment: the nearer endpoint is what can be hit
        let nearest = distance.min(segment.segment_end().distance(player.pos));
        return nearest - player.radius;
    }

    let gap = offset.sin() * distance - player.radius;
    if gap < 0.0 {
        return 0.0;
    }
    let collision = collision_angle(&player.body(), segment);
    let between = Angle::smaller_angle_between(collision, direction);
    if between >= Angle::DEG_90 {
        return player.speed;
    }
    gap / between.radians().cos()
}
