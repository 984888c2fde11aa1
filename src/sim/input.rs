//! Eight-way keyboard movement input
//!
//! The host feeds raw key presses and releases; the simulation only sees the
//! resulting heading.

use serde::{Deserialize, Serialize};

use super::angle::Angle;

/// The eight headings the player can steer in (screen coordinates, y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveDirection {
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
    Up,
    UpRight,
}

impl MoveDirection {
    pub fn angle(self) -> Angle {
        match self {
            MoveDirection::Right => Angle::DEG_0,
            MoveDirection::DownRight => Angle::DEG_45,
            MoveDirection::Down => Angle::DEG_90,
            MoveDirection::DownLeft => Angle::DEG_135,
            MoveDirection::Left => Angle::DEG_180,
            MoveDirection::UpLeft => Angle::DEG_225,
            MoveDirection::Up => Angle::DEG_270,
            MoveDirection::UpRight => Angle::DEG_315,
        }
    }
}

/// Movement keys: the arrow cluster and the WASD cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKey {
    Left,
    Up,
    Right,
    Down,
    A,
    W,
    D,
    S,
}

impl MoveKey {
    fn slot(self) -> usize {
        self as usize
    }

    /// The two keys (one per cluster) pointing the other way
    fn opposites(self) -> [MoveKey; 2] {
        match self {
            MoveKey::Left | MoveKey::A => [MoveKey::Right, MoveKey::D],
            MoveKey::Right | MoveKey::D => [MoveKey::Left, MoveKey::A],
            MoveKey::Up | MoveKey::W => [MoveKey::Down, MoveKey::S],
            MoveKey::Down | MoveKey::S => [MoveKey::Up, MoveKey::W],
        }
    }
}

/// Currently held movement keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveKeys {
    held: [bool; 8],
}

impl MoveKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press or release
    ///
    /// A press is ignored while the opposite key of either cluster is held.
    pub fn set(&mut self, key: MoveKey, pressed: bool) {
        let blocked = key.opposites().iter().any(|&other| self.is_held(other));
        self.held[key.slot()] = pressed && !blocked;
    }

    pub fn is_held(&self, key: MoveKey) -> bool {
        self.held[key.slot()]
    }

    /// Release everything (focus loss, game restart)
    pub fn reset(&mut self) {
        self.held = [false; 8];
    }

    pub fn move_direction(&self) -> Option<MoveDirection> {
        let left = self.is_held(MoveKey::Left) || self.is_held(MoveKey::A);
        let up = self.is_held(MoveKey::Up) || self.is_held(MoveKey::W);
        let right = self.is_held(MoveKey::Right) || self.is_held(MoveKey::D);
        let down = self.is_held(MoveKey::Down) || self.is_held(MoveKey::S);

        let direction = match (left, up, right, down) {
            (true, true, _, _) => MoveDirection::UpLeft,
            (_, true, true, _) => MoveDirection::UpRight,
            (_, _, true, true) => MoveDirection::DownRight,
            (true, _, _, true) => MoveDirection::DownLeft,
            (true, _, _, _) => MoveDirection::Left,
            (_, true, _, _) => MoveDirection::Up,
            (_, _, true, _) => MoveDirection::Right,
            (_, _, _, true) => MoveDirection::Down,
            _ => return None,
        };
        Some(direction)
    }

    /// Heading requested by the held keys, `None` when idle
    pub fn direction(&self) -> Option<Angle> {
        self.move_direction().map(MoveDirection::angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle() {
        let keys = MoveKeys::new();
        assert_eq!(keys.direction(), None);
    }

    #[test]
    fn test_single_axes() {
        let mut keys = MoveKeys::new();
        keys.set(MoveKey::Right, true);
        assert_eq!(keys.direction(), Some(Angle::DEG_0));
        keys.set(MoveKey::Right, false);
        keys.set(MoveKey::S, true);
        assert_eq!(keys.direction(), Some(Angle::DEG_90));
        keys.set(MoveKey::S, false);
        keys.set(MoveKey::A, true);
        assert_eq!(keys.direction(), Some(Angle::DEG_180));
        keys.set(MoveKey::A, false);
        keys.set(MoveKey::Up, true);
        assert_eq!(keys.direction(), Some(Angle::DEG_270));
    }

    #[test]
    fn test_diagonals_mix_clusters() {
        let mut keys = MoveKeys::new();
        keys.set(MoveKey::W, true);
        keys.set(MoveKey::Right, true);
        assert_eq!(keys.move_direction(), Some(MoveDirection::UpRight));
        assert_eq!(keys.direction(), Some(Angle::DEG_315));

        keys.reset();
        keys.set(MoveKey::Down, true);
        keys.set(MoveKey::A, true);
        assert_eq!(keys.move_direction(), Some(MoveDirection::DownLeft));
    }

    #[test]
    fn test_opposite_press_is_ignored() {
        let mut keys = MoveKeys::new();
        keys.set(MoveKey::Left, true);
        keys.set(MoveKey::D, true);
        assert!(!keys.is_held(MoveKey::D));
        assert_eq!(keys.direction(), Some(Angle::DEG_180));

        // Once the first key is released the other side works again
        keys.set(MoveKey::Left, false);
        keys.set(MoveKey::D, true);
        assert_eq!(keys.direction(), Some(Angle::DEG_0));
    }

    #[test]
    fn test_reset_releases_everything() {
        let mut keys = MoveKeys::new();
        keys.set(MoveKey::Up, true);
        keys.set(MoveKey::Left, true);
        keys.reset();
        assert_eq!(keys, MoveKeys::default());
        assert_eq!(keys.direction(), None);
    }

    #[test]
    fn test_direction_angles_are_evenly_spaced() {
        let all = [
            MoveDirection::Right,
            MoveDirection::DownRight,
            MoveDirection::Down,
            MoveDirection::DownLeft,
            MoveDirection::Left,
            MoveDirection::UpLeft,
            MoveDirection::Up,
            MoveDirection::UpRight,
        ];
        for (i, direction) in all.iter().enumerate() {
            assert!((direction.angle().degrees() - 45.0 * i as f64).abs() < 1e-9);
        }
    }
}
