//! Game state and core entity types
//!
//! All state that must survive a snapshot lives here. Every mutation that
//! samples randomness takes `&mut impl Rng`, so a seeded run replays
//! identically.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{self, Positioned, distance};
use crate::consts::*;
use crate::polar_to_cartesian;

/// Where a run stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active play: steps land, hazards threaten
    Playing,
    /// Goal row reached; collisions and steps are frozen until restart
    Won,
}

/// A one-cell step command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// Board-space displacement of one step
    pub fn delta(self) -> Vec2 {
        match self {
            Direction::Left => Vec2::new(-SPRITE_WIDTH, 0.0),
            Direction::Up => Vec2::new(0.0, -TILE_HEIGHT),
            Direction::Right => Vec2::new(SPRITE_WIDTH, 0.0),
            Direction::Down => Vec2::new(0.0, TILE_HEIGHT),
        }
    }
}

/// Sprite catalog key for hazards
pub const HAZARD_SPRITE: &str = "images/enemy-bug.png";
/// Sprite catalog key for win-show stars
pub const STAR_SPRITE: &str = "images/Star.png";
/// Player looks; one is picked per spawn
pub const PLAYER_SPRITES: [&str; 5] = [
    "images/char-boy.png",
    "images/char-cat-girl.png",
    "images/char-horn-girl.png",
    "images/char-pink-girl.png",
    "images/char-princess-girl.png",
];

/// A bug crossing its lane, left to right
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub pos: Vec2,
    /// Units per second along +x
    pub speed: f32,
}

impl Hazard {
    /// Spawn on a lane with a randomized starting x, so some bugs begin
    /// mid-board and already in motion
    pub fn new(lane: u32, rng: &mut impl Rng) -> Self {
        let x = rng.random_range(0.0..(BOARD_WIDTH + SPRITE_WIDTH)) - SPRITE_WIDTH / 2.0;
        Self {
            pos: Vec2::new(x, geometry::lane_y(lane)),
            speed: rng.random_range(HAZARD_MIN_SPEED..HAZARD_MAX_SPEED),
        }
    }

    /// Integrate one tick of motion; leaving the right edge recycles the bug
    /// to the left with a fresh speed. The lane y never changes.
    pub fn advance(&mut self, dt: f32, rng: &mut impl Rng) {
        self.pos.x += self.speed * dt;
        if self.pos.x > HAZARD_EXIT_X {
            self.recycle(HAZARD_ENTRY_X, rng);
        }
    }

    /// Re-enter at the given x and re-sample the speed
    pub fn recycle(&mut self, x: f32, rng: &mut impl Rng) {
        self.pos.x = x;
        self.speed = rng.random_range(HAZARD_MIN_SPEED..HAZARD_MAX_SPEED);
    }

    pub fn sprite(&self) -> &'static str {
        HAZARD_SPRITE
    }
}

impl Positioned for Hazard {
    fn center(&self) -> Vec2 {
        self.pos
    }
}

/// The player's token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Index into PLAYER_SPRITES, re-rolled on every reset
    pub variant: u8,
    /// Set once the goal row is reached; cleared only by a full restart
    pub win: bool,
}

impl Player {
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut player = Self {
            pos: Vec2::ZERO,
            variant: 0,
            win: false,
        };
        player.reset(rng);
        player
    }

    /// Apply a one-cell step, then re-clamp and re-check the goal row
    pub fn step(&mut self, dir: Direction) {
        self.pos += dir.delta();
        self.clamp_and_check_win();
    }

    /// Keep the token inside the playable rectangle; landing exactly on the
    /// topmost playable y wins. Idempotent.
    pub fn clamp_and_check_win(&mut self) {
        let bounds = geometry::playable_bounds();
        self.pos = bounds.clamp(self.pos);
        if self.pos.y == bounds.min.y {
            self.win = true;
        }
    }

    /// True if any hazard center is within the collision radius, boundary
    /// inclusive. Short-circuits on the first hit.
    pub fn has_collided(&self, hazards: &[Hazard]) -> bool {
        hazards
            .iter()
            .any(|hazard| distance(self, hazard) <= COLLISION_RADIUS)
    }

    /// Send the token back to the start cell with a fresh look. The win
    /// flag is untouched; its lifecycle belongs to the restart path.
    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.pos = geometry::spawn_position();
        self.variant = rng.random_range(0..PLAYER_SPRITES.len() as u8);
    }

    pub fn sprite(&self) -> &'static str {
        PLAYER_SPRITES[self.variant as usize % PLAYER_SPRITES.len()]
    }
}

impl Positioned for Player {
    fn center(&self) -> Vec2 {
        self.pos
    }
}

/// One win-show star spiraling in around the winner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    /// Orbit angle in radians, growing at π rad/s
    pub theta: f32,
    /// Radial decay clock, growing at 2/s
    pub t: f32,
}

impl Star {
    /// Parked off-board until the first post-win advance
    pub fn new(theta: f32) -> Self {
        Self {
            pos: Vec2::new(-SPRITE_WIDTH, -SPRITE_HEIGHT),
            theta,
            t: 0.0,
        }
    }

    /// Spiral one tick further in toward the orbit floor around `center`.
    /// The radius decays from the full-board envelope and never drops under
    /// STAR_MIN_RADIUS.
    pub fn advance(&mut self, dt: f32, center: Vec2) {
        self.t += 2.0 * dt;
        self.theta += std::f32::consts::PI * dt;
        let radius = STAR_MIN_RADIUS + (STAR_MAX_RADIUS - STAR_MIN_RADIUS) * (-self.t).exp();
        self.pos = center + polar_to_cartesian(radius, self.theta);
    }

    pub fn sprite(&self) -> &'static str {
        STAR_SPRITE
    }
}

impl Positioned for Star {
    fn center(&self) -> Vec2 {
        self.pos
    }
}

/// Everything one run owns (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the run was built from
    pub seed: u64,
    /// Live RNG; serialized with the state so a snapshot resumes the
    /// exact stream
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Ticks advanced since creation or restart
    pub time_ticks: u64,
    /// The player's token
    pub player: Player,
    /// One hazard per road lane, top lane first
    pub hazards: Vec<Hazard>,
    /// Win-show decorations, initial angles a quarter turn apart
    pub stars: Vec<Star>,
}

impl GameState {
    /// Build a fresh run from a seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let player = Player::new(&mut rng);
        let hazards = spawn_hazards(&mut rng);
        Self {
            seed,
            rng,
            phase: GamePhase::Playing,
            time_ticks: 0,
            player,
            hazards,
            stars: spawn_stars(),
        }
    }

    /// Rebuild the run in place. Draws from the live RNG rather than
    /// reseeding, so a seeded run stays one reproducible stream across
    /// restarts.
    pub fn restart(&mut self) {
        self.player = Player::new(&mut self.rng);
        self.hazards = spawn_hazards(&mut self.rng);
        self.stars = spawn_stars();
        self.phase = GamePhase::Playing;
        self.time_ticks = 0;
    }
}

fn spawn_hazards(rng: &mut impl Rng) -> Vec<Hazard> {
    (1..=HAZARD_LANES).map(|lane| Hazard::new(lane, rng)).collect()
}

fn spawn_stars() -> Vec<Star> {
    (1..=STAR_COUNT)
        .map(|k| Star::new(k as f32 * std::f32::consts::FRAC_PI_2))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fixed_rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_step_moves_one_cell() {
        let mut rng = fixed_rng();
        let mut player = Player::new(&mut rng);
        let start = player.pos;

        player.step(Direction::Up);
        assert_eq!(player.pos, Vec2::new(start.x, start.y - TILE_HEIGHT));

        player.step(Direction::Left);
        assert_eq!(player.pos.x, start.x - SPRITE_WIDTH);

        player.step(Direction::Right);
        player.step(Direction::Down);
        assert_eq!(player.pos, start);
    }

    #[test]
    fn test_five_up_steps_win() {
        let mut rng = fixed_rng();
        let mut player = Player::new(&mut rng);

        for _ in 0..4 {
            player.step(Direction::Up);
            assert!(!player.win);
        }
        player.step(Direction::Up);
        assert_eq!(player.pos.y, PLAYER_GOAL_Y);
        assert!(player.win);
    }

    #[test]
    fn test_overshoot_clamps_to_goal_row() {
        let mut rng = fixed_rng();
        let mut player = Player::new(&mut rng);

        // Two extra Up steps past the goal stay pinned on the goal row
        for _ in 0..7 {
            player.step(Direction::Up);
        }
        assert_eq!(player.pos.y, PLAYER_GOAL_Y);
        assert!(player.win);
    }

    #[test]
    fn test_side_walls_clamp() {
        let mut rng = fixed_rng();
        let mut player = Player::new(&mut rng);

        for _ in 0..4 {
            player.step(Direction::Left);
        }
        assert_eq!(player.pos.x, PLAYER_MIN_X);

        for _ in 0..8 {
            player.step(Direction::Right);
        }
        assert_eq!(player.pos.x, PLAYER_MAX_X);
        // Walls alone never grant the win
        assert!(!player.win);
    }

    #[test]
    fn test_down_from_start_row_is_a_no_op() {
        let mut rng = fixed_rng();
        let mut player = Player::new(&mut rng);
        player.step(Direction::Down);
        assert_eq!(player.pos, geometry::spawn_position());
    }

    #[test]
    fn test_collision_boundary_is_inclusive() {
        let mut rng = fixed_rng();
        let player = Player::new(&mut rng);

        // Exactly on the radius: 60^2 is a perfect square, so the distance
        // computes exactly
        let touching = Hazard {
            pos: Vec2::new(player.pos.x - COLLISION_RADIUS, player.pos.y),
            speed: 100.0,
        };
        assert!(player.has_collided(&[touching]));

        let near_miss = Hazard {
            pos: Vec2::new(player.pos.x - 60.5, player.pos.y),
            speed: 100.0,
        };
        assert!(!player.has_collided(&[near_miss]));
    }

    #[test]
    fn test_collision_at_zero_distance() {
        let mut rng = fixed_rng();
        let player = Player::new(&mut rng);
        let overlapping = Hazard {
            pos: player.pos,
            speed: 40.0,
        };
        assert!(player.has_collided(&[overlapping]));
        assert!(!player.has_collided(&[]));
    }

    #[test]
    fn test_reset_recenters_and_keeps_win() {
        let mut rng = fixed_rng();
        let mut player = Player::new(&mut rng);

        player.step(Direction::Up);
        player.step(Direction::Left);
        player.reset(&mut rng);
        assert_eq!(player.pos, geometry::spawn_position());

        // Idempotent on position
        player.reset(&mut rng);
        assert_eq!(player.pos, geometry::spawn_position());

        player.win = true;
        player.reset(&mut rng);
        assert!(player.win);
    }

    #[test]
    fn test_sprite_catalog_lookup() {
        let mut rng = fixed_rng();
        let player = Player::new(&mut rng);
        assert!(PLAYER_SPRITES.contains(&player.sprite()));

        let hazard = Hazard::new(1, &mut rng);
        assert_eq!(hazard.sprite(), HAZARD_SPRITE);
        assert_eq!(Star::new(0.0).sprite(), STAR_SPRITE);
    }

    #[test]
    fn test_hazard_advance_integrates_speed() {
        let mut rng = fixed_rng();
        let mut hazard = Hazard::new(1, &mut rng);
        hazard.pos.x = 400.0;
        hazard.speed = 100.0;

        hazard.advance(1.0, &mut rng);
        assert_eq!(hazard.pos.x, 500.0);
        // Still left of the exit line: same speed, no recycle
        assert_eq!(hazard.speed, 100.0);
    }

    #[test]
    fn test_hazard_recycles_past_exit() {
        let mut rng = fixed_rng();
        let mut hazard = Hazard::new(2, &mut rng);
        let lane = hazard.pos.y;
        hazard.pos.x = 540.0;
        hazard.speed = 100.0;

        hazard.advance(1.0, &mut rng);
        assert_eq!(hazard.pos.x, HAZARD_ENTRY_X);
        assert!(hazard.speed >= HAZARD_MIN_SPEED && hazard.speed < HAZARD_MAX_SPEED);
        assert_eq!(hazard.pos.y, lane);
    }

    #[test]
    fn test_hazard_spawn_ranges() {
        let mut rng = fixed_rng();
        for _ in 0..100 {
            let hazard = Hazard::new(3, &mut rng);
            assert!(hazard.pos.x >= HAZARD_ENTRY_X);
            assert!(hazard.pos.x < HAZARD_EXIT_X);
            assert!(hazard.speed >= HAZARD_MIN_SPEED);
            assert!(hazard.speed < HAZARD_MAX_SPEED);
            assert_eq!(hazard.pos.y, geometry::lane_y(3));
        }
    }

    #[test]
    fn test_star_parks_offboard() {
        let star = Star::new(std::f32::consts::FRAC_PI_2);
        assert_eq!(star.pos, Vec2::new(-SPRITE_WIDTH, -SPRITE_HEIGHT));
        assert_eq!(star.t, 0.0);
    }

    #[test]
    fn test_star_radius_decays_toward_floor() {
        let center = Vec2::new(252.5, 44.0);
        let mut star = Star::new(0.0);

        star.advance(SIM_DT, center);
        let early = star.pos.distance(center);
        assert!(early <= STAR_MAX_RADIUS + 1e-3);

        for _ in 0..60 {
            star.advance(SIM_DT, center);
        }
        let later = star.pos.distance(center);
        assert!(later < early);

        // After ~10 units on the decay clock the orbit sits on the floor
        for _ in 0..300 {
            star.advance(SIM_DT, center);
        }
        let floor = star.pos.distance(center);
        assert!((floor - STAR_MIN_RADIUS).abs() < 0.1);
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.player.pos, geometry::spawn_position());
        assert_eq!(state.hazards.len(), HAZARD_LANES as usize);
        assert_eq!(state.stars.len(), STAR_COUNT);
        for (i, hazard) in state.hazards.iter().enumerate() {
            assert_eq!(hazard.pos.y, geometry::lane_y(i as u32 + 1));
        }
    }

    #[test]
    fn test_restart_rebuilds_run_in_place() {
        let mut state = GameState::new(12345);
        state.player.step(Direction::Up);
        state.player.win = true;
        state.phase = GamePhase::Won;
        state.time_ticks = 99;

        state.restart();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.player.pos, geometry::spawn_position());
        assert!(!state.player.win);
        assert_eq!(state.stars[0].pos, Vec2::new(-SPRITE_WIDTH, -SPRITE_HEIGHT));
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let state = GameState::new(4242);
        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.seed, state.seed);
        assert_eq!(restored.phase, state.phase);
        assert_eq!(restored.player.pos, state.player.pos);
        assert_eq!(restored.player.variant, state.player.variant);
        for (a, b) in restored.hazards.iter().zip(&state.hazards) {
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.speed, b.speed);
        }
        // The RNG stream itself round-trips
        assert_eq!(restored.rng, state.rng);
    }

    proptest! {
        #[test]
        fn hazard_never_ends_past_exit(x in -50.5f32..555.5, speed in 40.0f32..160.0, dt in 0.0f32..0.25) {
            let mut rng = fixed_rng();
            let mut hazard = Hazard::new(1, &mut rng);
            hazard.pos.x = x;
            hazard.speed = speed;
            hazard.advance(dt, &mut rng);
            prop_assert!(hazard.pos.x <= HAZARD_EXIT_X);
            prop_assert!(hazard.speed >= HAZARD_MIN_SPEED && hazard.speed < HAZARD_MAX_SPEED);
        }

        #[test]
        fn clamp_and_check_win_is_idempotent(x in -600.0f32..1100.0, y in -600.0f32..1100.0) {
            let mut rng = fixed_rng();
            let mut player = Player::new(&mut rng);
            player.pos = Vec2::new(x, y);
            player.clamp_and_check_win();
            let once = player.pos;
            let won_once = player.win;
            player.clamp_and_check_win();
            prop_assert_eq!(player.pos, once);
            prop_assert_eq!(player.win, won_once);
            prop_assert!(geometry::playable_bounds().contains(once));
        }
    }
}
