//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use super::level::{Level, LevelLayout};
use super::particles::ParticleTrail;
use crate::audio::SoundCue;
use crate::error::LevelLoadError;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start key
    #[default]
    Menu,
    /// A level is being played
    Active,
    /// Final level cleared, showing the death count
    Win,
}

/// The player's ball
///
/// `pos` is the top-left corner of the ball's bounding square; the center is
/// `pos + radius` on both axes. Horizontal and vertical speed are separate
/// scalars because they follow different rules, and only the integrator and
/// the collision resolver change them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub radius: f32,
    pub(crate) speed_x: f32,
    pub(crate) speed_y: f32,
    /// Marked by traps, crushing movers and embedded contacts; the frame's
    /// loss check turns it into a death
    pub destroyed: bool,
    /// Locked into horizontal motion by a director block
    pub directional: bool,
}

impl Ball {
    /// A resting ball with its top-left corner at `pos`
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            radius,
            speed_x: 0.0,
            speed_y: 0.0,
            destroyed: false,
            directional: false,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.radius
    }

    /// Bounding square edge length
    #[inline]
    pub fn diameter(&self) -> f32 {
        self.radius * 2.0
    }

    /// Current speed as (horizontal, vertical)
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.speed_x, self.speed_y)
    }
}

/// Block behavior types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    Normal,
    /// Destroyed by the first hit from any side
    Breakable,
    /// Destroys the ball on contact
    Trap,
    /// Stronger bounce
    Bounce,
    /// Oscillates horizontally; crushes the ball from the sides
    LeftRightMover,
    /// Oscillates vertically; crushes the ball from above or below
    UpDownMover,
    /// Clears the level on contact
    Goal,
    /// Landing on it launches the ball rightward in a directional lock
    RightDirector,
    /// Landing on it launches the ball leftward in a directional lock
    LeftDirector,
}

impl BlockKind {
    #[inline]
    pub fn is_mover(&self) -> bool {
        matches!(self, BlockKind::LeftRightMover | BlockKind::UpDownMover)
    }

    /// Contact ends the ball's interaction immediately (no bounce, no
    /// de-penetration)
    #[inline]
    pub fn is_absorbing(&self) -> bool {
        matches!(self, BlockKind::Goal | BlockKind::Trap)
    }
}

/// A rectangular obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: BlockKind,
    /// Destroyed blocks are skipped by every collision test and not drawn
    pub destroyed: bool,
    /// Oscillation sign for movers (+1 or -1)
    pub dir: f32,
    /// Set once a mover has reversed during the current mover pass
    #[serde(skip)]
    pub resolved: bool,
}

impl Block {
    pub fn new(kind: BlockKind, pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            kind,
            destroyed: false,
            dir: 1.0,
            resolved: false,
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Why the ball was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    /// Trap, crushing mover, or embedded contact
    Destroyed,
    /// Fell below the playfield or left it sideways
    OutOfBounds,
}

/// Observable things that happened during a tick, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A sound cue to play
    Sound(SoundCue),
    /// Menu → first level
    Started,
    /// The ball was lost; `deaths` is the new total
    BallLost { cause: LossCause, deaths: u32 },
    /// The current level was rebuilt from its layout
    LevelReset { level: usize },
    /// A goal was reached on `level`
    LevelComplete { level: usize },
    /// The final goal was reached
    GameWon { deaths: u32 },
    /// Win screen → menu
    ReturnedToMenu,
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Index into `layouts`; always within `[0, max_level())`
    pub level_index: usize,
    pub deaths: u32,
    /// Active frames simulated so far
    pub frame: u64,
    pub tuning: Tuning,
    /// Parsed level grids; a level reset rebuilds from these
    pub layouts: Vec<LevelLayout>,
    /// The level being played
    pub level: Level,
    /// Visual trail (not gameplay-affecting)
    #[serde(skip)]
    pub particles: ParticleTrail,
    /// Events produced since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a game on the menu screen with the first level loaded
    pub fn new(layouts: Vec<LevelLayout>, tuning: Tuning, seed: u64) -> Result<Self, LevelLoadError> {
        let first = layouts.first().ok_or(LevelLoadError::NoLevels)?;
        let level = Level::from_layout(first, tuning.ball_radius);
        Ok(Self {
            phase: GamePhase::Menu,
            level_index: 0,
            deaths: 0,
            frame: 0,
            tuning,
            level,
            layouts,
            particles: ParticleTrail::new(seed, ParticleTrail::DEFAULT_CAPACITY),
            events: Vec::new(),
        })
    }

    /// Number of levels in this game
    #[inline]
    pub fn max_level(&self) -> usize {
        self.layouts.len()
    }

    /// Take every event produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Rebuild the current level from its layout: blocks restored, ball back at
    /// spawn with zero speed, flags cleared, particles removed
    pub fn reset_level(&mut self) {
        self.level = Level::from_layout(&self.layouts[self.level_index], self.tuning.ball_radius);
        self.particles.clear();
        self.events.push(GameEvent::LevelReset {
            level: self.level_index,
        });
    }

    /// Menu → Active on level 1 with counters cleared
    pub fn start(&mut self) {
        self.level_index = 0;
        self.deaths = 0;
        self.reset_level();
        self.phase = GamePhase::Active;
        self.events.push(GameEvent::Started);
        log::info!("Game started ({} levels)", self.max_level());
    }

    /// Win → Menu with level and death count reset
    pub fn return_to_menu(&mut self) {
        self.level_index = 0;
        self.deaths = 0;
        self.reset_level();
        self.phase = GamePhase::Menu;
        self.events.push(GameEvent::ReturnedToMenu);
    }

    /// Count a death and restart the current level
    pub fn player_death(&mut self, cause: LossCause) {
        self.deaths += 1;
        self.events.push(GameEvent::BallLost {
            cause,
            deaths: self.deaths,
        });
        log::debug!(
            "Ball lost on level {} ({:?}), deaths: {}",
            self.level_index + 1,
            cause,
            self.deaths
        );
        self.reset_level();
    }

    /// Move past the current level. Clearing the last level enters `Win`
    /// rather than wrapping around.
    pub fn complete_level(&mut self) {
        let cleared = self.level_index;
        self.events.push(GameEvent::LevelComplete { level: cleared });
        log::info!("Level {} complete", cleared + 1);

        if cleared + 1 >= self.max_level() {
            self.level_index = 0;
            self.reset_level();
            self.phase = GamePhase::Win;
            self.events.push(GameEvent::GameWon {
                deaths: self.deaths,
            });
            log::info!("All levels cleared with {} deaths", self.deaths);
        } else {
            self.level_index = cleared + 1;
            self.reset_level();
        }
    }

    /// Cap the particle trail (0 disables it)
    pub fn set_particle_limit(&mut self, limit: usize) {
        self.particles.set_capacity(limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::BlockSpec;

    fn layout(goal_x: f32) -> LevelLayout {
        LevelLayout {
            blocks: vec![BlockSpec {
                kind: BlockKind::Goal,
                pos: Vec2::new(goal_x, 400.0),
                size: Vec2::splat(40.0),
            }],
            spawn: Vec2::new(107.0, 57.0),
        }
    }

    fn game(levels: usize) -> GameState {
        let layouts = (0..levels).map(|i| layout(100.0 + i as f32 * 40.0)).collect();
        GameState::new(layouts, Tuning::default(), 7).unwrap()
    }

    #[test]
    fn test_new_requires_levels() {
        let err = GameState::new(Vec::new(), Tuning::default(), 1).unwrap_err();
        assert!(matches!(err, LevelLoadError::NoLevels));
    }

    #[test]
    fn test_ball_center_adds_radius() {
        let ball = Ball::new(Vec2::new(100.0, 50.0), 7.0);
        assert_eq!(ball.center(), Vec2::new(107.0, 57.0));
        assert_eq!(ball.diameter(), 14.0);
    }

    #[test]
    fn test_start_resets_counters() {
        let mut state = game(2);
        state.deaths = 4;
        state.level_index = 1;
        state.start();
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.level_index, 0);
        assert_eq!(state.deaths, 0);
        assert!(state.drain_events().contains(&GameEvent::Started));
    }

    #[test]
    fn test_complete_level_advances_once() {
        let mut state = game(3);
        state.start();
        state.level.ball.speed_y = 250.0;
        state.complete_level();
        assert_eq!(state.level_index, 1);
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.level.ball.velocity(), Vec2::ZERO);
        assert_eq!(state.level.ball.pos, Vec2::new(100.0, 50.0));
        assert_eq!(state.level.blocks[0].pos.x, 140.0);
    }

    #[test]
    fn test_last_level_enters_win_with_valid_index() {
        let mut state = game(2);
        state.start();
        state.deaths = 3;
        state.complete_level();
        state.complete_level();
        assert_eq!(state.phase, GamePhase::Win);
        assert!(state.level_index < state.max_level());
        assert!(state.drain_events().contains(&GameEvent::GameWon { deaths: 3 }));

        state.return_to_menu();
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.deaths, 0);
    }

    #[test]
    fn test_player_death_counts_and_resets() {
        let mut state = game(1);
        state.start();
        state.level.ball.destroyed = true;
        state.level.ball.directional = true;
        state.level.ball.pos = Vec2::new(300.0, 300.0);
        state.player_death(LossCause::Destroyed);
        assert_eq!(state.deaths, 1);
        assert!(!state.level.ball.destroyed);
        assert!(!state.level.ball.directional);
        assert_eq!(state.level.ball.pos, Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = game(1);
        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.level, state.level);
        assert!(restored.events.is_empty());
    }
}
