//! Per-frame simulation step
//!
//! One call per rendered frame with the wall-clock delta. There is no
//! fixed-timestep accumulator, so results depend on the frame rate.

use super::physics::{Steer, integrate_ball, steer_ball, translate_movers};
use super::resolve::{resolve_ball, resolve_movers};
use super::state::{Ball, GameEvent, GamePhase, GameState, LossCause};
use crate::audio::SoundCue;
use crate::consts::*;

/// Input commands for a single frame
///
/// `left`/`right` are held state; `reset` and `confirm` are edge-triggered,
/// true only on the frame the key went down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// A / Left arrow
    pub left: bool,
    /// D / Right arrow
    pub right: bool,
    /// R: restart the current level without counting a death
    pub reset: bool,
    /// Space: start from the menu, leave the win screen
    pub confirm: bool,
}

impl FrameInput {
    #[inline]
    pub fn steer(&self) -> Steer {
        Steer::from_keys(self.left, self.right)
    }
}

/// Advance the game by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &FrameInput, dt: f32) {
    match state.phase {
        GamePhase::Menu => {
            if input.confirm {
                state.start();
            }
        }
        GamePhase::Win => {
            if input.confirm {
                state.return_to_menu();
            }
        }
        GamePhase::Active => tick_active(state, input, dt),
    }
}

fn tick_active(state: &mut GameState, input: &FrameInput, dt: f32) {
    state.frame += 1;

    if input.reset {
        log::debug!("Manual reset of level {}", state.level_index + 1);
        state.reset_level();
        return;
    }

    let tuning = &state.tuning;
    let level = &mut state.level;

    if steer_ball(&mut level.ball, input.steer(), tuning, dt) {
        log::debug!("Directional lock cancelled by steering");
        state.events.push(GameEvent::Sound(SoundCue::DirectorCancel));
    }
    integrate_ball(&mut level.ball, tuning, dt);

    if resolve_ball(level, tuning, &mut state.events) {
        state.complete_level();
        return;
    }

    resolve_movers(&mut level.blocks, tuning);
    translate_movers(&mut level.blocks, tuning.mover_speed(), dt);

    state.particles.update(dt, &level.ball, PARTICLES_PER_FRAME);

    if let Some(cause) = loss_cause(&state.level.ball) {
        state.player_death(cause);
    }
}

/// Why the ball is lost this frame, if it is
pub fn loss_cause(ball: &Ball) -> Option<LossCause> {
    if ball.destroyed {
        Some(LossCause::Destroyed)
    } else if ball.pos.y >= SCREEN_HEIGHT
        || ball.pos.x <= 0.0
        || ball.pos.x >= SCREEN_WIDTH + ball.diameter()
    {
        Some(LossCause::OutOfBounds)
    } else {
        None
    }
}
