//! Per-frame integration for the ball and moving blocks
//!
//! Everything here is frame-rate dependent: speeds change by `accel * dt` and
//! positions by `speed * dt` once per rendered frame.

use super::state::{Ball, Block, BlockKind};
use crate::tuning::Tuning;

/// Horizontal steering requested this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Steer {
    #[default]
    None,
    Left,
    Right,
}

impl Steer {
    /// Left wins when both keys are held
    pub fn from_keys(left: bool, right: bool) -> Self {
        if left {
            Steer::Left
        } else if right {
            Steer::Right
        } else {
            Steer::None
        }
    }
}

/// Apply player steering to the ball's horizontal speed
///
/// Holding a direction accelerates toward `max_speed_x`; above that speed the
/// ball bleeds back by a third of a step instead. With no key held (and no
/// directional lock) the speed decays by a third of a step per frame and
/// snaps to zero once it is within half a step.
///
/// Returns true if steering cancelled a directional lock.
pub fn steer_ball(ball: &mut Ball, steer: Steer, tuning: &Tuning, dt: f32) -> bool {
    let step = tuning.accel_x * dt;
    let max = tuning.max_speed_x;

    match steer {
        Steer::Left => {
            if ball.speed_x >= -max {
                ball.speed_x -= step;
            } else {
                ball.speed_x += step / 3.0;
            }
        }
        Steer::Right => {
            if ball.speed_x <= max {
                ball.speed_x += step;
            } else {
                ball.speed_x -= step / 3.0;
            }
        }
        Steer::None => {
            if !ball.directional {
                if ball.speed_x > step / 2.0 {
                    ball.speed_x -= step / 3.0;
                } else if ball.speed_x < -step / 2.0 {
                    ball.speed_x += step / 3.0;
                } else {
                    ball.speed_x = 0.0;
                }
            }
        }
    }

    if steer != Steer::None && ball.directional {
        ball.directional = false;
        return true;
    }
    false
}

/// Advance the ball one frame
///
/// Free fall: gravity raises the vertical speed up to `max_speed_y`.
/// Directional lock: vertical speed is held at zero and only the locked
/// horizontal speed moves the ball.
pub fn integrate_ball(ball: &mut Ball, tuning: &Tuning, dt: f32) {
    if ball.directional {
        ball.speed_y = 0.0;
    } else {
        ball.speed_y = (ball.speed_y + tuning.accel_y * dt).min(tuning.max_speed_y);
    }
    ball.pos.x += ball.speed_x * dt;
    ball.pos.y += ball.speed_y * dt;
}

/// Slide every mover along its axis by `dir * speed * dt`
pub fn translate_movers(blocks: &mut [Block], speed: f32, dt: f32) {
    for block in blocks.iter_mut().filter(|b| !b.destroyed) {
        match block.kind {
            BlockKind::LeftRightMover => block.pos.x += block.dir * speed * dt,
            BlockKind::UpDownMover => block.pos.y += block.dir * speed * dt,
            _ => {}
        }
    }
}
