//! Collision response: what every block type does to the ball, and how
//! movers bounce off the rest of the level
//!
//! The block-type × side table is the pure function [`react`]; the resolver
//! applies its result (de-penetration, speeds, flags, director snap) to the
//! live level.

use glam::Vec2;

use super::collision::{CollisionResult, box_box_collision, circle_box_collision};
use super::geometry::Side;
use super::level::Level;
use super::state::{Ball, Block, BlockKind, GameEvent};
use crate::audio::SoundCue;
use crate::tuning::Tuning;

/// Horizontal direction of a director lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Right,
    Left,
}

/// Outcome of one ball-vs-block contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reaction {
    /// Ball speed after the contact (horizontal, vertical)
    pub velocity: Vec2,
    pub block_destroyed: bool,
    pub ball_destroyed: bool,
    /// Engage a directional lock in this direction
    pub lock: Option<Heading>,
    /// The level is cleared
    pub goal: bool,
    pub cue: SoundCue,
}

impl Reaction {
    fn with_velocity(velocity: Vec2, cue: SoundCue) -> Self {
        Self {
            velocity,
            block_destroyed: false,
            ball_destroyed: false,
            lock: None,
            goal: false,
            cue,
        }
    }

    fn crushed(velocity: Vec2) -> Self {
        Self {
            ball_destroyed: true,
            ..Self::with_velocity(velocity, SoundCue::Trap)
        }
    }

    fn shatter(velocity: Vec2) -> Self {
        Self {
            block_destroyed: true,
            ..Self::with_velocity(velocity, SoundCue::Breakable)
        }
    }
}

/// Bounce off a left face: reverse, but always leave at least `floor` leftward
#[inline]
fn bounce_off_left(speed_x: f32, floor: f32) -> f32 {
    if speed_x > floor { -speed_x } else { -floor }
}

/// Bounce off a right face: reverse, but always leave at least `floor` rightward
#[inline]
fn bounce_off_right(speed_x: f32, floor: f32) -> f32 {
    if speed_x < -floor { -speed_x } else { floor }
}

/// The reaction table: block type × struck face → new ball speed and effects
pub fn react(kind: BlockKind, side: Side, velocity: Vec2, tuning: &Tuning) -> Reaction {
    use BlockKind::*;

    let Vec2 { x: vx, y: vy } = velocity;
    let floor = tuning.side_bounce_floor;

    match (kind, side) {
        (Goal, _) => Reaction {
            goal: true,
            ..Reaction::with_velocity(velocity, SoundCue::Goal)
        },
        (Trap, _) | (_, Side::Embedded) => Reaction::crushed(velocity),

        // Landing on top
        (Normal | LeftRightMover, Side::Up) => {
            Reaction::with_velocity(Vec2::new(vx, -tuning.bounce_speed), SoundCue::Normal)
        }
        (Breakable, Side::Up) => Reaction::shatter(Vec2::new(vx, -tuning.bounce_speed)),
        (Bounce, Side::Up) => {
            Reaction::with_velocity(Vec2::new(vx, -tuning.bounce_block_speed), SoundCue::Bounce)
        }
        (UpDownMover, Side::Up | Side::Down) => Reaction::crushed(velocity),
        (RightDirector, Side::Up) => Reaction {
            lock: Some(Heading::Right),
            ..Reaction::with_velocity(Vec2::new(tuning.directed_speed, vy), SoundCue::Director)
        },
        (LeftDirector, Side::Up) => Reaction {
            lock: Some(Heading::Left),
            ..Reaction::with_velocity(Vec2::new(-tuning.directed_speed, vy), SoundCue::Director)
        },

        // Hitting the underside
        (Normal | LeftRightMover | RightDirector | LeftDirector, Side::Down) => {
            Reaction::with_velocity(Vec2::new(vx, -vy), SoundCue::Normal)
        }
        (Breakable, Side::Down) => Reaction::shatter(Vec2::new(vx, -vy)),
        (Bounce, Side::Down) => Reaction::with_velocity(
            Vec2::new(vx, -vy * tuning.bounce_amplify),
            SoundCue::Bounce,
        ),

        // Sides
        (LeftRightMover, Side::Left | Side::Right) => Reaction::crushed(velocity),
        (Breakable, Side::Left | Side::Right) => Reaction::shatter(Vec2::new(-vx, vy)),
        (Bounce, Side::Left) => {
            Reaction::with_velocity(Vec2::new(-tuning.bounce_block_speed, vy), SoundCue::Bounce)
        }
        (Bounce, Side::Right) => {
            Reaction::with_velocity(Vec2::new(tuning.bounce_block_speed, vy), SoundCue::Bounce)
        }
        (Normal | UpDownMover | RightDirector | LeftDirector, Side::Left) => {
            Reaction::with_velocity(Vec2::new(bounce_off_left(vx, floor), vy), SoundCue::Normal)
        }
        (Normal | UpDownMover | RightDirector | LeftDirector, Side::Right) => {
            Reaction::with_velocity(Vec2::new(bounce_off_right(vx, floor), vy), SoundCue::Normal)
        }
    }
}

/// Push the ball out of the block along the struck face's axis
fn depenetrate(ball: &mut Ball, hit: &CollisionResult) {
    let r = ball.radius;
    match hit.side {
        Side::Up => ball.pos.y -= r - hit.difference.y.abs(),
        Side::Down => ball.pos.y += r - hit.difference.y.abs(),
        Side::Left => ball.pos.x -= r - hit.difference.x.abs(),
        Side::Right => ball.pos.x += r - hit.difference.x.abs(),
        Side::Embedded => {}
    }
}

/// Place a freshly locked ball beside the director it landed on, vertically
/// centered on it
fn snap_beside(ball: &mut Ball, block: &Block, heading: Heading, gap: f32) {
    let y = block.pos.y + block.size.y / 2.0 - ball.radius;
    let x = match heading {
        Heading::Right => block.pos.x + block.size.x + gap,
        Heading::Left => block.pos.x - ball.diameter() - gap,
    };
    ball.pos = Vec2::new(x, y);
}

/// Test the ball against every intact block and apply the reactions
///
/// Any contact clears a directional lock before the reaction runs. Sound cues
/// are pushed to `events`. Returns true as soon as a goal is touched; the
/// remaining blocks are not tested.
pub fn resolve_ball(level: &mut Level, tuning: &Tuning, events: &mut Vec<GameEvent>) -> bool {
    let Level { blocks, ball } = level;

    for block in blocks.iter_mut().filter(|b| !b.destroyed) {
        let hit = circle_box_collision(ball.center(), ball.radius, &block.aabb());
        if !hit.hit {
            continue;
        }

        ball.directional = false;
        if !block.kind.is_absorbing() {
            depenetrate(ball, &hit);
        }

        let reaction = react(block.kind, hit.side, ball.velocity(), tuning);
        ball.speed_x = reaction.velocity.x;
        ball.speed_y = reaction.velocity.y;
        if reaction.block_destroyed {
            block.destroyed = true;
        }
        if reaction.ball_destroyed {
            ball.destroyed = true;
            log::debug!("Ball destroyed by {:?} ({:?})", block.kind, hit.side);
        }
        if let Some(heading) = reaction.lock {
            ball.directional = true;
            snap_beside(ball, block, heading, tuning.director_gap);
            log::debug!("Directional lock {:?}", heading);
        }
        events.push(GameEvent::Sound(reaction.cue));

        if reaction.goal {
            return true;
        }
    }
    false
}

/// Bounce movers off every other intact block
///
/// A mover overlapping another block reverses `dir` and is pushed out along
/// the struck axis. Blocks at exactly the mover's position are skipped. Each
/// mover reverses at most once per pass, even when it overlaps several
/// neighbors, but is pushed out of all of them.
pub fn resolve_movers(blocks: &mut [Block], tuning: &Tuning) {
    for block in blocks.iter_mut() {
        block.resolved = false;
    }

    let margin = tuning.mover_push_margin;
    for i in 0..blocks.len() {
        if !blocks[i].kind.is_mover() || blocks[i].destroyed {
            continue;
        }
        for j in 0..blocks.len() {
            if i == j || blocks[j].destroyed {
                continue;
            }
            let other = blocks[j].aabb();
            let mover = &mut blocks[i];
            if other.min == mover.pos {
                continue;
            }

            let hit = box_box_collision(&mover.aabb(), &other);
            if !hit.hit {
                continue;
            }

            if !mover.resolved {
                mover.dir = -mover.dir;
                mover.resolved = true;
            }
            let half = mover.size / 2.0;
            match hit.side {
                Side::Up => mover.pos.y -= half.y - hit.difference.y.abs() + margin,
                Side::Down => mover.pos.y += half.y - hit.difference.y.abs() + margin,
                Side::Left => mover.pos.x -= half.x - hit.difference.x.abs() + margin,
                Side::Right => mover.pos.x += half.x - hit.difference.x.abs() + margin,
                Side::Embedded => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TILE: Vec2 = Vec2::new(40.0, 40.0);

    fn tuning() -> Tuning {
        Tuning::default()
    }

    fn level_with(kind: BlockKind, block_pos: Vec2, ball_pos: Vec2) -> Level {
        Level {
            blocks: vec![Block::new(kind, block_pos, TILE)],
            ball: Ball::new(ball_pos, 7.0),
        }
    }

    #[test]
    fn test_normal_from_below_inverts_exactly() {
        let r = react(BlockKind::Normal, Side::Down, Vec2::new(12.0, -287.5), &tuning());
        assert_eq!(r.velocity, Vec2::new(12.0, 287.5));
        assert!(!r.ball_destroyed && !r.block_destroyed);
        assert_eq!(r.cue, SoundCue::Normal);
    }

    #[test]
    fn test_landing_reactions() {
        let t = tuning();
        let v = Vec2::new(30.0, 250.0);
        assert_eq!(react(BlockKind::Normal, Side::Up, v, &t).velocity.y, -330.0);
        assert_eq!(react(BlockKind::LeftRightMover, Side::Up, v, &t).velocity.y, -330.0);
        let breakable = react(BlockKind::Breakable, Side::Up, v, &t);
        assert_eq!(breakable.velocity.y, -330.0);
        assert!(breakable.block_destroyed);
        assert_eq!(breakable.cue, SoundCue::Breakable);
        assert_eq!(react(BlockKind::Bounce, Side::Up, v, &t).velocity.y, -533.0);
        assert!(react(BlockKind::UpDownMover, Side::Up, v, &t).ball_destroyed);
    }

    #[test]
    fn test_bounce_from_below_amplifies() {
        let r = react(BlockKind::Bounce, Side::Down, Vec2::new(0.0, -100.0), &tuning());
        assert!((r.velocity.y - 161.8).abs() < 1e-3);
        assert!(react(BlockKind::UpDownMover, Side::Down, Vec2::ZERO, &tuning()).ball_destroyed);
    }

    #[test]
    fn test_side_bounce_has_floor() {
        let t = tuning();
        // Slow approach from the left still bounces away visibly
        let slow = react(BlockKind::Normal, Side::Left, Vec2::new(20.0, 0.0), &t);
        assert_eq!(slow.velocity.x, -100.0);
        let fast = react(BlockKind::Normal, Side::Left, Vec2::new(180.0, 0.0), &t);
        assert_eq!(fast.velocity.x, -180.0);
        let slow = react(BlockKind::RightDirector, Side::Right, Vec2::new(-5.0, 0.0), &t);
        assert_eq!(slow.velocity.x, 100.0);
        let fast = react(BlockKind::UpDownMover, Side::Right, Vec2::new(-150.0, 0.0), &t);
        assert_eq!(fast.velocity.x, 150.0);
    }

    #[test]
    fn test_side_special_blocks() {
        let t = tuning();
        let v = Vec2::new(60.0, 10.0);
        let shattered = react(BlockKind::Breakable, Side::Left, v, &t);
        assert!(shattered.block_destroyed);
        assert_eq!(shattered.velocity, Vec2::new(-60.0, 10.0));
        assert_eq!(react(BlockKind::Bounce, Side::Left, v, &t).velocity.x, -533.0);
        assert_eq!(react(BlockKind::Bounce, Side::Right, v, &t).velocity.x, 533.0);
        assert!(react(BlockKind::LeftRightMover, Side::Right, v, &t).ball_destroyed);
    }

    #[test]
    fn test_absorbing_and_embedded() {
        let t = tuning();
        let goal = react(BlockKind::Goal, Side::Left, Vec2::ONE, &t);
        assert!(goal.goal && !goal.ball_destroyed);
        assert_eq!(goal.cue, SoundCue::Goal);
        for side in [Side::Up, Side::Right, Side::Down, Side::Left, Side::Embedded] {
            assert!(react(BlockKind::Trap, side, Vec2::ONE, &t).ball_destroyed);
        }
        let embedded = react(BlockKind::Bounce, Side::Embedded, Vec2::ONE, &t);
        assert!(embedded.ball_destroyed);
        assert_eq!(embedded.cue, SoundCue::Trap);
    }

    #[test]
    fn test_director_lock() {
        let t = tuning();
        let right = react(BlockKind::RightDirector, Side::Up, Vec2::new(-50.0, 200.0), &t);
        assert_eq!(right.lock, Some(Heading::Right));
        assert_eq!(right.velocity.x, 400.0);
        let left = react(BlockKind::LeftDirector, Side::Up, Vec2::new(50.0, 200.0), &t);
        assert_eq!(left.lock, Some(Heading::Left));
        assert_eq!(left.velocity.x, -400.0);
        assert_eq!(left.cue, SoundCue::Director);
    }

    #[test]
    fn test_resolve_landing_depenetrates() {
        // Ball center at (120, 96): 4 px above the block top, 3 px inside the radius
        let mut level = level_with(BlockKind::Normal, Vec2::new(100.0, 100.0), Vec2::new(113.0, 89.0));
        level.ball.speed_y = 300.0;
        let mut events = Vec::new();
        assert!(!resolve_ball(&mut level, &tuning(), &mut events));
        assert!((level.ball.pos.y - 86.0).abs() < 1e-4);
        assert_eq!(level.ball.speed_y, -330.0);
        assert_eq!(events, vec![GameEvent::Sound(SoundCue::Normal)]);
    }

    #[test]
    fn test_breakable_is_skipped_once_destroyed() {
        let mut level = level_with(BlockKind::Breakable, Vec2::new(100.0, 100.0), Vec2::new(113.0, 89.0));
        level.ball.speed_y = 300.0;
        let mut events = Vec::new();
        resolve_ball(&mut level, &tuning(), &mut events);
        assert!(level.blocks[0].destroyed);

        // Push the ball back into where the block was; nothing happens now
        level.ball.pos = Vec2::new(113.0, 95.0);
        level.ball.speed_y = 300.0;
        events.clear();
        resolve_ball(&mut level, &tuning(), &mut events);
        assert_eq!(level.ball.speed_y, 300.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_director_snaps_and_locks() {
        let mut level = level_with(BlockKind::RightDirector, Vec2::new(100.0, 100.0), Vec2::new(113.0, 89.0));
        level.ball.speed_y = 300.0;
        let mut events = Vec::new();
        resolve_ball(&mut level, &tuning(), &mut events);
        let ball = &level.ball;
        assert!(ball.directional);
        assert_eq!(ball.speed_x, 400.0);
        assert!((ball.pos.x - 140.01).abs() < 1e-4);
        assert!((ball.pos.y - 113.0).abs() < 1e-4);

        let mut level = level_with(BlockKind::LeftDirector, Vec2::new(100.0, 100.0), Vec2::new(113.0, 89.0));
        resolve_ball(&mut level, &tuning(), &mut events);
        assert!((level.ball.pos.x - (100.0 - 14.0 - 0.01)).abs() < 1e-4);
    }

    #[test]
    fn test_contact_clears_lock() {
        let mut level = level_with(BlockKind::Normal, Vec2::new(100.0, 100.0), Vec2::new(88.0, 113.0));
        level.ball.directional = true;
        level.ball.speed_x = 400.0;
        resolve_ball(&mut level, &tuning(), &mut Vec::new());
        assert!(!level.ball.directional);
        assert_eq!(level.ball.speed_x, -400.0);
    }

    #[test]
    fn test_goal_stops_pass() {
        let mut level = level_with(BlockKind::Goal, Vec2::new(100.0, 100.0), Vec2::new(113.0, 89.0));
        level.blocks.push(Block::new(BlockKind::Trap, Vec2::new(100.0, 100.0), TILE));
        let mut events = Vec::new();
        assert!(resolve_ball(&mut level, &tuning(), &mut events));
        assert!(!level.ball.destroyed);
        assert_eq!(events, vec![GameEvent::Sound(SoundCue::Goal)]);
    }

    #[test]
    fn test_trap_destroys_without_correction() {
        let mut level = level_with(BlockKind::Trap, Vec2::new(100.0, 100.0), Vec2::new(113.0, 89.0));
        resolve_ball(&mut level, &tuning(), &mut Vec::new());
        assert!(level.ball.destroyed);
        assert_eq!(level.ball.pos, Vec2::new(113.0, 89.0));
    }

    #[test]
    fn test_mover_reverses_once_per_pass() {
        // Mover squeezed between two walls, overlapping both
        let mut blocks = vec![
            Block::new(BlockKind::LeftRightMover, Vec2::new(100.5, 100.1), Vec2::new(39.8, 39.8)),
            Block::new(BlockKind::Normal, Vec2::new(140.0, 100.0), TILE),
            Block::new(BlockKind::Normal, Vec2::new(61.0, 100.0), TILE),
        ];
        resolve_movers(&mut blocks, &tuning());
        assert_eq!(blocks[0].dir, -1.0);
        assert!(blocks[0].resolved);
    }

    #[test]
    fn test_mover_pushed_out_of_wall() {
        let mut blocks = vec![
            Block::new(BlockKind::LeftRightMover, Vec2::new(100.5, 100.1), Vec2::new(39.8, 39.8)),
            Block::new(BlockKind::Normal, Vec2::new(140.0, 100.0), TILE),
        ];
        resolve_movers(&mut blocks, &tuning());
        assert_eq!(blocks[0].dir, -1.0);
        assert!(!blocks[0].aabb().overlaps(&blocks[1].aabb()));
        // Next pass starts clean and finds nothing to do
        resolve_movers(&mut blocks, &tuning());
        assert_eq!(blocks[0].dir, -1.0);
        assert!(!blocks[0].resolved);
    }

    #[test]
    fn test_mover_ignores_destroyed_and_same_position() {
        let mut blocks = vec![
            Block::new(BlockKind::UpDownMover, Vec2::new(100.0, 100.0), TILE),
            Block::new(BlockKind::Normal, Vec2::new(100.0, 100.0), TILE),
            Block::new(BlockKind::Breakable, Vec2::new(100.0, 130.0), TILE),
        ];
        blocks[2].destroyed = true;
        resolve_movers(&mut blocks, &tuning());
        assert_eq!(blocks[0].dir, 1.0);
        assert_eq!(blocks[0].pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_static_blocks_never_reverse() {
        let mut blocks = vec![
            Block::new(BlockKind::Normal, Vec2::new(100.0, 100.0), TILE),
            Block::new(BlockKind::Normal, Vec2::new(120.0, 100.0), TILE),
        ];
        resolve_movers(&mut blocks, &tuning());
        assert_eq!(blocks[0].dir, 1.0);
        assert_eq!(blocks[1].dir, 1.0);
    }

    proptest! {
        #[test]
        fn prop_bounce_from_above_is_constant(vx in -600.0f32..600.0, vy in -600.0f32..600.0) {
            let t = tuning();
            let once = react(BlockKind::Bounce, Side::Up, Vec2::new(vx, vy), &t);
            let twice = react(BlockKind::Bounce, Side::Up, once.velocity, &t);
            prop_assert_eq!(once.velocity.y, -t.bounce_block_speed);
            prop_assert_eq!(twice.velocity, once.velocity);
        }

        #[test]
        fn prop_breakable_always_shatters(vx in -600.0f32..600.0, vy in -600.0f32..600.0, s in 0usize..4) {
            let side = [Side::Up, Side::Right, Side::Down, Side::Left][s];
            let r = react(BlockKind::Breakable, side, Vec2::new(vx, vy), &tuning());
            prop_assert!(r.block_destroyed);
            prop_assert!(!r.ball_destroyed);
        }
    }
}
