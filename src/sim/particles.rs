//! Ball trail particles
//!
//! Purely visual: nothing here feeds back into gameplay. Randomness comes from
//! a seeded PCG stream so a given seed always produces the same trail.

use glam::{Vec2, Vec4};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::Ball;

/// Random scatter around the ball, per axis
const SPAWN_JITTER: f32 = 5.0;
/// Trail particles inherit this fraction of the ball's speed
const VELOCITY_SCALE: f32 = 0.1;
/// Alpha lost per second
const FADE_RATE: f32 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// RGBA tint
    pub color: Vec4,
    /// Seconds left; dead at or below zero
    pub life: f32,
}

/// Bounded trail of particles behind the ball
#[derive(Debug, Clone)]
pub struct ParticleTrail {
    particles: Vec<Particle>,
    capacity: usize,
    rng: Pcg32,
}

impl Default for ParticleTrail {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_CAPACITY)
    }
}

impl ParticleTrail {
    pub const DEFAULT_CAPACITY: usize = 500;

    pub fn new(seed: u64, capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity.min(Self::DEFAULT_CAPACITY)),
            capacity,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Age existing particles, then emit `count` new ones at the ball
    pub fn update(&mut self, dt: f32, ball: &Ball, count: usize) {
        for p in self.particles.iter_mut() {
            p.life -= dt;
            p.pos -= p.vel * dt;
            p.color.w -= FADE_RATE * dt;
        }
        self.particles.retain(|p| p.life > 0.0);

        if self.capacity == 0 {
            return;
        }
        for _ in 0..count {
            let jitter = Vec2::new(
                self.rng.random_range(-SPAWN_JITTER..=SPAWN_JITTER),
                self.rng.random_range(-SPAWN_JITTER..=SPAWN_JITTER),
            );
            let shade = self.rng.random_range(0.5..1.5);
            self.particles.push(Particle {
                pos: ball.pos + jitter + Vec2::splat(ball.radius / 2.65),
                vel: ball.velocity() * VELOCITY_SCALE,
                color: Vec4::new(shade, shade, shade, 1.0),
                life: 1.0,
            });
        }

        // Oldest particles go first
        if self.particles.len() > self.capacity {
            let excess = self.particles.len() - self.capacity;
            self.particles.drain(..excess);
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Change the cap, dropping the oldest particles if needed
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        if self.particles.len() > capacity {
            let excess = self.particles.len() - capacity;
            self.particles.drain(..excess);
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moving_ball() -> Ball {
        let mut ball = Ball::new(Vec2::new(200.0, 100.0), 7.0);
        ball.speed_x = 100.0;
        ball.speed_y = 300.0;
        ball
    }

    #[test]
    fn test_spawn_near_ball() {
        let mut trail = ParticleTrail::new(42, 100);
        let ball = moving_ball();
        trail.update(1.0 / 60.0, &ball, 2);
        assert_eq!(trail.len(), 2);
        let anchor = ball.pos + Vec2::splat(7.0 / 2.65);
        for p in trail.iter() {
            assert!((p.pos - anchor).abs().max_element() <= SPAWN_JITTER + 1e-4);
            assert_eq!(p.vel, Vec2::new(10.0, 30.0));
            assert!(p.color.x >= 0.5 && p.color.x < 1.5);
            assert_eq!(p.color.w, 1.0);
        }
    }

    #[test]
    fn test_particles_fade_and_expire() {
        let mut trail = ParticleTrail::new(1, 100);
        let ball = moving_ball();
        trail.update(0.0, &ball, 1);
        let before = *trail.iter().next().unwrap();
        trail.update(0.1, &ball, 0);
        let after = *trail.iter().next().unwrap();
        assert!((after.life - 0.9).abs() < 1e-5);
        assert!((after.color.w - 0.75).abs() < 1e-5);
        assert!((after.pos - (before.pos - before.vel * 0.1)).length() < 1e-4);

        trail.update(1.0, &ball, 0);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut trail = ParticleTrail::new(3, 4);
        let ball = moving_ball();
        for _ in 0..10 {
            trail.update(0.01, &ball, 2);
        }
        assert_eq!(trail.len(), 4);
        // Survivors are the two most recent batches
        assert!(trail.iter().all(|p| p.life > 0.975));

        trail.set_capacity(1);
        assert_eq!(trail.len(), 1);
        trail.set_capacity(0);
        trail.update(0.01, &ball, 2);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_same_seed_same_trail() {
        let ball = moving_ball();
        let mut a = ParticleTrail::new(9, 50);
        let mut b = ParticleTrail::new(9, 50);
        a.update(0.016, &ball, 5);
        b.update(0.016, &ball, 5);
        assert!(a.iter().eq(b.iter()));
    }
}
