//! Decorative snowfall over the home view.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const FLAKE_COUNT: usize = 50;
/// Longest frame step applied in one call, in seconds.
pub const MAX_FRAME_DELTA: f64 = 0.25;

const MAX_DELAY: f64 = 5.0;
const MIN_DURATION: f64 = 3.0;
const MAX_DURATION: f64 = 7.0;
const MIN_SIZE: f64 = 4.0;
const MAX_SIZE: f64 = 12.0;
const MAX_DRIFT: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnowMode {
    Running,
    Paused,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snowflake {
    /// Seconds before the first fall starts.
    pub delay: f64,
    /// Seconds for one top-to-bottom fall.
    pub duration: f64,
    /// Nominal diameter in pixels.
    pub size: f64,
    /// Start column, percent of the width.
    pub column: f64,
    /// Horizontal travel over one fall, percent of the width.
    pub drift: f64,
}

impl Snowflake {
    /// Normalised `(x, y)` at `elapsed` seconds, or `None` before the
    /// flake's first fall.
    pub fn position(&self, elapsed: f64) -> Option<(f64, f64)> {
        let falling = elapsed - self.delay;
        if falling < 0.0 || self.duration <= 0.0 {
            return None;
        }
        let cycle = falling.rem_euclid(self.duration) / self.duration;
        let x = (self.drift.mul_add(cycle, self.column) / 100.0).rem_euclid(1.0);
        Some((x, cycle))
    }
}

#[derive(Debug, Clone)]
pub struct SnowField {
    flakes: Vec<Snowflake>,
    elapsed: f64,
    mode: SnowMode,
}

impl SnowField {
    pub fn new(seed: u64) -> Self {
        Self::with_count(seed, FLAKE_COUNT)
    }

    pub fn with_count(seed: u64, count: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let flakes = (0..count)
            .map(|_| Snowflake {
                delay: rng.gen_range(0.0..MAX_DELAY),
                duration: rng.gen_range(MIN_DURATION..MAX_DURATION),
                size: rng.gen_range(MIN_SIZE..MAX_SIZE),
                column: rng.gen_range(0.0..100.0),
                drift: rng.gen_range(-MAX_DRIFT..MAX_DRIFT),
            })
            .collect();
        Self {
            flakes,
            elapsed: 0.0,
            mode: SnowMode::Running,
        }
    }

    pub fn flakes(&self) -> &[Snowflake] {
        &self.flakes
    }

    pub const fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub const fn mode(&self) -> SnowMode {
        self.mode
    }

    pub fn toggle_pause(&mut self) {
        self.mode = match self.mode {
            SnowMode::Running => SnowMode::Paused,
            SnowMode::Paused => SnowMode::Running,
        };
        log::debug!("Snowfall {:?}", self.mode);
    }

    /// Moves the field forward by `delta` seconds. Long stalls are clamped
    /// so flakes never jump across the screen.
    pub fn advance(&mut self, delta: f64) {
        if self.mode == SnowMode::Paused || !delta.is_finite() {
            return;
        }
        self.elapsed += delta.clamp(0.0, MAX_FRAME_DELTA);
    }

    /// Visible flakes as normalised `(x, y, size)`.
    pub fn visible(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.flakes.iter().filter_map(|flake| {
            flake
                .position(self.elapsed)
                .map(|(x, y)| (x, y, flake.size))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flake_parameters_stay_in_range() {
        let field = SnowField::new(3);
        assert_eq!(field.flakes().len(), FLAKE_COUNT);
        for flake in field.flakes() {
            assert!((0.0..5.0).contains(&flake.delay));
            assert!((3.0..7.0).contains(&flake.duration));
            assert!((4.0..12.0).contains(&flake.size));
            assert!((0.0..100.0).contains(&flake.column));
            assert!((-50.0..50.0).contains(&flake.drift));
        }
    }

    #[test]
    fn advance_clamps_large_frame_deltas() {
        let mut field = SnowField::new(1);
        field.advance(10.0);
        assert!((field.elapsed() - MAX_FRAME_DELTA).abs() < 1e-12);

        field.advance(-1.0);
        field.advance(f64::NAN);
        assert!((field.elapsed() - MAX_FRAME_DELTA).abs() < 1e-12);
    }

    #[test]
    fn paused_field_does_not_move() {
        let mut field = SnowField::new(1);
        field.advance(0.1);
        field.toggle_pause();
        field.advance(0.1);
        assert_eq!(field.mode(), SnowMode::Paused);
        assert!((field.elapsed() - 0.1).abs() < 1e-12);

        field.toggle_pause();
        field.advance(0.1);
        assert!((field.elapsed() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn flake_waits_for_delay_then_loops() {
        let flake = Snowflake {
            delay: 1.0,
            duration: 4.0,
            size: 6.0,
            column: 90.0,
            drift: 20.0,
        };
        assert_eq!(flake.position(0.5), None);

        let (x, y) = flake.position(3.0).expect("falling");
        assert!((y - 0.5).abs() < 1e-12);
        assert!((x - 0.0).abs() < 1e-12);

        let (_, y) = flake.position(5.5).expect("second fall");
        assert!((y - 0.125).abs() < 1e-12);
    }

    #[test]
    fn same_seed_produces_same_field() {
        assert_eq!(SnowField::new(9).flakes(), SnowField::new(9).flakes());
    }
}
