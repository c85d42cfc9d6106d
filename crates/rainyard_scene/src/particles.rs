//! Rain particle field
//!
//! A fixed-size point cloud whose points fall a constant distance per frame
//! and are recycled to a random height once they drop below the floor.
//!
//! The step is per call, not per second: rain falls faster on a display that
//! refreshes faster. Recycled heights come from an injected [`RandomSource`]
//! so runs are reproducible with a seeded generator.

use rand::Rng;
use thiserror::Error;

/// Distance each particle falls per `advance` call
pub const FALL_STEP: f32 = 0.02;

/// Largest particle count a field accepts
///
/// At 12 bytes per particle this stays under the 128 MiB storage binding
/// most GPUs guarantee.
pub const MAX_PARTICLES: usize = 5_000_000;

/// Errors raised by the particle simulation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParticleError {
    /// The flattened position buffer does not hold exactly `count * 3` floats
    #[error("particle buffer holds {actual} floats, expected {expected} for {count} particles")]
    BufferLength {
        count: usize,
        expected: usize,
        actual: usize,
    },

    /// More particles were requested than a field can hold
    #[error("{count} particles requested, at most {max} are supported")]
    TooMany { count: usize, max: usize },
}

/// Result type for particle operations
pub type Result<T> = std::result::Result<T, ParticleError>;

/// Uniform random numbers in `[0, 1)`
pub trait RandomSource {
    fn next_f32(&mut self) -> f32;
}

impl<R: Rng> RandomSource for R {
    fn next_f32(&mut self) -> f32 {
        self.gen::<f32>()
    }
}

/// Rain simulation parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RainSettings {
    /// Number of particles
    pub count: usize,
    /// Width and depth of the square area the rain covers, centred on the origin
    pub spread: f32,
    /// Particles below this height are recycled
    pub floor_y: f32,
    /// Recycled particles reappear uniformly in `[0, reset_height)`
    pub reset_height: f32,
}

impl Default for RainSettings {
    fn default() -> Self {
        Self {
            count: 1000,
            spread: 20.0,
            floor_y: -1.0,
            reset_height: 10.0,
        }
    }
}

/// Fixed-count point cloud with a flattened `[x, y, z, x, y, z, ...]` buffer
///
/// The buffer is allocated once and never grows or shrinks.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleField {
    count: usize,
    positions: Vec<f32>,
    needs_update: bool,
}

impl ParticleField {
    /// Scatter `count` particles over a `spread` x `spread` square, at heights in `[0, height)`
    pub fn scatter(
        count: usize,
        spread: f32,
        height: f32,
        rng: &mut impl RandomSource,
    ) -> Result<Self> {
        check_count(count)?;
        let mut positions = Vec::with_capacity(count * 3);
        for _ in 0..count {
            positions.push((rng.next_f32() - 0.5) * spread);
            positions.push(rng.next_f32() * height);
            positions.push((rng.next_f32() - 0.5) * spread);
        }
        tracing::debug!(
            "Scattered {} particles over {}x{}, up to height {}",
            count,
            spread,
            spread,
            height
        );
        Ok(Self {
            count,
            positions,
            needs_update: true,
        })
    }

    /// Build a field from a flattened position buffer
    pub fn from_positions(positions: Vec<f32>) -> Result<Self> {
        check_count(positions.len() / 3)?;
        if positions.len() % 3 != 0 {
            return Err(ParticleError::BufferLength {
                count: positions.len() / 3,
                expected: positions.len() / 3 * 3,
                actual: positions.len(),
            });
        }
        Ok(Self {
            count: positions.len() / 3,
            positions,
            needs_update: true,
        })
    }

    /// An empty field
    pub fn empty() -> Self {
        Self {
            count: 0,
            positions: Vec::new(),
            needs_update: false,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The flattened position buffer
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Position of particle `index`
    pub fn position(&self, index: usize) -> Option<[f32; 3]> {
        let i = index.checked_mul(3)?;
        self.positions.get(i..i + 3).map(|p| [p[0], p[1], p[2]])
    }

    /// Whether the buffer changed since the renderer last consumed it
    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Mark the buffer as consumed by the renderer
    pub fn clear_needs_update(&mut self) {
        self.needs_update = false;
    }

    fn check_invariant(&self) -> Result<()> {
        let expected = self.count * 3;
        if self.positions.len() != expected {
            return Err(ParticleError::BufferLength {
                count: self.count,
                expected,
                actual: self.positions.len(),
            });
        }
        Ok(())
    }
}

fn check_count(count: usize) -> Result<()> {
    if count > MAX_PARTICLES {
        return Err(ParticleError::TooMany {
            count,
            max: MAX_PARTICLES,
        });
    }
    Ok(())
}

/// Advance every particle by one frame
///
/// Each particle falls [`FALL_STEP`]. A particle whose new height is strictly
/// below `floor_y` is moved to a random height in `[0, reset_height)`; one
/// landing exactly on `floor_y` stays for another frame. X and Z are never
/// touched. Marks the field for re-upload.
pub fn advance<R>(
    field: &mut ParticleField,
    floor_y: f32,
    reset_height: f32,
    rng: &mut R,
) -> Result<()>
where
    R: RandomSource + ?Sized,
{
    field.check_invariant()?;

    let mut recycled = 0usize;
    for y in field.positions.iter_mut().skip(1).step_by(3) {
        *y -= FALL_STEP;
        if *y < floor_y {
            *y = reset_y(reset_height, rng);
            recycled += 1;
        }
    }
    tracing::trace!("advanced {} particles, {} recycled", field.count, recycled);

    field.needs_update = true;
    Ok(())
}

fn reset_y<R: RandomSource + ?Sized>(reset_height: f32, rng: &mut R) -> f32 {
    let y = rng.next_f32() * reset_height;
    // Rounding can land exactly on the open upper bound
    if y < reset_height {
        y
    } else {
        0.0
    }
}
