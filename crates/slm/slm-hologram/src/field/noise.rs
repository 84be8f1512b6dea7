//! Random phase screens

use super::{ComplexField, FieldMode};
use crate::error::{ensure_finite, HologramError, Result};
use crate::grid::SamplingGrid;
use crate::mode::Placement;
use crate::phase::principal_phase;
use core::f64::consts::{PI, TAU};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Per-pixel phase distribution
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoiseDistribution {
    /// Uniform over (−π, π]
    #[default]
    Uniform,
    /// Normal with the given mean and standard deviation (radians), then wrapped
    Normal {
        /// Mean phase
        mean: f64,
        /// Standard deviation (≥ 0)
        std_dev: f64,
    },
}

/// Random phase with unit amplitude
///
/// A seeded screen is reproducible bit for bit; an unseeded one draws from
/// the thread RNG.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Noise {
    /// RNG seed
    #[serde(default)]
    pub seed: Option<u64>,
    /// Phase distribution
    #[serde(default)]
    pub distribution: NoiseDistribution,
}

impl Noise {
    fn fill<R: Rng + ?Sized>(&self, rng: &mut R, len: usize) -> Result<Vec<f64>> {
        match self.distribution {
            NoiseDistribution::Uniform => Ok((0..len)
                .map(|_| principal_phase(PI - TAU * rng.gen::<f64>()))
                .collect()),
            NoiseDistribution::Normal { mean, std_dev } => {
                let normal = Normal::new(mean, std_dev)
                    .map_err(|e| HologramError::invalid("std_dev", e.to_string()))?;
                Ok((0..len)
                    .map(|_| principal_phase(normal.sample(rng)))
                    .collect())
            }
        }
    }
}

impl FieldMode for Noise {
    fn validate(&self) -> Result<()> {
        if let NoiseDistribution::Normal { mean, std_dev } = self.distribution {
            ensure_finite("mean", mean)?;
            if !(std_dev.is_finite() && std_dev >= 0.0) {
                return Err(HologramError::invalid(
                    "std_dev",
                    format!("must be finite and non-negative, got {std_dev}"),
                ));
            }
        }
        Ok(())
    }

    fn evaluate(&self, grid: &SamplingGrid, _placement: &Placement) -> Result<ComplexField> {
        self.validate()?;
        let phase = match self.seed {
            Some(seed) => self.fill(&mut StdRng::seed_from_u64(seed), grid.len())?,
            None => self.fill(&mut rand::thread_rng(), grid.len())?,
        };
        let amplitude = vec![1.0; phase.len()];
        ComplexField::from_parts(grid.width(), grid.height(), amplitude, phase)
    }
}
