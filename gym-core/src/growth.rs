//! Score function over the host's growth encoding.
//!
//! The two lookup tables encode the host game's progression curve. They are
//! reverse-engineered host data and change with game versions, so they are
//! injected configuration, never baked into the core.

use serde::{Deserialize, Serialize};

use crate::error::GymError;
use crate::snapshot::Growth;

/// Per-tier lookup tables: `level_size[tier]` and `level_multiplier[tier]`.
/// Validated on construction so `score` only has the tier-range error left.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGrowthTables")]
pub struct GrowthTables {
    level_size: Vec<f64>,
    level_multiplier: Vec<f64>,
}

#[derive(Deserialize)]
struct RawGrowthTables {
    level_size: Vec<f64>,
    level_multiplier: Vec<f64>,
}

impl TryFrom<RawGrowthTables> for GrowthTables {
    type Error = GymError;

    fn try_from(raw: RawGrowthTables) -> Result<Self, GymError> {
        GrowthTables::new(raw.level_size, raw.level_multiplier)
    }
}

impl GrowthTables {
    pub fn new(level_size: Vec<f64>, level_multiplier: Vec<f64>) -> Result<Self, GymError> {
        if level_size.is_empty() || level_multiplier.is_empty() {
            return Err(GymError::GrowthTableEmpty);
        }
        if level_size.len() != level_multiplier.len() {
            return Err(GymError::GrowthTableLengthMismatch {
                level_size: level_size.len(),
                level_multiplier: level_multiplier.len(),
            });
        }
        if let Some(index) = level_size.iter().position(|v| !v.is_finite()) {
            return Err(GymError::GrowthTableNotFinite {
                table: "level_size",
                index,
            });
        }
        if let Some(index) = level_multiplier.iter().position(|v| !v.is_finite()) {
            return Err(GymError::GrowthTableNotFinite {
                table: "level_multiplier",
                index,
            });
        }
        if let Some(index) = level_multiplier.iter().position(|v| *v == 0.0) {
            return Err(GymError::GrowthMultiplierZero { index });
        }
        Ok(Self {
            level_size,
            level_multiplier,
        })
    }

    /// Linear placeholder curve (size 1..=tiers, unit multipliers). Useful
    /// for offline replays and tests where the real host tables are absent.
    pub fn linear(tiers: usize) -> Self {
        let level_size = (0..tiers).map(|t| t as f64 + 1.0).collect();
        let level_multiplier = vec![1.0; tiers];
        Self {
            level_size,
            level_multiplier,
        }
    }

    pub fn tiers(&self) -> usize {
        self.level_size.len()
    }

    /// Collapses the two-part growth encoding into one comparable scalar:
    /// `floor((level_size[tier] + fraction / level_multiplier[tier] - 1) * 15 - 5)`.
    pub fn score(&self, growth: Growth) -> Result<f64, GymError> {
        let tier = growth.tier;
        if tier >= self.level_size.len() {
            return Err(GymError::GrowthTierOutOfRange {
                tier,
                tiers: self.level_size.len(),
            });
        }
        let base = self.level_size[tier] + growth.fraction / self.level_multiplier[tier] - 1.0;
        Ok((base * 15.0 - 5.0).floor())
    }
}
