use std::fmt;

/// Failures the core can surface. None of them are fatal to the host:
/// callers log and skip the offending tick or message.
#[derive(Clone, Debug, PartialEq)]
pub enum GymError {
    GrowthTableEmpty,
    GrowthTableLengthMismatch {
        level_size: usize,
        level_multiplier: usize,
    },
    GrowthTableNotFinite {
        table: &'static str,
        index: usize,
    },
    GrowthMultiplierZero {
        index: usize,
    },
    GrowthTierOutOfRange {
        tier: usize,
        tiers: usize,
    },
}

impl fmt::Display for GymError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GrowthTableEmpty => write!(f, "growth tables must not be empty"),
            Self::GrowthTableLengthMismatch {
                level_size,
                level_multiplier,
            } => write!(
                f,
                "growth table length mismatch: level_size has {level_size} entries, level_multiplier has {level_multiplier}"
            ),
            Self::GrowthTableNotFinite { table, index } => {
                write!(f, "growth table {table} has a non-finite entry at index {index}")
            }
            Self::GrowthMultiplierZero { index } => {
                write!(f, "level_multiplier entry at index {index} is zero")
            }
            Self::GrowthTierOutOfRange { tier, tiers } => {
                write!(f, "growth tier {tier} out of range (tables cover {tiers} tiers)")
            }
        }
    }
}

impl std::error::Error for GymError {}
