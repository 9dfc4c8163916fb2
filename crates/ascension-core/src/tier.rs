//! The seven ordered ascension tiers.
//!
//! Tiers are named after points on the Kardashev scale. Every technology and
//! every ascension gate is tagged with a tier; the ordering below is the only
//! source of truth for "higher" and "lower".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An ascension tier. Declaration order is progression order, so the
/// derived `Ord` compares tiers the way the game does.
///
/// Serialized as its tier id (`"k0.6"`, ...) in every data format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AscensionTier {
    K0_6,
    K0_8,
    K1_0,
    K1_5,
    K2_0,
    K2_3,
    K3_0,
}

impl AscensionTier {
    /// All tiers in progression order.
    pub const ALL: [AscensionTier; 7] = [
        AscensionTier::K0_6,
        AscensionTier::K0_8,
        AscensionTier::K1_0,
        AscensionTier::K1_5,
        AscensionTier::K2_0,
        AscensionTier::K2_3,
        AscensionTier::K3_0,
    ];

    /// The starting tier. It has no gate and is always reached.
    pub const FIRST: AscensionTier = AscensionTier::K0_6;

    /// Position in [`AscensionTier::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<AscensionTier> {
        Self::ALL.get(index).copied()
    }

    /// The tier immediately below this one, or `None` for the first tier.
    pub fn previous(self) -> Option<AscensionTier> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// The tier immediately above this one, or `None` for the last tier.
    pub fn next(self) -> Option<AscensionTier> {
        Self::from_index(self.index() + 1)
    }

    /// Stable identifier used in data files and localization keys.
    pub fn as_str(self) -> &'static str {
        match self {
            AscensionTier::K0_6 => "k0.6",
            AscensionTier::K0_8 => "k0.8",
            AscensionTier::K1_0 => "k1.0",
            AscensionTier::K1_5 => "k1.5",
            AscensionTier::K2_0 => "k2.0",
            AscensionTier::K2_3 => "k2.3",
            AscensionTier::K3_0 => "k3.0",
        }
    }
}

impl Default for AscensionTier {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for AscensionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name one of the seven tiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ascension tier: {0:?}")]
pub struct ParseTierError(pub String);

impl FromStr for AscensionTier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| ParseTierError(s.to_string()))
    }
}

impl TryFrom<String> for AscensionTier {
    type Error = ParseTierError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<AscensionTier> for String {
    fn from(tier: AscensionTier) -> String {
        tier.as_str().to_string()
    }
}
