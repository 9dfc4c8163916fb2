//! Data file schema: the on-disk shape of technologies, ascension gates, and
//! starting states.
//!
//! References between definitions are plain strings here. They are checked
//! and turned into engine types by [`crate::resolve`].

use ascension_core::empire::{EmpireRequirement, EmpireState};
use ascension_core::tier::AscensionTier;
use ascension_tech_tree::catalog::ResearchCategory;
use serde::Deserialize;

// ===========================================================================
// Technologies
// ===========================================================================

/// A technology definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct TechData {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: ResearchCategory,
    pub tier: AscensionTier,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    pub time_years: u32,
    #[serde(default)]
    pub requires: Option<RequiresData>,
}

/// Compute and empire gating for a technology.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequiresData {
    #[serde(default)]
    pub compute: Option<u32>,
    #[serde(default)]
    pub empire: Option<EmpireRequirement>,
}

// ===========================================================================
// Ascension gates
// ===========================================================================

/// An ascension gate definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct GateData {
    pub to_tier: AscensionTier,
    #[serde(default)]
    pub requires_tech: Vec<String>,
    #[serde(default)]
    pub requires_compute: u32,
    #[serde(default)]
    pub requires_empire: Option<EmpireRequirement>,
}

// ===========================================================================
// Starting state
// ===========================================================================

/// The progression a new player starts with. Every field is optional; an
/// empty file describes a fresh player.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartingStateData {
    #[serde(default)]
    pub tier: AscensionTier,
    #[serde(default)]
    pub compute_level: u32,
    #[serde(default)]
    pub empire: EmpireState,
    /// Technologies granted up front, by id.
    #[serde(default)]
    pub completed: Vec<String>,
}

// ===========================================================================
// Tests
// ===========================================================================
