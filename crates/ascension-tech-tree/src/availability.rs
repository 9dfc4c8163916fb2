//! Availability resolution: is a tech startable, and if not, why not.
//!
//! Every function here is a pure query over a [`TechCatalog`] and a
//! [`ProgressionState`]. Lock reasons are collected eagerly rather than
//! stopping at the first failure, so the UI can show everything blocking a
//! tech at once. Their order is part of the contract:
//!
//! 1. missing prerequisites, in declared order
//! 2. the tech's tier not yet reached
//! 3. insufficient compute level
//! 4. unmet empire sub-requirements (planets, home majority, intel)

use ascension_core::empire::EmpireShortfall;
use ascension_core::id::TechId;
use ascension_core::tier::AscensionTier;
use serde::{Deserialize, Serialize};

use crate::catalog::{TechCatalog, TechDef};
use crate::state::ProgressionState;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Status of a tech for one player. Exactly one applies at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechStatus {
    Completed,
    Researching,
    Available,
    Locked,
}

/// Broad class of a [`LockReason`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockReasonKind {
    Prerequisite,
    Ascension,
    Compute,
    Empire,
}

/// Why a tech cannot be started right now. Carries ids and thresholds,
/// never display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LockReason {
    /// A prerequisite has not been completed. With `not_found` set, the
    /// queried id itself is not in the catalog; stale UI references then
    /// show up as locked on a prerequisite.
    Prerequisite {
        tech_id: TechId,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        not_found: bool,
    },

    /// The tech's tier has not been reached.
    Ascension { required: AscensionTier },

    Compute { current: u32, required: u32 },

    Empire(EmpireShortfall),
}

impl LockReason {
    pub fn missing_prerequisite(tech_id: TechId) -> Self {
        LockReason::Prerequisite {
            tech_id,
            not_found: false,
        }
    }

    pub fn not_found(tech_id: TechId) -> Self {
        LockReason::Prerequisite {
            tech_id,
            not_found: true,
        }
    }

    pub fn kind(&self) -> LockReasonKind {
        match self {
            LockReason::Prerequisite { .. } => LockReasonKind::Prerequisite,
            LockReason::Ascension { .. } => LockReasonKind::Ascension,
            LockReason::Compute { .. } => LockReasonKind::Compute,
            LockReason::Empire(_) => LockReasonKind::Empire,
        }
    }

    /// Stable localization key.
    pub fn key(&self) -> &'static str {
        match self {
            LockReason::Prerequisite {
                not_found: false, ..
            } => "research.locked.prerequisite",
            LockReason::Prerequisite {
                not_found: true, ..
            } => "research.locked.not_found",
            LockReason::Ascension { .. } => "research.locked.ascension",
            LockReason::Compute { .. } => "research.locked.compute",
            LockReason::Empire(shortfall) => match shortfall {
                EmpireShortfall::PlanetsControlled { .. } => {
                    "research.locked.empire.planets_controlled"
                }
                EmpireShortfall::HomeSystemMajority => {
                    "research.locked.empire.home_system_majority"
                }
                EmpireShortfall::IntelLevel { .. } => "research.locked.empire.intel_level",
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

impl TechCatalog {
    pub fn is_tech_completed(&self, state: &ProgressionState, id: &TechId) -> bool {
        state.completed_tech_ids.contains(id)
    }

    pub fn is_tech_researching(&self, state: &ProgressionState, id: &TechId) -> bool {
        state
            .active_research
            .as_ref()
            .is_some_and(|r| &r.tech_id == id)
    }

    /// Whether `tier` is at or below the tier the player has reached.
    pub fn is_tier_unlocked(&self, state: &ProgressionState, tier: AscensionTier) -> bool {
        tier.index() <= state.ascension_tier_reached.index()
    }

    /// Everything preventing `id` from being started. Empty exactly when the
    /// tech's own requirements are satisfied.
    pub fn tech_locked_reasons(&self, state: &ProgressionState, id: &TechId) -> Vec<LockReason> {
        let Some(tech) = self.tech(id) else {
            tracing::warn!(tech = %id, "lock reasons requested for unknown technology");
            return vec![LockReason::not_found(id.clone())];
        };

        let mut reasons: Vec<LockReason> = tech
            .prerequisites
            .iter()
            .filter(|p| !self.is_tech_completed(state, p))
            .map(|p| LockReason::missing_prerequisite(p.clone()))
            .collect();

        if !self.is_tier_unlocked(state, tech.tier) {
            reasons.push(LockReason::Ascension {
                required: tech.tier,
            });
        }

        if let Some(required) = tech.required_compute()
            && state.compute_level < required
        {
            reasons.push(LockReason::Compute {
                current: state.compute_level,
                required,
            });
        }

        if let Some(empire) = tech.required_empire() {
            reasons.extend(
                empire
                    .shortfalls(&state.empire_state)
                    .into_iter()
                    .map(LockReason::Empire),
            );
        }

        reasons
    }

    /// Not completed, not being researched, and nothing locking it.
    pub fn is_tech_available(&self, state: &ProgressionState, id: &TechId) -> bool {
        !self.is_tech_completed(state, id)
            && !self.is_tech_researching(state, id)
            && self.tech_locked_reasons(state, id).is_empty()
    }

    pub fn tech_status(&self, state: &ProgressionState, id: &TechId) -> TechStatus {
        if self.is_tech_completed(state, id) {
            TechStatus::Completed
        } else if self.is_tech_researching(state, id) {
            TechStatus::Researching
        } else if self.is_tech_available(state, id) {
            TechStatus::Available
        } else {
            TechStatus::Locked
        }
    }

    /// Every tech that could be started right now, in catalog order.
    pub fn available_techs(&self, state: &ProgressionState) -> Vec<&TechDef> {
        self.techs()
            .iter()
            .filter(|t| self.is_tech_available(state, &t.id))
            .collect()
    }
}
