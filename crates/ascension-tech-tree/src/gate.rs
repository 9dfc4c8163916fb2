//! Ascension gate evaluation.
//!
//! A gate into tier N is satisfied when the player has reached tier N-1,
//! completed every required tech, meets the compute threshold, and meets
//! every empire sub-requirement. Tiers cannot be skipped: the predecessor
//! check is explicit and does not follow from tech completion.

use ascension_core::empire::EmpireCondition;
use ascension_core::fixed::Timestamp;
use ascension_core::id::TechId;
use ascension_core::tier::AscensionTier;
use serde::Serialize;

use crate::catalog::{AscensionGateDef, TechCatalog};
use crate::event::ProgressionEvent;
use crate::research::ProgressionError;
use crate::state::ProgressionState;

// ---------------------------------------------------------------------------
// Gate breakdown
// ---------------------------------------------------------------------------

/// Completion of one tech required by a gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateTechProgress {
    pub tech_id: TechId,
    pub completed: bool,
}

/// One empire sub-requirement of a gate and whether it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmpireCheck {
    pub condition: EmpireCondition,
    pub met: bool,
}

/// Everything the UI needs to render a gate, requirement by requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AscensionGateStatus<'a> {
    pub gate: &'a AscensionGateDef,
    /// Every required tech, in declared order, whether or not completed.
    pub tech_progress: Vec<GateTechProgress>,
    pub compute_required: u32,
    pub compute_current: u32,
    pub compute_met: bool,
    pub empire_details: Vec<EmpireCheck>,
    /// All empire sub-requirements hold. True when there are none.
    pub empire_met: bool,
    pub can_ascend: bool,
    /// The player is already at or beyond this tier.
    pub already_ascended: bool,
}

impl AscensionGateStatus<'_> {
    /// Required techs still missing.
    pub fn missing_techs(&self) -> impl Iterator<Item = &TechId> {
        self.tech_progress
            .iter()
            .filter(|p| !p.completed)
            .map(|p| &p.tech_id)
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

impl TechCatalog {
    /// Whether the player may ascend to `to_tier` now. Fails closed when no
    /// gate targets the tier.
    pub fn can_ascend(&self, state: &ProgressionState, to_tier: AscensionTier) -> bool {
        let Some(gate) = self.gate_for_tier(to_tier) else {
            return false;
        };

        if let Some(previous) = to_tier.previous()
            && state.ascension_tier_reached < previous
        {
            return false;
        }

        if !gate
            .requires_tech
            .iter()
            .all(|t| self.is_tech_completed(state, t))
        {
            return false;
        }

        if state.compute_level < gate.requires_compute {
            return false;
        }

        gate.requires_empire
            .as_ref()
            .is_none_or(|req| req.is_met(&state.empire_state))
    }

    /// Requirement-by-requirement breakdown of the gate into `to_tier`, or
    /// `None` if no gate targets it.
    pub fn ascension_gate_status(
        &self,
        state: &ProgressionState,
        to_tier: AscensionTier,
    ) -> Option<AscensionGateStatus<'_>> {
        let gate = self.gate_for_tier(to_tier)?;

        let tech_progress = gate
            .requires_tech
            .iter()
            .map(|t| GateTechProgress {
                tech_id: t.clone(),
                completed: self.is_tech_completed(state, t),
            })
            .collect();

        let empire_details: Vec<EmpireCheck> = gate
            .requires_empire
            .as_ref()
            .map(|req| {
                req.conditions()
                    .into_iter()
                    .map(|condition| EmpireCheck {
                        met: condition.is_met(&state.empire_state),
                        condition,
                    })
                    .collect()
            })
            .unwrap_or_default();
        let empire_met = empire_details.iter().all(|c| c.met);

        Some(AscensionGateStatus {
            gate,
            tech_progress,
            compute_required: gate.requires_compute,
            compute_current: state.compute_level,
            compute_met: state.compute_level >= gate.requires_compute,
            empire_details,
            empire_met,
            can_ascend: self.can_ascend(state, to_tier),
            already_ascended: state.ascension_tier_reached >= to_tier,
        })
    }

    /// The tier after the one reached: the only gate that can currently be
    /// satisfied. `None` at the final tier.
    pub fn next_ascension(&self, state: &ProgressionState) -> Option<AscensionTier> {
        state.ascension_tier_reached.next()
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

impl ProgressionState {
    /// Ascend directly to `tier`.
    ///
    /// Fails if the tier is already reached or [`TechCatalog::can_ascend`]
    /// is false. Since `can_ascend` requires the immediately preceding tier,
    /// this only ever moves one tier at a time in practice.
    pub fn ascend_to_tier(
        &mut self,
        catalog: &TechCatalog,
        tier: AscensionTier,
        now: Timestamp,
    ) -> Result<(), ProgressionError> {
        if self.ascension_tier_reached >= tier {
            return Err(ProgressionError::AlreadyAscended(tier));
        }
        if catalog.gate_for_tier(tier).is_none() {
            return Err(ProgressionError::NoGate(tier));
        }
        if !catalog.can_ascend(self, tier) {
            return Err(ProgressionError::GateNotMet(tier));
        }

        let from = self.ascension_tier_reached;
        self.ascension_tier_reached = tier;
        tracing::info!(%from, to = %tier, at = now, "ascended");
        self.events
            .push(ProgressionEvent::Ascended { from, to: tier, at: now });
        Ok(())
    }
}
