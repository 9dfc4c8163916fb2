//! Per-player progression state.
//!
//! A [`ProgressionState`] is an ordinary owned value: the caller creates one
//! per player session, keeps it wherever it keeps game state, and passes it
//! to the engine on every call. Queries borrow it immutably; commands borrow
//! it mutably and either succeed or leave it exactly as it was.

use ascension_core::empire::EmpireState;
use ascension_core::fixed::{Fixed64, Timestamp};
use ascension_core::id::TechId;
use ascension_core::tier::AscensionTier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::event::ProgressionEvent;

/// The single research project a player may have running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveResearch {
    pub tech_id: TechId,
    pub started_at: Timestamp,
    /// Percent complete, always within `0..=100`.
    pub progress: Fixed64,
}

/// One player's research and ascension progress.
///
/// Every successful command appends a [`ProgressionEvent`]. The buffer is
/// only emptied by [`drain_events`](Self::drain_events), so hosts that do
/// not consume events must still drain periodically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionState {
    /// Highest tier attained. Never decreases.
    pub(crate) ascension_tier_reached: AscensionTier,

    /// Written by the surrounding simulation.
    pub(crate) compute_level: u32,

    /// Written by the surrounding simulation.
    pub(crate) empire_state: EmpireState,

    /// Only grows; an id is inserted at most once.
    pub(crate) completed_tech_ids: BTreeSet<TechId>,

    /// At most one research project at a time.
    pub(crate) active_research: Option<ActiveResearch>,

    /// Events emitted since last drain. Not serialized (transient).
    /// Unbounded until drained.
    #[serde(skip)]
    pub(crate) events: Vec<ProgressionEvent>,
}

impl ProgressionState {
    /// A fresh player: starting tier, compute 0, empty empire, nothing researched.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh player with the given simulation-owned metrics.
    pub fn with_metrics(compute_level: u32, empire_state: EmpireState) -> Self {
        Self {
            compute_level,
            empire_state,
            ..Self::default()
        }
    }

    /// A fresh player who starts at `tier` instead of the first tier, for
    /// scenario and save-game setups.
    pub fn starting_at(
        tier: AscensionTier,
        compute_level: u32,
        empire_state: EmpireState,
    ) -> Self {
        Self {
            ascension_tier_reached: tier,
            ..Self::with_metrics(compute_level, empire_state)
        }
    }

    // -- Read access --

    pub fn ascension_tier_reached(&self) -> AscensionTier {
        self.ascension_tier_reached
    }

    pub fn compute_level(&self) -> u32 {
        self.compute_level
    }

    pub fn empire_state(&self) -> &EmpireState {
        &self.empire_state
    }

    pub fn completed_tech_ids(&self) -> &BTreeSet<TechId> {
        &self.completed_tech_ids
    }

    pub fn active_research(&self) -> Option<&ActiveResearch> {
        self.active_research.as_ref()
    }

    /// True when no research project is running.
    pub fn is_idle(&self) -> bool {
        self.active_research.is_none()
    }

    // -- Simulation-owned inputs --

    pub fn set_compute_level(&mut self, level: u32) {
        self.compute_level = level;
    }

    pub fn set_empire_state(&mut self, empire_state: EmpireState) {
        self.empire_state = empire_state;
    }

    /// For simulations that update one empire metric at a time.
    pub fn empire_state_mut(&mut self) -> &mut EmpireState {
        &mut self.empire_state
    }

    // -- Event API --

    /// Drain all pending events. Returns events and clears the internal list.
    pub fn drain_events(&mut self) -> Vec<ProgressionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Get a read-only view of pending events.
    pub fn pending_events(&self) -> &[ProgressionEvent] {
        &self.events
    }
}
