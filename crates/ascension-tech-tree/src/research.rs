//! The active-research state machine.
//!
//! ```text
//! Idle --start_research--> Researching --tick_progress(>= 100%)--> Idle
//!                               |        --complete_research-----> Idle
//!                               +--------cancel_research---------> Idle
//! ```
//!
//! A player has at most one research slot. Starting while the slot is
//! occupied fails; nothing is queued. Every command that fails leaves the
//! [`ProgressionState`] untouched.

use ascension_core::fixed::{
    Fixed64, PROGRESS_COMPLETE, Timestamp, advance_percent, fixed64_to_f64,
};
use ascension_core::id::TechId;
use ascension_core::tier::AscensionTier;

use crate::availability::LockReason;
use crate::catalog::TechCatalog;
use crate::event::ProgressionEvent;
use crate::state::{ActiveResearch, ProgressionState};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Business-rule failures from progression commands. Never fatal: the
/// caller decides what to tell the player, and the state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressionError {
    #[error("technology not found: {0}")]
    TechNotFound(TechId),

    #[error("technology {0} is already completed")]
    AlreadyCompleted(TechId),

    #[error("technology {0} is already being researched")]
    AlreadyResearching(TechId),

    #[error("cannot start {requested}: research slot is occupied by {active}")]
    ResearchSlotOccupied { requested: TechId, active: TechId },

    #[error("technology {tech} is locked ({} unmet requirements)", .reasons.len())]
    Locked {
        tech: TechId,
        reasons: Vec<LockReason>,
    },

    #[error("tier {0} has already been reached")]
    AlreadyAscended(AscensionTier),

    #[error("no ascension gate targets tier {0}")]
    NoGate(AscensionTier),

    #[error("requirements for ascending to {0} are not met")]
    GateNotMet(AscensionTier),
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

impl ProgressionState {
    /// Start researching `id` at `now` with zero progress.
    ///
    /// Fails if the tech is unknown, completed, already running, another
    /// research occupies the slot, or any lock reason applies.
    pub fn start_research(
        &mut self,
        catalog: &TechCatalog,
        id: &TechId,
        now: Timestamp,
    ) -> Result<(), ProgressionError> {
        if !catalog.contains(id) {
            return Err(ProgressionError::TechNotFound(id.clone()));
        }
        if catalog.is_tech_completed(self, id) {
            return Err(ProgressionError::AlreadyCompleted(id.clone()));
        }
        if let Some(active) = &self.active_research {
            if &active.tech_id == id {
                return Err(ProgressionError::AlreadyResearching(id.clone()));
            }
            return Err(ProgressionError::ResearchSlotOccupied {
                requested: id.clone(),
                active: active.tech_id.clone(),
            });
        }
        let reasons = catalog.tech_locked_reasons(self, id);
        if !reasons.is_empty() {
            return Err(ProgressionError::Locked {
                tech: id.clone(),
                reasons,
            });
        }

        self.active_research = Some(ActiveResearch {
            tech_id: id.clone(),
            started_at: now,
            progress: Fixed64::ZERO,
        });
        tracing::debug!(tech = %id, at = now, "research started");
        self.events.push(ProgressionEvent::ResearchStarted {
            tech_id: id.clone(),
            at: now,
        });
        Ok(())
    }

    /// Advance the active research by `delta` percent. Progress stays within
    /// `0..=100`; reaching 100 completes the research in the same call.
    /// Returns `true` if this call completed it. No-op while idle.
    pub fn tick_progress(&mut self, delta: Fixed64, now: Timestamp) -> bool {
        let Some(active) = self.active_research.as_mut() else {
            return false;
        };

        active.progress = advance_percent(active.progress, delta);
        if active.progress < PROGRESS_COMPLETE {
            return false;
        }

        self.complete_research(now).is_some()
    }

    /// Finish the active research immediately, whatever its progress.
    /// Returns the completed tech, or `None` (and does nothing) while idle.
    pub fn complete_research(&mut self, now: Timestamp) -> Option<TechId> {
        let active = self.active_research.take()?;
        self.completed_tech_ids.insert(active.tech_id.clone());

        tracing::debug!(tech = %active.tech_id, at = now, "research completed");
        self.events.push(ProgressionEvent::ResearchCompleted {
            tech_id: active.tech_id.clone(),
            at: now,
        });
        Some(active.tech_id)
    }

    /// Abandon the active research. Progress is discarded, not paused.
    /// Returns what was abandoned, if anything.
    pub fn cancel_research(&mut self, now: Timestamp) -> Option<ActiveResearch> {
        let active = self.active_research.take()?;

        tracing::debug!(
            tech = %active.tech_id,
            progress = fixed64_to_f64(active.progress),
            at = now,
            "research cancelled"
        );
        self.events.push(ProgressionEvent::ResearchCancelled {
            tech_id: active.tech_id.clone(),
            progress_lost: active.progress,
            at: now,
        });
        Some(active)
    }

    /// Mark `id` completed without researching it, for seeding a starting
    /// state or scripted rewards. Prerequisites are not checked.
    pub fn grant_tech(
        &mut self,
        catalog: &TechCatalog,
        id: &TechId,
        now: Timestamp,
    ) -> Result<(), ProgressionError> {
        if !catalog.contains(id) {
            return Err(ProgressionError::TechNotFound(id.clone()));
        }
        if catalog.is_tech_completed(self, id) {
            return Err(ProgressionError::AlreadyCompleted(id.clone()));
        }
        if catalog.is_tech_researching(self, id) {
            return Err(ProgressionError::AlreadyResearching(id.clone()));
        }

        self.completed_tech_ids.insert(id.clone());
        tracing::debug!(tech = %id, at = now, "technology granted");
        self.events.push(ProgressionEvent::TechGranted {
            tech_id: id.clone(),
            at: now,
        });
        Ok(())
    }
}
