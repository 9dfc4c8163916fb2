//! Events emitted by progression commands.
//!
//! Every successful command records what it did in the owning
//! [`ProgressionState`](crate::state::ProgressionState). The caller drains
//! them after each command to drive its event log, toasts, or audio.
//! Failed commands never emit.

use ascension_core::fixed::{Fixed64, Timestamp};
use ascension_core::id::TechId;
use ascension_core::tier::AscensionTier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressionEvent {
    ResearchStarted {
        tech_id: TechId,
        at: Timestamp,
    },

    ResearchCompleted {
        tech_id: TechId,
        at: Timestamp,
    },

    /// Research was abandoned. `progress_lost` is the percentage discarded.
    ResearchCancelled {
        tech_id: TechId,
        progress_lost: Fixed64,
        at: Timestamp,
    },

    /// A tech was marked completed directly, without a research project.
    TechGranted {
        tech_id: TechId,
        at: Timestamp,
    },

    Ascended {
        from: AscensionTier,
        to: AscensionTier,
        at: Timestamp,
    },
}

impl ProgressionEvent {
    /// Stable key the presentation layer maps to a translated message.
    pub fn key(&self) -> &'static str {
        match self {
            ProgressionEvent::ResearchStarted { .. } => "research.started",
            ProgressionEvent::ResearchCompleted { .. } => "research.completed",
            ProgressionEvent::ResearchCancelled { .. } => "research.cancelled",
            ProgressionEvent::TechGranted { .. } => "research.granted",
            ProgressionEvent::Ascended { .. } => "ascension.reached",
        }
    }

    pub fn at(&self) -> Timestamp {
        match self {
            ProgressionEvent::ResearchStarted { at, .. }
            | ProgressionEvent::ResearchCompleted { at, .. }
            | ProgressionEvent::ResearchCancelled { at, .. }
            | ProgressionEvent::TechGranted { at, .. }
            | ProgressionEvent::Ascended { at, .. } => *at,
        }
    }
}
