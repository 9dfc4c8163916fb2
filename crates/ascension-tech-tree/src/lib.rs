//! Research & ascension progression engine.
//!
//! Provides the technology dependency graph, tiered ascension gates, and
//! the rules that decide what a player can research and when they may
//! ascend.
//!
//! # Overview
//!
//! A [`TechCatalog`](catalog::TechCatalog) is built once at startup from
//! [`TechDef`](catalog::TechDef)s and
//! [`AscensionGateDef`](catalog::AscensionGateDef)s. Construction validates
//! the data (unknown ids, prerequisite cycles, missing or duplicate gates)
//! and fails instead of producing an inconsistent graph.
//!
//! Each player owns a [`ProgressionState`](state::ProgressionState). The
//! catalog answers read-only questions about it:
//!
//! - [`tech_status`](catalog::TechCatalog::tech_status) and
//!   [`tech_locked_reasons`](catalog::TechCatalog::tech_locked_reasons)
//! - [`can_ascend`](catalog::TechCatalog::can_ascend) and
//!   [`ascension_gate_status`](catalog::TechCatalog::ascension_gate_status)
//!
//! and the state accepts commands that take the catalog as a parameter:
//! `start_research`, `tick_progress`, `complete_research`,
//! `cancel_research`, `grant_tech`, and `ascend_to_tier`. A command either
//! succeeds or returns an error with the state left exactly as it was.
//!
//! ```rust,ignore
//! let mut state = ProgressionState::new();
//! state.start_research(&catalog, &TechId::from("tech:bootstrapped-ai-core"), now)?;
//! state.tick_progress(Fixed64::from_num(25), now);
//! for event in state.drain_events() { /* feed the event log */ }
//! ```

pub mod availability;
pub mod catalog;
pub mod event;
pub mod gate;
mod graph;
pub mod query;
pub mod research;
pub mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use availability::{LockReason, LockReasonKind, TechStatus};
pub use catalog::{
    AscensionGateDef, CatalogError, ResearchCategory, TechCatalog, TechDef, TechRequirements,
};
pub use event::ProgressionEvent;
pub use gate::{AscensionGateStatus, EmpireCheck, GateTechProgress};
pub use research::ProgressionError;
pub use state::{ActiveResearch, ProgressionState};
