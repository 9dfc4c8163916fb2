//! Empire metrics and the non-tech requirements that read them.
//!
//! The surrounding simulation owns the real numbers; the engine only ever
//! compares an [`EmpireState`] snapshot against an [`EmpireRequirement`].
//! Sub-requirements are always evaluated in the same order (planets
//! controlled, home-system majority, intel level) so that lock reasons and
//! gate breakdowns list them identically.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Intel level
// ---------------------------------------------------------------------------

/// How much the empire knows about its surroundings. Ordered low < medium < high.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum IntelLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl IntelLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            IntelLevel::Low => "low",
            IntelLevel::Medium => "medium",
            IntelLevel::High => "high",
        }
    }
}

impl fmt::Display for IntelLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// State and requirement
// ---------------------------------------------------------------------------

/// Snapshot of the empire metrics, written by the surrounding simulation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmpireState {
    pub planets_controlled: u32,
    pub home_system_majority: bool,
    pub intel_level: IntelLevel,
}

/// Non-tech conditions attached to a technology or an ascension gate.
///
/// Absent fields impose nothing. A planet count of zero and a `false`
/// majority flag are treated as absent as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmpireRequirement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planets_controlled: Option<u32>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub home_system_majority: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intel_level: Option<IntelLevel>,
}

/// A single sub-requirement of an [`EmpireRequirement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmpireCondition {
    PlanetsControlled { required: u32 },
    HomeSystemMajority,
    IntelLevel { required: IntelLevel },
}

/// An unmet [`EmpireCondition`], carrying the current value where one exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmpireShortfall {
    PlanetsControlled { current: u32, required: u32 },
    HomeSystemMajority,
    IntelLevel { current: IntelLevel, required: IntelLevel },
}

impl EmpireRequirement {
    /// The active sub-requirements, in evaluation order.
    pub fn conditions(&self) -> Vec<EmpireCondition> {
        let mut conditions = Vec::with_capacity(3);
        if let Some(required) = self.planets_controlled
            && required > 0
        {
            conditions.push(EmpireCondition::PlanetsControlled { required });
        }
        if self.home_system_majority {
            conditions.push(EmpireCondition::HomeSystemMajority);
        }
        if let Some(required) = self.intel_level {
            conditions.push(EmpireCondition::IntelLevel { required });
        }
        conditions
    }

    /// Every unmet sub-requirement, in evaluation order.
    pub fn shortfalls(&self, state: &EmpireState) -> Vec<EmpireShortfall> {
        self.conditions()
            .into_iter()
            .filter_map(|c| c.shortfall(state))
            .collect()
    }

    /// Whether every sub-requirement holds. Vacuously true when empty.
    pub fn is_met(&self, state: &EmpireState) -> bool {
        self.conditions().iter().all(|c| c.is_met(state))
    }
}

impl EmpireCondition {
    /// All comparisons are `>=`: meeting a threshold exactly satisfies it.
    pub fn is_met(&self, state: &EmpireState) -> bool {
        match *self {
            EmpireCondition::PlanetsControlled { required } => {
                state.planets_controlled >= required
            }
            EmpireCondition::HomeSystemMajority => state.home_system_majority,
            EmpireCondition::IntelLevel { required } => state.intel_level >= required,
        }
    }

    pub fn shortfall(&self, state: &EmpireState) -> Option<EmpireShortfall> {
        if self.is_met(state) {
            return None;
        }
        Some(match *self {
            EmpireCondition::PlanetsControlled { required } => EmpireShortfall::PlanetsControlled {
                current: state.planets_controlled,
                required,
            },
            EmpireCondition::HomeSystemMajority => EmpireShortfall::HomeSystemMajority,
            EmpireCondition::IntelLevel { required } => EmpireShortfall::IntelLevel {
                current: state.intel_level,
                required,
            },
        })
    }

    /// Localization key for this condition.
    pub fn key(&self) -> &'static str {
        match self {
            EmpireCondition::PlanetsControlled { .. } => "empire.planets_controlled",
            EmpireCondition::HomeSystemMajority => "empire.home_system_majority",
            EmpireCondition::IntelLevel { .. } => "empire.intel_level",
        }
    }
}

impl EmpireShortfall {
    pub fn key(&self) -> &'static str {
        match self {
            EmpireShortfall::PlanetsControlled { .. } => "empire.planets_controlled",
            EmpireShortfall::HomeSystemMajority => "empire.home_system_majority",
            EmpireShortfall::IntelLevel { .. } => "empire.intel_level",
        }
    }
}
