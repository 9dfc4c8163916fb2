//! The static technology catalog: tech definitions and ascension gates.
//!
//! A [`TechCatalog`] is built once at startup via [`TechCatalog::new`], which
//! validates the whole graph and refuses to produce a catalog from
//! inconsistent data. After that it is read-only and can be shared by every
//! player's [`ProgressionState`](crate::state::ProgressionState).

use ascension_core::empire::EmpireRequirement;
use ascension_core::id::TechId;
use ascension_core::tier::AscensionTier;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::graph::prerequisite_order;

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

/// The five research domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResearchCategory {
    EconomyIndustry,
    EnergyCompute,
    ExplorationNavigation,
    ColonizationPlanettypes,
    MilitaryDefense,
}

impl ResearchCategory {
    pub const ALL: [ResearchCategory; 5] = [
        ResearchCategory::EconomyIndustry,
        ResearchCategory::EnergyCompute,
        ResearchCategory::ExplorationNavigation,
        ResearchCategory::ColonizationPlanettypes,
        ResearchCategory::MilitaryDefense,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResearchCategory::EconomyIndustry => "economy_industry",
            ResearchCategory::EnergyCompute => "energy_compute",
            ResearchCategory::ExplorationNavigation => "exploration_navigation",
            ResearchCategory::ColonizationPlanettypes => "colonization_planettypes",
            ResearchCategory::MilitaryDefense => "military_defense",
        }
    }
}

impl fmt::Display for ResearchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gating beyond prerequisites and tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechRequirements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empire: Option<EmpireRequirement>,
}

/// A technology that can be researched. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechDef {
    /// Unique identifier.
    pub id: TechId,

    /// Human-readable name. Display only; the engine never branches on it.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub category: ResearchCategory,

    /// The tier the player must have reached before starting this tech.
    pub tier: AscensionTier,

    /// Technologies that must be completed first. Declaration order is the
    /// order in which missing prerequisites are reported.
    pub prerequisites: Vec<TechId>,

    /// Nominal research duration. Informational; the caller decides how
    /// fast progress ticks.
    pub time_years: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<TechRequirements>,
}

impl TechDef {
    /// Minimum compute level, if any.
    pub fn required_compute(&self) -> Option<u32> {
        self.requires.as_ref().and_then(|r| r.compute)
    }

    pub fn required_empire(&self) -> Option<&EmpireRequirement> {
        self.requires.as_ref().and_then(|r| r.empire.as_ref())
    }
}

/// The requirement set for advancing into `to_tier`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AscensionGateDef {
    pub to_tier: AscensionTier,
    pub requires_tech: Vec<TechId>,
    pub requires_compute: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_empire: Option<EmpireRequirement>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Configuration errors found while building a catalog. All of them are fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate technology id: {0}")]
    DuplicateTech(TechId),

    #[error("prerequisite {prereq} for technology {tech} does not exist")]
    UnknownPrerequisite { tech: TechId, prereq: TechId },

    #[error("prerequisite cycle between technologies: {}", join_ids(.0))]
    PrerequisiteCycle(Vec<TechId>),

    #[error("ascension gate to {tier} requires unknown technology {tech}")]
    UnknownGateTech { tier: AscensionTier, tech: TechId },

    #[error("tier {0} is the starting tier and cannot have an ascension gate")]
    GateForFirstTier(AscensionTier),

    #[error("more than one ascension gate targets tier {0}")]
    DuplicateGate(AscensionTier),

    #[error("no ascension gate targets tier {0}")]
    MissingGate(AscensionTier),
}

fn join_ids(ids: &[TechId]) -> String {
    ids.iter()
        .map(TechId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The validated technology graph and the ordered list of ascension gates.
#[derive(Debug, Clone)]
pub struct TechCatalog {
    /// Definitions in catalog (authoring) order.
    techs: Vec<TechDef>,

    /// TechId -> position in `techs`.
    index: HashMap<TechId, usize>,

    /// Position of each tech (by catalog index) in dependency order.
    topo_rank: Vec<usize>,

    /// One gate per non-first tier, sorted by tier.
    gates: Vec<AscensionGateDef>,
}

impl TechCatalog {
    /// Validate and build a catalog.
    ///
    /// Checks, in order: duplicate ids, unresolved prerequisites,
    /// prerequisite cycles, and then the gates (starting tier, duplicates,
    /// unresolved techs, and one gate for every other tier).
    pub fn new(
        techs: Vec<TechDef>,
        mut gates: Vec<AscensionGateDef>,
    ) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(techs.len());
        for (i, tech) in techs.iter().enumerate() {
            if index.insert(tech.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateTech(tech.id.clone()));
            }
        }

        let mut edges = Vec::with_capacity(techs.len());
        for tech in &techs {
            let mut prereqs = Vec::with_capacity(tech.prerequisites.len());
            for prereq in &tech.prerequisites {
                let Some(&p) = index.get(prereq) else {
                    return Err(CatalogError::UnknownPrerequisite {
                        tech: tech.id.clone(),
                        prereq: prereq.clone(),
                    });
                };
                prereqs.push(p);
            }
            edges.push(prereqs);
        }

        let ordering = prerequisite_order(&edges);
        if !ordering.cyclic.is_empty() {
            let ids = ordering
                .cyclic
                .iter()
                .map(|&i| techs[i].id.clone())
                .collect();
            return Err(CatalogError::PrerequisiteCycle(ids));
        }
        let mut topo_rank = vec![0; techs.len()];
        for (rank, &i) in ordering.order.iter().enumerate() {
            topo_rank[i] = rank;
        }

        gates.sort_by_key(|g| g.to_tier);
        for (i, gate) in gates.iter().enumerate() {
            if gate.to_tier == AscensionTier::FIRST {
                return Err(CatalogError::GateForFirstTier(gate.to_tier));
            }
            if i > 0 && gates[i - 1].to_tier == gate.to_tier {
                return Err(CatalogError::DuplicateGate(gate.to_tier));
            }
            if let Some(tech) = gate.requires_tech.iter().find(|t| !index.contains_key(*t)) {
                return Err(CatalogError::UnknownGateTech {
                    tier: gate.to_tier,
                    tech: tech.clone(),
                });
            }
        }
        for tier in AscensionTier::ALL.into_iter().skip(1) {
            if !gates.iter().any(|g| g.to_tier == tier) {
                return Err(CatalogError::MissingGate(tier));
            }
        }

        tracing::info!(
            techs = techs.len(),
            gates = gates.len(),
            "technology catalog loaded"
        );

        Ok(Self {
            techs,
            index,
            topo_rank,
            gates,
        })
    }

    // -- Lookup --

    /// Get a technology definition by id.
    pub fn tech(&self, id: &TechId) -> Option<&TechDef> {
        self.index.get(id).map(|&i| &self.techs[i])
    }

    pub fn contains(&self, id: &TechId) -> bool {
        self.index.contains_key(id)
    }

    /// All technologies in catalog order.
    pub fn techs(&self) -> &[TechDef] {
        &self.techs
    }

    /// Technologies of one tier, in catalog order.
    pub fn techs_by_tier(&self, tier: AscensionTier) -> Vec<&TechDef> {
        self.techs.iter().filter(|t| t.tier == tier).collect()
    }

    /// The gate into `tier`. `None` for the starting tier.
    pub fn gate_for_tier(&self, tier: AscensionTier) -> Option<&AscensionGateDef> {
        self.gates.iter().find(|g| g.to_tier == tier)
    }

    /// All gates, in tier order.
    pub fn gates(&self) -> &[AscensionGateDef] {
        &self.gates
    }

    pub fn len(&self) -> usize {
        self.techs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.techs.is_empty()
    }

    /// Every transitive prerequisite of `id`, prerequisites first. Empty for
    /// unknown ids and for root technologies.
    pub fn prerequisite_closure(&self, id: &TechId) -> Vec<&TechDef> {
        let Some(&start) = self.index.get(id) else {
            return Vec::new();
        };

        let mut seen = vec![false; self.techs.len()];
        let mut stack = vec![start];
        while let Some(i) = stack.pop() {
            for prereq in &self.techs[i].prerequisites {
                let p = self.index[prereq];
                if !seen[p] {
                    seen[p] = true;
                    stack.push(p);
                }
            }
        }

        let mut closure: Vec<usize> = (0..self.techs.len()).filter(|&i| seen[i]).collect();
        closure.sort_by_key(|&i| self.topo_rank[i]);
        closure.into_iter().map(|i| &self.techs[i]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn lookup_by_id() {
        let catalog = small_catalog();
        let tech = catalog.tech(&TechId::from("test:smelting")).unwrap();
        assert_eq!(tech.name, "Smelting");
        assert!(catalog.tech(&TechId::from("test:missing")).is_none());
        assert!(catalog.contains(&TechId::from("test:root")));
    }

    #[test]
    fn techs_by_tier_keeps_catalog_order() {
        let catalog = small_catalog();
        let ids: Vec<&str> = catalog
            .techs_by_tier(AscensionTier::K0_6)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["test:root", "test:smelting", "test:probes"]);
        assert!(catalog.techs_by_tier(AscensionTier::K3_0).is_empty());
    }

    #[test]
    fn gates_are_sorted_by_tier() {
        let mut gates = open_gates();
        gates.reverse();
        let catalog = TechCatalog::new(vec![tech("test:a", AscensionTier::K0_6, &[])], gates).unwrap();
        let tiers: Vec<AscensionTier> = catalog.gates().iter().map(|g| g.to_tier).collect();
        assert_eq!(tiers, AscensionTier::ALL[1..].to_vec());
        assert!(catalog.gate_for_tier(AscensionTier::K0_6).is_none());
    }

    #[test]
    fn duplicate_tech_rejected() {
        let techs = vec![
            tech("test:a", AscensionTier::K0_6, &[]),
            tech("test:a", AscensionTier::K0_8, &[]),
        ];
        let err = TechCatalog::new(techs, open_gates()).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateTech(TechId::from("test:a")));
    }

    #[test]
    fn unknown_prerequisite_rejected() {
        let techs = vec![tech("test:a", AscensionTier::K0_6, &["test:ghost"])];
        let err = TechCatalog::new(techs, open_gates()).unwrap_err();
        assert_eq!(
            err,
            CatalogError::UnknownPrerequisite {
                tech: TechId::from("test:a"),
                prereq: TechId::from("test:ghost"),
            }
        );
    }

    #[test]
    fn prerequisite_cycle_rejected() {
        let techs = vec![
            tech("test:root", AscensionTier::K0_6, &[]),
            tech("test:a", AscensionTier::K0_6, &["test:root", "test:c"]),
            tech("test:b", AscensionTier::K0_6, &["test:a"]),
            tech("test:c", AscensionTier::K0_6, &["test:b"]),
            tech("test:leaf", AscensionTier::K0_6, &["test:c"]),
        ];
        let err = TechCatalog::new(techs, open_gates()).unwrap_err();
        assert_eq!(
            err,
            CatalogError::PrerequisiteCycle(vec![
                TechId::from("test:a"),
                TechId::from("test:b"),
                TechId::from("test:c"),
            ])
        );
        assert!(err.to_string().contains("test:a, test:b, test:c"));
    }

    #[test]
    fn self_prerequisite_rejected() {
        let techs = vec![tech("test:loop", AscensionTier::K0_6, &["test:loop"])];
        let err = TechCatalog::new(techs, open_gates()).unwrap_err();
        assert_eq!(
            err,
            CatalogError::PrerequisiteCycle(vec![TechId::from("test:loop")])
        );
    }

    #[test]
    fn gate_for_first_tier_rejected() {
        let mut gates = open_gates();
        gates.push(gate(AscensionTier::K0_6, &[], 0));
        let err = TechCatalog::new(vec![], gates).unwrap_err();
        assert_eq!(err, CatalogError::GateForFirstTier(AscensionTier::K0_6));
    }

    #[test]
    fn duplicate_gate_rejected() {
        let mut gates = open_gates();
        gates.push(gate(AscensionTier::K1_5, &[], 3));
        let err = TechCatalog::new(vec![], gates).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateGate(AscensionTier::K1_5));
    }

    #[test]
    fn gate_with_unknown_tech_rejected() {
        let mut gates = open_gates();
        gates[0].requires_tech.push(TechId::from("test:ghost"));
        let err = TechCatalog::new(vec![], gates).unwrap_err();
        assert_eq!(
            err,
            CatalogError::UnknownGateTech {
                tier: AscensionTier::K0_8,
                tech: TechId::from("test:ghost"),
            }
        );
    }

    #[test]
    fn missing_gate_rejected() {
        let gates: Vec<AscensionGateDef> = open_gates()
            .into_iter()
            .filter(|g| g.to_tier != AscensionTier::K2_3)
            .collect();
        let err = TechCatalog::new(vec![], gates).unwrap_err();
        assert_eq!(err, CatalogError::MissingGate(AscensionTier::K2_3));
    }

    #[test]
    fn prerequisite_closure_is_in_dependency_order() {
        let catalog = small_catalog();
        let ids: Vec<&str> = catalog
            .prerequisite_closure(&TechId::from("test:alloys"))
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["test:root", "test:smelting"]);
        assert!(catalog
            .prerequisite_closure(&TechId::from("test:root"))
            .is_empty());
        assert!(catalog
            .prerequisite_closure(&TechId::from("test:missing"))
            .is_empty());
    }

    #[test]
    fn definitions_deserialize_from_json() {
        let json = r#"{
            "id": "tech:ai-governor-systems",
            "name": "AI Governor Systems",
            "category": "energy_compute",
            "tier": "k1.5",
            "prerequisites": ["tech:planetwide-infrastructure"],
            "time_years": 5,
            "requires": { "compute": 8, "empire": { "planets_controlled": 3 } }
        }"#;
        let tech: TechDef = serde_json::from_str(json).unwrap();
        assert_eq!(tech.tier, AscensionTier::K1_5);
        assert_eq!(tech.category, ResearchCategory::EnergyCompute);
        assert_eq!(tech.required_compute(), Some(8));
        assert_eq!(tech.required_empire().unwrap().planets_controlled, Some(3));
        assert!(tech.description.is_none());
    }
}
