//! Builders for small catalogs and states used by unit and integration tests.

use ascension_core::empire::{EmpireRequirement, EmpireState, IntelLevel};
use ascension_core::id::TechId;
use ascension_core::tier::AscensionTier;

use crate::catalog::{AscensionGateDef, ResearchCategory, TechCatalog, TechDef, TechRequirements};

/// A tech with no extra requirements.
pub fn tech(id: &str, tier: AscensionTier, prerequisites: &[&str]) -> TechDef {
    TechDef {
        id: TechId::from(id),
        name: id.trim_start_matches("test:").to_string(),
        description: None,
        category: ResearchCategory::EconomyIndustry,
        tier,
        prerequisites: prerequisites.iter().map(|p| TechId::from(*p)).collect(),
        time_years: 1,
        requires: None,
    }
}

/// Attach a compute and/or empire requirement to a tech.
pub fn with_requires(
    mut def: TechDef,
    compute: Option<u32>,
    empire: Option<EmpireRequirement>,
) -> TechDef {
    def.requires = Some(TechRequirements { compute, empire });
    def
}

pub fn gate(to_tier: AscensionTier, techs: &[&str], compute: u32) -> AscensionGateDef {
    AscensionGateDef {
        to_tier,
        requires_tech: techs.iter().map(|t| TechId::from(*t)).collect(),
        requires_compute: compute,
        requires_empire: None,
    }
}

/// One requirement-free gate for every tier after the first.
pub fn open_gates() -> Vec<AscensionGateDef> {
    AscensionTier::ALL
        .into_iter()
        .skip(1)
        .map(|tier| gate(tier, &[], 0))
        .collect()
}

pub fn empire(planets: u32, majority: bool, intel: IntelLevel) -> EmpireState {
    EmpireState {
        planets_controlled: planets,
        home_system_majority: majority,
        intel_level: intel,
    }
}

/// A two-tier tree exercising every kind of lock reason:
///
/// ```text
/// k0.6: root -> smelting, root -> probes
/// k0.8: smelting -> alloys (compute 3)
///       smelting + probes -> survey (2 planets, home majority, medium intel)
/// k1.0: alloys -> fleet
/// gate k0.8: smelting + probes, compute 2
/// gate k1.0: alloys, compute 4, 3 planets
/// ```
pub fn small_catalog() -> TechCatalog {
    let techs = vec![
        tech("test:root", AscensionTier::K0_6, &[]),
        TechDef {
            name: "Smelting".to_string(),
            ..tech("test:smelting", AscensionTier::K0_6, &["test:root"])
        },
        TechDef {
            category: ResearchCategory::ExplorationNavigation,
            description: Some("Cheap scout probes.".to_string()),
            ..tech("test:probes", AscensionTier::K0_6, &["test:root"])
        },
        with_requires(
            tech("test:alloys", AscensionTier::K0_8, &["test:smelting"]),
            Some(3),
            None,
        ),
        with_requires(
            tech(
                "test:survey",
                AscensionTier::K0_8,
                &["test:smelting", "test:probes"],
            ),
            None,
            Some(EmpireRequirement {
                planets_controlled: Some(2),
                home_system_majority: true,
                intel_level: Some(IntelLevel::Medium),
            }),
        ),
        TechDef {
            category: ResearchCategory::MilitaryDefense,
            ..tech("test:fleet", AscensionTier::K1_0, &["test:alloys"])
        },
    ];

    let mut gates = open_gates();
    gates[0] = gate(AscensionTier::K0_8, &["test:smelting", "test:probes"], 2);
    gates[1] = AscensionGateDef {
        requires_empire: Some(EmpireRequirement {
            planets_controlled: Some(3),
            ..Default::default()
        }),
        ..gate(AscensionTier::K1_0, &["test:alloys"], 4)
    };

    match TechCatalog::new(techs, gates) {
        Ok(catalog) => catalog,
        Err(e) => panic!("test catalog is invalid: {e}"),
    }
}
