//! Turns parsed data into engine types.
//!
//! String references are resolved here so that a typo is reported against
//! the file it appears in. Graph-level checks (cycles, gate coverage) are
//! left to [`TechCatalog::new`].

use ascension_core::id::TechId;
use ascension_tech_tree::catalog::{AscensionGateDef, TechCatalog, TechDef, TechRequirements};
use ascension_tech_tree::state::ProgressionState;
use std::collections::HashMap;
use std::path::Path;

use crate::loader::{DataLoadError, check_duplicate, resolve_name};
use crate::schema::{GateData, StartingStateData, TechData};

/// Resolve technology and gate data into a validated catalog.
pub fn resolve_catalog(
    techs: Vec<TechData>,
    techs_file: &Path,
    gates: Vec<GateData>,
    gates_file: &Path,
) -> Result<TechCatalog, DataLoadError> {
    let mut ids: HashMap<String, TechId> = HashMap::with_capacity(techs.len());
    for tech in &techs {
        check_duplicate(&ids, &tech.id, techs_file)?;
        ids.insert(tech.id.clone(), TechId::new(tech.id.clone()));
    }

    let tech_defs = techs
        .into_iter()
        .map(|tech| {
            let prerequisites = tech
                .prerequisites
                .iter()
                .map(|p| resolve_name(&ids, p, techs_file, "technology").cloned())
                .collect::<Result<Vec<_>, DataLoadError>>()?;
            Ok(TechDef {
                id: TechId::new(tech.id),
                name: tech.name,
                description: tech.description,
                category: tech.category,
                tier: tech.tier,
                prerequisites,
                time_years: tech.time_years,
                requires: tech.requires.map(|r| TechRequirements {
                    compute: r.compute,
                    empire: r.empire,
                }),
            })
        })
        .collect::<Result<Vec<_>, DataLoadError>>()?;

    let gate_defs = gates
        .into_iter()
        .map(|gate| {
            let requires_tech = gate
                .requires_tech
                .iter()
                .map(|t| resolve_name(&ids, t, gates_file, "technology").cloned())
                .collect::<Result<Vec<_>, DataLoadError>>()?;
            Ok(AscensionGateDef {
                to_tier: gate.to_tier,
                requires_tech,
                requires_compute: gate.requires_compute,
                requires_empire: gate.requires_empire,
            })
        })
        .collect::<Result<Vec<_>, DataLoadError>>()?;

    Ok(TechCatalog::new(tech_defs, gate_defs)?)
}

/// Build the state a new player starts with.
///
/// Listed technologies are granted without checking prerequisites. The
/// grant events are discarded: a starting state has no history.
pub fn resolve_starting_state(
    data: &StartingStateData,
    catalog: &TechCatalog,
    file: &Path,
) -> Result<ProgressionState, DataLoadError> {
    let mut state =
        ProgressionState::starting_at(data.tier, data.compute_level, data.empire.clone());
    for id in &data.completed {
        state
            .grant_tech(catalog, &TechId::new(id.clone()), 0)
            .map_err(|source| DataLoadError::StartingState {
                file: file.to_path_buf(),
                source,
            })?;
    }
    state.drain_events();
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RequiresData;
    use ascension_core::empire::EmpireState;
    use ascension_core::tier::AscensionTier;
    use ascension_tech_tree::catalog::ResearchCategory;
    use ascension_tech_tree::research::ProgressionError;

    fn tech(id: &str, prereqs: &[&str]) -> TechData {
        TechData {
            id: id.to_string(),
            name: id.to_string(),
            description: None,
            category: ResearchCategory::EnergyCompute,
            tier: AscensionTier::K0_6,
            prerequisites: prereqs.iter().map(|p| p.to_string()).collect(),
            time_years: 1,
            requires: None,
        }
    }

    fn open_gates() -> Vec<GateData> {
        AscensionTier::ALL
            .into_iter()
            .skip(1)
            .map(|tier| GateData {
                to_tier: tier,
                requires_tech: Vec::new(),
                requires_compute: 0,
                requires_empire: None,
            })
            .collect()
    }

    fn catalog() -> TechCatalog {
        resolve_catalog(
            vec![tech("tech:a", &[]), tech("tech:b", &["tech:a"])],
            Path::new("technologies.ron"),
            open_gates(),
            Path::new("ascension_gates.ron"),
        )
        .unwrap()
    }

    #[test]
    fn resolves_prerequisites_and_requirements() {
        let mut b = tech("tech:b", &["tech:a"]);
        b.requires = Some(RequiresData {
            compute: Some(4),
            empire: None,
        });
        let catalog = resolve_catalog(
            vec![tech("tech:a", &[]), b],
            Path::new("technologies.ron"),
            open_gates(),
            Path::new("ascension_gates.ron"),
        )
        .unwrap();

        let b = catalog.tech(&TechId::from("tech:b")).unwrap();
        assert_eq!(b.prerequisites, vec![TechId::from("tech:a")]);
        assert_eq!(b.required_compute(), Some(4));
    }

    #[test]
    fn duplicate_tech_is_reported_against_file() {
        let err = resolve_catalog(
            vec![tech("tech:a", &[]), tech("tech:a", &[])],
            Path::new("technologies.ron"),
            open_gates(),
            Path::new("ascension_gates.ron"),
        )
        .unwrap_err();
        assert!(matches!(err, DataLoadError::DuplicateName { ref name, .. } if name == "tech:a"));
    }

    #[test]
    fn unknown_gate_tech_is_reported_against_gates_file() {
        let mut gates = open_gates();
        gates[0].requires_tech.push("tech:ghost".to_string());
        let err = resolve_catalog(
            vec![tech("tech:a", &[])],
            Path::new("technologies.ron"),
            gates,
            Path::new("ascension_gates.ron"),
        )
        .unwrap_err();
        match err {
            DataLoadError::UnresolvedRef { file, name, .. } => {
                assert_eq!(file, Path::new("ascension_gates.ron"));
                assert_eq!(name, "tech:ghost");
            }
            other => panic!("expected UnresolvedRef, got {other:?}"),
        }
    }

    #[test]
    fn starting_state_grants_without_events() {
        let catalog = catalog();
        let data = StartingStateData {
            tier: AscensionTier::K0_8,
            compute_level: 5,
            empire: EmpireState::default(),
            completed: vec!["tech:b".to_string()],
        };
        let state = resolve_starting_state(&data, &catalog, Path::new("starting_state.ron")).unwrap();
        assert_eq!(state.ascension_tier_reached(), AscensionTier::K0_8);
        assert!(state.completed_tech_ids().contains(&TechId::from("tech:b")));
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn starting_state_rejects_repeated_tech() {
        let catalog = catalog();
        let data = StartingStateData {
            completed: vec!["tech:a".to_string(), "tech:a".to_string()],
            ..Default::default()
        };
        let err =
            resolve_starting_state(&data, &catalog, Path::new("starting_state.ron")).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::StartingState {
                source: ProgressionError::AlreadyCompleted(_),
                ..
            }
        ));
    }
}
