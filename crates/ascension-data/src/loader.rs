//! Loading pipeline: finds data files, parses them, and hands the result to
//! [`crate::resolve`].
//!
//! A data directory holds `technologies` and `ascension_gates` (required) and
//! `starting_state` (optional), each as exactly one of `.ron`, `.toml`, or
//! `.json`.

use ascension_tech_tree::catalog::{CatalogError, TechCatalog};
use ascension_tech_tree::research::ProgressionError;
use ascension_tech_tree::state::ProgressionState;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::resolve::{resolve_catalog, resolve_starting_state};
use crate::schema::{GateData, StartingStateData, TechData};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// A required data file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A technology reference could not be resolved.
    #[error("unresolved {expected_kind} reference '{name}' in {file}")]
    UnresolvedRef {
        file: PathBuf,
        name: String,
        expected_kind: &'static str,
    },

    /// A duplicate id was found.
    #[error("duplicate name '{name}' in {file}")]
    DuplicateName { file: PathBuf, name: String },

    /// The definitions parsed but do not form a valid catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The starting state could not be applied to the catalog.
    #[error("invalid starting state in {file}: {source}")]
    StartingState {
        file: PathBuf,
        #[source]
        source: ProgressionError,
    },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a data file with the given base name (without extension).
///
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// multiple formats exist for the same base name.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut found: Option<PathBuf> = None;

    for ext in ["ron", "toml", "json"] {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing,
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

/// Like [`find_data_file`], but returns an error if no file is found.
pub fn require_data_file(dir: &Path, base_name: &str) -> Result<PathBuf, DataLoadError> {
    find_data_file(dir, base_name)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: base_name.to_string(),
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Deserialize `content` in the given format. `file` is only used for error
/// reporting, so embedded data can pass a descriptive label.
pub fn deserialize_str<T: DeserializeOwned>(
    content: &str,
    format: Format,
    file: &Path,
) -> Result<T, DataLoadError> {
    let parse_err = |detail: String| DataLoadError::Parse {
        file: file.to_path_buf(),
        detail,
    };
    match format {
        Format::Ron => ron::from_str(content).map_err(|e| parse_err(e.to_string())),
        Format::Json => serde_json::from_str(content).map_err(|e| parse_err(e.to_string())),
        Format::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string())),
    }
}

/// Read a file and deserialize it according to its format (detected from extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    deserialize_str(&content, format, path)
}

/// Deserialize a list from a file. For TOML files, extracts the array at the
/// given `toml_key` from a top-level table. For RON and JSON, deserializes
/// directly as `Vec<T>`.
pub fn deserialize_list<T: DeserializeOwned>(
    path: &Path,
    toml_key: &str,
) -> Result<Vec<T>, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    if format != Format::Toml {
        return deserialize_str(&content, format, path);
    }

    let mut table: toml::Table = deserialize_str(&content, format, path)?;
    let array = table.remove(toml_key).ok_or_else(|| DataLoadError::Parse {
        file: path.to_path_buf(),
        detail: format!("missing key '{toml_key}' in TOML file"),
    })?;
    array
        .try_into()
        .map_err(|e: toml::de::Error| DataLoadError::Parse {
            file: path.to_path_buf(),
            detail: e.to_string(),
        })
}

// ===========================================================================
// Name resolution helpers
// ===========================================================================

/// Look up a name in a map, returning an `UnresolvedRef` error if not found.
pub fn resolve_name<'a, V>(
    map: &'a HashMap<String, V>,
    name: &str,
    file: &Path,
    expected_kind: &'static str,
) -> Result<&'a V, DataLoadError> {
    map.get(name).ok_or_else(|| DataLoadError::UnresolvedRef {
        file: file.to_path_buf(),
        name: name.to_string(),
        expected_kind,
    })
}

/// Check whether a name already exists in a map, returning a `DuplicateName`
/// error if so.
pub fn check_duplicate<V>(
    map: &HashMap<String, V>,
    name: &str,
    file: &Path,
) -> Result<(), DataLoadError> {
    if map.contains_key(name) {
        Err(DataLoadError::DuplicateName {
            file: file.to_path_buf(),
            name: name.to_string(),
        })
    } else {
        Ok(())
    }
}

// ===========================================================================
// Top-level loading
// ===========================================================================

/// A validated catalog plus the state new players start from.
#[derive(Debug, Clone)]
pub struct ProgressionData {
    pub catalog: TechCatalog,
    pub starting_state: ProgressionState,
}

/// Load a catalog and starting state from a data directory.
///
/// Without a `starting_state` file, new players start fresh at the first
/// tier.
pub fn load_progression_data(dir: &Path) -> Result<ProgressionData, DataLoadError> {
    let techs_path = require_data_file(dir, "technologies")?;
    let techs: Vec<TechData> = deserialize_list(&techs_path, "technologies")?;

    let gates_path = require_data_file(dir, "ascension_gates")?;
    let gates: Vec<GateData> = deserialize_list(&gates_path, "gates")?;

    let catalog = resolve_catalog(techs, &techs_path, gates, &gates_path)?;

    let starting_state = match find_data_file(dir, "starting_state")? {
        Some(path) => {
            let data: StartingStateData = deserialize_file(&path)?;
            resolve_starting_state(&data, &catalog, &path)?
        }
        None => ProgressionState::new(),
    };

    tracing::info!(
        dir = %dir.display(),
        techs = catalog.len(),
        starting_tier = %starting_state.ascension_tier_reached(),
        "progression data loaded"
    );

    Ok(ProgressionData {
        catalog,
        starting_state,
    })
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ascension_core::id::TechId;
    use ascension_core::tier::AscensionTier;
    use std::fs;

    /// Create a temporary directory with a unique name for test isolation.
    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "ascension_data_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Clean up a test directory.
    fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
    }

    const TECHS_RON: &str = r#"[
        (id: "tech:root", name: "Root", category: energy_compute, tier: "k0.6", time_years: 1),
        (id: "tech:next", name: "Next", category: economy_industry, tier: "k0.6",
         prerequisites: ["tech:root"], time_years: 2),
    ]"#;

    /// One requirement-free gate for every tier after the first.
    const OPEN_GATES_JSON: &str = r#"[
        {"to_tier": "k0.8", "requires_tech": ["tech:next"], "requires_compute": 1},
        {"to_tier": "k1.0"},
        {"to_tier": "k1.5"},
        {"to_tier": "k2.0"},
        {"to_tier": "k2.3"},
        {"to_tier": "k3.0"}
    ]"#;

    fn write_catalog(dir: &Path) {
        fs::write(dir.join("technologies.ron"), TECHS_RON).unwrap();
        fs::write(dir.join("ascension_gates.json"), OPEN_GATES_JSON).unwrap();
    }

    // -----------------------------------------------------------------------
    // detect_format / find_data_file
    // -----------------------------------------------------------------------

    #[test]
    fn detect_format_by_extension() {
        assert_eq!(detect_format(Path::new("a.ron")).unwrap(), Format::Ron);
        assert_eq!(detect_format(Path::new("a.toml")).unwrap(), Format::Toml);
        assert_eq!(detect_format(Path::new("a.json")).unwrap(), Format::Json);
        assert!(matches!(
            detect_format(Path::new("a.yaml")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            detect_format(Path::new("technologies")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn find_data_file_found_and_missing() {
        let dir = make_test_dir("find");
        assert_eq!(find_data_file(&dir, "technologies").unwrap(), None);

        fs::write(dir.join("technologies.toml"), "").unwrap();
        assert_eq!(
            find_data_file(&dir, "technologies").unwrap(),
            Some(dir.join("technologies.toml"))
        );

        cleanup(&dir);
    }

    #[test]
    fn find_data_file_conflict() {
        let dir = make_test_dir("conflict");
        fs::write(dir.join("technologies.ron"), "[]").unwrap();
        fs::write(dir.join("technologies.json"), "[]").unwrap();

        let result = find_data_file(&dir, "technologies");
        assert!(matches!(
            result,
            Err(DataLoadError::ConflictingFormats { .. })
        ));

        cleanup(&dir);
    }

    #[test]
    fn require_data_file_missing() {
        let dir = make_test_dir("require_missing");

        let err = require_data_file(&dir, "ascension_gates").unwrap_err();
        assert!(matches!(err, DataLoadError::MissingRequired { ref file, .. } if file == "ascension_gates"));

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // deserialize_list
    // -----------------------------------------------------------------------

    #[test]
    fn deserialize_list_toml_uses_key() {
        let dir = make_test_dir("list_toml");
        let path = dir.join("technologies.toml");
        fs::write(
            &path,
            r#"
[[technologies]]
id = "tech:root"
name = "Root"
category = "energy_compute"
tier = "k0.6"
time_years = 1
"#,
        )
        .unwrap();

        let techs: Vec<TechData> = deserialize_list(&path, "technologies").unwrap();
        assert_eq!(techs.len(), 1);
        assert_eq!(techs[0].id, "tech:root");

        let err = deserialize_list::<TechData>(&path, "techs").unwrap_err();
        assert!(err.to_string().contains("missing key 'techs'"));

        cleanup(&dir);
    }

    #[test]
    fn deserialize_list_reports_parse_errors() {
        let dir = make_test_dir("list_bad");
        let path = dir.join("technologies.json");
        fs::write(&path, "[{").unwrap();

        let err = deserialize_list::<TechData>(&path, "technologies").unwrap_err();
        assert!(matches!(err, DataLoadError::Parse { ref file, .. } if file == &path));

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // load_progression_data
    // -----------------------------------------------------------------------

    #[test]
    fn load_without_starting_state() {
        let dir = make_test_dir("load_fresh");
        write_catalog(&dir);

        let data = load_progression_data(&dir).unwrap();
        assert_eq!(data.catalog.len(), 2);
        assert_eq!(data.catalog.gates().len(), 6);
        assert_eq!(data.starting_state, ProgressionState::new());

        cleanup(&dir);
    }

    #[test]
    fn load_with_starting_state() {
        let dir = make_test_dir("load_seeded");
        write_catalog(&dir);
        fs::write(
            dir.join("starting_state.toml"),
            r#"
tier = "k0.8"
compute_level = 5
completed = ["tech:root", "tech:next"]

[empire]
planets_controlled = 2
"#,
        )
        .unwrap();

        let data = load_progression_data(&dir).unwrap();
        let state = &data.starting_state;
        assert_eq!(state.ascension_tier_reached(), AscensionTier::K0_8);
        assert_eq!(state.compute_level(), 5);
        assert_eq!(state.empire_state().planets_controlled, 2);
        assert!(state.completed_tech_ids().contains(&TechId::from("tech:next")));
        assert!(state.pending_events().is_empty());

        cleanup(&dir);
    }

    #[test]
    fn missing_gates_file_is_fatal() {
        let dir = make_test_dir("load_no_gates");
        fs::write(dir.join("technologies.ron"), TECHS_RON).unwrap();

        let err = load_progression_data(&dir).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingRequired { .. }));

        cleanup(&dir);
    }

    #[test]
    fn unknown_prerequisite_is_reported_with_file() {
        let dir = make_test_dir("load_unresolved");
        fs::write(
            dir.join("technologies.json"),
            r#"[{"id": "tech:a", "name": "A", "category": "energy_compute",
                 "tier": "k0.6", "prerequisites": ["tech:ghost"], "time_years": 1}]"#,
        )
        .unwrap();
        fs::write(dir.join("ascension_gates.json"), OPEN_GATES_JSON.replace("tech:next", "tech:a"))
            .unwrap();

        let err = load_progression_data(&dir).unwrap_err();
        match err {
            DataLoadError::UnresolvedRef { name, file, .. } => {
                assert_eq!(name, "tech:ghost");
                assert_eq!(file, dir.join("technologies.json"));
            }
            other => panic!("expected UnresolvedRef, got {other:?}"),
        }

        cleanup(&dir);
    }

    #[test]
    fn prerequisite_cycle_surfaces_catalog_error() {
        let dir = make_test_dir("load_cycle");
        fs::write(
            dir.join("technologies.ron"),
            r#"[
                (id: "tech:a", name: "A", category: energy_compute, tier: "k0.6",
                 prerequisites: ["tech:b"], time_years: 1),
                (id: "tech:b", name: "B", category: energy_compute, tier: "k0.6",
                 prerequisites: ["tech:a"], time_years: 1),
            ]"#,
        )
        .unwrap();
        fs::write(dir.join("ascension_gates.json"), OPEN_GATES_JSON.replace("tech:next", "tech:a"))
            .unwrap();

        let err = load_progression_data(&dir).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::Catalog(CatalogError::PrerequisiteCycle(_))
        ));

        cleanup(&dir);
    }

    #[test]
    fn starting_state_with_unknown_tech_is_rejected() {
        let dir = make_test_dir("load_bad_seed");
        write_catalog(&dir);
        fs::write(
            dir.join("starting_state.json"),
            r#"{"completed": ["tech:ghost"]}"#,
        )
        .unwrap();

        let err = load_progression_data(&dir).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::StartingState {
                source: ProgressionError::TechNotFound(_),
                ..
            }
        ));

        cleanup(&dir);
    }
}
