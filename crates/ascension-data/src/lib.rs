//! Data-driven configuration for the progression engine.
//!
//! Technologies, ascension gates, and starting states are described in RON,
//! TOML, or JSON files and resolved into a validated
//! [`TechCatalog`](ascension_tech_tree::catalog::TechCatalog). The game's own
//! research tree is embedded and available through [`builtin_catalog`].

pub mod builtin;
pub mod loader;
pub mod resolve;
pub mod schema;

pub use builtin::builtin_catalog;
pub use loader::{DataLoadError, ProgressionData, load_progression_data};
