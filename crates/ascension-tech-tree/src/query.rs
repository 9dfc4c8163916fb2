//! Stateless views over the catalog for research screens.
//!
//! These replace cached, reactive groupings with plain functions: callers
//! recompute them whenever they redraw, which is cheap at catalog scale.

use ascension_core::tier::AscensionTier;

use crate::catalog::{TechCatalog, TechDef};

impl TechCatalog {
    /// Every tier with its techs in catalog order. Tiers without techs are
    /// still listed.
    pub fn grouped_by_tier(&self) -> Vec<(AscensionTier, Vec<&TechDef>)> {
        AscensionTier::ALL
            .into_iter()
            .map(|tier| (tier, self.techs_by_tier(tier)))
            .collect()
    }

    /// Techs whose name, description, or category key contains `query`,
    /// ignoring case. A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<&TechDef> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.techs().iter().collect();
        }
        self.techs()
            .iter()
            .filter(|t| matches_query(t, &query))
            .collect()
    }

    /// [`search`](Self::search) results grouped by tier. Tiers with no
    /// match are omitted.
    pub fn search_grouped_by_tier(&self, query: &str) -> Vec<(AscensionTier, Vec<&TechDef>)> {
        let hits = self.search(query);
        AscensionTier::ALL
            .into_iter()
            .filter_map(|tier| {
                let techs: Vec<&TechDef> = hits.iter().copied().filter(|t| t.tier == tier).collect();
                (!techs.is_empty()).then_some((tier, techs))
            })
            .collect()
    }
}

fn matches_query(tech: &TechDef, lowered: &str) -> bool {
    tech.name.to_lowercase().contains(lowered)
        || tech
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(lowered))
        || tech.category.as_str().contains(lowered)
}
