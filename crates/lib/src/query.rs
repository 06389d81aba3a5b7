//! # Search Query Construction

use crate::{constants::QUERY_SUFFIX, types::AssetQuery};
use tracing::info;

/// Builds the web search query for an asset.
///
/// Joins the non-empty values of model number, classification and
/// manufacturer, in that order, and appends `specifications`.
pub fn build_search_query(asset: &AssetQuery) -> String {
    let query = [
        asset.model_number(),
        asset.classification_name(),
        asset.manufacturer(),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .chain(std::iter::once(QUERY_SUFFIX))
    .collect::<Vec<_>>()
    .join(" ");

    info!("Built search query: {query}");
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_all_fields_in_order() {
        let asset = AssetQuery::new("MRN85HD", "Generator (Marine)", Some("Cummins")).unwrap();
        assert_eq!(
            build_search_query(&asset),
            "MRN85HD Generator (Marine) Cummins specifications"
        );
    }

    #[test]
    fn skips_missing_manufacturer() {
        let asset = AssetQuery::new("336", "Excavator", Some("  ")).unwrap();
        assert_eq!(build_search_query(&asset), "336 Excavator specifications");
    }
}
