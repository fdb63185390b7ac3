use super::model::{CellValue, ColumnKind, ListingsTable};
use super::schema;

// ---------------------------------------------------------------------------
// Column classification
// ---------------------------------------------------------------------------

/// Numeric columns that can go on a continuous axis, in table order.
pub fn continuous_columns(table: &ListingsTable) -> Vec<String> {
    table
        .column_names
        .iter()
        .filter(|c| table.kind(c).is_some_and(ColumnKind::is_numeric))
        .filter(|c| !schema::CONTINUOUS_EXCLUDED.contains(&c.as_str()))
        .cloned()
        .collect()
}

/// Text columns that can be used as categories, in table order.
pub fn categorical_columns(table: &ListingsTable) -> Vec<String> {
    table
        .column_names
        .iter()
        .filter(|c| table.kind(c) == Some(ColumnKind::Text))
        .filter(|c| !schema::CATEGORICAL_EXCLUDED.contains(&c.as_str()))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Option catalog: every dropdown / slider option, computed once at load
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionCatalog {
    /// Distinct `Smart Location` values in order of first appearance.
    pub locations: Vec<String>,
    pub continuous: Vec<String>,
    pub categorical: Vec<String>,
    /// Distinct review scores in order of first appearance.
    pub ratings: Vec<i64>,
}

impl OptionCatalog {
    pub fn build(table: &ListingsTable) -> Self {
        let locations = table
            .distinct_values(schema::SMART_LOCATION)
            .into_iter()
            .filter(|v| !v.is_null())
            .map(|v| v.to_string())
            .collect();

        let ratings = table
            .distinct_values(schema::REVIEW_SCORES_VALUE)
            .into_iter()
            .filter_map(|v| match v {
                CellValue::Integer(i) => Some(i),
                _ => None,
            })
            .collect();

        OptionCatalog {
            locations,
            continuous: continuous_columns(table),
            categorical: categorical_columns(table),
            ratings,
        }
    }

    /// Lowest and highest review score, if any.
    pub fn rating_range(&self) -> Option<(i64, i64)> {
        let min = self.ratings.iter().min()?;
        let max = self.ratings.iter().max()?;
        Some((*min, *max))
    }
}

// ---------------------------------------------------------------------------
// Dataset – the read-only handle shared by every handler
// ---------------------------------------------------------------------------

/// A prepared table together with the options derived from it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub table: ListingsTable,
    pub catalog: OptionCatalog,
}

impl Dataset {
    pub fn new(table: ListingsTable) -> Self {
        let catalog = OptionCatalog::build(&table);
        Dataset { table, catalog }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::sample_table;

    #[test]
    fn continuous_columns_exclude_coordinates_only() {
        let table = sample_table();
        let continuous = continuous_columns(&table);
        assert_eq!(
            continuous,
            vec![
                "Accommodates",
                "Bathrooms",
                "Bedrooms",
                "Beds",
                "Price",
                "Number of Reviews",
                "Review Scores Value",
                "Features Count",
                "Amenities Count",
            ]
        );
        let numeric = table
            .column_names
            .iter()
            .filter(|c| table.kind(c).is_some_and(ColumnKind::is_numeric))
            .count();
        assert_eq!(numeric - continuous.len(), 2);
    }

    #[test]
    fn categorical_columns_exclude_the_free_text_ones() {
        let table = sample_table();
        let categorical = categorical_columns(&table);
        assert_eq!(
            categorical,
            vec![
                "Neighbourhood Cleansed",
                "Smart Location",
                "Property Type",
                "Room Type",
                "Cancellation Policy",
            ]
        );
        for excluded in schema::CATEGORICAL_EXCLUDED {
            assert!(table.has_column(excluded));
            assert!(!categorical.iter().any(|c| c == excluded));
        }
    }

    #[test]
    fn catalog_lists_locations_and_ratings_in_appearance_order() {
        let catalog = OptionCatalog::build(&sample_table());
        assert_eq!(
            catalog.locations,
            vec!["London, United Kingdom", "Paris, France"]
        );
        assert_eq!(catalog.ratings, vec![8, 9, 10]);
        assert_eq!(catalog.rating_range(), Some((8, 10)));
    }

    #[test]
    fn empty_catalog_has_no_rating_range() {
        assert_eq!(OptionCatalog::default().rating_range(), None);
    }
}
