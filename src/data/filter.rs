use super::model::{CellValue, ListingsTable};

// ---------------------------------------------------------------------------
// Exact-match row selection
// ---------------------------------------------------------------------------

/// `column == value`, compared exactly. No ranges, no coercion between text
/// and numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: String,
    pub value: CellValue,
}

impl Predicate {
    pub fn eq(column: &str, value: CellValue) -> Self {
        Predicate {
            column: column.to_string(),
            value,
        }
    }

    pub fn text(column: &str, value: &str) -> Self {
        Self::eq(column, CellValue::Text(value.to_string()))
    }
}

/// Return indices of listings that satisfy every predicate.
///
/// A listing without the predicate's column never matches, so filtering on
/// an unknown column selects nothing.
pub fn filtered_indices(table: &ListingsTable, predicates: &[Predicate]) -> Vec<usize> {
    table
        .listings
        .iter()
        .enumerate()
        .filter(|(_, listing)| {
            predicates
                .iter()
                .all(|p| listing.get(&p.column) == Some(&p.value))
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema;
    use crate::data::test_support::sample_table;

    #[test]
    fn selects_exact_matches() {
        let table = sample_table();
        let london = filtered_indices(
            &table,
            &[Predicate::text(schema::SMART_LOCATION, "London, United Kingdom")],
        );
        assert_eq!(london, vec![0, 2, 3]);

        let london_nine = filtered_indices(
            &table,
            &[
                Predicate::text(schema::SMART_LOCATION, "London, United Kingdom"),
                Predicate::eq(schema::REVIEW_SCORES_VALUE, CellValue::Integer(9)),
            ],
        );
        assert_eq!(london_nine, vec![3]);
    }

    #[test]
    fn unknown_value_or_column_selects_nothing() {
        let table = sample_table();
        assert!(filtered_indices(&table, &[Predicate::text(schema::SMART_LOCATION, "Rome, Italy")])
            .is_empty());
        assert!(filtered_indices(&table, &[Predicate::text("Nope", "x")]).is_empty());
    }

    #[test]
    fn no_predicates_selects_everything() {
        let table = sample_table();
        assert_eq!(filtered_indices(&table, &[]), vec![0, 1, 2, 3]);
    }
}
