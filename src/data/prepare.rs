use super::error::DatasetError;
use super::model::{CellValue, ColumnKind, ListingsTable};
use super::schema;

/// Turn a freshly read table into the one the dashboard works with:
/// check the schema, derive the count columns, drop the index artifact and
/// make the review score an integer.
pub fn prepare(mut table: ListingsTable) -> Result<ListingsTable, DatasetError> {
    if let Some(missing) = schema::REQUIRED_COLUMNS
        .iter()
        .find(|c| !table.has_column(c))
    {
        return Err(DatasetError::MissingColumn(missing.to_string()));
    }

    let features = token_counts(&table, schema::FEATURES);
    table.push_column(schema::FEATURES_COUNT, features);
    let amenities = token_counts(&table, schema::AMENITIES);
    table.push_column(schema::AMENITIES_COUNT, amenities);

    for artifact in schema::INDEX_ARTIFACTS {
        if table.drop_column(artifact) {
            log::debug!("dropped index column '{artifact}'");
        }
    }

    let ratings = integer_ratings(&table)?;
    table.replace_column(schema::REVIEW_SCORES_VALUE, ColumnKind::Integer, ratings);

    Ok(table)
}

/// Number of comma-separated tokens in a cell's text. A missing cell reads
/// as the single token `nan`.
pub fn token_count(value: &CellValue) -> i64 {
    value.to_string().split(',').count() as i64
}

fn token_counts(table: &ListingsTable, column: &str) -> Vec<CellValue> {
    table
        .column_values(column)
        .map(|v| CellValue::Integer(token_count(v)))
        .collect()
}

/// Ratings truncated toward zero, like an integer cast of a float column.
fn integer_ratings(table: &ListingsTable) -> Result<Vec<CellValue>, DatasetError> {
    let column = schema::REVIEW_SCORES_VALUE;
    table
        .column_values(column)
        .enumerate()
        .map(|(row, value)| match value {
            CellValue::Integer(i) => Ok(CellValue::Integer(*i)),
            CellValue::Float(f) if f.is_finite() => Ok(CellValue::Integer(f.trunc() as i64)),
            CellValue::Bool(b) => Ok(CellValue::Integer(*b as i64)),
            CellValue::Null | CellValue::Float(_) => Err(DatasetError::MissingRating {
                row,
                column: column.to_string(),
            }),
            CellValue::Text(s) => Err(DatasetError::NonNumericRating {
                row,
                column: column.to_string(),
                value: s.clone(),
            }),
        })
        .collect()
}
