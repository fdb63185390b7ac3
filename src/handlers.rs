//! The four chart update handlers.
//!
//! Each handler is a pure function of the shared table and the current
//! widget values. None of them validates its input: a value that is not in
//! the table simply selects no rows and yields an empty chart.

use std::collections::HashMap;

use crate::color::ColorMap;
use crate::data::filter::{filtered_indices, Predicate};
use crate::data::model::{CellValue, ListingsTable};
use crate::data::schema;
use crate::figure::{
    FigureLayout, HistogramBar, HistogramFigure, MapFigure, MapPoint, PieFigure, PieSlice,
    ScatterFigure, ScatterPoint, Trace, DEFAULT_HEIGHT, TALL_HEIGHT,
};

/// Transition used by every chart that animates between updates.
const TRANSITION_MS: u32 = 1;

// ---------------------------------------------------------------------------
// Map
// ---------------------------------------------------------------------------

/// Listings at `location` placed by latitude/longitude, sized by price and
/// coloured by property type.
pub fn map_figure(table: &ListingsTable, location: &str) -> MapFigure {
    let rows = filtered_indices(table, &[Predicate::text(schema::SMART_LOCATION, location)]);

    let mut groups = Grouping::default();
    for row in rows {
        let (Some(lat), Some(lon)) = (number(table, row, schema::LATITUDE), number(table, row, schema::LONGITUDE)) else {
            continue;
        };
        let price = table.value(row, schema::PRICE);
        let point = MapPoint {
            row,
            lat,
            lon,
            size: price.and_then(CellValue::as_f64).unwrap_or(0.0),
            hover_name: label(table, row, schema::SMART_LOCATION),
            hover_data: vec![
                (
                    schema::NEIGHBOURHOOD_CLEANSED.to_string(),
                    label(table, row, schema::NEIGHBOURHOOD_CLEANSED),
                ),
                (schema::PRICE.to_string(), label(table, row, schema::PRICE)),
            ],
        };
        groups.push(label(table, row, schema::PROPERTY_TYPE), point);
    }

    MapFigure {
        layout: FigureLayout {
            title: format!("Map: {location}"),
            height: TALL_HEIGHT,
            transition_ms: None,
        },
        traces: groups.into_traces(),
    }
}

// ---------------------------------------------------------------------------
// Pie
// ---------------------------------------------------------------------------

/// Frequency of every distinct value of `column` across the whole table.
/// Missing values get their own `nan` slice; largest slice first.
pub fn pie_figure(table: &ListingsTable, column: &str) -> PieFigure {
    // Stable sort: equal counts keep their first-appearance order.
    let mut counts = table.value_counts(column);
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let labels: Vec<String> = counts.iter().map(|(v, _)| v.to_string()).collect();
    let colors = ColorMap::new(&labels);
    let slices = labels
        .into_iter()
        .zip(counts)
        .map(|(label, (_, count))| PieSlice {
            color: colors.color_for(&label),
            label,
            count,
        })
        .collect();

    PieFigure {
        layout: FigureLayout {
            title: format!("Pie Chart: {column}"),
            height: DEFAULT_HEIGHT,
            transition_ms: Some(TRANSITION_MS),
        },
        slices,
    }
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

/// `x_column` against price for listings whose review score is exactly
/// `rating`, coloured by city.
pub fn scatter_figure(table: &ListingsTable, x_column: &str, rating: i64) -> ScatterFigure {
    let rows = filtered_indices(
        table,
        &[Predicate::eq(schema::REVIEW_SCORES_VALUE, CellValue::Integer(rating))],
    );

    let mut groups = Grouping::default();
    for row in rows {
        let (Some(x), Some(y)) = (number(table, row, x_column), number(table, row, schema::PRICE)) else {
            continue;
        };
        let point = ScatterPoint {
            row,
            x,
            y,
            hover_name: label(table, row, schema::PROPERTY_TYPE),
        };
        groups.push(label(table, row, schema::CITY), point);
    }

    ScatterFigure {
        layout: FigureLayout {
            title: format!("Scatter plot -  Rating: {rating}"),
            height: TALL_HEIGHT,
            transition_ms: Some(TRANSITION_MS),
        },
        x_label: x_column.to_string(),
        y_label: schema::PRICE.to_string(),
        traces: groups.into_traces(),
    }
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Summed price per `x_column` value for listings at `location`, one bar
/// group per room type.
pub fn histogram_figure(table: &ListingsTable, x_column: &str, location: &str) -> HistogramFigure {
    let rows = filtered_indices(table, &[Predicate::text(schema::SMART_LOCATION, location)]);

    let mut categories: Vec<String> = Vec::new();
    let mut category_slots: HashMap<String, usize> = HashMap::new();
    // Per room type: category index → (sum, rows).
    let mut groups: Grouping<(usize, f64, Vec<usize>)> = Grouping::default();

    for row in rows {
        let x = match table.value(row, x_column) {
            Some(v) if !v.is_null() => v.to_string(),
            _ => continue,
        };
        let category = *category_slots.entry(x.clone()).or_insert_with(|| {
            categories.push(x);
            categories.len() - 1
        });
        let price = number(table, row, schema::PRICE).unwrap_or(0.0);

        let bars = groups.entry(label(table, row, schema::ROOM_TYPE));
        match bars.iter_mut().find(|(c, _, _)| *c == category) {
            Some((_, sum, members)) => {
                *sum += price;
                members.push(row);
            }
            None => bars.push((category, price, vec![row])),
        }
    }

    let traces = groups
        .into_traces()
        .into_iter()
        .map(|t| Trace {
            name: t.name,
            color: t.color,
            points: t
                .points
                .into_iter()
                .map(|(category, value, rows)| HistogramBar {
                    category,
                    value,
                    rows,
                })
                .collect(),
        })
        .collect();

    HistogramFigure {
        layout: FigureLayout {
            title: format!("Histogram: {location}"),
            height: TALL_HEIGHT,
            transition_ms: Some(TRANSITION_MS),
        },
        x_label: x_column.to_string(),
        y_label: format!("sum of {}", schema::PRICE),
        categories,
        traces,
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn number(table: &ListingsTable, row: usize, column: &str) -> Option<f64> {
    table.value(row, column).and_then(CellValue::as_f64)
}

fn label(table: &ListingsTable, row: usize, column: &str) -> String {
    table
        .value(row, column)
        .map(|v| v.to_string())
        .unwrap_or_else(|| CellValue::Null.to_string())
}

/// Items grouped by label, groups kept in order of first appearance.
struct Grouping<P> {
    names: Vec<String>,
    items: Vec<Vec<P>>,
}

impl<P> Default for Grouping<P> {
    fn default() -> Self {
        Grouping {
            names: Vec::new(),
            items: Vec::new(),
        }
    }
}

impl<P> Grouping<P> {
    fn entry(&mut self, name: String) -> &mut Vec<P> {
        let idx = match self.names.iter().position(|n| *n == name) {
            Some(idx) => idx,
            None => {
                self.names.push(name);
                self.items.push(Vec::new());
                self.items.len() - 1
            }
        };
        &mut self.items[idx]
    }

    fn push(&mut self, name: String, item: P) {
        self.entry(name).push(item);
    }

    fn into_traces(self) -> Vec<Trace<P>> {
        let colors = ColorMap::new(&self.names);
        self.names
            .into_iter()
            .zip(self.items)
            .map(|(name, points)| Trace {
                color: colors.color_for(&name),
                name,
                points,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_csv_reader;
    use crate::data::test_support::{sample_table, two_city_csv};

    const LONDON: &str = "London, United Kingdom";

    #[test]
    fn map_only_contains_rows_at_the_location() {
        let table = sample_table();
        let fig = map_figure(&table, LONDON);
        assert_eq!(fig.layout.title, "Map: London, United Kingdom");
        assert_eq!(fig.point_count(), 3);
        for point in fig.traces.iter().flat_map(|t| &t.points) {
            assert_eq!(
                table.value(point.row, schema::SMART_LOCATION),
                Some(&CellValue::Text(LONDON.into()))
            );
        }
    }

    #[test]
    fn map_colours_by_property_type_and_sizes_by_price() {
        let fig = map_figure(&sample_table(), LONDON);
        let names: Vec<_> = fig.traces.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Apartment", "House"]);
        let house = &fig.traces[1].points[0];
        assert_eq!(house.size, 210.0);
        assert_eq!(house.hover_name, LONDON);
        assert_eq!(
            house.hover_data,
            vec![
                ("Neighbourhood Cleansed".to_string(), "Hackney".to_string()),
                ("Price".to_string(), "210".to_string()),
            ]
        );
    }

    #[test]
    fn map_with_unknown_location_is_empty() {
        let fig = map_figure(&sample_table(), "Atlantis");
        assert!(fig.traces.is_empty());
        assert_eq!(fig.layout.title, "Map: Atlantis");
    }

    #[test]
    fn end_to_end_two_cities() {
        let table = load_csv_reader(two_city_csv().as_bytes()).unwrap();
        assert_eq!(table.value(0, schema::FEATURES_COUNT), Some(&CellValue::Integer(2)));

        let fig = map_figure(&table, LONDON);
        let rows: Vec<usize> = fig.traces.iter().flat_map(|t| &t.points).map(|p| p.row).collect();
        assert_eq!(rows, vec![0]);
    }

    #[test]
    fn pie_slices_cover_every_row() {
        let table = sample_table();
        for column in ["Property Type", "Room Type", "Neighbourhood Cleansed", "Features"] {
            let fig = pie_figure(&table, column);
            assert_eq!(fig.total(), table.len(), "{column}");
            assert_eq!(fig.slices.len(), table.distinct_values(column).len(), "{column}");
        }
    }

    #[test]
    fn pie_orders_slices_by_count() {
        let fig = pie_figure(&sample_table(), schema::PROPERTY_TYPE);
        let slices: Vec<_> = fig.slices.iter().map(|s| (s.label.as_str(), s.count)).collect();
        assert_eq!(slices, vec![("Apartment", 2), ("Loft", 1), ("House", 1)]);
        assert_eq!(fig.layout.title, "Pie Chart: Property Type");
        assert_eq!(fig.layout.transition_ms, Some(1));
    }

    #[test]
    fn pie_counts_missing_values_as_nan() {
        let fig = pie_figure(&sample_table(), schema::FEATURES);
        assert!(fig.slices.iter().any(|s| s.label == "nan" && s.count == 1));
    }

    #[test]
    fn pie_of_unknown_column_is_empty() {
        assert!(pie_figure(&sample_table(), "Nope").slices.is_empty());
    }

    #[test]
    fn scatter_matches_rating_exactly() {
        let table = sample_table();
        let fig = scatter_figure(&table, "Accommodates", 9);
        assert_eq!(fig.layout.title, "Scatter plot -  Rating: 9");
        let points: Vec<_> = fig.traces.iter().flat_map(|t| &t.points).collect();
        assert_eq!(points.len(), 2);
        for p in &points {
            assert_eq!(
                table.value(p.row, schema::REVIEW_SCORES_VALUE),
                Some(&CellValue::Integer(9))
            );
        }
        // 8 and 10 sit either side of 9 and are not included.
        assert!(points.iter().all(|p| p.row != 0 && p.row != 2));
    }

    #[test]
    fn scatter_colours_by_city_and_plots_price() {
        let fig = scatter_figure(&sample_table(), "Bedrooms", 9);
        assert_eq!(fig.x_label, "Bedrooms");
        assert_eq!(fig.y_label, "Price");
        let names: Vec<_> = fig.traces.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Paris", "London"]);
        let paris = &fig.traces[0].points[0];
        assert_eq!((paris.x, paris.y), (2.0, 120.0));
        assert_eq!(paris.hover_name, "Loft");
    }

    #[test]
    fn scatter_with_absent_rating_is_empty() {
        let fig = scatter_figure(&sample_table(), "Accommodates", 3);
        assert!(fig.traces.is_empty());
    }

    #[test]
    fn histogram_groups_by_room_type_within_location() {
        let table = sample_table();
        let fig = histogram_figure(&table, "Neighbourhood Cleansed", LONDON);
        assert_eq!(fig.layout.title, "Histogram: London, United Kingdom");
        assert_eq!(fig.categories, vec!["Lambeth", "Hackney"]);

        let names: Vec<_> = fig.traces.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Entire home/apt", "Private room"]);

        for trace in &fig.traces {
            for bar in &trace.points {
                for &row in &bar.rows {
                    assert_eq!(
                        table.value(row, schema::SMART_LOCATION),
                        Some(&CellValue::Text(LONDON.into()))
                    );
                    assert_eq!(
                        table.value(row, schema::ROOM_TYPE),
                        Some(&CellValue::Text(trace.name.clone()))
                    );
                }
            }
        }

        let entire = &fig.traces[0].points;
        assert_eq!(
            entire.iter().map(|b| (b.category, b.value)).collect::<Vec<_>>(),
            vec![(0, 85.0), (1, 210.0)]
        );
        let private = &fig.traces[1].points;
        assert_eq!(
            private.iter().map(|b| (b.category, b.value)).collect::<Vec<_>>(),
            vec![(0, 40.0)]
        );
    }

    #[test]
    fn histogram_sums_prices_in_the_same_bar() {
        let fig = histogram_figure(&sample_table(), "Property Type", LONDON);
        assert_eq!(fig.categories, vec!["Apartment", "House"]);
        let total: f64 = fig
            .traces
            .iter()
            .flat_map(|t| &t.points)
            .map(|b| b.value)
            .sum();
        assert_eq!(total, 85.0 + 210.0 + 40.0);
    }

    #[test]
    fn histogram_of_unknown_location_is_empty() {
        let fig = histogram_figure(&sample_table(), "Room Type", "Atlantis");
        assert!(fig.categories.is_empty());
        assert!(fig.traces.is_empty());
    }
}
