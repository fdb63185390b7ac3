use std::collections::BTreeMap;
use std::fmt;

use crate::data::model::ListingsTable;
use crate::figure::Figure;
use crate::handlers;

// ---------------------------------------------------------------------------
// Graphs and widgets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GraphId {
    Map,
    Pie,
    Scatter,
    Histogram,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WidgetId {
    MapLocation,
    PieColumn,
    ScatterX,
    ReviewScore,
    HistogramX,
    HistogramLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetValue {
    Text(String),
    Integer(i64),
}

impl fmt::Display for WidgetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetValue::Text(s) => write!(f, "{s}"),
            WidgetValue::Integer(i) => write!(f, "{i}"),
        }
    }
}

/// A user changed one widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetEvent {
    pub widget: WidgetId,
    pub value: WidgetValue,
}

impl WidgetEvent {
    pub fn text(widget: WidgetId, value: &str) -> Self {
        WidgetEvent {
            widget,
            value: WidgetValue::Text(value.to_string()),
        }
    }

    pub fn integer(widget: WidgetId, value: i64) -> Self {
        WidgetEvent {
            widget,
            value: WidgetValue::Integer(value),
        }
    }
}

// ---------------------------------------------------------------------------
// Widget state
// ---------------------------------------------------------------------------

/// Current value of every widget on the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetState {
    pub map_location: String,
    pub pie_column: String,
    pub scatter_x: String,
    pub review_score: i64,
    pub histogram_x: String,
    pub histogram_location: String,
}

impl WidgetState {
    /// Current value of a dropdown; `None` for the slider.
    pub fn text(&self, widget: WidgetId) -> Option<&str> {
        match widget {
            WidgetId::MapLocation => Some(&self.map_location),
            WidgetId::PieColumn => Some(&self.pie_column),
            WidgetId::ScatterX => Some(&self.scatter_x),
            WidgetId::HistogramX => Some(&self.histogram_x),
            WidgetId::HistogramLocation => Some(&self.histogram_location),
            WidgetId::ReviewScore => None,
        }
    }

    pub fn text_mut(&mut self, widget: WidgetId) -> Option<&mut String> {
        match widget {
            WidgetId::MapLocation => Some(&mut self.map_location),
            WidgetId::PieColumn => Some(&mut self.pie_column),
            WidgetId::ScatterX => Some(&mut self.scatter_x),
            WidgetId::HistogramX => Some(&mut self.histogram_x),
            WidgetId::HistogramLocation => Some(&mut self.histogram_location),
            WidgetId::ReviewScore => None,
        }
    }

    /// Store the event's value. Returns `false` when nothing changed or the
    /// value has the wrong type for the widget.
    pub fn apply(&mut self, event: &WidgetEvent) -> bool {
        match (event.widget, &event.value) {
            (WidgetId::ReviewScore, WidgetValue::Integer(v)) => {
                let changed = self.review_score != *v;
                self.review_score = *v;
                changed
            }
            (widget, WidgetValue::Text(text)) if widget != WidgetId::ReviewScore => {
                match self.text_mut(widget) {
                    Some(slot) if *slot != *text => {
                        slot.clone_from(text);
                        true
                    }
                    _ => false,
                }
            }
            (widget, value) => {
                log::warn!("ignoring {widget:?} event with mistyped value {value:?}");
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch table
// ---------------------------------------------------------------------------

/// One graph, the widgets it listens to and the handler that redraws it.
pub struct Callback {
    pub output: GraphId,
    pub inputs: &'static [WidgetId],
    pub render: fn(&ListingsTable, &WidgetState) -> Figure,
}

pub static CALLBACKS: [Callback; 4] = [
    Callback {
        output: GraphId::Map,
        inputs: &[WidgetId::MapLocation],
        render: render_map,
    },
    Callback {
        output: GraphId::Pie,
        inputs: &[WidgetId::PieColumn],
        render: render_pie,
    },
    Callback {
        output: GraphId::Scatter,
        inputs: &[WidgetId::ScatterX, WidgetId::ReviewScore],
        render: render_scatter,
    },
    Callback {
        output: GraphId::Histogram,
        inputs: &[WidgetId::HistogramX, WidgetId::HistogramLocation],
        render: render_histogram,
    },
];

fn render_map(table: &ListingsTable, w: &WidgetState) -> Figure {
    Figure::Map(handlers::map_figure(table, &w.map_location))
}

fn render_pie(table: &ListingsTable, w: &WidgetState) -> Figure {
    Figure::Pie(handlers::pie_figure(table, &w.pie_column))
}

fn render_scatter(table: &ListingsTable, w: &WidgetState) -> Figure {
    Figure::Scatter(handlers::scatter_figure(table, &w.scatter_x, w.review_score))
}

fn render_histogram(table: &ListingsTable, w: &WidgetState) -> Figure {
    Figure::Histogram(handlers::histogram_figure(
        table,
        &w.histogram_x,
        &w.histogram_location,
    ))
}

/// Callbacks that must rerun when `widget` changes.
pub fn callbacks_for(widget: WidgetId) -> impl Iterator<Item = &'static Callback> {
    CALLBACKS.iter().filter(move |cb| cb.inputs.contains(&widget))
}

/// Every figure, as drawn on first page load.
pub fn render_all(table: &ListingsTable, widgets: &WidgetState) -> BTreeMap<GraphId, Figure> {
    CALLBACKS
        .iter()
        .map(|cb| (cb.output, (cb.render)(table, widgets)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::sample_table;

    fn widgets() -> WidgetState {
        WidgetState {
            map_location: "London, United Kingdom".into(),
            pie_column: "Property Type".into(),
            scatter_x: "Accommodates".into(),
            review_score: 10,
            histogram_x: "Neighbourhood Cleansed".into(),
            histogram_location: "London, United Kingdom".into(),
        }
    }

    #[test]
    fn each_widget_feeds_exactly_one_graph() {
        let cases = [
            (WidgetId::MapLocation, GraphId::Map),
            (WidgetId::PieColumn, GraphId::Pie),
            (WidgetId::ScatterX, GraphId::Scatter),
            (WidgetId::ReviewScore, GraphId::Scatter),
            (WidgetId::HistogramX, GraphId::Histogram),
            (WidgetId::HistogramLocation, GraphId::Histogram),
        ];
        for (widget, graph) in cases {
            let outputs: Vec<_> = callbacks_for(widget).map(|cb| cb.output).collect();
            assert_eq!(outputs, vec![graph], "{widget:?}");
        }
    }

    #[test]
    fn render_all_draws_every_graph() {
        let figures = render_all(&sample_table(), &widgets());
        assert_eq!(figures.len(), 4);
        assert!(matches!(figures[&GraphId::Map], Figure::Map(_)));
        assert!(matches!(figures[&GraphId::Pie], Figure::Pie(_)));
        assert!(matches!(figures[&GraphId::Scatter], Figure::Scatter(_)));
        assert!(matches!(figures[&GraphId::Histogram], Figure::Histogram(_)));
        assert_eq!(
            figures[&GraphId::Scatter].layout().title,
            "Scatter plot -  Rating: 10"
        );
    }

    #[test]
    fn apply_updates_only_on_change() {
        let mut state = widgets();
        assert!(!state.apply(&WidgetEvent::text(WidgetId::PieColumn, "Property Type")));
        assert!(state.apply(&WidgetEvent::text(WidgetId::PieColumn, "Room Type")));
        assert_eq!(state.pie_column, "Room Type");
        assert!(state.apply(&WidgetEvent::integer(WidgetId::ReviewScore, 9)));
        assert_eq!(state.review_score, 9);
    }

    #[test]
    fn mistyped_event_is_ignored() {
        let mut state = widgets();
        assert!(!state.apply(&WidgetEvent::integer(WidgetId::MapLocation, 3)));
        assert!(!state.apply(&WidgetEvent::text(WidgetId::ReviewScore, "9")));
        assert_eq!(state, widgets());
    }
}
