use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::callbacks::{callbacks_for, render_all, GraphId, WidgetEvent, WidgetState};
use crate::data::columns::Dataset;
use crate::figure::Figure;
use crate::layout::{build_layout, Layout};

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// Everything the page shows, independent of rendering.
pub struct DashboardState {
    /// Shared, read-only listings and their option lists.
    pub dataset: Arc<Dataset>,

    /// File the dataset was loaded from.
    pub source: PathBuf,

    /// Static page structure, built once per dataset.
    pub layout: Layout,

    /// Current widget values.
    pub widgets: WidgetState,

    /// Latest figure of every graph.
    pub figures: BTreeMap<GraphId, Figure>,

    /// Bumped each time a graph is redrawn; drives transitions.
    pub revisions: BTreeMap<GraphId, u64>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl DashboardState {
    pub fn new(dataset: Arc<Dataset>, source: &Path) -> Self {
        let layout = build_layout(&dataset.catalog);
        let widgets = layout.initial_widgets();
        let figures = render_all(&dataset.table, &widgets);
        let status_message = dataset
            .table
            .is_empty()
            .then(|| format!("{} contains no listings", source.display()));

        Self {
            dataset,
            source: source.to_path_buf(),
            layout,
            widgets,
            figures,
            revisions: BTreeMap::new(),
            status_message,
        }
    }

    /// Swap in a newly loaded dataset; the page is rebuilt from scratch.
    pub fn set_dataset(&mut self, dataset: Dataset, source: &Path) {
        let revisions = std::mem::take(&mut self.revisions);
        *self = Self::new(Arc::new(dataset), source);
        // Keep counting so every graph animates into the new data.
        self.revisions = self
            .figures
            .keys()
            .map(|graph| (*graph, revisions.get(graph).copied().unwrap_or(0) + 1))
            .collect();
    }

    /// Apply a widget change and redraw the graphs that listen to it.
    /// Returns the graphs that were redrawn.
    pub fn dispatch(&mut self, event: &WidgetEvent) -> Vec<GraphId> {
        if !self.widgets.apply(event) {
            return Vec::new();
        }

        let table = &self.dataset.table;
        let mut redrawn = Vec::new();
        for callback in callbacks_for(event.widget) {
            let figure = (callback.render)(table, &self.widgets);
            self.figures.insert(callback.output, figure);
            *self.revisions.entry(callback.output).or_insert(0) += 1;
            redrawn.push(callback.output);
        }

        log::debug!("{:?} = {} redrew {redrawn:?}", event.widget, event.value);
        redrawn
    }

    pub fn figure(&self, graph: GraphId) -> Option<&Figure> {
        self.figures.get(&graph)
    }

    pub fn revision(&self, graph: GraphId) -> u64 {
        self.revisions.get(&graph).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callbacks::WidgetId;
    use crate::data::prepare::prepare;
    use crate::data::test_support::{raw_table, sample_dataset, HEADER};
    use crate::handlers;

    fn state() -> DashboardState {
        DashboardState::new(Arc::new(sample_dataset()), Path::new("sample.csv"))
    }

    #[test]
    fn initial_page_has_every_figure() {
        let state = state();
        assert_eq!(state.figures.len(), 4);
        let Some(Figure::Map(map)) = state.figure(GraphId::Map) else {
            panic!("map figure missing");
        };
        assert_eq!(map.layout.title, "Map: London, United Kingdom");
        assert_eq!(state.revision(GraphId::Map), 0);
    }

    #[test]
    fn dispatch_redraws_only_the_listening_graph() {
        let mut state = state();
        let before = state.figures.clone();

        let redrawn = state.dispatch(&WidgetEvent::text(WidgetId::MapLocation, "Paris, France"));
        assert_eq!(redrawn, vec![GraphId::Map]);
        assert_eq!(state.revision(GraphId::Map), 1);
        assert_eq!(state.revision(GraphId::Histogram), 0);
        assert_eq!(
            state.figure(GraphId::Map),
            Some(&Figure::Map(handlers::map_figure(
                &state.dataset.table,
                "Paris, France"
            )))
        );
        for graph in [GraphId::Pie, GraphId::Scatter, GraphId::Histogram] {
            assert_eq!(state.figure(graph), before.get(&graph));
        }
    }

    #[test]
    fn slider_change_redraws_scatter() {
        let mut state = state();
        let redrawn = state.dispatch(&WidgetEvent::integer(WidgetId::ReviewScore, 9));
        assert_eq!(redrawn, vec![GraphId::Scatter]);
        assert_eq!(
            state.figure(GraphId::Scatter).map(|f| f.layout().title.as_str()),
            Some("Scatter plot -  Rating: 9")
        );
    }

    #[test]
    fn unchanged_value_redraws_nothing() {
        let mut state = state();
        let redrawn = state.dispatch(&WidgetEvent::text(
            WidgetId::HistogramLocation,
            "London, United Kingdom",
        ));
        assert!(redrawn.is_empty());
    }

    #[test]
    fn out_of_domain_value_gives_empty_figure() {
        let mut state = state();
        state.dispatch(&WidgetEvent::text(WidgetId::MapLocation, "Atlantis"));
        assert!(state.figure(GraphId::Map).is_some_and(Figure::is_empty));
    }

    #[test]
    fn new_dataset_rebuilds_page() {
        let mut state = state();
        state.dispatch(&WidgetEvent::text(WidgetId::PieColumn, "Room Type"));
        state.set_dataset(sample_dataset(), Path::new("other.csv"));
        assert_eq!(state.widgets.pie_column, "Property Type");
        assert_eq!(state.source, Path::new("other.csv"));
        assert_eq!(state.revision(GraphId::Pie), 2);
    }

    #[test]
    fn header_only_file_is_reported_as_empty() {
        let table = prepare(raw_table(HEADER)).unwrap();
        let empty = DashboardState::new(Arc::new(Dataset::new(table)), Path::new("empty.csv"));
        assert_eq!(empty.status_message.as_deref(), Some("empty.csv contains no listings"));
        assert!(empty.figures.values().all(Figure::is_empty));
        assert!(state().status_message.is_none());
    }
}
