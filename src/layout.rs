use crate::callbacks::{GraphId, WidgetId, WidgetState};
use crate::data::columns::OptionCatalog;
use crate::data::schema;

/// Page title shown in the window bar.
pub const PAGE_TITLE: &str = "AirBnb Analysis";

const DEFAULT_LOCATION: &str = "London, United Kingdom";
const DEFAULT_PIE_COLUMN: &str = schema::PROPERTY_TYPE;
const DEFAULT_SCATTER_X: &str = "Accommodates";
const DEFAULT_HISTOGRAM_X: &str = schema::NEIGHBOURHOOD_CLEANSED;

// ---------------------------------------------------------------------------
// Static page structure
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Dropdown {
    pub id: WidgetId,
    pub prompt: &'static str,
    pub options: Vec<String>,
    pub default: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    pub id: WidgetId,
    pub prompt: &'static str,
    pub min: i64,
    pub max: i64,
    pub default: i64,
    /// Labelled positions along the track.
    pub marks: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    Dropdown(Dropdown),
    Slider(Slider),
}

/// One graph with its controls and the observations written under it.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub graph: GraphId,
    pub controls: Vec<Control>,
    pub notes: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub title: &'static str,
    pub sections: Vec<Section>,
}

impl Layout {
    /// Widget values as they are before the user touches anything.
    pub fn initial_widgets(&self) -> WidgetState {
        let mut widgets = WidgetState::default();
        for control in self.sections.iter().flat_map(|s| &s.controls) {
            match control {
                Control::Slider(s) if s.id == WidgetId::ReviewScore => {
                    widgets.review_score = s.default;
                }
                Control::Slider(s) => log::warn!("slider {:?} has no widget slot", s.id),
                Control::Dropdown(d) => match widgets.text_mut(d.id) {
                    Some(slot) => slot.clone_from(&d.default),
                    None => log::warn!("dropdown {:?} has no text slot", d.id),
                },
            }
        }
        widgets
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Assemble the page once from the option catalog.
pub fn build_layout(catalog: &OptionCatalog) -> Layout {
    let (min, max) = catalog.rating_range().unwrap_or((0, 0));

    Layout {
        title: PAGE_TITLE,
        sections: vec![
            Section {
                graph: GraphId::Map,
                controls: vec![Control::Dropdown(dropdown(
                    WidgetId::MapLocation,
                    "Select Smart Location to view on the map",
                    &catalog.locations,
                    DEFAULT_LOCATION,
                ))],
                notes: MAP_NOTES,
            },
            Section {
                graph: GraphId::Pie,
                controls: vec![Control::Dropdown(dropdown(
                    WidgetId::PieColumn,
                    "Select Column to display as Pie Chart",
                    &catalog.categorical,
                    DEFAULT_PIE_COLUMN,
                ))],
                notes: PIE_NOTES,
            },
            Section {
                graph: GraphId::Scatter,
                controls: vec![
                    Control::Dropdown(dropdown(
                        WidgetId::ScatterX,
                        "Select x axis column to compare with Price",
                        &catalog.continuous,
                        DEFAULT_SCATTER_X,
                    )),
                    Control::Slider(Slider {
                        id: WidgetId::ReviewScore,
                        prompt: "Slider to filter by ratings",
                        min,
                        max,
                        default: max,
                        marks: catalog.ratings.clone(),
                    }),
                ],
                notes: SCATTER_NOTES,
            },
            Section {
                graph: GraphId::Histogram,
                controls: vec![
                    Control::Dropdown(dropdown(
                        WidgetId::HistogramX,
                        "Select x axis column to compare with Price",
                        &catalog.categorical,
                        DEFAULT_HISTOGRAM_X,
                    )),
                    Control::Dropdown(dropdown(
                        WidgetId::HistogramLocation,
                        "Select Country to Visualize",
                        &catalog.locations,
                        DEFAULT_LOCATION,
                    )),
                ],
                notes: HISTOGRAM_NOTES,
            },
        ],
    }
}

/// A dropdown whose default falls back to the first option when the
/// preferred one is not in the data.
fn dropdown(id: WidgetId, prompt: &'static str, options: &[String], preferred: &str) -> Dropdown {
    let default = if options.iter().any(|o| o == preferred) {
        preferred.to_string()
    } else {
        options.first().cloned().unwrap_or_default()
    };
    Dropdown {
        id,
        prompt,
        options: options.to_vec(),
        default,
    }
}

// ---------------------------------------------------------------------------
// Narrative
// ---------------------------------------------------------------------------

const MAP_NOTES: &str = "Map observations\n\
Paris: apartments make up most of the supply and are spread across the whole city. \
Houses appear throughout, while lofts and condominiums cluster in the north.\n\
London: apartments and houses dominate and cover the whole city. Lofts are \
concentrated in the north-east; townhouses, condominiums and guest houses are rare.\n\
London offers more houses and apartments than Paris; Paris has more lofts and \
condominiums.";

const PIE_NOTES: &str = "Pie chart observations\n\
London holds roughly 60% of the listings and Paris 40%.\n\
Apartments are close to 90% of all properties; condominiums are the rarest type.\n\
About three quarters of listings are an entire home or apartment and shared rooms \
are around 1%.\n\
Real beds account for more than 90% of bed types. Cancellation policies are mostly \
moderate, then flexible, then strict.";

const SCATTER_NOTES: &str = "Scatter plot observations\n\
Most apartments accommodate one to six guests at average or lower prices.\n\
Apartments usually have one to two and a half bathrooms and cost under 400.\n\
The number of beds barely moves the price: even ten-bed houses stay near 200.\n\
Extra-person fees are mostly under 100, and most listings have fewer than 50 \
reviews.";

const HISTOGRAM_NOTES: &str = "Histogram observations\n\
Apartments lead the summed price in both cities by a wide margin.\n\
In London entire homes and apartments carry most of the summed price, private rooms \
far less; every other property type stays well below.\n\
In Paris, apart from apartments, each property type stays below 10k across all room \
types.";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::sample_dataset;

    fn dropdowns(layout: &Layout) -> Vec<&Dropdown> {
        layout
            .sections
            .iter()
            .flat_map(|s| &s.controls)
            .filter_map(|c| match c {
                Control::Dropdown(d) => Some(d),
                Control::Slider(_) => None,
            })
            .collect()
    }

    #[test]
    fn sections_follow_page_order() {
        let layout = build_layout(&sample_dataset().catalog);
        let graphs: Vec<_> = layout.sections.iter().map(|s| s.graph).collect();
        assert_eq!(
            graphs,
            vec![GraphId::Map, GraphId::Pie, GraphId::Scatter, GraphId::Histogram]
        );
    }

    #[test]
    fn initial_widgets_use_preferred_defaults() {
        let layout = build_layout(&sample_dataset().catalog);
        let widgets = layout.initial_widgets();
        assert_eq!(widgets.map_location, "London, United Kingdom");
        assert_eq!(widgets.pie_column, "Property Type");
        assert_eq!(widgets.scatter_x, "Accommodates");
        assert_eq!(widgets.review_score, 10);
        assert_eq!(widgets.histogram_x, "Neighbourhood Cleansed");
        assert_eq!(widgets.histogram_location, "London, United Kingdom");
    }

    #[test]
    fn slider_spans_the_rating_range() {
        let layout = build_layout(&sample_dataset().catalog);
        let slider = layout
            .sections
            .iter()
            .flat_map(|s| &s.controls)
            .find_map(|c| match c {
                Control::Slider(s) => Some(s),
                Control::Dropdown(_) => None,
            })
            .unwrap();
        assert_eq!((slider.min, slider.max, slider.default), (8, 10, 10));
        assert_eq!(slider.marks, vec![8, 9, 10]);
    }

    #[test]
    fn every_default_is_one_of_its_options() {
        let layout = build_layout(&sample_dataset().catalog);
        for d in dropdowns(&layout) {
            assert!(d.options.contains(&d.default), "{:?}", d.id);
        }
    }

    #[test]
    fn missing_preferred_default_falls_back_to_first_option() {
        let catalog = OptionCatalog {
            locations: vec!["Berlin, Germany".into(), "Rome, Italy".into()],
            ..OptionCatalog::default()
        };
        let layout = build_layout(&catalog);
        let widgets = layout.initial_widgets();
        assert_eq!(widgets.map_location, "Berlin, Germany");
        assert_eq!(widgets.pie_column, "");
        assert_eq!(widgets.review_score, 0);
    }
}
