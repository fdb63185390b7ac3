use eframe::egui::Color32;

// ---------------------------------------------------------------------------
// Chart specifications produced by the update handlers
// ---------------------------------------------------------------------------

/// Plot height used by the map, scatter and histogram charts.
pub const TALL_HEIGHT: f32 = 800.0;
/// Plot height for charts that do not ask for one.
pub const DEFAULT_HEIGHT: f32 = 450.0;
/// Largest map marker diameter, in points.
pub const MAP_SIZE_MAX: f32 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct FigureLayout {
    pub title: String,
    pub height: f32,
    /// Duration of the animation between two versions of the chart.
    pub transition_ms: Option<u32>,
}

/// One coloured group of marks, shown as one legend entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace<P> {
    pub name: String,
    pub color: Color32,
    pub points: Vec<P>,
}

// -- Map --

#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    /// Source row in the listings table.
    pub row: usize,
    pub lat: f64,
    pub lon: f64,
    /// Value driving the marker area (the price).
    pub size: f64,
    pub hover_name: String,
    pub hover_data: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapFigure {
    pub layout: FigureLayout,
    pub traces: Vec<Trace<MapPoint>>,
}

impl MapFigure {
    fn max_size(&self) -> f64 {
        self.traces
            .iter()
            .flat_map(|t| &t.points)
            .map(|p| p.size)
            .fold(0.0, f64::max)
    }

    /// Marker radius with area proportional to `size`; the largest value
    /// gets a diameter of [`MAP_SIZE_MAX`].
    pub fn marker_radius(&self, size: f64) -> f32 {
        let max = self.max_size();
        if max <= 0.0 || size <= 0.0 {
            return 1.0;
        }
        let radius = MAP_SIZE_MAX / 2.0 * (size / max).sqrt() as f32;
        radius.max(1.0)
    }

    /// Longitude/latitude unit ratio that keeps distances undistorted at
    /// the figure's mean latitude.
    pub fn data_aspect(&self) -> f32 {
        let (sum, n) = self
            .traces
            .iter()
            .flat_map(|t| &t.points)
            .fold((0.0, 0usize), |(s, n), p| (s + p.lat, n + 1));
        if n == 0 {
            return 1.0;
        }
        let cos = (sum / n as f64).to_radians().cos().max(0.05);
        (1.0 / cos) as f32
    }

    pub fn point_count(&self) -> usize {
        self.traces.iter().map(|t| t.points.len()).sum()
    }
}

// -- Pie --

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieFigure {
    pub layout: FigureLayout,
    pub slices: Vec<PieSlice>,
}

impl PieFigure {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }

    /// Share of the whole for each slice, in slice order.
    pub fn fractions(&self) -> Vec<f64> {
        let total = self.total();
        if total == 0 {
            return vec![0.0; self.slices.len()];
        }
        self.slices
            .iter()
            .map(|s| s.count as f64 / total as f64)
            .collect()
    }
}

// -- Scatter --

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub row: usize,
    pub x: f64,
    pub y: f64,
    pub hover_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterFigure {
    pub layout: FigureLayout,
    pub x_label: String,
    pub y_label: String,
    pub traces: Vec<Trace<ScatterPoint>>,
}

// -- Histogram --

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBar {
    /// Index into [`HistogramFigure::categories`].
    pub category: usize,
    /// Summed y value of the rows in this bar.
    pub value: f64,
    pub rows: Vec<usize>,
}

/// Bars from several traces at the same category sit side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramFigure {
    pub layout: FigureLayout,
    pub x_label: String,
    pub y_label: String,
    pub categories: Vec<String>,
    pub traces: Vec<Trace<HistogramBar>>,
}

impl HistogramFigure {
    /// Width and centre offset of trace `index` within a category slot.
    pub fn bar_slot(&self, index: usize) -> (f64, f64) {
        let n = self.traces.len().max(1) as f64;
        let width = 0.8 / n;
        let offset = (index as f64 - (n - 1.0) / 2.0) * width;
        (width, offset)
    }
}

// ---------------------------------------------------------------------------
// Figure
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    Map(MapFigure),
    Pie(PieFigure),
    Scatter(ScatterFigure),
    Histogram(HistogramFigure),
}

impl Figure {
    pub fn layout(&self) -> &FigureLayout {
        match self {
            Figure::Map(f) => &f.layout,
            Figure::Pie(f) => &f.layout,
            Figure::Scatter(f) => &f.layout,
            Figure::Histogram(f) => &f.layout,
        }
    }

    /// Whether the chart has nothing to draw.
    pub fn is_empty(&self) -> bool {
        match self {
            Figure::Map(f) => f.traces.iter().all(|t| t.points.is_empty()),
            Figure::Pie(f) => f.slices.is_empty(),
            Figure::Scatter(f) => f.traces.iter().all(|t| t.points.is_empty()),
            Figure::Histogram(f) => f.traces.iter().all(|t| t.points.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> FigureLayout {
        FigureLayout {
            title: "t".into(),
            height: DEFAULT_HEIGHT,
            transition_ms: None,
        }
    }

    fn map_point(lat: f64, size: f64) -> MapPoint {
        MapPoint {
            row: 0,
            lat,
            lon: 0.0,
            size,
            hover_name: String::new(),
            hover_data: Vec::new(),
        }
    }

    #[test]
    fn marker_area_scales_with_size() {
        let fig = MapFigure {
            layout: layout(),
            traces: vec![Trace {
                name: "Apartment".into(),
                color: Color32::RED,
                points: vec![map_point(0.0, 100.0), map_point(0.0, 25.0)],
            }],
        };
        assert_eq!(fig.marker_radius(100.0), MAP_SIZE_MAX / 2.0);
        assert_eq!(fig.marker_radius(25.0), MAP_SIZE_MAX / 4.0);
        assert_eq!(fig.marker_radius(0.0), 1.0);
    }

    #[test]
    fn map_aspect_widens_at_high_latitude() {
        let fig = MapFigure {
            layout: layout(),
            traces: vec![Trace {
                name: "x".into(),
                color: Color32::RED,
                points: vec![map_point(60.0, 1.0)],
            }],
        };
        assert!((fig.data_aspect() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn pie_fractions_sum_to_one() {
        let slice = |count| PieSlice {
            label: "x".into(),
            count,
            color: Color32::RED,
        };
        let fig = PieFigure {
            layout: layout(),
            slices: vec![slice(3), slice(1)],
        };
        assert_eq!(fig.fractions(), vec![0.75, 0.25]);
    }

    #[test]
    fn grouped_bars_are_centred_on_the_category() {
        let trace = |name: &str| Trace {
            name: name.into(),
            color: Color32::RED,
            points: Vec::new(),
        };
        let fig = HistogramFigure {
            layout: layout(),
            x_label: "x".into(),
            y_label: "y".into(),
            categories: Vec::new(),
            traces: vec![trace("a"), trace("b")],
        };
        let (width, left) = fig.bar_slot(0);
        let (_, right) = fig.bar_slot(1);
        assert!((width - 0.4).abs() < 1e-9);
        assert!((left + 0.2).abs() < 1e-9);
        assert!((right - 0.2).abs() < 1e-9);
    }
}
