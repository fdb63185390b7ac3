use std::f64::consts::TAU;

use eframe::egui::{Id, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, Points, Polygon};

use crate::callbacks::GraphId;
use crate::figure::{
    Figure, FigureLayout, HistogramFigure, MapFigure, MapPoint, PieFigure, ScatterFigure,
    ScatterPoint,
};

/// Largest arc drawn as one polygon; egui only fills convex shapes.
const MAX_WEDGE: f64 = 0.25;

// ---------------------------------------------------------------------------
// Figure rendering
// ---------------------------------------------------------------------------

/// Draw one graph's current figure.
pub fn figure_plot(ui: &mut Ui, graph: GraphId, figure: &Figure, revision: u64) {
    let layout = figure.layout();
    ui.heading(&layout.title);

    if figure.is_empty() {
        ui.label(RichText::new("No listings match the current selection.").weak());
    }

    let progress = transition_progress(ui, graph, revision, layout);
    match figure {
        Figure::Map(fig) => map_plot(ui, graph, fig),
        Figure::Pie(fig) => pie_plot(ui, graph, fig, progress),
        Figure::Scatter(fig) => scatter_plot(ui, graph, fig, progress),
        Figure::Histogram(fig) => histogram_plot(ui, graph, fig, progress),
    }
}

/// 0 → 1 over `transition_ms` after each redraw; 1 when the figure has no
/// transition.
fn transition_progress(ui: &Ui, graph: GraphId, revision: u64, layout: &FigureLayout) -> f32 {
    let Some(ms) = layout.transition_ms else {
        return 1.0;
    };
    let target = revision as f32;
    let shown = ui.ctx().animate_value_with_time(
        Id::new(("transition", graph)),
        target,
        ms as f32 / 1000.0,
    );
    (1.0 - (target - shown)).clamp(0.0, 1.0)
}

/// Hover text lookup: (series name, x, y, text).
type HoverIndex = Vec<(String, [f64; 2], String)>;

fn hover_label(index: &HoverIndex, name: &str, value: &PlotPoint) -> String {
    index
        .iter()
        .find(|(n, [x, y], _)| {
            n == name && (x - value.x).abs() < 1e-9 && (y - value.y).abs() < 1e-9
        })
        .map(|(_, _, text)| text.clone())
        .unwrap_or_else(|| {
            if name.is_empty() {
                format!("x: {:.2}\ny: {:.2}", value.x, value.y)
            } else {
                format!("{name}\nx: {:.2}\ny: {:.2}", value.x, value.y)
            }
        })
}

fn map_hover_text(property_type: &str, p: &MapPoint) -> String {
    let mut text = p.hover_name.clone();
    for (key, value) in &p.hover_data {
        text.push_str(&format!("\n{key}: {value}"));
    }
    text.push_str(&format!("\nProperty Type: {property_type}"));
    text
}

fn scatter_hover_text(city: &str, p: &ScatterPoint) -> String {
    format!("{}\nCity: {city}\nPrice: {}", p.hover_name, p.y)
}

// -- Map --

fn map_plot(ui: &mut Ui, graph: GraphId, fig: &MapFigure) {
    let hover: HoverIndex = fig
        .traces
        .iter()
        .flat_map(|t| t.points.iter().map(move |p| (t, p)))
        .map(|(t, p)| (t.name.clone(), [p.lon, p.lat], map_hover_text(&t.name, p)))
        .collect();

    Plot::new(("figure", graph))
        .height(fig.layout.height)
        .legend(Legend::default())
        .data_aspect(fig.data_aspect())
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .label_formatter(move |name, value| hover_label(&hover, name, value))
        .show(ui, |plot_ui| {
            for trace in &fig.traces {
                for p in &trace.points {
                    plot_ui.points(
                        Points::new(vec![[p.lon, p.lat]])
                            .name(&trace.name)
                            .color(trace.color)
                            .radius(fig.marker_radius(p.size))
                            .filled(true),
                    );
                }
            }
        });
}

// -- Pie --

/// Outline of a circular sector of the unit circle, clockwise from 12
/// o'clock; `start` and `sweep` are fractions of a full turn.
fn wedge(start: f64, sweep: f64) -> Vec<[f64; 2]> {
    let steps = ((sweep * 128.0).ceil() as usize).max(2);
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let angle = TAU * (start + sweep * i as f64 / steps as f64);
        points.push([angle.sin(), angle.cos()]);
    }
    points
}

fn pie_plot(ui: &mut Ui, graph: GraphId, fig: &PieFigure, progress: f32) {
    let fractions = fig.fractions();
    let names: Vec<String> = fig
        .slices
        .iter()
        .zip(&fractions)
        .map(|(s, f)| format!("{} ({:.1}%)", s.label, f * 100.0))
        .collect();

    Plot::new(("figure", graph))
        .height(fig.layout.height)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes([false, false])
        .show_grid([false, false])
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .label_formatter(|name, _value| name.to_string())
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for ((slice, fraction), name) in fig.slices.iter().zip(&fractions).zip(&names) {
                let sweep = fraction * progress as f64;
                let mut offset = 0.0;
                while offset < sweep {
                    let part = (sweep - offset).min(MAX_WEDGE);
                    plot_ui.polygon(
                        Polygon::new(wedge(start + offset, part))
                            .name(name)
                            .fill_color(slice.color),
                    );
                    offset += part;
                }
                start += sweep;
            }
        });
}

// -- Scatter --

fn scatter_plot(ui: &mut Ui, graph: GraphId, fig: &ScatterFigure, progress: f32) {
    let hover: HoverIndex = fig
        .traces
        .iter()
        .flat_map(|t| {
            t.points
                .iter()
                .map(move |p| (t.name.clone(), [p.x, p.y], scatter_hover_text(&t.name, p)))
        })
        .collect();

    Plot::new(("figure", graph))
        .height(fig.layout.height)
        .legend(Legend::default())
        .x_axis_label(fig.x_label.clone())
        .y_axis_label(fig.y_label.clone())
        .label_formatter(move |name, value| hover_label(&hover, name, value))
        .show(ui, |plot_ui| {
            for trace in &fig.traces {
                let points: Vec<[f64; 2]> = trace.points.iter().map(|p| [p.x, p.y]).collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&trace.name)
                        .color(trace.color.gamma_multiply(progress))
                        .radius(3.0)
                        .filled(true),
                );
            }
        });
}

// -- Histogram --

fn histogram_plot(ui: &mut Ui, graph: GraphId, fig: &HistogramFigure, progress: f32) {
    let categories = fig.categories.clone();

    Plot::new(("figure", graph))
        .height(fig.layout.height)
        .legend(Legend::default())
        .x_axis_label(fig.x_label.clone())
        .y_axis_label(fig.y_label.clone())
        .include_y(0.0)
        .x_axis_formatter(move |mark, _range| {
            let v = mark.value;
            if v < 0.0 || (v - v.round()).abs() > 1e-6 {
                return String::new();
            }
            categories.get(v.round() as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for (i, trace) in fig.traces.iter().enumerate() {
                let (width, offset) = fig.bar_slot(i);
                let color = trace.color.gamma_multiply(progress);
                let bars = trace
                    .points
                    .iter()
                    .map(|b| {
                        let category = fig.categories.get(b.category).cloned().unwrap_or_default();
                        Bar::new(b.category as f64 + offset, b.value * progress as f64)
                            .width(width)
                            .name(format!("{category} / {}", trace.name))
                            .fill(color)
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name(&trace.name).color(color));
            }
        });
}
