//! Chart Components
//!
//! Scatter charts drawn on HTML5 Canvas from a `ChartConfig`.

use compass::chart::{ChartConfig, ChartFactory, ChartHandle, ChartKind, Point, Scale};
use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub const CANVAS_WIDTH: u32 = 380;
pub const CANVAS_HEIGHT: u32 = 380;

/// Pixel radius drawn for a point of radius 1
const POINT_PIXELS: f64 = 4.0;

/// The three chart canvases
#[component]
pub fn Charts() -> impl IntoView {
    view! {
        <section class="charts">
            {ChartKind::all()
                .into_iter()
                .map(|kind| view! {
                    <canvas
                        id=kind.element_id()
                        width=CANVAS_WIDTH.to_string()
                        height=CANVAS_HEIGHT.to_string()
                        aria-label=kind.title()
                    />
                })
                .collect::<Vec<_>>()}
        </section>
    }
}

/// A chart drawing into the canvas with its kind's element id
///
/// The canvas is looked up on every redraw, so a chart created before the
/// page is mounted starts drawing once the canvas exists.
pub struct CanvasChart {
    kind: ChartKind,
    config: ChartConfig,
}

impl CanvasChart {
    fn canvas(&self) -> Option<HtmlCanvasElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id(self.kind.element_id())?
            .dyn_into::<HtmlCanvasElement>()
            .ok()
    }
}

impl ChartHandle for CanvasChart {
    fn set_labels(&mut self, labels: Vec<String>) {
        self.config.data.labels = labels;
    }

    fn set_data(&mut self, data: Vec<Point>) {
        self.config.set_points(data);
    }

    fn update(&mut self) {
        match self.canvas() {
            Some(canvas) => draw_scatter(&canvas, &self.config),
            None => web_sys::console::debug_1(
                &format!("{} chart not mounted yet", self.kind).into(),
            ),
        }
    }
}

/// Creates [`CanvasChart`]s
#[derive(Debug, Default)]
pub struct CanvasFactory;

impl ChartFactory for CanvasFactory {
    type Chart = CanvasChart;

    fn create(&mut self, kind: ChartKind, config: ChartConfig) -> CanvasChart {
        CanvasChart { kind, config }
    }
}

/// Region of the canvas inside the axes
#[derive(Debug, Clone, Copy, PartialEq)]
struct PlotArea {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl PlotArea {
    fn for_canvas(width: f64, height: f64) -> Self {
        // Margins
        let margin_left = 50.0;
        let margin_right = 15.0;
        let margin_top = 35.0;
        let margin_bottom = 45.0;

        Self {
            left: margin_left,
            top: margin_top,
            width: width - margin_left - margin_right,
            height: height - margin_top - margin_bottom,
        }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Canvas position of a data point (y grows downward on canvas)
    fn project(&self, x: f64, y: f64, x_scale: &Scale, y_scale: &Scale) -> (f64, f64) {
        let fx = fraction(x, x_scale);
        let fy = fraction(y, y_scale);
        (self.left + fx * self.width, self.bottom() - fy * self.height)
    }
}

fn fraction(value: f64, scale: &Scale) -> f64 {
    let span = scale.max - scale.min;
    if span <= 0.0 {
        return 0.0;
    }
    ((value - scale.min) / span).clamp(0.0, 1.0)
}

/// Tick values from `min` to `max` inclusive
fn ticks(scale: &Scale) -> Vec<f64> {
    let step = scale.ticks.step_size;
    if step <= 0.0 || scale.max <= scale.min {
        return vec![scale.min, scale.max];
    }
    let steps = ((scale.max - scale.min) / step).round() as usize;
    (0..=steps).map(|i| scale.min + i as f64 * step).collect()
}

/// Draw the chart on canvas
fn draw_scatter(canvas: &HtmlCanvasElement, config: &ChartConfig) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let area = PlotArea::for_canvas(width, height);
    let scales = &config.options.scales;

    // Clear canvas
    ctx.set_fill_style(&"#ffffff".into());
    ctx.fill_rect(0.0, 0.0, width, height);

    // Title
    let title = &config.options.plugins.title;
    if title.display {
        ctx.set_fill_style(&"#111827".into());
        ctx.set_font("bold 14px sans-serif");
        ctx.set_text_align("center");
        let _ = ctx.fill_text(&title.text, width / 2.0, 20.0);
    }

    // Grid lines and tick labels
    ctx.set_line_width(1.0);
    ctx.set_font("11px sans-serif");
    for value in ticks(&scales.x) {
        let (x, _) = area.project(value, scales.y.min, &scales.x, &scales.y);
        ctx.set_stroke_style(&scales.x.grid.color.as_str().into());
        ctx.begin_path();
        ctx.move_to(x, area.top);
        ctx.line_to(x, area.bottom());
        ctx.stroke();

        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_text_align("center");
        let _ = ctx.fill_text(&format!("{:.1}", value), x, area.bottom() + 14.0);
    }
    for value in ticks(&scales.y) {
        let (_, y) = area.project(scales.x.min, value, &scales.x, &scales.y);
        ctx.set_stroke_style(&scales.y.grid.color.as_str().into());
        ctx.begin_path();
        ctx.move_to(area.left, y);
        ctx.line_to(area.right(), y);
        ctx.stroke();

        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_text_align("right");
        let _ = ctx.fill_text(&format!("{:.1}", value), area.left - 6.0, y + 4.0);
    }

    // Axis titles
    ctx.set_fill_style(&"#374151".into());
    ctx.set_font("12px sans-serif");
    ctx.set_text_align("center");
    if scales.x.title.display {
        let _ = ctx.fill_text(&scales.x.title.text, area.left + area.width / 2.0, height - 8.0);
    }
    if scales.y.title.display {
        ctx.save();
        let _ = ctx.translate(14.0, area.top + area.height / 2.0);
        let _ = ctx.rotate(-std::f64::consts::FRAC_PI_2);
        let _ = ctx.fill_text(&scales.y.title.text, 0.0, 0.0);
        ctx.restore();
    }

    // Points with their objective names
    let Some(dataset) = config.data.datasets.first() else {
        return;
    };
    ctx.set_font("10px sans-serif");
    ctx.set_text_align("left");
    for (i, point) in dataset.data.iter().enumerate() {
        let (x, y) = area.project(point.x, point.y, &scales.x, &scales.y);

        ctx.begin_path();
        let _ = ctx.arc(x, y, point.r * POINT_PIXELS, 0.0, std::f64::consts::PI * 2.0);
        ctx.set_fill_style(&dataset.background_color.as_str().into());
        ctx.fill();
        ctx.set_stroke_style(&dataset.border_color.as_str().into());
        ctx.stroke();

        if let Some(label) = config.data.labels.get(i) {
            ctx.set_fill_style(&"#374151".into());
            let _ = ctx.fill_text(label, x + 6.0, y - 6.0);
        }
    }

    if dataset.data.is_empty() {
        ctx.set_fill_style(&"#9ca3af".into());
        ctx.set_font("14px sans-serif");
        ctx.set_text_align("center");
        let _ = ctx.fill_text("No objectives", width / 2.0, height / 2.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_scales() -> (Scale, Scale) {
        let config = ChartConfig::for_kind(ChartKind::Personal);
        (config.options.scales.x, config.options.scales.y)
    }

    #[test]
    fn test_project_corners() {
        let (x, y) = unit_scales();
        let area = PlotArea::for_canvas(400.0, 400.0);

        assert_eq!(area.project(0.0, 0.0, &x, &y), (area.left, area.bottom()));
        assert_eq!(area.project(1.0, 1.0, &x, &y), (area.right(), area.top));
    }

    #[test]
    fn test_project_clamps_outside_points() {
        let (x, y) = unit_scales();
        let area = PlotArea::for_canvas(400.0, 400.0);

        assert_eq!(area.project(2.0, -1.0, &x, &y), (area.right(), area.bottom()));
    }

    #[test]
    fn test_ticks_every_tenth() {
        let (x, _) = unit_scales();
        let values = ticks(&x);

        assert_eq!(values.len(), 11);
        assert_eq!(values[0], 0.0);
        assert!((values[10] - 1.0).abs() < 1e-12);
    }
}
