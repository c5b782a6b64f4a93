//! Chart data types
//!
//! `ChartConfig` serializes to the configuration object a Chart.js-style
//! scatter chart consumes, so the server can hand it to a browser as is and
//! the WASM front end can draw from the same structure.

use serde::{Deserialize, Serialize};

/// Radius given to every plotted point
pub const POINT_RADIUS: f64 = 1.0;

const BORDER_COLOR: &str = "rgb(255, 99, 132)";
const BACKGROUND_COLOR: &str = "rgba(255, 99, 132, 0.5)";
const GRID_COLOR: &str = "rgba(0, 0, 0, 0.1)";
const TICK_STEP: f64 = 0.1;

/// One plotted point
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            r: POINT_RADIUS,
        }
    }
}

/// The three views over the objective set
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// x = achievement, y = fun
    Personal,
    /// x = impact, y = ease
    Collective,
    /// x = project(impact, ease), y = project(achievement, fun)
    Combined,
}

impl ChartKind {
    pub fn all() -> [ChartKind; 3] {
        [ChartKind::Personal, ChartKind::Collective, ChartKind::Combined]
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Personal => "Personal (A, F)",
            ChartKind::Collective => "Collective (I, E)",
            ChartKind::Combined => "Personal–Collective (C, P)",
        }
    }

    /// Titles of the x and y axes
    pub fn axis_titles(&self) -> (&'static str, &'static str) {
        match self {
            ChartKind::Personal => ("Achievement", "Fun"),
            ChartKind::Collective => ("Impact", "Ease"),
            ChartKind::Combined => ("Collective", "Personal"),
        }
    }

    /// Id of the drawing surface element in the page
    pub fn element_id(&self) -> &'static str {
        match self {
            ChartKind::Personal => "personal-chart",
            ChartKind::Collective => "collective-chart",
            ChartKind::Combined => "combined-chart",
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartKind::Personal => write!(f, "personal"),
            ChartKind::Collective => write!(f, "collective"),
            ChartKind::Combined => write!(f, "combined"),
        }
    }
}

/// Scatter chart configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: String,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub data: Vec<Point>,
    pub border_color: String,
    pub background_color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartOptions {
    pub animation: bool,
    pub responsive: bool,
    pub plugins: Plugins,
    pub scales: Scales,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plugins {
    pub legend: Toggle,
    pub title: Label,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Toggle {
    pub display: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Label {
    pub display: bool,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scales {
    pub x: Scale,
    pub y: Scale,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scale {
    pub min: f64,
    pub max: f64,
    pub title: Label,
    pub grid: Grid,
    pub ticks: Ticks,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Grid {
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ticks {
    pub step_size: f64,
}

impl Scale {
    fn unit(title: &str) -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            title: Label {
                display: true,
                text: title.to_string(),
            },
            grid: Grid {
                color: GRID_COLOR.to_string(),
            },
            ticks: Ticks {
                step_size: TICK_STEP,
            },
        }
    }
}

impl ChartConfig {
    /// Empty scatter configuration for one view, both axes fixed to [0, 1]
    pub fn for_kind(kind: ChartKind) -> Self {
        let (x_title, y_title) = kind.axis_titles();
        Self {
            chart_type: "scatter".to_string(),
            data: ChartData {
                labels: Vec::new(),
                datasets: vec![Dataset {
                    data: Vec::new(),
                    border_color: BORDER_COLOR.to_string(),
                    background_color: BACKGROUND_COLOR.to_string(),
                }],
            },
            options: ChartOptions {
                animation: false,
                responsive: false,
                plugins: Plugins {
                    legend: Toggle { display: false },
                    title: Label {
                        display: true,
                        text: kind.title().to_string(),
                    },
                },
                scales: Scales {
                    x: Scale::unit(x_title),
                    y: Scale::unit(y_title),
                },
            },
        }
    }

    /// Points of the first dataset
    pub fn points(&self) -> &[Point] {
        self.data
            .datasets
            .first()
            .map(|d| d.data.as_slice())
            .unwrap_or(&[])
    }

    /// Replace the points of the first dataset
    pub fn set_points(&mut self, points: Vec<Point>) {
        if let Some(dataset) = self.data.datasets.first_mut() {
            dataset.data = points;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_json_shape() {
        let config = ChartConfig::for_kind(ChartKind::Personal);
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["type"], "scatter");
        assert_eq!(json["options"]["animation"], false);
        assert_eq!(json["options"]["plugins"]["legend"]["display"], false);
        assert_eq!(json["options"]["plugins"]["title"]["text"], "Personal (A, F)");
        assert_eq!(json["options"]["scales"]["x"]["min"], 0.0);
        assert_eq!(json["options"]["scales"]["y"]["max"], 1.0);
        assert_eq!(json["options"]["scales"]["x"]["title"]["text"], "Achievement");
        assert_eq!(json["options"]["scales"]["y"]["ticks"]["stepSize"], 0.1);
        assert_eq!(json["data"]["datasets"][0]["borderColor"], "rgb(255, 99, 132)");
    }

    #[test]
    fn test_set_points() {
        let mut config = ChartConfig::for_kind(ChartKind::Combined);
        assert!(config.points().is_empty());

        config.set_points(vec![Point::new(0.1, 0.2)]);

        assert_eq!(config.points(), &[Point::new(0.1, 0.2)]);
        assert_eq!(config.points()[0].r, POINT_RADIUS);
    }
}
