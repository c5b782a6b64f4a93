//! View Synchronizer
//!
//! Turns the objective list into labels and points for the three charts and
//! pushes them into chart handles. Handles are created through a
//! [`ChartFactory`] on the first render and mutated in place afterwards; they
//! are never destroyed while the synchronizer lives.

use serde::Serialize;

use super::types::{ChartConfig, ChartKind, Point};
use crate::objective::Objective;
use crate::projection::Projection;

/// A live chart owned by the synchronizer
pub trait ChartHandle {
    /// Replace the label list
    fn set_labels(&mut self, labels: Vec<String>);

    /// Replace the points of the single dataset
    fn set_data(&mut self, data: Vec<Point>);

    /// Redraw with the current labels and data
    fn update(&mut self);
}

/// Creates chart handles on a drawing surface
pub trait ChartFactory {
    type Chart: ChartHandle;

    fn create(&mut self, kind: ChartKind, config: ChartConfig) -> Self::Chart;
}

/// Labels and points computed for one render pass
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct RenderFrame {
    /// Objective names in store order, shared by all three charts
    pub labels: Vec<String>,
    pub personal: Vec<Point>,
    pub collective: Vec<Point>,
    pub combined: Vec<Point>,
}

impl RenderFrame {
    /// Compute the frame for `objectives` in order
    pub fn compute<'a, I>(objectives: I, projection: Projection) -> Self
    where
        I: IntoIterator<Item = &'a Objective>,
    {
        let mut frame = Self::default();

        for objective in objectives {
            frame.labels.push(objective.name.clone());
            frame
                .personal
                .push(Point::new(objective.achievement, objective.fun));
            frame
                .collective
                .push(Point::new(objective.impact, objective.ease));
            frame.combined.push(Point::new(
                projection.apply(objective.impact, objective.ease),
                projection.apply(objective.achievement, objective.fun),
            ));
        }

        frame
    }

    pub fn points(&self, kind: ChartKind) -> &[Point] {
        match kind {
            ChartKind::Personal => &self.personal,
            ChartKind::Collective => &self.collective,
            ChartKind::Combined => &self.combined,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

struct Charts<C> {
    personal: C,
    collective: C,
    combined: C,
}

impl<C> Charts<C> {
    fn get(&self, kind: ChartKind) -> &C {
        match kind {
            ChartKind::Personal => &self.personal,
            ChartKind::Collective => &self.collective,
            ChartKind::Combined => &self.combined,
        }
    }

    fn get_mut(&mut self, kind: ChartKind) -> &mut C {
        match kind {
            ChartKind::Personal => &mut self.personal,
            ChartKind::Collective => &mut self.collective,
            ChartKind::Combined => &mut self.combined,
        }
    }
}

/// Keeps three charts in sync with the objective list
pub struct ViewSynchronizer<F: ChartFactory> {
    factory: F,
    charts: Option<Charts<F::Chart>>,
    projection: Projection,
    last_frame: Option<RenderFrame>,
}

impl<F: ChartFactory> ViewSynchronizer<F> {
    pub fn new(factory: F, projection: Projection) -> Self {
        Self {
            factory,
            charts: None,
            projection,
            last_frame: None,
        }
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// True once the first render created the charts
    pub fn is_initialized(&self) -> bool {
        self.charts.is_some()
    }

    pub fn chart(&self, kind: ChartKind) -> Option<&F::Chart> {
        self.charts.as_ref().map(|c| c.get(kind))
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Frame pushed by the most recent render
    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.last_frame.as_ref()
    }

    /// Recompute every chart from `objectives` and redraw
    pub fn render(&mut self, objectives: &[Objective]) -> RenderFrame {
        let frame = RenderFrame::compute(objectives, self.projection);

        let factory = &mut self.factory;
        let charts = self.charts.get_or_insert_with(|| {
            tracing::debug!("Creating charts");
            Charts {
                personal: factory.create(
                    ChartKind::Personal,
                    ChartConfig::for_kind(ChartKind::Personal),
                ),
                collective: factory.create(
                    ChartKind::Collective,
                    ChartConfig::for_kind(ChartKind::Collective),
                ),
                combined: factory.create(
                    ChartKind::Combined,
                    ChartConfig::for_kind(ChartKind::Combined),
                ),
            }
        });

        for kind in ChartKind::all() {
            let chart = charts.get_mut(kind);
            chart.set_labels(frame.labels.clone());
            chart.set_data(frame.points(kind).to_vec());
        }
        for kind in ChartKind::all() {
            charts.get_mut(kind).update();
        }

        tracing::trace!(objectives = frame.len(), "Rendered charts");
        self.last_frame = Some(frame.clone());
        frame
    }
}
