//! Snapshot charts
//!
//! Chart handles that keep the current configuration in memory instead of
//! drawing it. The server serves these configurations to browsers and bumps
//! a revision on every redraw so clients can tell stale copies apart.

use serde::Serialize;

use super::sync::{ChartFactory, ChartHandle};
use super::types::{ChartConfig, ChartKind, Point};

/// Chart whose drawing surface is its serialized configuration
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SnapshotChart {
    kind: ChartKind,
    revision: u64,
    config: ChartConfig,
}

impl SnapshotChart {
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    /// Number of redraws since creation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }
}

impl ChartHandle for SnapshotChart {
    fn set_labels(&mut self, labels: Vec<String>) {
        self.config.data.labels = labels;
    }

    fn set_data(&mut self, data: Vec<Point>) {
        self.config.set_points(data);
    }

    fn update(&mut self) {
        self.revision += 1;
    }
}

/// Factory for [`SnapshotChart`]s
#[derive(Debug, Default)]
pub struct SnapshotFactory {
    created: usize,
}

impl SnapshotFactory {
    /// Number of charts created so far
    pub fn created(&self) -> usize {
        self.created
    }
}

impl ChartFactory for SnapshotFactory {
    type Chart = SnapshotChart;

    fn create(&mut self, kind: ChartKind, config: ChartConfig) -> SnapshotChart {
        self.created += 1;
        SnapshotChart {
            kind,
            revision: 0,
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_bumps_revision() {
        let mut factory = SnapshotFactory::default();
        let mut chart = factory.create(
            ChartKind::Collective,
            ChartConfig::for_kind(ChartKind::Collective),
        );

        chart.set_labels(vec!["A".to_string()]);
        chart.set_data(vec![Point::new(0.5, 0.5)]);
        assert_eq!(chart.revision(), 0);

        chart.update();

        assert_eq!(chart.revision(), 1);
        assert_eq!(chart.config().data.labels, vec!["A"]);
        assert_eq!(chart.kind(), ChartKind::Collective);
        assert_eq!(factory.created(), 1);
    }
}
