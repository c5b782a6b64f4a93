//! Core data types for objective tracking
//!
//! This module defines the fundamental types used throughout the crate:
//! - `Objective`: A named goal scored on four axes
//! - `Axis`: One of the four scoring dimensions
//! - `ObjectiveId`: Stable surrogate identifier assigned by the store
//! - `ObjectivePatch`: Partial update applied to one objective

use serde::{Deserialize, Serialize};

/// Midpoint value given to every axis of a freshly created objective
pub const DEFAULT_AXIS_VALUE: f64 = 0.5;

/// A named objective scored on four independent 0-1 axes
///
/// This is also the persisted record: local storage and the server data file
/// hold a JSON array of exactly these five fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Objective {
    pub name: String,
    pub fun: f64,
    pub achievement: f64,
    pub ease: f64,
    pub impact: f64,
}

impl Objective {
    /// Create an objective with explicit axis values
    pub fn new(
        name: impl Into<String>,
        fun: f64,
        achievement: f64,
        ease: f64,
        impact: f64,
    ) -> Self {
        Self {
            name: name.into(),
            fun,
            achievement,
            ease,
            impact,
        }
    }

    /// Create the default objective for a display position
    ///
    /// Named `"Objective {index}"` with every axis at the midpoint.
    pub fn new_default(index: usize) -> Self {
        Self {
            name: format!("Objective {}", index),
            fun: DEFAULT_AXIS_VALUE,
            achievement: DEFAULT_AXIS_VALUE,
            ease: DEFAULT_AXIS_VALUE,
            impact: DEFAULT_AXIS_VALUE,
        }
    }

    /// Read one axis value
    pub fn axis(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Fun => self.fun,
            Axis::Achievement => self.achievement,
            Axis::Ease => self.ease,
            Axis::Impact => self.impact,
        }
    }

    /// Set one axis value
    pub fn set_axis(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Fun => self.fun = value,
            Axis::Achievement => self.achievement = value,
            Axis::Ease => self.ease = value,
            Axis::Impact => self.impact = value,
        }
    }

    /// Check that every axis lies in [0, 1]
    pub fn is_valid(&self) -> bool {
        Axis::all()
            .iter()
            .all(|axis| is_unit_interval(self.axis(*axis)))
    }

    /// Apply a partial update, clamping axis values into [0, 1]
    pub fn apply(&mut self, patch: &ObjectivePatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        for axis in Axis::all() {
            if let Some(value) = patch.axis(*axis) {
                self.set_axis(*axis, clamp_unit(value));
            }
        }
    }
}

/// One of the four scoring dimensions of an objective
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Fun,
    Achievement,
    Ease,
    Impact,
}

impl Axis {
    /// Get all axes for iteration
    pub fn all() -> &'static [Axis] {
        &[Axis::Fun, Axis::Achievement, Axis::Ease, Axis::Impact]
    }

    /// Field name used in forms, CSV headers and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Fun => "fun",
            Axis::Achievement => "achievement",
            Axis::Ease => "ease",
            Axis::Impact => "impact",
        }
    }

    /// Parse a field name (exact, lowercase)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "fun" => Some(Axis::Fun),
            "achievement" => Some(Axis::Achievement),
            "ease" => Some(Axis::Ease),
            "impact" => Some(Axis::Impact),
            _ => None,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable surrogate identifier for an objective
///
/// Assigned from a monotonically increasing counter when the objective enters
/// the store. Ids are never reused within a store's lifetime, so deletion and
/// reordering never change the identity of the remaining objectives.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ObjectiveId(pub u64);

impl std::fmt::Display for ObjectiveId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ObjectiveId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(ObjectiveId)
    }
}

/// Partial update for one objective
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ObjectivePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fun: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievement: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ease: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<f64>,
}

impl ObjectivePatch {
    /// Builder method: set the name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder method: set one axis
    pub fn with_axis(mut self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::Fun => self.fun = Some(value),
            Axis::Achievement => self.achievement = Some(value),
            Axis::Ease => self.ease = Some(value),
            Axis::Impact => self.impact = Some(value),
        }
        self
    }

    /// Read the requested value for one axis
    pub fn axis(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Fun => self.fun,
            Axis::Achievement => self.achievement,
            Axis::Ease => self.ease,
            Axis::Impact => self.impact,
        }
    }

    /// True when the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && Axis::all().iter().all(|a| self.axis(*a).is_none())
    }
}

fn is_unit_interval(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

/// Parse an imported axis value
///
/// Anything that is not a finite number inside [0, 1] becomes 0. Out-of-range
/// values are not clamped to the nearest bound.
pub fn parse_objective_number(raw: Option<&str>) -> f64 {
    raw.map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| is_unit_interval(*v))
        .unwrap_or(0.0)
}

/// Clamp a directly entered axis value into [0, 1]
///
/// Non-finite values become 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_default() {
        let objective = Objective::new_default(3);
        assert_eq!(objective.name, "Objective 3");
        assert_eq!(objective.fun, 0.5);
        assert_eq!(objective.achievement, 0.5);
        assert_eq!(objective.ease, 0.5);
        assert_eq!(objective.impact, 0.5);
        assert!(objective.is_valid());
    }

    #[test]
    fn test_parse_objective_number() {
        assert_eq!(parse_objective_number(Some("0.25")), 0.25);
        assert_eq!(parse_objective_number(Some(" 1 ")), 1.0);
        assert_eq!(parse_objective_number(Some("0")), 0.0);
        // Out of range is coerced to zero, not clamped
        assert_eq!(parse_objective_number(Some("2")), 0.0);
        assert_eq!(parse_objective_number(Some("-1")), 0.0);
        assert_eq!(parse_objective_number(Some("abc")), 0.0);
        assert_eq!(parse_objective_number(Some("NaN")), 0.0);
        assert_eq!(parse_objective_number(Some("inf")), 0.0);
        assert_eq!(parse_objective_number(None), 0.0);
    }

    #[test]
    fn test_clamp_unit() {
        assert_eq!(clamp_unit(1.5), 1.0);
        assert_eq!(clamp_unit(-0.2), 0.0);
        assert_eq!(clamp_unit(0.3), 0.3);
        assert_eq!(clamp_unit(f64::NAN), 0.0);
    }

    #[test]
    fn test_apply_patch() {
        let mut objective = Objective::new_default(0);
        let patch = ObjectivePatch::default()
            .name("Run a marathon")
            .with_axis(Axis::Fun, 0.9)
            .with_axis(Axis::Impact, 7.0);

        objective.apply(&patch);

        assert_eq!(objective.name, "Run a marathon");
        assert_eq!(objective.fun, 0.9);
        assert_eq!(objective.impact, 1.0);
        assert_eq!(objective.ease, 0.5);
    }

    #[test]
    fn test_axis_names() {
        for axis in Axis::all() {
            assert_eq!(Axis::from_name(axis.as_str()), Some(*axis));
        }
        assert_eq!(Axis::from_name("name"), None);
    }

    #[test]
    fn test_objective_json_shape() {
        let objective = Objective::new("A", 0.2, 0.8, 0.5, 0.5);
        let json = serde_json::to_value(&objective).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "A",
                "fun": 0.2,
                "achievement": 0.8,
                "ease": 0.5,
                "impact": 0.5
            })
        );
    }
}
