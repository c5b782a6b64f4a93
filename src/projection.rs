//! Projection
//!
//! Collapses two axis values into one coordinate of the Combined chart:
//! x = project(impact, ease), y = project(achievement, fun).
//!
//! The canonical formula is the normalized-distance blend
//!
//! ```text
//! f(a, b) = (hypot(a, b) / sqrt(2) + a * b) / 2
//! ```
//!
//! which is symmetric, non-decreasing in each argument, 0 only at (0, 0) and
//! 1 only at (1, 1). The plain product is kept as an alternative selectable
//! through configuration.

use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;

/// Blended projection of two axis values
pub fn project(a: f64, b: f64) -> f64 {
    (a.hypot(b) / SQRT_2 + a * b) / 2.0
}

/// Available projection formulas
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    /// `(hypot(a, b) / sqrt(2) + a * b) / 2`
    #[default]
    Blended,
    /// `a * b`
    Product,
}

impl Projection {
    pub fn apply(&self, a: f64, b: f64) -> f64 {
        match self {
            Projection::Blended => project(a, b),
            Projection::Product => a * b,
        }
    }
}

impl std::fmt::Display for Projection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Projection::Blended => write!(f, "blended"),
            Projection::Product => write!(f, "product"),
        }
    }
}

impl std::str::FromStr for Projection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "blended" => Ok(Projection::Blended),
            "product" => Ok(Projection::Product),
            other => Err(format!("Unknown projection: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_known_values() {
        assert!((project(0.5, 0.5) - 0.375).abs() < EPS);
        let expected = ((0.68f64).sqrt() / SQRT_2 + 0.16) / 2.0;
        assert!((project(0.8, 0.2) - expected).abs() < EPS);
        assert!((project(0.8, 0.2) - 0.371548).abs() < 1e-6);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(project(0.0, 0.0), 0.0);
        assert!((project(1.0, 1.0) - 1.0).abs() < EPS);
        assert!(project(1.0, 0.0) > 0.0);
        assert!(project(1.0, 0.99) < 1.0);
    }

    #[test]
    fn test_symmetric_and_monotone_on_grid() {
        let steps: Vec<f64> = (0..=10).map(|i| i as f64 / 10.0).collect();
        for &a in &steps {
            for &b in &steps {
                let v = project(a, b);
                assert!((0.0..=1.0 + EPS).contains(&v));
                assert!((v - project(b, a)).abs() < EPS);
                if b < 1.0 {
                    assert!(project(a, b + 0.1) + EPS >= v);
                }
            }
        }
    }

    #[test]
    fn test_product_variant() {
        assert_eq!(Projection::Product.apply(0.5, 0.4), 0.2);
        assert_eq!(Projection::default(), Projection::Blended);
        assert_eq!("Product".parse::<Projection>(), Ok(Projection::Product));
        assert!("cubic".parse::<Projection>().is_err());
    }
}
