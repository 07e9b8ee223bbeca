//! Procedural blob shapes.
//!
//! A [`Blob`] is a closed polygon whose radius wobbles randomly around a base
//! circle. Points are stored in unit poster space; the last point connects
//! back to the first.

use std::f64::consts::TAU;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::prng::Xorshift64;

/// Number of outline points every poster blob is built from.
pub const BLOB_POINTS: usize = 200;

/// A closed, immutable polygon with an organic outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blob {
    points: Vec<DVec2>,
}

impl Blob {
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns a copy of this blob shifted by `offset`.
    pub fn translated(&self, offset: DVec2) -> Blob {
        Blob {
            points: self.points.iter().map(|&p| p + offset).collect(),
        }
    }
}

/// Generates a blob around `center`.
///
/// Angles are spaced evenly over [0, 2π] with both endpoints included, so
/// the final point sits on the same ray as the first. Each point draws one
/// value from `rng`: its distance from the center is
/// `radius * (1 + wobble * u)` with `u` uniform in [-0.5, 0.5).
///
/// Degenerate inputs are not rejected: `point_count` 0 yields an empty blob,
/// 1 yields a single point on the +x ray, and a non-positive `radius`
/// collapses or mirrors the outline.
pub fn generate_blob(
    center: DVec2,
    radius: f64,
    point_count: usize,
    wobble: f64,
    rng: &mut Xorshift64,
) -> Blob {
    let step = if point_count > 1 {
        TAU / (point_count - 1) as f64
    } else {
        0.0
    };
    let points = (0..point_count)
        .map(|i| {
            let angle = step * i as f64;
            let distance = radius * (1.0 + wobble * rng.next_centered());
            center + distance * DVec2::from_angle(angle)
        })
        .collect();
    Blob { points }
}
