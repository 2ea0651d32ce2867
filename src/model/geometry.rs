//! Geometric types shared by the wire format and the resolved model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An axis-aligned bounding box in page-relative coordinates.
///
/// Coordinates are fractions of the page dimension, so a full-width line has
/// `width` close to 1.0. Non-negative dimensions are assumed, not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoundingBox {
    width: f32,
    height: f32,
    left: f32,
    top: f32,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(width: f32, height: f32, left: f32, top: f32) -> Self {
        Self {
            width,
            height,
            left,
            top,
        }
    }

    /// Box width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Box height.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Left edge.
    pub fn left(&self) -> f32 {
        self.left
    }

    /// Top edge.
    pub fn top(&self) -> f32 {
        self.top
    }

    /// Right edge, derived as `left + width`.
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge, derived as `top + height`.
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "width: {}, height: {}, left: {}, top: {}",
            self.width, self.height, self.left, self.top
        )
    }
}

/// One vertex of a block's polygon outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate.
    pub fn y(&self) -> f32 {
        self.y
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x: {}, y: {}", self.x, self.y)
    }
}

/// A block's geometry: bounding box plus polygon outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Geometry {
    bounding_box: BoundingBox,
    #[serde(default)]
    polygon: Vec<Point>,
}

impl Geometry {
    /// Create a geometry from a bounding box and polygon vertices.
    pub fn new(bounding_box: BoundingBox, polygon: Vec<Point>) -> Self {
        Self {
            bounding_box,
            polygon,
        }
    }

    /// The bounding box.
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    /// The polygon vertices, in source order.
    pub fn polygon(&self) -> &[Point] {
        &self.polygon
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BoundingBox: {}", self.bounding_box)
    }
}
