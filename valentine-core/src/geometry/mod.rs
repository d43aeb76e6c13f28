//! Container-space geometry.
//!
//! All rectangles live in the proposal container's coordinate space: origin
//! at the container's top-left corner, y grows downward.

use serde::{Deserialize, Serialize};

use crate::constants::{
    FALLBACK_ACCEPT_HEIGHT, FALLBACK_ACCEPT_WIDTH, FALLBACK_ACCEPT_X, FALLBACK_ACCEPT_Y,
    FALLBACK_CONTAINER_HEIGHT, FALLBACK_CONTAINER_WIDTH,
};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Negative extents are clamped to zero.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

/// Axis-aligned rectangle `{x, y, width, height}`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    /// Negative extents are clamped to zero.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Grow by `padding` on every side.
    pub fn expand(&self, padding: f32) -> Self {
        Self::new(
            self.x - padding,
            self.y - padding,
            self.width + padding * 2.0,
            self.height + padding * 2.0,
        )
    }

    /// Shrink by `inset` on every side, collapsing to zero size if needed.
    pub fn inset(&self, inset: f32) -> Self {
        Self::new(
            self.x + inset,
            self.y + inset,
            self.width - inset * 2.0,
            self.height - inset * 2.0,
        )
    }

    /// Two rectangles do not overlap when one lies entirely left of, right
    /// of, above or below the other. Shared edges count as not overlapping.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        !(self.right() <= other.left()
            || self.left() >= other.right()
            || self.bottom() <= other.top()
            || self.top() >= other.bottom())
    }

    pub fn contains(&self, other: &Bounds) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Supplies live layout measurements. The core reads these on every
/// placement and never writes them.
pub trait GeometryProvider {
    /// Container bounds; only width and height are used, the origin is the
    /// container's own top-left.
    fn container_bounds(&self) -> Bounds;

    /// Primary accept target, relative to the container.
    fn accept_bounds(&self) -> Bounds;
}

/// Geometry snapshot taken from the page layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticGeometry {
    pub container: Bounds,
    pub accept: Bounds,
}

impl StaticGeometry {
    pub fn new(container: Bounds, accept: Bounds) -> Self {
        Self { container, accept }
    }

    /// Measurements used before the page has laid itself out.
    pub fn fallback() -> Self {
        Self {
            container: Bounds::new(0.0, 0.0, FALLBACK_CONTAINER_WIDTH, FALLBACK_CONTAINER_HEIGHT),
            accept: Bounds::new(
                FALLBACK_ACCEPT_X,
                FALLBACK_ACCEPT_Y,
                FALLBACK_ACCEPT_WIDTH,
                FALLBACK_ACCEPT_HEIGHT,
            ),
        }
    }
}

impl Default for StaticGeometry {
    fn default() -> Self {
        Self::fallback()
    }
}

impl GeometryProvider for StaticGeometry {
    fn container_bounds(&self) -> Bounds {
        self.container
    }

    fn accept_bounds(&self) -> Bounds {
        self.accept
    }
}

impl<G: GeometryProvider + ?Sized> GeometryProvider for &G {
    fn container_bounds(&self) -> Bounds {
        (**self).container_bounds()
    }

    fn accept_bounds(&self) -> Bounds {
        (**self).accept_bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_extents_clamped() {
        let b = Bounds::new(10.0, 10.0, -5.0, -1.0);
        assert_eq!(b.width, 0.0);
        assert_eq!(b.height, 0.0);
        let s = Size::new(-3.0, 4.0);
        assert_eq!(s.width, 0.0);
        assert_eq!(s.height, 4.0);
    }

    #[test]
    fn test_expand_matches_exclusion_example() {
        let accept = Bounds::new(180.0, 300.0, 140.0, 52.0);
        let zone = accept.expand(50.0);
        assert_eq!(zone, Bounds::new(130.0, 250.0, 240.0, 152.0));
        assert_eq!(zone.right(), 370.0);
        assert_eq!(zone.bottom(), 402.0);
    }

    #[test]
    fn test_overlap_edges_touching() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let right = Bounds::new(10.0, 0.0, 10.0, 10.0);
        let below = Bounds::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
        assert!(!right.overlaps(&a));
    }

    #[test]
    fn test_overlap_partial_and_contained() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Bounds::new(5.0, 5.0, 10.0, 10.0)));
        assert!(a.overlaps(&Bounds::new(2.0, 2.0, 2.0, 2.0)));
        assert!(!a.overlaps(&Bounds::new(30.0, 30.0, 2.0, 2.0)));
    }

    #[test]
    fn test_contains_and_inset() {
        let container = Bounds::new(0.0, 0.0, 500.0, 400.0).inset(20.0);
        assert_eq!(container, Bounds::new(20.0, 20.0, 460.0, 360.0));
        assert!(container.contains(&Bounds::new(20.0, 20.0, 120.0, 48.0)));
        assert!(!container.contains(&Bounds::new(19.0, 20.0, 120.0, 48.0)));
        assert!(!container.contains(&Bounds::new(400.0, 20.0, 120.0, 48.0)));
    }

    #[test]
    fn test_inset_collapses() {
        let tiny = Bounds::new(0.0, 0.0, 10.0, 10.0).inset(20.0);
        assert_eq!(tiny.width, 0.0);
        assert_eq!(tiny.height, 0.0);
    }

    #[test]
    fn test_fallback_geometry() {
        let g = StaticGeometry::fallback();
        assert_eq!(g.container_bounds().width, 500.0);
        assert_eq!(g.container_bounds().height, 400.0);
        assert_eq!(g.accept_bounds(), Bounds::new(150.0, 280.0, 140.0, 52.0));
    }

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < f32::EPSILON);
    }
}
