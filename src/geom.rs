//! Plane geometry shared by the grid, the token layout, and the overlay clip.
//!
//! All coordinates are canvas pixels with the origin at the top-left corner of
//! the visible area, x growing right and y growing down.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in canvas (or token-local) pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Shift the point by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// An axis-aligned rectangle. `width` and `height` are never negative for
/// rectangles produced by this crate; use [`Rect::from_corners`] to normalize.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Build a normalized rectangle spanning two arbitrary corners.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self { x, y, width: (a.x - b.x).abs(), height: (a.y - b.y).abs() }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// True when the rectangle covers no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Half-open containment: the left/top edges are inside, right/bottom are not.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x < self.right() && pt.y >= self.y && pt.y < self.bottom()
    }

    /// True when the two rectangles share a non-empty area.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersection(other).is_some()
    }

    /// Overlapping area of two rectangles, if any.
    #[must_use]
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right > x && bottom > y {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Move the rectangle by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Express this rectangle in the local space of something whose origin sits at `origin`.
    #[must_use]
    pub fn to_local(&self, origin: Point) -> Rect {
        self.translated(-origin.x, -origin.y)
    }

    /// `self` minus `hole`, as up to four disjoint bands (top, bottom, left, right).
    #[must_use]
    pub fn subtract(&self, hole: &Rect) -> Vec<Rect> {
        let Some(cut) = self.intersection(hole) else {
            return if self.is_empty() { Vec::new() } else { vec![*self] };
        };
        let mut out = Vec::with_capacity(4);
        if cut.y > self.y {
            out.push(Rect::new(self.x, self.y, self.width, cut.y - self.y));
        }
        if cut.bottom() < self.bottom() {
            out.push(Rect::new(self.x, cut.bottom(), self.width, self.bottom() - cut.bottom()));
        }
        if cut.x > self.x {
            out.push(Rect::new(self.x, cut.y, cut.x - self.x, cut.height));
        }
        if cut.right() < self.right() {
            out.push(Rect::new(cut.right(), cut.y, self.right() - cut.right(), cut.height));
        }
        out
    }
}

/// A union of disjoint rectangles, used as a clip mask.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Region {
    rects: Vec<Rect>,
}

impl Region {
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        if rect.is_empty() { Self::default() } else { Self { rects: vec![rect] } }
    }

    /// Remove `hole` from every band of the region.
    #[must_use]
    pub fn subtracted(&self, hole: &Rect) -> Self {
        Self { rects: self.rects.iter().flat_map(|r| r.subtract(hole)).collect() }
    }

    /// Shift every band by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self { rects: self.rects.iter().map(|r| r.translated(dx, dy)).collect() }
    }

    #[must_use]
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        self.rects.iter().any(|r| r.contains(pt))
    }

    /// Total covered area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.rects.iter().map(|r| r.width * r.height).sum()
    }
}
