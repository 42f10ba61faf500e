//! Axis-aligned collision detection
//!
//! Every simulated object is an axis-aligned rectangle. Two rectangles
//! collide only when they overlap with positive area: sharing an edge or a
//! corner is not a hit.

use glam::Vec2;

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }
}

/// Strict overlap test between two rectangles
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Anything that occupies an axis-aligned rectangle
pub trait Bounded {
    fn bounds(&self) -> Rect;
}

/// Check whether two bounded objects overlap
pub fn check_collision<A: Bounded + ?Sized, B: Bounded + ?Sized>(a: &A, b: &B) -> bool {
    rects_overlap(&a.bounds(), &b.bounds())
}
