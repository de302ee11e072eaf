use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, top-left origin, y grows downward.
///
/// Every entity hitbox in the simulation is one of these. Width and height
/// are expected to be non-negative; level validation enforces it for
/// authored data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// Standard AABB overlap test. Edge contact (zero-area overlap) does
    /// not count as an intersection.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Point containment, used for pointer hit-testing on buttons.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.left() && px < self.right() && py >= self.top() && py < self.bottom()
    }

    /// Move the rect so its bottom edge sits at `y`.
    pub fn set_bottom(&mut self, y: f32) {
        self.y = y - self.h;
    }

    /// Move the rect so its right edge sits at `x`.
    pub fn set_right(&mut self, x: f32) {
        self.x = x - self.w;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_rects_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn separated_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn edge_contact_is_not_intersection() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b), "Touching edges must not count as overlap");
    }

    #[test]
    fn contains_point() {
        let r = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(r.contains(12.0, 12.0));
        assert!(r.contains(10.0, 10.0));
        assert!(!r.contains(15.0, 12.0), "Right edge is exclusive");
        assert!(!r.contains(9.9, 12.0));
    }

    #[test]
    fn set_bottom_moves_rect() {
        let mut r = Rect::new(0.0, 0.0, 10.0, 20.0);
        r.set_bottom(100.0);
        assert_eq!(r.top(), 80.0);
        assert_eq!(r.bottom(), 100.0);
    }

    #[test]
    fn edge_accessors() {
        let r = Rect::new(3.0, 4.0, 10.0, 20.0);
        assert_eq!(r.left(), 3.0);
        assert_eq!(r.right(), 13.0);
        assert_eq!(r.top(), 4.0);
        assert_eq!(r.bottom(), 24.0);
        assert_eq!(r.center_x(), 8.0);
        assert_eq!(r.center_y(), 14.0);
    }
}
