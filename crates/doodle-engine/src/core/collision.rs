use glam::Vec2;

/// Axis-aligned bounding box covering `[min.x, min.x + size.x) × [min.y, min.y + size.y)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap on both axes. Boxes that only share an edge or a corner
    /// do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }

    /// Point strictly inside the box (the border does not count).
    pub fn contains_strict(&self, p: Vec2) -> bool {
        let max = self.max();
        self.min.x < p.x && p.x < max.x && self.min.y < p.y && p.y < max.y
    }

    /// Whether any edge is at or beyond the playfield `[0, bounds.x] × [0, bounds.y]`.
    pub fn touches_edge(&self, bounds: Vec2) -> bool {
        let max = self.max();
        self.min.x <= 0.0 || self.min.y <= 0.0 || max.x >= bounds.x || max.y >= bounds.y
    }
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_boxes_collide() {
        let a = Aabb::from_xywh(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::from_xywh(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn edge_contact_is_not_a_collision() {
        let a = Aabb::from_xywh(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&Aabb::from_xywh(10.0, 10.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Aabb::from_xywh(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Aabb::from_xywh(0.0, -10.0, 10.0, 10.0)));
    }

    #[test]
    fn contains_excludes_border() {
        let a = Aabb::from_xywh(0.0, 0.0, 10.0, 10.0);
        assert!(a.contains_strict(Vec2::new(5.0, 5.0)));
        assert!(!a.contains_strict(Vec2::new(0.0, 5.0)));
        assert!(!a.contains_strict(Vec2::new(5.0, 10.0)));
    }

    #[test]
    fn edge_touch_includes_boundary() {
        let bounds = Vec2::new(100.0, 100.0);
        assert!(!Aabb::from_xywh(10.0, 10.0, 10.0, 10.0).touches_edge(bounds));
        assert!(Aabb::from_xywh(0.0, 10.0, 10.0, 10.0).touches_edge(bounds));
        assert!(Aabb::from_xywh(90.0, 10.0, 10.0, 10.0).touches_edge(bounds));
        assert!(Aabb::from_xywh(50.0, 120.0, 10.0, 10.0).touches_edge(bounds));
    }

    #[test]
    fn distance_is_euclidean() {
        assert!((distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
    }
}
