use glam::Vec3;

/// Axis-aligned bounding box stored as center and half-extents.
///
/// Invariant: every component of `half_extents` is >= 0. The constructors
/// enforce this by taking absolute values or sorting corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            half_extents: Vec3::splat(0.5),
        }
    }
}

impl BoundingBox {
    /// Create a box from a center point and half-extents.
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
        }
    }

    /// Create a box from two corners. Components are sorted so the result
    /// is valid regardless of corner order.
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self {
            center: (min + max) * 0.5,
            half_extents: (max - min) * 0.5,
        }
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Returns true if the point lies inside or on the boundary.
    pub fn contains_point(&self, p: Vec3) -> bool {
        let min = self.min();
        let max = self.max();
        p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y && p.z >= min.z && p.z <= max.z
    }

    /// Radius of the bounding sphere that encloses the box.
    pub fn radius(&self) -> f32 {
        self.half_extents.length()
    }

    /// Returns the smallest box enclosing both self and other.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox::from_corners(self.min().min(other.min()), self.max().max(other.max()))
    }
}
