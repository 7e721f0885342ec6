use glam::Vec3;

/// Drawable area in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    /// Landscape viewports apply the field of view horizontally.
    pub fn horizontal_fov(&self) -> bool {
        self.width > self.height
    }
}

/// Convert a screen-space drag into a camera-local pan at `distance`.
///
/// The result is scaled by the view frustum's half size at that distance so
/// the content under the cursor tracks the pointer regardless of zoom.
pub fn screen_to_world(dx: f32, dy: f32, distance: f32, fov: f32, viewport: Viewport) -> Vec3 {
    let ndc = Vec3::new(-(dx / viewport.width) * 2.0, (dy / viewport.height) * 2.0, 0.0);
    let half_slice = distance * (0.5 * fov).to_radians().tan();
    let aspect = viewport.aspect_ratio();
    let half_size = if viewport.horizontal_fov() {
        Vec3::new(half_slice, half_slice / aspect, 0.0)
    } else {
        Vec3::new(half_slice * aspect, half_slice, 0.0)
    };
    ndc * half_size
}
