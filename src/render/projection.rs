use eframe::egui::{Pos2, Rect};

pub type Point3 = [f32; 3];

/// Orthographic camera looking at the origin.
///
/// World axes: x along the categories, y into the scene, z up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    sin_el: f32,
    cos_el: f32,
    sin_az: f32,
    cos_az: f32,
}

/// A projected point: `x`/`y` on the view plane (y up), `depth` grows
/// toward the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPoint {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
}

impl Camera {
    pub fn new(elevation_deg: f32, azimuth_deg: f32) -> Self {
        let (sin_el, cos_el) = elevation_deg.to_radians().sin_cos();
        let (sin_az, cos_az) = azimuth_deg.to_radians().sin_cos();
        Self {
            sin_el,
            cos_el,
            sin_az,
            cos_az,
        }
    }

    fn ground(&self, x: f32, y: f32) -> (f32, f32) {
        let u = x * self.cos_az + y * self.sin_az;
        let v = -x * self.sin_az + y * self.cos_az;
        (u, v)
    }

    pub fn project(&self, p: Point3) -> ViewPoint {
        let (u, v) = self.ground(p[0], p[1]);
        ViewPoint {
            x: u,
            y: v * self.sin_el + p[2] * self.cos_el,
            depth: -v * self.cos_el + p[2] * self.sin_el,
        }
    }

    /// Whether a face with outward normal `n` faces the viewer.
    pub fn faces_viewer(&self, n: Point3) -> bool {
        let (_, nv) = self.ground(n[0], n[1]);
        -nv * self.cos_el + n[2] * self.sin_el > 1e-6
    }
}

// ---------------------------------------------------------------------------
// View plane → screen
// ---------------------------------------------------------------------------

/// Uniform scale + translation fitting view-plane bounds into a screen rect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenFit {
    scale: f32,
    origin: Pos2,
    min_x: f32,
    max_y: f32,
}

impl ScreenFit {
    /// Fit the bounding box of `points` into `target`, centered.
    pub fn new(points: impl IntoIterator<Item = ViewPoint>, target: Rect) -> Self {
        let (mut min_x, mut max_x) = (f32::INFINITY, f32::NEG_INFINITY);
        let (mut min_y, mut max_y) = (f32::INFINITY, f32::NEG_INFINITY);
        for p in points {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        if !min_x.is_finite() {
            (min_x, max_x, min_y, max_y) = (0.0, 1.0, 0.0, 1.0);
        }
        let width = (max_x - min_x).max(f32::EPSILON);
        let height = (max_y - min_y).max(f32::EPSILON);
        let scale = (target.width() / width).min(target.height() / height);

        let used = eframe::egui::vec2(width * scale, height * scale);
        let origin = target.center() - used / 2.0;
        Self {
            scale,
            origin,
            min_x,
            max_y,
        }
    }

    pub fn to_screen(&self, p: ViewPoint) -> Pos2 {
        Pos2::new(
            self.origin.x + (p.x - self.min_x) * self.scale,
            self.origin.y + (self.max_y - p.y) * self.scale,
        )
    }
}
