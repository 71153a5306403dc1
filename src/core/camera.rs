use super::constants::*;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Orbit camera around the origin, parameterised by yaw, pitch and distance.
///
/// Dragging changes yaw/pitch, the wheel changes distance within
/// `[CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE]`. The camera always looks at the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub fovy_radians: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_eye(Vec3::from_array(CAMERA_START_EYE))
    }
}

impl OrbitCamera {
    pub fn from_eye(eye: Vec3) -> Self {
        let distance = eye
            .length()
            .clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
        let horizontal = (eye.x * eye.x + eye.z * eye.z).sqrt();
        Self {
            yaw: eye.x.atan2(eye.z),
            pitch: eye.y.atan2(horizontal).clamp(-CAMERA_PITCH_LIMIT, CAMERA_PITCH_LIMIT),
            distance,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(sy * cp, sp, cy * cp) * self.distance
    }

    /// Rotate by a pointer drag of `dx`, `dy` pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * CAMERA_ROTATE_SPEED;
        self.pitch = (self.pitch + dy * CAMERA_ROTATE_SPEED)
            .clamp(-CAMERA_PITCH_LIMIT, CAMERA_PITCH_LIMIT);
    }

    /// Zoom by a wheel delta; positive moves away.
    pub fn zoom(&mut self, wheel_delta: f32) {
        let factor = (1.0 + wheel_delta * CAMERA_ZOOM_SPEED).max(0.1);
        self.distance = (self.distance * factor).clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, aspect.max(1e-3), CAMERA_NEAR, CAMERA_FAR)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// World-space ray through pixel (`sx`, `sy`) of a `width` x `height` viewport.
    ///
    /// Returns `(ray_origin, ray_direction)`.
    pub fn screen_to_world_ray(&self, width: f32, height: f32, sx: f32, sy: f32) -> (Vec3, Vec3) {
        let ndc_x = (2.0 * sx / width.max(1.0)) - 1.0;
        let ndc_y = 1.0 - (2.0 * sy / height.max(1.0));
        let inv = self.view_proj(width / height.max(1.0)).inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        let ro = self.eye();
        let rd = (p1 - ro).normalize();
        (ro, rd)
    }

    /// Pixel position of world point `p`, or `None` when it is behind the camera.
    pub fn world_to_screen(&self, p: Vec3, width: f32, height: f32) -> Option<Vec2> {
        let clip = self.view_proj(width / height.max(1.0)) * p.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * width,
            (1.0 - ndc.y) * 0.5 * height,
        ))
    }
}

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Index of the nearest sphere hit by the ray, if any.
pub fn pick_nearest(
    ray_origin: Vec3,
    ray_dir: Vec3,
    spheres: impl IntoIterator<Item = (Vec3, f32)>,
) -> Option<usize> {
    let mut best = None::<(usize, f32)>;
    for (i, (center, radius)) in spheres.into_iter().enumerate() {
        if let Some(t) = ray_sphere(ray_origin, ray_dir, center, radius) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((i, t)),
            }
        }
    }
    best.map(|(i, _)| i)
}
