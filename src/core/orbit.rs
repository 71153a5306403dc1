use super::bodies::OrbitalBody;
use super::constants::{SPIN_STEP_RAD, SUN_SPIN_RATE};
use glam::Vec3;

/// Position of `body` on its circular orbit after `elapsed_sec` seconds.
///
/// Pure function of the body's configuration and time: every body starts at
/// `(0, 0, distance)` at t = 0 and moves along the XZ plane. The angle is
/// wrapped in `f64` before narrowing so long sessions keep full precision.
#[inline]
pub fn update_position(body: &OrbitalBody, elapsed_sec: f64) -> Vec3 {
    let theta = (elapsed_sec * f64::from(body.speed)).rem_euclid(std::f64::consts::TAU) as f32;
    Vec3::new(
        body.distance * theta.sin(),
        0.0,
        body.distance * theta.cos(),
    )
}

/// Self-rotation added to a planet on every rendered frame.
///
/// The step does not scale with frame duration, so perceived spin follows the frame rate.
#[inline]
pub fn advance_spin_rotation(_body: &OrbitalBody) -> f32 {
    SPIN_STEP_RAD
}

/// Per-frame derived state of a body, applied to the renderer by the frame loop.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BodyPose {
    pub position: Vec3,
    pub spin: f32,
}

#[inline]
pub fn next_pose(body: &OrbitalBody, prev: &BodyPose, elapsed_sec: f64) -> BodyPose {
    BodyPose {
        position: update_position(body, elapsed_sec),
        spin: (prev.spin + advance_spin_rotation(body)) % std::f32::consts::TAU,
    }
}

/// Holds the body table and the poses derived from it.
///
/// `step` is the only mutation: it replaces each pose with `next_pose` in place,
/// so a frame never allocates.
pub struct OrbitAnimator {
    bodies: Vec<OrbitalBody>,
    poses: Vec<BodyPose>,
    sun_spin: f32,
}

impl OrbitAnimator {
    pub fn new(bodies: &[OrbitalBody]) -> Self {
        let poses = bodies
            .iter()
            .map(|b| BodyPose {
                position: update_position(b, 0.0),
                spin: 0.0,
            })
            .collect();
        Self {
            bodies: bodies.to_vec(),
            poses,
            sun_spin: 0.0,
        }
    }

    pub fn step(&mut self, elapsed_sec: f64, dt_sec: f32) {
        for (body, pose) in self.bodies.iter().zip(self.poses.iter_mut()) {
            *pose = next_pose(body, pose, elapsed_sec);
        }
        if dt_sec.is_finite() && dt_sec > 0.0 {
            self.sun_spin = (self.sun_spin + dt_sec * SUN_SPIN_RATE) % std::f32::consts::TAU;
        }
    }

    pub fn bodies(&self) -> &[OrbitalBody] {
        &self.bodies
    }

    pub fn poses(&self) -> &[BodyPose] {
        &self.poses
    }

    pub fn sun_spin(&self) -> f32 {
        self.sun_spin
    }
}

/// Monotonic animation clock fed with frame deltas.
///
/// While paused, deltas are dropped, so orbits freeze and resume where they stopped.
/// Elapsed time is kept in `f64`: an `f32` sum stops absorbing 16 ms deltas after a few days.
#[derive(Clone, Debug, Default)]
pub struct AnimationClock {
    elapsed_sec: f64,
    paused: bool,
}

impl AnimationClock {
    /// Advance by one frame delta and return the elapsed animation time.
    pub fn advance(&mut self, dt_sec: f32) -> f64 {
        if !self.paused && dt_sec.is_finite() && dt_sec > 0.0 {
            self.elapsed_sec += f64::from(dt_sec);
        }
        self.elapsed_sec
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed_sec
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }
}
