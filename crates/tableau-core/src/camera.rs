//! Camera description plus the scripted dolly and idle drift.
//!
//! The rig owns the only mutable camera in the scene. The dolly runs once
//! after a model is installed; when it completes the rig flips to idle and
//! the per-frame drift takes over. Device tilt nudges the camera only while
//! idle.

use crate::constants::*;
use crate::tween::{Ease, Tween};
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: CAMERA_START,
            target: CAMERA_START_LOOK,
            up: Vec3::Y,
            aspect: sanitize_aspect(aspect),
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[inline]
fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}

struct Dolly {
    eye: Tween<Vec3>,
    look: Tween<Vec3>,
}

pub struct CameraRig {
    pub camera: Camera,
    dolly: Option<Dolly>,
    dolly_started: bool,
    idle: bool,
}

impl CameraRig {
    pub fn new(aspect: f32) -> Self {
        Self {
            camera: Camera::new(aspect),
            dolly: None,
            dolly_started: false,
            idle: false,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.idle
    }

    pub fn dolly_running(&self) -> bool {
        self.dolly.is_some()
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.aspect = sanitize_aspect(aspect);
    }

    /// Begin the one-shot dolly from wherever the camera currently is.
    /// Returns false if it already ran.
    pub fn start_dolly(&mut self) -> bool {
        if self.dolly_started {
            return false;
        }
        self.dolly_started = true;
        self.dolly = Some(Dolly {
            eye: Tween::new(
                self.camera.eye,
                CAMERA_DOLLY_END,
                CAMERA_DOLLY_SEC,
                Ease::Power1InOut,
            ),
            look: Tween::new(
                CAMERA_START_LOOK,
                CAMERA_DOLLY_END_LOOK,
                CAMERA_DOLLY_SEC,
                Ease::Power1InOut,
            ),
        });
        true
    }

    /// Advance the dolly. Returns true exactly once, on the frame it completes.
    pub fn step(&mut self, dt_sec: f32) -> bool {
        let Some(dolly) = self.dolly.as_mut() else {
            return false;
        };
        self.camera.eye = dolly.eye.step(dt_sec);
        self.camera.target = dolly.look.step(dt_sec);
        if dolly.eye.finished() {
            self.dolly = None;
            self.idle = true;
            log::info!("[camera] dolly complete; idle drift on");
            return true;
        }
        false
    }

    /// Periodic sway applied every frame once idle.
    pub fn apply_idle_drift(&mut self, wall_ms: f64) {
        if !self.idle {
            return;
        }
        let (x, y) = idle_offsets(wall_ms);
        self.camera.eye.x = x;
        self.camera.eye.y = y;
        self.camera.target = IDLE_LOOK;
    }

    /// Nudge the camera sideways from device tilt; ignored until idle.
    pub fn apply_tilt(&mut self, gamma_deg: f32) -> bool {
        if !self.idle {
            return false;
        }
        self.camera.eye.x = gamma_deg * TILT_CAMERA_GAIN;
        self.camera.target = TILT_LOOK;
        true
    }
}

/// Idle camera `(x, y)` for a wall-clock time in milliseconds.
pub fn idle_offsets(wall_ms: f64) -> (f32, f32) {
    // phase stays in f64: epoch milliseconds overflow f32 precision
    let t = wall_ms * IDLE_TIME_SCALE;
    (
        t.sin() as f32 * IDLE_SWAY_X,
        IDLE_BASE_Y + (t * IDLE_BOB_RATE as f64).sin() as f32 * IDLE_BOB_Y,
    )
}
