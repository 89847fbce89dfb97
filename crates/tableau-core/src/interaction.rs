use crate::constants::{
    CLICK_EASTER_EGG, TILT_PAN_RANGE_DEG, TILT_THRESHOLD_DEG,
};

/// What a single `deviceorientation` reading should do.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TiltResponse {
    /// Stereo pan for the chair creak, when it should play.
    pub creak_pan: Option<f32>,
    /// Whether the camera follows the tilt.
    pub move_camera: bool,
}

pub fn tilt_response(gamma_deg: Option<f32>, loaded: bool, idle: bool) -> TiltResponse {
    let gamma = match gamma_deg {
        Some(g) if g != 0.0 && g.is_finite() && loaded => g,
        _ => return TiltResponse::default(),
    };
    let creak_pan = (gamma.abs() > TILT_THRESHOLD_DEG)
        .then(|| (gamma / TILT_PAN_RANGE_DEG).clamp(-1.0, 1.0));
    TiltResponse {
        creak_pan,
        move_camera: idle,
    }
}

/// Seat-button click bookkeeping. The count is never reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClickCounter {
    count: u32,
}

impl ClickCounter {
    /// Register a click and return its 1-based number.
    pub fn click(&mut self) -> u32 {
        self.count = self.count.saturating_add(1);
        self.count
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

pub fn is_easter_egg(click: u32) -> bool {
    click == CLICK_EASTER_EGG
}
