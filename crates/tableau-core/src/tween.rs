//! Minimal easing and tweening used by the camera dolly and element fades.

use glam::Vec3;

/// Easing curves. `Power1*` are the quadratic family; `Power1Out` is the
/// default for fades that do not name a curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    Linear,
    Power1In,
    #[default]
    Power1Out,
    Power1InOut,
}

impl Ease {
    /// Map normalized progress `t` in \[0, 1\] to eased progress.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1In => t * t,
            Ease::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::Power1InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u / 2.0
                }
            }
        }
    }
}

pub trait Lerp: Copy {
    fn lerp_to(self, other: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp_to(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp_to(self, other: Self, t: f32) -> Self {
        self.lerp(other, t)
    }
}

#[derive(Clone, Debug)]
pub struct Tween<T: Lerp> {
    pub from: T,
    pub to: T,
    pub duration_sec: f32,
    pub ease: Ease,
    elapsed_sec: f32,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, duration_sec: f32, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration_sec: duration_sec.max(0.0),
            ease,
            elapsed_sec: 0.0,
        }
    }

    /// Advance by `dt_sec` and return the current value.
    pub fn step(&mut self, dt_sec: f32) -> T {
        self.elapsed_sec = (self.elapsed_sec + dt_sec.max(0.0)).min(self.duration_sec);
        self.value()
    }

    pub fn value(&self) -> T {
        self.from.lerp_to(self.to, self.ease.apply(self.progress()))
    }

    pub fn progress(&self) -> f32 {
        if self.duration_sec <= 0.0 {
            1.0
        } else {
            self.elapsed_sec / self.duration_sec
        }
    }

    pub fn finished(&self) -> bool {
        self.progress() >= 1.0
    }
}
