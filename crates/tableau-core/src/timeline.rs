//! Declarative choreography: timelines of `{action, hold}` steps run by a
//! single driver, plus the opacity/offset tracks that fades animate.
//!
//! Nothing here reads a clock. The session advances the driver by the frame
//! delta, which keeps every timeline testable with synthetic time.

use crate::audio::Cue;
use crate::tween::{Ease, Tween};
use crate::view::{ButtonKind, ElementId, Stage};
use fnv::FnvHashMap;
use std::borrow::Cow;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    SetText(ElementId, Cow<'static, str>),
    SetStyle(ElementId, &'static str, &'static str),
    AddClass(ElementId, &'static str),
    RemoveClass(ElementId, &'static str),
    /// Tween opacity from its current value.
    Fade {
        el: ElementId,
        to: f32,
        secs: f32,
        ease: Ease,
    },
    /// Tween opacity and vertical offset together.
    Drift {
        el: ElementId,
        to_opacity: f32,
        dy_px: f32,
        secs: f32,
        ease: Ease,
    },
    Play(Cue),
    ShowButton(ButtonKind),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub action: Option<Action>,
    /// Delay between this step firing and the next one.
    pub hold_sec: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    pub label: &'static str,
    pub steps: Vec<Step>,
}

impl Timeline {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            steps: Vec::new(),
        }
    }

    /// Fire `action` and continue immediately.
    pub fn then(mut self, action: Action) -> Self {
        self.steps.push(Step {
            action: Some(action),
            hold_sec: 0.0,
        });
        self
    }

    /// Extend the delay after the most recent step.
    pub fn hold(mut self, secs: f32) -> Self {
        match self.steps.last_mut() {
            Some(step) => step.hold_sec += secs.max(0.0),
            None => self.steps.push(Step {
                action: None,
                hold_sec: secs.max(0.0),
            }),
        }
        self
    }

    /// Start a fade and wait for it to finish.
    pub fn fade(self, el: ElementId, to: f32, secs: f32) -> Self {
        self.then(Action::Fade {
            el,
            to,
            secs,
            ease: Ease::default(),
        })
        .hold(secs)
    }

    /// Start a fade without waiting for it.
    pub fn fade_async(self, el: ElementId, to: f32, secs: f32) -> Self {
        self.then(Action::Fade {
            el,
            to,
            secs,
            ease: Ease::default(),
        })
    }

    /// Total scripted length in seconds.
    pub fn duration_sec(&self) -> f32 {
        self.steps.iter().map(|s| s.hold_sec).sum()
    }
}

struct Running {
    timeline: Timeline,
    next: usize,
    wait_sec: f32,
}

impl Running {
    fn finished(&self) -> bool {
        self.next >= self.timeline.steps.len()
    }
}

#[derive(Default)]
struct Track {
    opacity: f32,
    translate_y: f32,
    opacity_tween: Option<Tween<f32>>,
    translate_tween: Option<Tween<f32>>,
}

/// Runs any number of timelines side by side and animates element tracks.
/// Every element starts fully transparent with no offset.
#[derive(Default)]
pub struct Choreographer {
    running: Vec<Running>,
    tracks: FnvHashMap<ElementId, Track>,
}

impl Choreographer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play(&mut self, timeline: Timeline) {
        log::debug!(
            "[timeline] start {} ({} steps, {:.1}s)",
            timeline.label,
            timeline.steps.len(),
            timeline.duration_sec()
        );
        self.running.push(Running {
            timeline,
            next: 0,
            wait_sec: 0.0,
        });
    }

    pub fn is_running(&self, label: &str) -> bool {
        self.running.iter().any(|r| r.timeline.label == label)
    }

    pub fn running_count(&self) -> usize {
        self.running.len()
    }

    pub fn is_animating(&self, el: ElementId) -> bool {
        self.tracks
            .get(&el)
            .is_some_and(|t| t.opacity_tween.is_some() || t.translate_tween.is_some())
    }

    pub fn opacity(&self, el: ElementId) -> f32 {
        self.tracks.get(&el).map(|t| t.opacity).unwrap_or(0.0)
    }

    /// Start `timeline` and fire its leading zero-hold steps immediately.
    pub fn play_now<S: Stage + ?Sized>(&mut self, timeline: Timeline, stage: &mut S) {
        self.play(timeline);
        self.fire_due(0.0, stage);
    }

    /// Advance tweens by `dt_sec`, then fire every step that has come due.
    pub fn advance<S: Stage + ?Sized>(&mut self, dt_sec: f32, stage: &mut S) {
        self.step_tracks(dt_sec, stage);
        self.fire_due(dt_sec, stage);
    }

    fn fire_due<S: Stage + ?Sized>(&mut self, dt_sec: f32, stage: &mut S) {
        let mut due: Vec<Action> = Vec::new();
        for run in &mut self.running {
            run.wait_sec -= dt_sec;
            while !run.finished() && run.wait_sec <= 0.0 {
                let step = &run.timeline.steps[run.next];
                if let Some(action) = &step.action {
                    due.push(action.clone());
                }
                run.wait_sec += step.hold_sec;
                run.next += 1;
            }
        }
        self.running.retain(|r| {
            let done = r.finished() && r.wait_sec <= 0.0;
            if done {
                log::debug!("[timeline] done {}", r.timeline.label);
            }
            !done
        });

        for action in due {
            self.apply(action, stage);
        }
    }

    fn step_tracks<S: Stage + ?Sized>(&mut self, dt_sec: f32, stage: &mut S) {
        for (el, track) in self.tracks.iter_mut() {
            if let Some(tw) = track.opacity_tween.as_mut() {
                track.opacity = tw.step(dt_sec);
                stage.set_opacity(*el, track.opacity);
                if tw.finished() {
                    track.opacity_tween = None;
                }
            }
            if let Some(tw) = track.translate_tween.as_mut() {
                track.translate_y = tw.step(dt_sec);
                stage.set_translate_y(*el, track.translate_y);
                if tw.finished() {
                    track.translate_tween = None;
                }
            }
        }
    }

    /// Apply one action right now.
    pub fn apply<S: Stage + ?Sized>(&mut self, action: Action, stage: &mut S) {
        match action {
            Action::SetText(el, text) => stage.set_text(el, &text),
            Action::SetStyle(el, prop, value) => {
                if prop == "opacity" {
                    if let Ok(v) = value.parse::<f32>() {
                        let track = self.tracks.entry(el).or_default();
                        track.opacity = v;
                        track.opacity_tween = None;
                    }
                }
                stage.set_style(el, prop, value)
            }
            Action::AddClass(el, class) => stage.add_class(el, class),
            Action::RemoveClass(el, class) => stage.remove_class(el, class),
            Action::Fade { el, to, secs, ease } => {
                let track = self.tracks.entry(el).or_default();
                track.opacity_tween = Some(Tween::new(track.opacity, to, secs, ease));
            }
            Action::Drift {
                el,
                to_opacity,
                dy_px,
                secs,
                ease,
            } => {
                let track = self.tracks.entry(el).or_default();
                track.opacity_tween = Some(Tween::new(track.opacity, to_opacity, secs, ease));
                track.translate_tween = Some(Tween::new(
                    track.translate_y,
                    track.translate_y + dy_px,
                    secs,
                    ease,
                ));
            }
            Action::Play(cue) => stage.play(cue, None),
            Action::ShowButton(button) => stage.show_button(button),
        }
    }
}
