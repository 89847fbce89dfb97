//! The per-page context object. Every browser callback lands on one of the
//! `on_*` methods here; the frame loop calls [`Session::frame`].

use crate::audio::{AudioRegistry, Cue};
use crate::camera::CameraRig;
use crate::constants::*;
use crate::error::LoadError;
use crate::interaction::{is_easter_egg, tilt_response, ClickCounter};
use crate::loader::{is_model_file, LoadEffect, LoadMachine, LoaderTiming, ModelSource, Ticket};
use crate::placeholder::build_placeholder;
use crate::scene::{ModelKind, Scene, SceneModel};
use crate::script;
use crate::timeline::Choreographer;
use crate::view::{ElementId, Stage};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    pub loader: LoaderTiming,
    pub aspect: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            loader: LoaderTiming::default(),
            aspect: 16.0 / 9.0,
        }
    }
}

/// A fetch the front end must start. The result comes back through
/// [`Session::on_model_ready`] with the same ticket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOrder {
    pub ticket: Ticket,
    pub source: ModelSource,
}

pub struct Session {
    pub scene: Scene,
    pub rig: CameraRig,
    loader: LoadMachine,
    choreo: Choreographer,
    audio: AudioRegistry,
    clicks: ClickCounter,
    loaded: bool,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            scene: Scene::new(),
            rig: CameraRig::new(config.aspect),
            loader: LoadMachine::new(config.loader),
            choreo: Choreographer::new(),
            audio: AudioRegistry::new(),
            clicks: ClickCounter::default(),
            loaded: false,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn click_count(&self) -> u32 {
        self.clicks.count()
    }

    pub fn loader(&self) -> &LoadMachine {
        &self.loader
    }

    pub fn choreographer(&self) -> &Choreographer {
        &self.choreo
    }

    pub fn audio(&self) -> &AudioRegistry {
        &self.audio
    }

    /// Advance timers, choreography and the camera by one frame.
    pub fn frame<S: Stage + ?Sized>(
        &mut self,
        dt_sec: f32,
        wall_ms: f64,
        stage: &mut S,
    ) -> Option<FetchOrder> {
        let dt = dt_sec.max(0.0);
        let effects = self.loader.advance(dt);
        let order = self.apply_effects(effects, stage);

        self.choreo.advance(dt, stage);
        if self.rig.step(dt) {
            self.choreo.play_now(script::intro(), stage);
        }
        self.rig.apply_idle_drift(wall_ms);
        order
    }

    pub fn on_resize(&mut self, aspect: f32) {
        self.rig.set_aspect(aspect);
    }

    fn apply_effects<S: Stage + ?Sized>(
        &mut self,
        effects: crate::loader::Effects,
        stage: &mut S,
    ) -> Option<FetchOrder> {
        let mut order = None;
        for effect in effects {
            match effect {
                LoadEffect::StartFetch { ticket, source } => {
                    order = Some(FetchOrder { ticket, source })
                }
                LoadEffect::HideDropMessage => stage.set_visible(ElementId::DropMessage, false),
                LoadEffect::SetStatus(text) => stage.set_text(ElementId::LoadingText, &text),
                LoadEffect::InstallPlaceholder => {
                    self.enter_loaded(build_placeholder(), ModelKind::Placeholder, stage)
                }
                // carried by on_model_ready, which holds the model
                LoadEffect::InstallReal(_) => {}
            }
        }
        order
    }

    fn enter_loaded<S: Stage + ?Sized>(&mut self, model: SceneModel, kind: ModelKind, stage: &mut S) {
        if !self.scene.install(model, kind) {
            return;
        }
        self.loaded = true;
        stage.set_visible(ElementId::LoadingOverlay, false);
        stage.add_class(ElementId::Body, CLASS_MODEL_LOADED);
        self.rig.start_dolly();
        log::info!("[session] {:?} model installed; dolly started", kind);
    }

    // ---- asset intake ----

    pub fn on_drag_over<S: Stage + ?Sized>(&mut self, stage: &mut S) {
        stage.add_class(ElementId::LoadingOverlay, CLASS_DROP_HIGHLIGHT);
        stage.add_class(ElementId::DropMessage, CLASS_DROP_DRAGOVER);
    }

    pub fn on_drag_leave<S: Stage + ?Sized>(&mut self, stage: &mut S) {
        stage.remove_class(ElementId::LoadingOverlay, CLASS_DROP_HIGHLIGHT);
        stage.remove_class(ElementId::DropMessage, CLASS_DROP_DRAGOVER);
    }

    /// A file landed on the overlay. Returns a fetch to start when the file
    /// is accepted.
    pub fn on_drop<S: Stage + ?Sized>(&mut self, file_name: &str, stage: &mut S) -> Option<FetchOrder> {
        self.on_drag_leave(stage);
        if self.loaded {
            return None;
        }
        if !is_model_file(file_name) {
            log::info!("[loader] rejected drop {}", file_name);
            let previous = stage.text(ElementId::LoadingText);
            self.choreo.play_now(script::drop_rejected(previous), stage);
            return None;
        }
        let effects = self.loader.on_drop(file_name);
        self.apply_effects(effects, stage)
    }

    pub fn on_fetch_progress<S: Stage + ?Sized>(
        &mut self,
        ticket: Ticket,
        loaded: u64,
        total: Option<u64>,
        stage: &mut S,
    ) {
        let effects = self.loader.on_progress(ticket, loaded, total);
        self.apply_effects(effects, stage);
    }

    /// A fetch finished: either a fully decoded model or the reason it failed.
    pub fn on_model_ready<S: Stage + ?Sized>(
        &mut self,
        ticket: Ticket,
        result: Result<SceneModel, LoadError>,
        stage: &mut S,
    ) {
        match result {
            Ok(model) => {
                let effects = self.loader.on_success(ticket);
                let install = effects.contains(&LoadEffect::InstallReal(ticket));
                self.apply_effects(effects, stage);
                if install {
                    self.enter_loaded(model, ModelKind::Real, stage);
                }
            }
            Err(err) => {
                let effects = self.loader.on_failure(ticket, &err.to_string());
                self.apply_effects(effects, stage);
            }
        }
    }

    // ---- buttons ----

    pub fn on_seat_click<S: Stage + ?Sized>(&mut self, stage: &mut S) {
        let n = self.clicks.click();
        log::info!("[seat] click {}", n);
        self.choreo.play_now(script::rejection(n), stage);
        if is_easter_egg(n) {
            self.choreo.play_now(script::easter_egg(), stage);
        }
    }

    pub fn on_request_hover<S: Stage + ?Sized>(&mut self, stage: &mut S) {
        stage.play(Cue::Whisper, None);
        stage.add_class(ElementId::RequestButton, CLASS_HEARTBEAT);
    }

    pub fn on_request_leave<S: Stage + ?Sized>(&mut self, stage: &mut S) {
        stage.remove_class(ElementId::RequestButton, CLASS_HEARTBEAT);
    }

    pub fn on_request_click<S: Stage + ?Sized>(&mut self, stage: &mut S) {
        stage.navigate(REQUEST_ACCESS_URL);
    }

    // ---- sensors and audio ----

    pub fn on_tilt<S: Stage + ?Sized>(&mut self, gamma_deg: Option<f32>, stage: &mut S) {
        let response = tilt_response(gamma_deg, self.loaded, self.rig.is_idle());
        if let Some(pan) = response.creak_pan {
            log::debug!("[tilt] gamma {:?} creak pan {:.2}", gamma_deg, pan);
            stage.play(Cue::ChairCreak, Some(pan));
        }
        if response.move_camera {
            if let Some(gamma) = gamma_deg {
                self.rig.apply_tilt(gamma);
            }
        }
    }

    /// Document click or touch: unlock audio.
    pub fn on_gesture<S: Stage + ?Sized>(&mut self, stage: &mut S) {
        for cue in self.audio.on_gesture() {
            stage.play(cue, None);
        }
    }

    pub fn on_audio_state(&mut self, cue: Cue, playing: bool) {
        self.audio.set_playing(cue, playing);
    }

    pub fn on_audio_rejected(&mut self, cue: Cue) {
        self.audio.defer(cue);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
