#![cfg(target_arch = "wasm32")]
//! Browser front end: DOM, audio elements, streamed fetch and the WebGPU
//! scene pass, all driven through `tableau_core::Session`.

mod audio;
mod constants;
mod dom;
mod events;
mod fetch;
mod frame;
mod overlay;
mod render;

use audio::{AudioNote, CueBank, NoteQueue};
use dom::DomView;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use tableau_core::{
    ButtonKind, Cue, CuePlayer, ElementId, LoadError, SceneModel, Session, SessionConfig, Ticket,
    View,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tableau-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// The document plus the cue bank: everything a [`Session`] drives.
pub struct DomStage {
    view: DomView,
    cues: CueBank,
}

impl View for DomStage {
    fn text(&self, el: ElementId) -> Option<String> {
        self.view.text(el)
    }
    fn set_text(&mut self, el: ElementId, text: &str) {
        self.view.set_text(el, text)
    }
    fn set_opacity(&mut self, el: ElementId, opacity: f32) {
        self.view.set_opacity(el, opacity)
    }
    fn set_translate_y(&mut self, el: ElementId, px: f32) {
        self.view.set_translate_y(el, px)
    }
    fn set_visible(&mut self, el: ElementId, visible: bool) {
        self.view.set_visible(el, visible)
    }
    fn set_style(&mut self, el: ElementId, property: &str, value: &str) {
        self.view.set_style(el, property, value)
    }
    fn add_class(&mut self, el: ElementId, class: &str) {
        self.view.add_class(el, class)
    }
    fn remove_class(&mut self, el: ElementId, class: &str) {
        self.view.remove_class(el, class)
    }
    fn show_button(&mut self, button: ButtonKind) {
        self.view.show_button(button)
    }
    fn navigate(&mut self, url: &str) {
        self.view.navigate(url)
    }
}

impl CuePlayer for DomStage {
    fn play(&mut self, cue: Cue, pan: Option<f32>) {
        self.cues.play_cue(cue, pan)
    }
}

/// Shared by every callback and the frame loop.
pub struct App {
    pub session: RefCell<Session>,
    stage: RefCell<DomStage>,
    notes: NoteQueue,
}

impl App {
    pub fn with_stage<R>(&self, f: impl FnOnce(&mut Session, &mut DomStage) -> R) -> R {
        let mut session = self.session.borrow_mut();
        let mut stage = self.stage.borrow_mut();
        f(&mut session, &mut stage)
    }

    pub fn on_fetch_progress(&self, ticket: Ticket, loaded: u64, total: Option<u64>) {
        self.with_stage(|session, stage| session.on_fetch_progress(ticket, loaded, total, stage));
    }

    pub fn on_model_ready(&self, ticket: Ticket, result: Result<SceneModel, LoadError>) {
        self.with_stage(|session, stage| session.on_model_ready(ticket, result, stage));
    }

    /// Feed queued media-element events into the session.
    pub fn drain_audio(&self) {
        let notes = audio::drain(&self.notes);
        if notes.is_empty() {
            return;
        }
        let mut session = self.session.borrow_mut();
        for note in notes {
            match note {
                AudioNote::Playing(cue, playing) => session.on_audio_state(cue, playing),
                AudioNote::Rejected(cue) => session.on_audio_rejected(cue),
            }
        }
    }
}

/// Find or create the scene canvas. A missing `#scene-container` falls
/// back to `<body>`; `None` leaves the page running without a scene.
fn mount_canvas(document: &web::Document) -> Option<web::HtmlCanvasElement> {
    if let Some(existing) = document.get_element_by_id(constants::CANVAS_ID) {
        return existing.dyn_into().ok();
    }
    let canvas: web::HtmlCanvasElement = document.create_element("canvas").ok()?.dyn_into().ok()?;
    canvas.set_id(constants::CANVAS_ID);
    let style = canvas.style();
    _ = style.set_property("width", "100%");
    _ = style.set_property("height", "100%");
    _ = style.set_property("display", "block");

    let parent: web::Node = match document.get_element_by_id("scene-container") {
        Some(container) => container.into(),
        None => {
            log::warn!("[dom] #scene-container missing; mounting canvas on body");
            document.body()?.into()
        }
    };
    if let Err(e) = parent.append_child(&canvas) {
        log::warn!("[dom] canvas mount failed: {:?}", e);
        return None;
    }
    Some(canvas)
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas = mount_canvas(&document);
    if canvas.is_none() {
        log::warn!("[dom] no canvas; running without the 3D scene");
    }
    let aspect = canvas.as_ref().map_or(1.0, |c| {
        dom::sync_canvas_backing_size(c);
        c.width() as f32 / c.height().max(1) as f32
    });

    let notes: NoteQueue = Rc::new(RefCell::new(Vec::new()));
    let app = Rc::new(App {
        session: RefCell::new(Session::new(SessionConfig {
            aspect,
            ..SessionConfig::default()
        })),
        stage: RefCell::new(DomStage {
            view: DomView::new(document.clone()),
            cues: CueBank::new(notes.clone()),
        }),
        notes,
    });
    events::wire_all(&app, &window, &document, canvas.as_ref());

    // DOM choreography still runs without WebGPU; only the scene is blank.
    let gpu = match &canvas {
        Some(c) => frame::init_gpu(c).await,
        None => None,
    };
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        app,
        gpu,
        canvas,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
