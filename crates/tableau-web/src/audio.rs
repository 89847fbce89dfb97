use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use tableau_core::Cue;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Something the browser told us about a cue. Queued from callbacks and
/// drained into the session once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioNote {
    Playing(Cue, bool),
    Rejected(Cue),
}

pub type NoteQueue = Rc<RefCell<Vec<AudioNote>>>;

// Stereo routing for the creak. Built lazily: an AudioContext created before
// the first gesture starts suspended on most browsers.
struct PanRoute {
    ctx: web::AudioContext,
    panner: web::StereoPannerNode,
}

/// One preloaded `<audio>` element per cue.
pub struct CueBank {
    elements: Vec<(Cue, web::HtmlAudioElement)>,
    notes: NoteQueue,
    pan_route: Option<PanRoute>,
    pan_failed: bool,
}

impl CueBank {
    pub fn new(notes: NoteQueue) -> Self {
        let mut elements = Vec::with_capacity(Cue::ALL.len());
        for cue in Cue::ALL {
            let spec = cue.spec();
            match web::HtmlAudioElement::new_with_src(spec.path) {
                Ok(el) => {
                    el.set_volume(spec.volume);
                    el.set_loop(spec.looped);
                    el.set_preload("auto");
                    watch_state(&el, cue, &notes);
                    elements.push((cue, el));
                }
                Err(e) => log::warn!("[audio] {:?} element error: {:?}", cue, e),
            }
        }
        Self {
            elements,
            notes,
            pan_route: None,
            pan_failed: false,
        }
    }

    fn element(&self, cue: Cue) -> Option<&web::HtmlAudioElement> {
        self.elements.iter().find(|(c, _)| *c == cue).map(|(_, el)| el)
    }

    fn set_pan(&mut self, cue: Cue, pan: f32) {
        if self.pan_failed {
            return;
        }
        if self.pan_route.is_none() {
            let Some(el) = self.element(cue).cloned() else {
                return;
            };
            match build_pan_route(&el) {
                Ok(route) => self.pan_route = Some(route),
                Err(e) => {
                    log::warn!("[audio] stereo panning unavailable: {:?}", e);
                    self.pan_failed = true;
                    return;
                }
            }
        }
        if let Some(route) = &self.pan_route {
            _ = route.ctx.resume();
            route.panner.pan().set_value(pan.clamp(-1.0, 1.0));
        }
    }

    pub fn play_cue(&mut self, cue: Cue, pan: Option<f32>) {
        // only the creak is routed through the panner
        if let (Cue::ChairCreak, Some(p)) = (cue, pan) {
            self.set_pan(cue, p);
        }
        let Some(el) = self.element(cue) else {
            return;
        };
        el.set_current_time(0.0);
        match el.play() {
            Ok(promise) => {
                let notes = self.notes.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::debug!("[audio] {:?} refused: {:?}", cue, e);
                        notes.borrow_mut().push(AudioNote::Rejected(cue));
                    }
                });
            }
            Err(e) => {
                log::debug!("[audio] {:?} play threw: {:?}", cue, e);
                self.notes.borrow_mut().push(AudioNote::Rejected(cue));
            }
        }
    }
}

fn build_pan_route(el: &web::HtmlAudioElement) -> Result<PanRoute, JsValue> {
    let ctx = web::AudioContext::new()?;
    let source = ctx.create_media_element_source(el)?;
    let panner = web::StereoPannerNode::new(&ctx)?;
    source.connect_with_audio_node(&panner)?;
    panner.connect_with_audio_node(&ctx.destination())?;
    Ok(PanRoute { ctx, panner })
}

fn watch_state(el: &web::HtmlAudioElement, cue: Cue, notes: &NoteQueue) {
    let target: &web::EventTarget = el.unchecked_ref();
    for (event, playing) in [("playing", true), ("pause", false), ("ended", false)] {
        let notes = notes.clone();
        dom::listen::<web::Event>(target, event, move |_| {
            notes.borrow_mut().push(AudioNote::Playing(cue, playing));
        });
    }
}

/// Take every queued note, oldest first.
pub fn drain(notes: &NoteQueue) -> Vec<AudioNote> {
    std::mem::take(&mut *notes.borrow_mut())
}
