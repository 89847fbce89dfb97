// Recording stand-in for the browser page. Every call is appended to `log`
// so tests can assert on order as well as content.

#![allow(dead_code)]

use tableau_core::{ButtonKind, Cue, CuePlayer, ElementId, View};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Text(ElementId, String),
    Opacity(ElementId, f32),
    TranslateY(ElementId, f32),
    Visible(ElementId, bool),
    Style(ElementId, String, String),
    AddClass(ElementId, String),
    RemoveClass(ElementId, String),
    Button(ButtonKind),
    Navigate(String),
    Play(Cue, Option<f32>),
}

#[derive(Default)]
pub struct FakeStage {
    pub log: Vec<Call>,
}

impl FakeStage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.log.iter().filter(|c| pred(c)).count()
    }

    pub fn texts(&self, el: ElementId) -> Vec<String> {
        self.log
            .iter()
            .filter_map(|c| match c {
                Call::Text(e, t) if *e == el => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn plays(&self, cue: Cue) -> usize {
        self.count(|c| matches!(c, Call::Play(c2, _) if *c2 == cue))
    }

    pub fn buttons(&self) -> Vec<ButtonKind> {
        self.log
            .iter()
            .filter_map(|c| match c {
                Call::Button(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    pub fn last_opacity(&self, el: ElementId) -> Option<f32> {
        self.log.iter().rev().find_map(|c| match c {
            Call::Opacity(e, v) if *e == el => Some(*v),
            _ => None,
        })
    }

    pub fn has_class_event(&self, el: ElementId, class: &str, added: bool) -> bool {
        self.log.iter().any(|c| match c {
            Call::AddClass(e, k) if added => *e == el && k == class,
            Call::RemoveClass(e, k) if !added => *e == el && k == class,
            _ => false,
        })
    }

    pub fn clear(&mut self) {
        self.log.clear();
    }
}

impl View for FakeStage {
    fn text(&self, el: ElementId) -> Option<String> {
        self.texts(el).pop()
    }
    fn set_text(&mut self, el: ElementId, text: &str) {
        self.log.push(Call::Text(el, text.to_string()));
    }
    fn set_opacity(&mut self, el: ElementId, opacity: f32) {
        self.log.push(Call::Opacity(el, opacity));
    }
    fn set_translate_y(&mut self, el: ElementId, px: f32) {
        self.log.push(Call::TranslateY(el, px));
    }
    fn set_visible(&mut self, el: ElementId, visible: bool) {
        self.log.push(Call::Visible(el, visible));
    }
    fn set_style(&mut self, el: ElementId, property: &str, value: &str) {
        self.log
            .push(Call::Style(el, property.to_string(), value.to_string()));
    }
    fn add_class(&mut self, el: ElementId, class: &str) {
        self.log.push(Call::AddClass(el, class.to_string()));
    }
    fn remove_class(&mut self, el: ElementId, class: &str) {
        self.log.push(Call::RemoveClass(el, class.to_string()));
    }
    fn show_button(&mut self, button: ButtonKind) {
        self.log.push(Call::Button(button));
    }
    fn navigate(&mut self, url: &str) {
        self.log.push(Call::Navigate(url.to_string()));
    }
}

impl CuePlayer for FakeStage {
    fn play(&mut self, cue: Cue, pan: Option<f32>) {
        self.log.push(Call::Play(cue, pan));
    }
}

/// Step `secs` of synthetic time in frames of `dt`.
pub fn run_frames(
    session: &mut tableau_core::Session,
    stage: &mut FakeStage,
    secs: f32,
    dt: f32,
    wall_ms: &mut f64,
) -> Vec<tableau_core::FetchOrder> {
    let mut orders = Vec::new();
    let frames = (secs / dt).round() as usize;
    for _ in 0..frames {
        *wall_ms += (dt * 1000.0) as f64;
        if let Some(order) = session.frame(dt, *wall_ms, stage) {
            orders.push(order);
        }
    }
    orders
}
