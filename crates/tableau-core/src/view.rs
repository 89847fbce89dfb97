//! The capability set the presentation needs from a page.
//!
//! Implementations must treat a missing element as a no-op; nothing here can
//! fail.

use crate::audio::Cue;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementId {
    Body,
    SceneContainer,
    LoadingOverlay,
    LoadingText,
    DropMessage,
    QuoteContainer,
    PrimaryQuote,
    SecondaryQuote,
    FloatingQuote,
    ButtonContainer,
    GlitchText,
    RequestButton,
}

/// How an element is found in the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Locator {
    Body,
    Id(&'static str),
    Selector(&'static str),
}

impl ElementId {
    pub fn locator(self) -> Locator {
        match self {
            ElementId::Body => Locator::Body,
            ElementId::SceneContainer => Locator::Id("scene-container"),
            ElementId::LoadingOverlay => Locator::Id("loadingScreen"),
            ElementId::LoadingText => Locator::Selector(".loading-text"),
            ElementId::DropMessage => Locator::Id("dropMessage"),
            ElementId::QuoteContainer => Locator::Id("quoteContainer"),
            ElementId::PrimaryQuote => Locator::Id("primaryQuote"),
            ElementId::SecondaryQuote => Locator::Id("secondaryQuote"),
            ElementId::FloatingQuote => Locator::Id("floatingQuote"),
            ElementId::ButtonContainer => Locator::Id("buttonContainer"),
            ElementId::GlitchText => Locator::Id("glitchText"),
            ElementId::RequestButton => Locator::Id("requestButton"),
        }
    }
}

/// Buttons the script places inside the button container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonKind {
    Seat,
    RequestAccess,
}

impl ButtonKind {
    pub fn dom_id(self) -> &'static str {
        match self {
            ButtonKind::Seat => "seatButton",
            ButtonKind::RequestAccess => "requestButton",
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            ButtonKind::Seat => "action-button",
            ButtonKind::RequestAccess => "action-button pulsing-button",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ButtonKind::Seat => crate::constants::TEXT_SEAT_BUTTON,
            ButtonKind::RequestAccess => crate::constants::TEXT_REQUEST_BUTTON,
        }
    }

    pub fn from_dom_id(id: &str) -> Option<Self> {
        match id {
            "seatButton" => Some(ButtonKind::Seat),
            "requestButton" => Some(ButtonKind::RequestAccess),
            _ => None,
        }
    }
}

pub trait View {
    /// Current text content, `None` when the element is missing.
    fn text(&self, el: ElementId) -> Option<String>;
    fn set_text(&mut self, el: ElementId, text: &str);
    fn set_opacity(&mut self, el: ElementId, opacity: f32);
    /// Vertical offset in CSS pixels, applied as a transform.
    fn set_translate_y(&mut self, el: ElementId, px: f32);
    fn set_visible(&mut self, el: ElementId, visible: bool);
    fn set_style(&mut self, el: ElementId, property: &str, value: &str);
    fn add_class(&mut self, el: ElementId, class: &str);
    fn remove_class(&mut self, el: ElementId, class: &str);
    /// Replace the button container's content with a single button.
    fn show_button(&mut self, button: ButtonKind);
    fn navigate(&mut self, url: &str);
}

pub trait CuePlayer {
    /// Restart `cue` from the beginning. `pan` is a stereo position in
    /// \[-1, 1\] where supported.
    fn play(&mut self, cue: Cue, pan: Option<f32>);
}

/// Everything the session drives.
pub trait Stage: View + CuePlayer {}

impl<T: View + CuePlayer> Stage for T {}
