//! The hand-authored beats of the piece, expressed as timelines.

use crate::audio::Cue;
use crate::constants::*;
use crate::timeline::{Action, Timeline};
use crate::tween::Ease;
use crate::view::{ButtonKind, ElementId};

pub const INTRO: &str = "intro";
pub const REJECTION: &str = "rejection";
pub const EASTER_EGG: &str = "easter-egg";
pub const DROP_REJECTED: &str = "drop-rejected";

/// Quotes, the floating line and the seat button. Starts when the dolly ends.
pub fn intro() -> Timeline {
    use ElementId::*;
    Timeline::new(INTRO)
        .hold(1.0)
        // first line
        .then(Action::SetText(PrimaryQuote, TEXT_QUOTE_FIRST.into()))
        .then(Action::RemoveClass(PrimaryQuote, CLASS_GLITCH))
        .fade(QuoteContainer, 1.0, 1.0)
        .hold(2.0)
        .fade(QuoteContainer, 0.0, 1.0)
        // second line
        .then(Action::SetText(PrimaryQuote, "".into()))
        .then(Action::SetText(SecondaryQuote, TEXT_QUOTE_SECOND.into()))
        .then(Action::RemoveClass(SecondaryQuote, CLASS_GLITCH))
        .fade(QuoteContainer, 1.0, 1.0)
        .hold(2.0)
        .fade(QuoteContainer, 0.0, 1.0)
        .hold(2.0)
        // floating line: rises like mist while the chime plays
        .then(Action::SetStyle(FloatingQuote, "top", "40%"))
        .then(Action::SetStyle(FloatingQuote, "left", "0"))
        .then(Action::SetStyle(FloatingQuote, "width", "100%"))
        .then(Action::SetStyle(FloatingQuote, "fontSize", "1.5rem"))
        .then(Action::SetStyle(FloatingQuote, "opacity", "0"))
        .then(Action::AddClass(FloatingQuote, CLASS_FLOATING))
        .then(Action::Play(Cue::WindChime))
        .then(Action::Fade {
            el: FloatingQuote,
            to: 0.4,
            secs: 2.0,
            ease: Ease::Power1InOut,
        })
        .hold(2.0)
        .then(Action::Drift {
            el: FloatingQuote,
            to_opacity: 0.0,
            dy_px: -100.0,
            secs: 8.0,
            ease: Ease::Power1Out,
        })
        .hold(2.0)
        .then(Action::ShowButton(ButtonKind::Seat))
        .fade_async(ButtonContainer, 1.0, 1.0)
}

/// Runs on every seat click. Click number one also earns the request button.
pub fn rejection(click: u32) -> Timeline {
    use ElementId::*;
    let timeline = Timeline::new(REJECTION)
        .fade_async(ButtonContainer, 0.0, 0.5)
        .then(Action::SetText(GlitchText, TEXT_REJECTION.into()))
        .then(Action::SetStyle(GlitchText, "color", COLOR_REJECTION))
        .then(Action::AddClass(GlitchText, CLASS_GLITCH))
        .fade_async(GlitchText, 1.0, 0.3)
        .then(Action::Play(Cue::PianoStab))
        .hold(4.0)
        .then(Action::RemoveClass(GlitchText, CLASS_GLITCH))
        .fade_async(GlitchText, 0.0, 0.5);

    if click == CLICK_REQUEST_ACCESS {
        timeline
            .hold(2.0)
            .then(Action::ShowButton(ButtonKind::RequestAccess))
            .fade_async(ButtonContainer, 1.0, 1.0)
    } else {
        timeline
    }
}

/// Golden message and a screen shake for the persistent visitor.
pub fn easter_egg() -> Timeline {
    use ElementId::*;
    Timeline::new(EASTER_EGG)
        .then(Action::SetText(GlitchText, TEXT_EASTER_EGG.into()))
        .then(Action::SetStyle(GlitchText, "color", COLOR_EASTER_EGG))
        .then(Action::AddClass(GlitchText, CLASS_GLITCH))
        .fade_async(GlitchText, 1.0, 0.3)
        .then(Action::SetStyle(SceneContainer, "animation", "shake 0.5s"))
        .hold(0.5)
        .then(Action::SetStyle(SceneContainer, "animation", ""))
        .hold(1.5)
        .then(Action::RemoveClass(GlitchText, CLASS_GLITCH))
        .fade_async(GlitchText, 0.0, 0.5)
}

/// Flash the loading text red for a wrong file type, then put back the
/// colour and, when known, the message that was showing before.
pub fn drop_rejected(previous: Option<String>) -> Timeline {
    use ElementId::*;
    let timeline = Timeline::new(DROP_REJECTED)
        .then(Action::SetText(LoadingText, TEXT_DROP_REJECTED.into()))
        .then(Action::SetStyle(LoadingText, "color", COLOR_DROP_ERROR))
        .hold(1.5)
        .then(Action::SetStyle(LoadingText, "color", COLOR_LOADING_TEXT));
    match previous {
        Some(text) => timeline.then(Action::SetText(LoadingText, text.into())),
        None => timeline,
    }
}
