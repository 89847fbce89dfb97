// Easing, tweens and the timeline driver in isolation.

mod common;

use common::{Call, FakeStage};
use tableau_core::script;
use tableau_core::{Action, Choreographer, Ease, ElementId, Timeline, Tween};

#[test]
fn easing_curves_hit_endpoints() {
    for ease in [Ease::Linear, Ease::Power1In, Ease::Power1Out, Ease::Power1InOut] {
        assert_eq!(ease.apply(0.0), 0.0, "{:?}", ease);
        assert_eq!(ease.apply(1.0), 1.0, "{:?}", ease);
        // clamped outside the unit interval
        assert_eq!(ease.apply(-1.0), 0.0);
        assert_eq!(ease.apply(2.0), 1.0);
    }
    assert_eq!(Ease::Power1InOut.apply(0.5), 0.5);
    assert_eq!(Ease::Power1Out.apply(0.5), 0.75);
    assert_eq!(Ease::Power1In.apply(0.5), 0.25);
    assert_eq!(Ease::default(), Ease::Power1Out);
}

#[test]
fn tween_clamps_and_finishes() {
    let mut tw = Tween::new(0.0f32, 10.0, 2.0, Ease::Linear);
    assert_eq!(tw.step(0.5), 2.5);
    assert!(!tw.finished());
    assert_eq!(tw.step(5.0), 10.0);
    assert!(tw.finished());

    let instant = Tween::new(1.0f32, 3.0, 0.0, Ease::Power1Out);
    assert!(instant.finished());
    assert_eq!(instant.value(), 3.0);
}

#[test]
fn holds_delay_following_steps() {
    let mut choreo = Choreographer::new();
    let mut stage = FakeStage::new();
    let tl = Timeline::new("t")
        .then(Action::SetText(ElementId::PrimaryQuote, "a".into()))
        .hold(1.0)
        .then(Action::SetText(ElementId::PrimaryQuote, "b".into()));
    assert_eq!(tl.duration_sec(), 1.0);

    choreo.play_now(tl, &mut stage);
    assert_eq!(stage.texts(ElementId::PrimaryQuote), vec!["a".to_string()]);
    choreo.advance(0.5, &mut stage);
    assert_eq!(stage.texts(ElementId::PrimaryQuote).len(), 1);
    choreo.advance(0.5, &mut stage);
    assert_eq!(
        stage.texts(ElementId::PrimaryQuote),
        vec!["a".to_string(), "b".to_string()]
    );
    assert!(!choreo.is_running("t"));
}

#[test]
fn leading_hold_creates_wait_step() {
    let tl = Timeline::new("w").hold(2.0).hold(1.0);
    assert_eq!(tl.steps.len(), 1);
    assert!(tl.steps[0].action.is_none());
    assert_eq!(tl.duration_sec(), 3.0);
}

#[test]
fn fades_tween_from_current_opacity() {
    let mut choreo = Choreographer::new();
    let mut stage = FakeStage::new();
    choreo.play_now(
        Timeline::new("fade").fade(ElementId::QuoteContainer, 1.0, 1.0),
        &mut stage,
    );
    assert!(choreo.is_animating(ElementId::QuoteContainer));
    choreo.advance(0.5, &mut stage);
    assert_eq!(stage.last_opacity(ElementId::QuoteContainer), Some(0.75));
    choreo.advance(0.5, &mut stage);
    assert_eq!(choreo.opacity(ElementId::QuoteContainer), 1.0);
    assert!(!choreo.is_animating(ElementId::QuoteContainer));

    // a second fade starts from 1, not from 0
    choreo.play_now(
        Timeline::new("out").fade_async(ElementId::QuoteContainer, 0.0, 1.0),
        &mut stage,
    );
    choreo.advance(0.5, &mut stage);
    assert_eq!(stage.last_opacity(ElementId::QuoteContainer), Some(0.25));
}

#[test]
fn opacity_style_resets_track() {
    let mut choreo = Choreographer::new();
    let mut stage = FakeStage::new();
    choreo.apply(
        Action::SetStyle(ElementId::FloatingQuote, "opacity", "0.5"),
        &mut stage,
    );
    assert_eq!(choreo.opacity(ElementId::FloatingQuote), 0.5);
    assert_eq!(
        stage.log,
        vec![Call::Style(
            ElementId::FloatingQuote,
            "opacity".into(),
            "0.5".into()
        )]
    );
}

#[test]
fn timelines_run_side_by_side() {
    let mut choreo = Choreographer::new();
    let mut stage = FakeStage::new();
    choreo.play_now(script::rejection(1), &mut stage);
    choreo.play_now(script::easter_egg(), &mut stage);
    assert_eq!(choreo.running_count(), 2);
    choreo.advance(2.5, &mut stage);
    assert!(!choreo.is_running(script::EASTER_EGG));
    assert!(choreo.is_running(script::REJECTION));
}

#[test]
fn scripted_lengths() {
    assert_eq!(script::intro().duration_sec(), 15.0);
    assert_eq!(script::rejection(1).duration_sec(), 6.0);
    assert_eq!(script::rejection(2).duration_sec(), 4.0);
    assert_eq!(script::easter_egg().duration_sec(), 2.0);
    assert_eq!(script::drop_rejected(None).duration_sec(), 1.5);
}
