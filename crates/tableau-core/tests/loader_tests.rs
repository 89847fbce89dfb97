// Asset intake: timeout, tickets, placeholder fallback and drops.

mod common;

use common::{run_frames, Call, FakeStage};
use tableau_core::constants::*;
use tableau_core::{
    build_placeholder, is_model_file, progress_text, ElementId, LoadEffect, LoadError,
    LoadMachine, LoadState, LoaderTiming, ModelKind, ModelSource, Session, SessionConfig, View,
};

const DT: f32 = 1.0 / 16.0;

fn fetch_of(effects: &[LoadEffect]) -> Option<(u32, ModelSource)> {
    effects.iter().find_map(|e| match e {
        LoadEffect::StartFetch { ticket, source } => Some((*ticket, source.clone())),
        _ => None,
    })
}

#[test]
fn default_model_is_fetched_after_timeout() {
    let mut lm = LoadMachine::default();
    assert!(lm.advance(1.9).is_empty());
    let fx = lm.advance(0.2);
    let (ticket, source) = fetch_of(&fx).expect("fetch after timeout");
    assert_eq!(ticket, 1);
    assert_eq!(source, ModelSource::Path(DEFAULT_MODEL_PATH.to_string()));
    assert!(fx.contains(&LoadEffect::HideDropMessage));
    assert!(fx.contains(&LoadEffect::SetStatus(TEXT_LOADING_MODEL.to_string())));
    // no second default fetch
    assert!(lm.advance(10.0).is_empty());
}

#[test]
fn drop_cancels_pending_timeout() {
    let mut lm = LoadMachine::default();
    lm.advance(1.0);
    let fx = lm.on_drop("Scene.GLB");
    let (ticket, source) = fetch_of(&fx).expect("drop starts a fetch");
    assert_eq!(source, ModelSource::Dropped("Scene.GLB".to_string()));
    assert!(lm.advance(5.0).is_empty());
    assert_eq!(lm.current_ticket(), Some(ticket));
}

#[test]
fn stale_results_are_ignored() {
    let mut lm = LoadMachine::default();
    let (first, _) = fetch_of(&lm.on_drop("a.glb")).unwrap();
    let (second, _) = fetch_of(&lm.on_drop("b.glb")).unwrap();
    assert!(second > first);
    assert!(lm.on_success(first).is_empty());
    assert!(lm.on_failure(first, "late").is_empty());
    assert!(!lm.is_loaded());
    assert_eq!(
        lm.on_success(second).as_slice(),
        &[LoadEffect::InstallReal(second)]
    );
    assert_eq!(lm.state(), &LoadState::Loaded(ModelKind::Real));
}

#[test]
fn failure_waits_before_placeholder() {
    let mut lm = LoadMachine::default();
    let (ticket, _) = fetch_of(&lm.advance(2.5)).unwrap();
    let fx = lm.on_failure(ticket, "404");
    assert_eq!(
        fx.as_slice(),
        &[LoadEffect::SetStatus(TEXT_LOAD_ERROR.to_string())]
    );
    assert!(lm.advance(0.4).is_empty());
    assert_eq!(
        lm.advance(0.2).as_slice(),
        &[LoadEffect::InstallPlaceholder]
    );
    assert_eq!(lm.state(), &LoadState::Loaded(ModelKind::Placeholder));
}

#[test]
fn drop_during_placeholder_delay_wins() {
    let mut lm = LoadMachine::new(LoaderTiming::default());
    let (ticket, _) = fetch_of(&lm.advance(2.5)).unwrap();
    lm.on_failure(ticket, "network");
    let (dropped, _) = fetch_of(&lm.on_drop("mine.glb")).unwrap();
    // the placeholder delay is gone
    assert!(lm.advance(1.0).is_empty());
    assert_eq!(
        lm.on_success(dropped).as_slice(),
        &[LoadEffect::InstallReal(dropped)]
    );
}

#[test]
fn drops_after_loaded_are_ignored() {
    let mut lm = LoadMachine::default();
    let (ticket, _) = fetch_of(&lm.on_drop("a.glb")).unwrap();
    lm.on_success(ticket);
    assert!(lm.on_drop("b.glb").is_empty());
    assert_eq!(lm.state(), &LoadState::Loaded(ModelKind::Real));
}

#[test]
fn progress_text_floors_percentage() {
    assert_eq!(progress_text(50, Some(200)).as_deref(), Some("Loading: 25%"));
    assert_eq!(progress_text(199, Some(200)).as_deref(), Some("Loading: 99%"));
    assert_eq!(progress_text(200, Some(200)).as_deref(), Some("Loading: 100%"));
    assert_eq!(progress_text(10, None), None);
    assert_eq!(progress_text(10, Some(0)), None);
}

#[test]
fn progress_only_for_current_fetch() {
    let mut lm = LoadMachine::default();
    let (ticket, _) = fetch_of(&lm.on_drop("a.glb")).unwrap();
    assert_eq!(
        lm.on_progress(ticket, 1, Some(4)).as_slice(),
        &[LoadEffect::SetStatus("Loading: 25%".to_string())]
    );
    assert!(lm.on_progress(ticket + 1, 1, Some(4)).is_empty());
    assert!(lm.on_progress(ticket, 1, None).is_empty());
}

#[test]
fn model_extension_check_ignores_case() {
    assert!(is_model_file("table.glb"));
    assert!(is_model_file("TABLE.GLB"));
    assert!(is_model_file("chair.Glb"));
    assert!(!is_model_file("table.gltf"));
    assert!(!is_model_file("glb"));
    assert!(!is_model_file("table.glb.txt"));
    assert!(!is_model_file(""));
}

#[test]
fn session_installs_exactly_once() {
    let mut session = Session::new(SessionConfig::default());
    let mut stage = FakeStage::new();
    let mut wall = 0.0;

    let orders = run_frames(&mut session, &mut stage, 2.5, DT, &mut wall);
    assert_eq!(orders.len(), 1);
    let ticket = orders[0].ticket;

    session.on_model_ready(ticket, Ok(build_placeholder()), &mut stage);
    assert!(session.is_loaded());
    assert_eq!(session.scene.installed(), Some(ModelKind::Real));
    let revision = session.scene.revision();

    // a duplicate completion and a late drop change nothing
    session.on_model_ready(ticket, Ok(build_placeholder()), &mut stage);
    assert!(session.on_drop("other.glb", &mut stage).is_none());
    run_frames(&mut session, &mut stage, 1.0, DT, &mut wall);

    assert_eq!(session.scene.revision(), revision);
    assert_eq!(
        stage.count(|c| *c == Call::Visible(ElementId::LoadingOverlay, false)),
        1
    );
    assert_eq!(
        stage.count(|c| *c == Call::AddClass(ElementId::Body, CLASS_MODEL_LOADED.into())),
        1
    );
}

#[test]
fn session_falls_back_to_placeholder() {
    let mut session = Session::default();
    let mut stage = FakeStage::new();
    let mut wall = 0.0;

    let order = run_frames(&mut session, &mut stage, 2.5, DT, &mut wall)
        .pop()
        .expect("default fetch");
    session.on_model_ready(
        order.ticket,
        Err(LoadError::Status {
            url: DEFAULT_MODEL_PATH.into(),
            status: 404,
        }),
        &mut stage,
    );
    assert!(!session.is_loaded());
    assert!(stage
        .texts(ElementId::LoadingText)
        .contains(&TEXT_LOAD_ERROR.to_string()));

    run_frames(&mut session, &mut stage, 0.25, DT, &mut wall);
    assert!(!session.is_loaded());
    run_frames(&mut session, &mut stage, 0.5, DT, &mut wall);
    assert!(session.is_loaded());
    assert_eq!(session.scene.installed(), Some(ModelKind::Placeholder));
    assert_eq!(session.scene.objects.len(), 4);
}

#[test]
fn session_runs_on_a_page_without_canvas() {
    // no canvas to measure: the page falls back to a square aspect
    let mut session = Session::new(SessionConfig {
        aspect: 1.0,
        ..SessionConfig::default()
    });
    let mut stage = FakeStage::new();
    let mut wall = 0.0;

    let order = run_frames(&mut session, &mut stage, 2.5, DT, &mut wall)
        .pop()
        .expect("default fetch");
    session.on_model_ready(
        order.ticket,
        Err(LoadError::Status {
            url: DEFAULT_MODEL_PATH.into(),
            status: 404,
        }),
        &mut stage,
    );
    run_frames(&mut session, &mut stage, 0.75, DT, &mut wall);
    assert_eq!(session.scene.installed(), Some(ModelKind::Placeholder));

    run_frames(&mut session, &mut stage, CAMERA_DOLLY_SEC + 16.5, DT, &mut wall);
    assert!(stage.log.contains(&Call::Button(tableau_core::ButtonKind::Seat)));
}

#[test]
fn rejected_drop_flashes_message_and_keeps_waiting() {
    let mut session = Session::default();
    let mut stage = FakeStage::new();
    let mut wall = 0.0;

    assert!(session.on_drop("notes.txt", &mut stage).is_none());
    assert_eq!(
        stage.texts(ElementId::LoadingText),
        vec![TEXT_DROP_REJECTED.to_string()]
    );
    assert!(stage.log.contains(&Call::Style(
        ElementId::LoadingText,
        "color".into(),
        COLOR_DROP_ERROR.into()
    )));
    assert!(!session.is_loaded());

    let orders = run_frames(&mut session, &mut stage, 1.75, DT, &mut wall);
    assert!(orders.is_empty());
    assert!(stage.log.contains(&Call::Style(
        ElementId::LoadingText,
        "color".into(),
        COLOR_LOADING_TEXT.into()
    )));

    // the default timeout still fires
    let orders = run_frames(&mut session, &mut stage, 0.5, DT, &mut wall);
    assert_eq!(orders.len(), 1);
}

#[test]
fn rejected_drop_restores_previous_message() {
    let mut session = Session::default();
    let mut stage = FakeStage::new();
    let mut wall = 0.0;

    assert!(session.on_drop("table.glb", &mut stage).is_some());
    assert_eq!(
        stage.text(ElementId::LoadingText).as_deref(),
        Some(TEXT_LOADING_MODEL)
    );

    assert!(session.on_drop("table.png", &mut stage).is_none());
    assert_eq!(
        stage.text(ElementId::LoadingText).as_deref(),
        Some(TEXT_DROP_REJECTED)
    );
    run_frames(&mut session, &mut stage, 1.25, DT, &mut wall);
    assert_eq!(
        stage.text(ElementId::LoadingText).as_deref(),
        Some(TEXT_DROP_REJECTED)
    );

    run_frames(&mut session, &mut stage, 0.5, DT, &mut wall);
    assert_eq!(
        stage.text(ElementId::LoadingText).as_deref(),
        Some(TEXT_LOADING_MODEL)
    );
    assert!(stage.log.contains(&Call::Style(
        ElementId::LoadingText,
        "color".into(),
        COLOR_LOADING_TEXT.into()
    )));
}

#[test]
fn drag_highlight_toggles() {
    let mut session = Session::default();
    let mut stage = FakeStage::new();
    session.on_drag_over(&mut stage);
    assert!(stage.has_class_event(ElementId::LoadingOverlay, CLASS_DROP_HIGHLIGHT, true));
    assert!(stage.has_class_event(ElementId::DropMessage, CLASS_DROP_DRAGOVER, true));
    session.on_drag_leave(&mut stage);
    assert!(stage.has_class_event(ElementId::LoadingOverlay, CLASS_DROP_HIGHLIGHT, false));
    assert!(stage.has_class_event(ElementId::DropMessage, CLASS_DROP_DRAGOVER, false));
}
