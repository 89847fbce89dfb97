use crate::dom::{self, listen};
use crate::fetch;
use crate::App;
use std::rc::Rc;
use tableau_core::{ButtonKind, ElementId, Locator};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Which scripted button, if any, an event came from.
fn button_of(ev: &web::Event) -> Option<ButtonKind> {
    let target: web::Element = ev.target()?.dyn_into().ok()?;
    let button = target.closest("button").ok().flatten()?;
    ButtonKind::from_dom_id(&button.id())
}

fn by_locator(document: &web::Document, el: ElementId) -> Option<web::EventTarget> {
    match el.locator() {
        Locator::Body => document.body().map(Into::into),
        Locator::Id(id) => document.get_element_by_id(id).map(Into::into),
        Locator::Selector(sel) => document.query_selector(sel).ok().flatten().map(Into::into),
    }
}

fn wire_drop_zone(app: &Rc<App>, document: &web::Document) {
    let Some(zone) = by_locator(document, ElementId::LoadingOverlay) else {
        log::warn!("[events] loading overlay missing; drag and drop disabled");
        return;
    };
    for event in ["dragenter", "dragover"] {
        let app = app.clone();
        listen::<web::DragEvent>(&zone, event, move |ev| {
            ev.prevent_default();
            ev.stop_propagation();
            app.with_stage(|session, stage| session.on_drag_over(stage));
        });
    }
    {
        let app = app.clone();
        listen::<web::DragEvent>(&zone, "dragleave", move |ev| {
            ev.prevent_default();
            ev.stop_propagation();
            app.with_stage(|session, stage| session.on_drag_leave(stage));
        });
    }
    let app = app.clone();
    listen::<web::DragEvent>(&zone, "drop", move |ev| {
        ev.prevent_default();
        ev.stop_propagation();
        let file = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0));
        let Some(file) = file else {
            app.with_stage(|session, stage| session.on_drag_leave(stage));
            return;
        };
        let order = app.with_stage(|session, stage| session.on_drop(&file.name(), stage));
        if let Some(order) = order {
            fetch::spawn_load(app.clone(), order, Some(file));
        }
    });
}

// Buttons are recreated by the script, so listen on their container.
fn wire_buttons(app: &Rc<App>, document: &web::Document) {
    let Some(container) = by_locator(document, ElementId::ButtonContainer) else {
        log::warn!("[events] button container missing");
        return;
    };
    {
        let app = app.clone();
        listen::<web::MouseEvent>(&container, "click", move |ev| match button_of(&ev) {
            Some(ButtonKind::Seat) => app.with_stage(|session, stage| session.on_seat_click(stage)),
            Some(ButtonKind::RequestAccess) => {
                app.with_stage(|session, stage| session.on_request_click(stage))
            }
            None => {}
        });
    }
    {
        let app = app.clone();
        listen::<web::MouseEvent>(&container, "mouseover", move |ev| {
            if button_of(&ev) == Some(ButtonKind::RequestAccess) {
                app.with_stage(|session, stage| session.on_request_hover(stage));
            }
        });
    }
    let app = app.clone();
    listen::<web::MouseEvent>(&container, "mouseout", move |ev| {
        if button_of(&ev) == Some(ButtonKind::RequestAccess) {
            app.with_stage(|session, stage| session.on_request_leave(stage));
        }
    });
}

fn wire_gestures(app: &Rc<App>, document: &web::Document) {
    for event in ["click", "touchstart"] {
        let app = app.clone();
        listen::<web::Event>(document, event, move |_| {
            app.with_stage(|session, stage| session.on_gesture(stage));
        });
    }
}

fn wire_window(app: &Rc<App>, window: &web::Window, canvas: Option<&web::HtmlCanvasElement>) {
    {
        let app = app.clone();
        listen::<web::DeviceOrientationEvent>(window, "deviceorientation", move |ev| {
            let gamma = ev.gamma().map(|g| g as f32);
            app.with_stage(|session, stage| session.on_tilt(gamma, stage));
        });
    }
    let Some(canvas) = canvas.cloned() else {
        return;
    };
    let app = app.clone();
    listen::<web::UiEvent>(window, "resize", move |_| {
        dom::sync_canvas_backing_size(&canvas);
        let aspect = canvas.width() as f32 / canvas.height().max(1) as f32;
        app.session.borrow_mut().on_resize(aspect);
    });
}

pub fn wire_all(
    app: &Rc<App>,
    window: &web::Window,
    document: &web::Document,
    canvas: Option<&web::HtmlCanvasElement>,
) {
    wire_drop_zone(app, document);
    wire_buttons(app, document);
    wire_gestures(app, document);
    wire_window(app, window, canvas);
}
