use crate::overlay;
use tableau_core::constants::MAX_PIXEL_RATIO;
use tableau_core::{ButtonKind, ElementId, Locator, View};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Attach `handler` for `event` on `target` for the life of the page.
pub fn listen<E: JsCast + 'static>(
    target: &web::EventTarget,
    event: &str,
    mut handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(web::Event)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::warn!("[dom] {} listener failed: {:?}", event, e);
    }
    closure.forget();
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio().min(MAX_PIXEL_RATIO);
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// `fontSize` -> `font-size`; already-kebab names pass through.
fn css_property(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// The live document behind [`View`]. Elements are looked up on every call,
/// so buttons created later are found too.
pub struct DomView {
    document: web::Document,
}

impl DomView {
    pub fn new(document: web::Document) -> Self {
        Self { document }
    }

    fn element(&self, el: ElementId) -> Option<web::HtmlElement> {
        let found = match el.locator() {
            Locator::Body => self.document.body().map(|b| b.unchecked_into::<web::Element>()),
            Locator::Id(id) => self.document.get_element_by_id(id),
            Locator::Selector(sel) => self.document.query_selector(sel).ok().flatten(),
        };
        found.and_then(|e| e.dyn_into::<web::HtmlElement>().ok())
    }
}

impl View for DomView {
    fn text(&self, el: ElementId) -> Option<String> {
        self.element(el).and_then(|e| e.text_content())
    }

    fn set_text(&mut self, el: ElementId, text: &str) {
        if let Some(e) = self.element(el) {
            e.set_text_content(Some(text));
        }
    }

    fn set_opacity(&mut self, el: ElementId, opacity: f32) {
        if let Some(e) = self.element(el) {
            _ = e.style().set_property("opacity", &format!("{:.4}", opacity));
        }
    }

    fn set_translate_y(&mut self, el: ElementId, px: f32) {
        if let Some(e) = self.element(el) {
            _ = e
                .style()
                .set_property("transform", &format!("translateY({:.2}px)", px));
        }
    }

    fn set_visible(&mut self, el: ElementId, visible: bool) {
        if let Some(e) = self.element(el) {
            overlay::set_visible(&e, visible);
        }
    }

    fn set_style(&mut self, el: ElementId, property: &str, value: &str) {
        if let Some(e) = self.element(el) {
            let style = e.style();
            let name = css_property(property);
            if value.is_empty() {
                _ = style.remove_property(&name);
            } else {
                _ = style.set_property(&name, value);
            }
        }
    }

    fn add_class(&mut self, el: ElementId, class: &str) {
        if let Some(e) = self.element(el) {
            _ = e.class_list().add_1(class);
        }
    }

    fn remove_class(&mut self, el: ElementId, class: &str) {
        if let Some(e) = self.element(el) {
            _ = e.class_list().remove_1(class);
        }
    }

    fn show_button(&mut self, button: ButtonKind) {
        let Some(container) = self.element(ElementId::ButtonContainer) else {
            return;
        };
        container.set_inner_html("");
        let Ok(el) = self.document.create_element("button") else {
            return;
        };
        el.set_id(button.dom_id());
        el.set_class_name(button.class_name());
        el.set_text_content(Some(button.label()));
        if let Err(e) = container.append_child(&el) {
            log::warn!("[dom] could not insert {}: {:?}", button.dom_id(), e);
        }
    }

    fn navigate(&mut self, url: &str) {
        if let Some(w) = web::window() {
            if let Err(e) = w.location().set_href(url) {
                log::error!("[dom] navigation to {} failed: {:?}", url, e);
            }
        }
    }
}
