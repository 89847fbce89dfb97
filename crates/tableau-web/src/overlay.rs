use web_sys as web;

// Display toggling for the loading overlay and drop prompt. Inline style only,
// so stylesheet rules for the element stay intact.

#[inline]
pub fn show(el: &web::HtmlElement) {
    _ = el.style().remove_property("display");
}

#[inline]
pub fn hide(el: &web::HtmlElement) {
    _ = el.style().set_property("display", "none");
}

#[inline]
pub fn is_hidden(el: &web::HtmlElement) -> bool {
    el.style()
        .get_property_value("display")
        .map(|v| v == "none")
        .unwrap_or(false)
}

#[inline]
pub fn set_visible(el: &web::HtmlElement, visible: bool) {
    if visible == !is_hidden(el) {
        return;
    }
    if visible {
        show(el);
    } else {
        hide(el);
    }
}
