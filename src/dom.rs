//! Browser side of the widget: the live document as a [`PageSurface`], toast
//! notifications, and reveal-on-scroll for freshly rendered cards.

use crate::controllers::PageSurface;
use crate::form::{NoticeKind, Notifier};
use gloo_timers::callback::Timeout;
use leptos::logging::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

pub const TOAST_CONTAINER_ID: &str = "review-toast-container";
pub const TOAST_LIFETIME_MS: u32 = 4_000;
const REVEAL_THRESHOLD: f64 = 0.1;
const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

fn hide_element(element: &Element) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        if let Err(err) = element.style().set_property("display", "none") {
            warn!("[DOM] Could not hide element: {:?}", err);
        }
    }
}

/// The current document, looked up by element id on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomPage;

impl DomPage {
    pub fn new() -> Self {
        Self
    }

    fn element(&self, id: &str) -> Option<Element> {
        gloo_utils::document().get_element_by_id(id)
    }
}

impl PageSurface for DomPage {
    fn has_element(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    fn set_html(&self, id: &str, html: &str) {
        if let Some(element) = self.element(id) {
            element.set_inner_html(html);
        }
    }

    fn hide(&self, id: &str) {
        if let Some(element) = self.element(id) {
            hide_element(&element);
        }
    }

    fn hide_section(&self, id: &str) {
        let section = self
            .element(id)
            .and_then(|element| element.closest(".section").ok().flatten());
        if let Some(section) = section {
            hide_element(&section);
        }
    }

    fn reveal(&self, id: &str) {
        if let Some(element) = self.element(id) {
            observe_reveals(&element);
        }
    }
}

/// Marks `.reveal` descendants of `container` visible the first time they
/// scroll into view. Elements that are already visible are left alone.
pub fn observe_reveals(container: &Element) {
    let pending = match container.query_selector_all(".reveal:not(.visible)") {
        Ok(pending) if pending.length() > 0 => pending,
        Ok(_) => return,
        Err(err) => {
            warn!("[DOM] Reveal query failed: {:?}", err);
            return;
        }
    };

    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry = entry.unchecked_into::<IntersectionObserverEntry>();
                if entry.is_intersecting() {
                    let target = entry.target();
                    if let Err(err) = target.class_list().add_1("visible") {
                        warn!("[DOM] Could not reveal element: {:?}", err);
                    }
                    observer.unobserve(&target);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);

    let observer = match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
        Ok(observer) => observer,
        Err(err) => {
            warn!("[DOM] IntersectionObserver unavailable: {:?}", err);
            return;
        }
    };
    // The observer holds the callback for the lifetime of the page.
    callback.forget();

    for index in 0..pending.length() {
        if let Some(element) = pending.get(index).and_then(|node| node.dyn_into::<Element>().ok()) {
            observer.observe(&element);
        }
    }
}

/// Stacked toast messages in a fixed container appended to `<body>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToastNotifier;

impl ToastNotifier {
    fn container(&self) -> Result<Element, JsValue> {
        let document = gloo_utils::document();
        if let Some(container) = document.get_element_by_id(TOAST_CONTAINER_ID) {
            return Ok(container);
        }
        let container = document.create_element("div")?;
        container.set_id(TOAST_CONTAINER_ID);
        container.set_class_name("review-toast-container");
        gloo_utils::body().append_child(&container)?;
        Ok(container)
    }

    fn show(&self, message: &str, kind: NoticeKind) -> Result<(), JsValue> {
        let toast = gloo_utils::document().create_element("div")?;
        toast.set_class_name(&format!("review-toast review-toast-{} toast", kind.as_str()));
        toast.set_text_content(Some(message));
        self.container()?.append_child(&toast)?;

        Timeout::new(TOAST_LIFETIME_MS, move || dismiss_toast(&toast)).forget();
        Ok(())
    }
}

// Starts the exit animation; the toast is removed once it finishes.
fn dismiss_toast(toast: &Element) {
    let target = toast.clone();
    let remove = Closure::once_into_js(move || target.remove());
    if let Err(err) = toast.add_event_listener_with_callback("animationend", remove.unchecked_ref()) {
        warn!("[DOM] Could not watch toast animation: {:?}", err);
    }
    if let Err(err) = toast.class_list().add_1("hide") {
        warn!("[DOM] Could not dismiss toast: {:?}", err);
        toast.remove();
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        if let Err(err) = self.show(message, kind) {
            warn!("[DOM] Could not show notification {:?}: {:?}", message, err);
        }
    }
}
