//! Thin typed layer over `web-sys` shared by every controller.

use std::{cell::RefCell, rc::Rc};

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, ScrollBehavior, ScrollToOptions, Window,
};

use crate::error::SiteError;

pub fn window() -> Result<Window, SiteError> {
    web_sys::window().ok_or(SiteError::NoWindow)
}

pub fn document() -> Result<Document, SiteError> {
    window()?.document().ok_or(SiteError::NoDocument)
}

pub fn query(document: &Document, selector: &str) -> Result<Element, SiteError> {
    document
        .query_selector(selector)?
        .ok_or_else(|| SiteError::MissingElement(selector.to_string()))
}

pub fn query_as<T: JsCast>(
    document: &Document,
    selector: &str,
    expected: &'static str,
) -> Result<T, SiteError> {
    query(document, selector)?
        .dyn_into::<T>()
        .map_err(|_| SiteError::UnexpectedElement {
            selector: selector.to_string(),
            expected,
        })
}

pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, SiteError> {
    let nodes = document.query_selector_all(selector)?;

    Ok((0..nodes.length())
        .filter_map(|index| nodes.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub fn query_all_html(document: &Document, selector: &str) -> Result<Vec<HtmlElement>, SiteError> {
    Ok(query_all(document, selector)?
        .into_iter()
        .filter_map(|element| element.dyn_into::<HtmlElement>().ok())
        .collect())
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

pub fn clear_style(element: &HtmlElement, property: &str) {
    let _ = element.style().remove_property(property);
}

pub fn set_class(element: &Element, class: &str, enabled: bool) {
    let _ = element.class_list().toggle_with_force(class, enabled);
}

pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn smooth_scroll_to(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

fn matches_media(query: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

pub fn prefers_reduced_motion() -> bool {
    matches_media("(prefers-reduced-motion: reduce)")
}

pub fn system_prefers_dark() -> bool {
    matches_media("(prefers-color-scheme: dark)")
}

/// An event subscription that unsubscribes itself when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Events that fail to cast to `E` are ignored.
    pub fn new<E, F>(
        target: &EventTarget,
        event: &'static str,
        mut handler: F,
    ) -> Result<Self, SiteError>
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Ok(event) = event.dyn_into::<E>() {
                handler(event);
            }
        });

        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;

        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Calls `step` once per animation frame until it returns `false`.
pub fn animate_frames(mut step: impl FnMut() -> bool + 'static) -> Result<(), SiteError> {
    let window = window()?;
    let slot: FrameSlot = Rc::new(RefCell::new(None));
    let handle = Rc::clone(&slot);
    let frame_window = window.clone();

    *slot.borrow_mut() = Some(Closure::new(move || {
        if !step() {
            handle.borrow_mut().take();
            return;
        }

        let requested = handle
            .borrow()
            .as_ref()
            .map(|callback| {
                frame_window.request_animation_frame(callback.as_ref().unchecked_ref())
            });

        if !matches!(requested, Some(Ok(_))) {
            handle.borrow_mut().take();
        }
    }));

    let first = slot
        .borrow()
        .as_ref()
        .map(|callback| window.request_animation_frame(callback.as_ref().unchecked_ref()));

    match first {
        Some(Err(error)) => {
            slot.borrow_mut().take();
            Err(error.into())
        }
        _ => Ok(()),
    }
}
