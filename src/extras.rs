//! Small page flourishes: loading overlay, card stagger, timeline hover and
//! lazily loaded images.

pub const PRELOADER_CLASS: &str = "preloader";
pub const PRELOADER_MARKUP: &str = r#"
        <div class="preloader-content">
            <div class="spinner"></div>
            <p>Loading...</p>
        </div>
    "#;
pub const PROJECT_CARD_SELECTOR: &str = ".project-card";
pub const TIMELINE_ITEM_SELECTOR: &str = ".timeline-item";
pub const TIMELINE_HOVER_TRANSFORM: &str = "translateX(10px)";
pub const TIMELINE_REST_TRANSFORM: &str = "translateX(0)";
pub const LAZY_IMAGE_SELECTOR: &str = "img[data-src]";
pub const LAZY_CLASS: &str = "lazy";

/// Transition delay for the `index`-th project card, a tenth of a second
/// per card.
pub fn stagger_delay(index: usize) -> String {
    format!("{}s", index as f64 / 10.0)
}

pub fn lazy_source(data_src: Option<&str>) -> Option<&str> {
    data_src.map(str::trim).filter(|src| !src.is_empty())
}

#[cfg(target_arch = "wasm32")]
pub use controller::{stagger_cards, LazyImages, Preloader, TimelineHover};

#[cfg(target_arch = "wasm32")]
mod controller {
    use std::{cell::RefCell, rc::Rc};

    use gloo_timers::callback::Timeout;
    use js_sys::Array;
    use wasm_bindgen::{closure::Closure, JsCast};
    use web_sys::{
        Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
        MouseEvent,
    };

    use super::{
        lazy_source, stagger_delay, LAZY_CLASS, LAZY_IMAGE_SELECTOR, PRELOADER_CLASS,
        PRELOADER_MARKUP, PROJECT_CARD_SELECTOR, TIMELINE_HOVER_TRANSFORM, TIMELINE_ITEM_SELECTOR,
        TIMELINE_REST_TRANSFORM,
    };
    use crate::{
        config::PreloaderConfig,
        dom::{self, Listener},
        error::SiteError,
    };

    /// Loading overlay that fades out and removes itself.
    pub struct Preloader {
        overlay: HtmlElement,
        pending: Rc<RefCell<Option<Timeout>>>,
    }

    impl Preloader {
        pub fn show(document: &Document, config: &PreloaderConfig) -> Result<Self, SiteError> {
            let body = document
                .body()
                .ok_or_else(|| SiteError::MissingElement("body".to_string()))?;
            let overlay: HtmlElement = document
                .create_element("div")?
                .dyn_into()
                .map_err(|_| SiteError::UnexpectedElement {
                    selector: "div".to_string(),
                    expected: "an HTML element",
                })?;
            overlay.set_class_name(PRELOADER_CLASS);
            overlay.set_inner_html(PRELOADER_MARKUP);
            body.append_child(&overlay)?;

            let pending = Rc::new(RefCell::new(None));
            let fade = {
                let overlay = overlay.clone();
                let pending = Rc::clone(&pending);
                let fade_ms = config.fade_ms;
                Timeout::new(config.visible_ms, move || {
                    dom::set_style(&overlay, "opacity", "0");
                    let removal = Timeout::new(fade_ms, move || overlay.remove());
                    *pending.borrow_mut() = Some(removal);
                })
            };
            *pending.borrow_mut() = Some(fade);

            Ok(Self { overlay, pending })
        }
    }

    impl Drop for Preloader {
        fn drop(&mut self) {
            if let Some(timeout) = self.pending.borrow_mut().take() {
                timeout.cancel();
            }
            self.overlay.remove();
        }
    }

    pub fn stagger_cards(document: &Document) -> Result<usize, SiteError> {
        let cards = dom::query_all_html(document, PROJECT_CARD_SELECTOR)?;

        for (index, card) in cards.iter().enumerate() {
            dom::set_style(card, "transition-delay", &stagger_delay(index));
        }

        Ok(cards.len())
    }

    pub struct TimelineHover {
        _listeners: Vec<Listener>,
    }

    impl TimelineHover {
        pub fn start(document: &Document) -> Result<Self, SiteError> {
            let mut listeners = Vec::new();

            for item in dom::query_all_html(document, TIMELINE_ITEM_SELECTOR)? {
                for (event, transform) in [
                    ("mouseenter", TIMELINE_HOVER_TRANSFORM),
                    ("mouseleave", TIMELINE_REST_TRANSFORM),
                ] {
                    let element = item.clone();
                    listeners.push(Listener::new(&item, event, move |_: MouseEvent| {
                        dom::set_style(&element, "transform", transform);
                    })?);
                }
            }

            Ok(Self {
                _listeners: listeners,
            })
        }
    }

    /// Swaps `data-src` into `src` the first time an image becomes visible.
    pub struct LazyImages {
        observer: IntersectionObserver,
        _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
    }

    impl LazyImages {
        pub fn start(document: &Document) -> Result<Self, SiteError> {
            let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
                move |entries: Array, observer: IntersectionObserver| {
                    for entry in entries.iter() {
                        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                            continue;
                        };
                        if entry.is_intersecting() {
                            let image = entry.target();
                            load_image(&image);
                            observer.unobserve(&image);
                        }
                    }
                },
            );

            let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref())?;
            for image in dom::query_all(document, LAZY_IMAGE_SELECTOR)? {
                observer.observe(&image);
            }

            Ok(Self {
                observer,
                _callback: callback,
            })
        }
    }

    impl Drop for LazyImages {
        fn drop(&mut self) {
            self.observer.disconnect();
        }
    }

    fn load_image(image: &Element) {
        let data_src = image.get_attribute("data-src");
        if let Some(src) = lazy_source(data_src.as_deref()) {
            let _ = image.set_attribute("src", src);
        }
        let _ = image.class_list().remove_1(LAZY_CLASS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_are_staggered_by_a_tenth_of_a_second() {
        assert_eq!(stagger_delay(0), "0s");
        assert_eq!(stagger_delay(1), "0.1s");
        assert_eq!(stagger_delay(3), "0.3s");
        assert_eq!(stagger_delay(12), "1.2s");
    }

    #[test]
    fn blank_lazy_sources_are_skipped() {
        assert_eq!(lazy_source(Some(" /img/me.webp ")), Some("/img/me.webp"));
        assert_eq!(lazy_source(Some("  ")), None);
        assert_eq!(lazy_source(None), None);
    }
}
