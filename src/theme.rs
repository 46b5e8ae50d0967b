pub const THEME_KEY: &str = "theme";
pub const DARK_CLASS: &str = "dark-theme";
pub const TOGGLE_SELECTOR: &str = ".theme-toggle";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn from_dark_flag(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn toggle_label(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} theme")
    }
}

/// Key-value persistence for user preferences.
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str);
}

pub fn read_stored_theme(store: &impl PreferenceStore) -> Option<Theme> {
    Theme::from_str(&store.load(THEME_KEY)?)
}

/// The persisted choice wins; the system preference only fills the gap and
/// is never written back.
pub fn resolve_theme(store: &impl PreferenceStore, system_prefers_dark: bool) -> Theme {
    read_stored_theme(store).unwrap_or_else(|| Theme::from_dark_flag(system_prefers_dark))
}

pub fn persist_theme(store: &impl PreferenceStore, theme: Theme) {
    store.save(THEME_KEY, theme.as_str());
}

pub fn toggle_theme(current: Theme, store: &impl PreferenceStore) -> Theme {
    let next = current.toggled();
    persist_theme(store, next);
    next
}

#[cfg(target_arch = "wasm32")]
pub use controller::{BrowserStorage, ThemeToggle};

#[cfg(target_arch = "wasm32")]
mod controller {
    use std::{cell::Cell, rc::Rc};

    use js_sys::{Function, Reflect};
    use wasm_bindgen::{closure::Closure, JsCast, JsValue};
    use web_sys::{Document, Element, HtmlElement, MouseEvent, Storage};

    use super::{
        resolve_theme, toggle_theme, PreferenceStore, Theme, DARK_CLASS, TOGGLE_SELECTOR,
    };
    use crate::{
        dom::{self, Listener},
        error::SiteError,
    };

    pub struct BrowserStorage {
        storage: Option<Storage>,
    }

    impl BrowserStorage {
        pub fn local() -> Self {
            Self {
                storage: web_sys::window().and_then(|w| w.local_storage().ok().flatten()),
            }
        }
    }

    impl PreferenceStore for BrowserStorage {
        fn load(&self, key: &str) -> Option<String> {
            self.storage.as_ref()?.get_item(key).ok().flatten()
        }

        fn save(&self, key: &str, value: &str) {
            if let Some(storage) = &self.storage {
                let _ = storage.set_item(key, value);
            }
        }
    }

    fn apply_theme(body: &HtmlElement, toggle: Option<&Element>, theme: Theme) {
        dom::set_class(body, DARK_CLASS, theme.is_dark());
        if let Some(toggle) = toggle {
            let _ = toggle.set_attribute("aria-label", &theme.toggle_label());
            let _ = toggle.set_attribute("aria-pressed", &theme.is_dark().to_string());
        }
    }

    fn apply_theme_with_transition(
        document: &Document,
        body: &HtmlElement,
        toggle: &Element,
        theme: Theme,
    ) {
        if dom::prefers_reduced_motion() {
            apply_theme(body, Some(toggle), theme);
            return;
        }

        let document_js: JsValue = document.clone().into();
        let Ok(start_view_transition) =
            Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
        else {
            apply_theme(body, Some(toggle), theme);
            return;
        };

        let Some(start_view_transition) = start_view_transition.dyn_ref::<Function>() else {
            apply_theme(body, Some(toggle), theme);
            return;
        };

        let callback = {
            let body = body.clone();
            let toggle = toggle.clone();
            Closure::once_into_js(move || apply_theme(&body, Some(&toggle), theme))
        };

        if start_view_transition.call1(&document_js, &callback).is_err() {
            apply_theme(body, Some(toggle), theme);
        }
    }

    /// Applies the saved (or system) theme and, when the page has a toggle
    /// button, flips it on click.
    pub struct ThemeToggle {
        current: Rc<Cell<Theme>>,
        _click: Option<Listener>,
    }

    impl ThemeToggle {
        pub fn start(document: &Document) -> Result<Self, SiteError> {
            let body = document
                .body()
                .ok_or_else(|| SiteError::MissingElement("body".to_string()))?;
            let toggle = document.query_selector(TOGGLE_SELECTOR)?;
            let store = BrowserStorage::local();

            let initial = resolve_theme(&store, dom::system_prefers_dark());
            apply_theme(&body, toggle.as_ref(), initial);
            log::info!("theme initialized as {}", initial.as_str());

            let current = Rc::new(Cell::new(initial));
            let click = match toggle {
                Some(toggle) => {
                    let document = document.clone();
                    let button = toggle.clone();
                    let current = Rc::clone(&current);
                    Some(Listener::new(&toggle, "click", move |_: MouseEvent| {
                        let next = toggle_theme(current.get(), &store);
                        current.set(next);
                        apply_theme_with_transition(&document, &body, &button, next);
                    })?)
                }
                None => {
                    log::debug!("no {TOGGLE_SELECTOR} on the page, theme is fixed");
                    None
                }
            };

            Ok(Self {
                current,
                _click: click,
            })
        }

        /// The theme most recently chosen, which may still be waiting on a
        /// view transition to reach the page.
        pub fn current(&self) -> Theme {
            self.current.get()
        }
    }
}
