use std::cell::RefCell;

use wasm_bindgen::{closure::Closure, prelude::wasm_bindgen, JsCast};
use web_sys::{Document, Window};

use crate::{
    config::SiteConfig,
    contact::ContactForm,
    dom,
    error::SiteError,
    extras::{stagger_cards, LazyImages, Preloader, TimelineHover},
    language::{apply_language, Language, LanguageSwitch},
    nav::NavController,
    navbar::NavbarEffects,
    particles::scatter_particles,
    reveal::ScrollReveal,
    theme::ThemeToggle,
    tilt::TiltEffect,
    typing::TypingText,
};

thread_local! {
    static SITE: RefCell<Option<Site>> = const { RefCell::new(None) };
}

/// Every running controller. Dropping it detaches listeners, disconnects
/// observers and cancels pending timers.
pub struct Site {
    typing: Option<TypingText>,
    _preloader: Option<Preloader>,
    _theme: Option<ThemeToggle>,
    _language: Option<LanguageSwitch>,
    _reveal: Option<ScrollReveal>,
    _nav: Option<NavController>,
    _navbar: Option<NavbarEffects>,
    _tilt: Option<TiltEffect>,
    _contact: Option<ContactForm>,
    _timeline: Option<TimelineHover>,
    _lazy_images: Option<LazyImages>,
}

fn optional<T>(name: &str, started: Result<T, SiteError>) -> Option<T> {
    match started {
        Ok(controller) => {
            log::debug!("{name} ready");
            Some(controller)
        }
        Err(error) => {
            log::warn!("{name} skipped: {error}");
            None
        }
    }
}

impl Site {
    pub fn start(window: &Window, document: &Document, config: &SiteConfig) -> Self {
        let preloader = if config.preloader.enabled {
            optional("preloader", Preloader::show(document, &config.preloader))
        } else {
            None
        };

        let site = Self {
            _preloader: preloader,
            _theme: optional("theme toggle", ThemeToggle::start(document)),
            _language: optional("language switch", LanguageSwitch::start(document)),
            typing: optional("typing text", TypingText::start(document, &config.typing)),
            _reveal: optional("scroll reveal", ScrollReveal::start(document, &config.reveal)),
            _nav: optional(
                "navigation",
                NavController::start(window, document, &config.navigation),
            ),
            _navbar: optional(
                "navbar effects",
                NavbarEffects::start(window, document, &config.navigation),
            ),
            _tilt: optional("tilt effect", TiltEffect::start(document, &config.tilt)),
            _contact: optional("contact form", ContactForm::start(document, &config.contact)),
            _timeline: optional("timeline hover", TimelineHover::start(document)),
            _lazy_images: optional("lazy images", LazyImages::start(document)),
        };

        if let Some(count) = optional("particles", scatter_particles(document, &config.particles)) {
            log::debug!("scattered {count} particles");
        }
        if let Some(count) = optional("card stagger", stagger_cards(document)) {
            log::debug!("staggered {count} project cards");
        }

        site
    }

    pub fn stop_typing(&self) {
        if let Some(typing) = &self.typing {
            typing.stop();
        }
    }
}

fn boot() {
    let started = dom::window().and_then(|window| {
        let document = window.document().ok_or(SiteError::NoDocument)?;
        let config = SiteConfig::load(&document);
        log::set_max_level(config.log_level.as_level().to_level_filter());

        Ok(Site::start(&window, &document, &config))
    });

    match started {
        Ok(site) => {
            log::info!("page effects started");
            SITE.with(|slot| *slot.borrow_mut() = Some(site));
        }
        Err(error) => log::error!("page effects not started: {error}"),
    }
}

pub fn run() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    let document = match dom::document() {
        Ok(document) => document,
        Err(error) => {
            log::error!("page effects not started: {error}");
            return;
        }
    };

    if document.ready_state() == "loading" {
        let callback = Closure::once_into_js(boot);
        if let Err(error) =
            document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
        {
            log::error!("could not wait for DOMContentLoaded: {}", SiteError::from(error));
        }
    } else {
        boot();
    }
}

/// Switches page text to `code` (`"vi"` or `"en"`). Returns `false` for an
/// unknown code or when the document is unavailable.
#[wasm_bindgen]
pub fn set_language(code: &str) -> bool {
    let Some(language) = Language::from_code(code) else {
        log::warn!("unknown language code {code:?}");
        return false;
    };

    match dom::document().and_then(|document| apply_language(&document, language)) {
        Ok(_) => true,
        Err(error) => {
            log::warn!("language switch failed: {error}");
            false
        }
    }
}

#[wasm_bindgen]
pub fn stop_typing() {
    SITE.with(|slot| {
        if let Some(site) = slot.borrow().as_ref() {
            site.stop_typing();
        }
    });
}

/// Tears down every effect started by `run`.
#[wasm_bindgen]
pub fn shutdown() {
    if SITE.with(|slot| slot.borrow_mut().take()).is_some() {
        log::info!("page effects stopped");
    }
}
