#![cfg(target_arch = "wasm32")]

use cv_effects::{
    config::{ContactConfig, TypingConfig},
    contact::{ContactForm, SENDING_LABEL},
    language::{apply_language, Language},
    theme::{BrowserStorage, PreferenceStore, Theme, ThemeToggle, DARK_CLASS, THEME_KEY},
    typing::TypingText,
};
use js_sys::{Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

const VIEW_TRANSITION: &str = "startViewTransition";

fn document() -> Document {
    web_sys::window()
        .and_then(|w| w.document())
        .expect("browser document")
}

fn mount(document: &Document, tag: &str, attributes: &[(&str, &str)], text: &str) -> Element {
    let element = document.create_element(tag).expect("element created");
    for (name, value) in attributes {
        element.set_attribute(name, value).expect("attribute set");
    }
    element.set_text_content(Some(text));
    document
        .body()
        .expect("document body")
        .append_child(&element)
        .expect("element attached");
    element
}

fn body_is_dark(document: &Document) -> bool {
    document
        .body()
        .expect("document body")
        .class_list()
        .contains(DARK_CLASS)
}

fn clear_theme(document: &Document) {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .expect("local storage")
        .remove_item(THEME_KEY)
        .expect("theme key removed");
    let _ = document
        .body()
        .expect("document body")
        .class_list()
        .remove_1(DARK_CLASS);
}

/// Shadows `document.startViewTransition` for the duration of a test.
fn override_view_transition(document: &Document, value: &JsValue) {
    Reflect::set(document, &JsValue::from_str(VIEW_TRANSITION), value)
        .expect("view transition overridden");
}

fn restore_view_transition(document: &Document) {
    let _ = Reflect::delete_property(
        document.unchecked_ref::<Object>(),
        &JsValue::from_str(VIEW_TRANSITION),
    );
}

fn click(element: &Element) {
    element
        .dyn_ref::<HtmlElement>()
        .expect("clickable element")
        .click();
}

#[wasm_bindgen_test]
fn switching_language_rewrites_localized_text() {
    let document = document();
    let heading = mount(
        &document,
        "h2",
        &[("data-vi", "K\u{1ef9} n\u{103}ng"), ("data-en", "Skills")],
        "Skills",
    );
    let english_only = mount(&document, "p", &[("data-en", "Contact me")], "Contact me");
    let vi_control = mount(&document, "button", &[("id", "lang-vi")], "VI");
    let en_control = mount(&document, "button", &[("id", "lang-en"), ("class", "active")], "EN");

    apply_language(&document, Language::Vi).expect("language applied");

    assert_eq!(heading.text_content().as_deref(), Some("K\u{1ef9} n\u{103}ng"));
    assert_eq!(english_only.text_content().as_deref(), Some("Contact me"));
    assert!(vi_control.class_list().contains("active"));
    assert!(!en_control.class_list().contains("active"));

    for element in [heading, english_only, vi_control, en_control] {
        element.remove();
    }
}

#[wasm_bindgen_test]
fn stored_dark_theme_is_applied_without_a_toggle_button() {
    let document = document();
    assert!(document.query_selector(".theme-toggle").expect("query").is_none());
    BrowserStorage::local().save(THEME_KEY, "dark");

    let controller = ThemeToggle::start(&document).expect("theme starts without a toggle");

    assert!(body_is_dark(&document));
    assert_eq!(controller.current(), Theme::Dark);

    drop(controller);
    clear_theme(&document);
}

#[wasm_bindgen_test]
fn clicking_the_toggle_twice_restores_body_class_and_stored_value() {
    let document = document();
    let store = BrowserStorage::local();
    store.save(THEME_KEY, "light");
    override_view_transition(&document, &JsValue::UNDEFINED);
    let toggle = mount(&document, "button", &[("class", "theme-toggle")], "");

    let controller = ThemeToggle::start(&document).expect("theme toggle starts");
    assert!(!body_is_dark(&document));
    assert_eq!(toggle.get_attribute("aria-pressed").as_deref(), Some("false"));

    click(&toggle);
    assert!(body_is_dark(&document));
    assert_eq!(store.load(THEME_KEY).as_deref(), Some("dark"));
    assert_eq!(toggle.get_attribute("aria-pressed").as_deref(), Some("true"));

    click(&toggle);
    assert!(!body_is_dark(&document));
    assert_eq!(store.load(THEME_KEY).as_deref(), Some("light"));
    assert_eq!(toggle.get_attribute("aria-label").as_deref(), Some("Switch to dark theme"));

    drop(controller);
    toggle.remove();
    restore_view_transition(&document);
    clear_theme(&document);
}

#[wasm_bindgen_test]
fn clicks_during_a_pending_transition_still_alternate() {
    let document = document();
    let store = BrowserStorage::local();
    store.save(THEME_KEY, "light");
    // A transition that never runs its callback keeps the body class stale.
    override_view_transition(&document, &Function::new_no_args("").into());
    let toggle = mount(&document, "button", &[("class", "theme-toggle")], "");

    let controller = ThemeToggle::start(&document).expect("theme toggle starts");

    click(&toggle);
    assert_eq!(controller.current(), Theme::Dark);
    assert_eq!(store.load(THEME_KEY).as_deref(), Some("dark"));

    click(&toggle);
    assert_eq!(controller.current(), Theme::Light);
    assert_eq!(store.load(THEME_KEY).as_deref(), Some("light"));

    drop(controller);
    toggle.remove();
    restore_view_transition(&document);
    clear_theme(&document);
}

#[wasm_bindgen_test]
fn submitting_the_contact_form_disables_the_button_while_sending() {
    let document = document();
    let form = mount(&document, "form", &[("class", "form-container")], "");
    form.set_inner_html(r#"<button class="submit-btn" type="submit">Send</button>"#);
    let button: HtmlButtonElement = form
        .query_selector(".submit-btn")
        .expect("query")
        .expect("submit button")
        .dyn_into()
        .expect("button element");

    let controller = ContactForm::start(&document, &ContactConfig::default())
        .expect("contact form starts");
    assert!(!button.disabled());

    let submit = Event::new("submit").expect("submit event");
    form.dispatch_event(&submit).expect("submit dispatched");
    assert!(button.disabled());
    assert_eq!(button.inner_html(), SENDING_LABEL);

    // A second submit mid-cycle changes nothing.
    form.dispatch_event(&Event::new("submit").expect("submit event"))
        .expect("submit dispatched");
    assert!(button.disabled());
    assert_eq!(button.inner_html(), SENDING_LABEL);

    drop(controller);
    form.remove();
}

#[wasm_bindgen_test]
fn typing_text_shows_first_character_immediately_and_stops() {
    let document = document();
    let target = mount(&document, "span", &[("class", "typing-text")], "");
    let config = TypingConfig {
        phrases: vec!["AI Developer".to_string()],
        ..TypingConfig::default()
    };

    let typing = TypingText::start(&document, &config).expect("typing starts");
    assert_eq!(target.text_content().as_deref(), Some("A"));

    typing.stop();
    drop(typing);
    target.remove();
}
