use crate::config::NavigationConfig;

pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
pub const MAIN_NAV_SELECTOR: &str = ".main-nav";
pub const NAV_TOGGLE_SELECTOR: &str = ".nav-toggle";
pub const NAV_MENU_SELECTOR: &str = ".nav-menu";
pub const NAV_LINK_SELECTOR: &str = ".nav-link";
pub const SECTION_SELECTOR: &str = "section[id]";
pub const BACK_TO_TOP_SELECTOR: &str = "#backToTop";
pub const ACTIVE_CLASS: &str = "active";
pub const VISIBLE_CLASS: &str = "visible";
pub const CANCEL_KEY: &str = "Escape";

/// Document offset an anchor jump should land on so the target clears the
/// fixed navigation bar.
pub fn scroll_target(element_top: f64, nav_height: f64, config: &NavigationConfig) -> f64 {
    element_top - nav_height - config.scroll_margin
}

/// The last section, in document order, whose top minus the spy offset has
/// been scrolled past.
pub fn active_section<'a, I>(
    sections: I,
    scroll_y: f64,
    config: &NavigationConfig,
) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    sections
        .into_iter()
        .filter(|(_, top)| scroll_y >= top - config.spy_offset)
        .last()
        .map(|(id, _)| id)
}

pub fn link_targets_section(href: Option<&str>, section: Option<&str>) -> bool {
    match (href, section) {
        (Some(href), Some(id)) => href.strip_prefix('#') == Some(id),
        _ => false,
    }
}

pub fn back_to_top_visible(scroll_y: f64, config: &NavigationConfig) -> bool {
    scroll_y > config.back_to_top_after
}

#[cfg(target_arch = "wasm32")]
pub use controller::NavController;

#[cfg(target_arch = "wasm32")]
mod controller {
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent, MouseEvent, Window};

    use super::{
        active_section, back_to_top_visible, link_targets_section, scroll_target, ACTIVE_CLASS,
        ANCHOR_SELECTOR, BACK_TO_TOP_SELECTOR, CANCEL_KEY, MAIN_NAV_SELECTOR, NAV_LINK_SELECTOR,
        NAV_MENU_SELECTOR, NAV_TOGGLE_SELECTOR, SECTION_SELECTOR, VISIBLE_CLASS,
    };
    use crate::{
        config::NavigationConfig,
        dom::{self, Listener},
        error::SiteError,
    };

    /// Anchor smooth-scroll, mobile menu, scroll-spy and back-to-top.
    pub struct NavController {
        _anchors: Vec<Listener>,
        _menu: Option<MobileMenu>,
        _spy: Listener,
        _back_to_top: Option<BackToTop>,
    }

    impl NavController {
        pub fn start(
            window: &Window,
            document: &Document,
            config: &NavigationConfig,
        ) -> Result<Self, SiteError> {
            let anchors = smooth_anchors(window, document, config)?;

            let menu = match MobileMenu::start(document) {
                Ok(menu) => Some(menu),
                Err(error) => {
                    log::warn!("mobile menu disabled: {error}");
                    None
                }
            };

            let spy = scroll_spy(window, document, config)?;

            let back_to_top = match BackToTop::start(window, document, config) {
                Ok(control) => Some(control),
                Err(error) => {
                    log::warn!("back-to-top disabled: {error}");
                    None
                }
            };

            Ok(Self {
                _anchors: anchors,
                _menu: menu,
                _spy: spy,
                _back_to_top: back_to_top,
            })
        }
    }

    fn nav_height(document: &Document) -> f64 {
        document
            .query_selector(MAIN_NAV_SELECTOR)
            .ok()
            .flatten()
            .and_then(|nav| nav.dyn_into::<HtmlElement>().ok())
            .map(|nav| f64::from(nav.offset_height()))
            .unwrap_or(0.0)
    }

    fn smooth_anchors(
        window: &Window,
        document: &Document,
        config: &NavigationConfig,
    ) -> Result<Vec<Listener>, SiteError> {
        dom::query_all(document, ANCHOR_SELECTOR)?
            .into_iter()
            .map(|anchor| {
                let window = window.clone();
                let document = document.clone();
                let config = config.clone();
                let link = anchor.clone();

                Listener::new(&anchor, "click", move |event: MouseEvent| {
                    event.prevent_default();

                    let Some(target) = link
                        .get_attribute("href")
                        .and_then(|href| document.query_selector(&href).ok().flatten())
                        .and_then(|target| target.dyn_into::<HtmlElement>().ok())
                    else {
                        return;
                    };

                    let top = scroll_target(
                        f64::from(target.offset_top()),
                        nav_height(&document),
                        &config,
                    );
                    dom::smooth_scroll_to(&window, top);
                })
            })
            .collect()
    }

    fn scroll_spy(
        window: &Window,
        document: &Document,
        config: &NavigationConfig,
    ) -> Result<Listener, SiteError> {
        let sections: Vec<HtmlElement> = dom::query_all_html(document, SECTION_SELECTOR)?;
        let links: Vec<Element> = dom::query_all(document, NAV_LINK_SELECTOR)?;
        let config = config.clone();
        let scroll_window = window.clone();

        Listener::new(window, "scroll", move |_: Event| {
            let ids: Vec<(String, f64)> = sections
                .iter()
                .map(|section| (section.id(), f64::from(section.offset_top())))
                .collect();
            let current = active_section(
                ids.iter().map(|(id, top)| (id.as_str(), *top)),
                dom::scroll_y(&scroll_window),
                &config,
            );

            for link in &links {
                let active = link_targets_section(link.get_attribute("href").as_deref(), current);
                dom::set_class(link, ACTIVE_CLASS, active);
            }
        })
    }

    struct MobileMenu {
        _toggle: Listener,
        _escape: Listener,
    }

    impl MobileMenu {
        fn start(document: &Document) -> Result<Self, SiteError> {
            let toggle = dom::query(document, NAV_TOGGLE_SELECTOR)?;
            let menu = dom::query(document, NAV_MENU_SELECTOR)?;

            let click = {
                let toggle_handle = toggle.clone();
                let menu = menu.clone();
                Listener::new(&toggle, "click", move |_: MouseEvent| {
                    let _ = menu.class_list().toggle(ACTIVE_CLASS);
                    let _ = toggle_handle.class_list().toggle(ACTIVE_CLASS);
                })?
            };

            let escape = Listener::new(document, "keydown", move |event: KeyboardEvent| {
                if event.key() == CANCEL_KEY && menu.class_list().contains(ACTIVE_CLASS) {
                    dom::set_class(&menu, ACTIVE_CLASS, false);
                    dom::set_class(&toggle, ACTIVE_CLASS, false);
                }
            })?;

            Ok(Self {
                _toggle: click,
                _escape: escape,
            })
        }
    }

    struct BackToTop {
        _visibility: Listener,
        _click: Listener,
    }

    impl BackToTop {
        fn start(
            window: &Window,
            document: &Document,
            config: &NavigationConfig,
        ) -> Result<Self, SiteError> {
            let control = dom::query(document, BACK_TO_TOP_SELECTOR)?;

            let visibility = {
                let control = control.clone();
                let config = config.clone();
                let scroll_window = window.clone();
                Listener::new(window, "scroll", move |_: Event| {
                    let visible = back_to_top_visible(dom::scroll_y(&scroll_window), &config);
                    dom::set_class(&control, VISIBLE_CLASS, visible);
                })?
            };

            let click_window = window.clone();
            let click = Listener::new(&control, "click", move |_: MouseEvent| {
                dom::smooth_scroll_to(&click_window, 0.0);
            })?;

            Ok(Self {
                _visibility: visibility,
                _click: click,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECTIONS: [(&str, f64); 3] = [
        ("about", 600.0),
        ("skills", 1_400.0),
        ("contact", 2_600.0),
    ];

    fn active_links(scroll_y: f64) -> Vec<&'static str> {
        let config = NavigationConfig::default();
        let current = active_section(SECTIONS, scroll_y, &config);
        let links = ["#about", "#skills", "#contact", "#"];

        links
            .into_iter()
            .filter(|href| link_targets_section(Some(*href), current))
            .collect()
    }

    #[test]
    fn anchor_target_clears_nav_bar_and_margin() {
        let config = NavigationConfig::default();

        assert_eq!(scroll_target(1_000.0, 70.0, &config), 910.0);
        assert_eq!(scroll_target(1_000.0, 0.0, &config), 980.0);
    }

    #[test]
    fn no_link_is_active_before_first_section() {
        assert!(active_links(0.0).is_empty());
        assert!(active_links(399.0).is_empty());
    }

    #[test]
    fn first_section_activates_at_its_adjusted_top() {
        assert_eq!(active_links(400.0), vec!["#about"]);
    }

    #[test]
    fn exactly_one_link_follows_the_last_passed_section() {
        assert_eq!(active_links(1_199.0), vec!["#about"]);
        assert_eq!(active_links(1_200.0), vec!["#skills"]);
        assert_eq!(active_links(10_000.0), vec!["#contact"]);
    }

    #[test]
    fn link_matching_requires_hash_prefix() {
        assert!(link_targets_section(Some("#about"), Some("about")));
        assert!(!link_targets_section(Some("about"), Some("about")));
        assert!(!link_targets_section(None, Some("about")));
        assert!(!link_targets_section(Some("#"), None));
    }

    #[test]
    fn back_to_top_boundary_is_strict() {
        let config = NavigationConfig::default();

        assert!(!back_to_top_visible(0.0, &config));
        assert!(!back_to_top_visible(500.0, &config));
        assert!(back_to_top_visible(500.5, &config));
        assert!(back_to_top_visible(501.0, &config));
    }
}
