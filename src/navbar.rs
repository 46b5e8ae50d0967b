use crate::config::NavigationConfig;

pub const SCROLLED_CLASS: &str = "scrolled";
pub const HIDDEN_TRANSFORM: &str = "translateY(-100%)";
pub const SHOWN_TRANSFORM: &str = "translateY(0)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavbarLook {
    pub scrolled: bool,
    pub hidden: bool,
}

impl NavbarLook {
    pub fn transform(self) -> &'static str {
        if self.hidden {
            HIDDEN_TRANSFORM
        } else {
            SHOWN_TRANSFORM
        }
    }
}

/// Remembers the previous scroll offset so each tick knows the direction.
#[derive(Clone, Debug, Default)]
pub struct NavbarState {
    last_scroll: f64,
}

impl NavbarState {
    pub fn update(&mut self, current: f64, config: &NavigationConfig) -> NavbarLook {
        let look = NavbarLook {
            scrolled: current > config.scrolled_after,
            hidden: current > self.last_scroll && current > config.hide_after,
        };
        self.last_scroll = current;
        look
    }
}

#[cfg(target_arch = "wasm32")]
pub use controller::NavbarEffects;

#[cfg(target_arch = "wasm32")]
mod controller {
    use web_sys::{Document, Event, HtmlElement, Window};

    use super::{NavbarState, SCROLLED_CLASS};
    use crate::{
        config::NavigationConfig,
        dom::{self, Listener},
        error::SiteError,
        nav::MAIN_NAV_SELECTOR,
    };

    pub struct NavbarEffects {
        _scroll: Listener,
    }

    impl NavbarEffects {
        pub fn start(
            window: &Window,
            document: &Document,
            config: &NavigationConfig,
        ) -> Result<Self, SiteError> {
            let navbar: HtmlElement =
                dom::query_as(document, MAIN_NAV_SELECTOR, "an HTML element")?;
            let mut state = NavbarState::default();
            let config = config.clone();
            let scroll_window = window.clone();

            let scroll = Listener::new(window, "scroll", move |_: Event| {
                let look = state.update(dom::scroll_y(&scroll_window), &config);
                dom::set_class(&navbar, SCROLLED_CLASS, look.scrolled);
                dom::set_style(&navbar, "transform", look.transform());
            })?;

            Ok(Self { _scroll: scroll })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolled_state_starts_after_threshold() {
        let config = NavigationConfig::default();
        let mut state = NavbarState::default();

        assert!(!state.update(100.0, &config).scrolled);
        assert!(state.update(101.0, &config).scrolled);
        assert!(!state.update(40.0, &config).scrolled);
    }

    #[test]
    fn hides_only_when_scrolling_down_past_threshold() {
        let config = NavigationConfig::default();
        let mut state = NavbarState::default();

        assert!(!state.update(400.0, &config).hidden);
        assert!(!state.update(500.0, &config).hidden);
        assert!(state.update(650.0, &config).hidden);
        assert!(state.update(900.0, &config).hidden);
    }

    #[test]
    fn reappears_on_any_upward_scroll() {
        let config = NavigationConfig::default();
        let mut state = NavbarState::default();
        state.update(1_200.0, &config);

        let look = state.update(1_150.0, &config);

        assert!(!look.hidden);
        assert!(look.scrolled);
        assert_eq!(look.transform(), SHOWN_TRANSFORM);
    }

    #[test]
    fn holding_still_keeps_bar_visible() {
        let config = NavigationConfig::default();
        let mut state = NavbarState::default();
        state.update(800.0, &config);

        assert!(!state.update(800.0, &config).hidden);
    }
}
