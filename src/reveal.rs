use crate::config::RevealConfig;

pub const ANIMATED_CLASS: &str = "animate-in";
pub const PROGRESS_PROPERTY: &str = "--progress";

/// What an observed element does once it scrolls into view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealKind {
    Generic,
    Bar,
    Counter,
    Circle,
}

impl RevealKind {
    pub const ALL: [Self; 4] = [Self::Generic, Self::Bar, Self::Counter, Self::Circle];

    pub fn selector(self) -> &'static str {
        match self {
            Self::Generic => ".animate-on-scroll",
            Self::Bar => ".skill-progress",
            Self::Counter => ".stat-number",
            Self::Circle => ".circle-progress",
        }
    }

    fn class_name(self) -> &'static str {
        &self.selector()[1..]
    }

    /// Picks the most specific kind for an element carrying several hooks.
    pub fn classify(has_class: impl Fn(&str) -> bool) -> Self {
        [Self::Bar, Self::Counter, Self::Circle]
            .into_iter()
            .find(|kind| has_class(kind.class_name()))
            .unwrap_or(Self::Generic)
    }

    pub fn threshold(self, config: &RevealConfig) -> f64 {
        let specific = match self {
            Self::Generic => None,
            Self::Bar => config.bar_threshold,
            Self::Counter => config.counter_threshold,
            Self::Circle => config.circle_threshold,
        };
        specific.unwrap_or(config.threshold)
    }
}

/// Integer-prefix parse: leading whitespace, an optional sign, then digits.
/// Anything after the digits is ignored, so `"85%"` reads as 85.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();

    if digits_len == 0 {
        return None;
    }

    let value: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// CSS width for a skill bar, clamped to the displayable range.
pub fn bar_width(raw: &str) -> Option<String> {
    let percent = parse_leading_int(raw)?.clamp(0, 100);
    Some(format!("{percent}%"))
}

pub fn counter_target(raw: &str) -> Option<f64> {
    parse_leading_int(raw).map(|value| value as f64)
}

/// Circle targets outside `[0, 100]` are rejected rather than clamped.
pub fn circle_target(raw: &str) -> Option<f64> {
    parse_leading_int(raw)
        .filter(|value| (0..=100).contains(value))
        .map(|value| value as f64)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    Continue(f64),
    Finished(f64),
}

impl Step {
    pub fn value(self) -> f64 {
        match self {
            Self::Continue(value) | Self::Finished(value) => value,
        }
    }
}

/// Fixed-increment ramp from zero to `target`, one increment per frame.
/// The last step always lands exactly on `target`.
#[derive(Clone, Debug)]
pub struct FrameAnimation {
    target: f64,
    increment: f64,
    current: f64,
    finished: bool,
}

impl FrameAnimation {
    pub fn new(target: f64, duration_ms: u32, frame_ms: u32) -> Self {
        let frames = f64::from(duration_ms) / f64::from(frame_ms.max(1));

        Self {
            target,
            increment: target / frames,
            current: 0.0,
            finished: false,
        }
    }

    pub fn from_config(target: f64, config: &RevealConfig) -> Self {
        Self::new(target, config.duration_ms, config.frame_ms)
    }

    pub fn advance(&mut self) -> Step {
        if self.finished {
            return Step::Finished(self.target);
        }

        self.current += self.increment;

        if self.increment > 0.0 && self.current < self.target {
            Step::Continue(self.current)
        } else {
            self.finished = true;
            Step::Finished(self.target)
        }
    }
}

pub fn format_count(value: f64) -> String {
    format!("{}", value.floor() as i64)
}

#[cfg(target_arch = "wasm32")]
pub use controller::ScrollReveal;

#[cfg(target_arch = "wasm32")]
mod controller {
    use std::{cell::RefCell, rc::Rc};

    use gloo_timers::callback::Timeout;
    use js_sys::Array;
    use wasm_bindgen::{closure::Closure, JsCast, JsValue};
    use web_sys::{
        Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
        IntersectionObserverInit,
    };

    use super::{
        bar_width, circle_target, counter_target, format_count, FrameAnimation, RevealKind, Step,
        ANIMATED_CLASS, PROGRESS_PROPERTY,
    };
    use crate::{config::RevealConfig, dom, error::SiteError};

    type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

    #[derive(Clone)]
    struct Effects {
        config: Rc<RevealConfig>,
        reduced_motion: bool,
        timers: Rc<RefCell<Vec<Timeout>>>,
    }

    impl Effects {
        fn play(&self, kind: RevealKind, element: &Element) {
            let Some(element) = element.dyn_ref::<HtmlElement>() else {
                return;
            };

            match kind {
                RevealKind::Generic => {}
                RevealKind::Bar => self.fill_bar(element),
                RevealKind::Counter => self.count_up(element),
                RevealKind::Circle => self.fill_circle(element),
            }
        }

        fn fill_bar(&self, element: &HtmlElement) {
            let Some(width) = element.get_attribute("data-progress").as_deref().and_then(bar_width)
            else {
                log::debug!("skill bar without a numeric data-progress, skipping");
                return;
            };

            let element = element.clone();
            let timeout = Timeout::new(self.config.bar_delay_ms, move || {
                dom::set_style(&element, "width", &width);
            });
            self.timers.borrow_mut().push(timeout);
        }

        fn count_up(&self, element: &HtmlElement) {
            let Some(target) = element
                .get_attribute("data-target")
                .as_deref()
                .and_then(counter_target)
            else {
                log::debug!("counter without a numeric data-target, skipping");
                return;
            };

            let animation = FrameAnimation::from_config(target, &self.config);
            let render = move |element: &HtmlElement, step: Step| {
                element.set_text_content(Some(&format_count(step.value())));
            };
            self.run(element.clone(), animation, render);
        }

        fn fill_circle(&self, element: &HtmlElement) {
            let Some(target) = element
                .get_attribute("data-percent")
                .as_deref()
                .and_then(circle_target)
            else {
                log::debug!("circle progress outside 0..=100 or not numeric, skipping");
                return;
            };

            let effects = self.clone();
            let element = element.clone();
            let timeout = Timeout::new(self.config.circle_delay_ms, move || {
                let animation = FrameAnimation::from_config(target, &effects.config);
                let render = |element: &HtmlElement, step: Step| {
                    dom::set_style(element, PROGRESS_PROPERTY, &step.value().to_string());
                };
                effects.run(element, animation, render);
            });
            self.timers.borrow_mut().push(timeout);
        }

        fn run(
            &self,
            element: HtmlElement,
            animation: FrameAnimation,
            render: impl Fn(&HtmlElement, Step) + 'static,
        ) {
            let render = Rc::new(render);

            if self.reduced_motion {
                render(&element, Step::Finished(finish(animation)));
                return;
            }

            let frame_render = Rc::clone(&render);
            let frame_element = element.clone();
            let mut state = animation.clone();
            let started = dom::animate_frames(move || {
                let step = state.advance();
                frame_render(&frame_element, step);
                matches!(step, Step::Continue(_))
            });

            if let Err(error) = started {
                log::debug!("animation frames unavailable ({error}), jumping to target");
                render(&element, Step::Finished(finish(animation)));
            }
        }
    }

    fn finish(mut animation: FrameAnimation) -> f64 {
        loop {
            if let Step::Finished(value) = animation.advance() {
                return value;
            }
        }
    }

    /// Observers for every reveal hook, one per kind so each can use its own
    /// threshold.
    pub struct ScrollReveal {
        observers: Vec<(IntersectionObserver, ObserverCallback)>,
        timers: Rc<RefCell<Vec<Timeout>>>,
    }

    impl ScrollReveal {
        pub fn start(document: &Document, config: &RevealConfig) -> Result<Self, SiteError> {
            let effects = Effects {
                config: Rc::new(config.clone()),
                reduced_motion: dom::prefers_reduced_motion(),
                timers: Rc::new(RefCell::new(Vec::new())),
            };

            let selector = RevealKind::ALL
                .iter()
                .map(|kind| kind.selector())
                .collect::<Vec<_>>()
                .join(", ");
            let elements = dom::query_all(document, &selector)?;

            let mut observers = Vec::with_capacity(RevealKind::ALL.len());
            for kind in RevealKind::ALL {
                let (observer, callback) = observer_for(kind, config, effects.clone())?;

                for element in &elements {
                    let list = element.class_list();
                    if RevealKind::classify(|class| list.contains(class)) == kind {
                        observer.observe(element);
                    }
                }

                observers.push((observer, callback));
            }

            log::info!("scroll reveal watching {} elements", elements.len());
            Ok(Self {
                observers,
                timers: effects.timers,
            })
        }
    }

    impl Drop for ScrollReveal {
        fn drop(&mut self) {
            for (observer, _) in &self.observers {
                observer.disconnect();
            }
            self.timers.borrow_mut().clear();
        }
    }

    fn observer_for(
        kind: RevealKind,
        config: &RevealConfig,
        effects: Effects,
    ) -> Result<(IntersectionObserver, ObserverCallback), SiteError> {
        let callback: ObserverCallback =
            Closure::new(move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }

                    let target = entry.target();
                    observer.unobserve(&target);

                    if target.class_list().contains(ANIMATED_CLASS) {
                        continue;
                    }
                    let _ = target.class_list().add_1(ANIMATED_CLASS);
                    effects.play(kind, &target);
                }
            });

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(kind.threshold(config)));
        options.set_root_margin(&config.root_margin);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        Ok((observer, callback))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(mut animation: FrameAnimation) -> Vec<f64> {
        let mut values = Vec::new();
        loop {
            let step = animation.advance();
            values.push(step.value());
            if let Step::Finished(_) = step {
                return values;
            }
        }
    }

    #[test]
    fn leading_int_follows_prefix_rules() {
        assert_eq!(parse_leading_int("85"), Some(85));
        assert_eq!(parse_leading_int("  85%"), Some(85));
        assert_eq!(parse_leading_int("-3px"), Some(-3));
        assert_eq!(parse_leading_int("+7"), Some(7));
        assert_eq!(parse_leading_int("12.9"), Some(12));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
    }

    #[test]
    fn counter_climbs_monotonically_and_lands_on_target() {
        let values = run_to_end(FrameAnimation::new(1_000.0, 2_000, 16));

        assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(values.iter().all(|value| *value <= 1_000.0));
        assert_eq!(values.last().copied(), Some(1_000.0));
        assert_eq!(values.len(), 125);
    }

    #[test]
    fn awkward_targets_never_overshoot() {
        for target in [1.0, 7.0, 33.0, 99.0, 100.0, 12_345.0] {
            let values = run_to_end(FrameAnimation::new(target, 2_000, 16));

            assert!(values.windows(2).all(|pair| pair[0] <= pair[1]), "target {target}");
            assert!(values.iter().all(|value| *value <= target), "target {target}");
            assert_eq!(values.last().copied(), Some(target));
        }
    }

    #[test]
    fn zero_and_negative_targets_finish_immediately() {
        assert_eq!(run_to_end(FrameAnimation::new(0.0, 2_000, 16)), vec![0.0]);
        assert_eq!(run_to_end(FrameAnimation::new(-5.0, 2_000, 16)), vec![-5.0]);
    }

    #[test]
    fn finished_animation_stays_finished() {
        let mut animation = FrameAnimation::new(0.0, 2_000, 16);
        animation.advance();

        assert_eq!(animation.advance(), Step::Finished(0.0));
    }

    #[test]
    fn count_display_uses_floor() {
        assert_eq!(format_count(41.99), "41");
        assert_eq!(format_count(8.0), "8");
    }

    #[test]
    fn circle_target_rejects_out_of_range_and_garbage() {
        assert_eq!(circle_target("0"), Some(0.0));
        assert_eq!(circle_target("100"), Some(100.0));
        assert_eq!(circle_target("75%"), Some(75.0));
        assert_eq!(circle_target("101"), None);
        assert_eq!(circle_target("-1"), None);
        assert_eq!(circle_target("NaN"), None);
    }

    #[test]
    fn bar_width_is_clamped_to_displayable_range() {
        assert_eq!(bar_width("85").as_deref(), Some("85%"));
        assert_eq!(bar_width("150").as_deref(), Some("100%"));
        assert_eq!(bar_width("-20").as_deref(), Some("0%"));
        assert_eq!(bar_width("lots"), None);
    }

    #[test]
    fn classify_prefers_specific_kinds() {
        let classes = ["animate-on-scroll", "stat-number"];
        let kind = RevealKind::classify(|class| classes.contains(&class));
        assert_eq!(kind, RevealKind::Counter);

        let kind = RevealKind::classify(|class| class == "animate-on-scroll");
        assert_eq!(kind, RevealKind::Generic);
    }

    #[test]
    fn per_kind_threshold_overrides_general_one() {
        let config = RevealConfig {
            circle_threshold: Some(0.5),
            ..RevealConfig::default()
        };

        assert_eq!(RevealKind::Circle.threshold(&config), 0.5);
        assert_eq!(RevealKind::Bar.threshold(&config), 0.1);
        assert_eq!(RevealKind::Generic.threshold(&config), 0.1);
    }
}
