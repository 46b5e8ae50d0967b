use crate::config::ContactConfig;

pub const FORM_SELECTOR: &str = ".form-container";
pub const SUBMIT_SELECTOR: &str = ".submit-btn";
pub const SENDING_LABEL: &str =
    "<span>Sending...</span><ion-icon name=\"hourglass-outline\"></ion-icon>";
pub const SENT_LABEL: &str =
    "<span>Message Sent!</span><ion-icon name=\"checkmark-outline\"></ion-icon>";
pub const SUCCESS_BACKGROUND: &str = "var(--success-color)";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Sending,
    Sent,
}

impl SubmitPhase {
    fn next(self) -> Self {
        match self {
            Self::Idle => Self::Sending,
            Self::Sending => Self::Sent,
            Self::Sent => Self::Idle,
        }
    }

    /// How long the phase lasts before advancing; `Idle` waits for a submit.
    pub fn delay_ms(self, config: &ContactConfig) -> Option<u32> {
        match self {
            Self::Idle => None,
            Self::Sending => Some(config.send_delay_ms),
            Self::Sent => Some(config.reset_delay_ms),
        }
    }

    /// `None` means the button's original label.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Sending => Some(SENDING_LABEL),
            Self::Sent => Some(SENT_LABEL),
        }
    }

    pub fn button_disabled(self) -> bool {
        !matches!(self, Self::Idle)
    }

    pub fn background(self) -> Option<&'static str> {
        match self {
            Self::Sent => Some(SUCCESS_BACKGROUND),
            _ => None,
        }
    }
}

/// Simulated send: there is no network call and no failure branch.
#[derive(Clone, Debug, Default)]
pub struct SubmitCycle {
    phase: SubmitPhase,
}

impl SubmitCycle {
    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    /// Starts a cycle; returns `false` when one is already running.
    pub fn begin(&mut self) -> bool {
        if self.phase != SubmitPhase::Idle {
            return false;
        }
        self.phase = SubmitPhase::Sending;
        true
    }

    pub fn advance(&mut self) -> SubmitPhase {
        if self.phase != SubmitPhase::Idle {
            self.phase = self.phase.next();
        }
        self.phase
    }
}

#[cfg(target_arch = "wasm32")]
pub use controller::ContactForm;

#[cfg(target_arch = "wasm32")]
mod controller {
    use std::{cell::RefCell, rc::Rc};

    use gloo_timers::callback::Timeout;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Event, HtmlButtonElement, HtmlFormElement};

    use super::{SubmitCycle, SubmitPhase, FORM_SELECTOR, SUBMIT_SELECTOR};
    use crate::{
        config::ContactConfig,
        dom::{self, Listener},
        error::SiteError,
    };

    struct Submission {
        form: HtmlFormElement,
        button: HtmlButtonElement,
        config: ContactConfig,
        cycle: RefCell<SubmitCycle>,
        original_label: RefCell<String>,
        pending: RefCell<Option<Timeout>>,
    }

    pub struct ContactForm {
        submission: Rc<Submission>,
        _submit: Listener,
    }

    impl ContactForm {
        pub fn start(document: &Document, config: &ContactConfig) -> Result<Self, SiteError> {
            let form: HtmlFormElement = dom::query_as(document, FORM_SELECTOR, "a form")?;
            let button = form
                .query_selector(SUBMIT_SELECTOR)?
                .ok_or_else(|| SiteError::MissingElement(SUBMIT_SELECTOR.to_string()))?
                .dyn_into::<HtmlButtonElement>()
                .map_err(|_| SiteError::UnexpectedElement {
                    selector: SUBMIT_SELECTOR.to_string(),
                    expected: "a button",
                })?;

            let submission = Rc::new(Submission {
                form: form.clone(),
                button,
                config: config.clone(),
                cycle: RefCell::new(SubmitCycle::default()),
                original_label: RefCell::new(String::new()),
                pending: RefCell::new(None),
            });

            let handle = Rc::clone(&submission);
            let submit = Listener::new(&form, "submit", move |event: Event| {
                event.prevent_default();

                if !handle.cycle.borrow_mut().begin() {
                    return;
                }
                *handle.original_label.borrow_mut() = handle.button.inner_html();
                log::debug!("contact form submitted, simulating send");
                render(&handle);
            })?;

            Ok(Self {
                submission,
                _submit: submit,
            })
        }
    }

    impl Drop for ContactForm {
        fn drop(&mut self) {
            if let Some(timeout) = self.submission.pending.borrow_mut().take() {
                timeout.cancel();
            }
        }
    }

    fn render(submission: &Rc<Submission>) {
        let phase = submission.cycle.borrow().phase();
        let button = &submission.button;

        match phase.label() {
            Some(label) => button.set_inner_html(label),
            None => button.set_inner_html(&submission.original_label.borrow()),
        }
        button.set_disabled(phase.button_disabled());
        match phase.background() {
            Some(background) => dom::set_style(button, "background", background),
            None => dom::clear_style(button, "background"),
        }

        if phase == SubmitPhase::Idle {
            submission.form.reset();
        }

        if let Some(delay_ms) = phase.delay_ms(&submission.config) {
            let next = Rc::clone(submission);
            let timeout = Timeout::new(delay_ms, move || {
                next.cycle.borrow_mut().advance();
                render(&next);
            });
            *submission.pending.borrow_mut() = Some(timeout);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_runs_sending_sent_then_back_to_idle() {
        let mut cycle = SubmitCycle::default();

        assert!(cycle.begin());
        assert_eq!(cycle.phase(), SubmitPhase::Sending);
        assert_eq!(cycle.advance(), SubmitPhase::Sent);
        assert_eq!(cycle.advance(), SubmitPhase::Idle);
    }

    #[test]
    fn resubmitting_mid_cycle_is_ignored() {
        let mut cycle = SubmitCycle::default();
        cycle.begin();

        assert!(!cycle.begin());
        cycle.advance();
        assert!(!cycle.begin());
        cycle.advance();
        assert!(cycle.begin());
    }

    #[test]
    fn idle_cycle_does_not_advance_on_its_own() {
        let mut cycle = SubmitCycle::default();

        assert_eq!(cycle.advance(), SubmitPhase::Idle);
    }

    #[test]
    fn phases_describe_button_state() {
        let config = ContactConfig::default();

        assert_eq!(SubmitPhase::Sending.label(), Some(SENDING_LABEL));
        assert!(SubmitPhase::Sending.button_disabled());
        assert_eq!(SubmitPhase::Sending.background(), None);
        assert_eq!(SubmitPhase::Sending.delay_ms(&config), Some(2_000));

        assert_eq!(SubmitPhase::Sent.label(), Some(SENT_LABEL));
        assert!(SubmitPhase::Sent.button_disabled());
        assert_eq!(SubmitPhase::Sent.background(), Some(SUCCESS_BACKGROUND));
        assert_eq!(SubmitPhase::Sent.delay_ms(&config), Some(2_000));

        assert_eq!(SubmitPhase::Idle.label(), None);
        assert!(!SubmitPhase::Idle.button_disabled());
        assert_eq!(SubmitPhase::Idle.delay_ms(&config), None);
    }
}
