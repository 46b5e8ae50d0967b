use crate::{config::TypingConfig, error::SiteError};

pub const TYPING_SELECTOR: &str = ".typing-text";

/// What to display after a tick and how long to wait before the next one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypingFrame {
    pub text: String,
    pub delay_ms: u32,
}

/// Type/pause/delete cycle over a fixed phrase list. Lengths are counted in
/// chars so accented phrases never split inside a code point.
#[derive(Clone, Debug)]
pub struct TypingState {
    phrases: Vec<String>,
    index: usize,
    visible: usize,
    deleting: bool,
    type_delay_ms: u32,
    delete_delay_ms: u32,
    pause_ms: u32,
    next_phrase_delay_ms: u32,
}

impl TypingState {
    pub fn new(config: &TypingConfig) -> Result<Self, SiteError> {
        let phrases: Vec<String> = config
            .phrases
            .iter()
            .filter(|phrase| !phrase.is_empty())
            .cloned()
            .collect();

        if phrases.is_empty() {
            return Err(SiteError::EmptyPhrases);
        }

        Ok(Self {
            phrases,
            index: 0,
            visible: 0,
            deleting: false,
            type_delay_ms: config.type_delay_ms,
            delete_delay_ms: config.delete_delay_ms,
            pause_ms: config.pause_ms,
            next_phrase_delay_ms: config.next_phrase_delay_ms,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn current_text(&self) -> String {
        self.phrases[self.index].chars().take(self.visible).collect()
    }

    pub fn tick(&mut self) -> TypingFrame {
        let full_len = self.phrases[self.index].chars().count();

        if self.deleting {
            self.visible = self.visible.saturating_sub(1);
        } else {
            self.visible = (self.visible + 1).min(full_len);
        }

        let text = self.current_text();
        let mut delay_ms = if self.deleting {
            self.delete_delay_ms
        } else {
            self.type_delay_ms
        };

        if !self.deleting && self.visible == full_len {
            delay_ms = self.pause_ms;
            self.deleting = true;
        } else if self.deleting && self.visible == 0 {
            self.deleting = false;
            self.index = (self.index + 1) % self.phrases.len();
            delay_ms = self.next_phrase_delay_ms;
        }

        TypingFrame { text, delay_ms }
    }
}

#[cfg(target_arch = "wasm32")]
pub use controller::TypingText;

#[cfg(target_arch = "wasm32")]
mod controller {
    use std::{cell::RefCell, rc::Rc};

    use gloo_timers::callback::Timeout;
    use web_sys::{Document, Element};

    use super::{TypingState, TYPING_SELECTOR};
    use crate::{config::TypingConfig, dom, error::SiteError};

    type PendingTick = Rc<RefCell<Option<Timeout>>>;

    /// Drives `.typing-text` until stopped or dropped.
    pub struct TypingText {
        pending: PendingTick,
    }

    impl TypingText {
        pub fn start(document: &Document, config: &TypingConfig) -> Result<Self, SiteError> {
            let element = dom::query(document, TYPING_SELECTOR)?;
            let state = Rc::new(RefCell::new(TypingState::new(config)?));
            let pending: PendingTick = Rc::new(RefCell::new(None));

            tick(element, state, Rc::clone(&pending));
            Ok(Self { pending })
        }

        pub fn stop(&self) {
            if let Some(timeout) = self.pending.borrow_mut().take() {
                timeout.cancel();
            }
        }
    }

    impl Drop for TypingText {
        fn drop(&mut self) {
            self.stop();
        }
    }

    fn tick(element: Element, state: Rc<RefCell<TypingState>>, pending: PendingTick) {
        let frame = state.borrow_mut().tick();
        element.set_text_content(Some(&frame.text));

        let next = Rc::clone(&pending);
        let timeout = Timeout::new(frame.delay_ms, move || tick(element, state, next));
        *pending.borrow_mut() = Some(timeout);
    }
}
