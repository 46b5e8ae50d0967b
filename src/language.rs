pub const LOCALIZED_SELECTOR: &str = "[data-vi], [data-en]";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Language {
    Vi,
    En,
}

impl Language {
    pub const ALL: [Self; 2] = [Self::Vi, Self::En];

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "vi" => Some(Self::Vi),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Vi => "vi",
            Self::En => "en",
        }
    }

    pub fn attribute(self) -> &'static str {
        match self {
            Self::Vi => "data-vi",
            Self::En => "data-en",
        }
    }

    pub fn control_id(self) -> &'static str {
        match self {
            Self::Vi => "lang-vi",
            Self::En => "lang-en",
        }
    }
}

/// Text an element should show after switching: its variant for the
/// language when it has a non-empty one, otherwise what it already shows.
pub fn localized_text<'a>(current: &'a str, variant: Option<&'a str>) -> &'a str {
    variant.filter(|text| !text.is_empty()).unwrap_or(current)
}

#[cfg(target_arch = "wasm32")]
pub use controller::{apply_language, LanguageSwitch};

#[cfg(target_arch = "wasm32")]
mod controller {
    use web_sys::{Document, MouseEvent};

    use super::{localized_text, Language, LOCALIZED_SELECTOR};
    use crate::{
        dom::{self, Listener},
        error::SiteError,
        nav::ACTIVE_CLASS,
    };

    /// Rewrites every localized element and marks the matching control.
    /// Returns how many elements changed text.
    pub fn apply_language(document: &Document, language: Language) -> Result<usize, SiteError> {
        let mut changed = 0;

        for element in dom::query_all(document, LOCALIZED_SELECTOR)? {
            let current = element.text_content().unwrap_or_default();
            let variant = element.get_attribute(language.attribute());
            let next = localized_text(&current, variant.as_deref());

            if next != current {
                element.set_text_content(Some(next));
                changed += 1;
            }
        }

        for candidate in Language::ALL {
            if let Some(control) = document.get_element_by_id(candidate.control_id()) {
                dom::set_class(&control, ACTIVE_CLASS, candidate == language);
            }
        }

        log::info!("language switched to {}", language.code());
        Ok(changed)
    }

    pub struct LanguageSwitch {
        _controls: Vec<Listener>,
    }

    impl LanguageSwitch {
        pub fn start(document: &Document) -> Result<Self, SiteError> {
            let controls = Language::ALL
                .into_iter()
                .map(|language| {
                    let id = language.control_id();
                    let control = document
                        .get_element_by_id(id)
                        .ok_or_else(|| SiteError::MissingElement(format!("#{id}")))?;
                    let document = document.clone();

                    Listener::new(&control, "click", move |_: MouseEvent| {
                        if let Err(error) = apply_language(&document, language) {
                            log::warn!("language switch failed: {error}");
                        }
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Self {
                _controls: controls,
            })
        }
    }
}
