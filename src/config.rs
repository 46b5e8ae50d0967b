use serde::Deserialize;

use crate::error::SiteError;

pub const CONFIG_ELEMENT_ID: &str = "site-config";

const DEFAULT_PHRASES: [&str; 6] = [
    "AI Developer",
    "Machine Learning Engineer",
    "Computer Vision Specialist",
    "Yoga Instructor",
    "Content Creator",
    "Research Enthusiast",
];

const TYPE_DELAY_MS_BOUNDS: (u32, u32) = (1, 10_000);
const PAUSE_MS_BOUNDS: (u32, u32) = (0, 60_000);
const THRESHOLD_BOUNDS: (f64, f64) = (0.0, 1.0);
const REVEAL_DELAY_MS_BOUNDS: (u32, u32) = (0, 10_000);
const DURATION_MS_BOUNDS: (u32, u32) = (16, 60_000);
const FRAME_MS_BOUNDS: (u32, u32) = (1, 1_000);
const OFFSET_PX_BOUNDS: (f64, f64) = (0.0, 10_000.0);
const DAMPING_BOUNDS: (f64, f64) = (1.0, 1_000.0);
const PERSPECTIVE_PX_BOUNDS: (f64, f64) = (1.0, 10_000.0);
const SCALE_BOUNDS: (f64, f64) = (0.5, 2.0);
const CONTACT_DELAY_MS_BOUNDS: (u32, u32) = (0, 60_000);
const PARTICLE_SECONDS_BOUNDS: (f64, f64) = (0.0, 120.0);
const PRELOADER_MS_BOUNDS: (u32, u32) = (0, 30_000);

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_level(self) -> log::Level {
        match self {
            Self::Debug => log::Level::Debug,
            Self::Info => log::Level::Info,
            Self::Warn => log::Level::Warn,
            Self::Error => log::Level::Error,
        }
    }
}

/// Every tunable the page effects read, with the page's stock values as
/// defaults. Loaded from an optional JSON script element so the markup can
/// override timings without a rebuild.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub log_level: LogLevel,
    pub typing: TypingConfig,
    pub reveal: RevealConfig,
    pub navigation: NavigationConfig,
    pub tilt: TiltConfig,
    pub contact: ContactConfig,
    pub particles: ParticleConfig,
    pub preloader: PreloaderConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TypingConfig {
    pub phrases: Vec<String>,
    pub type_delay_ms: u32,
    pub delete_delay_ms: u32,
    pub pause_ms: u32,
    pub next_phrase_delay_ms: u32,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            phrases: DEFAULT_PHRASES.iter().map(ToString::to_string).collect(),
            type_delay_ms: 100,
            delete_delay_ms: 50,
            pause_ms: 2_000,
            next_phrase_delay_ms: 500,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RevealConfig {
    pub threshold: f64,
    pub bar_threshold: Option<f64>,
    pub counter_threshold: Option<f64>,
    pub circle_threshold: Option<f64>,
    pub root_margin: String,
    pub bar_delay_ms: u32,
    pub circle_delay_ms: u32,
    pub duration_ms: u32,
    pub frame_ms: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            bar_threshold: None,
            counter_threshold: None,
            circle_threshold: None,
            root_margin: "0px 0px -50px 0px".to_string(),
            bar_delay_ms: 200,
            circle_delay_ms: 300,
            duration_ms: 2_000,
            frame_ms: 16,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct NavigationConfig {
    pub scroll_margin: f64,
    pub spy_offset: f64,
    pub back_to_top_after: f64,
    pub scrolled_after: f64,
    pub hide_after: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            scroll_margin: 20.0,
            spy_offset: 200.0,
            back_to_top_after: 500.0,
            scrolled_after: 100.0,
            hide_after: 500.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TiltConfig {
    pub damping: f64,
    pub perspective_px: f64,
    pub scale: f64,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            damping: 10.0,
            perspective_px: 1_000.0,
            scale: 1.05,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactConfig {
    pub send_delay_ms: u32,
    pub reset_delay_ms: u32,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            send_delay_ms: 2_000,
            reset_delay_ms: 2_000,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ParticleConfig {
    pub max_delay_secs: f64,
    pub min_duration_secs: f64,
    pub duration_spread_secs: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            max_delay_secs: 5.0,
            min_duration_secs: 6.0,
            duration_spread_secs: 4.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PreloaderConfig {
    pub enabled: bool,
    pub visible_ms: u32,
    pub fade_ms: u32,
}

impl Default for PreloaderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            visible_ms: 1_000,
            fade_ms: 500,
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, SiteError> {
        let parsed: Self = serde_json::from_str(raw)?;
        Ok(parsed.sanitized())
    }

    /// Replaces any out-of-range value with its default.
    pub fn sanitized(self) -> Self {
        let typing_default = TypingConfig::default();
        let reveal_default = RevealConfig::default();
        let nav_default = NavigationConfig::default();
        let tilt_default = TiltConfig::default();
        let contact_default = ContactConfig::default();
        let particle_default = ParticleConfig::default();
        let preloader_default = PreloaderConfig::default();

        let phrases: Vec<String> = self
            .typing
            .phrases
            .into_iter()
            .filter(|phrase| !phrase.is_empty())
            .collect();

        Self {
            log_level: self.log_level,
            typing: TypingConfig {
                phrases: if phrases.is_empty() {
                    typing_default.phrases
                } else {
                    phrases
                },
                type_delay_ms: within_bounds(
                    self.typing.type_delay_ms,
                    typing_default.type_delay_ms,
                    TYPE_DELAY_MS_BOUNDS,
                ),
                delete_delay_ms: within_bounds(
                    self.typing.delete_delay_ms,
                    typing_default.delete_delay_ms,
                    TYPE_DELAY_MS_BOUNDS,
                ),
                pause_ms: within_bounds(
                    self.typing.pause_ms,
                    typing_default.pause_ms,
                    PAUSE_MS_BOUNDS,
                ),
                next_phrase_delay_ms: within_bounds(
                    self.typing.next_phrase_delay_ms,
                    typing_default.next_phrase_delay_ms,
                    PAUSE_MS_BOUNDS,
                ),
            },
            reveal: RevealConfig {
                threshold: within_bounds(
                    self.reveal.threshold,
                    reveal_default.threshold,
                    THRESHOLD_BOUNDS,
                ),
                bar_threshold: optional_within_bounds(
                    self.reveal.bar_threshold,
                    THRESHOLD_BOUNDS,
                ),
                counter_threshold: optional_within_bounds(
                    self.reveal.counter_threshold,
                    THRESHOLD_BOUNDS,
                ),
                circle_threshold: optional_within_bounds(
                    self.reveal.circle_threshold,
                    THRESHOLD_BOUNDS,
                ),
                root_margin: if self.reveal.root_margin.trim().is_empty() {
                    reveal_default.root_margin
                } else {
                    self.reveal.root_margin
                },
                bar_delay_ms: within_bounds(
                    self.reveal.bar_delay_ms,
                    reveal_default.bar_delay_ms,
                    REVEAL_DELAY_MS_BOUNDS,
                ),
                circle_delay_ms: within_bounds(
                    self.reveal.circle_delay_ms,
                    reveal_default.circle_delay_ms,
                    REVEAL_DELAY_MS_BOUNDS,
                ),
                duration_ms: within_bounds(
                    self.reveal.duration_ms,
                    reveal_default.duration_ms,
                    DURATION_MS_BOUNDS,
                ),
                frame_ms: within_bounds(
                    self.reveal.frame_ms,
                    reveal_default.frame_ms,
                    FRAME_MS_BOUNDS,
                ),
            },
            navigation: NavigationConfig {
                scroll_margin: within_bounds(
                    self.navigation.scroll_margin,
                    nav_default.scroll_margin,
                    OFFSET_PX_BOUNDS,
                ),
                spy_offset: within_bounds(
                    self.navigation.spy_offset,
                    nav_default.spy_offset,
                    OFFSET_PX_BOUNDS,
                ),
                back_to_top_after: within_bounds(
                    self.navigation.back_to_top_after,
                    nav_default.back_to_top_after,
                    OFFSET_PX_BOUNDS,
                ),
                scrolled_after: within_bounds(
                    self.navigation.scrolled_after,
                    nav_default.scrolled_after,
                    OFFSET_PX_BOUNDS,
                ),
                hide_after: within_bounds(
                    self.navigation.hide_after,
                    nav_default.hide_after,
                    OFFSET_PX_BOUNDS,
                ),
            },
            tilt: TiltConfig {
                damping: within_bounds(self.tilt.damping, tilt_default.damping, DAMPING_BOUNDS),
                perspective_px: within_bounds(
                    self.tilt.perspective_px,
                    tilt_default.perspective_px,
                    PERSPECTIVE_PX_BOUNDS,
                ),
                scale: within_bounds(self.tilt.scale, tilt_default.scale, SCALE_BOUNDS),
            },
            contact: ContactConfig {
                send_delay_ms: within_bounds(
                    self.contact.send_delay_ms,
                    contact_default.send_delay_ms,
                    CONTACT_DELAY_MS_BOUNDS,
                ),
                reset_delay_ms: within_bounds(
                    self.contact.reset_delay_ms,
                    contact_default.reset_delay_ms,
                    CONTACT_DELAY_MS_BOUNDS,
                ),
            },
            particles: ParticleConfig {
                max_delay_secs: within_bounds(
                    self.particles.max_delay_secs,
                    particle_default.max_delay_secs,
                    PARTICLE_SECONDS_BOUNDS,
                ),
                min_duration_secs: within_bounds(
                    self.particles.min_duration_secs,
                    particle_default.min_duration_secs,
                    PARTICLE_SECONDS_BOUNDS,
                ),
                duration_spread_secs: within_bounds(
                    self.particles.duration_spread_secs,
                    particle_default.duration_spread_secs,
                    PARTICLE_SECONDS_BOUNDS,
                ),
            },
            preloader: PreloaderConfig {
                enabled: self.preloader.enabled,
                visible_ms: within_bounds(
                    self.preloader.visible_ms,
                    preloader_default.visible_ms,
                    PRELOADER_MS_BOUNDS,
                ),
                fade_ms: within_bounds(
                    self.preloader.fade_ms,
                    preloader_default.fade_ms,
                    PRELOADER_MS_BOUNDS,
                ),
            },
        }
    }
}

fn within_bounds<T: PartialOrd>(value: T, default: T, bounds: (T, T)) -> T {
    if value >= bounds.0 && value <= bounds.1 {
        value
    } else {
        default
    }
}

fn optional_within_bounds<T: PartialOrd>(value: Option<T>, bounds: (T, T)) -> Option<T> {
    value.filter(|value| *value >= bounds.0 && *value <= bounds.1)
}

#[cfg(target_arch = "wasm32")]
impl SiteConfig {
    /// Reads `#site-config` when the page provides one. A malformed blob is
    /// logged and replaced by defaults.
    pub fn load(document: &web_sys::Document) -> Self {
        let Some(raw) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|element| element.text_content())
        else {
            return Self::default();
        };

        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(error) => {
                log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {error}");
                Self::default()
            }
        }
    }
}
