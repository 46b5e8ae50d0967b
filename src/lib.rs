//! Interactivity for a static CV page.
//!
//! Each effect module keeps its state machine and arithmetic in plain Rust
//! so it can be unit-tested on the host, and puts the DOM wiring in a
//! `controller` submodule that only builds for `wasm32`.

pub mod config;
pub mod contact;
pub mod error;
pub mod extras;
pub mod language;
pub mod nav;
pub mod navbar;
pub mod particles;
pub mod reveal;
pub mod theme;
pub mod tilt;
pub mod typing;

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use config::SiteConfig;
pub use error::SiteError;
