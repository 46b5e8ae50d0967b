use crate::config::TiltConfig;

pub const TILT_SELECTOR: &str = "[data-tilt]";

/// Pointer position and element box, both in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltInput {
    pub pointer_x: f64,
    pub pointer_y: f64,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Rotation angles in degrees.
pub fn tilt_angles(input: TiltInput, config: &TiltConfig) -> (f64, f64) {
    let x = input.pointer_x - input.left;
    let y = input.pointer_y - input.top;
    let center_x = input.width / 2.0;
    let center_y = input.height / 2.0;

    let rotate_x = (y - center_y) / config.damping;
    let rotate_y = (center_x - x) / config.damping;
    (rotate_x, rotate_y)
}

pub fn tilt_transform(input: TiltInput, config: &TiltConfig) -> String {
    let (rotate_x, rotate_y) = tilt_angles(input, config);
    let scale = config.scale;
    format!(
        "perspective({}px) rotateX({rotate_x}deg) rotateY({rotate_y}deg) \
         scale3d({scale}, {scale}, {scale})",
        config.perspective_px
    )
}

pub fn resting_transform(config: &TiltConfig) -> String {
    format!(
        "perspective({}px) rotateX(0deg) rotateY(0deg) scale3d(1, 1, 1)",
        config.perspective_px
    )
}

#[cfg(target_arch = "wasm32")]
pub use controller::TiltEffect;

#[cfg(target_arch = "wasm32")]
mod controller {
    use web_sys::{Document, HtmlElement, MouseEvent};

    use super::{resting_transform, tilt_transform, TiltInput, TILT_SELECTOR};
    use crate::{
        config::TiltConfig,
        dom::{self, Listener},
        error::SiteError,
    };

    pub struct TiltEffect {
        _listeners: Vec<Listener>,
    }

    impl TiltEffect {
        pub fn start(document: &Document, config: &TiltConfig) -> Result<Self, SiteError> {
            let mut listeners = Vec::new();

            for card in dom::query_all_html(document, TILT_SELECTOR)? {
                listeners.push(on_move(&card, config)?);
                listeners.push(on_leave(&card, config)?);
            }

            Ok(Self {
                _listeners: listeners,
            })
        }
    }

    fn on_move(card: &HtmlElement, config: &TiltConfig) -> Result<Listener, SiteError> {
        let element = card.clone();
        let config = config.clone();

        Listener::new(card, "mousemove", move |event: MouseEvent| {
            let rect = element.get_bounding_client_rect();
            let input = TiltInput {
                pointer_x: f64::from(event.client_x()),
                pointer_y: f64::from(event.client_y()),
                left: rect.left(),
                top: rect.top(),
                width: rect.width(),
                height: rect.height(),
            };
            dom::set_style(&element, "transform", &tilt_transform(input, &config));
        })
    }

    fn on_leave(card: &HtmlElement, config: &TiltConfig) -> Result<Listener, SiteError> {
        let element = card.clone();
        let resting = resting_transform(config);

        Listener::new(card, "mouseleave", move |_: MouseEvent| {
            dom::set_style(&element, "transform", &resting);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(pointer_x: f64, pointer_y: f64) -> TiltInput {
        TiltInput {
            pointer_x,
            pointer_y,
            left: 100.0,
            top: 50.0,
            width: 200.0,
            height: 100.0,
        }
    }

    #[test]
    fn center_of_card_has_no_rotation() {
        let (rotate_x, rotate_y) = tilt_angles(input(200.0, 100.0), &TiltConfig::default());

        assert_eq!(rotate_x, 0.0);
        assert_eq!(rotate_y, 0.0);
    }

    #[test]
    fn corners_rotate_proportionally_to_offset() {
        let config = TiltConfig::default();

        assert_eq!(tilt_angles(input(100.0, 50.0), &config), (-5.0, 10.0));
        assert_eq!(tilt_angles(input(300.0, 150.0), &config), (5.0, -10.0));
    }

    #[test]
    fn transform_includes_perspective_and_scale() {
        let transform = tilt_transform(input(300.0, 150.0), &TiltConfig::default());

        assert_eq!(
            transform,
            "perspective(1000px) rotateX(5deg) rotateY(-10deg) scale3d(1.05, 1.05, 1.05)"
        );
    }

    #[test]
    fn resting_transform_is_identity() {
        assert_eq!(
            resting_transform(&TiltConfig::default()),
            "perspective(1000px) rotateX(0deg) rotateY(0deg) scale3d(1, 1, 1)"
        );
    }
}
