use crate::config::ParticleConfig;

pub const PARTICLE_SELECTOR: &str = ".particle";

/// Randomized placement for one decorative particle. The motion itself is
/// a CSS animation; only its start offset and length are set here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticlePlacement {
    pub left_percent: f64,
    pub top_percent: f64,
    pub delay_secs: f64,
    pub duration_secs: f64,
}

impl ParticlePlacement {
    pub fn random(rng: &mut fastrand::Rng, config: &ParticleConfig) -> Self {
        Self {
            left_percent: rng.f64() * 100.0,
            top_percent: rng.f64() * 100.0,
            delay_secs: rng.f64() * config.max_delay_secs,
            duration_secs: config.min_duration_secs + rng.f64() * config.duration_spread_secs,
        }
    }

    pub fn style_properties(&self) -> [(&'static str, String); 4] {
        [
            ("left", format!("{}%", self.left_percent)),
            ("top", format!("{}%", self.top_percent)),
            ("animation-delay", format!("{}s", self.delay_secs)),
            ("animation-duration", format!("{}s", self.duration_secs)),
        ]
    }
}

#[cfg(target_arch = "wasm32")]
pub use controller::scatter_particles;

#[cfg(target_arch = "wasm32")]
mod controller {
    use web_sys::Document;

    use super::{ParticlePlacement, PARTICLE_SELECTOR};
    use crate::{config::ParticleConfig, dom, error::SiteError};

    /// One-shot: nothing keeps running after this returns.
    pub fn scatter_particles(
        document: &Document,
        config: &ParticleConfig,
    ) -> Result<usize, SiteError> {
        let particles = dom::query_all_html(document, PARTICLE_SELECTOR)?;
        let mut rng = fastrand::Rng::new();

        for particle in &particles {
            let placement = ParticlePlacement::random(&mut rng, config);
            for (property, value) in placement.style_properties() {
                dom::set_style(particle, property, &value);
            }
        }

        Ok(particles.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placements_stay_inside_configured_ranges() {
        let config = ParticleConfig::default();
        let mut rng = fastrand::Rng::with_seed(7);

        for _ in 0..1_000 {
            let placement = ParticlePlacement::random(&mut rng, &config);

            assert!((0.0..100.0).contains(&placement.left_percent));
            assert!((0.0..100.0).contains(&placement.top_percent));
            assert!((0.0..5.0).contains(&placement.delay_secs));
            assert!((6.0..10.0).contains(&placement.duration_secs));
        }
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let config = ParticleConfig::default();
        let first = ParticlePlacement::random(&mut fastrand::Rng::with_seed(42), &config);
        let second = ParticlePlacement::random(&mut fastrand::Rng::with_seed(42), &config);

        assert_eq!(first, second);
    }

    #[test]
    fn style_properties_carry_units() {
        let placement = ParticlePlacement {
            left_percent: 12.5,
            top_percent: 80.0,
            delay_secs: 1.5,
            duration_secs: 7.25,
        };

        assert_eq!(
            placement.style_properties(),
            [
                ("left", "12.5%".to_string()),
                ("top", "80%".to_string()),
                ("animation-delay", "1.5s".to_string()),
                ("animation-duration", "7.25s".to_string()),
            ]
        );
    }
}
