// Tuning values for the particle field. Every field has a default, so the
// host only needs to pass the ones it wants to change.

use serde::Deserialize;
use wasm_bindgen::JsValue;

use crate::color::Color;
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    /// Viewports narrower than this get `mobile_count` particles.
    pub mobile_breakpoint: f64,
    pub mobile_count: usize,
    pub desktop_count: usize,
    /// Initial velocity components are drawn from `-max_speed..max_speed`.
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_alpha: f64,
    pub max_alpha: f64,
    pub influence_radius: f64,
    /// Displacement at the pointer itself, in pixels per frame.
    pub repulsion_strength: f64,
    pub connection_distance: f64,
    /// Edge opacity for two particles at the same spot.
    pub connection_opacity: f64,
    pub line_width: f64,
    pub color: Color,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            mobile_breakpoint: 768.0,
            mobile_count: 40,
            desktop_count: 80,
            max_speed: 0.3,
            min_radius: 1.0,
            max_radius: 3.0,
            min_alpha: 0.3,
            max_alpha: 0.8,
            influence_radius: 120.0,
            repulsion_strength: 2.0,
            connection_distance: 140.0,
            connection_opacity: 0.15,
            line_width: 0.5,
            color: Color::from_u32(0x6366f1ff),
        }
    }
}

impl FieldConfig {
    /// Decodes a (possibly partial) JS object. `undefined` and `null` give the defaults.
    pub fn from_js(value: JsValue) -> Result<FieldConfig, ConfigError> {
        if value.is_undefined() || value.is_null() {
            return Ok(FieldConfig::default());
        }
        let config: FieldConfig = serde_wasm_bindgen::from_value(value)
            .map_err(|e| ConfigError::Decode(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("mobileBreakpoint", self.mobile_breakpoint)?;
        positive("maxSpeed", self.max_speed)?;
        positive("influenceRadius", self.influence_radius)?;
        positive("connectionDistance", self.connection_distance)?;
        positive("lineWidth", self.line_width)?;
        if self.repulsion_strength < 0.0 || !self.repulsion_strength.is_finite() {
            return Err(ConfigError::NotPositive {
                field: "repulsionStrength",
                value: self.repulsion_strength,
            });
        }
        if self.mobile_count == 0 || self.desktop_count == 0 {
            return Err(ConfigError::NoParticles);
        }
        positive("minRadius", self.min_radius)?;
        positive("maxRadius", self.max_radius)?;
        range("radius", self.min_radius, self.max_radius)?;
        opacity("minAlpha", self.min_alpha)?;
        opacity("maxAlpha", self.max_alpha)?;
        range("alpha", self.min_alpha, self.max_alpha)?;
        opacity("connectionOpacity", self.connection_opacity)?;
        Ok(())
    }

    pub fn particle_count(&self, width: f64) -> usize {
        if width < self.mobile_breakpoint {
            self.mobile_count
        } else {
            self.desktop_count
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    // NaN fails this comparison too
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

// rand's uniform sampling panics on infinite bounds
fn range(field: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    if min < max && min.is_finite() && max.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::EmptyRange { field, min, max })
    }
}

fn opacity(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::NotAnOpacity { field, value })
    }
}
