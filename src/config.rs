use crate::{
    content::{model::DEFAULT_TEXT_SIZE, raster::DEFAULT_SPRITE_SIZE},
    emission::cell::CellParams,
    foundation::error::{ConfettiError, ConfettiResult},
    timeline::state::FADE_SECS,
};

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 0x5EED;

/// Overlay-wide tunables. Every default reproduces the stock burst.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Per-cell emission inputs.
    pub cell: CellParams,
    /// Edge length of shape sprites in pixels.
    pub sprite_size: f64,
    /// Fade-out length after the ramp, in seconds.
    pub fade_secs: f64,
    /// Glyph size used by [`crate::ConfettiOverlay::text`].
    pub text_size: f64,
    /// Font family requested for text sprites.
    pub font_family: String,
    /// Base seed for particle randomness.
    pub seed: u64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            cell: CellParams::default(),
            sprite_size: DEFAULT_SPRITE_SIZE,
            fade_secs: FADE_SECS,
            text_size: DEFAULT_TEXT_SIZE,
            font_family: "sans-serif".to_owned(),
            seed: DEFAULT_SEED,
        }
    }
}

impl OverlayConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> ConfettiResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| ConfettiError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check that every numeric field is finite and positive.
    pub fn validate(&self) -> ConfettiResult<()> {
        let fields = [
            ("cell.birth_rate", self.cell.birth_rate),
            ("cell.lifetime", self.cell.lifetime),
            ("sprite_size", self.sprite_size),
            ("fade_secs", self.fade_secs),
            ("text_size", self.text_size),
        ];
        for (name, v) in fields {
            if !v.is_finite() || v <= 0.0 {
                return Err(ConfettiError::validation(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
        }
        if self.font_family.trim().is_empty() {
            return Err(ConfettiError::validation("font_family must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
