//! Shadow generation settings
//!
//! Loaded from / saved to JSON alongside scene files.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BLUR, SILHOUETTE_SHELL_DEPTH};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Whether soft shadow edges are generated at all
    pub fn penumbra_enabled(&self) -> bool {
        match self {
            QualityPreset::Low => false,
            QualityPreset::Medium => true,
            QualityPreset::High => true,
        }
    }

    /// Penumbra width as a fraction of the far shadow distance
    pub fn blur_factor(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.0,
            QualityPreset::Medium => DEFAULT_BLUR,
            QualityPreset::High => DEFAULT_BLUR * 1.6,
        }
    }
}

/// Tunables for the occlusion geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowSettings {
    pub quality: QualityPreset,

    // === Penumbra ===
    /// Generate blur triangles along the shadow's side edges
    pub penumbra: bool,
    /// Penumbra width as a fraction of each ray's far distance
    pub blur: f32,

    // === Vertex streams ===
    /// Write the `(theta_a, theta_b)` ray pair for every vertex
    pub angular_range: bool,
    /// Radial depth of the shadow shell behind circular occluders
    pub shell_depth: f32,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            penumbra: true,
            blur: DEFAULT_BLUR,
            angular_range: true,
            shell_depth: SILHOUETTE_SHELL_DEPTH,
        }
    }
}

impl ShadowSettings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;
        self.penumbra = preset.penumbra_enabled();
        self.blur = preset.blur_factor();
    }

    /// Blur factor to generate with, `None` when no penumbra is wanted
    pub fn effective_blur(&self) -> Option<f32> {
        if self.penumbra && self.blur > 0.0 {
            Some(self.blur)
        } else {
            None
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        log::debug!("Loaded shadow settings ({})", settings.quality.as_str());
        Ok(settings)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_preset_disables_penumbra() {
        let s = ShadowSettings::from_preset(QualityPreset::Low);
        assert!(!s.penumbra);
        assert_eq!(s.effective_blur(), None);

        let s = ShadowSettings::from_preset(QualityPreset::High);
        assert_eq!(s.effective_blur(), Some(DEFAULT_BLUR * 1.6));
    }

    #[test]
    fn test_zero_blur_means_no_penumbra() {
        let s = ShadowSettings {
            blur: 0.0,
            ..Default::default()
        };
        assert_eq!(s.effective_blur(), None);
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!(QualityPreset::from_str("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("high"), Some(QualityPreset::High));
        assert_eq!(QualityPreset::from_str("ultra"), None);
    }

    #[test]
    fn test_json_partial_uses_defaults() {
        let s = ShadowSettings::from_json(r#"{"penumbra": false}"#).unwrap();
        assert!(!s.penumbra);
        assert_eq!(s.quality, QualityPreset::Medium);
        assert_eq!(s.shell_depth, SILHOUETTE_SHELL_DEPTH);
    }

    #[test]
    fn test_json_roundtrip() {
        let s = ShadowSettings::from_preset(QualityPreset::High);
        let back = ShadowSettings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(ShadowSettings::from_json("{\"blur\": \"wide\"}").is_err());
    }
}
