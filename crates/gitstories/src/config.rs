use std::path::Path;

use gitstories_balancer::BalancerOptions;
use gitstories_core::{Color, PlacementOptions};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::load::{self, Format};

/// Everything a [`Scene`](crate::Scene) needs besides the history itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    /// Color of the parent links.
    pub line_color: Color,
    /// Painted over every folder a commit touches.
    pub highlight: Color,
    /// Per-tick, per-channel step used when fading node colors.
    pub fade_step: u8,
    /// Ticks between two commits in [`Scene::play`](crate::Scene::play).
    pub frames_per_commit: usize,
    pub placement: PlacementOptions,
    pub physics: BalancerOptions,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            background: Color::WHITE,
            line_color: Color::BLACK,
            highlight: Color::rgb(66, 135, 245),
            fade_step: 2,
            frames_per_commit: 30,
            placement: PlacementOptions::default(),
            physics: BalancerOptions::default(),
        }
    }
}

impl SceneConfig {
    pub fn load(path: &Path) -> Result<Self> {
        load::load(path)
    }

    pub fn parse(text: &str, format: Format) -> Result<Self> {
        load::parse(text, format, &load::inline_origin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg = SceneConfig::parse(
            r#"{"width": 800, "physics": {"damping": 0.5}, "placement": {"random_seed": 7}}"#,
            Format::Json,
        )
        .unwrap();
        assert_eq!(cfg.width, 800);
        assert_eq!(cfg.height, 720);
        assert_eq!(cfg.physics.damping, 0.5);
        assert_eq!(cfg.physics.folder_charge, BalancerOptions::default().folder_charge);
        assert_eq!(cfg.placement.random_seed, 7);
    }

    #[test]
    fn yaml_colors() {
        let cfg = SceneConfig::parse(
            "background: {r: 0, g: 0, b: 0}\nfade_step: 5\n",
            Format::Yaml,
        )
        .unwrap();
        assert_eq!(cfg.background, Color::BLACK);
        assert_eq!(cfg.fade_step, 5);
    }
}
