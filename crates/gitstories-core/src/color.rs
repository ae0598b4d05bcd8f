use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn grey(contrast: u8) -> Self {
        Self::rgb(contrast, contrast, contrast)
    }

    /// Maps a lint error score onto a green → yellow → red ramp.
    ///
    /// The score is clamped to `0..=100`; `0` is pure green, `50` yellow and `100` pure red.
    pub fn from_error_score(errors: i32) -> Self {
        let score = errors.clamp(0, 100) as u32;
        let r = if score < 50 { 255 * score / 50 } else { 255 };
        let g = if score > 50 {
            255 * (100 - score) / 50
        } else {
            255
        };
        Self::rgb(r as u8, g as u8, 0)
    }

    /// Moves every channel (alpha excluded) at most `step` units towards `target`.
    pub fn step_towards(self, target: Color, step: u8) -> Self {
        Self {
            r: step_component(self.r, target.r, step),
            g: step_component(self.g, target.g, step),
            b: step_component(self.b, target.b, step),
            a: self.a,
        }
    }

    /// `#rrggbb` form used by the SVG writer; alpha is emitted separately.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn opacity(self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::grey(128)
    }
}

fn step_component(current: u8, target: u8, step: u8) -> u8 {
    if current < target {
        current.saturating_add(step).min(target)
    } else {
        current.saturating_sub(step).max(target)
    }
}
