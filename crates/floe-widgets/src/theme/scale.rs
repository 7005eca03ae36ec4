use super::{Appearance, ThemeError};
use ratatui::style::Color;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Number of steps in every scale.
pub const SCALE_STEPS: usize = 13;

/// Solid and translucent steps for both appearances.
///
/// Translucent steps are stored already composited over the appearance's
/// backdrop (white for light, black for dark), since terminal cells have no
/// alpha channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    pub light: [Color; SCALE_STEPS],
    pub light_a: [Color; SCALE_STEPS],
    pub dark: [Color; SCALE_STEPS],
    pub dark_a: [Color; SCALE_STEPS],
}

/// JSON shape of a scale: four arrays of hex strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScaleFile {
    light: Vec<String>,
    light_a: Vec<String>,
    dark: Vec<String>,
    dark_a: Vec<String>,
}

impl ColorScale {
    /// Solid steps for `appearance`.
    pub fn solid(&self, appearance: Appearance) -> &[Color; SCALE_STEPS] {
        match appearance {
            Appearance::Light => &self.light,
            Appearance::Dark => &self.dark,
        }
    }

    /// Translucent steps for `appearance`.
    pub fn alpha(&self, appearance: Appearance) -> &[Color; SCALE_STEPS] {
        match appearance {
            Appearance::Light => &self.light_a,
            Appearance::Dark => &self.dark_a,
        }
    }

    /// Build a scale from hex strings.
    pub fn from_hex<S: AsRef<str>>(
        light: &[S],
        light_a: &[S],
        dark: &[S],
        dark_a: &[S],
    ) -> Result<Self, ThemeError> {
        Ok(Self {
            light: steps("light", light, Appearance::Light)?,
            light_a: steps("lightA", light_a, Appearance::Light)?,
            dark: steps("dark", dark, Appearance::Dark)?,
            dark_a: steps("darkA", dark_a, Appearance::Dark)?,
        })
    }

    /// Load named scales from a JSON object:
    ///
    /// ```json
    /// { "gray": { "light": ["#fcfcfc", ...], "lightA": [...], "dark": [...], "darkA": [...] } }
    /// ```
    pub fn from_json(json: &str) -> Result<BTreeMap<String, ColorScale>, ThemeError> {
        let files: BTreeMap<String, ScaleFile> = serde_json::from_str(json)?;
        files
            .into_iter()
            .map(|(name, f)| {
                let scale = Self::from_hex(&f.light, &f.light_a, &f.dark, &f.dark_a)?;
                Ok((name, scale))
            })
            .collect()
    }
}

fn steps<S: AsRef<str>>(
    field: &'static str,
    hex: &[S],
    appearance: Appearance,
) -> Result<[Color; SCALE_STEPS], ThemeError> {
    if hex.len() != SCALE_STEPS {
        return Err(ThemeError::ScaleLength {
            field,
            len: hex.len(),
        });
    }
    let mut out = [Color::Reset; SCALE_STEPS];
    for (slot, h) in out.iter_mut().zip(hex) {
        *slot = parse_hex(h.as_ref(), appearance)?;
    }
    Ok(out)
}

/// Parse `#RRGGBB` or `#RRGGBBAA`. An alpha channel is composited over white
/// for [`Appearance::Light`] and black for [`Appearance::Dark`].
pub fn parse_hex(hex: &str, appearance: Appearance) -> Result<Color, ThemeError> {
    let invalid = || ThemeError::InvalidHex(hex.to_string());
    let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) || !matches!(digits.len(), 6 | 8) {
        return Err(invalid());
    }
    let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
    let rgba = if digits.len() == 6 { value << 8 | 0xff } else { value };
    Ok(composite(rgba, appearance))
}

/// Flatten `0xRRGGBBAA` onto the appearance's backdrop.
pub(super) fn composite(rgba: u32, appearance: Appearance) -> Color {
    let alpha = rgba & 0xff;
    let backdrop = match appearance {
        Appearance::Light => 0xff,
        Appearance::Dark => 0x00,
    };
    let mix = |shift: u32| -> u8 {
        let src = (rgba >> shift) & 0xff;
        ((src * alpha + backdrop * (0xff - alpha) + 0x7f) / 0xff) as u8
    };
    Color::Rgb(mix(24), mix(16), mix(8))
}
