//! Scales shipped with the toolkit.

use super::scale::composite;
use super::{Appearance, ColorScale, SCALE_STEPS};
use ratatui::style::Color;
use std::collections::BTreeMap;

type Steps = [u32; SCALE_STEPS];

const GRAY_LIGHT: Steps = [
    0xffffff, 0xfcfcfc, 0xf9f9f9, 0xf0f0f0, 0xe8e8e8, 0xe0e0e0, 0xd9d9d9, 0xcecece, 0xbbbbbb,
    0x8d8d8d, 0x838383, 0x646464, 0x202020,
];
const GRAY_LIGHT_A: Steps = [
    0x00000000, 0x00000003, 0x00000006, 0x0000000f, 0x00000017, 0x0000001f, 0x00000026,
    0x00000031, 0x00000044, 0x00000072, 0x0000007c, 0x0000009b, 0x000000df,
];
const GRAY_DARK: Steps = [
    0x000000, 0x111111, 0x191919, 0x222222, 0x2a2a2a, 0x313131, 0x3a3a3a, 0x484848, 0x606060,
    0x6e6e6e, 0x7b7b7b, 0xb4b4b4, 0xeeeeee,
];
const GRAY_DARK_A: Steps = [
    0xffffff00, 0xffffff09, 0xffffff12, 0xffffff1b, 0xffffff22, 0xffffff2c, 0xffffff3b,
    0xffffff55, 0xffffff64, 0xffffff72, 0xffffffaf, 0xffffffed, 0xfffffff8,
];

const PRIMARY_LIGHT: Steps = [
    0xffffff, 0xfbfdff, 0xf4faff, 0xe6f4fe, 0xd5efff, 0xc2e5ff, 0xacd8fc, 0x8ec8f6, 0x5eb1ef,
    0x0090ff, 0x0588f0, 0x0d74ce, 0x113264,
];
const PRIMARY_LIGHT_A: Steps = [
    0x0080ff00, 0x0080ff04, 0x008cff0b, 0x008ff519, 0x009eff2a, 0x0093ff3d, 0x0088f653,
    0x0083eb71, 0x0084e6a1, 0x0090ffff, 0x0086f0fa, 0x006dcbf2, 0x002359ee,
];
const PRIMARY_DARK: Steps = [
    0x000000, 0x0d1520, 0x111927, 0x0d2847, 0x003362, 0x004074, 0x104d87, 0x205d9e, 0x2870bd,
    0x0090ff, 0x3b9eff, 0x70b8ff, 0xc2e6ff,
];
const PRIMARY_DARK_A: Steps = [
    0x004df200, 0x004df211, 0x1166fb18, 0x0077ff3a, 0x0075ff57, 0x0081fd6b, 0x0f89fd7f,
    0x2a91fe98, 0x3094feb9, 0x0090ffff, 0x3b9effff, 0x70b8ffff, 0xc2e6ffff,
];

fn solid(steps: &Steps) -> [Color; SCALE_STEPS] {
    steps.map(Color::from_u32)
}

fn alpha(steps: &Steps, appearance: Appearance) -> [Color; SCALE_STEPS] {
    steps.map(|rgba| composite(rgba, appearance))
}

/// The neutral scale.
pub fn gray() -> ColorScale {
    ColorScale {
        light: solid(&GRAY_LIGHT),
        light_a: alpha(&GRAY_LIGHT_A, Appearance::Light),
        dark: solid(&GRAY_DARK),
        dark_a: alpha(&GRAY_DARK_A, Appearance::Dark),
    }
}

/// The accent scale.
pub fn primary() -> ColorScale {
    ColorScale {
        light: solid(&PRIMARY_LIGHT),
        light_a: alpha(&PRIMARY_LIGHT_A, Appearance::Light),
        dark: solid(&PRIMARY_DARK),
        dark_a: alpha(&PRIMARY_DARK_A, Appearance::Dark),
    }
}

/// All built-in scales by name.
pub fn builtin() -> BTreeMap<String, ColorScale> {
    BTreeMap::from([
        ("gray".to_string(), gray()),
        ("primary".to_string(), primary()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_steps_are_opaque_rgb() {
        assert_eq!(primary().light[9], Color::Rgb(0x00, 0x90, 0xff));
        assert_eq!(gray().dark[12], Color::Rgb(0xee, 0xee, 0xee));
    }

    #[test]
    fn transparent_first_step_is_backdrop() {
        assert_eq!(gray().light_a[0], Color::Rgb(255, 255, 255));
        assert_eq!(gray().dark_a[0], Color::Rgb(0, 0, 0));
    }

    #[test]
    fn builtin_names() {
        let names: Vec<_> = builtin().into_keys().collect();
        assert_eq!(names, ["gray", "primary"]);
    }
}
