use super::{camel_case, Appearance, ColorScale, TokenMap};

/// Semantic tokens for one scale: backgrounds from the translucent steps,
/// borders and fills from the solid steps, text from the translucent steps.
pub fn generate_color_palette(name: &str, scale: &ColorScale, appearance: Appearance) -> TokenMap {
    let solid = scale.solid(appearance);
    let alpha = scale.alpha(appearance);
    [
        ("Bg", alpha[1]),
        ("BgHover", alpha[2]),
        ("Border", solid[4]),
        ("BorderSecondary", solid[3]),
        ("BorderHover", solid[5]),
        ("Hover", solid[10]),
        ("", solid[9]),
        ("Active", solid[7]),
        ("TextHover", alpha[10]),
        ("Text", alpha[9]),
        ("TextActive", alpha[7]),
    ]
    .into_iter()
    .map(|(suffix, color)| (format!("{name}{suffix}"), color))
    .collect()
}

/// Step tokens `{name}1`..`{name}11` and `{name}1A`..`{name}11A` plus the
/// semantic tokens. The outermost steps are not exported. Semantic tokens
/// win on a name collision.
pub fn generate_custom_color_palette(
    name: &str,
    scale: &ColorScale,
    appearance: Appearance,
) -> TokenMap {
    let last = scale.solid(appearance).len() - 1;
    let mut tokens = TokenMap::new();
    for (i, color) in scale.solid(appearance).iter().enumerate() {
        if i != 0 && i != last {
            tokens.insert(format!("{name}{i}"), *color);
        }
    }
    for (i, color) in scale.alpha(appearance).iter().enumerate() {
        if i != 0 && i != last {
            tokens.insert(format!("{name}{i}A"), *color);
        }
    }
    tokens.extend(generate_color_palette(name, scale, appearance));
    tokens
}

/// Tokens for every scale, names camel-cased. Later scales overwrite
/// earlier ones on collision.
pub fn generate_custom_token<'a, I>(scales: I, appearance: Appearance) -> TokenMap
where
    I: IntoIterator<Item = (&'a String, &'a ColorScale)>,
{
    let mut tokens = TokenMap::new();
    for (name, scale) in scales {
        let name = camel_case(name);
        log::debug!("generating {appearance:?} tokens for {name}");
        tokens.extend(generate_custom_color_palette(&name, scale, appearance));
    }
    tokens
}
