//! Color names and hex values for workspaces and projects.

const NAMED: &[(&str, &str)] = &[
    ("green", "#00ff00"),
    ("red", "#ff0000"),
    ("blue", "#0000ff"),
    ("yellow", "#ffff00"),
    ("cyan", "#00ffff"),
    ("magenta", "#ff00ff"),
    ("white", "#ffffff"),
    ("black", "#000000"),
    ("orange", "#ffa500"),
    ("purple", "#800080"),
    ("pink", "#ffc0cb"),
    ("gray", "#808080"),
    ("grey", "#808080"),
];

/// Normalizes user color input.
///
/// Known names map to their hex value and six hex digits (with or without a
/// leading `#`) become lowercase `#rrggbb`. Anything else is kept as typed.
pub fn normalize(input: &str) -> String {
    let trimmed = input.trim();
    let lower = trimmed.to_ascii_lowercase();

    if let Some((_, hex)) = NAMED.iter().find(|(name, _)| *name == lower) {
        return (*hex).to_string();
    }

    let digits = lower.strip_prefix('#').unwrap_or(&lower);
    if is_hex6(digits) {
        return format!("#{digits}");
    }

    trimmed.to_string()
}

/// Decodes a `#rrggbb` value into its components.
pub fn rgb(value: &str) -> Option<(u8, u8, u8)> {
    let digits = value.trim().strip_prefix('#')?;
    if !is_hex6(digits) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn is_hex6(s: &str) -> bool {
    s.len() == 6 && s.bytes().all(|b| b.is_ascii_hexdigit())
}
