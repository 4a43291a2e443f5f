/// Normalize a literal CSS color into the form stored in color resources.
///
/// `#rrggbb` and `#rgb` become `rgb(r, g, b)`, `#rrggbbaa` becomes
/// `rgba(r, g, b, a)` with alpha in `0..=1`. Functional notation and
/// `transparent` pass through. Anything else is not convertible.
pub fn normalize_color(value: &str) -> Option<String> {
    let value = value.trim();
    let lower = value.to_ascii_lowercase();

    if lower == "transparent" {
        return Some(lower);
    }
    if (lower.starts_with("rgb(") || lower.starts_with("rgba(")) && lower.ends_with(')') {
        return Some(value.to_string());
    }

    let hex = value.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    match hex.len() {
        3 => {
            let digits: Vec<u8> = hex
                .chars()
                .filter_map(|c| c.to_digit(16))
                .map(|d| (d * 17) as u8)
                .collect();
            Some(format!("rgb({}, {}, {})", digits[0], digits[1], digits[2]))
        }
        6 => {
            let [r, g, b] = channels::<3>(hex)?;
            Some(format!("rgb({}, {}, {})", r, g, b))
        }
        8 => {
            let [r, g, b, a] = channels::<4>(hex)?;
            let alpha = (f64::from(a) / 255.0 * 100.0).round() / 100.0;
            Some(format!("rgba({}, {}, {}, {})", r, g, b, alpha))
        }
        _ => None,
    }
}

fn channels<const N: usize>(hex: &str) -> Option<[u8; N]> {
    let mut out = [0u8; N];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = u8::from_str_radix(hex.get(i * 2..i * 2 + 2)?, 16).ok()?;
    }
    Some(out)
}
