use egui::Color32;

/// Parse the CSS color strings elements carry.
///
/// Supports `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`/`rgba()`, `hwb()`
/// and a handful of names.
pub fn parse_css_color(input: &str) -> Option<Color32> {
    let input = input.trim().to_ascii_lowercase();

    if let Some(hex) = input.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(args) = function_args(&input, "rgba").or_else(|| function_args(&input, "rgb")) {
        return parse_rgb(args);
    }
    if let Some(args) = function_args(&input, "hwb") {
        return parse_hwb(args);
    }

    match input.as_str() {
        "black" => Some(Color32::BLACK),
        "white" => Some(Color32::WHITE),
        "red" => Some(Color32::from_rgb(255, 0, 0)),
        "green" => Some(Color32::from_rgb(0, 128, 0)),
        "blue" => Some(Color32::from_rgb(0, 0, 255)),
        "transparent" => Some(Color32::TRANSPARENT),
        _ => None,
    }
}

/// Format a color as `#rrggbb`, dropping alpha
pub fn to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

fn function_args<'a>(input: &'a str, name: &str) -> Option<&'a str> {
    input.strip_prefix(name)?.trim_start().strip_prefix('(')?.strip_suffix(')')
}

fn parse_hex(hex: &str) -> Option<Color32> {
    let digit = |i: usize| u8::from_str_radix(hex.get(i..=i)?, 16).ok();
    let pair = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();

    match hex.len() {
        3 | 4 => {
            let alpha = if hex.len() == 4 { digit(3)? * 17 } else { 255 };
            Some(Color32::from_rgba_unmultiplied(digit(0)? * 17, digit(1)? * 17, digit(2)? * 17, alpha))
        }
        6 | 8 => {
            let alpha = if hex.len() == 8 { pair(6)? } else { 255 };
            Some(Color32::from_rgba_unmultiplied(pair(0)?, pair(2)?, pair(4)?, alpha))
        }
        _ => None,
    }
}

/// Split `a b c / d` or `a, b, c, d` into components plus optional alpha
fn components(args: &str) -> Option<(Vec<&str>, Option<&str>)> {
    let (main, alpha) = match args.split_once('/') {
        Some((main, alpha)) => (main, Some(alpha.trim())),
        None => (args, None),
    };
    let mut parts: Vec<&str> = main
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();

    match (parts.len(), alpha) {
        (3, _) => Some((parts, alpha)),
        (4, None) => {
            let alpha = parts.pop();
            Some((parts, alpha))
        }
        _ => None,
    }
}

/// A number or percentage scaled so that 100% maps to `scale`
fn parse_number(part: &str, scale: f32) -> Option<f32> {
    match part.strip_suffix('%') {
        Some(percent) => percent.parse::<f32>().ok().map(|p| p / 100.0 * scale),
        None => part.parse::<f32>().ok(),
    }
}

fn parse_alpha(alpha: Option<&str>) -> Option<u8> {
    match alpha {
        Some(alpha) => Some(channel(parse_number(alpha, 1.0)? * 255.0)),
        None => Some(255),
    }
}

fn channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn parse_rgb(args: &str) -> Option<Color32> {
    let (parts, alpha) = components(args)?;
    let r = parse_number(parts[0], 255.0)?;
    let g = parse_number(parts[1], 255.0)?;
    let b = parse_number(parts[2], 255.0)?;
    Some(Color32::from_rgba_unmultiplied(channel(r), channel(g), channel(b), parse_alpha(alpha)?))
}

fn parse_hwb(args: &str) -> Option<Color32> {
    let (parts, alpha) = components(args)?;
    let hue = parts[0].trim_end_matches("deg").parse::<f32>().ok()?;
    let mut white = parse_number(parts[1], 1.0)?;
    let mut black = parse_number(parts[2], 1.0)?;

    let sum = white + black;
    if sum >= 1.0 {
        white /= sum;
        black /= sum;
    }

    let [r, g, b] = hue_to_rgb(hue).map(|c| (c * (1.0 - white - black) + white) * 255.0);
    Some(Color32::from_rgba_unmultiplied(channel(r), channel(g), channel(b), parse_alpha(alpha)?))
}

/// Fully saturated color for a hue in degrees, components in `0..=1`
fn hue_to_rgb(hue: f32) -> [f32; 3] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    match h as u32 {
        0 => [1.0, x, 0.0],
        1 => [x, 1.0, 0.0],
        2 => [0.0, 1.0, x],
        3 => [0.0, x, 1.0],
        4 => [x, 0.0, 1.0],
        _ => [1.0, 0.0, x],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_forms() {
        assert_eq!(parse_css_color("#000"), Some(Color32::BLACK));
        assert_eq!(parse_css_color("#00f"), Some(Color32::from_rgb(0, 0, 255)));
        assert_eq!(parse_css_color("#FF8000"), Some(Color32::from_rgb(255, 128, 0)));
        assert_eq!(parse_css_color("#12345"), None);
    }

    #[test]
    fn test_default_color_is_black() {
        assert_eq!(parse_css_color("hwb(0 0% 100%)"), Some(Color32::BLACK));
        assert_eq!(parse_css_color("hwb(0 100% 0%)"), Some(Color32::WHITE));
        assert_eq!(parse_css_color("hwb(120 0% 0%)"), Some(Color32::from_rgb(0, 255, 0)));
    }

    #[test]
    fn test_rgb_functions() {
        assert_eq!(parse_css_color("rgb(10, 20, 30)"), Some(Color32::from_rgb(10, 20, 30)));
        assert_eq!(parse_css_color("rgb(100% 0% 0%)"), Some(Color32::from_rgb(255, 0, 0)));
        assert_eq!(
            parse_css_color("rgba(0, 0, 0, 0)"),
            Some(Color32::from_rgba_unmultiplied(0, 0, 0, 0))
        );
        assert_eq!(parse_css_color("rgb(1, 2)"), None);
    }

    #[test]
    fn test_hex_output_round_trips() {
        let color = Color32::from_rgb(18, 52, 86);
        assert_eq!(to_hex(color), "#123456");
        assert_eq!(parse_css_color(&to_hex(color)), Some(color));
    }
}
