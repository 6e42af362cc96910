use eframe::egui::Color32;

/// Widget palette, kept as `#rrggbb` strings.
pub struct Palette;

impl Palette {
    pub const ACCENT: &'static str = "#a159e1";
    pub const SUCCESS: &'static str = "#00b400";
    pub const ERROR: &'static str = "#dc3232";
    pub const MUTED: &'static str = "#969696";

    /// Resolves a palette entry; anything malformed falls back to gray.
    pub fn color(hex: &str) -> Color32 {
        Self::parse(hex).unwrap_or(Color32::GRAY)
    }

    fn parse(hex: &str) -> Option<Color32> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let rgb = u32::from_str_radix(digits, 16).ok()?;
        let [_, r, g, b] = rgb.to_be_bytes();
        Some(Color32::from_rgb(r, g, b))
    }
}
