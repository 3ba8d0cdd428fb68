//! Category presentation helpers
//!
//! Categories are free-form labels owned by the API. These helpers give each a
//! stable glyph and a soft colour so they are recognisable across views.

/// Keyword → glyph table; the first keyword contained in the name wins
const GLYPHS: &[(&str, &str)] = &[
    ("groceries", "🛒"),
    ("food", "🍔"),
    ("dining", "🍽️"),
    ("transport", "🚌"),
    ("travel", "✈️"),
    ("fuel", "⛽"),
    ("rent", "🏠"),
    ("housing", "🏠"),
    ("utilities", "💡"),
    ("internet", "🌐"),
    ("phone", "📱"),
    ("shopping", "🛍️"),
    ("health", "🩺"),
    ("medical", "💊"),
    ("fitness", "💪"),
    ("subscriptions", "🔁"),
    ("entertainment", "🎬"),
    ("education", "🎓"),
    ("salary", "💼"),
    ("income", "💰"),
    ("savings", "🏦"),
    ("insurance", "🛡️"),
    ("gifts", "🎁"),
    ("pets", "🐾"),
    ("kids", "🧸"),
    ("charity", "🤝"),
    ("emi", "🏦"),
    ("tuition", "📚"),
    ("upi", "📲"),
];

const FALLBACK_GLYPH: &str = "🏷️";

const PALETTE: [(u8, u8, u8); 7] = [
    (0xe0, 0xf2, 0xfe),
    (0xec, 0xfc, 0xcb),
    (0xfe, 0xe2, 0xe2),
    (0xfa, 0xe8, 0xff),
    (0xe5, 0xe7, 0xeb),
    (0xdc, 0xfc, 0xe7),
    (0xff, 0xed, 0xd5),
];

/// Glyph for a category name (case-insensitive substring match)
pub fn category_glyph(name: Option<&str>) -> &'static str {
    let key = name.unwrap_or_default().to_lowercase();
    GLYPHS
        .iter()
        .find(|(keyword, _)| key.contains(keyword))
        .map(|(_, glyph)| *glyph)
        .unwrap_or(FALLBACK_GLYPH)
}

/// Deterministic RGB colour for a category name
pub fn category_color(name: Option<&str>) -> (u8, u8, u8) {
    let hash = name
        .unwrap_or_default()
        .encode_utf16()
        .fold(0u32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as u32));
    PALETTE[hash as usize % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_lookup() {
        assert_eq!(category_glyph(Some("Groceries & Household")), "🛒");
        assert_eq!(category_glyph(Some("HOME RENT")), "🏠");
        assert_eq!(category_glyph(Some("Misc")), FALLBACK_GLYPH);
        assert_eq!(category_glyph(None), FALLBACK_GLYPH);
    }

    #[test]
    fn test_color_is_stable() {
        assert_eq!(category_color(Some("Dining")), category_color(Some("Dining")));
        assert_eq!(category_color(None), PALETTE[0]);
    }
}
