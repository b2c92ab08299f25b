//! The embedded label font.

use ab_glyph::FontRef;

use crate::error::SignError;

/// Family and style of the embedded font.
pub const DEFAULT_FONT_NAME: &str = "DejaVu Sans Bold";

static FONT_DATA: &[u8] = include_bytes!("../../resources/DejaVu/DejaVuSans-Bold.ttf");

/// Parses the embedded font.
pub fn default_font() -> Result<FontRef<'static>, SignError> {
    Ok(FontRef::try_from_slice(FONT_DATA)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ab_glyph::Font;

    #[test]
    fn embedded_font_parses_and_covers_ascii() {
        let font = default_font().expect("embedded font");
        for c in ' '..='~' {
            assert_ne!(font.glyph_id(c).0, 0, "missing glyph for {:?}", c);
        }
    }
}
