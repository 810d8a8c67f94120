//! Glyph advances for the built-in Helvetica face.
//!
//! Widths come from the Adobe Helvetica AFM and are expressed in ems
//! (thousandths of the font size divided by 1000).

/// Advances for printable ASCII, indexed from `' '` (0x20) to `'~'` (0x7E).
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Helvetica-Bold runs wider than the regular face. Scaling the regular
/// advances by this factor covers every printable ASCII glyph.
pub const BOLD_WIDTH_FACTOR: f32 = 1.34;

/// Advance of one character in ems.
///
/// Anything outside printable ASCII is rendered as a substitute glyph (or
/// `...` for an ellipsis), so it is counted as a full em.
pub fn char_width_em(c: char) -> f32 {
    match c {
        ' '..='~' => f32::from(HELVETICA_WIDTHS[c as usize - 0x20]) / 1000.0,
        _ => 1.0,
    }
}

/// Advance of a whole string in ems.
pub fn text_width_em(text: &str) -> f32 {
    text.chars().map(char_width_em).sum()
}
