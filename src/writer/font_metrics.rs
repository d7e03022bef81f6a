//! Base-14 font metrics, WinAnsi text encoding and word wrapping.
//!
//! Generated reports only use the standard Helvetica faces, which every
//! PDF reader provides without embedding. Widths are the Adobe AFM values
//! in units of 1/1000 em.

/// Standard (Base-14) fonts used by the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    /// Helvetica
    Helvetica,
    /// Helvetica-Bold
    HelveticaBold,
}

impl StandardFont {
    /// All fonts the writer registers, in resource order.
    pub const ALL: [StandardFont; 2] = [StandardFont::Helvetica, StandardFont::HelveticaBold];

    /// PostScript base font name.
    pub fn base_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Name of the font in page resource dictionaries.
    pub fn resource_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "F1",
            StandardFont::HelveticaBold => "F2",
        }
    }

    /// Ascender height in 1/1000 em.
    pub fn ascender(&self) -> f32 {
        718.0
    }

    /// Width of a single character in 1/1000 em.
    pub fn char_width(&self, ch: char) -> f32 {
        let code = encode_char(ch);
        let table = match self {
            StandardFont::Helvetica => &HELVETICA_ASCII,
            StandardFont::HelveticaBold => &HELVETICA_BOLD_ASCII,
        };
        if (0x20..=0x7E).contains(&code) {
            return table[(code - 0x20) as usize] as f32;
        }
        let bold = *self == StandardFont::HelveticaBold;
        match code {
            0x91 | 0x92 | 0x82 => {
                if bold {
                    278.0
                } else {
                    222.0
                }
            },
            0x93 | 0x94 | 0x84 => {
                if bold {
                    500.0
                } else {
                    333.0
                }
            },
            0x95 => 350.0,
            0x97 | 0x85 | 0x89 | 0x99 => 1000.0,
            _ => 556.0,
        }
    }
}

/// Trait for font metrics needed for layout.
pub trait FontMetrics {
    /// Width of `text` in points at `font_size`.
    fn text_width(&self, text: &str, font_size: f32) -> f32;
}

impl FontMetrics for StandardFont {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let units: f32 = text.chars().map(|c| self.char_width(c)).sum();
        units * font_size / 1000.0
    }
}

/// Recommended baseline-to-baseline distance for a font size.
pub fn line_height(font_size: f32) -> f32 {
    font_size * 1.2
}

#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Map one character to its WinAnsiEncoding byte.
///
/// Whitespace control characters become a space; characters outside the
/// encoding become `?`.
fn encode_char(ch: char) -> u8 {
    match ch {
        '\t' | '\n' | '\r' => b' ',
        ' '..='~' => ch as u8,
        '\u{A0}'..='\u{FF}' => ch as u32 as u8,
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => b'?',
    }
}

/// Encode text for a Base-14 font using WinAnsiEncoding.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(encode_char).collect()
}

/// Wrap text to fit within `max_width` points.
///
/// Greedy word wrap on whitespace. A word wider than the line is broken
/// between characters. Always returns at least one (possibly empty) line.
pub fn wrap_text(
    text: &str,
    max_width: f32,
    font_size: f32,
    metrics: &dyn FontMetrics,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if metrics.text_width(&candidate, font_size) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if metrics.text_width(word, font_size) <= max_width {
            current = word.to_string();
        } else {
            // Break an over-long word; every piece keeps at least one char.
            for ch in word.chars() {
                let mut piece = current.clone();
                piece.push(ch);
                if !current.is_empty() && metrics.text_width(&piece, font_size) > max_width {
                    lines.push(std::mem::take(&mut current));
                    current.push(ch);
                } else {
                    current = piece;
                }
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helvetica_widths() {
        let font = StandardFont::Helvetica;
        assert_eq!(font.char_width(' '), 278.0);
        assert_eq!(font.char_width('A'), 667.0);
        assert_eq!(font.char_width('i'), 222.0);
        assert_eq!(font.char_width('W'), 944.0);
    }

    #[test]
    fn test_bold_is_wider() {
        let text = "Annotation";
        let regular = StandardFont::Helvetica.text_width(text, 10.0);
        let bold = StandardFont::HelveticaBold.text_width(text, 10.0);
        assert!(bold > regular);
    }

    #[test]
    fn test_text_width_scales_with_size() {
        let font = StandardFont::Helvetica;
        let w10 = font.text_width("Quote", 10.0);
        let w20 = font.text_width("Quote", 20.0);
        assert!((w20 - 2.0 * w10).abs() < 0.001);
        // Q=778 u=556 o=556 t=278 e=556 -> 2724 units
        assert!((w10 - 27.24).abs() < 0.001);
    }

    #[test]
    fn test_resource_names() {
        assert_eq!(StandardFont::Helvetica.resource_name(), "F1");
        assert_eq!(StandardFont::HelveticaBold.base_name(), "Helvetica-Bold");
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("abc"), b"abc".to_vec());
        assert_eq!(encode_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("\u{201C}hi\u{201D}"), vec![0x93, b'h', b'i', 0x94]);
        assert_eq!(encode_win_ansi("a\u{2014}b"), vec![b'a', 0x97, b'b']);
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
        assert_eq!(encode_win_ansi("a\tb"), b"a b".to_vec());
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        let lines = wrap_text("Hello World", 200.0, 10.0, &StandardFont::Helvetica);
        assert_eq!(lines, vec!["Hello World".to_string()]);
    }

    #[test]
    fn test_wrap_splits_on_words() {
        let text = "the quick brown fox jumps over the lazy dog";
        let lines = wrap_text(text, 60.0, 10.0, &StandardFont::Helvetica);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(StandardFont::Helvetica.text_width(line, 10.0) <= 60.0);
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_breaks_long_word() {
        let word = "x".repeat(100);
        let lines = wrap_text(&word, 50.0, 10.0, &StandardFont::Helvetica);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(StandardFont::Helvetica.text_width(line, 10.0) <= 50.0);
        }
    }

    #[test]
    fn test_wrap_empty_text() {
        let lines = wrap_text("", 100.0, 10.0, &StandardFont::Helvetica);
        assert_eq!(lines, vec![String::new()]);
    }

    #[test]
    fn test_wrap_collapses_newlines() {
        let lines = wrap_text("one\ntwo", 500.0, 10.0, &StandardFont::Helvetica);
        assert_eq!(lines, vec!["one two".to_string()]);
    }
}
