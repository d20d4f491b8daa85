//! Devanagari numeral normalization.

/// Replace Devanagari digits (०-९) with ASCII digits. Other characters pass through.
pub fn normalize_digits(text: &str) -> String {
    text.chars().map(ascii_digit).collect()
}

fn ascii_digit(c: char) -> char {
    match c {
        '\u{0966}'..='\u{096F}' => {
            char::from(b'0' + (c as u32 - '\u{0966}' as u32) as u8)
        }
        _ => c,
    }
}
