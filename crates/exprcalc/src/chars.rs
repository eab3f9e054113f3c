//! Character classification for the tokenizer

/// Operator symbols, including parentheses
pub const OPERATOR_CHARS: [char; 7] = ['+', '-', '*', '/', '^', '(', ')'];

/// Check if a character may appear inside an operand (number or variable name)
pub fn is_valid_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// Check if a character is one of the operator symbols
pub fn is_operator(c: char) -> bool {
    OPERATOR_CHARS.contains(&c)
}

/// Check if a character starts a numeric literal
pub fn is_numeric_start(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Readable name for a character in error messages
///
/// Whitespace is reported by name so the message stays legible.
pub fn char_name(c: char) -> String {
    match c {
        ' ' => "[space]".to_string(),
        '\t' => "[tab]".to_string(),
        '\n' => "[newline]".to_string(),
        '\r' => "[return]".to_string(),
        c if c.is_control() => format!("[U+{:04X}]", c as u32),
        c => c.to_string(),
    }
}
