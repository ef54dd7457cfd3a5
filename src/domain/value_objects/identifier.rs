//! Identifier check
//!
//! Module names end up in C++ function names, CMake target names and Python
//! import statements, so they are restricted to `[A-Za-z_][A-Za-z0-9_]*`.

/// Returns true when `s` is a non-empty C/Python identifier.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
