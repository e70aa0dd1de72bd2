//! Field rules shared by user creation and update.

/// A name is valid when present and not made only of whitespace.
pub fn validate_name(name: Option<&str>) -> bool {
    matches!(name, Some(n) if !n.trim().is_empty())
}

/// An email is valid when present and containing an `@`. No RFC parsing.
pub fn validate_email(email: Option<&str>) -> bool {
    matches!(email, Some(e) if e.contains('@'))
}
