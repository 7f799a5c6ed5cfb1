//! Case normalization for natural keys.
//!
//! Codes are stored and compared upper-cased, emails lower-cased. Callers
//! must normalize before any uniqueness comparison or write.

/// Normalize a department/course/module code.
pub fn code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Normalize an email address.
pub fn email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalize a student roll number. Same convention as codes.
pub fn roll_number(raw: &str) -> String {
    raw.trim().to_uppercase()
}
