use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const LONG_PASSWORD_LENGTH: usize = 12;
pub const MAX_SCORE: u8 = 5;
/// Scores below this keep the register button disabled. Advisory only.
pub const ACCEPTABLE_SCORE: u8 = 3;

static UPPERCASE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]").unwrap());
static LOWERCASE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z]").unwrap());
static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]").unwrap());
static SPECIAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]").unwrap());

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PasswordStrength {
    pub score: u8,
    pub feedback: String,
    pub color: &'static str,
    /// Width of the strength meter, 0 to 100
    pub percent: u8,
    pub acceptable: bool,
}

/// Length in UTF-16 code units, the unit browsers use for `input.value.length`.
fn password_length(password: &str) -> usize {
    password.encode_utf16().count()
}

pub fn calculate_password_strength(password: &str) -> PasswordStrength {
    let length = password_length(password);
    if length < MIN_PASSWORD_LENGTH {
        return strength(0, "Password must be at least 8 characters".to_string());
    }

    let mut score = 0;
    let mut missing = Vec::new();

    if length >= LONG_PASSWORD_LENGTH {
        score += 1;
    }

    let classes: [(&Regex, &str); 4] = [
        (&UPPERCASE, "Add uppercase letters"),
        (&LOWERCASE, "Add lowercase letters"),
        (&DIGIT, "Add numbers"),
        (&SPECIAL, "Add special characters"),
    ];
    for (pattern, hint) in classes {
        if pattern.is_match(password) {
            score += 1;
        } else {
            missing.push(hint);
        }
    }

    let feedback = if missing.is_empty() {
        "Strong password".to_string()
    } else {
        missing.join(", ")
    };

    strength(score, feedback)
}

/// Meter color for a score.
pub fn strength_color(score: u8) -> &'static str {
    match score {
        0 => "red",
        1 => "orange",
        2 => "yellow",
        3 => "blue",
        _ => "green",
    }
}

fn strength(score: u8, feedback: String) -> PasswordStrength {
    PasswordStrength {
        score,
        feedback,
        color: strength_color(score),
        percent: score.min(MAX_SCORE) * (100 / MAX_SCORE),
        acceptable: score >= ACCEPTABLE_SCORE,
    }
}
