use std::fmt::{Display, Formatter};

use crate::form::ValidationError;

/// Display-ready rule error used by the app's forms. The message is the error:
/// no codes, no localization layer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldMessage(String);

impl FieldMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldMessage {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for FieldMessage {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for FieldMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl ValidationError for FieldMessage {
    fn message(&self) -> String {
        self.0.clone()
    }
}

/// Basic email shape: non-empty local part, exactly one `@`, a domain containing
/// a dot with text on both sides, no whitespace anywhere.
pub fn email_format(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = value.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Each unmet requirement yields its display-ready message; an empty result
/// means the password is acceptable. Rules report the first message.
pub fn password_requirements(password: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long".to_owned());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter".to_owned());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter".to_owned());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one number".to_owned());
    }

    errors
}

const STRENGTH_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum StrengthLabel {
    VeryWeak,
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthLabel {
    pub const fn as_str(self) -> &'static str {
        match self {
            StrengthLabel::VeryWeak => "Very Weak",
            StrengthLabel::Weak => "Weak",
            StrengthLabel::Fair => "Fair",
            StrengthLabel::Good => "Good",
            StrengthLabel::Strong => "Strong",
        }
    }
}

impl Display for StrengthLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PasswordStrength {
    pub score: u8,
    pub label: StrengthLabel,
}

/// Scores a candidate password 0-5 by counting the satisfied checks (length >= 8,
/// lowercase, uppercase, digit, symbol). Empty input is a distinct no-strength
/// state, not a score of zero.
pub fn password_strength(password: &str) -> Option<PasswordStrength> {
    if password.is_empty() {
        return None;
    }

    let checks = [
        password.chars().count() >= 8,
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| STRENGTH_SYMBOLS.contains(c)),
    ];
    let score = checks.iter().filter(|passed| **passed).count() as u8;

    let label = match score {
        0 | 1 => StrengthLabel::VeryWeak,
        2 => StrengthLabel::Weak,
        3 => StrengthLabel::Fair,
        4 => StrengthLabel::Good,
        _ => StrengthLabel::Strong,
    };
    Some(PasswordStrength { score, label })
}
