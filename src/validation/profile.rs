// ABOUTME: Versioned rule profiles for the registration forms
// The plate and password rules changed across platform iterations; each
// form selects exactly one active variant here instead of relying on
// whichever rule happened to be wired up last

use lazy_static::lazy_static;
use regex::Regex;

/// Message for the strict three-letters-three-digits plate format.
pub const MSG_PLATE_CLASSIC: &str = "La placa debe tener el formato ABC123";

/// Message for plates with characters outside `[A-Z0-9]{1,6}`.
pub const MSG_PLATE_CHARSET: &str =
    "La placa solo puede tener letras y números (máximo 6 caracteres)";

/// Message for plates without two letters or two digits.
pub const MSG_PLATE_COMPOSITION: &str = "La placa debe tener al menos dos letras o dos números";

/// Message for the standard password rules.
pub const MSG_PASSWORD_STANDARD: &str =
    "La contraseña debe tener mínimo 8 caracteres, una mayúscula, una minúscula y un número";

/// Message for the strong password rules.
pub const MSG_PASSWORD_STRONG: &str = "La contraseña debe tener mínimo 8 caracteres, una mayúscula, una minúscula, un número y un carácter especial";

/// Special characters accepted by the strong password rule.
pub const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

lazy_static! {
    static ref PLATE_CLASSIC_RE: Regex = Regex::new(r"^[A-Z]{3}[0-9]{3}$").unwrap();
    static ref PLATE_FLEXIBLE_RE: Regex = Regex::new(r"^[A-Z0-9]{1,6}$").unwrap();
}

/// Vehicle plate formats the platform has required over time.
///
/// `Flexible` is what the backend currently enforces and is the active
/// rule for driver registration; `Classic` is the original fixed format,
/// kept selectable so the older rule stays available explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlateFormat {
    /// Exactly three ASCII letters followed by three digits (`ABC123`).
    Classic,
    /// One to six uppercase alphanumerics with at least two letters or
    /// at least two digits.
    Flexible,
}

impl PlateFormat {
    /// Check a plate against this format. Expects the uppercased value.
    pub fn validate(&self, plate: &str) -> Result<(), &'static str> {
        match self {
            Self::Classic => {
                if PLATE_CLASSIC_RE.is_match(plate) {
                    Ok(())
                } else {
                    Err(MSG_PLATE_CLASSIC)
                }
            }
            Self::Flexible => {
                if !PLATE_FLEXIBLE_RE.is_match(plate) {
                    return Err(MSG_PLATE_CHARSET);
                }
                let letters = plate.chars().filter(char::is_ascii_alphabetic).count();
                let digits = plate.chars().filter(char::is_ascii_digit).count();
                if letters < 2 && digits < 2 {
                    return Err(MSG_PLATE_COMPOSITION);
                }
                Ok(())
            }
        }
    }
}

/// Password strength requirements per form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordPolicy {
    /// Minimum 8 characters with uppercase, lowercase and a digit.
    Standard,
    /// Standard plus one special character.
    Strong,
}

impl PasswordPolicy {
    /// Check a password against this policy.
    pub fn validate(&self, password: &str) -> Result<(), &'static str> {
        let long_enough = password.len() >= 8;
        let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());

        match self {
            Self::Standard => {
                if long_enough && has_upper && has_lower && has_digit {
                    Ok(())
                } else {
                    Err(MSG_PASSWORD_STANDARD)
                }
            }
            Self::Strong => {
                let has_special = password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c));
                if long_enough && has_upper && has_lower && has_digit && has_special {
                    Ok(())
                } else {
                    Err(MSG_PASSWORD_STRONG)
                }
            }
        }
    }
}

/// The rule set a form validates against.
#[derive(Debug, Clone, Copy)]
pub struct ValidationProfile {
    /// Active plate format.
    pub plate: PlateFormat,
    /// Active password policy.
    pub password: PasswordPolicy,
}

impl ValidationProfile {
    /// Rules for the driver registration wizard.
    pub fn driver() -> Self {
        Self {
            plate: PlateFormat::Flexible,
            password: PasswordPolicy::Strong,
        }
    }

    /// Rules for the client registration form.
    pub fn client() -> Self {
        Self {
            plate: PlateFormat::Flexible,
            password: PasswordPolicy::Standard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plate_classic() {
        assert!(PlateFormat::Classic.validate("ABC123").is_ok());
        assert!(PlateFormat::Classic.validate("AB123").is_err());
        assert!(PlateFormat::Classic.validate("ABCD12").is_err());
    }

    #[test]
    fn test_plate_flexible_charset() {
        assert_eq!(
            PlateFormat::Flexible.validate("ABC-123"),
            Err(MSG_PLATE_CHARSET)
        );
        assert_eq!(
            PlateFormat::Flexible.validate("ABC1234"),
            Err(MSG_PLATE_CHARSET)
        );
        assert_eq!(PlateFormat::Flexible.validate(""), Err(MSG_PLATE_CHARSET));
    }

    #[test]
    fn test_plate_flexible_composition() {
        // two letters or two digits is enough
        assert!(PlateFormat::Flexible.validate("AB1").is_ok());
        assert!(PlateFormat::Flexible.validate("A12").is_ok());
        assert!(PlateFormat::Flexible.validate("ABC123").is_ok());
        // one of each is not
        assert_eq!(
            PlateFormat::Flexible.validate("A1"),
            Err(MSG_PLATE_COMPOSITION)
        );
    }

    #[test]
    fn test_password_standard() {
        assert!(PasswordPolicy::Standard.validate("Abcdefg1").is_ok());
        // no uppercase
        assert!(PasswordPolicy::Standard.validate("abcdefg1").is_err());
        // no digit
        assert!(PasswordPolicy::Standard.validate("Abcdefgh").is_err());
        // too short
        assert!(PasswordPolicy::Standard.validate("Abc1").is_err());
    }

    #[test]
    fn test_password_strong_requires_special() {
        assert!(PasswordPolicy::Strong.validate("Abcdefg1").is_err());
        assert!(PasswordPolicy::Strong.validate("Abcdefg1!").is_ok());
        assert!(PasswordPolicy::Strong.validate("Abcdef1?").is_ok());
    }
}
