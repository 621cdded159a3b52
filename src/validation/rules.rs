// ABOUTME: Pure field predicates shared by the registration forms
// Messages match what the platform backend returns for the same rule

use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

/// Message attached to any required field left empty.
pub const MSG_REQUIRED_FIELD: &str = "Este campo es obligatorio";

/// Message for name fields containing digits or symbols.
pub const MSG_INVALID_NAME: &str = "Solo se permiten letras y espacios";

/// Message for identifier fields that must be digits only.
pub const MSG_NOT_NUMERIC: &str = "Solo se permiten números";

/// Message for phone fields.
pub const MSG_INVALID_PHONE: &str = "El teléfono debe tener 10 dígitos";

/// Message for malformed email addresses.
pub const MSG_INVALID_EMAIL: &str = "Verificar correo";

/// Message for under-age drivers.
pub const MSG_UNDER_AGE: &str = "El conductor debe ser mayor de 21 años";

/// Message for an out-of-range vehicle year.
pub const MSG_INVALID_VEHICLE_YEAR: &str =
    "El año del vehículo debe estar entre 2015 y el año actual";

/// Message for a license expiring on or before its issue date.
pub const MSG_LICENSE_DATE_ORDER: &str =
    "La fecha de vencimiento debe ser posterior a la fecha de expedición";

/// Message for an already-expired license.
pub const MSG_LICENSE_EXPIRED: &str = "La licencia de conducción está vencida";

/// Message for an oversized document upload.
pub const MSG_FILE_TOO_LARGE: &str = "El archivo es demasiado grande. Máximo 5MB";

/// Message for mismatched passwords.
pub const MSG_PASSWORD_MISMATCH: &str = "Las contraseñas no coinciden";

/// Message for mismatched bank account numbers.
pub const MSG_ACCOUNT_MISMATCH: &str = "Los números de cuenta no coinciden";

/// Message for a non-numeric bank account.
pub const MSG_ACCOUNT_NOT_NUMERIC: &str = "El número de cuenta solo debe contener números";

/// Prefix of the aggregated missing-fields message.
pub const MSG_MISSING_FIELDS: &str = "Error: faltan campos obligatorios";

/// Message raised when required documents are missing.
pub const MSG_MISSING_FILES: &str = "Faltan archivos obligatorios";

/// Message for an unparseable form date.
pub const MSG_INVALID_DATE: &str = "Fecha inválida (use AAAA-MM-DD)";

/// Maximum accepted size for an uploaded document.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// First year accepted for a registered vehicle.
pub const MIN_VEHICLE_YEAR: i32 = 2015;

/// Minimum driver age in years.
pub const MIN_DRIVER_AGE: i32 = 21;

lazy_static! {
    static ref NAME_RE: Regex = Regex::new(r"^[A-Za-zÁÉÍÓÚáéíóúÑñ\s]+$").unwrap();
    static ref PHONE_RE: Regex = Regex::new(r"^[0-9]{10}$").unwrap();
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Letters (including Spanish accents) and spaces only.
pub fn is_valid_name(value: &str) -> bool {
    NAME_RE.is_match(value)
}

/// Every character an ASCII digit, at least one of them.
pub fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

/// Exactly 10 ASCII digits.
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

/// `local@domain.tld` shape; no spaces, single `@`, dotted domain.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Parse a form date in the backend's `YYYY-MM-DD` format.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Completed years between `birth` and `today`.
///
/// Calendar-aware: one year is subtracted while today's (month, day) still
/// precedes the birthday's (month, day).
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Expiry must fall strictly after both the issue date and today.
pub fn check_license_dates(
    issue: NaiveDate,
    expiry: NaiveDate,
    today: NaiveDate,
) -> Result<(), &'static str> {
    if expiry <= issue {
        return Err(MSG_LICENSE_DATE_ORDER);
    }
    if expiry <= today {
        return Err(MSG_LICENSE_EXPIRED);
    }
    Ok(())
}

/// Model year must parse and fall in `[2015, current year]`.
pub fn check_vehicle_year(raw: &str, today: NaiveDate) -> Result<i32, &'static str> {
    let year: i32 = raw.trim().parse().map_err(|_| MSG_INVALID_VEHICLE_YEAR)?;
    if year < MIN_VEHICLE_YEAR || year > today.year() {
        return Err(MSG_INVALID_VEHICLE_YEAR);
    }
    Ok(year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_accepts_letters_and_accents() {
        assert!(is_valid_name("María José"));
        assert!(is_valid_name("Peña Muñoz"));
        assert!(is_valid_name("Juan"));
    }

    #[test]
    fn test_name_rejects_digits_and_symbols() {
        assert!(!is_valid_name("Juan2"));
        assert!(!is_valid_name("Ana-María"));
        assert!(!is_valid_name("O'Brien"));
        assert!(!is_valid_name(""));
    }

    #[test]
    fn test_numeric_id() {
        assert!(is_numeric("1094567890"));
        assert!(!is_numeric("109456789a"));
        assert!(!is_numeric(""));
    }

    #[test]
    fn test_phone_requires_exactly_ten_digits() {
        assert!(is_valid_phone("3001234567"));
        assert!(!is_valid_phone("300123456"));
        assert!(!is_valid_phone("30012345678"));
        assert!(!is_valid_phone("30012345a7"));
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("admin@evory.com"));
        assert!(is_valid_email("a.b@c.d.co"));
        assert!(!is_valid_email("admin@evory"));
        assert!(!is_valid_email("admin evory@x.co"));
        assert!(!is_valid_email("@evory.com"));
    }

    #[test]
    fn test_age_exact_birthday_boundary() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        // 21 years minus one day before today: still 20
        let birth = NaiveDate::from_ymd_opt(2005, 8, 8).unwrap();
        assert_eq!(age_on(birth, today), 20);
        // exactly 21 years before today: 21
        let birth = NaiveDate::from_ymd_opt(2005, 8, 7).unwrap();
        assert_eq!(age_on(birth, today), 21);
    }

    #[test]
    fn test_age_earlier_month() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let birth = NaiveDate::from_ymd_opt(2000, 12, 31).unwrap();
        assert_eq!(age_on(birth, today), 25);
    }

    #[test]
    fn test_license_dates() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let issue = NaiveDate::from_ymd_opt(2022, 1, 10).unwrap();
        let expiry = NaiveDate::from_ymd_opt(2028, 1, 10).unwrap();
        assert!(check_license_dates(issue, expiry, today).is_ok());

        // expiry on the issue date
        assert_eq!(
            check_license_dates(issue, issue, today),
            Err(MSG_LICENSE_DATE_ORDER)
        );
        // expiry today counts as expired
        assert_eq!(
            check_license_dates(issue, today, today),
            Err(MSG_LICENSE_EXPIRED)
        );
    }

    #[test]
    fn test_vehicle_year_range() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        assert_eq!(check_vehicle_year("2015", today), Ok(2015));
        assert_eq!(check_vehicle_year("2026", today), Ok(2026));
        assert!(check_vehicle_year("2014", today).is_err());
        assert!(check_vehicle_year("2027", today).is_err());
        assert!(check_vehicle_year("no-year", today).is_err());
    }
}
