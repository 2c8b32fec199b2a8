use chrono::NaiveDate;

pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

pub fn format_fecha(date: &NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Digits-only CUIT to `XX-XXXXXXXX-X`. Anything that is not eleven ASCII
/// digits is returned untouched.
pub fn format_cuit(cuit: &str) -> String {
    if cuit.len() != 11 || !cuit.bytes().all(|b| b.is_ascii_digit()) {
        return cuit.to_string();
    }

    format!("{}-{}-{}", &cuit[..2], &cuit[2..10], &cuit[10..])
}

/// Drops the `.`, `-` and `/` separators accepted on input.
pub fn normalize_cuit(cuit: &str) -> String {
    cuit.chars()
        .filter(|c| !matches!(c, '.' | '-' | '/'))
        .collect()
}
