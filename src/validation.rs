use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use validator::{Validate, ValidationError};

use crate::errors::{AppError, Errors};
use crate::models::cliente::NewCliente;
use crate::models::requests::cliente::ClienteDto;
use crate::utils::normalize_cuit;

pub const MISSING_FIELDS_MESSAGE: &str = "Existen campos obligatorios sin cargar. Asegurese de cargar Nombre, Apellido, Fecha de nacimiento, CUIT y Email";

pub static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+[.][A-Za-z.]{2,}$").expect("valid email pattern")
});

/// Matched against the separator-free form only.
pub static CUIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(20|23|24|27|30|33|34)[0-9]{8}[0-9]$").expect("valid cuit pattern")
});

#[derive(Debug)]
pub struct DateLayout {
    pub name: &'static str,
    separator: char,
    padded: bool,
}

/// Tried in order, first match wins.
pub const DATE_LAYOUTS: [DateLayout; 6] = [
    DateLayout { name: "dd/MM/yyyy", separator: '/', padded: true },
    DateLayout { name: "dd-MM-yyyy", separator: '-', padded: true },
    DateLayout { name: "dd.MM.yyyy", separator: '.', padded: true },
    DateLayout { name: "d-M-yyyy", separator: '-', padded: false },
    DateLayout { name: "d.M.yyyy", separator: '.', padded: false },
    DateLayout { name: "d/M/yyyy", separator: '/', padded: false },
];

impl DateLayout {
    fn parse(&self, raw: &str) -> Option<NaiveDate> {
        let mut parts = raw.split(self.separator);
        let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }

        if !self.accepts_width(day) || !self.accepts_width(month) || year.len() != 4 {
            return None;
        }

        if ![day, month, year]
            .iter()
            .all(|part| part.bytes().all(|b| b.is_ascii_digit()))
        {
            return None;
        }

        NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
    }

    fn accepts_width(&self, part: &str) -> bool {
        if self.padded {
            part.len() == 2
        } else {
            (1..=2).contains(&part.len())
        }
    }
}

// (struct field, name shown to the client), in reporting order.
const CHECKED_FIELDS: [(&str, &str); 5] = [
    ("nombre", "Nombre"),
    ("apellidos", "Apellidos"),
    ("email", "Email"),
    ("fecha_nacimiento", "FechaNacimiento"),
    ("cuit", "CUIT"),
];

pub fn letters_and_spaces(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_alphabetic() || c == ' ') {
        Ok(())
    } else {
        Err(ValidationError::new("letters_and_spaces"))
    }
}

pub fn date_characters(value: &str) -> Result<(), ValidationError> {
    if value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '/' | '-' | '.'))
    {
        Ok(())
    } else {
        Err(ValidationError::new("date_characters"))
    }
}

pub fn cuit_format(value: &str) -> Result<(), ValidationError> {
    if CUIT.is_match(&normalize_cuit(value)) {
        Ok(())
    } else {
        Err(ValidationError::new("cuit_format"))
    }
}

fn missing_fields() -> Errors {
    Errors::new(&[("Obligatorios", MISSING_FIELDS_MESSAGE)])
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, str::is_empty)
}

pub fn missing_required(dto: &ClienteDto) -> bool {
    [
        &dto.nombre,
        &dto.apellidos,
        &dto.fecha_nacimiento,
        &dto.cuit,
        &dto.email,
    ]
    .into_iter()
    .any(is_blank)
}

/// Presence and per-field format checks. A missing required field yields a
/// single message and skips the format checks.
pub fn validate_fields(dto: &ClienteDto) -> Errors {
    if missing_required(dto) {
        return missing_fields();
    }

    let mut errors = Errors::default();

    if let Err(failures) = dto.validate() {
        let failed = failures.field_errors();
        for (field, display) in CHECKED_FIELDS {
            if failed.contains_key(field) {
                errors.push(
                    display,
                    &format!("El campo {} posee caracteres inválidos.", display),
                );
            }
        }
    }

    errors
}

pub fn parse_fecha(raw: &str) -> Option<NaiveDate> {
    DATE_LAYOUTS.iter().find_map(|layout| {
        let date = layout.parse(raw)?;
        tracing::trace!(layout = layout.name, "fecha_nacimiento parsed");
        Some(date)
    })
}

fn required(field: &Option<String>) -> Result<&str, AppError> {
    match field.as_deref() {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AppError::Validation(missing_fields())),
    }
}

/// Converts an already validated DTO into the stored representation.
pub fn normalize(dto: &ClienteDto) -> Result<NewCliente, AppError> {
    let fecha_nacimiento =
        parse_fecha(required(&dto.fecha_nacimiento)?).ok_or(AppError::InvalidDate)?;

    Ok(NewCliente {
        nombre: required(&dto.nombre)?.to_string(),
        apellidos: required(&dto.apellidos)?.to_string(),
        fecha_nacimiento,
        cuit: normalize_cuit(required(&dto.cuit)?),
        domicilio: dto.domicilio.clone(),
        celular: dto.celular.clone(),
        email: required(&dto.email)?.to_string(),
    })
}
