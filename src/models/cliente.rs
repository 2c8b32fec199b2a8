use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Cliente {
    pub id: i32,
    pub nombre: String,
    pub apellidos: String,
    pub fecha_nacimiento: NaiveDate,
    /// Digits only, see `utils::format_cuit` for the display form.
    pub cuit: String,
    pub domicilio: Option<String>,
    pub celular: Option<String>,
    pub email: String,
    pub deshabilitado: bool,
}

/// Validated and normalized values written by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCliente {
    pub nombre: String,
    pub apellidos: String,
    pub fecha_nacimiento: NaiveDate,
    pub cuit: String,
    pub domicilio: Option<String>,
    pub celular: Option<String>,
    pub email: String,
}
