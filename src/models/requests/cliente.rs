use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::models::cliente::Cliente;
use crate::utils::{format_cuit, format_fecha};

/// Wire shape of a cliente, used for request bodies and responses alike.
#[derive(Deserialize, Serialize, Validate, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClienteDto {
    #[serde(default)]
    pub id: i32,
    #[validate(custom = "crate::validation::letters_and_spaces")]
    pub nombre: Option<String>,
    #[validate(custom = "crate::validation::letters_and_spaces")]
    pub apellidos: Option<String>,
    #[validate(custom = "crate::validation::date_characters")]
    pub fecha_nacimiento: Option<String>,
    #[validate(custom = "crate::validation::cuit_format")]
    pub cuit: Option<String>,
    pub domicilio: Option<String>,
    pub celular: Option<String>,
    #[validate(regex = "crate::validation::EMAIL")]
    pub email: Option<String>,
}

impl From<Cliente> for ClienteDto {
    fn from(cliente: Cliente) -> Self {
        Self {
            id: cliente.id,
            nombre: Some(cliente.nombre),
            apellidos: Some(cliente.apellidos),
            fecha_nacimiento: Some(format_fecha(&cliente.fecha_nacimiento)),
            cuit: Some(format_cuit(&cliente.cuit)),
            domicilio: cliente.domicilio,
            celular: cliente.celular,
            email: Some(cliente.email),
        }
    }
}
