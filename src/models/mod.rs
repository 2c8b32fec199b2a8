pub mod cliente;
pub mod requests;
pub mod responses;
