pub mod cliente;
#[cfg(test)]
pub mod memory;
