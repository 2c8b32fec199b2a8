use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::cliente::{Cliente, NewCliente};
use crate::repositories::cliente::ClienteRepository;

/// Stand-in for Postgres in handler tests.
#[derive(Debug, Default)]
pub struct MemoryClienteRepository {
    rows: Mutex<Vec<Cliente>>,
    next_id: AtomicUsize,
    calls: AtomicUsize,
}

impl MemoryClienteRepository {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn rows(&self) -> std::sync::MutexGuard<'_, Vec<Cliente>> {
        self.touch();
        self.rows.lock().unwrap()
    }
}

#[async_trait]
impl ClienteRepository for MemoryClienteRepository {
    async fn get_enabled(&self) -> Result<Vec<Cliente>, sqlx::Error> {
        Ok(self
            .rows()
            .iter()
            .filter(|row| !row.deshabilitado)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Cliente>, sqlx::Error> {
        Ok(self.rows().iter().find(|row| row.id == id).cloned())
    }

    async fn search_by_name(&self, nombre: &str) -> Result<Vec<Cliente>, sqlx::Error> {
        Ok(self
            .rows()
            .iter()
            .filter(|row| !row.deshabilitado && row.nombre.contains(nombre))
            .cloned()
            .collect())
    }

    async fn exists_cuit(&self, cuit: &str) -> Result<bool, sqlx::Error> {
        Ok(self.rows().iter().any(|row| row.cuit == cuit))
    }

    async fn exists_email(&self, email: &str) -> Result<bool, sqlx::Error> {
        Ok(self.rows().iter().any(|row| row.email == email))
    }

    async fn create(&self, cliente: &NewCliente) -> Result<Cliente, sqlx::Error> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i32 + 1;
        let row = Cliente {
            id,
            nombre: cliente.nombre.clone(),
            apellidos: cliente.apellidos.clone(),
            fecha_nacimiento: cliente.fecha_nacimiento,
            cuit: cliente.cuit.clone(),
            domicilio: cliente.domicilio.clone(),
            celular: cliente.celular.clone(),
            email: cliente.email.clone(),
            deshabilitado: false,
        };
        self.rows().push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, cliente: &NewCliente) -> Result<Option<Cliente>, sqlx::Error> {
        let mut rows = self.rows();
        let row = match rows.iter_mut().find(|row| row.id == id) {
            Some(row) => row,
            None => return Ok(None),
        };

        row.nombre = cliente.nombre.clone();
        row.apellidos = cliente.apellidos.clone();
        row.fecha_nacimiento = cliente.fecha_nacimiento;
        row.cuit = cliente.cuit.clone();
        row.domicilio = cliente.domicilio.clone();
        row.celular = cliente.celular.clone();
        row.email = cliente.email.clone();

        Ok(Some(row.clone()))
    }

    async fn disable(&self, id: i32) -> Result<bool, sqlx::Error> {
        let mut rows = self.rows();
        match rows.iter_mut().find(|row| row.id == id && !row.deshabilitado) {
            Some(row) => {
                row.deshabilitado = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, sqlx::Error> {
        let mut rows = self.rows();
        let before = rows.len();
        rows.retain(|row| row.id != id);
        Ok(rows.len() < before)
    }
}
