use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::cliente::{Cliente, NewCliente};

const SELECT_COLUMNS: &str = r#"
    SELECT id, nombre, apellidos, fecha_nacimiento, cuit, domicilio, celular, email, deshabilitado
    FROM clientes
"#;

#[async_trait]
pub trait ClienteRepository: Send + Sync {
    /// Rows whose `deshabilitado` flag is false.
    async fn get_enabled(&self) -> Result<Vec<Cliente>, sqlx::Error>;

    /// Any row, disabled or not.
    async fn get_by_id(&self, id: i32) -> Result<Option<Cliente>, sqlx::Error>;

    /// Case-sensitive substring match on `nombre`, enabled rows only.
    async fn search_by_name(&self, nombre: &str) -> Result<Vec<Cliente>, sqlx::Error>;

    async fn exists_cuit(&self, cuit: &str) -> Result<bool, sqlx::Error>;

    async fn exists_email(&self, email: &str) -> Result<bool, sqlx::Error>;

    async fn create(&self, cliente: &NewCliente) -> Result<Cliente, sqlx::Error>;

    /// `None` when the row no longer exists.
    async fn update(&self, id: i32, cliente: &NewCliente) -> Result<Option<Cliente>, sqlx::Error>;

    /// Flips the flag on an enabled row. `false` when nothing was changed.
    async fn disable(&self, id: i32) -> Result<bool, sqlx::Error>;

    /// `false` when there was no row to remove.
    async fn delete(&self, id: i32) -> Result<bool, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgClienteRepository {
    pool: PgPool,
}

impl PgClienteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClienteRepository for PgClienteRepository {
    async fn get_enabled(&self) -> Result<Vec<Cliente>, sqlx::Error> {
        let sql = format!("{SELECT_COLUMNS} WHERE deshabilitado = FALSE ORDER BY id");

        sqlx::query_as::<_, Cliente>(&sql)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Cliente>, sqlx::Error> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = $1");

        sqlx::query_as::<_, Cliente>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn search_by_name(&self, nombre: &str) -> Result<Vec<Cliente>, sqlx::Error> {
        // strpos keeps the match literal, LIKE would treat % and _ as wildcards
        let sql = format!(
            "{SELECT_COLUMNS} WHERE deshabilitado = FALSE AND strpos(nombre, $1) > 0 ORDER BY id"
        );

        sqlx::query_as::<_, Cliente>(&sql)
            .bind(nombre)
            .fetch_all(&self.pool)
            .await
    }

    async fn exists_cuit(&self, cuit: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM clientes WHERE cuit = $1)")
            .bind(cuit)
            .fetch_one(&self.pool)
            .await
    }

    async fn exists_email(&self, email: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM clientes WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
    }

    async fn create(&self, cliente: &NewCliente) -> Result<Cliente, sqlx::Error> {
        sqlx::query_as::<_, Cliente>(
            r#"
            INSERT INTO clientes (nombre, apellidos, fecha_nacimiento, cuit, domicilio, celular, email)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, nombre, apellidos, fecha_nacimiento, cuit, domicilio, celular, email, deshabilitado
            "#,
        )
        .bind(&cliente.nombre)
        .bind(&cliente.apellidos)
        .bind(cliente.fecha_nacimiento)
        .bind(&cliente.cuit)
        .bind(&cliente.domicilio)
        .bind(&cliente.celular)
        .bind(&cliente.email)
        .fetch_one(&self.pool)
        .await
    }

    async fn update(&self, id: i32, cliente: &NewCliente) -> Result<Option<Cliente>, sqlx::Error> {
        sqlx::query_as::<_, Cliente>(
            r#"
            UPDATE clientes
            SET nombre = $1, apellidos = $2, fecha_nacimiento = $3, cuit = $4,
                domicilio = $5, celular = $6, email = $7
            WHERE id = $8
            RETURNING id, nombre, apellidos, fecha_nacimiento, cuit, domicilio, celular, email, deshabilitado
            "#,
        )
        .bind(&cliente.nombre)
        .bind(&cliente.apellidos)
        .bind(cliente.fecha_nacimiento)
        .bind(&cliente.cuit)
        .bind(&cliente.domicilio)
        .bind(&cliente.celular)
        .bind(&cliente.email)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn disable(&self, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE clientes
            SET deshabilitado = TRUE
            WHERE id = $1 AND deshabilitado = FALSE
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clientes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
