/// Reports failures that are answered with a generic body, so the cause only
/// shows up in the service log.
pub struct Logger {
    message: String,
}

impl Logger {
    pub fn new(message: String) -> Self {
        Self { message }
    }

    pub fn log(&self) {
        tracing::error!(target: "clientes_api", "{}", self.message);
    }
}
