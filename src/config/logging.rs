//! Configuración de logging

/// Instalar el subscriber de `tracing`. Ignora la llamada si ya existe uno.
pub fn init_tracing(level: tracing::Level) {
    if tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .is_ok()
    {
        tracing::debug!("📝 Logging inicializado en nivel {}", level);
    }
}
