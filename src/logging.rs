//! Inicialização do tracing.

use tracing_subscriber::EnvFilter;

/// Instala o subscriber `fmt` com filtro de `RUST_LOG` (padrão `info`).
///
/// Pode ser chamada mais de uma vez: se já houver um subscriber global,
/// a chamada não tem efeito.
///
/// ```
/// atomspace_pln::logging::init_tracing();
/// atomspace_pln::logging::init_tracing();
/// ```
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}
