//! Tipos de erro do crate.
//!
//! Só duas situações falham explicitamente; todo o resto (valores fora da
//! faixa, divisões por zero, ids pendentes) é tolerado silenciosamente.

use thiserror::Error;

/// Erros das operações do AtomSpace e do motor de inferência.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    /// Indução chamada sem nenhuma observação.
    ///
    /// Fatal apenas para a chamada — nunca retorna uma crença.
    #[error("indução requer ao menos uma observação (evidência vazia)")]
    EmptyEvidence,

    /// Registro de importação malformado (sem `id` ou não decodificável).
    ///
    /// Fatal apenas para a importação em curso; o AtomSpace não é alterado.
    #[error("registro malformado: {0}")]
    MalformedRecord(String),
}

/// Alias de `Result` com o [`Error`] do crate.
pub type Result<T> = std::result::Result<T, Error>;
