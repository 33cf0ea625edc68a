//! # Módulo Mining — Padrões de Subgrafos Frequentes
//!
//! Descobre regularidades estruturais no [`AtomSpace`](crate::core::AtomSpace)
//! e as ranqueia por interessância. A mineração só **lê** o AtomSpace.
//!
//! | Item | Papel |
//! |------|-------|
//! | [`PatternMiner`] | Crescimento em níveis, poda, métricas e ranking |
//! | [`SubgraphPattern`] | Padrão descoberto com suas métricas |
//! | [`SubgraphMatch`] | Mapeamento template → átomo casado |
//! | [`PatternReport`] | Exportação JSON dos padrões |

/// Registros de padrões e exportação.
pub mod pattern;

/// O minerador.
pub mod miner;

pub use miner::PatternMiner;
pub use pattern::{MiningParams, PatternReport, SubgraphMatch, SubgraphPattern};
