//! # Configuração
//!
//! Parâmetros do motor de inferência e do minerador de padrões.
//!
//! Ambas as structs implementam `Default` com os valores de referência e
//! aceitam JSON parcial via serde (`#[serde(default)]`):
//!
//! ```rust
//! use atomspace_pln::config::MinerConfig;
//!
//! let cfg: MinerConfig = serde_json::from_str(r#"{"min_support": 3}"#).unwrap();
//! assert_eq!(cfg.min_support, 3);
//! assert_eq!(cfg.max_pattern_size, 3);
//! ```

use serde::{Deserialize, Serialize};

/// Parâmetros do [`Reasoner`](crate::inference::Reasoner).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReasonerConfig {
    /// Confiança mínima (exclusiva) para usar um átomo como evidência
    /// no encadeamento.
    pub confidence_threshold: f64,
    /// Termo que protege o peso da revisão contra divisão por zero.
    pub epsilon: f64,
    /// Penalidade λ aplicada à força na abdução.
    pub abduction_penalty: f64,
}

impl Default for ReasonerConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.1,
            epsilon: 1e-6,
            abduction_penalty: 0.5,
        }
    }
}

/// Parâmetros do [`PatternMiner`](crate::mining::PatternMiner).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinerConfig {
    /// Suporte mínimo (contagem) para um padrão sobreviver à poda.
    pub min_support: usize,
    /// Confiança mínima (fração) para um padrão ser reportado.
    pub min_confidence: f64,
    /// Calcula `attention_score` a partir do STI dos átomos casados.
    pub use_attention: bool,
    /// Tamanho máximo (em átomos) dos padrões.
    pub max_pattern_size: usize,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            min_support: 2,
            min_confidence: 0.1,
            use_attention: true,
            max_pattern_size: 3,
        }
    }
}
