//! # Valores de Crença e Importância
//!
//! Dois registros numéricos pequenos e imutáveis após a construção:
//!
//! | Tipo | Campos | Significado |
//! |------|--------|-------------|
//! | [`BeliefValue`] | `s`, `c` | Força (strength) e confiança de uma proposição |
//! | [`ImportanceValue`] | `sti`, `lti` | Importância de curto e longo prazo (atenção) |
//!
//! Todos os campos são **limitados (clamped)** a `[0, 1]` em toda construção,
//! inclusive na desserialização. Valores fora da faixa nunca geram erro.
//!
//! ## Exemplo
//!
//! ```rust
//! use atomspace_pln::core::BeliefValue;
//!
//! let b = BeliefValue::new(1.5, -0.2);
//! assert_eq!(b.strength(), 1.0);
//! assert_eq!(b.confidence(), 0.0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Combinação **noisy-OR** de confianças: `1 - (1 - c1) × (1 - c2)`.
///
/// Trata as duas fontes de evidência como independentes. Usada por
/// dedução, abdução e revisão.
pub fn noisy_or(c1: f64, c2: f64) -> f64 {
    1.0 - (1.0 - c1) * (1.0 - c2)
}

fn unit(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Grau de crença `(strength, confidence)` de uma proposição incerta.
///
/// - **strength (s)**: "quão verdadeira" é a proposição
/// - **confidence (c)**: quanta evidência sustenta essa estimativa
///
/// No formato wire é serializado como `{"s": .., "c": ..}`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBelief")]
pub struct BeliefValue {
    s: f64,
    c: f64,
}

#[derive(Deserialize)]
struct RawBelief {
    #[serde(default = "one")]
    s: f64,
    #[serde(default)]
    c: f64,
}

fn one() -> f64 {
    1.0
}

impl From<RawBelief> for BeliefValue {
    fn from(raw: RawBelief) -> Self {
        BeliefValue::new(raw.s, raw.c)
    }
}

impl BeliefValue {
    /// Cria um novo valor de crença, limitando ambos os campos a `[0, 1]`.
    pub fn new(strength: f64, confidence: f64) -> Self {
        Self {
            s: unit(strength),
            c: unit(confidence),
        }
    }

    /// Força da crença, em `[0, 1]`.
    pub fn strength(&self) -> f64 {
        self.s
    }

    /// Confiança da crença, em `[0, 1]`.
    pub fn confidence(&self) -> f64 {
        self.c
    }
}

/// Crença padrão de um átomo recém-criado: `⟨1.00, 0.00⟩`.
///
/// Totalmente "verdadeiro", mas sem nenhuma evidência.
impl Default for BeliefValue {
    fn default() -> Self {
        Self::new(1.0, 0.0)
    }
}

impl fmt::Display for BeliefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "⟨{:.3}, {:.3}⟩", self.s, self.c)
    }
}

/// Valor de importância `(sti, lti)` — peso de atenção de um átomo.
///
/// O minerador de padrões usa `sti` (short-term importance) para
/// calcular o `attention_score` de cada padrão.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawImportance")]
pub struct ImportanceValue {
    sti: f64,
    lti: f64,
}

#[derive(Deserialize)]
struct RawImportance {
    #[serde(default)]
    sti: f64,
    #[serde(default)]
    lti: f64,
}

impl From<RawImportance> for ImportanceValue {
    fn from(raw: RawImportance) -> Self {
        ImportanceValue::new(raw.sti, raw.lti)
    }
}

impl ImportanceValue {
    /// Cria um novo valor de importância, limitando ambos os campos a `[0, 1]`.
    pub fn new(sti: f64, lti: f64) -> Self {
        Self {
            sti: unit(sti),
            lti: unit(lti),
        }
    }

    /// Importância de curto prazo.
    pub fn sti(&self) -> f64 {
        self.sti
    }

    /// Importância de longo prazo.
    pub fn lti(&self) -> f64 {
        self.lti
    }
}

impl fmt::Display for ImportanceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AV(sti={:.3}, lti={:.3})", self.sti, self.lti)
    }
}
