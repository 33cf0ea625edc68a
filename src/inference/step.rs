//! # InferenceStep — Registro de Auditoria
//!
//! Cada aplicação de regra produz um [`InferenceStep`] imutável, anexado
//! ao histórico do [`Reasoner`](super::Reasoner). O histórico nunca é
//! reescrito: só cresce ou é limpo por inteiro.
//!
//! Formato wire:
//!
//! ```text
//! {rule, premises: [{id, belief}], conclusion: {id}, tv_in?, tv_out, notes}
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Atom, AtomId, BeliefValue};

/// Regra de inferência aplicada.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InferenceRule {
    Deduction,
    Induction,
    Abduction,
    Revision,
}

impl InferenceRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            InferenceRule::Deduction => "deduction",
            InferenceRule::Induction => "induction",
            InferenceRule::Abduction => "abduction",
            InferenceRule::Revision => "revision",
        }
    }
}

impl fmt::Display for InferenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Premissa usada por uma regra: id do átomo + snapshot da crença no
/// momento do uso.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Premise {
    pub id: AtomId,
    pub belief: BeliefValue,
}

impl Premise {
    pub fn new(id: impl Into<AtomId>, belief: BeliefValue) -> Self {
        Self {
            id: id.into(),
            belief,
        }
    }
}

impl From<&Atom> for Premise {
    fn from(atom: &Atom) -> Self {
        Self::new(atom.id.clone(), atom.belief)
    }
}

/// Referência à conclusão de um passo.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Conclusion {
    pub id: AtomId,
}

/// Registro de uma aplicação de regra.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InferenceStep {
    pub rule: InferenceRule,
    pub premises: Vec<Premise>,
    pub conclusion: Conclusion,
    /// Crença de referência (baseline) das entradas, quando a regra define uma.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tv_in: Option<BeliefValue>,
    pub tv_out: BeliefValue,
    #[serde(default)]
    pub notes: String,
}

impl fmt::Display for InferenceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} → {}", self.rule.as_str().to_uppercase(), self.conclusion.id)?;
        for premise in &self.premises {
            writeln!(f, "  {}: {}", premise.id, premise.belief)?;
        }
        write!(f, "  resultado: {}", self.tv_out)?;
        if !self.notes.is_empty() {
            write!(f, " ({})", self.notes)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_step_wire_format() {
        let step = InferenceStep {
            rule: InferenceRule::Deduction,
            premises: vec![Premise::new("l:1", BeliefValue::new(0.5, 0.5))],
            conclusion: Conclusion { id: "n:b".into() },
            tv_in: None,
            tv_out: BeliefValue::new(0.25, 0.75),
            notes: String::new(),
        };
        let value = serde_json::to_value(&step).unwrap();
        assert_eq!(value["rule"], "deduction");
        assert_eq!(value["premises"][0], json!({"id": "l:1", "belief": {"s": 0.5, "c": 0.5}}));
        assert_eq!(value["conclusion"], json!({"id": "n:b"}));
        assert!(value.get("tv_in").is_none());
        assert_eq!(value["tv_out"], json!({"s": 0.25, "c": 0.75}));
    }
}
