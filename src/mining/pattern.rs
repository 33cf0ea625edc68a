//! # Padrões e Matches
//!
//! Registros produzidos pelo [`PatternMiner`](super::PatternMiner). Não
//! pertencem ao AtomSpace: quem chama é dono deles.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::MinerConfig;
use crate::core::{Atom, AtomId};

/// Pesos da combinação linear de interessância:
/// support, confidence, lift, mdl_gain, attention_score.
const INTERESTINGNESS_WEIGHTS: [f64; 5] = [0.3, 0.25, 0.2, 0.15, 0.1];

/// Homomorfismo parcial: id do átomo-template → id do átomo casado.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SubgraphMatch {
    pub pattern_id: String,
    pub atom_mappings: BTreeMap<AtomId, AtomId>,
    #[serde(default)]
    pub support_score: f64,
}

/// Padrão de subgrafo descoberto.
///
/// `support` conta colisões de assinatura durante o crescimento, não
/// matches estruturais verificados.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SubgraphPattern {
    pub id: String,
    /// Átomos-template, na ordem em que o padrão cresceu.
    pub atoms: Vec<Atom>,
    #[serde(default)]
    pub support: usize,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub lift: f64,
    #[serde(default)]
    pub mdl_gain: f64,
    #[serde(default)]
    pub attention_score: f64,
    #[serde(default)]
    pub matches: Vec<SubgraphMatch>,
}

impl SubgraphPattern {
    /// Número de átomos-template.
    pub fn size(&self) -> usize {
        self.atoms.len()
    }

    /// Assinatura canônica: chaves `kind:subtype` ordenadas, unidas por `|`.
    pub fn signature(&self) -> String {
        signature(self.atoms.iter().map(Atom::type_key))
    }

    /// Interessância: combinação linear fixa das cinco métricas.
    pub fn interestingness(&self) -> f64 {
        let [w_support, w_confidence, w_lift, w_mdl, w_attention] = INTERESTINGNESS_WEIGHTS;
        w_support * self.support as f64
            + w_confidence * self.confidence
            + w_lift * self.lift
            + w_mdl * self.mdl_gain
            + w_attention * self.attention_score
    }
}

impl fmt::Display for SubgraphPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} átomos)", self.id, self.size())?;
        for atom in &self.atoms {
            writeln!(f, "  {}", atom)?;
        }
        write!(
            f,
            "  support={} confidence={:.3} lift={:.3} mdl_gain={:.1} bits attention={:.3} matches={}",
            self.support,
            self.confidence,
            self.lift,
            self.mdl_gain,
            self.attention_score,
            self.matches.len()
        )
    }
}

pub(crate) fn signature(keys: impl Iterator<Item = String>) -> String {
    let mut keys: Vec<String> = keys.collect();
    keys.sort();
    keys.join("|")
}

/// Parâmetros de mineração incluídos na exportação.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MiningParams {
    pub min_support: usize,
    pub min_confidence: f64,
    pub use_attention: bool,
}

impl From<&MinerConfig> for MiningParams {
    fn from(config: &MinerConfig) -> Self {
        Self {
            min_support: config.min_support,
            min_confidence: config.min_confidence,
            use_attention: config.use_attention,
        }
    }
}

/// Exportação dos padrões: `{patterns: [...], mining_params: {...}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatternReport {
    pub patterns: Vec<SubgraphPattern>,
    pub mining_params: MiningParams,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{concept_node, inheritance_link};

    #[test]
    fn test_signature_ignores_order() {
        let a = concept_node("A");
        let link = inheritance_link("n:a", "n:b");
        let p1 = SubgraphPattern {
            atoms: vec![a.clone(), link.clone()],
            ..Default::default()
        };
        let p2 = SubgraphPattern {
            atoms: vec![link, a],
            ..Default::default()
        };
        assert_eq!(p1.signature(), p2.signature());
        assert_eq!(p1.signature(), "Link:InheritanceLink|Node:ConceptNode");
    }

    #[test]
    fn test_interestingness_weights() {
        let p = SubgraphPattern {
            support: 10,
            confidence: 1.0,
            lift: 2.0,
            mdl_gain: 4.0,
            attention_score: 0.5,
            ..Default::default()
        };
        let expected = 3.0 + 0.25 + 0.4 + 0.6 + 0.05;
        assert!((p.interestingness() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_match_wire_format() {
        let m = SubgraphMatch {
            pattern_id: "p".into(),
            atom_mappings: BTreeMap::from([("t".to_string(), "n:x".to_string())]),
            support_score: 1.0,
        };
        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(value["atom_mappings"]["t"], "n:x");
        assert_eq!(value["support_score"], 1.0);
    }
}
