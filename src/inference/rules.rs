//! # Regras de Inferência PLN
//!
//! Quatro regras pontuais de combinação de crenças. As funções livres
//! ([`deduce`], [`induce`], [`abduce`], [`revise`]) são puras; os métodos
//! do [`Reasoner`] as envolvem e anexam um [`InferenceStep`] ao histórico.
//!
//! | Regra | Padrão | Strength | Confidence |
//! |-------|--------|----------|------------|
//! | **Dedução** | A⇒B, A ⊢ B | `s1 × s2` | noisy-OR |
//! | **Indução** | pares (A, B) ⊢ A⇒B | `positivos / total` | `min(0.6, √n / (√n + 10))` |
//! | **Abdução** | A⇒B, B ⊢ A | `s_B × s_A⇒B × λ` | noisy-OR |
//! | **Revisão** | B₁, B₂ ⊢ B | média ponderada por `c / (1 − c + ε)` | noisy-OR |
//!
//! ## Exemplo
//!
//! ```rust
//! use atomspace_pln::core::BeliefValue;
//! use atomspace_pln::inference::{Premise, Reasoner};
//!
//! let mut reasoner = Reasoner::default();
//! let (b, _) = reasoner.deduction(
//!     &Premise::new("l:chuva-molha", BeliefValue::new(0.5, 0.5)),
//!     &Premise::new("n:chuva", BeliefValue::new(0.5, 0.5)),
//! );
//! assert!((b.strength() - 0.25).abs() < 1e-9);
//! assert!((b.confidence() - 0.75).abs() < 1e-9);
//! assert_eq!(reasoner.history().len(), 1);
//! ```

use serde_json::Value;

use crate::config::ReasonerConfig;
use crate::core::{noisy_or, BeliefValue};
use crate::error::{Error, Result};

use super::step::{Conclusion, InferenceRule, InferenceStep, Premise};

/// Teto de confiança da indução: nunca alcança o nível dedutivo.
const INDUCTION_CONFIDENCE_CAP: f64 = 0.6;

/// Dedução: `s = s1 × s2`, `c = 1 − (1 − c1)(1 − c2)`.
pub fn deduce(implication: BeliefValue, antecedent: BeliefValue) -> BeliefValue {
    BeliefValue::new(
        implication.strength() * antecedent.strength(),
        noisy_or(implication.confidence(), antecedent.confidence()),
    )
}

/// Indução a partir de pares observados `(A, B)`.
///
/// Um par é positivo quando ambas as forças passam de 0.5. `sample_size`
/// assume o número de pares quando ausente.
///
/// # Erros
///
/// [`Error::EmptyEvidence`] se não houver observações.
pub fn induce(
    observations: &[(BeliefValue, BeliefValue)],
    sample_size: Option<usize>,
) -> Result<BeliefValue> {
    if observations.is_empty() {
        return Err(Error::EmptyEvidence);
    }
    let total = observations.len();
    let positive = positive_cases(observations.iter().copied());
    let n = sample_size.unwrap_or(total) as f64;
    let confidence = INDUCTION_CONFIDENCE_CAP.min(n.sqrt() / (n.sqrt() + 10.0));
    Ok(BeliefValue::new(positive as f64 / total as f64, confidence))
}

/// Abdução: `s = s_cons × s_impl × penalty`, confiança noisy-OR.
pub fn abduce(implication: BeliefValue, consequent: BeliefValue, penalty: f64) -> BeliefValue {
    BeliefValue::new(
        consequent.strength() * implication.strength() * penalty,
        noisy_or(implication.confidence(), consequent.confidence()),
    )
}

/// Revisão de duas crenças independentes sobre a mesma proposição.
///
/// A força é a média ponderada por `w = c / (1 − c + ε)`; se ambos os
/// pesos forem zero, cai na média simples.
pub fn revise(first: BeliefValue, second: BeliefValue, epsilon: f64) -> BeliefValue {
    let w1 = revision_weight(first, epsilon);
    let w2 = revision_weight(second, epsilon);
    let strength = if w1 + w2 > 0.0 {
        (w1 * first.strength() + w2 * second.strength()) / (w1 + w2)
    } else {
        (first.strength() + second.strength()) / 2.0
    };
    BeliefValue::new(strength, noisy_or(first.confidence(), second.confidence()))
}

fn revision_weight(belief: BeliefValue, epsilon: f64) -> f64 {
    belief.confidence() / (1.0 - belief.confidence() + epsilon)
}

fn positive_cases(observations: impl Iterator<Item = (BeliefValue, BeliefValue)>) -> usize {
    observations
        .filter(|(a, b)| a.strength() > 0.5 && b.strength() > 0.5)
        .count()
}

/// Motor de inferência com histórico de auditoria.
///
/// As regras não dependem de estado; o único estado é o histórico
/// (`history`), que cresce sem limite até [`clear_history()`](Reasoner::clear_history).
#[derive(Debug, Default)]
pub struct Reasoner {
    pub(super) config: ReasonerConfig,
    history: Vec<InferenceStep>,
}

impl Reasoner {
    pub fn new(config: ReasonerConfig) -> Self {
        Self {
            config,
            history: Vec::new(),
        }
    }

    pub fn config(&self) -> &ReasonerConfig {
        &self.config
    }

    /// Dedução: de `A ⇒ B` e `A`, infere `B`.
    pub fn deduction(
        &mut self,
        implication: &Premise,
        antecedent: &Premise,
    ) -> (BeliefValue, InferenceStep) {
        self.deduction_for(implication, antecedent, None)
    }

    /// Dedução com id de conclusão explícito (usado pelo encadeamento).
    pub(super) fn deduction_for(
        &mut self,
        implication: &Premise,
        antecedent: &Premise,
        conclusion: Option<&str>,
    ) -> (BeliefValue, InferenceStep) {
        let belief = deduce(implication.belief, antecedent.belief);
        let step = InferenceStep {
            rule: InferenceRule::Deduction,
            premises: vec![implication.clone(), antecedent.clone()],
            conclusion: self.conclusion(InferenceRule::Deduction, conclusion),
            tv_in: None,
            tv_out: belief,
            notes: "dedução: s = s1·s2, c = 1 − (1 − c1)(1 − c2)".to_string(),
        };
        (belief, self.record(step))
    }

    /// Indução sobre pares observados `(A, B)`.
    ///
    /// # Erros
    ///
    /// [`Error::EmptyEvidence`] se `observations` estiver vazio; nada é
    /// anexado ao histórico nesse caso.
    pub fn induction(
        &mut self,
        observations: &[(Premise, Premise)],
        sample_size: Option<usize>,
    ) -> Result<(BeliefValue, InferenceStep)> {
        let beliefs: Vec<(BeliefValue, BeliefValue)> = observations
            .iter()
            .map(|(a, b)| (a.belief, b.belief))
            .collect();
        let belief = induce(&beliefs, sample_size)?;
        let positive = positive_cases(beliefs.iter().copied());
        let step = InferenceStep {
            rule: InferenceRule::Induction,
            premises: observations
                .iter()
                .flat_map(|(a, b)| [a.clone(), b.clone()])
                .collect(),
            conclusion: self.conclusion(InferenceRule::Induction, None),
            tv_in: None,
            tv_out: belief,
            notes: format!(
                "indução a partir de {} observações, {} casos positivos",
                observations.len(),
                positive
            ),
        };
        Ok((belief, self.record(step)))
    }

    /// Abdução com a penalidade configurada (`abduction_penalty`).
    pub fn abduction(
        &mut self,
        implication: &Premise,
        consequent: &Premise,
    ) -> (BeliefValue, InferenceStep) {
        let penalty = self.config.abduction_penalty;
        self.abduction_with_penalty(implication, consequent, penalty)
    }

    /// Abdução: de `A ⇒ B` e `B`, formula a hipótese `A`.
    pub fn abduction_with_penalty(
        &mut self,
        implication: &Premise,
        consequent: &Premise,
        penalty: f64,
    ) -> (BeliefValue, InferenceStep) {
        let belief = abduce(implication.belief, consequent.belief, penalty);
        let step = InferenceStep {
            rule: InferenceRule::Abduction,
            premises: vec![implication.clone(), consequent.clone()],
            conclusion: self.conclusion(InferenceRule::Abduction, None),
            tv_in: None,
            tv_out: belief,
            notes: format!("abdução com penalidade λ={}", penalty),
        };
        (belief, self.record(step))
    }

    /// Revisão de duas crenças sobre a mesma proposição.
    ///
    /// `atom_id`, quando dado, identifica premissas e conclusão; `tv_in`
    /// registra a média das forças com a menor confiança como baseline.
    pub fn revision(
        &mut self,
        first: BeliefValue,
        second: BeliefValue,
        atom_id: Option<&str>,
    ) -> (BeliefValue, InferenceStep) {
        let epsilon = self.config.epsilon;
        let belief = revise(first, second, epsilon);
        let (w1, w2) = (revision_weight(first, epsilon), revision_weight(second, epsilon));
        let step = InferenceStep {
            rule: InferenceRule::Revision,
            premises: vec![
                Premise::new(atom_id.unwrap_or("evidence1"), first),
                Premise::new(atom_id.unwrap_or("evidence2"), second),
            ],
            conclusion: self.conclusion(InferenceRule::Revision, atom_id),
            tv_in: Some(BeliefValue::new(
                (first.strength() + second.strength()) / 2.0,
                first.confidence().min(second.confidence()),
            )),
            tv_out: belief,
            notes: format!("revisão: pesos w1={:.3}, w2={:.3}", w1, w2),
        };
        (belief, self.record(step))
    }

    /// Histórico completo, em ordem de aplicação.
    pub fn history(&self) -> &[InferenceStep] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Trace exportável: um registro JSON por passo, em ordem de aplicação.
    ///
    /// Cada elemento tem a forma
    /// `{rule, premises: [{id, belief}], conclusion: {id}, tv_in?, tv_out, notes}`.
    pub fn trace(&self) -> Vec<Value> {
        self.history
            .iter()
            .filter_map(|step| serde_json::to_value(step).ok())
            .collect()
    }

    /// Trace legível de todo o histórico, um passo numerado por bloco.
    pub fn trace_text(&self) -> String {
        self.history
            .iter()
            .enumerate()
            .map(|(i, step)| format!("Passo {}: {}", i + 1, step))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn conclusion(&self, rule: InferenceRule, id: Option<&str>) -> Conclusion {
        let id = match id {
            Some(id) => id.to_string(),
            None => format!("{}_result_{}", rule, self.history.len()),
        };
        Conclusion { id }
    }

    fn record(&mut self, step: InferenceStep) -> InferenceStep {
        tracing::debug!(
            rule = %step.rule,
            conclusion = %step.conclusion.id,
            tv_out = %step.tv_out,
            "Inferência registrada"
        );
        self.history.push(step.clone());
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: &str, s: f64, c: f64) -> Premise {
        Premise::new(id, BeliefValue::new(s, c))
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_deduction_identity() {
        let b = deduce(BeliefValue::new(1.0, 1.0), BeliefValue::new(1.0, 1.0));
        assert_eq!(b, BeliefValue::new(1.0, 1.0));
    }

    #[test]
    fn test_deduction_halves() {
        let mut reasoner = Reasoner::default();
        let (b, step) = reasoner.deduction(&p("l:ab", 0.5, 0.5), &p("n:a", 0.5, 0.5));
        assert!(close(b.strength(), 0.25));
        assert!(close(b.confidence(), 0.75));
        assert_eq!(step.rule, InferenceRule::Deduction);
        assert_eq!(step.premises.len(), 2);
        assert_eq!(step.conclusion.id, "deduction_result_0");
    }

    /// A revisão fica mais perto da entrada de maior confiança
    #[test]
    fn test_revision_prefers_confident_input() {
        let mut reasoner = Reasoner::default();
        let (b, step) =
            reasoner.revision(BeliefValue::new(0.7, 0.6), BeliefValue::new(0.8, 0.5), None);
        assert!(close(b.confidence(), 1.0 - 0.4 * 0.5));
        assert!(b.strength() > 0.7 && b.strength() < 0.8);
        assert!(b.strength() - 0.7 < 0.8 - b.strength());

        let tv_in = step.tv_in.unwrap();
        assert!(close(tv_in.strength(), 0.75));
        assert!(close(tv_in.confidence(), 0.5));
        assert_eq!(step.premises[0].id, "evidence1");
    }

    #[test]
    fn test_revision_zero_weights_falls_back_to_mean() {
        let b = revise(BeliefValue::new(0.2, 0.0), BeliefValue::new(0.6, 0.0), 1e-6);
        assert!(close(b.strength(), 0.4));
        assert_eq!(b.confidence(), 0.0);
    }

    #[test]
    fn test_revision_full_confidence_is_guarded() {
        let b = revise(BeliefValue::new(0.9, 1.0), BeliefValue::new(0.1, 1.0), 1e-6);
        assert!(b.strength().is_finite());
        assert!(close(b.strength(), 0.5));
    }

    #[test]
    fn test_induction_empty_fails() {
        let mut reasoner = Reasoner::default();
        let err = reasoner.induction(&[], None).unwrap_err();
        assert!(matches!(err, Error::EmptyEvidence));
        assert!(reasoner.history().is_empty());
    }

    #[test]
    fn test_induction_counts_positive_pairs() {
        let mut reasoner = Reasoner::default();
        let obs = vec![
            (p("n:a1", 0.9, 0.5), p("n:b1", 0.8, 0.5)),
            (p("n:a2", 0.9, 0.5), p("n:b2", 0.3, 0.5)),
            (p("n:a3", 0.6, 0.5), p("n:b3", 0.7, 0.5)),
            (p("n:a4", 0.5, 0.5), p("n:b4", 0.9, 0.5)),
        ];
        let (b, step) = reasoner.induction(&obs, None).unwrap();
        assert!(close(b.strength(), 0.5));
        assert!(close(b.confidence(), 2.0 / 12.0));
        assert_eq!(step.premises.len(), 8);
    }

    #[test]
    fn test_induction_confidence_is_capped() {
        let obs = [(BeliefValue::new(0.9, 0.9), BeliefValue::new(0.9, 0.9))];
        let b = induce(&obs, Some(1_000_000)).unwrap();
        assert!(close(b.confidence(), 0.6));
        assert_eq!(b.strength(), 1.0);
    }

    #[test]
    fn test_abduction_applies_penalty() {
        let mut reasoner = Reasoner::default();
        let (b, step) = reasoner.abduction(&p("l:ab", 0.8, 0.5), &p("n:b", 0.5, 0.5));
        assert!(close(b.strength(), 0.2));
        assert!(close(b.confidence(), 0.75));
        assert!(step.notes.contains("0.5"));

        let (b, _) = reasoner.abduction_with_penalty(&p("l:ab", 0.8, 0.5), &p("n:b", 0.5, 0.5), 1.0);
        assert!(close(b.strength(), 0.4));
    }

    #[test]
    fn test_history_is_append_only() {
        let mut reasoner = Reasoner::default();
        reasoner.deduction(&p("l:1", 0.9, 0.9), &p("n:1", 0.9, 0.9));
        reasoner.revision(BeliefValue::new(0.5, 0.5), BeliefValue::new(0.5, 0.5), Some("n:x"));
        assert_eq!(reasoner.history().len(), 2);
        assert_eq!(reasoner.history()[1].conclusion.id, "n:x");
        assert!(reasoner.trace_text().contains("Passo 2: REVISION"));

        reasoner.clear_history();
        assert!(reasoner.history().is_empty());
        assert!(reasoner.trace().is_empty());
    }

    /// O trace JSON segue o formato dos registros de passo.
    #[test]
    fn test_trace_is_json_records() {
        let mut reasoner = Reasoner::default();
        reasoner.deduction(&p("l:ab", 0.8, 0.5), &p("n:a", 0.9, 0.9));
        reasoner.revision(BeliefValue::new(0.4, 0.2), BeliefValue::new(0.6, 0.4), None);

        let trace = reasoner.trace();
        assert_eq!(trace.len(), 2);

        let deduction = &trace[0];
        assert_eq!(deduction["rule"], "deduction");
        assert_eq!(deduction["premises"][0]["id"], "l:ab");
        assert_eq!(deduction["premises"][1]["belief"]["s"], 0.9);
        assert!(deduction["conclusion"]["id"].is_string());
        assert!(deduction.get("tv_in").is_none());
        assert!(deduction["tv_out"]["c"].is_number());
        assert!(deduction["notes"].is_string());

        let revision = &trace[1];
        assert_eq!(revision["rule"], "revision");
        assert_eq!(revision["premises"][0]["id"], "evidence1");
        assert_eq!(revision["premises"][1]["id"], "evidence2");
        assert!((revision["tv_in"]["s"].as_f64().unwrap() - 0.5).abs() < 1e-9);
        assert_eq!(revision["tv_in"]["c"], 0.2);
    }
}
