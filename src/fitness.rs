//! # Fitness — Contrato de Avaliação de Programas
//!
//! A busca evolutiva de programas fica fora deste crate; aqui está apenas
//! o contrato que ela consome: uma função de fitness
//! `(candidato, dados rotulados) → f64`, onde maior é melhor.
//!
//! Qualquer closure `Fn(&P, &LabeledDataset) -> f64` já é um
//! [`FitnessEvaluator`].
//!
//! ```
//! use atomspace_pln::fitness::{rank_candidates, LabeledDataset};
//! use serde_json::json;
//!
//! let data = LabeledDataset::new(
//!     vec![json!({"x": 1.0, "y": 2.0}), json!({"x": 2.0, "y": 4.0})],
//!     "y",
//! );
//! let scale = |k: &f64, d: &LabeledDataset| {
//!     d.accuracy(|row| row["x"].as_f64().map(|x| json!(x * k)))
//! };
//! let ranked = rank_candidates(&[1.0, 2.0, 3.0], &data, &scale);
//! assert_eq!(*ranked[0].0, 2.0);
//! ```

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tolerância para considerar uma previsão numérica correta.
const REGRESSION_TOLERANCE: f64 = 0.1;
/// Penalidade por nó de complexidade no score MDL.
const COMPLEXITY_PENALTY: f64 = 0.01;

/// Linhas de atribuições de variáveis, cada uma com o valor-alvo em
/// `target_key`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LabeledDataset {
    pub rows: Vec<Value>,
    pub target_key: String,
}

impl LabeledDataset {
    pub fn new(rows: Vec<Value>, target_key: impl Into<String>) -> Self {
        Self {
            rows,
            target_key: target_key.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Valor-alvo de uma linha, se presente.
    pub fn target<'a>(&self, row: &'a Value) -> Option<&'a Value> {
        row.get(&self.target_key)
    }

    /// Fração de linhas previstas corretamente.
    ///
    /// | Alvo | Critério |
    /// |------|----------|
    /// | booleano | veracidade da previsão igual ao alvo |
    /// | número | erro absoluto < 0.1 |
    /// | outro | igualdade |
    ///
    /// Previsão `None` (o candidato falhou) conta como erro.
    pub fn accuracy(&self, predict: impl Fn(&Value) -> Option<Value>) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        let correct = self
            .rows
            .iter()
            .filter(|&row| match (predict(row), self.target(row)) {
                (Some(predicted), Some(actual)) => matches(&predicted, actual),
                _ => false,
            })
            .count();
        correct as f64 / self.rows.len() as f64
    }
}

fn matches(predicted: &Value, actual: &Value) -> bool {
    match actual {
        Value::Bool(expected) => truthy(predicted) == *expected,
        Value::Number(n) => match (predicted.as_f64(), n.as_f64()) {
            (Some(p), Some(a)) => (p - a).abs() < REGRESSION_TOLERANCE,
            _ => false,
        },
        other => predicted == other,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Acurácia penalizada pela complexidade do candidato, nunca negativa.
pub fn mdl_score(accuracy: f64, complexity: usize) -> f64 {
    (accuracy - complexity as f64 * COMPLEXITY_PENALTY).max(0.0)
}

/// Avalia um candidato contra dados rotulados. Maior é melhor.
pub trait FitnessEvaluator<P: ?Sized> {
    fn evaluate(&self, candidate: &P, data: &LabeledDataset) -> f64;
}

impl<P: ?Sized, F> FitnessEvaluator<P> for F
where
    F: Fn(&P, &LabeledDataset) -> f64,
{
    fn evaluate(&self, candidate: &P, data: &LabeledDataset) -> f64 {
        self(candidate, data)
    }
}

/// Avalia todos os candidatos e os ordena por fitness decrescente.
///
/// Empates mantêm a ordem de entrada; NaN não reordena.
pub fn rank_candidates<'a, P, E>(
    candidates: &'a [P],
    data: &LabeledDataset,
    evaluator: &E,
) -> Vec<(&'a P, f64)>
where
    E: FitnessEvaluator<P> + ?Sized,
{
    let mut ranked: Vec<(&P, f64)> = candidates
        .iter()
        .map(|candidate| (candidate, evaluator.evaluate(candidate, data)))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    tracing::debug!(candidates = ranked.len(), best = ?ranked.first().map(|r| r.1), "Candidatos ranqueados");
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn xor_data() -> LabeledDataset {
        LabeledDataset::new(
            vec![
                json!({"a": false, "b": false, "out": false}),
                json!({"a": false, "b": true, "out": true}),
                json!({"a": true, "b": false, "out": true}),
                json!({"a": true, "b": true, "out": false}),
            ],
            "out",
        )
    }

    fn field(row: &Value, key: &str) -> bool {
        row[key].as_bool().unwrap_or(false)
    }

    #[test]
    fn test_boolean_accuracy() {
        let data = xor_data();
        let or = data.accuracy(|row| Some(json!(field(row, "a") || field(row, "b"))));
        assert!((or - 0.75).abs() < 1e-9);
        let xor = data.accuracy(|row| Some(json!(field(row, "a") != field(row, "b"))));
        assert_eq!(xor, 1.0);
    }

    #[test]
    fn test_regression_tolerance() {
        let data = LabeledDataset::new(vec![json!({"y": 1.0}), json!({"y": 2.0})], "y");
        assert_eq!(data.accuracy(|_| Some(json!(1.05))), 0.5);
    }

    #[test]
    fn test_failed_prediction_counts_as_wrong() {
        let data = xor_data();
        assert_eq!(data.accuracy(|_| None), 0.0);
        assert_eq!(LabeledDataset::default().accuracy(|_| Some(json!(true))), 0.0);
    }

    #[test]
    fn test_mdl_score_never_negative() {
        assert!((mdl_score(0.9, 10) - 0.8).abs() < 1e-9);
        assert_eq!(mdl_score(0.1, 50), 0.0);
    }

    #[test]
    fn test_closure_is_evaluator() {
        let data = xor_data();
        let constant = |value: &bool, d: &LabeledDataset| d.accuracy(|_| Some(json!(*value)));
        assert_eq!(constant.evaluate(&true, &data), 0.5);

        let ranked = rank_candidates(&[false, true], &data, &constant);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].1, 0.5);
        assert!(!*ranked[0].0);
    }
}
