//! # Encadeamento Sobre o AtomSpace
//!
//! Dois procedimentos de busca que usam os Links de implicação e herança
//! (`ImplicationLink`, `InheritanceLink`) como regras `antecedente ⇒ consequente`:
//!
//! - **Backward chaining**: parte de um alvo e procura regras que o concluam,
//!   provando o antecedente recursivamente. Retorna a **primeira**
//!   derivação encontrada, não a melhor.
//! - **Forward chaining**: aplica dedução a toda regra cujo antecedente é
//!   confiável, criando consequentes ausentes e melhorando os existentes,
//!   até um ponto fixo ou até esgotar o orçamento.
//!
//! ## Ponto Fixo em Duas Fases
//!
//! Cada passada do forward chaining primeiro **coleta** as derivações lendo
//! o AtomSpace e só depois **aplica** as escritas. Um átomo criado numa
//! passada só serve de antecedente na passada seguinte, então uma cadeia
//! `A ⇒ B ⇒ C ⇒ ...` avança um elo por passada:
//!
//! ```text
//! passada 1: A ⇒ B    cria B
//! passada 2: B ⇒ C    cria C
//! passada 3: (nada muda) → fim
//! ```

use serde_json::json;

use crate::core::{subtypes, Atom, AtomId, AtomSpace, BeliefValue};

use super::rules::Reasoner;
use super::step::Premise;

impl Reasoner {
    /// Procura evidência para `target`, com profundidade limitada por `budget`.
    ///
    /// 1. Se o AtomSpace já tem o alvo com confiança acima do limiar,
    ///    retorna essa crença.
    /// 2. Com orçamento restante, tenta cada regra com dois átomos de saída
    ///    resolvidos cujo consequente casa com o alvo por id ou por nome,
    ///    provando o antecedente com `budget - 1`.
    /// 3. O primeiro antecedente provado libera a regra: a dedução combina
    ///    a regra com a crença **armazenada** do antecedente (a prova só
    ///    decide se a regra se aplica).
    pub fn backward_chaining(
        &mut self,
        space: &AtomSpace,
        target: &Atom,
        budget: usize,
    ) -> Option<BeliefValue> {
        if let Some(existing) = space.get(&target.id) {
            if existing.belief.confidence() > self.config.confidence_threshold {
                return Some(existing.belief);
            }
        }
        if budget == 0 {
            return None;
        }

        for rule in space.implication_links() {
            let outgoing = space.outgoing(rule);
            let [antecedent, consequent] = outgoing.as_slice() else {
                continue;
            };
            let concludes_target = consequent.id == target.id
                || (consequent.name.is_some() && consequent.name == target.name);
            if !concludes_target {
                continue;
            }
            if self.backward_chaining(space, antecedent, budget - 1).is_some() {
                let (belief, _) = self.deduction_for(
                    &Premise::from(rule),
                    &Premise::from(*antecedent),
                    Some(&target.id),
                );
                tracing::debug!(target = %target.id, rule = %rule.id, belief = %belief, "Backward chaining: alvo provado");
                return Some(belief);
            }
        }
        None
    }

    /// Deriva novos fatos até um ponto fixo ou até `budget` passadas.
    ///
    /// Retorna apenas os átomos **criados**, no estado final (com melhorias
    /// de passadas posteriores); consequentes já existentes cuja confiança
    /// melhorou são atualizados in-place mas não contam.
    pub fn forward_chaining(&mut self, space: &mut AtomSpace, budget: usize) -> Vec<Atom> {
        let threshold = self.config.confidence_threshold;
        let mut derived: Vec<AtomId> = Vec::new();

        for pass in 0..budget {
            let candidates: Vec<(Premise, Premise, AtomId)> = space
                .implication_links()
                .filter_map(|rule| {
                    let [antecedent_id, consequent_id] = rule.outgoing.as_slice() else {
                        return None;
                    };
                    let antecedent = space.get(antecedent_id)?;
                    (antecedent.belief.confidence() > threshold).then(|| {
                        (Premise::from(rule), Premise::from(antecedent), consequent_id.clone())
                    })
                })
                .collect();

            let mut changed = false;
            for (rule, antecedent, consequent_id) in candidates {
                let (belief, _) = self.deduction_for(&rule, &antecedent, Some(&consequent_id));
                match space.get(&consequent_id).map(|atom| atom.belief.confidence()) {
                    Some(current) if belief.confidence() > current => {
                        space.set_belief(&consequent_id, belief);
                        changed = true;
                    }
                    Some(_) => {}
                    None => {
                        let atom = derived_atom(consequent_id, belief, &rule.id);
                        tracing::info!(id = %atom.id, belief = %belief, "Forward chaining: novo átomo derivado");
                        derived.push(space.add(atom).id.clone());
                        changed = true;
                    }
                }
            }

            tracing::debug!(pass, changed, derived = derived.len(), "Forward chaining: passada concluída");
            if !changed {
                break;
            }
        }
        derived
            .iter()
            .filter_map(|id| space.get(id).cloned())
            .collect()
    }
}

/// Consequente que ainda não existia no AtomSpace.
///
/// Só o id é conhecido (vem da regra), então o átomo nasce como
/// `ConceptNode` sem nome, com metadados de proveniência.
fn derived_atom(id: AtomId, belief: BeliefValue, rule_id: &str) -> Atom {
    Atom::node(subtypes::CONCEPT_NODE, "")
        .with_id(id)
        .with_belief(belief)
        .with_meta("derived_by", json!("forward_chaining"))
        .with_meta("rule", json!(rule_id))
        .with_meta("derived_at", json!(chrono::Utc::now().to_rfc3339()))
}
