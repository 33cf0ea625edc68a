//! # PatternMiner — Mineração de Subgrafos Frequentes
//!
//! Heurística em níveis (não é isomorfismo exato):
//!
//! ```text
//! nível 1   agrupa átomos por kind:subtype  → padrões de 1 átomo
//! nível k+1 para cada match, átomos conectados → padrão + 1 átomo
//!           dedup por assinatura (colisão = support + 1)
//!           poda por min_support
//! final     confidence, lift, mdl_gain, attention_score
//!           filtro por min_confidence, ordenação por interessância
//! ```
//!
//! ## Átomos Conectados
//!
//! Para cada átomo casado: suas saídas (se for Link), os Links que o
//! referenciam e os demais átomos de saída desses Links.
//!
//! ## Matches dos Padrões Estendidos
//!
//! O match estendido copia o mapeamento do match de origem e adiciona
//! `template → átomo conectado`, sem sobrescrever uma chave existente.
//!
//! O átomo-template acrescentado recebe um id posicional
//! `{pattern_id}#{k}`, mesmo quando o átomo conectado já é um dos
//! templates anteriores (ex: `A` voltando pela saída de `A → B`). Assim
//! cada posição do template tem sua própria chave e o mapeamento fica
//! completo sempre que o átomo conectado existe.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::MinerConfig;
use crate::core::{Atom, AtomId, AtomSpace};

use super::pattern::{signature, PatternReport, SubgraphMatch, SubgraphPattern};

/// Bits para codificar um átomo no modelo MDL.
const ATOM_BITS: f64 = 8.0;
/// Bits de uma referência a um padrão no modelo MDL.
const PATTERN_REF_BITS: f64 = 4.0;

/// Minerador de padrões. Só lê o AtomSpace.
#[derive(Debug, Default)]
pub struct PatternMiner {
    config: MinerConfig,
    discovered: Vec<SubgraphPattern>,
}

impl PatternMiner {
    pub fn new(config: MinerConfig) -> Self {
        Self {
            config,
            discovered: Vec::new(),
        }
    }

    pub fn config(&self) -> &MinerConfig {
        &self.config
    }

    /// Executa a mineração completa e retorna os padrões ordenados por
    /// interessância decrescente.
    ///
    /// Só o último nível de crescimento é pontuado e reportado.
    pub fn mine(&mut self, space: &AtomSpace) -> &[SubgraphPattern] {
        self.discovered.clear();

        let mut current = self.seed_patterns(space);
        tracing::debug!(level = 1, patterns = current.len(), "Mineração: sementes");

        for level in 2..=self.config.max_pattern_size {
            current = current
                .iter()
                .flat_map(|pattern| self.extend_pattern(space, pattern))
                .filter(|pattern| pattern.support >= self.config.min_support)
                .collect();
            tracing::debug!(level, patterns = current.len(), "Mineração: nível crescido");
        }

        let total_atoms = space.size();
        for mut pattern in current {
            self.score(space, &mut pattern, total_atoms);
            if pattern.confidence >= self.config.min_confidence {
                self.discovered.push(pattern);
            }
        }
        self.discovered.sort_by(|a, b| {
            b.interestingness()
                .partial_cmp(&a.interestingness())
                .unwrap_or(Ordering::Equal)
        });

        tracing::info!(patterns = self.discovered.len(), "Mineração concluída");
        &self.discovered
    }

    /// Padrões da última mineração (ou carregados via [`load_report`](Self::load_report)).
    pub fn discovered(&self) -> &[SubgraphPattern] {
        &self.discovered
    }

    /// Os `n` padrões mais interessantes.
    pub fn top_patterns(&self, n: usize) -> &[SubgraphPattern] {
        &self.discovered[..n.min(self.discovered.len())]
    }

    /// Matcher leve de um único template: casa cada átomo do AtomSpace
    /// contra o **primeiro** átomo do padrão por `(kind, subtype)`.
    ///
    /// Não faz casamento estrutural.
    pub fn find_pattern_matches(
        &self,
        space: &AtomSpace,
        pattern: &SubgraphPattern,
    ) -> Vec<SubgraphMatch> {
        let Some(template) = pattern.atoms.first() else {
            return Vec::new();
        };
        space
            .iter()
            .filter(|atom| atom.kind == template.kind && atom.subtype == template.subtype)
            .map(|atom| SubgraphMatch {
                pattern_id: pattern.id.clone(),
                atom_mappings: BTreeMap::from([(template.id.clone(), atom.id.clone())]),
                support_score: 0.0,
            })
            .collect()
    }

    /// Exportação dos padrões descobertos junto com os parâmetros.
    pub fn report(&self) -> PatternReport {
        PatternReport {
            patterns: self.discovered.clone(),
            mining_params: (&self.config).into(),
        }
    }

    /// Substitui os padrões descobertos pelos do relatório e adota seus
    /// parâmetros de mineração.
    pub fn load_report(&mut self, report: PatternReport) {
        self.config.min_support = report.mining_params.min_support;
        self.config.min_confidence = report.mining_params.min_confidence;
        self.config.use_attention = report.mining_params.use_attention;
        self.discovered = report.patterns;
    }

    fn seed_patterns(&self, space: &AtomSpace) -> Vec<SubgraphPattern> {
        let mut groups: Vec<(String, Vec<&Atom>)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for atom in space.iter() {
            let key = atom.type_key();
            match positions.get(&key) {
                Some(&i) => groups[i].1.push(atom),
                None => {
                    positions.insert(key.clone(), groups.len());
                    groups.push((key, vec![atom]));
                }
            }
        }

        groups
            .into_iter()
            .enumerate()
            .filter(|(_, (_, atoms))| atoms.len() >= self.config.min_support)
            .map(|(i, (key, atoms))| {
                let template = atoms[0].clone();
                let id = format!("pattern_{}_{}", key, i);
                let matches = atoms
                    .iter()
                    .map(|atom| SubgraphMatch {
                        pattern_id: id.clone(),
                        atom_mappings: BTreeMap::from([(template.id.clone(), atom.id.clone())]),
                        support_score: 0.0,
                    })
                    .collect();
                SubgraphPattern {
                    id,
                    atoms: vec![template],
                    support: atoms.len(),
                    matches,
                    ..Default::default()
                }
            })
            .collect()
    }

    fn extend_pattern(&self, space: &AtomSpace, pattern: &SubgraphPattern) -> Vec<SubgraphPattern> {
        let mut extended: Vec<SubgraphPattern> = Vec::new();
        let mut by_signature: HashMap<String, usize> = HashMap::new();

        for parent in &pattern.matches {
            for atom in connected_atoms(space, parent) {
                let key = signature(
                    pattern
                        .atoms
                        .iter()
                        .map(Atom::type_key)
                        .chain(std::iter::once(atom.type_key())),
                );
                match by_signature.get(&key) {
                    Some(&i) => {
                        let kept = &mut extended[i];
                        kept.support += 1;
                        let template_id = kept.atoms[kept.atoms.len() - 1].id.clone();
                        let m = extended_match(&kept.id, parent, template_id, &atom.id);
                        kept.matches.push(m);
                    }
                    None => {
                        let id = format!("extended_{}_{}", pattern.id, atom.id);
                        let template = atom.clone().with_id(format!("{}#{}", id, pattern.size()));
                        let m = extended_match(&id, parent, template.id.clone(), &atom.id);
                        let mut atoms = pattern.atoms.clone();
                        atoms.push(template);
                        by_signature.insert(key, extended.len());
                        extended.push(SubgraphPattern {
                            id,
                            atoms,
                            support: 1,
                            matches: vec![m],
                            ..Default::default()
                        });
                    }
                }
            }
        }
        extended
    }

    fn score(&self, space: &AtomSpace, pattern: &mut SubgraphPattern, total_atoms: usize) {
        let size = pattern.size();
        for m in &mut pattern.matches {
            m.support_score = if size == 0 {
                0.0
            } else {
                (m.atom_mappings.len() as f64 / size as f64).min(1.0)
            };
        }
        pattern.confidence = confidence(pattern);
        pattern.lift = lift(pattern.support, size, total_atoms);
        pattern.mdl_gain = mdl_gain(pattern.support, size);
        if self.config.use_attention {
            pattern.attention_score = attention_score(space, pattern);
        }
    }
}

/// Átomos conectados aos átomos casados por `m`, sem repetição.
fn connected_atoms<'a>(space: &'a AtomSpace, m: &SubgraphMatch) -> Vec<&'a Atom> {
    let mut seen: HashSet<&'a str> = HashSet::new();
    let mut connected = Vec::new();
    let mut push = |atom: &'a Atom| {
        if seen.insert(atom.id.as_str()) {
            connected.push(atom);
        }
    };

    for actual_id in m.atom_mappings.values() {
        let Some(atom) = space.get(actual_id) else {
            continue;
        };
        if atom.is_link() {
            for target in space.outgoing(atom) {
                push(target);
            }
        }
        for link in space.incoming(atom) {
            push(link);
            for peer in space.outgoing(link) {
                if peer.id != atom.id {
                    push(peer);
                }
            }
        }
    }
    connected
}

fn extended_match(
    pattern_id: &str,
    parent: &SubgraphMatch,
    template_id: AtomId,
    atom_id: &str,
) -> SubgraphMatch {
    let mut atom_mappings = parent.atom_mappings.clone();
    atom_mappings
        .entry(template_id)
        .or_insert_with(|| atom_id.to_string());
    SubgraphMatch {
        pattern_id: pattern_id.to_string(),
        atom_mappings,
        support_score: 0.0,
    }
}

/// Fração de matches com mapeamento completo template → átomo.
fn confidence(pattern: &SubgraphPattern) -> f64 {
    if pattern.matches.is_empty() {
        return 0.0;
    }
    let complete = pattern
        .matches
        .iter()
        .filter(|m| m.atom_mappings.len() == pattern.size())
        .count();
    complete as f64 / pattern.matches.len() as f64
}

/// Frequência observada sobre a esperada ao acaso, `(1/N)^(k−1)`.
fn lift(support: usize, size: usize, total_atoms: usize) -> f64 {
    if support == 0 || total_atoms == 0 {
        return 0.0;
    }
    let total = total_atoms as f64;
    let expected_random = (1.0 / total).powi(size.saturating_sub(1) as i32);
    let actual = support as f64 / total;
    if expected_random > 0.0 {
        actual / expected_random
    } else {
        1.0
    }
}

/// Bits economizados: `support·k·8 − (k·8 + support·4)`.
fn mdl_gain(support: usize, size: usize) -> f64 {
    let pattern_bits = size as f64 * ATOM_BITS;
    let matches_bits = support as f64 * pattern_bits;
    let reference_bits = support as f64 * PATTERN_REF_BITS;
    matches_bits - (pattern_bits + reference_bits)
}

/// STI médio de todos os átomos casados, em todos os matches.
fn attention_score(space: &AtomSpace, pattern: &SubgraphPattern) -> f64 {
    let stis: Vec<f64> = pattern
        .matches
        .iter()
        .flat_map(|m| m.atom_mappings.values())
        .filter_map(|id| space.get(id))
        .map(|atom| atom.importance.sti())
        .collect();
    if stis.is_empty() {
        0.0
    } else {
        stis.iter().sum::<f64>() / stis.len() as f64
    }
}
