//! # AtomSpace — Contêiner Central de Átomos
//!
//! O [`AtomSpace`] é o **dono exclusivo** de todos os átomos. Ele atribui
//! (ou aceita) ids, mantém os índices e resolve referências por id.
//!
//! ## Armazenamento
//!
//! - **Átomos**: `HashMap<AtomId, Atom>` — busca O(1) por id
//! - **Ordem de inserção**: `Vec<AtomId>` — iteração e exportação determinísticas
//! - **Índice de tipos**: `"kind:subtype"` → ids
//! - **Índice de nomes**: `name` → ids
//! - **Índice reverso**: id referenciado → ids dos Links que o referenciam
//!
//! Os índices só mudam através de [`add()`](AtomSpace::add),
//! [`remove()`](AtomSpace::remove) e [`clear()`](AtomSpace::clear), então
//! toda entrada de índice aponta para um átomo vivo. A única mutação
//! in-place exposta é [`set_belief()`](AtomSpace::set_belief), que não
//! toca em campos indexados.
//!
//! ## Referências Pendentes
//!
//! Links guardam ids, não átomos. [`outgoing()`](AtomSpace::outgoing) e
//! [`incoming()`](AtomSpace::incoming) omitem silenciosamente ids que não
//! resolvem.
//!
//! ## Exemplo
//!
//! ```rust
//! use atomspace_pln::core::{concept_node, inheritance_link, AtomSpace};
//!
//! let mut space = AtomSpace::new();
//! let gato = space.add(concept_node("Gato")).id.clone();
//! let animal = space.add(concept_node("Animal")).id.clone();
//! space.add(inheritance_link(&gato, &animal));
//!
//! let gato = space.get(&gato).unwrap();
//! assert_eq!(space.incoming(gato).len(), 1);
//! assert_eq!(space.size(), 3);
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::atom::{subtypes, type_key, Atom, AtomId, AtomKind};
use super::values::BeliefValue;
use crate::error::{Error, Result};

/// AtomSpace compartilhado entre componentes.
///
/// O AtomSpace em si não faz nenhum lock interno; quem compartilha é
/// responsável por serializar escritas e leituras concorrentes.
pub type SharedAtomSpace = Arc<RwLock<AtomSpace>>;

/// Formato de exportação do AtomSpace: `{atoms: [...], size}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub atoms: Vec<Atom>,
    #[serde(default)]
    pub size: usize,
}

/// Hipergrafo tipado em memória.
#[derive(Debug, Default)]
pub struct AtomSpace {
    atoms: HashMap<AtomId, Atom>,
    order: Vec<AtomId>,
    type_index: HashMap<String, Vec<AtomId>>,
    name_index: HashMap<String, Vec<AtomId>>,
    incoming_index: HashMap<AtomId, Vec<AtomId>>,
}

impl AtomSpace {
    /// Cria um AtomSpace vazio.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cria um [`SharedAtomSpace`] vazio.
    pub fn shared() -> SharedAtomSpace {
        Arc::new(RwLock::new(Self::new()))
    }

    /// Registra o átomo sob seu id e atualiza todos os índices.
    ///
    /// Se o id já existir, o átomo anterior é substituído e suas entradas
    /// de índice são removidas antes da reindexação, mantendo a posição
    /// original na ordem de inserção.
    pub fn add(&mut self, atom: Atom) -> &Atom {
        let id = atom.id.clone();
        if self.atoms.contains_key(&id) {
            self.unindex(&id);
        } else {
            self.order.push(id.clone());
        }
        self.index(&atom);
        tracing::debug!(id = %id, key = %atom.type_key(), "AtomSpace: átomo armazenado");
        self.atoms.insert(id.clone(), atom);
        &self.atoms[&id]
    }

    /// Remove o átomo e todas as suas entradas de índice.
    ///
    /// Links que apontavam para ele continuam existindo, agora com um id
    /// pendente.
    pub fn remove(&mut self, id: &str) -> Option<Atom> {
        if !self.atoms.contains_key(id) {
            return None;
        }
        self.unindex(id);
        self.order.retain(|other| other != id);
        tracing::debug!(id = %id, "AtomSpace: átomo removido");
        self.atoms.remove(id)
    }

    /// Busca O(1) por id. Id ausente retorna `None`, nunca erro.
    pub fn get(&self, id: &str) -> Option<&Atom> {
        self.atoms.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.atoms.contains_key(id)
    }

    /// Atualiza a crença de um átomo existente. Retorna `false` se o id
    /// não existir.
    pub fn set_belief(&mut self, id: &str, belief: BeliefValue) -> bool {
        match self.atoms.get_mut(id) {
            Some(atom) => {
                atom.belief = belief;
                true
            }
            None => false,
        }
    }

    /// Átomos com a chave exata `kind:subtype`.
    ///
    /// Sem `subtype`, retorna todos os átomos daquele `kind`: uma extensão
    /// deliberada da busca por chave exata, que nunca casaria um `kind`
    /// sozinho.
    pub fn by_type(&self, kind: AtomKind, subtype: Option<&str>) -> Vec<&Atom> {
        match subtype {
            Some(subtype) => self.resolve(self.type_index.get(&type_key(kind, subtype))),
            None => self.iter().filter(|atom| atom.kind == kind).collect(),
        }
    }

    /// Todos os átomos que compartilham o nome dado.
    pub fn by_name(&self, name: &str) -> Vec<&Atom> {
        self.resolve(self.name_index.get(name))
    }

    /// Resolve os ids de saída de um Link, na ordem, omitindo ids pendentes.
    pub fn outgoing(&self, link: &Atom) -> Vec<&Atom> {
        link.outgoing.iter().filter_map(|id| self.get(id)).collect()
    }

    /// Todos os Links cuja lista de saída contém o id do átomo, cada Link
    /// uma única vez (mesmo quando o referencia em várias posições).
    pub fn incoming(&self, atom: &Atom) -> Vec<&Atom> {
        self.resolve(self.incoming_index.get(&atom.id))
    }

    /// Itera os átomos em ordem de inserção.
    pub fn iter(&self) -> impl Iterator<Item = &Atom> {
        self.order.iter().filter_map(|id| self.atoms.get(id))
    }

    /// Links de implicação e herança — as regras usadas pelo encadeamento.
    pub fn implication_links(&self) -> impl Iterator<Item = &Atom> {
        self.iter().filter(|atom| {
            atom.is_link()
                && matches!(
                    atom.subtype.as_str(),
                    subtypes::IMPLICATION_LINK | subtypes::INHERITANCE_LINK
                )
        })
    }

    /// Número de átomos armazenados.
    pub fn size(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Remove todos os átomos e invalida todos os índices.
    pub fn clear(&mut self) {
        self.atoms.clear();
        self.order.clear();
        self.type_index.clear();
        self.name_index.clear();
        self.incoming_index.clear();
    }

    /// Exporta todos os átomos, em ordem de inserção.
    pub fn export(&self) -> StoreSnapshot {
        StoreSnapshot {
            atoms: self.iter().cloned().collect(),
            size: self.size(),
        }
    }

    /// Substitui todo o conteúdo pelo snapshot. Retorna o novo tamanho.
    pub fn import(&mut self, snapshot: StoreSnapshot) -> usize {
        self.clear();
        for atom in snapshot.atoms {
            self.add(atom);
        }
        tracing::info!(size = self.size(), "AtomSpace importado");
        self.size()
    }

    /// Importa um snapshot JSON.
    ///
    /// O documento inteiro é decodificado antes de qualquer alteração:
    /// um registro malformado deixa o AtomSpace intacto.
    pub fn import_json(&mut self, json: &str) -> Result<usize> {
        let snapshot: StoreSnapshot =
            serde_json::from_str(json).map_err(|e| Error::MalformedRecord(e.to_string()))?;
        Ok(self.import(snapshot))
    }

    /// Descrição legível, com nomes resolvidos para Links.
    ///
    /// Formato: `InheritanceLink(Gato, Animal) ⟨0.900, 0.850⟩`
    pub fn describe(&self, atom: &Atom) -> String {
        if !atom.is_link() {
            return atom.to_string();
        }
        let parts: Vec<&str> = atom
            .outgoing
            .iter()
            .map(|id| {
                self.get(id)
                    .and_then(|a| a.name.as_deref())
                    .unwrap_or(id.as_str())
            })
            .collect();
        format!("{}({}) {}", atom.subtype, parts.join(", "), atom.belief)
    }

    fn resolve(&self, ids: Option<&Vec<AtomId>>) -> Vec<&Atom> {
        ids.map(|ids| ids.iter().filter_map(|id| self.atoms.get(id)).collect())
            .unwrap_or_default()
    }

    fn index(&mut self, atom: &Atom) {
        self.type_index
            .entry(atom.type_key())
            .or_default()
            .push(atom.id.clone());
        if let Some(name) = &atom.name {
            self.name_index
                .entry(name.clone())
                .or_default()
                .push(atom.id.clone());
        }
        if atom.is_link() {
            for target in &atom.outgoing {
                let links = self.incoming_index.entry(target.clone()).or_default();
                if !links.contains(&atom.id) {
                    links.push(atom.id.clone());
                }
            }
        }
    }

    fn unindex(&mut self, id: &str) {
        let Some(atom) = self.atoms.get(id) else {
            return;
        };
        remove_from(&mut self.type_index, &atom.type_key(), id);
        if let Some(name) = &atom.name {
            remove_from(&mut self.name_index, name, id);
        }
        if atom.is_link() {
            for target in &atom.outgoing {
                remove_from(&mut self.incoming_index, target, id);
            }
        }
    }
}

fn remove_from(index: &mut HashMap<String, Vec<AtomId>>, key: &str, id: &str) {
    if let Some(ids) = index.get_mut(key) {
        ids.retain(|other| other != id);
        if ids.is_empty() {
            index.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::atom::{concept_node, inheritance_link, list_link, predicate_node};
    use crate::core::values::ImportanceValue;
    use serde_json::json;

    fn sample() -> (AtomSpace, AtomId, AtomId, AtomId) {
        let mut space = AtomSpace::new();
        let gato = space.add(concept_node("Gato")).id.clone();
        let mamifero = space.add(concept_node("Mamífero")).id.clone();
        let link = space.add(inheritance_link(&gato, &mamifero)).id.clone();
        (space, gato, mamifero, link)
    }

    #[test]
    fn test_add_and_lookup() {
        let (space, gato, _, link) = sample();
        assert_eq!(space.size(), 3);
        assert_eq!(space.get(&gato).unwrap().name.as_deref(), Some("Gato"));
        assert!(space.get("n:inexistente").is_none());
        assert_eq!(space.by_name("Gato").len(), 1);
        assert_eq!(
            space.by_type(AtomKind::Node, Some("ConceptNode")).len(),
            2
        );
        assert_eq!(space.by_type(AtomKind::Link, None)[0].id, link);
        assert!(space.by_type(AtomKind::Node, Some("NumberNode")).is_empty());
    }

    #[test]
    fn test_outgoing_skips_dangling_ids() {
        let (mut space, gato, _, _) = sample();
        let lista = list_link(&[gato.as_str(), "n:fantasma", gato.as_str()]);
        let lista = space.add(lista).clone();
        let out = space.outgoing(&lista);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|a| a.id == gato));
    }

    #[test]
    fn test_incoming_counts_each_link_once() {
        let (mut space, gato, mamifero, link) = sample();
        let repetido = space.add(list_link(&[&gato, &mamifero, &gato])).id.clone();

        let gato_atom = space.get(&gato).unwrap();
        let incoming: Vec<&str> = space.incoming(gato_atom).iter().map(|a| a.id.as_str()).collect();
        assert_eq!(incoming, vec![link.as_str(), repetido.as_str()]);
    }

    #[test]
    fn test_readd_replaces_index_entries() {
        let (mut space, gato, _, _) = sample();
        let renomeado = predicate_node("Felino").with_id(gato.clone());
        space.add(renomeado);

        assert_eq!(space.size(), 3);
        assert!(space.by_name("Gato").is_empty());
        assert_eq!(space.by_name("Felino").len(), 1);
        assert_eq!(space.by_type(AtomKind::Node, Some("ConceptNode")).len(), 1);
        assert_eq!(space.by_type(AtomKind::Node, Some("PredicateNode")).len(), 1);
    }

    #[test]
    fn test_remove_leaves_dangling_reference() {
        let (mut space, gato, mamifero, link) = sample();
        let removed = space.remove(&mamifero).unwrap();
        assert_eq!(removed.id, mamifero);
        assert!(space.by_name("Mamífero").is_empty());

        let link_atom = space.get(&link).unwrap();
        let out = space.outgoing(link_atom);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, gato);

        space.remove(&link);
        let gato_atom = space.get(&gato).unwrap();
        assert!(space.incoming(gato_atom).is_empty());
        assert!(space.remove(&link).is_none());
    }

    #[test]
    fn test_clear_drops_everything() {
        let (mut space, gato, _, _) = sample();
        space.clear();
        assert!(space.is_empty());
        assert!(space.get(&gato).is_none());
        assert!(space.by_name("Gato").is_empty());
        assert!(space.by_type(AtomKind::Link, Some("InheritanceLink")).is_empty());
    }

    #[test]
    fn test_export_import_round_trip() {
        let (mut space, gato, _, _) = sample();
        space.add(
            list_link(&[gato.as_str(), "n:fantasma", gato.as_str()])
                .with_belief(BeliefValue::new(0.3, 0.7))
                .with_importance(ImportanceValue::new(0.4, 0.2))
                .with_meta("fonte", json!({"doc": "a.txt", "linhas": [1, 2]})),
        );

        let json = serde_json::to_string(&space.export()).unwrap();
        let mut restored = AtomSpace::new();
        assert_eq!(restored.import_json(&json).unwrap(), 4);

        let original: Vec<&Atom> = space.iter().collect();
        let copia: Vec<&Atom> = restored.iter().collect();
        assert_eq!(original, copia);
    }

    #[test]
    fn test_malformed_import_keeps_store() {
        let (mut space, _, _, _) = sample();
        let json = r#"{"atoms": [{"kind": "Node", "subtype": "ConceptNode"}], "size": 1}"#;
        let err = space.import_json(json).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(_)));
        assert_eq!(space.size(), 3);
    }

    #[test]
    fn test_set_belief() {
        let (mut space, gato, _, _) = sample();
        assert!(space.set_belief(&gato, BeliefValue::new(0.2, 0.9)));
        assert_eq!(space.get(&gato).unwrap().belief, BeliefValue::new(0.2, 0.9));
        assert!(!space.set_belief("n:nada", BeliefValue::default()));
    }

    #[test]
    fn test_describe_resolves_names() {
        let (space, _, _, link) = sample();
        let desc = space.describe(space.get(&link).unwrap());
        assert!(desc.starts_with("InheritanceLink(Gato, Mamífero)"));
    }
}
