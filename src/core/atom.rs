//! # Atom — Unidade do Hipergrafo
//!
//! Um [`Atom`] é a entidade básica do hipergrafo tipado. Em vez de uma
//! hierarquia de classes (Atom → Node → ConceptNode ...), cada átomo é um
//! **registro com variante**: um [`AtomKind`] (`Node` ou `Link`) mais um
//! `subtype` aberto (`"ConceptNode"`, `"InheritanceLink"`, ...).
//!
//! ## Nodes e Links
//!
//! | Kind | Possui | Exemplo |
//! |------|--------|---------|
//! | `Node` | `name` | `ConceptNode("Gato")` |
//! | `Link` | lista ordenada `outgoing` de ids | `InheritanceLink(Gato, Mamífero)` |
//!
//! Os ids em `outgoing` são **referências fracas**: o [`AtomSpace`](super::AtomSpace)
//! é o único dono dos átomos, e um id pode ficar pendente (dangling) se o
//! átomo referenciado for removido. Toda travessia tolera ids pendentes.
//!
//! ## Construção
//!
//! Átomos são criados por funções livres, sem subclasses:
//!
//! ```rust
//! use atomspace_pln::core::{concept_node, inheritance_link, BeliefValue};
//!
//! let gato = concept_node("Gato").with_belief(BeliefValue::new(0.9, 0.8));
//! let mamifero = concept_node("Mamífero");
//! let heranca = inheritance_link(&gato.id, &mamifero.id);
//! assert_eq!(heranca.outgoing, vec![gato.id.clone(), mamifero.id.clone()]);
//! ```
//!
//! ## Formato Wire
//!
//! ```text
//! {id, kind: "Node"|"Link", subtype, name?, belief:{s,c}, importance:{sti,lti}, meta?, out?}
//! ```
//!
//! `out` só aparece em Links. Um `kind` desconhecido na importação vira
//! [`AtomKind::Generic`] em vez de falhar; um registro sem `id` é
//! [`Error::MalformedRecord`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::values::{BeliefValue, ImportanceValue};
use crate::error::Error;

/// Identificador de um átomo — único dentro de um [`AtomSpace`](super::AtomSpace).
pub type AtomId = String;

/// Subtipos conhecidos. O campo `subtype` continua aberto a qualquer string.
pub mod subtypes {
    pub const CONCEPT_NODE: &str = "ConceptNode";
    pub const PREDICATE_NODE: &str = "PredicateNode";
    pub const NUMBER_NODE: &str = "NumberNode";
    pub const INHERITANCE_LINK: &str = "InheritanceLink";
    pub const IMPLICATION_LINK: &str = "ImplicationLink";
    pub const EVALUATION_LINK: &str = "EvaluationLink";
    pub const LIST_LINK: &str = "ListLink";
}

/// Variante estrutural de um átomo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AtomKind {
    /// Símbolo atômico com nome.
    Node,
    /// Hiperaresta ordenada sobre outros átomos.
    Link,
    /// Reconstrução genérica de um registro com `kind` desconhecido.
    #[serde(rename = "Atom")]
    Generic,
}

impl AtomKind {
    /// Nome usado no formato wire e nas chaves do índice de tipos.
    pub fn as_str(&self) -> &'static str {
        match self {
            AtomKind::Node => "Node",
            AtomKind::Link => "Link",
            AtomKind::Generic => "Atom",
        }
    }

    /// Interpreta o `kind` de um registro; qualquer valor desconhecido
    /// cai em [`AtomKind::Generic`].
    pub fn parse(kind: &str) -> Self {
        match kind {
            "Node" => AtomKind::Node,
            "Link" => AtomKind::Link,
            _ => AtomKind::Generic,
        }
    }
}

impl fmt::Display for AtomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entidade do hipergrafo: Node, Link ou átomo genérico.
///
/// Serializa e desserializa no formato wire através de [`AtomRecord`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "AtomRecord", try_from = "AtomRecord")]
pub struct Atom {
    /// Id estável (`n:<uuid>` para nodes, `l:<uuid>` para links por padrão).
    pub id: AtomId,
    /// Variante estrutural.
    pub kind: AtomKind,
    /// Discriminador aberto (`"ConceptNode"`, `"ImplicationLink"`, ...).
    pub subtype: String,
    /// Nome — presente em Nodes, usado pelo índice de nomes.
    pub name: Option<String>,
    /// Crença atual.
    pub belief: BeliefValue,
    /// Importância (atenção).
    pub importance: ImportanceValue,
    /// Metadados livres.
    pub meta: BTreeMap<String, serde_json::Value>,
    /// Ids referenciados, em ordem. Vazio para átomos que não são Links.
    pub outgoing: Vec<AtomId>,
}

impl Atom {
    fn bare(id: AtomId, kind: AtomKind, subtype: &str) -> Self {
        Self {
            id,
            kind,
            subtype: subtype.to_string(),
            name: None,
            belief: BeliefValue::default(),
            importance: ImportanceValue::default(),
            meta: BTreeMap::new(),
            outgoing: Vec::new(),
        }
    }

    /// Cria um Node com id `n:<uuid>`. Nome vazio é tratado como ausente.
    pub fn node(subtype: &str, name: &str) -> Self {
        let mut atom = Self::bare(format!("n:{}", Uuid::new_v4()), AtomKind::Node, subtype);
        atom.name = non_empty(name);
        atom
    }

    /// Cria um Link com id `l:<uuid>` sobre os ids dados, preservando a ordem.
    pub fn link<I, S>(subtype: &str, outgoing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<AtomId>,
    {
        let mut atom = Self::bare(format!("l:{}", Uuid::new_v4()), AtomKind::Link, subtype);
        atom.outgoing = outgoing.into_iter().map(Into::into).collect();
        atom
    }

    /// Cria um átomo genérico (nem Node nem Link).
    pub fn generic(subtype: &str) -> Self {
        Self::bare(Uuid::new_v4().to_string(), AtomKind::Generic, subtype)
    }

    /// Substitui o id gerado. O id é usado como está, sem prefixo.
    pub fn with_id(mut self, id: impl Into<AtomId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_belief(mut self, belief: BeliefValue) -> Self {
        self.belief = belief;
        self
    }

    pub fn with_importance(mut self, importance: ImportanceValue) -> Self {
        self.importance = importance;
        self
    }

    pub fn with_meta(mut self, key: &str, value: serde_json::Value) -> Self {
        self.meta.insert(key.to_string(), value);
        self
    }

    /// Chave do índice de tipos: `kind:subtype` (ex: `Node:ConceptNode`).
    pub fn type_key(&self) -> String {
        type_key(self.kind, &self.subtype)
    }

    pub fn is_link(&self) -> bool {
        self.kind == AtomKind::Link
    }

    pub fn is_node(&self) -> bool {
        self.kind == AtomKind::Node
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_link() {
            write!(f, "{}({}) {}", self.subtype, self.outgoing.join(", "), self.belief)
        } else {
            let label = self.name.as_deref().unwrap_or(&self.id);
            write!(f, "{}({}) {}", self.subtype, label, self.belief)
        }
    }
}

pub(crate) fn type_key(kind: AtomKind, subtype: &str) -> String {
    format!("{}:{}", kind.as_str(), subtype)
}

fn non_empty(name: &str) -> Option<String> {
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

// ─── Construtores livres ─────────────────────────────────────────

/// `ConceptNode(name)` — representa um conceito.
pub fn concept_node(name: &str) -> Atom {
    Atom::node(subtypes::CONCEPT_NODE, name)
}

/// `PredicateNode(name)` — representa uma relação/predicado.
pub fn predicate_node(name: &str) -> Atom {
    Atom::node(subtypes::PREDICATE_NODE, name)
}

/// `NumberNode(value)` — o valor numérico vira o nome do node.
pub fn number_node(value: f64) -> Atom {
    Atom::node(subtypes::NUMBER_NODE, &value.to_string())
}

/// `InheritanceLink(source, target)` — "source é um target".
pub fn inheritance_link(source: &str, target: &str) -> Atom {
    Atom::link(subtypes::INHERITANCE_LINK, [source, target])
}

/// `ImplicationLink(antecedent, consequent)` — "antecedent ⇒ consequent".
pub fn implication_link(antecedent: &str, consequent: &str) -> Atom {
    Atom::link(subtypes::IMPLICATION_LINK, [antecedent, consequent])
}

/// `EvaluationLink(predicate, arguments)`.
pub fn evaluation_link(predicate: &str, arguments: &str) -> Atom {
    Atom::link(subtypes::EVALUATION_LINK, [predicate, arguments])
}

/// `ListLink(items...)` — lista ordenada de átomos.
pub fn list_link<S: AsRef<str>>(items: &[S]) -> Atom {
    Atom::link(subtypes::LIST_LINK, items.iter().map(|s| s.as_ref().to_string()))
}

// ─── Formato wire ────────────────────────────────────────────────

/// Registro wire de um átomo.
///
/// `id` é opcional apenas na leitura: a conversão para [`Atom`] rejeita
/// registros sem id com [`Error::MalformedRecord`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AtomRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AtomId>,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub subtype: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub belief: BeliefValue,
    #[serde(default)]
    pub importance: ImportanceValue,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out: Option<Vec<AtomId>>,
}

impl From<Atom> for AtomRecord {
    fn from(atom: Atom) -> Self {
        let out = atom.is_link().then_some(atom.outgoing);
        Self {
            id: Some(atom.id),
            kind: atom.kind.as_str().to_string(),
            subtype: atom.subtype,
            name: atom.name,
            belief: atom.belief,
            importance: atom.importance,
            meta: atom.meta,
            out,
        }
    }
}

impl TryFrom<AtomRecord> for Atom {
    type Error = Error;

    fn try_from(record: AtomRecord) -> Result<Self, Self::Error> {
        let id = record
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::MalformedRecord("registro de átomo sem `id`".to_string()))?;
        let kind = AtomKind::parse(&record.kind);
        let outgoing = match kind {
            AtomKind::Link => record.out.unwrap_or_default(),
            _ => Vec::new(),
        };
        Ok(Self {
            id,
            kind,
            subtype: record.subtype,
            name: record.name.filter(|n| !n.is_empty()),
            belief: record.belief,
            importance: record.importance,
            meta: record.meta,
            outgoing,
        })
    }
}
