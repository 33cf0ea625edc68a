//! # Módulo Core — Hipergrafo Tipado
//!
//! Tipos fundamentais sobre os quais o motor de inferência e o minerador
//! de padrões operam:
//!
//! - [`BeliefValue`] — crença `(strength, confidence)`
//! - [`ImportanceValue`] — atenção `(sti, lti)`
//! - [`Atom`] / [`AtomKind`] — Node, Link ou átomo genérico
//! - [`AtomSpace`] — contêiner dono de todos os átomos, com índices
//!
//! ## Propriedade
//!
//! ```text
//! AtomSpace ──possui──▶ Atom (Node)
//!     │                   ▲
//!     └──possui──▶ Atom (Link) ──id──┘   (referência fraca)
//! ```
//!
//! Um átomo só passa a pertencer ao AtomSpace depois de
//! [`AtomSpace::add`]; Links referenciam outros átomos apenas por id.

/// Crença e importância.
pub mod values;

/// Átomos, construtores livres e formato wire.
pub mod atom;

/// O contêiner [`AtomSpace`].
pub mod atom_space;

pub use atom::{
    concept_node, evaluation_link, implication_link, inheritance_link, list_link, number_node,
    predicate_node, subtypes, Atom, AtomId, AtomKind, AtomRecord,
};
pub use atom_space::{AtomSpace, SharedAtomSpace, StoreSnapshot};
pub use values::{noisy_or, BeliefValue, ImportanceValue};
