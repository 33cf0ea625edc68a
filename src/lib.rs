//! # AtomSpace + PLN — Hipergrafo Tipado com Raciocínio Probabilístico
//!
//! Armazém em memória de átomos (nós e links) com valores de incerteza,
//! e dois algoritmos sobre ele:
//!
//! 1. **Raciocínio PLN**: deduz, induz, abduz e revisa crenças, com
//!    forward e backward chaining sobre regras de implicação/herança
//! 2. **Mineração de padrões**: descobre subgrafos frequentes e os
//!    ranqueia por interessância
//!
//! ## Arquitetura
//!
//! ```text
//! core::values      BeliefValue ⟨s, c⟩, ImportanceValue (sti, lti)
//!      │
//! core::atom        Atom (Node | Link), construtores
//!      │
//! core::atom_space  AtomSpace: índices, consultas, export/import JSON
//!      │
//!      ├── inference   Reasoner (muta o AtomSpace no forward chaining)
//!      └── mining      PatternMiner (só lê)
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```
//! use atomspace_pln::core::{concept_node, inheritance_link, AtomSpace, BeliefValue};
//! use atomspace_pln::inference::Reasoner;
//!
//! let mut space = AtomSpace::new();
//! let cat = space.add(concept_node("gato").with_belief(BeliefValue::new(0.9, 0.9))).id.clone();
//! let animal = space.add(concept_node("animal")).id.clone();
//! space.add(inheritance_link(&cat, &animal).with_belief(BeliefValue::new(0.95, 0.8)));
//!
//! let mut reasoner = Reasoner::default();
//! reasoner.forward_chaining(&mut space, 5);
//! assert!(space.get(&animal).unwrap().belief.confidence() > 0.9);
//! ```
//!
//! ## Logging
//!
//! Todos os módulos emitem eventos `tracing`; chame
//! [`logging::init_tracing`] para vê-los (`RUST_LOG=debug` para detalhes).

/// Módulo `core` — valores, átomos e o AtomSpace.
pub mod core;

/// Configuração do raciocinador e do minerador.
pub mod config;

/// Erros do crate.
pub mod error;

/// Módulo `inference` — regras PLN e encadeamento.
pub mod inference;

/// Módulo `mining` — padrões de subgrafos frequentes.
pub mod mining;

/// Salvamento e carregamento em JSON.
pub mod persistence;

/// Inicialização do subscriber de tracing.
pub mod logging;

/// Contrato de fitness consumido pela busca de programas.
pub mod fitness;

pub use error::{Error, Result};
