//! # Módulo Inference — Raciocínio PLN
//!
//! Deriva e revisa crenças sobre o [`AtomSpace`](crate::core::AtomSpace).
//!
//! ## Componentes
//!
//! | Item | Papel |
//! |------|-------|
//! | [`deduce`], [`induce`], [`abduce`], [`revise`] | Regras puras sobre [`BeliefValue`](crate::core::BeliefValue) |
//! | [`Reasoner`] | Aplica as regras e mantém o histórico de [`InferenceStep`] |
//! | [`Reasoner::forward_chaining`] | Ponto fixo que cria/melhora consequentes |
//! | [`Reasoner::backward_chaining`] | Busca recursiva por evidência de um alvo |
//!
//! O `Reasoner` não guarda referência ao AtomSpace: ele é passado a cada
//! chamada de encadeamento, e só o forward chaining o modifica.

/// Registros de auditoria.
pub mod step;

/// Regras de inferência e o [`Reasoner`].
pub mod rules;

/// Forward e backward chaining.
pub mod chaining;

pub use rules::{abduce, deduce, induce, revise, Reasoner};
pub use step::{Conclusion, InferenceRule, InferenceStep, Premise};
