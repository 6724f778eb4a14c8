//! # Módulo Multi-Source — Fusão, Conflito e Revisão de Confiança
//!
//! Operadores que combinam **mais de duas** opiniões de uma vez. O fluxo
//! completo de [`TrustedFusion`] compõe todos os outros:
//!
//! ```text
//! TrustedFusion
//!   ├── TrustRevision ── Conflict ── Fusion (referência)
//!   ├── desconto pela confiança revisada
//!   └── Fusion (resultado final)
//! ```
//!
//! | Operador | Entrada | Saída |
//! |----------|---------|-------|
//! | [`Fusion`] | lista de opiniões | opinião fundida |
//! | [`Conflict`] | lista de opiniões | escalar de conflito/harmonia |
//! | [`TrustRevision`] | lista de `TrustedOpinion` | fator de revisão por fonte |
//! | [`TrustedFusion`] | lista de `TrustedOpinion` | opinião fundida |
//!
//! Todos são structs sem estado; as funções recebem fatias emprestadas e
//! nunca alteram a lista do chamador, exceto as variantes `_assign`.
//!
//! ## Máscaras de seleção
//!
//! As variantes `_masked` recebem uma máscara `&[bool]` paralela à lista:
//! `true` mantém o elemento. Sem máscara a fatia original é usada sem cópia.

use std::borrow::Cow;

/// Sub-módulo com a fusão N-ária.
pub mod fusion;

/// Sub-módulo com as medidas de conflito e harmonia.
pub mod conflict;

/// Sub-módulo com as estratégias de revisão de confiança.
pub mod trust_revision;

/// Sub-módulo com a orquestração revisão → desconto → fusão.
pub mod trusted_fusion;

// Re-exports para conveniência — permite usar `crate::multi_source::Fusion` diretamente.
pub use conflict::{Conflict, ConflictType, RelationType};
pub use fusion::{Fusion, FusionType};
pub use trust_revision::{TrustRevision, TrustRevisionType};
pub use trusted_fusion::{TrustedFusion, WeightedRevision};

/// Seleciona os elementos marcados em `mask`.
///
/// # Panics
///
/// Se a máscara tiver tamanho diferente da lista.
pub(crate) fn select<'a, T: Clone>(items: &'a [T], mask: Option<&[bool]>) -> Cow<'a, [T]> {
    match mask {
        None => Cow::Borrowed(items),
        Some(mask) => {
            assert_eq!(items.len(), mask.len(), "máscara e lista com tamanhos diferentes");
            Cow::Owned(
                items
                    .iter()
                    .zip(mask.iter())
                    .filter(|(_, keep)| **keep)
                    .map(|(item, _)| item.clone())
                    .collect(),
            )
        }
    }
}
