//! # Fusão N-ária
//!
//! Reduz uma lista de opiniões a uma única opinião, com quatro estratégias
//! intercambiáveis escolhidas por [`FusionType`].
//!
//! ## Pré-processamento
//!
//! 1. Lista vazia → opinião vácua
//! 2. Uma única opinião → devolvida sem alteração
//! 3. Alguma opinião dogmática (`u < ε`) → média das massas das opiniões
//!    dogmáticas; as não dogmáticas são ignoradas
//!
//! ## Estratégias
//!
//! Com `Πₖ = Πⱼ≠ₖ uⱼ` e `Π = Πⱼ uⱼ`:
//!
//! | Tipo | Massa `bᵢ` | Normalizador |
//! |------|------------|--------------|
//! | `Cumulative` | `Σₖ bₖ,ᵢ·Πₖ` | `ΣΠₖ − (n−1)·Π` |
//! | `Average` | `Σₖ bₖ,ᵢ·Πₖ` | `ΣΠₖ` |
//! | `Weighted` | `Σₖ bₖ,ᵢ(1−uₖ)·Πₖ` | `ΣΠₖ − n·Π` (≈ 0 → vácuo) |
//! | `BeliefConstraint` | `bc_fuse` sequencial | — |
//!
//! Para `n = 2` cada estratégia coincide com o operador binário
//! correspondente de [`OpinionNoBase`](crate::core::OpinionNoBase).
//!
//! O prior do resultado (para [`Opinion`](crate::core::Opinion)) é sempre a
//! média dos priors das entradas.
//!
//! ## Exemplo
//!
//! ```rust
//! use subjective_logic::core::OpinionNoBase;
//! use subjective_logic::multi_source::{Fusion, FusionType};
//!
//! let sources: [OpinionNoBase<2>; 3] = [
//!     OpinionNoBase::new_binomial(0.1, 0.3),
//!     OpinionNoBase::new_binomial(0.4, 0.2),
//!     OpinionNoBase::new_binomial(0.7, 0.1),
//! ];
//! let fused = Fusion::fuse_opinions(FusionType::Cumulative, &sources);
//! assert!((fused.belief() - 0.6511628).abs() < 1e-6);
//! ```

use num_traits::{Float, One};
use serde::{Deserialize, Serialize};

use crate::core::{SlFloat, SubjectiveOpinion};

use super::select;

/// Estratégia de fusão N-ária.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FusionType {
    /// Fontes independentes: a evidência se soma.
    Cumulative,
    /// Dempster normalizado, aplicado par a par.
    BeliefConstraint,
    /// Fontes dependentes: média ponderada pela incerteza.
    Average,
    /// Ponderada pela certeza de cada fonte.
    Weighted,
}

/// Operadores de fusão N-ária — struct sem estado.
pub struct Fusion;

impl Fusion {
    /// Funde todas as opiniões com a estratégia escolhida.
    pub fn fuse_opinions<O: SubjectiveOpinion>(fusion_type: FusionType, opinions: &[O]) -> O {
        tracing::debug!(fusion_type = ?fusion_type, sources = opinions.len(), "Fusão N-ária");

        if let Some(preprocessed) = Self::preprocess(opinions) {
            return preprocessed;
        }

        match fusion_type {
            FusionType::Cumulative => Self::product_fusion(opinions, ProductRule::Cumulative),
            FusionType::Average => Self::product_fusion(opinions, ProductRule::Average),
            FusionType::Weighted => Self::product_fusion(opinions, ProductRule::Weighted),
            FusionType::BeliefConstraint => Self::belief_constraint_fusion(opinions),
        }
    }

    /// Funde apenas as opiniões marcadas com `true` em `mask`.
    ///
    /// # Panics
    ///
    /// Se `mask.len() != opinions.len()`.
    pub fn fuse_opinions_masked<O: SubjectiveOpinion>(fusion_type: FusionType, opinions: &[O], mask: &[bool]) -> O {
        let selected = select(opinions, Some(mask));
        Self::fuse_opinions(fusion_type, &selected)
    }

    /// Trata lista vazia, entrada única e entradas dogmáticas.
    fn preprocess<O: SubjectiveOpinion>(opinions: &[O]) -> Option<O> {
        match opinions {
            [] => return Some(O::default()),
            [single] => return Some(single.clone()),
            _ => {}
        }

        let dogmatic: Vec<&O> = opinions.iter().filter(|op| op.is_dogmatic()).collect();
        if dogmatic.is_empty() {
            return None;
        }
        tracing::debug!(dogmatic = dogmatic.len(), "Entradas dogmáticas, usando a média");

        let count = O::Float::from_count(dogmatic.len());
        let mut out = O::default();
        for op in &dogmatic {
            for (acc, mass) in out.belief_masses_mut().iter_mut().zip(op.belief_masses()) {
                *acc += *mass / count;
            }
        }
        out.adopt_mean_prior(opinions);
        Some(out)
    }

    /// Estratégias baseadas no produto das incertezas das demais fontes.
    fn product_fusion<O: SubjectiveOpinion>(opinions: &[O], rule: ProductRule) -> O {
        let n = opinions.len();
        let one = O::Float::one();
        let uncertainties: Vec<O::Float> = opinions.iter().map(|op| op.uncertainty()).collect();
        let product: O::Float = uncertainties.iter().copied().fold(one, |acc, u| acc * u);

        // Πₖ calculado diretamente, sem dividir por uₖ
        let others: Vec<O::Float> = (0..n)
            .map(|k| {
                uncertainties
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != k)
                    .fold(one, |acc, (_, u)| acc * *u)
            })
            .collect();
        let others_sum: O::Float = others.iter().copied().sum();

        let denom = match rule {
            ProductRule::Cumulative => others_sum - O::Float::from_count(n - 1) * product,
            ProductRule::Average => others_sum,
            ProductRule::Weighted => others_sum - O::Float::from_count(n) * product,
        };

        let mut out = O::default();
        out.adopt_mean_prior(opinions);

        // só o WBF alcança este ponto com denominador nulo (todas vácuas)
        if denom.abs() < O::Float::EPS {
            return out;
        }

        for (k, op) in opinions.iter().enumerate() {
            let weight = match rule {
                ProductRule::Weighted => (one - uncertainties[k]) * others[k],
                ProductRule::Cumulative | ProductRule::Average => others[k],
            };
            for (acc, mass) in out.belief_masses_mut().iter_mut().zip(op.belief_masses()) {
                *acc += *mass * weight;
            }
        }
        for mass in out.belief_masses_mut() {
            *mass /= denom;
        }
        out
    }

    /// BC sequencial a partir da primeira opinião (operador comutativo).
    fn belief_constraint_fusion<O: SubjectiveOpinion>(opinions: &[O]) -> O {
        let (first, rest) = match opinions.split_first() {
            Some(split) => split,
            None => return O::default(),
        };
        let mut out = first.clone();
        for op in rest {
            out.bc_fuse_assign(op);
        }
        out.adopt_mean_prior(opinions);
        out
    }
}

#[derive(Debug, Clone, Copy)]
enum ProductRule {
    Cumulative,
    Average,
    Weighted,
}
