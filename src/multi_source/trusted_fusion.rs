//! # Fusão Confiável — Revisão → Desconto → Fusão
//!
//! Orquestra os demais operadores multi-fonte:
//!
//! 1. para cada [`WeightedRevision`], calcula os fatores de revisão da lista
//!    inteira e acumula `Σ peso · fatorᵢ` por fonte;
//! 2. revisa a confiança de cada fonte pelo fator combinado;
//! 3. desconta cada opinião pela confiança revisada;
//! 4. funde as opiniões descontadas com o [`FusionType`] pedido.
//!
//! Uma lista vazia de revisões pula os passos 1 e 2.
//!
//! ## Exemplo
//!
//! ```rust
//! use subjective_logic::core::{Opinion, Trust, TrustedOpinion};
//! use subjective_logic::multi_source::{ConflictType, FusionType, TrustRevisionType, TrustedFusion};
//!
//! let fontes = vec![
//!     TrustedOpinion::new(Trust::new_binomial(0.8, 0.0), Opinion::new_binomial(0.9, 0.0)),
//!     TrustedOpinion::new(Trust::new_binomial(0.8, 0.0), Opinion::new_binomial(0.8, 0.1)),
//!     TrustedOpinion::new(Trust::new_binomial(0.8, 0.0), Opinion::new_binomial(0.0, 0.9)),
//! ];
//!
//! let fundida = TrustedFusion::fuse_with_revision(
//!     FusionType::Cumulative,
//!     TrustRevisionType::ReferenceFusion,
//!     ConflictType::BeliefAverage,
//!     &fontes,
//! )
//! .unwrap();
//! assert!(fundida.is_valid());
//! ```

use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::core::{SlFloat, SubjectiveOpinion, TrustedOpinion};
use crate::error::SlError;

use super::conflict::ConflictType;
use super::fusion::{Fusion, FusionType};
use super::select;
use super::trust_revision::{TrustRevision, TrustRevisionType};

/// Uma estratégia de revisão com seu peso na combinação.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedRevision {
    pub revision: TrustRevisionType,
    pub conflict: ConflictType,
    pub weight: f64,
}

impl WeightedRevision {
    pub fn new(revision: TrustRevisionType, conflict: ConflictType, weight: f64) -> Self {
        Self { revision, conflict, weight }
    }

    /// Estratégia única, com peso `1`.
    pub fn unit(revision: TrustRevisionType, conflict: ConflictType) -> Self {
        Self::new(revision, conflict, 1.0)
    }
}

/// Fusão de opiniões de fontes com confiança — struct sem estado.
pub struct TrustedFusion;

impl TrustedFusion {
    /// Fusão com revisões ponderadas, sem alterar a lista do chamador.
    ///
    /// # Erros
    ///
    /// Propaga [`SlError::NoBeliefFusionType`] de uma revisão por fusão de
    /// referência mal configurada.
    pub fn fuse_opinions<O: SubjectiveOpinion>(
        fusion_type: FusionType,
        revisions: &[WeightedRevision],
        trusted_opinions: &[TrustedOpinion<O>],
    ) -> Result<O, SlError> {
        let factors = Self::combined_factors(revisions, trusted_opinions)?;

        let discounted: Vec<O> = trusted_opinions
            .iter()
            .zip(factors)
            .map(|(top, factor)| top.revise_trust(factor).discounted_opinion())
            .collect();

        Ok(Fusion::fuse_opinions(fusion_type, &discounted))
    }

    /// Como [`TrustedFusion::fuse_opinions`], mas grava a confiança revisada
    /// em cada elemento de `trusted_opinions`.
    pub fn fuse_opinions_assign<O: SubjectiveOpinion>(
        fusion_type: FusionType,
        revisions: &[WeightedRevision],
        trusted_opinions: &mut [TrustedOpinion<O>],
    ) -> Result<O, SlError> {
        let factors = Self::combined_factors(revisions, trusted_opinions)?;

        let discounted: Vec<O> = trusted_opinions
            .iter_mut()
            .zip(factors)
            .map(|(top, factor)| {
                top.revise_trust_assign(factor);
                top.discounted_opinion()
            })
            .collect();

        Ok(Fusion::fuse_opinions(fusion_type, &discounted))
    }

    /// Fusão confiável restrita às fontes marcadas em `mask`.
    ///
    /// # Panics
    ///
    /// Se a máscara tiver tamanho diferente da lista.
    pub fn fuse_opinions_masked<O: SubjectiveOpinion>(
        fusion_type: FusionType,
        revisions: &[WeightedRevision],
        trusted_opinions: &[TrustedOpinion<O>],
        mask: &[bool],
    ) -> Result<O, SlError> {
        let selected = select(trusted_opinions, Some(mask));
        Self::fuse_opinions(fusion_type, revisions, &selected)
    }

    /// Atalho para uma única estratégia de revisão com peso `1`.
    pub fn fuse_with_revision<O: SubjectiveOpinion>(
        fusion_type: FusionType,
        revision: TrustRevisionType,
        conflict: ConflictType,
        trusted_opinions: &[TrustedOpinion<O>],
    ) -> Result<O, SlError> {
        Self::fuse_opinions(fusion_type, &[WeightedRevision::unit(revision, conflict)], trusted_opinions)
    }

    pub fn fuse_with_revision_assign<O: SubjectiveOpinion>(
        fusion_type: FusionType,
        revision: TrustRevisionType,
        conflict: ConflictType,
        trusted_opinions: &mut [TrustedOpinion<O>],
    ) -> Result<O, SlError> {
        Self::fuse_opinions_assign(fusion_type, &[WeightedRevision::unit(revision, conflict)], trusted_opinions)
    }

    /// Fusão das opiniões descontadas, sem revisão de confiança.
    pub fn fuse_without_revision<O: SubjectiveOpinion>(
        fusion_type: FusionType,
        trusted_opinions: &[TrustedOpinion<O>],
    ) -> O {
        let discounted = TrustedOpinion::extract_discounted_opinions(trusted_opinions);
        Fusion::fuse_opinions(fusion_type, &discounted)
    }

    /// `Σ peso · fatorᵢ` sobre todas as estratégias.
    fn combined_factors<O: SubjectiveOpinion>(
        revisions: &[WeightedRevision],
        trusted_opinions: &[TrustedOpinion<O>],
    ) -> Result<Vec<O::Float>, SlError> {
        let mut combined = vec![O::Float::zero(); trusted_opinions.len()];

        for revision in revisions {
            let weight = O::Float::from_f64_lossy(revision.weight);
            let factors = TrustRevision::revision_factors(revision.revision, revision.conflict, trusted_opinions)?;
            for (total, factor) in combined.iter_mut().zip(factors) {
                *total += weight * factor;
            }
        }

        Ok(combined)
    }
}
