//! # Revisão de Confiança — Fatores por Fonte
//!
//! Calcula um **fator de revisão com sinal** para cada fonte de uma lista de
//! [`TrustedOpinion`]. Fatores positivos empurram a confiança para a
//! descrença; negativos, para a crença (ver `Trust::revise_trust`).
//!
//! | Estratégia | Fator da fonte `i` |
//! |------------|--------------------|
//! | `Normal` | `u_diffᵢ(confiança) · conflito(descontadas)` |
//! | `ConflictShares` | `conflito · parcelaᵢ`, parcelas negativas zeradas |
//! | `ReferenceFusion` | `max · (cᵢ − média) / (max − média)` se `cᵢ > média`, senão `0` |
//!
//! As variantes `Harmony*` medem harmonia no lugar de conflito e invertem o
//! sinal do fator; as `*AllowNegative` mantêm parcelas negativas.
//!
//! ## Parcelas sempre pela média
//!
//! As parcelas são calculadas com `ConflictType::Average` sobre as opiniões
//! **brutas**. Quando outro tipo é pedido, apenas a magnitude é recalculada
//! com ele, sobre as opiniões descontadas.
//!
//! ## Fusão de referência
//!
//! A referência é a fusão das opiniões **descontadas** com o tipo de fusão
//! associado ao tipo de conflito (`Belief*`); a distância de cada fonte é
//! medida a partir das opiniões **brutas**.

use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::core::{SlFloat, SubjectiveOpinion, TrustedOpinion};
use crate::error::SlError;

use super::conflict::{Conflict, ConflictType, RelationType};
use super::fusion::Fusion;
use super::select;

/// Estratégia de revisão de confiança.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrustRevisionType {
    Normal,
    HarmonyNormal,
    ConflictShares,
    ConflictSharesAllowNegative,
    HarmonyShares,
    HarmonySharesAllowNegative,
    ReferenceFusion,
    HarmonyReferenceFusion,
}

impl TrustRevisionType {
    /// Relação medida pela estratégia.
    pub fn relation(self) -> RelationType {
        match self {
            TrustRevisionType::Normal
            | TrustRevisionType::ConflictShares
            | TrustRevisionType::ConflictSharesAllowNegative
            | TrustRevisionType::ReferenceFusion => RelationType::Conflict,
            TrustRevisionType::HarmonyNormal
            | TrustRevisionType::HarmonyShares
            | TrustRevisionType::HarmonySharesAllowNegative
            | TrustRevisionType::HarmonyReferenceFusion => RelationType::Harmony,
        }
    }
}

/// Sinal aplicado ao fator conforme a relação.
fn signed<F: SlFloat>(relation: RelationType, factor: F) -> F {
    match relation {
        RelationType::Conflict => factor,
        RelationType::Harmony => -factor,
    }
}

/// Estratégias de revisão de confiança — struct sem estado.
pub struct TrustRevision;

impl TrustRevision {
    /// Um fator de revisão por fonte.
    ///
    /// # Erros
    ///
    /// [`SlError::NoBeliefFusionType`] quando uma estratégia de fusão de
    /// referência recebe `Accumulate` ou `Average`.
    pub fn revision_factors<O: SubjectiveOpinion>(
        revision_type: TrustRevisionType,
        conflict_type: ConflictType,
        trusted_opinions: &[TrustedOpinion<O>],
    ) -> Result<Vec<O::Float>, SlError> {
        let relation = revision_type.relation();
        let factors = match revision_type {
            TrustRevisionType::Normal | TrustRevisionType::HarmonyNormal => {
                Self::normal(relation, conflict_type, trusted_opinions)
            }
            TrustRevisionType::ConflictShares | TrustRevisionType::HarmonyShares => {
                Self::shares(relation, conflict_type, trusted_opinions, false)
            }
            TrustRevisionType::ConflictSharesAllowNegative | TrustRevisionType::HarmonySharesAllowNegative => {
                Self::shares(relation, conflict_type, trusted_opinions, true)
            }
            TrustRevisionType::ReferenceFusion | TrustRevisionType::HarmonyReferenceFusion => {
                Self::reference_fusion(relation, conflict_type, trusted_opinions)?
            }
        };

        tracing::debug!(
            revision_type = ?revision_type,
            conflict_type = ?conflict_type,
            sources = trusted_opinions.len(),
            "Fatores de revisão calculados"
        );
        Ok(factors)
    }

    /// Fatores calculados apenas sobre as fontes marcadas em `mask`.
    ///
    /// O vetor retornado tem o tamanho da lista completa; fontes excluídas
    /// recebem fator `0`.
    ///
    /// # Panics
    ///
    /// Se a máscara tiver tamanho diferente da lista.
    pub fn revision_factors_masked<O: SubjectiveOpinion>(
        revision_type: TrustRevisionType,
        conflict_type: ConflictType,
        trusted_opinions: &[TrustedOpinion<O>],
        mask: &[bool],
    ) -> Result<Vec<O::Float>, SlError> {
        let used = select(trusted_opinions, Some(mask));
        let mut factors = Self::revision_factors(revision_type, conflict_type, &used)?.into_iter();

        Ok(mask
            .iter()
            .map(|keep| if *keep { factors.next().unwrap_or(O::Float::zero()) } else { O::Float::zero() })
            .collect())
    }

    // ─── Estratégias ────────────────────────────────────────────────

    fn normal<O: SubjectiveOpinion>(
        relation: RelationType,
        conflict_type: ConflictType,
        trusted_opinions: &[TrustedOpinion<O>],
    ) -> Vec<O::Float> {
        let discounted = TrustedOpinion::extract_discounted_opinions(trusted_opinions);
        let magnitude = Conflict::relation(relation, conflict_type, &discounted, None);

        Conflict::trust_uncertainty_differentials(trusted_opinions)
            .into_iter()
            .map(|u_diff| signed(relation, u_diff * magnitude))
            .collect()
    }

    fn shares<O: SubjectiveOpinion>(
        relation: RelationType,
        conflict_type: ConflictType,
        trusted_opinions: &[TrustedOpinion<O>],
        allow_negative: bool,
    ) -> Vec<O::Float> {
        let raw = TrustedOpinion::extract_opinions(trusted_opinions);
        let (mut magnitude, shares) = Conflict::conflict_shares(relation, ConflictType::Average, &raw);

        if conflict_type != ConflictType::Average {
            let discounted = TrustedOpinion::extract_discounted_opinions(trusted_opinions);
            magnitude = Conflict::relation(relation, conflict_type, &discounted, None);
        }

        shares
            .into_iter()
            .map(|share| {
                if !allow_negative && share < O::Float::zero() {
                    O::Float::zero()
                } else {
                    signed(relation, magnitude * share)
                }
            })
            .collect()
    }

    fn reference_fusion<O: SubjectiveOpinion>(
        relation: RelationType,
        conflict_type: ConflictType,
        trusted_opinions: &[TrustedOpinion<O>],
    ) -> Result<Vec<O::Float>, SlError> {
        let fusion_type = conflict_type.belief_fusion_type()?;

        let discounted = TrustedOpinion::extract_discounted_opinions(trusted_opinions);
        let raw = TrustedOpinion::extract_opinions(trusted_opinions);
        let reference = Fusion::fuse_opinions(fusion_type, &discounted);

        let (conflicts, max, avg) = Conflict::belief_conflicts(relation, fusion_type, &raw, Some(&reference));
        let spread = max - avg;

        Ok(conflicts
            .into_iter()
            .map(|conflict| {
                let excess = conflict - avg;
                if excess <= O::Float::zero() {
                    // `excess > 0` implica `max > avg`
                    O::Float::zero()
                } else {
                    signed(relation, max * excess / spread)
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Opinion, OpinionNoBase, Trust};
    use approx::assert_abs_diff_eq;

    type Top = TrustedOpinion<OpinionNoBase<2>>;

    fn fully_trusted(belief: f64, disbelief: f64) -> Top {
        TrustedOpinion::new(Trust::dogmatic_trust(), OpinionNoBase::new_binomial(belief, disbelief))
    }

    /// Duas fontes confiáveis concordando contra uma discordante.
    fn two_against_one() -> Vec<Top> {
        vec![fully_trusted(1.0, 0.0), fully_trusted(1.0, 0.0), fully_trusted(0.0, 1.0)]
    }

    fn assert_factors(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert_abs_diff_eq!(*a, *e, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_normal_revision() {
        let half_trust = Trust::new_binomial(0.5, 0.0);
        let tops = [
            TrustedOpinion::new(half_trust, OpinionNoBase::new_binomial(1.0, 0.0)),
            TrustedOpinion::new(half_trust, OpinionNoBase::new_binomial(0.0, 1.0)),
        ];
        // descontadas: (0.75, 0) e (0, 0.75); distância 0.75, certeza 0.5625
        let factors = TrustRevision::revision_factors(TrustRevisionType::Normal, ConflictType::Accumulate, &tops).unwrap();
        assert_factors(&factors, &[0.2109375, 0.2109375]);

        let factors =
            TrustRevision::revision_factors(TrustRevisionType::HarmonyNormal, ConflictType::Accumulate, &tops).unwrap();
        assert_factors(&factors, &[-0.0703125, -0.0703125]);
    }

    #[test]
    fn test_conflict_shares_revision() {
        let tops = two_against_one();

        let factors =
            TrustRevision::revision_factors(TrustRevisionType::ConflictShares, ConflictType::Average, &tops).unwrap();
        assert_factors(&factors, &[0.0, 0.0, 2.0 / 3.0]);

        let factors = TrustRevision::revision_factors(
            TrustRevisionType::ConflictSharesAllowNegative,
            ConflictType::Average,
            &tops,
        )
        .unwrap();
        assert_factors(&factors, &[-1.0 / 3.0, -1.0 / 3.0, 2.0 / 3.0]);
    }

    #[test]
    fn test_conflict_shares_with_other_magnitude() {
        // parcelas continuam pela média; a magnitude vem do acumulado
        let factors =
            TrustRevision::revision_factors(TrustRevisionType::ConflictShares, ConflictType::Accumulate, &two_against_one())
                .unwrap();
        assert_factors(&factors, &[0.0, 0.0, 2.0]);
    }

    #[test]
    fn test_harmony_shares_revision() {
        let tops = two_against_one();

        let factors =
            TrustRevision::revision_factors(TrustRevisionType::HarmonyShares, ConflictType::Average, &tops).unwrap();
        assert_factors(&factors, &[-1.0 / 3.0, -1.0 / 3.0, 0.0]);

        let factors = TrustRevision::revision_factors(
            TrustRevisionType::HarmonySharesAllowNegative,
            ConflictType::Average,
            &tops,
        )
        .unwrap();
        assert_factors(&factors, &[-1.0 / 3.0, -1.0 / 3.0, 2.0 / 3.0]);
    }

    #[test]
    fn test_reference_fusion_revision() {
        // referência: média das dogmáticas = (2/3, 1/3)
        let factors =
            TrustRevision::revision_factors(TrustRevisionType::ReferenceFusion, ConflictType::BeliefAverage, &two_against_one())
                .unwrap();
        assert_factors(&factors, &[0.0, 0.0, 2.0 / 3.0]);
    }

    #[test]
    fn test_reference_fusion_without_spread() {
        let tops = vec![fully_trusted(1.0, 0.0); 3];
        let factors =
            TrustRevision::revision_factors(TrustRevisionType::ReferenceFusion, ConflictType::BeliefCumulative, &tops)
                .unwrap();
        assert_factors(&factors, &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_reference_fusion_requires_belief_conflict() {
        let result =
            TrustRevision::revision_factors(TrustRevisionType::ReferenceFusion, ConflictType::Accumulate, &two_against_one());
        assert_eq!(result, Err(SlError::NoBeliefFusionType(ConflictType::Accumulate)));

        let result = TrustRevision::revision_factors(
            TrustRevisionType::HarmonyReferenceFusion,
            ConflictType::Average,
            &two_against_one(),
        );
        assert_eq!(result, Err(SlError::NoBeliefFusionType(ConflictType::Average)));
    }

    #[test]
    fn test_masked_factors_are_full_length() {
        let tops = two_against_one();
        let factors = TrustRevision::revision_factors_masked(
            TrustRevisionType::ConflictSharesAllowNegative,
            ConflictType::Average,
            &tops,
            &[true, false, true],
        )
        .unwrap();
        assert_factors(&factors, &[1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_empty_list() {
        let tops: Vec<Top> = Vec::new();
        for revision_type in [
            TrustRevisionType::Normal,
            TrustRevisionType::ConflictShares,
            TrustRevisionType::ReferenceFusion,
        ] {
            let factors = TrustRevision::revision_factors(revision_type, ConflictType::BeliefAverage, &tops).unwrap();
            assert!(factors.is_empty());
        }
    }

    #[test]
    fn test_revision_with_prior() {
        let tops: Vec<TrustedOpinion<Opinion<2>>> = two_against_one()
            .into_iter()
            .map(|top| TrustedOpinion::new(*top.trust(), Opinion::from(*top.opinion())))
            .collect();
        let factors =
            TrustRevision::revision_factors(TrustRevisionType::ConflictShares, ConflictType::Average, &tops).unwrap();
        assert_factors(&factors, &[0.0, 0.0, 2.0 / 3.0]);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&TrustRevisionType::HarmonySharesAllowNegative).unwrap();
        assert_eq!(json, "\"HARMONY_SHARES_ALLOW_NEGATIVE\"");
        let parsed: TrustRevisionType = serde_json::from_str("\"REFERENCE_FUSION\"").unwrap();
        assert_eq!(parsed, TrustRevisionType::ReferenceFusion);
    }
}
