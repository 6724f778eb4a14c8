//! # Conflito e Harmonia entre Múltiplas Fontes
//!
//! Medidas agregadas de desacordo (ou acordo) sobre uma lista de opiniões,
//! construídas sobre os graus par a par:
//!
//! ```text
//! DC(ω, ω') = dist(P, P') · (1 − u)(1 − u')
//! DH(ω, ω') = (1 − dist(P, P')) · (1 − u)(1 − u')
//! ```
//!
//! ## Estratégias de agregação ([`ConflictType`])
//!
//! | Tipo | Valor |
//! |------|-------|
//! | `Accumulate` | soma sobre todos os pares não ordenados |
//! | `Average` | `Accumulate / (n(n−1)/2)` |
//! | `Belief*` | média das distâncias de cada fonte a uma fusão de referência |
//!
//! Listas com menos de duas opiniões têm conflito `0` nas estratégias por pares.
//!
//! ## Parcelas de conflito
//!
//! [`Conflict::conflict_shares`] atribui a cada fonte a fração do conflito
//! médio que desaparece quando ela é removida (leave-one-out):
//! `shareᵢ = 1 − conflito_sem_i / conflito`. O custo é O(n³) para as
//! estratégias por pares, aceitável para o número típico de sensores.

use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::core::{SlFloat, SubjectiveOpinion, Trust, TrustedOpinion};
use crate::error::SlError;

use super::fusion::{Fusion, FusionType};
use super::select;

/// Estratégia de agregação do conflito.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictType {
    Accumulate,
    Average,
    BeliefCumulative,
    BeliefBeliefConstraint,
    BeliefAverage,
    BeliefWeighted,
}

impl ConflictType {
    /// Fusão de referência associada aos tipos `Belief*`.
    ///
    /// # Erros
    ///
    /// [`SlError::NoBeliefFusionType`] para `Accumulate` e `Average`.
    pub fn belief_fusion_type(self) -> Result<FusionType, SlError> {
        match self {
            ConflictType::BeliefCumulative => Ok(FusionType::Cumulative),
            ConflictType::BeliefBeliefConstraint => Ok(FusionType::BeliefConstraint),
            ConflictType::BeliefAverage => Ok(FusionType::Average),
            ConflictType::BeliefWeighted => Ok(FusionType::Weighted),
            ConflictType::Accumulate | ConflictType::Average => Err(SlError::NoBeliefFusionType(self)),
        }
    }
}

/// Relação medida entre pares de opiniões.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    Conflict,
    Harmony,
}

impl RelationType {
    /// Grau de conflito ou de harmonia entre duas opiniões.
    pub fn degree<O: SubjectiveOpinion>(self, this: &O, other: &O) -> O::Float {
        match self {
            RelationType::Conflict => this.degree_of_conflict(other),
            RelationType::Harmony => this.degree_of_harmony(other),
        }
    }
}

/// Medidas de conflito/harmonia sobre listas — struct sem estado.
pub struct Conflict;

impl Conflict {
    /// Conflito agregado de todas as opiniões.
    pub fn conflict<O: SubjectiveOpinion>(conflict_type: ConflictType, opinions: &[O]) -> O::Float {
        Self::relation(RelationType::Conflict, conflict_type, opinions, None)
    }

    /// Conflito agregado apenas das opiniões marcadas em `mask`.
    pub fn conflict_masked<O: SubjectiveOpinion>(conflict_type: ConflictType, opinions: &[O], mask: &[bool]) -> O::Float {
        Self::relation(RelationType::Conflict, conflict_type, opinions, Some(mask))
    }

    /// Harmonia agregada de todas as opiniões.
    pub fn harmony<O: SubjectiveOpinion>(conflict_type: ConflictType, opinions: &[O]) -> O::Float {
        Self::relation(RelationType::Harmony, conflict_type, opinions, None)
    }

    pub fn harmony_masked<O: SubjectiveOpinion>(conflict_type: ConflictType, opinions: &[O], mask: &[bool]) -> O::Float {
        Self::relation(RelationType::Harmony, conflict_type, opinions, Some(mask))
    }

    /// Despacho comum de conflito e harmonia.
    ///
    /// # Panics
    ///
    /// Se a máscara tiver tamanho diferente da lista.
    pub fn relation<O: SubjectiveOpinion>(
        relation: RelationType,
        conflict_type: ConflictType,
        opinions: &[O],
        mask: Option<&[bool]>,
    ) -> O::Float {
        let used = select(opinions, mask);
        match conflict_type {
            ConflictType::Accumulate => Self::accumulate(relation, &used),
            ConflictType::Average => Self::average(relation, &used),
            ConflictType::BeliefCumulative => Self::belief_average(relation, FusionType::Cumulative, &used),
            ConflictType::BeliefBeliefConstraint => {
                Self::belief_average(relation, FusionType::BeliefConstraint, &used)
            }
            ConflictType::BeliefAverage => Self::belief_average(relation, FusionType::Average, &used),
            ConflictType::BeliefWeighted => Self::belief_average(relation, FusionType::Weighted, &used),
        }
    }

    /// Soma da relação sobre todos os pares não ordenados.
    fn accumulate<O: SubjectiveOpinion>(relation: RelationType, opinions: &[O]) -> O::Float {
        let mut total = O::Float::zero();
        for (idx, outer) in opinions.iter().enumerate() {
            for inner in &opinions[idx + 1..] {
                total += relation.degree(outer, inner);
            }
        }
        total
    }

    /// Média da relação por par.
    fn average<O: SubjectiveOpinion>(relation: RelationType, opinions: &[O]) -> O::Float {
        let n = opinions.len();
        if n < 2 {
            return O::Float::zero();
        }
        let pairs = n * (n - 1) / 2;
        Self::accumulate(relation, opinions) / O::Float::from_count(pairs)
    }

    fn belief_average<O: SubjectiveOpinion>(relation: RelationType, fusion_type: FusionType, opinions: &[O]) -> O::Float {
        let (_, _, avg) = Self::belief_conflicts(relation, fusion_type, opinions, None);
        avg
    }

    /// Relação de cada opinião com uma opinião de referência.
    ///
    /// A referência é a fusão das próprias opiniões com `fusion_type`, a
    /// menos que seja fornecida. Retorna `(por_fonte, máximo, média)`; o
    /// máximo parte de `0`.
    pub fn belief_conflicts<O: SubjectiveOpinion>(
        relation: RelationType,
        fusion_type: FusionType,
        opinions: &[O],
        reference: Option<&O>,
    ) -> (Vec<O::Float>, O::Float, O::Float) {
        let zero = O::Float::zero();
        if opinions.is_empty() {
            return (Vec::new(), zero, zero);
        }

        let fused;
        let reference = match reference {
            Some(reference) => reference,
            None => {
                fused = Fusion::fuse_opinions(fusion_type, opinions);
                &fused
            }
        };

        let conflicts: Vec<O::Float> = opinions.iter().map(|op| relation.degree(reference, op)).collect();
        let max = conflicts.iter().copied().fold(zero, |acc, c| if c > acc { c } else { acc });
        let avg = conflicts.iter().copied().sum::<O::Float>() / O::Float::from_count(conflicts.len());

        (conflicts, max, avg)
    }

    /// **Parcelas de conflito** (leave-one-out).
    ///
    /// Retorna `(conflito_total, parcelas)`. Se o conflito total for `< ε`
    /// todas as parcelas são `0`.
    pub fn conflict_shares<O: SubjectiveOpinion>(
        relation: RelationType,
        conflict_type: ConflictType,
        opinions: &[O],
    ) -> (O::Float, Vec<O::Float>) {
        let n = opinions.len();
        let zero = O::Float::zero();
        let total = Self::relation(relation, conflict_type, opinions, None);

        if total < O::Float::EPS {
            return (zero, vec![zero; n]);
        }

        let mut mask = vec![true; n];
        let mut shares = Vec::with_capacity(n);
        for idx in 0..n {
            mask[idx] = false;
            let without = Self::relation(relation, conflict_type, opinions, Some(&mask[..]));
            mask[idx] = true;
            shares.push(O::Float::one() - without / total);
        }

        tracing::debug!(relation = ?relation, conflict_type = ?conflict_type, total = %total, "Parcelas de conflito calculadas");
        (total, shares)
    }

    /// Fração da incerteza total de cada opinião: `uᵢ / Σu`.
    ///
    /// Todas `0` quando `Σu < ε`.
    pub fn uncertainty_differentials<O: SubjectiveOpinion>(opinions: &[O]) -> Vec<O::Float> {
        let uncertainty_sum: O::Float = opinions.iter().map(|op| op.uncertainty()).sum();
        if uncertainty_sum < O::Float::EPS {
            return vec![O::Float::zero(); opinions.len()];
        }
        opinions.iter().map(|op| op.uncertainty() / uncertainty_sum).collect()
    }

    /// Diferenciais de incerteza das **confianças** de uma lista de fontes.
    pub fn trust_uncertainty_differentials<O: SubjectiveOpinion>(trusted_opinions: &[TrustedOpinion<O>]) -> Vec<O::Float> {
        let trusts: Vec<Trust<O::Float>> = TrustedOpinion::extract_trusts(trusted_opinions);
        Self::uncertainty_differentials(&trusts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Opinion, OpinionNoBase};
    use approx::assert_abs_diff_eq;

    /// N opiniões, cada uma dogmática em uma hipótese distinta
    fn max_conflict<const N: usize>() -> Vec<OpinionNoBase<N>> {
        (0..N)
            .map(|idx| {
                let mut masses = [0.0; N];
                masses[idx] = 1.0;
                OpinionNoBase::new(masses)
            })
            .collect()
    }

    fn check_max_conflict<const N: usize>() {
        let ops = max_conflict::<N>();
        let pairs = (N * (N - 1) / 2) as f64;
        assert_abs_diff_eq!(Conflict::conflict(ConflictType::Accumulate, &ops), pairs, epsilon = 1e-9);
        assert_abs_diff_eq!(Conflict::conflict(ConflictType::Average, &ops), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(Conflict::harmony(ConflictType::Average, &ops), 0.0, epsilon = 1e-9);

        let (total, shares) = Conflict::conflict_shares(RelationType::Conflict, ConflictType::Average, &ops);
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-9);
        let expected = if N == 2 { 1.0 } else { 0.0 };
        for share in shares {
            assert_abs_diff_eq!(share, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_max_conflict_per_dimension() {
        check_max_conflict::<2>();
        check_max_conflict::<3>();
        check_max_conflict::<4>();
        check_max_conflict::<5>();
    }

    #[test]
    fn test_max_conflict_with_prior() {
        let ops: Vec<Opinion<3>> = max_conflict::<3>().into_iter().map(Opinion::from).collect();
        assert_abs_diff_eq!(Conflict::conflict(ConflictType::Accumulate, &ops), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_conflict_shares_sign_and_magnitude() {
        let ops = [
            OpinionNoBase::new_binomial(1.0, 0.0),
            OpinionNoBase::new_binomial(1.0, 0.0),
            OpinionNoBase::new_binomial(0.0, 1.0),
        ];
        let (total, shares) = Conflict::conflict_shares(RelationType::Conflict, ConflictType::Average, &ops);
        assert_abs_diff_eq!(total, 2.0 / 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(shares[0], -0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(shares[1], -0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(shares[2], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_conflict_shares_without_conflict() {
        let ops = [OpinionNoBase::new_binomial(0.6, 0.2); 3];
        let (total, shares) = Conflict::conflict_shares(RelationType::Conflict, ConflictType::Average, &ops);
        assert_eq!(total, 0.0);
        assert_eq!(shares, vec![0.0; 3]);
    }

    #[test]
    fn test_fewer_than_two_opinions() {
        let ops = [OpinionNoBase::new_binomial(1.0, 0.0)];
        assert_eq!(Conflict::conflict(ConflictType::Accumulate, &ops), 0.0);
        assert_eq!(Conflict::conflict(ConflictType::Average, &ops), 0.0);
        assert_eq!(Conflict::conflict::<OpinionNoBase<2>>(ConflictType::Average, &[]), 0.0);
        assert_eq!(Conflict::conflict::<OpinionNoBase<2>>(ConflictType::BeliefAverage, &[]), 0.0);
    }

    #[test]
    fn test_masked_conflict() {
        let ops = [
            OpinionNoBase::new_binomial(1.0, 0.0),
            OpinionNoBase::new_binomial(1.0, 0.0),
            OpinionNoBase::new_binomial(0.0, 1.0),
        ];
        assert_eq!(Conflict::conflict_masked(ConflictType::Accumulate, &ops, &[true, true, false]), 0.0);
        assert_abs_diff_eq!(
            Conflict::conflict_masked(ConflictType::Accumulate, &ops, &[true, false, true]),
            1.0,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            Conflict::harmony_masked(ConflictType::Accumulate, &ops, &[true, true, false]),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    #[should_panic]
    fn test_mask_length_mismatch_panics() {
        let ops = [OpinionNoBase::new_binomial(1.0, 0.0); 3];
        let _ = Conflict::conflict_masked(ConflictType::Accumulate, &ops, &[true]);
    }

    #[test]
    fn test_belief_conflicts_with_reference() {
        let ops = [
            OpinionNoBase::new_binomial(1.0, 0.0),
            OpinionNoBase::new_binomial(0.0, 1.0),
            OpinionNoBase::new_binomial(0.0, 0.0),
        ];
        let reference = OpinionNoBase::new_binomial(1.0, 0.0);
        let (conflicts, max, avg) =
            Conflict::belief_conflicts(RelationType::Conflict, FusionType::Average, &ops, Some(&reference));
        assert_eq!(conflicts, vec![0.0, 1.0, 0.0]);
        assert_abs_diff_eq!(max, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(avg, 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_belief_conflict_uses_fused_reference() {
        let ops = [
            OpinionNoBase::new_binomial(0.6, 0.1),
            OpinionNoBase::new_binomial(0.5, 0.2),
        ];
        let reference = Fusion::fuse_opinions(FusionType::Cumulative, &ops);
        let (_, _, expected) = Conflict::belief_conflicts(RelationType::Conflict, FusionType::Cumulative, &ops, Some(&reference));
        assert_abs_diff_eq!(Conflict::conflict(ConflictType::BeliefCumulative, &ops), expected, epsilon = 1e-15);
    }

    #[test]
    fn test_uncertainty_differentials() {
        let equal = [OpinionNoBase::new_binomial(0.2, 0.3); 4];
        for diff in Conflict::uncertainty_differentials(&equal) {
            assert_abs_diff_eq!(diff, 0.25, epsilon = 1e-12);
        }

        let with_dogmatic = [
            OpinionNoBase::new_binomial(1.0, 0.0),
            OpinionNoBase::new_binomial(0.2, 0.3),
            OpinionNoBase::new_binomial(0.2, 0.3),
        ];
        let diffs = Conflict::uncertainty_differentials(&with_dogmatic);
        assert_abs_diff_eq!(diffs[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(diffs[1], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(diffs[2], 0.5, epsilon = 1e-12);

        let all_dogmatic = [OpinionNoBase::new_binomial(1.0, 0.0); 2];
        assert_eq!(Conflict::uncertainty_differentials(&all_dogmatic), vec![0.0, 0.0]);
    }

    #[test]
    fn test_trust_uncertainty_differentials() {
        let tops = [
            TrustedOpinion::new(Trust::new_binomial(0.5, 0.0), OpinionNoBase::new_binomial(1.0, 0.0)),
            TrustedOpinion::new(Trust::new_binomial(0.5, 0.0), OpinionNoBase::new_binomial(0.0, 0.0)),
        ];
        assert_eq!(Conflict::trust_uncertainty_differentials(&tops), vec![0.5, 0.5]);
    }

    #[test]
    fn test_belief_fusion_type_mapping() {
        assert_eq!(ConflictType::BeliefCumulative.belief_fusion_type(), Ok(FusionType::Cumulative));
        assert_eq!(
            ConflictType::BeliefBeliefConstraint.belief_fusion_type(),
            Ok(FusionType::BeliefConstraint)
        );
        assert_eq!(ConflictType::BeliefAverage.belief_fusion_type(), Ok(FusionType::Average));
        assert_eq!(ConflictType::BeliefWeighted.belief_fusion_type(), Ok(FusionType::Weighted));
        assert_eq!(
            ConflictType::Accumulate.belief_fusion_type(),
            Err(SlError::NoBeliefFusionType(ConflictType::Accumulate))
        );
    }
}
