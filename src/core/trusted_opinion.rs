//! # TrustedOpinion — Opinião de uma Fonte com Confiança Associada
//!
//! Combina uma opinião sobre uma proposição com uma opinião binomial de
//! **confiança** ([`Trust`]) sobre a fonte que a afirma.
//!
//! ```text
//! discounted_opinion = opinion.trust_discount(P(trust))
//! P(trust)           = b_trust + u_trust · a_trust
//! ```
//!
//! A revisão de confiança altera apenas o campo `trust`; a opinião da fonte
//! nunca é modificada.
//!
//! ## Extração em lote
//!
//! Os helpers `extract_*` produzem cópias, e as variantes `_mut` devolvem
//! referências mutáveis para atualização in-place de uma lista do chamador.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::opinion::Trust;
use super::subjective_opinion::SubjectiveOpinion;

/// Opinião de uma fonte acompanhada da confiança nessa fonte.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "O: Serialize, Trust<O::Float>: Serialize",
    deserialize = "O: Deserialize<'de>, Trust<O::Float>: Deserialize<'de>"
))]
pub struct TrustedOpinion<O: SubjectiveOpinion> {
    trust: Trust<O::Float>,
    opinion: O,
}

impl<O: SubjectiveOpinion> Default for TrustedOpinion<O> {
    /// Confiança vácua em uma opinião vácua.
    fn default() -> Self {
        Self::new(Trust::default(), O::default())
    }
}

impl<O: SubjectiveOpinion> TrustedOpinion<O> {
    pub fn new(trust: Trust<O::Float>, opinion: O) -> Self {
        Self { trust, opinion }
    }

    pub fn is_valid(&self) -> bool {
        self.trust.is_valid() && self.opinion.is_valid()
    }

    pub fn trust(&self) -> &Trust<O::Float> {
        &self.trust
    }

    pub fn trust_mut(&mut self) -> &mut Trust<O::Float> {
        &mut self.trust
    }

    pub fn opinion(&self) -> &O {
        &self.opinion
    }

    pub fn opinion_mut(&mut self) -> &mut O {
        &mut self.opinion
    }

    /// Opinião descontada pela probabilidade projetada da confiança.
    pub fn discounted_opinion(&self) -> O {
        self.opinion.trust_discount(self.trust.binomial_projection())
    }

    /// Revisa a confiança por um fator com sinal (ver [`Trust::revise_trust`]).
    pub fn revise_trust(&self, revision_factor: O::Float) -> Self {
        let mut out = self.clone();
        out.revise_trust_assign(revision_factor);
        out
    }

    pub fn revise_trust_assign(&mut self, revision_factor: O::Float) {
        self.trust.revise_trust_assign(revision_factor);
    }

    /// **Revisão par a par**: o conflito entre as duas opiniões é distribuído
    /// entre as confianças segundo o diferencial de incerteza de cada uma.
    ///
    /// ```text
    /// fator_self  = u_diff(trust, trust') · DC(opinion, opinion')
    /// fator_other = u_diff(trust', trust) · DC(opinion, opinion')
    /// ```
    pub fn revise_trust_pairwise(&self, other: &Self) -> (Self, Self) {
        let mut this = self.clone();
        let mut that = other.clone();
        this.revise_trust_pairwise_assign(&mut that);
        (this, that)
    }

    pub fn revise_trust_pairwise_assign(&mut self, other: &mut Self) {
        let conflict = self.opinion.degree_of_conflict(&other.opinion);

        let factor_this = self.trust.uncertainty_differential(&other.trust) * conflict;
        let factor_other = other.trust.uncertainty_differential(&self.trust) * conflict;

        self.trust.revise_trust_assign(factor_this);
        other.trust.revise_trust_assign(factor_other);
    }

    // ─── Extração em lote ───────────────────────────────────────────

    pub fn extract_opinions(trusted_opinions: &[Self]) -> Vec<O> {
        trusted_opinions.iter().map(|top| top.opinion.clone()).collect()
    }

    pub fn extract_opinions_mut(trusted_opinions: &mut [Self]) -> Vec<&mut O> {
        trusted_opinions.iter_mut().map(|top| &mut top.opinion).collect()
    }

    pub fn extract_trusts(trusted_opinions: &[Self]) -> Vec<Trust<O::Float>> {
        trusted_opinions.iter().map(|top| top.trust).collect()
    }

    pub fn extract_trusts_mut(trusted_opinions: &mut [Self]) -> Vec<&mut Trust<O::Float>> {
        trusted_opinions.iter_mut().map(|top| &mut top.trust).collect()
    }

    pub fn extract_discounted_opinions(trusted_opinions: &[Self]) -> Vec<O> {
        trusted_opinions.iter().map(Self::discounted_opinion).collect()
    }
}

impl<O: SubjectiveOpinion> PartialEq for TrustedOpinion<O> {
    fn eq(&self, other: &Self) -> bool {
        self.trust == other.trust && self.opinion == other.opinion
    }
}

impl<O: SubjectiveOpinion> fmt::Display for TrustedOpinion<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trust: {} | opinion: {}", self.trust, self.opinion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Opinion, OpinionNoBase};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_is_vacuous() {
        let top = TrustedOpinion::<OpinionNoBase<2, f32>>::default();
        assert!(top.trust().is_vacuous());
        assert!(top.opinion().is_vacuous());
        assert!(top.is_valid());
    }

    #[test]
    fn test_discounted_opinion() {
        let top = TrustedOpinion::new(
            Trust::new_binomial_with_prior(0.3, 0.0, 0.9),
            Opinion::new_binomial_with_prior(1.0, 0.0, 0.1),
        );
        let discounted = top.discounted_opinion();
        // P(trust) = 0.3 + 0.7·0.9
        assert_abs_diff_eq!(discounted.belief(), 0.93, epsilon = 1e-12);
        assert_abs_diff_eq!(discounted.uncertainty(), 0.07, epsilon = 1e-12);
        assert_abs_diff_eq!(discounted.binomial_prior(), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_revise_trust_only_changes_trust() {
        let top = TrustedOpinion::new(Trust::new_binomial(0.8, 0.0), OpinionNoBase::new([0.5, 0.2, 0.1]));
        let revised = top.revise_trust(0.5);
        assert_abs_diff_eq!(revised.trust().belief(), 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(revised.trust().disbelief(), 0.5, epsilon = 1e-12);
        assert_eq!(revised.opinion(), top.opinion());
    }

    /// Opiniões em conflito total: a confiança mais incerta sofre mais
    #[test]
    fn test_revise_trust_pairwise() {
        let a = TrustedOpinion::new(Trust::new_binomial(0.8, 0.0), OpinionNoBase::new_binomial(1.0, 0.0));
        let b = TrustedOpinion::new(Trust::new_binomial(0.4, 0.0), OpinionNoBase::new_binomial(0.0, 1.0));
        let (a_rev, b_rev) = a.revise_trust_pairwise(&b);

        // u_diff(a) = 0.2 / 0.8, u_diff(b) = 0.6 / 0.8, conflito = 1
        assert_abs_diff_eq!(a_rev.trust().belief(), 0.8 * 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(a_rev.trust().disbelief(), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(b_rev.trust().belief(), 0.4 * 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(b_rev.trust().disbelief(), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_pairwise_without_conflict_keeps_trust() {
        let a = TrustedOpinion::new(Trust::new_binomial(0.5, 0.1), OpinionNoBase::new_binomial(0.6, 0.2));
        let (a_rev, b_rev) = a.revise_trust_pairwise(&a);
        assert_eq!(a_rev, a);
        assert_eq!(b_rev, a);
    }

    #[test]
    fn test_extract_helpers() {
        let mut tops = vec![
            TrustedOpinion::new(Trust::new_binomial(0.5, 0.0), OpinionNoBase::new_binomial(0.6, 0.2)),
            TrustedOpinion::new(Trust::new_binomial(1.0, 0.0), OpinionNoBase::new_binomial(0.1, 0.7)),
        ];
        let discounted = TrustedOpinion::extract_discounted_opinions(&tops);
        assert_abs_diff_eq!(discounted[0].belief(), 0.45, epsilon = 1e-12);
        assert_eq!(discounted[1], OpinionNoBase::new_binomial(0.1, 0.7));

        assert_eq!(TrustedOpinion::extract_trusts(&tops)[1], Trust::dogmatic_trust());
        assert_eq!(TrustedOpinion::extract_opinions(&tops)[0], OpinionNoBase::new_binomial(0.6, 0.2));

        for trust in TrustedOpinion::extract_trusts_mut(&mut tops) {
            *trust = Trust::vacuous_trust();
        }
        for opinion in TrustedOpinion::extract_opinions_mut(&mut tops) {
            opinion.complement_assign();
        }
        assert!(tops.iter().all(|top| top.trust().is_vacuous()));
        assert_eq!(tops[0].opinion(), &OpinionNoBase::new_binomial(0.2, 0.6));
    }

    #[test]
    fn test_display() {
        let top = TrustedOpinion::new(Trust::new_binomial(1.0, 0.0), OpinionNoBase::new_binomial(0.5, 0.25));
        assert_eq!(
            top.to_string(),
            "trust: opinion: [bel: 1.000000; disbel: 0.000000; uncertainty: 0.000000] | prior: [bel: 0.500000; disbel: 0.500000] | opinion: [bel: 0.500000; disbel: 0.250000; uncertainty: 0.250000]"
        );
    }
}
