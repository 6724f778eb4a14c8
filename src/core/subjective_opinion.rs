//! # SubjectiveOpinion — Interface Comum dos Tipos de Opinião
//!
//! Os operadores multi-fonte (fusão N-ária, conflito, revisão de confiança)
//! são escritos uma única vez sobre este trait e funcionam tanto para
//! [`OpinionNoBase`] quanto para [`Opinion`].
//!
//! | Tipo | `HAS_PRIOR` | Prior usado no conflito |
//! |------|-------------|-------------------------|
//! | `OpinionNoBase` | `false` | neutro (`1/N`) |
//! | `Opinion` | `true` | o prior de cada operando |
//!
//! As implementações apenas encaminham para os métodos inerentes de mesmo
//! nome, que têm precedência na resolução de métodos.

use std::fmt;

use num_traits::Float;

use super::float::SlFloat;
use super::opinion::Opinion;
use super::opinion_no_base::OpinionNoBase;

/// Capacidades exigidas pelos operadores multi-fonte.
pub trait SubjectiveOpinion: Clone + Default + PartialEq + fmt::Debug + fmt::Display + Send + Sync {
    type Float: SlFloat;

    /// Número de hipóteses.
    const SIZE: usize;

    /// `true` quando o tipo carrega um prior explícito.
    const HAS_PRIOR: bool;

    fn belief_masses(&self) -> &[Self::Float];

    fn belief_masses_mut(&mut self) -> &mut [Self::Float];

    fn uncertainty(&self) -> Self::Float;

    fn is_valid(&self) -> bool;

    fn is_dogmatic(&self) -> bool {
        self.uncertainty().abs() < Self::Float::EPS
    }

    fn bc_fuse_assign(&mut self, other: &Self);

    fn degree_of_conflict(&self, other: &Self) -> Self::Float;

    fn degree_of_harmony(&self, other: &Self) -> Self::Float;

    fn trust_discount_assign(&mut self, prop: Self::Float);

    fn trust_discount(&self, prop: Self::Float) -> Self {
        let mut out = self.clone();
        SubjectiveOpinion::trust_discount_assign(&mut out, prop);
        out
    }

    /// Adota a média dos priors de `opinions` (no-op sem prior explícito).
    fn adopt_mean_prior(&mut self, _opinions: &[Self]) {}
}

impl<const N: usize, F: SlFloat> SubjectiveOpinion for OpinionNoBase<N, F> {
    type Float = F;
    const SIZE: usize = N;
    const HAS_PRIOR: bool = false;

    fn belief_masses(&self) -> &[F] {
        OpinionNoBase::belief_masses(self)
    }

    fn belief_masses_mut(&mut self) -> &mut [F] {
        OpinionNoBase::belief_masses_mut(self)
    }

    fn uncertainty(&self) -> F {
        OpinionNoBase::uncertainty(self)
    }

    fn is_valid(&self) -> bool {
        OpinionNoBase::is_valid(self)
    }

    fn bc_fuse_assign(&mut self, other: &Self) {
        OpinionNoBase::bc_fuse_assign(self, other)
    }

    fn degree_of_conflict(&self, other: &Self) -> F {
        OpinionNoBase::degree_of_conflict(self, other)
    }

    fn degree_of_harmony(&self, other: &Self) -> F {
        OpinionNoBase::degree_of_harmony(self, other)
    }

    fn trust_discount_assign(&mut self, prop: F) {
        OpinionNoBase::trust_discount_assign(self, prop)
    }
}

impl<const N: usize, F: SlFloat> SubjectiveOpinion for Opinion<N, F> {
    type Float = F;
    const SIZE: usize = N;
    const HAS_PRIOR: bool = true;

    fn belief_masses(&self) -> &[F] {
        Opinion::belief_masses(self)
    }

    fn belief_masses_mut(&mut self) -> &mut [F] {
        Opinion::belief_masses_mut(self)
    }

    fn uncertainty(&self) -> F {
        Opinion::uncertainty(self)
    }

    fn is_valid(&self) -> bool {
        Opinion::is_valid(self)
    }

    fn bc_fuse_assign(&mut self, other: &Self) {
        Opinion::bc_fuse_assign(self, other)
    }

    fn degree_of_conflict(&self, other: &Self) -> F {
        Opinion::degree_of_conflict(self, other)
    }

    fn degree_of_harmony(&self, other: &Self) -> F {
        Opinion::degree_of_harmony(self, other)
    }

    fn trust_discount_assign(&mut self, prop: F) {
        Opinion::trust_discount_assign(self, prop)
    }

    fn adopt_mean_prior(&mut self, opinions: &[Self]) {
        if opinions.is_empty() {
            return;
        }
        let count = F::from_count(opinions.len());
        let mut prior = [F::zero(); N];
        for opinion in opinions {
            for (acc, a) in prior.iter_mut().zip(opinion.prior().iter()) {
                *acc += *a;
            }
        }
        for a in prior.iter_mut() {
            *a /= count;
        }
        *self.prior_mut() = prior;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn masses<O: SubjectiveOpinion>(opinion: &O) -> Vec<O::Float> {
        opinion.belief_masses().to_vec()
    }

    #[test]
    fn test_forwarding_matches_inherent() {
        let a = OpinionNoBase::new([0.2, 0.3, 0.1]);
        let b = OpinionNoBase::new([0.1, 0.1, 0.6]);
        assert_eq!(masses(&a), vec![0.2, 0.3, 0.1]);
        assert_abs_diff_eq!(
            SubjectiveOpinion::degree_of_conflict(&a, &b),
            a.degree_of_conflict(&b),
            epsilon = 1e-15
        );
        assert_eq!(<OpinionNoBase<3> as SubjectiveOpinion>::SIZE, 3);
        assert!(!<OpinionNoBase<3> as SubjectiveOpinion>::HAS_PRIOR);
        assert!(<Opinion<3> as SubjectiveOpinion>::HAS_PRIOR);
    }

    fn dogmatic_count<O: SubjectiveOpinion>(opinions: &[O]) -> usize {
        opinions.iter().filter(|op| SubjectiveOpinion::is_dogmatic(*op)).count()
    }

    #[test]
    fn test_is_dogmatic_default_per_scalar() {
        let doubles = [
            OpinionNoBase::<2, f64>::new_binomial(1.0, 0.0),
            OpinionNoBase::new_binomial(0.7, 0.3),
            OpinionNoBase::new_binomial(0.7, 0.2),
        ];
        assert_eq!(dogmatic_count(&doubles), 2);

        let singles = [
            Opinion::<3, f32>::new([0.2, 0.3, 0.5], [0.2, 0.3, 0.5]),
            Opinion::vacuous(),
        ];
        assert_eq!(dogmatic_count(&singles), 1);
    }

    #[test]
    fn test_trust_discount_default() {
        let op = Opinion::new_binomial(0.6, 0.2);
        let discounted = SubjectiveOpinion::trust_discount(&op, 0.5);
        assert_abs_diff_eq!(discounted.belief(), 0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(discounted.disbelief(), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_adopt_mean_prior() {
        let mut target = Opinion::new_binomial(0.5, 0.5);
        let inputs = [
            Opinion::new_binomial_with_prior(0.1, 0.1, 0.2),
            Opinion::new_binomial_with_prior(0.1, 0.1, 0.6),
        ];
        target.adopt_mean_prior(&inputs);
        assert_abs_diff_eq!(target.binomial_prior(), 0.4, epsilon = 1e-12);

        // sem prior explícito nada muda
        let mut no_base = OpinionNoBase::new_binomial(0.5, 0.5);
        no_base.adopt_mean_prior(&[OpinionNoBase::new_binomial(0.1, 0.1)]);
        assert_eq!(no_base, OpinionNoBase::new_binomial(0.5, 0.5));
    }
}
