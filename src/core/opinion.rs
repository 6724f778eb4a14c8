//! # Opinion — Opinião Completa `ω = (b, u, a)`
//!
//! Compõe um [`OpinionNoBase`] com um vetor de **taxa base** (prior) `a`,
//! `Σaᵢ = 1`. Todo operador do tipo sem base é reexposto aqui com o prior
//! passado automaticamente, e os operadores de fusão também combinam os
//! priors das duas entradas.
//!
//! ## Composição do prior na fusão
//!
//! | Operador | Prior resultante |
//! |----------|------------------|
//! | `cum_fuse` | `(aᵢu' + a'ᵢu − (aᵢ + a'ᵢ)uu') / (u + u' − 2uu')` |
//! | `bc_fuse`, `wb_fuse` | `(aᵢ(1 − u) + a'ᵢ(1 − u')) / (2 − u − u')` |
//! | `average_fuse` | média elemento a elemento |
//! | `cum_unfuse`, `average_unfuse`, `cc_fuse` | inalterado |
//!
//! Denominadores `≈ 0` fazem o prior cair para a média.
//!
//! ## Exemplo
//!
//! ```rust
//! use subjective_logic::core::Opinion;
//!
//! // opinião binomial com taxa base 0.3
//! let op: Opinion<2> = Opinion::new_binomial_with_prior(0.4, 0.2, 0.3);
//! assert!(op.is_valid());
//! assert!((op.binomial_projection() - 0.52).abs() < 1e-9);
//! ```

use std::array;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::dirichlet::DirichletDistribution;
use super::float::{self, SlFloat};
use super::opinion_no_base::OpinionNoBase;

/// Opinião binomial de confiança em uma fonte.
pub type Trust<F = f64> = Opinion<2, F>;

/// Opinião sobre `N` hipóteses com taxa base explícita.
///
/// Serializa como `{"belief_masses": [...], "prior": [...]}`; o prior é
/// opcional na leitura e assume a distribuição neutra.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "F: Serialize", deserialize = "F: SlFloat"))]
pub struct Opinion<const N: usize, F = f64> {
    #[serde(flatten)]
    opinion_no_base: OpinionNoBase<N, F>,
    #[serde(with = "crate::core::fixed_array", default = "float::neutral")]
    prior: [F; N],
}

impl<const N: usize, F: SlFloat> Default for Opinion<N, F> {
    /// Opinião vácua com prior neutro.
    fn default() -> Self {
        Self::vacuous()
    }
}

impl<const N: usize, F: SlFloat> From<[F; N]> for Opinion<N, F> {
    /// Massas de crença com prior neutro.
    fn from(belief_masses: [F; N]) -> Self {
        Self::new(belief_masses, float::neutral())
    }
}

impl<const N: usize, F: SlFloat> From<OpinionNoBase<N, F>> for Opinion<N, F> {
    fn from(opinion_no_base: OpinionNoBase<N, F>) -> Self {
        Self::from_no_base(opinion_no_base, float::neutral())
    }
}

impl<const N: usize, F: SlFloat> Opinion<N, F> {
    pub const SIZE: usize = N;

    /// Cria a opinião a partir das massas e do prior, sem validação.
    pub fn new(belief_masses: [F; N], prior: [F; N]) -> Self {
        Self::from_no_base(OpinionNoBase::new(belief_masses), prior)
    }

    pub fn from_no_base(opinion_no_base: OpinionNoBase<N, F>, prior: [F; N]) -> Self {
        Self { opinion_no_base, prior }
    }

    /// Opinião vácua com prior neutro.
    pub fn vacuous() -> Self {
        Self::new(OpinionNoBase::<N, F>::vacuous_belief_distr(), float::neutral())
    }

    /// Opinião dogmática sem preferência: massas `1/N` e prior neutro.
    pub fn neutral_belief_opinion() -> Self {
        Self::new(float::neutral(), float::neutral())
    }

    /// Sinônimo de [`vacuous`](Self::vacuous).
    pub fn vacuous_belief_opinion() -> Self {
        Self::vacuous()
    }

    pub fn opinion_no_base(&self) -> &OpinionNoBase<N, F> {
        &self.opinion_no_base
    }

    pub fn opinion_no_base_mut(&mut self) -> &mut OpinionNoBase<N, F> {
        &mut self.opinion_no_base
    }

    pub fn belief_masses(&self) -> &[F; N] {
        self.opinion_no_base.belief_masses()
    }

    pub fn belief_masses_mut(&mut self) -> &mut [F; N] {
        self.opinion_no_base.belief_masses_mut()
    }

    pub fn belief_mass(&self, idx: usize) -> F {
        self.opinion_no_base.belief_mass(idx)
    }

    pub fn prior(&self) -> &[F; N] {
        &self.prior
    }

    pub fn prior_mut(&mut self) -> &mut [F; N] {
        &mut self.prior
    }

    pub fn uncertainty(&self) -> F {
        self.opinion_no_base.uncertainty()
    }

    /// Valida as massas e o prior: `aᵢ ≥ −ε` e `|Σaᵢ − 1| < ε`.
    pub fn is_valid(&self) -> bool {
        let prior_sum = float::sum(&self.prior);
        self.opinion_no_base.is_valid()
            && self.prior.iter().all(|a| *a >= -F::EPS)
            && (prior_sum - F::one()).abs() < F::EPS
    }

    pub fn is_dogmatic(&self) -> bool {
        self.opinion_no_base.is_dogmatic()
    }

    pub fn is_vacuous(&self) -> bool {
        self.opinion_no_base.is_vacuous()
    }

    pub fn evidence(&self) -> [F; N] {
        self.opinion_no_base.evidence()
    }

    pub fn dissonance(&self) -> F {
        self.opinion_no_base.dissonance()
    }

    pub fn probabilities(&self) -> [F; N] {
        self.opinion_no_base.probabilities()
    }

    /// Probabilidade projetada com o prior próprio: `Pᵢ = bᵢ + u·aᵢ`.
    pub fn projection(&self) -> [F; N] {
        self.opinion_no_base.projection(&self.prior)
    }

    pub fn uncertainty_differential(&self, other: &Self) -> F {
        self.opinion_no_base.uncertainty_differential(&other.opinion_no_base)
    }

    /// Grau de conflito, cada operando projetado com o próprio prior.
    pub fn degree_of_conflict(&self, other: &Self) -> F {
        self.opinion_no_base
            .degree_of_conflict_with(&other.opinion_no_base, &self.prior, &other.prior)
    }

    pub fn degree_of_harmony(&self, other: &Self) -> F {
        self.opinion_no_base
            .degree_of_harmony_with(&other.opinion_no_base, &self.prior, &other.prior)
    }

    /// Combinação convexa das massas e do prior.
    pub fn interpolate(&self, other: &Self, t: F) -> Self {
        Self::from_no_base(
            self.opinion_no_base.interpolate(&other.opinion_no_base, t),
            array::from_fn(|idx| (F::one() - t) * self.prior[idx] + t * other.prior[idx]),
        )
    }

    fn take_mean_prior(&mut self, other: &Self) {
        self.prior = float::midpoint(&self.prior, &other.prior);
    }

    /// Prior ponderado pela certeza, usado pelas fusões BC e WB.
    fn certainty_weighted_prior(&mut self, other: &Self, u: F, u_other: F) {
        let denom = F::two() - u - u_other;
        if denom.abs() < F::EPS {
            self.take_mean_prior(other);
            return;
        }
        for idx in 0..N {
            self.prior[idx] = (self.prior[idx] * (F::one() - u) + other.prior[idx] * (F::one() - u_other)) / denom;
        }
    }

    // ─── Fusão ──────────────────────────────────────────────────────

    pub fn cum_fuse(&self, other: &Self) -> Self {
        let mut out = *self;
        out.cum_fuse_assign(other);
        out
    }

    pub fn cum_fuse_assign(&mut self, other: &Self) {
        let u = self.uncertainty();
        let u_other = other.uncertainty();
        self.opinion_no_base.cum_fuse_assign(&other.opinion_no_base);

        let denom = u + u_other - F::two() * u * u_other;
        if denom.abs() < F::EPS {
            self.take_mean_prior(other);
            return;
        }
        for idx in 0..N {
            self.prior[idx] = (self.prior[idx] * u_other + other.prior[idx] * u
                - (self.prior[idx] + other.prior[idx]) * u * u_other)
                / denom;
        }
    }

    /// Inverso de [`cum_fuse`](Self::cum_fuse); o prior fica inalterado.
    pub fn cum_unfuse(&self, other: &Self) -> Self {
        let mut out = *self;
        out.cum_unfuse_assign(other);
        out
    }

    pub fn cum_unfuse_assign(&mut self, other: &Self) {
        self.opinion_no_base.cum_unfuse_assign(&other.opinion_no_base);
    }

    pub fn bc_fuse(&self, other: &Self) -> Self {
        let mut out = *self;
        out.bc_fuse_assign(other);
        out
    }

    pub fn bc_fuse_assign(&mut self, other: &Self) {
        let u = self.uncertainty();
        let u_other = other.uncertainty();
        self.opinion_no_base.bc_fuse_assign(&other.opinion_no_base);
        self.certainty_weighted_prior(other, u, u_other);
    }

    pub fn average_fuse(&self, other: &Self) -> Self {
        let mut out = *self;
        out.average_fuse_assign(other);
        out
    }

    pub fn average_fuse_assign(&mut self, other: &Self) {
        self.opinion_no_base.average_fuse_assign(&other.opinion_no_base);
        self.take_mean_prior(other);
    }

    pub fn average_unfuse(&self, other: &Self) -> Self {
        let mut out = *self;
        out.average_unfuse_assign(other);
        out
    }

    pub fn average_unfuse_assign(&mut self, other: &Self) {
        self.opinion_no_base.average_unfuse_assign(&other.opinion_no_base);
    }

    pub fn wb_fuse(&self, other: &Self) -> Self {
        let mut out = *self;
        out.wb_fuse_assign(other);
        out
    }

    pub fn wb_fuse_assign(&mut self, other: &Self) {
        let u = self.uncertainty();
        let u_other = other.uncertainty();
        self.opinion_no_base.wb_fuse_assign(&other.opinion_no_base);
        self.certainty_weighted_prior(other, u, u_other);
    }

    /// Fusão CCF; o prior não é atualizado.
    pub fn cc_fuse(&self, other: &Self) -> Self {
        let mut out = *self;
        out.cc_fuse_assign(other);
        out
    }

    pub fn cc_fuse_assign(&mut self, other: &Self) {
        self.opinion_no_base.cc_fuse_assign(&other.opinion_no_base);
    }

    // ─── Desconto ───────────────────────────────────────────────────

    pub fn trust_discount(&self, prop: F) -> Self {
        let mut out = *self;
        out.trust_discount_assign(prop);
        out
    }

    pub fn trust_discount_assign(&mut self, prop: F) {
        self.opinion_no_base.trust_discount_assign(prop);
    }

    /// Desconto pela probabilidade projetada da confiança (com o prior dela).
    pub fn trust_discount_with(&self, trust: &Trust<F>) -> Self {
        self.trust_discount(trust.binomial_projection())
    }

    pub fn trust_discount_with_assign(&mut self, trust: &Trust<F>) {
        self.trust_discount_assign(trust.binomial_projection());
    }

    pub fn limited_trust_discount(&self, limit: F, prop: F) -> Self {
        let mut out = *self;
        out.limited_trust_discount_assign(limit, prop);
        out
    }

    pub fn limited_trust_discount_assign(&mut self, limit: F, prop: F) {
        self.opinion_no_base.limited_trust_discount_assign(limit, prop);
    }

    pub fn limited_trust_discount_with(&self, limit: F, trust: &Trust<F>) -> Self {
        self.limited_trust_discount(limit, trust.binomial_projection())
    }

    // ─── Atualização e dedução ──────────────────────────────────────

    /// Casamento de momentos via Dirichlet, preservando o prior.
    pub fn moment_matching_update(&self, probabilities: &[F; N]) -> Self {
        let mut out = *self;
        out.moment_matching_update_assign(probabilities);
        out
    }

    pub fn moment_matching_update_assign(&mut self, probabilities: &[F; N]) {
        let distribution = DirichletDistribution::from(&*self).moment_matching_update(probabilities);
        *self = Self::from(&distribution);
    }

    /// Dedução multinomial com o prior próprio como `a_x`.
    ///
    /// O prior do resultado é a taxa base induzida `a_y`.
    pub fn deduction(&self, conditionals: &[Self; N]) -> Self {
        let mut out = *self;
        out.deduction_assign(conditionals);
        out
    }

    pub fn deduction_assign(&mut self, conditionals: &[Self; N]) {
        let no_base: [OpinionNoBase<N, F>; N] = array::from_fn(|x| conditionals[x].opinion_no_base);
        let base_x = self.prior;
        self.prior = self.opinion_no_base.deduce_assign(&base_x, &no_base);
    }

    /// Redução para `M < N` hipóteses, acumulando massas e prior.
    ///
    /// # Panics
    ///
    /// Nas mesmas condições de [`OpinionNoBase::reduced`].
    pub fn reduced<const M: usize>(&self, mapping: &[usize; N]) -> Opinion<M, F> {
        let opinion_no_base = self.opinion_no_base.reduced::<M>(mapping);
        let mut prior = [F::zero(); M];
        for (idx, target) in mapping.iter().enumerate() {
            prior[*target] += self.prior[idx];
        }
        Opinion::from_no_base(opinion_no_base, prior)
    }
}

// ═══════════════════════════════════════════════════════════════════
// Especializações binomiais (N = 2)
// ═══════════════════════════════════════════════════════════════════

impl<F: SlFloat> Opinion<2, F> {
    /// Opinião binomial `(b, d)` com prior neutro.
    pub fn new_binomial(belief: F, disbelief: F) -> Self {
        Self::from([belief, disbelief])
    }

    /// Opinião binomial `(b, d)` com taxa base `a` (prior `[a, 1 − a]`).
    pub fn new_binomial_with_prior(belief: F, disbelief: F, base_rate: F) -> Self {
        Self::new([belief, disbelief], [base_rate, F::one() - base_rate])
    }

    /// Confiança total: `(1, 0)`.
    pub fn dogmatic_trust() -> Self {
        Self::new_binomial(F::one(), F::zero())
    }

    /// Confiança vácua: `(0, 0)`.
    pub fn vacuous_trust() -> Self {
        Self::new_binomial(F::zero(), F::zero())
    }

    pub fn belief(&self) -> F {
        self.opinion_no_base.belief()
    }

    pub fn disbelief(&self) -> F {
        self.opinion_no_base.disbelief()
    }

    pub fn belief_mut(&mut self) -> &mut F {
        self.opinion_no_base.belief_mut()
    }

    pub fn disbelief_mut(&mut self) -> &mut F {
        self.opinion_no_base.disbelief_mut()
    }

    /// Taxa base binomial `a = prior[0]`.
    pub fn binomial_prior(&self) -> F {
        self.prior[0]
    }

    pub fn prior_belief(&self) -> F {
        self.prior[0]
    }

    pub fn prior_disbelief(&self) -> F {
        self.prior[1]
    }

    /// Complemento: troca crença/descrença e também as taxas base.
    pub fn complement(&self) -> Self {
        let mut out = *self;
        out.complement_assign();
        out
    }

    pub fn complement_assign(&mut self) {
        self.opinion_no_base.complement_assign();
        self.prior.swap(0, 1);
    }

    pub fn probability(&self) -> F {
        self.opinion_no_base.probability()
    }

    /// `P = b + u·a`.
    pub fn binomial_projection(&self) -> F {
        self.opinion_no_base.binomial_projection(self.binomial_prior())
    }

    pub fn revise_trust(&self, factor: F) -> Self {
        let mut out = *self;
        out.revise_trust_assign(factor);
        out
    }

    pub fn revise_trust_assign(&mut self, factor: F) {
        self.opinion_no_base.revise_trust_assign(factor);
    }

    pub fn revise_trust_with_conflict(&self, degree_of_conflict: F, other: &Self) -> Self {
        let mut out = *self;
        out.revise_trust_with_conflict_assign(degree_of_conflict, other);
        out
    }

    pub fn revise_trust_with_conflict_assign(&mut self, degree_of_conflict: F, other: &Self) {
        self.opinion_no_base
            .revise_trust_with_conflict_assign(degree_of_conflict, &other.opinion_no_base);
    }

    /// Conjunção `x ∧ y`; prior resultante `a·a'`.
    pub fn multiply(&self, other: &Self) -> Self {
        let mut out = *self;
        out.multiply_assign(other);
        out
    }

    pub fn multiply_assign(&mut self, other: &Self) {
        let (a, a_other) = (self.binomial_prior(), other.binomial_prior());
        self.opinion_no_base.multiply_assign(&other.opinion_no_base, a, a_other);
        let a_y = a * a_other;
        self.prior = [a_y, F::one() - a_y];
    }

    /// Disjunção `x ∨ y`; prior resultante `a + a' − a·a'`.
    pub fn comultiply(&self, other: &Self) -> Self {
        let mut out = *self;
        out.comultiply_assign(other);
        out
    }

    pub fn comultiply_assign(&mut self, other: &Self) {
        let (a, a_other) = (self.binomial_prior(), other.binomial_prior());
        self.opinion_no_base.comultiply_assign(&other.opinion_no_base, a, a_other);
        let a_y = a + a_other - a * a_other;
        self.prior = [a_y, F::one() - a_y];
    }

    /// Dedução binomial; o prior do resultado é a taxa base induzida `a_y`.
    pub fn binomial_deduction(&self, cond_positive: &Self, cond_negative: &Self) -> Self {
        let mut out = *self;
        out.binomial_deduction_assign(cond_positive, cond_negative);
        out
    }

    pub fn binomial_deduction_assign(&mut self, cond_positive: &Self, cond_negative: &Self) {
        let base_x = self.binomial_prior();
        let a_y = OpinionNoBase::<2, F>::induced_base_rate(
            base_x,
            &cond_positive.opinion_no_base,
            &cond_negative.opinion_no_base,
        );
        self.opinion_no_base
            .binomial_deduction_assign(base_x, &cond_positive.opinion_no_base, &cond_negative.opinion_no_base);
        self.prior = [a_y, F::one() - a_y];
    }
}

impl<const N: usize, F: SlFloat> PartialEq for Opinion<N, F> {
    fn eq(&self, other: &Self) -> bool {
        self.opinion_no_base == other.opinion_no_base && float::abs_diff_sum(&self.prior, &other.prior) < F::EPS
    }
}

/// `opinion: [...] | prior: [...]`
impl<const N: usize, F: SlFloat> fmt::Display for Opinion<N, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if N == 2 {
            write!(
                f,
                "opinion: {} | prior: [bel: {:.6}; disbel: {:.6}]",
                self.opinion_no_base, self.prior[0], self.prior[1]
            )
        } else {
            write!(
                f,
                "opinion: {} | prior: [bel masses: {}]",
                self.opinion_no_base,
                float::format_masses(&self.prior)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_is_vacuous_with_neutral_prior() {
        let op = Opinion::<3>::default();
        assert!(op.is_vacuous());
        assert!(op.is_valid());
        for a in op.prior() {
            assert_abs_diff_eq!(*a, 1.0 / 3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_is_valid_checks_prior() {
        assert!(Opinion::new_binomial_with_prior(0.3, 0.3, 0.2).is_valid());
        assert!(!Opinion::new([0.3, 0.3], [0.5, 0.6]).is_valid());
        assert!(!Opinion::new([0.3, 0.3], [1.1, -0.1]).is_valid());
    }

    #[test]
    fn test_projection_uses_own_prior() {
        let op = Opinion::new([0.2, 0.1, 0.1], [0.5, 0.25, 0.25]);
        let projection = op.projection();
        assert_abs_diff_eq!(projection[0], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(projection[1], 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(float::sum(&projection), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_trust_constructors() {
        assert!(Trust::<f64>::dogmatic_trust().is_dogmatic());
        assert!(Trust::<f64>::vacuous_trust().is_vacuous());
        assert_abs_diff_eq!(Trust::<f64>::vacuous_trust().binomial_projection(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_cum_fuse_prior() {
        let a = Opinion::new_binomial_with_prior(0.2, 0.2, 0.2);
        let b = Opinion::new_binomial_with_prior(0.4, 0.1, 0.6);
        let fused = a.cum_fuse(&b);
        // u = 0.6, u' = 0.5 → (0.2·0.5 + 0.6·0.6 − 0.8·0.3) / (1.1 − 0.6)
        assert_abs_diff_eq!(fused.binomial_prior(), 0.44, epsilon = 1e-9);
        assert!(fused.is_valid());
        assert_eq!(fused.opinion_no_base(), &a.opinion_no_base().cum_fuse(b.opinion_no_base()));
    }

    #[test]
    fn test_average_fuse_takes_mean_prior() {
        let a = Opinion::new_binomial_with_prior(0.2, 0.2, 0.2);
        let b = Opinion::new_binomial_with_prior(0.4, 0.1, 0.6);
        assert_abs_diff_eq!(a.average_fuse(&b).binomial_prior(), 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_bc_and_wb_fuse_prior_weighted_by_certainty() {
        let a = Opinion::new_binomial_with_prior(0.6, 0.2, 0.2);
        let b = Opinion::new_binomial_with_prior(0.1, 0.1, 0.8);
        // (0.2·0.8 + 0.8·0.2) / (2 − 0.2 − 0.8)
        assert_abs_diff_eq!(a.bc_fuse(&b).binomial_prior(), 0.32, epsilon = 1e-9);
        assert_abs_diff_eq!(a.wb_fuse(&b).binomial_prior(), 0.32, epsilon = 1e-9);

        // ambas vácuas → média
        let vacuous_a = Opinion::new_binomial_with_prior(0.0, 0.0, 0.2);
        let vacuous_b = Opinion::new_binomial_with_prior(0.0, 0.0, 0.6);
        assert_abs_diff_eq!(vacuous_a.wb_fuse(&vacuous_b).binomial_prior(), 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_cc_fuse_keeps_prior() {
        let a = Opinion::new_binomial_with_prior(0.6, 0.2, 0.3);
        let b = Opinion::new_binomial_with_prior(0.3, 0.5, 0.9);
        assert_abs_diff_eq!(a.cc_fuse(&b).binomial_prior(), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_degree_of_conflict_uses_priors() {
        let a = Opinion::new_binomial_with_prior(0.4, 0.4, 1.0);
        let b = Opinion::new_binomial_with_prior(0.4, 0.4, 0.0);
        assert_abs_diff_eq!(a.degree_of_conflict(&b), 0.2 * 0.8 * 0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(a.degree_of_harmony(&b), 0.8 * 0.8 * 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_trust_discount_with_trust_projection() {
        let trust = Trust::new_binomial_with_prior(0.3, 0.3, 0.5);
        let op = Opinion::new([0.5, 0.3, 0.1], float::neutral());
        let discounted = op.trust_discount_with(&trust);
        assert_abs_diff_eq!(discounted.belief_mass(0), 0.25, epsilon = 1e-12);
        assert_eq!(discounted.prior(), op.prior());
    }

    #[test]
    fn test_multiply_and_comultiply_priors() {
        let a = Opinion::new_binomial_with_prior(0.75, 0.15, 0.5);
        let b = Opinion::new_binomial_with_prior(0.1, 0.0, 0.2);
        let product = a.multiply(&b);
        assert_abs_diff_eq!(product.belief(), 0.15, epsilon = 0.005);
        assert_abs_diff_eq!(product.binomial_prior(), 0.1, epsilon = 1e-12);

        let b = Opinion::new_binomial_with_prior(0.35, 0.0, 0.2);
        let coproduct = a.comultiply(&b);
        assert_abs_diff_eq!(coproduct.belief(), 0.84, epsilon = 0.0055);
        assert_abs_diff_eq!(coproduct.binomial_prior(), 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_binomial_deduction_sets_induced_prior() {
        let x = Opinion::new_binomial_with_prior(0.0, 0.4, 0.5);
        let y_x = Opinion::new_binomial(0.55, 0.3);
        let y_not_x = Opinion::new_binomial(0.1, 0.75);
        let y = x.binomial_deduction(&y_x, &y_not_x);
        assert_abs_diff_eq!(y.belief(), 0.15, epsilon = 0.005);
        assert_abs_diff_eq!(y.disbelief(), 0.48, epsilon = 0.005);
        // a_y = (0.5·0.55 + 0.5·0.1) / (1 − (0.5·0.15 + 0.5·0.15))
        assert_abs_diff_eq!(y.binomial_prior(), 0.325 / 0.85, epsilon = 1e-9);
    }

    #[test]
    fn test_deduction_identical_conditionals() {
        let cond = Opinion::new([0.5, 0.2, 0.1], float::neutral());
        let x = Opinion::new([0.3, 0.3, 0.2], float::neutral());
        let y = x.deduction(&[cond, cond, cond]);
        assert_eq!(y.opinion_no_base(), cond.opinion_no_base());
        assert!(y.prior().iter().all(|a| !f64::is_nan(*a)));
    }

    #[test]
    fn test_reduced_accumulates_prior() {
        let op = Opinion::new([0.1, 0.2, 0.3, 0.1], [0.1, 0.2, 0.3, 0.4]);
        let reduced: Opinion<2> = op.reduced(&[0, 1, 1, 0]);
        assert_abs_diff_eq!(reduced.belief(), 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(reduced.binomial_prior(), 0.5, epsilon = 1e-12);
        assert!(reduced.is_valid());
    }

    #[test]
    fn test_complement_swaps_prior() {
        let op = Opinion::new_binomial_with_prior(0.6, 0.1, 0.3).complement();
        assert_abs_diff_eq!(op.belief(), 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(op.binomial_prior(), 0.7, epsilon = 1e-12);
    }

    #[test]
    fn test_equality_compares_prior() {
        let a = Opinion::new_binomial_with_prior(0.3, 0.3, 0.5);
        let b = Opinion::new_binomial_with_prior(0.3, 0.3, 0.6);
        assert_ne!(a, b);
        assert_eq!(a, Opinion::new_binomial(0.3, 0.3));
    }

    #[test]
    fn test_interpolate_prior() {
        let a = Opinion::new_binomial_with_prior(0.2, 0.4, 0.2);
        let b = Opinion::new_binomial_with_prior(0.6, 0.0, 0.6);
        let mid = a.interpolate(&b, 0.5);
        assert_eq!(mid, Opinion::new_binomial_with_prior(0.4, 0.2, 0.4));
    }

    #[test]
    fn test_dirichlet_round_trip() {
        let op = Opinion::new([0.2, 0.3, 0.1], [0.2, 0.5, 0.3]);
        let distribution = DirichletDistribution::from(&op);
        let back = Opinion::from(&distribution);
        assert_eq!(back, op);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Opinion::new_binomial(0.5, 0.25).to_string(),
            "opinion: [bel: 0.500000; disbel: 0.250000; uncertainty: 0.250000] | prior: [bel: 0.500000; disbel: 0.500000]"
        );
        assert_eq!(
            Opinion::new([0.5, 0.25, 0.0], [0.5, 0.25, 0.25]).to_string(),
            "opinion: [bel masses: 0.500000, 0.250000, 0.000000, uncertainty: 0.250000] | prior: [bel masses: 0.500000, 0.250000, 0.250000, ]"
        );
    }

    #[test]
    fn test_serde_prior_defaults_to_neutral() {
        let op: Opinion<2> = serde_json::from_str(r#"{"belief_masses":[0.2,0.3]}"#).unwrap();
        assert_eq!(op, Opinion::new_binomial(0.2, 0.3));

        let json = serde_json::to_string(&Opinion::new_binomial_with_prior(0.5, 0.25, 0.25)).unwrap();
        assert_eq!(json, r#"{"belief_masses":[0.5,0.25],"prior":[0.25,0.75]}"#);
    }
}
