//! # DirichletDistribution — Representação por Evidência
//!
//! Dual de uma opinião: em vez de massas de crença, guarda **evidência**
//! `rᵢ` por hipótese e o **prior** `aᵢ`. Os parâmetros de concentração são
//!
//! ```text
//! αᵢ = rᵢ + N·aᵢ
//! ```
//!
//! ## Conversões
//!
//! | De | Para | Fórmula |
//! |----|------|---------|
//! | `Opinion` | Dirichlet | `rᵢ = N·bᵢ/u`, prior preservado |
//! | `OpinionNoBase` | Dirichlet | `rᵢ = N·bᵢ/u`, prior neutro |
//! | Dirichlet | `Opinion` | `bᵢ = rᵢ / (Σr + N)`, prior preservado |
//! | Dirichlet | `OpinionNoBase` | `bᵢ = rᵢ / (Σr + N)` |
//!
//! As conversões são inversas uma da outra (os alphas sobrevivem à ida e volta).
//!
//! ## Caso de Uso
//!
//! Observações "suaves" (um classificador que devolve probabilidades em vez
//! de um rótulo) são incorporadas por [`moment_matching_update`](DirichletDistribution::moment_matching_update),
//! que casa a média e a variância da posterior exata com uma nova Dirichlet.

use std::array;

use serde::{Deserialize, Serialize};

use super::float::{self, SlFloat};
use super::opinion::Opinion;
use super::opinion_no_base::OpinionNoBase;

/// Distribuição de Dirichlet parametrizada por evidência e prior.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "F: Serialize", deserialize = "F: Deserialize<'de>"))]
pub struct DirichletDistribution<const N: usize, F = f64> {
    /// Evidência `rᵢ` acumulada por hipótese.
    #[serde(with = "crate::core::fixed_array")]
    evidences: [F; N],
    /// Prior (taxa base) `aᵢ`, soma 1.
    #[serde(with = "crate::core::fixed_array")]
    priors: [F; N],
}

impl<const N: usize, F: SlFloat> Default for DirichletDistribution<N, F> {
    /// Sem evidência, prior neutro: todos os `αᵢ = 1`.
    fn default() -> Self {
        Self::new([F::zero(); N], float::neutral())
    }
}

impl<const N: usize, F: SlFloat> DirichletDistribution<N, F> {
    pub const SIZE: usize = N;

    pub fn new(evidences: [F; N], priors: [F; N]) -> Self {
        Self { evidences, priors }
    }

    /// Evidência explícita com prior neutro.
    pub fn from_evidences(evidences: [F; N]) -> Self {
        Self::new(evidences, float::neutral())
    }

    /// Constrói a partir dos parâmetros de concentração, com prior neutro:
    /// `rᵢ = αᵢ − N·(1/N) = αᵢ − 1`.
    pub fn from_alphas(alphas: [F; N]) -> Self {
        let priors: [F; N] = float::neutral();
        let n = F::from_count(N);
        Self::new(array::from_fn(|idx| alphas[idx] - n * priors[idx]), priors)
    }

    pub fn evidences(&self) -> &[F; N] {
        &self.evidences
    }

    pub fn evidences_mut(&mut self) -> &mut [F; N] {
        &mut self.evidences
    }

    pub fn priors(&self) -> &[F; N] {
        &self.priors
    }

    pub fn priors_mut(&mut self) -> &mut [F; N] {
        &mut self.priors
    }

    /// `αᵢ = rᵢ + N·aᵢ`.
    pub fn alphas(&self) -> [F; N] {
        let n = F::from_count(N);
        array::from_fn(|idx| self.evidences[idx] + n * self.priors[idx])
    }

    /// Densidade no ponto `p` do simplex:
    ///
    /// ```text
    /// f(p) = Γ(Σα) · Πᵢ pᵢ^(αᵢ−1) / Γ(αᵢ)
    /// ```
    ///
    /// Com `pᵢ ≈ 0` e `αᵢ < 1` a densidade diverge; nesse caso retorna `0`.
    pub fn evaluate(&self, distr: &[F; N]) -> F {
        let alphas = self.alphas();

        let mut log_norm = ln_gamma(float::sum(&alphas).to_f64_lossy());
        let mut density = 1.0_f64;
        for idx in 0..N {
            let (p, alpha) = (distr[idx], alphas[idx]);
            if p.abs() < F::EPS && alpha < F::one() {
                return F::zero();
            }
            log_norm -= ln_gamma(alpha.to_f64_lossy());
            density *= p.to_f64_lossy().powf(alpha.to_f64_lossy() - 1.0);
        }
        F::from_f64_lossy(log_norm.exp() * density)
    }

    /// Média: `αᵢ / Σα`.
    pub fn mean(&self) -> [F; N] {
        let alphas = self.alphas();
        let sum = float::sum(&alphas);
        array::from_fn(|idx| alphas[idx] / sum)
    }

    /// Variância marginal: `α̃ᵢ(1 − α̃ᵢ) / (Σα + 1)`, com `α̃ = α/Σα`.
    pub fn variance(&self) -> [F; N] {
        let alphas = self.alphas();
        let sum = float::sum(&alphas);
        array::from_fn(|idx| {
            let tilde = alphas[idx] / sum;
            tilde * (F::one() - tilde) / (sum + F::one())
        })
    }

    /// **Atualização por casamento de momentos** com uma observação
    /// probabilística `p` (soma 1).
    ///
    /// ```text
    /// S  = Σα
    /// mᵢ = (αᵢ + pᵢ) / (1 + S)
    /// vᵢ = (1 + αᵢ)(αᵢ + 2pᵢ) / ((1 + S)(2 + S))
    /// s  = Σ (mᵢ − vᵢ)·mᵢ(1−mᵢ) / Σ (vᵢ − mᵢ²)·mᵢ(1−mᵢ)
    /// α' = s·m,   r' = α' − N·a
    /// ```
    pub fn moment_matching_update(&self, probabilities: &[F; N]) -> Self {
        let mut out = *self;
        out.moment_matching_update_assign(probabilities);
        out
    }

    pub fn moment_matching_update_assign(&mut self, probabilities: &[F; N]) {
        let one = F::one();
        let alphas = self.alphas();
        let s = float::sum(&alphas);

        let mut nom = F::zero();
        let mut denom = F::zero();
        let mut moments = [F::zero(); N];
        for idx in 0..N {
            let moment = (alphas[idx] + probabilities[idx]) / (one + s);
            let variance = (one + alphas[idx]) * (alphas[idx] + F::two() * probabilities[idx])
                / ((one + s) * (F::two() + s));
            // o momento é elevado ao quadrado dentro do parêntese
            let spread = moment * (one - moment);
            nom += (moment - variance) * spread;
            denom += (variance - moment * moment) * spread;
            moments[idx] = moment;
        }
        let factor = nom / denom;

        let n = F::from_count(N);
        self.evidences = array::from_fn(|idx| moments[idx] * factor - n * self.priors[idx]);
    }
}

impl<F: SlFloat> DirichletDistribution<2, F> {
    /// Densidade binomial (Beta) em `p`.
    pub fn evaluate_binomial(&self, p: F) -> F {
        self.evaluate(&[p, F::one() - p])
    }

    /// Média da primeira hipótese.
    pub fn mean_binomial(&self) -> F {
        let alphas = self.alphas();
        alphas[0] / (alphas[0] + alphas[1])
    }
}

// ─── Conversões Opinion ↔ Dirichlet ─────────────────────────────────

impl<const N: usize, F: SlFloat> From<&Opinion<N, F>> for DirichletDistribution<N, F> {
    fn from(opinion: &Opinion<N, F>) -> Self {
        Self::new(opinion.evidence(), *opinion.prior())
    }
}

impl<const N: usize, F: SlFloat> From<&OpinionNoBase<N, F>> for DirichletDistribution<N, F> {
    fn from(opinion: &OpinionNoBase<N, F>) -> Self {
        Self::from_evidences(opinion.evidence())
    }
}

impl<const N: usize, F: SlFloat> From<&DirichletDistribution<N, F>> for OpinionNoBase<N, F> {
    fn from(distribution: &DirichletDistribution<N, F>) -> Self {
        let denom = float::sum(&distribution.evidences) + F::from_count(N);
        OpinionNoBase::new(array::from_fn(|idx| distribution.evidences[idx] / denom))
    }
}

impl<const N: usize, F: SlFloat> From<&DirichletDistribution<N, F>> for Opinion<N, F> {
    fn from(distribution: &DirichletDistribution<N, F>) -> Self {
        Opinion::new(*OpinionNoBase::from(distribution).belief_masses(), distribution.priors)
    }
}

/// `ln Γ(x)` para `x > 0` pela aproximação de Lanczos (g = 7, 9 termos).
///
/// Erro relativo da ordem de `1e-15`; valores abaixo de `0.5` usam a
/// fórmula de reflexão.
fn ln_gamma(x: f64) -> f64 {
    const G: f64 = 7.0;
    const COEFFICIENTS: [f64; 9] = [
        0.999_999_999_999_809_9,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];

    if x < 0.5 {
        let pi = std::f64::consts::PI;
        return pi.ln() - (pi * x).sin().abs().ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let mut series = COEFFICIENTS[0];
    for (idx, coefficient) in COEFFICIENTS.iter().enumerate().skip(1) {
        series += coefficient / (x + idx as f64);
    }
    let t = x + G + 0.5;
    0.5 * (2.0 * std::f64::consts::PI).ln() + (x + 0.5) * t.ln() - t + series.ln()
}
