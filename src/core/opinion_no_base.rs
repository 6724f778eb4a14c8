//! # OpinionNoBase — Massas de Crença sem Taxa Base
//!
//! Representação fundamental de uma opinião em **Subjective Logic**: um vetor
//! de massas de crença `b ∈ F^N` sobre N hipóteses mutuamente exclusivas.
//! A **incerteza** não é armazenada; ela é o resíduo `u = 1 − Σbᵢ`.
//!
//! ## Por que "sem base"?
//!
//! Uma opinião completa `ω = (b, u, a)` carrega também a taxa base `a` (prior).
//! Aqui o prior fica de fora: os operadores que precisam dele (conflito,
//! harmonia, dedução, desconto) recebem a taxa base como argumento. A versão
//! com prior embutido é o [`Opinion`](super::Opinion), que compõe este tipo.
//!
//! ## Operadores Binários
//!
//! | Operador | Fórmula (resumida) | Caso degenerado |
//! |----------|--------------------|-----------------|
//! | `cum_fuse` | `(bᵢu' + b'ᵢu) / (u + u' − uu')` | média |
//! | `cum_unfuse` | `(bᵢu' − b'ᵢu) / (u' − u + uu')` | média |
//! | `average_fuse` | `(bᵢu' + b'ᵢu) / (u + u')` | média |
//! | `average_unfuse` | `(2bᵢu' − b'ᵢu) / (2u' − u)` | média |
//! | `bc_fuse` | `harmonyᵢ / (1 − conflict)` | distribuição neutra |
//! | `wb_fuse` | `(bᵢ(1−u)u' + b'ᵢ(1−u')u) / (u + u' − 2uu')` | média ou vácuo |
//! | `cc_fuse` | consenso + compromisso normalizado | vácuo |
//!
//! Todo operador tem uma forma pura (retorna cópia) e uma forma `_assign`
//! (modifica o receptor).
//!
//! ## Exemplo
//!
//! ```rust
//! use subjective_logic::core::OpinionNoBase;
//!
//! let sensor_a: OpinionNoBase<2> = OpinionNoBase::new_binomial(0.7, 0.1);
//! let sensor_b = OpinionNoBase::new_binomial(0.2, 0.3);
//!
//! // Fusão cumulativa: a incerteza sempre diminui
//! let fused = sensor_a.cum_fuse(&sensor_b);
//! assert!(fused.uncertainty() < sensor_a.uncertainty());
//! assert!((fused.belief() - 0.65).abs() < 1e-9);
//! ```

use std::array;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::dirichlet::DirichletDistribution;
use super::float::{self, SlFloat};

/// Vetor de massas de crença sobre `N` hipóteses, incerteza implícita.
///
/// ## Invariante (verificada por [`is_valid`](Self::is_valid), nunca na construção)
///
/// - `bᵢ ≥ 0` para toda hipótese
/// - `Σbᵢ ≤ 1` (a incerteza `u = 1 − Σbᵢ` é não-negativa)
///
/// ## Igualdade
///
/// Duas opiniões são iguais quando `Σ|bᵢ − b'ᵢ| < ε`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "F: Serialize", deserialize = "F: Deserialize<'de>"))]
pub struct OpinionNoBase<const N: usize, F = f64> {
    /// Massas de crença `bᵢ`, uma por hipótese.
    #[serde(with = "crate::core::fixed_array")]
    belief_masses: [F; N],
}

impl<const N: usize, F: SlFloat> Default for OpinionNoBase<N, F> {
    /// Opinião vácua: nenhuma crença, incerteza total.
    fn default() -> Self {
        Self::vacuous()
    }
}

impl<const N: usize, F: SlFloat> From<[F; N]> for OpinionNoBase<N, F> {
    fn from(belief_masses: [F; N]) -> Self {
        Self::new(belief_masses)
    }
}

impl<const N: usize, F: SlFloat> OpinionNoBase<N, F> {
    /// Número de hipóteses.
    pub const SIZE: usize = N;

    /// Cria uma opinião a partir das massas de crença.
    ///
    /// Não valida os valores; use [`is_valid`](Self::is_valid) quando a origem
    /// das massas não for confiável.
    pub fn new(belief_masses: [F; N]) -> Self {
        Self { belief_masses }
    }

    /// Opinião vácua — `u = 1`.
    pub fn vacuous() -> Self {
        Self::new(Self::vacuous_belief_distr())
    }

    /// Distribuição `1/N` em cada hipótese (dogmática e sem preferência).
    pub fn neutral_belief_distr() -> [F; N] {
        float::neutral()
    }

    /// Distribuição de massas toda zerada.
    pub fn vacuous_belief_distr() -> [F; N] {
        [F::zero(); N]
    }

    pub fn belief_masses(&self) -> &[F; N] {
        &self.belief_masses
    }

    pub fn belief_masses_mut(&mut self) -> &mut [F; N] {
        &mut self.belief_masses
    }

    /// Massa de crença da hipótese `idx`.
    pub fn belief_mass(&self, idx: usize) -> F {
        self.belief_masses[idx]
    }

    /// Incerteza residual: `u = 1 − Σbᵢ`.
    pub fn uncertainty(&self) -> F {
        F::one() - float::sum(&self.belief_masses)
    }

    /// Verifica `bᵢ ≥ −ε` e `Σbᵢ < 1 + ε`.
    pub fn is_valid(&self) -> bool {
        self.belief_masses.iter().all(|b| *b >= -F::EPS)
            && float::sum(&self.belief_masses) < F::one() + F::EPS
    }

    /// Opinião dogmática: `|u| < ε`.
    pub fn is_dogmatic(&self) -> bool {
        self.uncertainty().abs() < F::EPS
    }

    /// Opinião vácua: `|1 − u| < ε`.
    pub fn is_vacuous(&self) -> bool {
        (F::one() - self.uncertainty()).abs() < F::EPS
    }

    /// Evidência equivalente de Dirichlet: `rᵢ = bᵢ·N / u`.
    ///
    /// Uma opinião dogmática tem evidência infinita.
    pub fn evidence(&self) -> [F; N] {
        let u = self.uncertainty();
        let n = F::from_count(N);
        array::from_fn(|idx| self.belief_masses[idx] * n / u)
    }

    /// **Dissonância** — quanto as massas se equilibram entre hipóteses.
    ///
    /// Para cada par `(i, j)` compara as massas pela função de balanço
    /// `bal(x, y) = 1 − |x − y|` (e `0` quando `x + y < ε`):
    ///
    /// ```text
    /// diss = Σᵢ bᵢ · Σⱼ≠ᵢ bⱼ·bal(bᵢ, bⱼ) / (Σb − bᵢ)
    /// ```
    ///
    /// Termos com denominador `< ε` são ignorados. Custo O(N²).
    pub fn dissonance(&self) -> F {
        let balance = |a: F, b: F| -> F {
            if a + b < F::EPS {
                return F::zero();
            }
            F::one() - (a - b).abs()
        };

        let belief_sum = float::sum(&self.belief_masses);
        let mut dissonance = F::zero();
        for i in 0..N {
            let mut other_balanced = F::zero();
            for j in 0..N {
                if i == j {
                    continue;
                }
                other_balanced += self.belief_masses[j] * balance(self.belief_masses[i], self.belief_masses[j]);
            }
            let denom = belief_sum - self.belief_masses[i];
            if denom < F::EPS {
                continue;
            }
            dissonance += self.belief_masses[i] * other_balanced / denom;
        }
        dissonance
    }

    /// Probabilidades condicionadas à certeza: `bᵢ / (1 − u)`.
    pub fn probabilities(&self) -> [F; N] {
        let denom = F::one() - self.uncertainty();
        array::from_fn(|idx| self.belief_masses[idx] / denom)
    }

    /// Probabilidade projetada: `Pᵢ = bᵢ + u·aᵢ`.
    pub fn projection(&self, base_rate: &[F; N]) -> [F; N] {
        let u = self.uncertainty();
        array::from_fn(|idx| self.belief_masses[idx] + u * base_rate[idx])
    }

    /// Diferencial de incerteza: `u / (u + u')`.
    ///
    /// Se ambas as opiniões forem dogmáticas o resultado é `0.5` (partilha simétrica).
    pub fn uncertainty_differential(&self, other: &Self) -> F {
        let u = self.uncertainty();
        let denom = u + other.uncertainty();
        if denom.abs() < F::EPS {
            return F::half();
        }
        u / denom
    }

    /// Distância entre projeções: `½·Σ|Pᵢ − P'ᵢ|` (ou `|P₀ − P'₀|` no caso binomial).
    fn projected_distance(&self, other: &Self, base_rate: &[F; N], base_rate_other: &[F; N]) -> F {
        let prob_this = self.projection(base_rate);
        let prob_other = other.projection(base_rate_other);
        float::abs_diff_sum(&prob_this, &prob_other) * F::half()
    }

    /// Certeza conjunta: `(1 − u)(1 − u')`.
    fn conjunctive_certainty(&self, other: &Self) -> F {
        (F::one() - self.uncertainty()) * (F::one() - other.uncertainty())
    }

    /// **Grau de conflito** com taxas base explícitas.
    ///
    /// `DC = ½·Σ|Pᵢ − P'ᵢ| · (1 − u)(1 − u')`
    ///
    /// `P` é projetada com `base_rate` e `P'` com `base_rate_other`.
    /// Para N = 2 a meia-soma coincide com `|P_b − P'_b|`.
    pub fn degree_of_conflict_with(&self, other: &Self, base_rate: &[F; N], base_rate_other: &[F; N]) -> F {
        self.projected_distance(other, base_rate, base_rate_other) * self.conjunctive_certainty(other)
    }

    /// **Grau de harmonia** com taxas base explícitas.
    ///
    /// `DH = (1 − ½·Σ|Pᵢ − P'ᵢ|) · (1 − u)(1 − u')`
    pub fn degree_of_harmony_with(&self, other: &Self, base_rate: &[F; N], base_rate_other: &[F; N]) -> F {
        (F::one() - self.projected_distance(other, base_rate, base_rate_other)) * self.conjunctive_certainty(other)
    }

    /// Grau de conflito assumindo taxas base neutras para ambos.
    pub fn degree_of_conflict(&self, other: &Self) -> F {
        let neutral = Self::neutral_belief_distr();
        self.degree_of_conflict_with(other, &neutral, &neutral)
    }

    /// Grau de harmonia assumindo taxas base neutras para ambos.
    pub fn degree_of_harmony(&self, other: &Self) -> F {
        let neutral = Self::neutral_belief_distr();
        self.degree_of_harmony_with(other, &neutral, &neutral)
    }

    /// Combinação convexa: `t = 0 → self`, `t = 1 → other`.
    pub fn interpolate(&self, other: &Self, t: F) -> Self {
        Self::new(array::from_fn(|idx| {
            (F::one() - t) * self.belief_masses[idx] + t * other.belief_masses[idx]
        }))
    }

    fn take_mean(&mut self, other: &Self) {
        self.belief_masses = float::midpoint(&self.belief_masses, &other.belief_masses);
    }

    // ─── Fusão cumulativa ───────────────────────────────────────────

    /// **Fusão cumulativa** (aleatória): soma evidência independente.
    pub fn cum_fuse(&self, other: &Self) -> Self {
        let mut out = *self;
        out.cum_fuse_assign(other);
        out
    }

    pub fn cum_fuse_assign(&mut self, other: &Self) {
        let u = self.uncertainty();
        let u_other = other.uncertainty();
        let denom = u + u_other - u * u_other;

        // ambas dogmáticas: o limite depende da direção, usa-se a média
        if denom.abs() < F::EPS {
            self.take_mean(other);
            return;
        }
        for idx in 0..N {
            self.belief_masses[idx] = (self.belief_masses[idx] * u_other + other.belief_masses[idx] * u) / denom;
        }
    }

    /// Inverso da fusão cumulativa: remove `other` de um resultado fundido.
    ///
    /// `a.cum_fuse(&b).cum_unfuse(&b) == a`
    pub fn cum_unfuse(&self, other: &Self) -> Self {
        let mut out = *self;
        out.cum_unfuse_assign(other);
        out
    }

    pub fn cum_unfuse_assign(&mut self, other: &Self) {
        let u = self.uncertainty();
        let u_other = other.uncertainty();
        let denom = u_other - u + u_other * u;

        if denom.abs() < F::EPS {
            self.take_mean(other);
            return;
        }
        for idx in 0..N {
            self.belief_masses[idx] = (self.belief_masses[idx] * u_other - other.belief_masses[idx] * u) / denom;
        }
    }

    // ─── Fusão por restrição de crença ──────────────────────────────

    /// Termo de harmonia da fusão BC: `bᵢu' + b'ᵢu + bᵢb'ᵢ`.
    fn bc_harmony(&self, other: &Self) -> [F; N] {
        let u = self.uncertainty();
        let u_other = other.uncertainty();
        array::from_fn(|idx| {
            self.belief_masses[idx] * u_other
                + other.belief_masses[idx] * u
                + self.belief_masses[idx] * other.belief_masses[idx]
        })
    }

    /// Termo de conflito da fusão BC: `Σᵢ≠ⱼ bᵢb'ⱼ`.
    fn bc_conflict(&self, other: &Self) -> F {
        let mut conflict = F::zero();
        for i in 0..N {
            for j in 0..N {
                if i != j {
                    conflict += self.belief_masses[i] * other.belief_masses[j];
                }
            }
        }
        conflict
    }

    /// **Fusão por restrição de crença** (Dempster normalizado).
    ///
    /// Conflito total (`conflict ≈ 1`) resulta na distribuição neutra.
    pub fn bc_fuse(&self, other: &Self) -> Self {
        let mut out = *self;
        out.bc_fuse_assign(other);
        out
    }

    pub fn bc_fuse_assign(&mut self, other: &Self) {
        let harmony = self.bc_harmony(other);
        let conflict = self.bc_conflict(other);

        if (F::one() - conflict).abs() < F::EPS {
            self.belief_masses = Self::neutral_belief_distr();
            return;
        }
        let normalizer = F::one() - conflict;
        self.belief_masses = array::from_fn(|idx| harmony[idx] / normalizer);
    }

    // ─── Fusão por média ────────────────────────────────────────────

    /// **Fusão por média** (fontes dependentes).
    pub fn average_fuse(&self, other: &Self) -> Self {
        let mut out = *self;
        out.average_fuse_assign(other);
        out
    }

    pub fn average_fuse_assign(&mut self, other: &Self) {
        let u = self.uncertainty();
        let u_other = other.uncertainty();
        let denom = u + u_other;

        if denom.abs() < F::EPS {
            self.take_mean(other);
            return;
        }
        for idx in 0..N {
            self.belief_masses[idx] = (self.belief_masses[idx] * u_other + other.belief_masses[idx] * u) / denom;
        }
    }

    /// Inverso da fusão por média: `(2bᵢu' − b'ᵢu) / (2u' − u)`.
    pub fn average_unfuse(&self, other: &Self) -> Self {
        let mut out = *self;
        out.average_unfuse_assign(other);
        out
    }

    pub fn average_unfuse_assign(&mut self, other: &Self) {
        let u = self.uncertainty();
        let u_other = other.uncertainty();
        let denom = F::two() * u_other - u;

        if denom.abs() < F::EPS {
            self.take_mean(other);
            return;
        }
        for idx in 0..N {
            self.belief_masses[idx] =
                (F::two() * self.belief_masses[idx] * u_other - other.belief_masses[idx] * u) / denom;
        }
    }

    // ─── Fusão ponderada ────────────────────────────────────────────

    /// **Fusão ponderada pela certeza** (WBF).
    ///
    /// No ponto singular `u + u' − 2uu' ≈ 0` há dois casos: ambas dogmáticas
    /// (média) ou ambas vácuas (resultado vácuo).
    pub fn wb_fuse(&self, other: &Self) -> Self {
        let mut out = *self;
        out.wb_fuse_assign(other);
        out
    }

    pub fn wb_fuse_assign(&mut self, other: &Self) {
        let u = self.uncertainty();
        let u_other = other.uncertainty();
        let denom = u + u_other - F::two() * u * u_other;

        if denom.abs() < F::EPS {
            if (u * u_other).abs() < F::EPS {
                self.take_mean(other);
            } else {
                self.belief_masses = Self::vacuous_belief_distr();
            }
            return;
        }
        for idx in 0..N {
            self.belief_masses[idx] = (self.belief_masses[idx] * (F::one() - u) * u_other
                + other.belief_masses[idx] * (F::one() - u_other) * u)
                / denom;
        }
    }

    // ─── Consenso e compromisso ─────────────────────────────────────

    /// **Fusão consenso & compromisso** (CCF), aproximação restrita a singletons.
    ///
    /// ```text
    /// consensoᵢ   = min(bᵢ, b'ᵢ)
    /// resíduos    = b − consenso, b' − consenso
    /// compromissoᵢ = rAᵢu' + rBᵢu + rAᵢrBᵢ + Σⱼ≠ᵢ (rAᵢrBⱼ + rAⱼrBᵢ)
    /// bᵢ          = consensoᵢ + η·compromissoᵢ,  η = (1 − Σconsenso − uu') / Σcompromisso
    /// ```
    ///
    /// Sem compromisso (`Σcompromisso ≈ 0`) o resultado é vácuo.
    pub fn cc_fuse(&self, other: &Self) -> Self {
        let mut out = *self;
        out.cc_fuse_assign(other);
        out
    }

    pub fn cc_fuse_assign(&mut self, other: &Self) {
        let u = self.uncertainty();
        let u_other = other.uncertainty();

        let consensus: [F; N] = array::from_fn(|idx| self.belief_masses[idx].min(other.belief_masses[idx]));
        let consensus_sum = float::sum(&consensus);
        let res_a: [F; N] = array::from_fn(|idx| self.belief_masses[idx] - consensus[idx]);
        let res_b: [F; N] = array::from_fn(|idx| other.belief_masses[idx] - consensus[idx]);

        let compromise: [F; N] = array::from_fn(|i| {
            let mut different = F::zero();
            for j in 0..N {
                if i != j {
                    different += res_a[i] * res_b[j] + res_a[j] * res_b[i];
                }
            }
            res_a[i] * u_other + res_b[i] * u + res_a[i] * res_b[i] + different
        });
        let compromise_sum = float::sum(&compromise);

        if compromise_sum.abs() < F::EPS {
            self.belief_masses = Self::vacuous_belief_distr();
            return;
        }
        let normalization = (F::one() - consensus_sum - u * u_other) / compromise_sum;
        self.belief_masses = array::from_fn(|idx| consensus[idx] + normalization * compromise[idx]);
    }

    // ─── Desconto por confiança ─────────────────────────────────────

    /// **Desconto por confiança**: `bᵢ ← bᵢ·prop`, a massa perdida vira incerteza.
    pub fn trust_discount(&self, prop: F) -> Self {
        let mut out = *self;
        out.trust_discount_assign(prop);
        out
    }

    pub fn trust_discount_assign(&mut self, prop: F) {
        for mass in self.belief_masses.iter_mut() {
            *mass *= prop;
        }
    }

    /// Desconto pela probabilidade projetada de uma opinião de confiança.
    pub fn trust_discount_with(&self, trust: &OpinionNoBase<2, F>, base_rate: F) -> Self {
        self.trust_discount(trust.binomial_projection(base_rate))
    }

    pub fn trust_discount_with_assign(&mut self, trust: &OpinionNoBase<2, F>, base_rate: F) {
        self.trust_discount_assign(trust.binomial_projection(base_rate));
    }

    /// Desconto com teto de incerteza: o resultado nunca passa de `limit`.
    ///
    /// `prop ← min(1, max((1 − limit)/(1 − u), prop))`. Se a incerteza já
    /// excede `limit`, o desconto se comporta como `prop = 1`.
    pub fn limited_trust_discount(&self, limit: F, prop: F) -> Self {
        let mut out = *self;
        out.limited_trust_discount_assign(limit, prop);
        out
    }

    pub fn limited_trust_discount_assign(&mut self, limit: F, prop: F) {
        let min_prob = (F::one() - limit) / (F::one() - self.uncertainty());
        // min_prob pode passar de 1 quando a incerteza já excede o limite
        let prop = F::one().min(min_prob.max(prop));
        self.trust_discount_assign(prop);
    }

    pub fn limited_trust_discount_with(&self, limit: F, trust: &OpinionNoBase<2, F>, base_rate: F) -> Self {
        self.limited_trust_discount(limit, trust.binomial_projection(base_rate))
    }

    // ─── Atualização por casamento de momentos ──────────────────────

    /// Atualiza a opinião com uma observação probabilística (suave),
    /// via a distribuição de Dirichlet dual com prior neutro.
    pub fn moment_matching_update(&self, probabilities: &[F; N]) -> Self {
        let mut out = *self;
        out.moment_matching_update_assign(probabilities);
        out
    }

    pub fn moment_matching_update_assign(&mut self, probabilities: &[F; N]) {
        let distribution = DirichletDistribution::from(&*self).moment_matching_update(probabilities);
        *self = Self::from(&distribution);
    }

    // ─── Dedução ────────────────────────────────────────────────────

    /// **Dedução multinomial** a partir de `N` opiniões condicionais `ω_{Y|xᵢ}`.
    ///
    /// Etapas (Jøsang, eq. 9.61–9.78):
    ///
    /// 1. taxa base induzida `a_y = Σₓ aₓ b_{x,y} / (1 − Σₓ aₓ uₓ)`
    ///    (se o denominador for `< ε`, usa-se `a_x`)
    /// 2. projeção do ápice `P_apex[y] = Σₓ aₓ P_{x,y}`
    /// 3. `u_apex = minᵧ (P_apex[y] − minₓ b_{x,y}) / a_y[y]`
    /// 4. `u_{Y‖X} = u_apex·u + Σₓ uₓ bₓ`
    /// 5. `b_y = P_{Y‖X}[y] − a_y[y]·u_{Y‖X}`
    ///
    /// Divisões por zero no passo 3 geram `inf`/`NaN`, descartados pelo mínimo.
    pub fn deduction(&self, base_x: &[F; N], conditionals: &[Self; N]) -> Self {
        let mut out = *self;
        out.deduction_assign(base_x, conditionals);
        out
    }

    pub fn deduction_assign(&mut self, base_x: &[F; N], conditionals: &[Self; N]) {
        self.deduce_assign(base_x, conditionals);
    }

    /// Dedução in-place que devolve a taxa base induzida `a_y`.
    pub(crate) fn deduce_assign(&mut self, base_x: &[F; N], conditionals: &[Self; N]) -> [F; N] {
        let mut a_y_nom = [F::zero(); N];
        let mut a_y_denom = [F::zero(); N];
        let mut denom_near_zero = false;
        for y in 0..N {
            for x in 0..N {
                a_y_nom[y] += base_x[x] * conditionals[x].belief_masses[y];
                a_y_denom[y] += base_x[x] * conditionals[x].uncertainty();
            }
            denom_near_zero |= F::one() - a_y_denom[y] < F::EPS;
        }

        let a_y: [F; N] = if denom_near_zero {
            *base_x
        } else {
            array::from_fn(|y| a_y_nom[y] / (F::one() - a_y_denom[y]))
        };

        let x_projection = self.projection(base_x);
        let cond_projections: [[F; N]; N] = array::from_fn(|x| conditionals[x].projection(&a_y));

        let p_apex: [F; N] = array::from_fn(|y| (0..N).map(|x| base_x[x] * cond_projections[x][y]).sum());

        let u_apex = float::nan_aware_min((0..N).map(|y| {
            let min_belief = float::nan_aware_min(conditionals.iter().map(|c| c.belief_masses[y]));
            (p_apex[y] - min_belief) / a_y[y]
        }));

        let mut u_y_x = u_apex * self.uncertainty();
        for x in 0..N {
            u_y_x += conditionals[x].uncertainty() * self.belief_masses[x];
        }

        let p_y_x: [F; N] = array::from_fn(|y| (0..N).map(|x| x_projection[x] * cond_projections[x][y]).sum());

        self.belief_masses = array::from_fn(|y| p_y_x[y] - a_y[y] * u_y_x);
        a_y
    }

    // ─── Redução de hipóteses ───────────────────────────────────────

    /// Agrega as hipóteses em `M < N` novas hipóteses.
    ///
    /// `mapping[i]` indica a nova hipótese que recebe a massa da hipótese `i`.
    ///
    /// # Panics
    ///
    /// Se `M ∉ [2, N)` ou se algum índice de `mapping` for `≥ M`.
    pub fn reduced<const M: usize>(&self, mapping: &[usize; N]) -> OpinionNoBase<M, F> {
        assert!(M >= 2 && M < N, "redução exige 2 ≤ M < N (M = {}, N = {})", M, N);
        let mut out = [F::zero(); M];
        for (idx, target) in mapping.iter().enumerate() {
            assert!(*target < M, "hipótese de destino {} fora do intervalo 0..{}", target, M);
            out[*target] += self.belief_masses[idx];
        }
        OpinionNoBase::new(out)
    }
}

// ═══════════════════════════════════════════════════════════════════
// Especializações binomiais (N = 2)
// ═══════════════════════════════════════════════════════════════════

impl<F: SlFloat> OpinionNoBase<2, F> {
    /// Cria uma opinião binomial `(b, d)`, com `u = 1 − b − d`.
    pub fn new_binomial(belief: F, disbelief: F) -> Self {
        Self::new([belief, disbelief])
    }

    pub fn belief(&self) -> F {
        self.belief_masses[0]
    }

    pub fn disbelief(&self) -> F {
        self.belief_masses[1]
    }

    pub fn belief_mut(&mut self) -> &mut F {
        &mut self.belief_masses[0]
    }

    pub fn disbelief_mut(&mut self) -> &mut F {
        &mut self.belief_masses[1]
    }

    /// Complemento: troca crença e descrença.
    pub fn complement(&self) -> Self {
        let mut out = *self;
        out.complement_assign();
        out
    }

    pub fn complement_assign(&mut self) {
        self.belief_masses.swap(0, 1);
    }

    /// Probabilidade condicionada à certeza: `b / (1 − u)`.
    pub fn probability(&self) -> F {
        self.belief() / (F::one() - self.uncertainty())
    }

    /// Probabilidade projetada binomial: `P = b + u·a`.
    pub fn binomial_projection(&self, base_rate: F) -> F {
        self.belief() + self.uncertainty() * base_rate
    }

    /// **Revisão de confiança** por um fator com sinal.
    ///
    /// O fator é limitado a `[−1, 1]`:
    /// - `f > 0`: move crença para descrença — `b ← b(1−f)`, `d ← d + (1−d)f`
    /// - `f < 0`: move descrença para crença — `b ← b + (1−b)|f|`, `d ← d(1−|f|)`
    pub fn revise_trust(&self, factor: F) -> Self {
        let mut out = *self;
        out.revise_trust_assign(factor);
        out
    }

    pub fn revise_trust_assign(&mut self, factor: F) {
        let factor = factor.max(-F::one()).min(F::one());
        if factor < F::zero() {
            let factor = -factor;
            self.belief_masses[0] += (F::one() - self.belief_masses[0]) * factor;
            self.belief_masses[1] *= F::one() - factor;
        } else {
            self.belief_masses[0] *= F::one() - factor;
            self.belief_masses[1] += (F::one() - self.belief_masses[1]) * factor;
        }
    }

    /// Revisão com fator `diferencial_de_incerteza(other) × conflito`.
    pub fn revise_trust_with_conflict(&self, degree_of_conflict: F, other: &Self) -> Self {
        let mut out = *self;
        out.revise_trust_with_conflict_assign(degree_of_conflict, other);
        out
    }

    pub fn revise_trust_with_conflict_assign(&mut self, degree_of_conflict: F, other: &Self) {
        let factor = self.uncertainty_differential(other) * degree_of_conflict;
        self.revise_trust_assign(factor);
    }

    /// **Multiplicação binomial** (conjunção `x ∧ y`).
    ///
    /// ```text
    /// b = bb' + ((1−a)a'·b·u' + a(1−a')·u·b') / (1 − aa')
    /// d = d + d' − dd'
    /// ```
    ///
    /// Com `aa' ≈ 1` o termo de correção é descartado.
    pub fn multiply(&self, other: &Self, base_rate: F, base_rate_other: F) -> Self {
        let mut out = *self;
        out.multiply_assign(other, base_rate, base_rate_other);
        out
    }

    pub fn multiply_assign(&mut self, other: &Self, base_rate: F, base_rate_other: F) {
        let one = F::one();
        let (a, a_o) = (base_rate, base_rate_other);
        let (b, d, u) = (self.belief(), self.disbelief(), self.uncertainty());
        let (b_o, d_o, u_o) = (other.belief(), other.disbelief(), other.uncertainty());

        let denom = one - a * a_o;
        let correction = if denom.abs() < F::EPS {
            F::zero()
        } else {
            ((one - a) * a_o * b * u_o + a * (one - a_o) * u * b_o) / denom
        };

        self.belief_masses = [b * b_o + correction, d + d_o - d * d_o];
    }

    /// **Comultiplicação binomial** (disjunção `x ∨ y`).
    ///
    /// ```text
    /// b = b + b' − bb'
    /// d = dd' + (a(1−a')·d·u' + (1−a)a'·u·d') / (a + a' − aa')
    /// ```
    pub fn comultiply(&self, other: &Self, base_rate: F, base_rate_other: F) -> Self {
        let mut out = *self;
        out.comultiply_assign(other, base_rate, base_rate_other);
        out
    }

    pub fn comultiply_assign(&mut self, other: &Self, base_rate: F, base_rate_other: F) {
        let one = F::one();
        let (a, a_o) = (base_rate, base_rate_other);
        let (b, d, u) = (self.belief(), self.disbelief(), self.uncertainty());
        let (b_o, d_o, u_o) = (other.belief(), other.disbelief(), other.uncertainty());

        let denom = a + a_o - a * a_o;
        let correction = if denom.abs() < F::EPS {
            F::zero()
        } else {
            (a * (one - a_o) * d * u_o + (one - a) * a_o * u * d_o) / denom
        };

        self.belief_masses = [b + b_o - b * b_o, d * d_o + correction];
    }

    /// **Dedução binomial** a partir de `ω_{y|x}` e `ω_{y|¬x}`.
    ///
    /// Denominador da taxa base induzida `≈ 0` (condicionais vácuas com
    /// taxa base extrema) faz `a_y = a_x`.
    pub fn binomial_deduction(&self, base_x: F, cond_positive: &Self, cond_negative: &Self) -> Self {
        let mut out = *self;
        out.binomial_deduction_assign(base_x, cond_positive, cond_negative);
        out
    }

    pub fn binomial_deduction_assign(&mut self, base_x: F, cond_positive: &Self, cond_negative: &Self) {
        let one = F::one();
        let a_y = Self::induced_base_rate(base_x, cond_positive, cond_negative);

        let proj_pos = cond_positive.binomial_projection(a_y);
        let proj_neg = cond_negative.binomial_projection(a_y);
        let p_apex = base_x * proj_pos + (one - base_x) * proj_neg;

        // a_y = 0 ou 1 gera inf/NaN em um dos ramos, descartado pelo mínimo
        let u_apex = float::nan_aware_min([
            (p_apex - cond_positive.belief().min(cond_negative.belief())) / a_y,
            ((one - p_apex) - cond_positive.disbelief().min(cond_negative.disbelief())) / (one - a_y),
        ]);

        let u_y_x = u_apex
            - ((u_apex - cond_positive.uncertainty()) * self.belief()
                + (u_apex - cond_negative.uncertainty()) * self.disbelief());

        let proj_x = self.binomial_projection(base_x);
        let p_y_x = proj_pos * proj_x + proj_neg * (one - proj_x);

        let belief = p_y_x - a_y * u_y_x;
        self.belief_masses = [belief, one - belief - u_y_x];
    }

    /// Taxa base induzida em `y`: `(a·b₁ + (1−a)·b₂) / (1 − (a·u₁ + (1−a)·u₂))`.
    pub(crate) fn induced_base_rate(base_x: F, cond_positive: &Self, cond_negative: &Self) -> F {
        let one = F::one();
        let nom = base_x * cond_positive.belief() + (one - base_x) * cond_negative.belief();
        let denom = one - (base_x * cond_positive.uncertainty() + (one - base_x) * cond_negative.uncertainty());
        if denom.abs() > F::EPS {
            nom / denom
        } else {
            base_x
        }
    }
}

impl<const N: usize, F: SlFloat> PartialEq for OpinionNoBase<N, F> {
    fn eq(&self, other: &Self) -> bool {
        float::abs_diff_sum(&self.belief_masses, &other.belief_masses) < F::EPS
    }
}

/// `[bel: …; disbel: …; uncertainty: …]` (binomial) ou
/// `[bel masses: …, uncertainty: …]` (N-ário).
impl<const N: usize, F: SlFloat> fmt::Display for OpinionNoBase<N, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if N == 2 {
            write!(
                f,
                "[bel: {:.6}; disbel: {:.6}; uncertainty: {:.6}]",
                self.belief_masses[0],
                self.belief_masses[1],
                self.uncertainty()
            )
        } else {
            write!(
                f,
                "[bel masses: {}uncertainty: {:.6}]",
                float::format_masses(&self.belief_masses),
                self.uncertainty()
            )
        }
    }
}
