//! # SlFloat — Escalar Numérico das Opiniões
//!
//! Todas as opiniões são genéricas sobre o tipo de ponto flutuante (`f32` ou `f64`).
//! O trait [`SlFloat`] reúne as capacidades numéricas necessárias e fixa o
//! **epsilon** usado em todas as comparações e nos limites degenerados
//! (denominadores próximos de zero, opiniões dogmáticas).
//!
//! | Tipo | Epsilon |
//! |------|---------|
//! | `f64` | `1e-10` |
//! | `f32` | `1e-5` |
//!
//! Os helpers deste módulo operam sobre fatias e arrays de tamanho fixo,
//! sem alocação, para que as fórmulas das opiniões fiquem livres de
//! containers dinâmicos.

use std::fmt::{Debug, Display};
use std::iter::Sum;

use num_traits::{Float, NumAssign};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Escalar usado pelas opiniões, distribuições de Dirichlet e operadores multi-fonte.
pub trait SlFloat:
    Float + NumAssign + Sum + Debug + Display + Default + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Tolerância usada em comparações e na detecção de casos degenerados.
    const EPS: Self;

    /// Converte uma contagem (dimensão, número de fontes) para o escalar.
    fn from_count(n: usize) -> Self;

    /// Converte de `f64`, com perda de precisão para `f32`.
    fn from_f64_lossy(value: f64) -> Self;

    /// Converte para `f64` (sem perda para ambos os tipos suportados).
    fn to_f64_lossy(self) -> f64;

    /// `0.5` no tipo escalar.
    fn half() -> Self {
        Self::one() / (Self::one() + Self::one())
    }

    /// `2.0` no tipo escalar.
    fn two() -> Self {
        Self::one() + Self::one()
    }
}

impl SlFloat for f64 {
    const EPS: f64 = 1e-10;

    fn from_count(n: usize) -> Self {
        n as f64
    }

    fn from_f64_lossy(value: f64) -> Self {
        value
    }

    fn to_f64_lossy(self) -> f64 {
        self
    }
}

impl SlFloat for f32 {
    const EPS: f32 = 1e-5;

    fn from_count(n: usize) -> Self {
        n as f32
    }

    fn from_f64_lossy(value: f64) -> Self {
        value as f32
    }

    fn to_f64_lossy(self) -> f64 {
        self as f64
    }
}

/// Soma dos elementos de uma fatia.
pub fn sum<F: SlFloat>(values: &[F]) -> F {
    values.iter().copied().sum()
}

/// Distribuição neutra: `1/N` em cada hipótese.
pub fn neutral<const N: usize, F: SlFloat>() -> [F; N] {
    [F::one() / F::from_count(N); N]
}

/// Média elemento a elemento de dois arrays.
pub fn midpoint<const N: usize, F: SlFloat>(a: &[F; N], b: &[F; N]) -> [F; N] {
    let mut out = [F::zero(); N];
    for idx in 0..N {
        out[idx] = (a[idx] + b[idx]) * F::half();
    }
    out
}

/// Soma das diferenças absolutas elemento a elemento (usada pelo `PartialEq`).
pub fn abs_diff_sum<F: SlFloat>(a: &[F], b: &[F]) -> F {
    a.iter().zip(b.iter()).map(|(x, y)| (*x - *y).abs()).sum()
}

/// Mínimo que ignora `NaN` (semântica `minNum` do IEEE 754).
///
/// Divisões por zero nas fórmulas de dedução produzem `inf` ou `NaN`;
/// ambos precisam ser descartados pelo mínimo.
pub fn nan_aware_min<F: SlFloat>(values: impl IntoIterator<Item = F>) -> F {
    values
        .into_iter()
        .fold(F::infinity(), |acc, value| acc.min(value))
}

/// Formata uma lista de massas no estilo `a, b, c, ` com seis casas decimais.
pub(crate) fn format_masses<F: SlFloat>(values: &[F]) -> String {
    values.iter().map(|v| format!("{:.6}, ", v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eps_per_type() {
        assert_eq!(<f64 as SlFloat>::EPS, 1e-10);
        assert_eq!(<f32 as SlFloat>::EPS, 1e-5);
    }

    #[test]
    fn test_neutral_sums_to_one() {
        let distr: [f64; 7] = neutral();
        assert!((sum(&distr) - 1.0).abs() < 1e-12);
    }

    /// `NaN` e `inf` não podem vencer o mínimo
    #[test]
    fn test_nan_aware_min() {
        let min = nan_aware_min([f64::NAN, 0.3, f64::INFINITY, 0.7]);
        assert!((min - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_format_masses() {
        assert_eq!(format_masses(&[0.5_f64, 0.25]), "0.500000, 0.250000, ");
    }
}
