//! # Erros — Combinações de Configuração Inválidas
//!
//! Casos numéricos degenerados (denominadores próximos de zero, opiniões
//! dogmáticas) **não são erros**: cada operador define o próprio fallback.
//! Violações de pré-condição (máscara com tamanho diferente da lista) são
//! asserções. Sobram os erros de configuração, que sempre chegam ao chamador:
//!
//! | Variante | Quando ocorre |
//! |----------|---------------|
//! | `NoBeliefFusionType` | revisão por fusão de referência com conflito `ACCUMULATE`/`AVERAGE` |
//! | `DimensionMismatch` | grade com número de células diferente de `largura × altura` |
//! | `UnsupportedDimension` | cenário com dimensão fora de `2..=5` |

use thiserror::Error;

use crate::multi_source::ConflictType;

/// Erros de configuração da biblioteca.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlError {
    /// O tipo de conflito não tem fusão de referência associada.
    #[error("tipo de conflito {0:?} não possui fusão de crença associada")]
    NoBeliefFusionType(ConflictType),

    #[error("dimensão incompatível: esperado {expected}, recebido {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("dimensão {0} não suportada (esperado 2..=5)")]
    UnsupportedDimension(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_offending_value() {
        let err = SlError::NoBeliefFusionType(ConflictType::Accumulate);
        assert!(err.to_string().contains("Accumulate"));

        let err = SlError::DimensionMismatch { expected: 6, found: 4 };
        assert_eq!(err.to_string(), "dimensão incompatível: esperado 6, recebido 4");

        assert!(SlError::UnsupportedDimension(9).to_string().contains('9'));
    }
}
