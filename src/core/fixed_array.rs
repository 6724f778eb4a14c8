//! Serialização de `[F; N]` com `N` genérico.
//!
//! O serde só implementa `Serialize`/`Deserialize` para arrays de tamanho
//! literal. Este módulo é usado via `#[serde(with = "...")]`: serializa como
//! sequência JSON e, na leitura, rejeita sequências com tamanho diferente de `N`.

use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize<S, F, const N: usize>(values: &[F; N], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    F: Serialize,
{
    serializer.collect_seq(values.iter())
}

pub fn deserialize<'de, D, F, const N: usize>(deserializer: D) -> Result<[F; N], D::Error>
where
    D: Deserializer<'de>,
    F: Deserialize<'de>,
{
    let values: Vec<F> = Vec::deserialize(deserializer)?;
    let found = values.len();
    values
        .try_into()
        .map_err(|_| D::Error::custom(format!("esperado vetor com {} elementos, recebido {}", N, found)))
}
