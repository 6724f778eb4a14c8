//! # Persistência — Cenários de Fusão em Disco
//!
//! Um **cenário** descreve uma execução completa de fusão confiável: a
//! dimensão do domínio, o tipo de fusão, as revisões ponderadas e os relatos
//! de cada fonte (confiança + opinião). É salvo como JSON em
//! `data/scenario.json`.
//!
//! ## Formato
//!
//! ```json
//! {
//!   "dimension": 2,
//!   "fusion": "CUMULATIVE",
//!   "revisions": [{ "revision": "REFERENCE_FUSION", "conflict": "BELIEF_AVERAGE", "weight": 1.0 }],
//!   "sources": [
//!     {
//!       "name": "analista-1",
//!       "trust": { "belief_masses": [0.3, 0.0], "prior": [0.9, 0.1] },
//!       "belief_masses": [1.0, 0.0],
//!       "prior": [0.1, 0.9]
//!     }
//!   ]
//! }
//! ```
//!
//! `revisions` e os `prior` são opcionais; sem prior a taxa base neutra
//! (`1/N`) é usada.
//!
//! ## Dimensão em tempo de execução
//!
//! As opiniões têm dimensão fixada em compilação. O cenário carrega a
//! dimensão como número e [`Scenario::run`] despacha para `2..=5`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{Opinion, Trust, TrustedOpinion};
use crate::error::SlError;
use crate::multi_source::{
    Conflict, ConflictType, FusionType, TrustRevisionType, TrustedFusion, WeightedRevision,
};

/// Caminho padrão do cenário (relativo à raiz do projeto).
pub const SCENARIO_PATH: &str = "data/scenario.json";

/// Relato de uma fonte: a confiança nela e a opinião que ela emite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceReport {
    pub name: String,
    pub trust: Trust,
    pub belief_masses: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prior: Option<Vec<f64>>,
}

/// Execução de fusão confiável descrita em disco.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub dimension: usize,
    pub fusion: FusionType,
    #[serde(default)]
    pub revisions: Vec<WeightedRevision>,
    pub sources: Vec<SourceReport>,
}

/// Resultado de [`Scenario::run`], já sem dimensão estática.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub belief_masses: Vec<f64>,
    pub uncertainty: f64,
    pub prior: Vec<f64>,
    pub projection: Vec<f64>,
    /// Conflito médio entre os relatos brutos.
    pub conflict: f64,
    /// Confiança de cada fonte após a revisão, na ordem de `sources`.
    pub revised_trusts: Vec<(String, Trust)>,
}

impl Scenario {
    /// Executa o cenário: revisão → desconto → fusão.
    ///
    /// # Erros
    ///
    /// - [`SlError::UnsupportedDimension`] para dimensões fora de `2..=5`
    /// - [`SlError::DimensionMismatch`] se alguma fonte tiver massas ou prior
    ///   com tamanho diferente da dimensão
    /// - erros de configuração da revisão de confiança
    pub fn run(&self) -> Result<ScenarioOutcome> {
        match self.dimension {
            2 => self.run_with::<2>(),
            3 => self.run_with::<3>(),
            4 => self.run_with::<4>(),
            5 => self.run_with::<5>(),
            other => Err(SlError::UnsupportedDimension(other).into()),
        }
    }

    fn run_with<const N: usize>(&self) -> Result<ScenarioOutcome> {
        let mut trusted_opinions = self
            .sources
            .iter()
            .map(|source| {
                source
                    .to_trusted_opinion::<N>()
                    .with_context(|| format!("Fonte '{}' incompatível com a dimensão {}", source.name, N))
            })
            .collect::<Result<Vec<_>>>()?;

        let raw = TrustedOpinion::extract_opinions(&trusted_opinions);
        let conflict = Conflict::conflict(ConflictType::Average, &raw);

        let fused = TrustedFusion::fuse_opinions_assign(self.fusion, &self.revisions, &mut trusted_opinions)
            .context("Falha na fusão confiável")?;

        let revised_trusts = self
            .sources
            .iter()
            .zip(&trusted_opinions)
            .map(|(source, top)| (source.name.clone(), *top.trust()))
            .collect();

        Ok(ScenarioOutcome {
            belief_masses: fused.belief_masses().to_vec(),
            uncertainty: fused.uncertainty(),
            prior: fused.prior().to_vec(),
            projection: fused.projection().to_vec(),
            conflict,
            revised_trusts,
        })
    }
}

impl SourceReport {
    fn to_trusted_opinion<const N: usize>(&self) -> Result<TrustedOpinion<Opinion<N>>, SlError> {
        let belief_masses = fixed::<N>(&self.belief_masses)?;
        let opinion = match &self.prior {
            Some(prior) => Opinion::new(belief_masses, fixed::<N>(prior)?),
            None => Opinion::from(belief_masses),
        };

        if !opinion.is_valid() || !self.trust.is_valid() {
            tracing::warn!(source = %self.name, "Relato inválido, resultado pode não ser uma opinião válida");
        }
        Ok(TrustedOpinion::new(self.trust, opinion))
    }
}

fn fixed<const N: usize>(values: &[f64]) -> Result<[f64; N], SlError> {
    values
        .try_into()
        .map_err(|_| SlError::DimensionMismatch { expected: N, found: values.len() })
}

/// Cenário embutido: três analistas, dois afirmando `x` e um `¬x`.
pub fn demo_scenario() -> Scenario {
    let source = |name: &str, trust: Trust, belief_masses: Vec<f64>| SourceReport {
        name: name.to_string(),
        trust,
        belief_masses,
        prior: Some(vec![0.1, 0.9]),
    };

    Scenario {
        dimension: 2,
        fusion: FusionType::Cumulative,
        revisions: vec![WeightedRevision::unit(
            TrustRevisionType::ReferenceFusion,
            ConflictType::BeliefAverage,
        )],
        sources: vec![
            source("analista-1", Trust::new_binomial_with_prior(0.3, 0.0, 0.9), vec![1.0, 0.0]),
            source("analista-2", Trust::new_binomial_with_prior(0.7, 0.0, 0.9), vec![0.0, 1.0]),
            source("analista-3", Trust::new_binomial_with_prior(0.4, 0.1, 0.9), vec![1.0, 0.0]),
        ],
    }
}

/// Salva o cenário como JSON pretty-printed, criando o diretório se preciso.
///
/// # Erros
///
/// Retorna erro se não conseguir criar o diretório, serializar,
/// ou escrever no arquivo.
pub fn save_scenario(path: &Path, scenario: &Scenario) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Falha ao criar diretório {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(scenario).context("Falha ao serializar cenário")?;
    std::fs::write(path, json).with_context(|| format!("Falha ao escrever {}", path.display()))?;
    Ok(())
}

/// Carrega o cenário do disco, ou o cenário embutido se o arquivo não existir.
///
/// # Erros
///
/// Retorna erro se o arquivo existir mas estiver corrompido
/// ou incompatível com o formato atual.
pub fn load_scenario(path: &Path) -> Result<Scenario> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "Cenário não encontrado, usando cenário embutido");
        return Ok(demo_scenario());
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Falha ao ler {}", path.display()))?;
    let scenario: Scenario = serde_json::from_str(&json)
        .with_context(|| format!("Falha ao desserializar {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        dimension = scenario.dimension,
        sources = scenario.sources.len(),
        "Cenário carregado"
    );
    Ok(scenario)
}
