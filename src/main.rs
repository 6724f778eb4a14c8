//! # sl-fusion — Execução de Cenários de Fusão Confiável
//!
//! Carrega um cenário (`data/scenario.json` por padrão, ou o caminho passado
//! como primeiro argumento), executa revisão → desconto → fusão e registra o
//! resultado no log.
//!
//! ## Exemplo de Uso
//!
//! ```bash
//! # Cenário padrão (ou embutido, se o arquivo não existir)
//! cargo run
//!
//! # Cenário específico, com os fatores de revisão no log
//! RUST_LOG=debug cargo run -- meu_cenario.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use subjective_logic::persistence::{self, SCENARIO_PATH};

fn main() -> Result<()> {
    // Nível via RUST_LOG, padrão info
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(SCENARIO_PATH));

    let scenario = persistence::load_scenario(&path)?;
    tracing::info!(
        fusion = ?scenario.fusion,
        revisions = scenario.revisions.len(),
        sources = scenario.sources.len(),
        "Executando cenário"
    );

    let outcome = scenario
        .run()
        .with_context(|| format!("Falha ao executar o cenário {}", path.display()))?;

    for (name, trust) in &outcome.revised_trusts {
        tracing::info!(source = %name, trust = %trust, "Confiança revisada");
    }
    tracing::info!(
        belief_masses = ?outcome.belief_masses,
        uncertainty = %format!("{:.4}", outcome.uncertainty),
        projection = ?outcome.projection,
        conflict = %format!("{:.4}", outcome.conflict),
        "Opinião fundida"
    );

    Ok(())
}
