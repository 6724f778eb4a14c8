//! # Subjective Logic — Álgebra de Opiniões e Fusão Multi-Fonte
//!
//! Biblioteca de **Subjective Logic** (Jøsang, 2016): opiniões com incerteza
//! explícita, operadores de fusão, medidas de conflito e revisão de
//! confiança em fontes.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  multi_source: TrustedFusion → TrustRevision → Conflict  │
//! │                                  └──────→ Fusion         │
//! ├──────────────────────────────────────────────────────────┤
//! │  core: OpinionNoBase · Opinion · Trust · TrustedOpinion  │
//! │        DirichletDistribution · SlFloat                   │
//! └──────────────────────────────────────────────────────────┘
//!   grid (mapas de ocupação)      persistence (cenários JSON)
//! ```
//!
//! Tudo abaixo de `persistence` é computação numérica pura sobre tipos-valor,
//! sem estado global.

/// Módulo `core` — tipos de opinião e o escalar numérico.
pub mod core;

/// Módulo `error` — erros de configuração ([`error::SlError`]).
pub mod error;

/// Módulo `grid` — fusão paralela de mapas de ocupação.
pub mod grid;

/// Módulo `multi_source` — fusão, conflito e revisão de confiança N-árias.
pub mod multi_source;

/// Módulo `persistence` — cenários de fusão em JSON.
pub mod persistence;
