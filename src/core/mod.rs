//! # Módulo Core — Álgebra de Opiniões
//!
//! Este módulo agrupa os **tipos fundamentais** da Subjective Logic. Todos são
//! tipos-valor (`Copy` quando possível), genéricos sobre a dimensão `N` e o
//! escalar `F` (`f32` ou `f64`), sem estado global.
//!
//! - [`OpinionNoBase`] — massas de crença, incerteza implícita
//! - [`Opinion`] — massas de crença + taxa base (prior)
//! - [`Trust`] — opinião binomial de confiança em uma fonte
//! - [`TrustedOpinion`] — opinião de uma fonte + confiança nela
//! - [`DirichletDistribution`] — representação dual baseada em evidência
//! - [`SubjectiveOpinion`] — interface comum usada pelos operadores multi-fonte
//!
//! ## Analogia com o Mundo Real
//!
//! Pense em cada opinião como o **relato de uma testemunha**:
//! - As massas de crença são o que ela afirma ter visto
//! - A incerteza é o quanto ela admite não saber
//! - O prior é o que se esperaria antes de ouvi-la
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use subjective_logic::core::{Opinion, Trust, TrustedOpinion};
//!
//! let relato = Opinion::new_binomial(0.8, 0.1);
//! let fonte = TrustedOpinion::new(Trust::new_binomial(0.5, 0.0), relato);
//!
//! // desconto pela confiança: a incerteza aumenta
//! assert!(fonte.discounted_opinion().uncertainty() > relato.uncertainty());
//! ```

/// Sub-módulo com o trait [`SlFloat`] e helpers numéricos.
pub mod float;

/// Serialização de arrays de tamanho genérico.
pub mod fixed_array;

/// Sub-módulo com a implementação de [`OpinionNoBase`].
pub mod opinion_no_base;

/// Sub-módulo com a implementação de [`Opinion`] e do alias [`Trust`].
pub mod opinion;

/// Sub-módulo com a implementação de [`DirichletDistribution`].
pub mod dirichlet;

/// Sub-módulo com o trait [`SubjectiveOpinion`].
pub mod subjective_opinion;

/// Sub-módulo com a implementação de [`TrustedOpinion`].
pub mod trusted_opinion;

// Re-exports para conveniência — permite usar `crate::core::Opinion` diretamente.
pub use dirichlet::DirichletDistribution;
pub use float::SlFloat;
pub use opinion::{Opinion, Trust};
pub use opinion_no_base::OpinionNoBase;
pub use subjective_opinion::SubjectiveOpinion;
pub use trusted_opinion::TrustedOpinion;
