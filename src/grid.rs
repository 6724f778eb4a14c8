//! # Grade de Ocupação — Fusão de Mapas e Autoavaliação
//!
//! Dois sensores produzem mapas de ocupação binomiais do mesmo ambiente
//! (`x` = "célula ocupada"). Os mapas são fundidos célula a célula com a
//! fusão cumulativa, em paralelo via `rayon`, e cada célula fundida é
//! classificada:
//!
//! | Classe | Condição |
//! |--------|----------|
//! | `Unknown` | `u > 0.5` |
//! | `Occupied` | `P(x) > 0.7` |
//! | `Free` | `P(x) < 0.3` |
//! | `Ambiguous` | demais casos |
//!
//! O **escore de autoavaliação** é a fração de células ambíguas entre as que
//! têm alguma evidência de ocupação: `ambíguas / (ocupadas + ambíguas)`.
//! Um escore alto indica sensores em desacordo.
//!
//! ## Exemplo
//!
//! ```rust
//! use subjective_logic::core::Opinion;
//! use subjective_logic::grid::OccupancyGrid;
//!
//! let lidar = OccupancyGrid::new(2, 1, vec![Opinion::new_binomial(0.9, 0.0), Opinion::new_binomial(0.0, 0.9)]).unwrap();
//! let radar = OccupancyGrid::new(2, 1, vec![Opinion::new_binomial(0.8, 0.1), Opinion::new_binomial(0.1, 0.8)]).unwrap();
//!
//! let assessment = lidar.assess(&radar).unwrap();
//! assert_eq!(assessment.histogram.occupied, 1);
//! assert_eq!(assessment.histogram.free, 1);
//! assert_eq!(assessment.score, 0.0);
//! ```

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{Opinion, SlFloat};
use crate::error::SlError;

/// Incerteza acima da qual a célula é considerada desconhecida.
const UNKNOWN_UNCERTAINTY: f64 = 0.5;
/// Probabilidade projetada acima da qual a célula é considerada ocupada.
const OCCUPIED_PROBABILITY: f64 = 0.7;
/// Probabilidade projetada abaixo da qual a célula é considerada livre.
const FREE_PROBABILITY: f64 = 0.3;

/// Classe de uma célula fundida.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CellClass {
    Free,
    Occupied,
    Ambiguous,
    Unknown,
}

impl CellClass {
    /// Classifica uma opinião binomial de ocupação.
    pub fn of<F: SlFloat>(cell: &Opinion<2, F>) -> Self {
        if cell.uncertainty() > F::from_f64_lossy(UNKNOWN_UNCERTAINTY) {
            return CellClass::Unknown;
        }
        let probability = cell.binomial_projection();
        if probability > F::from_f64_lossy(OCCUPIED_PROBABILITY) {
            CellClass::Occupied
        } else if probability < F::from_f64_lossy(FREE_PROBABILITY) {
            CellClass::Free
        } else {
            CellClass::Ambiguous
        }
    }
}

/// Contagem de células por classe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassHistogram {
    pub free: usize,
    pub occupied: usize,
    pub ambiguous: usize,
    pub unknown: usize,
}

impl ClassHistogram {
    pub fn record(&mut self, class: CellClass) {
        match class {
            CellClass::Free => self.free += 1,
            CellClass::Occupied => self.occupied += 1,
            CellClass::Ambiguous => self.ambiguous += 1,
            CellClass::Unknown => self.unknown += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.free + self.occupied + self.ambiguous + self.unknown
    }

    /// `ambíguas / (ocupadas + ambíguas)`, ou `0` sem células desses tipos.
    pub fn score(&self) -> f64 {
        let relevant = self.occupied + self.ambiguous;
        if relevant == 0 {
            return 0.0;
        }
        self.ambiguous as f64 / relevant as f64
    }
}

/// Mapa de ocupação retangular, armazenado linha a linha.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "F: Serialize", deserialize = "F: SlFloat"))]
pub struct OccupancyGrid<F: SlFloat = f64> {
    width: usize,
    height: usize,
    cells: Vec<Opinion<2, F>>,
}

/// Resultado da fusão de dois mapas.
#[derive(Debug, Clone, PartialEq)]
pub struct GridAssessment<F: SlFloat = f64> {
    pub fused: OccupancyGrid<F>,
    pub classes: Vec<CellClass>,
    pub histogram: ClassHistogram,
    pub score: f64,
}

impl<F: SlFloat> OccupancyGrid<F> {
    /// Cria o mapa a partir das células em ordem de linha.
    ///
    /// # Erros
    ///
    /// [`SlError::DimensionMismatch`] se `cells.len() != width * height`.
    pub fn new(width: usize, height: usize, cells: Vec<Opinion<2, F>>) -> Result<Self, SlError> {
        let expected = width * height;
        if cells.len() != expected {
            return Err(SlError::DimensionMismatch { expected, found: cells.len() });
        }
        Ok(Self { width, height, cells })
    }

    /// Mapa sem nenhuma observação.
    pub fn vacuous(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![Opinion::vacuous(); width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[Opinion<2, F>] {
        &self.cells
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&Opinion<2, F>> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x)
    }

    pub fn cell_mut(&mut self, x: usize, y: usize) -> Option<&mut Opinion<2, F>> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get_mut(y * self.width + x)
    }

    fn check_same_shape(&self, other: &Self) -> Result<(), SlError> {
        if self.width != other.width {
            return Err(SlError::DimensionMismatch { expected: self.width, found: other.width });
        }
        if self.height != other.height {
            return Err(SlError::DimensionMismatch { expected: self.height, found: other.height });
        }
        Ok(())
    }

    /// Fusão cumulativa célula a célula, em paralelo.
    pub fn fuse(&self, other: &Self) -> Result<Self, SlError> {
        self.check_same_shape(other)?;

        let cells: Vec<Opinion<2, F>> = self
            .cells
            .par_iter()
            .zip(other.cells.par_iter())
            .map(|(mine, theirs)| mine.cum_fuse(theirs))
            .collect();

        Ok(Self { width: self.width, height: self.height, cells })
    }

    /// Classe de cada célula, em ordem de linha.
    pub fn classify(&self) -> Vec<CellClass> {
        self.cells.par_iter().map(CellClass::of).collect()
    }

    /// Funde com `other`, classifica e calcula o escore de autoavaliação.
    pub fn assess(&self, other: &Self) -> Result<GridAssessment<F>, SlError> {
        let fused = self.fuse(other)?;
        let classes = fused.classify();

        let mut histogram = ClassHistogram::default();
        for class in &classes {
            histogram.record(*class);
        }
        let score = histogram.score();

        tracing::debug!(
            width = self.width,
            height = self.height,
            occupied = histogram.occupied,
            ambiguous = histogram.ambiguous,
            score = %score,
            "Mapas fundidos"
        );

        Ok(GridAssessment { fused, classes, histogram, score })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn row(cells: &[(f64, f64)]) -> OccupancyGrid {
        let cells: Vec<Opinion<2>> = cells.iter().map(|&(b, d)| Opinion::new_binomial(b, d)).collect();
        OccupancyGrid::new(cells.len(), 1, cells).unwrap()
    }

    #[test]
    fn test_new_rejects_wrong_cell_count() {
        let result = OccupancyGrid::<f64>::new(3, 2, vec![Opinion::vacuous(); 5]);
        assert_eq!(result, Err(SlError::DimensionMismatch { expected: 6, found: 5 }));
    }

    #[test]
    fn test_fuse_rejects_different_shapes() {
        let a = OccupancyGrid::<f64>::vacuous(3, 2);
        let b = OccupancyGrid::<f64>::vacuous(2, 3);
        assert_eq!(a.fuse(&b), Err(SlError::DimensionMismatch { expected: 3, found: 2 }));
    }

    #[test]
    fn test_fuse_matches_cellwise_cum_fuse() {
        let a = row(&[(0.5, 0.1), (0.0, 0.0), (0.2, 0.6)]);
        let b = row(&[(0.3, 0.3), (0.7, 0.1), (0.1, 0.1)]);
        let fused = a.fuse(&b).unwrap();
        for (idx, cell) in fused.cells().iter().enumerate() {
            assert_eq!(*cell, a.cells()[idx].cum_fuse(&b.cells()[idx]));
        }
    }

    #[test]
    fn test_classification_thresholds() {
        assert_eq!(CellClass::of(&Opinion::<2>::vacuous()), CellClass::Unknown);
        assert_eq!(CellClass::of(&Opinion::new_binomial(0.9, 0.0)), CellClass::Occupied);
        assert_eq!(CellClass::of(&Opinion::new_binomial(0.0, 0.9)), CellClass::Free);
        assert_eq!(CellClass::of(&Opinion::new_binomial(0.45, 0.45)), CellClass::Ambiguous);
        // u = 0.6 vence a probabilidade alta
        assert_eq!(CellClass::of(&Opinion::new_binomial(0.4, 0.0)), CellClass::Unknown);
    }

    #[test]
    fn test_disagreeing_sensors_raise_score() {
        let lidar = row(&[(0.9, 0.0), (0.9, 0.0), (0.0, 0.0)]);
        let radar = row(&[(0.9, 0.0), (0.0, 0.9), (0.0, 0.0)]);
        let assessment = lidar.assess(&radar).unwrap();

        assert_eq!(assessment.classes, vec![CellClass::Occupied, CellClass::Ambiguous, CellClass::Unknown]);
        assert_eq!(assessment.histogram.total(), 3);
        assert_abs_diff_eq!(assessment.score, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_score_without_relevant_cells() {
        let histogram = ClassHistogram { free: 4, unknown: 2, ..Default::default() };
        assert_eq!(histogram.score(), 0.0);
    }

    #[test]
    fn test_cell_access() {
        let mut grid = OccupancyGrid::<f64>::vacuous(2, 2);
        *grid.cell_mut(1, 1).unwrap() = Opinion::new_binomial(1.0, 0.0);
        assert!(grid.cell(1, 1).unwrap().is_dogmatic());
        assert!(grid.cell(0, 1).unwrap().is_vacuous());
        assert!(grid.cell(2, 0).is_none());
    }
}
