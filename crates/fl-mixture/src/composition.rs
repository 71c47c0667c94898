//! Molar/mass fraction conversions and species composition specification.

use crate::error::{MixtureError, MixtureResult};

/// Absolute tolerance on a fraction sum being one.
pub const SUM_TOLERANCE: f64 = 1e-8;

/// Mixture molecular weight from mole fractions: `W = Σ X_i W_i`.
pub fn mixture_mw_from_x(x: &[f64], w: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), w.len());
    x.iter().zip(w).map(|(x, w)| x * w).sum()
}

/// Mixture molecular weight from mass fractions: `W = 1 / Σ (Y_i / W_i)`.
pub fn mixture_mw_from_y(y: &[f64], w: &[f64]) -> f64 {
    debug_assert_eq!(y.len(), w.len());
    1.0 / y.iter().zip(w).map(|(y, w)| y / w).sum::<f64>()
}

/// Mass fractions from mole fractions: `Y_i = X_i W_i / W`.
pub fn y_from_x(x: &[f64], w: &[f64], y: &mut [f64]) {
    debug_assert!(x.len() == w.len() && x.len() == y.len());
    let mw = mixture_mw_from_x(x, w);
    for ((y, x), w) in y.iter_mut().zip(x).zip(w) {
        *y = x * w / mw;
    }
}

/// Mole fractions from mass fractions: `X_i = Y_i W / W_i`.
pub fn x_from_y(y: &[f64], w: &[f64], x: &mut [f64]) {
    debug_assert!(x.len() == w.len() && x.len() == y.len());
    let mw = mixture_mw_from_y(y, w);
    for ((x, y), w) in x.iter_mut().zip(y).zip(w) {
        *x = y * mw / w;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FractionBasis {
    Molar,
    Mass,
}

/// Species composition given as either all N fractions (must sum to one) or
/// the first N-1 (the last species takes the remainder).
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesSpec {
    pub basis: FractionBasis,
    pub fractions: Vec<f64>,
}

impl SpeciesSpec {
    pub fn molar(fractions: Vec<f64>) -> Self {
        Self {
            basis: FractionBasis::Molar,
            fractions,
        }
    }

    pub fn mass(fractions: Vec<f64>) -> Self {
        Self {
            basis: FractionBasis::Mass,
            fractions,
        }
    }

    /// Single-species mixture shorthand.
    pub fn pure() -> Self {
        Self::mass(Vec::new())
    }

    /// Complete N fractions, still in this basis.
    pub fn resolve(&self, n_species: usize) -> MixtureResult<Vec<f64>> {
        if n_species == 0 {
            return Err(MixtureError::InvalidArg {
                what: "mixture has no species".to_string(),
            });
        }

        for (i, &f) in self.fractions.iter().enumerate() {
            if !f.is_finite() || !(0.0..=1.0).contains(&f) {
                return Err(MixtureError::NonPhysical {
                    what: format!("fraction[{i}] = {f} outside [0, 1]"),
                });
            }
        }
        let sum: f64 = self.fractions.iter().sum();

        if self.fractions.len() == n_species {
            if (sum - 1.0).abs() > SUM_TOLERANCE {
                return Err(MixtureError::NonPhysical {
                    what: format!("{n_species} fractions sum to {sum}, expected 1"),
                });
            }
            Ok(self.fractions.iter().map(|f| f / sum).collect())
        } else if self.fractions.len() + 1 == n_species {
            if sum > 1.0 + SUM_TOLERANCE {
                return Err(MixtureError::NonPhysical {
                    what: format!("first {} fractions sum to {sum} > 1", self.fractions.len()),
                });
            }
            let mut full = self.fractions.clone();
            full.push((1.0 - sum).max(0.0));
            Ok(full)
        } else {
            Err(MixtureError::InvalidArg {
                what: format!(
                    "expected {n_species} or {} fractions, got {}",
                    n_species - 1,
                    self.fractions.len()
                ),
            })
        }
    }

    /// Complete mass fractions for species with molecular weights `w`.
    pub fn mass_fractions(&self, w: &[f64]) -> MixtureResult<Vec<f64>> {
        let full = self.resolve(w.len())?;
        match self.basis {
            FractionBasis::Mass => Ok(full),
            FractionBasis::Molar => {
                let mut y = vec![0.0; full.len()];
                y_from_x(&full, w, &mut y);
                Ok(y)
            }
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use fl_core::numeric::{Tolerances, nearly_equal};
    use proptest::prelude::*;

    fn weights_and_fractions() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
        (1usize..8).prop_flat_map(|n| {
            (
                prop::collection::vec(1.0_f64..200.0, n),
                prop::collection::vec(0.001_f64..1.0, n),
            )
        })
    }

    proptest! {
        #[test]
        fn mole_mass_round_trip((w, raw) in weights_and_fractions()) {
            let total: f64 = raw.iter().sum();
            let x: Vec<f64> = raw.iter().map(|v| v / total).collect();
            let mut y = vec![0.0; x.len()];
            let mut x_back = vec![0.0; x.len()];
            y_from_x(&x, &w, &mut y);
            x_from_y(&y, &w, &mut x_back);

            let tol = Tolerances { abs: 1e-12, rel: 1e-10 };
            prop_assert!(nearly_equal(y.iter().sum::<f64>(), 1.0, tol));
            for (a, b) in x.iter().zip(&x_back) {
                prop_assert!(nearly_equal(*a, *b, tol));
            }
            prop_assert!(nearly_equal(mixture_mw_from_x(&x, &w), mixture_mw_from_y(&y, &w), tol));
        }

        #[test]
        fn n_minus_one_resolution_sums_to_one(raw in prop::collection::vec(0.0_f64..1.0, 1..6)) {
            let total: f64 = raw.iter().sum::<f64>() + 1.0;
            let partial: Vec<f64> = raw.iter().map(|v| v / total).collect();
            let full = SpeciesSpec::mass(partial.clone()).resolve(partial.len() + 1).unwrap();
            prop_assert_eq!(full.len(), partial.len() + 1);
            prop_assert!(nearly_equal(full.iter().sum::<f64>(), 1.0, Tolerances::default()));
        }
    }
}
