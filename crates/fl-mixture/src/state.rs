//! Flow-state specification: a thermodynamic pair, a velocity and a
//! composition, resolved against a mixture.

use crate::composition::SpeciesSpec;
use crate::eos;
use crate::error::{MixtureError, MixtureResult};
use crate::mixture::Mixture;
use fl_core::units::{Density, Pressure, Temperature};
use nalgebra::Vector3;

/// Independent thermodynamic pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThermoSpec {
    PT { p: Pressure, t: Temperature },
    RhoT { rho: Density, t: Temperature },
    RhoP { rho: Density, p: Pressure },
}

/// Velocity given directly [m/s] or as a Mach number along a direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VelSpec {
    Velocity(Vector3<f64>),
    Mach { mach: f64, direction: Vector3<f64> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowSpec {
    pub thermo: ThermoSpec,
    pub velocity: VelSpec,
    pub species: SpeciesSpec,
}

/// Fully resolved primitive state, SI units throughout.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowState {
    /// Absolute pressure [Pa].
    pub p: f64,
    pub t: f64,
    pub rho: f64,
    pub u: Vector3<f64>,
    /// Mass fractions, one per species.
    pub y: Vec<f64>,
    /// Mixture gas constant [J/(kg·K)].
    pub r_gas: f64,
    /// Mixture specific heat [J/(kg·K)] at `t`.
    pub cp: f64,
}

fn positive(value: f64, what: &'static str) -> MixtureResult<f64> {
    fl_core::ensure_positive(value, what).map_err(|_| MixtureError::NonPhysical {
        what: format!("{what} = {value}"),
    })
}

impl FlowSpec {
    pub fn resolve(&self, mixture: &Mixture) -> MixtureResult<FlowState> {
        let y = self.species.mass_fractions(&mixture.molecular_weights())?;
        let r_gas = mixture.gas_constant(&y)?;

        let (p, t, rho) = match self.thermo {
            ThermoSpec::PT { p, t } => {
                let p = positive(p.value, "pressure")?;
                let t = positive(t.value, "temperature")?;
                (p, t, eos::density_from_p_t_r(p, t, r_gas))
            }
            ThermoSpec::RhoT { rho, t } => {
                let rho = positive(rho.value, "density")?;
                let t = positive(t.value, "temperature")?;
                (eos::pressure_from_rho_t_r(rho, t, r_gas), t, rho)
            }
            ThermoSpec::RhoP { rho, p } => {
                let rho = positive(rho.value, "density")?;
                let p = positive(p.value, "pressure")?;
                (p, eos::temperature_from_rho_p_r(rho, p, r_gas), rho)
            }
        };

        let cp = mixture.cp(t, &y)?;
        eos::check_gas(cp, r_gas)?;

        let u = match self.velocity {
            VelSpec::Velocity(u) => u,
            VelSpec::Mach { mach, direction } => {
                if !mach.is_finite() || mach < 0.0 {
                    return Err(MixtureError::NonPhysical {
                        what: format!("Mach number = {mach}"),
                    });
                }
                let dir = direction.try_normalize(1e-300).ok_or_else(|| {
                    MixtureError::InvalidArg {
                        what: "Mach direction has zero length".to_string(),
                    }
                })?;
                dir * (mach * eos::sound_speed_from_cp_r_t(cp, r_gas, t))
            }
        };
        if !u.iter().all(|c| c.is_finite()) {
            return Err(MixtureError::NonPhysical {
                what: "non-finite velocity".to_string(),
            });
        }

        Ok(FlowState {
            p,
            t,
            rho,
            u,
            y,
            r_gas,
            cp,
        })
    }
}

impl FlowState {
    /// Pressure relative to `p_ambient` [Pa].
    pub fn gage_pressure(&self, p_ambient: f64) -> f64 {
        self.p - p_ambient
    }

    pub fn gamma(&self) -> f64 {
        eos::gamma_from_cp_r(self.cp, self.r_gas)
    }

    pub fn sound_speed(&self) -> f64 {
        eos::sound_speed_from_cp_r_t(self.cp, self.r_gas, self.t)
    }

    pub fn mach(&self) -> f64 {
        self.u.norm() / self.sound_speed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::SpeciesProperties;
    use crate::thermo::ThermochemistryModel;
    use fl_core::numeric::{Tolerances, nearly_equal};
    use fl_core::units::{k, kg_per_m3, pa};

    fn air() -> Mixture {
        Mixture::from_species(vec![SpeciesProperties::new("AIR", 28.96).with_thermochemistry(
            ThermochemistryModel::CaloricallyPerfect {
                specific_heat: 1005.0,
            },
        )])
    }

    fn spec(thermo: ThermoSpec, velocity: VelSpec) -> FlowSpec {
        FlowSpec {
            thermo,
            velocity,
            species: SpeciesSpec::pure(),
        }
    }

    #[test]
    fn pt_spec_gives_ideal_gas_density() {
        let s = spec(
            ThermoSpec::PT {
                p: pa(101_325.0),
                t: k(300.0),
            },
            VelSpec::Velocity(Vector3::new(100.0, 0.0, 0.0)),
        );
        let state = s.resolve(&air()).unwrap();
        assert!((state.rho - 1.1764).abs() < 1e-3, "rho = {}", state.rho);
        assert_eq!(state.gage_pressure(101_325.0), 0.0);
        assert_eq!(state.y, vec![1.0]);
    }

    #[test]
    fn thermo_pairs_agree() {
        let m = air();
        let vel = VelSpec::Velocity(Vector3::zeros());
        let pt = spec(
            ThermoSpec::PT {
                p: pa(2.0e5),
                t: k(450.0),
            },
            vel,
        )
        .resolve(&m)
        .unwrap();
        let rt = spec(
            ThermoSpec::RhoT {
                rho: kg_per_m3(pt.rho),
                t: k(450.0),
            },
            vel,
        )
        .resolve(&m)
        .unwrap();
        let rp = spec(
            ThermoSpec::RhoP {
                rho: kg_per_m3(pt.rho),
                p: pa(2.0e5),
            },
            vel,
        )
        .resolve(&m)
        .unwrap();
        let tol = Tolerances::new(0.0, 1e-12);
        assert!(nearly_equal(rt.p, 2.0e5, tol));
        assert!(nearly_equal(rp.t, 450.0, tol));
    }

    #[test]
    fn mach_spec_scales_direction() {
        let s = spec(
            ThermoSpec::PT {
                p: pa(101_325.0),
                t: k(300.0),
            },
            VelSpec::Mach {
                mach: 2.0,
                direction: Vector3::new(0.0, 3.0, 0.0),
            },
        );
        let state = s.resolve(&air()).unwrap();
        assert_eq!(state.u.x, 0.0);
        assert!(nearly_equal(state.mach(), 2.0, Tolerances::default()));
        assert!((state.u.y - 2.0 * 347.2).abs() < 1.0);
    }

    #[test]
    fn zero_direction_is_rejected() {
        let s = spec(
            ThermoSpec::PT {
                p: pa(101_325.0),
                t: k(300.0),
            },
            VelSpec::Mach {
                mach: 0.5,
                direction: Vector3::zeros(),
            },
        );
        assert!(s.resolve(&air()).is_err());
    }

    #[test]
    fn non_positive_pressure_is_rejected() {
        let s = spec(
            ThermoSpec::PT {
                p: pa(-1.0),
                t: k(300.0),
            },
            VelSpec::Velocity(Vector3::zeros()),
        );
        assert!(matches!(s.resolve(&air()), Err(MixtureError::NonPhysical { .. })));
    }
}
