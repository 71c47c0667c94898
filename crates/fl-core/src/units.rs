//! SI quantities used where flow states are specified.

use uom::si::f64::{
    MassDensity as UomMassDensity, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

pub type Density = UomMassDensity;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

pub mod constants {
    /// Universal gas constant [J/(kmol·K)]; pairs with molecular weights in kg/kmol.
    pub const R_UNIVERSAL: f64 = 8314.462618;

    /// Standard reference temperature [K].
    pub const T_STANDARD_K: f64 = 298.15;

    /// Standard atmosphere [Pa].
    pub const P_STANDARD_PA: f64 = 101_325.0;
}
