// hn-core/src/units.rs

use uom::si::f64::{
    Acceleration as UomAcceleration, Area as UomArea, AvailableEnergy as UomAvailableEnergy,
    DynamicViscosity as UomDynamicViscosity, KinematicViscosity as UomKinematicViscosity,
    Length as UomLength, MassDensity as UomMassDensity, Pressure as UomPressure,
    Ratio as UomRatio, Velocity as UomVelocity, VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Accel = UomAcceleration;
pub type Area = UomArea;
/// Energy per unit mass (J/kg), the unit of a Bernoulli residual.
pub type SpecEnergy = UomAvailableEnergy;
pub type DynVisc = UomDynamicViscosity;
pub type KinVisc = UomKinematicViscosity;
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type Pressure = UomPressure;
pub type Ratio = UomRatio;
pub type Velocity = UomVelocity;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn m3ps(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_second;
    VolumeRate::new::<cubic_meter_per_second>(v)
}

#[inline]
pub fn kgpm3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn pas(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::pascal_second;
    DynVisc::new::<pascal_second>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn jpkg(v: f64) -> SpecEnergy {
    use uom::si::available_energy::joule_per_kilogram;
    SpecEnergy::new::<joule_per_kilogram>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

/// Flow area of a circular bore.
#[inline]
pub fn circle_area(diameter: Length) -> Area {
    diameter * diameter * (std::f64::consts::PI / 4.0)
}

pub mod constants {
    use super::*;

    pub const G0_MPS2: f64 = 9.806_65;

    #[inline]
    pub fn g0() -> Accel {
        use uom::si::acceleration::meter_per_second_squared;
        Accel::new::<meter_per_second_squared>(G0_MPS2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _p = pa(101_325.0);
        let _v = mps(1.5);
        let _q = m3ps(0.01);
        let _rho = kgpm3(998.2);
        let _mu = pas(1.0e-3);
        let _l = m(2.0);
        let _a = m2(0.5);
        let _e = jpkg(10.0);
        let _r = unitless(0.5);
        let _g0 = constants::g0();
    }

    #[test]
    fn pressure_over_density_is_specific_energy() {
        let e: SpecEnergy = pa(1000.0) / kgpm3(1000.0);
        assert!((e.value - 1.0).abs() < 1e-12);
        let kinetic: SpecEnergy = mps(2.0) * mps(2.0) * 0.5;
        assert!((kinetic.value - 2.0).abs() < 1e-12);
    }

    #[test]
    fn circle_area_of_unit_diameter() {
        let a = circle_area(m(1.0));
        assert!((a.value - std::f64::consts::PI / 4.0).abs() < 1e-12);
    }
}
