use nalgebra::Vector3;

use crate::controller::Pidf;
use crate::gains::Gains;

// ---------------------------------------------------------------------------
// Three-axis controller bank
// ---------------------------------------------------------------------------

/// Three independent [`Pidf`] loops addressed as x/y/z, for vector-valued
/// plants (attitude rates, 3-axis position stages). There is no
/// cross-coupling: each axis sees only its own component of the setpoint
/// and measurement, so the bank is exactly three scalar controllers with a
/// `Vector3` call surface.
#[derive(Debug, Clone, Default)]
pub struct AxisBank {
    pub x: Pidf,
    pub y: Pidf,
    pub z: Pidf,
}

impl AxisBank {
    /// Bank with the same gains on every axis. Axes that need asymmetric
    /// tuning can be reconfigured through the public fields.
    pub fn new(gains: Gains) -> Self {
        Self {
            x: Pidf::new(gains),
            y: Pidf::new(gains),
            z: Pidf::new(gains),
        }
    }

    /// Bank with per-axis gains.
    pub fn with_axis_gains(x: Gains, y: Gains, z: Gains) -> Self {
        Self {
            x: Pidf::new(x),
            y: Pidf::new(y),
            z: Pidf::new(z),
        }
    }

    pub fn set_setpoint(&mut self, setpoint: Vector3<f64>) {
        self.x.set_setpoint(setpoint.x);
        self.y.set_setpoint(setpoint.y);
        self.z.set_setpoint(setpoint.z);
    }

    /// Set the vector setpoint and derive each axis' setpoint rate for the
    /// kick feedforward term.
    pub fn set_setpoint_for_delta_t(&mut self, setpoint: Vector3<f64>, delta_t: f64) {
        self.x.set_setpoint_for_delta_t(setpoint.x, delta_t);
        self.y.set_setpoint_for_delta_t(setpoint.y, delta_t);
        self.z.set_setpoint_for_delta_t(setpoint.z, delta_t);
    }

    pub fn setpoint(&self) -> Vector3<f64> {
        Vector3::new(self.x.setpoint(), self.y.setpoint(), self.z.setpoint())
    }

    /// One full update per axis; returns the per-axis commands.
    pub fn update(&mut self, measurement: Vector3<f64>, delta_t: f64) -> Vector3<f64> {
        Vector3::new(
            self.x.update(measurement.x, delta_t),
            self.y.update(measurement.y, delta_t),
            self.z.update(measurement.z, delta_t),
        )
    }

    /// Full update with caller-supplied (possibly filtered) measurement
    /// deltas.
    pub fn update_delta(
        &mut self,
        measurement: Vector3<f64>,
        measurement_delta: Vector3<f64>,
        delta_t: f64,
    ) -> Vector3<f64> {
        Vector3::new(
            self.x.update_delta(measurement.x, measurement_delta.x, delta_t),
            self.y.update_delta(measurement.y, measurement_delta.y, delta_t),
            self.z.update_delta(measurement.z, measurement_delta.z, delta_t),
        )
    }

    /// Reset the state of every axis; gains and anti-windup configuration
    /// are kept, as with [`Pidf::reset_all`].
    pub fn reset(&mut self) {
        self.x.reset_all();
        self.y.reset_all();
        self.z.reset_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::assert_float_absolute_eq;

    #[test]
    fn axes_are_independent() {
        let mut bank = AxisBank::with_axis_gains(
            Gains::pid(1.0, 0.0, 0.0),
            Gains::pid(2.0, 0.0, 0.0),
            Gains::pid(0.5, 0.0, 0.0),
        );
        bank.set_setpoint(Vector3::new(1.0, 2.0, -4.0));

        let out = bank.update(Vector3::new(0.0, 1.0, 0.0), 0.01);
        assert_float_absolute_eq!(1.0, out.x, 1e-12); // 1.0 * (1 - 0)
        assert_float_absolute_eq!(2.0, out.y, 1e-12); // 2.0 * (2 - 1)
        assert_float_absolute_eq!(-2.0, out.z, 1e-12); // 0.5 * (-4 - 0)
    }

    #[test]
    fn vector_update_matches_scalar_controllers() {
        let gains = Gains::pid(0.3, 0.2, 0.0);
        let mut bank = AxisBank::new(gains);
        let mut scalar = Pidf::new(gains);

        bank.set_setpoint(Vector3::new(5.0, 5.0, 5.0));
        scalar.set_setpoint(5.0);

        for measurement in [0.0, 1.0, 4.0, 7.0] {
            let out = bank.update(Vector3::from_element(measurement), 1.0);
            let expected = scalar.update(measurement, 1.0);
            assert_float_absolute_eq!(expected, out.x, 1e-12);
            assert_float_absolute_eq!(expected, out.y, 1e-12);
            assert_float_absolute_eq!(expected, out.z, 1e-12);
        }
    }

    #[test]
    fn reset_clears_all_axes() {
        let mut bank = AxisBank::new(Gains::pid(0.3, 0.2, 0.1));
        bank.set_setpoint(Vector3::new(1.0, 2.0, 3.0));
        bank.update(Vector3::new(0.5, 0.5, 0.5), 0.1);

        bank.reset();
        assert_eq!(Vector3::zeros(), bank.setpoint());
        assert_eq!(0.0, bank.x.previous_error());
        assert_eq!(0.0, bank.y.error().i);
        assert_eq!(0.0, bank.z.previous_measurement());
        // Gains survive.
        assert_eq!(0.2, bank.x.ki());
    }
}
