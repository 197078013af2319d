use crate::controller::Pidf;

// ---------------------------------------------------------------------------
// Reduced-term update paths
// ---------------------------------------------------------------------------
// Cheaper entry points for controllers that only use a subset of terms.
// Each one computes exactly the matching terms of the full update, so with
// the omitted gains at zero they are drop-in equivalent; they skip
// arithmetic, they never change behavior. The PI paths integrate with the
// Euler rule.

impl Pidf {
    /// P + S only. No integral, no derivative. Still records the error and
    /// measurement history so introspection and a later switch to a fuller
    /// update stay consistent.
    pub fn update_sp(&mut self, measurement: f64) -> f64 {
        let error = self.setpoint - measurement;
        self.error_previous = error;
        self.measurement_previous = measurement;

        self.gains.kp * error + self.gains.ks * self.setpoint
    }

    /// P + S + I, Euler integration, with both anti-windup passes applied
    /// the same way the full update applies them.
    pub fn update_spi(&mut self, measurement: f64, delta_t: f64) -> f64 {
        let error = self.setpoint - measurement;
        let partial_sum = self.gains.kp * error + self.gains.ks * self.setpoint;

        if self.integral_threshold == 0.0 || error.abs() >= self.integral_threshold {
            self.error_integral += self.gains.ki * error * delta_t; // Euler
            self.clamp_integral();
        }

        self.error_previous = error;
        self.desaturate_integral(partial_sum);
        self.measurement_previous = measurement;

        partial_sum + self.error_integral
    }

    /// [`Pidf::update_spi`] plus the setpoint-derivative kick term.
    pub fn update_skpi(&mut self, measurement: f64, delta_t: f64) -> f64 {
        self.update_spi(measurement, delta_t) + self.gains.kk * self.setpoint_derivative
    }

    /// P + S + D. No integral, so no anti-windup is needed.
    pub fn update_spd(&mut self, measurement: f64, measurement_delta: f64, delta_t: f64) -> f64 {
        let error = self.setpoint - measurement;
        self.error_previous = error;
        // Minus sign as in the full update: error delta has reverse
        // polarity to measurement delta.
        self.error_derivative = -measurement_delta / delta_t;
        self.measurement_previous = measurement;

        self.gains.kp * error
            + self.gains.kd * self.error_derivative
            + self.gains.ks * self.setpoint
    }

    /// [`Pidf::update_spd`] plus the setpoint-derivative kick term.
    pub fn update_skpd(&mut self, measurement: f64, measurement_delta: f64, delta_t: f64) -> f64 {
        self.update_spd(measurement, measurement_delta, delta_t)
            + self.gains.kk * self.setpoint_derivative
    }
}
