use crate::gains::{ErrorTerms, Gains};

// ---------------------------------------------------------------------------
// PID controller with setpoint weighting and feedforward (single axis)
// ---------------------------------------------------------------------------

/// Single-loop PID controller with two open-loop terms: a setpoint weight
/// (ks) and a setpoint-derivative "kick" feedforward (kk).
///
/// The controller never samples time itself; every update takes the elapsed
/// `delta_t` from the caller's loop, which may be fixed or variable.
/// `delta_t` must be a positive elapsed time — a zero `delta_t` divides by
/// zero in the derivative path and the resulting inf/NaN propagates to the
/// output unguarded.
///
/// The derivative is computed from the measurement delta, not the error
/// delta, so it is immune to setpoint steps, and the caller may filter the
/// measurement delta before passing it in (see [`Pidf::update_delta`] and
/// [`Pidf::previous_measurement`]).
///
/// Not internally synchronized: one instance per control loop, updates
/// serialized by the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pidf {
    pub(crate) gains: Gains,
    /// Saved value of gains.ki, so integration can be switched off and back
    /// on without losing the configured gain.
    pub(crate) ki_saved: f64,
    pub(crate) measurement_previous: f64,

    pub(crate) setpoint: f64,
    pub(crate) setpoint_previous: f64,
    pub(crate) setpoint_derivative: f64,

    pub(crate) error_previous: f64,
    /// Accumulated integral term, stored already multiplied by gains.ki.
    pub(crate) error_integral: f64,
    /// Last derivative, unscaled by gains.kd.
    pub(crate) error_derivative: f64,

    // Anti-windup configuration. Zero means "not set" throughout: only an
    // integral_max > 0 activates the upper clamp, only an integral_min < 0
    // the lower clamp, and only an output_saturation_value > 0 the
    // saturation-aware clamp.
    pub(crate) integral_max: f64,
    pub(crate) integral_min: f64,
    pub(crate) integral_threshold: f64,
    pub(crate) output_saturation_value: f64,
}

impl Pidf {
    /// Controller with the given gains; all state starts at zero.
    pub fn new(gains: Gains) -> Self {
        Self {
            gains,
            ki_saved: gains.ki,
            ..Self::default()
        }
    }

    // -----------------------------------------------------------------------
    // Gain configuration
    // -----------------------------------------------------------------------

    pub fn set_kp(&mut self, kp: f64) {
        self.gains.kp = kp;
    }

    /// Set the integral gain. Also updates the saved copy, so a later
    /// integration-off/on round trip restores this value.
    pub fn set_ki(&mut self, ki: f64) {
        self.gains.ki = ki;
        self.ki_saved = ki;
    }

    pub fn set_kd(&mut self, kd: f64) {
        self.gains.kd = kd;
    }

    pub fn set_ks(&mut self, ks: f64) {
        self.gains.ks = ks;
    }

    pub fn set_kk(&mut self, kk: f64) {
        self.gains.kk = kk;
    }

    pub fn set_gains(&mut self, gains: Gains) {
        self.gains = gains;
        self.ki_saved = gains.ki;
    }

    pub fn kp(&self) -> f64 {
        self.gains.kp
    }

    /// The configured integral gain, whether integration is currently
    /// switched on or not.
    pub fn ki(&self) -> f64 {
        self.ki_saved
    }

    pub fn kd(&self) -> f64 {
        self.gains.kd
    }

    pub fn ks(&self) -> f64 {
        self.gains.ks
    }

    pub fn kk(&self) -> f64 {
        self.gains.kk
    }

    /// The configured gain set. Reports the saved integral gain, whether
    /// integration is currently switched on or not.
    pub fn gains(&self) -> Gains {
        Gains {
            ki: self.ki_saved,
            ..self.gains
        }
    }

    // -----------------------------------------------------------------------
    // Integration switch and anti-windup configuration
    // -----------------------------------------------------------------------

    pub fn reset_integral(&mut self) {
        self.error_integral = 0.0;
    }

    /// Stop integrating and drain the accumulator. The configured ki is
    /// saved and can be restored with [`Pidf::switch_integration_on`].
    pub fn switch_integration_off(&mut self) {
        self.ki_saved = self.gains.ki;
        self.gains.ki = 0.0;
        self.error_integral = 0.0;
    }

    /// Resume integrating with the saved ki, starting from an empty
    /// accumulator.
    pub fn switch_integration_on(&mut self) {
        self.gains.ki = self.ki_saved;
        self.error_integral = 0.0;
    }

    /// Upper clamp on the integral accumulator. Active only when > 0;
    /// the lower bound is configured independently, so a controller with
    /// only `integral_max` set is unclamped on the negative side.
    pub fn set_integral_max(&mut self, integral_max: f64) {
        self.integral_max = integral_max;
    }

    /// Lower clamp on the integral accumulator. Active only when < 0.
    pub fn set_integral_min(&mut self, integral_min: f64) {
        self.integral_min = integral_min;
    }

    /// Symmetric clamp: sets `integral_max = limit` and
    /// `integral_min = -limit`.
    pub fn set_integral_limit(&mut self, integral_limit: f64) {
        self.integral_max = integral_limit;
        self.integral_min = -integral_limit;
    }

    /// Error deadband below which integration is suppressed. Avoids winding
    /// the integral up on small oscillations, e.g. inside a motor's
    /// backlash zone. Zero (the default) integrates on any error.
    pub fn set_integral_threshold(&mut self, integral_threshold: f64) {
        self.integral_threshold = integral_threshold;
    }

    /// Output magnitude at which the actuator saturates. When > 0, the
    /// integral accumulator is clamped so the output never exceeds this
    /// value through integral action alone; excess integral past saturation
    /// cannot speed convergence and only turns into overshoot once the
    /// proportional term falls back. Zero disables the check.
    pub fn set_output_saturation_value(&mut self, output_saturation_value: f64) {
        self.output_saturation_value = output_saturation_value;
    }

    // -----------------------------------------------------------------------
    // Setpoint management
    // -----------------------------------------------------------------------

    /// Set the target, keeping the previous one for delta queries. The
    /// setpoint derivative is left untouched; use
    /// [`Pidf::set_setpoint_for_delta_t`] or
    /// [`Pidf::set_setpoint_derivative`] when the kick term is in use.
    pub fn set_setpoint(&mut self, setpoint: f64) {
        self.setpoint_previous = self.setpoint;
        self.setpoint = setpoint;
    }

    /// Set the target and derive its rate of change from the elapsed time
    /// since the previous setpoint.
    pub fn set_setpoint_for_delta_t(&mut self, setpoint: f64, delta_t: f64) {
        self.setpoint_previous = self.setpoint;
        self.setpoint = setpoint;
        self.setpoint_derivative = (self.setpoint - self.setpoint_previous) / delta_t;
    }

    /// Supply the setpoint rate externally, e.g. from a trajectory planner
    /// that knows the commanded velocity exactly.
    pub fn set_setpoint_derivative(&mut self, setpoint_derivative: f64) {
        self.setpoint_derivative = setpoint_derivative;
    }

    pub fn setpoint(&self) -> f64 {
        self.setpoint
    }

    pub fn previous_setpoint(&self) -> f64 {
        self.setpoint_previous
    }

    pub fn setpoint_delta(&self) -> f64 {
        self.setpoint - self.setpoint_previous
    }

    /// Measurement from the previous update, so the caller can build (and
    /// filter) its own measurement delta for the derivative term.
    pub fn previous_measurement(&self) -> f64 {
        self.measurement_previous
    }

    // -----------------------------------------------------------------------
    // Core update
    // -----------------------------------------------------------------------

    /// Full update from a raw measurement; the measurement delta is taken
    /// against the previous update's measurement, unfiltered.
    pub fn update(&mut self, measurement: f64, delta_t: f64) -> f64 {
        self.update_delta(measurement, measurement - self.measurement_previous, delta_t)
    }

    /// Full update with the measurement delta supplied by the caller, which
    /// may have filtered it independently of the raw measurement.
    ///
    /// Integration uses the trapezoid rule over the current and previous
    /// error, which tracks the true integral more closely than Euler when
    /// the call cadence varies.
    pub fn update_delta(&mut self, measurement: f64, measurement_delta: f64, delta_t: f64) -> f64 {
        let error = self.setpoint - measurement;

        if self.integral_threshold == 0.0 || error.abs() >= self.integral_threshold {
            // Trapezoid rule; needs the error from the previous call, so
            // this runs before error_previous is overwritten below.
            self.error_integral += self.gains.ki * 0.5 * (error + self.error_previous) * delta_t;
            self.clamp_integral();
        }

        let base_sum = self.gains.kp * error
            + self.gains.ks * self.setpoint
            + self.gains.kk * self.setpoint_derivative;
        self.desaturate_integral(base_sum);

        self.error_previous = error;
        // Note the minus sign: error delta has reverse polarity to
        // measurement delta.
        self.error_derivative = -measurement_delta / delta_t;
        self.measurement_previous = measurement;

        base_sum + self.error_integral + self.gains.kd * self.error_derivative
    }

    /// Full update with the setpoint delta for this tick supplied as well;
    /// the setpoint derivative is derived from it before the update runs.
    pub fn update_with_setpoint_delta(
        &mut self,
        measurement: f64,
        measurement_delta: f64,
        setpoint_delta: f64,
        delta_t: f64,
    ) -> f64 {
        self.setpoint_derivative = setpoint_delta / delta_t;
        self.update_delta(measurement, measurement_delta, delta_t)
    }

    /// Update with the value driving the integral decoupled from the
    /// proportional error, so the caller can attenuate what the integral
    /// sees (I-term relax) while P, D and the open-loop terms use the raw
    /// error. This pathway integrates with the Euler rule.
    pub fn update_delta_iterm(
        &mut self,
        measurement: f64,
        measurement_delta: f64,
        i_term_error: f64,
        delta_t: f64,
    ) -> f64 {
        let error = self.setpoint - measurement;
        self.error_derivative = -measurement_delta / delta_t;

        // Unlike update_delta, the D term is part of the partial sum here,
        // so the saturation clamp solves against the whole non-integral
        // output.
        let partial_sum = self.gains.kp * error
            + self.gains.kd * self.error_derivative
            + self.gains.ks * self.setpoint
            + self.gains.kk * self.setpoint_derivative;

        if self.integral_threshold == 0.0 || error.abs() >= self.integral_threshold {
            self.error_integral += self.gains.ki * i_term_error * delta_t; // Euler
            self.clamp_integral();
        }

        self.error_previous = error;
        self.desaturate_integral(partial_sum);
        self.measurement_previous = measurement;

        partial_sum + self.error_integral
    }

    // -----------------------------------------------------------------------
    // Anti-windup passes
    // -----------------------------------------------------------------------

    /// Clamp the accumulator to the configured bounds. Each side is applied
    /// only when its bound has been set.
    pub(crate) fn clamp_integral(&mut self) {
        if self.integral_max > 0.0 && self.error_integral > self.integral_max {
            self.error_integral = self.integral_max;
        } else if self.integral_min < 0.0 && self.error_integral < self.integral_min {
            self.error_integral = self.integral_min;
        }
    }

    /// Clamp the accumulator so `partial_sum + error_integral` stays within
    /// the configured saturation value, holding the output exactly at the
    /// saturation boundary instead of letting the integral run past it. The
    /// clamp never flips the integral's sign.
    pub(crate) fn desaturate_integral(&mut self, partial_sum: f64) {
        if self.output_saturation_value <= 0.0 {
            return;
        }
        if partial_sum + self.error_integral > self.output_saturation_value {
            self.error_integral = (self.output_saturation_value - partial_sum).max(0.0);
        } else if partial_sum + self.error_integral < -self.output_saturation_value {
            self.error_integral = (-self.output_saturation_value - partial_sum).min(0.0);
        }
    }

    // -----------------------------------------------------------------------
    // Error introspection
    // -----------------------------------------------------------------------

    /// Gain-scaled breakdown of the last output into its terms.
    pub fn error(&self) -> ErrorTerms {
        ErrorTerms {
            p: self.error_previous * self.gains.kp,
            i: self.error_integral, // already multiplied by gains.ki
            d: self.error_derivative * self.gains.kd,
            s: self.setpoint * self.gains.ks,
            k: self.setpoint_derivative * self.gains.kk,
        }
    }

    /// Gain-unscaled breakdown. The raw integral divides the stored
    /// accumulator by ki, returning 0.0 by convention when ki is zero.
    pub fn error_raw(&self) -> ErrorTerms {
        ErrorTerms {
            p: self.error_previous,
            i: self.error_raw_i(),
            d: self.error_derivative,
            s: self.setpoint,
            k: self.setpoint_derivative,
        }
    }

    pub fn error_p(&self) -> f64 {
        self.error_previous * self.gains.kp
    }

    pub fn error_i(&self) -> f64 {
        self.error_integral
    }

    pub fn error_d(&self) -> f64 {
        self.error_derivative * self.gains.kd
    }

    pub fn error_s(&self) -> f64 {
        self.setpoint * self.gains.ks
    }

    pub fn error_k(&self) -> f64 {
        self.setpoint_derivative * self.gains.kk
    }

    pub fn error_raw_p(&self) -> f64 {
        self.error_previous
    }

    pub fn error_raw_i(&self) -> f64 {
        if self.gains.ki == 0.0 {
            0.0
        } else {
            self.error_integral / self.gains.ki
        }
    }

    pub fn error_raw_d(&self) -> f64 {
        self.error_derivative
    }

    pub fn error_raw_s(&self) -> f64 {
        self.setpoint
    }

    pub fn error_raw_k(&self) -> f64 {
        self.setpoint_derivative
    }

    /// Error from the previous update, `setpoint - measurement`.
    pub fn previous_error(&self) -> f64 {
        self.error_previous
    }

    /// Zero all state: setpoint and its history, derivative terms, integral
    /// accumulator, error and measurement history. Gains and anti-windup
    /// configuration are kept. For test harnesses and explicit
    /// re-initialization, not normal operation.
    pub fn reset_all(&mut self) {
        self.measurement_previous = 0.0;
        self.setpoint = 0.0;
        self.setpoint_previous = 0.0;
        self.setpoint_derivative = 0.0;
        self.error_previous = 0.0;
        self.error_integral = 0.0;
        self.error_derivative = 0.0;
    }
}
