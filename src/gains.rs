// ---------------------------------------------------------------------------
// Gain set and output term breakdown
// ---------------------------------------------------------------------------

/// Gain set for the controller, in "independent PID" notation (kp, ki, kd
/// rather than Kc, tauI, tauD) plus the two open-loop weights.
///
/// A zero gain disables the corresponding term, so one gain set covers the
/// whole family from pure-P up to full PID with setpoint feedforward.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Gains {
    pub kp: f64, // proportional
    pub ki: f64, // integral
    pub kd: f64, // derivative
    pub ks: f64, // setpoint weight (open loop)
    pub kk: f64, // setpoint derivative weight ('kick')
}

impl Gains {
    /// Plain PID gain set with the open-loop weights zeroed.
    pub fn pid(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd, ks: 0.0, kk: 0.0 }
    }
}

/// Per-term breakdown of the last controller output, for telemetry and
/// tuning. Depending on the accessor the terms are gain-scaled
/// ([`Pidf::error`](crate::Pidf::error)) or raw
/// ([`Pidf::error_raw`](crate::Pidf::error_raw)).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ErrorTerms {
    pub p: f64,
    pub i: f64,
    pub d: f64,
    pub s: f64,
    pub k: f64,
}

impl ErrorTerms {
    /// Sum of all terms; for the scaled breakdown this reconstructs the
    /// controller output.
    pub fn sum(&self) -> f64 {
        self.p + self.i + self.d + self.s + self.k
    }
}
