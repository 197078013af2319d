use pidf::{Gains, Pidf};

/// Drive a PI controller against a first-order plant and print the step
/// response, with and without output-saturation anti-windup, to show the
/// overshoot the windup clamp removes.
fn main() {
    // -----------------------------------------------------------------------
    // Plant: first-order lag, y' = (u - y) / tau, actuator limited to ±2
    // -----------------------------------------------------------------------
    let tau = 0.5;
    let dt = 0.01;
    let steps = 400;

    let run = |pid: &mut Pidf| -> Vec<(f64, f64, f64)> {
        let mut y = 0.0;
        let mut log = Vec::with_capacity(steps);
        pid.set_setpoint(1.0);
        for i in 0..steps {
            let u = pid.update(y, dt);
            let u_applied = u.clamp(-2.0, 2.0); // the actuator saturates here
            y += (u_applied - y) / tau * dt;
            log.push((i as f64 * dt, u, y));
        }
        log
    };

    let mut plain = Pidf::new(Gains::pid(4.0, 8.0, 0.0));
    let plain_log = run(&mut plain);

    let mut clamped = Pidf::new(Gains::pid(4.0, 8.0, 0.0));
    clamped.set_output_saturation_value(2.0); // tell the controller where the actuator stops
    let clamped_log = run(&mut clamped);

    // -----------------------------------------------------------------------
    // Print both trajectories side by side
    // -----------------------------------------------------------------------
    println!("{:>6}  {:>10} {:>10}  {:>10} {:>10}", "t", "u_plain", "y_plain", "u_aw", "y_aw");
    for (a, b) in plain_log.iter().zip(&clamped_log).step_by(20) {
        println!(
            "{:>6.2}  {:>10.4} {:>10.4}  {:>10.4} {:>10.4}",
            a.0, a.1, a.2, b.1, b.2
        );
    }

    let overshoot = |log: &[(f64, f64, f64)]| {
        log.iter().map(|s| s.2).fold(f64::MIN, f64::max) - 1.0
    };
    println!();
    println!("overshoot without anti-windup: {:.4}", overshoot(&plain_log));
    println!("overshoot with anti-windup:    {:.4}", overshoot(&clamped_log));
}
