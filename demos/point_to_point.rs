//! Example: Certify and sample a point-to-point motion.
//!
//! This example demonstrates how to:
//! - Load axis limits from TOML and build a kinematic request
//! - Validate the request
//! - Certify the phase durations proposed by a step-time solver
//! - Sample the accepted profile every control cycle
//!
//! Run with: `cargo run --example point_to_point`

use motion_kernel::{
    error::Result,
    parse_config,
    profile::{ControlSigns, ReachedLimits},
    KinematicRequest, KinematicState, Limits, Profile, TrajectoryExecutor,
};

const CONFIG: &str = r#"
[[axes]]
name = "x"
max_velocity = 5.0
max_acceleration = 10.0
max_jerk = 50.0
"#;

fn main() -> Result<()> {
    println!("=== Point-to-Point Example ===\n");

    let config = parse_config(CONFIG)?;
    let mut request = KinematicRequest::<1>::from_config(&config)?;
    request.target_position = [10.0];
    request.validate()?;
    println!("Request:\n{}", request);

    let lim = Limits::new(
        request.max_velocity[0],
        request.effective_min_velocity(0),
        request.max_acceleration[0],
        request.effective_min_acceleration(0),
        request.max_jerk[0],
    );

    // Durations of a profile reaching every limit, as a step-time solver would propose
    let mut profile = Profile::new();
    profile.set_boundary(
        KinematicState::new(request.current_position[0], 0.0, 0.0),
        KinematicState::new(request.target_position[0], 0.0, 0.0),
    );
    profile.t = [0.2, 0.3, 0.2, 1.3, 0.2, 0.3, 0.2];

    if !profile.check(ControlSigns::Uddu, ReachedLimits::Acc0Acc1Vel, lim.j_max, &lim) {
        println!("Candidate rejected");
        return Ok(());
    }
    println!("Accepted {} lasting {:.3} s", profile, profile.duration());

    let bound = profile.get_position_extrema();
    println!("Position range: [{:.3}, {:.3}]", bound.min, bound.max);
    if let Some(t) = profile.get_first_state_at_position(5.0, 0.0) {
        println!("Halfway reached at {:.3} s", t);
    }

    println!("\n  time   position  velocity  acceleration");
    let executor = TrajectoryExecutor::new([profile], 0.1);
    let duration = executor.duration();
    for (cycle, [state]) in executor.enumerate() {
        println!(
            "{:6.2} {:10.4} {:9.4} {:13.4}",
            ((cycle + 1) as f64 * 0.1).min(duration),
            state.position,
            state.velocity,
            state.acceleration
        );
    }

    Ok(())
}
