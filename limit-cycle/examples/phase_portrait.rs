//! Integrate both built-in laws and summarize the transient and limit cycle.

use limit_cycle::{
    simulate, AccelerationLaw, DampedPendulum, Law, Progress, SimulationConfig, VanDerPol,
};

fn main() {
    let laws = [
        Law::from(VanDerPol { mu: 1.2 }),
        Law::from(DampedPendulum {
            epsilon: 0.3,
            omega0: 1.0,
        }),
    ];

    for law in laws {
        let config = SimulationConfig {
            law,
            ..Default::default()
        };

        let sim = simulate(&config, &mut |p: Progress| {
            if p.is_done() {
                println!("{}: integrated {} steps", law.name(), p.total);
            }
        })
        .unwrap();

        let seg = sim.segments();
        println!("  transient: {} points", seg.transient.len());
        println!("  cycle:     {} points", seg.cycle.len());
        println!("  transient amplitude: {:.4}", seg.transient.amplitude());
        println!("  cycle amplitude:     {:.4}", seg.cycle.amplitude());

        if let Some(marks) = sim.landmarks() {
            println!(
                "  arrow of time at (Δφ, dΔφ/dτ) = ({:.4}, {:.4})",
                marks.arrow_of_time.position, marks.arrow_of_time.velocity
            );
        }
    }
}
