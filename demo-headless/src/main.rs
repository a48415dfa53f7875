use clap::Parser;
use plume_sim_core::{FluidConfig, FluidSimulation, GridSize, Vec3};

/// Headless plume solver demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "plume-sim-demo")]
#[command(about = "Buoyant smoke plume simulation demo", long_about = None)]
struct Args {
    /// Number of simulation steps to run
    #[arg(short, long, default_value_t = 200)]
    steps: u64,

    /// Grid resolution (cubic grid)
    #[arg(short, long, default_value_t = 64)]
    resolution: usize,

    /// Timestep in seconds
    #[arg(long, default_value_t = 0.1)]
    delta_time: f32,

    /// Density emitted per step
    #[arg(long, default_value_t = 1.0)]
    density: f32,

    /// Temperature emitted per step
    #[arg(long, default_value_t = 4.0)]
    temperature: f32,

    /// Emission region radius in normalized grid coordinates
    #[arg(long, default_value_t = 0.08)]
    radius: f32,

    /// Emitter height in normalized grid coordinates
    #[arg(long, default_value_t = 0.12)]
    emitter_height: f32,

    /// Vorticity confinement strength
    #[arg(long, default_value_t = 2.0)]
    vorticity: f32,

    /// Jacobi pressure iterations per step
    #[arg(long, default_value_t = 10)]
    pressure_iterations: usize,

    /// Report interval in steps
    #[arg(long, default_value_t = 20)]
    report_interval: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = FluidConfig {
        size: GridSize::new(args.resolution, args.resolution, args.resolution),
        delta_time: args.delta_time,
        vorticity_strength: args.vorticity,
        pressure_iterations: args.pressure_iterations,
        ..FluidConfig::default()
    };
    config.impulse.density_amount = args.density;
    config.impulse.temperature_amount = args.temperature;
    config.impulse.radius = args.radius;
    config.impulse.center = Vec3::new(0.5, args.emitter_height, 0.5);

    let mut sim = FluidSimulation::new(config);

    println!(
        "running {} steps on a {res}x{res}x{res} grid",
        args.steps,
        res = args.resolution
    );

    for step in 1..=args.steps {
        sim.step();

        if step % args.report_interval == 0 || step == args.steps {
            let total_density: f32 = sim.density_temperature().data.iter().map(|d| d.x).sum();
            let peak_updraft = sim
                .velocity()
                .data
                .iter()
                .map(|v| v.y)
                .fold(f32::MIN, f32::max);
            println!(
                "step {step:>6}: total density {total_density:>10.2}, \
                 peak updraft {peak_updraft:>7.3}, \
                 divergence norm {:>10.4}",
                sim.divergence_norm()
            );
        }
    }

    let plume_top = highest_smoke_layer(&sim);
    println!("plume reached layer {plume_top} of {}", args.resolution);
}

/// Highest y-layer containing a visible amount of smoke.
fn highest_smoke_layer(sim: &FluidSimulation) -> usize {
    let size = sim.config().size;
    for y in (0..size.ny).rev() {
        for z in 0..size.nz {
            for x in 0..size.nx {
                if sim.density_temperature().get(x, y, z).x > 0.01 {
                    return y;
                }
            }
        }
    }
    0
}
