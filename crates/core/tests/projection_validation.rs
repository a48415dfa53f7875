//! Pass-level validation of the incompressibility pipeline:
//! divergence → Jacobi pressure → projection.

use plume_sim_core::solver::{
    apply_impulse, apply_projection, compute_divergence, divergence_norm, pressure_iteration,
    ImpulseConfig,
};
use plume_sim_core::{
    Field, FluidConfig, FluidSimulation, GridSize, PressureSeed, StructureConfig, Vec2, Vec3,
};

#[ctor::ctor]
fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Run the configured number of Jacobi iterations over a fresh pair of
/// pressure buffers and return the final iterate.
fn solve_pressure(
    divergence: &Field<f32>,
    boundary: &Field<bool>,
    iterations: usize,
) -> Field<f32> {
    let mut front: Field<f32> = Field::new(divergence.size());
    let mut back: Field<f32> = Field::new(divergence.size());
    for _ in 0..iterations {
        pressure_iteration(&mut back, &front, divergence, boundary);
        std::mem::swap(&mut front, &mut back);
    }
    front
}

#[test]
fn test_projection_reduces_squared_divergence() {
    // A 4x4x4 all-fluid grid: one whole-grid impulse of upward velocity,
    // then the divergence/pressure/projection passes. The projected field
    // must be closer to divergence-free than the pre-projection field.
    let size = GridSize::new(4, 4, 4);
    let mut velocity: Field<Vec3> = Field::new(size);
    let mut density_temperature: Field<Vec2> = Field::new(size);
    let boundary: Field<bool> = Field::new(size);

    apply_impulse(
        &mut velocity,
        &mut density_temperature,
        &ImpulseConfig {
            center: Vec3::new(0.5, 0.5, 0.5),
            radius: 1.0,
            density_amount: 1.0,
            temperature_amount: 1.0,
            velocity_amount: Vec3::new(0.0, 1.0, 0.0),
        },
    );
    assert_eq!(
        velocity.get(2, 2, 2),
        Vec3::new(0.0, 1.0, 0.0),
        "whole-grid impulse should reach the center voxel"
    );

    let before = divergence_norm(&velocity, &boundary);
    assert!(
        before > 0.0,
        "uniform upward flow diverges at the open grid edges: {before}"
    );

    let mut divergence: Field<f32> = Field::new(size);
    compute_divergence(&mut divergence, &velocity, &boundary);
    let pressure = solve_pressure(&divergence, &boundary, 10);
    apply_projection(&mut velocity, &pressure, &boundary);

    let after = divergence_norm(&velocity, &boundary);
    assert!(
        after < before,
        "projection should reduce squared divergence: before={before}, after={after}"
    );
}

#[test]
fn test_full_timestep_lifts_the_impulse_center() {
    // The same 4x4x4 scenario through the whole scheduler: all-fluid grid,
    // one whole-grid impulse of density, heat, and upward velocity, no
    // buoyancy, confinement, or dissipation. After one step the center
    // voxel keeps nonzero upward velocity and its injected smoke.
    let mut sim = FluidSimulation::new(FluidConfig {
        size: GridSize::new(4, 4, 4),
        delta_time: 1.0,
        density_dissipation: 1.0,
        temperature_dissipation: 1.0,
        velocity_dissipation: 1.0,
        density_buoyancy: 0.0,
        density_weight: 0.0,
        vorticity_strength: 0.0,
        pressure_iterations: 10,
        pressure_seed: PressureSeed::Warm,
        impulse: ImpulseConfig {
            center: Vec3::new(0.5, 0.5, 0.5),
            radius: 1.0,
            density_amount: 1.0,
            temperature_amount: 1.0,
            velocity_amount: Vec3::new(0.0, 1.0, 0.0),
        },
        structure: StructureConfig {
            base_height: 0,
            recess_height: 0,
            half_width: 0,
            depth: 0,
            recess_half_width: 0,
        },
    });

    sim.step();

    let center_velocity = sim.velocity().get(2, 2, 2);
    assert!(
        center_velocity.y > 0.0,
        "center voxel should keep an upward velocity: {center_velocity:?}"
    );
    assert!(
        sim.density_temperature().get(2, 2, 2).x > 0.0,
        "center voxel should keep its injected smoke"
    );
}

#[test]
fn test_no_flow_into_solid_floor() {
    // Fluid everywhere except a fully solid bottom layer, with downward
    // velocity injected just above it. After projection, the wall-normal
    // component at floor-adjacent voxels is exactly zero.
    let size = GridSize::new(8, 8, 8);
    let mut boundary: Field<bool> = Field::new(size);
    for z in 0..8 {
        for x in 0..8 {
            boundary.set(x, 0, z, true);
        }
    }

    let mut velocity: Field<Vec3> = Field::new(size);
    for z in 0..8 {
        for x in 0..8 {
            velocity.set(x, 1, z, Vec3::new(0.0, -2.0, 0.0));
        }
    }

    let mut divergence: Field<f32> = Field::new(size);
    compute_divergence(&mut divergence, &velocity, &boundary);
    let pressure = solve_pressure(&divergence, &boundary, 20);
    apply_projection(&mut velocity, &pressure, &boundary);

    for z in 0..8 {
        for x in 0..8 {
            let v = velocity.get(x, 1, z);
            assert_eq!(
                v.y, 0.0,
                "no flow into the wall at ({x}, 1, {z}): {v:?}"
            );
        }
    }
}

#[test]
fn test_pressure_solve_accuracy_improves_with_iterations() {
    // More Jacobi iterations leave less residual divergence behind.
    let size = GridSize::new(8, 8, 8);
    let boundary: Field<bool> = Field::new(size);
    let mut base: Field<Vec3> = Field::new(size);
    base.set(4, 4, 4, Vec3::new(1.0, 1.0, 0.0));
    base.set(3, 4, 4, Vec3::new(-1.0, 0.0, 1.0));

    let mut divergence: Field<f32> = Field::new(size);
    compute_divergence(&mut divergence, &base, &boundary);

    let mut residuals = Vec::new();
    for iterations in [2, 8, 32] {
        let mut velocity = base.clone();
        let pressure = solve_pressure(&divergence, &boundary, iterations);
        apply_projection(&mut velocity, &pressure, &boundary);
        residuals.push(divergence_norm(&velocity, &boundary));
    }

    assert!(
        residuals[2] < residuals[0],
        "32 iterations should beat 2: {residuals:?}"
    );
}
