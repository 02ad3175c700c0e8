extern crate nalgebra as na;

#[macro_use]
extern crate log;

use anyhow::Context;
use crumble2d::parry::bounding_volume::Aabb;
use crumble2d::prelude::*;
use na::{point, vector};
use serde::{Deserialize, Serialize};

mod helper;

/// A block of particles indented from the top by a descending disk.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
struct Scenario {
    young_modulus: Real,
    poisson_ratio: Real,
    density: Real,
    damage: JohnsonCookParameters,
    particle_radius: Real,
    block_width: usize,
    block_height: usize,
    indenter_radius: Real,
    indenter_speed: Real,
    /// Plastic strain rate imposed on the particles touched by the indenter.
    plastic_strain_rate: Real,
    dt: Real,
    num_steps: u64,
    dump_every: u64,
    dump_pattern: String,
    pipeline: PipelineParameters,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            young_modulus: 200.0e9,
            poisson_ratio: 0.3,
            density: 7850.0,
            damage: JohnsonCookParameters {
                d1: 0.05,
                d2: 3.44,
                d3: -2.12,
                d4: 0.002,
                d5: 0.61,
                reference_strain_rate: 1.0,
                reference_temperature: 293.0,
                melting_temperature: 1793.0,
            },
            particle_radius: 0.5e-3,
            block_width: 60,
            block_height: 30,
            indenter_radius: 5.0e-3,
            indenter_speed: 1.0,
            plastic_strain_rate: 500.0,
            dt: 1.0e-6,
            num_steps: 2000,
            dump_every: 200,
            dump_pattern: "dumps2d/indentation.*.LAMMPS".to_string(),
            pipeline: PipelineParameters::default(),
        }
    }
}

fn load_scenario() -> anyhow::Result<Scenario> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("cannot read scenario file {}", path))?;
            serde_json::from_str(&json).with_context(|| format!("invalid scenario {}", path))
        }
        None => {
            info!("No scenario file given, running the default indentation.");
            Ok(Scenario::default())
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let scenario = load_scenario()?;

    let mut models = ParticleModelSet::new();
    let damage = JohnsonCookDamage::new(scenario.damage)?;
    let model = models.insert(ParticleModel::with_damage(
        ElasticProperties::new(scenario.young_modulus, scenario.poisson_ratio),
        damage,
    ));

    let surface = GroupMask::group(1).context("invalid group index")?;
    let particles = helper::block_particles(
        point![0.0, 0.0],
        scenario.block_width,
        scenario.block_height,
        scenario.particle_radius,
        scenario.density,
        surface,
    );
    let width = scenario.block_width as Real * scenario.particle_radius * 2.0;
    let height = scenario.block_height as Real * scenario.particle_radius * 2.0;

    let mut bodies = BodySet::new();
    let block = bodies.insert(Body::new("block", ParticleSet::from(particles), model));

    let mut boundary_conditions = BoundaryConditionSet::new();
    boundary_conditions.insert(HertzIndenter::new(
        "indenter",
        IndenterShape::from_tag("sphere", scenario.indenter_radius)?,
        vec![
            Expression::constant(width / 2.0),
            Expression::linear(height + scenario.indenter_radius, -scenario.indenter_speed),
        ],
        vec![
            Expression::constant(0.0),
            Expression::constant(-scenario.indenter_speed),
        ],
        ParticleGroup::particles("surface", BodySelector::Body(block), surface),
    )?)?;

    if let Some(dir) = std::path::Path::new(&scenario.dump_pattern).parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("cannot create dump directory {}", dir.display()))?;
    }

    let dump = ParticleDump::new(
        scenario.dump_pattern.as_str(),
        &["x", "y", "vx", "vy", "seq", "damage", "damage_init", "bx", "by"],
    )?;
    let domain = Aabb::new(point![0.0, 0.0], point![width, height]);

    let communicator = SingleProcess;
    let mut pipeline = KernelPipeline::new();
    let mut outputs = VariableMap::new();
    let mut ctx = StepContext::new(scenario.dt);

    while ctx.step < scenario.num_steps {
        helper::prescribe_loading(
            &mut bodies[block].particles,
            scenario.plastic_strain_rate,
            ctx.dt,
        );
        pipeline.step(
            &scenario.pipeline,
            &ctx,
            &mut bodies,
            &models,
            &boundary_conditions,
            &communicator,
            &mut outputs,
        )?;

        if scenario.dump_every > 0 && ctx.step % scenario.dump_every == 0 {
            let path = dump.write(ctx.step, &domain, &bodies, &communicator)?;
            let force = vector![
                outputs.get("indenter_x").unwrap_or(0.0),
                outputs.get("indenter_y").unwrap_or(0.0)
            ];
            println!(
                "step {}: reaction force [{:.4e}, {:.4e}], {} softening particles, dumped to {}",
                ctx.step,
                force.x,
                force.y,
                helper::num_softening(&bodies[block].particles),
                path.display()
            );
        }

        ctx.advance();
    }

    for (name, value) in outputs.iter_sorted() {
        println!("{} = {}", name, value);
    }

    Ok(())
}
