extern crate nalgebra as na;

#[macro_use]
extern crate log;

use anyhow::Context;
use crumble3d::parry::bounding_volume::Aabb;
use crumble3d::prelude::*;
use na::point;
use serde::{Deserialize, Serialize};

mod helper;

/// A slab of particles indented from the top by a descending sphere.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
struct Scenario {
    young_modulus: Real,
    poisson_ratio: Real,
    density: Real,
    damage: JohnsonCookParameters,
    particle_radius: Real,
    /// Number of particles along each axis.
    block_size: [usize; 3],
    indenter_radius: Real,
    indenter_speed: Real,
    plastic_strain_rate: Real,
    /// Minimum penetration generating a contact force.
    min_penetration: Real,
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
            block_size: [30, 12, 30],
            indenter_radius: 5.0e-3,
            indenter_speed: 1.0,
            plastic_strain_rate: 500.0,
            min_penetration: ContactParameters::default().min_penetration,
            dt: 1.0e-6,
            num_steps: 2000,
            dump_every: 200,
            dump_pattern: "dumps3d/indentation.*.LAMMPS".to_string(),
            pipeline: PipelineParameters::default(),
        }
    }
}

fn load_scenario() -> anyhow::Result<Scenario> {
    let path = match std::env::args().nth(1) {
        Some(path) => path,
        None => return Ok(Scenario::default()),
    };

    let json =
        std::fs::read_to_string(&path).with_context(|| format!("cannot read scenario {}", path))?;
    let scenario = serde_json::from_str(&json)
        .with_context(|| format!("cannot parse scenario {}", path))?;
    info!("Loaded scenario {}", path);
    Ok(scenario)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let scenario = load_scenario()?;

    let mut models = ParticleModelSet::new();
    let model = models.insert(ParticleModel::with_damage(
        ElasticProperties::new(scenario.young_modulus, scenario.poisson_ratio),
        JohnsonCookDamage::new(scenario.damage)?,
    ));

    let surface = GroupMask::group(1).context("invalid group index")?;
    let particles = helper::slab_particles(
        point![0.0, 0.0, 0.0],
        scenario.block_size,
        scenario.particle_radius,
        scenario.density,
        surface,
    );
    let extents = helper::slab_extents(scenario.block_size, scenario.particle_radius);

    let mut bodies = BodySet::new();
    let slab = bodies.insert(Body::new("slab", ParticleSet::from(particles), model));

    let indenter = HertzIndenter::new(
        "sphere",
        IndenterShape::from_tag("sphere", scenario.indenter_radius)?,
        vec![
            Expression::constant(extents.x / 2.0),
            Expression::linear(extents.y + scenario.indenter_radius, -scenario.indenter_speed),
            Expression::constant(extents.z / 2.0),
        ],
        vec![
            Expression::constant(0.0),
            Expression::constant(-scenario.indenter_speed),
            Expression::constant(0.0),
        ],
        ParticleGroup::particles("surface", BodySelector::Body(slab), surface),
    )?
    .with_parameters(ContactParameters {
        min_penetration: scenario.min_penetration,
    });

    let mut boundary_conditions = BoundaryConditionSet::new();
    boundary_conditions.insert(indenter)?;

    if let Some(dir) = std::path::Path::new(&scenario.dump_pattern).parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("cannot create dump directory {}", dir.display()))?;
    }

    let dump = ParticleDump::new(
        scenario.dump_pattern.as_str(),
        &[
            "x",
            "y",
            "z",
            "s11",
            "s22",
            "s33",
            "seq",
            "damage",
            "damage_init",
            "ep",
            "by",
        ],
    )?;
    let domain = Aabb::new(Point::origin(), Point::from(extents));

    let communicator = SingleProcess;
    let mut pipeline = KernelPipeline::new();
    let mut outputs = VariableMap::new();
    let mut ctx = StepContext::new(scenario.dt);

    for _ in 0..scenario.num_steps {
        helper::prescribe_loading(
            &mut bodies[slab].particles,
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
            dump.write(ctx.step, &domain, &bodies, &communicator)?;
            println!(
                "step {} (t = {:.3e}s): reaction force y = {:.4e}, max damage = {:.3}",
                ctx.step,
                ctx.time,
                outputs.get("sphere_y").unwrap_or(0.0),
                helper::max_damage(&bodies[slab].particles)
            );
        }

        ctx.advance();
    }

    Ok(())
}
