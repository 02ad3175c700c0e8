use crate::core::dynamics::contact::{
    effective_particle_radius, hertz_force_magnitude, ContactParameters,
};
use crate::dynamics::boundary::BoundaryCondition;
use crate::dynamics::models::ElasticProperties;
use crate::dynamics::solver::StepContext;
use crate::dynamics::{BodyHandle, BodySet, Particle, ParticleGroup, ParticleModelSet};
use crate::expressions::{Expression, VariableMap};
use crate::math::{Point, Real, Vector, DIM};
use crate::parallel::Communicator;
use parry::bounding_volume::Aabb;
use rayon::prelude::*;

const AXES: [&str; 3] = ["x", "y", "z"];

/// The geometry of a rigid indenter.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum IndenterShape {
    Sphere { radius: Expression },
}

impl IndenterShape {
    /// Builds a shape from its textual tag. Only `"sphere"` is supported.
    pub fn from_tag(tag: &str, radius: impl Into<Expression>) -> anyhow::Result<Self> {
        match tag {
            "sphere" => Ok(Self::Sphere {
                radius: radius.into(),
            }),
            _ => anyhow::bail!("indenter shape {} unknown, only sphere is supported", tag),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Sphere { .. } => "sphere",
        }
    }
}

/// The indenter kinematics evaluated at a given time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IndenterState {
    pub center: Point<Real>,
    pub velocity: Vector<Real>,
    pub radius: Real,
}

/// The outcome of one application of a [`HertzIndenter`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContactReport {
    pub indenter: IndenterState,
    /// The reaction force summed over every process.
    pub total_force: Vector<Real>,
    /// The number of particles of this process touching the indenter.
    pub num_local_contacts: usize,
}

/// A rigid indenter pushing the particles of a group with Hertzian contact forces.
///
/// The total reaction force is published as the variables `<id>_x`, `<id>_y` and `<id>_z`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct HertzIndenter {
    id: String,
    shape: IndenterShape,
    center: Vec<Expression>,
    velocity: Vec<Expression>,
    group: ParticleGroup,
    params: ContactParameters,
}

impl HertzIndenter {
    pub fn new(
        id: impl Into<String>,
        shape: IndenterShape,
        center: Vec<Expression>,
        velocity: Vec<Expression>,
        group: ParticleGroup,
    ) -> anyhow::Result<Self> {
        let id = id.into();

        if !group.kind.contains_particles() {
            anyhow::bail!(
                "{}: the indenter can only act on particles, but group {} is made of {}",
                id,
                group.name,
                group.kind.name()
            );
        }

        if center.len() != DIM || velocity.len() != DIM {
            anyhow::bail!(
                "{}: expected {} center and velocity components, found {} and {}",
                id,
                DIM,
                center.len(),
                velocity.len()
            );
        }

        info!(
            "Creating Hertz indenter {} ({}) acting on group {}",
            id,
            shape.tag(),
            group.name
        );

        Ok(Self {
            id,
            shape,
            center,
            velocity,
            group,
            params: ContactParameters::default(),
        })
    }

    pub fn with_parameters(mut self, params: ContactParameters) -> Self {
        self.params = params;
        self
    }

    pub fn shape(&self) -> &IndenterShape {
        &self.shape
    }

    pub fn group(&self) -> &ParticleGroup {
        &self.group
    }

    pub fn parameters(&self) -> &ContactParameters {
        &self.params
    }

    /// Evaluates the indenter kinematics at the given time.
    pub fn evaluate_state(
        &self,
        time: Real,
        variables: &VariableMap,
    ) -> anyhow::Result<IndenterState> {
        let mut center = Point::origin();
        let mut velocity = Vector::zeros();

        for i in 0..DIM {
            center[i] = self.center[i].eval(time, variables)?;
            velocity[i] = self.velocity[i].eval(time, variables)?;
        }

        let radius = match &self.shape {
            IndenterShape::Sphere { radius } => radius.eval(time, variables)?,
        };

        Ok(IndenterState {
            center,
            velocity,
            radius,
        })
    }

    /// The indenter state and the material of every body it acts on.
    fn prepare(
        &self,
        time: Real,
        bodies: &BodySet,
        models: &ParticleModelSet,
        variables: &VariableMap,
    ) -> anyhow::Result<(IndenterState, Vec<(BodyHandle, ElasticProperties)>)> {
        let indenter = self.evaluate_state(time, variables)?;
        let mut materials = Vec::new();

        self.group.for_each_body(bodies, |handle, body| {
            materials.push((handle, body.model(models)?.elastic));
            Ok(())
        })?;

        Ok((indenter, materials))
    }

    /// Applies the contact forces and publishes the total reaction force.
    ///
    /// This is a collective operation: the reduction of the total force is performed
    /// even if this process fails to evaluate the indenter or to find a body material,
    /// in which case it contributes zero and no particle is modified.
    pub fn apply_contact(
        &self,
        ctx: &StepContext,
        bodies: &mut BodySet,
        models: &ParticleModelSet,
        communicator: &dyn Communicator,
        outputs: &mut VariableMap,
    ) -> anyhow::Result<ContactReport> {
        let t0 = instant::now();
        let prepared = self.prepare(ctx.time, bodies, models, outputs);

        let group = &self.group;
        let params = self.params;
        let mut local_force: Vector<Real> = Vector::zeros();
        let mut num_local_contacts = 0;

        if let Ok((indenter, materials)) = &prepared {
            trace!("{}: indenter state at t = {}: {:?}", self.id, ctx.time, indenter);

            for (handle, material) in materials {
                let body = match bodies.get_mut(*handle) {
                    Some(body) => body,
                    None => continue,
                };

                let (force, count): (Vector<Real>, usize) = body
                    .particles
                    .particles_mut()
                    .par_iter_mut()
                    .filter(|particle| particle.is_active() && group.contains(particle.groups))
                    .filter_map(|particle| {
                        let f = particle_contact_force(indenter, particle, material, &params)?;
                        particle.external_force += f;
                        Some(f)
                    })
                    .fold(
                        || (Vector::zeros(), 0),
                        |(total, count), f| (total + f, count + 1),
                    )
                    .reduce(
                        || (Vector::zeros(), 0),
                        |a, b| (a.0 + b.0, a.1 + b.1),
                    );

                local_force += force;
                num_local_contacts += count;
            }
        }

        let mut reduced = [0.0; 3];
        reduced[..DIM].copy_from_slice(local_force.as_slice());
        communicator.reduce_sum(&mut reduced);

        let (indenter, _) = prepared?;

        for (axis, value) in AXES.iter().zip(reduced.iter()) {
            outputs.set(format!("{}_{}", self.id, axis), *value);
        }

        let total_force = Vector::from_fn(|i, _| reduced[i]);
        debug!(
            "{}: total reaction force {:?}, {} local contacts, computed in {}ms",
            self.id,
            total_force.as_slice(),
            num_local_contacts,
            instant::now() - t0
        );

        Ok(ContactReport {
            indenter,
            total_force,
            num_local_contacts,
        })
    }
}

impl BoundaryCondition for HertzIndenter {
    fn id(&self) -> &str {
        &self.id
    }

    fn apply(
        &self,
        ctx: &StepContext,
        bodies: &mut BodySet,
        models: &ParticleModelSet,
        communicator: &dyn Communicator,
        outputs: &mut VariableMap,
    ) -> anyhow::Result<()> {
        self.apply_contact(ctx, bodies, models, communicator, outputs)
            .map(|_| ())
    }
}

/// The force the indenter exerts on one particle, or `None` if they don't touch.
///
/// The force points from the indenter center toward the particle.
pub fn particle_contact_force(
    indenter: &IndenterState,
    particle: &Particle,
    material: &ElasticProperties,
    params: &ContactParameters,
) -> Option<Vector<Real>> {
    let xsp = particle.position - indenter.center;
    let rs = indenter.radius + effective_particle_radius(particle.volume);

    let bounds = Aabb::from_half_extents(Point::origin(), Vector::repeat(rs));
    if !bounds.contains_local_point(&Point::from(xsp)) {
        return None;
    }

    let r = xsp.norm();
    if r >= rs || r == 0.0 {
        return None;
    }

    let penetration = rs - r;
    if penetration <= params.min_penetration {
        return None;
    }

    let fmag = hertz_force_magnitude(material, indenter.radius, penetration);
    Some(xsp * (fmag / r))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dynamics::{
        Body, BodyHandle, BodySelector, GroupKind, GroupMask, ParticleModel, ParticleSet,
    };
    use crate::parallel::{SingleProcess, ThreadCommunicator};

    // A particle of unit volume, so its effective radius is 0.5.
    fn particle_at(position: Point<Real>) -> Particle {
        Particle::new(position, 0.5, 1.0)
    }

    fn setup(particles: Vec<Particle>) -> (BodySet, ParticleModelSet, BodyHandle) {
        let mut models = ParticleModelSet::new();
        let model = models.insert(ParticleModel::new(ElasticProperties::new(200.0, 0.3)));
        let mut bodies = BodySet::new();
        let handle = bodies.insert(Body::new("block", ParticleSet::from(particles), model));
        (bodies, models, handle)
    }

    fn sphere_indenter(id: &str, group: ParticleGroup) -> HertzIndenter {
        HertzIndenter::new(
            id,
            IndenterShape::from_tag("sphere", 1.0).unwrap(),
            vec![Expression::constant(0.0); DIM],
            vec![Expression::constant(0.0); DIM],
            group,
        )
        .unwrap()
    }

    fn at_distance(r: Real) -> Point<Real> {
        Point::from(Vector::x() * r)
    }

    #[test]
    fn penetrating_particle_is_pushed_away() {
        let (mut bodies, models, handle) = setup(vec![particle_at(at_distance(1.49))]);
        let indenter = sphere_indenter("ind", ParticleGroup::all());
        let mut outputs = VariableMap::new();

        let report = indenter
            .apply_contact(
                &StepContext::new(1.0e-3),
                &mut bodies,
                &models,
                &SingleProcess,
                &mut outputs,
            )
            .unwrap();

        let force = bodies[handle].particles.particles()[0].external_force;
        assert_eq!(report.num_local_contacts, 1);
        assert_eq!(report.total_force, force);
        assert!(force.x > 0.0);
        assert_eq!(force.y, 0.0);

        #[cfg(feature = "dim3")]
        assert!((force.x - 0.29304).abs() < 1.0e-4);
        #[cfg(feature = "dim2")]
        assert!((force.x - 1.72620).abs() < 1.0e-4);

        assert_eq!(outputs.get("ind_x"), Some(force.x));
        assert_eq!(outputs.get("ind_y"), Some(0.0));
        assert_eq!(outputs.get("ind_z"), Some(0.0));
    }

    #[test]
    fn distant_particles_get_no_force() {
        let mut rng = oorandom::Rand64::new(42);
        let mut particles = Vec::new();

        // Outside of the box, or inside the box but beyond the contact radius.
        particles.push(particle_at(at_distance(1.5)));
        particles.push(particle_at(Point::from(Vector::repeat(1.4))));

        for _ in 0..200 {
            let dir = Vector::from_fn(|_, _| rng.rand_float() - 0.5);
            if dir.norm() > 1.0e-3 {
                let r = 1.6 + rng.rand_float() * 10.0;
                particles.push(particle_at(Point::from(dir.normalize() * r)));
            }
        }

        let (mut bodies, models, handle) = setup(particles);
        let indenter = sphere_indenter("ind", ParticleGroup::all());
        let report = indenter
            .apply_contact(
                &StepContext::new(1.0e-3),
                &mut bodies,
                &models,
                &SingleProcess,
                &mut VariableMap::new(),
            )
            .unwrap();

        assert_eq!(report.num_local_contacts, 0);
        assert_eq!(report.total_force, Vector::zeros());
        assert!(bodies[handle]
            .particles
            .iter()
            .all(|p| p.external_force == Vector::zeros()));
    }

    #[test]
    fn tiny_penetrations_use_the_threshold() {
        let material = ElasticProperties::new(200.0, 0.3);
        let indenter = IndenterState {
            center: Point::origin(),
            velocity: Vector::zeros(),
            radius: 1.0,
        };
        let particle = particle_at(at_distance(1.5 - 1.0e-12));
        let force =
            particle_contact_force(&indenter, &particle, &material, &ContactParameters::default());

        #[cfg(feature = "dim3")]
        assert_eq!(force, None);
        #[cfg(feature = "dim2")]
        assert!(force.unwrap().x > 0.0);

        let strict = ContactParameters {
            min_penetration: 1.0e-6,
        };
        assert_eq!(
            particle_contact_force(&indenter, &particle, &material, &strict),
            None
        );
    }

    #[test]
    fn coincident_centers_are_skipped() {
        let material = ElasticProperties::new(200.0, 0.3);
        let indenter = IndenterState {
            center: Point::origin(),
            velocity: Vector::zeros(),
            radius: 1.0,
        };
        let particle = particle_at(Point::origin());
        let force =
            particle_contact_force(&indenter, &particle, &material, &ContactParameters::default());
        assert_eq!(force, None);
    }

    #[test]
    fn only_active_group_members_are_pushed() {
        let in_group = GroupMask::group(1).unwrap();
        let mut massless = particle_at(at_distance(1.2)).with_groups(in_group);
        massless.mass = 0.0;
        let particles = vec![
            particle_at(at_distance(1.2)).with_groups(in_group),
            particle_at(at_distance(1.2)),
            massless,
        ];

        let (mut bodies, models, handle) = setup(particles);
        let group = ParticleGroup::particles("top", BodySelector::Body(handle), in_group);
        let indenter = sphere_indenter("ind", group);
        let report = indenter
            .apply_contact(
                &StepContext::new(1.0e-3),
                &mut bodies,
                &models,
                &SingleProcess,
                &mut VariableMap::new(),
            )
            .unwrap();

        let forces: Vec<_> = bodies[handle]
            .particles
            .iter()
            .map(|p| p.external_force)
            .collect();
        assert_eq!(report.num_local_contacts, 1);
        assert!(forces[0].x > 0.0);
        assert_eq!(forces[1], Vector::zeros());
        assert_eq!(forces[2], Vector::zeros());
    }

    #[test]
    fn indenter_follows_its_kinematics() {
        let (mut bodies, models, _) = setup(vec![particle_at(at_distance(2.4))]);
        let mut center = vec![Expression::constant(0.0); DIM];
        center[0] = Expression::linear(0.0, 1.0);
        let mut velocity = vec![Expression::constant(0.0); DIM];
        velocity[0] = Expression::constant(1.0);
        let indenter = HertzIndenter::new(
            "moving",
            IndenterShape::from_tag("sphere", Expression::Variable("r".to_string())).unwrap(),
            center,
            velocity,
            ParticleGroup::all(),
        )
        .unwrap();

        let mut outputs = VariableMap::new();
        let mut ctx = StepContext::new(1.0);
        assert!(indenter
            .apply_contact(&ctx, &mut bodies, &models, &SingleProcess, &mut outputs)
            .is_err());

        outputs.set("r", 1.0);
        let report = indenter
            .apply_contact(&ctx, &mut bodies, &models, &SingleProcess, &mut outputs)
            .unwrap();
        assert_eq!(report.num_local_contacts, 0);

        ctx.advance();
        let report = indenter
            .apply_contact(&ctx, &mut bodies, &models, &SingleProcess, &mut outputs)
            .unwrap();
        assert_eq!(report.indenter.center, at_distance(1.0));
        assert_eq!(report.indenter.velocity, Vector::x());
        assert_eq!(report.num_local_contacts, 1);
    }

    #[test]
    fn invalid_configurations_are_rejected() {
        assert!(IndenterShape::from_tag("cylinder", 1.0).is_err());

        let mut nodes = ParticleGroup::all();
        nodes.kind = GroupKind::Nodes;
        let indenter = HertzIndenter::new(
            "ind",
            IndenterShape::from_tag("sphere", 1.0).unwrap(),
            vec![Expression::constant(0.0); DIM],
            vec![Expression::constant(0.0); DIM],
            nodes,
        );
        assert!(indenter.is_err());

        let indenter = HertzIndenter::new(
            "ind",
            IndenterShape::from_tag("sphere", 1.0).unwrap(),
            vec![Expression::constant(0.0); DIM + 1],
            vec![Expression::constant(0.0); DIM],
            ParticleGroup::all(),
        );
        assert!(indenter.is_err());
    }

    #[test]
    fn total_force_does_not_depend_on_the_partitioning() {
        let mut rng = oorandom::Rand64::new(1234);
        let particles: Vec<_> = (0..500)
            .map(|_| {
                let pos = Vector::from_fn(|_, _| (rng.rand_float() - 0.5) * 3.2);
                particle_at(Point::from(pos))
            })
            .collect();

        let indenter = sphere_indenter("ind", ParticleGroup::all());
        let ctx = StepContext::new(1.0e-3);

        let (mut bodies, models, _) = setup(particles.clone());
        let reference = indenter
            .apply_contact(
                &ctx,
                &mut bodies,
                &models,
                &SingleProcess,
                &mut VariableMap::new(),
            )
            .unwrap();
        assert!(reference.num_local_contacts > 0);

        for num_ranks in [2, 3, 5] {
            let communicators = ThreadCommunicator::group(num_ranks);
            let chunk_len = (particles.len() + num_ranks - 1) / num_ranks;
            let reports: Vec<_> = std::thread::scope(|s| {
                let handles: Vec<_> = communicators
                    .iter()
                    .zip(particles.chunks(chunk_len))
                    .map(|(comm, chunk)| {
                        let indenter = &indenter;
                        let ctx = &ctx;
                        s.spawn(move || {
                            let (mut bodies, models, _) = setup(chunk.to_vec());
                            indenter
                                .apply_contact(
                                    ctx,
                                    &mut bodies,
                                    &models,
                                    comm,
                                    &mut VariableMap::new(),
                                )
                                .unwrap()
                        })
                    })
                    .collect();
                handles.into_iter().map(|h| h.join().unwrap()).collect()
            });

            let num_contacts: usize = reports.iter().map(|r| r.num_local_contacts).sum();
            assert_eq!(num_contacts, reference.num_local_contacts);

            for report in &reports {
                assert!((report.total_force - reference.total_force).norm() < 1.0e-9);
            }
        }
    }

    #[test]
    fn failing_rank_still_takes_part_in_the_reduction() {
        let indenter = sphere_indenter("ind", ParticleGroup::all());
        let ctx = StepContext::new(1.0e-3);
        let communicators = ThreadCommunicator::group(2);

        let reports: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = communicators
                .iter()
                .map(|comm| {
                    let indenter = &indenter;
                    let ctx = &ctx;
                    s.spawn(move || {
                        let (mut bodies, models, handle) =
                            setup(vec![particle_at(at_distance(1.2))]);
                        // The first rank doesn't know the material of its body.
                        let models = if comm.rank() == 0 {
                            ParticleModelSet::new()
                        } else {
                            models
                        };
                        let mut outputs = VariableMap::new();
                        let report =
                            indenter.apply_contact(ctx, &mut bodies, &models, comm, &mut outputs);
                        let force = bodies[handle].particles.particles()[0].external_force;
                        (report, force, outputs.get("ind_x"))
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let (failed, untouched, published) = &reports[0];
        assert!(failed.is_err());
        assert_eq!(*untouched, Vector::zeros());
        assert_eq!(*published, None);

        let (report, force, published) = &reports[1];
        let report = report.as_ref().unwrap();
        assert!(force.x > 0.0);
        assert_eq!(report.total_force, *force);
        assert_eq!(*published, Some(force.x));
    }

    #[test]
    fn missing_material_leaves_every_body_untouched() {
        let (mut bodies, models, good) = setup(vec![particle_at(at_distance(1.2))]);

        let mut other_models = ParticleModelSet::new();
        let _ = other_models.insert(ParticleModel::new(ElasticProperties::new(1.0, 0.3)));
        let unknown = other_models.insert(ParticleModel::new(ElasticProperties::new(1.0, 0.3)));
        let bad = bodies.insert(Body::new(
            "orphan",
            ParticleSet::from(vec![particle_at(at_distance(-1.2))]),
            unknown,
        ));

        let indenter = sphere_indenter("ind", ParticleGroup::all());
        let mut outputs = VariableMap::new();
        let result = indenter.apply_contact(
            &StepContext::new(1.0e-3),
            &mut bodies,
            &models,
            &SingleProcess,
            &mut outputs,
        );

        assert!(result.is_err());
        assert_eq!(outputs.get("ind_x"), None);
        for handle in [good, bad] {
            assert!(bodies[handle]
                .particles
                .iter()
                .all(|p| p.external_force == Vector::zeros()));
        }
    }
}
