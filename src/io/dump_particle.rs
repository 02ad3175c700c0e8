use crate::dynamics::{BodySet, Particle};
use crate::math::{Matrix, Real, Vector, DIM};
use crate::parallel::Communicator;
use anyhow::Context;
use parry::bounding_volume::Aabb;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// A per-particle quantity that can be written to a dump file.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParticleField {
    X,
    Y,
    Z,
    X0,
    Y0,
    Z0,
    Vx,
    Vy,
    Vz,
    S11,
    S22,
    S33,
    S12,
    S13,
    S23,
    /// The von Mises equivalent stress.
    Seq,
    Damage,
    DamageInit,
    Volume,
    Mass,
    Bx,
    By,
    Bz,
    /// The effective plastic strain.
    Ep,
    /// The effective plastic strain rate.
    Epdot,
    Temperature,
}

impl ParticleField {
    pub const ALL: [ParticleField; 26] = [
        Self::X,
        Self::Y,
        Self::Z,
        Self::X0,
        Self::Y0,
        Self::Z0,
        Self::Vx,
        Self::Vy,
        Self::Vz,
        Self::S11,
        Self::S22,
        Self::S33,
        Self::S12,
        Self::S13,
        Self::S23,
        Self::Seq,
        Self::Damage,
        Self::DamageInit,
        Self::Volume,
        Self::Mass,
        Self::Bx,
        Self::By,
        Self::Bz,
        Self::Ep,
        Self::Epdot,
        Self::Temperature,
    ];

    /// The column name of this field in the dump files.
    pub fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
            Self::X0 => "x0",
            Self::Y0 => "y0",
            Self::Z0 => "z0",
            Self::Vx => "vx",
            Self::Vy => "vy",
            Self::Vz => "vz",
            Self::S11 => "s11",
            Self::S22 => "s22",
            Self::S33 => "s33",
            Self::S12 => "s12",
            Self::S13 => "s13",
            Self::S23 => "s23",
            Self::Seq => "seq",
            Self::Damage => "damage",
            Self::DamageInit => "damage_init",
            Self::Volume => "volume",
            Self::Mass => "mass",
            Self::Bx => "bx",
            Self::By => "by",
            Self::Bz => "bz",
            Self::Ep => "ep",
            Self::Epdot => "epdot",
            Self::Temperature => "T",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.name() == name)
    }

    /// The value of this field for the given particle.
    ///
    /// Components that don't exist in 2D are zero.
    pub fn value(self, particle: &Particle) -> Real {
        match self {
            Self::X => vector_component(&particle.position.coords, 0),
            Self::Y => vector_component(&particle.position.coords, 1),
            Self::Z => vector_component(&particle.position.coords, 2),
            Self::X0 => vector_component(&particle.position0.coords, 0),
            Self::Y0 => vector_component(&particle.position0.coords, 1),
            Self::Z0 => vector_component(&particle.position0.coords, 2),
            Self::Vx => vector_component(&particle.velocity, 0),
            Self::Vy => vector_component(&particle.velocity, 1),
            Self::Vz => vector_component(&particle.velocity, 2),
            Self::S11 => matrix_component(&particle.stress, 0, 0),
            Self::S22 => matrix_component(&particle.stress, 1, 1),
            Self::S33 => matrix_component(&particle.stress, 2, 2),
            Self::S12 => matrix_component(&particle.stress, 0, 1),
            Self::S13 => matrix_component(&particle.stress, 0, 2),
            Self::S23 => matrix_component(&particle.stress, 1, 2),
            Self::Seq => particle.equivalent_stress(),
            Self::Damage => particle.damage.damage,
            Self::DamageInit => particle.damage.damage_init,
            Self::Volume => particle.volume,
            Self::Mass => particle.mass,
            Self::Bx => vector_component(&particle.external_force, 0),
            Self::By => vector_component(&particle.external_force, 1),
            Self::Bz => vector_component(&particle.external_force, 2),
            Self::Ep => particle.effective_plastic_strain,
            Self::Epdot => particle.effective_plastic_strain_rate,
            Self::Temperature => particle.temperature,
        }
    }
}

fn vector_component(v: &Vector<Real>, i: usize) -> Real {
    if i < DIM {
        v[i]
    } else {
        0.0
    }
}

fn matrix_component(m: &Matrix<Real>, i: usize, j: usize) -> Real {
    if i < DIM && j < DIM {
        m[(i, j)]
    } else {
        0.0
    }
}

/// Writes snapshots of the particles of a process as `ITEM:` text files.
///
/// The first `*` of the file pattern is replaced by the step number, prefixed by
/// `proc-<rank>.` when more than one process is running.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleDump {
    pattern: String,
    fields: Vec<ParticleField>,
}

impl ParticleDump {
    pub fn new(pattern: impl Into<String>, fields: &[&str]) -> anyhow::Result<Self> {
        let fields = fields
            .iter()
            .map(|name| {
                ParticleField::from_name(name).ok_or_else(|| {
                    let known: Vec<_> = ParticleField::ALL.iter().map(|f| f.name()).collect();
                    anyhow::anyhow!(
                        "unknown dump field {}, available fields: {}",
                        name,
                        known.join(", ")
                    )
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self {
            pattern: pattern.into(),
            fields,
        })
    }

    pub fn fields(&self) -> &[ParticleField] {
        &self.fields
    }

    /// The name of the file written at the given step.
    pub fn file_name(&self, step: u64, communicator: &dyn Communicator) -> PathBuf {
        if !self.pattern.contains('*') {
            return PathBuf::from(&self.pattern);
        }

        let replacement = if communicator.num_ranks() > 1 {
            format!("proc-{}.{}", communicator.rank(), step)
        } else {
            step.to_string()
        };

        PathBuf::from(self.pattern.replacen('*', &replacement, 1))
    }

    /// Writes the local particles to the file of the given step, and returns its path.
    pub fn write(
        &self,
        step: u64,
        domain: &Aabb,
        bodies: &BodySet,
        communicator: &dyn Communicator,
    ) -> anyhow::Result<PathBuf> {
        let t0 = instant::now();
        let path = self.file_name(step, communicator);
        let file = File::create(&path)
            .with_context(|| format!("cannot create dump file {}", path.display()))?;
        let mut out = BufWriter::new(file);

        self.write_to(&mut out, step, domain, bodies)
            .and_then(|_| out.flush())
            .with_context(|| format!("cannot write in dump file {}", path.display()))?;

        debug!("Particle dump {}: {}ms", path.display(), instant::now() - t0);
        Ok(path)
    }

    /// Writes the local particles to `out`.
    pub fn write_to(
        &self,
        out: &mut impl Write,
        step: u64,
        domain: &Aabb,
        bodies: &BodySet,
    ) -> std::io::Result<()> {
        writeln!(out, "ITEM: TIMESTEP")?;
        writeln!(out, "{}", step)?;
        writeln!(out, "ITEM: NUMBER OF ATOMS")?;
        writeln!(out, "{}", bodies.num_particles())?;
        writeln!(out, "ITEM: BOX BOUNDS sm sm sm")?;
        for i in 0..3 {
            writeln!(
                out,
                "{} {}",
                vector_component(&domain.mins.coords, i),
                vector_component(&domain.maxs.coords, i)
            )?;
        }

        write!(out, "ITEM: ATOMS id type")?;
        for field in &self.fields {
            write!(out, " {}", field.name())?;
        }
        writeln!(out)?;

        for (body_id, (_, body)) in bodies.iter().enumerate() {
            for (i, particle) in body.particles.iter().enumerate() {
                write!(out, "{} {}", i, body_id + 1)?;
                for field in &self.fields {
                    write!(out, " {}", field.value(particle))?;
                }
                writeln!(out)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{ParticleDump, ParticleField};
    use crate::dynamics::models::ElasticProperties;
    use crate::dynamics::{Body, BodySet, Particle, ParticleModel, ParticleModelSet, ParticleSet};
    use crate::math::{Point, Vector, DIM};
    use crate::parallel::{SingleProcess, ThreadCommunicator};
    use parry::bounding_volume::Aabb;

    fn bodies() -> BodySet {
        let mut models = ParticleModelSet::new();
        let model = models.insert(ParticleModel::new(ElasticProperties::new(1.0, 0.2)));

        let mut particle = Particle::new(Point::from(Vector::repeat(2.0)), 0.5, 3.0);
        particle.damage.damage_init = 0.25;
        particle.external_force = Vector::x();

        let mut bodies = BodySet::new();
        bodies.insert(Body::new("a", ParticleSet::from(vec![particle; 2]), model));
        bodies.insert(Body::new("b", ParticleSet::from(vec![particle]), model));
        bodies
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = ParticleDump::new("dump.*.txt", &["x", "stress"]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("stress"));
        assert!(message.contains("damage_init"));

        let dump = ParticleDump::new("dump.*.txt", &["x", "damage", "T"]).unwrap();
        assert_eq!(
            dump.fields(),
            &[
                ParticleField::X,
                ParticleField::Damage,
                ParticleField::Temperature
            ]
        );
    }

    #[test]
    fn every_field_name_is_parsed_back() {
        for field in ParticleField::ALL.iter() {
            assert_eq!(ParticleField::from_name(field.name()), Some(*field));
        }
    }

    #[test]
    fn file_names_depend_on_the_number_of_processes() {
        let dump = ParticleDump::new("out/dump.*.LAMMPS", &[]).unwrap();
        assert_eq!(
            dump.file_name(40, &SingleProcess).to_str(),
            Some("out/dump.40.LAMMPS")
        );

        let comms = ThreadCommunicator::group(2);
        assert_eq!(
            dump.file_name(40, &comms[1]).to_str(),
            Some("out/dump.proc-1.40.LAMMPS")
        );

        let fixed = ParticleDump::new("dump.txt", &[]).unwrap();
        assert_eq!(fixed.file_name(40, &comms[1]).to_str(), Some("dump.txt"));
    }

    #[test]
    fn snapshot_layout() {
        let dump = ParticleDump::new("dump.*", &["x", "z", "mass", "damage_init", "bx"]).unwrap();
        let domain = Aabb::new(Point::origin(), Point::from(Vector::repeat(4.0)));
        let mut out = Vec::new();
        dump.write_to(&mut out, 12, &domain, &bodies()).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        let z_bounds = if DIM == 3 { "0 4" } else { "0 0" };
        let z = if DIM == 3 { "2" } else { "0" };
        let data = format!("2 {} 3 0.25 1", z);

        assert_eq!(lines.len(), 9 + 3);
        assert_eq!(lines[0], "ITEM: TIMESTEP");
        assert_eq!(lines[1], "12");
        assert_eq!(lines[2], "ITEM: NUMBER OF ATOMS");
        assert_eq!(lines[3], "3");
        assert_eq!(lines[4], "ITEM: BOX BOUNDS sm sm sm");
        assert_eq!(lines[5], "0 4");
        assert_eq!(lines[6], "0 4");
        assert_eq!(lines[7], z_bounds);
        assert_eq!(lines[8], "ITEM: ATOMS id type x z mass damage_init bx");
        assert_eq!(lines[9], format!("0 1 {}", data));
        assert_eq!(lines[10], format!("1 1 {}", data));
        assert_eq!(lines[11], format!("0 2 {}", data));
    }

    #[test]
    fn write_creates_the_file() {
        let dir = std::env::temp_dir().join(format!("crumble-dump-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let pattern = dir.join("particles.*.txt");
        let dump = ParticleDump::new(pattern.to_str().unwrap(), &["damage"]).unwrap();
        let domain = Aabb::new(Point::origin(), Point::from(Vector::repeat(4.0)));

        let path = dump.write(7, &domain, &bodies(), &SingleProcess).unwrap();
        assert_eq!(path, dir.join("particles.7.txt"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("ITEM: TIMESTEP\n7\n"));

        std::fs::remove_dir_all(&dir).unwrap();

        let missing = ParticleDump::new(dir.join("no/such/dir/*.txt").to_str().unwrap(), &[])
            .unwrap();
        assert!(missing.write(0, &domain, &bodies(), &SingleProcess).is_err());
    }
}
