pub use self::hertz::{effective_particle_radius, hertz_force_magnitude, ContactParameters};

mod hertz;
