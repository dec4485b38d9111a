pub mod references;
pub mod resume;

pub use references::{LinkReference, PersonReference, Reference, References};
pub use resume::{Customizations, ExperienceEmphasis, ResumeConfig};
