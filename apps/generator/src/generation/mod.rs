// Generation pipeline: one configuration in, one tailored PDF out.
// Rendering goes through the PageRenderer trait only.

pub mod generator;
pub mod output;

pub use generator::generate_tailored_resume;
