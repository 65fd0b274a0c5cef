pub mod kill;
pub mod procfs;
pub mod sampler;
pub mod source;
