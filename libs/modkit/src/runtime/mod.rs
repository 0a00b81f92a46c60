mod registry;
mod runner;
pub mod shutdown;

pub use registry::{ModuleEntry, ModuleRegistry, RegistryError};
pub use runner::{run, RunOptions, ShutdownOptions};
