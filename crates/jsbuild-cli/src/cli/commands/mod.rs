//! CLI command handlers, one per file.

mod build;
mod dependency_dag;
mod doctor;
mod ensure_closure;
mod list_deps;
mod nuke_cache;

pub use build::run_build;
pub use dependency_dag::run_dependency_dag;
pub use doctor::run_doctor;
pub use ensure_closure::run_ensure_closure;
pub use list_deps::run_list_deps;
pub use nuke_cache::run_nuke_cache;
