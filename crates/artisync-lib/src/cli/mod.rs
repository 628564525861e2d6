mod args;
mod commands;
mod params;
mod sync;

pub use args::{Args, SyncOptions, parse_args};
pub use commands::resolve_params;
pub use params::SyncParams;
pub use sync::run_sync;
