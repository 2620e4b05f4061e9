//! Settings for the `kal-ui` binary.
//!
//! Sources are layered in order: default files, `--config` files,
//! `KAL_UI__*` environment variables, then command-line flags. [`load`]
//! returns the [`ResolvedConfig`] the commands run with.

mod loader;
mod raw;
mod resolved;

pub use loader::load;
pub use resolved::ResolvedConfig;
