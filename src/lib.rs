//! NV2A texture conformance probes.
//!
//! Re-exports the workspace crates under one roof:
//! - [`formats`]: the texture encoding catalog,
//! - [`generators`]: deterministic texture, palette and geometry generators,
//! - [`suite`]: the test runner, the host abstraction and the software reference host.

pub use texprobe_formats as formats;
pub use texprobe_gen as generators;
pub use texprobe_suite as suite;

pub use texprobe_suite::{SoftwareHost, SuiteOptions, VolumeTextureSuite};
