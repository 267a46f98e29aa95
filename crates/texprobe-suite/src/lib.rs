//! Volume and palettized texture conformance suite.
//!
//! [`TestRegistry`] decides which encodings to exercise, [`VolumeTextureSuite`] runs each one
//! against a [`TestHost`] (generate, upload, bind geometry, draw, annotate, capture), and
//! [`SoftwareHost`] is a CPU reference host that makes the suite runnable without hardware.

mod error;
mod host;
mod overlay;
mod registry;
mod runner;
pub mod software;

pub use error::SuiteError;
pub use host::{
    CombinerSource, HostError, PipelineState, RawTextureDesc, ShaderStageProgram, TestHost,
    VertexPath,
};
pub use overlay::DiagnosticOverlay;
pub use registry::{TestCase, TestRegistry};
pub use runner::{
    SuiteOptions, TestOutcome, TestPhase, VolumeTextureSuite, BACKGROUND_COLOR, SUITE_NAME,
};
pub use software::{HostCall, SoftwareHost, SoftwareHostConfig};
