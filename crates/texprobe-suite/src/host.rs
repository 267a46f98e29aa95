use std::path::{Path, PathBuf};

use texprobe_formats::{FormatDescriptor, PaletteSize};
use texprobe_gen::{GeometryBuffer, Surface};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    /// The host refused the data (bad dimensions, unsupported layout, device failure, ...).
    #[error("{0}")]
    Rejected(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode frame: {0}")]
    Image(#[from] image::ImageError),
}

/// Where vertices are transformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexPath {
    /// Fixed-function transform with the default viewport and matrices.
    FixedFunction,
    /// A user vertex program is bound.
    Programmable,
}

/// Texture shader program of a texture stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStageProgram {
    Disabled,
    Texture2d,
    /// `(u, v, p)` lookup into a volume texture.
    Texture3dProjective,
}

/// Input routed to the output of the single register combiner stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombinerSource {
    Zero,
    Diffuse,
    Texture0,
}

/// Pipeline configuration applied once before a suite runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineState {
    pub vertex_path: VertexPath,
    pub texture_stage_enabled: [bool; 4],
    pub stage0_program: ShaderStageProgram,
    pub color_source: CombinerSource,
    pub alpha_source: CombinerSource,
}

impl PipelineState {
    /// Fixed-function geometry, stage 0 sampling a volume, and texture 0 color and alpha
    /// passed straight through the combiners.
    pub fn volume_sampling() -> Self {
        Self {
            vertex_path: VertexPath::FixedFunction,
            texture_stage_enabled: [true, false, false, false],
            stage0_program: ShaderStageProgram::Texture3dProjective,
            color_source: CombinerSource::Texture0,
            alpha_source: CombinerSource::Texture0,
        }
    }
}

/// Layout of a raw texture upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTextureDesc {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    /// Bytes per source row.
    pub pitch: u32,
    /// Mipmap levels contained in the buffer.
    pub levels: u32,
    /// Swizzle the data into the tiled layout while uploading.
    pub swizzled: bool,
}

/// Graphics host the suites drive.
///
/// All calls are synchronous; `draw_arrays` returns once the draw has completed. The host
/// owns texture conversion, swizzling and frame presentation.
pub trait TestHost {
    fn max_texture_width(&self) -> u32;
    fn max_texture_height(&self) -> u32;

    fn configure_pipeline(&mut self, state: &PipelineState);

    /// Selects the encoding used by subsequent uploads and draws.
    fn set_texture_format(&mut self, format: &FormatDescriptor);

    /// Uploads `layers` (in depth order) as a volume texture in the current format.
    fn set_volumetric_texture(&mut self, layers: &[Surface]) -> Result<(), HostError>;

    fn set_raw_texture(&mut self, data: &[u8], desc: RawTextureDesc) -> Result<(), HostError>;

    /// Uploads an A8R8G8B8 lookup table.
    fn set_palette(&mut self, colors: &[u32], size: PaletteSize) -> Result<(), HostError>;

    fn set_texture_dimensions(&mut self, stage: usize, width: u32, height: u32, depth: u32);

    fn bind_geometry(&mut self, geometry: &GeometryBuffer);

    fn prepare_draw(&mut self, background_argb: u32);

    fn draw_arrays(&mut self);

    /// Queues one line of diagnostic text.
    fn print_overlay(&mut self, line: &str);

    /// Renders the queued diagnostic text onto the frame.
    fn draw_overlay(&mut self);

    /// Completes the frame and, if `allow_saving` is set, persists it under `output_dir`
    /// keyed by `name`. Returns the artifact path when one was written.
    fn finish_draw(
        &mut self,
        allow_saving: bool,
        output_dir: &Path,
        name: &str,
    ) -> Result<Option<PathBuf>, HostError>;
}
