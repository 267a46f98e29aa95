//! CPU reference implementation of [`TestHost`].
//!
//! The software host stores uploads the way the hardware would (swizzled when requested),
//! rasterizes the bound triangles with point sampling and writes frames as PNG files. It does
//! not convert texels into the selected encoding: direct textures are sampled from the
//! generated RGBA data, indexed textures through the uploaded palette.
//!
//! Every call is recorded as a [`HostCall`], and uploads can be made to fail on demand, which
//! makes the host usable as a test double for the runner.

mod raster;
pub mod swizzle;

use std::path::{Path, PathBuf};

use texprobe_formats::{FormatDescriptor, PaletteSize};
use texprobe_gen::{unpack_rgba8888, GeometryBuffer, Surface, Vertex};
use tracing::{debug, warn};

use crate::host::{
    CombinerSource, HostError, PipelineState, RawTextureDesc, ShaderStageProgram, TestHost,
    VertexPath,
};
use swizzle::{swizzle_box, Swizzler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftwareHostConfig {
    pub max_texture_width: u32,
    pub max_texture_height: u32,
    pub framebuffer_width: u32,
    pub framebuffer_height: u32,
}

impl Default for SoftwareHostConfig {
    fn default() -> Self {
        Self {
            max_texture_width: 256,
            max_texture_height: 256,
            framebuffer_width: 640,
            framebuffer_height: 480,
        }
    }
}

/// A recorded [`TestHost`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    ConfigurePipeline,
    SetTextureFormat(u32),
    SetVolumetricTexture { width: u32, height: u32, depth: u32 },
    SetRawTexture(RawTextureDesc),
    SetPalette { entries: u32 },
    SetTextureDimensions { stage: usize, width: u32, height: u32, depth: u32 },
    BindGeometry { vertices: usize },
    PrepareDraw { background: u32 },
    DrawArrays,
    PrintOverlay(String),
    DrawOverlay,
    FinishDraw { name: String, saved: bool },
}

#[derive(Debug, Clone)]
enum TexelData {
    /// RGBA8888 texels.
    Direct(Vec<u32>),
    /// 8-bit palette indices.
    Indexed(Vec<u8>),
}

#[derive(Debug, Clone)]
struct BoundTexture {
    width: u32,
    height: u32,
    depth: u32,
    swizzler: Option<Swizzler>,
    data: TexelData,
}

impl BoundTexture {
    fn texel_index(&self, x: u32, y: u32, z: u32) -> usize {
        match &self.swizzler {
            Some(swizzler) => swizzler.offset(x, y, z),
            None => {
                let row = z as usize * self.height as usize + y as usize;
                row * self.width as usize + x as usize
            }
        }
    }
}

pub struct SoftwareHost {
    config: SoftwareHostConfig,
    calls: Vec<HostCall>,
    pipeline: PipelineState,
    format: Option<FormatDescriptor>,
    texture: Option<BoundTexture>,
    palette: Vec<u32>,
    stage_dimensions: [(u32, u32, u32); 4],
    geometry: Vec<Vertex>,
    framebuffer: Vec<u32>,
    pending_overlay: Vec<String>,
    overlay: Vec<String>,
    fail_next_upload: Option<String>,
}

impl Default for SoftwareHost {
    fn default() -> Self {
        Self::new(SoftwareHostConfig::default())
    }
}

impl SoftwareHost {
    pub fn new(config: SoftwareHostConfig) -> Self {
        let texels = config.framebuffer_width as usize * config.framebuffer_height as usize;
        Self {
            config,
            calls: Vec::new(),
            pipeline: PipelineState::volume_sampling(),
            format: None,
            texture: None,
            palette: Vec::new(),
            stage_dimensions: [(0, 0, 0); 4],
            geometry: Vec::new(),
            framebuffer: vec![0; texels],
            pending_overlay: Vec::new(),
            overlay: Vec::new(),
            fail_next_upload: None,
        }
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Makes the next texture or palette upload fail with `reason`.
    pub fn fail_next_upload(&mut self, reason: impl Into<String>) {
        self.fail_next_upload = Some(reason.into());
    }

    /// Current frame as ARGB words, row-major.
    pub fn framebuffer(&self) -> &[u32] {
        &self.framebuffer
    }

    /// ARGB value at framebuffer position `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.config.framebuffer_width || y >= self.config.framebuffer_height {
            return None;
        }
        self.framebuffer
            .get(y as usize * self.config.framebuffer_width as usize + x as usize)
            .copied()
    }

    /// Diagnostic lines drawn on the current frame.
    pub fn overlay(&self) -> &[String] {
        &self.overlay
    }

    pub fn palette(&self) -> &[u32] {
        &self.palette
    }

    /// Dimensions last programmed for texture `stage`.
    pub fn texture_dimensions(&self, stage: usize) -> Option<(u32, u32, u32)> {
        self.stage_dimensions.get(stage).copied()
    }

    fn take_injected_failure(&mut self, what: &str) -> Result<(), HostError> {
        match self.fail_next_upload.take() {
            Some(reason) => {
                warn!(what, %reason, "injected upload failure");
                Err(HostError::Rejected(reason))
            }
            None => Ok(()),
        }
    }

    fn check_extent(&self, width: u32, height: u32, depth: u32) -> Result<(), HostError> {
        if width == 0 || height == 0 || depth == 0 {
            return Err(reject(format!("empty texture {width}x{height}x{depth}")));
        }
        if width > self.config.max_texture_width || height > self.config.max_texture_height {
            return Err(reject(format!(
                "texture {width}x{height} exceeds maximum {}x{}",
                self.config.max_texture_width, self.config.max_texture_height
            )));
        }
        Ok(())
    }

    /// Samples the bound texture at texel-space `(u, v)` and normalized depth `p`, returning
    /// ARGB.
    fn sample(&self, u: f32, v: f32, p: f32) -> Option<u32> {
        let texture = self.texture.as_ref()?;
        let x = clamp_texel(u.floor(), texture.width);
        let y = clamp_texel(v.floor(), texture.height);
        let z = match self.pipeline.stage0_program {
            ShaderStageProgram::Texture3dProjective => {
                clamp_texel((p * texture.depth as f32).floor(), texture.depth)
            }
            _ => 0,
        };

        let index = texture.texel_index(x, y, z);
        match &texture.data {
            TexelData::Direct(texels) => texels.get(index).map(|&t| {
                let [r, g, b, a] = unpack_rgba8888(t);
                u32::from_be_bytes([a, r, g, b])
            }),
            TexelData::Indexed(indices) => indices
                .get(index)
                .and_then(|&i| self.palette.get(usize::from(i)))
                .copied(),
        }
    }

    fn shade(&self, u: f32, v: f32, p: f32) -> u32 {
        let texturing = self.pipeline.texture_stage_enabled[0]
            && self.pipeline.stage0_program != ShaderStageProgram::Disabled;
        let texel = if texturing { self.sample(u, v, p) } else { None };

        let pick = |source: CombinerSource, mask: u32| match source {
            CombinerSource::Zero => 0,
            // Vertices carry no color; diffuse is opaque white.
            CombinerSource::Diffuse => mask,
            CombinerSource::Texture0 => texel.unwrap_or(0) & mask,
        };
        pick(self.pipeline.color_source, 0x00FF_FFFF)
            | pick(self.pipeline.alpha_source, 0xFF00_0000)
    }

    fn write_frame(&self, output_dir: &Path, name: &str) -> Result<PathBuf, HostError> {
        std::fs::create_dir_all(output_dir)?;

        let mut rgba = Vec::with_capacity(self.framebuffer.len() * 4);
        for &pixel in &self.framebuffer {
            let [a, r, g, b] = pixel.to_be_bytes();
            rgba.extend_from_slice(&[r, g, b, a]);
        }
        let image = image::RgbaImage::from_raw(
            self.config.framebuffer_width,
            self.config.framebuffer_height,
            rgba,
        )
        .ok_or_else(|| reject("framebuffer does not match its dimensions"))?;

        let path = output_dir.join(format!("{name}.png"));
        image.save(&path)?;

        if !self.overlay.is_empty() {
            let mut text = self.overlay.join("\n");
            text.push('\n');
            std::fs::write(output_dir.join(format!("{name}.txt")), text)?;
        }
        Ok(path)
    }
}

impl TestHost for SoftwareHost {
    fn max_texture_width(&self) -> u32 {
        self.config.max_texture_width
    }

    fn max_texture_height(&self) -> u32 {
        self.config.max_texture_height
    }

    fn configure_pipeline(&mut self, state: &PipelineState) {
        self.calls.push(HostCall::ConfigurePipeline);
        self.pipeline = *state;
    }

    fn set_texture_format(&mut self, format: &FormatDescriptor) {
        self.calls.push(HostCall::SetTextureFormat(format.encoding_id));
        self.format = Some(*format);
    }

    fn set_volumetric_texture(&mut self, layers: &[Surface]) -> Result<(), HostError> {
        let depth = layers.len() as u32;
        let (width, height) = layers
            .first()
            .map_or((0, 0), |layer| (layer.width(), layer.height()));
        self.calls.push(HostCall::SetVolumetricTexture {
            width,
            height,
            depth,
        });
        self.take_injected_failure("volume texture")?;

        let format = self
            .format
            .ok_or_else(|| reject("no texture format selected"))?;
        if !format.is_tiled_volume_capable {
            return Err(reject(format!(
                "{} is a linear encoding; volumes must be swizzled",
                format.name
            )));
        }
        self.check_extent(width, height, depth)?;
        if let Some(layer) = layers
            .iter()
            .find(|layer| layer.width() != width || layer.height() != height)
        {
            return Err(reject(format!(
                "layer size {}x{} differs from {width}x{height}",
                layer.width(),
                layer.height()
            )));
        }
        let swizzler = Swizzler::new(width, height, depth).ok_or_else(|| {
            reject(format!(
                "swizzled volume {width}x{height}x{depth} must have power-of-two dimensions"
            ))
        })?;

        // Layers arrive as tightly pitched native-endian RGBA8888 rows.
        let texels = width as usize * height as usize;
        let mut dense = Vec::with_capacity(texels * layers.len());
        for layer in layers {
            let pitch = layer.pitch();
            let bytes = layer
                .as_bytes()
                .get(..pitch * height as usize)
                .ok_or_else(|| reject("layer holds fewer texels than its dimensions"))?;
            for row in bytes.chunks_exact(pitch) {
                dense.extend(
                    row.chunks_exact(4)
                        .map(|t| u32::from_ne_bytes([t[0], t[1], t[2], t[3]])),
                );
            }
        }
        let data = swizzle_box(&swizzler, &dense, width, height, depth);

        debug!(format = format.name, width, height, depth, "volume texture uploaded");
        self.texture = Some(BoundTexture {
            width,
            height,
            depth,
            swizzler: Some(swizzler),
            data: TexelData::Direct(data),
        });
        Ok(())
    }

    fn set_raw_texture(&mut self, data: &[u8], desc: RawTextureDesc) -> Result<(), HostError> {
        self.calls.push(HostCall::SetRawTexture(desc));
        self.take_injected_failure("raw texture")?;

        let format = self
            .format
            .ok_or_else(|| reject("no texture format selected"))?;
        if !format.is_palettized() {
            return Err(reject(format!(
                "raw uploads need an indexed encoding, {} is selected",
                format.name
            )));
        }
        let RawTextureDesc {
            width,
            height,
            depth,
            pitch,
            levels,
            swizzled,
        } = desc;
        self.check_extent(width, height, depth)?;
        if levels != 1 {
            return Err(reject(format!("{levels} mip levels requested, only 1 is supported")));
        }
        if pitch < width {
            return Err(reject(format!("pitch {pitch} is narrower than width {width}")));
        }
        let required = pitch as usize * height as usize * depth as usize;
        if data.len() < required {
            return Err(reject(format!(
                "raw texture holds {} bytes, {required} required",
                data.len()
            )));
        }

        let mut dense = Vec::with_capacity(width as usize * height as usize * depth as usize);
        for row in data[..required].chunks_exact(pitch as usize) {
            dense.extend_from_slice(&row[..width as usize]);
        }

        let (swizzler, indices) = if swizzled {
            let swizzler = Swizzler::new(width, height, depth).ok_or_else(|| {
                reject(format!(
                    "swizzled texture {width}x{height}x{depth} must have power-of-two dimensions"
                ))
            })?;
            let indices = swizzle_box(&swizzler, &dense, width, height, depth);
            (Some(swizzler), indices)
        } else {
            (None, dense)
        };

        debug!(width, height, depth, swizzled, "raw texture uploaded");
        self.texture = Some(BoundTexture {
            width,
            height,
            depth,
            swizzler,
            data: TexelData::Indexed(indices),
        });
        Ok(())
    }

    fn set_palette(&mut self, colors: &[u32], size: PaletteSize) -> Result<(), HostError> {
        self.calls.push(HostCall::SetPalette {
            entries: size.entries(),
        });
        self.take_injected_failure("palette")?;

        let entries = size.entries() as usize;
        if colors.len() < entries {
            return Err(reject(format!(
                "palette holds {} colors, {entries} required",
                colors.len()
            )));
        }
        self.palette = colors[..entries].to_vec();
        Ok(())
    }

    fn set_texture_dimensions(&mut self, stage: usize, width: u32, height: u32, depth: u32) {
        self.calls.push(HostCall::SetTextureDimensions {
            stage,
            width,
            height,
            depth,
        });
        if let Some(dims) = self.stage_dimensions.get_mut(stage) {
            *dims = (width, height, depth);
        }
    }

    fn bind_geometry(&mut self, geometry: &GeometryBuffer) {
        self.calls.push(HostCall::BindGeometry {
            vertices: geometry.len(),
        });
        // Copied as raw bytes, the way a vertex buffer reaches the device.
        let bytes = geometry.as_bytes();
        let count = bytes.len() / std::mem::size_of::<Vertex>();
        let mut vertices = vec![Vertex::default(); count];
        bytemuck::cast_slice_mut::<Vertex, u8>(&mut vertices).copy_from_slice(bytes);
        self.geometry = vertices;
    }

    fn prepare_draw(&mut self, background_argb: u32) {
        self.calls.push(HostCall::PrepareDraw {
            background: background_argb,
        });
        self.framebuffer.fill(background_argb);
        self.pending_overlay.clear();
        self.overlay.clear();
    }

    fn draw_arrays(&mut self) {
        self.calls.push(HostCall::DrawArrays);
        if self.pipeline.vertex_path != VertexPath::FixedFunction {
            warn!("no vertex program support; draw skipped");
            return;
        }

        let viewport = raster::Viewport::new(
            self.config.framebuffer_width,
            self.config.framebuffer_height,
        );
        let mut fragments = Vec::new();
        for triangle in self.geometry.chunks_exact(3) {
            let corners = [&triangle[0], &triangle[1], &triangle[2]];
            raster::rasterize_triangle(&viewport, corners, |x, y, [u, v, p]| {
                fragments.push((x, y, u, v, p));
            });
        }

        let width = self.config.framebuffer_width as usize;
        for (x, y, u, v, p) in fragments {
            let color = self.shade(u, v, p);
            if let Some(dst) = self.framebuffer.get_mut(y as usize * width + x as usize) {
                *dst = color;
            }
        }
    }

    fn print_overlay(&mut self, line: &str) {
        self.calls.push(HostCall::PrintOverlay(line.to_string()));
        self.pending_overlay.push(line.to_string());
    }

    fn draw_overlay(&mut self) {
        self.calls.push(HostCall::DrawOverlay);
        self.overlay.append(&mut self.pending_overlay);
    }

    fn finish_draw(
        &mut self,
        allow_saving: bool,
        output_dir: &Path,
        name: &str,
    ) -> Result<Option<PathBuf>, HostError> {
        self.calls.push(HostCall::FinishDraw {
            name: name.to_string(),
            saved: allow_saving,
        });
        if !allow_saving {
            return Ok(None);
        }
        let path = self.write_frame(output_dir, name)?;
        debug!(path = %path.display(), "frame saved");
        Ok(Some(path))
    }
}

fn reject(reason: impl Into<String>) -> HostError {
    let reason = reason.into();
    warn!(%reason, "request rejected");
    HostError::Rejected(reason)
}

fn clamp_texel(coord: f32, extent: u32) -> u32 {
    // `as` saturates negative and NaN values to 0.
    (coord as u32).min(extent.saturating_sub(1))
}
