use std::path::{Path, PathBuf};

use texprobe_formats::{palettized_format, FormatDescriptor, PaletteSize, TEXTURE_FORMATS};
use texprobe_gen::{
    build_volume_quads, generate_gradient_volume, generate_palette, generate_palettized_volume,
    GenError, GeometryBuffer, TEXTURE_DEPTH,
};
use tracing::{debug, error, info};

use crate::error::SuiteError;
use crate::host::{HostError, PipelineState, RawTextureDesc, TestHost};
use crate::overlay::DiagnosticOverlay;
use crate::registry::{TestCase, TestRegistry};

pub const SUITE_NAME: &str = "Volume texture";

/// Frame clear color (ARGB).
pub const BACKGROUND_COLOR: u32 = 0xFE20_2020;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteOptions {
    /// Root directory for captured frames. The suite writes into a per-suite subdirectory.
    pub output_dir: PathBuf,
    pub allow_saving: bool,
    pub palette_size: PaletteSize,
}

impl Default for SuiteOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            allow_saving: true,
            palette_size: PaletteSize::Palette256,
        }
    }
}

/// Steps of a single test run.
///
/// Direct-volume tests go `Init -> GenerateLayers -> Upload -> BindGeometry -> Draw ->
/// Annotate -> Report -> Done`; palettized tests replace `GenerateLayers` with
/// `GeneratePalette -> GenerateIndices`. Any failure ends in `Aborted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestPhase {
    Init,
    GenerateLayers,
    GeneratePalette,
    GenerateIndices,
    Upload,
    BindGeometry,
    Draw,
    Annotate,
    Report,
    Done,
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    pub name: String,
    /// Captured frame, if saving was enabled and the host persisted it.
    pub artifact: Option<PathBuf>,
}

/// Runs volume texture tests against a host, one at a time.
pub struct VolumeTextureSuite<H> {
    host: H,
    options: SuiteOptions,
    output_dir: PathBuf,
    registry: TestRegistry,
    geometry: Option<GeometryBuffer>,
    phase: TestPhase,
}

impl<H: TestHost> VolumeTextureSuite<H> {
    pub fn new(host: H, options: SuiteOptions) -> Self {
        let output_dir = options.output_dir.join(SUITE_NAME.replace(' ', "_"));
        Self {
            host,
            options,
            output_dir,
            registry: TestRegistry::for_catalog(TEXTURE_FORMATS),
            geometry: None,
            phase: TestPhase::Init,
        }
    }

    pub fn registry(&self) -> &TestRegistry {
        &self.registry
    }

    pub fn options(&self) -> &SuiteOptions {
        &self.options
    }

    /// Directory frames are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Phase reached by the most recent test run.
    pub fn phase(&self) -> TestPhase {
        self.phase
    }

    /// The quads bound for every draw, once [`Self::initialize`] has run.
    pub fn geometry(&self) -> Option<&GeometryBuffer> {
        self.geometry.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Configures the pipeline for volume sampling and builds the shared geometry.
    ///
    /// Called implicitly by the first test run.
    pub fn initialize(&mut self) {
        self.host.configure_pipeline(&PipelineState::volume_sampling());

        let mut geometry = build_volume_quads();
        geometry.linearize(
            self.host.max_texture_width() as f32,
            self.host.max_texture_height() as f32,
        );
        debug!(vertices = geometry.len(), "volume texture geometry ready");
        self.geometry = Some(geometry);
    }

    /// Runs every registered test in name order, stopping at the first failure.
    pub fn run_all(&mut self) -> Result<Vec<TestOutcome>, SuiteError> {
        let cases: Vec<TestCase> = self.registry.iter().map(|(_, case)| case).collect();
        cases.into_iter().map(|case| self.run(case)).collect()
    }

    /// Runs the named tests in the given order, stopping at the first failure.
    pub fn run_named<S: AsRef<str>>(
        &mut self,
        names: &[S],
    ) -> Result<Vec<TestOutcome>, SuiteError> {
        let cases = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.registry
                    .get(name)
                    .ok_or_else(|| SuiteError::UnknownTest(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        cases.into_iter().map(|case| self.run(case)).collect()
    }

    /// Runs one test to completion.
    pub fn run(&mut self, case: TestCase) -> Result<TestOutcome, SuiteError> {
        if self.geometry.is_none() {
            self.initialize();
        }

        let format = match case {
            TestCase::DirectVolume(format) => format,
            TestCase::Palettized => palettized_format(),
        };
        self.enter(format.name, TestPhase::Init);

        let result = match case {
            TestCase::DirectVolume(format) => self.run_direct(format),
            TestCase::Palettized => self.run_palettized(format),
        };

        match result {
            Ok(artifact) => {
                self.enter(format.name, TestPhase::Done);
                info!(test = format.name, artifact = ?artifact, "test complete");
                Ok(TestOutcome {
                    name: format.name.to_string(),
                    artifact,
                })
            }
            Err(err) => {
                self.phase = TestPhase::Aborted;
                error!(test = format.name, error = %err, "test aborted");
                Err(err)
            }
        }
    }

    fn run_direct(
        &mut self,
        format: &'static FormatDescriptor,
    ) -> Result<Option<PathBuf>, SuiteError> {
        let name = format.name;
        self.host.set_texture_format(format);
        let width = self.host.max_texture_width();
        let height = self.host.max_texture_height();

        self.enter(name, TestPhase::GenerateLayers);
        let layers = generate_gradient_volume(width, height, TEXTURE_DEPTH)
            .map_err(|source| generation_error(name, source))?;

        self.enter(name, TestPhase::Upload);
        self.host
            .set_volumetric_texture(&layers)
            .map_err(|source| upload_error(name, "volume texture", source))?;
        drop(layers);
        self.host.set_texture_dimensions(0, width, height, TEXTURE_DEPTH);

        self.draw_and_report(format)
    }

    fn run_palettized(
        &mut self,
        format: &'static FormatDescriptor,
    ) -> Result<Option<PathBuf>, SuiteError> {
        let name = format.name;
        let palette_size = self.options.palette_size;
        self.host.set_texture_format(format);
        let width = self.host.max_texture_width();
        let height = self.host.max_texture_height();

        self.enter(name, TestPhase::GeneratePalette);
        let palette = generate_palette(palette_size.entries());

        self.enter(name, TestPhase::GenerateIndices);
        let indices = generate_palettized_volume(width, height, TEXTURE_DEPTH, palette_size)
            .map_err(|source| generation_error(name, source))?;

        self.enter(name, TestPhase::Upload);
        let desc = RawTextureDesc {
            width,
            height,
            depth: TEXTURE_DEPTH,
            pitch: width,
            levels: 1,
            swizzled: format.is_tiled_volume_capable,
        };
        self.host
            .set_raw_texture(&indices, desc)
            .map_err(|source| upload_error(name, "index volume", source))?;
        drop(indices);
        self.host.set_texture_dimensions(0, width, height, TEXTURE_DEPTH);
        self.host
            .set_palette(&palette, palette_size)
            .map_err(|source| upload_error(name, "palette", source))?;
        drop(palette);

        self.draw_and_report(format)
    }

    fn draw_and_report(
        &mut self,
        format: &FormatDescriptor,
    ) -> Result<Option<PathBuf>, SuiteError> {
        let name = format.name;

        self.enter(name, TestPhase::BindGeometry);
        if let Some(geometry) = &self.geometry {
            self.host.bind_geometry(geometry);
        }

        self.enter(name, TestPhase::Draw);
        self.host.prepare_draw(BACKGROUND_COLOR);
        self.host.draw_arrays();

        self.enter(name, TestPhase::Annotate);
        DiagnosticOverlay::for_format(format).draw(&mut self.host);

        self.enter(name, TestPhase::Report);
        self.host
            .finish_draw(self.options.allow_saving, &self.output_dir, name)
            .map_err(|source| SuiteError::Capture {
                test: name.to_string(),
                source,
            })
    }

    fn enter(&mut self, test: &str, phase: TestPhase) {
        debug!(test, from = ?self.phase, to = ?phase, "phase transition");
        self.phase = phase;
    }
}

fn generation_error(test: &str, source: GenError) -> SuiteError {
    SuiteError::Generation {
        test: test.to_string(),
        source,
    }
}

fn upload_error(test: &str, what: &'static str, source: HostError) -> SuiteError {
    SuiteError::Upload {
        test: test.to_string(),
        what,
        source,
    }
}
