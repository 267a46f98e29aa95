use std::path::PathBuf;

use clap::Parser;
use texprobe_formats::PaletteSize;
use texprobe_suite::{SoftwareHostConfig, SuiteOptions};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "texprobe",
    version,
    about = "Renders the NV2A volume texture conformance suite with the software host"
)]
pub struct Args {
    /// Root directory for captured frames.
    ///
    /// Frames land in a `Volume_texture` subdirectory.
    ///
    /// Environment variable: `TEXPROBE_OUTPUT_DIR`.
    #[arg(long, env = "TEXPROBE_OUTPUT_DIR", default_value = "./output")]
    output_dir: PathBuf,

    /// Run the tests without writing any frames.
    #[arg(long)]
    no_save: bool,

    /// Only run the named test. May be repeated; tests run in the order given.
    #[arg(long = "test", value_name = "NAME")]
    tests: Vec<String>,

    /// Print the registered test names and exit.
    #[arg(long)]
    list: bool,

    /// Entries in the palette used by the palettized test (32, 64, 128 or 256).
    #[arg(long, default_value = "256", value_parser = parse_palette_size)]
    palette_size: PaletteSize,

    /// Width of generated textures, in texels.
    #[arg(long, default_value_t = 256)]
    max_texture_width: u32,

    /// Height of generated textures, in texels.
    #[arg(long, default_value_t = 256)]
    max_texture_height: u32,

    /// Log filter (tracing-subscriber EnvFilter syntax).
    ///
    /// Environment variable: `TEXPROBE_LOG`.
    #[arg(long, env = "TEXPROBE_LOG")]
    log_level: Option<String>,
}

fn parse_palette_size(value: &str) -> Result<PaletteSize, String> {
    let entries: u32 = value
        .trim()
        .parse()
        .map_err(|_| format!("{value:?} is not a number"))?;
    PaletteSize::try_from(entries).map_err(|err| err.to_string())
}

#[derive(Debug, Clone)]
pub struct Config {
    pub suite: SuiteOptions,
    pub host: SoftwareHostConfig,
    pub tests: Vec<String>,
    pub list: bool,
    pub log_level: String,
}

impl Config {
    pub fn load() -> Self {
        Self::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> Self {
        let log_level = args
            .log_level
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "info".to_string());

        Self {
            suite: SuiteOptions {
                output_dir: args.output_dir,
                allow_saving: !args.no_save,
                palette_size: args.palette_size,
            },
            host: SoftwareHostConfig {
                max_texture_width: args.max_texture_width,
                max_texture_height: args.max_texture_height,
                ..SoftwareHostConfig::default()
            },
            tests: args.tests,
            list: args.list,
            log_level,
        }
    }
}
