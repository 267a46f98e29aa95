use std::fmt;

use texprobe_formats::FormatDescriptor;

use crate::host::TestHost;

/// The diagnostic text drawn on every frame: name, encoding, swizzle and conversion flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticOverlay {
    lines: Vec<String>,
}

impl DiagnosticOverlay {
    pub fn for_format(format: &FormatDescriptor) -> Self {
        Self {
            lines: vec![
                format!("N: {}", format.name),
                format!("F: 0x{:x}", format.encoding_id),
                format!("SZ: {}", u8::from(format.is_tiled_volume_capable)),
                format!("C: {}", u8::from(format.requires_conversion)),
            ],
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Queues every line on `host` and renders them.
    pub fn draw<H: TestHost + ?Sized>(&self, host: &mut H) {
        for line in &self.lines {
            host.print_overlay(line);
        }
        host.draw_overlay();
    }
}

impl fmt::Display for DiagnosticOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
