use std::path::Path;

use crate::capture::domain::frame_source::FrameSource;
use crate::capture::domain::image_writer::ImageWriter;
use crate::pipeline::analyze_frame_use_case::{AnalyzeFrameUseCase, FrameAnalysis};

/// Single-image pipeline: read → analyze → optionally write the annotated result.
pub struct AnalyzeImageUseCase {
    source: Box<dyn FrameSource>,
    image_writer: Box<dyn ImageWriter>,
    analyzer: AnalyzeFrameUseCase,
}

impl AnalyzeImageUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        image_writer: Box<dyn ImageWriter>,
        analyzer: AnalyzeFrameUseCase,
    ) -> Self {
        Self {
            source,
            image_writer,
            analyzer,
        }
    }

    /// Reads one frame, analyzes it and writes the annotated copy to `output_path`.
    pub fn execute(
        &mut self,
        output_path: Option<&Path>,
    ) -> Result<FrameAnalysis, Box<dyn std::error::Error>> {
        let frame = self.source.read().ok_or("No frame in input")?;
        self.source.release();

        let analysis = self.analyzer.execute(&frame)?;
        log::info!("Found {} face(s)", analysis.faces.len());

        if let Some(path) = output_path {
            self.image_writer.write(path, &analysis.annotated)?;
            log::info!("Wrote {}", path.display());
        }

        Ok(analysis)
    }
}
