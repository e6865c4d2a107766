use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use serde_json::json;

use agesight_core::blurring::infrastructure::blurrer_factory::FaceMask;
use agesight_core::capture::infrastructure::image_file_writer::ImageFileWriter;
use agesight_core::capture::infrastructure::still_image_source::StillImageSource;
use agesight_core::pipeline::analysis_options::AnalysisOptions;
use agesight_core::pipeline::analyze_frame_use_case::FrameAnalysis;
use agesight_core::pipeline::analyze_image_use_case::AnalyzeImageUseCase;
use agesight_core::pipeline::analyzer_factory::{build_analyzer, AnalyzerConfig};
use agesight_core::shared::constants::{DEFAULT_CONFIDENCE, IMAGE_EXTENSIONS};
use agesight_core::statistics::detection_stats::AttributeCounts;

/// Face detection with age and gender estimation for still images.
#[derive(Parser)]
#[command(name = "agesight")]
struct Cli {
    /// Input image file.
    input: PathBuf,

    /// Annotated output image (format from extension).
    output: Option<PathBuf>,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE)]
    confidence: f64,

    /// Blur detected faces. Takes precedence over --pixelate.
    #[arg(long)]
    blur: bool,

    /// Pixelate detected faces.
    #[arg(long)]
    pixelate: bool,

    /// Draw the FPS counter on the output.
    #[arg(long)]
    show_fps: bool,

    /// Prefer the platform's accelerated inference backend.
    #[arg(long)]
    gpu: bool,

    /// Directory containing the ONNX model files.
    #[arg(long)]
    models_dir: Option<PathBuf>,

    /// TrueType font used for labels.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Print results as JSON instead of text.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            confidence: self.confidence,
            mask: FaceMask::from_flags(self.blur, self.pixelate),
            show_fps: self.show_fps,
            ..AnalysisOptions::default()
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let options = cli.analysis_options();
    let config = AnalyzerConfig {
        models_dir: cli.models_dir.as_deref(),
        font_path: cli.font.as_deref(),
        use_gpu: cli.gpu,
    };
    let analyzer = build_analyzer(&config, options)?;

    let source = StillImageSource::open(&cli.input)?;
    let mut use_case =
        AnalyzeImageUseCase::new(Box::new(source), Box::new(ImageFileWriter::new()), analyzer);
    let analysis = use_case.execute(cli.output.as_deref())?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&to_json(&analysis))?);
    } else {
        print_text(&analysis);
    }

    if let Some(output) = &cli.output {
        log::info!("Output written to {}", output.display());
    }
    Ok(())
}

fn print_text(analysis: &FrameAnalysis) {
    println!("{} face(s) detected", analysis.faces.len());
    for (i, face) in analysis.faces.iter().enumerate() {
        let r = &face.detection.region;
        println!(
            "  #{}: {}  at ({}, {})-({}, {})  confidence {:.2}",
            i + 1,
            face.classification.label(),
            r.x,
            r.y,
            r.x2(),
            r.y2(),
            face.detection.confidence
        );
    }
    let summary = counts(analysis).summary();
    if !summary.is_empty() {
        println!("{}", summary.trim_end());
    }
}

fn counts(analysis: &FrameAnalysis) -> AttributeCounts {
    let mut counts = AttributeCounts::default();
    for face in &analysis.faces {
        counts.add(face.classification.gender, face.classification.age);
    }
    counts
}

fn to_json(analysis: &FrameAnalysis) -> serde_json::Value {
    let faces: Vec<_> = analysis
        .faces
        .iter()
        .map(|face| {
            let r = &face.detection.region;
            let c = &face.classification;
            json!({
                "box": { "x1": r.x, "y1": r.y, "x2": r.x2(), "y2": r.y2() },
                "confidence": face.detection.confidence,
                "gender": c.gender.label(),
                "gender_probability": c.gender_probability,
                "age": c.age.label(),
                "age_probability": c.age_probability,
            })
        })
        .collect();

    let counts = counts(analysis);
    let ages: serde_json::Map<String, serde_json::Value> = counts
        .ages()
        .filter(|&(_, n)| n > 0)
        .map(|(a, n)| (a.label().to_string(), json!(n)))
        .collect();
    let genders: serde_json::Map<String, serde_json::Value> = counts
        .genders()
        .filter(|&(_, n)| n > 0)
        .map(|(g, n)| (g.label().to_string(), json!(n)))
        .collect();

    json!({
        "width": analysis.annotated.width(),
        "height": analysis.annotated.height(),
        "faces": faces,
        "counts": { "ages": ages, "genders": genders },
    })
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if !is_image(&cli.input) {
        return Err(format!(
            "Unsupported input {}, expected one of: {}",
            cli.input.display(),
            IMAGE_EXTENSIONS.join(", ")
        )
        .into());
    }
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    if let Some(output) = &cli.output {
        if !is_image(output) {
            return Err(format!(
                "Output must be an image file ({}), got {}",
                IMAGE_EXTENSIONS.join(", "),
                output.display()
            )
            .into());
        }
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
