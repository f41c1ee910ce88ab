//! Offline driver for the room photo pipeline.
//!
//! Works on packet payloads saved to disk, so photos can be inspected and
//! rewritten without a live connection.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use room_photo::application::composition::{compose, Overlay};
use room_photo::application::pipeline::{
    CaptureSnapshot, EditorCommand, EditorHandle, InterceptedPacket, Interceptor, MessageName,
    Mode, PipelineEvent, Verdict,
};
use room_photo::application::planner::{percent_from_slider, prepare_raster, CapacityPlanner};
use room_photo::application::ports::NamePool;
use room_photo::application::quantize::{estimate_usage, Budget, PixelQuantizer, QuantizeRequest};
use room_photo::entities::{Document, NonEditorCounts};
use room_photo::infrastructure::{load_raster, ChecksumPhotoEncoder, StaticNamePool, SystemClock};
use room_photo::Config;

#[derive(Parser)]
#[command(name = "room-photo")]
#[command(about = "Inspect and rewrite captured room photo packets", long_about = None)]
struct Cli {
    /// TOML configuration file (defaults to ROOM_PHOTO_* environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a captured render packet and summarise its photo
    Inspect {
        /// Raw packet bytes
        packet: PathBuf,
    },
    /// Find the largest scale at which an image fits the primitive budget
    Estimate {
        /// Source image
        image: PathBuf,
        /// Planes already used by the photo
        #[arg(long, default_value_t = 0)]
        planes_used: usize,
        /// Sprites already used by the photo
        #[arg(long, default_value_t = 0)]
        sprites_used: usize,
    },
    /// Replace a captured photo's content with an image
    Inject {
        /// Raw packet bytes
        packet: PathBuf,
        /// Source image
        image: PathBuf,
        /// Where to write the rewritten packet
        #[arg(short, long)]
        output: PathBuf,
        /// Slider position (1-100) instead of the planned scale
        #[arg(long)]
        slider: Option<f64>,
        /// Room position of the image's top-left pixel
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        x: i64,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        y: i64,
        /// Badge overlay as `x,y,url`
        #[arg(long = "badge")]
        badges: Vec<String>,
        /// Treat the packet as a thumbnail render
        #[arg(long)]
        thumbnail: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => {
            let config = Config::from_env();
            config.validate().map_err(anyhow::Error::msg)?;
            config
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Inspect { packet } => inspect(&config, &packet),
        Commands::Estimate {
            image,
            planes_used,
            sprites_used,
        } => estimate(
            &config,
            &image,
            NonEditorCounts {
                planes: planes_used,
                sprites: sprites_used,
            },
        ),
        Commands::Inject {
            packet,
            image,
            output,
            slider,
            x,
            y,
            badges,
            thumbnail,
        } => {
            let overlays = badges
                .iter()
                .map(String::as_str)
                .map(parse_overlay)
                .collect::<Result<Vec<_>>>()?;
            let request = InjectRequest {
                packet: &packet,
                image: &image,
                output: &output,
                slider,
                offset: (x, y),
                overlays,
                thumbnail,
            };
            inject(&config, request)
        }
    }
}

fn inspect(config: &Config, packet: &Path) -> Result<()> {
    let bytes = std::fs::read(packet).with_context(|| format!("Failed to read {:?}", packet))?;
    let envelope = photo_wire::Envelope::parse(&bytes, config.payload_offset)
        .context("Packet framing is invalid")?;
    let (raw, strategy) = photo_wire::decompress_with_strategy(envelope.payload())
        .context("Payload does not decompress")?;
    let text = String::from_utf8_lossy(&raw);
    let document = Document::parse(&text).context("Payload is not a photo")?;

    let counts = document.snapshot().non_editor_counts();
    println!("encoding:   {}", strategy);
    println!("room id:    {}", document.room_id());
    println!("zoom:       {:?}", document.zoom());
    println!(
        "planes:     {} ({} pass-through)",
        document.planes().len(),
        counts.planes
    );
    println!(
        "sprites:    {} ({} pass-through)",
        document.sprites().len(),
        counts.sprites
    );
    println!("filters:    {}", document.filters().len());
    println!("modifiers:  {}", document.modifiers().len());
    Ok(())
}

fn estimate(config: &Config, image: &Path, used: NonEditorCounts) -> Result<()> {
    let source = load_raster(image)?;
    let budget = Budget::for_editor(used, 0, config.limits());
    let plan = CapacityPlanner::new(budget, config.alpha_cutoff).plan(&source);

    let raster = prepare_raster(&source, plan.percent, config.alpha_cutoff);
    let usage = estimate_usage(&raster, config.alpha_cutoff, budget);
    println!("scale:      {:.2}% (slider {:.1})", plan.percent, plan.slider);
    println!("size:       {}x{}", raster.width(), raster.height());
    println!("planes:     {} of {}", usage.planes, budget.plane_limit());
    println!("sprites:    {} of {}", usage.sprites, budget.sprite_limit());
    println!("overflow:   {}", usage.overflow);
    Ok(())
}

struct InjectRequest<'a> {
    packet: &'a Path,
    image: &'a Path,
    output: &'a Path,
    slider: Option<f64>,
    offset: (i64, i64),
    overlays: Vec<Overlay>,
    thumbnail: bool,
}

fn inject(config: &Config, request: InjectRequest<'_>) -> Result<()> {
    let bytes = std::fs::read(request.packet)
        .with_context(|| format!("Failed to read {:?}", request.packet))?;
    let source = load_raster(request.image)?;
    let name_pool: Arc<dyn NamePool> = match &config.sprite_pool_path {
        Some(path) => Arc::new(StaticNamePool::from_file(path)?),
        None => Arc::new(StaticNamePool::default()),
    };

    let encoder = Arc::new(ChecksumPhotoEncoder::new(Arc::new(SystemClock)));
    let (mut interceptor, mut editor) = Interceptor::new(config.interceptor_settings(), encoder);
    let name = if request.thumbnail {
        MessageName::RenderRoomThumbnail
    } else {
        MessageName::RenderRoom
    };
    let packet = InterceptedPacket::outgoing(name, bytes);

    // First pass captures the photo so the budget reflects its content
    interceptor.intercept(&packet);
    let capture = match next_capture(&mut editor)? {
        Some(capture) => capture,
        None => bail!("Packet did not contain a readable photo"),
    };

    let budget = Budget::for_editor(
        capture.non_editor_counts(),
        request.overlays.len(),
        config.limits(),
    );
    let percent = match request.slider {
        Some(slider) => percent_from_slider(slider),
        None => CapacityPlanner::new(budget, config.alpha_cutoff).best_percent(&source),
    };
    let raster = prepare_raster(&source, percent, config.alpha_cutoff);
    let report = PixelQuantizer::new(name_pool).quantize(
        QuantizeRequest::new(&raster, config.alpha_cutoff, budget)
            .with_offset(request.offset.0, request.offset.1),
    );
    info!(
        percent,
        planes = report.usage.planes,
        sprites = report.usage.sprites,
        overflow = report.usage.overflow,
        "Quantized source image"
    );

    let applied = compose(&capture.primitives, report.primitives, &request.overlays);
    editor.send(EditorCommand::Apply(applied));
    editor.send(EditorCommand::SetMode(Mode {
        capture: false,
        inject: true,
        edit: true,
        suppress: false,
    }));

    match interceptor.intercept(&packet) {
        Verdict::Replace(rewritten) => {
            std::fs::write(request.output, &rewritten)
                .with_context(|| format!("Failed to write {:?}", request.output))?;
            println!(
                "wrote {} bytes to {:?} ({} overflow)",
                rewritten.len(),
                request.output,
                report.usage.overflow
            );
            Ok(())
        }
        verdict => bail!("Packet was not rewritten: {:?}", verdict),
    }
}

fn next_capture(editor: &mut EditorHandle) -> Result<Option<CaptureSnapshot>> {
    for event in editor.drain() {
        match event {
            PipelineEvent::Captured(capture) => return Ok(Some(capture)),
            PipelineEvent::Blocked { reason, .. } => bail!("Packet rejected: {}", reason),
            _ => {}
        }
    }
    Ok(None)
}

fn parse_overlay(arg: &str) -> Result<Overlay> {
    let mut parts = arg.splitn(3, ',');
    let (Some(x), Some(y), Some(url)) = (parts.next(), parts.next(), parts.next()) else {
        bail!("Badge overlay must be `x,y,url`, got {:?}", arg);
    };
    let x = x.trim().parse().context("Badge x is not an integer")?;
    let y = y.trim().parse().context("Badge y is not an integer")?;
    Ok(Overlay::new(x, y, url.trim()))
}
