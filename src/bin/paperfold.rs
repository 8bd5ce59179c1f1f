use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "paperfold", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a fold sequence on the virtual clock and print every event as JSON lines.
    Timeline(TimelineArgs),
    /// Synthesize one paper cue as raw f32le mono samples.
    Cue(CueArgs),
    /// Print the stage scale for a viewport.
    Fit(FitArgs),
    /// Resolve a `?scene=ID` query and print its gallery entry.
    Scene(SceneArgs),
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    #[arg(long, value_enum, default_value_t = PipelineChoice::Airplane)]
    pipeline: PipelineChoice,

    /// Scene config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Spread to open before folding (0 = cover).
    #[arg(long, default_value_t = 0)]
    spread: usize,

    /// Also reset once the sequence has finished.
    #[arg(long)]
    reset: bool,
}

#[derive(Parser, Debug)]
struct CueArgs {
    #[arg(long, value_enum)]
    name: CueChoice,

    /// Output path for raw little-endian f32 samples.
    #[arg(long)]
    out: PathBuf,

    /// Scene config JSON (volume, turn duration).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Noise seed.
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

#[derive(Parser, Debug)]
struct FitArgs {
    #[arg(long)]
    width: f64,

    #[arg(long)]
    height: f64,
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Query string such as `?scene=NEWSPAPER`.
    #[arg(long, default_value = "")]
    query: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PipelineChoice {
    Airplane,
    Ball,
    Dinosaur,
    Table,
}

impl From<PipelineChoice> for paperfold::Pipeline {
    fn from(c: PipelineChoice) -> Self {
        match c {
            PipelineChoice::Airplane => Self::Airplane,
            PipelineChoice::Ball => Self::Ball,
            PipelineChoice::Dinosaur => Self::Dinosaur,
            PipelineChoice::Table => Self::Table,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CueChoice {
    Turn,
    Rustle,
    Fold,
    Thud,
    Crunch,
}

impl From<CueChoice> for paperfold::Cue {
    fn from(c: CueChoice) -> Self {
        match c {
            CueChoice::Turn => Self::Turn,
            CueChoice::Rustle => Self::Rustle,
            CueChoice::Fold => Self::Fold,
            CueChoice::Thud => Self::Thud,
            CueChoice::Crunch => Self::Crunch,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Timeline(args) => cmd_timeline(args),
        Command::Cue(args) => cmd_cue(args),
        Command::Fit(args) => cmd_fit(args),
        Command::Scene(args) => cmd_scene(args),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<paperfold::SceneConfig> {
    match path {
        Some(p) => paperfold::SceneConfig::from_path(p).with_context(|| format!("load config '{}'", p.display())),
        None => Ok(paperfold::SceneConfig::default()),
    }
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let sink = paperfold::MemorySink::new();
    let mut scene = paperfold::Scene::new(args.pipeline.into(), paperfold::Document::daily_fold(), config)?
        .with_audio(paperfold::AudioEngine::with_memory_sink(sink.clone()));

    for _ in 0..args.spread {
        if !scene.next_page() {
            break;
        }
    }
    scene.drain_events();

    scene.start_sequence()?;
    scene.run_until_idle();
    if args.reset && scene.reset() {
        scene.run_until_idle();
    }

    for event in scene.drain_events() {
        let line = match event.kind {
            paperfold::SceneEventKind::Phase(phase) => {
                serde_json::json!({ "at_ms": event.at.0, "phase": phase.name() })
            }
            paperfold::SceneEventKind::Cue(cue) => serde_json::json!({ "at_ms": event.at.0, "cue": cue.name() }),
            paperfold::SceneEventKind::PageTurn { position } => {
                serde_json::json!({ "at_ms": event.at.0, "spread": position })
            }
        };
        println!("{line}");
    }
    let stats = scene.audio_stats();
    eprintln!(
        "phase={} cues_synthesized={} bursts={}",
        scene.phase(),
        stats.synthesized,
        sink.len()
    );
    Ok(())
}

fn cmd_cue(args: CueArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let mut rng = paperfold::Rng64::new(args.seed);
    let burst = paperfold::synthesize(args.name.into(), &config, &mut rng, paperfold::SYNTH_SAMPLE_RATE);
    paperfold::write_burst_to_f32le_file(&burst, &args.out)?;
    eprintln!(
        "wrote {} ({} samples, {:.2}s, peak {:.4})",
        args.out.display(),
        burst.samples.len(),
        burst.duration_secs(),
        burst.peak()
    );
    Ok(())
}

fn cmd_fit(args: FitArgs) -> anyhow::Result<()> {
    let scale = paperfold::StageFit::default().scale_for(args.width, args.height);
    println!("{scale}");
    Ok(())
}

fn cmd_scene(args: SceneArgs) -> anyhow::Result<()> {
    let id = paperfold::SceneId::from_query(&args.query);
    println!("{}", serde_json::to_string_pretty(id.entry())?);
    Ok(())
}
