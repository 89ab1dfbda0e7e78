//! Headless probe and replay tool for frame sequences.
//!
//! `probe` resolves the frame folder against a local directory or an HTTP
//! origin and preloads the initial batch; `replay` runs the controller for
//! a number of ticks while feeding scripted input; `config` writes the
//! default options preset or its JSON schema.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;

use clap::{Args, Parser, Subcommand};
use crossbeam_channel::Receiver;
use futures::executor::LocalPool;
use rustc_hash::FxHashMap;
use scrubview::input::InputEvent;
use scrubview::loader::fs::DirLoader;
use scrubview::loader::http::HttpLoader;
use scrubview::loader::{FrameBytes, FrameLoader, LoadFuture, LoadProgress};
use scrubview::options::Options;
use scrubview::runtime::TaskSpawner;
use scrubview::sequence::FrameId;
use scrubview::sink::{LogSink, NoAnnotation};
use scrubview::util::frame_timing::FrameTiming;
use scrubview::{ScrubController, ScrubError};
use serde::Deserialize;

#[derive(Parser)]
#[command(name = "scrubview", version, about)]
struct Cli {
    /// Options preset (TOML). Defaults apply when omitted.
    #[arg(long, global = true)]
    options: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Source {
    /// Directory frame URLs resolve against, like a static file server root.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// HTTP origin to load frames from instead of a directory.
    #[arg(long)]
    origin: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the frame folder and preload the initial batch.
    Probe {
        #[command(flatten)]
        source: Source,
    },
    /// Run the controller headlessly, feeding input from a script.
    Replay {
        #[command(flatten)]
        source: Source,

        /// JSON array of `{ "tick": n, "event": {...} }` steps.
        #[arg(long)]
        script: Option<PathBuf>,

        /// Ticks to run.
        #[arg(long, default_value_t = 120)]
        ticks: u64,

        /// Tick rate (0 = as fast as possible).
        #[arg(long, default_value_t = 60)]
        fps: u32,
    },
    /// Write the default options preset, or its JSON schema.
    Config {
        /// Write the JSON schema instead of the TOML preset.
        #[arg(long)]
        schema: bool,

        /// Output file.
        output: PathBuf,
    },
}

/// One scripted input event, delivered just before tick `tick`.
#[derive(Debug, Deserialize)]
struct ScriptStep {
    tick: u64,
    event: InputEvent,
}

/// Directory or HTTP loader, picked from the command line.
enum NativeLoader {
    Dir(DirLoader),
    Http(HttpLoader),
}

impl NativeLoader {
    fn from_source(source: Source) -> Self {
        match source.origin {
            Some(origin) => {
                log::info!("loading frames from {origin}");
                Self::Http(HttpLoader::new(origin))
            }
            None => {
                log::info!("loading frames from {}", source.root.display());
                Self::Dir(DirLoader::new(source.root))
            }
        }
    }

    fn subscribe(&mut self) -> Receiver<LoadProgress> {
        match self {
            Self::Dir(loader) => loader.progress_mut().subscribe(),
            Self::Http(loader) => loader.progress_mut().subscribe(),
        }
    }
}

impl FrameLoader for NativeLoader {
    type Handle = FrameBytes;

    fn load(&self, url: &str) -> LoadFuture<FrameBytes> {
        match self {
            Self::Dir(loader) => loader.load(url),
            Self::Http(loader) => loader.load(url),
        }
    }
}

type NativeController = ScrubController<NativeLoader, LogSink, NoAnnotation>;

fn init(
    pool: &mut LocalPool,
    options: Options,
    loader: NativeLoader,
) -> Result<NativeController, ScrubError> {
    let spawner: Rc<dyn TaskSpawner> = Rc::new(pool.spawner());
    pool.run_until(ScrubController::init(
        options,
        loader,
        LogSink::default(),
        NoAnnotation,
        spawner,
    ))
}

/// Total bytes received, counting each URL once.
fn bytes_received(progress: &Receiver<LoadProgress>) -> u64 {
    let mut per_url: FxHashMap<String, u64> = FxHashMap::default();
    for event in progress.try_iter() {
        let entry = per_url.entry(event.url).or_default();
        *entry = (*entry).max(event.loaded);
    }
    per_url.values().sum()
}

fn probe(options: Options, source: Source) -> Result<(), ScrubError> {
    let initial_batch = options.preload.initial_batch;
    let mut loader = NativeLoader::from_source(source);
    let progress = loader.subscribe();
    let mut pool = LocalPool::new();

    let controller = init(&mut pool, options, loader)?;
    let catalog = controller.catalog();
    log::info!("base path: {}", catalog.base_path());
    log::info!(
        "catalog: {} frames ({} .. {})",
        catalog.len(),
        catalog.frames().first().map_or("-", FrameId::as_str),
        catalog.frames().last().map_or("-", FrameId::as_str),
    );
    log::info!(
        "initial batch: {}/{} frames cached, {} bytes",
        controller.preloader().cached_len(),
        initial_batch.min(catalog.len()),
        bytes_received(&progress),
    );
    Ok(())
}

fn load_script(path: &Path) -> Result<Vec<ScriptStep>, ScrubError> {
    let content = std::fs::read_to_string(path).map_err(ScrubError::Io)?;
    let mut steps: Vec<ScriptStep> = serde_json::from_str(&content)
        .map_err(|e| ScrubError::OptionsParse(format!("{}: {e}", path.display())))?;
    steps.sort_by_key(|step| step.tick);
    Ok(steps)
}

/// What a replay run did.
#[derive(Debug, PartialEq, Eq)]
struct ReplayReport {
    /// Ticks run, not counting the render done during initialization.
    ticks: u64,
    /// Frame shown by the final tick.
    last_frame: usize,
}

fn run_script(
    pool: &mut LocalPool,
    controller: &mut NativeController,
    steps: Vec<ScriptStep>,
    ticks: u64,
    timing: &mut FrameTiming,
) -> ReplayReport {
    let mut steps = steps.into_iter().peekable();
    let mut last_frame = controller.playhead().current_frame();

    for tick in 0..ticks {
        while let Some(step) = steps.next_if(|step| step.tick <= tick) {
            let claimed = controller.handle_event(&step.event);
            log::debug!("tick {tick}: {:?} (default suppressed: {claimed})", step.event);
        }

        last_frame = controller.tick();
        pool.run_until_stalled();
        let playhead = controller.playhead();
        log::info!(
            "tick {tick}: frame {last_frame} velocity {:.3}{}",
            playhead.velocity(),
            if playhead.is_playing() { " (playing)" } else { "" },
        );

        timing.end_tick();
        std::thread::sleep(timing.remaining());
    }

    ReplayReport { ticks, last_frame }
}

fn replay(
    options: Options,
    source: Source,
    script: Option<&Path>,
    ticks: u64,
    fps: u32,
) -> Result<(), ScrubError> {
    let steps = script.map(load_script).transpose()?.unwrap_or_default();
    let mut pool = LocalPool::new();
    let mut controller = init(&mut pool, options, NativeLoader::from_source(source))?;
    let mut timing = FrameTiming::new(fps);

    let report = run_script(&mut pool, &mut controller, steps, ticks, &mut timing);
    log::info!(
        "replayed {} ticks at {:.1} fps: ended on frame {}, {} blank, {} frames cached",
        report.ticks,
        timing.fps(),
        report.last_frame,
        controller.sink().blank_frames(),
        controller.preloader().cached_len(),
    );
    Ok(())
}

fn write_config(schema: bool, output: &Path) -> Result<(), ScrubError> {
    if schema {
        let json = serde_json::to_string_pretty(&Options::json_schema())
            .map_err(|e| ScrubError::OptionsParse(e.to_string()))?;
        std::fs::write(output, json).map_err(ScrubError::Io)?;
    } else {
        Options::default().save(output)?;
    }
    log::info!("wrote {}", output.display());
    Ok(())
}

fn run(cli: Cli) -> Result<(), ScrubError> {
    let options = cli
        .options
        .as_deref()
        .map(Options::load)
        .transpose()?
        .unwrap_or_default();

    match cli.command {
        Command::Probe { source } => probe(options, source),
        Command::Replay {
            source,
            script,
            ticks,
            fps,
        } => replay(options, source, script.as_deref(), ticks, fps),
        Command::Config { schema, output } => write_config(schema, &output),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use scrubview::options::FrameTemplate;

    use super::*;

    fn frame_dir(name: &str, last_frame: usize) -> (PathBuf, Options) {
        let dir = std::env::temp_dir()
            .join(format!("scrubview-{name}-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("frames")).unwrap();

        let mut options = Options::default();
        options.catalog.last_frame = last_frame;
        options.catalog.base_paths = vec!["frames/".into()];
        options.catalog.template = FrameTemplate {
            prefix: "f".into(),
            extension: "png".into(),
            pad_width: 4,
        };
        for i in 0..=last_frame {
            let file = options.catalog.template.file_name(i);
            std::fs::write(dir.join("frames").join(file), b"png").unwrap();
        }
        (dir, options)
    }

    #[test]
    fn replay_reports_ticks_run_not_frames_rendered() {
        let (dir, options) = frame_dir("replay", 4);
        let mut pool = LocalPool::new();
        let mut controller =
            init(&mut pool, options, NativeLoader::Dir(DirLoader::new(&dir))).unwrap();
        let steps = vec![ScriptStep {
            tick: 0,
            event: InputEvent::Wheel { delta_y: 20.0 },
        }];

        let report =
            run_script(&mut pool, &mut controller, steps, 3, &mut FrameTiming::new(0));
        assert_eq!(report, ReplayReport { ticks: 3, last_frame: 1 });
        // Initialization renders once before the first tick
        assert_eq!(controller.sink().frames_shown(), 4);
        assert_eq!(controller.sink().blank_frames(), 0);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn script_steps_parse_and_sort_by_tick() {
        let dir = std::env::temp_dir()
            .join(format!("scrubview-script-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("script.json");
        std::fs::write(
            &path,
            r#"[
                { "tick": 5, "event": { "type": "pointer_up" } },
                { "tick": 1, "event": { "type": "key_down", "key": " " } }
            ]"#,
        )
        .unwrap();

        let steps = load_script(&path).unwrap();
        let ticks: Vec<u64> = steps.iter().map(|s| s.tick).collect();
        assert_eq!(ticks, vec![1, 5]);
        assert_eq!(steps[0].event, InputEvent::KeyDown { key: " ".into() });

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
