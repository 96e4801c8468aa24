//! Standalone sphere-stage binary: a window, or a headless fixed-step run.

use std::path::PathBuf;

use clap::Parser;
use sphere_stage::{
    engine::{frame::FixedStepLoop, Stage},
    gpu::render_context::RenderContext,
    options::Options,
    renderer::GpuRenderer,
    viewport::ViewportSize,
    StageError, Viewer,
};
use web_time::Instant;

#[derive(Parser, Debug, Clone)]
#[command(name = "sphere-stage")]
#[command(about = "Orbiting camera around a lit sphere", long_about = None)]
struct Cli {
    /// TOML options preset to load
    #[arg(long)]
    options: Option<PathBuf>,

    /// Override the internal resolution multiplier
    #[arg(long)]
    pixel_ratio: Option<f32>,

    /// Write the effective options to this path and exit
    #[arg(long)]
    save_options: Option<PathBuf>,

    /// Render offscreen with a fixed-step loop instead of opening a window
    #[arg(long, default_value = "false")]
    headless: bool,

    /// Frames to render in headless mode
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Headless tick rate (0 = unthrottled)
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Headless output width
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Headless output height
    #[arg(long, default_value_t = 720)]
    height: u32,
}

fn load_options(cli: &Cli) -> Result<Options, StageError> {
    let mut options = match &cli.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    if let Some(ratio) = cli.pixel_ratio {
        options.display.pixel_ratio = ratio;
    }
    Ok(options)
}

fn run_headless(cli: &Cli, options: Options) -> Result<(), StageError> {
    let context =
        pollster::block_on(RenderContext::headless(cli.width, cli.height))?;
    let renderer = GpuRenderer::new(context, options.display.clear_color)?;
    let mut stage = Stage::new(
        renderer,
        ViewportSize::new(cli.width, cli.height),
        options,
        Instant::now(),
    );
    let frames = FixedStepLoop::from_fps(cli.fps)
        .with_max_frames(cli.frames)
        .run(&mut stage);
    log::info!(
        "rendered {frames} frames at {}x{} (internal {:?})",
        cli.width,
        cli.height,
        stage.renderer().internal_size()
    );
    Ok(())
}

fn run(cli: &Cli) -> Result<(), StageError> {
    let options = load_options(cli)?;

    if let Some(path) = &cli.save_options {
        options.save(path)?;
        log::info!("saved options to {}", path.display());
        return Ok(());
    }

    if cli.headless {
        run_headless(cli, options)
    } else {
        Viewer::builder().with_options(options).build().run()
    }
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
