use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use spincube_common::CameraState;
use spincube_input::OrbitController;
use spincube_render::{
    Cube, DEFAULT_SPIN_STEP, DebugTextRenderer, FrameState, FrameUniforms, ModelSpin, Renderer,
    ViewConfig, ViewProjection,
};
use spincube_render_wgpu::GpuContext;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spincube-cli", about = "Headless tools for the spincube renderer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, default camera and geometry info
    Info,
    /// Run the frame loop without a GPU and print each frame's MVP
    Frames {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "3")]
        count: u64,
        /// Surface aspect ratio (width / height)
        #[arg(short, long, default_value = "1.0")]
        aspect: f32,
        /// Cube rotation per frame, in radians
        #[arg(long, default_value_t = DEFAULT_SPIN_STEP, allow_hyphen_values = true)]
        spin_step: f32,
        /// Emit JSON lines instead of text
        #[arg(long)]
        json: bool,
    },
    /// Request a headless GPU adapter and device, then report what was found
    Probe,
}

/// One simulated frame, as emitted by `frames --json`.
#[derive(Serialize)]
struct FrameReport {
    frame: u64,
    spin_angle: f32,
    mvp: [f32; 16],
}

impl From<&FrameUniforms> for FrameReport {
    fn from(frame: &FrameUniforms) -> Self {
        Self {
            frame: frame.frame_index,
            spin_angle: frame.spin_angle,
            mvp: frame.mvp_cols(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            let config = ViewConfig::default();
            let orbit = OrbitController::new(&config.orbit)?;
            let camera: CameraState = orbit.state();
            println!("spincube-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", spincube_render::crate_info());
            println!(
                "camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) distance={:.3}",
                camera.eye.x,
                camera.eye.y,
                camera.eye.z,
                camera.target.x,
                camera.target.y,
                camera.target.z,
                camera.distance()
            );
            println!(
                "projection: fov_y={} near={} far={}",
                config.fov_y, config.near, config.far
            );
            println!("cube: {} vertices", Cube::unit().vertex_count());
        }
        Commands::Frames {
            count,
            aspect,
            spin_step,
            json,
        } => {
            anyhow::ensure!(
                aspect.is_finite() && aspect > 0.0,
                "aspect must be a positive number, got {aspect}"
            );
            let config = ViewConfig::default();
            let vp = ViewProjection::new(aspect, &config);
            let mut state = FrameState::new(&vp, config, ModelSpin::new(spin_step));
            let mut text = DebugTextRenderer::new();
            tracing::debug!(count, aspect, spin_step, "simulating frames");

            for _ in 0..count {
                let frame = state.advance();
                if json {
                    println!("{}", serde_json::to_string(&FrameReport::from(&frame))?);
                } else {
                    print!("{}", text.render(&frame));
                }
            }
        }
        Commands::Probe => {
            let ctx = pollster::block_on(GpuContext::headless())
                .context("no usable GPU: rendering cannot start on this machine")?;
            let info = ctx.adapter_info();
            println!("adapter: {}", info.name);
            println!("backend: {}", info.backend.to_str());
            println!("device type: {:?}", info.device_type);
            println!("driver: {} {}", info.driver, info.driver_info);
        }
    }

    Ok(())
}
