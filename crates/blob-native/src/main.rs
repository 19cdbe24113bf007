use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::Context;
use blob_core::{CharacterConfig, DetailLevel, FrameInput, Role, Stage, StagedFrame};
use clap::Parser;
use glam::{Mat4, Vec2};

/// Scripted host events, applied when the fixed clock passes `at`.
#[derive(Clone, Copy, Debug)]
enum Event {
    Click,
    CompetingUi(bool),
    Detail(DetailLevel),
}

const SCRIPT: &[(f32, Event)] = &[
    (5.0, Event::Click),
    (5.2, Event::Click),
    (12.0, Event::CompetingUi(true)),
    (13.0, Event::Click),
    (16.0, Event::CompetingUi(false)),
    (20.0, Event::Detail(DetailLevel::Smooth)),
    (24.0, Event::Click),
];

/// Headless fixed-clock run of the blob stage.
#[derive(Parser, Debug)]
#[command(name = "blob-native")]
#[command(about = "Drive the blob mascot stage on a fixed clock and report timing")]
#[command(version)]
struct Options {
    /// Simulated seconds to run
    #[arg(long, default_value_t = 30.0, value_parser = positive_seconds)]
    seconds: f32,

    /// Fixed frame rate of the simulated clock
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=1000))]
    fps: u32,

    /// Seed for the primary mascot; companions derive theirs from it
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Body detail: rough or smooth
    #[arg(long, default_value = "rough", value_parser = DetailLevel::from_str)]
    detail: DetailLevel,
}

fn positive_seconds(s: &str) -> Result<f32, String> {
    let v: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(format!("{v} is not a positive number of seconds"))
    }
}

#[derive(Default)]
struct Stats {
    frames: u64,
    vertex_bytes: usize,
    looking_frames: u64,
    overlay_lines: usize,
    mini_frames: u64,
    worst_tick: Duration,
    total_tick: Duration,
}

impl Stats {
    fn record(&mut self, stage: &Stage, frames: &[StagedFrame], took: Duration) {
        self.frames += 1;
        self.total_tick += took;
        self.worst_tick = self.worst_tick.max(took);
        self.vertex_bytes = stage
            .visible()
            .iter()
            .map(|c| bytemuck::cast_slice::<_, u8>(c.vertices()).len())
            .sum();
        for f in frames {
            if f.frame.looking {
                self.looking_frames += 1;
            }
            if f.role == Role::Mini {
                self.mini_frames += 1;
            }
            self.overlay_lines = self.overlay_lines.max(f.frame.notifications.len());
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = Options::parse();
    let config = CharacterConfig {
        detail: opts.detail,
        ..CharacterConfig::primary().with_seed(opts.seed)
    };
    let mut stage = Stage::new(config).context("building stage")?;

    let fps = opts.fps as f32;
    let dt = 1.0 / fps;
    let total = (opts.seconds * fps).round() as u64;
    let mut script = SCRIPT.iter().peekable();
    let mut stats = Stats::default();
    let started = Instant::now();

    for i in 0..total {
        let t = i as f32 * dt;
        while let Some((at, event)) = script.next_if(|(at, _)| *at <= t) {
            log::info!("[script] t={:.2} (due {:.2}) {:?}", t, at, event);
            match *event {
                Event::Click => stage.click(),
                Event::CompetingUi(open) => stage.set_competing_ui_open(open),
                Event::Detail(detail) => stage.set_detail(detail),
            }
        }

        let pointer = Vec2::new((t * 0.3).sin(), (t * 0.17).cos() * 0.5);
        let tick_start = Instant::now();
        let frames = stage.tick(FrameInput::new(t, dt, pointer));
        stats.record(&stage, &frames, tick_start.elapsed());

        if i % u64::from(opts.fps) == 0 {
            if let Some(first) = frames.first() {
                let m = Mat4::from_cols_array(&first.frame.body_transform);
                let (scale, _, translation) = m.to_scale_rotation_translation();
                log::debug!(
                    "[frame] t={:.1} {:?} y={:.3} squash={:.3} impact={:.3} looking={} lines={}",
                    t,
                    first.role,
                    translation.y,
                    scale.y / scale.x,
                    first.frame.impact,
                    first.frame.looking,
                    first.frame.notifications.len()
                );
            }
        }
    }

    let wall = started.elapsed();
    let mean = stats.total_tick / stats.frames.max(1) as u32;
    log::info!(
        "ran {} frames ({:.1}s simulated) in {:.2?}: mean tick {:.2?}, worst {:.2?}",
        stats.frames,
        opts.seconds,
        wall,
        mean,
        stats.worst_tick
    );
    log::info!(
        "looking frames={} mini frames={} max overlay lines={} vertex bytes/frame={}",
        stats.looking_frames,
        stats.mini_frames,
        stats.overlay_lines,
        stats.vertex_bytes
    );
    Ok(())
}
