#[macro_use]
extern crate tracing;

use std::env;

use anyhow::Context;
use calloop::{EventLoop, LoopSignal};
use circular_progress::cli::Cli;
use circular_progress::frame::{CalloopFrameScheduler, FrameSink, IndicatorId};
use circular_progress::frame_clock::FrameClock;
use circular_progress::{
    strategy, Clock, ProgressConfig, ProgressIndicator, State, TransitionConfig,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "circular_progress=debug,circular_progress_sampler=debug";

/// 事件循环数据：唯一的指示器，以及采样结束后停止循环的信号
struct Sampler {
    indicator: ProgressIndicator,
    frames: u64,
    stop: LoopSignal,
}

impl FrameSink for Sampler {
    fn on_display_frame(&mut self, target: IndicatorId) {
        if target != self.indicator.id() {
            warn!(indicator = target.get(), "frame for an unknown indicator");
            return;
        }

        self.indicator.on_display_frame();
        self.frames += 1;

        let angle = self.indicator.presented_angle();
        info!(
            frame = self.frames,
            angle,
            fraction = angle / std::f64::consts::TAU,
            "sampled"
        );

        if !self.indicator.is_animating() {
            self.stop.stop();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let directives = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_owned());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .init();

    let cli = Cli::parse();

    let strategy = strategy::by_name(&cli.strategy, cli.content.as_deref())
        .context("error building the visual strategy")?;
    let frame_clock = FrameClock::from_refresh_rate(cli.refresh_rate, false)
        .context("error creating the frame clock")?;

    let mut event_loop: EventLoop<'static, Sampler> =
        EventLoop::try_new().context("error creating the event loop")?;
    let scheduler = CalloopFrameScheduler::new(event_loop.handle(), frame_clock);
    debug!(interval = ?scheduler.refresh_interval(), "frame pacing");

    let mut clock = Clock::default();
    clock.set_rate(cli.rate);

    let config = ProgressConfig {
        transition: TransitionConfig {
            duration_ms: cli.duration_ms,
            ..TransitionConfig::default()
        },
        ..ProgressConfig::default()
    };

    let mut indicator =
        ProgressIndicator::with_config(strategy, Box::new(scheduler), clock, &config);
    indicator.layout(cli.size);
    let geometry = indicator.geometry();
    info!(
        center = ?geometry.center,
        radius = geometry.radius,
        strategy = %cli.strategy,
        "laid out"
    );

    let target = State::progress(cli.to);
    indicator.set_state(target, !cli.no_animate);

    if !indicator.is_animating() {
        info!(angle = indicator.presented_angle(), "committed without animation");
        return Ok(());
    }

    let mut sampler = Sampler {
        indicator,
        frames: 0,
        stop: event_loop.get_signal(),
    };
    event_loop
        .run(None, &mut sampler, |_| ())
        .context("error running the event loop")?;

    info!(
        frames = sampler.frames,
        angle = sampler.indicator.presented_angle(),
        "transition finished"
    );

    Ok(())
}
