use anyhow::Context;
use clap::Parser;
use generator::build_source;
use generator::locator::{resolve_observer, GeolocationFile, ObserverLocator};
use panel::ScreenshotTrigger;
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use tokio::time::{interval, sleep, MissedTickBehavior};
use workflow::clock::Clock;
use workflow::config::TrackerConfig;
use workflow::link::build_link;
use workflow::runner::HostLoop;

mod generator;
mod panel;
mod workflow;

const PULSE_STEP_MS: u64 = 5;

#[derive(Parser)]
#[command(author, version, about = "Radar-style tracker for an orbiting target")]
struct Args {
    /// Load a tracker config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Observer latitude when no config is given
    #[arg(long, default_value_t = 40.7128, allow_negative_numbers = true)]
    lat: f64,
    /// Observer longitude when no config is given
    #[arg(long, default_value_t = -74.0060, allow_negative_numbers = true)]
    lon: f64,
    #[arg(long, default_value_t = 25)]
    frame_delay_ms: u64,
    /// Render this many frames on a simulated clock and save the last one
    #[arg(long)]
    offline: Option<u32>,
    /// Stop the live loop after this many frames
    #[arg(long)]
    frames: Option<u64>,
    #[arg(long)]
    screenshot_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = if let Some(path) = args.config.as_ref() {
        TrackerConfig::load(path)?
    } else {
        TrackerConfig::from_args(args.lat, args.lon, args.frame_delay_ms)
    };
    if let Some(dir) = args.screenshot_dir {
        config.screenshot_dir = dir;
    }

    let mut locator = config.observer_file.clone().map(GeolocationFile::new);
    let observer = resolve_observer(
        locator.as_mut().map(|l| l as &mut dyn ObserverLocator),
        config.observer,
    );
    let source = build_source(&config.feed).context("building position feed")?;
    let link = build_link(config.link_down_flag.clone());
    let mut host = HostLoop::new(&config, observer, source, link)?;

    if let Some(frames) = args.offline {
        return run_offline(&mut host, frames, config.frame_delay_ms);
    }

    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating runtime for the render loop")?;
    runtime.block_on(run_live(host, config.frame_delay_ms, args.frames))
}

fn run_offline(host: &mut HostLoop, frames: u32, frame_delay_ms: u64) -> anyhow::Result<()> {
    let step = frame_delay_ms.max(1) as u32;
    host.start(0);
    let mut last = None;
    for i in 1..=frames {
        last = Some(host.tick(i.wrapping_mul(step)));
    }

    let metrics = host.metrics();
    let target = host.target();
    println!(
        "Offline run -> frames {}, fetches {}/{}, trail {}, target {:.2}, {:.2}",
        metrics.frames,
        metrics.fetch_ok,
        metrics.fetch_ok + metrics.fetch_failures,
        host.renderer().trail().len(),
        target.latitude,
        target.longitude,
    );
    if let Some(report) = last {
        let fix = report.fix.map(|f| (f.distance_km, f.bearing_deg));
        println!(
            "Last frame -> sweep {:.0}, in range {}, fix {:?}, commits {}",
            report.sweep_deg,
            report.in_range(),
            fix,
            host.panel().commits(),
        );
    }
    if let Some(path) = host.save_screenshot() {
        println!("Final frame saved to {}", path.display());
    }
    Ok(())
}

async fn run_live(mut host: HostLoop, frame_delay_ms: u64, limit: Option<u64>) -> anyhow::Result<()> {
    let clock = Clock::new();
    listen_for_screenshots(host.trigger())?;

    let shutdown = signal::ctrl_c();
    tokio::pin!(shutdown);

    tokio::select! {
        _ = wait_for_link(&mut host) => {}
        result = &mut shutdown => {
            result.context("awaiting Ctrl+C")?;
            log::info!("interrupted while waiting for the link");
            return Ok(());
        }
    }

    host.start(clock.now_ms());
    let observer = host.observer();
    log::info!(
        "tracking from {:.4}, {:.4}; send SIGUSR1 for a screenshot",
        observer.latitude,
        observer.longitude
    );

    let mut ticker = interval(Duration::from_millis(frame_delay_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut frames = 0u64;
    loop {
        tokio::select! {
            result = &mut shutdown => {
                result.context("awaiting Ctrl+C")?;
                log::info!("exiting gracefully");
                break;
            }
            _ = ticker.tick() => {
                host.tick(clock.now_ms());
                frames += 1;
                if limit.is_some_and(|n| frames >= n) {
                    break;
                }
            }
        }
    }

    let metrics = host.metrics();
    log::info!(
        "rendered {} frames, {} fetch failures, {} screenshots",
        metrics.frames,
        metrics.fetch_failures,
        metrics.screenshots
    );
    Ok(())
}

async fn wait_for_link(host: &mut HostLoop) {
    if host.link_connected() {
        return;
    }
    log::info!("waiting for the link...");
    while !host.link_connected() {
        host.pulse_panel();
        sleep(Duration::from_millis(PULSE_STEP_MS)).await;
    }
}

#[cfg(unix)]
fn listen_for_screenshots(trigger: ScreenshotTrigger) -> anyhow::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut requests =
        signal(SignalKind::user_defined1()).context("installing SIGUSR1 handler")?;
    tokio::spawn(async move {
        while requests.recv().await.is_some() {
            trigger.request();
        }
    });
    Ok(())
}

#[cfg(not(unix))]
fn listen_for_screenshots(_trigger: ScreenshotTrigger) -> anyhow::Result<()> {
    log::info!("screenshot signal not available on this platform");
    Ok(())
}
