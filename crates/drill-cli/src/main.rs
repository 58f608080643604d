//! degree-drill: ear-training drill for scale degrees over rotating roots

mod args;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use drill_core::{Announcer, Drill, DrillConfig, PracticeSession, TonePlayer};
use drill_services::{AudioOutputService, CommandSpeaker, CpalTonePlayer, LogSpeaker, Shutdown, SilentTonePlayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use args::Args;

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for target in ["drill_cli", "drill_core", "drill_services"] {
        filter = filter.add_directive(format!("{target}={level}").parse()?);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
    Ok(())
}

fn log_summary(config: &DrillConfig, session: &PracticeSession) {
    info!("Unique scale degrees to be practiced (as input): {:?}", session.tokens());
    info!(
        "Root note sequence: {:?}",
        session.roots().iter().map(|r| r.name.as_str()).collect::<Vec<_>>()
    );
    info!("Plays per unique element per root note: {}", session.quota());
    info!("Root note octave: {}", config.octave);
    info!(
        "Overall cycle delay: {}s, Tone duration: {}s, Note name speech delay: {}s",
        config.cycle_delay_secs, config.tone_duration_secs, config.tone_name_delay_secs
    );
    if !config.extended_degrees {
        info!("Extended degrees (9, 11, 13) disabled");
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let file = config::load_config(args.config.as_deref())?;
    let mute = args.mute || file.output.mute;
    let no_speech = args.no_speech || file.output.no_speech;

    let drill_config = args.apply(file.drill).clamped();
    drill_config.validate().context("invalid drill configuration")?;
    let session = PracticeSession::new(&drill_config)?;
    log_summary(&drill_config, &session);

    let shutdown = Shutdown::new();
    let handler_shutdown = shutdown.clone();
    ctrlc::set_handler(move || handler_shutdown.trigger())
        .context("failed to install Ctrl+C handler")?;

    let announcer: Box<dyn Announcer> = if no_speech {
        Box::new(LogSpeaker)
    } else {
        Box::new(CommandSpeaker::detect().context("speech unavailable (use --no-speech to log instead)")?)
    };

    let player: Box<dyn TonePlayer> = if mute {
        Box::new(SilentTonePlayer::new(shutdown.clock()))
    } else {
        let device = AudioOutputService::default_device_info()
            .context("audio output unavailable (use --mute to run without it)")?;
        info!(
            device = %device.name,
            sample_rate = device.sample_rate,
            channels = device.channels,
            "Audio output initialized"
        );
        Box::new(CpalTonePlayer::new(drill_config.tone_amplitude))
    };

    let mut drill = Drill::new(&drill_config, announcer, player, shutdown.clock());
    info!("Press Ctrl+C to stop");
    drill.run(session, shutdown.flag());

    if shutdown.is_triggered() {
        info!("Program stopped by user");
    }
    drop(drill);
    info!("Exiting program");
    Ok(())
}
