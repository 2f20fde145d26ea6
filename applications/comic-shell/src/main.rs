/// Comic Shell - terminal front end for the comic viewer
mod commands;
mod config;
mod player;

use crate::commands::{render, Command, HELP};
use crate::config::ShellConfig;
use crate::player::LoggingPlayer;
use comic_catalog::{load, source_for, try_load, Catalog, ManifestSource};
use comic_viewer::{ViewerEvent, ViewerSession};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (stderr, stdout is for rendering)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "comic_shell=info,comic_viewer=info,comic_catalog=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ShellConfig::load()?;
    config.validate()?;

    tracing::info!("Starting Comic Shell");
    tracing::info!("Manifest: {}", config.manifest.location);

    let source = source_for(&config.manifest.location)?;
    let player = Arc::new(LoggingPlayer::new(config.music.start_latency()));

    // Start in the loading state until the manifest arrives
    let (mut session, mut signals) = ViewerSession::new(
        Arc::new(Catalog::new(config.assets.clone())),
        config.viewer.clone(),
        player,
    )?;
    tracing::info!(
        navigation = ?session.get_config().navigation,
        interval_ms = session.get_config().autoplay_interval_ms,
        "Viewer session ready"
    );
    print_events(&mut session);

    let catalog = load(source.as_ref(), config.assets.clone()).await;
    session.replace_catalog(Arc::new(catalog));
    print_events(&mut session);
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                match Command::parse(&line) {
                    Some(Command::Quit) => break,
                    Some(command) => {
                        apply(command, &mut session, source.as_ref()).await;
                    }
                    None => println!("{}", HELP),
                }
            }
            Some(signal) = signals.recv() => {
                session.handle_signal(signal);
            }
        }

        print_events(&mut session);
    }

    session.shutdown();
    tracing::info!("Comic Shell stopped");
    Ok(())
}

async fn apply(
    command: Command,
    session: &mut ViewerSession,
    source: &dyn ManifestSource,
) {
    match command {
        Command::List => {
            for (id, name) in session.collections() {
                let marker = if session.get_selected_collection() == Some(id.as_str()) {
                    "*"
                } else {
                    " "
                };
                println!("{} {:<24} {}", marker, id, name);
            }
        }
        Command::Select(id) => {
            if !session.select_collection(&id) {
                println!("unknown collection: {}", id);
            }
        }
        Command::Next => {
            session.next_page();
        }
        Command::Previous => {
            session.previous_page();
        }
        Command::Autoplay => {
            session.toggle_autoplay();
        }
        Command::Music => {
            session.toggle_music();
        }
        // Reload with the asset paths the current catalog was built with
        Command::Reload => match try_load(source, session.get_catalog().paths().clone()).await {
            Ok(catalog) => session.replace_catalog(Arc::new(catalog)),
            Err(e) => {
                // Keep showing the catalog we already have
                tracing::warn!(error = %e, "Reload failed");
                println!("reload failed: {}", e);
            }
        },
        Command::View => println!("{}", render(session.current_view().as_ref())),
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
}

fn print_events(session: &mut ViewerSession) {
    for event in session.drain_events() {
        match event {
            ViewerEvent::ViewChanged { view } => println!("{}\n", render(view.as_ref())),
            ViewerEvent::MusicFailed { message } => println!("music unavailable: {}", message),
            other => tracing::debug!(event = ?other, "Viewer event"),
        }
    }
}
