use std::{sync::Arc, time::Duration};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use shared::{
    contract::GALLERY_ITEMS_KEY,
    domain::{ConsentPatch, GalleryItem},
};
use storage::{prepare_database_url, KeyValueStore, SqliteStore};
use sync_core::{
    reconciler, CameraSurface, CommandBus, ConsentStore, GalleryFeed, MissingCaptureTrigger,
};
use tracing::info;

mod config;

use config::load_settings;

/// Operator CLI for the camlink synchronization core: inspect and mutate
/// the persisted device state, and simulate gesture dispatch.
#[derive(Parser, Debug)]
struct Cli {
    /// Overrides the configured store location.
    #[arg(long)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prints the current privacy consent record.
    ShowConsent,
    /// Grants one capability, leaving the others untouched.
    GrantConsent { capability: Capability },
    /// Revokes one capability, leaving the others untouched.
    RevokeConsent { capability: Capability },
    /// Prints the most recent gallery thumbnail, if any.
    LatestThumbnail,
    /// Prepends a capture record, standing in for the capture pipeline.
    SeedCapture { thumbnail: String },
    /// Polls the gallery key and prints the thumbnail whenever it changes.
    Watch {
        #[arg(long)]
        interval_ms: Option<u64>,
    },
    /// Dispatches a gesture command against a locally mounted camera
    /// surface and prints the resulting control state.
    Dispatch {
        action: String,
        #[arg(long, default_value = "tap")]
        gesture: String,
        #[arg(long, default_value_t = 1.0)]
        confidence: f64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Capability {
    Location,
    Camera,
    Microphone,
    Analytics,
    Storage,
}

impl Capability {
    fn patch(self, granted: bool) -> ConsentPatch {
        let mut patch = ConsentPatch::default();
        match self {
            Capability::Location => patch.location = Some(granted),
            Capability::Camera => patch.camera = Some(granted),
            Capability::Microphone => patch.microphone = Some(granted),
            Capability::Analytics => patch.analytics = Some(granted),
            Capability::Storage => patch.storage = Some(granted),
        }
        patch
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let cli = Cli::parse();

    let raw_url = cli
        .database_url
        .unwrap_or_else(|| settings.database_url.clone());
    let database_url = prepare_database_url(&raw_url, &config::Settings::default().database_url)?;
    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::new(&database_url).await?);

    match cli.command {
        Command::ShowConsent => {
            let consent = ConsentStore::new(store).load().await;
            println!("{}", serde_json::to_string_pretty(&consent)?);
        }
        Command::GrantConsent { capability } => {
            let updated = ConsentStore::new(store).update(capability.patch(true)).await?;
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
        Command::RevokeConsent { capability } => {
            let updated = ConsentStore::new(store)
                .update(capability.patch(false))
                .await?;
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
        Command::LatestThumbnail => {
            match GalleryFeed::new(store).latest_thumbnail().await? {
                Some(thumbnail) => println!("{thumbnail}"),
                None => println!("(no captures)"),
            }
        }
        Command::SeedCapture { thumbnail } => {
            seed_capture(store.as_ref(), thumbnail).await?;
        }
        Command::Watch { interval_ms } => {
            let every =
                Duration::from_millis(interval_ms.unwrap_or(settings.gallery_poll_interval_ms));
            let feed = GalleryFeed::new(store);
            info!(interval_ms = every.as_millis() as u64, "watching gallery key");

            let poll = reconciler::spawn(
                move || {
                    let feed = feed.clone();
                    async move { feed.latest_thumbnail().await }
                },
                |thumbnail: &Option<String>| match thumbnail {
                    Some(thumbnail) => println!("latest: {thumbnail}"),
                    None => println!("latest: (no captures)"),
                },
                every,
            );

            tokio::signal::ctrl_c().await?;
            poll.stop();
        }
        Command::Dispatch {
            action,
            gesture,
            confidence,
        } => {
            let bus = CommandBus::new();
            let surface = CameraSurface::mount(&bus, Arc::new(MissingCaptureTrigger));
            bus.dispatch(&action, &gesture, confidence);

            let controls = surface.controls();
            println!("zoom: {}", controls.zoom());
            println!("mode: {}", controls.mode());
            let toggles: Vec<&str> = controls.active_toggles().collect();
            println!("toggles: {toggles:?}");
            surface.unmount();
        }
    }

    Ok(())
}

/// Dev stand-in for the capture pipeline's append: read, prepend at index
/// zero, write back. Tolerates a corrupt existing list by starting fresh.
async fn seed_capture(store: &dyn KeyValueStore, thumbnail: String) -> Result<()> {
    let mut items: Vec<GalleryItem> = match store.get(GALLERY_ITEMS_KEY).await? {
        Some(raw) => serde_json::from_str(&raw).unwrap_or_default(),
        None => Vec::new(),
    };
    items.insert(0, GalleryItem { thumbnail });
    store
        .set(GALLERY_ITEMS_KEY, &serde_json::to_string(&items)?)
        .await?;
    println!("gallery now holds {} capture(s)", items.len());
    Ok(())
}
