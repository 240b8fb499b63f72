use anyhow::Context;
use log::info;
use tessel::{GalleryApp, GalleryConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GalleryConfig::from_env();
    info!(
        "starting {} on '{}'",
        config.title,
        config.start_demo.as_deref().unwrap_or(tessel::demos::DEFAULT_DEMO_ID)
    );

    let app = GalleryApp::new(config).context("failed to set up the gallery")?;
    app.run().context("gallery stopped with an error")
}
