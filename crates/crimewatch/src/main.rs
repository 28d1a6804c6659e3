use anyhow::Context;
use clap::Parser;
use crimewatch::{Cli, FeedApp, Flags};
use crimewatch_feed::{HttpSource, StaticSource};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.validate()?;
    crimewatch::logging::init(&cli.log_file)?;

    let flags = match &cli.fixture {
        Some(path) => Flags::new(
            StaticSource::from_file(path)
                .with_context(|| format!("failed to read fixture {}", path.display()))?,
        ),
        None => Flags::new(
            HttpSource::new(&cli.base_url, cli.request_timeout())
                .context("failed to build HTTP client")?,
        ),
    };

    info!(fps = cli.fps, inline = cli.inline, "starting crimewatch");
    let app = crimewatch_core::run_with::<FeedApp>(flags, cli.program_options()).await?;
    info!(
        records = app.state().records().len(),
        settled = !app.state().is_loading(),
        "crimewatch exited"
    );
    Ok(())
}
