use anyhow::{Context, Result};
use clap::Parser;
use prompt_render_lib::{Cli, RunConfig, list_prompts, run};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = RunConfig::from(&cli);

    if cli.list {
        list_prompts(&config).await.with_context(|| {
            format!(
                "failed to list prompts from {}",
                config.prompts_path.display()
            )
        })?;
        return Ok(());
    }

    // Per-record failures are reported inside the run; only fatal errors reach here.
    run(&config).await.context("render run aborted")?;
    Ok(())
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
