mod commands;

use clap::Parser;
use newscluster::cli::{Cli, Commands};
use newscluster::config::Config;
use newscluster::error::Result;

use commands::dense::cmd_dense;
use commands::embed::cmd_embed;
use commands::similar::cmd_similar;
use commands::stats::cmd_stats;
use commands::summarize::cmd_summarize;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.data_dir.as_deref())?;

    if cli.verbose {
        eprintln!("data dir: {}", config.data_dir.display());
    }

    match cli.command {
        Commands::Embed { url, provider } => {
            cmd_embed(&config, url.as_deref(), provider.as_deref())
        }
        Commands::Similar { id, top } => cmd_similar(&config, id, top),
        Commands::Dense {
            distance,
            neighbors,
            out,
            timeout_secs,
        } => cmd_dense(
            &config,
            distance,
            neighbors,
            out.as_deref(),
            timeout_secs,
            cli.verbose,
        ),
        Commands::Summarize {
            input,
            out,
            model,
            lang,
        } => cmd_summarize(
            &config,
            input.as_deref(),
            out.as_deref(),
            model.as_deref(),
            lang.as_deref(),
        ),
        Commands::Stats => cmd_stats(&config),
    }
}
