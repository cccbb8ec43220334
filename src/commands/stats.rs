use colored::Colorize;
use newscluster::config::Config;
use newscluster::embeddings::store::{load_records, EmbedStats};
use newscluster::error::Result;

pub fn cmd_stats(config: &Config) -> Result<()> {
    let records = load_records(&config.data_dir)?;
    let dimension = records.first().map(|r| r.vector.len()).unwrap_or(0);
    let mismatched = records
        .iter()
        .filter(|r| r.vector.len() != dimension)
        .count();

    println!("{} {}", "Data directory:".green().bold(), config.data_dir.display());
    println!("  Stories:             {}", records.len());
    println!("  Embedding dimension: {}", dimension);
    if mismatched > 0 {
        println!(
            "  {} {} stories have a different dimension",
            "Warning:".yellow(),
            mismatched
        );
    }

    match EmbedStats::load(&config.data_dir) {
        Ok(stats) => {
            println!("  Last embedded:       {}", stats.timestamp);
            println!("  Avg title length:    {:.1}", stats.average_title_length);
            println!("  Avg description len: {:.1}", stats.average_description_length);
        }
        Err(_) => println!("  {}", "No stats.json found".dimmed()),
    }

    Ok(())
}
