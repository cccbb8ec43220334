use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use newscluster::config::Config;
use newscluster::embeddings::store::{save_records, EmbedStats};
use newscluster::embeddings::EmbeddingProvider;
use newscluster::error::Result;
use newscluster::ingest;

/// Estimated OpenAI cost per embedded story, in dollars
const COST_PER_ITEM: f64 = 0.00002;

pub fn cmd_embed(config: &Config, url: Option<&str>, provider_override: Option<&str>) -> Result<()> {
    let provider = match provider_override {
        Some(name) => EmbeddingProvider::from_name(name, config)?,
        None => EmbeddingProvider::from_config(config),
    };
    let url = url.unwrap_or(&config.news_url);

    println!("{}", "News embeddings".green().bold());
    println!("  Model:            {}", provider.model());
    println!("  Output directory: {}", config.data_dir.display());
    println!("  News URL:         {}", url);

    super::runtime()?.block_on(async {
        println!("\n{} {}", "Fetching".green().bold(), url);
        let feed = ingest::fetch_feed(url).await?;
        let raw_items = ingest::extract_items(&feed)?;
        println!("Found {} stories to process", raw_items.len());

        let items = ingest::collect_items(raw_items);
        let total = raw_items.len();

        let pb = ProgressBar::new(items.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );
        let records = ingest::embed_items(items, &provider, &pb).await;
        pb.finish_and_clear();

        println!(
            "{} Embedded {}/{} stories",
            "Done!".green().bold(),
            records.len(),
            total
        );

        if records.is_empty() {
            println!("{} no story was embedded", "Warning:".yellow());
            return Ok(());
        }

        let files = save_records(&config.data_dir, &records)?;
        println!("Saved {} files to {}", files.len(), config.data_dir.display());

        let stats = EmbedStats::compute(&records, files);
        let stats_path = stats.save(&config.data_dir)?;
        println!("Statistics saved to {}", stats_path.display());

        println!("\nSummary:");
        println!("  Stories embedded:    {}", stats.total_news);
        println!("  Embedding dimension: {}", stats.embedding_dimension);
        if matches!(provider, EmbeddingProvider::OpenAI { .. }) {
            println!(
                "  Estimated cost:      ~${:.4}",
                records.len() as f64 * COST_PER_ITEM
            );
        }

        Ok(())
    })
}
