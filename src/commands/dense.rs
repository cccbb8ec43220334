use colored::Colorize;
use newscluster::config::Config;
use newscluster::embeddings::store::load_records;
use newscluster::embeddings::DenseClusterFinder;
use newscluster::error::Result;
use newscluster::renderer::clusters::save_clusters;
use newscluster::renderer::console::{describe_news, format_score, neighbor_line};
use std::time::{Duration, Instant};

/// Neighbors listed per cluster on the console
const SHOWN_NEIGHBORS: usize = 5;

pub fn cmd_dense(
    config: &Config,
    distance: Option<f32>,
    neighbors: Option<usize>,
    out: Option<&str>,
    timeout_secs: Option<u64>,
    verbose: bool,
) -> Result<()> {
    let mut finder = DenseClusterFinder::new(
        distance.unwrap_or(config.max_distance),
        neighbors.unwrap_or(config.min_neighbors),
    )?;
    if let Some(secs) = timeout_secs {
        finder = finder.with_deadline(Instant::now() + Duration::from_secs(secs));
    }
    let output_path = config.resolve_output(out, &config.clusters_file);

    let records = load_records(&config.data_dir)?;
    println!(
        "\n{} stories with at least {} neighbors within distance {} (similarity >= {})",
        "Searching".green().bold(),
        finder.min_neighbors(),
        finder.max_distance(),
        format_score(1.0 - finder.max_distance())
    );

    let started = Instant::now();
    let clusters = finder.find(&records)?;
    if verbose {
        eprintln!(
            "clustered {} records in {:.2?}",
            records.len(),
            started.elapsed()
        );
    }

    if clusters.is_empty() {
        println!(
            "\n{} no story meets the given criteria",
            "Warning:".yellow()
        );
        return Ok(());
    }

    save_clusters(&clusters, &output_path)?;
    println!(
        "\n{} Clusters saved to {}",
        "Done!".green().bold(),
        output_path.display()
    );

    for (index, cluster) in clusters.iter().enumerate() {
        println!(
            "\n{}. {} — neighbors: {}",
            index + 1,
            describe_news(cluster.seed),
            cluster.count.to_string().cyan()
        );
        for (idx, neighbor) in cluster.neighbors.iter().take(SHOWN_NEIGHBORS).enumerate() {
            println!("   {}) {}", idx + 1, neighbor_line(neighbor));
        }
        if cluster.neighbors.len() > SHOWN_NEIGHBORS {
            println!(
                "   … {} more neighbors within threshold",
                cluster.neighbors.len() - SHOWN_NEIGHBORS
            );
        }
    }

    Ok(())
}
