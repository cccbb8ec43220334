use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "newscluster",
    about = "Embed news, find similar stories and dense clusters of related news",
    version
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(global = true, long, short)]
    pub verbose: bool,

    /// Directory with the embedded news files (default: ./data or NEWSCLUSTER_DATA_DIR)
    #[arg(global = true, long)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the news feed and store one embedding file per story
    Embed {
        /// Feed URL (default: NEWS_URL)
        #[arg(long)]
        url: Option<String>,

        /// Embedding provider override (openai, ollama)
        #[arg(long)]
        provider: Option<String>,
    },

    /// Show the stories most similar to a given one
    Similar {
        /// ID of the reference story (prompted for when omitted)
        #[arg(short, long)]
        id: Option<String>,

        /// Number of similar stories to show (default: DEFAULT_TOP_K or 3)
        #[arg(short = 'k', long)]
        top: Option<usize>,
    },

    /// Find stories with many close neighbors and save the clusters
    Dense {
        /// Maximum cosine distance for a neighbor (default: MAX_DISTANCE or 0.4)
        #[arg(short, long)]
        distance: Option<f32>,

        /// Minimum number of neighbors for a cluster (default: MIN_NEIGHBORS or 3)
        #[arg(short, long)]
        neighbors: Option<usize>,

        /// Output JSON file, relative to the data directory unless absolute
        #[arg(short, long)]
        out: Option<String>,

        /// Give up if clustering takes longer than this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },

    /// Summarize a clusters file with a chat model
    Summarize {
        /// Clusters JSON file (default: CLUSTERS_OUTPUT or clusters.json)
        #[arg(short, long)]
        input: Option<String>,

        /// Summary output file (default: CLUSTER_SUMMARY_FILE or cluster-summary.txt)
        #[arg(short, long)]
        out: Option<String>,

        /// Chat model (default: SUMMARY_MODEL or gpt-4o-mini)
        #[arg(short, long)]
        model: Option<String>,

        /// Language of the summary (default: SUMMARY_LANGUAGE)
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Show statistics for the data directory
    Stats,
}
