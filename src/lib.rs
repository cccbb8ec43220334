// Library interface for newscluster

pub mod cli;
pub mod config;
pub mod embeddings;
pub mod error;
pub mod ingest;
pub mod llm;
pub mod renderer;

// Re-export commonly used types
pub use config::Config;
pub use embeddings::{
    cosine_distance, cosine_similarity, find_clusters, similar_to, top_k, Cluster,
    DenseClusterFinder, Neighbor, Record, RecordCache,
};
pub use error::{NewsError, Result};
