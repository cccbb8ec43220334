use colored::Colorize;
use newscluster::config::Config;
use newscluster::embeddings::{similar_to, RecordCache};
use newscluster::error::{NewsError, Result};
use newscluster::ingest::truncate_chars;
use newscluster::renderer::console::{news_label, neighbor_line};

pub fn cmd_similar(config: &Config, id: Option<String>, top: Option<usize>) -> Result<()> {
    let top = top.unwrap_or(config.top_k);
    let mut cache = RecordCache::new();

    if let Some(id) = id {
        return show_similar(&mut cache, config, &id, top);
    }

    // Interactive: keep asking until an empty answer
    loop {
        let answer: String = dialoguer::Input::new()
            .with_prompt("ID of the story to compare (empty to quit)")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| NewsError::Config(format!("Prompt cancelled: {}", e)))?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(());
        }
        match show_similar(&mut cache, config, answer, top) {
            Err(NewsError::UnknownId(id)) => {
                eprintln!("{} ID {} not found, try another one", "Error:".red(), id);
            }
            other => other?,
        }
    }
}

fn show_similar(cache: &mut RecordCache, config: &Config, id: &str, top: usize) -> Result<()> {
    let records = cache.get_or_load(&config.data_dir)?;
    let (reference, ranked) = similar_to(id, records, top)?;

    println!(
        "\n{} {}\n",
        "Selected:".green().bold(),
        news_label(reference)
    );
    println!("Top {} most similar stories (cosine):\n", top);

    for (index, neighbor) in ranked.iter().enumerate() {
        println!("{}. {}", index + 1, neighbor_line(neighbor));
        let description = &neighbor.record.metadata.description;
        if !description.is_empty() {
            println!("   {}", truncate_chars(description, 140).dimmed());
        }
        println!();
    }

    Ok(())
}
