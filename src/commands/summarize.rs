use colored::Colorize;
use newscluster::config::Config;
use newscluster::error::Result;
use newscluster::llm::client::SUMMARY_TEMPERATURE;
use newscluster::llm::prompts::{cluster_summary_prompt, SYSTEM_EDITOR};
use newscluster::llm::LlmClient;
use newscluster::renderer::clusters::load_clusters;

pub fn cmd_summarize(
    config: &Config,
    input: Option<&str>,
    out: Option<&str>,
    model: Option<&str>,
    lang: Option<&str>,
) -> Result<()> {
    let input_path = config.resolve_output(input, &config.clusters_file);
    let output_path = config.resolve_output(out, &config.summary_file);
    let model = model.unwrap_or(&config.summary_model);
    let language = lang.unwrap_or(&config.summary_language);

    println!("{} {}", "Reading clusters from".green().bold(), input_path.display());
    let clusters = load_clusters(&input_path)?;

    if clusters.is_empty() {
        println!("{} the clusters file is empty", "Warning:".yellow());
        return Ok(());
    }

    let client = LlmClient::from_config(config, model)?;
    let prompt = cluster_summary_prompt(&clusters, language);

    println!("Sending {} clusters to {}...", clusters.len(), client.model());
    let summary = super::runtime()?
        .block_on(client.chat(SYSTEM_EDITOR, &prompt, SUMMARY_TEMPERATURE))?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&output_path, &summary)?;

    println!(
        "\n{} Summary saved to {}\n",
        "Done!".green().bold(),
        output_path.display()
    );
    println!("{}", summary);

    Ok(())
}
