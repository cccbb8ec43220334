use regex::Regex;
use std::sync::OnceLock;

pub const SYSTEM_EDITOR: &str = r#"You are an editorial assistant who condenses groups of news stories into concise, informative summaries."#;

fn whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

/// Collapse runs of whitespace (newlines included) into single spaces.
pub fn single_line(text: &str) -> String {
    whitespace().replace_all(text.trim(), " ").into_owned()
}

/// Prompt asking for one numbered summary per cluster, in `language`.
pub fn cluster_summary_prompt(clusters: &[Vec<String>], language: &str) -> String {
    let cluster_text = clusters
        .iter()
        .enumerate()
        .map(|(idx, entries)| {
            let items = entries
                .iter()
                .enumerate()
                .map(|(inner, entry)| format!("  - Story {}: {}", inner + 1, single_line(entry)))
                .collect::<Vec<_>>()
                .join("\n");
            format!("Cluster {}:\n{}", idx + 1, items)
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        r#"Below are clusters of news stories. Each cluster holds texts (title + description) that are already similar to each other.
Write a short summary for each cluster, in {}, giving:
1. A concise title for the cluster
2. A 2-3 sentence summary
3. A bullet list of the main themes

Keep a numbered structure. Here are the clusters:

{}"#,
        language, cluster_text
    )
}
