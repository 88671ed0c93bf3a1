use postgen_core::{build_prompt, parse_generated_posts, AppConfig, GenerationOutcome, Prompt};
use postgen_provider::ProviderClient;

use crate::input::InputArgs;

fn resolve_prompt(input: &InputArgs) -> anyhow::Result<Prompt> {
    let knowledge_base = input.knowledge_base()?;
    Ok(build_prompt(&input.platform, &knowledge_base)?)
}

fn render_prompt(prompt: &Prompt) -> String {
    format!(
        "## system\n{}\n\n## user\n{}",
        prompt.system, prompt.user
    )
}

fn render_posts(posts: &[String]) -> String {
    if posts.is_empty() {
        return "(provider returned no posts)".to_string();
    }
    posts
        .iter()
        .enumerate()
        .map(|(i, post)| format!("--- post {} ---\n{post}", i + 1))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Print the instruction pair for the given input.
///
/// # Errors
///
/// Returns an error for an unknown platform or an unusable knowledge base.
pub(crate) fn run_prompt(input: &InputArgs) -> anyhow::Result<()> {
    let prompt = resolve_prompt(input)?;
    println!("{}", render_prompt(&prompt));
    Ok(())
}

/// Run one generation against the configured provider and print the posts.
///
/// Output that is not a posts object is printed raw after a warning, so the
/// generated text is never lost.
///
/// # Errors
///
/// Returns an error for invalid input or when the provider call fails.
pub(crate) async fn run_generate(config: &AppConfig, input: &InputArgs) -> anyhow::Result<()> {
    let prompt = resolve_prompt(input)?;
    let provider = ProviderClient::with_base_url(
        &config.provider_api_key,
        &config.provider_model,
        config.provider_timeout_secs,
        &config.provider_endpoint,
    )?;

    tracing::info!(platform = %prompt.platform, model = %provider.model(), "requesting posts");
    let text = provider.generate(&prompt).await?;

    match parse_generated_posts(&text) {
        GenerationOutcome::Posts(posts) => println!("{}", render_posts(&posts)),
        GenerationOutcome::Unparsed { raw, reason } => {
            tracing::warn!(error = %reason, "provider output was not a posts object; printing raw text");
            println!("{raw}");
        }
    }

    Ok(())
}
