mod generate;
mod input;

use clap::{Parser, Subcommand};

use crate::input::InputArgs;

#[derive(Debug, Parser)]
#[command(name = "postgen")]
#[command(about = "Generate platform-tailored social media posts from a knowledge base")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the system and user instructions without calling the provider
    Prompt {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Call the generation provider and print the resulting posts
    Generate {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Prompt { input } => generate::run_prompt(&input)?,
        Commands::Generate { input } => {
            let config = postgen_core::load_app_config()?;
            generate::run_generate(&config, &input).await?;
        }
    }

    Ok(())
}
