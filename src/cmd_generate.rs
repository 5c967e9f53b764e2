//! `generate` subcommand: the companion form flow.

use std::path::Path;

use anyhow::Context;
use tracing::info;

use compose_assist_config::Config;
use compose_assist_core::{GenerationRequest, HttpReplyGenerator, ReplyGenerator};

use crate::cli::GenerateArgs;

pub(crate) async fn handle_generate(args: GenerateArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(base_url) = args.base_url {
        config.generator.base_url = base_url;
    }

    let content = read_content(args.content, args.file.as_deref())?;
    let request = GenerationRequest::companion(&content, &args.tone)?;
    let generator = HttpReplyGenerator::from_config(&config.generator)?;

    info!(endpoint = %generator.endpoint(), tone = %request.tone, "generating reply");
    let reply = generator.generate(&request).await?;
    println!("{reply}");
    Ok(())
}

fn read_content(content: Option<String>, file: Option<&Path>) -> anyhow::Result<String> {
    match (content, file) {
        (Some(content), _) => Ok(content),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        (None, None) => anyhow::bail!("either --content or --file is required"),
    }
}
