//! Image command

use crate::app::ImageArgs;
use anyhow::Result;
use docloom_core::generate::{
    generate_image, image_request, save_image, ImageOptions, DEFAULT_IMAGE_PROMPT,
};
use docloom_core::{BedrockClient, Config};

pub async fn run(args: ImageArgs, config: &Config) -> Result<()> {
    let prompt = if args.prompt.is_empty() {
        DEFAULT_IMAGE_PROMPT.to_string()
    } else {
        args.prompt.join(" ")
    };
    let options = ImageOptions::default();

    if args.dry_run {
        let body = serde_json::to_value(image_request(&prompt, &options))?;
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let client = BedrockClient::new(config.aws.clone())?;
    let bytes = generate_image(&client, &config.models.image_model, &prompt, &options).await?;

    let output = args
        .output
        .unwrap_or_else(|| config.paths.image_output.clone());
    save_image(&bytes, &output)?;

    println!("Image saved to {}", output.display());

    Ok(())
}
