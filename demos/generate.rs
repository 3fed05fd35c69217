use rimagen::{GeneratorConfig, ImageGenerator, ImageSize, OpenAiConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found"),
    }
    rimagen::logger::init()?;

    let api_key = env::var("OPENAI_API_KEY")?;
    let config = GeneratorConfig::new()
        .with_openai(OpenAiConfig::new().with_api_key(api_key))
        .with_output_dir("demo_images")
        .with_image_size(ImageSize::Square512)
        .with_model("dall-e-2");

    let generator = ImageGenerator::new(config)?;
    generator
        .generate("A watercolor painting of a fox in a snowy forest", 2)
        .await?;

    println!("Saved images under {}", generator.output_dir().display());

    Ok(())
}
