use rimagen::{GeneratorConfig, ImageClient, ImageGenerator};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    if let Err(e) = rimagen::logger::init_with_config(
        rimagen::logger::LoggerConfig::development()
            .with_level(rimagen::logger::LogLevel::Debug),
    ) {
        eprintln!("Failed to initialize logger: {}", e);
        process::exit(1);
    }

    log::info!("🔍 Checking OpenAI environment...");

    match env::var("OPENAI_API_KEY") {
        Ok(api_key) => {
            log::info!("✅ OpenAI API key found in environment");
            log::debug!(
                "API key starts with: {}...",
                &api_key[..5.min(api_key.len())]
            );
        }
        Err(_) => {
            log::error!("❌ OPENAI_API_KEY is not set, generation requests will fail");
        }
    }

    if let Ok(api_base) = env::var("OPENAI_API_BASE") {
        log::info!("OPENAI_API_BASE: {}", api_base);
    }

    let args: Vec<String> = env::args().collect();
    let prompt = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| "A serene landscape with mountains and a lake at sunset".to_string());
    let count: u32 = match args.get(2).map(|raw| raw.parse()) {
        Some(Ok(count)) => count,
        Some(Err(_)) => {
            log::error!("❌ Count must be a non-negative integer, got '{}'", args[2]);
            process::exit(2);
        }
        None => 1,
    };

    let config = GeneratorConfig::from_env();
    rimagen::logger::log_startup_info("rimagen", env!("CARGO_PKG_VERSION"), &config.output_dir);

    log::info!("🖼️  Available image generation models:");
    for model in ImageClient::supported_models() {
        log::info!("  {} - {} ({})", model.id, model.name, model.provider);
    }

    log::info!("🔄 Creating image generator...");
    let generator = match ImageGenerator::new(config) {
        Ok(generator) => {
            log::info!("✅ Image generator initialized successfully");
            generator
        }
        Err(e) => {
            log::error!("❌ Failed to initialize image generator: {}", e);
            process::exit(1);
        }
    };

    log::info!("🎨 Generating {} image(s) for prompt: {}", count, prompt);
    let _run_timer = rimagen::logger::timer("generation run");

    match generator.generate(&prompt, count).await {
        Ok(()) => {
            log::info!("🎉 Run complete!");
            log::info!(
                "💾 Check {} for the generated files",
                generator.output_dir().display()
            );
        }
        Err(e) => {
            log::error!("❌ Generation run failed: {}", e);
            process::exit(1);
        }
    }
}
