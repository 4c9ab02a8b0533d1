use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use imaginator_api::{relay, Config, Formula, PromptBuilder, PromptEnhancer, StyleRegistry};

#[derive(Parser, Debug)]
#[command(name = "imaginatorctl", about = "CLI for the Imaginator prompt and image service", version)]
struct Cli {
    /// Override IMAGE_PROVIDER (pollinations | openrouter)
    #[arg(global = true, long)]
    provider: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available styles
    Styles {
        /// Output raw JSON instead of pretty lines
        #[arg(long)]
        json: bool,
    },
    /// Prompt-related commands
    Prompt {
        #[command(subcommand)]
        cmd: PromptCmd,
    },
    /// Generate an image for a prompt and save it
    Image {
        /// Prompt text sent to the image provider
        #[arg(long)]
        prompt: String,
        /// Output path (defaults to ./imaginator-ai-image.<ext>)
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum PromptCmd {
    /// Build a prompt from form fields
    Build {
        /// Main subject
        #[arg(long)]
        subject: Option<String>,
        /// What the subject is doing
        #[arg(long)]
        action: Option<String>,
        /// Notable features
        #[arg(long)]
        features: Option<String>,
        /// Mood / atmosphere
        #[arg(long)]
        mood: Option<String>,
        /// Background / setting
        #[arg(long)]
        background: Option<String>,
        /// Style id (see `imaginatorctl styles`)
        #[arg(long)]
        style: Option<String>,
    },
    /// Expand loose keywords into a full prompt with the text model
    Enhance {
        /// Comma separated keywords, e.g. "cyberpunk, dog, rain"
        keywords: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load env and parse CLI
    Config::dotenv_load();
    let cli = Cli::parse();

    let mut conf = Config::new()?;
    if let Some(provider) = cli.provider {
        conf.image_provider = provider.parse()?;
    }

    match cli.command {
        Commands::Styles { json } => {
            let styles = StyleRegistry::builtin().list();
            if json {
                println!("{}", serde_json::to_string(&styles)?);
            } else {
                for s in styles { println!("{}\t{}", s.id, s.name); }
            }
            Ok(())
        }
        Commands::Prompt { cmd } => match cmd {
            PromptCmd::Build { subject, action, features, mood, background, style } => {
                let formula = Formula { subject, action, features, mood, background, style_id: style };
                let builder = PromptBuilder::new(Arc::new(StyleRegistry::builtin()));
                println!("{}", builder.build(&formula));
                Ok(())
            }
            PromptCmd::Enhance { keywords } => {
                let enhancer = PromptEnhancer::new(conf.gemini_base_url, conf.gemini_model, conf.gemini_api_key);
                match enhancer.enhance(&keywords).await {
                    Ok(prompt) => {
                        println!("{}", prompt);
                        Ok(())
                    }
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }
                }
            }
        },
        Commands::Image { prompt, out } => {
            let image_relay = relay::from_config(&conf);
            let image = image_relay.relay(&prompt).await.map_err(|e| {
                eprintln!("Error: {}", e);
                e
            })?;
            let path = out.unwrap_or_else(|| PathBuf::from(format!("imaginator-ai-image.{}", extension(&image.mime_type))));
            tokio::fs::write(&path, &image.bytes).await?;
            println!("Saved {} ({} bytes, {})", path.display(), image.bytes.len(), image.mime_type);
            Ok(())
        }
    }
}

fn extension(mime_type: &str) -> &str {
    match mime_type.split(';').next().unwrap_or_default().trim() {
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "jpg",
    }
}
