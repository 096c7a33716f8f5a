use blogsmith::client::CompletionClient;
use blogsmith::session::Session;
use blogsmith::settings::{Settings, MODEL_OPTIONS};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "blogsmith", about = "Draft blog titles and posts with a chat-completion model")]
struct Cli {
    /// Override the configured model identifier
    #[arg(long)]
    model: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate 10 candidate titles for a topic
    Titles { topic: String },

    /// Generate a full blog post for a chosen title
    Write {
        title: String,

        /// Comma-separated keywords to weave into the post
        #[arg(long, value_delimiter = ',')]
        keywords: Vec<String>,

        /// Target word count
        #[arg(long, default_value_t = 400)]
        words: u32,
    },

    /// List the known model identifiers
    Models,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logging();

    let cli = Cli::parse();
    let settings = Settings::new()?;
    let model = cli.model.unwrap_or_else(|| settings.model.clone());
    let client = CompletionClient::new(&settings);
    let mut session = Session::new(client, model, settings.max_retries);

    match cli.command {
        Command::Titles { topic } => {
            let titles = session.generate_titles(&topic).await?;
            println!("{}", titles);
        }
        Command::Write {
            title,
            keywords,
            words,
        } => {
            for keyword in &keywords {
                session.add_keyword(keyword);
            }
            let draft = session.generate_blog(&title, words).await?;
            println!("# {}\n", draft.title);
            println!("Keywords: {}\n", draft.keywords);
            println!("{}", draft.content);
            info!("generated {} words", draft.word_count());
        }
        Command::Models => {
            for model in MODEL_OPTIONS {
                println!("{}", model);
            }
        }
    }

    Ok(())
}
