use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use blogsmith::{
    AnthropicClient, AnthropicConfig, BlogPipeline, BlogRequest, GeneratedPost, MarkdownPost,
    PipelineConfig, parse_generated_post_file, parse_keywords_string, parse_request_file,
};

#[derive(Parser)]
#[command(name = "blogsmith")]
#[command(author, version, about = "Multi-stage blog post generation pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a blog post
    Generate {
        /// Blog request JSON file (replaces the topic/audience/keywords/goal flags)
        #[arg(short, long, conflicts_with_all = ["topic", "audience", "keywords", "goal"])]
        request: Option<PathBuf>,

        /// Topic of the post
        #[arg(short, long, required_unless_present = "request")]
        topic: Option<String>,

        /// Target audience
        #[arg(short, long, default_value = "general readers")]
        audience: String,

        /// Comma-separated target keywords
        #[arg(short, long, default_value = "")]
        keywords: String,

        /// Goal for the call to action
        #[arg(short, long, default_value = "Subscribe for more posts like this")]
        goal: String,

        /// Output file for the generated post (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file for the Markdown rendering (printed to stdout if omitted)
        #[arg(long)]
        markdown: Option<PathBuf>,

        /// Model to use (defaults to BLOGSMITH_MODEL or the built-in default)
        #[arg(long)]
        model: Option<String>,

        /// Style hint for generated images
        #[arg(long, default_value = blogsmith::stages::DEFAULT_IMAGE_STYLE)]
        image_style: String,

        /// Maximum concurrent image requests
        #[arg(long, default_value = "4")]
        max_parallel_images: usize,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Render a previously generated post as Markdown
    Render {
        /// Generated post file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (printed to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            request,
            topic,
            audience,
            keywords,
            goal,
            output,
            markdown,
            model,
            image_style,
            max_parallel_images,
            verbose,
        } => {
            setup_logging(verbose);

            let request = match request {
                Some(path) => parse_request_file(&path).context("Failed to load blog request")?,
                None => BlogRequest::new(
                    topic.unwrap_or_default(),
                    audience,
                    parse_keywords_string(&keywords),
                    goal,
                ),
            };

            let mut api_config = AnthropicConfig::from_env()?;
            if let Some(model) = model {
                api_config.model = model;
            }

            let pipeline_config = PipelineConfig {
                image_style,
                max_parallel_images,
            };

            generate_post(request, api_config, pipeline_config, output, markdown).await
        }
        Commands::Render {
            input,
            output,
            verbose,
        } => {
            setup_logging(verbose);
            render_post(input, output)
        }
    }
}

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

async fn generate_post(
    request: BlogRequest,
    api_config: AnthropicConfig,
    pipeline_config: PipelineConfig,
    output: Option<PathBuf>,
    markdown: Option<PathBuf>,
) -> Result<()> {
    let client = AnthropicClient::new(api_config)?;
    info!(
        "Generating \"{}\" for {} with model {}",
        request.topic,
        request.target_audience,
        client.model()
    );

    let pipeline = BlogPipeline::with_config(Arc::new(client), pipeline_config);

    let started = Instant::now();
    let document = pipeline.generate(&request).await?;
    let duration_ms = started.elapsed().as_millis() as u64;

    let post = GeneratedPost::new(&request, document, duration_ms);
    info!(
        "Run {} finished in {:.1}s, {} images generated",
        post.run_id,
        duration_ms as f64 / 1000.0,
        post.images_generated
    );

    if let Some(path) = output {
        post.write_json(&path)?;
        info!("Output written to {:?}", path);
    }

    let rendered = MarkdownPost::new(&post.document);
    match markdown {
        Some(path) => {
            rendered.write_file(&path)?;
            info!("Markdown written to {:?}", path);
        }
        None => print!("{}", rendered.format()),
    }

    Ok(())
}

fn render_post(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    info!("Rendering post from {:?}", input);
    let post = parse_generated_post_file(&input)?;
    let rendered = MarkdownPost::new(&post.document);

    match output {
        Some(path) => {
            rendered.write_file(&path)?;
            info!("Markdown written to {:?}", path);
        }
        None => print!("{}", rendered.format()),
    }

    Ok(())
}
