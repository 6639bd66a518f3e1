use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::{Config, File};
use serde::Deserialize;
use shared_types::{Category, CategoryFilter};
use std::path::PathBuf;
use std::sync::Arc;

use curated_catalog::seed::seed_projects;
use curated_catalog::{
    CatalogFilter, CommunityFeed, GalleryView, ProjectCatalogStore, RemoteProjectGateway,
    SubmissionForm, TracingEmbedRenderer,
};

#[derive(Parser, Debug)]
#[command(name = "gallery", about = "Browse and submit projects from the command line")]
struct Cli {
    /// Projects endpoint, overrides PROJECTS_API_URL and the config file
    #[arg(long)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List projects matching a filter
    List {
        /// all, architecture or landscape
        #[arg(long, default_value = "all")]
        category: String,

        /// Free-text search over title, description, architect and location
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Submit a new project
    Submit {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// architecture or landscape
        #[arg(long, default_value = "architecture")]
        category: String,
        #[arg(long, default_value = "")]
        image_url: String,
        #[arg(long, default_value = "")]
        instagram_url: String,
        #[arg(long, default_value = "")]
        linkedin_url: String,
        #[arg(long, default_value = "")]
        website_url: String,
        #[arg(long, default_value = "")]
        architect: String,
        #[arg(long, default_value = "")]
        location: String,
    },
    /// Show approved community posts
    Community,
}

#[derive(Debug, Deserialize, Clone, Default)]
struct ApiConfig {
    projects: Option<ProjectsConfig>,
    community: Option<CommunityConfig>,
}

#[derive(Debug, Deserialize, Clone, Default)]
struct ProjectsConfig {
    api_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
struct CommunityConfig {
    csv_url: Option<String>,
    form_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_api_config()?;
    let embeds = Arc::new(TracingEmbedRenderer::new());

    match cli.command {
        Command::List { category, query } => {
            let category = CategoryFilter::parse(&category)
                .ok_or_else(|| anyhow::anyhow!("Unknown category {:?}", category))?;
            let view = gallery_view(cli.endpoint, &config, embeds)?;
            view.mount().await;
            let page = view.render_filtered(&CatalogFilter::new(category, query));
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
        Command::Submit {
            title,
            description,
            category,
            image_url,
            instagram_url,
            linkedin_url,
            website_url,
            architect,
            location,
        } => {
            let form = SubmissionForm {
                title,
                description,
                category: Category::from_raw(&category),
                image_url,
                instagram_url,
                linkedin_url,
                website_url,
                architect,
                location,
                required_media: None,
            };
            let view = gallery_view(cli.endpoint, &config, embeds)?;
            view.mount().await;
            let page = view.submit(&form).await.context("Submission was not accepted")?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
        Command::Community => {
            let community = config.community.clone().unwrap_or_default();
            let feed = CommunityFeed::new(
                std::env::var("SUBMISSIONS_CSV_URL").ok().or(community.csv_url),
                std::env::var("SUBMIT_FORM_URL").ok().or(community.form_url),
                embeds,
            );
            let response = feed.fetch().await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

fn gallery_view(
    endpoint: Option<String>,
    config: &ApiConfig,
    embeds: Arc<TracingEmbedRenderer>,
) -> Result<GalleryView> {
    let endpoint = endpoint
        .or_else(|| std::env::var("PROJECTS_API_URL").ok())
        .or_else(|| config.projects.as_ref().and_then(|p| p.api_url.clone()))
        .ok_or_else(|| anyhow::anyhow!("Missing PROJECTS_API_URL (pass --endpoint or set it in the config)"))?;

    let gateway = Arc::new(RemoteProjectGateway::new(endpoint)?);
    let store = Arc::new(ProjectCatalogStore::new(gateway, seed_projects()));
    Ok(GalleryView::new(store, embeds))
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Reads the server's config file when present; the CLI also works from
/// flags and environment alone
fn load_api_config() -> Result<ApiConfig> {
    let config_path = get_config_path();
    if !config_path.exists() {
        return Ok(ApiConfig::default());
    }

    let builder = Config::builder()
        .add_source(File::from(config_path.clone()))
        .build()
        .with_context(|| format!("Failed to read config at {:?}", config_path))?;

    let config: ApiConfig = builder.try_deserialize()?;
    Ok(config)
}

fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("curated").join("api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}
