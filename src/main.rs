// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use doclib::utils::Validator;
use doclib::utils::logging::{format_chip, format_error, format_info, format_success, format_warning};
use doclib::{
    ApiClient, Config, DeleteOutcome, Document, DocumentId, FormController, LibraryError, Outcome,
    SearchCoordinator, SortMode, SubmitOutcome, Suggestion, ViewerController, ViewerState,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "doclib")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Browse, search and edit a topic-modelled document library", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List documents, optionally searched, filtered by topic and sorted
    List {
        #[arg(short, long)]
        query: Option<String>,

        #[arg(short, long, value_name = "TOPIC_ID")]
        topic: Option<i64>,

        #[arg(short, long)]
        sort: Option<SortMode>,
    },

    /// Show one document
    Show {
        id: String,

        /// Also save the document as a plain-text file in the current directory
        #[arg(long)]
        export: bool,
    },

    /// Delete a document after confirmation
    Delete {
        id: String,

        #[arg(long)]
        yes: bool,
    },

    /// Create a new document
    Create {
        #[arg(long, default_value = "")]
        title: String,

        #[arg(long, default_value = "")]
        content: String,

        /// Read content from a text file; its name becomes the title if none is given
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Comma-separated author list
        #[arg(long, default_value = "")]
        authors: String,

        #[arg(long, default_value = "")]
        year: String,

        #[arg(long, default_value = "")]
        doi: String,

        #[arg(long = "topic", value_name = "TOPIC_ID")]
        topics: Vec<i64>,

        /// Ask the backend to check matching topics before saving
        #[arg(long)]
        suggest: bool,

        /// Stay on a blank form instead of opening the saved document
        #[arg(long)]
        add_another: bool,
    },

    /// Edit an existing document; omitted fields keep their current value
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        content: Option<String>,

        #[arg(long)]
        authors: Option<String>,

        #[arg(long)]
        year: Option<String>,

        #[arg(long)]
        doi: Option<String>,

        /// Replaces the topic selection when given
        #[arg(long = "topic", value_name = "TOPIC_ID")]
        topics: Vec<i64>,
    },

    /// List topics
    Topics,

    /// Regenerate topics on the backend
    Generate,

    /// Replace the library with the backend's CSV source
    ImportCsv {
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    doclib::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::default_config()
    };

    let api = Arc::new(ApiClient::new(config.api.clone()).context("Failed to create API client")?);

    match cli.command {
        Commands::List { query, topic, sort } => {
            cmd_list(&config, api, query, topic, sort).await?;
        }
        Commands::Show { id, export } => {
            cmd_show(api, DocumentId::new(id), export).await?;
        }
        Commands::Delete { id, yes } => {
            cmd_delete(api, DocumentId::new(id), yes).await?;
        }
        Commands::Create {
            title,
            content,
            file,
            authors,
            year,
            doi,
            topics,
            suggest,
            add_another,
        } => {
            let mut form = FormController::new(api);
            {
                let fields = form.form_mut();
                fields.title = title;
                fields.content = content;
                fields.authors = authors;
                fields.year = year;
                fields.doi = doi;
                fields.topics = topics.into_iter().collect();
            }
            if let Some(path) = file {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                form.load_text_file(&name, &text);
            }
            if suggest {
                report_suggestion(form.suggest_topics(config.browser.suggest_count).await);
            }
            cmd_submit(&mut form, add_another).await?;
        }
        Commands::Edit {
            id,
            title,
            content,
            authors,
            year,
            doi,
            topics,
        } => {
            let mut form = FormController::open(api, Some(DocumentId::new(id.clone()))).await;
            if let Some(notice) = form.notice() {
                println!("{}", format_error(notice));
                return Err(anyhow::anyhow!("Document {} could not be loaded", id));
            }
            info!("{}", form.heading());
            {
                let fields = form.form_mut();
                if let Some(title) = title {
                    fields.title = title;
                }
                if let Some(content) = content {
                    fields.content = content;
                }
                if let Some(authors) = authors {
                    fields.authors = authors;
                }
                if let Some(year) = year {
                    fields.year = year;
                }
                if let Some(doi) = doi {
                    fields.doi = doi;
                }
                if !topics.is_empty() {
                    fields.topics = topics.into_iter().collect();
                }
            }
            cmd_submit(&mut form, false).await?;
        }
        Commands::Topics => {
            cmd_topics(&config, api).await;
        }
        Commands::Generate => {
            cmd_generate(&config, api).await?;
        }
        Commands::ImportCsv { yes } => {
            cmd_import_csv(&config, api, yes).await?;
        }
    }

    Ok(())
}

fn coordinator(config: &Config, api: Arc<ApiClient>) -> SearchCoordinator<ApiClient> {
    SearchCoordinator::new(api, config.browser.debounce(), config.browser.default_sort)
}

async fn cmd_list(
    config: &Config,
    api: Arc<ApiClient>,
    query: Option<String>,
    topic: Option<i64>,
    sort: Option<SortMode>,
) -> Result<()> {
    let coordinator = coordinator(config, api);
    let mut outcome = coordinator.load().await;

    if let Some(mode) = sort {
        outcome = coordinator.set_sort(mode);
    }
    if let Some(topic_id) = topic {
        outcome = coordinator.toggle_topic(topic_id).await;
    }
    if let Some(query) = query {
        outcome = coordinator.search(&query).await;
    }

    if coordinator.used_fallback() {
        println!(
            "{}",
            format_warning("Backend unreachable, showing offline sample documents")
        );
    }
    if coordinator.topics_used_fallback() {
        println!(
            "{}",
            format_warning("Topics unavailable, showing offline sample topics")
        );
    }

    let chips: Vec<String> = coordinator
        .topic_chips()
        .iter()
        .map(|chip| format_chip(&format!("{} {}", chip.topic_id, chip.label), chip.active))
        .collect();
    if !chips.is_empty() {
        println!("{}\n", chips.join(" "));
    }

    match outcome {
        Outcome::Rendered(documents) => print_documents(&documents),
        Outcome::Stale | Outcome::Debounced => print_documents(&coordinator.results()),
    }

    Ok(())
}

fn print_documents(documents: &[Document]) {
    if documents.is_empty() {
        println!("No documents found");
        println!("Try adjusting your search or filters");
        return;
    }

    println!("Found {} document(s)\n", documents.len());
    println!("{}", "=".repeat(80));
    for (idx, document) in documents.iter().enumerate() {
        println!("\n{}. {} ({})", idx + 1, document.title, document.id);
        if !document.topic_names.is_empty() {
            println!("   Topics: {}", document.topic_names.join(", "));
        }
        let preview = document.content.lines().next().unwrap_or_default();
        println!("   {}", Validator::truncate_text(preview, 160));
    }
    println!("\n{}", "=".repeat(80));
}

async fn cmd_show(api: Arc<ApiClient>, id: DocumentId, export: bool) -> Result<()> {
    let viewer = ViewerController::open(api, Some(id)).await;
    println!("{}", viewer.render());
    if let Some(route) = viewer.edit_route() {
        println!("\n{}", format_info(&format!("Edit: {}", route)));
    }
    if let Some(link) = viewer.share_link() {
        println!("{}", format_info(&format!("Share: {}", link)));
    }

    if export {
        if let Some((file_name, body)) = viewer.export_text() {
            std::fs::write(&file_name, body)
                .with_context(|| format!("Failed to write {}", file_name))?;
            println!("{}", format_success(&format!("Saved {}", file_name)));
        }
    }
    Ok(())
}

async fn cmd_delete(api: Arc<ApiClient>, id: DocumentId, yes: bool) -> Result<()> {
    let mut viewer = ViewerController::open(api, Some(id)).await;
    if let ViewerState::NotFound = viewer.state() {
        println!("{}", viewer.render());
        return Ok(());
    }

    let confirm = |prompt: &str| yes || ask_yes_no(prompt);
    match viewer.delete(&confirm).await {
        Ok(DeleteOutcome::Cancelled) => println!("{}", format_info("Delete cancelled")),
        Ok(DeleteOutcome::Deleted { route, .. }) => {
            println!("{}", format_success("Document deleted"));
            println!("{}", format_info(&format!("Back to: {}", route)));
        }
        Err(e) => {
            println!("{}", format_error(&e.user_message()));
            return Err(e.into());
        }
    }
    Ok(())
}

fn ask_yes_no(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn report_suggestion(result: doclib::Result<Suggestion>) {
    match result {
        Ok(Suggestion::Checked(count)) => {
            println!("{}", format_success(&format!("Checked {} suggested topic(s)", count)));
        }
        Ok(Suggestion::Keywords(keywords)) => println!(
            "{}",
            format_info(&format!(
                "No matching topics. Suggested keywords: {}",
                keywords.join(", ")
            ))
        ),
        Ok(Suggestion::Nothing) => println!("{}", format_info("No topic suggestions")),
        Err(e) => println!(
            "{}",
            format_warning(&format!("Topic suggestion failed: {}", e.user_message()))
        ),
    }
}

async fn cmd_submit(form: &mut FormController<ApiClient>, add_another: bool) -> Result<()> {
    match form.submit(add_another).await {
        Ok(SubmitOutcome::Reset { event }) => {
            if let doclib::LibraryEvent::Saved(saved) = event {
                println!("{}", format_success(&format!("Saved \"{}\"", saved.title)));
            }
            println!("{}", format_info(&form.heading()));
            Ok(())
        }
        Ok(SubmitOutcome::Navigate { route, .. }) => {
            println!("{}", format_success("Document saved"));
            println!("{}", format_info(&format!("Open: {}", route)));
            Ok(())
        }
        Err(e) => {
            let message = match &e {
                LibraryError::Validation(_) => e.user_message(),
                _ => format!("Error saving document: {}", e.user_message()),
            };
            println!("{}", format_error(&message));
            Err(e.into())
        }
    }
}

async fn cmd_topics(config: &Config, api: Arc<ApiClient>) {
    let coordinator = coordinator(config, api);
    coordinator.load().await;

    if coordinator.topics_used_fallback() {
        println!("{}", format_warning("Backend unreachable, showing offline topics"));
    }

    let topics = coordinator.topics();
    if topics.is_empty() {
        println!("No topics yet. Run `doclib generate` to build them.");
        return;
    }

    for topic in topics {
        println!(
            "{:>4}  {:<24} {:>5} docs  {}",
            topic.topic_id,
            topic.display_name(),
            topic.count,
            topic.keywords.join(", ")
        );
    }
}

async fn cmd_generate(config: &Config, api: Arc<ApiClient>) -> Result<()> {
    let coordinator = coordinator(config, api);

    let spinner = spinner("Generating topics...");

    let result = coordinator.generate_topics().await;
    spinner.finish_and_clear();

    match result {
        Ok((report, _)) => {
            println!(
                "{}",
                format_success(&format!(
                    "Generated {} topics from {} documents",
                    report.topics_count, report.documents_processed
                ))
            );
            Ok(())
        }
        Err(e) => {
            println!("{}", format_error(&e.user_message()));
            Err(e).context("Topic generation failed")
        }
    }
}

async fn cmd_import_csv(config: &Config, api: Arc<ApiClient>, yes: bool) -> Result<()> {
    if !yes && !ask_yes_no("Replace every document with the backend's CSV data?") {
        println!("{}", format_info("Import cancelled"));
        return Ok(());
    }

    let coordinator = coordinator(config, api);

    let spinner = spinner("Loading CSV data...");

    let result = coordinator.import_csv().await;
    spinner.finish_and_clear();

    match result {
        Ok((report, _)) => {
            println!(
                "{}",
                format_success(&format!("Loaded {} documents", report.documents_loaded))
            );
            println!(
                "{}",
                format_info("Run `doclib generate` to rebuild topics for the new documents")
            );
            Ok(())
        }
        Err(e) => {
            println!("{}", format_error(&e.user_message()));
            Err(e).context("CSV import failed")
        }
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
