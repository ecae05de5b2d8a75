//! Command-line interface for the ghcard binary.
//!
//! The CLI renders a profile card to stdout or a file, exports it together
//! with a JSON manifest, prints a user's language tally and lists the
//! available layouts. Card options come from built-in defaults, an optional
//! YAML document and command-line flags, in that order.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process,
    time::Duration,
};

use clap::{ArgAction, Args, Parser, Subcommand};
use ghcard::{
    CardConfig, CardDocument, ColorTheme, DEFAULT_API_URL, Error, GithubClient, GithubSource,
    ItemCount, LanguageTally, Layout, Session, export_card, export_io_error,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Command line interface for rendering GitHub profile cards.
#[derive(Debug, Parser,)]
#[command(name = "ghcard", version, about = "Render GitHub profile cards")]
struct Cli
{
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand,)]
/// Supported commands exposed by the CLI.
enum Command
{
    /// Render a card and print the SVG or write it to a file.
    Render(RenderArgs,),
    /// Render a card and write the SVG plus a JSON manifest.
    Export(ExportArgs,),
    /// Print the language tally of a user as JSON.
    Tally(TallyArgs,),
    /// List the available layouts.
    Layouts,
}

/// Options shared by every command that renders a card.
#[derive(Debug, Args, Default,)]
struct CardArgs
{
    /// YAML document with card options; flags override its values.
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf,>,

    /// GitHub login whose card is rendered.
    #[arg(long = "username", value_name = "LOGIN", env = "GHCARD_USERNAME")]
    username: Option<String,>,

    /// Layout strategy.
    #[arg(long = "layout", value_enum)]
    layout: Option<Layout,>,

    /// Colour theme.
    #[arg(long = "theme", value_enum)]
    theme: Option<ColorTheme,>,

    /// Show the followers, following and repositories stats.
    #[arg(long = "show-follow-stats", value_name = "BOOL")]
    show_follow_stats: Option<bool,>,

    /// Show the profile bio.
    #[arg(long = "show-bio", value_name = "BOOL")]
    show_bio: Option<bool,>,

    /// Fetch and show authored pull requests.
    #[arg(long = "show-pull-requests", value_name = "BOOL")]
    show_pull_requests: Option<bool,>,

    /// Number of pull requests to list (1, 3 or 5).
    #[arg(long = "pr-count", value_name = "COUNT")]
    pull_request_count: Option<ItemCount,>,

    /// Fetch and show the most starred repositories.
    #[arg(long = "show-top-repositories", value_name = "BOOL")]
    show_top_repositories: Option<bool,>,

    /// Number of repositories to list (1, 3 or 5).
    #[arg(long = "repo-count", value_name = "COUNT")]
    repository_count: Option<ItemCount,>,

    /// Fetch the repository listing and show the language tally.
    #[arg(long = "show-languages", value_name = "BOOL")]
    show_languages: Option<bool,>,

    /// Show profile and social links.
    #[arg(long = "show-social-links", value_name = "BOOL")]
    show_social_links: Option<bool,>,

    #[command(flatten)]
    api: ApiArgs,
}

#[derive(Debug, Args, Default,)]
struct ApiArgs
{
    /// Base URL of the GitHub REST API.
    #[arg(long = "api-url", value_name = "URL", env = "GHCARD_API_URL")]
    api_url: Option<String,>,
}

impl ApiArgs
{
    fn client(&self,) -> Result<GithubClient, Error,>
    {
        GithubClient::with_base_uri(self.api_url.as_deref().unwrap_or(DEFAULT_API_URL,),)
    }
}

#[derive(Debug, Args,)]
struct RenderArgs
{
    #[command(flatten)]
    card: CardArgs,

    /// File receiving the SVG; printed to stdout when omitted.
    #[arg(long = "output", value_name = "FILE")]
    output: Option<PathBuf,>,
}

#[derive(Debug, Args,)]
struct ExportArgs
{
    #[command(flatten)]
    card: CardArgs,

    /// Directory that will receive the SVG and manifest.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "cards")]
    output_dir: PathBuf,
}

#[derive(Debug, Args,)]
struct TallyArgs
{
    /// GitHub login whose repositories are tallied.
    #[arg(long = "username", value_name = "LOGIN", env = "GHCARD_USERNAME")]
    username: String,

    /// Output formatted JSON for easier inspection.
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pretty: bool,

    #[command(flatten)]
    api: ApiArgs,
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main]
async fn main()
{
    init_tracing();

    if let Err(error,) = run(Cli::parse(),).await {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

fn init_tracing()
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn",),);
    tracing_subscriber::fmt().with_env_filter(filter,).with_writer(io::stderr,).init();
}

/// Executes the parsed command.
///
/// # Errors
///
/// Propagates configuration, fetch-client, serialization and export errors.
/// Failures of individual feeds are logged and only leave their section
/// empty.
async fn run(cli: Cli,) -> Result<(), Error,>
{
    match cli.command {
        Command::Render(args,) => run_render(args,).await,
        Command::Export(args,) => run_export(args,).await,
        Command::Tally(args,) => run_tally(args,).await,
        Command::Layouts => write_layouts(&mut io::stdout().lock(),),
    }
}

async fn run_render(args: RenderArgs,) -> Result<(), Error,>
{
    let card = render(&args.card,).await?;

    match args.output {
        Some(path,) => write_svg_file(&path, &card,),
        None => {
            let mut handle = io::stdout().lock();
            handle
                .write_all(card.svg().as_bytes(),)
                .map_err(|source| export_io_error(Path::new("<stdout>",), source,),)
        }
    }
}

async fn run_export(args: ExportArgs,) -> Result<(), Error,>
{
    let config = resolve_config(&args.card,)?;
    if !config.has_username() {
        return Err(Error::validation("a username is required to export a card",),);
    }

    let card = fetch_and_render(config.clone(), &args.card.api,).await?;
    let exported = export_card(&card, config.username(), &args.output_dir,)?;
    println!("{}", exported.svg_path.display());
    println!("{}", exported.manifest_path.display());
    Ok((),)
}

async fn run_tally(args: TallyArgs,) -> Result<(), Error,>
{
    let config = CardConfig {
        username: args.username,
        ..CardConfig::default()
    }
    .validated()?;
    if !config.has_username() {
        return Err(Error::validation("a username is required to tally languages",),);
    }

    let client = args.api.client()?;
    let repositories = client.all_repositories(config.username(),).await?;
    let tally = LanguageTally::from_repositories(&repositories,);

    let mut handle = io::stdout().lock();
    write_tally(&mut handle, &tally, args.pretty,)
}

async fn render(args: &CardArgs,) -> Result<CardDocument, Error,>
{
    let config = resolve_config(args,)?;
    fetch_and_render(config, &args.api,).await
}

async fn fetch_and_render(config: CardConfig, api: &ApiArgs,) -> Result<CardDocument, Error,>
{
    let mut session = Session::new(config,);
    if !session.due().is_empty() {
        let client = api.client()?;
        let spinner = spinner(session.state().config().username(),);
        let report = session.sync(&client,).await;
        spinner.finish_and_clear();

        if !report.failed.is_empty() {
            warn!("Sections left empty after failed fetches: {:?}", report.failed);
        }
        info!("Applied feeds: {:?}", report.applied);
    }
    Ok(session.render(),)
}

fn spinner(username: &str,) -> ProgressBar
{
    let pb = ProgressBar::new_spinner();
    if let Ok(style,) =
        ProgressStyle::default_spinner().template("{spinner:.yellow} [{elapsed_precise}] {msg}",)
    {
        pb.set_style(style,);
    }
    pb.set_message(format!("Fetching GitHub data for {username}..."),);
    pb.enable_steady_tick(Duration::from_millis(100,),);
    pb
}

/// Builds the configuration from defaults, the optional YAML document and
/// the command-line overrides, then validates it.
fn resolve_config(args: &CardArgs,) -> Result<CardConfig, Error,>
{
    let mut config = match &args.config {
        Some(path,) => CardConfig::load(path,)?,
        None => CardConfig::default(),
    };

    if let Some(username,) = &args.username {
        config.username = username.clone();
    }
    if let Some(layout,) = args.layout {
        config.layout = layout;
    }
    if let Some(theme,) = args.theme {
        config.color_theme = theme;
    }
    if let Some(value,) = args.show_follow_stats {
        config.show_follow_stats = value;
    }
    if let Some(value,) = args.show_bio {
        config.show_bio = value;
    }
    if let Some(value,) = args.show_pull_requests {
        config.show_pull_requests = value;
    }
    if let Some(count,) = args.pull_request_count {
        config.pull_request_count = count;
    }
    if let Some(value,) = args.show_top_repositories {
        config.show_top_repositories = value;
    }
    if let Some(count,) = args.repository_count {
        config.repository_count = count;
    }
    if let Some(value,) = args.show_languages {
        config.show_languages = value;
    }
    if let Some(value,) = args.show_social_links {
        config.show_social_links = value;
    }

    config.validated()
}

fn write_svg_file(path: &Path, card: &CardDocument,) -> Result<(), Error,>
{
    if let Some(parent,) = path.parent().filter(|parent| !parent.as_os_str().is_empty(),) {
        fs::create_dir_all(parent,).map_err(|source| export_io_error(parent, source,),)?;
    }
    fs::write(path, card.svg(),).map_err(|source| export_io_error(path, source,),)?;
    info!("Wrote {} card to {}", card.layout(), path.display());
    Ok((),)
}

fn write_tally<W: io::Write,>(writer: &mut W, tally: &LanguageTally, pretty: bool,) -> Result<(), Error,>
{
    if pretty {
        serde_json::to_writer_pretty(writer, tally,)?;
    } else {
        serde_json::to_writer(writer, tally,)?;
    }

    Ok((),)
}

fn write_layouts<W: io::Write,>(writer: &mut W,) -> Result<(), Error,>
{
    for layout in Layout::ALL {
        writeln!(writer, "{layout}").map_err(|source| export_io_error(Path::new("<stdout>",), source,),)?;
    }
    Ok((),)
}
