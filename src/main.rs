use anyhow::Result;
use clap::Parser;
use ghpa::commands::{ConfigOptions, analyze, interactive};
use ghpa::render::OutputFormat;

/// ghpa - GitHub Profile Analyzer
///
/// Look up a GitHub account and show its profile, the languages of its public
/// repositories and its most recently updated repositories.
///
/// If the GITHUB_TOKEN environment variable is set (or present in a .env file),
/// it will be used for authentication. This raises the API rate limit.
///
/// Examples:
///   ghpa analyze octocat     # Show the dashboard of octocat
///   ghpa interactive         # Prompt for usernames
#[derive(Parser, Debug)]
#[command(author, version = env!("GHPA_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(long = "api-url", value_name = "URL", env = "GHPA_API_URL", global = true)]
    pub api_url: Option<String>,

    /// GitHub token (overrides GITHUB_TOKEN)
    #[arg(long, value_name = "TOKEN", global = true)]
    pub token: Option<String>,

    /// Extra attempts for failed requests
    #[arg(long, value_name = "N", env = "GHPA_RETRIES", global = true)]
    pub retries: Option<usize>,

    /// Number of recently updated repositories to list
    #[arg(long, value_name = "N", global = true)]
    pub recent: Option<usize>,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Show the dashboard of one GitHub account
    Analyze(AnalyzeArgs),

    /// Prompt for usernames and show a dashboard for each
    Interactive,
}

#[derive(clap::Args, Debug)]
pub struct AnalyzeArgs {
    /// The GitHub login to look up
    #[arg(value_name = "USERNAME")]
    pub username: String,
}

impl Cli {
    fn config_options(&self) -> ConfigOptions {
        ConfigOptions {
            api_url: self.api_url.clone(),
            token: self.token.clone(),
            retries: self.retries,
            recent: self.recent,
            output: self.output,
            no_color: self.no_color,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = ghpa::runtime::RealRuntime;
    let options = cli.config_options();

    match cli.command {
        Commands::Analyze(args) => analyze(runtime, &args.username, options).await?,
        Commands::Interactive => interactive(runtime, options).await?,
    }
    Ok(())
}
