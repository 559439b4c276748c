use clap::{Parser, Subcommand};
use docsite::assemble::BuildDecision;
use docsite::env::Environment;
use docsite::{config, faq, logging, output, site};
use std::path::{Path, PathBuf};

/// Flags for commands that read the build environment.
#[derive(clap::Args, Clone)]
struct EnvArgs {
    /// Dotenv file to layer under the process environment
    /// (default: `.env.<NODE_ENV>` in the config directory, if present)
    #[arg(long)]
    env_file: Option<PathBuf>,
}

fn version_string() -> &'static str {
    if env!("DOCSITE_ON_RELEASE_TAG") == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("DOCSITE_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "docsite")]
#[command(about = "Build configuration for a static documentation site")]
#[command(long_about = "\
Build configuration for a static documentation site

Reads config.toml (optional) and the build environment, and emits the
site metadata plus the ordered plugin list for the site framework.

Environment:

  INCOMING_HOOK_TITLE=Algolia   request a search indexing build
  ALGOLIA=<any non-empty>       request a search indexing build
  ALGOLIA_ADMIN_KEY             search admin key; \"<key>\" counts as unset
  SERVICE_WORKER_KILL_SWITCH    \"true\" removes the service worker
  SITE_URL                      overrides [site].site_url
  NODE_ENV                      selects .env.<NODE_ENV> (default: development)

Search indexing needs both a request and a valid key. Offline support is
installed unless the kill switch is exactly \"true\".

Run 'docsite gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory holding config.toml and .env.* files
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Errors only
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the build configuration as JSON
    Config {
        #[command(flatten)]
        env: EnvArgs,
        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Summarize build decisions and the plugin list
    Check(EnvArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Render FAQ list items from a JSON array of posts
    Faq {
        /// JSON file containing `[{ "title", "slug", ... }]`
        posts: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet)?;

    match cli.command {
        Command::Config { env, compact } => {
            let (settings, environment) = load_inputs(&cli.config_dir, &env)?;
            let build = site::build_config(&settings, &environment);
            let json = if compact {
                serde_json::to_string(&build)?
            } else {
                serde_json::to_string_pretty(&build)?
            };
            println!("{json}");
        }
        Command::Check(env) => {
            let (settings, environment) = load_inputs(&cli.config_dir, &env)?;
            let build = site::build_config(&settings, &environment);
            let decision = BuildDecision::from_env(&environment);
            output::print_check_output(&build, &decision);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Faq { posts } => {
            let content = std::fs::read_to_string(&posts)?;
            let posts: Vec<faq::Post> = serde_json::from_str(&content)?;
            tracing::debug!(count = posts.len(), "rendering FAQ items");
            println!("{}", faq::render_faq_list(&posts).into_string());
        }
    }

    Ok(())
}

/// Load settings and capture the environment, once, at startup.
fn load_inputs(
    config_dir: &Path,
    args: &EnvArgs,
) -> Result<(config::SiteSettings, Environment), Box<dyn std::error::Error>> {
    let settings = config::load_config(config_dir)?;
    let environment = Environment::load(config_dir, args.env_file.as_deref())?;
    Ok((settings, environment))
}
