use clap::{ArgAction, Parser, Subcommand};
use commands::{clear, config, detail, lists, login, recommend, search, track};
use media_track_models::MediaKind;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "reelvault")]
#[command(about = "ReelVault - Track what you watch and find what to watch next")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to this file (daily rotation) instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in to the identity provider
    #[command(long_about = "Sign in via the federated identity provider. Uses the stored refresh token when one is available, otherwise walks through the authorize-and-paste-code flow. First sign-in creates your user document with default preferences.")]
    Login,

    /// Sign out and forget the local session
    Logout,

    /// Search the catalog
    #[command(long_about = "Search the media catalog by title. An empty query lists what is currently popular. A query that exactly matches a known person's name searches for items featuring that person instead of a literal title match.")]
    Search {
        /// Search terms (empty for the popular listing)
        query: Vec<String>,

        /// Media kind to search
        #[arg(long, default_value = "film", conflicts_with = "all")]
        kind: MediaKind,

        /// Search films and series in one request, ignoring --kind
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Number of result pages to fetch
        #[arg(long, default_value_t = 1)]
        pages: u32,

        /// Include items already on one of your lists
        #[arg(long, action = ArgAction::SetTrue)]
        include_tracked: bool,
    },

    /// Show one of your personal lists
    Lists {
        /// Which list to show
        #[arg(value_enum)]
        list: lists::ListName,

        /// Only show items whose title contains this text
        #[arg(long)]
        title: Option<String>,

        /// Only show items with this genre label
        #[arg(long)]
        genre: Option<String>,

        /// Keep running and re-render when the remote document changes
        #[arg(long, action = ArgAction::SetTrue)]
        follow: bool,
    },

    /// Manage list membership for a catalog item
    Track {
        #[command(subcommand)]
        cmd: TrackCommands,
    },

    /// Personalized recommendations from your rating history
    #[command(long_about = "Rank catalog items by your per-genre affinity (built from your own ratings) blended with public rating. Items already on any of your lists are excluded. Explicit --genre flags override your stored favorite genres.")]
    Recommend {
        /// Media kind to recommend
        #[arg(long, default_value = "film")]
        kind: MediaKind,

        /// Genre filter (repeatable); overrides stored preferences
        #[arg(long = "genre", value_name = "GENRE")]
        genres: Vec<String>,

        /// Earliest release year
        #[arg(long, value_name = "YEAR")]
        from: Option<u32>,

        /// Latest release year
        #[arg(long, value_name = "YEAR")]
        to: Option<u32>,

        /// Maximum number of results
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Full detail for one catalog item (cast, availability, certification)
    Detail {
        /// Catalog id of the item
        id: u64,

        /// Media kind of the item
        #[arg(long, default_value = "film")]
        kind: MediaKind,
    },

    /// Configure credentials and settings
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },

    /// Clear cached data
    Clear {
        /// Clear cache and credentials
        #[arg(long, action = ArgAction::SetTrue, conflicts_with_all = ["cache", "credentials"])]
        all: bool,

        /// Clear the session snapshot cache
        #[arg(long, action = ArgAction::SetTrue)]
        cache: bool,

        /// Clear stored credentials
        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,
    },
}

#[derive(Subcommand)]
enum TrackCommands {
    /// Add an item to your watchlist
    Add {
        id: u64,
        #[arg(long, default_value = "film")]
        kind: MediaKind,
    },

    /// Mark an item seen with a rating (1-10); leaves the watchlist if present
    Seen {
        id: u64,
        #[arg(long, default_value = "film")]
        kind: MediaKind,
        #[arg(long)]
        rating: u8,
    },

    /// Change the rating of an item you have already seen
    Rate {
        id: u64,
        #[arg(long)]
        rating: u8,
    },

    /// Remove an item from your watchlist or seen list
    Remove { id: u64 },

    /// Hide an item so it never shows up in search or recommendations
    Hide {
        id: u64,
        #[arg(long, default_value = "film")]
        kind: MediaKind,
    },

    /// Restore a hidden item to the untracked state
    Restore { id: u64 },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks sensitive data)
    Show {
        /// Show full configuration including masked secrets
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Configure the media catalog API key
    Catalog {
        /// Catalog API key (if not provided, will prompt)
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Configure the identity provider and document store endpoints
    Identity {
        /// Identity client id (if not provided, will prompt)
        #[arg(long)]
        client_id: Option<String>,
    },

    /// Edit your stored preferences (favorite genres, minimum rating)
    Prefs,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.clone())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Login => login::run_login(&output).await,
        Commands::Logout => login::run_logout(&output).await,
        Commands::Search {
            query,
            kind,
            all,
            pages,
            include_tracked,
        } => search::run_search(query.join(" "), kind, all, pages, include_tracked, &output).await,
        Commands::Lists {
            list,
            title,
            genre,
            follow,
        } => lists::run_lists(list, title, genre, follow, &output).await,
        Commands::Track { cmd } => match cmd {
            TrackCommands::Add { id, kind } => track::run_add(id, kind, &output).await,
            TrackCommands::Seen { id, kind, rating } => {
                track::run_seen(id, kind, rating, &output).await
            }
            TrackCommands::Rate { id, rating } => track::run_rate(id, rating, &output).await,
            TrackCommands::Remove { id } => track::run_remove(id, &output).await,
            TrackCommands::Hide { id, kind } => track::run_hide(id, kind, &output).await,
            TrackCommands::Restore { id } => track::run_restore(id, &output).await,
        },
        Commands::Recommend {
            kind,
            genres,
            from,
            to,
            limit,
        } => recommend::run_recommend(kind, genres, from, to, limit, &output).await,
        Commands::Detail { id, kind } => detail::run_detail(id, kind, &output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &output).await
        }
        Commands::Clear {
            all,
            cache,
            credentials,
        } => clear::run_clear(all, cache, credentials, &output).await,
    }
}
