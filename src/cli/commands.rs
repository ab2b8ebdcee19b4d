use crate::storage::BackendKind;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "smile")]
#[command(
    author,
    version,
    about = "Capture and revisit the moments that made you smile"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs (rotated daily); without PATH, into the journal's logs/ directory
    #[arg(long, value_name = "PATH", global = true, num_args = 0..=1)]
    pub log_file: Option<Option<String>>,

    /// REST backend base URL (overrides rest.base_url)
    #[arg(long, global = true, env = "MADEMESMILE_BASE_URL")]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a journal in the current directory
    Init {
        /// Where moments are stored
        #[arg(short, long, value_enum, default_value = "local")]
        backend: BackendArg,

        /// Firebase project id (document backend)
        #[arg(long)]
        project_id: Option<String>,

        /// Data directory for on-device state
        #[arg(long)]
        path: Option<String>,
    },

    /// Capture a new moment
    #[command(visible_alias = "c", visible_alias = "new")]
    Create {
        /// What made you smile
        content: String,

        /// Category id (family, friends, work, random)
        #[arg(short, long)]
        category: Option<String>,

        /// Collection to file the moment under
        #[arg(long)]
        collection: Option<String>,

        /// Tags to add
        #[arg(long)]
        tag: Vec<String>,

        /// How you felt
        #[arg(long)]
        mood: Option<String>,

        /// Photo, video or audio file to attach
        #[arg(short, long)]
        media: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List moments, newest first
    #[command(visible_alias = "ls")]
    List {
        /// Only moments in this category (exact match)
        #[arg(short, long, conflicts_with = "collection")]
        category: Option<String>,

        /// Only moments in this collection (exact match)
        #[arg(long)]
        collection: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single moment
    Show {
        /// Moment ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a moment permanently
    Delete {
        /// Moment ID
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search moments (supports field:pattern and regex:pattern)
    Search {
        /// Search query
        query: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Counts and streaks
    Stats {
        /// Include a heat-map of the last N days (1 to 366)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=366))]
        activity: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List category definitions
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Account and session management
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },

    /// Onboarding flag
    Onboarding {
        #[command(subcommand)]
        action: OnboardingCommands,
    },
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Create an account on the REST backend
    Register {
        /// Display name
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long, env = "MADEMESMILE_PASSWORD", hide_env_values = true)]
        password: String,

        /// Repeat the password (defaults to --password)
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Sign in to the REST backend
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "MADEMESMILE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the signed-in user and token
    Logout,

    /// Show the signed-in user
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Store an externally issued token (e.g. a Firebase ID token)
    UseToken {
        /// Bearer token
        token: String,

        /// User id the token belongs to
        #[arg(long)]
        user_id: String,

        #[arg(long, default_value = "")]
        email: String,
    },
}

#[derive(Subcommand)]
pub enum OnboardingCommands {
    /// Mark onboarding as done
    Complete,
    /// Show whether onboarding is done
    Status,
    /// Forget that onboarding was done
    Reset,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum BackendArg {
    Local,
    Document,
    Rest,
}

impl From<BackendArg> for BackendKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Local => BackendKind::Local,
            BackendArg::Document => BackendKind::Document,
            BackendArg::Rest => BackendKind::Rest,
        }
    }
}
