use blogcms::model::PostStatus;
use blogcms::query::SortOrder;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "blogcms",
    bin_name = "blogcms",
    version,
    about = "Local-first blog content manager",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to BLOGCMS_DATA_DIR, then the OS data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Draft,
    Published,
}

impl From<StatusArg> for PostStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Draft => PostStatus::Draft,
            StatusArg::Published => PostStatus::Published,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum SortArg {
    #[default]
    Newest,
    Oldest,
    Title,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Newest => SortOrder::Newest,
            SortArg::Oldest => SortOrder::Oldest,
            SortArg::Title => SortOrder::Title,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List posts, newest first
    #[command(alias = "ls", display_order = 1)]
    List(ListArgs),

    /// Show a single post
    #[command(alias = "v", display_order = 2)]
    View {
        /// Post id
        id: String,
    },

    /// Create a post (content is read from stdin when --content is absent)
    #[command(alias = "n", display_order = 3)]
    Create {
        /// Post title
        #[arg(default_value = "")]
        title: String,

        #[command(flatten)]
        fields: PostFields,
    },

    /// Change fields of an existing post
    #[command(alias = "e", display_order = 4)]
    Edit {
        /// Post id
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        #[command(flatten)]
        fields: PostFields,
    },

    /// Delete one or more posts
    #[command(alias = "rm", display_order = 5)]
    Delete {
        /// Post ids
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Table of every post, for bulk management
    #[command(display_order = 6)]
    Manage {
        /// Search title and content
        #[arg(short, long)]
        search: Option<String>,

        /// Only posts with this status
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },

    /// Manage categories
    #[command(subcommand)]
    #[command(alias = "cat", display_order = 10)]
    Category(CategoryCommands),

    /// Post and category counts
    #[command(display_order = 20)]
    Stats,

    /// Show or change blog settings
    #[command(subcommand)]
    #[command(display_order = 21)]
    Settings(SettingsCommands),

    /// Write all data as JSON
    #[command(display_order = 30)]
    Export {
        /// Output file (stdout when absent)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace posts and categories with an export file
    #[command(display_order = 31)]
    Import {
        /// Export file to read
        path: PathBuf,
    },

    /// Remove all data and start over
    #[command(display_order = 32)]
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct ListArgs {
    /// Search title, content, excerpt and tags
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category id or name
    #[arg(short, long)]
    pub category: Option<String>,

    /// Only posts with this status
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,

    /// Only posts carrying this tag
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Sort order
    #[arg(long, value_enum, default_value_t = SortArg::Newest)]
    pub sort: SortArg,

    /// Page number, starting at 1
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Posts per page (defaults to the postsPerPage setting)
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Post fields shared by `create` and `edit`. Absent flags keep the current value.
#[derive(Args, Debug, Default, Clone)]
pub struct PostFields {
    /// URL slug (derived from the title when empty)
    #[arg(long)]
    pub slug: Option<String>,

    /// Category id or name ("" for none)
    #[arg(short, long)]
    pub category: Option<String>,

    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,

    /// Short summary shown in listings
    #[arg(long)]
    pub excerpt: Option<String>,

    /// HTML content
    #[arg(long)]
    pub content: Option<String>,

    /// Comma separated tags
    #[arg(long)]
    pub tags: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List categories with post counts
    #[command(alias = "ls")]
    List,

    /// Create a category
    Add {
        name: String,

        #[arg(short, long)]
        description: Option<String>,

        /// Hex color, e.g. #3b82f6 (random when absent)
        #[arg(long)]
        color: Option<String>,
    },

    /// Change a category
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a category; its posts become uncategorized
    #[command(alias = "rm")]
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Print current settings
    Show,

    /// Change one setting (postsPerPage, defaultStatus, autoSave, theme)
    Set { key: String, value: String },
}
