use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch a page and print the extracted signals
    Extract {
        /// a url
        url: String,
    },

    /// Fetch a page and summarize it
    Summarize {
        /// a url
        url: String,
    },

    /// Suggest tags for a page
    SuggestTags {
        /// a url
        url: String,

        /// Bookmark title, overrides the fetched one
        #[clap(short, long)]
        title: Option<String>,

        /// Bookmark description, overrides the fetched one
        #[clap(short, long)]
        description: Option<String>,

        /// Tags the bookmark already has, comma separated
        #[clap(short, long)]
        existing: Option<String>,

        /// Include tag weights in the output
        #[clap(long, default_value = "false")]
        scores: bool,
    },

    /// Find stored bookmarks similar to a page
    Recommend {
        /// a url
        url: String,

        /// Bookmark title; the page is not fetched when title or description is given
        #[clap(short, long)]
        title: Option<String>,

        /// Bookmark description
        #[clap(short, long)]
        description: Option<String>,

        /// Only compare against bookmarks of this owner
        #[clap(short, long)]
        owner: Option<u64>,

        /// Maximum number of recommendations
        #[clap(short, long)]
        limit: Option<usize>,
    },
}
