use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::pages::PageSource;

#[derive(Parser, Debug)]
#[command(
    name = "formfill",
    version,
    about = "Detect fillable form fields in saved web pages and fill them"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// RON settings file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the fields detected on a page as JSON
    Scan {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Write a descriptor-id → value mapping into a page
    Fill {
        #[command(flatten)]
        page: PageArgs,

        /// JSON object mapping field ids to values
        #[arg(long)]
        mapping: PathBuf,
    },
    /// Scan, ask the matcher for values, then fill
    Autofill {
        #[command(flatten)]
        page: PageArgs,

        /// Matcher base URL
        #[arg(long)]
        matcher: Option<String>,

        /// User id sent to the matcher
        #[arg(long)]
        user_id: Option<String>,

        /// Deadline for the matcher call
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// Saved HTML of the top-level document
    pub page: PathBuf,

    /// Address the page was saved from
    #[arg(long)]
    pub url: Option<String>,

    /// Saved HTML of a scriptable sub-frame (repeatable)
    #[arg(long = "frame")]
    pub frames: Vec<PathBuf>,

    /// URL of a sub-frame that refused injection (repeatable)
    #[arg(long = "denied-frame")]
    pub denied_frames: Vec<String>,
}

impl From<PageArgs> for PageSource {
    fn from(args: PageArgs) -> Self {
        Self {
            page: args.page,
            url: args.url,
            frames: args.frames,
            denied_frames: args.denied_frames,
        }
    }
}
