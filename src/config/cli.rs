use crate::domain::model::{Category, Condition, Direction, ProposalStatus};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "ad-exchange")]
#[command(about = "A small barter board: post ads and trade exchange proposals")]
pub struct CliConfig {
    #[arg(long, default_value = "./data", help = "Directory holding the state file")]
    pub data_dir: String,

    #[arg(long, help = "Acting user id")]
    pub user: u64,

    #[arg(long, help = "Optional TOML configuration file (overrides --data-dir)")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Publish a new ad owned by the acting user
    PostAd {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        category: Category,
        #[arg(long)]
        condition: Condition,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Replace the editable fields of an ad you own
    EditAd {
        id: u64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        category: Category,
        #[arg(long)]
        condition: Condition,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Delete an ad you own
    RemoveAd { id: u64 },
    /// Browse the ad catalog
    Ads {
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        condition: Option<Condition>,
        #[arg(long, help = "Match against title and description")]
        search: Option<String>,
        #[arg(long, help = "List only your own ads")]
        mine: bool,
    },
    /// Propose exchanging one of your ads for another user's ad
    Propose {
        #[arg(long, help = "Your ad offered in the exchange")]
        sender: u64,
        #[arg(long, help = "The ad you want in return")]
        receiver: u64,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Accept or reject a proposal aimed at one of your ads
    Respond {
        id: u64,
        #[arg(long)]
        decision: ProposalStatus,
    },
    /// List proposals you sent or received
    Proposals {
        #[arg(long, default_value = "sent")]
        direction: Direction,
        #[arg(long)]
        status: Option<ProposalStatus>,
        #[arg(long, help = "Write the listing to a CSV file instead of stdout")]
        export: Option<String>,
    },
}
