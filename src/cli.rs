use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "lazygift", version, about = "TUI for browsing gift storefront themes")]
pub struct Args {
    /// Theme key to open directly (e.g., "birthday")
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Storefront API base URL, overriding the configured one
    #[arg(long)]
    pub api_url: Option<String>,
}
