use clap::Parser;
use hltb::{
    api::{HowLongToBeat, KeyCache, ReqwestTransport, HLTB_ORIGIN},
    Tracing,
};

/// HowLongToBeat lookup utility.
#[derive(Parser)]
struct Opts {
    /// Game title to search for.
    #[clap(short, long)]
    search: Option<String>,

    /// Results page to return.
    #[clap(long, default_value = "1")]
    page: u64,

    /// Walk all result pages instead of a single one.
    #[clap(long)]
    all: bool,

    /// HowLongToBeat id of the game whose detail page to scrape.
    #[clap(long, default_value = "0")]
    id: u64,

    /// Site origin, useful against a local mirror.
    #[clap(long, default_value = HLTB_ORIGIN)]
    origin: String,
}

/// Searches HowLongToBeat by title or scrapes a game's detail page and prints
/// the result as JSON.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    Tracing::setup("utils/search_hltb")?;

    let opts: Opts = Opts::parse();
    let hltb = HowLongToBeat::with_origin(
        Box::new(ReqwestTransport::new()?),
        KeyCache::new(),
        &opts.origin,
    )
    .await?;

    let serialized = match opts.search {
        Some(title) if opts.all => serde_json::to_string_pretty(&hltb.search_all(&title).await?)?,
        Some(title) => serde_json::to_string_pretty(&hltb.search(&title, opts.page).await?)?,
        None => serde_json::to_string_pretty(&hltb.get(opts.id).await?)?,
    };
    println!("{serialized}");

    Ok(())
}
