use ai_news_hub::{ContentHub, DashboardState, FeedItem, ScoredItem, Tab};
use ai_news_hub::vocab::QUICK_TOPICS;
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(name = "ai-news-hub", about = "Aggregate news and social posts for a topic")]
struct Args {
    /// Topic to search for
    #[arg(short, long, default_value = "Artificial Intelligence")]
    query: String,

    /// Minimum relevance score an item needs to be shown
    #[arg(short, long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=3))]
    threshold: u32,

    /// Which view to display
    #[arg(long, value_enum, default_value = "all")]
    tab: Tab,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let hub = ContentHub::from_env();

    let mut state = DashboardState::new(&args.query, hub.vocab().clone());
    state.set_threshold(args.threshold);
    state.set_tab(args.tab);

    info!("Loading content for {:?}", state.query);
    let snapshot = hub.load(&state.query).await;

    let views = snapshot.views(state.threshold, hub.vocab());
    let items = state.view(&views);

    println!("AI ニュースハブ — {}", state.query);
    println!(
        "{} 件を表示中（しきい値 {}、共有リンク {}）",
        items.len(),
        state.threshold,
        state.query_param()
    );
    println!();

    for scored in items {
        print_item(scored);
    }

    if items.is_empty() {
        println!("該当する情報がありません。人気のトピック: {}", QUICK_TOPICS.join(", "));
    }

    Ok(())
}

fn print_item(scored: &ScoredItem) {
    match &scored.item {
        FeedItem::News(news) => {
            println!(
                "[{}] {} — {} ({})",
                scored.score,
                news.title,
                news.source,
                news.published_at.format("%Y-%m-%d %H:%M")
            );
            if !news.snippet.is_empty() {
                println!("    {}", news.snippet);
            }
            println!("    {}", news.link);
        }
        FeedItem::Social(post) => {
            println!(
                "[{}] {} {} · {}",
                scored.score, post.user_name, post.user_handle, post.timestamp
            );
            println!("    {}", post.content);
            println!(
                "    返信 {} / リポスト {} / いいね {} — {}",
                post.replies, post.reposts, post.likes, post.link
            );
        }
    }
}
