use anyhow::Result;
use common::Config;
use futures::StreamExt;
use naver_blog::{NaverBlogAPI, PostListQuery};
use std::env;
use std::io::Write;
use summarizer::{FullSummary, Summarizer};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

async fn read_choice() -> Result<String> {
    print!("Select a post (number or title): ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(line.trim().to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    let _ = dotenv::dotenv();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_env()?;
    let api = NaverBlogAPI::new(config.blog.clone())?;

    let outcome = api.fetch_posts(&PostListQuery::from(&config.blog)).await;
    if let Some(notice) = &outcome.notice {
        println!("{}", notice);
    }
    if outcome.posts.is_empty() {
        return Ok(());
    }

    for (i, post) in outcome.posts.iter().enumerate() {
        println!("{:>3}. {}", i + 1, post.to_display_line());
    }

    let choice = match env::args().nth(1) {
        Some(arg) => arg,
        None => read_choice().await?,
    };
    let Some(post) = outcome.posts.select(&choice) else {
        println!("No post matches '{}'", choice);
        return Ok(());
    };
    println!("Selected URL: {}", post.url);

    let text = match naver_blog::fetch_post_text(&api, &post.url).await {
        Ok(text) => text,
        Err(e) => {
            println!("Error: {}", e);
            return Ok(());
        }
    };
    println!("\n=== Body ===\n{}\n", text);

    let summarizer = match Summarizer::from_config(&config.llm) {
        Ok(s) => s,
        Err(e) => {
            warn!("Skipping summary: {}", e);
            return Ok(());
        }
    };
    info!("Summarizing with {}", summarizer.backend_name());

    println!("=== Summary ===");
    let mut fragments = summarizer.stream_summary(&text);
    let mut summary = FullSummary::default();
    let mut stdout = std::io::stdout();
    while let Some(fragment) = fragments.next().await {
        print!("{}", fragment);
        stdout.flush()?;
        summary.push(&fragment);
    }

    // Only a fully drained stream is searched for the comment.
    println!("\n\n=== One-line comment ===\n{}", summary.one_line_comment());

    Ok(())
}
