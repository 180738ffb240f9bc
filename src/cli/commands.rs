use crate::app::{AppContext, Result};
use crate::domain::FeedSource;
use crate::store::Store;
use crate::sync::PassReport;

pub async fn sync_once(ctx: &AppContext) -> Result<PassReport> {
    let scheduler = ctx.scheduler();

    if !scheduler.registry().refresh() {
        println!("No configured sources");
        return Ok(PassReport::default());
    }

    println!("Syncing {} sources...", scheduler.registry().len());
    let report = scheduler.run_pass().await;
    println!("Sync complete: {}", report);
    Ok(report)
}

pub fn add_source(ctx: &AppContext, url: &str, rule: &str) -> Result<i64> {
    let id = ctx.store.create_source(url, rule)?;
    println!("Added source #{}: {}", id, url);
    Ok(id)
}

pub fn list_sources(ctx: &AppContext) -> Result<()> {
    let records = ctx.store.list_sources()?;

    if records.is_empty() {
        println!("No sources");
        return Ok(());
    }

    for record in records {
        match FeedSource::from_record(&record) {
            Ok(source) => println!("#{} {}\n  rule: {}", source.id, source.url, source.rule),
            Err(_) => println!("#{} {}\n  rule: (none, skipped)", record.id, record.url),
        }
    }

    Ok(())
}

pub fn list_news(ctx: &AppContext, title: Option<&str>, offset: usize, count: usize) -> Result<()> {
    let news = match title {
        Some(title) => ctx.store.get_news_with_title(title, offset, count)?,
        None => ctx.store.get_news(offset, count)?,
    };

    if news.is_empty() {
        println!("No news");
        return Ok(());
    }

    for n in news {
        println!("{:>6}  {}  ({})", n.id, n.title, n.source);
    }

    Ok(())
}

pub fn show_news(ctx: &AppContext, id: i64) -> Result<()> {
    let detail = ctx.store.get_news_detail(id)?;
    let payload = detail.payload()?;

    println!("{}\n  from {}", detail.title, detail.source);
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
