use lernziel_core::{Credentials, LernzielScraper, StudyParams};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lernziel_core=info")),
        )
        .init();

    let credentials = Credentials::from_env()
        .ok_or("set LERNZIEL_USER and LERNZIEL_PASS to log in")?;

    let term = std::env::args().nth(1).unwrap_or_else(|| "WiSe2019".to_string());
    let study = StudyParams::default().with_term(term);

    let scraper = LernzielScraper::new()?;
    scraper.login(&credentials.user, &credentials.password).await?;

    println!("Loading events for {} ...", study.term);
    let events = scraper.get_events(&study).await?;
    println!("{} events", events.len());
    for event in events.iter().take(5) {
        println!(
            "  [{}] {} {}: {} ({})",
            event.id, event.module, event.week, event.title, event.event_type
        );
    }

    println!("\nLoading learning objectives ...");
    let lernziele = scraper.get_lernziele(&study).await?;
    println!("{} learning objectives", lernziele.len());

    if let Some(first) = lernziele.first() {
        println!("\nFirst objective:\n{}", serde_json::to_string_pretty(first)?);
    }

    Ok(())
}
