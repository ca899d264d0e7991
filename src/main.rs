use anyhow::Context;
use review_flattener::{logging, pipeline, Settings};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let root = std::env::current_dir().context("cannot determine working directory")?;
    let settings = Settings::load(&root).context("failed to load settings")?;
    let _guard = logging::init(settings.log_path().as_deref(), "parse_reviews.log");

    let report = pipeline::run(&settings)?;

    if let Some(parquet) = &report.parquet {
        println!("💾 Wrote Parquet mirror to {}", parquet.display());
    }
    println!("Saved {} reviews to {}", report.written, report.output.display());

    Ok(())
}
