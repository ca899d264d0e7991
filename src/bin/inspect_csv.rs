use anyhow::Context;
use review_flattener::inspect::{Frame, RenderOptions};
use review_flattener::{logging, Settings};
use tracing::info;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let root = std::env::current_dir().context("cannot determine working directory")?;
    let settings = Settings::load(&root).context("failed to load settings")?;
    let _guard = logging::init(settings.log_path().as_deref(), "inspect_csv.log");

    let path = settings.inspect_path();
    let mut frame = Frame::from_path(&path)?;

    let dropped = frame.drop_columns(&settings.drop_columns);
    if !dropped.is_empty() {
        info!(?dropped, "dropped noise columns");
    }

    println!("✅ Loaded CSV (cleaned)");
    println!("{}\n", frame.summary_line());

    let opts = RenderOptions {
        max_colwidth: settings.max_colwidth,
        width: settings.display_width,
    };

    println!("First {} reviews:\n", settings.preview_rows);
    println!("{}", frame.head(settings.preview_rows).render(&opts));

    Ok(())
}
