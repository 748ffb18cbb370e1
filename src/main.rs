use pixelplow::{load_config, DesktopWindow, Engine, PixelPlowResult, UiState};

fn run() -> PixelPlowResult<()> {
    let config = load_config()?;
    let window = DesktopWindow::find(&config.window_title)?;
    let mut engine = Engine::new(window, &config)?;

    engine.navigate_to(UiState::Newspaper)?;
    let listings = engine.extract_listings()?;
    for ad in &listings {
        tracing::info!(
            item = ad.item.name,
            quantity = ad.quantity,
            price = ad.price,
            fair = ad.item.expected_price(ad.quantity),
            "listing"
        );
    }
    engine.back()?;

    engine.navigate_to(UiState::Shop)?;
    engine.back()?;

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        tracing::error!(error = %e, "engine run failed");
        std::process::exit(1);
    }
}
