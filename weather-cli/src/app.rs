use weather_core::{Config, Icon, Panel, Sources, provider::sources_from_config};

use crate::render;

/// Everything gathered for one render, plus which sources had to fall back.
#[derive(Debug)]
pub struct Gathered {
    pub panel: Panel,
    pub icon: Icon,
    pub unavailable: Vec<&'static str>,
}

/// Resolve location, fetch the forecast, build the panel, load its icon. In that order.
pub async fn gather(sources: &Sources, icon_template: &str) -> Gathered {
    let location = sources.location.resolve().await;
    let (lat, lon) = (location.value().latitude, location.value().longitude);

    let forecast = sources.forecast.fetch(lat, lon).await;
    let panel = Panel::compose(location.value(), forecast.value(), icon_template);

    let icon = sources.icon.load(&panel.icon_url).await;

    let unavailable = [
        ("location", location.is_live()),
        ("forecast", forecast.is_live()),
        ("icon", icon.is_live()),
    ]
    .into_iter()
    .filter_map(|(name, live)| (!live).then_some(name))
    .collect();

    Gathered { panel, icon: icon.into_value(), unavailable }
}

/// Gather once and draw the panel to the terminal.
pub async fn run(config: &Config) -> anyhow::Result<()> {
    let sources = sources_from_config(config)?;
    let gathered = gather(&sources, &config.icon_url_template).await;

    if !gathered.unavailable.is_empty() {
        tracing::warn!(
            unavailable = ?gathered.unavailable,
            "rendering with fallback data"
        );
    }

    render::render(&gathered.panel, &gathered.icon)?;
    Ok(())
}
