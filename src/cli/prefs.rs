use anyhow::Result;
use recipebook::{config::Config, preferences::Theme};

pub async fn prefs(config: Config, locale: Option<String>, theme: Option<Theme>) -> Result<()> {
    let store = super::preference_store(&config);
    let mut preferences = store.load().await?;

    if locale.is_some() || theme.is_some() {
        if let Some(locale) = locale {
            preferences.locale = locale;
        }
        if let Some(theme) = theme {
            preferences.theme = theme;
        }
        store.save(&preferences).await?;
    }

    println!("locale: {}", preferences.locale);
    println!("theme: {}", preferences.theme);

    Ok(())
}
