use leptos::prelude::*;
use leptos::server;

/// Browser key for the Maps JavaScript API, `None` when not configured.
#[server]
pub async fn get_maps_api_key() -> Result<Option<String>, ServerFnError> {
    let config = crate::config::maps_config();
    if config.api_key.is_none() {
        tracing::warn!(
            "{} is not set; maps will render their configuration error",
            crate::config::MAPS_API_KEY_VAR
        );
    }
    Ok(config.api_key)
}
