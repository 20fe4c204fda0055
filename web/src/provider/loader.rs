use leptos::prelude::*;

use super::ProviderReadiness;

pub const MAPS_SCRIPT_URL: &str = "https://maps.googleapis.com/maps/api/js";
pub const MAPS_SCRIPT_ID: &str = "google-maps-script";
pub const MAPS_LIBRARIES: &[&str] = &["places"];

pub fn maps_script_url(api_key: &str, libraries: &[&str]) -> String {
    let mut url = format!("{}?key={}", MAPS_SCRIPT_URL, urlencoding::encode(api_key));
    if !libraries.is_empty() {
        url.push_str("&libraries=");
        url.push_str(&urlencoding::encode(&libraries.join(",")));
    }
    url
}

/// Loads the Maps JavaScript API once per document and reports its state.
///
/// Stays `Loading` until a non-blank key is available; the components report
/// the missing key themselves.
pub fn use_maps_loader(api_key: Signal<Option<String>>) -> Signal<ProviderReadiness> {
    let readiness = RwSignal::new(ProviderReadiness::Loading);

    #[cfg(not(feature = "ssr"))]
    Effect::new(move |_| {
        let Some(key) = api_key.get().filter(|key| !key.trim().is_empty()) else {
            return;
        };
        if let Err(err) = inject_script(&key, readiness) {
            let message = err
                .as_string()
                .unwrap_or_else(|| "could not add the maps script".to_string());
            leptos::logging::error!("Google Maps loader failed: {}", message);
            readiness.try_set(ProviderReadiness::Failed(message));
        }
    });

    #[cfg(feature = "ssr")]
    let _ = api_key;

    readiness.into()
}

/// Attribute on the script tag recording how its load ended.
pub const SCRIPT_STATE_ATTR: &str = "data-state";
pub const SCRIPT_LOADED: &str = "loaded";
pub const SCRIPT_FAILED: &str = "failed";

pub const LOAD_FAILED_MESSAGE: &str = "Google Maps script failed to load";
pub const MISSING_PLACES_MESSAGE: &str = "Google Maps script loaded without the places library";

/// Readiness implied by a finished script tag, `None` while it is pending.
pub fn settled_readiness(script_state: Option<&str>, library_loaded: bool) -> Option<ProviderReadiness> {
    match script_state {
        Some(SCRIPT_FAILED) => Some(ProviderReadiness::Failed(LOAD_FAILED_MESSAGE.to_string())),
        Some(SCRIPT_LOADED) if library_loaded => Some(ProviderReadiness::Ready),
        Some(SCRIPT_LOADED) => Some(ProviderReadiness::Failed(MISSING_PLACES_MESSAGE.to_string())),
        _ => None,
    }
}

#[cfg(not(feature = "ssr"))]
fn inject_script(
    api_key: &str,
    readiness: RwSignal<ProviderReadiness>,
) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::{closure::Closure, JsCast, JsValue};
    use web_sys::HtmlScriptElement;

    if super::google::library_loaded() {
        readiness.try_set(ProviderReadiness::Ready);
        return Ok(());
    }

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("document is not available"))?;

    let script = match document.get_element_by_id(MAPS_SCRIPT_ID) {
        Some(existing) => {
            let script = existing.dyn_into::<HtmlScriptElement>()?;
            // Its load or error event has already fired; no listener would see it again.
            let state = script.get_attribute(SCRIPT_STATE_ATTR);
            if let Some(settled) =
                settled_readiness(state.as_deref(), super::google::library_loaded())
            {
                readiness.try_set(settled);
                return Ok(());
            }
            script
        }
        None => {
            let script = document
                .create_element("script")?
                .dyn_into::<HtmlScriptElement>()?;
            script.set_id(MAPS_SCRIPT_ID);
            script.set_src(&maps_script_url(api_key, MAPS_LIBRARIES));
            script.set_async(true);
            let parent = document
                .head()
                .map(web_sys::Node::from)
                .or_else(|| document.body().map(web_sys::Node::from))
                .ok_or_else(|| JsValue::from_str("document has no head or body"))?;
            parent.append_child(&script)?;
            script
        }
    };

    let loaded_tag = script.clone();
    let on_load = Closure::once_into_js(move || {
        let _ = loaded_tag.set_attribute(SCRIPT_STATE_ATTR, SCRIPT_LOADED);
        if let Some(state) = settled_readiness(Some(SCRIPT_LOADED), super::google::library_loaded()) {
            readiness.try_set(state);
        }
    });
    let failed_tag = script.clone();
    let on_error = Closure::once_into_js(move || {
        let _ = failed_tag.set_attribute(SCRIPT_STATE_ATTR, SCRIPT_FAILED);
        leptos::logging::error!("{}", LOAD_FAILED_MESSAGE);
        readiness.try_set(ProviderReadiness::Failed(LOAD_FAILED_MESSAGE.to_string()));
    });
    script.add_event_listener_with_callback("load", on_load.unchecked_ref())?;
    script.add_event_listener_with_callback("error", on_error.unchecked_ref())?;
    Ok(())
}
