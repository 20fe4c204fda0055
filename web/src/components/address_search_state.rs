use std::rc::Rc;

use shared_types::{LatLng, SelectedAddress};

use crate::provider::{
    LatLngBounds, MapProvider, PlaceResult, ProviderReadiness, SearchOptions,
};

/// Suggestions are limited to Karnataka, India.
pub const SEARCH_BOUNDS: LatLngBounds = LatLngBounds {
    south_west: LatLng {
        lat: 11.5,
        lng: 74.0,
    },
    north_east: LatLng {
        lat: 18.5,
        lng: 78.5,
    },
};
pub const SEARCH_COUNTRY: &str = "in";
pub const SEARCH_FIELDS: &[&str] = &["formatted_address", "geometry"];

pub const MISSING_KEY_PLACEHOLDER: &str = "Address search unavailable: API key missing";
pub const LOADING_PLACEHOLDER: &str = "Loading address search...";

pub fn search_options() -> SearchOptions {
    SearchOptions {
        bounds: SEARCH_BOUNDS,
        strict_bounds: true,
        country: SEARCH_COUNTRY,
        fields: SEARCH_FIELDS,
    }
}

/// Shape of a form field change, whether typed or synthesized from a pick.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchFieldState {
    MissingCredential,
    LoadFailed(String),
    Loading,
    Ready,
}

impl SearchFieldState {
    pub fn resolve(api_key: Option<&str>, readiness: &ProviderReadiness) -> Self {
        if api_key.map_or(true, |key| key.trim().is_empty()) {
            return SearchFieldState::MissingCredential;
        }
        match readiness {
            ProviderReadiness::Failed(reason) => SearchFieldState::LoadFailed(reason.clone()),
            ProviderReadiness::Loading => SearchFieldState::Loading,
            ProviderReadiness::Ready => SearchFieldState::Ready,
        }
    }

    /// Placeholder of the disabled field, `None` once the field is usable.
    pub fn disabled_placeholder(&self) -> Option<String> {
        match self {
            SearchFieldState::MissingCredential => Some(MISSING_KEY_PLACEHOLDER.to_string()),
            SearchFieldState::LoadFailed(reason) => {
                Some(format!("Address search failed to load: {reason}"))
            }
            SearchFieldState::Loading => Some(LOADING_PLACEHOLDER.to_string()),
            SearchFieldState::Ready => None,
        }
    }
}

/// Accepts a picked place only when it has both an address and a location.
pub fn resolve_selection(place: PlaceResult) -> Option<SelectedAddress> {
    let address = place
        .formatted_address
        .filter(|address| !address.trim().is_empty());
    match (address, place.location) {
        (Some(formatted_address), Some(coordinates)) => Some(SelectedAddress {
            formatted_address,
            coordinates,
        }),
        (address, location) => {
            leptos::logging::warn!(
                "Discarding incomplete place selection (address: {}, location: {})",
                address.is_some(),
                location.is_some()
            );
            None
        }
    }
}

/// Search behavior and listener owned by one mounted input.
pub struct AddressSearchState<P: MapProvider> {
    provider: P,
    behavior: Option<P::SearchBehavior>,
    listener: Option<P::Listener>,
    disposed: bool,
}

impl<P: MapProvider> AddressSearchState<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            behavior: None,
            listener: None,
            disposed: false,
        }
    }

    #[cfg(test)]
    pub fn is_attached(&self) -> bool {
        self.behavior.is_some()
    }

    /// Replaces any previous behavior with a fresh one on `field`.
    pub fn attach(&mut self, field: &P::Field, on_select: Rc<dyn Fn(SelectedAddress)>) {
        if self.disposed {
            return;
        }
        self.teardown();

        let behavior = match self.provider.create_search_behavior(field, &search_options()) {
            Ok(behavior) => behavior,
            Err(err) => {
                leptos::logging::error!("Failed to attach address suggestions: {}", err);
                return;
            }
        };

        let listener = self.provider.on_place_changed(
            &behavior,
            Box::new(move |place| {
                if let Some(selected) = resolve_selection(place) {
                    on_select(selected);
                }
            }),
        );
        self.behavior = Some(behavior);
        match listener {
            Ok(listener) => self.listener = Some(listener),
            Err(err) => leptos::logging::error!("Failed to listen for place selection: {}", err),
        }
    }

    pub fn teardown(&mut self) {
        if let Some(listener) = self.listener.take() {
            self.provider.remove_listener(listener);
        }
        if let Some(behavior) = self.behavior.take() {
            self.provider.clear_search_behavior(behavior);
        }
    }

    pub fn dispose(&mut self) {
        self.teardown();
        self.disposed = true;
    }
}
