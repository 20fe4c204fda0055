use leptos::prelude::*;
use shared_types::{LatLng, LocationCategory, LocationRecord};

use crate::{
    components::{
        error::ErrorView, loading::LoadingView, AddressSearchInput, FieldChange,
    },
    provider::loader::use_maps_loader,
    server::get_maps_api_key,
    views::map::location_map::LocationMap,
};

const DESTINATION_RADIUS: f64 = 1500.0;

fn seed_locations() -> Vec<LocationRecord> {
    vec![
        LocationRecord {
            category: LocationCategory::ParkingLocation,
            address: "24 MG Road, Ashok Nagar, Bengaluru, Karnataka".to_string(),
            coordinates: LatLng::new(12.9753, 77.6069),
            number_of_spots: Some(40),
            hourly_price: Some(30.0),
            radius: None,
        },
        LocationRecord {
            category: LocationCategory::ParkingLocation,
            address: "Brigade Road, Shanthala Nagar, Bengaluru, Karnataka".to_string(),
            coordinates: LatLng::new(12.9716, 77.6070),
            number_of_spots: Some(18),
            hourly_price: Some(45.0),
            radius: None,
        },
        LocationRecord {
            category: LocationCategory::Admin,
            address: "100 Feet Road, Indiranagar, Bengaluru, Karnataka".to_string(),
            coordinates: LatLng::new(12.9784, 77.6408),
            number_of_spots: Some(6),
            hourly_price: None,
            radius: None,
        },
    ]
}

#[component]
pub fn HomePage() -> impl IntoView {
    let api_key = Resource::new(|| (), |_| async move { get_maps_api_key().await });

    view! {
        <div class="home-container">
            <h1>"Find parking near your destination"</h1>
            <Suspense fallback=|| view! { <LoadingView message="Loading configuration..." /> }>
                {move || match api_key.get() {
                    Some(Ok(key)) => view! { <MapsPanel api_key=key /> }.into_any(),
                    Some(Err(err)) => {
                        leptos::logging::error!("Failed to fetch maps configuration: {}", err);
                        view! { <ErrorView message="Could not load map configuration." /> }.into_any()
                    }
                    None => view! { <LoadingView message="Loading configuration..." /> }.into_any(),
                }}
            </Suspense>
        </div>
    }
}

/// Feeds picks from the search input into the map as destinations.
#[component]
fn MapsPanel(api_key: Option<String>) -> impl IntoView {
    let api_key = Signal::derive(move || api_key.clone());
    let readiness = use_maps_loader(api_key);

    let locations = RwSignal::new(seed_locations());
    let payload = Signal::derive(move || serde_json::to_string(&*locations.read()).ok());

    let typed = RwSignal::new(String::new());
    let selected = RwSignal::new(String::new());

    let on_change = Callback::new(move |change: FieldChange| {
        // Typing over a picked address drops the pick.
        if change.value != selected.get_untracked() {
            selected.set(String::new());
        }
        typed.set(change.value);
    });

    let search_error = Signal::derive(move || {
        (!typed.read().trim().is_empty() && selected.read().is_empty())
            .then(|| "Pick an address from the suggestions".to_string())
    });

    let on_address_select = Callback::new(move |(address, coordinates): (String, LatLng)| {
        leptos::logging::log!("Selected {} at ({}, {})", address, coordinates.lat, coordinates.lng);
        selected.set(address.clone());
        locations.update(|records| {
            records.push(LocationRecord::destination(
                address,
                coordinates,
                Some(DESTINATION_RADIUS),
            ));
        });
    });

    view! {
        <div class="maps-panel">
            <AddressSearchInput
                api_key=api_key
                readiness=readiness
                value=typed
                selected_address=Signal::derive(move || Some(selected.get()))
                error=search_error
                on_change=on_change
                on_address_select=on_address_select
                name="destination"
                placeholder="Where are you going?"
            />
            <LocationMap locations=payload api_key=api_key readiness=readiness />
        </div>
    }
}
