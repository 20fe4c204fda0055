use leptos::{html::Div, prelude::*};

use crate::{
    components::{error::ErrorView, loading::LoadingView},
    provider::{google::GoogleMaps, ProviderReadiness},
    views::map::map_state::{LocationMapState, MapPlaceholder, MapRenderState},
};

#[component]
pub fn LocationMap(
    /// JSON array of location records.
    #[prop(into)]
    locations: Signal<Option<String>>,
    #[prop(into)] api_key: Signal<Option<String>>,
    #[prop(into)] readiness: Signal<ProviderReadiness>,
) -> impl IntoView {
    let render_state = Memo::new(move |_| {
        MapRenderState::resolve(
            locations.read().as_deref(),
            api_key.read().as_deref(),
            &readiness.read(),
        )
    });
    // Only flips when the placeholder changes, so the canvas div survives data updates.
    let placeholder = Memo::new(move |_| render_state.with(MapRenderState::placeholder));

    let canvas_ref = NodeRef::<Div>::new();
    let map_state = StoredValue::new_local(LocationMapState::new(GoogleMaps));

    Effect::new(move |_| {
        let state = render_state.get();
        let container = canvas_ref.get();
        map_state.update_value(|map| match (state, container) {
            (MapRenderState::Ready(records), Some(container)) => {
                map.render(&container.into(), &records);
            }
            _ => map.release(),
        });
    });

    on_cleanup(move || {
        map_state.try_update_value(|map| map.dispose());
    });

    view! {
        <div class="location-map">
            {move || match placeholder.get() {
                None => view! {
                    <div class="location-map-canvas" style="height: 60vh; width: 100%;" node_ref=canvas_ref></div>
                }.into_any(),
                Some(MapPlaceholder::NoLocations) => view! {
                    <div class="location-map-empty">
                        <p>{MapPlaceholder::NoLocations.message()}</p>
                    </div>
                }.into_any(),
                Some(MapPlaceholder::Loading) => view! {
                    <div class="location-map-loading">
                        <LoadingView message=MapPlaceholder::Loading.message() />
                    </div>
                }.into_any(),
                Some(error) => view! {
                    <ErrorView message=error.message() />
                }.into_any(),
            }}
        </div>
    }
}
