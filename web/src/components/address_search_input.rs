use std::rc::Rc;

use leptos::{html::Input, prelude::*};
use shared_types::{LatLng, SelectedAddress};

use crate::{
    components::address_search_state::{AddressSearchState, FieldChange, SearchFieldState},
    provider::{google::GoogleMaps, ProviderReadiness},
};

#[component]
pub fn AddressSearchInput(
    #[prop(into)] api_key: Signal<Option<String>>,
    #[prop(into)] readiness: Signal<ProviderReadiness>,
    /// Text typed so far.
    #[prop(into)]
    value: Signal<String>,
    /// Last picked address; shown instead of `value` when set.
    #[prop(optional, into)]
    selected_address: MaybeProp<String>,
    /// Validation message rendered under the field.
    #[prop(optional, into)]
    error: MaybeProp<String>,
    #[prop(into)] on_change: Callback<FieldChange>,
    #[prop(into)] on_address_select: Callback<(String, LatLng)>,
    #[prop(optional, into)] name: Option<String>,
    #[prop(optional, into)] placeholder: Option<String>,
) -> impl IntoView {
    let name = name.unwrap_or_else(|| "address".to_string());
    let placeholder = placeholder.unwrap_or_else(|| "Search for an address".to_string());

    let field_state =
        Memo::new(move |_| SearchFieldState::resolve(api_key.read().as_deref(), &readiness.read()));
    let disabled_placeholder = Memo::new(move |_| field_state.with(SearchFieldState::disabled_placeholder));

    let input_ref = NodeRef::<Input>::new();
    let search_state = StoredValue::new_local(AddressSearchState::new(GoogleMaps));

    let field_name = name.clone();
    let on_select: Rc<dyn Fn(SelectedAddress)> = Rc::new(move |selected: SelectedAddress| {
        on_address_select.run((selected.formatted_address.clone(), selected.coordinates));
        // Form libraries that only watch change events still see the pick.
        on_change.run(FieldChange {
            name: field_name.clone(),
            value: selected.formatted_address,
        });
    });

    Effect::new(move |_| {
        let ready = field_state.get() == SearchFieldState::Ready;
        let field = input_ref.get();
        search_state.update_value(|search| match field {
            Some(field) if ready => search.attach(&field, on_select.clone()),
            _ => search.teardown(),
        });
    });

    on_cleanup(move || {
        search_state.try_update_value(|search| search.dispose());
    });

    let displayed = move || {
        selected_address
            .get()
            .filter(|address| !address.is_empty())
            .unwrap_or_else(|| value.get())
    };

    view! {
        <div class="address-search">
            {move || match disabled_placeholder.get() {
                Some(text) => view! {
                    <input
                        type="text"
                        class="address-search-input"
                        name=name.clone()
                        placeholder=text
                        disabled=true
                    />
                }.into_any(),
                None => {
                    let field_name = name.clone();
                    view! {
                        <input
                            type="text"
                            class="address-search-input"
                            name=name.clone()
                            placeholder=placeholder.clone()
                            autocomplete="off"
                            prop:value=displayed
                            on:input=move |ev| {
                                on_change.run(FieldChange {
                                    name: field_name.clone(),
                                    value: event_target_value(&ev),
                                });
                            }
                            node_ref=input_ref
                        />
                    }.into_any()
                }
            }}
            {move || error.get().filter(|message| !message.is_empty()).map(|message| view! {
                <p class="address-search-error">{message}</p>
            })}
        </div>
    }
}
