use leptos::prelude::*;
use thaw::{MessageBar, MessageBarIntent};

/// Inline error shown in place of a component that cannot work.
#[component]
pub fn ErrorView(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="error-container" role="alert">
            <MessageBar intent=MessageBarIntent::Error>{message}</MessageBar>
        </div>
    }
}
