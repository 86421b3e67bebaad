//! Gift Registry Component
//!
//! Loads the list once on mount, shows availability counts, the gift grid
//! and the reservation dialog.

use leptos::prelude::*;
use leptos::task::spawn_local;
use invite_core::GiftItem;

use crate::components::{GiftCard, ReserveDialog};
use crate::context::use_app_context;
use crate::store::{use_page_store, PageStateStoreFields};

#[component]
pub fn GiftRegistry() -> impl IntoView {
    let ctx = use_app_context();
    let page = use_page_store();

    let (reserve_name, set_reserve_name) = signal(String::new());

    let refresh = move || {
        let registry = ctx.registry();
        spawn_local(async move {
            let _ = registry.refresh().await;
        });
    };

    // Initial load
    Effect::new(move |_| refresh());

    let on_reserve = Callback::new(move |gift: GiftItem| {
        if ctx.registry().begin_reservation(&gift) {
            set_reserve_name.set(String::new());
        }
    });

    let loading = move || page.registry().get().loading;
    // The mount effect runs after first paint; until a fetch finishes the
    // list is still "loading", not empty
    let loaded = move || page.registry().get().loaded;
    let failed = move || page.registry().get().error.is_some();
    let gifts = move || page.registry().get().gifts;

    view! {
        <div class="registry">
            <h2 class="section-title">"Lista de Regalos"</h2>
            <p class="registry-intro">
                "Si deseas obsequiarnos algo, aquí tienes algunas ideas. Reserva el regalo para que nadie más lo repita."
            </p>

            <p class="registry-counts">
                {move || {
                    let snapshot = page.registry().get();
                    format!(
                        "Disponibles: {} · Reservados: {}",
                        snapshot.available_count(),
                        snapshot.reserved_count(),
                    )
                }}
            </p>

            {move || page.registry().get().error.map(|err| view! {
                <div class="error-banner">
                    <span>{err.to_string()}</span>
                    <button type="button" class="retry-btn" prop:disabled=loading on:click=move |_| refresh()>
                        "Reintentar"
                    </button>
                </div>
            })}

            <Show when=move || (loading() || !loaded()) && gifts().is_empty()>
                <p class="registry-loading">"Cargando regalos..."</p>
            </Show>

            <Show when=move || loaded() && !loading() && gifts().is_empty() && !failed()>
                <p class="registry-empty">"Aún no hay regalos en la lista."</p>
            </Show>

            <div class="gift-grid">
                <For
                    each=gifts
                    key=|gift| (gift.id.clone(), gift.status)
                    children=move |gift| view! { <GiftCard gift=gift on_reserve=on_reserve /> }
                />
            </div>

            <ReserveDialog name=reserve_name set_name=set_reserve_name />
        </div>
    }
}
