//! Reserve Dialog Component
//!
//! Modal asking for the guest's name before reserving a gift.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::store::{use_page_store, PageStateStoreFields};

#[component]
pub fn ReserveDialog(name: ReadSignal<String>, set_name: WriteSignal<String>) -> impl IntoView {
    let ctx = use_app_context();
    let page = use_page_store();

    let dialog = move || page.registry().get().dialog;
    let submitting = move || dialog().is_some_and(|d| d.submitting);
    let can_confirm = move || !submitting() && !name.get().trim().is_empty();

    let on_confirm = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(gift_id) = dialog().map(|d| d.gift_id) else {
            return;
        };
        let registry = ctx.registry();
        let name = name.get_untracked();
        spawn_local(async move {
            // Outcome lands in the dialog state
            let _ = registry.confirm_reservation(&gift_id, &name).await;
        });
    };

    let on_cancel = move |_| {
        ctx.registry().cancel_reservation();
    };

    view! {
        <Show when=move || dialog().is_some()>
            <div class="modal-backdrop" on:click=on_cancel>
                <form
                    class="modal"
                    on:click=|ev| ev.stop_propagation()
                    on:submit=on_confirm
                >
                    <h3>"Reservar regalo"</h3>
                    <p class="modal-gift">{move || dialog().map(|d| d.gift_title).unwrap_or_default()}</p>

                    <label class="field">
                        <span>"Tu nombre"</span>
                        <input
                            type="text"
                            placeholder="Nombre completo"
                            prop:value=move || name.get()
                            prop:disabled=submitting
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                        />
                    </label>

                    {move || dialog().and_then(|d| d.error).map(|err| view! {
                        <div class="error-banner">{err.to_string()}</div>
                    })}

                    <div class="modal-actions">
                        <button type="button" class="secondary-btn" prop:disabled=submitting on:click=on_cancel>
                            "Cancelar"
                        </button>
                        <button type="submit" class="primary-btn" prop:disabled=move || !can_confirm()>
                            {move || if submitting() { "Reservando..." } else { "Confirmar" }}
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
