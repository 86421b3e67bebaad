//! RSVP Form Component
//!
//! Name + companions form, replaced by a confirmation card once the server
//! accepts the submission.

use leptos::prelude::*;
use leptos::task::spawn_local;
use invite_core::{parse_companion_input, MAX_COMPANIONS};

use crate::context::use_app_context;
use crate::store::{use_page_store, PageStateStoreFields};

#[component]
pub fn RsvpForm() -> impl IntoView {
    let ctx = use_app_context();
    let page = use_page_store();

    // Prefill from the cached record so "edit" starts from what was sent
    let cached = ctx.rsvp().load_cached();
    let (name, set_name) = signal(cached.as_ref().map(|r| r.name.clone()).unwrap_or_default());
    let (companions, set_companions) = signal(
        cached
            .as_ref()
            .map(|r| r.companion_count.to_string())
            .unwrap_or_else(|| "0".to_string()),
    );

    let submitting = move || page.rsvp().get().is_submitting();
    let confirmed = move || page.rsvp().get().confirmed().cloned();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let session = ctx.rsvp();
        let name = name.get_untracked();
        let count = parse_companion_input(&companions.get_untracked());
        spawn_local(async move {
            // Errors are published through the session state
            let _ = session.submit(&name, count).await;
        });
    };

    let on_reset = move |_| {
        ctx.rsvp().reset();
        set_name.set(String::new());
        set_companions.set("0".to_string());
    };

    view! {
        <div class="rsvp">
            <h2 class="section-title">"Confirma tu Asistencia"</h2>

            <Show
                when=move || confirmed().is_some()
                fallback=move || view! {
                    <form class="rsvp-form" on:submit=on_submit>
                        <label class="field">
                            <span>"Nombre completo"</span>
                            <input
                                type="text"
                                placeholder="Tu nombre"
                                prop:value=move || name.get()
                                prop:disabled=submitting
                                on:input=move |ev| set_name.set(event_target_value(&ev))
                            />
                        </label>

                        <label class="field">
                            <span>"Acompañantes"</span>
                            <input
                                type="number"
                                min="0"
                                max=MAX_COMPANIONS.to_string()
                                prop:value=move || companions.get()
                                prop:disabled=submitting
                                on:input=move |ev| set_companions.set(event_target_value(&ev))
                            />
                        </label>

                        {move || page.rsvp().get().error.map(|err| view! {
                            <div class="error-banner">{err.to_string()}</div>
                        })}

                        <button type="submit" class="primary-btn" prop:disabled=submitting>
                            {move || if submitting() { "Enviando..." } else { "Confirmar Asistencia" }}
                        </button>
                    </form>
                }
            >
                {move || confirmed().map(|record| view! {
                    <div class="rsvp-confirmed">
                        <div class="rsvp-check">"✓"</div>
                        <h3>"¡Gracias por confirmar!"</h3>
                        <p class="rsvp-name">{record.name.clone()}</p>
                        <p>{record.attendance_summary()}</p>
                        <button type="button" class="secondary-btn" on:click=on_reset>
                            "Editar confirmación"
                        </button>
                    </div>
                })}
            </Show>
        </div>
    }
}
