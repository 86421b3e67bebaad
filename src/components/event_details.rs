//! Event Details Components
//!
//! Hero banner and the when/where block with calendar and maps links.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn Hero() -> impl IntoView {
    let ctx = use_app_context();
    let title = ctx.config(|c| c.event.title.clone());

    view! {
        <header class="hero">
            <div class="hero-hearts">"♥ ♥ ♥"</div>
            <h1 class="hero-title">{title}</h1>
            <p class="hero-subtitle">
                "Nuestra hadita está en camino, te invitamos a celebrar su llegada con amor y alegría"
            </p>
        </header>
    }
}

#[component]
pub fn EventInfo() -> impl IntoView {
    let ctx = use_app_context();
    let event = ctx.config(|c| c.event.clone());
    let calendar_url = event.calendar_url();

    view! {
        <div class="event-info">
            <div class="event-parents">
                <h2>"Futuros Papás"</h2>
                <p class="event-parents-names">{event.parents.clone()}</p>
            </div>

            <div class="event-grid">
                <div class="event-card">
                    <h3>"Fecha y Hora"</h3>
                    <p>{event.date_label()}</p>
                    <p>{event.time_label()}</p>
                    <a class="event-link" href=calendar_url target="_blank" rel="noopener noreferrer">
                        "Agendar"
                    </a>
                </div>

                <div class="event-card">
                    <h3>"Lugar"</h3>
                    <p>{event.address.clone()}</p>
                    <p>{event.district.clone()}</p>
                    <a class="event-link" href=event.maps_url.clone() target="_blank" rel="noopener noreferrer">
                        "Ver en Maps"
                    </a>
                </div>
            </div>

            <div class="event-honoree">
                <p>"Esperamos con amor a"</p>
                <h3>{event.honoree.clone()}</h3>
            </div>

            <p class="event-footer">"¡Tu presencia hará este momento aún más especial!"</p>
        </div>
    }
}
