//! Invitation App
//!
//! Resolves configuration, wires the sessions and lays out the sections.

use std::rc::Rc;

use leptos::prelude::*;
use reactive_stores::Store;
use invite_core::{
    GiftRegistryClient, HttpInviteApi, InviteApi, InviteConfig, RsvpSession, RsvpStore,
};

use crate::browser::LocalStorageRsvpStore;
use crate::components::{CountdownPanel, EventInfo, GiftRegistry, Hero, RsvpForm};
use crate::context::AppContext;
use crate::store::{store_set_registry, store_set_rsvp, PageState};

#[component]
pub fn App() -> impl IntoView {
    match InviteConfig::from_build_env() {
        Ok(config) => {
            log::set_max_level(config.log_level);
            view! { <InvitePage config=config /> }.into_any()
        }
        Err(e) => {
            log::error!("invalid configuration: {}", e);
            view! {
                <div class="config-error">
                    <h1>"Configuración inválida"</h1>
                    <p>{e.to_string()}</p>
                </div>
            }
            .into_any()
        }
    }
}

#[component]
fn InvitePage(config: InviteConfig) -> impl IntoView {
    let http = HttpInviteApi::new(&config.api_base_url);
    log::info!("API at {}", http.base_url());
    let api: Rc<dyn InviteApi> = Rc::new(http);
    let rsvp_store: Rc<dyn RsvpStore> =
        Rc::new(LocalStorageRsvpStore::new(config.rsvp_storage_key));
    let rsvp = Rc::new(RsvpSession::new(Rc::clone(&api), rsvp_store));
    let registry = Rc::new(GiftRegistryClient::new(api, config.image_base_url.clone()));

    // State
    let page = Store::new(PageState::default());
    rsvp.subscribe(move |state| store_set_rsvp(&page, state.clone()));
    registry.subscribe(move |snapshot| store_set_registry(&page, snapshot.clone()));

    // Provide context to all children
    provide_context(page);
    provide_context(AppContext::new(config, rsvp, registry));

    view! {
        <main class="invite-page">
            <Hero />

            <section class="section">
                <CountdownPanel />
            </section>

            <section class="section">
                <EventInfo />
            </section>

            <section class="section narrow">
                <RsvpForm />
            </section>

            <section class="section wide tinted">
                <GiftRegistry />
            </section>
        </main>
    }
}
