//! Gift Card Component

use leptos::prelude::*;
use invite_core::GiftItem;

use crate::context::use_app_context;

/// One registry entry. Reserved gifts show a badge instead of the button.
#[component]
pub fn GiftCard(
    gift: GiftItem,
    #[prop(into)] on_reserve: Callback<GiftItem>,
) -> impl IntoView {
    let ctx = use_app_context();
    let image_url = ctx.registry().image_url(&gift);
    let (image_failed, set_image_failed) = signal(false);

    let reserved = !gift.is_available();
    let title = gift.title.clone();
    let description = gift.description.clone().filter(|d| !d.trim().is_empty());
    let buy_url = gift.buy_url.clone().filter(|u| !u.trim().is_empty());
    let category = gift.category.clone().filter(|c| !c.trim().is_empty());

    let image = match image_url {
        Some(url) => {
            let alt = title.clone();
            view! {
                <Show
                    when=move || !image_failed.get()
                    fallback=|| view! { <div class="gift-image placeholder">"Sin imagen"</div> }
                >
                    <img
                        class="gift-image"
                        src=url.clone()
                        alt=alt.clone()
                        loading="lazy"
                        on:error=move |_| set_image_failed.set(true)
                    />
                </Show>
            }
            .into_any()
        }
        None => view! { <div class="gift-image placeholder">"Sin imagen"</div> }.into_any(),
    };

    view! {
        <div class=if reserved { "gift-card reserved" } else { "gift-card" }>
            {image}
            <div class="gift-body">
                {category.map(|c| view! { <span class="gift-category">{c}</span> })}
                <h3 class="gift-title">
                    {title}
                    {reserved.then(|| view! { <span class="gift-check">" ✓"</span> })}
                </h3>
                {description.map(|d| view! { <p class="gift-description">{d}</p> })}
                {buy_url.map(|url| view! {
                    <a class="gift-link" href=url target="_blank" rel="noopener noreferrer">"Ver enlace"</a>
                })}
            </div>
            <div class="gift-actions">
                {if reserved {
                    view! { <span class="gift-badge">"Reservado"</span> }.into_any()
                } else {
                    view! {
                        <button
                            type="button"
                            class="primary-btn"
                            on:click=move |_| on_reserve.run(gift.clone())
                        >
                            "Reservar"
                        </button>
                    }
                    .into_any()
                }}
            </div>
        </div>
    }
}
