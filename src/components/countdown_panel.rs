//! Countdown Panel Component
//!
//! Four time cards refreshed once a second. A card is highlighted when its
//! value changed on the last tick.

use std::rc::Rc;

use leptos::prelude::*;
use invite_core::{Countdown, SystemClock, TimeUnit};

use crate::browser::IntervalTicks;
use crate::context::use_app_context;

#[component]
pub fn CountdownPanel() -> impl IntoView {
    let ctx = use_app_context();
    let target = ctx.config(|c| c.countdown_target);
    let countdown = Countdown::new(target, Rc::new(SystemClock));

    let (current, set_current) = signal(countdown.remaining());
    let (previous, set_previous) = signal(countdown.remaining());

    let handle = countdown.start(&IntervalTicks, move |remaining| {
        set_previous.set(current.get_untracked());
        set_current.set(remaining);
    });
    let ticking = StoredValue::new_local(Some(handle));
    on_cleanup(move || {
        // Dropping the handle clears the interval
        ticking.try_update_value(|handle| handle.take());
    });

    view! {
        <div class="countdown">
            <h2 class="section-title">"Cuenta Regresiva"</h2>
            <div class="countdown-grid">
                {TimeUnit::ALL
                    .iter()
                    .map(|unit| {
                        let unit = *unit;
                        let changed = move || current.get().changed(&previous.get(), unit);
                        view! {
                            <div class=move || if changed() { "time-card changed" } else { "time-card" }>
                                <div class="time-value">{move || current.get().get(unit)}</div>
                                <div class="time-label">{unit.label()}</div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
            <p class="countdown-footer">
                {move || {
                    if current.get().is_finished() {
                        "¡Llegó el gran día!"
                    } else {
                        "¡No te lo pierdas!"
                    }
                }}
            </p>
        </div>
    }
}
