use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::models::stats::SiteStats;
use crate::sync::{CancelGuard, FetchCache};

#[component]
pub fn StatsSection() -> impl IntoView {
    let cache = expect_context::<FetchCache>();
    let (stats, set_stats) = create_signal(SiteStats::default());
    let (error, set_error) = create_signal(None::<String>);
    let guard = CancelGuard::for_current_owner();

    spawn_local(async move {
        let result = cache.get_or_fetch("/stats", api::fetch_stats).await;
        if guard.is_cancelled() {
            return;
        }
        match result {
            Ok(data) => set_stats.set(data),
            Err(err) => set_error.set(Some(format!("Stats unavailable: {err}"))),
        }
    });

    view! {
        <section class="stats-section">
            <h2>{ "Platform Stats" }</h2>
            {move || match error.get() {
                Some(message) => view! { <p class="error">{ message }</p> }.into_view(),
                None => {
                    let s = stats.get();
                    view! {
                        <div class="stats-grid">
                            <div class="stat">
                                <span class="stat-title">{ "Total Queries" }</span>
                                <span class="stat-value">{ s.total_queries }</span>
                            </div>
                            <div class="stat">
                                <span class="stat-title">{ "Total Recommendations" }</span>
                                <span class="stat-value">{ s.total_recommendations }</span>
                            </div>
                            <div class="stat">
                                <span class="stat-title">{ "Unique Users" }</span>
                                <span class="stat-value">{ s.unique_users }</span>
                            </div>
                            <div class="stat">
                                <span class="stat-title">{ "Avg. Recommendations" }</span>
                                <span class="stat-value">{ format!("{:.1}", s.average_recommendations) }</span>
                            </div>
                        </div>
                    }.into_view()
                }
            }}
        </section>
    }
}
