use leptos::*;
use leptos_router::A;

use crate::components::newsletter::Newsletter;
use crate::components::recent_queries::RecentQueries;
use crate::components::reviews_strip::ReviewsStrip;
use crate::components::stats_section::StatsSection;
use crate::components::top_rated::TopRated;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <main class="home">
            <section class="hero">
                <h1>{ "Find a better alternative" }</h1>
                <p>
                    { "Ask about a boycotted product and get crowd-sourced \
                       recommendations for what to use instead." }
                </p>
                <div class="hero-actions">
                    <A href="/queries" class="btn primary">{ "Browse Queries" }</A>
                    <A href="/add-query" class="btn">{ "Ask About a Product" }</A>
                </div>
            </section>
            <RecentQueries/>
            <TopRated/>
            <StatsSection/>
            <ReviewsStrip/>
            <Newsletter/>
        </main>
    }
}
