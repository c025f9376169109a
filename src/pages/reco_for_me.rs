use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::auth::use_auth;
use crate::browser;
use crate::components::comment_thread::CommentThread;
use crate::components::loading::Loading;
use crate::components::recommendation_card::RecommendationCard;
use crate::components::review_panel::ReviewPanel;
use crate::flash::use_flash;
use crate::models::recommendation::Recommendation;
use crate::sync::{optimistic, CancelGuard, FetchCache, InFlight};

#[derive(Clone, Copy, PartialEq)]
enum DetailTab {
    Reviews,
    Comments,
}

#[derive(Clone, Copy, PartialEq)]
enum Layout {
    Cards,
    Table,
}

/// Recommendations other users left on the signed-in user's queries.
#[component]
pub fn RecoForMePage() -> impl IntoView {
    let auth = use_auth();
    let flash = use_flash();
    let cache = expect_context::<FetchCache>();
    let inflight = expect_context::<InFlight>();

    let recs = create_rw_signal(Vec::<Recommendation>::new());
    let (loading, set_loading) = create_signal(true);
    let selected = create_rw_signal(None::<String>);
    let tab = create_rw_signal(DetailTab::Reviews);
    let layout = create_rw_signal(Layout::Cards);
    let guard = CancelGuard::for_current_owner();

    {
        let cache = cache.clone();
        spawn_local(async move {
            let Some(user) = auth.user.get_untracked() else {
                set_loading.set(false);
                return;
            };
            let key = format!("/recommendations/for-me?email={}", user.email);
            let result = cache
                .get_or_fetch(&key, || api::fetch_recommendations_for_me(&user.email))
                .await;
            if guard.is_cancelled() {
                return;
            }
            match result {
                Ok(list) => recs.set(list),
                Err(err) => flash.error(format!("Could not load recommendations: {err}")),
            }
            set_loading.set(false);
        });
    }

    let toggle_like = {
        let cache = cache.clone();
        let inflight = inflight.clone();
        move |rec_id: String| {
            let Some(user) = auth.user.get_untracked() else {
                return;
            };
            let Some(guard) = inflight.begin(&format!("like:{rec_id}")) else {
                return;
            };
            let cache = cache.clone();
            spawn_local(async move {
                let _guard = guard;
                let email = user.email.clone();
                let result = optimistic(
                    recs,
                    {
                        let rec_id = rec_id.clone();
                        let email = email.clone();
                        move |list: &mut Vec<Recommendation>| {
                            if let Some(r) = list.iter_mut().find(|r| r.id == rec_id) {
                                r.toggle_like(&email);
                            }
                        }
                    },
                    api::toggle_like(&rec_id, &email),
                    |_, _| {},
                )
                .await;
                match result {
                    Ok(()) => cache.invalidate_prefix("/recommendations"),
                    Err(err) => flash.error(format!("Could not update like: {err}")),
                }
            });
        }
    };

    // The query owner can remove a recommendation they received; the
    // parent query's counter goes down with it.
    let delete_rec = {
        let cache = cache.clone();
        let inflight = inflight.clone();
        move |rec: Recommendation| {
            if !browser::confirm("Remove this recommendation?") {
                return;
            }
            let Some(guard) = inflight.begin(&format!("rec-del:{}", rec.id)) else {
                return;
            };
            let cache = cache.clone();
            spawn_local(async move {
                let _guard = guard;
                let id = rec.id.clone();
                let result = optimistic(
                    recs,
                    {
                        let id = id.clone();
                        move |list: &mut Vec<Recommendation>| list.retain(|r| r.id != id)
                    },
                    api::delete_recommendation(&id),
                    |_, _| {},
                )
                .await;
                match result {
                    Ok(()) => {
                        cache.invalidate_prefix("/recommendations");
                        cache.invalidate_prefix("/queries");
                        flash.success("Recommendation removed.");
                        if let Err(err) = api::adjust_recommendation_count(&rec.query_id, -1).await {
                            flash.error(format!("Could not update the query counter: {err}"));
                        }
                    }
                    Err(err) => flash.error(format!("Could not remove recommendation: {err}")),
                }
            });
        }
    };

    view! {
        <main class="reco-for-me">
            <h1>{ "Recommendations For Me" }</h1>
            <div class="layout-toggle">
                <button
                    class:active=move || layout.get() == Layout::Cards
                    on:click=move |_| layout.set(Layout::Cards)
                >{ "Cards" }</button>
                <button
                    class:active=move || layout.get() == Layout::Table
                    on:click=move |_| layout.set(Layout::Table)
                >{ "Table" }</button>
            </div>
            {move || {
                if loading.get() {
                    return view! { <Loading/> }.into_view();
                }
                let list = recs.get();
                if list.is_empty() {
                    return view! {
                        <p class="empty">{ "Nobody has recommended anything on your queries yet." }</p>
                    }
                    .into_view();
                }
                let viewer = auth.user.get().map(|u| u.email);
                let toggle_like = toggle_like.clone();
                let delete_rec = delete_rec.clone();
                match layout.get() {
                    Layout::Cards => list
                        .into_iter()
                        .map(|rec| {
                            let toggle_like = toggle_like.clone();
                            let delete_rec = delete_rec.clone();
                            view! {
                                <RecommendationCard
                                    rec=rec
                                    viewer_email=viewer.clone()
                                    on_like=Box::new(move |id| toggle_like(id))
                                    on_view=Box::new(move |r: Recommendation| {
                                        tab.set(DetailTab::Reviews);
                                        selected.set(Some(r.id));
                                    })
                                    on_delete=Box::new(move |r| delete_rec(r))
                                />
                            }
                        })
                        .collect::<Vec<_>>()
                        .into_view(),
                    Layout::Table => view! {
                        <table class="rec-table">
                            <thead>
                                <tr>
                                    <th>{ "Product" }</th>
                                    <th>{ "Query" }</th>
                                    <th>{ "By" }</th>
                                    <th>{ "Likes" }</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {list.into_iter().map(|rec| {
                                    let toggle_like = toggle_like.clone();
                                    let delete_rec = delete_rec.clone();
                                    let liked = viewer
                                        .as_deref()
                                        .map(|email| rec.is_liked_by(email))
                                        .unwrap_or(false);
                                    let like_id = rec.id.clone();
                                    let open_id = rec.id.clone();
                                    let target = rec.clone();
                                    view! {
                                        <tr>
                                            <td>{ rec.product_name.clone() }</td>
                                            <td>{ rec.query_title.clone() }</td>
                                            <td>{ rec.recommender_name.clone() }</td>
                                            <td>
                                                <button
                                                    class="like"
                                                    class:liked=liked
                                                    on:click=move |_| toggle_like(like_id.clone())
                                                >
                                                    { format!("♥ {}", rec.like_count()) }
                                                </button>
                                            </td>
                                            <td>
                                                <button on:click=move |_| {
                                                    tab.set(DetailTab::Reviews);
                                                    selected.set(Some(open_id.clone()));
                                                }>{ "View" }</button>
                                                <button class="danger" on:click=move |_| delete_rec(target.clone())>
                                                    { "Delete" }
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }).collect::<Vec<_>>()}
                            </tbody>
                        </table>
                    }
                    .into_view(),
                }
            }}

            {move || selected.get().map(|rec_id| view! {
                <div class="modal-backdrop" on:click=move |_| selected.set(None)>
                    <div class="modal" on:click=move |ev| ev.stop_propagation()>
                        <button class="close" on:click=move |_| selected.set(None)>{ "×" }</button>
                        <div class="tabs">
                            <button
                                class:active=move || tab.get() == DetailTab::Reviews
                                on:click=move |_| tab.set(DetailTab::Reviews)
                            >{ "Reviews" }</button>
                            <button
                                class:active=move || tab.get() == DetailTab::Comments
                                on:click=move |_| tab.set(DetailTab::Comments)
                            >{ "Comments" }</button>
                        </div>
                        {
                            let rec_id = rec_id.clone();
                            move || match tab.get() {
                                DetailTab::Reviews => view! { <ReviewPanel rec_id=rec_id.clone()/> }.into_view(),
                                DetailTab::Comments => view! { <CommentThread recs=recs rec_id=rec_id.clone()/> }.into_view(),
                            }
                        }
                    </div>
                </div>
            })}
        </main>
    }
}
