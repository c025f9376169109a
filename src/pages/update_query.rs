use leptos::*;
use leptos_router::{use_navigate, use_params_map};
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::components::loading::Loading;
use crate::components::query_form::QueryForm;
use crate::flash::use_flash;
use crate::models::query::{Query, QueryDraft};
use crate::sync::{CancelGuard, FetchCache};
use crate::upload;

#[component]
pub fn UpdateQueryPage() -> impl IntoView {
    let flash = use_flash();
    let cache = expect_context::<FetchCache>();
    let navigate = use_navigate();
    let params = use_params_map();
    let query_id =
        create_memo(move |_| params.with(|p| p.get("id").cloned().unwrap_or_default()));

    let (query, set_query) = create_signal(None::<Query>);
    let (failed, set_failed) = create_signal(false);
    let (submitting, set_submitting) = create_signal(false);
    let guard = CancelGuard::for_current_owner();

    // Refetches when the route id changes without a remount; a response
    // for a superseded id is dropped.
    {
        let guard = guard.clone();
        create_effect(move |_| {
            let id = query_id.get();
            set_query.set(None);
            set_failed.set(false);

            let guard = guard.clone();
            spawn_local(async move {
                let result = api::fetch_query(&id).await;
                if guard.is_cancelled() || query_id.get_untracked() != id {
                    return;
                }
                match result {
                    Ok(found) => set_query.set(Some(found)),
                    Err(_) => set_failed.set(true),
                }
            });
        });
    }

    let on_submit = move |existing: Query| {
        let cache = cache.clone();
        let navigate = navigate.clone();
        Box::new(move |draft: QueryDraft, file: Option<web_sys::File>| {
            if submitting.get_untracked() {
                return;
            }
            set_submitting.set(true);

            let existing = existing.clone();
            let cache = cache.clone();
            let navigate = navigate.clone();
            spawn_local(async move {
                let image_url = match file {
                    Some(file) => match upload::upload_image(&file).await {
                        Ok(url) => url,
                        Err(err) => {
                            flash.error(format!("Image upload failed: {err}"));
                            set_submitting.set(false);
                            return;
                        }
                    },
                    None => draft.product_image.clone(),
                };

                let updated = Query {
                    product_name: draft.product_name.trim().to_string(),
                    product_brand: draft.product_brand.trim().to_string(),
                    product_image: image_url,
                    query_title: draft.query_title.trim().to_string(),
                    boycott_reason: draft.boycott_reason.trim().to_string(),
                    ..existing.clone()
                };

                match api::update_query(&existing.id, &updated).await {
                    Ok(()) => {
                        cache.invalidate_prefix("/queries");
                        flash.success("Query updated.");
                        navigate("/my-queries", Default::default());
                    }
                    Err(err) => flash.error(format!("Could not update query: {err}")),
                }
                set_submitting.set(false);
            });
        }) as Box<dyn Fn(QueryDraft, Option<web_sys::File>)>
    };

    view! {
        <main class="update-query">
            <h1>{ "Update Query" }</h1>
            {move || {
                if failed.get() {
                    return view! { <p class="error">{ "Query not found." }</p> }.into_view();
                }
                match query.get() {
                    None => view! { <Loading/> }.into_view(),
                    Some(found) => {
                        let on_submit = on_submit(found.clone());
                        view! {
                            <QueryForm
                                initial=found
                                submit_label="Save Changes"
                                submitting=submitting
                                on_submit=on_submit
                            />
                        }
                        .into_view()
                    }
                }
            }}
        </main>
    }
}
