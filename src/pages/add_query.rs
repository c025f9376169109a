use chrono::Utc;
use leptos::*;
use leptos_router::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::auth::use_auth;
use crate::components::query_form::QueryForm;
use crate::flash::use_flash;
use crate::models::query::{Query, QueryDraft};
use crate::sync::FetchCache;
use crate::upload;

#[component]
pub fn AddQueryPage() -> impl IntoView {
    let auth = use_auth();
    let flash = use_flash();
    let cache = expect_context::<FetchCache>();
    let navigate = use_navigate();
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = Box::new(move |draft: QueryDraft, file: Option<web_sys::File>| {
        let Some(user) = auth.user.get_untracked() else {
            return;
        };
        if submitting.get_untracked() {
            return;
        }
        set_submitting.set(true);

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

            let query = Query {
                id: String::new(),
                product_name: draft.product_name.trim().to_string(),
                product_brand: draft.product_brand.trim().to_string(),
                product_image: image_url,
                query_title: draft.query_title.trim().to_string(),
                boycott_reason: draft.boycott_reason.trim().to_string(),
                user_email: user.email.clone(),
                user_name: if user.display_name.is_empty() {
                    user.email.clone()
                } else {
                    user.display_name.clone()
                },
                user_photo: user.photo_url.clone(),
                timestamp: Utc::now(),
                recommendation_count: 0,
            };

            match api::create_query(&query).await {
                Ok(_) => {
                    cache.invalidate_prefix("/queries");
                    flash.success("Query posted.");
                    navigate("/my-queries", Default::default());
                }
                Err(err) => flash.error(format!("Could not post query: {err}")),
            }
            set_submitting.set(false);
        });
    });

    view! {
        <main class="add-query">
            <h1>{ "Ask About a Product" }</h1>
            <QueryForm submit_label="Post Query" submitting=submitting on_submit=on_submit/>
        </main>
    }
}
