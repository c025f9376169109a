use leptos::ev::SubmitEvent;
use leptos::*;

use crate::browser;
use crate::models::query::{Query, QueryDraft};

/// Shared form for creating and updating a query. The parent owns the
/// network call; it receives the validated draft plus the staged file, if
/// the user chose one instead of a URL.
#[component]
pub fn QueryForm(
    #[prop(optional)] initial: Option<Query>,
    submit_label: &'static str,
    submitting: ReadSignal<bool>,
    on_submit: Box<dyn Fn(QueryDraft, Option<web_sys::File>)>,
) -> impl IntoView {
    let draft = create_rw_signal(
        initial
            .as_ref()
            .map(QueryDraft::from_query)
            .unwrap_or_default(),
    );
    let image_file = create_rw_signal(None::<web_sys::File>);
    let (problems, set_problems) = create_signal(Vec::<&'static str>::new());

    let on_file_change = move |ev: ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let file = input.files().and_then(|list| list.get(0));
        if file.is_some() {
            // URL and file are mutually exclusive.
            draft.update(|d| {
                d.product_image.clear();
                d.has_image_file = true;
            });
        }
        image_file.set(file);
    };

    let clear_file = move |_| {
        image_file.set(None);
        draft.update(|d| d.has_image_file = false);
    };

    let find_image = move |_| {
        let product = draft.with_untracked(|d| d.product_name.clone());
        if !product.is_empty() {
            let url = format!(
                "https://www.google.com/search?tbm=isch&q={}",
                urlencoding::encode(&product)
            );
            browser::open_in_new_tab(&url);
        }
    };

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let current = draft.get_untracked();
        let found = current.validate();
        if !found.is_empty() {
            set_problems.set(found);
            return;
        }
        set_problems.set(Vec::new());
        on_submit(current, image_file.get_untracked());
    };

    view! {
        <form class="query-form" on:submit=handle_submit>
            <input
                type="text"
                placeholder="Product name"
                prop:value=move || draft.with(|d| d.product_name.clone())
                on:input=move |e| draft.update(|d| d.product_name = event_target_value(&e))
            />
            <input
                type="text"
                placeholder="Product brand"
                prop:value=move || draft.with(|d| d.product_brand.clone())
                on:input=move |e| draft.update(|d| d.product_brand = event_target_value(&e))
            />
            <input
                type="text"
                placeholder="Query title"
                prop:value=move || draft.with(|d| d.query_title.clone())
                on:input=move |e| draft.update(|d| d.query_title = event_target_value(&e))
            />
            <textarea
                rows="4"
                placeholder="Why should this product be boycotted?"
                prop:value=move || draft.with(|d| d.boycott_reason.clone())
                on:input=move |e| draft.update(|d| d.boycott_reason = event_target_value(&e))
            />

            <div class="image-inputs">
                <input
                    type="url"
                    placeholder="Product image URL"
                    prop:value=move || draft.with(|d| d.product_image.clone())
                    prop:disabled=move || image_file.get().is_some()
                    on:input=move |e| draft.update(|d| d.product_image = event_target_value(&e))
                />
                <button type="button" on:click=find_image>{ "Find image" }</button>
                <input
                    type="file"
                    accept="image/*"
                    prop:disabled=move || draft.with(|d| !d.product_image.is_empty())
                    on:change=on_file_change
                />
                {move || image_file.get().map(|file| view! {
                    <p class="staged-file">
                        { file.name() }
                        <button type="button" on:click=clear_file>{ "Clear" }</button>
                    </p>
                })}
            </div>

            {move || {
                let found = problems.get();
                (!found.is_empty()).then(|| view! {
                    <ul class="form-errors" role="alert">
                        {found.into_iter().map(|p| view! { <li>{ p }</li> }).collect::<Vec<_>>()}
                    </ul>
                })
            }}

            <button type="submit" prop:disabled=move || submitting.get()>
                {move || if submitting.get() { "Saving..." } else { submit_label }}
            </button>
        </form>
    }
}
