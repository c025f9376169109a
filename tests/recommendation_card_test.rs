#![cfg(target_arch = "wasm32")]

use leptos::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use prorec::components::recommendation_card::RecommendationCard;
use prorec::models::recommendation::Recommendation;

wasm_bindgen_test_configure!(run_in_browser);

fn mount_card(on_like: Option<Box<dyn Fn(String)>>) -> web_sys::Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let container = document.create_element("div").unwrap();
    document.body().unwrap().append_child(&container).unwrap();

    let parent: web_sys::HtmlElement = container.clone().unchecked_into();
    let rec = Recommendation {
        id: "r9".to_string(),
        likes: vec!["a@x.com".to_string()],
        ..Recommendation::default()
    };
    match on_like {
        Some(handler) => mount_to(parent, move || {
            view! {
                <RecommendationCard
                    rec=rec.clone()
                    viewer_email=None
                    on_like=handler
                    on_view=Box::new(|_| {})
                />
            }
        }),
        None => mount_to(parent, move || {
            view! {
                <RecommendationCard
                    rec=rec.clone()
                    viewer_email=None
                    on_view=Box::new(|_| {})
                />
            }
        }),
    }
    container
}

#[wasm_bindgen_test]
fn without_a_handler_the_like_count_is_not_a_button() {
    let container = mount_card(None);

    assert!(container
        .query_selector("button.like")
        .unwrap()
        .is_none());
    let count = container.query_selector("span.like").unwrap().unwrap();
    assert!(count.text_content().unwrap().contains('1'));
}

#[wasm_bindgen_test]
fn with_a_handler_clicking_like_reports_the_id() {
    let clicked = create_rw_signal(None::<String>);
    let container = mount_card(Some(Box::new(move |id| clicked.set(Some(id)))));

    let button: web_sys::HtmlElement = container
        .query_selector("button.like")
        .unwrap()
        .unwrap()
        .unchecked_into();
    button.click();

    assert_eq!(clicked.get_untracked().as_deref(), Some("r9"));
}
