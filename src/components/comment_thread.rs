use chrono::Utc;
use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::auth::use_auth;
use crate::flash::use_flash;
use crate::models::recommendation::{Comment, Recommendation};
use crate::sync::{optimistic, FetchCache, InFlight};

/// Comment list for one recommendation, with add/edit/delete for the
/// viewer's own comments. Every mutation is optimistic: the list changes
/// immediately and is rolled back if the request fails. A newly added
/// comment gets its server-assigned id reconciled from the response.
#[component]
pub fn CommentThread(recs: RwSignal<Vec<Recommendation>>, rec_id: String) -> impl IntoView {
    let auth = use_auth();
    let flash = use_flash();
    let inflight = expect_context::<InFlight>();
    let cache = expect_context::<FetchCache>();

    let (draft, set_draft) = create_signal(String::new());
    // (comment id, text under edit)
    let editing = create_rw_signal(None::<(String, String)>);

    let comments = {
        let rec_id = rec_id.clone();
        create_memo(move |_| {
            recs.with(|list| {
                list.iter()
                    .find(|r| r.id == rec_id)
                    .map(|r| r.comments.clone())
                    .unwrap_or_default()
            })
        })
    };

    let add_comment = {
        let rec_id = rec_id.clone();
        let inflight = inflight.clone();
        let cache = cache.clone();
        move |_| {
            let Some(user) = auth.user.get_untracked() else {
                return;
            };
            let text = draft.get_untracked().trim().to_string();
            if text.is_empty() {
                flash.error("Write a comment first.");
                return;
            }
            let Some(guard) = inflight.begin(&format!("comment-add:{rec_id}")) else {
                return;
            };
            set_draft.set(String::new());

            let rec_id = rec_id.clone();
            let cache = cache.clone();
            let comment = Comment {
                id: None,
                author_name: if user.display_name.is_empty() {
                    user.email.clone()
                } else {
                    user.display_name.clone()
                },
                author_email: user.email.clone(),
                text,
                timestamp: Utc::now(),
            };
            spawn_local(async move {
                let _guard = guard;
                let local = comment.clone();
                let result = optimistic(
                    recs,
                    {
                        let rec_id = rec_id.clone();
                        move |list: &mut Vec<Recommendation>| {
                            if let Some(r) = list.iter_mut().find(|r| r.id == rec_id) {
                                r.comments.push(local);
                            }
                        }
                    },
                    api::create_comment(&rec_id, &comment),
                    {
                        let rec_id = rec_id.clone();
                        move |list: &mut Vec<Recommendation>, inserted: &api::InsertedId| {
                            if let Some(r) = list.iter_mut().find(|r| r.id == rec_id) {
                                if let Some(pending) =
                                    r.comments.iter_mut().rev().find(|c| c.id.is_none())
                                {
                                    pending.id = Some(inserted.inserted_id.clone());
                                }
                            }
                        }
                    },
                )
                .await;
                match result {
                    Ok(_) => cache.invalidate_prefix("/recommendations"),
                    Err(err) => flash.error(format!("Could not add comment: {err}")),
                }
            });
        }
    };

    let save_edit = {
        let rec_id = rec_id.clone();
        let inflight = inflight.clone();
        let cache = cache.clone();
        move |_| {
            let Some((comment_id, text)) = editing.get_untracked() else {
                return;
            };
            let text = text.trim().to_string();
            if text.is_empty() {
                flash.error("A comment cannot be empty.");
                return;
            }
            let Some(guard) = inflight.begin(&format!("comment-edit:{comment_id}")) else {
                return;
            };
            editing.set(None);

            let rec_id = rec_id.clone();
            let cache = cache.clone();
            spawn_local(async move {
                let _guard = guard;
                let current = recs.with_untracked(|list| {
                    list.iter()
                        .find(|r| r.id == rec_id)
                        .and_then(|r| r.comments.iter().find(|c| c.id.as_deref() == Some(comment_id.as_str())))
                        .cloned()
                });
                let Some(mut updated) = current else {
                    return;
                };
                updated.text = text.clone();

                let result = optimistic(
                    recs,
                    {
                        let rec_id = rec_id.clone();
                        let comment_id = comment_id.clone();
                        move |list: &mut Vec<Recommendation>| {
                            if let Some(r) = list.iter_mut().find(|r| r.id == rec_id) {
                                if let Some(c) = r
                                    .comments
                                    .iter_mut()
                                    .find(|c| c.id.as_deref() == Some(comment_id.as_str()))
                                {
                                    c.text = text;
                                }
                            }
                        }
                    },
                    api::update_comment(&rec_id, &comment_id, &updated),
                    |_, _| {},
                )
                .await;
                match result {
                    Ok(_) => cache.invalidate_prefix("/recommendations"),
                    Err(err) => flash.error(format!("Could not update comment: {err}")),
                }
            });
        }
    };

    let delete_comment = {
        let rec_id = rec_id.clone();
        let inflight = inflight.clone();
        let cache = cache.clone();
        move |comment_id: String| {
            let Some(guard) = inflight.begin(&format!("comment-del:{comment_id}")) else {
                return;
            };
            let rec_id = rec_id.clone();
            let cache = cache.clone();
            spawn_local(async move {
                let _guard = guard;
                let result = optimistic(
                    recs,
                    {
                        let rec_id = rec_id.clone();
                        let comment_id = comment_id.clone();
                        move |list: &mut Vec<Recommendation>| {
                            if let Some(r) = list.iter_mut().find(|r| r.id == rec_id) {
                                r.comments.retain(|c| c.id.as_deref() != Some(comment_id.as_str()));
                            }
                        }
                    },
                    api::delete_comment(&rec_id, &comment_id),
                    |_, _| {},
                )
                .await;
                match result {
                    Ok(_) => cache.invalidate_prefix("/recommendations"),
                    Err(err) => flash.error(format!("Could not delete comment: {err}")),
                }
            });
        }
    };

    view! {
        <div class="comment-thread">
            <h4>{move || format!("Comments ({})", comments.get().len())}</h4>
            <ul class="comments">
                {move || {
                    let viewer = auth.user.get().map(|u| u.email);
                    let delete_comment = delete_comment.clone();
                    comments.get().into_iter().map(|comment| {
                        let own = viewer
                            .as_deref()
                            .map(|email| comment.is_authored_by(email))
                            .unwrap_or(false);
                        let under_edit = comment
                            .id
                            .as_ref()
                            .zip(editing.get().map(|(id, _)| id))
                            .map(|(a, b)| *a == b)
                            .unwrap_or(false);
                        let edit_target = comment.clone();
                        let delete_id = comment.id.clone();
                        let delete_comment = delete_comment.clone();
                        view! {
                            <li class="comment">
                                <p class="comment-author">{ comment.author_name.clone() }</p>
                                {if under_edit {
                                    view! {
                                        <div class="comment-edit">
                                            <textarea
                                                prop:value=move || editing.get().map(|(_, t)| t).unwrap_or_default()
                                                on:input=move |e| {
                                                    let text = event_target_value(&e);
                                                    editing.update(|state| {
                                                        if let Some((_, t)) = state {
                                                            *t = text;
                                                        }
                                                    });
                                                }
                                            />
                                            <button on:click=save_edit.clone()>{ "Save" }</button>
                                            <button on:click=move |_| editing.set(None)>{ "Cancel" }</button>
                                        </div>
                                    }.into_view()
                                } else {
                                    view! { <p class="comment-text">{ comment.text.clone() }</p> }.into_view()
                                }}
                                {(own && !under_edit).then(|| view! {
                                    <div class="comment-actions">
                                        <button on:click=move |_| {
                                            if let Some(id) = edit_target.id.clone() {
                                                editing.set(Some((id, edit_target.text.clone())));
                                            }
                                        }>{ "Edit" }</button>
                                        <button class="danger" on:click=move |_| {
                                            if let Some(id) = delete_id.clone() {
                                                delete_comment(id);
                                            }
                                        }>{ "Delete" }</button>
                                    </div>
                                })}
                            </li>
                        }
                    }).collect::<Vec<_>>()
                }}
            </ul>
            {move || auth.user.get().map(|_| view! {
                <div class="comment-form">
                    <textarea
                        placeholder="Add a comment"
                        prop:value=move || draft.get()
                        on:input=move |e| set_draft.set(event_target_value(&e))
                    />
                    <button on:click=add_comment.clone()>{ "Comment" }</button>
                </div>
            })}
        </div>
    }
}
