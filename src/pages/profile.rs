use leptos::ev::SubmitEvent;
use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::auth::use_auth;
use crate::components::loading::Loading;
use crate::flash::use_flash;
use crate::models::user::UserProfile;
use crate::sync::CancelGuard;
use crate::upload;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let flash = use_flash();

    let profile = create_rw_signal(UserProfile::default());
    let (loading, set_loading) = create_signal(true);
    let (saving, set_saving) = create_signal(false);
    let photo_file = create_rw_signal(None::<web_sys::File>);
    let guard = CancelGuard::for_current_owner();

    spawn_local(async move {
        let Some(user) = auth.user.get_untracked() else {
            set_loading.set(false);
            return;
        };
        // A missing server record is fine; we start from the identity
        // provider's fields.
        let stored = api::fetch_profile(&user.email, &user.id_token)
            .await
            .unwrap_or_default();
        if guard.is_cancelled() {
            return;
        }
        let mut merged = stored.merge_identity(&user.display_name, &user.photo_url);
        merged.email = user.email.clone();
        profile.set(merged);
        set_loading.set(false);
    });

    let on_photo_change = move |ev: ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        photo_file.set(input.files().and_then(|list| list.get(0)));
    };

    let save = move |ev: SubmitEvent| {
        ev.prevent_default();
        let Some(user) = auth.user.get_untracked() else {
            return;
        };
        if saving.get_untracked() {
            return;
        }
        let current = profile.get_untracked();
        if current.full_name.trim().is_empty() {
            flash.error("Name is required.");
            return;
        }
        set_saving.set(true);

        let file = photo_file.get_untracked();
        spawn_local(async move {
            let photo = match file {
                Some(file) => match upload::upload_image(&file).await {
                    Ok(url) => url,
                    Err(err) => {
                        flash.error(format!("Photo upload failed: {err}"));
                        set_saving.set(false);
                        return;
                    }
                },
                None => current.photo.clone(),
            };

            let updated = UserProfile {
                full_name: current.full_name.trim().to_string(),
                photo: photo.clone(),
                email: user.email.clone(),
                ..current
            };

            // Keep the identity provider and the backend record in step.
            let provider = auth.update_profile(&updated.full_name, &photo).await;
            let backend = api::upsert_profile(&updated, &user.id_token).await;
            match (provider, backend) {
                (Ok(()), Ok(())) => {
                    profile.set(updated);
                    photo_file.set(None);
                    flash.success("Profile saved.");
                }
                (Err(err), _) => flash.error(format!("Could not update profile: {err}")),
                (_, Err(err)) => flash.error(format!("Could not save profile: {err}")),
            }
            set_saving.set(false);
        });
    };

    view! {
        <main class="profile">
            <h1>{ "My Profile" }</h1>
            {move || {
                if loading.get() {
                    return view! { <Loading/> }.into_view();
                }
                view! {
                    <form class="profile-form" on:submit=save>
                        {move || {
                            let photo = profile.with(|p| p.photo.clone());
                            (!photo.is_empty()).then(|| view! {
                                <img class="avatar" src=photo alt="Profile photo"/>
                            })
                        }}
                        <label>{ "Photo" }
                            <input type="file" accept="image/*" on:change=on_photo_change/>
                        </label>
                        <label>{ "Full name" }
                            <input
                                type="text"
                                prop:value=move || profile.with(|p| p.full_name.clone())
                                on:input=move |e| profile.update(|p| p.full_name = event_target_value(&e))
                            />
                        </label>
                        <label>{ "Email" }
                            <input type="email" prop:value=move || profile.with(|p| p.email.clone()) disabled/>
                        </label>
                        <label>{ "Date of birth" }
                            <input
                                type="date"
                                prop:value=move || profile.with(|p| p.dob.clone())
                                on:input=move |e| profile.update(|p| p.dob = event_target_value(&e))
                            />
                        </label>
                        <label>{ "Phone" }
                            <input
                                type="tel"
                                prop:value=move || profile.with(|p| p.phone.clone())
                                on:input=move |e| profile.update(|p| p.phone = event_target_value(&e))
                            />
                        </label>
                        <label>{ "Address" }
                            <input
                                type="text"
                                prop:value=move || profile.with(|p| p.address.clone())
                                on:input=move |e| profile.update(|p| p.address = event_target_value(&e))
                            />
                        </label>
                        <label>{ "Gender" }
                            <input
                                type="text"
                                prop:value=move || profile.with(|p| p.gender.clone())
                                on:input=move |e| profile.update(|p| p.gender = event_target_value(&e))
                            />
                        </label>
                        <label>{ "Hobbies" }
                            <input
                                type="text"
                                prop:value=move || profile.with(|p| p.hobbies.clone())
                                on:input=move |e| profile.update(|p| p.hobbies = event_target_value(&e))
                            />
                        </label>
                        <button type="submit" prop:disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Save Profile" }}
                        </button>
                    </form>
                }.into_view()
            }}
        </main>
    }
}
