//! Transient toast-style notifications. One message at a time, cleared after
//! a few seconds or when a newer message replaces it.

use gloo_timers::future::TimeoutFuture;
use leptos::*;
use wasm_bindgen_futures::spawn_local;

const DISMISS_AFTER_MS: u32 = 4_000;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FlashKind {
    Success,
    Error,
    Info,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub text: String,
    serial: u64,
}

#[derive(Clone, Copy)]
pub struct Flash {
    current: RwSignal<Option<FlashMessage>>,
    next_serial: RwSignal<u64>,
}

impl Flash {
    pub fn new() -> Self {
        Flash {
            current: create_rw_signal(None),
            next_serial: create_rw_signal(0),
        }
    }

    pub fn current(&self) -> ReadSignal<Option<FlashMessage>> {
        self.current.read_only()
    }

    pub fn success(&self, text: impl Into<String>) {
        self.notify(FlashKind::Success, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.notify(FlashKind::Error, text.into());
    }

    pub fn info(&self, text: impl Into<String>) {
        self.notify(FlashKind::Info, text.into());
    }

    fn notify(&self, kind: FlashKind, text: String) {
        let serial = self.next_serial.get_untracked();
        self.next_serial.set(serial + 1);
        self.current.set(Some(FlashMessage { kind, text, serial }));

        let current = self.current;
        spawn_local(async move {
            TimeoutFuture::new(DISMISS_AFTER_MS).await;
            // Only dismiss if a newer message has not replaced this one.
            if current.get_untracked().map(|m| m.serial) == Some(serial) {
                current.set(None);
            }
        });
    }
}

pub fn provide_flash() -> Flash {
    let flash = Flash::new();
    provide_context(flash);
    flash
}

pub fn use_flash() -> Flash {
    expect_context::<Flash>()
}

/// Renders the active message, if any. Mounted once in the app shell.
#[component]
pub fn FlashOutlet() -> impl IntoView {
    let flash = use_flash();
    let current = flash.current();

    view! {
        {move || current.get().map(|message| {
            let class = match message.kind {
                FlashKind::Success => "flash flash-success",
                FlashKind::Error => "flash flash-error",
                FlashKind::Info => "flash flash-info",
            };
            view! { <div class=class role="status">{ message.text }</div> }
        })}
    }
}
