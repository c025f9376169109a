// Client-side entry point, served with `trunk serve`.
use prorec::app::App;

pub fn main() {
    console_error_panic_hook::set_once();

    leptos::mount_to_body(App);
}
