mod command;
mod config;
mod data;
mod error;
mod focus;
mod list;
mod markers;
mod query;
mod session;
mod shumate;
mod surface;
mod ui;

use gtk::glib;
use gtk::prelude::*;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::data::APP_ID;

fn main() -> glib::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load().unwrap_or_else(|err| {
        error!(error = %err, "could not read settings, using defaults");
        Settings::default()
    });

    // reqwest needs a Tokio runtime even though futures run on the GLib loop
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(err) => {
            error!(error = %err, "failed to start async runtime");
            return glib::ExitCode::FAILURE;
        }
    };
    let _guard = rt.enter();

    let app = libadwaita::Application::builder()
        .application_id(APP_ID)
        .build();

    app.connect_activate(move |app| {
        if let Err(err) = ui::build_ui(app, &settings) {
            error!(error = %err, "failed to build main window");
            app.quit();
        }
    });

    let exit_code = app.run();

    // Keep runtime alive until app exits
    drop(_guard);
    drop(rt);

    exit_code
}
