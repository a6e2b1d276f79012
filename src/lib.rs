pub mod alert;
pub mod app;
pub mod canvas;
pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod notification;
pub mod picker;
pub mod share;
pub mod state;
pub use app::{RunOptions, ShareDestination};
pub use error::{AppError, AppResult};

/// Entrypoint used by the command-line host.
pub fn run(options: RunOptions) -> AppResult<Option<share::ShareReceipt>> {
    logging::init();
    tracing::info!("starting Macro Image");

    let receipt = app::run_session(options)?;

    match receipt.as_ref() {
        Some(receipt) => tracing::info!(%receipt, "session complete"),
        None => tracing::info!("session complete without output"),
    }
    Ok(receipt)
}
