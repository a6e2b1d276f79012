const APP_NAME: &str = "Macro Image";

/// Best-effort desktop notification; failures are only logged.
pub fn send(summary: &str, body: impl Into<String>) {
    let body = body.into();
    match notify_rust::Notification::new()
        .appname(APP_NAME)
        .summary(summary)
        .body(&body)
        .show()
    {
        Ok(_) => tracing::debug!(summary, "sent desktop notification"),
        Err(err) => tracing::warn!("system notification failed: {err}"),
    }
}
