//! Session commands.

use stockpilot_console::session::{Session, SessionError};

/// Report whether the provided credentials produced a session.
///
/// The actual login happens globally in `main` when `--username` and
/// `--password` are set; this command just confirms the result.
pub fn login(session: &Session) -> Result<(), SessionError> {
    match session.user() {
        Some(user) if user.is_authenticated => {
            tracing::info!(
                "Logged in as {}",
                user.username.as_deref().unwrap_or("<unnamed>")
            );
        }
        _ => tracing::warn!("Not logged in; pass --username and --password"),
    }
    Ok(())
}

/// Ask the backend who the current session belongs to.
pub async fn whoami(session: &mut Session) -> Result<(), SessionError> {
    let user = session.refresh().await?;
    if user.is_authenticated {
        println!("{}", user.username.as_deref().unwrap_or("<unnamed>"));
    } else {
        println!("anonymous");
    }
    Ok(())
}
