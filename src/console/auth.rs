//! Session commands

use crate::{console::render, error::AppResult, models::enums::Role, Console};

pub async fn login(console: &Console, username: &str, password: &str) -> AppResult<String> {
    let session = console.services.auth.login(username, password).await?;
    Ok(format!("Logged in as {}", render::session(&session)))
}

pub fn logout(console: &Console) -> AppResult<String> {
    console.services.auth.logout()?;
    Ok("Logged out".to_string())
}

pub async fn whoami(console: &Console) -> AppResult<String> {
    let session = console.services.session.require()?;
    let mut out = render::session(&session);

    if session.role == Role::Driver {
        // A driver account without a driver record is still a valid login
        match console.services.auth.current_driver().await {
            Ok(driver) => out.push_str(&format!("\nDriver #{} {}", driver.id, driver.full_name())),
            Err(e) => tracing::warn!("No driver record for user {}: {}", session.id, e),
        }
    }
    Ok(out)
}
