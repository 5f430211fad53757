use anyhow::{Context as _, Result};
use client::Session;
use common::models::LoginForm;

use crate::context::Context;
use crate::{output, prompt};

pub async fn login(ctx: &Context, email: Option<String>) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => prompt::text("Email", "")?,
    };
    let form = LoginForm {
        email: email.trim().to_string(),
        password: prompt::password("Password")?,
    };

    let response = ctx.anonymous().auth().login(&form).await?;
    let session = Session::from_token(response.token).context("The API returned an unusable token")?;
    ctx.store.save(&session)?;

    let name = response
        .user
        .and_then(|u| u.first_name)
        .unwrap_or_else(|| session.subject().to_string());
    output::success(format!("Signed in as {name} ({})", session.role()));
    Ok(())
}

pub fn logout(ctx: &Context) -> Result<()> {
    if ctx.store.clear()? {
        output::success(format!("Signed out ({} removed)", ctx.store.path().display()));
    } else {
        output::info("No stored session");
    }
    Ok(())
}

pub fn whoami(ctx: &Context) -> Result<()> {
    let Some(session) = ctx.session() else {
        output::info("Not signed in");
        return Ok(());
    };
    if ctx.json {
        return output::json(session.claims());
    }
    output::table(
        &["User", "Role", "Expires"],
        &[vec![
            session.subject().to_string(),
            session.role().to_string(),
            output::or_dash(session.expires_at().map(|t| t.format("%Y-%m-%d %H:%M UTC"))),
        ]],
    );
    Ok(())
}
