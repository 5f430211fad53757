use anyhow::Result;
use common::Role;
use portal::dashboard::{admin_summary, judge_summary};

use crate::context::Context;
use crate::output;

pub async fn run(ctx: &Context) -> Result<()> {
    let client = ctx.guard("/dashboard")?;
    let role = ctx.session().map(|s| s.role());

    let rows = match role {
        Some(Role::SuperAdmin | Role::Admin) => {
            let s = admin_summary(&client).await?;
            vec![
                ("Awards", s.awards),
                ("Applications", s.applications),
                ("Pending", s.pending),
                ("Approved", s.approved),
                ("Rejected", s.rejected),
                ("Categories", s.categories),
                ("Judges", s.judges),
            ]
        }
        Some(Role::Judge) => {
            let s = judge_summary(&client).await?;
            vec![
                ("Awards", s.awards),
                ("Applications", s.applications),
                ("In screening", s.in_screening),
            ]
        }
        _ => {
            output::info("Use `fellowship apply` and `fellowship profile` to manage your submissions.");
            return Ok(());
        }
    };

    if ctx.json {
        let map = rows
            .iter()
            .map(|(label, value)| (label.to_string(), *value))
            .collect::<std::collections::BTreeMap<_, _>>();
        return output::json(&map);
    }
    let rows = rows
        .into_iter()
        .map(|(label, value)| vec![label.to_string(), value.to_string()])
        .collect::<Vec<_>>();
    output::table(&["", "Count"], &rows);
    Ok(())
}
