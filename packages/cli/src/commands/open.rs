use anyhow::Result;
use portal::routes::menu;

use crate::context::Context;
use crate::output;

pub fn run(ctx: &Context, path: &str) -> Result<()> {
    let role = ctx.session().map(|s| s.role());
    let resolved = ctx.routes().resolve(path, role)?;
    output::success(format!("{} opens {}", path, resolved.view.title()));
    for (name, value) in &resolved.params {
        output::info(format!("{name} = {value}"));
    }

    if let Some(role) = role {
        output::heading(format!("Pages for {role}"));
        let rows = menu(role)
            .into_iter()
            .map(|r| vec![r.view.title().to_string(), r.path.to_string()])
            .collect::<Vec<_>>();
        output::table(&["Page", "Path"], &rows);
    }
    Ok(())
}
