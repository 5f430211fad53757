pub mod applications;
pub mod apply;
pub mod auth;
pub mod awards;
pub mod dashboard;
pub mod evaluate;
pub mod open;
pub mod profile;
pub mod project;
pub mod reference;
pub mod rounds;
pub mod score;

use anyhow::Result;
use portal::flow::{FlowError, StepFlow, Wizard};

use crate::output;

/// Ask for each remaining step until the flow completes or the user stops.
///
/// `ask` builds the current step's input from the shared form data.
pub async fn drive<W, F>(flow: &mut StepFlow<W>, mut ask: F) -> Result<bool>
where
    W: Wizard,
    F: FnMut(W::Step, &W::Data) -> Result<W::Input>,
{
    while let Some(step) = flow.current_step() {
        output::heading(format!("Step {}: {}", flow.current_number(), step));
        let input = ask(step, flow.data())?;
        match flow.submit(input).await {
            Ok(saved) => output::success(format!("{saved} saved")),
            Err(FlowError::Request(e)) if e.is_canceled() => return Ok(false),
            Err(err) => {
                output::flow_error(&err);
                if !crate::prompt::confirm("Try this step again?", true)? {
                    return Ok(false);
                }
            }
        }
    }
    Ok(true)
}
