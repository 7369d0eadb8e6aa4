use quickpaste_core::actions::{submit_and_paste, SubmitOutcome, PASTE_SETTLE_DELAY};

use crate::desktop::{KeystrokePaster, SystemClipboard, TerminalWindow};
use crate::error::CliError;

pub async fn run_paste(text_parts: &[String]) -> Result<(), CliError> {
    let text = text_parts.join(" ");
    let clipboard = SystemClipboard::new()?;

    match submit_and_paste(
        &text,
        &clipboard,
        &TerminalWindow,
        &KeystrokePaster,
        PASTE_SETTLE_DELAY,
    )
    .await?
    {
        SubmitOutcome::Pasted => Ok(()),
        SubmitOutcome::Empty => Err(CliError::EmptyText),
    }
}
