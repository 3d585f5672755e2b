use crate::api::Payload;

use super::action::Action;

/// Build the request body from the current vault input.
///
/// The text is trimmed and otherwise passed through unchecked; the service
/// rejects bad paths. Empty text yields an empty payload (default vault).
pub fn build_payload(vault_input: &str) -> Payload {
    let vault = vault_input.trim();
    if vault.is_empty() {
        Payload::default()
    } else {
        Payload {
            vault: Some(vault.to_string()),
            dry_run: None,
        }
    }
}

/// `build_payload` plus the `dry_run` flag for the dry-run action.
pub fn payload_for(action: Action, vault_input: &str) -> Payload {
    let mut payload = build_payload(vault_input);
    if action.is_dry_run() {
        payload.dry_run = Some(true);
    }
    payload
}
