use client_core::CatalogError;

use super::*;

#[test]
fn classifies_backend_command_processor_disconnect_as_transport_error() {
    let err = UiError::from_message(
        UiErrorContext::General,
        "Backend command processor disconnected (possible startup/runtime failure)",
    );
    assert_eq!(err.category(), UiErrorCategory::Transport);
}

#[test]
fn missing_record_maps_to_not_found() {
    let err = UiError::from_catalog_error(
        UiErrorContext::LoadScript,
        &CatalogError::NotFound("proxmox_scripts/Docker".to_string()),
    );
    assert_eq!(err.category(), UiErrorCategory::NotFound);
    assert_eq!(err.display_message(), "That script is not in the catalog.");
}

#[test]
fn invalid_url_is_a_validation_error() {
    let err = UiError::from_catalog_error(
        UiErrorContext::LoadCatalog,
        &CatalogError::InvalidUrl("::".to_string()),
    );
    assert_eq!(err.category(), UiErrorCategory::Validation);
    assert_eq!(err.context(), UiErrorContext::LoadCatalog);
}

#[test]
fn unreachable_backend_gets_actionable_text() {
    assert_eq!(
        classify_catalog_failure("catalog request failed: error sending request for url"),
        "Catalog backend unreachable; check the backend URL/network and press Reload."
    );
    assert_eq!(
        classify_catalog_failure("malformed catalog response: EOF"),
        "Catalog error: malformed catalog response: EOF"
    );
}

#[test]
fn clipboard_failures_keep_their_message() {
    let err = UiError::from_message(UiErrorContext::Clipboard, "clipboard is busy");
    assert_eq!(err.category(), UiErrorCategory::Unknown);
    assert_eq!(err.display_message(), "Unexpected: clipboard is busy");
}
