//! Backend worker: owns the catalog controller on its own thread and applies
//! UI commands strictly in the order they were queued.

use std::{sync::Arc, thread};

use client_core::{CatalogController, HttpCatalogApi};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(server_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let api = match HttpCatalogApi::new(&server_url) {
                Ok(api) => api,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_client_error(
                        UiErrorContext::BackendStartup,
                        &err,
                    )));
                    tracing::error!(%server_url, "invalid server url: {err}");
                    return;
                }
            };
            let mut controller = CatalogController::new(Arc::new(api));

            match controller.load().await {
                Ok(()) => {
                    let _ = ui_tx.try_send(UiEvent::Info(format!(
                        "Loaded {} items from {server_url}",
                        controller.items().len()
                    )));
                }
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_client_error(
                        UiErrorContext::Load,
                        &err,
                    )));
                }
            }
            publish_snapshot(&ui_tx, &controller);

            while let Ok(cmd) = cmd_rx.recv() {
                if let Some(event) = apply_command(&mut controller, cmd).await {
                    let _ = ui_tx.try_send(event);
                }
                publish_snapshot(&ui_tx, &controller);
            }
            tracing::info!("ui command queue closed; backend worker exiting");
        });
    });
}

/// Sends the controller state to the UI. Returns false when the snapshot was
/// dropped; the next one supersedes it.
pub fn publish_snapshot(ui_tx: &Sender<UiEvent>, controller: &CatalogController) -> bool {
    match ui_tx.try_send(UiEvent::StateChanged(controller.state().clone())) {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(
                full = err.is_full(),
                "dropped state snapshot for the ui queue"
            );
            false
        }
    }
}

/// Applies one UI command and returns the event to report, if any.
/// Submitting a form also closes its modal, before the server round trip.
pub async fn apply_command(
    controller: &mut CatalogController,
    cmd: BackendCommand,
) -> Option<UiEvent> {
    match cmd {
        BackendCommand::OpenCreateModal => {
            controller.open_create_modal();
            None
        }
        BackendCommand::CloseCreateModal => {
            controller.close_create_modal();
            None
        }
        BackendCommand::BeginEdit { item } => {
            controller.begin_edit(item);
            None
        }
        BackendCommand::CloseEditModal => {
            controller.close_edit_modal();
            None
        }
        BackendCommand::CreateItem { draft } => {
            controller.close_create_modal();
            match controller.create(draft).await {
                Ok(item) => Some(UiEvent::Info(format!("Added \"{}\"", item.name))),
                Err(err) => Some(UiEvent::Error(UiError::from_client_error(
                    UiErrorContext::Create,
                    &err,
                ))),
            }
        }
        BackendCommand::UpdateItem { draft } => {
            // editing_item outlives the close, so the update still has its target.
            controller.close_edit_modal();
            match controller.update(draft).await {
                Ok(item) => Some(UiEvent::Info(format!("Saved \"{}\"", item.name))),
                Err(err) => Some(UiEvent::Error(UiError::from_client_error(
                    UiErrorContext::Update,
                    &err,
                ))),
            }
        }
        BackendCommand::DeleteItem { id } => match controller.delete(id).await {
            Ok(()) => Some(UiEvent::Info(format!("Deleted item {id}"))),
            Err(err) => Some(UiEvent::Error(UiError::from_client_error(
                UiErrorContext::Delete,
                &err,
            ))),
        },
    }
}
