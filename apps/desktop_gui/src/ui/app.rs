use client_core::ControllerState;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{Item, ItemId};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::forms::ItemForm;

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub server_url: String,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            server_url: client_core::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// What a click on an item card asked for.
enum CardAction {
    Edit(Item),
    Delete(ItemId),
}

pub struct DashboardApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    server_url: String,
    /// Latest controller snapshot from the backend worker.
    catalog: ControllerState,
    loaded: bool,
    create_form: ItemForm,
    edit_form: ItemForm,
    status: String,
    last_error: Option<UiError>,
}

impl DashboardApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            server_url: startup.server_url,
            catalog: ControllerState::default(),
            loaded: false,
            create_form: ItemForm::default(),
            edit_form: ItemForm::default(),
            status: "Starting...".to_string(),
            last_error: None,
        }
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                    self.last_error = None;
                }
                UiEvent::StateChanged(state) => self.apply_snapshot(state),
                UiEvent::Error(err) => {
                    tracing::warn!(
                        context = ?err.context(),
                        category = ?err.category(),
                        "{}",
                        err.message()
                    );
                    self.status = err.summary();
                    self.last_error = Some(err);
                }
            }
        }
    }

    fn apply_snapshot(&mut self, state: ControllerState) {
        self.loaded = true;
        if state.edit_modal_open {
            if let Some(editing) = &state.editing_item {
                if self.edit_form.source != Some(editing.id) {
                    self.edit_form = ItemForm::from_item(editing);
                }
            }
        } else {
            self.edit_form.source = None;
        }
        self.catalog = state;
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        let mut open_create = false;
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Food catalog");
                ui.small(&self.server_url);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("New item").clicked() {
                        open_create = true;
                    }
                });
            });
            ui.add_space(6.0);
        });

        if open_create {
            self.create_form.reset();
            self.dispatch(BackendCommand::OpenCreateModal);
        }
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            if self.last_error.is_some() {
                let color = ui.visuals().error_fg_color;
                ui.colored_label(color, &self.status);
            } else {
                ui.label(&self.status);
            }
        });
    }

    fn show_item_list(&mut self, ctx: &egui::Context) {
        let mut action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            if !self.loaded {
                ui.spinner();
                return;
            }
            if self.catalog.items.is_empty() {
                ui.label("No items yet. Use \"New item\" to add one.");
                return;
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for item in &self.catalog.items {
                        if let Some(clicked) = show_item_card(ui, item) {
                            action = Some(clicked);
                        }
                        ui.add_space(8.0);
                    }
                });
        });

        match action {
            Some(CardAction::Edit(item)) => self.dispatch(BackendCommand::BeginEdit { item }),
            Some(CardAction::Delete(id)) => self.dispatch(BackendCommand::DeleteItem { id }),
            None => {}
        }
    }

    fn show_create_modal(&mut self, ctx: &egui::Context) {
        if !self.catalog.create_modal_open {
            return;
        }

        let mut open = true;
        let mut submitted = false;
        let mut cancelled = false;
        let form = &mut self.create_form;
        egui::Window::new("New item")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                form.show(ui, "create_item_form");
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Add item").clicked() {
                        submitted = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                });
            });

        if submitted {
            self.submit_create_form();
        } else if cancelled || !open {
            self.close_create_modal();
        }
    }

    /// The worker closes the modal as part of `CreateItem`.
    fn submit_create_form(&mut self) {
        if let Some(draft) = self.create_form.submit() {
            self.catalog.create_modal_open = false;
            self.dispatch(BackendCommand::CreateItem { draft });
            self.create_form.reset();
        }
    }

    fn close_create_modal(&mut self) {
        // Hide right away; the next snapshot confirms it.
        self.catalog.create_modal_open = false;
        self.dispatch(BackendCommand::CloseCreateModal);
    }

    fn show_edit_modal(&mut self, ctx: &egui::Context) {
        if !self.catalog.edit_modal_open {
            return;
        }

        let mut open = true;
        let mut submitted = false;
        let mut cancelled = false;
        let form = &mut self.edit_form;
        egui::Window::new("Edit item")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                form.show(ui, "edit_item_form");
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Save changes").clicked() {
                        submitted = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                });
            });

        if submitted {
            self.submit_edit_form();
        } else if cancelled || !open {
            self.close_edit_modal();
        }
    }

    fn submit_edit_form(&mut self) {
        if let Some(draft) = self.edit_form.submit() {
            self.catalog.edit_modal_open = false;
            self.edit_form.source = None;
            self.dispatch(BackendCommand::UpdateItem { draft });
        }
    }

    fn close_edit_modal(&mut self) {
        self.catalog.edit_modal_open = false;
        self.edit_form.source = None;
        self.dispatch(BackendCommand::CloseEditModal);
    }
}

fn show_item_card(ui: &mut egui::Ui, item: &Item) -> Option<CardAction> {
    let mut action = None;
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.heading(&item.name);
                if !item.description.is_empty() {
                    ui.label(&item.description);
                }
                if !item.image.is_empty() {
                    ui.small(&item.image);
                }
                ui.horizontal(|ui| {
                    ui.strong(format!("$ {}", item.price));
                    if item.available {
                        ui.label("Available");
                    } else {
                        ui.weak("Unavailable");
                    }
                });
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Delete").clicked() {
                    action = Some(CardAction::Delete(item.id));
                }
                if ui.button("Edit").clicked() {
                    action = Some(CardAction::Edit(item.clone()));
                }
            });
        });
    });
    action
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_header(ctx);
        self.show_status_bar(ctx);
        self.show_item_list(ctx);
        self.show_create_modal(ctx);
        self.show_edit_modal(ctx);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
