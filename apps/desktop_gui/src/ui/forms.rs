//! Add/edit item form: text buffers plus the checks run before submitting.

use eframe::egui;
use shared::domain::{Item, ItemDraft, ItemId};

#[derive(Debug, Clone, Default)]
pub struct ItemForm {
    pub name: String,
    pub image: String,
    pub price: String,
    pub description: String,
    /// Item whose values were loaded into the form, for the edit modal.
    pub source: Option<ItemId>,
    pub error: Option<String>,
}

impl ItemForm {
    pub fn from_item(item: &Item) -> Self {
        let draft = item.draft();
        Self {
            name: draft.name,
            image: draft.image,
            price: draft.price,
            description: draft.description,
            source: Some(item.id),
            error: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns the trimmed draft, or records the validation error on the form.
    pub fn submit(&mut self) -> Option<ItemDraft> {
        let draft = ItemDraft {
            name: self.name.trim().to_string(),
            image: self.image.trim().to_string(),
            price: self.price.trim().to_string(),
            description: self.description.trim().to_string(),
        };
        match draft.validate() {
            Ok(()) => {
                self.error = None;
                Some(draft)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, id_salt: &str) {
        egui::Grid::new(id_salt)
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Image URL");
                ui.add(
                    egui::TextEdit::singleline(&mut self.image)
                        .hint_text("https://...")
                        .desired_width(280.0),
                );
                ui.end_row();

                ui.label("Name");
                ui.add(
                    egui::TextEdit::singleline(&mut self.name)
                        .hint_text("Ex: Ham sandwich")
                        .desired_width(280.0),
                );
                ui.end_row();

                ui.label("Price");
                ui.add(
                    egui::TextEdit::singleline(&mut self.price)
                        .hint_text("Ex: 19.90")
                        .desired_width(120.0),
                );
                ui.end_row();

                ui.label("Description");
                ui.add(
                    egui::TextEdit::multiline(&mut self.description)
                        .desired_rows(3)
                        .desired_width(280.0),
                );
                ui.end_row();
            });

        if let Some(error) = &self.error {
            let color = ui.visuals().error_fg_color;
            ui.colored_label(color, error);
        }
    }
}
