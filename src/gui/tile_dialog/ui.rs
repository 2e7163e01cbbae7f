use egui::TextureOptions;

use crate::gui::prompt::Prompter;
use crate::gui::texture::{fit_size, TextureCell};

use super::{DialogIntent, TileDialog};

impl TileDialog {
    /// Draw the dialog and apply what the user did in this frame
    pub fn ui(&mut self, ctx: &egui::Context, prompter: &mut impl Prompter) {
        let mut open = self.is_open();

        egui::Window::new(self.title.clone())
            .id(egui::Id::new("tile_dialog"))
            .open(&mut open)
            .collapsible(false)
            .pivot(egui::Align2::CENTER_CENTER)
            .default_pos(ctx.screen_rect().center())
            .default_size([560., 380.])
            .show(ctx, |ui| {
                egui::TopBottomPanel::bottom("tile_dialog_buttons")
                    .show_inside(ui, |ui| self.buttons_ui(ui) );
                egui::SidePanel::left("tile_dialog_list")
                    .resizable(true)
                    .default_width(200.)
                    .show_inside(ui, |ui| self.list_ui(ui) );
                egui::CentralPanel::default()
                    .show_inside(ui, |ui| self.properties_ui(ui) );
            });

        // window close button
        if !open {
            self.queue(DialogIntent::Confirm);
        }

        self.dispatch_pending(prompter);
    }

    fn buttons_ui(&mut self, ui: &mut egui::Ui) {
        let c = self.controls;
        ui.add_space(4.);
        ui.horizontal(|ui| {
            if ui.add_enabled(c.add, egui::Button::new("Add Tile")).clicked() {
                self.queue(DialogIntent::Add);
            }
            if ui.add_enabled(c.delete, egui::Button::new("Delete Tile")).clicked() {
                self.queue(DialogIntent::Delete);
            }
            if ui.add_enabled(c.change_image, egui::Button::new("Change Image")).clicked() {
                self.queue(DialogIntent::ChangeImage);
            }
            if ui.add_enabled(c.duplicate, egui::Button::new("Duplicate Tile")).clicked() {
                self.queue(DialogIntent::Duplicate);
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("OK").clicked() {
                    self.queue(DialogIntent::Confirm);
                }
            });
        });

        // OK is the default button, unless a text field has focus
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter) );
        if enter && !ui.ctx().wants_keyboard_input() {
            self.queue(DialogIntent::Confirm);
        }
    }

    fn list_ui(&mut self, ui: &mut egui::Ui) {
        let ctx = ui.ctx().clone();
        let scroll = self.list.take_scroll_request();
        let renderer = self.list.renderer().clone();
        let mut clicked = None;

        egui::ScrollArea::vertical()
            .id_source("tile_list")
            .auto_shrink([false,false])
            .show(ui, |ui| {
                let tileset = self.tileset.borrow();

                if self.list.is_empty() {
                    ui.weak("No tiles");
                }

                for (index,&id) in self.list.rows().iter().enumerate() {
                    let Some(tile) = tileset.tile(id) else {continue};
                    let selected = self.list.selected_index() == Some(index);

                    let response = ui.horizontal(|ui| {
                        let cell = self.thumbnails.entry(id)
                            .or_insert_with(|| TextureCell::new(format!("tile_thumb_{}", id), TextureOptions::NEAREST) );
                        match cell.ensure_image(tile.image(), tile.image_evo(), &ctx) {
                            Some(tex) => {
                                ui.image((tex.id(), fit_size(tile.size(), renderer.thumb_size)));
                            },
                            None => {
                                ui.allocate_exact_size(egui::vec2(renderer.thumb_size, renderer.thumb_size), egui::Sense::hover());
                            },
                        }

                        let mut text = egui::RichText::new(renderer.label(tile));
                        if renderer.read_only {
                            text = text.weak();
                        }
                        ui.selectable_label(selected, text)
                    }).inner;

                    let response = if tile.properties().is_empty() {
                        response
                    } else {
                        response.on_hover_text(format!("{} properties", tile.properties().len()))
                    };

                    if response.clicked() && !selected {
                        clicked = Some(id);
                    }
                    if selected && scroll {
                        response.scroll_to_me(Some(egui::Align::Center));
                    }
                }
            });

        if let Some(id) = clicked {
            self.queue(DialogIntent::Select(Some(id)));
        }
    }

    fn properties_ui(&mut self, ui: &mut egui::Ui) {
        {
            let tileset = self.tileset.borrow();
            if let Some(source) = tileset.source() {
                ui.weak(format!("Loaded from {}, tiles cannot be edited here.", source.display()));
            } else if let Some(bmp) = tileset.tilebmp_file() {
                ui.weak(format!("Tiles are slices of {}.", bmp.display()));
            }
        }

        match self.current_tile {
            Some(id) => ui.label(format!("Properties of tile {}", id)),
            None => ui.weak("No tile selected"),
        };
        ui.separator();

        let enabled = self.controls.properties;
        ui.add_enabled_ui(enabled, |ui| {
            egui::ScrollArea::vertical()
                .id_source("tile_properties")
                .auto_shrink([false,false])
                .show(ui, |ui| self.table.ui(ui) );
        });
    }
}
