use crate::tile::Properties;

#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct PropertyRow {
    pub key: String,
    pub value: String,
}

impl PropertyRow {
    fn is_blank(&self) -> bool {
        self.key.is_empty() && self.value.is_empty()
    }
}

/// Key/value rows of a tile's properties, plus one trailing blank row for entering new ones.
///
/// Edits stay in here until read back with [`properties`](Self::properties).
#[derive(Default)]
pub struct PropertiesTableModel {
    rows: Vec<PropertyRow>,
    new_row: PropertyRow,
    dirty: bool,
}

impl PropertiesTableModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all rows
    pub fn update(&mut self, properties: &Properties) {
        self.rows = properties.iter()
            .map(|(k,v)| PropertyRow { key: k.clone(), value: v.clone() } )
            .collect();
        self.new_row = Default::default();
        self.dirty = false;
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.new_row = Default::default();
        self.dirty = false;
    }

    /// Read out the rows. Rows without key are skipped, later duplicates win.
    pub fn properties(&self) -> Properties {
        let mut dest = Properties::default();
        for row in self.rows.iter().chain(std::iter::once(&self.new_row)) {
            if !row.key.is_empty() {
                dest.insert(row.key.clone(), row.value.clone());
            }
        }
        dest
    }

    pub fn rows(&self) -> &[PropertyRow] {
        &self.rows
    }

    /// Including the blank row
    pub fn row_count(&self) -> usize {
        self.rows.len() + 1
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_key(&mut self, row: usize, key: impl Into<String>) {
        if let Some(r) = self.row_mut(row) {
            r.key = key.into();
            self.dirty = true;
            self.commit_new_row();
        }
    }

    pub fn set_value(&mut self, row: usize, value: impl Into<String>) {
        if let Some(r) = self.row_mut(row) {
            r.value = value.into();
            self.dirty = true;
            self.commit_new_row();
        }
    }

    pub fn remove_row(&mut self, row: usize) {
        if row < self.rows.len() {
            self.rows.remove(row);
            self.dirty = true;
        }
    }

    /// Promote the blank row to a real row once something was typed into it
    pub fn commit_new_row(&mut self) {
        if !self.new_row.is_blank() {
            self.rows.push(std::mem::take(&mut self.new_row));
        }
    }

    fn row_mut(&mut self, row: usize) -> Option<&mut PropertyRow> {
        if row == self.rows.len() {
            Some(&mut self.new_row)
        } else {
            self.rows.get_mut(row)
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) {
        let mut remove = None;
        let mut changed = false;

        egui::Grid::new("tile_properties_grid")
            .num_columns(3)
            .striped(true)
            .show(ui, |ui| {
                ui.strong("Name");
                ui.strong("Value");
                ui.end_row();

                let width = (ui.available_width() / 2. - 24.).max(48.);

                for (i,row) in self.rows.iter_mut().enumerate() {
                    changed |= ui.add(egui::TextEdit::singleline(&mut row.key).desired_width(width)).changed();
                    changed |= ui.add(egui::TextEdit::singleline(&mut row.value).desired_width(width)).changed();
                    if ui.small_button("🗙").on_hover_text("Remove property").clicked() {
                        remove = Some(i);
                    }
                    ui.end_row();
                }

                changed |= ui.add(egui::TextEdit::singleline(&mut self.new_row.key).hint_text("new property").desired_width(width)).changed();
                changed |= ui.add(egui::TextEdit::singleline(&mut self.new_row.value).desired_width(width)).changed();
                ui.end_row();
            });

        if changed {
            self.dirty = true;
            self.commit_new_row();
        }
        if let Some(i) = remove {
            self.remove_row(i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(v: &[(&str,&str)]) -> Properties {
        v.iter().map(|(k,v)| (k.to_string(), v.to_string()) ).collect()
    }

    #[test]
    fn update_and_read_back() {
        let mut model = PropertiesTableModel::new();
        let p = props(&[("a","1"),("b","2")]);
        model.update(&p);
        assert_eq!(model.row_count(), 3);
        assert_eq!(model.properties(), p);
        assert!(!model.is_dirty());
    }

    #[test]
    fn typing_into_blank_row_adds_property() {
        let mut model = PropertiesTableModel::new();
        model.update(&props(&[("a","1")]));
        model.set_key(1, "b");
        assert_eq!(model.rows().len(), 2);
        model.set_value(1, "2");
        assert_eq!(model.properties(), props(&[("a","1"),("b","2")]));
        assert_eq!(model.row_count(), 3);
        assert!(model.is_dirty());
    }

    #[test]
    fn empty_keys_are_dropped_and_duplicates_overwrite() {
        let mut model = PropertiesTableModel::new();
        model.update(&props(&[("a","1"),("b","2")]));
        model.set_key(1, "");
        model.set_key(2, "a");
        model.set_value(2, "3");
        assert_eq!(model.properties(), props(&[("a","3")]));
    }

    #[test]
    fn remove_row_ignores_blank_row() {
        let mut model = PropertiesTableModel::new();
        model.update(&props(&[("a","1")]));
        model.remove_row(1);
        assert_eq!(model.rows().len(), 1);
        model.remove_row(0);
        assert!(model.properties().is_empty());
    }
}
