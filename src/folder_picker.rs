//! Selection state for the "pick a folder" dialog.

use crate::vault::ROOT;

/// Case-insensitive subsequence match: every query character appears in
/// `candidate` in order.
pub fn matches(query: &str, candidate: &str) -> bool {
    let mut chars = candidate.chars().flat_map(char::to_lowercase);
    query
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| !c.is_whitespace())
        .all(|q| chars.any(|c| c == q))
}

pub struct FolderPicker {
    folders: Vec<String>,
    input: String,
    selected_index: usize,
    filtered_folders: Vec<usize>,
}

impl FolderPicker {
    pub fn new(folders: Vec<String>) -> Self {
        let mut picker = Self {
            folders,
            input: String::new(),
            selected_index: 0,
            filtered_folders: Vec::new(),
        };
        picker.update_filter();
        picker
    }

    pub fn reset(&mut self) {
        self.input.clear();
        self.selected_index = 0;
        self.update_filter();
    }

    pub fn set_input(&mut self, input: &str) {
        self.input = input.to_string();
        self.update_filter();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    fn update_filter(&mut self) {
        let query = self.input.trim();

        self.filtered_folders = self
            .folders
            .iter()
            .enumerate()
            .filter(|(_, folder)| query.is_empty() || matches(query, folder))
            .map(|(idx, _)| idx)
            .collect();

        // Reset selection if out of bounds
        if self.selected_index >= self.filtered_folders.len() {
            self.selected_index = 0;
        }
    }

    /// Folders shown for the current input, in vault order.
    pub fn visible(&self) -> impl Iterator<Item = &str> {
        self.filtered_folders.iter().map(|&idx| self.folders[idx].as_str())
    }

    pub fn selected(&self) -> Option<&str> {
        self.filtered_folders
            .get(self.selected_index)
            .map(|&idx| self.folders[idx].as_str())
    }

    /// Move the selection onto `folder` if it is visible.
    pub fn select(&mut self, folder: &str) -> bool {
        let position = self
            .filtered_folders
            .iter()
            .position(|&idx| self.folders[idx] == folder);
        if let Some(position) = position {
            self.selected_index = position;
        }
        position.is_some()
    }

    pub fn select_next(&mut self) {
        if !self.filtered_folders.is_empty() {
            self.selected_index = (self.selected_index + 1) % self.filtered_folders.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.filtered_folders.is_empty() {
            if self.selected_index == 0 {
                self.selected_index = self.filtered_folders.len() - 1;
            } else {
                self.selected_index -= 1;
            }
        }
    }

    /// Vault-relative path of the chosen folder (`""` for the root).
    pub fn confirm(&self) -> Option<String> {
        self.selected().map(|folder| {
            if folder == ROOT {
                String::new()
            } else {
                folder.to_string()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker() -> FolderPicker {
        FolderPicker::new(
            ["/", "finance", "finance/2024", "notes", "projects/sheets"]
                .into_iter()
                .map(String::from)
                .collect(),
        )
    }

    #[test]
    fn subsequence_matching_ignores_case_and_spaces() {
        assert!(matches("fin24", "finance/2024"));
        assert!(matches("PSH", "projects/sheets"));
        assert!(matches("fin 24", "finance/2024"));
        assert!(!matches("zz", "finance"));
        assert!(!matches("42", "finance/2024"));
    }

    #[test]
    fn empty_input_lists_everything_and_selects_root() {
        let picker = picker();
        assert_eq!(picker.visible().count(), 5);
        assert_eq!(picker.selected(), Some("/"));
        assert_eq!(picker.confirm(), Some(String::new()));
    }

    #[test]
    fn filtering_keeps_vault_order() {
        let mut picker = picker();
        picker.set_input("fin");
        assert_eq!(picker.visible().collect::<Vec<_>>(), vec!["finance", "finance/2024"]);
        assert_eq!(picker.confirm().as_deref(), Some("finance"));
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut picker = picker();
        picker.set_input("fin");
        picker.select_next();
        assert_eq!(picker.selected(), Some("finance/2024"));
        picker.select_next();
        assert_eq!(picker.selected(), Some("finance"));
        picker.select_previous();
        assert_eq!(picker.selected(), Some("finance/2024"));
    }

    #[test]
    fn selection_resets_when_filter_shrinks() {
        let mut picker = picker();
        picker.select_next();
        picker.select_next();
        picker.select_next();
        picker.set_input("sheets");
        assert_eq!(picker.selected(), Some("projects/sheets"));

        picker.set_input("nothing-here");
        assert_eq!(picker.selected(), None);
        assert_eq!(picker.confirm(), None);

        assert!(!picker.select("notes"));

        picker.reset();
        assert!(picker.select("notes"));
        assert_eq!(picker.selected(), Some("notes"));

        picker.reset();
        assert_eq!(picker.input(), "");
        assert_eq!(picker.selected(), Some("/"));
    }
}
