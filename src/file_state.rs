use crate::path;

/// Which vault file a view shows, and whether its text differs from disk.
#[derive(Clone, Debug, Default)]
pub struct FileState {
    pub current_path: Option<String>,
    pub is_dirty: bool,
    pub is_read_only: bool,
}

impl FileState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_name(&self) -> String {
        self.current_path
            .as_deref()
            .map(|p| path::parse(p).name)
            .unwrap_or_else(|| "[No Name]".to_string())
    }

    pub fn mark_dirty(&mut self) {
        if !self.is_read_only {
            self.is_dirty = true;
        }
    }

    pub fn mark_clean(&mut self) {
        self.is_dirty = false;
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.current_path = Some(path.into());
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.is_read_only = read_only;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_uses_base_name() {
        let mut state = FileState::new();
        assert_eq!(state.file_name(), "[No Name]");
        state.set_path("budget/2024.csv");
        assert_eq!(state.file_name(), "2024.csv");
    }

    #[test]
    fn read_only_state_never_turns_dirty() {
        let mut state = FileState::new();
        state.set_read_only(true);
        state.mark_dirty();
        assert!(!state.is_dirty);

        state.set_read_only(false);
        state.mark_dirty();
        assert!(state.is_dirty);
        state.mark_clean();
        assert!(!state.is_dirty);
    }
}
