/// Sink for transient, user-visible messages.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Keeps every notice in order. Handy for embedding hosts that render later.
#[derive(Clone, Debug, Default)]
pub struct NoticeLog {
    pub messages: Vec<String>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }
}

impl Notifier for NoticeLog {
    fn notify(&mut self, message: &str) {
        tracing::debug!(%message, "notice");
        self.messages.push(message.to_string());
    }
}
