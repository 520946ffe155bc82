use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Destructive,
}

/// A non-blocking, user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

/// Publishes notices to whoever renders them. Publishing never blocks and
/// never fails; a dropped receiver just means nobody is listening.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    tx: Option<UnboundedSender<Notice>>,
}

impl Notifier {
    pub fn channel() -> (Self, UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// Logs only.
    pub fn silent() -> Self {
        Self { tx: None }
    }

    pub fn info(&self, title: impl Into<String>, description: impl Into<String>) {
        self.publish(Notice {
            level: NoticeLevel::Info,
            title: title.into(),
            description: description.into(),
        });
    }

    pub fn destructive(&self, title: impl Into<String>, description: impl Into<String>) {
        self.publish(Notice {
            level: NoticeLevel::Destructive,
            title: title.into(),
            description: description.into(),
        });
    }

    fn publish(&self, notice: Notice) {
        log::debug!("Notice [{:?}] {}: {}", notice.level, notice.title, notice.description);
        if let Some(tx) = &self.tx {
            let _ = tx.send(notice);
        }
    }
}
