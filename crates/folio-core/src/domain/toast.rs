/// Toast notification shown to the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub variant: ToastVariant,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

impl Toast {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            title: Some(title.into()),
            description: None,
            variant: ToastVariant::Default,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            title: Some(title.into()),
            description: Some(description.into()),
            variant: ToastVariant::Destructive,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Identity used to detect duplicate toasts.
    pub fn dedupe_key(&self) -> (Option<&str>, Option<&str>, ToastVariant) {
        (
            self.title.as_deref(),
            self.description.as_deref(),
            self.variant,
        )
    }
}
