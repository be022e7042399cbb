use crate::foundation::core::Rect;

/// Page-side geometry queries used once, when the hold period ends.
pub trait DockHost {
    /// Current on-screen rectangle of the illustration container.
    fn container_rect(&self) -> Rect;

    /// On-screen rectangle of the element with identifier `id`, if it is present.
    fn locate(&self, id: &str) -> Option<Rect>;
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Fixed page layout, for hosts that know their geometry up front (CLI, tests).
pub struct StaticHost {
    /// Illustration container rectangle.
    pub container: Rect,
    /// Dock target identifier and rectangle, `None` when the page has no target.
    pub target: Option<(String, Rect)>,
}

impl StaticHost {
    /// Layout with a dock target.
    pub fn with_target(container: Rect, id: impl Into<String>, target: Rect) -> Self {
        Self {
            container,
            target: Some((id.into(), target)),
        }
    }

    /// Layout without a dock target.
    pub fn without_target(container: Rect) -> Self {
        Self {
            container,
            target: None,
        }
    }
}

impl DockHost for StaticHost {
    fn container_rect(&self) -> Rect {
        self.container
    }

    fn locate(&self, id: &str) -> Option<Rect> {
        self.target
            .as_ref()
            .filter(|(target_id, _)| target_id == id)
            .map(|(_, rect)| *rect)
    }
}

impl<H: DockHost + ?Sized> DockHost for &H {
    fn container_rect(&self) -> Rect {
        (**self).container_rect()
    }

    fn locate(&self, id: &str) -> Option<Rect> {
        (**self).locate(id)
    }
}
