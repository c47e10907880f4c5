use dioxus::desktop::DesktopContext;

use super::FullscreenHost;

/// Fullscreen control over the desktop window handle.
pub struct DesktopFullscreenHost {
    window: DesktopContext,
}

impl DesktopFullscreenHost {
    #[must_use]
    pub fn new(window: DesktopContext) -> Self {
        Self { window }
    }
}

impl FullscreenHost for DesktopFullscreenHost {
    fn set_fullscreen(&self, enabled: bool) {
        self.window.set_fullscreen(enabled);
    }

    fn is_fullscreen(&self) -> bool {
        self.window.window.fullscreen().is_some()
    }
}
