use std::rc::Rc;

mod desktop;

/// Host fullscreen capability.
///
/// The host owns the real presentation state and can change it without
/// us asking (window-manager shortcuts), so callers must treat
/// `is_fullscreen` as the source of truth, not their last request.
pub trait FullscreenHost {
    fn set_fullscreen(&self, enabled: bool);
    fn is_fullscreen(&self) -> bool;
}

pub type FullscreenHostRef = Rc<dyn FullscreenHost>;

pub use desktop::DesktopFullscreenHost;
