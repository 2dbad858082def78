use serde::{Deserialize, Serialize};

/// Kind of window the content view asks for when a page opens a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NewWindowKind {
    Window,
    Tab,
    /// Opened without stealing focus from the requesting window.
    BackgroundTab,
    Dialog,
}

/// Events reported by the content view back to its window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ContentEvent {
    /// A navigation was committed to the given URL.
    UrlChanged(String),
    TitleChanged(String),
    /// Raw icon bytes as delivered by the engine.
    IconChanged(Vec<u8>),
    /// The pointer entered (`Some`) or left (`None`) a link.
    LinkHovered(Option<String>),
    CertificateError,
    /// The page asked to enter (`true`) or leave (`false`) fullscreen.
    FullscreenRequested(bool),
    LoadFinished(bool),
    NewWindowRequested { kind: NewWindowKind, url: Option<String> },
    DownloadRequested(String),
}

/// A window the application should open on behalf of an existing one.
///
/// Requests are fire-and-forget: the requesting window does not wait for or
/// observe the new window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRequest {
    /// Address to load; `None` opens the configured homepage.
    pub url: Option<String>,
    pub incognito: bool,
    /// Keep focus on the requesting window.
    pub background: bool,
}

/// Visual security state of the window frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameStyle {
    /// The current page was not loaded over https.
    Insecure,
    Secure,
    /// The page is https but the engine reported a certificate error.
    CertificateError,
}
