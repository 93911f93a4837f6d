//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for step shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const STEP_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const STEP_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Submit shortcut display
/// Ctrl+S works on all platforms
pub const SUBMIT_SHORTCUT: &str = "^S";

/// Next step shortcut display
#[cfg(target_os = "macos")]
pub const NEXT_STEP_SHORTCUT: &str = "Cmd+N";

#[cfg(not(target_os = "macos"))]
pub const NEXT_STEP_SHORTCUT: &str = "^N";

/// Previous step shortcut display
#[cfg(target_os = "macos")]
pub const PREV_STEP_SHORTCUT: &str = "Cmd+P";

#[cfg(not(target_os = "macos"))]
pub const PREV_STEP_SHORTCUT: &str = "^P";
