//! Component abstraction for the viewer's UI elements.

use crossterm::event::{KeyEvent, MouseEvent};
use quire_types::Effect;
use ratatui::{Frame, layout::Rect};

use crate::app::App;

/// A self-contained UI element with its own rendering and event handling.
///
/// Components respond to input routed by the runtime, update state held on
/// [`App`], and report side effects (navigation, exit) back as [`Effect`]s
/// instead of mutating global state directly.
pub trait Component {
    /// Handle a key event routed to this component.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle a mouse event routed to this component.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Implementations should be side-effect free except for frame drawing;
    /// state changes belong in the event handlers.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);
}
