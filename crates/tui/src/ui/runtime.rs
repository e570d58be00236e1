//! Terminal lifecycle and the event loop for the viewer.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode).
//! - Route input to the sidebar component and execute returned `Effect`s.
//! - Re-activate the sidebar whenever a navigation effect switches pages.
//!
//! The loop is synchronous and single-threaded: activation runs to
//! completion, input handlers are fire-and-forget, and the only suspension
//! point is waiting on the next terminal event.

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use quire_types::Effect;
use ratatui::{Terminal, prelude::*};

use crate::app::App;
use crate::ui::components::{Component, PageComponent, SidebarComponent};

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn draw(frame: &mut Frame, app: &mut App, sidebar: &mut SidebarComponent, page: &mut PageComponent) {
    let areas = Layout::horizontal([Constraint::Length(36), Constraint::Min(1)]).split(frame.area());
    sidebar.render(frame, areas[0], app);
    page.render(frame, areas[1], app);
}

/// Handle a raw crossterm event, returning effects for the runtime.
fn handle_input_event(app: &mut App, sidebar: &mut SidebarComponent, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key) => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => vec![Effect::Exit],
            KeyCode::Char('n') => app.adjacent_page(1).map(Effect::Navigate).into_iter().collect(),
            KeyCode::Char('p') => app.adjacent_page(-1).map(Effect::Navigate).into_iter().collect(),
            _ => sidebar.handle_key_events(app, key),
        },
        Event::Mouse(mouse) => sidebar.handle_mouse_events(app, mouse),
        _ => Vec::new(),
    }
}

fn process_effects(app: &mut App, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::Navigate(page) => app.navigate(page),
            Effect::Exit => app.should_exit = true,
        }
    }
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App) -> Result<()> {
    let mut sidebar = SidebarComponent::default();
    let mut page = PageComponent::default();
    loop {
        terminal.draw(|frame| draw(frame, app, &mut sidebar, &mut page))?;
        let input_event = event::read()?;
        if let Event::Key(key) = &input_event
            && key.code == KeyCode::Char('c')
            && key.modifiers.contains(KeyModifiers::CONTROL)
        {
            break;
        }
        let effects = handle_input_event(app, &mut sidebar, input_event);
        process_effects(app, effects);
        if app.should_exit {
            break;
        }
    }
    Ok(())
}

/// Entry point for the viewer runtime: sets up the terminal, runs the event
/// loop, and restores the terminal on exit.
pub fn run_app(mut app: App) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app);
    cleanup_terminal(&mut terminal)?;
    result
}
