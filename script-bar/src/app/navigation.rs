//! Key handling and selection movement

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use script_bar_sdk::RunMode;

use super::App;

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Tab | KeyCode::Char('l') | KeyCode::Char('j') => {
                self.select_next()
            }
            KeyCode::Left | KeyCode::Up | KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Char('k') => {
                self.select_previous()
            }
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.items.len().saturating_sub(1),
            KeyCode::Enter => self.launch_selected(None),
            KeyCode::Char('b') => self.launch_selected(Some(RunMode::Background)),
            KeyCode::Char('t') => self.launch_selected(Some(RunMode::Terminal)),
            KeyCode::Char('r') => self.rescan(),
            KeyCode::Char('a') => self.toggle_show_all(),
            KeyCode::Char('x') => self.notifications.with(|n| n.dismiss_all()),
            _ => {}
        }
    }

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn select_previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.items.len() - 1
        } else {
            self.selected - 1
        };
    }
}
