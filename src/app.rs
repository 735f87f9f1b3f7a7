use crossterm::event::{KeyCode, KeyEvent};
use std::time::{Duration, Instant};

use crate::brew::{BrewCalculator, PourCount};

/// How long a status message stays on the info line
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    CoffeeGrams,
    Pours,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

pub struct App {
    pub field: Field,
    pub popup: Popup,

    pub calculator: BrewCalculator,

    // Text shown in the coffee field; empty shows the placeholder
    pub coffee_input: String,

    // Values restored by 'r'
    initial: BrewCalculator,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
}

impl App {
    pub fn new(calculator: BrewCalculator) -> Self {
        Self {
            field: Field::CoffeeGrams,
            popup: Popup::None,
            coffee_input: calculator.coffee_grams().to_string(),
            initial: calculator.clone(),
            calculator,
            status_message: None,
            status_message_time: None,
        }
    }

    /// Set a status message (auto-clears after 3 seconds)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    fn report_results(&mut self) {
        let results = self.calculator.results();
        tracing::debug!(
            coffee_grams = results.coffee_grams,
            num_pours = results.num_pours.get(),
            water_per_pour = results.water_per_pour,
            final_quantity = results.final_quantity,
            "Recalculated brew"
        );
        self.set_status(format!(
            "{}g coffee × {} → {}g total",
            results.coffee_grams,
            results.num_pours.label(),
            results.final_quantity
        ));
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.popup == Popup::Help {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Enter | KeyCode::Char('q')
            ) {
                self.popup = Popup::None;
            }
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.field = match self.field {
                    Field::CoffeeGrams => Field::Pours,
                    Field::Pours => Field::CoffeeGrams,
                };
            }
            KeyCode::Char('?') | KeyCode::Char('h') => self.popup = Popup::Help,
            KeyCode::Char('r') => self.reset(),
            _ => match self.field {
                Field::CoffeeGrams => self.handle_coffee_key(key),
                Field::Pours => self.handle_pours_key(key),
            },
        }
    }

    fn handle_coffee_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
                let mut text = self.coffee_input.clone();
                text.push(c);
                self.edit_coffee(&text);
            }
            KeyCode::Backspace => {
                let mut text = self.coffee_input.clone();
                text.pop();
                self.edit_coffee(&text);
            }
            KeyCode::Delete => self.edit_coffee(""),
            KeyCode::Up => {
                let grams = self.calculator.coffee_grams().saturating_add(1);
                self.step_coffee(grams);
            }
            KeyCode::Down => {
                let grams = self.calculator.coffee_grams().saturating_sub(1);
                self.step_coffee(grams);
            }
            _ => {}
        }
    }

    /// Feed field text through the calculator and normalise the field to
    /// the stored value. A lone "-" or an empty field keeps its text so
    /// the user can finish typing.
    fn edit_coffee(&mut self, text: &str) {
        self.calculator.set_coffee_grams(text);
        self.coffee_input = if text.is_empty() || text == "-" {
            text.to_string()
        } else {
            self.calculator.coffee_grams().to_string()
        };
        self.report_results();
    }

    fn step_coffee(&mut self, grams: u64) {
        self.calculator.set_coffee_grams_value(grams);
        self.coffee_input = grams.to_string();
        self.report_results();
    }

    fn handle_pours_key(&mut self, key: KeyEvent) {
        let current = self.calculator.num_pours();
        match key.code {
            KeyCode::Down | KeyCode::Right => {
                self.calculator.set_num_pours_value(current.next());
            }
            KeyCode::Up | KeyCode::Left => {
                self.calculator.set_num_pours_value(current.prev());
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.calculator.set_num_pours(&c.to_string());
            }
            _ => return,
        }
        self.report_results();
    }

    /// Restore the values the app started with
    fn reset(&mut self) {
        self.calculator = self.initial.clone();
        self.coffee_input = self.calculator.coffee_grams().to_string();
        tracing::info!("Reset to startup values");
        self.set_status("Reset to startup values");
    }

    pub fn num_pours(&self) -> PourCount {
        self.calculator.num_pours()
    }

    /// Periodic housekeeping: expire the status message
    pub fn tick(&mut self) {
        if let Some(since) = self.status_message_time {
            if since.elapsed() >= STATUS_TIMEOUT {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_typing_into_cleared_field() {
        let mut app = App::new(BrewCalculator::default());
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.calculator.coffee_grams(), 0);
        assert!(app.coffee_input.is_empty());

        type_str(&mut app, "15");
        assert_eq!(app.calculator.coffee_grams(), 15);
        assert_eq!(app.coffee_input, "15");
        assert_eq!(app.calculator.water_per_pour(), 45);
    }

    #[test]
    fn test_backspace_reparses() {
        let mut app = App::new(BrewCalculator::default());
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.calculator.coffee_grams(), 2);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.calculator.coffee_grams(), 0);
        assert_eq!(app.calculator.final_quantity(), 0);
    }

    #[test]
    fn test_negative_entry_coerced() {
        let mut app = App::new(BrewCalculator::default());
        press(&mut app, KeyCode::Delete);
        type_str(&mut app, "-5");
        assert_eq!(app.calculator.coffee_grams(), 0);
        assert_eq!(app.coffee_input, "0");
    }

    #[test]
    fn test_spinner_steps() {
        let mut app = App::new(BrewCalculator::default());
        press(&mut app, KeyCode::Delete);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.calculator.coffee_grams(), 0);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.calculator.coffee_grams(), 1);
        assert_eq!(app.coffee_input, "1");
    }

    #[test]
    fn test_pour_selection() {
        let mut app = App::new(BrewCalculator::default());
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.field, Field::Pours);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.num_pours().get(), 4);
        assert_eq!(app.calculator.final_quantity(), 240);

        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.num_pours().get(), 1);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.num_pours().get(), 5);
    }

    #[test]
    fn test_pour_selection_ignores_letters() {
        let mut app = App::new(BrewCalculator::default());
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "jkl");
        assert_eq!(app.num_pours().get(), 3);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_digits_do_not_leak_across_fields() {
        let mut app = App::new(BrewCalculator::default());
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.calculator.coffee_grams(), 20);
        assert_eq!(app.num_pours().get(), 2);
    }

    #[test]
    fn test_help_popup_swallows_keys() {
        let mut app = App::new(BrewCalculator::default());
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.popup, Popup::Help);
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.calculator.coffee_grams(), 20);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.popup, Popup::None);
    }

    #[test]
    fn test_reset_restores_startup_values() {
        let mut app = App::new(BrewCalculator::new(18, PourCount::clamped(2)));
        type_str(&mut app, "9");
        assert_eq!(app.calculator.coffee_grams(), 189);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.calculator.coffee_grams(), 18);
        assert_eq!(app.num_pours().get(), 2);
        assert_eq!(app.coffee_input, "18");
    }

    #[test]
    fn test_edit_sets_status() {
        let mut app = App::new(BrewCalculator::default());
        assert!(app.status_message.is_none());
        press(&mut app, KeyCode::Up);
        assert!(app.status_message.as_deref().unwrap().contains("189g total"));
        app.tick();
        assert!(app.status_message.is_some());
    }
}
