//! Interactive console: prompts on a writer, answers from a reader.

use std::io::{self, BufRead, Write};

use war::game::{BattleIo, MAX_COLOR_LEN, Role, bounded};
use war::roster::TerritoryRecord;
use war::{AttackOutcome, Mission, Registry, WarError};

use super::output::{format_error, format_map, format_outcome, format_victory, heading};

/// Line-oriented console over any reader/writer pair.
pub(super) struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a console.
    pub(super) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write text as-is.
    pub(super) fn say(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()
    }

    /// Ask a question and return the trimmed answer.
    ///
    /// End of input is an error: the game cannot go on without a player.
    pub(super) fn ask(&mut self, question: &str) -> io::Result<String> {
        self.say(question)?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed",
            ));
        }
        Ok(line.trim().to_string())
    }

    /// Ask until the answer is a whole number.
    pub(super) fn ask_number(&mut self, question: &str) -> io::Result<i64> {
        loop {
            let answer = self.ask(question)?;
            match answer.parse() {
                Ok(number) => return Ok(number),
                Err(_) => self.say("Please enter a whole number.\n")?,
            }
        }
    }

    /// Ask a yes/no question; only an explicit yes counts.
    pub(super) fn ask_yes(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.ask(question)?;
        Ok(matches!(
            answer.chars().next(),
            Some('s' | 'S' | 'y' | 'Y')
        ))
    }

    /// Ask for the player's color until a non-blank one is given.
    pub(super) fn ask_color(&mut self) -> io::Result<String> {
        loop {
            let color = bounded(&self.ask("\nEnter your army color: ")?, MAX_COLOR_LEN);
            if !color.is_empty() {
                return Ok(color);
            }
            self.say("The color must not be empty.\n")?;
        }
    }

    /// Ask for the number of territories.
    pub(super) fn ask_count(&mut self) -> io::Result<i64> {
        self.ask_number("\nHow many territories do you want to register? ")
    }

    /// Register every territory of `registry`, one record at a time.
    ///
    /// Invalid records are reported and asked again.
    pub(super) fn register(&mut self, registry: &mut Registry) -> Result<(), WarError> {
        self.say(&heading("TERRITORY REGISTRATION"))?;

        for index in 0..registry.len() {
            loop {
                self.say(&format!("\n--- Territory {} ---\n", index + 1))?;
                let name = self.ask("Territory name: ")?;
                let owner = self.ask("Army color: ")?;
                let troops = loop {
                    let troops = self.ask_number("Troops: ")?;
                    match u32::try_from(troops) {
                        Ok(troops) => break troops,
                        Err(_) => self.say("Troops must be between 0 and 4294967295.\n")?,
                    }
                };

                let record = TerritoryRecord {
                    name,
                    owner,
                    troops,
                };
                match record.into_territory(index) {
                    Ok(territory) => {
                        self.say(&format!("Territory '{}' registered.\n", territory.name))?;
                        registry.register(index, territory)?;
                        break;
                    }
                    Err(e) => self.say(&format_error(&e))?,
                }
            }
        }

        Ok(())
    }
}

impl<R: BufRead, W: Write> BattleIo for Console<R, W> {
    fn show_map(&mut self, registry: &Registry) -> io::Result<()> {
        self.say(&format_map(registry))
    }

    fn select(&mut self, role: Role, len: usize) -> io::Result<i64> {
        let (title, verb) = match role {
            Role::Attacker => ("ATTACKER", "attack with"),
            Role::Defender => ("DEFENDER", "attack"),
        };
        self.say(&format!("\n--- {title} ---\n"))?;
        self.ask_number(&format!("Select a territory to {verb} (1-{len}): "))
    }

    fn report_error(&mut self, error: &WarError) -> io::Result<()> {
        self.say(&format_error(error))
    }

    fn show_outcome(&mut self, registry: &Registry, outcome: &AttackOutcome) -> io::Result<()> {
        self.say(&format_outcome(registry, outcome))
    }

    fn announce_victory(&mut self, mission: &Mission) -> io::Result<()> {
        self.say(&format_victory(mission))
    }

    fn confirm_continue(&mut self) -> io::Result<bool> {
        let answer = self.ask("\nAttack again? (y/n): ")?;
        Ok(!matches!(answer.chars().next(), Some('n' | 'N')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_ask_number_retries() {
        let mut c = console("abc\n\n 7 \n");
        assert_eq!(c.ask_number("n? ").unwrap(), 7);
        let shown = String::from_utf8(c.output).unwrap();
        assert_eq!(shown.matches("Please enter a whole number.").count(), 2);
    }

    #[test]
    fn test_eof_is_error() {
        let mut c = console("");
        let err = c.ask("? ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_continue_only_stops_on_no() {
        let mut c = console("n\nN\nmaybe\n\n");
        assert!(!c.confirm_continue().unwrap());
        assert!(!c.confirm_continue().unwrap());
        assert!(c.confirm_continue().unwrap());
        assert!(c.confirm_continue().unwrap());
    }

    #[test]
    fn test_ask_yes_accepts_both_languages() {
        let mut c = console("s\ny\nn\n");
        assert!(c.ask_yes("? ").unwrap());
        assert!(c.ask_yes("? ").unwrap());
        assert!(!c.ask_yes("? ").unwrap());
    }

    #[test]
    fn test_register_reprompts_bad_records() {
        let mut registry = Registry::new(2).unwrap();
        let mut c = console("Brasil\nAzul\n10\n \nVerde\n-4\n3\nChile\nVerde\n3\n");
        c.register(&mut registry).unwrap();

        assert_eq!(registry.get(0).unwrap().name, "Brasil");
        let chile = registry.get(1).unwrap();
        assert_eq!(chile.name, "Chile");
        assert_eq!(chile.troops, 3);

        let shown = String::from_utf8(c.output).unwrap();
        assert!(shown.contains("Troops must be between"));
        assert!(shown.contains("invalid territory record #2: name must not be empty"));
    }

    #[test]
    fn test_ask_color_reprompts_blank_answers() {
        let mut c = console("\n   \nVermelhoEscuro\n");
        assert_eq!(c.ask_color().unwrap(), "VermelhoE");
        let shown = String::from_utf8(c.output).unwrap();
        assert_eq!(shown.matches("The color must not be empty.").count(), 2);
    }

    #[test]
    fn test_select_prompt_shows_range() {
        let mut c = console("2\n");
        assert_eq!(c.select(Role::Defender, 5).unwrap(), 2);
        let shown = String::from_utf8(c.output).unwrap();
        assert!(shown.contains("(1-5)"));
    }
}
