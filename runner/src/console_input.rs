use common::games::snake::BoundaryMode;
use common::input::KeyCommand;

/// One line typed into the runner's terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleCommand {
    Key(KeyCommand),
    Speed(u8),
    Boundary(BoundaryMode),
    Music(bool),
    Quit,
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        let first = words.next()?;

        let command = match first {
            "q" | "quit" | "exit" => ConsoleCommand::Quit,
            "pause" => ConsoleCommand::Key(KeyCommand::TogglePause),
            "wrap" => ConsoleCommand::Boundary(BoundaryMode::Wrap),
            "walls" => ConsoleCommand::Boundary(BoundaryMode::Lethal),
            "speed" => {
                let percentage: u8 = words.next()?.parse().ok()?;
                ConsoleCommand::Speed(percentage.min(100))
            }
            "music" => match words.next()? {
                "on" => ConsoleCommand::Music(true),
                "off" => ConsoleCommand::Music(false),
                _ => return None,
            },
            key => ConsoleCommand::Key(KeyCommand::from_key(key)?),
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::games::snake::Direction;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ConsoleCommand::parse(" w "), Some(ConsoleCommand::Key(KeyCommand::Turn(Direction::Up))));
        assert_eq!(ConsoleCommand::parse("pause"), Some(ConsoleCommand::Key(KeyCommand::TogglePause)));
        assert_eq!(ConsoleCommand::parse("speed 80"), Some(ConsoleCommand::Speed(80)));
        assert_eq!(ConsoleCommand::parse("speed 200"), Some(ConsoleCommand::Speed(100)));
        assert_eq!(ConsoleCommand::parse("wrap"), Some(ConsoleCommand::Boundary(BoundaryMode::Wrap)));
        assert_eq!(ConsoleCommand::parse("music off"), Some(ConsoleCommand::Music(false)));
        assert_eq!(ConsoleCommand::parse("quit"), Some(ConsoleCommand::Quit));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(ConsoleCommand::parse(""), None);
        assert_eq!(ConsoleCommand::parse("speed fast"), None);
        assert_eq!(ConsoleCommand::parse("jump"), None);
        assert_eq!(ConsoleCommand::parse("music loud"), None);
    }
}
