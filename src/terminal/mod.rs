use std::io::{self, BufRead, Write};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

use crate::config::game::{Difficulty, GameConfig};
use crate::data::LeaderboardStore;
use crate::error::GameResult;
use crate::game::{GameSession, GuessOutcome, Hint, Status};
use crate::WELCOME_INFO;

pub const PROMPT: &[u8] = b">> ";

static HELP_INFOS: &[&str] = &[
    "<number>: Submit a guess",
    "status: Show the current game",
    "scores: Show the high scores",
    "new: Start over with the same settings",
    "help: Show this info",
    "exit: Exit the game",
];

/// Line based front end for a [`GameSession`].
pub struct Console<S, R, W> {
    session: GameSession<S>,
    config: GameConfig,
    rng: StdRng,
    input: R,
    output: W,
    player: String,
    difficulty: Difficulty,
}

impl<S, R, W> Console<S, R, W>
where
    S: LeaderboardStore,
    R: BufRead,
    W: Write,
{
    pub fn new(session: GameSession<S>, config: GameConfig, input: R, output: W) -> Self {
        Self::with_rng(session, config, StdRng::from_entropy(), input, output)
    }

    pub fn with_rng(
        session: GameSession<S>,
        config: GameConfig,
        rng: StdRng,
        input: R,
        output: W,
    ) -> Self {
        let player = config.player_name.clone();
        let difficulty = config.default_difficulty();

        Self {
            session,
            config,
            rng,
            input,
            output,
            player,
            difficulty,
        }
    }

    /// Runs until `exit` or end of input.
    pub fn run(&mut self) -> GameResult<()> {
        writeln!(self.output, "{}", WELCOME_INFO)?;

        if !self.setup()? {
            return Ok(());
        }

        self.start_round()?;

        loop {
            self.output.write_all(PROMPT)?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                break;
            };

            let cmd = line.trim();
            match cmd {
                "" => {
                    // nothing to do
                }
                "help" | "?" | "h" => {
                    for &info in HELP_INFOS {
                        writeln!(self.output, "{info}")?;
                    }
                }
                "status" => self.print_status()?,
                "scores" | "top" => self.print_scores(self.config.leaderboard_size)?,
                "new" => self.start_round()?,
                "exit" | "quit" | "stop" | "e" => {
                    writeln!(self.output, "Thanks for playing!")?;
                    break;
                }
                guess => self.submit(guess)?,
            }
        }

        info!("{} 退出游戏", self.player);
        Ok(())
    }

    pub fn session(&self) -> &GameSession<S> {
        &self.session
    }

    pub fn into_parts(self) -> (GameSession<S>, W) {
        (self.session, self.output)
    }

    fn setup(&mut self) -> GameResult<bool> {
        write!(self.output, "Enter your name: ")?;
        self.output.flush()?;

        let Some(name) = self.read_line()? else {
            return Ok(false);
        };
        let name = name.trim();
        if !name.is_empty() {
            self.player = name.to_owned();
        }

        writeln!(self.output, "\nSelect difficulty:")?;
        for (i, d) in self.config.difficulties.iter().enumerate() {
            writeln!(
                self.output,
                "{}. {} ({}-{}, {} attempts)",
                i + 1,
                d.name,
                d.min,
                d.max,
                d.max_attempts
            )?;
        }
        write!(
            self.output,
            "Choose (1-{}): ",
            self.config.difficulties.len().max(1)
        )?;
        self.output.flush()?;

        let Some(choice) = self.read_line()? else {
            return Ok(false);
        };
        self.difficulty = self.config.difficulty(&choice);

        Ok(true)
    }

    fn start_round(&mut self) -> GameResult<()> {
        let d = &self.difficulty;
        let started = self.session.start_with_rng(
            &mut self.rng,
            &self.player,
            d.min,
            d.max,
            d.max_attempts,
        );

        let started = match started {
            Ok(s) => s,
            Err(e) => {
                error!("难度 {} 配置无效: {}", d.name, e);
                return Err(e);
            }
        };

        writeln!(self.output, "\n{}", started.message)?;
        writeln!(self.output, "You have {} attempts.", started.attempts_left)?;
        Ok(())
    }

    fn submit(&mut self, input: &str) -> GameResult<()> {
        let outcome = match self.session.guess(input) {
            Ok(outcome) => outcome,
            Err(e) if e.is_recoverable() => {
                writeln!(self.output, "{e}")?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        match outcome {
            GuessOutcome::Continue {
                hint,
                attempts_left,
                ..
            } => {
                match hint {
                    Hint::Higher => writeln!(self.output, "Too low! Try a higher number.")?,
                    Hint::Lower => writeln!(self.output, "Too high! Try a lower number.")?,
                }
                writeln!(self.output, "Attempts left: {attempts_left}")?;
            }
            GuessOutcome::Won {
                secret,
                attempts_used,
                score,
            } => {
                writeln!(
                    self.output,
                    "Congratulations {}! You guessed it!",
                    self.player
                )?;
                writeln!(
                    self.output,
                    "The number was {secret}, found in {attempts_used} attempts."
                )?;
                writeln!(self.output, "Your score: {score}")?;
                self.game_over()?;
            }
            GuessOutcome::Lost { secret, .. } => {
                writeln!(self.output, "Game Over! The number was {secret}.")?;
                self.game_over()?;
            }
        }

        Ok(())
    }

    fn game_over(&mut self) -> io::Result<()> {
        if !self.session.score_keeper().entries().is_empty() {
            self.print_scores(self.config.shown_scores)?;
        }
        writeln!(self.output, "\nType 'new' to play again or 'exit' to leave.")
    }

    fn print_status(&mut self) -> io::Result<()> {
        match self.session.status() {
            Status::NoGame => writeln!(self.output, "No active game"),
            Status::Active {
                player,
                attempts_used,
                attempts_left,
                range,
            } => writeln!(
                self.output,
                "{player}: {attempts_used} attempts used, {attempts_left} left, range {range}"
            ),
        }
    }

    fn print_scores(&mut self, n: usize) -> io::Result<()> {
        let top = self.session.score_keeper().top(n);
        if top.is_empty() {
            return writeln!(self.output, "No high scores yet.");
        }

        writeln!(self.output, "\nHigh Scores:")?;
        writeln!(self.output, "{}", "-".repeat(50))?;
        for (i, e) in top.iter().enumerate() {
            writeln!(
                self.output,
                "{}. {} - {} pts ({} attempts)",
                i + 1,
                e.player,
                e.score,
                e.attempts
            )?;
        }

        Ok(())
    }

    /// `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }

        Ok(Some(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MemoryStore;
    use crate::game::ScoreKeeper;
    use rand::Rng;
    use std::io::Cursor;

    const SEED: u64 = 9;

    fn console(
        config: GameConfig,
        input: &str,
    ) -> Console<MemoryStore, Cursor<Vec<u8>>, Vec<u8>> {
        let session = GameSession::new(ScoreKeeper::load(MemoryStore::new()).unwrap());

        Console::with_rng(
            session,
            config,
            StdRng::seed_from_u64(SEED),
            Cursor::new(input.as_bytes().to_vec()),
            vec![],
        )
    }

    fn config_with(difficulty: Difficulty) -> GameConfig {
        GameConfig {
            difficulties: vec![difficulty],
            ..Default::default()
        }
    }

    fn secret_for(min: i64, max: i64) -> i64 {
        StdRng::seed_from_u64(SEED).gen_range(min..=max)
    }

    fn run(config: GameConfig, input: &str) -> (GameSession<MemoryStore>, String) {
        let mut console = console(config, input);
        console.run().unwrap();

        let (session, out) = console.into_parts();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn plays_to_a_win() {
        let config = config_with(Difficulty::new("Tiny", 1, 3, 3));
        let (session, out) = run(
            config,
            "Ann\n1\nhelp\nstatus\nabc\n0\n1\n2\n3\nscores\nexit\n",
        );

        assert!(out.contains("Welcome Ann! I'm thinking of a number between 1 and 3."));
        assert!(out.contains("You have 3 attempts."));
        assert!(out.contains("status: Show the current game"));
        assert!(out.contains("Ann: 0 attempts used, 3 left, range 1-3"));
        assert!(out.contains("Please enter a valid number!"));
        assert!(out.contains("Guess must be between 1 and 3!"));
        assert!(out.contains("Congratulations Ann! You guessed it!"));
        assert!(out.contains("High Scores:"));
        assert!(out.contains("1. Ann - "));
        assert!(out.ends_with("Thanks for playing!\n"));

        let entries = session.score_keeper().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].player, "Ann");
        assert_eq!(entries[0].range, "1-3");
    }

    #[test]
    fn plays_to_a_loss() {
        let secret = secret_for(1, 100);
        let wrong = if secret == 1 { 2 } else { 1 };

        let config = config_with(Difficulty::new("Sudden", 1, 100, 1));
        let (session, out) = run(config, &format!("Bob\n1\n{wrong}\n{secret}\n"));

        assert!(out.contains(&format!("Game Over! The number was {secret}.")));
        assert!(out.contains("No active game. Start a new game first!"));
        assert!(!out.contains("High Scores:"));
        assert!(session.score_keeper().entries().is_empty());
    }

    #[test]
    fn hints_direction() {
        let config = config_with(Difficulty::new("Wide", 0, 101, 5));
        let secret = secret_for(0, 101);

        let mut input = String::from("Cid\n1\n");
        if secret > 0 {
            input.push_str(&format!("{}\n", secret - 1));
        }
        if secret < 101 {
            input.push_str(&format!("{}\n", secret + 1));
        }
        let (_, out) = run(config, &input);

        if secret > 0 {
            assert!(out.contains("Too low! Try a higher number."));
        }
        if secret < 101 {
            assert!(out.contains("Too high! Try a lower number."));
        }
        assert!(out.contains("Attempts left: 4"));
    }

    #[test]
    fn new_restarts_the_round() {
        let secret = secret_for(1, 100);
        let wrong = if secret == 1 { 2 } else { 1 };

        let config = config_with(Difficulty::new("Medium", 1, 100, 7));
        let (session, out) = run(config, &format!("Dee\n1\n{wrong}\nnew\nstatus\nquit\n"));

        assert!(out.contains("Dee: 0 attempts used, 7 left, range 1-100"));
        assert_eq!(
            out.matches("Welcome Dee! I'm thinking of a number between 1 and 100.")
                .count(),
            2
        );
        assert!(session.is_active());
    }

    #[test]
    fn blank_name_and_choice_use_defaults() {
        let (session, out) = run(GameConfig::default(), "\n\nstatus\n");

        assert!(out.contains("Welcome Player! I'm thinking of a number between 1 and 100."));
        assert!(out.contains("You have 7 attempts."));
        assert!(out.contains("1. Easy (1-50, 8 attempts)"));
        assert!(session.is_active());
    }

    #[test]
    fn end_of_input_stops_cleanly() {
        let (session, out) = run(GameConfig::default(), "");

        assert!(out.contains("Enter your name: "));
        assert!(!session.is_active());

        let (session, _) = run(GameConfig::default(), "Eve\n2\n");
        assert!(session.is_active());
    }

    #[test]
    fn invalid_preset_is_an_error() {
        let config = config_with(Difficulty::new("Broken", 5, 5, 3));
        let mut console = console(config, "Ann\n1\n");

        assert!(console.run().is_err());
    }

    #[test]
    fn empty_scores() {
        let (_, out) = run(GameConfig::default(), "Ann\n1\nscores\n");
        assert!(out.contains("No high scores yet."));
    }
}
