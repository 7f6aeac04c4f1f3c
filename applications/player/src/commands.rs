/// Interactive playback commands read from stdin
use anyhow::{anyhow, bail};
use sortvis_playback::{MAX_SPEED, MIN_SPEED};
use std::io::BufRead;
use tokio::sync::mpsc;

/// Help line printed when the player starts
pub const HELP: &str = "commands: p pause/resume, s N speed (1-100), r reset, n new array, q quit";

/// One line of user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Pause when running, resume when paused
    TogglePause,
    /// Change the playback speed
    Speed(u8),
    /// Stop and return to idle
    Reset,
    /// Reset, draw a fresh random array and start again
    NewArray,
    /// Reset and exit
    Quit,
}

impl PlayerCommand {
    /// Parse one input line; blank lines are `None`
    pub fn parse(line: &str) -> anyhow::Result<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Ok(None);
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "p" | "pause" | "resume" => PlayerCommand::TogglePause,
            "s" | "speed" => {
                let level = words
                    .next()
                    .ok_or_else(|| anyhow!("speed needs a level ({}-{})", MIN_SPEED, MAX_SPEED))?;
                let level: u8 = level
                    .parse()
                    .map_err(|_| anyhow!("invalid speed level {:?}", level))?;
                if !(MIN_SPEED..=MAX_SPEED).contains(&level) {
                    bail!(
                        "speed level {} is outside {}-{}",
                        level,
                        MIN_SPEED,
                        MAX_SPEED
                    );
                }
                PlayerCommand::Speed(level)
            }
            "r" | "reset" => PlayerCommand::Reset,
            "n" | "new" => PlayerCommand::NewArray,
            "q" | "quit" => PlayerCommand::Quit,
            other => bail!("unknown command {:?} ({})", other, HELP),
        };

        if let Some(extra) = words.next() {
            bail!("unexpected argument {:?}", extra);
        }

        Ok(Some(command))
    }
}

/// Forward stdin lines on a channel
///
/// Reads on a plain thread: a blocked read can never be cancelled, and a
/// detached thread does not hold up runtime shutdown.
pub fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}
