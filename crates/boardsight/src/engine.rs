//! Owned handle to a UCI chess engine running as a child process.

use log::{debug, info, warn};
use std::ffi::OsStr;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

/// Consecutive end-of-stream reads tolerated while waiting for `bestmove`.
const MAX_EMPTY_READS: usize = 100;

#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("failed to spawn engine: {0}")]
    Spawn(#[source] std::io::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("engine closed its output before answering `uci`")]
    Handshake,
    #[error("engine stdio is not piped")]
    Closed,
}

/// A running engine. Dropping the handle kills a process that was not
/// shut down through [`UciEngine::stop`].
pub struct UciEngine {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl UciEngine {
    /// Spawn the engine binary at `path` and complete the UCI handshake.
    pub fn start(path: impl AsRef<OsStr>) -> Result<Self, EngineError> {
        Self::from_command(Command::new(path))
    }

    /// Spawn a prepared command (extra arguments, env) and complete the handshake.
    pub fn from_command(mut command: Command) -> Result<Self, EngineError> {
        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(EngineError::Spawn)?;
        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            return Err(EngineError::Closed);
        };

        let mut engine = Self {
            child,
            stdin,
            stdout: BufReader::new(stdout),
        };
        engine.send("uci")?;
        loop {
            match engine.read_line()? {
                None => return Err(EngineError::Handshake),
                Some(line) if line.trim() == "uciok" => break,
                Some(line) => debug!("engine: {}", line.trim_end()),
            }
        }
        info!("engine initialized");
        Ok(engine)
    }

    fn send(&mut self, command: &str) -> Result<(), EngineError> {
        debug!("engine <- {command}");
        writeln!(self.stdin, "{command}")?;
        self.stdin.flush()?;
        Ok(())
    }

    /// `None` at end of stream.
    fn read_line(&mut self) -> Result<Option<String>, EngineError> {
        let mut line = String::new();
        let n = self.stdout.read_line(&mut line)?;
        Ok((n > 0).then_some(line))
    }

    /// Ask for the best move in `fen`, searching for `movetime_ms`.
    ///
    /// Returns `None` when the engine has no move (`bestmove (none)`) or
    /// stops answering.
    pub fn best_move(&mut self, fen: &str, movetime_ms: u64) -> Result<Option<String>, EngineError> {
        self.send(&format!("position fen {fen}"))?;
        self.send(&format!("go movetime {movetime_ms}"))?;

        let mut empty_reads = 0;
        loop {
            let Some(line) = self.read_line()? else {
                empty_reads += 1;
                if empty_reads > MAX_EMPTY_READS {
                    warn!("engine stopped answering before `bestmove`");
                    return Ok(None);
                }
                continue;
            };
            if let Some(rest) = line.strip_prefix("bestmove") {
                let mv = rest.split_whitespace().next();
                return Ok(mv.filter(|m| *m != "(none)").map(str::to_string));
            }
        }
    }

    /// Send `quit` and wait for the process to exit.
    pub fn stop(mut self) -> Result<(), EngineError> {
        self.send("quit")?;
        let status = self.child.wait()?;
        debug!("engine exited with {status}");
        Ok(())
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;

    const FAKE_ENGINE: &str = r#"
while read line; do
  case "$line" in
    uci) echo "id name fake"; echo "uciok" ;;
    "position fen 8/8/8/8/8/8/8/8"*) empty=1 ;;
    position*) empty=0 ;;
    go*)
      echo "info depth 1 score cp 20"
      if [ "$empty" = 1 ]; then echo "bestmove (none)"; else echo "bestmove e2e4 ponder e7e5"; fi ;;
    quit) exit 0 ;;
  esac
done
"#;

    /// Answers the handshake, then closes stdout but keeps draining stdin.
    const MUTE_ENGINE: &str = r#"
read line
echo "uciok"
exec 1>&-
cat > /dev/null
"#;

    /// Answers the handshake and ignores everything else, `quit` included.
    const STUBBORN_ENGINE: &str = r#"
while read line; do
  [ "$line" = uci ] && echo "uciok"
done
"#;

    fn script_engine(dir: &tempfile::TempDir, body: &str) -> Command {
        let script = dir.path().join("engine.sh");
        fs::write(&script, body).expect("write script");
        let mut cmd = Command::new("sh");
        cmd.arg(script);
        cmd
    }

    fn fake_engine(dir: &tempfile::TempDir) -> Command {
        script_engine(dir, FAKE_ENGINE)
    }

    fn is_running(pid: u32) -> bool {
        Command::new("sh")
            .arg("-c")
            .arg(format!("kill -0 {pid}"))
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    #[test]
    fn handshake_and_best_move() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut engine = UciEngine::from_command(fake_engine(&dir)).expect("start");
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";
        assert_eq!(
            engine.best_move(fen, 50).expect("best move"),
            Some("e2e4".to_string())
        );
        assert_eq!(engine.best_move("8/8/8/8/8/8/8/8 w - - 0 1", 50).expect("none"), None);
        engine.stop().expect("stop");
    }

    #[test]
    fn silent_engine_fails_handshake() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("exit 0");
        assert!(matches!(
            UciEngine::from_command(cmd),
            Err(EngineError::Handshake) | Err(EngineError::Io(_))
        ));
    }

    #[test]
    fn missing_binary_fails_to_spawn() {
        assert!(matches!(
            UciEngine::start("/nonexistent/engine-binary"),
            Err(EngineError::Spawn(_))
        ));
    }

    #[test]
    fn engine_that_goes_quiet_yields_no_move() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut engine =
            UciEngine::from_command(script_engine(&dir, MUTE_ENGINE)).expect("start");
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";
        assert_eq!(engine.best_move(fen, 10).expect("no io error"), None);
    }

    #[test]
    fn dropping_a_live_engine_kills_it() {
        let dir = tempfile::tempdir().expect("tempdir");
        let engine =
            UciEngine::from_command(script_engine(&dir, STUBBORN_ENGINE)).expect("start");
        let pid = engine.child.id();
        assert!(is_running(pid));
        drop(engine);
        assert!(!is_running(pid));
    }
}
