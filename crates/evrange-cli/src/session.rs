//! Line-oriented session protocol.
//!
//! Each input line is one command applied to a single [`Simulator`]; the
//! readout is written after every command. Malformed lines are reported on
//! the error stream and the session carries on.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use tracing::{debug, warn};

use evrange_lib::{ConsumptionModel, Simulator};

use crate::output::{render_readout, to_json_line, OutputFormat};
use crate::terminal::ColorPalette;

/// A single session command.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// `soc <percent>`
    StateOfCharge(f64),
    /// `capacity [<kwh>]`; the raw text is kept so invalid input falls back
    /// to the default capacity.
    Capacity(String),
    /// `step <speed> [<km>]`
    Step { speed_kmh: f64, km: u32 },
    /// `reset`
    Reset,
    /// `show`
    Show,
    /// `quit` or `exit`
    Quit,
}

impl FromStr for SessionCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let keyword = parts
            .next()
            .ok_or_else(|| anyhow!("empty command"))?
            .to_ascii_lowercase();

        let command = match keyword.as_str() {
            "soc" => {
                let value = parts.next().ok_or_else(|| anyhow!("usage: soc <percent>"))?;
                let percent = value
                    .parse::<f64>()
                    .with_context(|| format!("invalid state of charge '{value}'"))?;
                SessionCommand::StateOfCharge(percent)
            }
            "capacity" => SessionCommand::Capacity(parts.by_ref().collect::<Vec<_>>().join(" ")),
            "step" => {
                let value = parts
                    .next()
                    .ok_or_else(|| anyhow!("usage: step <speed> [<km>]"))?;
                let speed_kmh = value
                    .parse::<f64>()
                    .with_context(|| format!("invalid speed '{value}'"))?;
                let km = match parts.next() {
                    Some(km) => km
                        .parse::<u32>()
                        .with_context(|| format!("invalid distance '{km}'"))?,
                    None => 1,
                };
                SessionCommand::Step { speed_kmh, km }
            }
            "reset" => SessionCommand::Reset,
            "show" => SessionCommand::Show,
            "quit" | "exit" => SessionCommand::Quit,
            other => bail!("unknown command '{other}'"),
        };

        if let Some(extra) = parts.next() {
            bail!("unexpected argument '{extra}' for '{keyword}'");
        }

        Ok(command)
    }
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<SessionCommand>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    trimmed.parse().map(Some)
}

/// Apply a command to the simulator.
pub fn apply<M: ConsumptionModel>(sim: &mut Simulator<M>, command: &SessionCommand) {
    match command {
        SessionCommand::StateOfCharge(percent) => sim.set_state_of_charge(*percent),
        SessionCommand::Capacity(input) => sim.set_capacity_input(input),
        SessionCommand::Step { speed_kmh, km } => {
            sim.drive(*speed_kmh, *km);
        }
        SessionCommand::Reset => sim.reset(),
        SessionCommand::Show | SessionCommand::Quit => {}
    }
}

/// Counters reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub applied: usize,
    pub rejected: usize,
}

/// Run a session over `input`, writing readouts to `out` and rejected lines
/// to `err`. Stops at end of input or at `quit`.
pub fn run_session<M, R, W, E>(
    sim: &mut Simulator<M>,
    input: R,
    out: &mut W,
    err: &mut E,
    format: OutputFormat,
    palette: &ColorPalette,
) -> Result<SessionSummary>
where
    M: ConsumptionModel,
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut summary = SessionSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line.context("failed to read session input")?;
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(error) => {
                warn!(line = index + 1, "rejected session command");
                writeln!(err, "line {}: {error:#}", index + 1)?;
                summary.rejected += 1;
                continue;
            }
        };

        if command == SessionCommand::Quit {
            break;
        }

        debug!(?command, "applying session command");
        apply(sim, &command);
        summary.applied += 1;

        let readout = sim.display();
        match format {
            OutputFormat::Text => writeln!(out, "{}", render_readout(&readout, palette))?,
            OutputFormat::Json => writeln!(out, "{}", to_json_line(&readout)?)?,
        }
    }

    out.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> (Simulator, String, String, SessionSummary) {
        let mut sim = Simulator::new();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let summary = run_session(
            &mut sim,
            input.as_bytes(),
            &mut out,
            &mut err,
            OutputFormat::Text,
            &ColorPalette::plain(),
        )
        .expect("session runs");
        (
            sim,
            String::from_utf8(out).expect("utf8 stdout"),
            String::from_utf8(err).expect("utf8 stderr"),
            summary,
        )
    }

    #[test]
    fn parses_commands() {
        assert_eq!(
            parse_line("soc 55").unwrap(),
            Some(SessionCommand::StateOfCharge(55.0))
        );
        assert_eq!(
            parse_line("  STEP 100 3 ").unwrap(),
            Some(SessionCommand::Step {
                speed_kmh: 100.0,
                km: 3
            })
        );
        assert_eq!(
            parse_line("step 45").unwrap(),
            Some(SessionCommand::Step {
                speed_kmh: 45.0,
                km: 1
            })
        );
        assert_eq!(
            parse_line("capacity").unwrap(),
            Some(SessionCommand::Capacity(String::new()))
        );
        assert_eq!(parse_line("# comment").unwrap(), None);
        assert_eq!(parse_line("   ").unwrap(), None);
    }

    #[test]
    fn rejects_malformed_commands() {
        assert!(parse_line("soc").is_err());
        assert!(parse_line("soc high").is_err());
        assert!(parse_line("step 100 -2").is_err());
        assert!(parse_line("reset now").is_err());
        assert!(parse_line("fly 300").is_err());
    }

    #[test]
    fn prints_readout_after_each_command() {
        let (sim, out, err, summary) = run("show\nstep 100\nreset\n");
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "378 km | max 378 km | min 378 km | 18.0 kWh/100 | SoC 80 %"
        );
        assert!(lines[1].starts_with("367 km"));
        assert!(lines[1].contains("18.5 kWh/100"));
        assert!(lines[2].contains("18.0 kWh/100"));
        assert!(err.is_empty());
        assert_eq!(summary.applied, 3);
        assert_eq!(sim.state().odometer_km(), 1);
    }

    #[test]
    fn invalid_capacity_falls_back_to_default() {
        let (sim, _, err, _) = run("capacity 120\ncapacity nonsense\n");
        assert_eq!(sim.state().capacity_kwh(), 85.0);
        assert!(err.is_empty());
    }

    #[test]
    fn bad_lines_are_reported_and_skipped() {
        let (sim, out, err, summary) = run("soc abc\nsoc 50\nquit\nstep 100\n");
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.applied, 1);
        assert!(err.contains("line 1"));
        assert!(err.contains("invalid state of charge 'abc'"));
        assert_eq!(out.lines().count(), 1);
        assert_eq!(sim.state().state_of_charge(), 50.0);
        assert_eq!(sim.state().odometer_km(), 0);
    }

    #[test]
    fn step_accepts_the_largest_distance() {
        let (sim, out, err, summary) = run("step 100 4294967295\nshow\n");
        assert!(err.is_empty());
        assert_eq!(summary.applied, 2);
        assert_eq!(sim.state().odometer_km(), u64::from(u32::MAX));
        assert_eq!(sim.state().state_of_charge(), 0.0);
        assert_eq!(
            out.lines().last(),
            Some("0 km | max 0 km | min 0 km | 18.5 kWh/100 | SoC 0 %")
        );
    }
}
