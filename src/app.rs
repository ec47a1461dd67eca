use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::error::DataError;
use crate::state::SessionState;
use crate::ui::report;

/// Menu option that ends the session.
pub const EXIT_OPTION: usize = 5;

// ---------------------------------------------------------------------------
// Interactive session
// ---------------------------------------------------------------------------

/// Whether the loop keeps going after an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Menu-driven session over any line-based input and text output.
pub struct RegionStatsApp<R, W> {
    pub state: SessionState,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> RegionStatsApp<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            state: SessionState::default(),
            input,
            output,
        }
    }

    /// Show the menu and dispatch options until exit or end of input.
    ///
    /// Engine errors are printed and the loop continues; only failures to
    /// read stdin or write stdout end the session with an error.
    pub fn run(&mut self) -> Result<()> {
        loop {
            report::menu(&mut self.output)?;
            let Some(line) = self.prompt("Choose an option: ")? else {
                break;
            };

            let option = match line.trim().parse::<usize>() {
                Ok(n) if (1..=EXIT_OPTION).contains(&n) => n,
                _ => {
                    self.say("\nPlease select a valid option.\n")?;
                    continue;
                }
            };

            match self.execute(option) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => match e.downcast_ref::<DataError>() {
                    Some(data_err) => {
                        log::warn!("Option {option} failed: {data_err}");
                        self.say(&format!("\n{data_err}\n"))?;
                    }
                    None => return Err(e),
                },
            }
        }
        Ok(())
    }

    fn execute(&mut self, option: usize) -> Result<Flow> {
        match option {
            1 => {
                let Some(path) = self.prompt("Input file location: ")? else {
                    return Ok(Flow::Quit);
                };
                self.state.load(Path::new(path.trim()))?;
                self.say("\nFile read successfully!\n")?;
            }
            2 => {
                if let Some(ds) = self.state.engine.dataset() {
                    report::region_list(&mut self.output, &ds.regions)?;
                }
                let Some(answer) = self.prompt("Select region ID: ")? else {
                    return Ok(Flow::Quit);
                };
                self.state.select_region(parse_id(&answer)?)?;
                self.say("\nRegion selected!\n")?;
            }
            3 => {
                let rows = self.state.selected_rows()?;
                report::rows(&mut self.output, self.state.engine.headers(), &rows)?;
            }
            4 => {
                report::column_list(&mut self.output, self.state.engine.headers())?;
                let Some(answer) = self.prompt("Select a column for calculations: ")? else {
                    return Ok(Flow::Quit);
                };
                let metrics = self.state.selected_metrics(parse_id(&answer)?)?;
                report::metrics(&mut self.output, &metrics)?;
            }
            _ => {
                self.say("\nGoodbye...\n")?;
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    /// Print `message` without a newline and read one line. `None` at end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}").context("writing prompt")?;
        self.output.flush().context("flushing prompt")?;

        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .context("reading from stdin")?;
        Ok((n > 0).then_some(line))
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}").context("writing to stdout")
    }
}

fn parse_id(answer: &str) -> std::result::Result<usize, DataError> {
    answer
        .trim()
        .parse()
        .map_err(|_| DataError::range("please select a number"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::{Builder, NamedTempFile};

    fn csv_file(text: &str) -> NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    fn run_session(input: &str) -> (String, SessionState) {
        let mut app = RegionStatsApp::new(Cursor::new(input.to_string()), Vec::new());
        app.run().unwrap();
        let text = String::from_utf8(app.output).unwrap();
        (text, app.state)
    }

    #[test]
    fn full_session_loads_selects_and_computes() {
        let file = csv_file("id,region,sales\n1,west,10\n2,east,1\n3,east,2\n4,east,3\n5,east,4\n");
        let input = format!("1\n{}\n2\n1\n3\n4\n3\n5\n", file.path().display());
        let (out, state) = run_session(&input);

        assert!(out.contains("File read successfully!"));
        assert!(out.contains("1. east; 2. west"));
        assert!(out.contains("Region selected!"));
        assert!(out.contains("4 rows"));
        assert!(out.contains("1. id; 2. region; 3. sales"));
        assert!(out.contains("sales metrics for east"));
        assert!(out.contains("Mean: 2.5\n"));
        assert!(out.contains("Median: 3.0\n"));
        assert!(out.trim_end().ends_with("Goodbye..."));
        assert_eq!(state.selected_region, Some(1));
    }

    #[test]
    fn errors_are_reported_and_loop_continues() {
        let input = "3\n1\nnot_a_table.txt\n4\n\n7\nabc\n5\n";
        let (out, _) = run_session(input);

        assert!(out.contains("no region selected"));
        assert!(out.contains("not a CSV file"));
        // "4" with no dataset: empty column list, then a non-numeric answer.
        assert!(out.contains("please select a number"));
        assert_eq!(out.matches("Please select a valid option.").count(), 2);
        assert!(out.contains("Goodbye..."));
    }

    #[test]
    fn text_column_metrics_are_refused() {
        let file = csv_file("region,name\neast,ann\n");
        let input = format!("1\n{}\n2\n1\n4\n2\n5\n", file.path().display());
        let (out, _) = run_session(&input);
        assert!(out.contains("cannot compute metrics for non-numeric column"));
    }

    #[test]
    fn invalid_region_id_keeps_previous_selection() {
        let file = csv_file("region,v\neast,1\nwest,2\n");
        let input = format!("1\n{}\n2\n2\n2\n9\n5\n", file.path().display());
        let (out, state) = run_session(&input);
        assert!(out.contains("invalid region selected"));
        assert_eq!(state.selected_region, Some(2));
    }

    #[test]
    fn end_of_input_terminates_cleanly() {
        let (out, _) = run_session("");
        assert!(out.contains("Choose an option: "));

        let (out, _) = run_session("1\n");
        assert!(out.contains("Input file location: "));
    }
}
