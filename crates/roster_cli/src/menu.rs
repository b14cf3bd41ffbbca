//! Interactive text menu over an `EmployeeStore`.
//!
//! # Responsibility
//! - Prompt for each field, call store operations, print results or errors.
//! - Translate 1-based positions typed by the user to 0-based store indices.
//!
//! # Invariants
//! - Store errors never end the loop; they are printed as `Error: <message>`.
//! - Quit and end of input both save before returning.

use roster_core::{EmployeeRepository, EmployeeStore, EmployeeUpdate, NewEmployee, StoreError};
use std::io::{self, BufRead, Write};

const MENU_LINE: &str = "Menu: [A]dd  [E]dit  [D]elete  [L]ist  [Q]uit";

/// One menu choice parsed from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Edit,
    Delete,
    List,
    Quit,
}

impl MenuChoice {
    /// Parses `a|e|d|l|q` case-insensitively, ignoring surrounding whitespace.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "a" => Some(Self::Add),
            "e" => Some(Self::Edit),
            "d" => Some(Self::Delete),
            "l" => Some(Self::List),
            "q" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Menu loop bound to a store and a pair of text streams.
pub struct Menu<'a, R: EmployeeRepository, I: BufRead, O: Write> {
    store: &'a mut EmployeeStore<R>,
    input: I,
    output: O,
}

/// Outcome of a single action; `Eof` ends the loop.
enum Step {
    Continue,
    Quit,
    Eof,
}

impl<'a, R: EmployeeRepository, I: BufRead, O: Write> Menu<'a, R, I, O> {
    pub fn new(store: &'a mut EmployeeStore<R>, input: I, output: O) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Runs until the user quits or input ends.
    ///
    /// Only failures of the text streams themselves are returned.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Employee Management App")?;
        writeln!(self.output, "-----------------------")?;

        loop {
            writeln!(self.output)?;
            writeln!(self.output, "{MENU_LINE}")?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                return self.finish();
            };

            let step = match MenuChoice::parse(&choice) {
                Some(MenuChoice::Add) => self.add()?,
                Some(MenuChoice::Edit) => self.edit()?,
                Some(MenuChoice::Delete) => self.delete()?,
                Some(MenuChoice::List) => {
                    writeln!(self.output)?;
                    writeln!(self.output, "{}", self.store.display())?;
                    Step::Continue
                }
                Some(MenuChoice::Quit) => Step::Quit,
                None => {
                    writeln!(self.output, "Invalid option. Please choose A/E/D/L/Q.")?;
                    Step::Continue
                }
            };

            match step {
                Step::Continue => {}
                Step::Eof => return self.finish(),
                Step::Quit => match self.store.save() {
                    Ok(()) => {
                        writeln!(self.output, "Goodbye!")?;
                        return Ok(());
                    }
                    Err(err) => self.report(&err)?,
                },
            }
        }
    }

    fn add(&mut self) -> io::Result<Step> {
        let Some(id) = self.prompt("ID: ")? else {
            return Ok(Step::Eof);
        };
        let Some(first_name) = self.prompt("First name: ")? else {
            return Ok(Step::Eof);
        };
        let Some(last_name) = self.prompt("Last name: ")? else {
            return Ok(Step::Eof);
        };
        let Some(department) = self.prompt("Department (3 letters): ")? else {
            return Ok(Step::Eof);
        };
        let Some(phone) = self.prompt("Phone (10 digits or formatted): ")? else {
            return Ok(Step::Eof);
        };

        let request = NewEmployee {
            id,
            first_name,
            last_name,
            department,
            phone,
        };
        match self.store.create(request) {
            Ok(employee) => writeln!(self.output, "Added: {employee}")?,
            Err(err) => self.report(&err)?,
        }
        Ok(Step::Continue)
    }

    fn edit(&mut self) -> io::Result<Step> {
        let Some(index) = self.prompt_index("Index to edit (1-based): ")? else {
            return Ok(Step::Eof);
        };
        let Some(index) = index else {
            return Ok(Step::Continue);
        };

        writeln!(self.output, "Leave a field empty to keep current value.")?;
        let Some(first_name) = self.prompt("New first name: ")? else {
            return Ok(Step::Eof);
        };
        let Some(last_name) = self.prompt("New last name: ")? else {
            return Ok(Step::Eof);
        };
        let Some(department) = self.prompt("New department (3 letters): ")? else {
            return Ok(Step::Eof);
        };
        let Some(phone) = self.prompt("New phone: ")? else {
            return Ok(Step::Eof);
        };

        let update = EmployeeUpdate {
            first_name: non_blank(first_name),
            last_name: non_blank(last_name),
            department: non_blank(department),
            phone: non_blank(phone),
        };
        match self.store.edit(index, &update) {
            Ok(employee) => writeln!(self.output, "Updated: {employee}")?,
            Err(err) => self.report(&err)?,
        }
        Ok(Step::Continue)
    }

    fn delete(&mut self) -> io::Result<Step> {
        let Some(index) = self.prompt_index("Index to delete (1-based): ")? else {
            return Ok(Step::Eof);
        };
        let Some(index) = index else {
            return Ok(Step::Continue);
        };

        match self.store.delete(index) {
            Ok(removed) => writeln!(self.output, "Deleted: {removed}")?,
            Err(err) => self.report(&err)?,
        }
        Ok(Step::Continue)
    }

    /// Saves on end of input; a failed save is reported but still ends the loop.
    fn finish(&mut self) -> io::Result<()> {
        if let Err(err) = self.store.save() {
            self.report(&err)?;
        }
        Ok(())
    }

    /// Prints `label` and reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Reads a 1-based position and returns the 0-based index.
    ///
    /// The inner `None` means the text was not a position; that has already
    /// been reported.
    fn prompt_index(&mut self, label: &str) -> io::Result<Option<Option<usize>>> {
        let Some(text) = self.prompt(label)? else {
            return Ok(None);
        };

        match parse_position(&text) {
            Some(index) => Ok(Some(Some(index))),
            None => {
                writeln!(
                    self.output,
                    "Error: `{text}` is not a valid position; enter a number from the list"
                )?;
                Ok(Some(None))
            }
        }
    }

    fn report(&mut self, err: &StoreError) -> io::Result<()> {
        match err {
            StoreError::IndexOutOfRange { index, len } => writeln!(
                self.output,
                "Error: no employee at position {}; roster has {len} employee(s)",
                index + 1
            ),
            other => writeln!(self.output, "Error: {other}"),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

/// Converts a 1-based position typed by the user to a 0-based index.
pub fn parse_position(text: &str) -> Option<usize> {
    text.trim().parse::<usize>().ok()?.checked_sub(1)
}
