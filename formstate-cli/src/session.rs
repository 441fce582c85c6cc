//! Line-oriented front end for a [`FormStore`].
//!
//! Commands:
//!
//! - `<field>=<value>` sets a field
//! - `show` prints every field
//! - `submit` submits once the form is valid
//! - `help`, `quit`

use std::io::{BufRead, Write};

use formstate::{FieldState, FieldStatus, FormStore};

use crate::error::CliError;

const INVALID_VALUE: &str = "Please enter a valid value!";

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Set { field: &'a str, value: &'a str },
    Show,
    Submit,
    Help,
    Quit,
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if let Some((field, value)) = trimmed.split_once('=') {
            return Some(Self::Set {
                field: field.trim(),
                value,
            });
        }
        let command = match trimmed.trim() {
            "" => return None,
            "show" => Self::Show,
            "submit" => Self::Submit,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => Self::Unknown(other),
        };
        Some(command)
    }
}

pub struct Session<R, W> {
    store: FormStore,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(store: FormStore, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Process commands until `quit` or end of input.
    pub fn run(mut self) -> Result<FormStore, CliError> {
        self.show()?;
        writeln!(self.output, "Type `help` for commands.")?;

        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            let Some(command) = Command::parse(&line) else {
                continue;
            };
            match command {
                Command::Set { field, value } => self.set(field, value)?,
                Command::Show => self.show()?,
                Command::Submit => self.submit()?,
                Command::Help => self.help()?,
                Command::Quit => break,
                Command::Unknown(other) => {
                    writeln!(self.output, "Unknown command '{}'. Type `help`.", other)?
                }
            }
        }
        Ok(self.store)
    }

    fn set(&mut self, field: &str, value: &str) -> Result<(), CliError> {
        // The store only accepts names from its schema.
        if self.store.field(field).is_none() {
            writeln!(self.output, "No field named '{}'.", field)?;
            return Ok(());
        }
        let snapshot = match self.store.apply_change(field, value) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                writeln!(self.output, "{}", e)?;
                return Ok(());
            }
        };
        if let Some(state) = snapshot.field(field) {
            render_field(&mut self.output, state)?;
        }
        render_status(&mut self.output, snapshot.is_valid())?;
        Ok(())
    }

    fn show(&mut self) -> Result<(), CliError> {
        let snapshot = self.store.snapshot();
        for spec in self.store.schema().fields() {
            if let Some(state) = snapshot.field(spec.name()) {
                render_field(&mut self.output, state)?;
            }
        }
        render_status(&mut self.output, snapshot.is_valid())?;
        Ok(())
    }

    fn submit(&mut self) -> Result<(), CliError> {
        if !self.store.snapshot().is_valid() {
            writeln!(self.output, "The form is not complete yet.")?;
            return Ok(());
        }
        let data = self.store.submit();
        writeln!(self.output, "Submitted {} field(s).", data.len())?;
        Ok(())
    }

    fn help(&mut self) -> Result<(), CliError> {
        writeln!(self.output, "  <field>=<value>  set a field")?;
        writeln!(self.output, "  show             list all fields")?;
        writeln!(self.output, "  submit           submit the form")?;
        writeln!(self.output, "  quit             leave")?;
        Ok(())
    }
}

fn render_field(out: &mut impl Write, state: &FieldState) -> Result<(), CliError> {
    let marker = match state.status() {
        FieldStatus::Untouched => ' ',
        FieldStatus::Invalid => '!',
        FieldStatus::Valid => '*',
    };
    write!(out, "[{}] {}: {:?}", marker, state.name(), state.value())?;
    if !state.placeholder().is_empty() {
        write!(out, "  ({})", state.placeholder())?;
    }
    writeln!(out)?;

    if let Some(options) = state.options() {
        let choices: Vec<String> = options
            .iter()
            .map(|o| format!("{}={}", o.value, o.display_value))
            .collect();
        writeln!(out, "      options: {}", choices.join(", "))?;
    }
    if state.shows_error() {
        writeln!(out, "      {}", INVALID_VALUE)?;
    }
    Ok(())
}

fn render_status(out: &mut impl Write, valid: bool) -> Result<(), CliError> {
    if valid {
        writeln!(out, "Form is valid: `submit` is enabled.")?;
    } else {
        writeln!(out, "Form is incomplete.")?;
    }
    Ok(())
}
