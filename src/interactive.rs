//! Line-oriented driver that feeds user input into a [`SelectionSession`].

use crate::render;
use course_navigator::catalog::{ACADEMIC_TERMS, MINORS, PROGRAMS};
use course_navigator::gateway::{CourseSearch, EligibilityResolver};
use course_navigator::workflows::selection::{
    SelectionSession, ViewChoice, WizardError, WizardStep,
};
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Quit,
    EndOfInput,
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Back,
    Reset,
    Help,
    Expand(String),
    View(ViewChoice),
    Input(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "quit" | "exit" | ":q" => return Command::Quit,
            "back" => return Command::Back,
            "reset" => return Command::Reset,
            "help" | "?" => return Command::Help,
            "view all" => return Command::View(ViewChoice::ShowAll),
            "view search" => return Command::View(ViewChoice::Search),
            _ => {}
        }

        match trimmed.split_once(char::is_whitespace) {
            Some((verb, code)) if verb.eq_ignore_ascii_case("expand") => {
                Command::Expand(code.trim().to_string())
            }
            _ => Command::Input(trimmed.to_string()),
        }
    }
}

const HELP: &str = "\
Commands: back, reset, quit, help
On the results step: expand <code>, view all, view search
";

/// Run the wizard until the user quits or input ends, writing every screen to `output`.
pub async fn drive<G, R, W>(
    session: &mut SelectionSession<G>,
    input: R,
    output: &mut W,
) -> io::Result<Exit>
where
    G: EligibilityResolver + CourseSearch + 'static,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    write!(output, "{}", render::screen(session.wizard()))?;
    output.flush()?;

    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Quit => return Ok(Exit::Quit),
            Command::Back => {
                session.back();
            }
            Command::Reset => session.reset(),
            Command::Help => write!(output, "{HELP}")?,
            Command::Expand(code) => {
                if let Some(code) = shown_code(session, &code) {
                    session.wizard_mut().toggle_expansion(&code);
                }
            }
            Command::View(choice) => {
                if matches!(
                    session.wizard().step(),
                    WizardStep::ChoiceSelect | WizardStep::Results
                ) {
                    session.choose_view(choice);
                }
            }
            Command::Input(text) => {
                if let Err(err) = apply_input(session, &text).await {
                    report(output, err)?;
                }
            }
        }

        let notices = session.wizard_mut().take_notices();
        write!(output, "{}", render::notices(&notices))?;
        write!(output, "{}", render::screen(session.wizard()))?;
        output.flush()?;
    }

    Ok(Exit::EndOfInput)
}

async fn apply_input<G>(session: &mut SelectionSession<G>, text: &str) -> Result<(), WizardError>
where
    G: EligibilityResolver + CourseSearch + 'static,
{
    match session.wizard().step() {
        WizardStep::ProgramSelect => {
            if !text.is_empty() {
                session.wizard_mut().set_program(pick(text, &PROGRAMS));
            }
            session.next().await?;
        }
        WizardStep::TermSelect => {
            if !text.is_empty() {
                session
                    .wizard_mut()
                    .set_academic_term(pick(text, &ACADEMIC_TERMS));
            }
            session.next().await?;
        }
        WizardStep::MinorSelect => {
            if text.is_empty() || text.eq_ignore_ascii_case("none") {
                session.wizard_mut().clear_minor();
            } else {
                session.wizard_mut().set_minor(pick(text, &MINORS));
            }
            session.next().await?;
        }
        WizardStep::ChoiceSelect => {
            match text.to_ascii_lowercase().as_str() {
                "1" | "all" => session.choose_view(ViewChoice::ShowAll),
                "2" | "search" => session.choose_view(ViewChoice::Search),
                _ => {}
            }
            session.next().await?;
        }
        WizardStep::Results => {
            if session.wizard().view_choice() == ViewChoice::Search {
                session.search(text).await?;
            }
        }
    }
    Ok(())
}

/// Code of the result card matching `typed`, by code or display code, ignoring case.
fn shown_code<G>(session: &SelectionSession<G>, typed: &str) -> Option<String>
where
    G: EligibilityResolver + CourseSearch + 'static,
{
    session
        .wizard()
        .result_cards()
        .into_iter()
        .find(|card| {
            card.code.eq_ignore_ascii_case(typed) || card.display_code.eq_ignore_ascii_case(typed)
        })
        .map(|card| card.code)
}

/// A 1-based number selects from `options`; anything else is taken as typed.
fn pick(text: &str, options: &[&str]) -> String {
    text.parse::<usize>()
        .ok()
        .and_then(|index| index.checked_sub(1))
        .and_then(|index| options.get(index))
        .map_or_else(|| text.to_string(), |option| (*option).to_string())
}

fn report<W: Write>(output: &mut W, err: WizardError) -> io::Result<()> {
    match err {
        // already raised as a notice
        WizardError::Validation(_) => Ok(()),
        other => writeln!(output, "[!] {other}"),
    }
}
