//! Plain-text rendering of wizard screens and course cards.

use course_navigator::catalog::{ACADEMIC_TERMS, MINORS, PROGRAMS};
use course_navigator::workflows::selection::{
    CourseCard, Notice, NoticeKind, SelectionWizard, ViewChoice, WizardStep,
};
const TOTAL_STEPS: u8 = 5;

/// The prompt for the wizard's current step, including results when on the last step.
pub fn screen(wizard: &SelectionWizard) -> String {
    let step = wizard.step();
    let (position, label) = (step.position(), step.label());
    let mut out = format!("\n[Step {position}/{TOTAL_STEPS}] {label}\n");
    out.push_str(&summary(wizard));

    match step {
        WizardStep::ProgramSelect => {
            out.push_str(&options(&PROGRAMS));
            out.push_str("Choose a program (number or name): ");
        }
        WizardStep::TermSelect => {
            out.push_str(&options(&ACADEMIC_TERMS));
            out.push_str("Choose your academic term: ");
        }
        WizardStep::MinorSelect => {
            out.push_str(&options(&MINORS));
            out.push_str("Choose a minor, or press enter for none: ");
        }
        WizardStep::ChoiceSelect => {
            out.push_str(&format!("  1) {}\n", ViewChoice::ShowAll.label()));
            out.push_str(&format!("  2) {}\n", ViewChoice::Search.label()));
            out.push_str("How would you like to view them? ");
        }
        WizardStep::Results => out.push_str(&results(wizard)),
    }
    out
}

fn summary(wizard: &SelectionWizard) -> String {
    let selection = wizard.selection();
    let mut out = String::new();
    if selection.has_program() {
        out.push_str(&format!("Program: {}\n", selection.program));
    }
    if selection.has_academic_term() && wizard.step() > WizardStep::TermSelect {
        out.push_str(&format!("Term: {}\n", selection.academic_term));
    }
    if let Some(minor) = selection.minor() {
        if wizard.step() > WizardStep::MinorSelect {
            out.push_str(&format!("Minor: {minor}\n"));
        }
    }
    out
}

fn options(items: &[&str]) -> String {
    let mut out = String::new();
    for (index, item) in items.iter().enumerate() {
        out.push_str(&format!("  {:>2}) {}\n", index + 1, item));
    }
    out
}

fn results(wizard: &SelectionWizard) -> String {
    let eligible = wizard.eligible().map_or(0, |set| set.len());
    let cards = wizard.result_cards();
    let mut out = String::new();

    match wizard.view_choice() {
        ViewChoice::Search => {
            let search = wizard.search();
            out.push_str(&format!("Searching {eligible} eligible courses.\n"));
            if let Some(query) = &search.executed_query {
                if search.has_searched {
                    out.push_str(&format!("{} results for \"{query}\"\n", cards.len()));
                }
            }
            if search.has_searched && cards.is_empty() {
                out.push_str("No courses matched your search.\n");
            }
        }
        _ => {
            out.push_str(&format!("{eligible} eligible courses\n"));
            if eligible == 0 {
                out.push_str("No eligible courses were found for this selection.\n");
            }
        }
    }

    for card in &cards {
        out.push_str(&render_card(card));
    }

    match wizard.view_choice() {
        ViewChoice::Search => out.push_str("Search (or 'expand <code>', 'view all', 'back'): "),
        _ => out.push_str("Command ('expand <code>', 'view search', 'back', 'reset'): "),
    }
    out
}

/// One course card. Collapsed cards show a single line.
pub fn render_card(card: &CourseCard) -> String {
    let mut out = format!("  {}  {}", card.display_code, card.title);
    if let Some(rating) = card.rating_label() {
        out.push_str(&format!("  [{rating}]"));
    }
    out.push('\n');

    if card.expanded {
        out.push_str(&format!("      {}\n", card.description));
        out.push_str(&format!("      Credits: {}\n", card.credits));
        out.push_str(&format!("      Offered: {}\n", card.terms_label()));
        if !card.prerequisites.is_empty() {
            let prerequisites = card.prerequisites.join(", ");
            out.push_str(&format!("      Prerequisites: {prerequisites}\n"));
        }
    }
    out
}

pub fn notices(notices: &[Notice]) -> String {
    let mut out = String::new();
    for notice in notices {
        let tag = match notice.kind {
            NoticeKind::Validation => "!",
            NoticeKind::Resolution | NoticeKind::Search => "error",
        };
        out.push_str(&format!("[{tag}] {}\n", notice.message));
    }
    out
}

/// Static picker lists, for `course-navigator catalog`.
pub fn catalog() -> String {
    let mut out = String::new();
    out.push_str("Programs:\n");
    out.push_str(&options(&PROGRAMS));
    out.push_str("Academic terms:\n");
    out.push_str(&options(&ACADEMIC_TERMS));
    out.push_str("Minors:\n");
    out.push_str(&options(&MINORS));
    out
}
