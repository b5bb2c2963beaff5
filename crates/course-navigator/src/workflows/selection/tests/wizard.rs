use super::common::*;
use crate::gateway::GatewayError;
use crate::workflows::selection::domain::{NoticeKind, SearchState};
use crate::workflows::selection::{
    Advance, Completion, SelectionWizard, ValidationError, ViewChoice, WizardError, WizardStep,
};
use std::time::Duration;

fn assert_initial(wizard: &SelectionWizard) {
    assert_eq!(wizard.step(), WizardStep::ProgramSelect);
    assert_eq!(wizard.selection().program, "");
    assert_eq!(wizard.selection().academic_term, "");
    assert_eq!(wizard.selection().minor, None);
    assert_eq!(wizard.view_choice(), ViewChoice::Unset);
    assert!(wizard.eligible().is_none());
    assert!(wizard.search().is_empty());
    assert_eq!(wizard.expansion().expanded(), None);
    assert!(!wizard.is_loading());
}

#[test]
fn next_without_program_never_advances() {
    let mut wizard = SelectionWizard::new();

    for _ in 0..3 {
        let err = wizard.next().expect_err("program is required");
        assert_eq!(
            err,
            WizardError::Validation(ValidationError::ProgramRequired)
        );
        assert_eq!(wizard.step(), WizardStep::ProgramSelect);
    }

    let notices = wizard.take_notices();
    assert_eq!(notices.len(), 3);
    for notice in notices {
        assert_eq!(notice.kind, NoticeKind::Validation);
        assert_eq!(notice.message, "Program required");
    }
}

#[test]
fn blank_program_counts_as_unset() {
    let mut wizard = SelectionWizard::new();
    wizard.set_program("   ");
    assert_eq!(wizard.can_advance(), Err(ValidationError::ProgramRequired));
}

#[test]
fn term_and_choice_steps_are_gated() {
    let mut wizard = SelectionWizard::new();
    wizard.set_program("Mechanical Engineering");
    assert_eq!(wizard.next(), Ok(Advance::Moved(WizardStep::TermSelect)));
    let missing_term = WizardError::Validation(ValidationError::AcademicTermRequired);
    assert_eq!(wizard.next(), Err(missing_term));
    assert_eq!(wizard.step(), WizardStep::TermSelect);

    let mut wizard = wizard_at_results(mechanical_courses(), ViewChoice::ShowAll);
    wizard.back();
    assert_eq!(wizard.step(), WizardStep::ChoiceSelect);
    wizard.set_view_choice(ViewChoice::Unset);
    let missing_choice = WizardError::Validation(ValidationError::ViewChoiceRequired);
    assert_eq!(wizard.next(), Err(missing_choice));
}

#[test]
fn back_steps_down_one_position_and_stops_at_first() {
    let mut wizard = wizard_at_results(mechanical_courses(), ViewChoice::ShowAll);

    let mut expected = WizardStep::Results.position();
    while expected > 1 {
        expected -= 1;
        assert_eq!(wizard.back().position(), expected);
    }
    assert_eq!(wizard.back(), WizardStep::ProgramSelect);
    assert_eq!(wizard.selection().program, "Mechanical Engineering");
}

#[test]
fn next_on_results_is_terminal() {
    let mut wizard = wizard_at_results(mechanical_courses(), ViewChoice::ShowAll);
    assert_eq!(wizard.next(), Ok(Advance::Terminal));
    assert_eq!(wizard.step(), WizardStep::Results);
}

#[test]
fn minor_step_issues_exactly_one_resolution() {
    let mut wizard = wizard_at_minor_step();

    let request = match wizard.next() {
        Ok(Advance::AwaitingResolution(request)) => request,
        other => panic!("expected resolution request, got {other:?}"),
    };
    assert_eq!(request.query.program, "Mechanical Engineering");
    assert_eq!(request.query.term, "2A");
    assert_eq!(request.query.minor, None);
    assert!(wizard.is_loading());
    assert_eq!(wizard.step(), WizardStep::MinorSelect);

    assert_eq!(wizard.next(), Err(WizardError::ResolutionPending));
}

#[test]
fn blank_minor_is_sent_as_absent() {
    let mut wizard = wizard_at_minor_step();
    wizard.set_minor("  ");
    assert_eq!(wizard.selection().minor, None);

    wizard.set_minor("Computing");
    let Ok(Advance::AwaitingResolution(request)) = wizard.next() else {
        panic!("expected resolution request");
    };
    assert_eq!(request.query.minor.as_deref(), Some("Computing"));
}

#[test]
fn show_all_lists_resolved_courses_in_order_with_default_credits() {
    let wizard = wizard_at_results(mechanical_courses(), ViewChoice::ShowAll);

    let cards = wizard.result_cards();
    let codes: Vec<&str> = cards.iter().map(|card| card.code.as_str()).collect();
    assert_eq!(codes, vec!["ME101", "ME202", "ME305"]);
    for card in &cards {
        assert!((card.credits - 0.5).abs() < f64::EPSILON);
        assert_eq!(card.rating, None);
    }
}

#[test]
fn failed_resolution_keeps_step_and_surfaces_server_message() {
    let mut wizard = wizard_at_minor_step();
    let Ok(Advance::AwaitingResolution(request)) = wizard.next() else {
        panic!("expected resolution request");
    };

    let completion = wizard.complete_resolution(
        request.token,
        Err(GatewayError::Rejected {
            status: 400,
            message: Some("Invalid program".to_string()),
        }),
    );

    assert_eq!(completion, Completion::Failed);
    assert_eq!(wizard.step(), WizardStep::MinorSelect);
    assert!(!wizard.is_loading());
    assert!(wizard.eligible().is_none());
    let notices = wizard.take_notices();
    assert_eq!(notices[0].kind, NoticeKind::Resolution);
    assert_eq!(notices[0].message, "Invalid program");
}

#[test]
fn failed_resolution_without_message_uses_fallback() {
    let mut wizard = wizard_at_minor_step();
    let Ok(Advance::AwaitingResolution(request)) = wizard.next() else {
        panic!("expected resolution request");
    };

    let timeout = GatewayError::Timeout(Duration::from_secs(10));
    wizard.complete_resolution(request.token, Err(timeout));

    assert_eq!(
        wizard.notices()[0].message,
        "Could not load eligible courses. Please try again."
    );
    wizard.dismiss_notices();
    assert!(wizard.notices().is_empty());
}

#[test]
fn failed_reresolution_keeps_the_previous_eligible_set() {
    let mut wizard = wizard_at_results(programming_courses(), ViewChoice::ShowAll);
    wizard.back();
    wizard.back();
    assert_eq!(wizard.step(), WizardStep::MinorSelect);

    let Ok(Advance::AwaitingResolution(retry)) = wizard.next() else {
        panic!("expected resolution request");
    };
    let failure = GatewayError::Transport("connection reset".to_string());
    assert_eq!(
        wizard.complete_resolution(retry.token, Err(failure)),
        Completion::Failed
    );

    assert_eq!(wizard.step(), WizardStep::MinorSelect);
    let codes = wizard.eligible().map(|set| set.codes().to_vec());
    assert_eq!(codes, Some(vec!["CS135".to_string(), "CS145".to_string()]));
    assert_eq!(wizard.notices()[0].kind, NoticeKind::Resolution);
}

#[test]
fn resolution_arriving_after_back_is_discarded() {
    let mut wizard = wizard_at_minor_step();
    let Ok(Advance::AwaitingResolution(request)) = wizard.next() else {
        panic!("expected resolution request");
    };

    wizard.back();
    assert!(!wizard.is_loading());

    let completion = wizard.complete_resolution(request.token, Ok(mechanical_courses()));
    assert_eq!(completion, Completion::Discarded);
    assert_eq!(wizard.step(), WizardStep::TermSelect);
    assert!(wizard.eligible().is_none());
}

#[test]
fn resolution_arriving_after_reset_is_discarded() {
    let mut wizard = wizard_at_minor_step();
    let Ok(Advance::AwaitingResolution(stale)) = wizard.next() else {
        panic!("expected resolution request");
    };

    wizard.reset();
    assert_eq!(
        wizard.complete_resolution(stale.token, Ok(mechanical_courses())),
        Completion::Discarded
    );
    assert_initial(&wizard);
}

#[test]
fn reset_from_any_state_restores_initial_state() {
    let mut wizard = wizard_at_results(programming_courses(), ViewChoice::Search);
    let request = issue_search(&mut wizard, "programming");
    wizard.complete_search(request.token, Ok(programming_matches()));
    wizard.toggle_expansion("CS135");

    wizard.reset();

    assert_initial(&wizard);
    assert!(wizard.notices().is_empty());
}

#[test]
fn one_character_query_sends_nothing() {
    let mut wizard = wizard_at_results(programming_courses(), ViewChoice::Search);

    assert_eq!(wizard.begin_search("a"), Ok(None));
    assert!(!wizard.search().has_searched);
    assert!(!wizard.search().is_searching);
    assert_eq!(wizard.search().query, "a");

    assert_eq!(wizard.begin_search("  b "), Ok(None));
}

#[test]
fn short_query_clears_previous_results() {
    let mut wizard = wizard_at_results(programming_courses(), ViewChoice::Search);
    let request = issue_search(&mut wizard, "programming");
    wizard.complete_search(request.token, Ok(programming_matches()));
    assert_eq!(wizard.result_cards().len(), 2);

    assert_eq!(wizard.begin_search("p"), Ok(None));
    assert!(wizard.search().results.is_empty());
    assert!(!wizard.search().has_searched);
}

#[test]
fn search_sends_trimmed_query_and_eligible_codes() {
    let mut wizard = wizard_at_results(programming_courses(), ViewChoice::Search);

    let request = issue_search(&mut wizard, "  programming ");

    assert_eq!(request.query.query, "programming");
    assert_eq!(
        request.query.eligible_course_codes,
        vec!["CS135".to_string(), "CS145".to_string()]
    );
    assert!(wizard.search().is_searching);
    let executed = wizard.search().executed_query.as_deref();
    assert_eq!(executed, Some("programming"));
}

#[test]
fn search_results_keep_collaborator_order_with_relative_ratings() {
    let mut wizard = wizard_at_results(programming_courses(), ViewChoice::Search);
    let request = issue_search(&mut wizard, "programming");

    assert_eq!(
        wizard.complete_search(request.token, Ok(programming_matches())),
        Completion::Applied
    );

    let cards = wizard.result_cards();
    let summary: Vec<(&str, Option<u8>)> = cards
        .iter()
        .map(|card| (card.code.as_str(), card.rating))
        .collect();
    assert_eq!(summary, vec![("CS135", Some(10)), ("CS145", Some(3))]);
    assert!(wizard.search().has_searched);
    assert!(!wizard.search().is_searching);
}

#[test]
fn empty_eligible_set_makes_search_a_no_op() {
    let mut wizard = wizard_at_results(Vec::new(), ViewChoice::Search);

    assert_eq!(wizard.begin_search("programming"), Ok(None));
    assert!(!wizard.search().is_searching);
    assert!(!wizard.search().has_searched);
    assert!(wizard.result_cards().is_empty());
}

#[test]
fn search_outside_search_mode_is_rejected() {
    let mut wizard = wizard_at_results(programming_courses(), ViewChoice::ShowAll);
    assert_eq!(
        wizard.begin_search("programming"),
        Err(WizardError::SearchUnavailable)
    );

    let mut wizard = wizard_at_minor_step();
    assert_eq!(
        wizard.begin_search("programming"),
        Err(WizardError::SearchUnavailable)
    );
}

#[test]
fn failed_search_clears_results_and_raises_notice() {
    let mut wizard = wizard_at_results(programming_courses(), ViewChoice::Search);
    let first = issue_search(&mut wizard, "programming");
    wizard.complete_search(first.token, Ok(programming_matches()));

    let second = issue_search(&mut wizard, "design");
    let completion = wizard.complete_search(
        second.token,
        Err(GatewayError::Transport("connection refused".to_string())),
    );

    assert_eq!(completion, Completion::Failed);
    assert!(wizard.search().results.is_empty());
    assert!(!wizard.search().has_searched);
    assert!(!wizard.search().is_searching);
    let notices = wizard.take_notices();
    assert_eq!(notices[0].kind, NoticeKind::Search);
    assert_eq!(notices[0].message, "Search failed. Please try again.");
}

#[test]
fn leaving_and_returning_to_search_mode_leaves_no_residue() {
    let mut wizard = wizard_at_results(programming_courses(), ViewChoice::Search);
    let request = issue_search(&mut wizard, "programming");
    wizard.complete_search(request.token, Ok(programming_matches()));
    wizard.toggle_expansion("CS135");

    wizard.back();
    assert_eq!(*wizard.search(), SearchState::default());
    assert_eq!(wizard.next(), Ok(Advance::Moved(WizardStep::Results)));

    assert_eq!(wizard.search().query, "");
    assert!(wizard.search().results.is_empty());
    assert!(!wizard.search().has_searched);
    assert_eq!(wizard.expansion().expanded(), None);
    assert!(wizard.result_cards().is_empty());
}

#[test]
fn late_search_after_leaving_results_is_discarded() {
    let mut wizard = wizard_at_results(programming_courses(), ViewChoice::Search);
    let request = issue_search(&mut wizard, "programming");

    wizard.back();
    wizard.next().expect("choice still set");

    assert_eq!(
        wizard.complete_search(request.token, Ok(programming_matches())),
        Completion::Discarded
    );
    assert!(wizard.search().results.is_empty());
    assert!(!wizard.search().has_searched);
}

#[test]
fn superseded_search_is_discarded() {
    let mut wizard = wizard_at_results(programming_courses(), ViewChoice::Search);
    let first = issue_search(&mut wizard, "programming");
    let second = issue_search(&mut wizard, "functional");

    assert_eq!(
        wizard.complete_search(first.token, Ok(programming_matches())),
        Completion::Discarded
    );
    assert!(wizard.search().is_searching);
    assert_eq!(
        wizard.complete_search(second.token, Ok(Vec::new())),
        Completion::Applied
    );
    assert!(wizard.search().has_searched);
    assert!(wizard.result_cards().is_empty());
}

#[test]
fn switching_view_on_results_drops_search_state() {
    let mut wizard = wizard_at_results(programming_courses(), ViewChoice::Search);
    let request = issue_search(&mut wizard, "programming");
    wizard.complete_search(request.token, Ok(programming_matches()));

    wizard.set_view_choice(ViewChoice::ShowAll);
    assert!(wizard.search().is_empty());
    let cards = wizard.result_cards();
    assert_eq!(cards.len(), 2);
    assert!(cards.iter().all(|card| card.rating.is_none()));

    wizard.set_view_choice(ViewChoice::Search);
    assert!(wizard.result_cards().is_empty());
}

#[test]
fn only_one_course_is_expanded_at_a_time() {
    let mut wizard = wizard_at_results(programming_courses(), ViewChoice::ShowAll);

    wizard.toggle_expansion("CS135");
    wizard.toggle_expansion("CS145");

    let expanded: Vec<String> = wizard
        .result_cards()
        .into_iter()
        .filter(|card| card.expanded)
        .map(|card| card.code)
        .collect();
    assert_eq!(expanded, vec!["CS145".to_string()]);
    assert_eq!(wizard.expansion().expanded(), Some("CS145"));

    wizard.toggle_expansion("CS145");
    assert_eq!(wizard.expansion().expanded(), None);
}

#[test]
fn results_step_ignores_unset_view_choice() {
    let mut wizard = wizard_at_results(mechanical_courses(), ViewChoice::ShowAll);
    wizard.toggle_expansion("ME202");

    wizard.set_view_choice(ViewChoice::Unset);

    assert_eq!(wizard.step(), WizardStep::Results);
    assert_eq!(wizard.view_choice(), ViewChoice::ShowAll);
    assert_eq!(wizard.expansion().expanded(), Some("ME202"));
    assert_eq!(wizard.result_cards().len(), 3);
}
