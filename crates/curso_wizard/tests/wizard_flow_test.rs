//! End-to-end wizard navigation against a scripted service.

mod test_utils;

use curso_content::StepOutcome;
use curso_error::{CursoError, UpstreamError, UpstreamErrorKind};
use curso_wizard::{Completion, CourseViewer, WizardController, WizardStep};
use test_utils::{course_json, pillars_json, requestor, variations_json};

#[tokio::test]
async fn test_topic_advances_to_pillars_on_success() {
    let requestor = requestor(vec![pillars_json(&["Bases", "Técnica"])]);
    let mut wizard = WizardController::new();

    let completion = wizard.submit_topic(&requestor, "Fotografía").await;

    assert_eq!(completion, Some(Completion::Applied(WizardStep::Pillars)));
    assert_eq!(*wizard.step(), WizardStep::Pillars);
    assert_eq!(wizard.pillars().len(), 2);
    assert!(!wizard.is_loading());
}

#[tokio::test]
async fn test_topic_stays_on_input_on_failure() {
    let requestor = requestor(vec!["no es JSON".to_string()]);
    let mut wizard = WizardController::new();

    let completion = wizard.submit_topic(&requestor, "Fotografía").await;

    assert_eq!(completion, Some(Completion::Failed(WizardStep::Input)));
    assert_eq!(*wizard.step(), WizardStep::Input);
    assert!(wizard.pillars().is_empty());
    assert!(!wizard.is_loading());
    assert!(wizard.take_alert().is_some());
}

#[tokio::test]
async fn test_blank_topic_is_ignored() {
    let requestor = requestor(vec![]);
    let mut wizard = WizardController::new();

    assert!(wizard.submit_topic(&requestor, " \t ").await.is_none());
    assert!(!wizard.is_loading());
}

#[tokio::test]
async fn test_malformed_variations_leave_pillars_untouched() {
    let requestor = requestor(vec![
        pillars_json(&["Bases", "Técnica"]),
        "```json\n{\"variations\": [\n```".to_string(),
    ]);
    let mut wizard = WizardController::new();
    wizard.submit_topic(&requestor, "Fotografía").await;

    let completion = wizard.select_pillar(&requestor, 1).await;

    assert_eq!(completion, Some(Completion::Failed(WizardStep::Pillars)));
    assert_eq!(*wizard.step(), WizardStep::Pillars);
    assert_eq!(wizard.pillars().len(), 2);
    assert!(wizard.variations().is_empty());
    assert!(!wizard.is_loading());
    assert!(wizard.take_alert().unwrap().contains("variaciones"));
}

#[tokio::test]
async fn test_back_from_course_then_new_variation_gets_fresh_course() {
    let requestor = requestor(vec![
        pillars_json(&["Bases"]),
        variations_json(&["Retrato", "Paisaje"]),
        course_json("Curso de retrato", &["Luz", "Pose"]),
        course_json("Curso de paisaje", &["Horizonte"]),
    ]);
    let mut wizard = WizardController::new();
    wizard.submit_topic(&requestor, "Fotografía").await;
    wizard.select_pillar(&requestor, 0).await;
    wizard.select_variation(&requestor, 0).await;
    assert_eq!(*wizard.step(), WizardStep::Course);
    assert_eq!(wizard.course().as_ref().unwrap().title(), "Curso de retrato");

    assert_eq!(wizard.back(), WizardStep::Variations);
    assert!(wizard.course().is_none());
    assert_eq!(wizard.variations().len(), 2);

    let completion = wizard.select_variation(&requestor, 1).await;

    assert_eq!(completion, Some(Completion::Applied(WizardStep::Course)));
    let course = wizard.course().as_ref().unwrap();
    assert_eq!(course.title(), "Curso de paisaje");
    assert_eq!(course.modules().len(), 1);
    assert_eq!(course.modules()[0].title(), "Horizonte");
    assert_eq!(wizard.selected_variation().as_ref().unwrap().title(), "Paisaje");
}

#[tokio::test]
async fn test_back_navigation_does_not_refetch() {
    let requestor = requestor(vec![
        pillars_json(&["Bases"]),
        variations_json(&["Retrato"]),
    ]);
    let mut wizard = WizardController::new();
    wizard.submit_topic(&requestor, "Fotografía").await;
    wizard.select_pillar(&requestor, 0).await;

    assert_eq!(wizard.back(), WizardStep::Pillars);
    assert_eq!(wizard.back(), WizardStep::Input);
    assert_eq!(wizard.back(), WizardStep::Input);
    assert_eq!(wizard.pillars().len(), 1);
    assert_eq!(wizard.topic(), "Fotografía");
}

#[test]
fn test_stale_response_after_back_is_discarded() {
    let mut wizard = WizardController::new();
    let pillars_ticket = wizard.begin_submit_topic("Fotografía").unwrap();
    let set = curso_core::PillarSet::new(
        vec![curso_core::Pillar::new(0, "Bases", "d").unwrap()],
        vec![],
    );
    wizard.complete(*pillars_ticket.id(), Ok(StepOutcome::Pillars(set.clone())));

    let ticket = wizard.begin_select_pillar(0).unwrap();
    assert!(wizard.is_loading());
    assert_eq!(wizard.back(), WizardStep::Pillars);
    assert!(!wizard.is_loading());

    let variations = curso_core::VariationSet::new(
        vec![curso_core::LessonVariation::new(0, "Retrato", "f").unwrap()],
        vec![],
    );
    let completion = wizard.complete(*ticket.id(), Ok(StepOutcome::Variations(variations)));

    assert_eq!(completion, Completion::Stale);
    assert_eq!(*wizard.step(), WizardStep::Pillars);
    assert!(wizard.variations().is_empty());
}

#[test]
fn test_stale_failure_raises_no_alert() {
    let mut wizard = WizardController::new();
    let ticket = wizard.begin_submit_topic("Fotografía").unwrap();
    wizard.back();

    let err = CursoError::from(UpstreamError::new(UpstreamErrorKind::Timeout(90_000)));
    assert_eq!(wizard.complete(*ticket.id(), Err(err)), Completion::Stale);
    assert!(wizard.take_alert().is_none());
}

#[tokio::test]
async fn test_sources_cleared_when_pillar_selected() {
    let mut wizard = WizardController::new();
    let ticket = wizard.begin_submit_topic("Fotografía").unwrap();
    let set = curso_core::PillarSet::new(
        vec![curso_core::Pillar::new(0, "Bases", "d").unwrap()],
        vec!["https://a.example".to_string()],
    );
    wizard.complete(*ticket.id(), Ok(StepOutcome::Pillars(set)));
    assert_eq!(wizard.sources().len(), 1);

    wizard.begin_select_pillar(0).unwrap();

    assert!(wizard.sources().is_empty());
    assert_eq!(wizard.selected_pillar().as_ref().unwrap().title(), "Bases");
}

#[tokio::test]
async fn test_finished_course_drives_viewer() {
    let requestor = requestor(vec![
        pillars_json(&["Bases"]),
        variations_json(&["Retrato"]),
        course_json("Curso", &["Luz"]),
    ]);
    let mut wizard = WizardController::new();
    wizard.submit_topic(&requestor, "Fotografía").await;
    wizard.select_pillar(&requestor, 0).await;
    wizard.select_variation(&requestor, 0).await;

    let mut viewer = CourseViewer::new(wizard.course().clone().unwrap());
    for (q, correct) in [0, 1, 2].into_iter().enumerate() {
        viewer.select_answer(q, correct);
    }

    assert!(viewer.reveal());
    assert_eq!(viewer.score(), 3);
    assert_eq!(viewer.score_message(), "¡Excelente! Dominas este tema.");
}
