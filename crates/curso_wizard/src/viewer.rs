//! Presentation state of a finished course.

use curso_core::{Course, CourseModule, OptionIndex};
use derive_getters::Getters;
use tracing::debug;

/// Tabs of the course view.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumIter,
)]
pub enum ViewerTab {
    /// Module list and module body
    #[default]
    #[strum(to_string = "Contenido")]
    Content,
    /// Chart of the course data
    #[strum(to_string = "Datos")]
    Data,
    /// Final quiz
    #[strum(to_string = "Quiz")]
    Quiz,
}

impl ViewerTab {
    /// Tab to the right, wrapping.
    pub fn next(self) -> Self {
        match self {
            ViewerTab::Content => ViewerTab::Data,
            ViewerTab::Data => ViewerTab::Quiz,
            ViewerTab::Quiz => ViewerTab::Content,
        }
    }

    /// Tab to the left, wrapping.
    pub fn previous(self) -> Self {
        match self {
            ViewerTab::Content => ViewerTab::Quiz,
            ViewerTab::Data => ViewerTab::Content,
            ViewerTab::Quiz => ViewerTab::Data,
        }
    }

    /// Position in the tab bar.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// The first answer given to a module's review question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct MiniQuizResult {
    /// Option picked
    chosen: OptionIndex,
    /// Whether it was the right one
    correct: bool,
}

/// View state over one immutable course.
///
/// Quiz answers start unanswered. Once results are revealed the answers are
/// frozen until [`CourseViewer::retry`].
///
/// # Examples
///
/// ```
/// use curso_core::{CourseBuilder, CourseModule, QuizQuestion};
/// use curso_wizard::CourseViewer;
///
/// let course = CourseBuilder::default()
///     .title("Curso")
///     .modules(vec![CourseModule::new("M1", "", "k", vec![], None).unwrap()])
///     .quiz(vec![QuizQuestion::new("¿2+2?", vec!["4".into(), "5".into()], 0).unwrap()])
///     .build()
///     .unwrap();
///
/// let mut viewer = CourseViewer::new(course);
/// assert!(!viewer.can_reveal());
/// viewer.select_answer(0, 0);
/// assert!(viewer.reveal());
/// assert_eq!(viewer.score(), 1);
/// assert!(viewer.is_perfect_score());
/// ```
#[derive(Debug, Clone, Getters)]
pub struct CourseViewer {
    /// The course shown
    course: Course,
    /// Selected tab
    active_tab: ViewerTab,
    /// Selected module
    active_module: usize,
    /// One slot per final-quiz question
    answers: Vec<Option<OptionIndex>>,
    /// Whether quiz results are shown
    revealed: bool,
    /// One slot per module
    mini_quiz_results: Vec<Option<MiniQuizResult>>,
    /// Generated header image per module, as a data URI
    module_images: Vec<Option<String>>,
}

impl CourseViewer {
    /// Fresh view on the content tab, first module selected.
    pub fn new(course: Course) -> Self {
        let questions = course.quiz().len();
        let modules = course.modules().len();
        Self {
            course,
            active_tab: ViewerTab::default(),
            active_module: 0,
            answers: vec![None; questions],
            revealed: false,
            mini_quiz_results: vec![None; modules],
            module_images: vec![None; modules],
        }
    }

    /// Switch tab.
    pub fn select_tab(&mut self, tab: ViewerTab) {
        self.active_tab = tab;
    }

    /// Next tab.
    pub fn next_tab(&mut self) {
        self.active_tab = self.active_tab.next();
    }

    /// Previous tab.
    pub fn previous_tab(&mut self) {
        self.active_tab = self.active_tab.previous();
    }

    /// The selected module.
    pub fn current_module(&self) -> Option<&CourseModule> {
        self.course.modules().get(self.active_module)
    }

    /// Select module `index`; out-of-range indices are ignored.
    pub fn select_module(&mut self, index: usize) {
        if index < self.course.modules().len() {
            self.active_module = index;
        }
    }

    /// Select the following module, stopping at the last.
    pub fn next_module(&mut self) {
        self.select_module(self.active_module + 1);
    }

    /// Select the preceding module, stopping at the first.
    pub fn previous_module(&mut self) {
        self.active_module = self.active_module.saturating_sub(1);
    }

    /// Record `option` as the answer to question `question`.
    ///
    /// Returns whether the answer was stored. Nothing changes after results
    /// are revealed or when either index is out of range.
    pub fn select_answer(&mut self, question: usize, option: usize) -> bool {
        if self.revealed {
            debug!(question, option, "Answers are frozen");
            return false;
        }
        let Some(index) = self
            .course
            .quiz()
            .get(question)
            .and_then(|q| q.option(option))
        else {
            return false;
        };
        self.answers[question] = Some(index);
        true
    }

    /// Number of correctly answered questions.
    pub fn score(&self) -> usize {
        self.course
            .quiz()
            .iter()
            .zip(&self.answers)
            .filter(|(q, answer)| answer.is_some_and(|a| q.is_correct(a)))
            .count()
    }

    /// Whether every question has an answer.
    pub fn can_reveal(&self) -> bool {
        self.answers.iter().all(Option::is_some)
    }

    /// Show the results. Refused while any question is unanswered.
    pub fn reveal(&mut self) -> bool {
        if !self.can_reveal() {
            return false;
        }
        self.revealed = true;
        debug!(score = self.score(), total = self.answers.len(), "Quiz revealed");
        true
    }

    /// Hide the results and clear every answer.
    pub fn retry(&mut self) {
        self.revealed = false;
        self.answers.iter_mut().for_each(|a| *a = None);
    }

    /// Whether every answer is correct.
    pub fn is_perfect_score(&self) -> bool {
        self.score() == self.course.quiz().len()
    }

    /// Closing line under the score.
    pub fn score_message(&self) -> &'static str {
        if self.is_perfect_score() {
            "¡Excelente! Dominas este tema."
        } else {
            "Buen intento. Revisa los módulos para reforzar conceptos."
        }
    }

    /// Answer the review question of `module`.
    ///
    /// The first answer sticks; later calls return it unchanged. `None` when
    /// the module has no review question or the option does not exist.
    pub fn answer_mini_quiz(&mut self, module: usize, option: usize) -> Option<MiniQuizResult> {
        if let Some(existing) = self.mini_quiz_results.get(module).copied().flatten() {
            return Some(existing);
        }
        let question = self.course.modules().get(module)?.mini_quiz().as_ref()?.question();
        let chosen = question.option(option)?;
        let result = MiniQuizResult {
            chosen,
            correct: question.is_correct(chosen),
        };
        self.mini_quiz_results[module] = Some(result);
        Some(result)
    }

    /// Attach a generated image to `module`.
    pub fn set_module_image(&mut self, module: usize, data_uri: String) {
        if let Some(slot) = self.module_images.get_mut(module) {
            *slot = Some(data_uri);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curso_core::{CourseBuilder, MiniQuiz, QuizQuestion};

    fn question(correct: i64) -> QuizQuestion {
        QuizQuestion::new("¿?", vec!["A".into(), "B".into(), "C".into()], correct).unwrap()
    }

    fn course() -> Course {
        let mini = MiniQuiz::new(question(2), Some("Porque sí".into()));
        CourseBuilder::default()
            .title("Curso")
            .modules(vec![
                CourseModule::new("Uno", "", "one", vec![], Some(mini)).unwrap(),
                CourseModule::new("Dos", "", "two", vec![], None).unwrap(),
                CourseModule::new("Tres", "", "three", vec![], None).unwrap(),
            ])
            .quiz(vec![question(0), question(1), question(2)])
            .build()
            .unwrap()
    }

    #[test]
    fn test_score_all_correct_and_none_correct() {
        let mut viewer = CourseViewer::new(course());
        for q in 0..3 {
            viewer.select_answer(q, q);
        }
        assert_eq!(viewer.score(), 3);
        assert_eq!(viewer.score(), 3);
        assert!(viewer.is_perfect_score());

        for q in 0..3 {
            viewer.select_answer(q, (q + 1) % 3);
        }
        assert_eq!(viewer.score(), 0);
        assert!(!viewer.is_perfect_score());
    }

    #[test]
    fn test_answers_frozen_after_reveal() {
        let mut viewer = CourseViewer::new(course());
        for q in 0..3 {
            viewer.select_answer(q, 0);
        }
        assert!(viewer.reveal());
        let before = viewer.answers().clone();

        assert!(!viewer.select_answer(1, 1));
        assert_eq!(viewer.answers(), &before);
        assert_eq!(viewer.score(), 1);
    }

    #[test]
    fn test_reveal_refused_until_complete() {
        let mut viewer = CourseViewer::new(course());
        viewer.select_answer(0, 0);
        viewer.select_answer(1, 0);
        assert!(!viewer.can_reveal());
        assert!(!viewer.reveal());
        assert!(!viewer.revealed());
    }

    #[test]
    fn test_retry_clears_answers() {
        let mut viewer = CourseViewer::new(course());
        for q in 0..3 {
            viewer.select_answer(q, q);
        }
        viewer.reveal();
        viewer.retry();

        assert!(!viewer.revealed());
        assert!(viewer.answers().iter().all(Option::is_none));
        assert!(viewer.select_answer(0, 1));
    }

    #[test]
    fn test_out_of_range_answers_ignored() {
        let mut viewer = CourseViewer::new(course());
        assert!(!viewer.select_answer(3, 0));
        assert!(!viewer.select_answer(0, 3));
        assert!(viewer.answers().iter().all(Option::is_none));
    }

    #[test]
    fn test_module_navigation_clamped() {
        let mut viewer = CourseViewer::new(course());
        viewer.previous_module();
        assert_eq!(*viewer.active_module(), 0);
        viewer.next_module();
        viewer.next_module();
        viewer.next_module();
        assert_eq!(*viewer.active_module(), 2);
        viewer.select_module(7);
        assert_eq!(*viewer.active_module(), 2);
        assert_eq!(viewer.current_module().unwrap().title(), "Tres");
    }

    #[test]
    fn test_module_navigation_leaves_quiz_alone() {
        let mut viewer = CourseViewer::new(course());
        viewer.select_answer(0, 0);
        viewer.next_module();
        viewer.next_tab();
        assert_eq!(viewer.answers()[0].map(OptionIndex::get), Some(0));
    }

    #[test]
    fn test_mini_quiz_first_answer_sticks() {
        let mut viewer = CourseViewer::new(course());

        let first = viewer.answer_mini_quiz(0, 1).unwrap();
        assert!(!first.correct());

        let second = viewer.answer_mini_quiz(0, 2).unwrap();
        assert_eq!(second, first);
        assert!(viewer.answer_mini_quiz(1, 0).is_none());
    }

    #[test]
    fn test_tabs_wrap() {
        assert_eq!(ViewerTab::Quiz.next(), ViewerTab::Content);
        assert_eq!(ViewerTab::Content.previous(), ViewerTab::Quiz);
        assert_eq!(ViewerTab::Data.to_string(), "Datos");
    }
}
