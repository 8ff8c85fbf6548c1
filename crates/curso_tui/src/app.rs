//! Application state and key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use curso_content::StepOutcome;
use curso_core::ImageSize;
use curso_error::CursoResult;
use curso_wizard::{Completion, CourseViewer, Ticket, ViewerTab, WizardController, WizardStep};
use tracing::{debug, info, instrument};

/// Work the runner must start or stop on behalf of the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Run a wizard request
    Request(Ticket),
    /// Abort the running wizard request
    Cancel,
    /// Generate a header image for a module of the current course
    Image {
        /// Course view the image belongs to
        viewer_id: u64,
        /// Module index
        module: usize,
        /// Module title
        title: String,
        /// Image keyword of the module
        keyword: String,
        /// Requested resolution
        size: ImageSize,
    },
}

/// Results coming back from background tasks.
#[derive(Debug)]
pub enum TaskMessage {
    /// A wizard request settled
    Step {
        /// Ticket the request was issued under
        ticket_id: u64,
        /// What the requestor returned
        result: CursoResult<StepOutcome>,
    },
    /// An image request settled
    Image {
        /// Course view the image was requested for
        viewer_id: u64,
        /// Module index
        module: usize,
        /// Data URI, or `None` when generation failed
        uri: Option<String>,
    },
}

/// Everything the screen shows.
#[derive(Debug)]
pub struct App {
    /// Wizard navigation
    pub(crate) wizard: WizardController,
    /// Course presentation, present on the course step
    pub(crate) viewer: Option<CourseViewer>,
    /// Bumped each time a course view is created
    pub(crate) viewer_id: u64,
    /// Topic being typed
    pub(crate) input: String,
    /// Highlighted pillar
    pub(crate) pillar_index: usize,
    /// Highlighted variation
    pub(crate) variation_index: usize,
    /// Highlighted quiz question
    pub(crate) quiz_cursor: usize,
    /// Modal alert
    pub(crate) alert: Option<String>,
    /// Status bar message
    pub(crate) status_message: String,
    /// Resolution for module images
    pub(crate) image_size: ImageSize,
    /// Set when the user asked to leave
    pub(crate) should_quit: bool,
}

impl App {
    /// Fresh app on the topic step.
    pub fn new(image_size: ImageSize) -> Self {
        Self {
            wizard: WizardController::new(),
            viewer: None,
            viewer_id: 0,
            input: String::new(),
            pillar_index: 0,
            variation_index: 0,
            quiz_cursor: 0,
            alert: None,
            status_message: "Escribe un tema y pulsa Enter".to_string(),
            image_size,
            should_quit: false,
        }
    }

    /// Whether the event loop should stop.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The wizard state.
    pub fn wizard(&self) -> &WizardController {
        &self.wizard
    }

    /// The course view, if on the course step.
    pub fn viewer(&self) -> Option<&CourseViewer> {
        self.viewer.as_ref()
    }

    /// The modal alert, if one is showing.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Handle one key press.
    #[instrument(skip(self), fields(step = %self.wizard.step()))]
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return self.wizard.is_loading().then_some(Action::Cancel);
        }
        if self.alert.take().is_some() {
            return None;
        }
        if self.wizard.is_loading() {
            if key.code == KeyCode::Esc {
                self.wizard.back();
                self.status_message = "Solicitud cancelada".to_string();
                return Some(Action::Cancel);
            }
            return None;
        }

        match *self.wizard.step() {
            WizardStep::Input => self.handle_input_key(key),
            WizardStep::Pillars | WizardStep::Variations => self.handle_list_key(key),
            WizardStep::Course => self.handle_course_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => {
                let ticket = self.wizard.begin_submit_topic(&self.input)?;
                return Some(Action::Request(ticket));
            }
            KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
        None
    }

    fn list_len(&self) -> usize {
        match self.wizard.step() {
            WizardStep::Pillars => self.wizard.pillars().len(),
            WizardStep::Variations => self.wizard.variations().len(),
            _ => 0,
        }
    }

    fn highlighted(&mut self) -> &mut usize {
        if *self.wizard.step() == WizardStep::Variations {
            &mut self.variation_index
        } else {
            &mut self.pillar_index
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Action> {
        let len = self.list_len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                let index = self.highlighted();
                *index = index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let index = self.highlighted();
                *index = (*index + 1).min(len.saturating_sub(1));
            }
            KeyCode::Enter => {
                let ticket = if *self.wizard.step() == WizardStep::Pillars {
                    self.wizard.begin_select_pillar(self.pillar_index)
                } else {
                    self.wizard.begin_select_variation(self.variation_index)
                }?;
                return Some(Action::Request(ticket));
            }
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left => {
                self.wizard.back();
            }
            KeyCode::Char('n') => self.new_topic(),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
        None
    }

    fn handle_course_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => {
                self.wizard.back();
                self.viewer = None;
                return None;
            }
            KeyCode::Char('n') => {
                self.new_topic();
                return None;
            }
            KeyCode::Char('q') => {
                self.should_quit = true;
                return None;
            }
            _ => {}
        }

        let viewer = self.viewer.as_mut()?;
        match key.code {
            KeyCode::Tab | KeyCode::Right => viewer.next_tab(),
            KeyCode::BackTab | KeyCode::Left => viewer.previous_tab(),
            _ => {
                let tab = *viewer.active_tab();
                match tab {
                    ViewerTab::Content => return self.handle_content_key(key),
                    ViewerTab::Quiz => self.handle_quiz_key(key),
                    ViewerTab::Data => {}
                }
            }
        }
        None
    }

    fn handle_content_key(&mut self, key: KeyEvent) -> Option<Action> {
        let viewer = self.viewer.as_mut()?;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => viewer.previous_module(),
            KeyCode::Down | KeyCode::Char('j') => viewer.next_module(),
            KeyCode::Char(c @ '1'..='9') => {
                let module = *viewer.active_module();
                let option = digit_index(c);
                if let Some(result) = viewer.answer_mini_quiz(module, option) {
                    self.status_message = if *result.correct() {
                        "¡Correcto!".to_string()
                    } else {
                        "No es correcto".to_string()
                    };
                }
            }
            KeyCode::Char('i') => {
                let module = *viewer.active_module();
                let current = viewer.current_module()?;
                self.status_message = format!("Generando imagen para \"{}\"...", current.title());
                return Some(Action::Image {
                    viewer_id: self.viewer_id,
                    module,
                    title: current.title().clone(),
                    keyword: current.image_keyword().clone(),
                    size: self.image_size,
                });
            }
            _ => {}
        }
        None
    }

    fn handle_quiz_key(&mut self, key: KeyEvent) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };
        let questions = viewer.course().quiz().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.quiz_cursor = self.quiz_cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                self.quiz_cursor = (self.quiz_cursor + 1).min(questions.saturating_sub(1));
            }
            KeyCode::Char(c @ '1'..='9') => {
                if viewer.select_answer(self.quiz_cursor, digit_index(c))
                    && self.quiz_cursor + 1 < questions
                {
                    self.quiz_cursor += 1;
                }
            }
            KeyCode::Enter => {
                if viewer.reveal() {
                    self.status_message =
                        format!("Tu Puntuación: {} / {}", viewer.score(), questions);
                } else if !viewer.revealed() {
                    self.status_message = "Responde todas las preguntas primero".to_string();
                }
            }
            KeyCode::Char('r') => {
                viewer.retry();
                self.quiz_cursor = 0;
            }
            _ => {}
        }
    }

    fn new_topic(&mut self) {
        self.wizard.reset();
        self.viewer = None;
        self.input.clear();
        self.pillar_index = 0;
        self.variation_index = 0;
        self.status_message = "Escribe un tema y pulsa Enter".to_string();
    }

    /// Apply a result from a background task.
    #[instrument(skip(self, message))]
    pub fn handle_message(&mut self, message: TaskMessage) {
        match message {
            TaskMessage::Step { ticket_id, result } => {
                match self.wizard.complete(ticket_id, result) {
                    Completion::Applied(WizardStep::Pillars) => {
                        self.pillar_index = 0;
                        self.status_message =
                            format!("{} pilares propuestos", self.wizard.pillars().len());
                    }
                    Completion::Applied(WizardStep::Variations) => {
                        self.variation_index = 0;
                        self.status_message =
                            format!("{} variaciones propuestas", self.wizard.variations().len());
                    }
                    Completion::Applied(WizardStep::Course) => {
                        if let Some(course) = self.wizard.course() {
                            self.viewer_id += 1;
                            self.viewer = Some(CourseViewer::new(course.clone()));
                            self.quiz_cursor = 0;
                            self.status_message = "Curso listo".to_string();
                            info!(viewer_id = self.viewer_id, "Course view opened");
                        }
                    }
                    Completion::Applied(WizardStep::Input) => {}
                    Completion::Failed(_) => {
                        self.alert = self.wizard.take_alert();
                        self.status_message = "La solicitud falló".to_string();
                    }
                    Completion::Stale => debug!(ticket_id, "Ignored stale result"),
                }
            }
            TaskMessage::Image {
                viewer_id,
                module,
                uri,
            } => {
                let Some(viewer) = self.viewer.as_mut().filter(|_| viewer_id == self.viewer_id)
                else {
                    debug!(viewer_id, "Image for a closed course view");
                    return;
                };
                match uri {
                    Some(uri) => {
                        viewer.set_module_image(module, uri);
                        self.status_message = format!("Imagen lista para el módulo {}", module + 1);
                    }
                    None => {
                        self.status_message = "No se pudo generar la imagen".to_string();
                    }
                }
            }
        }
    }
}

fn digit_index(c: char) -> usize {
    c.to_digit(10).map_or(0, |d| d.saturating_sub(1) as usize)
}
