//! Wizard steps.

/// Where the user is in the wizard.
///
/// # Examples
///
/// ```
/// use curso_wizard::WizardStep;
///
/// assert_eq!(WizardStep::default(), WizardStep::Input);
/// assert_eq!(WizardStep::Variations.previous(), WizardStep::Pillars);
/// assert_eq!(WizardStep::Input.previous(), WizardStep::Input);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumIter,
)]
pub enum WizardStep {
    /// Topic entry
    #[default]
    Input,
    /// Choosing a pillar
    Pillars,
    /// Choosing a lesson variation
    Variations,
    /// Viewing the finished course
    Course,
}

impl WizardStep {
    /// The step a back action leads to.
    pub fn previous(self) -> Self {
        match self {
            WizardStep::Input | WizardStep::Pillars => WizardStep::Input,
            WizardStep::Variations => WizardStep::Pillars,
            WizardStep::Course => WizardStep::Variations,
        }
    }

    /// The step a successful forward request from here leads to.
    pub fn next(self) -> Self {
        match self {
            WizardStep::Input => WizardStep::Pillars,
            WizardStep::Pillars => WizardStep::Variations,
            WizardStep::Variations | WizardStep::Course => WizardStep::Course,
        }
    }

    /// Loading text shown while the forward request from this step runs.
    pub fn loading_message(self) -> &'static str {
        match self {
            WizardStep::Input => "Analizando tendencias y generando pilares temáticos.",
            WizardStep::Pillars => "Diseñando lecciones específicas y creativas.",
            WizardStep::Variations | WizardStep::Course => {
                "Redactando contenido, diseñando gráficos y creando el quiz."
            }
        }
    }

    /// Alert shown when the forward request from this step fails.
    pub fn failure_alert(self) -> &'static str {
        match self {
            WizardStep::Input => "Hubo un error generando los temas. Por favor intenta de nuevo.",
            WizardStep::Pillars => "Error al crear variaciones. Intenta de nuevo.",
            WizardStep::Variations | WizardStep::Course => {
                "No se pudo generar el curso completo. Inténtalo de nuevo."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_back_then_forward_returns_to_same_step() {
        for step in WizardStep::iter().filter(|s| *s != WizardStep::Input) {
            assert_eq!(step.previous().next(), step);
        }
    }

    #[test]
    fn test_every_step_has_messages() {
        for step in WizardStep::iter() {
            assert!(!step.loading_message().is_empty());
            assert!(!step.failure_alert().is_empty());
        }
    }
}
