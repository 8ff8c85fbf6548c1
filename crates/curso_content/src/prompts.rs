//! Prompt text for the wizard requests.
//!
//! Prompts are in Spanish, the language the courses are produced in. Each
//! prompt spells out the JSON shape as well, because grounded requests cannot
//! carry a response schema.

/// System instruction for pillar discovery.
pub const PILLARS_SYSTEM: &str =
    "Eres CursoAPP, un mentor experto en diseño de cursos online. Responde siempre con JSON válido.";

/// System instruction for variation discovery.
pub const VARIATIONS_SYSTEM: &str = "Eres CursoAPP. Responde siempre con JSON válido.";

/// System instruction for full course synthesis.
pub const COURSE_SYSTEM: &str =
    "Eres CursoAPP. Produces contenido educativo de primer nivel. Responde solo con JSON.";

/// Aspect ratio for module header images.
pub const IMAGE_ASPECT_RATIO: &str = "16:9";

/// Prompt asking for `count` pillars for `topic`.
pub fn pillars_prompt(topic: &str, count: usize) -> String {
    format!(
        r#"Actúa como mentor experto en creación de cursos online. El usuario quiere crear contenido sobre: "{topic}".
Propón {count} "Temas Pilar" amplios y fundamentales para este tema. Apóyate en la búsqueda web para que sean relevantes y actuales.

Responde ÚNICAMENTE con JSON válido con esta estructura:
{{
  "pillars": [
    {{ "title": "Título del pilar", "description": "Descripción breve" }}
  ]
}}"#
    )
}

/// Prompt asking for `count` lesson variations of `pillar_title`.
pub fn variations_prompt(topic: &str, pillar_title: &str, count: usize) -> String {
    format!(
        r#"Contexto: estamos creando un curso sobre "{topic}" y se ha elegido el pilar "{pillar_title}".
Propón {count} "Variaciones de Lección" concretas para este pilar, con ángulos creativos y distintos entre sí.

Responde ÚNICAMENTE con JSON válido con esta estructura:
{{
  "variations": [
    {{ "title": "Título", "focus": "Enfoque (Práctico, Teórico, Caso de estudio...)" }}
  ]
}}"#
    )
}

/// Prompt asking for the complete course.
pub fn course_prompt(topic: &str, pillar_title: &str, variation_title: &str) -> String {
    format!(
        r#"Genera un CURSO COMPLETO y detallado para:
Tema global: {topic}
Pilar: {pillar_title}
Lección concreta: {variation_title}

El curso debe ser visual, educativo e interactivo:
1. Divide el contenido en 3 o 4 módulos claros, en orden de aprendizaje.
2. Incluye datos estadísticos o comparativos reales (usa la búsqueda web) para rellenar "chartData", con valores numéricos.
3. Crea un quiz final de 3 preguntas; "correctAnswerIndex" es la posición (desde 0) de la opción correcta.
4. Da un "imageKeyword" en inglés para cada módulo.
5. Para CADA módulo, añade 3 "keyPoints" y un "miniQuiz" (1 pregunta de repaso con 2 o 3 opciones y una breve explicación).

Responde ÚNICAMENTE con JSON válido con esta estructura:
{{
  "title": "Título del curso",
  "subtitle": "Subtítulo atractivo",
  "modules": [
    {{
      "title": "Título del módulo",
      "content": "Contenido en markdown...",
      "imageKeyword": "keyword",
      "keyPoints": ["Punto 1", "Punto 2", "Punto 3"],
      "miniQuiz": {{
        "question": "Pregunta de repaso",
        "options": ["Opción A", "Opción B"],
        "correctAnswerIndex": 0,
        "explanation": "Por qué es la correcta"
      }}
    }}
  ],
  "chartData": [ {{ "label": "Etiqueta", "value": 10 }} ],
  "chartTitle": "Título del gráfico",
  "quiz": [
    {{ "question": "Pregunta", "options": ["A", "B", "C"], "correctAnswerIndex": 0 }}
  ]
}}"#
    )
}

/// Prompt for a module header image.
pub fn image_prompt(title: &str, keyword: &str) -> String {
    format!(
        r#"Generate a high-quality, photorealistic, educational header image for a course module.
Module title: "{title}".
Visual subject: "{keyword}".
Style: professional and clean, with lighting suitable for a website header."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pillars_prompt_embeds_topic_and_count() {
        let prompt = pillars_prompt("Cocina Vegana", 10);
        assert!(prompt.contains("\"Cocina Vegana\""));
        assert!(prompt.contains("Propón 10"));
        assert!(prompt.contains("\"pillars\""));
    }

    #[test]
    fn test_variations_prompt_scoped_to_pillar() {
        let prompt = variations_prompt("Liderazgo", "Comunicación", 10);
        assert!(prompt.contains("\"Liderazgo\""));
        assert!(prompt.contains("\"Comunicación\""));
    }

    #[test]
    fn test_course_prompt_carries_full_context() {
        let prompt = course_prompt("Marketing", "SEO", "Auditoría técnica");
        assert!(prompt.contains("Tema global: Marketing"));
        assert!(prompt.contains("Pilar: SEO"));
        assert!(prompt.contains("Lección concreta: Auditoría técnica"));
        assert!(prompt.contains("miniQuiz"));
    }
}
