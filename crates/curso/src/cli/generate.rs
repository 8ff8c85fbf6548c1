//! One-shot generation command handlers.
//!
//! Each handler runs a single request and prints the result, so the wizard
//! steps can be scripted without the terminal UI.

use anyhow::{Context, bail};
use curso_content::{ContentRequestor, decode_data_uri};
use curso_core::{Course, ImageSize};
use curso_interface::GenerationDriver;
use std::io::Write;
use std::path::Path;
use tracing::{info, instrument};

fn write_sources(out: &mut impl Write, sources: &[String]) -> std::io::Result<()> {
    if sources.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "Fuentes:")?;
    for url in sources {
        writeln!(out, "  - {}", url)?;
    }
    Ok(())
}

/// Handle the `pillars` command.
#[instrument(skip(requestor, out))]
pub async fn handle_pillars<D: GenerationDriver>(
    requestor: &ContentRequestor<D>,
    topic: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let set = requestor.request_pillars(topic).await?;
    info!(count = set.pillars().len(), "Pillars received");

    for (i, pillar) in set.pillars().iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, pillar.title())?;
        writeln!(out, "   {}", pillar.description())?;
    }
    write_sources(out, set.sources())?;
    Ok(())
}

/// Handle the `variations` command.
#[instrument(skip(requestor, out))]
pub async fn handle_variations<D: GenerationDriver>(
    requestor: &ContentRequestor<D>,
    topic: &str,
    pillar: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let set = requestor.request_variations(topic, pillar).await?;
    info!(count = set.variations().len(), "Variations received");

    for (i, variation) in set.variations().iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, variation.title())?;
        writeln!(out, "   {}", variation.focus())?;
    }
    write_sources(out, set.sources())?;
    Ok(())
}

/// Handle the `course` command.
#[instrument(skip(requestor, out))]
pub async fn handle_course<D: GenerationDriver>(
    requestor: &ContentRequestor<D>,
    topic: &str,
    pillar: &str,
    variation: &str,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let course = requestor.request_course(topic, pillar, variation).await?;
    info!(modules = course.modules().len(), "Course received");

    if json {
        serde_json::to_writer_pretty(&mut *out, &course).context("Failed to serialize course")?;
        writeln!(out)?;
    } else {
        write_course(out, &course)?;
    }
    Ok(())
}

fn write_course(out: &mut impl Write, course: &Course) -> std::io::Result<()> {
    writeln!(out, "# {}", course.title())?;
    if !course.subtitle().is_empty() {
        writeln!(out, "{}", course.subtitle())?;
    }

    for (i, module) in course.modules().iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "## {}. {}", i + 1, module.title())?;
        writeln!(out, "{}", module.content())?;
        for point in module.key_points() {
            writeln!(out, "  • {}", point)?;
        }
        if let Some(mini) = module.mini_quiz() {
            writeln!(out, "  Repaso: {}", mini.question().question())?;
        }
    }

    if !course.chart_data().is_empty() {
        writeln!(out)?;
        writeln!(out, "## {}", course.chart_title())?;
        for point in course.chart_data() {
            writeln!(out, "  {}: {}", point.label(), point.value())?;
        }
    }

    writeln!(out)?;
    writeln!(out, "## Quiz")?;
    for (i, question) in course.quiz().iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, question.question())?;
        for (j, option) in question.options().iter().enumerate() {
            let marker = if j == question.correct_answer_index().get() { "*" } else { " " };
            writeln!(out, "   {}{}) {}", marker, j + 1, option)?;
        }
    }

    write_sources(out, course.sources())
}

/// Handle the `image` command.
///
/// Writes the decoded image bytes to `path`.
#[instrument(skip(requestor))]
pub async fn handle_image<D: GenerationDriver>(
    requestor: &ContentRequestor<D>,
    title: &str,
    keyword: &str,
    size: ImageSize,
    path: &Path,
) -> anyhow::Result<()> {
    let Some(uri) = requestor.request_module_image(title, keyword, size).await else {
        bail!("Image generation failed; see the log for details");
    };
    let image = decode_data_uri(&uri).context("Service returned an undecodable image")?;

    std::fs::write(path, &image.bytes)
        .with_context(|| format!("Failed to write image to {}", path.display()))?;
    info!(
        path = %path.display(),
        mime_type = %image.mime_type,
        bytes = image.bytes.len(),
        "Image written"
    );
    Ok(())
}
