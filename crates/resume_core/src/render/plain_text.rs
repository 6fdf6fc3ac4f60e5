//! Built-in plain-text renderer.
//!
//! Used by the CLI preview and as the reference implementation of the
//! renderer contract. Visual/PDF renderers live outside this crate.

use super::{RenderError, RenderOptions, RenderedDocument, TemplateRenderer};
use crate::model::document::{Basics, ResumeDocument};
use crate::model::entries::{
    Award, Certificate, Education, Interest, Language, Project, Publication, Reference, Skill,
    Volunteer, Work,
};
use crate::model::section::{SectionEntry, SectionName};

/// Template ids served by [`PlainTextTemplate`] out of the box.
pub const BUILTIN_TEMPLATE_IDS: [&str; 2] = ["classic", "plain"];

/// Line budget of one page when page wrap is enabled.
pub const LINES_PER_PAGE: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeadingStyle {
    /// `WORK` followed by a `====` rule.
    Underlined,
    /// `## Work`.
    Hashed,
}

#[derive(Debug, Clone)]
pub struct PlainTextTemplate {
    id: String,
    heading: HeadingStyle,
}

impl PlainTextTemplate {
    /// `classic` renders underlined headings; every other id uses `##`.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let heading = if id == "classic" {
            HeadingStyle::Underlined
        } else {
            HeadingStyle::Hashed
        };
        Self { id, heading }
    }

    fn push_heading(&self, lines: &mut Vec<String>, section: SectionName) {
        lines.push(String::new());
        match self.heading {
            HeadingStyle::Underlined => {
                let title = section.as_str().to_ascii_uppercase();
                lines.push(title.clone());
                lines.push("=".repeat(title.len()));
            }
            HeadingStyle::Hashed => lines.push(format!("## {}", title_case(section.as_str()))),
        }
    }
}

impl TemplateRenderer for PlainTextTemplate {
    fn id(&self) -> &str {
        &self.id
    }

    fn render(
        &self,
        document: &ResumeDocument,
        options: RenderOptions,
    ) -> Result<RenderedDocument, RenderError> {
        let mut lines = basics_lines(&document.basics);

        for section in SectionName::ALL {
            let body = section_lines(document, section);
            if body.is_empty() {
                continue;
            }
            self.push_heading(&mut lines, section);
            lines.extend(body);
        }

        Ok(RenderedDocument {
            template_id: self.id.clone(),
            pages: paginate(lines, options.page_wrap),
        })
    }
}

fn basics_lines(basics: &Basics) -> Vec<String> {
    let mut lines = Vec::new();
    if !basics.name.is_empty() {
        lines.push(basics.name.clone());
    }
    if let Some(label) = non_empty(basics.label.as_deref()) {
        lines.push(label.to_string());
    }

    let contact: Vec<&str> = [
        basics.email.as_deref(),
        basics.phone.as_deref(),
        basics.url.as_deref(),
    ]
    .into_iter()
    .filter_map(non_empty)
    .collect();
    if !contact.is_empty() {
        lines.push(contact.join(" | "));
    }

    if let Some(location) = basics.location.as_ref() {
        let place: Vec<&str> = [location.city.as_deref(), location.region.as_deref()]
            .into_iter()
            .filter_map(non_empty)
            .collect();
        if !place.is_empty() {
            lines.push(place.join(", "));
        }
    }
    for profile in basics.profiles.iter().flatten() {
        let handle = non_empty(profile.url.as_deref()).or(non_empty(profile.username.as_deref()));
        if let Some(handle) = handle {
            lines.push(format!("{}: {handle}", profile.network));
        }
    }
    if let Some(summary) = non_empty(basics.summary.as_deref()) {
        lines.push(String::new());
        lines.push(summary.to_string());
    }
    lines
}

fn section_lines(document: &ResumeDocument, section: SectionName) -> Vec<String> {
    match section {
        SectionName::Work => collect::<Work>(document, |work, out| {
            out.push(headline(&work.position, &work.name, " at "));
            push_dates(out, work.start_date.as_deref(), work.end_date.as_deref());
            push_text(out, work.summary.as_deref());
            push_bullets(out, work.highlights.as_deref());
        }),
        SectionName::Volunteer => collect::<Volunteer>(document, |role, out| {
            out.push(headline(&role.position, &role.organization, " at "));
            push_dates(out, role.start_date.as_deref(), role.end_date.as_deref());
            push_text(out, role.summary.as_deref());
            push_bullets(out, role.highlights.as_deref());
        }),
        SectionName::Education => collect::<Education>(document, |education, out| {
            let degree = [education.study_type.as_deref(), education.area.as_deref()]
                .into_iter()
                .filter_map(non_empty)
                .collect::<Vec<_>>()
                .join(" in ");
            out.push(headline(&degree, &education.institution, ", "));
            push_dates(
                out,
                education.start_date.as_deref(),
                education.end_date.as_deref(),
            );
            push_bullets(out, education.courses.as_deref());
        }),
        SectionName::Awards => collect::<Award>(document, |award, out| {
            out.push(with_suffix(&award.title, award.awarder.as_deref()));
            push_text(out, award.summary.as_deref());
        }),
        SectionName::Certificates => collect::<Certificate>(document, |cert, out| {
            out.push(with_suffix(&cert.name, cert.issuer.as_deref()));
        }),
        SectionName::Publications => collect::<Publication>(document, |publication, out| {
            out.push(with_suffix(
                &publication.name,
                publication.publisher.as_deref(),
            ));
            push_text(out, publication.summary.as_deref());
        }),
        SectionName::Skills => collect::<Skill>(document, |skill, out| {
            out.push(keyword_line(&skill.name, skill.keywords.as_deref()));
        }),
        SectionName::Languages => collect::<Language>(document, |language, out| {
            out.push(with_suffix(&language.language, language.fluency.as_deref()));
        }),
        SectionName::Interests => collect::<Interest>(document, |interest, out| {
            out.push(keyword_line(&interest.name, interest.keywords.as_deref()));
        }),
        SectionName::References => collect::<Reference>(document, |reference, out| {
            push_text(out, reference.reference.as_deref());
            out.push(format!("  -- {}", reference.name));
        }),
        SectionName::Projects => collect::<Project>(document, |project, out| {
            out.push(project.name.clone());
            push_dates(
                out,
                project.start_date.as_deref(),
                project.end_date.as_deref(),
            );
            push_text(out, project.description.as_deref());
            push_bullets(out, project.highlights.as_deref());
        }),
    }
}

/// Runs `render_entry` over visible entries only.
fn collect<E: SectionEntry>(
    document: &ResumeDocument,
    render_entry: impl Fn(&E, &mut Vec<String>),
) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in document.visible_entries::<E>() {
        render_entry(entry, &mut lines);
    }
    lines
}

fn paginate(lines: Vec<String>, page_wrap: bool) -> Vec<String> {
    if !page_wrap || lines.is_empty() {
        return vec![lines.join("\n")];
    }
    lines
        .chunks(LINES_PER_PAGE)
        .map(|page| page.join("\n"))
        .collect()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn headline(primary: &str, secondary: &str, joiner: &str) -> String {
    match (primary.trim().is_empty(), secondary.trim().is_empty()) {
        (false, false) => format!("{primary}{joiner}{secondary}"),
        (false, true) => primary.to_string(),
        (true, _) => secondary.to_string(),
    }
}

fn with_suffix(primary: &str, suffix: Option<&str>) -> String {
    match non_empty(suffix) {
        Some(suffix) => format!("{primary} ({suffix})"),
        None => primary.to_string(),
    }
}

fn keyword_line(name: &str, keywords: Option<&[String]>) -> String {
    match keywords.filter(|keywords| !keywords.is_empty()) {
        Some(keywords) => format!("{name}: {}", keywords.join(", ")),
        None => name.to_string(),
    }
}

fn push_dates(out: &mut Vec<String>, start: Option<&str>, end: Option<&str>) {
    match (non_empty(start), non_empty(end)) {
        (Some(start), Some(end)) => out.push(format!("  {start} - {end}")),
        (Some(start), None) => out.push(format!("  {start} - present")),
        (None, Some(end)) => out.push(format!("  until {end}")),
        (None, None) => {}
    }
}

fn push_text(out: &mut Vec<String>, text: Option<&str>) {
    if let Some(text) = non_empty(text) {
        out.extend(text.lines().map(|line| format!("  {line}")));
    }
}

fn push_bullets(out: &mut Vec<String>, bullets: Option<&[String]>) {
    for bullet in bullets.into_iter().flatten() {
        out.push(format!("  * {bullet}"));
    }
}

fn title_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{PlainTextTemplate, LINES_PER_PAGE};
    use crate::model::entries::{Award, Skill};
    use crate::model::factory::empty_document;
    use crate::render::{RenderOptions, TemplateRenderer};
    use std::sync::Arc;

    #[test]
    fn hidden_entries_are_not_rendered() {
        let mut doc = empty_document("d".into(), "Doc", "plain", 0);
        doc.sections.awards = Arc::new(vec![
            Arc::new(Award {
                title: "Shown".into(),
                ..Award::default()
            }),
            Arc::new(Award {
                title: "Hidden".into(),
                visible: Some(false),
                ..Award::default()
            }),
            Arc::new(Award {
                title: "Explicit".into(),
                visible: Some(true),
                ..Award::default()
            }),
        ]);

        let output = PlainTextTemplate::new("plain")
            .render(&doc, RenderOptions::default())
            .unwrap();
        let text = output.to_text();
        assert!(text.contains("## Awards"));
        assert!(text.contains("Shown"));
        assert!(text.contains("Explicit"));
        assert!(!text.contains("Hidden"));
    }

    #[test]
    fn section_with_only_hidden_entries_has_no_heading() {
        let mut doc = empty_document("d".into(), "Doc", "classic", 0);
        doc.sections.skills = Arc::new(vec![Arc::new(Skill {
            name: "Rust".into(),
            visible: Some(false),
            ..Skill::default()
        })]);

        let output = PlainTextTemplate::new("classic")
            .render(&doc, RenderOptions::default())
            .unwrap();
        assert!(!output.to_text().contains("SKILLS"));
    }

    #[test]
    fn page_wrap_splits_output_into_fixed_pages() {
        let mut doc = empty_document("d".into(), "Doc", "plain", 0);
        let skills = (0..LINES_PER_PAGE + 5)
            .map(|i| {
                Arc::new(Skill {
                    name: format!("skill-{i}"),
                    ..Skill::default()
                })
            })
            .collect();
        doc.sections.skills = Arc::new(skills);
        let template = PlainTextTemplate::new("plain");

        let single = template.render(&doc, RenderOptions { page_wrap: false }).unwrap();
        assert_eq!(single.pages.len(), 1);

        let wrapped = template.render(&doc, RenderOptions { page_wrap: true }).unwrap();
        assert_eq!(wrapped.pages.len(), 2);
    }

    #[test]
    fn empty_document_renders_one_empty_page() {
        let doc = empty_document("d".into(), "Doc", "plain", 0);
        let output = PlainTextTemplate::new("plain")
            .render(&doc, RenderOptions { page_wrap: true })
            .unwrap();
        assert_eq!(output.pages, vec![String::new()]);
    }
}
