//! Résumé renderer: turns a stored `ResumeDocument` into view fragments.
//!
//! Every user-supplied value that lands in an HTML fragment goes through
//! `escape_html` first. Name and title are returned as plain text; the page
//! layer escapes them when it places them.

pub mod page;

use crate::models::resume::ResumeDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn class(self) -> &'static str {
        match self {
            ScoreBand::High => "high",
            ScoreBand::Medium => "medium",
            ScoreBand::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBadge {
    pub score: u32,
    pub band: ScoreBand,
    pub text: String,
}

/// Everything the résumé view displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeView {
    pub name: String,
    pub title: String,
    pub contact_html: String,
    /// `None` leaves the skills section unrendered.
    pub skills_html: Option<String>,
    pub experience_items: Vec<String>,
    pub experience_html: String,
    pub score: Option<ScoreBadge>,
}

/// Escapes `& < > " '` for use in element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn score_band(score: u32) -> ScoreBand {
    match score {
        s if s >= 70 => ScoreBand::High,
        s if s >= 40 => ScoreBand::Medium,
        _ => ScoreBand::Low,
    }
}

pub fn score_badge(score: u32) -> ScoreBadge {
    ScoreBadge {
        score,
        band: score_band(score),
        text: format!("Job Match Score: {score}%"),
    }
}

/// Non-empty trimmed lines, with one leading `•` or `-` marker (and the
/// whitespace after it) removed. Line order is kept.
pub fn experience_items(experience: &str) -> Vec<String> {
    experience
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.strip_prefix('•')
                .or_else(|| line.strip_prefix('-'))
                .map(str::trim_start)
                .unwrap_or(line)
                .to_string()
        })
        .collect()
}

fn contact_item(label: &str, value: &str) -> String {
    format!(
        r#"<span class="resume-contact-item"><strong>{label}:</strong> {}</span>"#,
        escape_html(value)
    )
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn contact_html(doc: &ResumeDocument) -> String {
    let mut html = String::new();
    if let Some(email) = present(&doc.email) {
        html.push_str(&contact_item("Email", email));
    }
    if let Some(phone) = present(&doc.phone) {
        html.push_str(&contact_item("Phone", phone));
    }
    if let Some(location) = present(&doc.location) {
        html.push_str(&contact_item("Location", location));
    }
    if let Some(portfolio) = present(&doc.portfolio) {
        let escaped = escape_html(portfolio);
        html.push_str(&format!(
            r#"<span class="resume-contact-item"><strong>Portfolio:</strong> <a href="{escaped}" target="_blank">{escaped}</a></span>"#
        ));
    }
    html
}

fn skills_html(doc: &ResumeDocument) -> Option<String> {
    let skills = doc.skill_list()?;
    Some(
        skills
            .iter()
            .map(|skill| format!(r#"<span class="skill-item">{}</span>"#, escape_html(skill)))
            .collect(),
    )
}

pub fn render(doc: &ResumeDocument) -> ResumeView {
    let experience_items = experience_items(&doc.experience);
    let experience_html = format!(
        "<ul>{}</ul>",
        experience_items
            .iter()
            .map(|item| format!("<li>{}</li>", escape_html(item)))
            .collect::<String>()
    );

    ResumeView {
        name: doc.full_name.clone(),
        title: doc.job_title.clone(),
        contact_html: contact_html(doc),
        skills_html: skills_html(doc),
        experience_items,
        experience_html,
        score: doc.score.map(score_badge),
    }
}
