//! Full HTML pages for the two navigation destinations: the entry form (`/`)
//! and the rendered résumé (`/resume`).

use super::{escape_html, ResumeView};
use crate::fields::Field;
use crate::models::draft::FormDraft;

pub const FORM_PATH: &str = "/";
pub const RESUME_PATH: &str = "/resume";

/// Alerts raised by the résumé view when it bounces the user back to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    MissingResult,
    CorruptResult,
}

impl Alert {
    pub fn code(self) -> &'static str {
        match self {
            Alert::MissingResult => "missing-result",
            Alert::CorruptResult => "corrupt-result",
        }
    }

    pub fn from_code(code: &str) -> Option<Alert> {
        match code {
            "missing-result" => Some(Alert::MissingResult),
            "corrupt-result" => Some(Alert::CorruptResult),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Alert::MissingResult => "No resume data found. Please fill out the form first.",
            Alert::CorruptResult => "Error loading resume data. Please try again.",
        }
    }

    /// Where the résumé view redirects for this alert.
    pub fn redirect_target(self) -> String {
        format!("{FORM_PATH}?alert={}", self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Success(String),
    Alert(Alert),
}

impl Notice {
    fn html(&self) -> String {
        let (class, text) = match self {
            Notice::Error(text) => ("message message-error", text.as_str()),
            Notice::Success(text) => ("message message-success", text.as_str()),
            Notice::Alert(alert) => ("message message-error", alert.message()),
        };
        format!(r#"<div id="message" class="{class}">{}</div>"#, escape_html(text))
    }
}

fn field_html(field: Field, draft: &FormDraft) -> String {
    let key = field.key();
    let label = if field.is_required() {
        format!("{} *", field.label())
    } else {
        field.label().to_string()
    };
    let required = if field.is_required() { " required" } else { "" };
    let value = escape_html(draft.get(field));

    if field.is_multiline() {
        format!(
            concat!(
                r#"<label for="{key}">{label}</label>"#,
                r#"<textarea id="{key}" name="{key}" rows="6"{required}>"#,
                // The parser drops one newline right after the opening tag.
                "\n",
                r#"{value}</textarea>"#,
                r#"<small><span id="{key}-count">{count}</span> characters</small>"#
            ),
            key = key,
            label = label,
            required = required,
            value = value,
            count = draft.char_count(field),
        )
    } else {
        format!(
            concat!(
                r#"<label for="{key}">{label}</label>"#,
                r#"<input type="text" id="{key}" name="{key}" value="{value}"{required}>"#
            ),
            key = key,
            label = label,
            required = required,
            value = value,
        )
    }
}

const FORM_SCRIPT: &str = r#"<script>
const ids = ["fullName","jobTitle","email","phone","location","portfolio","skills","experience","jobDescription"];
const collect = () => Object.fromEntries(ids.map(id => [id, document.getElementById(id).value]));
const count = id => { const c = document.getElementById(id + "-count"); if (c) c.textContent = [...document.getElementById(id).value].length; };
const save = () => fetch("/api/draft", {method: "PUT", headers: {"Content-Type": "application/json"}, body: JSON.stringify(collect())});
ids.forEach(id => document.getElementById(id).addEventListener("input", () => { count(id); save(); }));
document.getElementById("load-sample-btn").addEventListener("click", async () => {
  const sample = await (await fetch("/api/draft/sample", {method: "POST"})).json();
  ids.forEach(id => { document.getElementById(id).value = sample[id] || ""; count(id); });
  window.scrollTo({top: 0, behavior: "smooth"});
});
document.getElementById("resume-form").addEventListener("submit", () => {
  const btn = document.getElementById("submit-btn");
  btn.disabled = true;
  btn.textContent = "Generating Resume...";
});
</script>"#;

pub fn form_page(draft: &FormDraft, notice: Option<&Notice>) -> String {
    let fields: String = Field::ALL.iter().map(|f| field_html(*f, draft)).collect();
    let notice = notice
        .map(Notice::html)
        .unwrap_or_else(|| r#"<div id="message" class="message"></div>"#.to_string());

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>AI Resume Builder</title></head>
<body>
<main>
<h1>AI Resume Builder</h1>
{notice}
<form id="resume-form" method="post" action="/submit">
{fields}
<button type="button" id="load-sample-btn">Load Sample Data</button>
<button type="submit" id="submit-btn">Generate Resume</button>
</form>
</main>
{FORM_SCRIPT}
</body>
</html>"#
    )
}

pub fn resume_page(view: &ResumeView) -> String {
    let skills = view
        .skills_html
        .as_deref()
        .map(|html| format!(r#"<section><h2>Skills</h2><div id="resume-skills">{html}</div></section>"#))
        .unwrap_or_default();
    let score = view
        .score
        .as_ref()
        .map(|badge| {
            format!(
                r#"<div id="resume-score" class="score-badge {}">{}</div>"#,
                badge.band.class(),
                escape_html(&badge.text)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{name} - Resume</title></head>
<body>
<div class="actions">
<a href="{FORM_PATH}" id="back-btn">Back to Form</a>
<button type="button" id="print-btn" onclick="window.print()">Print</button>
</div>
<article id="resume-content">
{score}
<h1 id="resume-name">{name}</h1>
<p id="resume-title">{title}</p>
<div id="resume-contact">{contact}</div>
{skills}
<section><h2>Experience</h2><div id="resume-experience">{experience}</div></section>
</article>
</body>
</html>"#,
        name = escape_html(&view.name),
        title = escape_html(&view.title),
        contact = view.contact_html,
        experience = view.experience_html,
    )
}
