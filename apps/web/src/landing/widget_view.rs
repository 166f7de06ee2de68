//! HTML for the demo widget. Every control is a plain form post, so the
//! widget works without client-side script.

use crate::landing::escape_html;
use crate::models::{AtsScoreResult, JobSuggestion};
use crate::widget::WidgetSnapshot;

pub fn render(widget: &WidgetSnapshot) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<div class=\"widget\">\n");

    html.push_str("<form id=\"resume-form\" method=\"post\" action=\"/demo/upload\">\n");
    html.push_str(
        "<textarea name=\"content\" placeholder=\"Paste your resume content here\">",
    );
    html.push_str(&escape_html(&widget.content));
    html.push_str("</textarea>\n</form>\n");

    html.push_str("<div class=\"actions\">\n");
    html.push_str("<button type=\"submit\" form=\"resume-form\" class=\"btn btn-primary\"");
    if widget.loading {
        html.push_str(" disabled");
    }
    html.push_str(">Upload &amp; Get Jobs</button>\n");
    html.push_str(
        "<form method=\"post\" action=\"/demo/ats\">\
         <button type=\"submit\" class=\"btn btn-secondary\">Check ATS</button></form>\n",
    );
    html.push_str("</div>\n");

    if widget.loading {
        html.push_str("<div class=\"busy\" aria-live=\"polite\">Working…</div>\n");
    }

    if let Some(message) = &widget.error {
        html.push_str("<div class=\"notice\" role=\"alert\">");
        html.push_str(&escape_html(message));
        html.push_str("</div>\n");
    }

    if !widget.jobs.is_empty() {
        render_jobs(&mut html, &widget.jobs, widget.selected_job_id.as_deref());
    }

    if let Some(score) = &widget.score {
        render_score(&mut html, score);
    }

    html.push_str("</div>\n");
    html
}

fn render_jobs(html: &mut String, jobs: &[JobSuggestion], selected: Option<&str>) {
    html.push_str("<div class=\"jobs\">\n<div class=\"jobs-label\">Suggested Jobs</div>\n");
    for job in jobs {
        let is_selected = selected == Some(job.id.as_str());

        html.push_str("<div class=\"job\">\n<div>\n<div class=\"job-title\">");
        html.push_str(&escape_html(&job.title));
        html.push_str(" · ");
        html.push_str(&escape_html(&job.company));
        html.push_str("</div>\n<div class=\"job-skills\">Skills: ");
        html.push_str(&escape_html(&job.skills.join(", ")));
        html.push_str("</div>\n</div>\n<div class=\"job-actions\">\n");

        html.push_str("<form method=\"post\" action=\"/demo/select\">");
        html.push_str("<input type=\"hidden\" name=\"job_id\" value=\"");
        html.push_str(&escape_html(&job.id));
        html.push_str("\">");
        if is_selected {
            html.push_str(
                "<button type=\"submit\" class=\"btn btn-secondary btn-small selected\" aria-pressed=\"true\">",
            );
        } else {
            html.push_str(
                "<button type=\"submit\" class=\"btn btn-secondary btn-small\" aria-pressed=\"false\">",
            );
        }
        html.push_str("Select</button></form>\n");

        if let Some(link) = &job.link {
            html.push_str("<a href=\"");
            html.push_str(&escape_html(link));
            html.push_str(
                "\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"btn btn-primary btn-small\">Apply</a>\n",
            );
        }
        html.push_str("</div>\n</div>\n");
    }
    html.push_str("</div>\n");
}

fn render_score(html: &mut String, score: &AtsScoreResult) {
    html.push_str("<div class=\"score\">\n<div class=\"score-value\">ATS Score: ");
    html.push_str(&score.display_score());
    html.push_str("%</div>\n");
    if !score.missing_keywords.is_empty() {
        html.push_str("<div class=\"score-missing\">Missing: ");
        html.push_str(&escape_html(&score.missing_keywords.join(", ")));
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n");
}
