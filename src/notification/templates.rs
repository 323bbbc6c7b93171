//! Email template rendering.
//!
//! Each notice kind renders to a subject line, an HTML body, and a
//! plain-text fallback derived by stripping markup from the HTML.

use crate::notification::domain::{AssignmentNotice, CommentNotice, EmailMessage};
use minijinja::Environment;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

#[expect(
    clippy::expect_used,
    reason = "the markup pattern is a fixed literal known to compile"
)]
static MARKUP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("markup pattern compiles"));

const ASSIGNMENT_TEMPLATE: &str = r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #3B82F6;">New Task Assignment</h2>
  <p>Hello {{ to_name }},</p>
  <p>You have been assigned a new task in the <strong>Nyrix Project Hub</strong>:</p>

  <div style="background: #F3F4F6; padding: 20px; border-radius: 8px; margin: 20px 0;">
    <h3 style="margin-top: 0;">{{ task_title }}</h3>
    <p><strong>Project:</strong> {{ project_name }}</p>
    <p><strong>Priority:</strong> <span style="color: {{ priority_color }}">{{ priority }}</span></p>
    <p><strong>Deadline:</strong> {{ deadline }}</p>
    <p><strong>Assigned by:</strong> {{ assigned_by }}</p>
  </div>

  <p>Please log in to the project hub to view full details and start working on this task.</p>

  <div style="margin-top: 30px; padding-top: 20px; border-top: 1px solid #E5E7EB;">
    <p style="color: #6B7280; font-size: 14px;">
      Best regards,<br>
      <strong>Nyrix Project Hub Team</strong>
    </p>
  </div>
</div>"#;

const COMMENT_TEMPLATE: &str = r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #3B82F6;">New Comment Notification</h2>
  <p>Hello {{ to_name }},</p>
  <p>A new comment has been added to your task in the <strong>Nyrix Project Hub</strong>:</p>

  <div style="background: #F3F4F6; padding: 20px; border-radius: 8px; margin: 20px 0;">
    <h3 style="margin-top: 0;">{{ task_title }}</h3>
    <p><strong>Project:</strong> {{ project_name }}</p>
    <p><strong>Comment by:</strong> {{ author }}</p>
    <p><strong>Comment:</strong></p>
    <div style="background: white; padding: 15px; border-left: 4px solid #3B82F6; margin: 10px 0;">
      {{ comment_text }}
    </div>
  </div>

  <p>Please log in to the project hub to view the full context and respond if needed.</p>

  <div style="margin-top: 30px; padding-top: 20px; border-top: 1px solid #E5E7EB;">
    <p style="color: #6B7280; font-size: 14px;">
      Best regards,<br>
      <strong>Nyrix Project Hub Team</strong>
    </p>
  </div>
</div>"#;

const MENTION_TEMPLATE: &str = r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #DC2626;">You were tagged in a comment!</h2>
  <p>Hello {{ to_name }},</p>
  <p>You were tagged in a comment in the <strong>Nyrix Project Hub</strong>:</p>

  <div style="background: #FEF2F2; padding: 20px; border-radius: 8px; margin: 20px 0; border: 1px solid #FECACA;">
    <h3 style="margin-top: 0; color: #DC2626;">{{ task_title }}</h3>
    <p><strong>Project:</strong> {{ project_name }}</p>
    <p><strong>Tagged by:</strong> {{ author }}</p>
    <p><strong>Comment:</strong></p>
    <div style="background: white; padding: 15px; border-left: 4px solid #DC2626; margin: 10px 0;">
      {{ comment_text }}
    </div>
  </div>

  <p><strong>Action Required:</strong> Please review this comment and respond if needed.</p>

  <div style="margin-top: 30px; padding-top: 20px; border-top: 1px solid #E5E7EB;">
    <p style="color: #6B7280; font-size: 14px;">
      Best regards,<br>
      <strong>Nyrix Project Hub Team</strong>
    </p>
  </div>
</div>"#;

/// Error returned when a notice template fails to render.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render {template} template: {reason}")]
pub struct TemplateError {
    /// Name of the failing template.
    pub template: String,
    /// Underlying rendering failure.
    pub reason: String,
}

#[derive(Serialize)]
struct AssignmentContext<'a> {
    to_name: &'a str,
    task_title: &'a str,
    project_name: &'a str,
    deadline: &'a str,
    priority: &'a str,
    priority_color: &'a str,
    assigned_by: &'a str,
}

#[derive(Serialize)]
struct CommentContext<'a> {
    to_name: &'a str,
    task_title: &'a str,
    project_name: &'a str,
    author: &'a str,
    comment_text: &'a str,
}

/// Renders the task assignment email for the given notice.
///
/// # Errors
///
/// Returns [`TemplateError`] when template rendering fails.
pub fn render_assignment_email(notice: &AssignmentNotice) -> Result<EmailMessage, TemplateError> {
    let context = AssignmentContext {
        to_name: &notice.to_name,
        task_title: &notice.task_title,
        project_name: &notice.project_name,
        deadline: notice.deadline.as_deref().unwrap_or("No deadline set"),
        priority: &notice.priority,
        priority_color: priority_color(&notice.priority),
        assigned_by: &notice.assigned_by,
    };
    let html = render("assignment", ASSIGNMENT_TEMPLATE, &context)?;
    Ok(build_message(
        &notice.to_email,
        format!("New Task Assigned: {}", notice.task_title),
        html,
    ))
}

/// Renders the new-comment email for the given notice.
///
/// # Errors
///
/// Returns [`TemplateError`] when template rendering fails.
pub fn render_comment_email(notice: &CommentNotice) -> Result<EmailMessage, TemplateError> {
    let html = render("comment", COMMENT_TEMPLATE, &comment_context(notice))?;
    Ok(build_message(
        &notice.to_email,
        format!("New Comment on Task: {}", notice.task_title),
        html,
    ))
}

/// Renders the mention email for the given notice.
///
/// # Errors
///
/// Returns [`TemplateError`] when template rendering fails.
pub fn render_mention_email(notice: &CommentNotice) -> Result<EmailMessage, TemplateError> {
    let html = render("mention", MENTION_TEMPLATE, &comment_context(notice))?;
    Ok(build_message(
        &notice.to_email,
        format!("You were tagged in a comment: {}", notice.task_title),
        html,
    ))
}

/// Maps a priority label to its highlight colour.
///
/// Unknown labels fall back to neutral grey.
#[must_use]
pub fn priority_color(priority: &str) -> &'static str {
    match priority.to_lowercase().as_str() {
        "urgent" => "#DC2626",
        "high" => "#EA580C",
        "medium" => "#D97706",
        "low" => "#059669",
        _ => "#6B7280",
    }
}

fn comment_context(notice: &CommentNotice) -> CommentContext<'_> {
    CommentContext {
        to_name: &notice.to_name,
        task_title: &notice.task_title,
        project_name: &notice.project_name,
        author: &notice.author,
        comment_text: &notice.comment_text,
    }
}

fn build_message(to: &str, subject: String, html: String) -> EmailMessage {
    let text = MARKUP_PATTERN.replace_all(&html, "").into_owned();
    EmailMessage {
        to: to.to_owned(),
        subject,
        html,
        text: Some(text),
    }
}

fn render<S: Serialize>(name: &str, template: &str, context: S) -> Result<String, TemplateError> {
    let environment = Environment::new();
    environment
        .render_str(template, context)
        .map_err(|error| TemplateError {
            template: name.to_owned(),
            reason: error.to_string(),
        })
}
