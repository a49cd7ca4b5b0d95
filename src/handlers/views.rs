use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use html_escape::encode_text;
use signup_audit_api::UserRecord;

use crate::auth::services::AuthService;

const STYLE: &str = "body{font-family:Arial;margin:20px;} \
table{width:100%;border-collapse:collapse;} \
th,td{padding:8px;border:1px solid #ddd;text-align:left;} \
th{background:#f2f2f2;} \
.password-col{font-weight:bold;color:#ed4956;} \
.failed-row{background:#ffebee;} \
.duplicate-row{background:#fff8e1;}";

/// GET /view-users
pub async fn view_users(State(service): State<Arc<AuthService>>) -> Response {
    match service.list_users() {
        Ok(users) => Html(render_users_page(&users)).into_response(),
        Err(e) => e.into_html(),
    }
}

/// GET /view-audit
pub async fn view_audit(State(service): State<Arc<AuthService>>) -> Response {
    match service.list_audit() {
        Ok(audits) => Html(render_audit_page(&audits)).into_response(),
        Err(e) => e.into_html(),
    }
}

pub fn render_users_page(users: &[UserRecord]) -> String {
    let rows = users.iter().map(|user| (user, ""));
    render_page("Users Data", rows, users.len())
}

/// Failed logins get `failed-row`; a row repeating the previous row's
/// username and email gets `duplicate-row`.
pub fn render_audit_page(audits: &[UserRecord]) -> String {
    let rows = audits.iter().enumerate().map(|(i, audit)| {
        let previous = i.checked_sub(1).map(|p| &audits[p]);
        (audit, row_class(audit, previous))
    });
    render_page("Audit Data", rows, audits.len())
}

fn row_class(record: &UserRecord, previous: Option<&UserRecord>) -> &'static str {
    let duplicate = previous
        .is_some_and(|p| p.username == record.username && p.email == record.email);
    match (record.is_failed_login(), duplicate) {
        (true, true) => "failed-row duplicate-row",
        (true, false) => "failed-row",
        (false, true) => "duplicate-row",
        (false, false) => "",
    }
}

fn render_page<'a>(
    title: &str,
    rows: impl Iterator<Item = (&'a UserRecord, &'static str)>,
    total: usize,
) -> String {
    let mut html = format!(
        "<!DOCTYPE html><html><head><title>{title}</title><style>{STYLE}</style></head>\
         <body><h2>{title}</h2><table><tr><th>ID</th><th>Email</th><th>Full Name</th>\
         <th>Username</th><th>Password</th><th>Birthday</th></tr>"
    );

    for (record, class) in rows {
        html.push_str(&format!(
            "<tr class=\"{class}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td class=\"password-col\">{}</td><td>{}</td></tr>",
            encode_text(&record.id),
            encode_text(&record.email),
            encode_text(&record.full_name),
            encode_text(&record.username),
            encode_text(&record.password),
            encode_text(&record.birthday),
        ));
    }

    html.push_str(&format!(
        "</table><p>Total: {total}</p><a href=\"/\">Back</a></body></html>"
    ));
    html
}
