// SPDX-License-Identifier: Apache-2.0

use std::fmt::Write as _;

use phonebook_api::{ApiError, BrowseParams, ValidState};
use phonebook_core::SessionId;
use phonebook_model::{Country, PhoneRecord};
use phonebook_query::PageInfo;
use url::form_urlencoded;

const STYLE: &str = "body{font-family:sans-serif;margin:2rem}table{border-collapse:collapse}\
td,th{border:1px solid #ccc;padding:.3rem .6rem}.invalid{color:#a00}nav a{margin-right:1rem}";

pub(crate) struct ListingView<'a> {
    pub records: &'a [PhoneRecord],
    pub countries: &'a [Country],
    pub params: &'a BrowseParams,
    pub page: &'a PageInfo,
    /// Token that fetched this page; the "previous" link sends it back.
    pub current_token: &'a str,
    pub next_page_token: Option<&'a str>,
    pub session_id: &'a SessionId,
}

#[must_use]
pub(crate) fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn listing_href(view: &ListingView<'_>, token_key: &str, token: &str) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query
        .append_pair(token_key, token)
        .append_pair("sessionId", view.session_id.as_str())
        .append_pair("pageSize", &view.params.page_size.to_string());
    if let Some(code) = view.params.country_code_filter {
        query.append_pair("countryCodeFilter", &code.to_string());
    }
    if let Some(state) = view.params.valid_state_filter {
        query.append_pair("validStateFilter", state.as_str());
    }
    if let Some(phone) = &view.params.phone_filter {
        query.append_pair("phoneFilter", phone);
    }
    format!("/?{}", query.finish())
}

fn page_shell(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{}</title>\
<style>{STYLE}</style></head><body>{body}</body></html>",
        escape_html(title)
    )
}

fn country_options(countries: &[Country], selected: Option<u16>, by_code: bool) -> String {
    let mut out = String::new();
    for c in countries {
        let value = if by_code {
            c.code.to_string()
        } else {
            c.name.clone()
        };
        let sel = if selected == Some(c.code) { " selected" } else { "" };
        let _ = write!(
            out,
            "<option value=\"{}\"{sel}>{} (+{})</option>",
            escape_html(&value),
            escape_html(&c.name),
            c.code
        );
    }
    out
}

#[must_use]
pub(crate) fn render_listing(view: &ListingView<'_>) -> String {
    let mut rows = String::new();
    for r in view.records {
        let code = r.country_code.map(|c| c.to_string()).unwrap_or_default();
        let (class, verdict) = if r.phone_valid {
            ("valid", "valid")
        } else {
            ("invalid", "not valid")
        };
        let _ = write!(
            rows,
            "<tr class=\"{class}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{verdict}</td><td>{}</td></tr>",
            r.id,
            escape_html(&r.country_name),
            code,
            escape_html(&r.number),
            r.create_date.format("%Y-%m-%d %H:%M:%S"),
        );
    }
    if rows.is_empty() {
        rows.push_str("<tr><td colspan=\"6\">No phone numbers match.</td></tr>");
    }

    let mut nav = String::new();
    if view.page.page_number > 1 {
        let _ = write!(
            nav,
            "<a id=\"prev-page\" href=\"{}\">Previous</a>",
            escape_html(&listing_href(view, "prevPageToken", view.current_token))
        );
    }
    if let Some(next) = view.next_page_token {
        let _ = write!(
            nav,
            "<a id=\"next-page\" href=\"{}\">Next</a>",
            escape_html(&listing_href(view, "nextPageToken", next))
        );
    }

    let state_option = |state: ValidState, label: &str| {
        let sel = if view.params.valid_state_filter == Some(state) {
            " selected"
        } else {
            ""
        };
        format!("<option value=\"{}\"{sel}>{label}</option>", state.as_str())
    };
    let phone_value = view.params.phone_filter.as_deref().unwrap_or_default();

    let body = format!(
        "<h1>Phone numbers</h1>\
<form method=\"get\" action=\"/\">\
<select name=\"countryCodeFilter\"><option value=\"\">All countries</option>{countries}</select> \
<select name=\"validStateFilter\"><option value=\"\">Any state</option>{valid}{not_valid}</select> \
<input name=\"phoneFilter\" placeholder=\"Phone number\" value=\"{phone}\"> \
<input name=\"pageSize\" type=\"number\" min=\"1\" max=\"50\" value=\"{size}\"> \
<button type=\"submit\">Filter</button></form>\
<p><span id=\"page-number\">Page {page}</span> &middot; <span id=\"collection-count\">{count} records</span> \
&middot; <a href=\"/add\">Add phone</a></p>\
<table><thead><tr><th>Id</th><th>Country</th><th>Code</th><th>Number</th><th>State</th><th>Created</th></tr></thead>\
<tbody>{rows}</tbody></table>\
<nav data-session-id=\"{sid}\">{nav}</nav>",
        countries = country_options(view.countries, view.params.country_code_filter, true),
        valid = state_option(ValidState::Valid, "Valid"),
        not_valid = state_option(ValidState::NotValid, "Not valid"),
        phone = escape_html(phone_value),
        size = view.params.page_size,
        page = view.page.page_number,
        count = view.page.collection_count,
        sid = escape_html(view.session_id.as_str()),
    );
    page_shell("Phone numbers", &body)
}

#[must_use]
pub(crate) fn render_add_form(countries: &[Country]) -> String {
    let body = format!(
        "<h1>Add phone</h1>\
<form method=\"post\" action=\"/addPhone\">\
<label>Country <select name=\"country\">{}</select></label> \
<label>Phone <input name=\"phone\" placeholder=\"(256) 775069443\"></label> \
<button type=\"submit\">Add</button></form>\
<p><a href=\"/\">Back to list</a></p>",
        country_options(countries, None, false)
    );
    page_shell("Add phone", &body)
}

#[must_use]
pub(crate) fn render_error_page(status: u16, err: &ApiError) -> String {
    let body = format!(
        "<h1>Error {status}</h1><p>{}</p><p><small>request {}</small></p><p><a href=\"/\">Back to list</a></p>",
        escape_html(&err.message),
        escape_html(&err.request_id),
    );
    page_shell("Error", &body)
}
