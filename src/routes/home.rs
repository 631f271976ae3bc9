use actix_web::{HttpResponse, http::header::ContentType, web};
use anyhow::Context;
use chrono::{Datelike, Local};
use tera::{Context as TeraContext, Tera};

use crate::configuration::SiteSettings;

use super::errors::ServerError;

#[derive(serde::Deserialize)]
pub struct QueryParams {
    success: Option<String>,
    error: Option<String>,
}

#[derive(serde::Serialize)]
struct HomePage<'a> {
    title: &'a str,
    current_year: i32,
    success: bool,
    error: Option<&'a str>,
}

pub async fn home(
    query: web::Query<QueryParams>,
    templates: web::Data<Tera>,
    site: web::Data<SiteSettings>,
) -> Result<HttpResponse, ServerError> {
    let page = HomePage {
        title: &site.title,
        current_year: Local::now().year(),
        success: query.success.as_deref() == Some("true"),
        error: query.error.as_deref(),
    };

    let ctx = TeraContext::from_serialize(&page).context("Failed to build the page context.")?;
    let page_string = templates
        .render("index.html", &ctx)
        .context("Failed rendering the contact page.")?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(page_string))
}
