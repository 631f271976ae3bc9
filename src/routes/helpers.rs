use std::error::Error;

use actix_web::{HttpResponse, http::header::LOCATION};

pub fn error_chain_fmt(e: &impl Error, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    writeln!(f, "{e}\n")?;
    let mut current = e.source();

    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{cause}")?;
        current = cause.source();
    }

    Ok(())
}

/// `302 Found` pointing at `location`.
pub fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, location))
        .finish()
}

/// Back to the form page, carrying `message` as the `error` query parameter.
pub fn redirect_with_error(message: &str) -> HttpResponse {
    redirect_to(&format!("/?error={}", urlencoding::encode(message)))
}
