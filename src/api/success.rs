use actix_web::{
    body::BoxBody, cookie::Cookie, http::header, http::StatusCode, HttpRequest, HttpResponse,
    Responder,
};
use serde::Serialize;
use std::borrow::Cow;

/// Body of every successful response that carries one.
#[derive(Serialize)]
pub struct Envelope<T: Serialize> {
    pub data: T,
    pub message: Option<Cow<'static, str>>,
}

pub struct Success<T: Serialize> {
    status: StatusCode,
    body: Option<Envelope<T>>,
    cookies: Vec<Cookie<'static>>,
    location: Option<String>,
}

impl<T: Serialize> Success<T> {
    fn with_status(status: StatusCode, data: T) -> Self {
        Self {
            status,
            body: Some(Envelope { data, message: None }),
            cookies: Vec::new(),
            location: None,
        }
    }

    pub fn ok(data: T) -> Self {
        Self::with_status(StatusCode::OK, data)
    }

    /// 201 with a `Location` header pointing at the new resource.
    pub fn created(data: T, location: impl Into<String>) -> Self {
        let mut success = Self::with_status(StatusCode::CREATED, data);
        success.location = Some(location.into());
        success
    }

    pub fn message(mut self, msg: impl Into<Cow<'static, str>>) -> Self {
        if let Some(body) = &mut self.body {
            body.message = Some(msg.into());
        }
        self
    }

    pub fn cookie(mut self, cookie: Cookie<'static>) -> Self {
        self.cookies.push(cookie);
        self
    }
}

impl Success<()> {
    pub fn no_content() -> Self {
        Self { status: StatusCode::NO_CONTENT, body: None, cookies: Vec::new(), location: None }
    }
}

impl<T: Serialize> Responder for Success<T> {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        let mut response = HttpResponse::build(self.status);

        for cookie in self.cookies {
            response.cookie(cookie);
        }
        if let Some(location) = self.location {
            response.insert_header((header::LOCATION, location));
        }

        match self.body {
            Some(body) => response.json(body),
            None => response.finish(),
        }
    }
}
