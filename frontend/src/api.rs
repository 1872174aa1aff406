use gloo_net::http::{Request, RequestBuilder, Response};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::{LocalTokenStore, TokenStore};
use crate::config::api_url;
use crate::error::ApiError;
use crate::models::{
    Credentials, Customer, CustomerForm, CustomerUpdate, DashboardTotals, Editor, EditorForm,
    EditorUpdate, ForgotPasswordResponse, LoginResponse, NewRecord, RecordAmountUpdate,
    RecordsResponse, VerifyOtpResponse,
};

/// Payloads arrive either bare or wrapped as `{ "data": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } | Envelope::Bare(data) => data,
        }
    }
}

/// Decodes a response body. An empty body reads as JSON `null`.
pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str::<Envelope<T>>(body)
        .map(Envelope::into_inner)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Pulls the human-readable part out of an error body.
pub fn server_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        error: Option<String>,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => message,
        Ok(ErrorBody {
            error: Some(error), ..
        }) => error,
        _ => body.trim().to_string(),
    }
}

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match LocalTokenStore.load() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn execute<T: DeserializeOwned>(
    method: &str,
    path: &str,
    request: Request,
) -> Result<T, ApiError> {
    debug!("{method} {path}");
    let response: Response = request.send().await.map_err(|e| {
        warn!("{method} {path}: {e}");
        ApiError::Network(e.to_string())
    })?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if !response.ok() {
        let message = server_message(&body);
        warn!("{method} {path} -> {status}: {message}");
        return Err(ApiError::Status { status, message });
    }
    decode_body(&body)
}

pub async fn get<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let request = authorized(Request::get(&api_url(path)))
        .build()
        .map_err(|e| ApiError::Encode(e.to_string()))?;
    execute("GET", path, request).await
}

pub async fn post<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let request = authorized(Request::post(&api_url(path)))
        .json(body)
        .map_err(|e| ApiError::Encode(e.to_string()))?;
    execute("POST", path, request).await
}

pub async fn put<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let request = authorized(Request::put(&api_url(path)))
        .json(body)
        .map_err(|e| ApiError::Encode(e.to_string()))?;
    execute("PUT", path, request).await
}

pub async fn delete(path: &str) -> Result<(), ApiError> {
    let request = authorized(Request::delete(&api_url(path)))
        .build()
        .map_err(|e| ApiError::Encode(e.to_string()))?;
    execute::<serde_json::Value>("DELETE", path, request)
        .await
        .map(|_| ())
}

// Auth

pub async fn login(credentials: &Credentials) -> Result<LoginResponse, ApiError> {
    post("/auth/login", credentials).await
}

pub async fn forgot_password(email: &str) -> Result<ForgotPasswordResponse, ApiError> {
    post("/auth/forgot-password", &json!({ "email": email })).await
}

pub async fn verify_otp(email: &str, otp: &str) -> Result<VerifyOtpResponse, ApiError> {
    post("/auth/verify-otp", &json!({ "email": email, "otp": otp })).await
}

pub async fn reset_password_with_otp(email: &str, otp: &str, password: &str) -> Result<(), ApiError> {
    post::<_, serde_json::Value>(
        "/auth/reset-password",
        &json!({ "email": email, "otp": otp, "password": password }),
    )
    .await
    .map(|_| ())
}

pub async fn reset_password_with_link(token: &str, password: &str) -> Result<(), ApiError> {
    post::<_, serde_json::Value>(
        &format!("/auth/reset-password/{}", token),
        &json!({ "password": password }),
    )
    .await
    .map(|_| ())
}

// Customers

pub async fn fetch_customers() -> Result<Vec<Customer>, ApiError> {
    get("/customers").await
}

pub async fn create_customer(form: &CustomerForm) -> Result<Customer, ApiError> {
    post("/customers", form).await
}

/// Full update. Some backend versions answer without the document.
pub async fn update_customer(id: &str, form: &CustomerForm) -> Result<Option<Customer>, ApiError> {
    put(&format!("/customers/{}", id), form).await
}

pub async fn rename_customer(id: &str, update: &CustomerUpdate) -> Result<(), ApiError> {
    put::<_, serde_json::Value>(&format!("/customers/{}", id), update)
        .await
        .map(|_| ())
}

pub async fn delete_customer(id: &str) -> Result<(), ApiError> {
    delete(&format!("/customers/{}", id)).await
}

pub async fn fetch_totals() -> Result<DashboardTotals, ApiError> {
    get("/dashboard/totals").await
}

// Daily records

pub async fn fetch_records(customer_id: &str) -> Result<RecordsResponse, ApiError> {
    get(&format!("/records/{}", customer_id)).await
}

pub async fn add_record(customer_id: &str, record: &NewRecord) -> Result<(), ApiError> {
    post::<_, serde_json::Value>(&format!("/records/{}", customer_id), record)
        .await
        .map(|_| ())
}

pub async fn update_record(id: &str, update: &RecordAmountUpdate) -> Result<(), ApiError> {
    put::<_, serde_json::Value>(&format!("/records/update/{}", id), update)
        .await
        .map(|_| ())
}

pub async fn delete_record(id: &str) -> Result<(), ApiError> {
    delete(&format!("/records/delete/{}", id)).await
}

// Editors

pub async fn fetch_editors() -> Result<Vec<Editor>, ApiError> {
    get("/users/get-editors").await
}

pub async fn add_editor(form: &EditorForm) -> Result<Option<Editor>, ApiError> {
    post("/users/add-editor", form).await
}

pub async fn update_editor(id: &str, update: &EditorUpdate) -> Result<(), ApiError> {
    put::<_, serde_json::Value>(&format!("/users/update-editor/{}", id), update)
        .await
        .map(|_| ())
}

pub async fn delete_editor(email: &str) -> Result<(), ApiError> {
    delete(&format!("/users/delete-editor/{}", email)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_and_bare_lists_decode_the_same() {
        let wrapped: Vec<Editor> =
            decode_body(r#"{"success":true,"data":[{"_id":"e1","name":"Asha","email":"a@gmail.com"}]}"#)
                .unwrap();
        let bare: Vec<Editor> =
            decode_body(r#"[{"_id":"e1","name":"Asha","email":"a@gmail.com"}]"#).unwrap();
        assert_eq!(wrapped, bare);
        assert_eq!(bare[0].name, "Asha");
    }

    #[test]
    fn object_without_data_key_is_bare() {
        let records: RecordsResponse =
            decode_body(r#"{"records":[],"customer":null}"#).unwrap();
        assert!(records.records.is_empty());
    }

    #[test]
    fn empty_body_is_null() {
        let value: serde_json::Value = decode_body("").unwrap();
        assert!(value.is_null());
        let editor: Option<Editor> = decode_body("  ").unwrap();
        assert!(editor.is_none());
        assert!(matches!(
            decode_body::<Vec<Customer>>(""),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn error_message_extraction() {
        assert_eq!(server_message(r#"{"message":"Invalid credentials"}"#), "Invalid credentials");
        assert_eq!(server_message(r#"{"error":"Forbidden"}"#), "Forbidden");
        assert_eq!(server_message("  Bad Gateway \n"), "Bad Gateway");
        assert_eq!(server_message(r#"{"ok":false}"#), r#"{"ok":false}"#);
    }
}
