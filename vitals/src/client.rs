//! Blocking HTTP client for a running `vitals serve`.

use reqwest::blocking::{Client, Response};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;

use vitals::{normalize_name, BmiRecord, BmiRequest, StudentInput, StudentRecord};

use crate::api::{CalculateResponse, DeletedResponse, ErrorBody, RecordResponse, RecordsResponse};

pub struct ApiClient {
    base: Url,
    http: Client,
}

impl ApiClient {
    pub fn new(base: &str) -> Result<Self, String> {
        let base = Url::parse(base).map_err(|e| format!("Invalid server URL '{base}': {e}"))?;
        if base.cannot_be_a_base() {
            return Err(format!("Invalid server URL '{base}'"));
        }
        Ok(Self {
            base,
            http: Client::new(),
        })
    }

    /// Append path segments to the base URL, percent-encoding each one.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, String> {
        let url = self.url(segments);
        let resp = self.http.get(url.clone()).send().map_err(|e| unreachable(&url, e))?;
        read(resp)
    }

    fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T, String> {
        let url = self.url(segments);
        let resp = self
            .http
            .request(method, url.clone())
            .json(body)
            .send()
            .map_err(|e| unreachable(&url, e))?;
        read(resp)
    }

    pub fn calculate(&self, req: &BmiRequest) -> Result<CalculateResponse, String> {
        self.send_json(reqwest::Method::POST, &["api", "bmi", "calculate"], req)
    }

    /// Names are sent in the same trimmed form the server stores.
    pub fn history_url(&self, name: &str) -> Url {
        self.url(&["api", "bmi", "history", normalize_name(name)])
    }

    pub fn history(&self, name: &str) -> Result<Vec<BmiRecord>, String> {
        let url = self.history_url(name);
        let resp = self.http.get(url.clone()).send().map_err(|e| unreachable(&url, e))?;
        let resp: RecordsResponse = read(resp)?;
        Ok(resp.records)
    }

    pub fn records(&self) -> Result<Vec<BmiRecord>, String> {
        let resp: RecordsResponse = self.get(&["api", "bmi", "records"])?;
        Ok(resp.records)
    }

    pub fn record(&self, id: i64) -> Result<Option<BmiRecord>, String> {
        let resp: RecordResponse = self.get(&["api", "bmi", "records", &id.to_string()])?;
        Ok(resp.record)
    }

    pub fn students(&self) -> Result<Vec<StudentRecord>, String> {
        self.get(&["students"])
    }

    pub fn student(&self, id: i64) -> Result<StudentRecord, String> {
        self.get(&["students", &id.to_string()])
    }

    pub fn create_student(&self, input: &StudentInput) -> Result<StudentRecord, String> {
        self.send_json(reqwest::Method::POST, &["students"], input)
    }

    pub fn update_student(&self, id: i64, input: &StudentInput) -> Result<StudentRecord, String> {
        self.send_json(reqwest::Method::PUT, &["students", &id.to_string()], input)
    }

    pub fn delete_student(&self, id: i64) -> Result<i64, String> {
        let url = self.url(&["students", &id.to_string()]);
        let resp = self
            .http
            .delete(url.clone())
            .send()
            .map_err(|e| unreachable(&url, e))?;
        let deleted: DeletedResponse = read(resp)?;
        Ok(deleted.id)
    }
}

fn unreachable(url: &Url, e: reqwest::Error) -> String {
    format!("Server unreachable at {url}: {e}. Is `vitals serve` running?")
}

/// Decode a success body, or turn an error body into its message.
fn read<T: DeserializeOwned>(resp: Response) -> Result<T, String> {
    let status = resp.status();
    let text = resp
        .text()
        .map_err(|e| format!("Failed to read response: {e}"))?;
    if status.is_success() {
        serde_json::from_str(&text).map_err(|e| format!("Unexpected response: {e}"))
    } else {
        Err(error_message(status.as_u16(), &text))
    }
}

fn error_message(status: u16, text: &str) -> String {
    match serde_json::from_str::<ErrorBody>(text) {
        Ok(body) => body.error,
        Err(_) => format!("HTTP {status}: {text}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_encodes_history_name() {
        let c = ApiClient::new("http://localhost:3000").unwrap();
        assert_eq!(
            c.url(&["api", "bmi", "history", "Juan Dela Cruz"]).as_str(),
            "http://localhost:3000/api/bmi/history/Juan%20Dela%20Cruz"
        );
    }

    #[test]
    fn history_url_trims_name() {
        let c = ApiClient::new("http://localhost:3000").unwrap();
        assert_eq!(
            c.history_url("  Ana ").as_str(),
            "http://localhost:3000/api/bmi/history/Ana"
        );
    }

    #[test]
    fn url_keeps_base_path() {
        let c = ApiClient::new("http://example.test/vitals/").unwrap();
        assert_eq!(
            c.url(&["students", "4"]).as_str(),
            "http://example.test/vitals/students/4"
        );
    }

    #[test]
    fn rejects_non_base_url() {
        assert!(ApiClient::new("mailto:someone@example.test").is_err());
        assert!(ApiClient::new("not a url").is_err());
    }

    #[test]
    fn error_body_message_is_surfaced() {
        let body = r#"{"success":false,"error":"Height and weight must be positive numbers"}"#;
        assert_eq!(error_message(400, body), "Height and weight must be positive numbers");
        assert_eq!(error_message(502, "Bad Gateway"), "HTTP 502: Bad Gateway");
    }
}
