use tracing::debug;

use crate::data::{Clinic, Envelope};
use crate::error::QueryError;

/// Search text and category as typed by the user. Empty means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub search: String,
    pub category: String,
}

impl Filter {
    pub fn new(search: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            category: category.into(),
        }
    }
}

/// Appends `search` and `jenis` to the endpoint, leaving out empty values.
pub fn build_url(endpoint: &str, filter: &Filter) -> String {
    let params: Vec<String> = [("search", &filter.search), ("jenis", &filter.category)]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect();

    if params.is_empty() {
        return endpoint.to_string();
    }
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!("{}{}{}", endpoint, separator, params.join("&"))
}

/// Decodes a `{ success, data }` body into a dataset.
pub fn parse_envelope(text: &str) -> Result<Vec<Clinic>, QueryError> {
    let envelope: Envelope = serde_json::from_str(text)?;
    if !envelope.success {
        return Err(QueryError::Rejected {
            message: envelope.message,
        });
    }
    envelope.data.ok_or(QueryError::MissingData)
}

#[derive(Debug, Clone)]
pub struct QueryClient {
    http: reqwest::Client,
    endpoint: String,
}

impl QueryClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One GET against the endpoint. No retry; failures go back to the caller.
    pub async fn fetch_records(&self, filter: &Filter) -> Result<Vec<Clinic>, QueryError> {
        let url = build_url(&self.endpoint, filter);
        debug!(%url, "fetching clinics");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::Status(status));
        }

        let text = response.text().await?;
        let records = parse_envelope(&text)?;
        debug!(count = records.len(), "clinic query answered");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;

    const ONE_CLINIC: &str = r#"{"success":true,"data":[{"nama_klinik":"Klinik A","alamat":"Jl. 1","jenis_klinik":"gigi","latitude":-6.65,"longitude":110.74}]}"#;

    /// Serves a single canned HTTP response and reports the request line.
    fn serve_once(status: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).unwrap();
                if header == "\r\n" || header.is_empty() {
                    break;
                }
            }
            write!(
                stream,
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            )
            .unwrap();
            tx.send(request_line.trim_end().to_string()).unwrap();
        });

        (format!("http://{}/api/klinik.php", addr), rx)
    }

    fn local_client(endpoint: String) -> QueryClient {
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        QueryClient::with_client(http, endpoint)
    }

    #[test]
    fn empty_filter_leaves_endpoint_untouched() {
        assert_eq!(build_url("api/klinik.php", &Filter::default()), "api/klinik.php");
    }

    #[test]
    fn parameters_are_escaped_and_empty_ones_omitted() {
        assert_eq!(
            build_url("api/klinik.php", &Filter::new("klinik sehat&co", "gigi")),
            "api/klinik.php?search=klinik%20sehat%26co&jenis=gigi"
        );
        assert_eq!(
            build_url("api/klinik.php", &Filter::new("", "bersalin")),
            "api/klinik.php?jenis=bersalin"
        );
        assert_eq!(
            build_url("api/klinik.php", &Filter::new("Pratama", "")),
            "api/klinik.php?search=Pratama"
        );
    }

    #[test]
    fn endpoint_with_query_string_is_extended() {
        assert_eq!(
            build_url("http://host/index.php?r=klinik", &Filter::new("a", "")),
            "http://host/index.php?r=klinik&search=a"
        );
    }

    #[test]
    fn envelope_failures_are_distinguished() {
        assert!(matches!(
            parse_envelope(r#"{"success":false,"message":"db down"}"#),
            Err(QueryError::Rejected { message: Some(m) }) if m == "db down"
        ));
        assert!(matches!(
            parse_envelope(r#"{"success":true}"#),
            Err(QueryError::MissingData)
        ));
        assert!(matches!(
            parse_envelope("Fatal error: mysqli_connect()"),
            Err(QueryError::Malformed(_))
        ));
        assert!(matches!(
            parse_envelope(r#"{"data":[]}"#),
            Err(QueryError::Malformed(_))
        ));
    }

    #[test]
    fn null_category_does_not_drop_the_dataset() {
        let records = parse_envelope(
            r#"{"success":true,"data":[
                {"nama_klinik":"Satu","alamat":"a","jenis_klinik":null,"latitude":1.0,"longitude":2.0},
                {"nama_klinik":"Dua","alamat":"b","jenis_klinik":"gigi","latitude":3.0,"longitude":4.0}
            ]}"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind().style().key, "default-blue");
        assert_eq!(records[1].kind().style().key, "dental-green");
    }

    #[test]
    fn envelope_keeps_record_order() {
        let records = parse_envelope(
            r#"{"success":true,"data":[
                {"nama_klinik":"Satu","alamat":"a","jenis_klinik":"umum","latitude":1.0,"longitude":2.0},
                {"nama_klinik":"Dua","alamat":"b","jenis_klinik":"gigi","latitude":3.0,"longitude":4.0}
            ]}"#,
        )
        .unwrap();
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Satu", "Dua"]);
    }

    #[tokio::test]
    async fn fetch_sends_filter_and_decodes_records() {
        let (endpoint, request) = serve_once("200 OK", ONE_CLINIC);
        let client = local_client(endpoint);

        let records = client
            .fetch_records(&Filter::new("Klinik A", "gigi"))
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Klinik A");
        assert_eq!(
            request.recv().unwrap(),
            "GET /api/klinik.php?search=Klinik%20A&jenis=gigi HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn fetch_reports_server_errors() {
        let (endpoint, _request) = serve_once("500 Internal Server Error", "{}");
        let client = local_client(endpoint);

        let err = client.fetch_records(&Filter::default()).await.unwrap_err();
        assert!(matches!(err, QueryError::Status(status) if status.as_u16() == 500));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn fetch_reports_unreachable_endpoint() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = local_client(format!("http://{}/api/klinik.php", addr));
        let err = client.fetch_records(&Filter::default()).await.unwrap_err();
        assert!(matches!(err, QueryError::Transport(_)));
    }
}
