//! Dataset location and loading.
//!
//! The dashboard reads its dataset exactly once, at startup. A location is
//! either an HTTP(S) URL (fetched with a blocking request) or a local path.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use tracing::{info, warn};

use crate::error::LoadError;
use crate::io::ingest::{LoadedTable, parse_table};

/// Published copy of the historical automobile sales dataset.
pub const DEFAULT_DATA_URL: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBMDeveloperSkillsNetwork-DV0101EN-SkillsNetwork/Data%20Files/historical_automobile_sales.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    Path(PathBuf),
}

impl DataSource {
    /// `http://` and `https://` locations are URLs, anything else is a path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(trimmed.to_string())
        } else {
            DataSource::Path(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => f.write_str(url),
            DataSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetch and parse the whole dataset. No retries.
pub fn load_table(source: &DataSource) -> Result<LoadedTable, LoadError> {
    info!(%source, "loading dataset");
    let loaded = match source {
        DataSource::Url(url) => parse_table(fetch_url(url)?.as_slice())?,
        DataSource::Path(path) => parse_table(read_path(path)?.as_slice())?,
    };

    for err in &loaded.row_errors {
        warn!(line = err.line, "skipped row: {}", err.message);
    }
    info!(
        rows = loaded.table.len(),
        rows_read = loaded.rows_read,
        skipped = loaded.row_errors.len(),
        "dataset loaded"
    );
    Ok(loaded)
}

fn fetch_url(url: &str) -> Result<Vec<u8>, LoadError> {
    let fetch_err = |source: reqwest::Error| LoadError::Fetch {
        url: url.to_string(),
        source,
    };

    let resp = Client::new().get(url).send().map_err(fetch_err)?;

    if !resp.status().is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: resp.status().as_u16(),
        });
    }

    let body = resp.bytes().map_err(fetch_err)?;
    Ok(body.to_vec())
}

fn read_path(path: &Path) -> Result<Vec<u8>, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.display().to_string()));
    }
    if path.is_dir() {
        return Err(LoadError::IsDirectory(path.display().to_string()));
    }
    fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::{SocketAddr, TcpListener};
    use std::thread::{self, JoinHandle};

    use super::*;

    const ONE_ROW_CSV: &str = "Date,Year,Month,Recession,Consumer_Confidence,Seasonality_Weight,Price,Advertising_Expenditure,Competition,GDP,unemployment_rate,Automobile_Sales,Vehicle_Type\n\
         1/31/1980,1980,Jan,1,108.24,0.5,27483.571,1558,7,60.223,5.4,456,Supperminicar\n";

    /// Serve exactly one HTTP response on a loopback port.
    fn serve_once(status: &'static str, body: &'static str) -> (SocketAddr, JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        (addr, handle)
    }

    #[test]
    fn parse_distinguishes_urls_from_paths() {
        assert_eq!(
            DataSource::parse("https://example.org/sales.csv"),
            DataSource::Url("https://example.org/sales.csv".to_string())
        );
        assert_eq!(
            DataSource::parse(" HTTP://example.org/a.csv "),
            DataSource::Url("HTTP://example.org/a.csv".to_string())
        );
        assert_eq!(
            DataSource::parse("data/sales.csv"),
            DataSource::Path(PathBuf::from("data/sales.csv"))
        );
    }

    #[test]
    fn default_url_is_a_url() {
        assert!(matches!(DataSource::parse(DEFAULT_DATA_URL), DataSource::Url(_)));
    }

    #[test]
    fn missing_path_is_a_load_error() {
        let source = DataSource::Path(PathBuf::from("definitely/not/here/sales.csv"));
        assert!(matches!(load_table(&source), Err(LoadError::NotFound(_))));
    }

    #[test]
    fn directory_path_is_rejected() {
        let source = DataSource::Path(std::env::temp_dir());
        assert!(matches!(load_table(&source), Err(LoadError::IsDirectory(_))));
    }

    #[test]
    fn loads_a_local_file() {
        let path = std::env::temp_dir().join(format!("autodash_source_test_{}.csv", std::process::id()));
        fs::write(&path, ONE_ROW_CSV).unwrap();

        let loaded = load_table(&DataSource::Path(path.clone())).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded.table.len(), 1);
    }

    #[test]
    fn non_success_status_is_reported() {
        let (addr, server) = serve_once("404 Not Found", "missing");
        let url = format!("http://{addr}/sales.csv");

        let err = load_table(&DataSource::Url(url.clone())).unwrap_err();
        server.join().unwrap();

        match err {
            LoadError::Status { url: got, status } => {
                assert_eq!(status, 404);
                assert_eq!(got, url);
            }
            other => panic!("expected a status error, got {other:?}"),
        }
    }

    #[test]
    fn loads_a_table_over_http() {
        let (addr, server) = serve_once("200 OK", ONE_ROW_CSV);

        let loaded = load_table(&DataSource::Url(format!("http://{addr}/sales.csv"))).unwrap();
        server.join().unwrap();

        assert_eq!(loaded.table.len(), 1);
        assert!(loaded.row_errors.is_empty());
    }
}
