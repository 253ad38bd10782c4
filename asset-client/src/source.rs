//! Read paths
//!
//! - JSON: `GET <endpoint>?action=GET_DATA&cb=<millis>` returning
//!   `{ devices, users, history }`
//! - CSV: one published export per sheet

use shared::{Normalizer, Snapshot, csv, util};

use crate::{ClientResult, CsvExports, HttpTransport};

/// Where the dataset is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Script endpoint answering `GET_DATA`
    Json(String),
    /// Three CSV export URLs
    Csv(CsvExports),
}

impl DataSource {
    /// Fetch and normalize the whole dataset
    pub async fn fetch<T: HttpTransport + ?Sized>(
        &self,
        transport: &T,
        normalizer: &Normalizer,
    ) -> ClientResult<Snapshot> {
        match self {
            Self::Json(endpoint) => {
                let body = transport.get_json(&get_data_url(endpoint, util::now_millis())).await?;
                Ok(normalizer.snapshot_from_json(&body))
            }
            Self::Csv(exports) => {
                let (devices, users, history) = tokio::try_join!(
                    transport.get_text(&exports.devices),
                    transport.get_text(&exports.users),
                    transport.get_text(&exports.history),
                )?;
                Ok(normalizer.snapshot(
                    &csv::parse(&devices),
                    &csv::parse(&users),
                    &csv::parse(&history),
                ))
            }
        }
    }
}

/// `GET_DATA` URL with a cache buster
pub fn get_data_url(endpoint: &str, cache_buster: i64) -> String {
    let endpoint = endpoint.trim();
    let sep = if endpoint.contains('?') { '&' } else { '?' };
    format!("{endpoint}{sep}action=GET_DATA&cb={cache_buster}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_data_url() {
        assert_eq!(
            get_data_url("https://x.test/exec", 42),
            "https://x.test/exec?action=GET_DATA&cb=42"
        );
        assert_eq!(
            get_data_url(" https://x.test/exec?key=1 ", 42),
            "https://x.test/exec?key=1&action=GET_DATA&cb=42"
        );
    }
}
