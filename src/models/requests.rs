//! Request DTOs for the HTTP API

use serde::Deserialize;

/// Body of `POST /sentiment`.
#[derive(Debug, Clone, Deserialize)]
pub struct SentimentRequest {
    /// Headline to score
    pub article_title: String,
}

impl SentimentRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.article_title.trim().is_empty() {
            return Some("article_title cannot be empty".to_string());
        }
        if self.article_title.len() > 1024 {
            return Some("article_title exceeds maximum length of 1024 characters".to_string());
        }
        None
    }
}

/// Body of `POST /price_prediction`.
#[derive(Debug, Clone, Deserialize)]
pub struct PricePredictionRequest {
    /// Ticker symbol to forecast
    pub ticker: String,
}

impl PricePredictionRequest {
    /// Returns an error message if validation fails, None if valid.
    ///
    /// The ticker doubles as the artifact file name, so it is restricted
    /// to symbol-safe characters.
    pub fn validate(&self) -> Option<String> {
        if self.ticker.is_empty() {
            return Some("ticker cannot be empty".to_string());
        }
        if self.ticker.len() > 16 {
            return Some("ticker exceeds maximum length of 16 characters".to_string());
        }
        if !self
            .ticker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return Some("ticker may only contain letters, digits, '.' and '-'".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_request_deserialize() {
        let json = r#"{"article_title": "Acme shares rally"}"#;
        let req: SentimentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.article_title, "Acme shares rally");
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_sentiment_request_empty_title() {
        let req = SentimentRequest {
            article_title: "   ".to_string(),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_prediction_request_valid_tickers() {
        for ticker in ["ACME", "BRK.B", "ABC-D", "X1"] {
            let req = PricePredictionRequest {
                ticker: ticker.to_string(),
            };
            assert!(req.validate().is_none(), "{ticker} should be valid");
        }
    }

    #[test]
    fn test_prediction_request_rejects_unsafe_tickers() {
        for ticker in ["", "../etc/passwd", "A B", "ABCDEFGHIJKLMNOPQ"] {
            let req = PricePredictionRequest {
                ticker: ticker.to_string(),
            };
            assert!(req.validate().is_some(), "{ticker:?} should be rejected");
        }
    }
}
