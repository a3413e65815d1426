use thiserror::Error;

/// Top-level error type used across the entire dashboard.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Malformed reading: non-finite value, negative or absent timestamp.
    #[error("invalid sample: {0}")]
    InvalidSample(String),

    /// Timestamp went backwards relative to the last stored sample.
    #[error("out-of-order sample on '{channel}': {got} < last {last}")]
    OutOfOrderSample {
        channel: String,
        last:    i64,
        got:     i64,
    },

    #[error("unknown channel: {0}")]
    UnknownChannel(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("ingest error: {0}")]
    Ingest(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl BoardError {
    /// `true` for errors that only reject a single sample.  The owning
    /// channel keeps accepting later readings.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidSample(_) | Self::OutOfOrderSample { .. } | Self::UnknownChannel(_)
        )
    }
}

pub type Result<T, E = BoardError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_errors_are_rejections() {
        assert!(BoardError::InvalidSample("nan".into()).is_rejection());
        assert!(BoardError::OutOfOrderSample {
            channel: "light".into(),
            last:    5,
            got:     4,
        }
        .is_rejection());
        assert!(!BoardError::Config("bad".into()).is_rejection());
    }

    #[test]
    fn out_of_order_message_names_channel() {
        let err = BoardError::OutOfOrderSample {
            channel: "temperature".into(),
            last:    5,
            got:     4,
        };
        assert_eq!(
            err.to_string(),
            "out-of-order sample on 'temperature': 4 < last 5"
        );
    }
}
