use thiserror::Error;

pub type BooksResult<T> = Result<T, BooksError>;

#[derive(Debug, Error)]
pub enum BooksError {
    #[error("Books API rejected the access token")]
    TokenRejected,

    #[error("Couldn't load the user's volumes: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Books API answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Couldn't encode the books as JSON: {0}")]
    EncodeJson(#[from] serde_json::Error),

    #[error("Couldn't encode the books as CSV: {0}")]
    EncodeCsv(#[from] csv::Error),
}
