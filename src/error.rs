#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("feed decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),

    #[error("fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
