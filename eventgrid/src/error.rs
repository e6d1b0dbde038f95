use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Month {month} of year {year} is out of range")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Invalid month '{0}'. Expected YYYY-MM")]
    InvalidMonthFormat(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Event source is not a valid JSON event list: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
