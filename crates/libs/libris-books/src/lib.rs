//! The user's books: fetching them from Google Books and rendering them as
//! JSON or CSV.

mod book;
mod encode;
mod error;
mod google;
mod negotiate;

pub use book::{Book, FileType};
pub use encode::{CSV_HEADER, encode_csv, encode_json};
pub use error::{BooksError, BooksResult};
pub use google::{
    AccessInfo, BookLibrary, GoogleBooksClient, IndustryIdentifier, Volume, VolumeInfo, Volumes,
};
pub use negotiate::{BookFormat, negotiate};
