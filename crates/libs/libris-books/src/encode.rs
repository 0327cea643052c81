//! JSON and CSV renderings of a book list.

use crate::book::Book;
use crate::error::BooksResult;

pub const CSV_HEADER: [&str; 6] = [
    "Title",
    "Author",
    "ISBN",
    "My Rating",
    "Average Rating",
    "Publisher",
];

pub fn encode_json(books: &[Book]) -> BooksResult<Vec<u8>> {
    Ok(serde_json::to_vec(books)?)
}

/// One header row, then one row per book. "My Rating" is always empty.
pub fn encode_csv(books: &[Book]) -> BooksResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;

    for book in books {
        let authors = book.authors.join(", ");
        let rating = format!("{:.2}", book.average_rating);

        writer.write_record([
            book.title.as_str(),
            authors.as_str(),
            book.identifier.as_str(),
            "",
            rating.as_str(),
            book.publisher.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::FileType;

    fn books() -> Vec<Book> {
        vec![
            Book {
                title: "Good Omens".to_string(),
                authors: vec!["Terry Pratchett".to_string(), "Neil Gaiman".to_string()],
                identifier: "9780060853983".to_string(),
                identifier_type: "ISBN_13".to_string(),
                average_rating: 4.25,
                publisher: "Harper".to_string(),
                file_type: FileType::Epub,
            },
            Book {
                title: "notes".to_string(),
                authors: Vec::new(),
                identifier: String::new(),
                identifier_type: String::new(),
                average_rating: 0.0,
                publisher: String::new(),
                file_type: FileType::Pdf,
            },
        ]
    }

    #[test]
    fn test_csv_layout() {
        let csv = String::from_utf8(encode_csv(&books()).unwrap()).unwrap();

        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Title,Author,ISBN,My Rating,Average Rating,Publisher",
                "Good Omens,\"Terry Pratchett, Neil Gaiman\",9780060853983,,4.25,Harper",
                "notes,,,,0.00,",
            ]
        );
    }

    #[test]
    fn test_csv_of_empty_list_is_just_the_header() {
        let csv = String::from_utf8(encode_csv(&[]).unwrap()).unwrap();
        assert_eq!(
            csv.lines().collect::<Vec<_>>(),
            vec!["Title,Author,ISBN,My Rating,Average Rating,Publisher"]
        );
    }

    #[test]
    fn test_json_is_an_array() {
        let json: serde_json::Value = serde_json::from_slice(&encode_json(&books()).unwrap()).unwrap();

        assert_eq!(json.as_array().map(Vec::len), Some(2));
        assert_eq!(json[0]["identifierType"], "ISBN_13");
        assert_eq!(json[0]["averageRating"], 4.25);
        assert_eq!(json[1]["fileType"], "PDF");
        assert!(json[1].get("averageRating").is_none());
    }

    #[test]
    fn test_json_of_empty_list() {
        assert_eq!(encode_json(&[]).unwrap(), b"[]");
    }
}
