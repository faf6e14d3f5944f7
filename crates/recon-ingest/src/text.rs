//! Delimited text decoding and parsing.

use std::borrow::Cow;

use crate::error::{IngestError, Result};
use crate::table::RawTable;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Candidate delimiters, most specific first.
const DELIMITER_CANDIDATES: [u8; 3] = [b'\t', b';', b','];

/// Decodes raw text bytes.
///
/// UTF-8 is tried first (a leading BOM is dropped). Bytes that are not valid
/// UTF-8 are decoded as Windows-1252, the usual encoding of ERP exports saved
/// from Excel. UTF-16 input is rejected.
pub fn decode_text(bytes: &[u8]) -> Result<Cow<'_, str>> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(IngestError::UnsupportedEncoding {
            encoding: "UTF-16 LE",
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::UnsupportedEncoding {
            encoding: "UTF-16 BE",
        });
    }

    let body = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(body) {
        Ok(text) => Ok(Cow::Borrowed(text)),
        Err(_) => {
            tracing::debug!("input is not valid UTF-8, decoding as Windows-1252");
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(body);
            Ok(decoded)
        }
    }
}

/// Picks the delimiter that splits the first lines most consistently.
///
/// Each candidate is scored by the number of sample lines sharing the first
/// line's field count, weighted by that count. A candidate must split the
/// first line into more than one field. Falls back to comma.
pub fn sniff_delimiter(content: &str) -> u8 {
    let sample: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(10)
        .collect();

    let mut best = b',';
    let mut best_score = 0usize;

    for delimiter in DELIMITER_CANDIDATES {
        let counts: Vec<usize> = sample
            .iter()
            .map(|line| field_count(line, delimiter))
            .collect();
        let Some(&target) = counts.first() else {
            break;
        };
        if target <= 1 {
            continue;
        }
        let consistent = counts.iter().filter(|&&count| count == target).count();
        let score = consistent * target;
        if score > best_score {
            best_score = score;
            best = delimiter;
        }
    }

    best
}

fn field_count(line: &str, delimiter: u8) -> usize {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .and_then(std::result::Result::ok)
        .map_or(1, |record| record.len())
}

/// Parses delimited text into a header and string rows.
///
/// The first record is the header. Rows may be ragged; blank fields become
/// `None`.
pub fn read_delimited(content: &str, delimiter: u8) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader.records();
    let header = match records.next() {
        Some(record) => record?,
        None => return Err(IngestError::NoHeader),
    };
    let headers: Vec<String> = header.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestError::NoHeader);
    }

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    let trimmed = field.trim();
                    (!trimmed.is_empty()).then(|| trimmed.to_string())
                })
                .collect(),
        );
    }

    Ok(RawTable::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_semicolon() {
        let content = "Item;Descrição;Quantidade Não Alocada\nITEM001;Parafuso;10\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn sniffs_comma() {
        assert_eq!(sniff_delimiter("Item,Endereço\nITEM001,A0001\n"), b',');
    }

    #[test]
    fn sniffs_tab() {
        assert_eq!(sniff_delimiter("Item\tEndereço\nITEM001\tA0001\n"), b'\t');
    }

    #[test]
    fn semicolon_wins_over_decimal_commas() {
        let content = "Item;Qtd Atual\nITEM001;2,5\nITEM002;3,0\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn single_column_falls_back_to_comma() {
        assert_eq!(sniff_delimiter("Item\nITEM001\n"), b',');
        assert_eq!(sniff_delimiter(""), b',');
    }

    #[test]
    fn decodes_utf8_and_strips_bom() {
        let bytes = b"\xEF\xBB\xBFItem\n";
        assert_eq!(decode_text(bytes).unwrap(), "Item\n");
    }

    #[test]
    fn falls_back_to_windows_1252() {
        // "Descrição" in Windows-1252
        let bytes = b"Descri\xE7\xE3o";
        assert_eq!(decode_text(bytes).unwrap(), "Descrição");
    }

    #[test]
    fn rejects_utf16() {
        let err = decode_text(&[0xFF, 0xFE, b'I', 0]).unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE"
            }
        ));
    }

    #[test]
    fn reads_ragged_rows_with_blank_fields() {
        let table = read_delimited("Item,Endereço\nITEM001, A0001 \nITEM002,\nITEM003\n", b',')
            .unwrap();
        assert_eq!(table.headers(), ["Item", "Endereço"]);
        assert_eq!(table.rows().len(), 3);
        assert_eq!(table.rows()[0][1].as_deref(), Some("A0001"));
        assert_eq!(table.rows()[1][1], None);
        assert_eq!(table.rows()[2].len(), 1);
    }

    #[test]
    fn empty_input_has_no_header() {
        assert!(matches!(read_delimited("", b','), Err(IngestError::NoHeader)));
    }
}
