//! just enough `multipart/form-data` parsing to recover field names and values
use crate::containers::DataContainer;
use crate::error::SeedError;

/// pull the `boundary` parameter out of a `multipart/form-data` content-type
///
/// the boundary is case-sensitive, so `content_type` must not be lower-cased
pub(crate) fn boundary_of(content_type: &str) -> Result<String, SeedError> {
    let boundary =
        multer::parse_boundary(content_type).map_err(|error| invalid(&error.to_string()))?;

    if boundary.is_empty() {
        return Err(invalid("empty boundary"));
    }

    Ok(boundary)
}

/// split a part into its header block and its content
fn split_part(part: &str) -> Option<(&str, &str)> {
    part.split_once("\r\n\r\n")
        .or_else(|| part.split_once("\n\n"))
}

/// the `name` parameter of a part's `Content-Disposition` header
fn field_name(head: &str) -> Option<&str> {
    head.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(header, _)| header.trim().eq_ignore_ascii_case("content-disposition"))
        .and_then(|(_, disposition)| {
            disposition
                .split(';')
                .filter_map(|parameter| parameter.split_once('='))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("name"))
                .map(|(_, value)| value.trim().trim_matches('"'))
        })
}

fn invalid(reason: &str) -> SeedError {
    SeedError::MultipartParseError {
        reason: reason.to_string(),
    }
}

/// parse a `multipart/form-data` body into its fields
///
/// file parts contribute their raw content as the field value.
///
/// # Errors
///
/// returns [`SeedError::MultipartParseError`] when the content-type isn't
/// `multipart/form-data` or has no boundary, the body never opens or closes that boundary, or a part lacks a
/// header block or a field name
pub(crate) fn parse_multipart(body: &str, content_type: &str) -> Result<DataContainer, SeedError> {
    let boundary = boundary_of(content_type)?;
    let delimiter = format!("--{boundary}");

    let mut segments = body.split(delimiter.as_str());

    // anything before the first delimiter is preamble; no delimiter at all is an error
    segments.next();

    let mut container = DataContainer::new();
    let mut closed = false;

    for segment in segments {
        if segment.starts_with("--") {
            closed = true;
            break;
        }

        let part = segment
            .strip_prefix("\r\n")
            .or_else(|| segment.strip_prefix('\n'))
            .unwrap_or(segment);
        let part = part
            .strip_suffix("\r\n")
            .or_else(|| part.strip_suffix('\n'))
            .unwrap_or(part);

        let (head, content) = split_part(part).ok_or_else(|| invalid("part without headers"))?;
        let name = field_name(head).ok_or_else(|| invalid("part without a field name"))?;

        container.append(name, content);
    }

    if !closed {
        return Err(invalid("missing closing boundary"));
    }

    Ok(container)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT_TYPE: &str = "multipart/form-data; boundary=----WebKitFormBoundaryAbC";

    fn body() -> String {
        [
            "------WebKitFormBoundaryAbC",
            "Content-Disposition: form-data; name=\"user\"",
            "",
            "bob",
            "------WebKitFormBoundaryAbC",
            "Content-Disposition: form-data; name=\"avatar\"; filename=\"a.txt\"",
            "Content-Type: text/plain",
            "",
            "file contents",
            "------WebKitFormBoundaryAbC--",
            "",
        ]
        .join("\r\n")
    }

    /// the boundary keeps its case
    #[test]
    fn boundary_is_extracted_verbatim() {
        assert_eq!(boundary_of(CONTENT_TYPE).unwrap(), "----WebKitFormBoundaryAbC");
        assert_eq!(boundary_of("multipart/form-data; charset=utf-8; boundary=XyZ").unwrap(), "XyZ");
    }

    /// no boundary, or not multipart at all, is an error
    #[test]
    fn boundary_requires_multipart_with_boundary() {
        assert!(matches!(
            boundary_of("multipart/form-data"),
            Err(SeedError::MultipartParseError { .. })
        ));
        assert!(boundary_of("text/plain; boundary=XyZ").is_err());
    }

    /// text and file parts both become fields
    #[test]
    fn parse_multipart_extracts_fields() {
        let container = parse_multipart(&body(), CONTENT_TYPE).unwrap();

        assert_eq!(container.keys().collect::<Vec<_>>(), ["user", "avatar"]);
        assert_eq!(container.get_first("user"), Some("bob"));
        assert_eq!(container.get_first("avatar"), Some("file contents"));
    }

    /// a body that never closes the boundary is rejected
    #[test]
    fn parse_multipart_requires_closing_boundary() {
        let truncated = body().replace("------WebKitFormBoundaryAbC--", "");

        assert!(matches!(
            parse_multipart(&truncated, CONTENT_TYPE),
            Err(SeedError::MultipartParseError { .. })
        ));
    }

    /// a body unrelated to the boundary is rejected
    #[test]
    fn parse_multipart_rejects_foreign_body() {
        assert!(parse_multipart("a=1&b=2", CONTENT_TYPE).is_err());
        assert!(parse_multipart(&body(), "multipart/form-data").is_err());
    }
}
