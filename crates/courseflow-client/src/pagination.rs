//! `Link` header pagination.

/// Extract the `rel="next"` target from a `Link` header. Malformed headers
/// yield `None`, which callers treat as "no next page" rather than an
/// error.
pub fn parse_next_link(link_header: &str) -> Option<String> {
    for part in link_header.split(',') {
        let sections: Vec<&str> = part.split(';').collect();
        if sections.len() != 2 {
            continue;
        }
        let url_part = sections[0].trim();
        let rel_part = sections[1].trim();
        if rel_part == "rel=\"next\"" {
            let url = url_part.trim_start_matches('<').trim_end_matches('>');
            return Some(url.to_string());
        }
    }
    None
}
