use std::fmt;

use crate::error::{DeckError, Result};

/// Location the deck is served from, `scheme://host[:port]/path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Scheme including the trailing colon, e.g. `http:`.
    pub protocol: String,
    pub hostname: String,
    pub port: Option<u16>,
    /// Always starts with `/`.
    pub pathname: String,
}

impl Location {
    pub fn parse(url: &str) -> Result<Self> {
        let invalid = || DeckError::InvalidLocation(url.to_string());

        let (scheme, rest) = url.split_once("://").ok_or_else(invalid)?;
        let scheme_ok = scheme
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if !scheme_ok {
            return Err(invalid());
        }

        let (authority, rest) = match rest.find(['/', '?', '#']) {
            Some(i) => rest.split_at(i),
            None => (rest, ""),
        };
        let path = match rest.find(['?', '#']) {
            Some(i) => &rest[..i],
            None => rest,
        };
        let (hostname, port) = split_authority(authority).ok_or_else(invalid)?;

        Ok(Self {
            protocol: format!("{}:", scheme.to_ascii_lowercase()),
            hostname: hostname.to_string(),
            port,
            pathname: if path.is_empty() { "/" } else { path }.to_string(),
        })
    }

    /// `scheme://host[:port]`
    pub fn origin(&self) -> String {
        match self.port {
            Some(port) => format!("{}//{}:{port}", self.protocol, self.hostname),
            None => format!("{}//{}", self.protocol, self.hostname),
        }
    }

    pub fn with_path(&self, pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            ..self.clone()
        }
    }

    /// First non-empty segment of the path, if any.
    pub fn first_segment(&self) -> Option<&str> {
        self.pathname.split('/').nth(1).filter(|s| !s.is_empty())
    }
}

/// Splits `host[:port]`; a bracketed IPv6 host keeps its brackets.
fn split_authority(authority: &str) -> Option<(&str, Option<u16>)> {
    let (host, port) = if authority.starts_with('[') {
        let end = authority.find(']')?;
        let (host, rest) = authority.split_at(end + 1);
        match rest {
            "" => (host, None),
            _ => (host, Some(rest.strip_prefix(':')?)),
        }
    } else {
        match authority.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (authority, None),
        }
    };
    match port {
        Some(port) => Some((host, Some(port.parse::<u16>().ok()?))),
        None => Some((host, None)),
    }
}

impl Default for Location {
    fn default() -> Self {
        Self {
            protocol: "diorama:".to_string(),
            hostname: "localhost".to_string(),
            port: None,
            pathname: "/".to_string(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin(), self.pathname)
    }
}

/// Path a deck pushes for the slide at `index`.
pub fn slide_path(index: usize) -> String {
    format!("/{index}")
}

/// Slide index encoded in the location, or 0 when missing, non-numeric or
/// not below `slide_count`.
///
/// Surrounding whitespace and an integral decimal form such as `3.0` are
/// accepted.
pub fn initial_index(location: &Location, slide_count: usize) -> usize {
    location
        .first_segment()
        .and_then(parse_index)
        .filter(|&i| i < slide_count)
        .unwrap_or(0)
}

fn parse_index(segment: &str) -> Option<usize> {
    let segment = segment.trim();
    if let Ok(index) = segment.parse::<usize>() {
        return Some(index);
    }
    let value = segment.parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0).then_some(value as usize)
}

/// Session history the deck mirrors its position into.
pub trait History {
    fn location(&self) -> &Location;

    /// Adds a new entry without reloading anything.
    fn push_state(&mut self, pathname: &str);

    /// Number of entries in the session history.
    fn length(&self) -> usize;
}

/// Push-only history kept in memory.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Location>,
}

impl MemoryHistory {
    pub fn new(location: Location) -> Self {
        Self {
            entries: vec![location],
        }
    }

    pub fn entries(&self) -> &[Location] {
        &self.entries
    }
}

impl History for MemoryHistory {
    fn location(&self) -> &Location {
        // `new` seeds one entry and entries are never removed
        &self.entries[self.entries.len() - 1]
    }

    fn push_state(&mut self, pathname: &str) {
        let next = self.location().with_path(pathname);
        tracing::trace!(location = %next, "history push");
        self.entries.push(next);
    }

    fn length(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_url() {
        let loc = Location::parse("http://localhost:8080/3/extra").unwrap();
        assert_eq!(loc.protocol, "http:");
        assert_eq!(loc.hostname, "localhost");
        assert_eq!(loc.port, Some(8080));
        assert_eq!(loc.pathname, "/3/extra");
        assert_eq!(loc.origin(), "http://localhost:8080");
        assert_eq!(loc.first_segment(), Some("3"));
    }

    #[test]
    fn test_parse_without_path_or_port() {
        let loc = Location::parse("https://talks.example.com").unwrap();
        assert_eq!(loc.pathname, "/");
        assert_eq!(loc.port, None);
        assert_eq!(loc.origin(), "https://talks.example.com");
        assert_eq!(loc.first_segment(), None);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Location::parse("localhost/3").is_err());
        assert!(Location::parse("://host/").is_err());
        assert!(Location::parse("http://host:notaport/").is_err());
        assert!(Location::parse("http://[::1/").is_err());
        assert!(Location::parse("http://[::1]8080/").is_err());
    }

    #[test]
    fn test_initial_index() {
        let base = Location::default();
        assert_eq!(initial_index(&base.with_path("/3"), 5), 3);
        assert_eq!(initial_index(&base.with_path("/"), 5), 0);
        assert_eq!(initial_index(&base.with_path("/abc"), 5), 0);
        assert_eq!(initial_index(&base.with_path("/-1"), 5), 0);
        assert_eq!(initial_index(&base.with_path("/5"), 5), 0);
        assert_eq!(initial_index(&base.with_path("/4/notes"), 5), 4);
    }

    #[test]
    fn test_initial_index_ignores_query_and_fragment() {
        let loc = Location::parse("http://localhost:3000/3?theme=dark").unwrap();
        assert_eq!(loc.pathname, "/3");
        assert_eq!(initial_index(&loc, 5), 3);

        let loc = Location::parse("http://localhost:3000/2#top").unwrap();
        assert_eq!(loc.pathname, "/2");
        assert_eq!(initial_index(&loc, 5), 2);

        let loc = Location::parse("http://localhost:3000?slide=4").unwrap();
        assert_eq!(loc.hostname, "localhost");
        assert_eq!(loc.port, Some(3000));
        assert_eq!(loc.pathname, "/");
        assert_eq!(initial_index(&loc, 5), 0);
    }

    #[test]
    fn test_initial_index_from_ipv6_host() {
        let loc = Location::parse("http://[::1]/3").unwrap();
        assert_eq!(loc.hostname, "[::1]");
        assert_eq!(loc.port, None);
        assert_eq!(loc.origin(), "http://[::1]");
        assert_eq!(initial_index(&loc, 5), 3);

        let loc = Location::parse("http://[::1]:8080/1").unwrap();
        assert_eq!(loc.port, Some(8080));
        assert_eq!(loc.to_string(), "http://[::1]:8080/1");
        assert_eq!(initial_index(&loc, 5), 1);
    }

    #[test]
    fn test_initial_index_lenient_numbers() {
        let base = Location::default();
        assert_eq!(initial_index(&base.with_path("/ 3"), 5), 3);
        assert_eq!(initial_index(&base.with_path("/3.0"), 5), 3);
        assert_eq!(initial_index(&base.with_path("/3.5"), 5), 0);
        assert_eq!(initial_index(&base.with_path("/NaN"), 5), 0);
        assert_eq!(initial_index(&base.with_path("/inf"), 5), 0);
    }

    #[test]
    fn test_push_keeps_origin() {
        let mut history = MemoryHistory::new(Location::parse("http://localhost:3000/").unwrap());
        history.push_state(&slide_path(2));
        assert_eq!(history.length(), 2);
        assert_eq!(history.location().to_string(), "http://localhost:3000/2");
        assert_eq!(history.entries()[0].pathname, "/");
    }
}
