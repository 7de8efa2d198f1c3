use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HttpMethod {
    Get,
    Post,
}
impl HttpMethod {
    /// Parses a method name as found in the `fetchOptions.method` context
    /// entry. Anything other than `GET` (in any case) is treated as `POST`.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("GET") {
            Self::Get
        } else {
            Self::Post
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}
impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
