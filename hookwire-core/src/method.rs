//! HTTP methods and method sets for route matching.

use crate::error::MethodError;
use bitflags::bitflags;
use serde::{Serialize, Serializer};
use std::{fmt, str::FromStr};

/// The method of an incoming request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `HEAD`
    Head,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `OPTIONS`
    Options,
}

impl Method {
    /// Every method, in declaration order.
    pub const ALL: [Method; 7] = [
        Method::Get,
        Method::Head,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
        Method::Options,
    ];

    /// The canonical upper-case name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
        }
    }
}

impl FromStr for Method {
    type Err = MethodError;

    /// Parses a method name case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MethodError(s.to_string()))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Method {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

bitflags! {
    /// The set of methods a route accepts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MethodFilter: u8 {
        /// `GET`
        const GET = 1 << 0;
        /// `HEAD`
        const HEAD = 1 << 1;
        /// `POST`
        const POST = 1 << 2;
        /// `PUT`
        const PUT = 1 << 3;
        /// `PATCH`
        const PATCH = 1 << 4;
        /// `DELETE`
        const DELETE = 1 << 5;
        /// `OPTIONS`
        const OPTIONS = 1 << 6;
        /// Every method.
        const ANY = Self::GET.bits()
            | Self::HEAD.bits()
            | Self::POST.bits()
            | Self::PUT.bits()
            | Self::PATCH.bits()
            | Self::DELETE.bits()
            | Self::OPTIONS.bits();
    }
}

impl MethodFilter {
    /// Returns true if `method` is part of this set.
    pub fn accepts(self, method: Method) -> bool {
        self.contains(MethodFilter::from(method))
    }
}

impl From<Method> for MethodFilter {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => MethodFilter::GET,
            Method::Head => MethodFilter::HEAD,
            Method::Post => MethodFilter::POST,
            Method::Put => MethodFilter::PUT,
            Method::Patch => MethodFilter::PATCH,
            Method::Delete => MethodFilter::DELETE,
            Method::Options => MethodFilter::OPTIONS,
        }
    }
}

impl fmt::Display for MethodFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == MethodFilter::ANY {
            return f.write_str("ANY");
        }
        let names: Vec<&str> = Method::ALL
            .into_iter()
            .filter(|m| self.accepts(*m))
            .map(Method::as_str)
            .collect();
        f.write_str(&names.join("|"))
    }
}
