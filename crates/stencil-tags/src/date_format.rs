//! Formats a floating-point epoch timestamp to a specified pattern.
//!
//!     dateFormat(<secondsSinceEpoch>, <pattern?>)
//!
//! If no pattern is supplied, a default is used. Patterns are chrono
//! strftime specifiers; rendering is in UTC.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use stencil_core::{Deferred, Document};

use crate::context::{TagContext, TagRenderer};
use crate::error::Result;

/// Pattern used when the second parameter is omitted.
const DEFAULT_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// The `dateFormat` tag renderer.
#[derive(Debug, Default)]
pub struct DateFormat;

impl DateFormat {
    pub fn new() -> Self {
        DateFormat
    }
}

impl TagRenderer for DateFormat {
    fn render(&self, tag: TagContext) -> Result<Deferred> {
        match tag.parameters.len() {
            1 | 2 => {}
            n => {
                return Err(tag.error(format!(
                    "Invalid parameter count: {}. 1 or 2 required.",
                    n
                )))
            }
        }

        // Expect the timestamp to be a floating point number.
        let Some(timestamp) = tag.parameters[0].as_double() else {
            return Ok(Deferred::ready(Document::Null));
        };

        let pattern = match tag.parameters.get(1).and_then(|p| p.as_string()) {
            Some(custom) => custom.to_owned(),
            None => DEFAULT_PATTERN.to_owned(),
        };

        let seconds = timestamp.div_euclid(1.0) as i64;
        let nanos = (timestamp.rem_euclid(1.0) * 1e9) as u32;
        let Some(instant) = DateTime::<Utc>::from_timestamp(seconds, nanos) else {
            return Ok(Deferred::ready(Document::Null));
        };

        // An unformattable pattern degrades to null, like any other
        // lenient parameter problem.
        let mut rendered = String::new();
        if write!(rendered, "{}", instant.format(&pattern)).is_err() {
            return Ok(Deferred::ready(Document::Null));
        }

        Ok(Deferred::ready(Document::String(rendered)))
    }
}
